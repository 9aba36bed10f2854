use std::env;

use crate::error::AppError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub auto_migrate: bool,
}

impl Config {
    /// Reads settings from the process environment.
    ///
    /// `DATABASE_URL` is required. `DATABASE_MAX_CONNECTIONS` defaults to 5 and
    /// `AUTO_MIGRATE` defaults to `true`.
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL must be set".into()))?;

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                AppError::Config(format!(
                    "DATABASE_MAX_CONNECTIONS must be a positive number, got {:?}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let auto_migrate = match env::var("AUTO_MIGRATE") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!("AUTO_MIGRATE must be a boolean, got {:?}", raw))
            })?,
            Err(_) => true,
        };

        Ok(Self {
            database_url,
            max_connections,
            auto_migrate,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases live in one test since they share process-wide env vars.
    #[test]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "postgres://test");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("AUTO_MIGRATE");

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.max_connections, 5);
        assert!(config.auto_migrate);

        env::set_var("DATABASE_MAX_CONNECTIONS", "12");
        env::set_var("AUTO_MIGRATE", "off");

        let config = Config::from_env().unwrap();

        assert_eq!(config.max_connections, 12);
        assert!(!config.auto_migrate);

        env::set_var("DATABASE_MAX_CONNECTIONS", "lots");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        // A pool without capacity would only fail later, on first acquire.
        env::set_var("DATABASE_MAX_CONNECTIONS", "0");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("AUTO_MIGRATE");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
