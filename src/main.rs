use taskledger::config::Config;
use taskledger::{store, AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let pool = store::connect(&config).await?;

    if config.auto_migrate {
        store::migrate(&pool).await?;
        log::info!("schema is up to date");
    } else {
        log::info!("AUTO_MIGRATE disabled, skipping schema migration");
    }

    pool.close().await;
    Ok(())
}
