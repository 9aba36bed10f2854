//! PostgreSQL storage mapping.
//!
//! Statements are rendered from each entity's [`TableSchema`]. Unique and
//! foreign-key constraints are enforced by the database; their errors come back
//! unchanged inside `AppError::DatabaseError`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::error::AppError;
use crate::models::schema::Entity;
use crate::models::{Task, User, TASKS, USERS};

pub async fn connect(config: &Config) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Creates the `users` and `tasks` tables if they do not exist.
///
/// `users` goes first since `tasks.user_id` references it.
pub async fn migrate(pool: &PgPool) -> Result<(), AppError> {
    for schema in [&USERS, &TASKS] {
        let sql = schema.create_table_sql();
        log::debug!("migrating table {}", schema.name);
        sqlx::query(&sql).execute(pool).await?;
    }
    Ok(())
}

/// Inserts a new user row and returns it as stored.
///
/// Unset optional fields are written with their resolved defaults.
pub async fn insert_user(pool: &PgPool, user: &User) -> Result<User, AppError> {
    let sql = User::SCHEMA.insert_sql();
    let stored = sqlx::query_as::<_, User>(&sql)
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.role)
        .bind(user.provider())
        .bind(user.photo())
        .bind(user.is_verified())
        .bind(&user.verification_code)
        .bind(&user.password_reset_token)
        .bind(user.password_reset_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(pool)
        .await?;
    log::debug!("inserted user {}", stored.id());
    Ok(stored)
}

pub async fn insert_task(pool: &PgPool, task: &Task) -> Result<Task, AppError> {
    let sql = Task::SCHEMA.insert_sql();
    let stored = sqlx::query_as::<_, Task>(&sql)
        .bind(&task.id)
        .bind(&task.user_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(task.deadline)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(pool)
        .await?;
    log::debug!("inserted task {} for user {}", stored.id(), stored.user_id);
    Ok(stored)
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let sql = User::SCHEMA.select_by_sql("email");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Fetches a task by identity; a missing row is `AppError::NotFound`.
pub async fn find_task(pool: &PgPool, id: &str) -> Result<Task, AppError> {
    let sql = Task::SCHEMA.select_by_sql("id");
    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(task)
}

pub async fn tasks_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Task>, AppError> {
    let sql = format!(
        "{} ORDER BY created_at DESC",
        Task::SCHEMA.select_by_sql("user_id")
    );
    let tasks = sqlx::query_as::<_, Task>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_insert_binds_match_schema() {
        // insert_user binds exactly one value per column.
        assert_eq!(USERS.columns.len(), 13);
        assert!(USERS.insert_sql().ends_with(
            "RETURNING id, name, email, password, role, provider, photo, verified, \
             verification_code, password_reset_token, password_reset_at, created_at, updated_at"
        ));
    }

    #[test]
    fn test_task_insert_binds_match_schema() {
        assert_eq!(
            TASKS.insert_sql(),
            "INSERT INTO tasks (id, user_id, title, description, status, deadline, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, user_id, title, description, status, deadline, created_at, updated_at"
        );
    }

    #[test]
    fn test_rendered_ddl_carries_constraints() {
        let users = USERS.create_table_sql();
        let tasks = TASKS.create_table_sql();

        assert!(users.contains("email VARCHAR(100) NOT NULL UNIQUE"));
        assert!(users.contains("provider VARCHAR(50) NOT NULL DEFAULT 'local'"));
        assert!(users.contains("verified BOOLEAN NOT NULL DEFAULT FALSE"));
        assert!(tasks.contains("user_id TEXT NOT NULL REFERENCES users(id)"));
    }
}
