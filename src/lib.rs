#![doc = "The `taskledger` library crate."]
#![doc = ""]
#![doc = "Persistence models and request/response DTOs for a user and task management"]
#![doc = "backend: entity schemas with identity assignment, validated input payloads,"]
#![doc = "response filtering that strips sensitive fields, and a thin PostgreSQL"]
#![doc = "storage mapping. HTTP routing and authentication live outside this crate."]

pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use crate::error::AppError;
pub use crate::models::{
    filter_task_record, filter_user_record, validate_struct, Task, TaskResponse, User,
    UserResponse, Violation,
};
