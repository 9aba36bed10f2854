//! Response shapes returned to API clients.
//!
//! Filtering copies the public fields of a stored entity into its response DTO.
//! Password hashes, verification codes and reset tokens never cross this boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::task::Task;
use crate::models::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub photo: String,
    pub provider: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn parse_identity(kind: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::InvalidIdentity(format!("{} {:?}: {}", kind, raw, e)))
}

/// Projects a `User` into its API shape, resolving provider and photo defaults.
pub fn filter_user_record(user: &User) -> Result<UserResponse, AppError> {
    Ok(UserResponse {
        id: parse_identity("user id", &user.id)?,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        photo: user.photo().to_string(),
        provider: user.provider().to_string(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    })
}

pub fn filter_task_record(task: &Task) -> Result<TaskResponse, AppError> {
    Ok(TaskResponse {
        id: parse_identity("task id", &task.id)?,
        user_id: parse_identity("user id", &task.user_id)?,
        title: task.title.clone(),
        description: task.description.clone().unwrap_or_default(),
        status: task.status.clone(),
        deadline: task.deadline,
        created_at: task.created_at,
        updated_at: task.updated_at,
    })
}

impl TryFrom<&User> for UserResponse {
    type Error = AppError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        filter_user_record(user)
    }
}

impl TryFrom<&Task> for TaskResponse {
    type Error = AppError;

    fn try_from(task: &Task) -> Result<Self, Self::Error> {
        filter_task_record(task)
    }
}
