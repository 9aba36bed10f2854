use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;
use crate::models::id::{assign_id, IdGenerator};
use crate::models::schema::{Column, ColumnDefault, Entity, SqlType, TableSchema};
use crate::models::validation::required;

/// Conventional status values. `status` is free-form; these are what clients send.
pub const STATUS_TO_DO: &str = "To Do";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_COMPLETED: &str = "Completed";

/// Storage layout of the `tasks` table.
pub const TASKS: TableSchema = TableSchema {
    name: "tasks",
    columns: &[
        Column::new("id", SqlType::Text).primary_key(),
        Column::new("user_id", SqlType::Text)
            .not_null()
            .references("users", "id"),
        Column::new("title", SqlType::Varchar(255)).not_null(),
        Column::new("description", SqlType::Text),
        Column::new("status", SqlType::Varchar(50)).not_null(),
        Column::new("deadline", SqlType::Timestamp),
        Column::new("created_at", SqlType::Timestamp)
            .not_null()
            .default_to(ColumnDefault::CurrentTimestamp),
        Column::new("updated_at", SqlType::Timestamp)
            .not_null()
            .default_to(ColumnDefault::CurrentTimestamp),
    ],
};

/// Input structure for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(custom = "required")]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[validate(custom = "required")]
    pub status: String,

    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

/// Represents a task entity as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: String,
    /// Identity of the owning user; the foreign key is enforced by the database.
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` owned by `user_id` with a freshly generated identity.
    /// An empty description is stored as `NULL`.
    pub fn new(
        ids: &impl IdGenerator,
        user_id: impl Into<String>,
        input: TaskInput,
    ) -> Result<Self, AppError> {
        let now = Utc::now();
        Ok(Self {
            id: assign_id(ids)?,
            user_id: user_id.into(),
            title: input.title,
            description: Some(input.description).filter(|d| !d.is_empty()),
            status: input.status,
            deadline: input.deadline,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Entity for Task {
    const SCHEMA: &'static TableSchema = &TASKS;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::id::TimeOrdered;
    use crate::models::validation::validate_struct;

    fn input() -> TaskInput {
        TaskInput {
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            status: STATUS_TO_DO.to_string(),
            deadline: Some(Utc::now()),
        }
    }

    #[test]
    fn test_task_creation() {
        let owner = "22222222-2222-2222-2222-222222222222";
        let task = Task::new(&TimeOrdered, owner, input()).unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.user_id, owner);
        assert_eq!(task.status, "To Do");
        assert_eq!(task.description.as_deref(), Some("Quarterly numbers"));
        assert_ne!(task.id, owner);
    }

    #[test]
    fn test_empty_description_is_stored_as_null() {
        let task = Task::new(
            &TimeOrdered,
            "owner",
            TaskInput {
                description: String::new(),
                ..input()
            },
        )
        .unwrap();
        assert!(task.description.is_none());
    }

    #[test]
    fn test_task_validation() {
        assert!(validate_struct(&input()).is_empty());

        let invalid_input = TaskInput {
            title: "".to_string(),
            status: "".to_string(),
            ..input()
        };
        let fields: Vec<String> = validate_struct(&invalid_input)
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, vec!["TaskInput.title", "TaskInput.status"]);
    }

    #[test]
    fn test_task_input_defaults_optional_fields() {
        let input: TaskInput = serde_json::from_str(r#"{"title":"t","status":"Completed"}"#).unwrap();
        assert!(input.description.is_empty());
        assert!(input.deadline.is_none());
    }

    #[test]
    fn test_tasks_schema_references_users() {
        let fk = TASKS.column("user_id").unwrap().references.unwrap();
        assert_eq!((fk.table, fk.column), ("users", "id"));
    }
}
