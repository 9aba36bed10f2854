use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;
use crate::models::id::{assign_id, IdGenerator};
use crate::models::schema::{Column, ColumnDefault, Entity, SqlType, TableSchema};
use crate::models::validation::required;

pub const DEFAULT_PROVIDER: &str = "local";
pub const DEFAULT_PHOTO: &str = "default.png";

/// Storage layout of the `users` table.
pub const USERS: TableSchema = TableSchema {
    name: "users",
    columns: &[
        Column::new("id", SqlType::Text).primary_key(),
        Column::new("name", SqlType::Varchar(100)).not_null(),
        Column::new("email", SqlType::Varchar(100)).not_null().unique(),
        Column::new("password", SqlType::Varchar(100)).not_null(),
        Column::new("role", SqlType::Varchar(50)).not_null(),
        Column::new("provider", SqlType::Varchar(50))
            .not_null()
            .default_to(ColumnDefault::Text(DEFAULT_PROVIDER)),
        Column::new("photo", SqlType::Text)
            .not_null()
            .default_to(ColumnDefault::Text(DEFAULT_PHOTO)),
        Column::new("verified", SqlType::Boolean)
            .not_null()
            .default_to(ColumnDefault::Bool(false)),
        Column::new("verification_code", SqlType::Varchar(100)),
        Column::new("password_reset_token", SqlType::Varchar(100)),
        Column::new("password_reset_at", SqlType::Timestamp)
            .not_null()
            .default_to(ColumnDefault::CurrentTimestamp),
        Column::new("created_at", SqlType::Timestamp)
            .not_null()
            .default_to(ColumnDefault::CurrentTimestamp),
        Column::new("updated_at", SqlType::Timestamp)
            .not_null()
            .default_to(ColumnDefault::CurrentTimestamp),
    ],
};

/// A user account as stored in the database.
///
/// `provider`, `photo` and `verified` are optional in memory; `None` means the
/// column default applies. Read them through the accessors to get the resolved value.
///
/// Serializing a `User` never writes the password hash, verification code or
/// reset token; API responses go through `filter_user_record`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Password hash, produced outside this crate.
    #[serde(default, skip_serializing)]
    pub password: String,
    pub role: String,
    pub provider: Option<String>,
    pub photo: Option<String>,
    pub verified: Option<bool>,
    #[serde(skip_serializing)]
    pub verification_code: Option<String>,
    #[serde(skip_serializing)]
    pub password_reset_token: Option<String>,
    pub password_reset_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new `User` with a freshly generated identity.
    ///
    /// Timestamps are set to the current time. If the identifier source fails,
    /// no user is created.
    pub fn new(
        ids: &impl IdGenerator,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<Self, AppError> {
        let now = Utc::now();
        Ok(Self {
            id: assign_id(ids)?,
            name: name.into(),
            email: email.into(),
            password: password_hash.into(),
            role: role.into(),
            provider: None,
            photo: None,
            verified: None,
            verification_code: None,
            password_reset_token: None,
            password_reset_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    /// Builds a `User` from a sign-up payload. An empty `photo` keeps the default.
    pub fn from_sign_up(
        ids: &impl IdGenerator,
        input: &SignUpInput,
        password_hash: impl Into<String>,
    ) -> Result<Self, AppError> {
        let mut user = Self::new(ids, &input.name, &input.email, password_hash, &input.role)?;
        if !input.photo.is_empty() {
            user.photo = Some(input.photo.clone());
        }
        Ok(user)
    }

    pub fn provider(&self) -> &str {
        self.provider.as_deref().unwrap_or(DEFAULT_PROVIDER)
    }

    pub fn photo(&self) -> &str {
        self.photo.as_deref().unwrap_or(DEFAULT_PHOTO)
    }

    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }
}

impl Entity for User {
    const SCHEMA: &'static TableSchema = &USERS;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpInput {
    #[validate(custom = "required")]
    pub name: String,
    #[validate(custom = "required")]
    pub email: String,
    #[validate(custom = "required", length(min = 8, code = "min"))]
    pub password: String,
    #[serde(rename = "passwordConfirm")]
    #[validate(custom = "required", length(min = 8, code = "min"))]
    pub password_confirm: String,
    #[serde(default)]
    pub photo: String,
    #[validate(custom = "required")]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInInput {
    #[validate(custom = "required")]
    pub email: String,
    #[validate(custom = "required")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordInput {
    #[validate(custom = "required")]
    pub email: String,
}

/// Payload for choosing a new password.
///
/// Both fields carry the same `min = 8` rule as `SignUpInput`, which is stricter
/// than a presence check alone.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordInput {
    #[validate(custom = "required", length(min = 8, code = "min"))]
    pub password: String,
    #[serde(rename = "passwordConfirm")]
    #[validate(custom = "required", length(min = 8, code = "min"))]
    pub password_confirm: String,
}
