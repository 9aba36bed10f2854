//! Field-level validation of request payloads.
//!
//! Constraints are declared on each input DTO with `validator` attributes.
//! [`validate_struct`] runs them and flattens the result into an ordered list of
//! [`Violation`]s, following the field order of the DTO.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::models::task::TaskInput;
use crate::models::user::{ForgotPasswordInput, ResetPasswordInput, SignInInput, SignUpInput};

pub const REQUIRED: &str = "required";

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// `<Struct>.<field>`, using the field's JSON name as clients send it
    /// (`SignUpInput.email`, `SignUpInput.passwordConfirm`), not a capitalised
    /// Go-style namespace such as `SignUpInput.Email`.
    pub field: String,
    /// The violated constraint, e.g. `required` or `min`.
    pub tag: String,
    /// The constraint's parameter, e.g. `8` for `min`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Violation {
    fn from_error(field: String, error: &ValidationError) -> Self {
        let value = error
            .params
            .get(error.code.as_ref())
            .map(|param| match param {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        Self {
            field,
            tag: error.code.to_string(),
            value,
        }
    }
}

/// Presence check for string fields: the empty string counts as missing.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(REQUIRED));
    }
    Ok(())
}

mod private {
    pub trait Sealed {}
}

/// The closed set of payloads that can be validated.
pub trait Validated: Validate + private::Sealed {
    const NAME: &'static str;
    /// `(struct field, JSON field)` pairs in declaration order.
    const FIELDS: &'static [(&'static str, &'static str)];
}

impl private::Sealed for SignUpInput {}
impl Validated for SignUpInput {
    const NAME: &'static str = "SignUpInput";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "name"),
        ("email", "email"),
        ("password", "password"),
        ("password_confirm", "passwordConfirm"),
        ("photo", "photo"),
        ("role", "role"),
    ];
}

impl private::Sealed for SignInInput {}
impl Validated for SignInInput {
    const NAME: &'static str = "SignInInput";
    const FIELDS: &'static [(&'static str, &'static str)] =
        &[("email", "email"), ("password", "password")];
}

impl private::Sealed for TaskInput {}
impl Validated for TaskInput {
    const NAME: &'static str = "TaskInput";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("title", "title"),
        ("description", "description"),
        ("status", "status"),
        ("deadline", "deadline"),
    ];
}

impl private::Sealed for ForgotPasswordInput {}
impl Validated for ForgotPasswordInput {
    const NAME: &'static str = "ForgotPasswordInput";
    const FIELDS: &'static [(&'static str, &'static str)] = &[("email", "email")];
}

impl private::Sealed for ResetPasswordInput {}
impl Validated for ResetPasswordInput {
    const NAME: &'static str = "ResetPasswordInput";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("password", "password"),
        ("password_confirm", "passwordConfirm"),
    ];
}

/// Applies the payload's constraints and returns every violation in field order.
///
/// An empty list means the payload is valid. A field that is missing reports
/// only `required`, not the constraints that would apply to its content.
pub fn validate_struct<T: Validated>(payload: &T) -> Vec<Violation> {
    let errors = match payload.validate() {
        Ok(()) => return Vec::new(),
        Err(errors) => errors,
    };
    let by_field = errors.field_errors();

    let mut violations = Vec::new();
    for &(field, json_name) in T::FIELDS {
        let field_errors = match by_field.get(field).or_else(|| by_field.get(json_name)) {
            Some(field_errors) => field_errors,
            None => continue,
        };
        let path = format!("{}.{}", T::NAME, json_name);

        if field_errors.iter().any(|e| e.code == REQUIRED) {
            violations.push(Violation {
                field: path,
                tag: REQUIRED.to_string(),
                value: None,
            });
            continue;
        }
        for error in field_errors.iter() {
            violations.push(Violation::from_error(path.clone(), error));
        }
    }
    violations
}

/// Like [`validate_struct`], but folds a non-empty result into `AppError::ValidationError`.
pub fn ensure_valid<T: Validated>(payload: &T) -> Result<(), AppError> {
    let violations = validate_struct(payload);
    if violations.is_empty() {
        Ok(())
    } else {
        log::debug!("{} rejected with {} violation(s)", T::NAME, violations.len());
        Err(AppError::ValidationError(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sign_up() -> SignUpInput {
        SignUpInput {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "correcthorse".to_string(),
            password_confirm: "correcthorse".to_string(),
            photo: String::new(),
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_valid_sign_up_has_no_violations() {
        assert!(validate_struct(&sign_up()).is_empty());
    }

    #[test]
    fn test_violations_follow_field_order() {
        let input = SignUpInput {
            name: String::new(),
            password: "short".to_string(),
            role: String::new(),
            ..sign_up()
        };

        assert_eq!(
            validate_struct(&input),
            vec![
                Violation {
                    field: "SignUpInput.name".into(),
                    tag: "required".into(),
                    value: None,
                },
                Violation {
                    field: "SignUpInput.password".into(),
                    tag: "min".into(),
                    value: Some("8".into()),
                },
                Violation {
                    field: "SignUpInput.role".into(),
                    tag: "required".into(),
                    value: None,
                },
            ]
        );
    }

    #[test]
    fn test_missing_field_reports_only_required() {
        let input = SignUpInput {
            password_confirm: String::new(),
            ..sign_up()
        };

        assert_eq!(
            validate_struct(&input),
            vec![Violation {
                field: "SignUpInput.passwordConfirm".into(),
                tag: "required".into(),
                value: None,
            }]
        );
    }

    #[test]
    fn test_ensure_valid() {
        assert!(ensure_valid(&sign_up()).is_ok());

        let input = SignInInput {
            email: String::new(),
            password: String::new(),
        };
        match ensure_valid(&input) {
            Err(AppError::ValidationError(violations)) => assert_eq!(violations.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_violation_serialization_omits_empty_value() {
        let violation = Violation {
            field: "TaskInput.title".into(),
            tag: "required".into(),
            value: None,
        };
        assert_eq!(
            serde_json::to_value(&violation).unwrap(),
            serde_json::json!({ "field": "TaskInput.title", "tag": "required" })
        );
    }
}
