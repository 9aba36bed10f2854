//! Identity assignment for new entities.
//!
//! Entities receive their identity once, in their constructor, from an
//! [`IdGenerator`]. The identity is stored as its hyphenated string form.

use uuid::Uuid;

use crate::error::AppError;

/// Source of fresh entity identities.
pub trait IdGenerator {
    /// Produces a new unique identifier, or fails without side effects.
    fn next_id(&self) -> Result<Uuid, AppError>;
}

/// Time-ordered UUIDs (version 7): sortable by creation time, unique per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeOrdered;

impl IdGenerator for TimeOrdered {
    fn next_id(&self) -> Result<Uuid, AppError> {
        Ok(Uuid::now_v7())
    }
}

/// Generates an identity and returns it in storage form.
pub(crate) fn assign_id(ids: &impl IdGenerator) -> Result<String, AppError> {
    let id = ids.next_id()?;
    log::debug!("assigned identity {}", id);
    Ok(id.hyphenated().to_string())
}
