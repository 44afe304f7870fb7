use crate::types::DbId;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `entity` is the snake_case entity name (e.g. `"campaign_membership"`);
    /// it doubles as the prefix of the `{entity}_not_found` message code.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(FieldErrors),

    /// `code` is the `message` discriminator of the response
    /// (e.g. `"email_already_exists"`).
    #[error("Conflict: {message}")]
    Conflict { code: &'static str, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
