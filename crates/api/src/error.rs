use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sigil_core::combat::CombatError;
use sigil_core::error::CoreError;
use sigil_core::membership::MembershipError;
use sigil_core::validation::FieldErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`], the rule-specific errors and sqlx errors.
/// Implements [`IntoResponse`] to produce the standard
/// `{ "message", "error" }` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sigil_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected fight.
    #[error(transparent)]
    Combat(#[from] CombatError),

    /// A membership rule violation.
    #[error(transparent)]
    Membership(#[from] MembershipError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a `{entity}_not_found` error.
    pub fn not_found(entity: &'static str, id: sigil_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }

    /// Shorthand for a 409 carrying its own discriminator.
    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Core(CoreError::Conflict {
            code,
            message: message.into(),
        })
    }

    /// Shorthand for a 500 whose detail is logged, not returned.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Core(CoreError::Internal(message.into()))
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields: Option<&FieldErrors> = None;

        let (status, code, message): (StatusCode, Cow<'static, str>, String) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity}_not_found").into(),
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "invalid_data".into(), msg.clone())
                }
                CoreError::InvalidFields(errors) => {
                    fields = Some(errors);
                    (
                        StatusCode::BAD_REQUEST,
                        "validation_failed".into(),
                        core.to_string(),
                    )
                }
                CoreError::Conflict { code, message } => {
                    (StatusCode::CONFLICT, (*code).into(), message.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "unauthorized".into(), msg.clone())
                }
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "forbidden".into(), msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal_error".into(),
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Rule errors ---
            AppError::Combat(err) => {
                let status = match err {
                    CombatError::OpponentNotFound(_) => StatusCode::NOT_FOUND,
                    CombatError::AttackerHasNoCharacter | CombatError::InvalidOpponent => {
                        StatusCode::BAD_REQUEST
                    }
                };
                (status, err.code().into(), err.to_string())
            }
            AppError::Membership(err) => {
                (StatusCode::CONFLICT, err.code().into(), err.to_string())
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = match fields {
            Some(errors) => json!({
                "message": code,
                "error": message,
                "errors": errors,
            }),
            None => json!({
                "message": code,
                "error": message,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, message code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Check constraint violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, Cow<'static, str>, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "not_found".into(),
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(sigil_db::UNIQUE_VIOLATION) if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "conflict".into(),
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // check_violation
                Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "invalid_data".into(),
                        format!("Value violates constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error".into(),
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error".into(),
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
