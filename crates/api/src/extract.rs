//! Request body extractor that deserializes and validates in one step.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use sigil_core::error::CoreError;
use sigil_core::validation::validate_input;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON is rejected as 400 `invalid_data`; a well-formed body that
/// breaks validation rules is rejected as 400 `validation_failed` with every
/// offending field listed.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                AppError::Core(CoreError::Validation(rejection.body_text()))
            })?;
        validate_input(&value)?;
        Ok(ValidatedJson(value))
    }
}
