//! Shared response envelope for API handlers.
//!
//! Every body is `{ "message": "<code>", "data": ... }`. `message` is a
//! stable snake_case discriminator clients switch on; `data` is omitted when
//! there is nothing to return.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Standard `{ "message": ..., "data": ... }` envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Handler return type for a 200 response.
pub type Envelope<T> = Json<ApiResponse<T>>;

/// Handler return type for a 201 response.
pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

/// 200 with a payload.
pub fn ok<T: Serialize>(message: &'static str, data: T) -> Envelope<T> {
    Json(ApiResponse {
        message,
        data: Some(data),
    })
}

/// 201 with the created resource.
pub fn created<T: Serialize>(message: &'static str, data: T) -> Created<T> {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            message,
            data: Some(data),
        }),
    )
}

/// 200 with only a message.
pub fn message(message: &'static str) -> Envelope<()> {
    Json(ApiResponse {
        message,
        data: None,
    })
}
