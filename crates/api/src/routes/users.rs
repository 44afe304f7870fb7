use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. Admin only.
///
/// ```text
/// GET   /      -> list
/// PATCH /{id}  -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/{id}", patch(users::update_status))
}
