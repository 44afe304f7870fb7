use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require auth.
///
/// ```text
/// GET  /character -> get_character
/// POST /character -> create_character
/// GET  /fights    -> list_fights
/// POST /fights    -> start_fight
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/character", get(me::get_character).post(me::create_character))
        .route("/fights", get(me::list_fights).post(me::start_fight))
}
