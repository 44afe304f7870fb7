//! Route definitions for `/characters` and its inventory sub-resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{character, inventory};
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PATCH  /{id}                          -> update
/// DELETE /{id}                          -> delete
/// GET    /{id}/stats                    -> stats
///
/// GET    /{id}/items                    -> list_items
/// POST   /{id}/items                    -> create_item
/// GET    /{id}/items/{item_id}          -> get_item
/// PATCH  /{id}/items/{item_id}          -> update_item
/// DELETE /{id}/items/{item_id}          -> delete_item
///
/// (same shape for /skills and /rituals)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::list).post(character::create))
        .route(
            "/{id}",
            get(character::get_by_id)
                .patch(character::update)
                .delete(character::delete),
        )
        .route("/{id}/stats", get(character::stats))
        .route(
            "/{id}/items",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route(
            "/{id}/items/{item_id}",
            get(inventory::get_item)
                .patch(inventory::update_item)
                .delete(inventory::delete_item),
        )
        .route(
            "/{id}/skills",
            get(inventory::list_skills).post(inventory::create_skill),
        )
        .route(
            "/{id}/skills/{skill_id}",
            get(inventory::get_skill)
                .patch(inventory::update_skill)
                .delete(inventory::delete_skill),
        )
        .route(
            "/{id}/rituals",
            get(inventory::list_rituals).post(inventory::create_ritual),
        )
        .route(
            "/{id}/rituals/{ritual_id}",
            get(inventory::get_ritual)
                .patch(inventory::update_ritual)
                .delete(inventory::delete_ritual),
        )
}
