//! Route definitions for `/campaigns`, their memberships and parties.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{campaign, campaign_membership, party, party_membership};
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /                                            -> list
/// POST   /                                            -> create
/// GET    /{id}                                        -> get_by_id
/// PATCH  /{id}                                        -> update
/// DELETE /{id}                                        -> delete
///
/// GET    /{id}/characters                             -> campaign_membership::list
/// POST   /{id}/characters                             -> campaign_membership::join
/// GET    /{id}/characters/{character_id}              -> campaign_membership::get
/// PATCH  /{id}/characters/{character_id}              -> campaign_membership::update
/// DELETE /{id}/characters/{character_id}              -> campaign_membership::remove
///
/// GET    /{id}/parties                                -> party::list
/// POST   /{id}/parties                                -> party::create
/// GET    /{id}/parties/{party_id}                     -> party::get_by_id
/// PATCH  /{id}/parties/{party_id}                     -> party::update
/// DELETE /{id}/parties/{party_id}                     -> party::delete
///
/// GET    /{id}/parties/{party_id}/members                  -> party_membership::list
/// POST   /{id}/parties/{party_id}/members                  -> party_membership::join
/// PATCH  /{id}/parties/{party_id}/members/{character_id}   -> party_membership::update
/// DELETE /{id}/parties/{party_id}/members/{character_id}   -> party_membership::remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaign::list).post(campaign::create))
        .route(
            "/{id}",
            get(campaign::get_by_id)
                .patch(campaign::update)
                .delete(campaign::delete),
        )
        .route(
            "/{id}/characters",
            get(campaign_membership::list).post(campaign_membership::join),
        )
        .route(
            "/{id}/characters/{character_id}",
            get(campaign_membership::get)
                .patch(campaign_membership::update)
                .delete(campaign_membership::remove),
        )
        .route("/{id}/parties", get(party::list).post(party::create))
        .route(
            "/{id}/parties/{party_id}",
            get(party::get_by_id)
                .patch(party::update)
                .delete(party::delete),
        )
        .route(
            "/{id}/parties/{party_id}/members",
            get(party_membership::list).post(party_membership::join),
        )
        .route(
            "/{id}/parties/{party_id}/members/{character_id}",
            patch(party_membership::update).delete(party_membership::remove),
        )
}
