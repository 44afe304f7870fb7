pub mod auth;
pub mod campaign;
pub mod character;
pub mod health;
pub mod me;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/user                                       current user (requires auth)
///
/// /users                                           list (admin only)
/// /users/{id}                                      activate / deactivate (admin only)
///
/// /characters                                      list, create
/// /characters/{id}                                 get, update, delete
/// /characters/{id}/stats                           derived stats
/// /characters/{id}/items[/{item_id}]               inventory (owner only)
/// /characters/{id}/skills[/{skill_id}]             skills (owner only)
/// /characters/{id}/rituals[/{ritual_id}]           rituals (owner only)
///
/// /me/character                                    get, create (requires auth)
/// /me/fights                                       list, fight (requires auth)
///
/// /campaigns                                       list, create
/// /campaigns/{id}                                  get, update, delete
/// /campaigns/{id}/characters[/{character_id}]      memberships
/// /campaigns/{id}/parties[/{party_id}]             parties
/// /campaigns/{id}/parties/{party_id}/members[/{character_id}]
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/characters", character::router())
        .nest("/me", me::router())
        .nest("/campaigns", campaign::router())
}
