//! Handlers for the `/characters` resource.
//!
//! Characters are public: anyone may list, create, edit or delete them.
//! Ownership only matters for the inventory sub-resources and `/me`.

use axum::extract::{Path, State};
use sigil_core::types::DbId;
use sigil_db::models::character::{
    Character, CharacterDeletion, CharacterStats, CreateCharacter, UpdateCharacter,
};
use sigil_db::repositories::{CharacterRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::{self, Created, Envelope};
use crate::state::AppState;

/// GET /api/v1/characters
pub async fn list(State(state): State<AppState>) -> AppResult<Envelope<Vec<Character>>> {
    let mut conn = state.pool.acquire().await?;
    let characters = CharacterRepo::list(&mut conn).await?;
    Ok(response::ok("characters_list", characters))
}

/// POST /api/v1/characters
///
/// `user_id` is optional; characters without one are NPCs. Pools start at
/// the maxima derived from the initial scores.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCharacter>,
) -> AppResult<Created<Character>> {
    let mut tx = state.pool.begin().await?;

    if let Some(user_id) = input.user_id {
        UserRepo::find_by_id(&mut tx, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", user_id))?;
    }

    let character = CharacterRepo::create(&mut tx, input.user_id, &input).await?;
    tx.commit().await?;

    tracing::info!(character_id = character.id, owner = ?character.user_id, "Character created");
    Ok(response::created("character_created", character))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<Character>> {
    let mut conn = state.pool.acquire().await?;
    let character = CharacterRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("character", id))?;
    Ok(response::ok("character", character))
}

/// PATCH /api/v1/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateCharacter>,
) -> AppResult<Envelope<Character>> {
    let mut tx = state.pool.begin().await?;
    let character = CharacterRepo::update(&mut tx, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("character", id))?;
    tx.commit().await?;
    Ok(response::ok("character_updated", character))
}

/// DELETE /api/v1/characters/{id}
///
/// Removes the character together with its memberships, fights and
/// inventory. The body reports how many dependent rows went with it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<CharacterDeletion>> {
    let mut tx = state.pool.begin().await?;
    let report = CharacterRepo::delete_cascade(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("character", id))?;
    tx.commit().await?;

    tracing::info!(character_id = id, ?report, "Character deleted");
    Ok(response::ok("character_deleted", report))
}

/// GET /api/v1/characters/{id}/stats
pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<CharacterStats>> {
    let mut conn = state.pool.acquire().await?;
    let character = CharacterRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("character", id))?;
    Ok(response::ok("character_stats", CharacterStats::from(&character)))
}
