//! Handlers for the caller's own character and fights (`/me`).
//!
//! A user's "own" character is the lowest-id character they own.

use axum::extract::State;
use sigil_core::combat::Contest;
use sigil_core::error::CoreError;
use sigil_db::models::character::{Character, CreateCharacter};
use sigil_db::models::fight::{CreateFight, Fight, StartFight};
use sigil_db::repositories::{CharacterRepo, FightRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::{self, Created, Envelope};
use crate::state::AppState;

/// GET /api/v1/me/character
pub async fn get_character(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Envelope<Character>> {
    let mut conn = state.pool.acquire().await?;
    let character = CharacterRepo::find_by_owner(&mut conn, auth_user.user_id)
        .await?
        .ok_or_else(|| no_character(&auth_user))?;
    Ok(response::ok("character", character))
}

/// POST /api/v1/me/character
///
/// Any `user_id` in the body is ignored; the caller owns the new character.
pub async fn create_character(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateCharacter>,
) -> AppResult<Created<Character>> {
    let mut tx = state.pool.begin().await?;

    if CharacterRepo::find_by_owner(&mut tx, auth_user.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict(
            "user_already_has_character",
            "The caller already owns a character",
        ));
    }

    let character = CharacterRepo::create(&mut tx, Some(auth_user.user_id), &input).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = auth_user.user_id,
        character_id = character.id,
        "Own character created"
    );
    Ok(response::created("character_created", character))
}

/// GET /api/v1/me/fights
///
/// Fights the caller's character took part in, as attacker or defender.
pub async fn list_fights(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Envelope<Vec<Fight>>> {
    let mut conn = state.pool.acquire().await?;
    let character = CharacterRepo::find_by_owner(&mut conn, auth_user.user_id)
        .await?
        .ok_or_else(|| no_character(&auth_user))?;
    let fights = FightRepo::list_for_character(&mut conn, character.id).await?;
    Ok(response::ok("fights_list", fights))
}

/// POST /api/v1/me/fights
///
/// Resolve a fight between the caller's character and `opponent_id`.
pub async fn start_fight(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(input): ValidatedJson<StartFight>,
) -> AppResult<Created<Fight>> {
    let mut tx = state.pool.begin().await?;

    let attacker_id = CharacterRepo::find_by_owner(&mut tx, auth_user.user_id)
        .await?
        .map(|c| c.id);
    let defender_exists = CharacterRepo::exists(&mut tx, input.opponent_id).await?;

    let contest = Contest::new(attacker_id, input.opponent_id, defender_exists)?;
    let resolution = contest.resolve(&mut rand::rng());

    let fight = FightRepo::create(
        &mut tx,
        &CreateFight {
            character_id: contest.attacker_id,
            opponent_id: contest.defender_id,
            outcome: resolution.outcome,
            experience: resolution.experience,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        fight_id = fight.id,
        attacker_id = contest.attacker_id,
        defender_id = contest.defender_id,
        outcome = resolution.outcome.as_str(),
        experience = resolution.experience,
        "Fight resolved"
    );
    Ok(response::created("fight_completed", fight))
}

fn no_character(auth_user: &AuthUser) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "character",
        id: auth_user.user_id,
    })
}
