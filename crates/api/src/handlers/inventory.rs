//! Handlers for a character's items, skills and rituals
//! (`/characters/{id}/items`, `/skills`, `/rituals`).
//!
//! Only the character's owner may read or change them. A missing character
//! is 404; someone else's character (or an NPC) is 403.

use axum::extract::{Path, State};
use sigil_core::error::CoreError;
use sigil_core::types::DbId;
use sigil_db::models::inventory::{
    CreateItem, CreateRitual, CreateSkill, Item, Ritual, Skill, UpdateItem, UpdateRitual,
    UpdateSkill,
};
use sigil_db::repositories::{CharacterRepo, ItemRepo, RitualRepo, SkillRepo};
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::{self, Created, Envelope};
use crate::state::AppState;

/// Check that `auth_user` owns `character_id`.
async fn authorize_owner(
    conn: &mut PgConnection,
    character_id: DbId,
    auth_user: &AuthUser,
) -> AppResult<()> {
    let character = CharacterRepo::find_by_id(conn, character_id)
        .await?
        .ok_or_else(|| AppError::not_found("character", character_id))?;
    if character.user_id != Some(auth_user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Character {character_id} belongs to another user"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// GET /api/v1/characters/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(character_id): Path<DbId>,
) -> AppResult<Envelope<Vec<Item>>> {
    let mut conn = state.pool.acquire().await?;
    authorize_owner(&mut conn, character_id, &auth_user).await?;
    let items = ItemRepo::list_by_character(&mut conn, character_id).await?;
    Ok(response::ok("items", items))
}

/// POST /api/v1/characters/{id}/items
pub async fn create_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(character_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> AppResult<Created<Item>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    let item = ItemRepo::create(&mut tx, character_id, &input).await?;
    tx.commit().await?;
    Ok(response::created("item_created", item))
}

/// GET /api/v1/characters/{id}/items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<Item>> {
    let mut conn = state.pool.acquire().await?;
    authorize_owner(&mut conn, character_id, &auth_user).await?;
    let item = ItemRepo::find(&mut conn, character_id, item_id)
        .await?
        .ok_or_else(|| AppError::not_found("item", item_id))?;
    Ok(response::ok("item", item))
}

/// PATCH /api/v1/characters/{id}/items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, item_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> AppResult<Envelope<Item>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    let item = ItemRepo::update(&mut tx, character_id, item_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("item", item_id))?;
    tx.commit().await?;
    Ok(response::ok("item_updated", item))
}

/// DELETE /api/v1/characters/{id}/items/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<()>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    if !ItemRepo::delete(&mut tx, character_id, item_id).await? {
        return Err(AppError::not_found("item", item_id));
    }
    tx.commit().await?;
    Ok(response::message("item_deleted"))
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// GET /api/v1/characters/{id}/skills
pub async fn list_skills(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(character_id): Path<DbId>,
) -> AppResult<Envelope<Vec<Skill>>> {
    let mut conn = state.pool.acquire().await?;
    authorize_owner(&mut conn, character_id, &auth_user).await?;
    let skills = SkillRepo::list_by_character(&mut conn, character_id).await?;
    Ok(response::ok("skills", skills))
}

/// POST /api/v1/characters/{id}/skills
pub async fn create_skill(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(character_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateSkill>,
) -> AppResult<Created<Skill>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    let skill = SkillRepo::create(&mut tx, character_id, &input).await?;
    tx.commit().await?;
    Ok(response::created("skill_created", skill))
}

/// GET /api/v1/characters/{id}/skills/{skill_id}
pub async fn get_skill(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, skill_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<Skill>> {
    let mut conn = state.pool.acquire().await?;
    authorize_owner(&mut conn, character_id, &auth_user).await?;
    let skill = SkillRepo::find(&mut conn, character_id, skill_id)
        .await?
        .ok_or_else(|| AppError::not_found("skill", skill_id))?;
    Ok(response::ok("skill", skill))
}

/// PATCH /api/v1/characters/{id}/skills/{skill_id}
pub async fn update_skill(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, skill_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateSkill>,
) -> AppResult<Envelope<Skill>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    let skill = SkillRepo::update(&mut tx, character_id, skill_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("skill", skill_id))?;
    tx.commit().await?;
    Ok(response::ok("skill_updated", skill))
}

/// DELETE /api/v1/characters/{id}/skills/{skill_id}
pub async fn delete_skill(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, skill_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<()>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    if !SkillRepo::delete(&mut tx, character_id, skill_id).await? {
        return Err(AppError::not_found("skill", skill_id));
    }
    tx.commit().await?;
    Ok(response::message("skill_deleted"))
}

// ---------------------------------------------------------------------------
// Rituals
// ---------------------------------------------------------------------------

/// GET /api/v1/characters/{id}/rituals
pub async fn list_rituals(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(character_id): Path<DbId>,
) -> AppResult<Envelope<Vec<Ritual>>> {
    let mut conn = state.pool.acquire().await?;
    authorize_owner(&mut conn, character_id, &auth_user).await?;
    let rituals = RitualRepo::list_by_character(&mut conn, character_id).await?;
    Ok(response::ok("rituals", rituals))
}

/// POST /api/v1/characters/{id}/rituals
pub async fn create_ritual(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(character_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateRitual>,
) -> AppResult<Created<Ritual>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    let ritual = RitualRepo::create(&mut tx, character_id, &input).await?;
    tx.commit().await?;
    Ok(response::created("ritual_created", ritual))
}

/// GET /api/v1/characters/{id}/rituals/{ritual_id}
pub async fn get_ritual(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, ritual_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<Ritual>> {
    let mut conn = state.pool.acquire().await?;
    authorize_owner(&mut conn, character_id, &auth_user).await?;
    let ritual = RitualRepo::find(&mut conn, character_id, ritual_id)
        .await?
        .ok_or_else(|| AppError::not_found("ritual", ritual_id))?;
    Ok(response::ok("ritual", ritual))
}

/// PATCH /api/v1/characters/{id}/rituals/{ritual_id}
pub async fn update_ritual(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, ritual_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateRitual>,
) -> AppResult<Envelope<Ritual>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    let ritual = RitualRepo::update(&mut tx, character_id, ritual_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("ritual", ritual_id))?;
    tx.commit().await?;
    Ok(response::ok("ritual_updated", ritual))
}

/// DELETE /api/v1/characters/{id}/rituals/{ritual_id}
pub async fn delete_ritual(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((character_id, ritual_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<()>> {
    let mut tx = state.pool.begin().await?;
    authorize_owner(&mut tx, character_id, &auth_user).await?;
    if !RitualRepo::delete(&mut tx, character_id, ritual_id).await? {
        return Err(AppError::not_found("ritual", ritual_id));
    }
    tx.commit().await?;
    Ok(response::message("ritual_deleted"))
}
