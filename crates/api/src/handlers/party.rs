//! Handlers for parties (`/campaigns/{id}/parties`).

use axum::extract::{Path, State};
use sigil_core::types::DbId;
use sigil_db::models::party::{CreateParty, Party, PartyDeletion, UpdateParty};
use sigil_db::repositories::{CampaignRepo, PartyRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::{self, Created, Envelope};
use crate::state::AppState;

/// GET /api/v1/campaigns/{id}/parties
pub async fn list(
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Envelope<Vec<Party>>> {
    let mut conn = state.pool.acquire().await?;
    CampaignRepo::find_by_id(&mut conn, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign", campaign_id))?;
    let parties = PartyRepo::list_by_campaign(&mut conn, campaign_id).await?;
    Ok(response::ok("parties", parties))
}

/// POST /api/v1/campaigns/{id}/parties
pub async fn create(
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateParty>,
) -> AppResult<Created<Party>> {
    let mut tx = state.pool.begin().await?;
    CampaignRepo::find_by_id(&mut tx, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign", campaign_id))?;
    let party = PartyRepo::create(&mut tx, campaign_id, &input).await?;
    tx.commit().await?;

    tracing::info!(campaign_id, party_id = party.id, "Party created");
    Ok(response::created("party_created", party))
}

/// GET /api/v1/campaigns/{id}/parties/{party_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((campaign_id, party_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<Party>> {
    let mut conn = state.pool.acquire().await?;
    let party = PartyRepo::find_in_campaign(&mut conn, campaign_id, party_id)
        .await?
        .ok_or_else(|| AppError::not_found("party", party_id))?;
    Ok(response::ok("party", party))
}

/// PATCH /api/v1/campaigns/{id}/parties/{party_id}
///
/// Lowering `max_members` below the current head count is allowed; it only
/// blocks further joins.
pub async fn update(
    State(state): State<AppState>,
    Path((campaign_id, party_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateParty>,
) -> AppResult<Envelope<Party>> {
    let mut tx = state.pool.begin().await?;
    let party = PartyRepo::update(&mut tx, campaign_id, party_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("party", party_id))?;
    tx.commit().await?;
    Ok(response::ok("party_updated", party))
}

/// DELETE /api/v1/campaigns/{id}/parties/{party_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((campaign_id, party_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<PartyDeletion>> {
    let mut tx = state.pool.begin().await?;
    let report = PartyRepo::delete_cascade(&mut tx, campaign_id, party_id)
        .await?
        .ok_or_else(|| AppError::not_found("party", party_id))?;
    tx.commit().await?;

    tracing::info!(campaign_id, party_id, ?report, "Party deleted");
    Ok(response::ok("party_deleted", report))
}
