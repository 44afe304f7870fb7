//! Handlers for campaign memberships (`/campaigns/{id}/characters`).
//!
//! A character is a member of a campaign at most once. Joining twice is a
//! 409 `duplicate_membership`, detected from the unique constraint so two
//! concurrent joins cannot both succeed. The insert runs before any other
//! rule, so a repeated join is always reported as a duplicate. Joining as
//! active counts against `max_players`; the campaign row is locked while the
//! seat is checked.

use axum::extract::{Path, State};
use sigil_core::membership::{ensure_campaign_seat, MembershipError, CAMPAIGN_MEMBERSHIP_UNIQUE};
use sigil_core::types::DbId;
use sigil_db::models::membership::{
    CampaignMembership, CreateCampaignMembership, UpdateCampaignMembership,
};
use sigil_db::repositories::{CampaignMembershipRepo, CampaignRepo, CharacterRepo};
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::{self, Created, Envelope};
use crate::state::AppState;

/// GET /api/v1/campaigns/{id}/characters
///
/// Active and inactive memberships alike, in join order.
pub async fn list(
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Envelope<Vec<CampaignMembership>>> {
    let mut conn = state.pool.acquire().await?;
    ensure_campaign_exists(&mut conn, campaign_id).await?;
    let memberships = CampaignMembershipRepo::list_by_campaign(&mut conn, campaign_id).await?;
    Ok(response::ok("campaign_characters", memberships))
}

/// POST /api/v1/campaigns/{id}/characters
pub async fn join(
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateCampaignMembership>,
) -> AppResult<Created<CampaignMembership>> {
    let mut tx = state.pool.begin().await?;

    let campaign = CampaignRepo::find_by_id_for_update(&mut tx, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign", campaign_id))?;
    if !CharacterRepo::exists(&mut tx, input.character_id).await? {
        return Err(AppError::not_found("character", input.character_id));
    }

    let membership = CampaignMembershipRepo::create(&mut tx, campaign_id, &input)
        .await
        .map_err(|err| {
            if sigil_db::is_unique_violation(&err, CAMPAIGN_MEMBERSHIP_UNIQUE) {
                AppError::Membership(MembershipError::DuplicateMembership {
                    container: "campaign",
                    container_id: campaign_id,
                    character_id: input.character_id,
                })
            } else {
                err.into()
            }
        })?;

    // Seats taken by everyone but the row just inserted. Failing here drops
    // the transaction, which rolls the insert back.
    if membership.is_active {
        let others = CampaignMembershipRepo::count_active(&mut tx, campaign_id).await? - 1;
        ensure_campaign_seat(campaign_id, others, campaign.max_players, true)?;
    }
    tx.commit().await?;

    tracing::info!(
        campaign_id,
        character_id = membership.character_id,
        is_active = membership.is_active,
        "Character joined campaign"
    );
    Ok(response::created("campaign_character_added", membership))
}

/// GET /api/v1/campaigns/{id}/characters/{character_id}
pub async fn get(
    State(state): State<AppState>,
    Path((campaign_id, character_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<CampaignMembership>> {
    let mut conn = state.pool.acquire().await?;
    let membership = CampaignMembershipRepo::find(&mut conn, campaign_id, character_id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign_character", character_id))?;
    Ok(response::ok("campaign_character", membership))
}

/// PATCH /api/v1/campaigns/{id}/characters/{character_id}
///
/// `{"is_active": false}` deactivates without removing. Reactivating takes a
/// seat again and fails with `campaign_full` when none is left.
pub async fn update(
    State(state): State<AppState>,
    Path((campaign_id, character_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateCampaignMembership>,
) -> AppResult<Envelope<CampaignMembership>> {
    let mut tx = state.pool.begin().await?;

    let campaign = CampaignRepo::find_by_id_for_update(&mut tx, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign", campaign_id))?;
    let current = CampaignMembershipRepo::find(&mut tx, campaign_id, character_id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign_character", character_id))?;

    if input.is_active == Some(true) && !current.is_active {
        let active = CampaignMembershipRepo::count_active(&mut tx, campaign_id).await?;
        ensure_campaign_seat(campaign_id, active, campaign.max_players, true)?;
    }

    let membership = CampaignMembershipRepo::update(&mut tx, campaign_id, character_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("campaign_character", character_id))?;
    tx.commit().await?;
    Ok(response::ok("campaign_character_updated", membership))
}

/// DELETE /api/v1/campaigns/{id}/characters/{character_id}
///
/// Party memberships the character holds in this campaign are left alone.
pub async fn remove(
    State(state): State<AppState>,
    Path((campaign_id, character_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<()>> {
    let mut tx = state.pool.begin().await?;
    if !CampaignMembershipRepo::delete(&mut tx, campaign_id, character_id).await? {
        return Err(AppError::not_found("campaign_character", character_id));
    }
    tx.commit().await?;

    tracing::info!(campaign_id, character_id, "Character removed from campaign");
    Ok(response::message("campaign_character_removed"))
}

async fn ensure_campaign_exists(conn: &mut PgConnection, campaign_id: DbId) -> AppResult<()> {
    CampaignRepo::find_by_id(conn, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign", campaign_id))?;
    Ok(())
}
