//! Handlers for the `/campaigns` resource.

use axum::extract::{Path, State};
use sigil_core::types::DbId;
use sigil_db::models::campaign::{
    Campaign, CampaignDeletion, CampaignDetail, CreateCampaign, UpdateCampaign,
};
use sigil_db::repositories::{CampaignMembershipRepo, CampaignRepo, PartyRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::{self, Created, Envelope};
use crate::state::AppState;

/// GET /api/v1/campaigns
pub async fn list(State(state): State<AppState>) -> AppResult<Envelope<Vec<Campaign>>> {
    let mut conn = state.pool.acquire().await?;
    let campaigns = CampaignRepo::list(&mut conn).await?;
    Ok(response::ok("campaigns_list", campaigns))
}

/// POST /api/v1/campaigns
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCampaign>,
) -> AppResult<Created<Campaign>> {
    let mut tx = state.pool.begin().await?;
    let campaign = CampaignRepo::create(&mut tx, &input).await?;
    tx.commit().await?;

    tracing::info!(campaign_id = campaign.id, "Campaign created");
    Ok(response::created("campaign_created", campaign))
}

/// GET /api/v1/campaigns/{id}
///
/// The campaign with its memberships (active and inactive) and parties.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<CampaignDetail>> {
    let mut conn = state.pool.acquire().await?;
    let campaign = CampaignRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign", id))?;
    let memberships = CampaignMembershipRepo::list_by_campaign(&mut conn, id).await?;
    let parties = PartyRepo::list_by_campaign(&mut conn, id).await?;

    Ok(response::ok(
        "campaign",
        CampaignDetail {
            campaign,
            memberships,
            parties,
        },
    ))
}

/// PATCH /api/v1/campaigns/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateCampaign>,
) -> AppResult<Envelope<Campaign>> {
    let mut tx = state.pool.begin().await?;
    let campaign = CampaignRepo::update(&mut tx, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("campaign", id))?;
    tx.commit().await?;
    Ok(response::ok("campaign_updated", campaign))
}

/// DELETE /api/v1/campaigns/{id}
///
/// Removes the campaign, its parties and every membership in either.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<CampaignDeletion>> {
    let mut tx = state.pool.begin().await?;
    let report = CampaignRepo::delete_cascade(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("campaign", id))?;
    tx.commit().await?;

    tracing::info!(campaign_id = id, ?report, "Campaign deleted");
    Ok(response::ok("campaign_deleted", report))
}
