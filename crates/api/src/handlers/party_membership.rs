//! Handlers for party memberships
//! (`/campaigns/{id}/parties/{party_id}/members`).
//!
//! Only characters with an active membership in the party's campaign may
//! join. A repeated join is a duplicate before anything else. The party row
//! is locked while its head count is checked.

use axum::extract::{Path, State};
use sigil_core::membership::{
    ensure_party_admission, ensure_party_seat, MembershipError, PARTY_MEMBERSHIP_UNIQUE,
};
use sigil_core::types::DbId;
use sigil_db::models::membership::{
    CreatePartyMembership, PartyMembership, UpdatePartyMembership,
};
use sigil_db::repositories::{
    CampaignMembershipRepo, CharacterRepo, PartyMembershipRepo, PartyRepo,
};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::{self, Created, Envelope};
use crate::state::AppState;

/// GET /api/v1/campaigns/{id}/parties/{party_id}/members
pub async fn list(
    State(state): State<AppState>,
    Path((campaign_id, party_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<Vec<PartyMembership>>> {
    let mut conn = state.pool.acquire().await?;
    PartyRepo::find_in_campaign(&mut conn, campaign_id, party_id)
        .await?
        .ok_or_else(|| AppError::not_found("party", party_id))?;
    let members = PartyMembershipRepo::list_by_party(&mut conn, party_id).await?;
    Ok(response::ok("party_members", members))
}

/// POST /api/v1/campaigns/{id}/parties/{party_id}/members
pub async fn join(
    State(state): State<AppState>,
    Path((campaign_id, party_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<CreatePartyMembership>,
) -> AppResult<Created<PartyMembership>> {
    let mut tx = state.pool.begin().await?;

    let party = PartyRepo::find_in_campaign_for_update(&mut tx, campaign_id, party_id)
        .await?
        .ok_or_else(|| AppError::not_found("party", party_id))?;
    if !CharacterRepo::exists(&mut tx, input.character_id).await? {
        return Err(AppError::not_found("character", input.character_id));
    }

    let membership = PartyMembershipRepo::create(&mut tx, party_id, &input)
        .await
        .map_err(|err| {
            if sigil_db::is_unique_violation(&err, PARTY_MEMBERSHIP_UNIQUE) {
                AppError::Membership(MembershipError::DuplicateMembership {
                    container: "party",
                    container_id: party_id,
                    character_id: input.character_id,
                })
            } else {
                err.into()
            }
        })?;

    // Any rejection below rolls the insert back with the transaction.
    let campaign_state =
        CampaignMembershipRepo::state(&mut tx, campaign_id, input.character_id).await?;
    ensure_party_admission(campaign_id, input.character_id, campaign_state)?;

    let others = PartyMembershipRepo::count(&mut tx, party_id).await? - 1;
    ensure_party_seat(party_id, others, party.max_members)?;
    tx.commit().await?;

    tracing::info!(
        campaign_id,
        party_id,
        character_id = membership.character_id,
        "Character joined party"
    );
    Ok(response::created("party_member_added", membership))
}

/// PATCH /api/v1/campaigns/{id}/parties/{party_id}/members/{character_id}
pub async fn update(
    State(state): State<AppState>,
    Path((campaign_id, party_id, character_id)): Path<(DbId, DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdatePartyMembership>,
) -> AppResult<Envelope<PartyMembership>> {
    let mut tx = state.pool.begin().await?;
    PartyRepo::find_in_campaign(&mut tx, campaign_id, party_id)
        .await?
        .ok_or_else(|| AppError::not_found("party", party_id))?;
    let membership = PartyMembershipRepo::update(&mut tx, party_id, character_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("party_member", character_id))?;
    tx.commit().await?;
    Ok(response::ok("party_member_updated", membership))
}

/// DELETE /api/v1/campaigns/{id}/parties/{party_id}/members/{character_id}
pub async fn remove(
    State(state): State<AppState>,
    Path((campaign_id, party_id, character_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<Envelope<()>> {
    let mut tx = state.pool.begin().await?;
    PartyRepo::find_in_campaign(&mut tx, campaign_id, party_id)
        .await?
        .ok_or_else(|| AppError::not_found("party", party_id))?;
    if !PartyMembershipRepo::delete(&mut tx, party_id, character_id).await? {
        return Err(AppError::not_found("party_member", character_id));
    }
    tx.commit().await?;

    tracing::info!(campaign_id, party_id, character_id, "Character removed from party");
    Ok(response::message("party_member_removed"))
}
