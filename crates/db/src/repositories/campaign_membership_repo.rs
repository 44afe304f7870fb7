//! Repository for the `campaign_memberships` table.
//!
//! Uniqueness of (campaign, character) is left to
//! `uq_campaign_memberships_campaign_character`; [`CampaignMembershipRepo::create`]
//! surfaces a second insert as a unique-violation `sqlx::Error`.

use sigil_core::membership::MembershipState;
use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::membership::{
    CampaignMembership, CreateCampaignMembership, UpdateCampaignMembership,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, campaign_id, character_id, role, is_active, notes, joined_at, created_at, updated_at";

/// Provides CRUD operations for campaign memberships.
pub struct CampaignMembershipRepo;

impl CampaignMembershipRepo {
    /// Insert a membership, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        campaign_id: DbId,
        input: &CreateCampaignMembership,
    ) -> Result<CampaignMembership, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_memberships (campaign_id, character_id, role, is_active, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignMembership>(&query)
            .bind(campaign_id)
            .bind(input.character_id)
            .bind(&input.role)
            .bind(input.joins_active())
            .bind(&input.notes)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find the membership of `character_id` in `campaign_id`.
    pub async fn find(
        conn: &mut PgConnection,
        campaign_id: DbId,
        character_id: DbId,
    ) -> Result<Option<CampaignMembership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_memberships
             WHERE campaign_id = $1 AND character_id = $2"
        );
        sqlx::query_as::<_, CampaignMembership>(&query)
            .bind(campaign_id)
            .bind(character_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// State of the (campaign, character) pair.
    pub async fn state(
        conn: &mut PgConnection,
        campaign_id: DbId,
        character_id: DbId,
    ) -> Result<MembershipState, sqlx::Error> {
        let is_active = sqlx::query_scalar::<_, bool>(
            "SELECT is_active FROM campaign_memberships
             WHERE campaign_id = $1 AND character_id = $2",
        )
        .bind(campaign_id)
        .bind(character_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(MembershipState::from_row(is_active))
    }

    /// List the memberships of a campaign in join order.
    pub async fn list_by_campaign(
        conn: &mut PgConnection,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignMembership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_memberships
             WHERE campaign_id = $1
             ORDER BY joined_at, id"
        );
        sqlx::query_as::<_, CampaignMembership>(&query)
            .bind(campaign_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Number of active memberships in a campaign.
    pub async fn count_active(
        conn: &mut PgConnection,
        campaign_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM campaign_memberships
             WHERE campaign_id = $1 AND is_active = true",
        )
        .bind(campaign_id)
        .fetch_one(&mut *conn)
        .await
    }

    /// Update a membership. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the pair has no membership.
    pub async fn update(
        conn: &mut PgConnection,
        campaign_id: DbId,
        character_id: DbId,
        input: &UpdateCampaignMembership,
    ) -> Result<Option<CampaignMembership>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_memberships SET
                role = COALESCE($3, role),
                is_active = COALESCE($4, is_active),
                notes = COALESCE($5, notes)
             WHERE campaign_id = $1 AND character_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignMembership>(&query)
            .bind(campaign_id)
            .bind(character_id)
            .bind(&input.role)
            .bind(input.is_active)
            .bind(&input.notes)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a membership. Returns `true` if a row was removed.
    pub async fn delete(
        conn: &mut PgConnection,
        campaign_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM campaign_memberships WHERE campaign_id = $1 AND character_id = $2",
        )
        .bind(campaign_id)
        .bind(character_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
