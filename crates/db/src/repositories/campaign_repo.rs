//! Repository for the `campaigns` table.

use sigil_core::membership::DEFAULT_CAPACITY;
use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::campaign::{
    Campaign, CampaignDeletion, CreateCampaign, UpdateCampaign, DEFAULT_SYSTEM,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, system, master_name, max_players, is_active, \
                       is_public, setting, rules, notes, created_at, updated_at";

/// Provides CRUD operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (name, description, system, master_name, max_players,
                                    is_active, is_public, setting, rules, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), COALESCE($7, false), $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.system.as_deref().unwrap_or(DEFAULT_SYSTEM))
            .bind(input.master_name.trim())
            .bind(input.max_players.unwrap_or(DEFAULT_CAPACITY))
            .bind(input.is_active)
            .bind(input.is_public)
            .bind(&input.setting)
            .bind(&input.rules)
            .bind(&input.notes)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a campaign by its internal ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a campaign and lock its row until the transaction ends.
    ///
    /// Membership joins take this lock so two concurrent joins cannot both
    /// see a free seat.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List all campaigns, most recently created first.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Campaign>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// Update a campaign. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                system = COALESCE($4, system),
                master_name = COALESCE($5, master_name),
                max_players = COALESCE($6, max_players),
                is_active = COALESCE($7, is_active),
                is_public = COALESCE($8, is_public),
                setting = COALESCE($9, setting),
                rules = COALESCE($10, rules),
                notes = COALESCE($11, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.system)
            .bind(input.master_name.as_deref().map(str::trim))
            .bind(input.max_players)
            .bind(input.is_active)
            .bind(input.is_public)
            .bind(&input.setting)
            .bind(&input.rules)
            .bind(&input.notes)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a campaign with its parties and memberships.
    ///
    /// Order: party memberships of its parties, its parties, its campaign
    /// memberships, then the campaign. Returns `None` if the campaign does
    /// not exist.
    pub async fn delete_cascade(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<CampaignDeletion>, sqlx::Error> {
        let party_memberships = sqlx::query(
            "DELETE FROM party_memberships
             WHERE party_id IN (SELECT id FROM parties WHERE campaign_id = $1)",
        )
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
        let parties = sqlx::query("DELETE FROM parties WHERE campaign_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        let campaign_memberships =
            sqlx::query("DELETE FROM campaign_memberships WHERE campaign_id = $1")
                .bind(id)
                .execute(&mut *conn)
                .await?
                .rows_affected();

        let deleted = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok((deleted > 0).then_some(CampaignDeletion {
            party_memberships,
            parties,
            campaign_memberships,
        }))
    }
}
