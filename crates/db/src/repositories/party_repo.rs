//! Repository for the `parties` table.

use sigil_core::membership::DEFAULT_CAPACITY;
use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::party::{CreateParty, Party, PartyDeletion, UpdateParty};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, name, description, max_members, created_at, updated_at";

/// Provides CRUD operations for parties. Every lookup is scoped to the
/// owning campaign so `/campaigns/{a}/parties/{p}` never reaches a party of
/// another campaign.
pub struct PartyRepo;

impl PartyRepo {
    /// Insert a new party in `campaign_id`, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        campaign_id: DbId,
        input: &CreateParty,
    ) -> Result<Party, sqlx::Error> {
        let query = format!(
            "INSERT INTO parties (campaign_id, name, description, max_members)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Party>(&query)
            .bind(campaign_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.max_members.unwrap_or(DEFAULT_CAPACITY))
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a party of `campaign_id` by ID.
    pub async fn find_in_campaign(
        conn: &mut PgConnection,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<Option<Party>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parties WHERE id = $1 AND campaign_id = $2");
        sqlx::query_as::<_, Party>(&query)
            .bind(id)
            .bind(campaign_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Like [`Self::find_in_campaign`], locking the party row until the
    /// transaction ends.
    pub async fn find_in_campaign_for_update(
        conn: &mut PgConnection,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<Option<Party>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parties WHERE id = $1 AND campaign_id = $2 FOR UPDATE"
        );
        sqlx::query_as::<_, Party>(&query)
            .bind(id)
            .bind(campaign_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List the parties of a campaign ordered by ID.
    pub async fn list_by_campaign(
        conn: &mut PgConnection,
        campaign_id: DbId,
    ) -> Result<Vec<Party>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parties WHERE campaign_id = $1 ORDER BY id");
        sqlx::query_as::<_, Party>(&query)
            .bind(campaign_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Update a party. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the party does not exist in `campaign_id`.
    pub async fn update(
        conn: &mut PgConnection,
        campaign_id: DbId,
        id: DbId,
        input: &UpdateParty,
    ) -> Result<Option<Party>, sqlx::Error> {
        let query = format!(
            "UPDATE parties SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                max_members = COALESCE($5, max_members)
             WHERE id = $1 AND campaign_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Party>(&query)
            .bind(id)
            .bind(campaign_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.max_members)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a party and its memberships. Returns `None` if the party does
    /// not exist in `campaign_id`.
    pub async fn delete_cascade(
        conn: &mut PgConnection,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<Option<PartyDeletion>, sqlx::Error> {
        let party_memberships = sqlx::query(
            "DELETE FROM party_memberships
             WHERE party_id = (SELECT id FROM parties WHERE id = $1 AND campaign_id = $2)",
        )
        .bind(id)
        .bind(campaign_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM parties WHERE id = $1 AND campaign_id = $2")
            .bind(id)
            .bind(campaign_id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok((deleted > 0).then_some(PartyDeletion { party_memberships }))
    }
}
