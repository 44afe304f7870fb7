//! Repository for the `party_memberships` table.

use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::membership::{CreatePartyMembership, PartyMembership, UpdatePartyMembership};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, party_id, character_id, role, joined_at, created_at, updated_at";

/// Provides CRUD operations for party memberships.
pub struct PartyMembershipRepo;

impl PartyMembershipRepo {
    /// Insert a membership, returning the created row. Campaign admission is
    /// checked by the caller.
    pub async fn create(
        conn: &mut PgConnection,
        party_id: DbId,
        input: &CreatePartyMembership,
    ) -> Result<PartyMembership, sqlx::Error> {
        let query = format!(
            "INSERT INTO party_memberships (party_id, character_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PartyMembership>(&query)
            .bind(party_id)
            .bind(input.character_id)
            .bind(&input.role)
            .fetch_one(&mut *conn)
            .await
    }

    /// List the members of a party in join order.
    pub async fn list_by_party(
        conn: &mut PgConnection,
        party_id: DbId,
    ) -> Result<Vec<PartyMembership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM party_memberships
             WHERE party_id = $1
             ORDER BY joined_at, id"
        );
        sqlx::query_as::<_, PartyMembership>(&query)
            .bind(party_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Number of members in a party.
    pub async fn count(conn: &mut PgConnection, party_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM party_memberships WHERE party_id = $1")
            .bind(party_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Update a membership's role. Returns `None` if the pair has no membership.
    pub async fn update(
        conn: &mut PgConnection,
        party_id: DbId,
        character_id: DbId,
        input: &UpdatePartyMembership,
    ) -> Result<Option<PartyMembership>, sqlx::Error> {
        let query = format!(
            "UPDATE party_memberships SET role = COALESCE($3, role)
             WHERE party_id = $1 AND character_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PartyMembership>(&query)
            .bind(party_id)
            .bind(character_id)
            .bind(&input.role)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a membership. Returns `true` if a row was removed.
    pub async fn delete(
        conn: &mut PgConnection,
        party_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM party_memberships WHERE party_id = $1 AND character_id = $2")
                .bind(party_id)
                .bind(character_id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
