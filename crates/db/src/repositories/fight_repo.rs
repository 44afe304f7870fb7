//! Repository for the `fights` table. Fights are never updated.

use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::fight::{CreateFight, Fight};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, character_id, opponent_id, status, experience, created_at, updated_at";

pub struct FightRepo;

impl FightRepo {
    /// Insert a resolved fight, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &CreateFight) -> Result<Fight, sqlx::Error> {
        let query = format!(
            "INSERT INTO fights (character_id, opponent_id, status, experience)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(input.character_id)
            .bind(input.opponent_id)
            .bind(input.outcome.as_str())
            .bind(input.experience)
            .fetch_one(&mut *conn)
            .await
    }

    /// Fights the character took part in on either side, newest first.
    pub async fn list_for_character(
        conn: &mut PgConnection,
        character_id: DbId,
    ) -> Result<Vec<Fight>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fights
             WHERE character_id = $1 OR opponent_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(character_id)
            .fetch_all(&mut *conn)
            .await
    }
}
