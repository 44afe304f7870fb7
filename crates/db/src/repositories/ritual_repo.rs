//! Repository for the `rituals` table.

use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::inventory::{CreateRitual, Ritual, UpdateRitual};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, character_id, name, circle, cost, execution_time, range, duration, \
                       resistance_test, description, effect, created_at, updated_at";

/// Provides CRUD operations for rituals, scoped to one character.
pub struct RitualRepo;

impl RitualRepo {
    pub async fn create(
        conn: &mut PgConnection,
        character_id: DbId,
        input: &CreateRitual,
    ) -> Result<Ritual, sqlx::Error> {
        let query = format!(
            "INSERT INTO rituals (character_id, name, circle, cost, execution_time, range,
                                  duration, resistance_test, description, effect)
             VALUES ($1, $2, COALESCE($3, 1), COALESCE($4, 0), $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ritual>(&query)
            .bind(character_id)
            .bind(input.name.trim())
            .bind(input.circle)
            .bind(input.cost)
            .bind(&input.execution_time)
            .bind(&input.range)
            .bind(&input.duration)
            .bind(&input.resistance_test)
            .bind(&input.description)
            .bind(&input.effect)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
    ) -> Result<Option<Ritual>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rituals WHERE id = $1 AND character_id = $2");
        sqlx::query_as::<_, Ritual>(&query)
            .bind(id)
            .bind(character_id)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn list_by_character(
        conn: &mut PgConnection,
        character_id: DbId,
    ) -> Result<Vec<Ritual>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rituals WHERE character_id = $1 ORDER BY circle, id"
        );
        sqlx::query_as::<_, Ritual>(&query)
            .bind(character_id)
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
        input: &UpdateRitual,
    ) -> Result<Option<Ritual>, sqlx::Error> {
        let query = format!(
            "UPDATE rituals SET
                name = COALESCE($3, name),
                circle = COALESCE($4, circle),
                cost = COALESCE($5, cost),
                execution_time = COALESCE($6, execution_time),
                range = COALESCE($7, range),
                duration = COALESCE($8, duration),
                resistance_test = COALESCE($9, resistance_test),
                description = COALESCE($10, description),
                effect = COALESCE($11, effect)
             WHERE id = $1 AND character_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ritual>(&query)
            .bind(id)
            .bind(character_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.circle)
            .bind(input.cost)
            .bind(&input.execution_time)
            .bind(&input.range)
            .bind(&input.duration)
            .bind(&input.resistance_test)
            .bind(&input.description)
            .bind(&input.effect)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn delete(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rituals WHERE id = $1 AND character_id = $2")
            .bind(id)
            .bind(character_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
