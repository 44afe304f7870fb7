//! Repository for the `skills` table.

use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::inventory::{CreateSkill, Skill, UpdateSkill, DEFAULT_SKILL_ATTRIBUTE};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, character_id, name, attribute, bonus_dice, training, others, \
                       description, created_at, updated_at";

/// Provides CRUD operations for skills, scoped to one character.
pub struct SkillRepo;

impl SkillRepo {
    pub async fn create(
        conn: &mut PgConnection,
        character_id: DbId,
        input: &CreateSkill,
    ) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (character_id, name, attribute, bonus_dice, training, others,
                                 description)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 0), COALESCE($6, 0), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(character_id)
            .bind(input.name.trim())
            .bind(input.attribute.as_deref().unwrap_or(DEFAULT_SKILL_ATTRIBUTE))
            .bind(input.bonus_dice)
            .bind(input.training)
            .bind(input.others)
            .bind(&input.description)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1 AND character_id = $2");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(character_id)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn list_by_character(
        conn: &mut PgConnection,
        character_id: DbId,
    ) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE character_id = $1 ORDER BY id");
        sqlx::query_as::<_, Skill>(&query)
            .bind(character_id)
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
        input: &UpdateSkill,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!(
            "UPDATE skills SET
                name = COALESCE($3, name),
                attribute = COALESCE($4, attribute),
                bonus_dice = COALESCE($5, bonus_dice),
                training = COALESCE($6, training),
                others = COALESCE($7, others),
                description = COALESCE($8, description)
             WHERE id = $1 AND character_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(character_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.attribute)
            .bind(input.bonus_dice)
            .bind(input.training)
            .bind(input.others)
            .bind(&input.description)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn delete(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1 AND character_id = $2")
            .bind(id)
            .bind(character_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
