//! Repository for the `items` table.

use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::inventory::{CreateItem, Item, UpdateItem, DEFAULT_ITEM_CATEGORY};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, character_id, name, category, weight, description, quantity, created_at, updated_at";

/// Provides CRUD operations for items. Every query is scoped to one
/// character.
pub struct ItemRepo;

impl ItemRepo {
    pub async fn create(
        conn: &mut PgConnection,
        character_id: DbId,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (character_id, name, category, weight, description, quantity)
             VALUES ($1, $2, $3, COALESCE($4, 0), $5, COALESCE($6, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(character_id)
            .bind(input.name.trim())
            .bind(input.category.as_deref().unwrap_or(DEFAULT_ITEM_CATEGORY))
            .bind(input.weight)
            .bind(&input.description)
            .bind(input.quantity)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1 AND character_id = $2");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(character_id)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn list_by_character(
        conn: &mut PgConnection,
        character_id: DbId,
    ) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE character_id = $1 ORDER BY id");
        sqlx::query_as::<_, Item>(&query)
            .bind(character_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Update an item. Only non-`None` fields in `input` are applied.
    pub async fn update(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                weight = COALESCE($5, weight),
                description = COALESCE($6, description),
                quantity = COALESCE($7, quantity)
             WHERE id = $1 AND character_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(character_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.category)
            .bind(input.weight)
            .bind(&input.description)
            .bind(input.quantity)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn delete(
        conn: &mut PgConnection,
        character_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND character_id = $2")
            .bind(id)
            .bind(character_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
