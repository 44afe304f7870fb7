//! Repository for the `characters` table.

use sigil_core::attributes::DEFAULT_NEX;
use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::character::{Character, CharacterDeletion, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, player_name, origin, character_class, age, \
                       skilled_in, nex, avatar_url, agility, intellect, vigor, presence, \
                       strength, current_health, current_effort, current_resolve, gender, \
                       appearance, personality, background, objective, created_at, updated_at";

/// Provides CRUD operations for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character owned by `owner_id`, returning the created row.
    ///
    /// Omitted scores default to 1 and the current resource pools start at
    /// the maxima derived from the final scores.
    pub async fn create(
        conn: &mut PgConnection,
        owner_id: Option<DbId>,
        input: &CreateCharacter,
    ) -> Result<Character, sqlx::Error> {
        let scores = input.ability_scores();
        let pools = scores.derived();
        let query = format!(
            "INSERT INTO characters (user_id, name, player_name, origin, character_class, age,
                                     skilled_in, nex, avatar_url, agility, intellect, vigor,
                                     presence, strength, current_health, current_effort,
                                     current_resolve, gender, appearance, personality,
                                     background, objective)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                     $17, $18, $19, $20, $21, $22)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(owner_id)
            .bind(input.name.trim())
            .bind(&input.player_name)
            .bind(&input.origin)
            .bind(&input.character_class)
            .bind(input.age)
            .bind(&input.skilled_in)
            .bind(input.nex.unwrap_or(DEFAULT_NEX))
            .bind(&input.avatar_url)
            .bind(scores.agility)
            .bind(scores.intellect)
            .bind(scores.vigor)
            .bind(scores.presence)
            .bind(scores.strength)
            .bind(pools.health_max)
            .bind(pools.effort_max)
            .bind(pools.resolve_max)
            .bind(&input.gender)
            .bind(&input.appearance)
            .bind(&input.personality)
            .bind(&input.background)
            .bind(&input.objective)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a character by its internal ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Whether a character with this ID exists.
    pub async fn exists(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM characters WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// The user's character: the lowest-id one if they own several.
    pub async fn find_by_owner(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters WHERE user_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List all characters ordered by ID.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY id");
        sqlx::query_as::<_, Character>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                name = COALESCE($2, name),
                player_name = COALESCE($3, player_name),
                origin = COALESCE($4, origin),
                character_class = COALESCE($5, character_class),
                age = COALESCE($6, age),
                skilled_in = COALESCE($7, skilled_in),
                nex = COALESCE($8, nex),
                avatar_url = COALESCE($9, avatar_url),
                agility = COALESCE($10, agility),
                intellect = COALESCE($11, intellect),
                vigor = COALESCE($12, vigor),
                presence = COALESCE($13, presence),
                strength = COALESCE($14, strength),
                current_health = COALESCE($15, current_health),
                current_effort = COALESCE($16, current_effort),
                current_resolve = COALESCE($17, current_resolve),
                gender = COALESCE($18, gender),
                appearance = COALESCE($19, appearance),
                personality = COALESCE($20, personality),
                background = COALESCE($21, background),
                objective = COALESCE($22, objective)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.player_name)
            .bind(&input.origin)
            .bind(&input.character_class)
            .bind(input.age)
            .bind(&input.skilled_in)
            .bind(input.nex)
            .bind(&input.avatar_url)
            .bind(input.agility)
            .bind(input.intellect)
            .bind(input.vigor)
            .bind(input.presence)
            .bind(input.strength)
            .bind(input.current_health)
            .bind(input.current_effort)
            .bind(input.current_resolve)
            .bind(&input.gender)
            .bind(&input.appearance)
            .bind(&input.personality)
            .bind(&input.background)
            .bind(&input.objective)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a character and every row that references it.
    ///
    /// Order: party memberships, campaign memberships, fights on either
    /// side, items, skills, rituals, then the character. Returns `None` if
    /// the character does not exist; the caller must then drop the
    /// transaction.
    pub async fn delete_cascade(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<CharacterDeletion>, sqlx::Error> {
        let party_memberships = sqlx::query("DELETE FROM party_memberships WHERE character_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        let campaign_memberships =
            sqlx::query("DELETE FROM campaign_memberships WHERE character_id = $1")
                .bind(id)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        let fights = sqlx::query("DELETE FROM fights WHERE character_id = $1 OR opponent_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        let items = sqlx::query("DELETE FROM items WHERE character_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        let skills = sqlx::query("DELETE FROM skills WHERE character_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        let rituals = sqlx::query("DELETE FROM rituals WHERE character_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok((deleted > 0).then_some(CharacterDeletion {
            party_memberships,
            campaign_memberships,
            fights,
            items,
            skills,
            rituals,
        }))
    }
}
