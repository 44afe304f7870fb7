//! Repository for the `users` table.

use sigil_core::roles::{ROLE_ADMIN, ROLE_PLAYER};
use sigil_core::types::DbId;
use sqlx::PgConnection;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, is_active, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// The first user ever registered gets the admin role; everyone after
    /// that is a player.
    pub async fn create(conn: &mut PgConnection, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3,
                     CASE WHEN EXISTS (SELECT 1 FROM users) THEN $5 ELSE $4 END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(ROLE_ADMIN)
            .bind(ROLE_PLAYER)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List all users ordered by ID.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// Set `is_active`. Returns `true` if the row was updated.
    pub async fn set_active(
        conn: &mut PgConnection,
        id: DbId,
        is_active: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
