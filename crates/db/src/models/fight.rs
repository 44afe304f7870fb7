//! Fight record model.

use serde::{Deserialize, Serialize};
use sigil_core::combat::FightOutcome;
use sigil_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `fights` table. `character_id` is the attacker and
/// `status` is the attacker's outcome (`won`, `lost` or `draw`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fight {
    pub id: DbId,
    pub character_id: DbId,
    pub opponent_id: DbId,
    pub status: String,
    pub experience: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /me/fights`.
#[derive(Debug, Deserialize, Validate)]
pub struct StartFight {
    pub opponent_id: DbId,
}

/// Row values for a resolved fight.
#[derive(Debug)]
pub struct CreateFight {
    pub character_id: DbId,
    pub opponent_id: DbId,
    pub outcome: FightOutcome,
    pub experience: i32,
}
