//! Party entity model and DTOs.

use serde::{Deserialize, Serialize};
use sigil_core::types::{DbId, Timestamp};
use sigil_core::validation::validate_not_blank;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `parties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Party {
    pub id: DbId,
    pub campaign_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub max_members: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateParty {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub max_members: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateParty {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub max_members: Option<i32>,
}

/// Rows removed by a party delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartyDeletion {
    pub party_memberships: u64,
}
