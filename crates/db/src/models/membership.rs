//! Campaign and party membership models.

use serde::{Deserialize, Serialize};
use sigil_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from `campaign_memberships`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignMembership {
    pub id: DbId,
    pub campaign_id: DbId,
    pub character_id: DbId,
    pub role: Option<String>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub joined_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateCampaignMembership {
    #[validate(range(min = 1))]
    pub character_id: DbId,
    #[validate(length(max = 50))]
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

impl CreateCampaignMembership {
    /// New memberships are active unless stated otherwise.
    pub fn joins_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCampaignMembership {
    #[validate(length(max = 50))]
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

/// A row from `party_memberships`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PartyMembership {
    pub id: DbId,
    pub party_id: DbId,
    pub character_id: DbId,
    pub role: Option<String>,
    pub joined_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePartyMembership {
    #[validate(range(min = 1))]
    pub character_id: DbId,
    #[validate(length(max = 50))]
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePartyMembership {
    #[validate(length(max = 50))]
    pub role: Option<String>,
}
