//! Campaign entity model and DTOs.

use serde::{Deserialize, Serialize};
use sigil_core::types::{DbId, Timestamp};
use sigil_core::validation::validate_not_blank;
use sqlx::FromRow;
use validator::Validate;

use crate::models::membership::CampaignMembership;
use crate::models::party::Party;

/// Game system recorded when a campaign does not name one.
pub const DEFAULT_SYSTEM: &str = "Sigil RPG";

/// A row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub system: String,
    pub master_name: String,
    pub max_players: i32,
    pub is_active: bool,
    pub is_public: bool,
    pub setting: Option<String>,
    pub rules: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateCampaign {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub system: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub master_name: String,
    #[validate(range(min = 1, max = 50))]
    pub max_players: Option<i32>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    pub setting: Option<String>,
    pub rules: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCampaign {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub system: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub master_name: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub max_players: Option<i32>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    pub setting: Option<String>,
    pub rules: Option<String>,
    pub notes: Option<String>,
}

/// A campaign together with its memberships and parties.
#[derive(Debug, Serialize)]
pub struct CampaignDetail {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub memberships: Vec<CampaignMembership>,
    pub parties: Vec<Party>,
}

/// Rows removed by a campaign delete, per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CampaignDeletion {
    pub party_memberships: u64,
    pub parties: u64,
    pub campaign_memberships: u64,
}
