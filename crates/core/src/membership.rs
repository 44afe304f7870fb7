//! Campaign and party membership integrity rules.
//!
//! A (campaign, character) pair moves through
//! `Absent -> Active <-> Inactive -> (removed)`. Uniqueness of the pair is
//! enforced by the storage layer's unique constraint; these helpers cover the
//! rules that need a read first: party admission and capacity limits.

use serde::Serialize;

use crate::types::DbId;

/// Unique constraint over `campaign_memberships (campaign_id, character_id)`.
pub const CAMPAIGN_MEMBERSHIP_UNIQUE: &str = "uq_campaign_memberships_campaign_character";
/// Unique constraint over `party_memberships (party_id, character_id)`.
pub const PARTY_MEMBERSHIP_UNIQUE: &str = "uq_party_memberships_party_character";

/// Default campaign/party capacity.
pub const DEFAULT_CAPACITY: i32 = 6;
/// Lowest accepted capacity.
pub const MIN_CAPACITY: i32 = 1;
/// Highest accepted capacity.
pub const MAX_CAPACITY: i32 = 50;

/// State of one (campaign, character) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    Absent,
    Active,
    Inactive,
}

impl MembershipState {
    /// Derive the state from the `is_active` flag of the stored row, if any.
    pub fn from_row(is_active: Option<bool>) -> Self {
        match is_active {
            None => Self::Absent,
            Some(true) => Self::Active,
            Some(false) => Self::Inactive,
        }
    }

    /// Only an active campaign membership admits the character into a party.
    pub fn admits_party_membership(self) -> bool {
        self == Self::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipError {
    #[error("Character {character_id} is already a member of {container} {container_id}")]
    DuplicateMembership {
        container: &'static str,
        container_id: DbId,
        character_id: DbId,
    },

    #[error("Character {character_id} has no active membership in campaign {campaign_id}")]
    CharacterNotInCampaign {
        campaign_id: DbId,
        character_id: DbId,
    },

    #[error("Campaign {campaign_id} is full ({limit} active players)")]
    CampaignFull { campaign_id: DbId, limit: i32 },

    #[error("Party {party_id} is full ({limit} members)")]
    PartyFull { party_id: DbId, limit: i32 },
}

impl MembershipError {
    /// Stable `message` discriminator for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateMembership { .. } => "duplicate_membership",
            Self::CharacterNotInCampaign { .. } => "character_not_in_campaign",
            Self::CampaignFull { .. } => "campaign_full",
            Self::PartyFull { .. } => "party_full",
        }
    }
}

/// Check that a character may join a party of `campaign_id`, given the state
/// of its membership in that campaign.
pub fn ensure_party_admission(
    campaign_id: DbId,
    character_id: DbId,
    campaign_state: MembershipState,
) -> Result<(), MembershipError> {
    if campaign_state.admits_party_membership() {
        Ok(())
    } else {
        Err(MembershipError::CharacterNotInCampaign {
            campaign_id,
            character_id,
        })
    }
}

/// Check that an active campaign still has a free seat.
///
/// Joining as inactive never takes a seat, so `joining_active = false`
/// always passes.
pub fn ensure_campaign_seat(
    campaign_id: DbId,
    active_members: i64,
    max_players: i32,
    joining_active: bool,
) -> Result<(), MembershipError> {
    if joining_active && active_members >= i64::from(max_players) {
        return Err(MembershipError::CampaignFull {
            campaign_id,
            limit: max_players,
        });
    }
    Ok(())
}

/// Check that a party still has room for one more member.
pub fn ensure_party_seat(
    party_id: DbId,
    members: i64,
    max_members: i32,
) -> Result<(), MembershipError> {
    if members >= i64::from(max_members) {
        return Err(MembershipError::PartyFull {
            party_id,
            limit: max_members,
        });
    }
    Ok(())
}
