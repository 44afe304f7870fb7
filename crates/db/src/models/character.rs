//! Character entity model, DTOs and the derived-stats view.

use serde::{Deserialize, Serialize};
use sigil_core::attributes::{AbilityScores, DerivedStats};
use sigil_core::types::{DbId, Timestamp};
use sigil_core::validation::validate_not_blank;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub name: String,
    pub player_name: Option<String>,
    pub origin: Option<String>,
    pub character_class: Option<String>,
    pub age: Option<i32>,
    pub skilled_in: Option<String>,
    pub nex: i32,
    pub avatar_url: Option<String>,
    pub agility: i32,
    pub intellect: i32,
    pub vigor: i32,
    pub presence: i32,
    pub strength: i32,
    pub current_health: i32,
    pub current_effort: i32,
    pub current_resolve: i32,
    pub gender: Option<String>,
    pub appearance: Option<String>,
    pub personality: Option<String>,
    pub background: Option<String>,
    pub objective: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    pub fn ability_scores(&self) -> AbilityScores {
        AbilityScores {
            agility: self.agility,
            intellect: self.intellect,
            vigor: self.vigor,
            presence: self.presence,
            strength: self.strength,
        }
    }
}

/// DTO for creating a character. Omitted ability scores default to 1 and
/// omitted `nex` to 5.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateCharacter {
    /// Owner; ignored by `/me/character`, which always uses the caller.
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(max = 100))]
    pub player_name: Option<String>,
    #[validate(length(max = 100))]
    pub origin: Option<String>,
    #[validate(length(max = 100))]
    pub character_class: Option<String>,
    #[validate(range(min = 1, max = 200))]
    pub age: Option<i32>,
    #[validate(length(max = 100))]
    pub skilled_in: Option<String>,
    #[validate(range(min = 5, max = 100))]
    pub nex: Option<i32>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
    #[validate(range(min = 0, max = 5))]
    pub agility: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub intellect: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub vigor: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub presence: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub strength: Option<i32>,
    #[validate(length(max = 50))]
    pub gender: Option<String>,
    pub appearance: Option<String>,
    pub personality: Option<String>,
    pub background: Option<String>,
    pub objective: Option<String>,
}

impl CreateCharacter {
    /// The requested scores with omitted abilities filled in.
    pub fn ability_scores(&self) -> AbilityScores {
        AbilityScores::with_defaults(
            self.agility,
            self.intellect,
            self.vigor,
            self.presence,
            self.strength,
        )
    }
}

/// DTO for a partial character update. Changing ability scores does not
/// touch the stored `current_*` pools; those are only set explicitly.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCharacter {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub player_name: Option<String>,
    #[validate(length(max = 100))]
    pub origin: Option<String>,
    #[validate(length(max = 100))]
    pub character_class: Option<String>,
    #[validate(range(min = 1, max = 200))]
    pub age: Option<i32>,
    #[validate(length(max = 100))]
    pub skilled_in: Option<String>,
    #[validate(range(min = 5, max = 100))]
    pub nex: Option<i32>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
    #[validate(range(min = 0, max = 5))]
    pub agility: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub intellect: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub vigor: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub presence: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub strength: Option<i32>,
    #[validate(range(min = 0))]
    pub current_health: Option<i32>,
    #[validate(range(min = 0))]
    pub current_effort: Option<i32>,
    #[validate(range(min = 0))]
    pub current_resolve: Option<i32>,
    #[validate(length(max = 50))]
    pub gender: Option<String>,
    pub appearance: Option<String>,
    pub personality: Option<String>,
    pub background: Option<String>,
    pub objective: Option<String>,
}

/// Stored resource values next to the maxima implied by the current scores.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterStats {
    pub character_id: DbId,
    pub scores: AbilityScores,
    pub maxima: DerivedStats,
    pub current_health: i32,
    pub current_effort: i32,
    pub current_resolve: i32,
}

impl From<&Character> for CharacterStats {
    fn from(character: &Character) -> Self {
        let scores = character.ability_scores();
        Self {
            character_id: character.id,
            scores,
            maxima: scores.derived(),
            current_health: character.current_health,
            current_effort: character.current_effort,
            current_resolve: character.current_resolve,
        }
    }
}

/// Rows removed by a character delete, per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CharacterDeletion {
    pub party_memberships: u64,
    pub campaign_memberships: u64,
    pub fights: u64,
    pub items: u64,
    pub skills: u64,
    pub rituals: u64,
}
