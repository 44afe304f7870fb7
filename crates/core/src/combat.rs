//! Fight resolution stub.
//!
//! A fight is a single random draw: the outcome is uniform over
//! won/lost/draw and the experience award is uniform over a range chosen by
//! the outcome. Ability scores and derived stats play no part.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Experience awarded on a win.
pub const WIN_EXPERIENCE: RangeInclusive<i32> = 50..=100;
/// Experience awarded on a loss.
pub const LOSS_EXPERIENCE: RangeInclusive<i32> = 10..=30;
/// Experience awarded on a draw.
pub const DRAW_EXPERIENCE: RangeInclusive<i32> = 20..=40;

/// Result of a fight from the attacker's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightOutcome {
    Won,
    Lost,
    Draw,
}

impl FightOutcome {
    pub const ALL: [FightOutcome; 3] = [Self::Won, Self::Lost, Self::Draw];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Draw => "draw",
        }
    }

    /// Inclusive experience range for this outcome.
    pub fn experience_range(self) -> RangeInclusive<i32> {
        match self {
            Self::Won => WIN_EXPERIENCE,
            Self::Lost => LOSS_EXPERIENCE,
            Self::Draw => DRAW_EXPERIENCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("The caller owns no character to fight with")]
    AttackerHasNoCharacter,

    #[error("Opponent character {0} does not exist")]
    OpponentNotFound(DbId),

    #[error("A character cannot fight itself")]
    InvalidOpponent,
}

impl CombatError {
    /// Stable `message` discriminator for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AttackerHasNoCharacter => "attacker_has_no_character",
            Self::OpponentNotFound(_) => "opponent_not_found",
            Self::InvalidOpponent => "invalid_opponent",
        }
    }
}

/// A validated attacker/defender pair, ready to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contest {
    pub attacker_id: DbId,
    pub defender_id: DbId,
}

impl Contest {
    /// Check the participants of a fight.
    ///
    /// `attacker_id` is the caller's character (if any); `defender_exists`
    /// reports whether `defender_id` resolved to a stored character.
    pub fn new(
        attacker_id: Option<DbId>,
        defender_id: DbId,
        defender_exists: bool,
    ) -> Result<Self, CombatError> {
        let attacker_id = attacker_id.ok_or(CombatError::AttackerHasNoCharacter)?;
        if !defender_exists {
            return Err(CombatError::OpponentNotFound(defender_id));
        }
        if attacker_id == defender_id {
            return Err(CombatError::InvalidOpponent);
        }
        Ok(Self {
            attacker_id,
            defender_id,
        })
    }

    /// Draw an outcome and an experience award.
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> FightResolution {
        let outcome = FightOutcome::ALL[rng.random_range(0..FightOutcome::ALL.len())];
        let experience = rng.random_range(outcome.experience_range());
        FightResolution {
            outcome,
            experience,
        }
    }
}

/// Outcome and experience of one resolved fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FightResolution {
    pub outcome: FightOutcome,
    pub experience: i32,
}
