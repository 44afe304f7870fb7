//! Character attribute model and derived resource pools.
//!
//! Five ability scores (agility, intellect, vigor, presence, strength) feed
//! three linear formulas that size a character's health, effort and resolve
//! pools. The formulas are evaluated once at creation to seed the stored
//! `current_*` values; later score changes do not touch those values.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Lowest accepted ability score.
pub const MIN_ABILITY: i32 = 0;
/// Highest accepted ability score.
pub const MAX_ABILITY: i32 = 5;
/// Score assigned to any ability omitted at creation.
pub const DEFAULT_ABILITY: i32 = 1;

/// Lowest accepted NEX rank.
pub const MIN_NEX: i32 = 5;
/// Highest accepted NEX rank.
pub const MAX_NEX: i32 = 100;
/// NEX assigned when omitted at creation.
pub const DEFAULT_NEX: i32 = 5;

// ---------------------------------------------------------------------------
// Formula coefficients
// ---------------------------------------------------------------------------

const HEALTH_BASE: i32 = 10;
const HEALTH_PER_VIGOR: i32 = 5;
const HEALTH_PER_STRENGTH: i32 = 2;

const EFFORT_BASE: i32 = 6;
const EFFORT_PER_INTELLECT: i32 = 4;
const EFFORT_PER_PRESENCE: i32 = 2;

const RESOLVE_BASE: i32 = 8;
const RESOLVE_PER_INTELLECT: i32 = 3;
const RESOLVE_PER_PRESENCE: i32 = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The five ability scores of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub agility: i32,
    pub intellect: i32,
    pub vigor: i32,
    pub presence: i32,
    pub strength: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            agility: DEFAULT_ABILITY,
            intellect: DEFAULT_ABILITY,
            vigor: DEFAULT_ABILITY,
            presence: DEFAULT_ABILITY,
            strength: DEFAULT_ABILITY,
        }
    }
}

impl AbilityScores {
    /// Build scores from optional request fields, filling gaps with
    /// [`DEFAULT_ABILITY`].
    pub fn with_defaults(
        agility: Option<i32>,
        intellect: Option<i32>,
        vigor: Option<i32>,
        presence: Option<i32>,
        strength: Option<i32>,
    ) -> Self {
        Self {
            agility: agility.unwrap_or(DEFAULT_ABILITY),
            intellect: intellect.unwrap_or(DEFAULT_ABILITY),
            vigor: vigor.unwrap_or(DEFAULT_ABILITY),
            presence: presence.unwrap_or(DEFAULT_ABILITY),
            strength: strength.unwrap_or(DEFAULT_ABILITY),
        }
    }

    /// Shorthand for [`derive_stats`].
    pub fn derived(&self) -> DerivedStats {
        derive_stats(self)
    }
}

/// Maximum size of each resource pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    pub health_max: i32,
    pub effort_max: i32,
    pub resolve_max: i32,
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Compute the three resource maxima from a set of ability scores.
///
/// Pure: the result depends on nothing but `scores`.
pub fn derive_stats(scores: &AbilityScores) -> DerivedStats {
    DerivedStats {
        health_max: HEALTH_BASE
            + scores.vigor * HEALTH_PER_VIGOR
            + scores.strength * HEALTH_PER_STRENGTH,
        effort_max: EFFORT_BASE
            + scores.intellect * EFFORT_PER_INTELLECT
            + scores.presence * EFFORT_PER_PRESENCE,
        resolve_max: RESOLVE_BASE
            + scores.intellect * RESOLVE_PER_INTELLECT
            + scores.presence * RESOLVE_PER_PRESENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(agility: i32, intellect: i32, vigor: i32, presence: i32, strength: i32) -> AbilityScores {
        AbilityScores {
            agility,
            intellect,
            vigor,
            presence,
            strength,
        }
    }

    #[test]
    fn worked_example() {
        let stats = derive_stats(&scores(2, 4, 3, 3, 1));
        assert_eq!(stats.health_max, 27);
        assert_eq!(stats.effort_max, 28);
        assert_eq!(stats.resolve_max, 29);
    }

    #[test]
    fn default_scores_give_baseline_pools() {
        let stats = AbilityScores::default().derived();
        assert_eq!(
            stats,
            DerivedStats {
                health_max: 17,
                effort_max: 12,
                resolve_max: 14,
            }
        );
    }

    #[test]
    fn all_zero_scores_give_base_values() {
        let stats = derive_stats(&scores(0, 0, 0, 0, 0));
        assert_eq!(stats.health_max, HEALTH_BASE);
        assert_eq!(stats.effort_max, EFFORT_BASE);
        assert_eq!(stats.resolve_max, RESOLVE_BASE);
    }

    #[test]
    fn agility_does_not_feed_any_pool() {
        let low = derive_stats(&scores(0, 2, 2, 2, 2));
        let high = derive_stats(&scores(5, 2, 2, 2, 2));
        assert_eq!(low, high);
    }

    #[test]
    fn deterministic_over_whole_range() {
        for a in MIN_ABILITY..=MAX_ABILITY {
            for i in MIN_ABILITY..=MAX_ABILITY {
                for v in MIN_ABILITY..=MAX_ABILITY {
                    let s = scores(a, i, v, (a + i) % 6, (v + 1) % 6);
                    assert_eq!(derive_stats(&s), derive_stats(&s));
                    assert_eq!(derive_stats(&s).health_max, 10 + v * 5 + s.strength * 2);
                }
            }
        }
    }

    #[test]
    fn missing_scores_default_to_one() {
        let s = AbilityScores::with_defaults(Some(3), None, None, Some(0), None);
        assert_eq!(s, scores(3, 1, 1, 0, 1));
    }
}
