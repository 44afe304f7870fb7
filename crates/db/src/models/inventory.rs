//! Per-character inventory: items, skills and rituals.

use serde::{Deserialize, Serialize};
use sigil_core::types::{DbId, Timestamp};
use sigil_core::validation::{validate_not_blank, validate_skill_attribute};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

pub const DEFAULT_ITEM_CATEGORY: &str = "equipment";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub character_id: DbId,
    pub name: String,
    pub category: String,
    pub weight: f64,
    pub description: Option<String>,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

pub const DEFAULT_SKILL_ATTRIBUTE: &str = "AGI";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub character_id: DbId,
    pub name: String,
    pub attribute: String,
    pub bonus_dice: i32,
    pub training: i32,
    pub others: i32,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateSkill {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_skill_attribute"))]
    pub attribute: Option<String>,
    pub bonus_dice: Option<i32>,
    pub training: Option<i32>,
    pub others: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSkill {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_skill_attribute"))]
    pub attribute: Option<String>,
    pub bonus_dice: Option<i32>,
    pub training: Option<i32>,
    pub others: Option<i32>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Rituals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ritual {
    pub id: DbId,
    pub character_id: DbId,
    pub name: String,
    pub circle: i32,
    pub cost: i32,
    pub execution_time: Option<String>,
    pub range: Option<String>,
    pub duration: Option<String>,
    pub resistance_test: Option<String>,
    pub description: Option<String>,
    pub effect: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateRitual {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(range(min = 1, max = 4))]
    pub circle: Option<i32>,
    #[validate(range(min = 0))]
    pub cost: Option<i32>,
    pub execution_time: Option<String>,
    pub range: Option<String>,
    pub duration: Option<String>,
    pub resistance_test: Option<String>,
    pub description: Option<String>,
    pub effect: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRitual {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 4))]
    pub circle: Option<i32>,
    #[validate(range(min = 0))]
    pub cost: Option<i32>,
    pub execution_time: Option<String>,
    pub range: Option<String>,
    pub duration: Option<String>,
    pub resistance_test: Option<String>,
    pub description: Option<String>,
    pub effect: Option<String>,
}
