//! Domain rules for the Sigil RPG backend.
//!
//! This crate holds no I/O: the attribute model and derived-stat formulas,
//! the combat resolution stub, the membership integrity rules, and the
//! shared error taxonomy used by the `db` and `api` crates.

pub mod attributes;
pub mod combat;
pub mod error;
pub mod membership;
pub mod roles;
pub mod types;
pub mod validation;
