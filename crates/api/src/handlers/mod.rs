pub mod auth;
pub mod campaign;
pub mod campaign_membership;
pub mod character;
pub mod inventory;
pub mod me;
pub mod party;
pub mod party_membership;
pub mod users;
