pub mod campaign;
pub mod character;
pub mod fight;
pub mod inventory;
pub mod membership;
pub mod party;
pub mod session;
pub mod user;
