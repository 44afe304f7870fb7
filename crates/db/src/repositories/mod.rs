//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&mut PgConnection` as the first argument. Callers pass a
//! transaction (`&mut *tx`) so multi-step operations commit or roll back
//! together.

pub mod campaign_membership_repo;
pub mod campaign_repo;
pub mod character_repo;
pub mod fight_repo;
pub mod item_repo;
pub mod party_membership_repo;
pub mod party_repo;
pub mod ritual_repo;
pub mod session_repo;
pub mod skill_repo;
pub mod user_repo;

pub use campaign_membership_repo::CampaignMembershipRepo;
pub use campaign_repo::CampaignRepo;
pub use character_repo::CharacterRepo;
pub use fight_repo::FightRepo;
pub use item_repo::ItemRepo;
pub use party_membership_repo::PartyMembershipRepo;
pub use party_repo::PartyRepo;
pub use ritual_repo::RitualRepo;
pub use session_repo::SessionRepo;
pub use skill_repo::SkillRepo;
pub use user_repo::UserRepo;
