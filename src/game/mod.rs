//! Game domain model: character sheets, parties, and session settings.

pub mod character;
pub mod party;
pub mod settings;

pub use character::{CharacterSheet, Stats};
pub use party::{Party, PartyMember, PARTY_SIZE};
pub use settings::GameSettings;
