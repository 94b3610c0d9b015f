//! On-disk persistence: character sheets, save bundles, and the
//! checkpointed chat log. All formats are plain JSON, one object per file.

pub mod bundle;
pub mod characters;
pub mod chat_log;

pub use bundle::SaveBundle;
pub use characters::CharacterStore;
pub use chat_log::{append_and_save, SaveOutcome};
