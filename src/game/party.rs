//! Party assembly — the fixed-size set of sheets taken into a session.

use std::path::PathBuf;

use crate::error::AppError;
use crate::game::CharacterSheet;

/// A session party is exactly this many characters.
pub const PARTY_SIZE: usize = 4;

/// One selected party slot: the sheet plus the file it came from.
/// The file path travels into the save bundle so a later load can re-read
/// the sheet.
#[derive(Debug, Clone)]
pub struct PartyMember {
    pub file: PathBuf,
    pub sheet: CharacterSheet,
}

#[derive(Debug, Clone)]
pub struct Party {
    members: Vec<PartyMember>,
}

impl Party {
    /// Build a party from the picker's selection. Anything other than
    /// exactly [`PARTY_SIZE`] members is rejected.
    pub fn assemble(members: Vec<PartyMember>) -> Result<Self, AppError> {
        if members.len() != PARTY_SIZE {
            return Err(AppError::Party(format!(
                "please select exactly {PARTY_SIZE} characters (got {})",
                members.len()
            )));
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    /// Sheet file references, in selection order — the save-bundle form.
    pub fn files(&self) -> Vec<PathBuf> {
        self.members.iter().map(|m| m.file.clone()).collect()
    }

    /// Roster block used in prompts and on the chat screen:
    /// one `- {name} (Level {level}, {class})` line per member.
    pub fn roster_summary(&self) -> String {
        let mut out = String::new();
        for member in &self.members {
            out.push_str(&format!("- {}\n", member.sheet.summary()));
        }
        out
    }
}
