//! Prompt assembly — pure string templating, no branching complexity.
//!
//! Layout: a settings block, the party roster, the
//! windowed history as alternating `Player:` / `Dungeon Master:` lines,
//! then the new player message with a closing `DM:` cue. The persona travels
//! separately as the system message of the generation call.

use crate::game::{GameSettings, Party};
use crate::session::Exchange;

/// Assemble the full user-message prompt for one Dungeon Master turn.
/// `recent` is the already-windowed suffix of the session history.
pub fn assemble(
    settings: &GameSettings,
    party: &Party,
    recent: &[Exchange],
    user_message: &str,
) -> String {
    let settings_json =
        serde_json::to_string(settings).unwrap_or_else(|_| "{}".to_string());

    let history = recent
        .iter()
        .map(|e| format!("Player: {}\nDungeon Master: {}", e.user, e.response))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Game Settings: {settings_json}\n\
         Party Members:\n{roster}\n\
         Conversation History:\n{history}\n\
         \nDungeon Master, please respond to the player's message:\n\n\
         Player: {user_message}\nDM:",
        roster = party.roster_summary(),
    )
}

/// The fixed instruction asking the model for a complete character sheet
/// as bare JSON.
pub fn character_generation() -> String {
    "Please create a D&D character with the following characteristics: \n\n\
     name\n\
     gender (Only Male or Female)\n\
     race\n\
     class\n\
     level\n\
     alignment\n\
     background\n\
     stats (Strength, Dexterity, Constitution, Intelligence, Wisdom, and Charisma).\n\n\
     Please respond in valid JSON format with no backticks."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CharacterSheet, Party, PartyMember};
    use std::path::PathBuf;

    fn party() -> Party {
        let members = ["Ash", "Bryn", "Cora", "Dane"]
            .iter()
            .map(|n| {
                let sheet = CharacterSheet::sample(n);
                PartyMember { file: PathBuf::from(sheet.file_name()), sheet }
            })
            .collect();
        Party::assemble(members).unwrap()
    }

    #[test]
    fn sections_appear_in_order() {
        let recent = vec![Exchange {
            id: 1,
            user: "look around".into(),
            response: "You see a cave.".into(),
        }];
        let prompt = assemble(&GameSettings::default(), &party(), &recent, "enter the cave");

        let settings_pos = prompt.find("Game Settings:").unwrap();
        let roster_pos = prompt.find("Party Members:").unwrap();
        let history_pos = prompt.find("Conversation History:").unwrap();
        let message_pos = prompt.find("Player: enter the cave").unwrap();
        assert!(settings_pos < roster_pos);
        assert!(roster_pos < history_pos);
        assert!(history_pos < message_pos);
        assert!(prompt.ends_with("DM:"));
    }

    #[test]
    fn history_rendered_as_alternating_lines() {
        let recent = vec![
            Exchange { id: 1, user: "hi".into(), response: "Welcome.".into() },
            Exchange { id: 2, user: "go".into(), response: "You go.".into() },
        ];
        let prompt = assemble(&GameSettings::default(), &party(), &recent, "x");
        assert!(prompt.contains("Player: hi\nDungeon Master: Welcome.\nPlayer: go\nDungeon Master: You go."));
    }

    #[test]
    fn roster_lists_every_member() {
        let prompt = assemble(&GameSettings::default(), &party(), &[], "x");
        for name in ["Ash", "Bryn", "Cora", "Dane"] {
            assert!(prompt.contains(&format!("- {name} (Level 3, Wizard)")));
        }
    }

    #[test]
    fn generation_instruction_requests_bare_json() {
        let p = character_generation();
        assert!(p.contains("no backticks"));
        assert!(p.contains("Charisma"));
    }
}
