//! Session settings — the five enumerated options chosen before play.
//!
//! On-disk values are the capitalised strings of the save format
//! (`"Medium"`, `"Story-Driven"`, …).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameLength {
    Short,
    #[default]
    Medium,
    Long,
}

/// `Balanced` is the default even though the settings screen lists all four;
/// older save files may carry any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NarrativeStyle {
    Humorous,
    Serious,
    Mysterious,
    #[default]
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionLevel {
    Minimal,
    #[default]
    Balanced,
    #[serde(rename = "Story-Driven")]
    StoryDriven,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

impl GameLength {
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];
}

impl NarrativeStyle {
    pub const ALL: [Self; 4] = [Self::Humorous, Self::Serious, Self::Mysterious, Self::Balanced];
}

impl InteractionLevel {
    pub const ALL: [Self; 3] = [Self::Minimal, Self::Balanced, Self::StoryDriven];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        })
    }
}

impl std::fmt::Display for GameLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        })
    }
}

impl std::fmt::Display for NarrativeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Humorous => "Humorous",
            Self::Serious => "Serious",
            Self::Mysterious => "Mysterious",
            Self::Balanced => "Balanced",
        })
    }
}

impl std::fmt::Display for InteractionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Minimal => "Minimal",
            Self::Balanced => "Balanced",
            Self::StoryDriven => "Story-Driven",
        })
    }
}

/// The flat settings mapping persisted in every save bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSettings {
    pub difficulty: Difficulty,
    pub length: GameLength,
    pub permadeath: bool,
    pub narrative_style: NarrativeStyle,
    pub interaction_level: InteractionLevel,
}
