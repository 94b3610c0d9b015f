//! Character sheets — created from the form screen or parsed from model
//! output.
//!
//! Identity is a generated UUID, not the file path: duplicate names collide
//! under the name/level/class filename scheme, so the filename is
//! kept only as a human-readable convention. Gender, race, class, and
//! alignment stay free-form strings on the sheet (the model is not bound to
//! the form's option lists); the bounds that are enforced — for manual and
//! generated sheets alike — are a non-empty name, level 1..=20, and each
//! stat 1..=20.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

pub const LEVEL_MIN: u8 = 1;
pub const LEVEL_MAX: u8 = 20;
pub const STAT_MIN: u8 = 1;
pub const STAT_MAX: u8 = 20;

/// Option lists offered by the creator form. The sheet itself accepts any
/// string, so generated characters outside these lists still load.
pub const GENDERS: &[&str] = &["Male", "Female"];
pub const RACES: &[&str] = &["Human", "Elf", "Dwarf", "Halfling"];
pub const CLASSES: &[&str] = &[
    "Barbarian", "Fighter", "Rogue", "Wizard", "Paladin", "Cleric", "Ranger", "Monk", "Druid",
];
pub const ALIGNMENTS: &[&str] = &[
    "Lawful Good",
    "Neutral Good",
    "Chaotic Good",
    "Lawful Neutral",
    "True Neutral",
    "Chaotic Neutral",
    "Lawful Evil",
    "Neutral Evil",
    "Chaotic Evil",
];
pub const PORTRAITS: &[&str] = &[
    "pictures/barbarian.png",
    "pictures/wizard.png",
    "pictures/ranger.png",
    "pictures/fighter.png",
    "pictures/bard.png",
    "pictures/cleric.png",
    "pictures/druid.png",
    "pictures/paladin.png",
];

/// The six named attributes, each bounded 1..=20.
/// On-disk keys are the capitalised attribute names of the sheet format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "Strength", default = "default_stat")]
    pub strength: u8,
    #[serde(rename = "Dexterity", default = "default_stat")]
    pub dexterity: u8,
    #[serde(rename = "Constitution", default = "default_stat")]
    pub constitution: u8,
    #[serde(rename = "Intelligence", default = "default_stat")]
    pub intelligence: u8,
    #[serde(rename = "Wisdom", default = "default_stat")]
    pub wisdom: u8,
    #[serde(rename = "Charisma", default = "default_stat")]
    pub charisma: u8,
}

fn default_stat() -> u8 {
    10
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

impl Stats {
    /// Attribute name/value pairs in display order.
    pub fn named(&self) -> [(&'static str, u8); 6] {
        [
            ("Strength", self.strength),
            ("Dexterity", self.dexterity),
            ("Constitution", self.constitution),
            ("Intelligence", self.intelligence),
            ("Wisdom", self.wisdom),
            ("Charisma", self.charisma),
        ]
    }
}

/// One character sheet, persisted as one JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheet {
    /// Stable identity. Sheets written before ids existed get a fresh one
    /// on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub race: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub level: u8,
    pub alignment: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub stats: Stats,
    #[serde(rename = "profile_pic", default)]
    pub portrait: String,
}

impl CharacterSheet {
    /// Derived filename: `{name}_Level_{level}_{class}.json`.
    /// Human-readable convention only — identity is [`CharacterSheet::id`].
    pub fn file_name(&self) -> String {
        format!("{}_Level_{}_{}.json", self.name, self.level, self.class_name)
    }

    /// Enforce the bounds shared by manual entry and auto-generation.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name must not be empty".to_string());
        }
        if !(LEVEL_MIN..=LEVEL_MAX).contains(&self.level) {
            problems.push(format!("level {} out of range {LEVEL_MIN}..={LEVEL_MAX}", self.level));
        }
        for (stat, value) in self.stats.named() {
            if !(STAT_MIN..=STAT_MAX).contains(&value) {
                problems.push(format!("{stat} {value} out of range {STAT_MIN}..={STAT_MAX}"));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::SheetInvalid(problems.join("; ")))
        }
    }

    /// Parse a model-generated sheet from raw reply text.
    ///
    /// Errors distinguish the taxonomy the screens report on:
    /// [`AppError::SheetParse`] for text that is not JSON at all, and
    /// [`AppError::SheetInvalid`] naming every missing required field or
    /// out-of-range value. Either way the caller's form stays unpopulated.
    pub fn from_generated(text: &str) -> Result<Self, AppError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| AppError::SheetParse(e.to_string()))?;

        const REQUIRED: &[&str] = &[
            "name", "gender", "race", "class", "level", "alignment", "background", "stats",
        ];
        let missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|field| value.get(field).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::SheetInvalid(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let sheet: CharacterSheet =
            serde_json::from_value(value).map_err(|e| AppError::SheetInvalid(e.to_string()))?;
        sheet.validate()?;
        Ok(sheet)
    }

    /// The one-line roster form used in prompts and listings.
    pub fn summary(&self) -> String {
        format!("{} (Level {}, {})", self.name, self.level, self.class_name)
    }
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Ready-made sheet for unit tests across modules.
#[cfg(test)]
impl CharacterSheet {
    pub fn sample(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            gender: "Female".into(),
            race: "Elf".into(),
            class_name: "Wizard".into(),
            level: 3,
            alignment: "Neutral Good".into(),
            background: "Raised in a library.".into(),
            stats: Stats::default(),
            portrait: "pictures/wizard.png".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = r#"{
        "name": "Thorin",
        "gender": "Male",
        "race": "Dwarf",
        "class": "Fighter",
        "level": 5,
        "alignment": "Lawful Good",
        "background": "A veteran of the mountain wars.",
        "stats": {
            "Strength": 17, "Dexterity": 12, "Constitution": 16,
            "Intelligence": 9, "Wisdom": 11, "Charisma": 10
        }
    }"#;

    #[test]
    fn file_name_scheme() {
        let sheet = CharacterSheet::sample("Lyra");
        assert_eq!(sheet.file_name(), "Lyra_Level_3_Wizard.json");
    }

    #[test]
    fn generated_sheet_parses() {
        let sheet = CharacterSheet::from_generated(GENERATED).unwrap();
        assert_eq!(sheet.name, "Thorin");
        assert_eq!(sheet.class_name, "Fighter");
        assert_eq!(sheet.stats.strength, 17);
        // Fresh identity assigned on parse.
        assert_ne!(sheet.id, Uuid::nil());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = CharacterSheet::from_generated("```json\n{}\n```").unwrap_err();
        assert!(matches!(err, AppError::SheetParse(_)), "got {err}");
    }

    #[test]
    fn missing_fields_named_individually() {
        let err = CharacterSheet::from_generated(r#"{"name": "X", "race": "Human"}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gender"));
        assert!(msg.contains("class"));
        assert!(msg.contains("alignment"));
        assert!(!msg.contains("race,"), "present fields must not be reported: {msg}");
    }

    #[test]
    fn generated_stats_share_manual_bounds() {
        let out_of_range = GENERATED.replace("\"Strength\": 17", "\"Strength\": 0");
        let err = CharacterSheet::from_generated(&out_of_range).unwrap_err();
        assert!(err.to_string().contains("Strength 0 out of range"));
    }

    #[test]
    fn level_bound_enforced() {
        let mut sheet = CharacterSheet::sample("Lyra");
        sheet.level = 0;
        assert!(sheet.validate().is_err());
        sheet.level = 21;
        assert!(sheet.validate().is_err());
        sheet.level = 20;
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn missing_stats_default_to_ten() {
        let partial = r#"{
            "name": "Mira", "gender": "Female", "race": "Human", "class": "Rogue",
            "level": 2, "alignment": "Chaotic Neutral", "background": "",
            "stats": {"Dexterity": 18}
        }"#;
        let sheet = CharacterSheet::from_generated(partial).unwrap();
        assert_eq!(sheet.stats.dexterity, 18);
        assert_eq!(sheet.stats.strength, 10);
    }

    #[test]
    fn sheet_without_id_gets_one_on_load() {
        let sheet: CharacterSheet = serde_json::from_str(GENERATED).unwrap();
        assert_ne!(sheet.id, Uuid::nil());
    }
}
