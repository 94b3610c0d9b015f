//! Character creator screen.
//!
//! A form-style wizard: manual entry walks every field with its option
//! list; auto-generate asks the model for a complete sheet
//! in bare JSON, parses and validates it, and only then offers to save.
//! Parse errors and missing fields are reported and leave nothing populated.

use std::io::{BufRead, Write};

use tracing::warn;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::game::character::{
    ALIGNMENTS, CLASSES, GENDERS, LEVEL_MAX, LEVEL_MIN, PORTRAITS, RACES, STAT_MAX, STAT_MIN,
};
use crate::game::{CharacterSheet, Stats};
use crate::llm::{GenerateOptions, LlmProvider};
use crate::session::prompt;
use crate::storage::CharacterStore;
use crate::ui::console;

pub fn run<R: BufRead, W: Write>(
    store: &CharacterStore,
    provider: &LlmProvider,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<(), AppError> {
    let mut created: Vec<CharacterSheet> = Vec::new();

    loop {
        writeln!(out, "\n=== Character Creation ===")?;
        let choice = console::select(
            input,
            out,
            "What would you like to do?",
            &[
                "Create a character",
                "Auto-generate a character",
                "View characters created this run",
                "Done — continue to party selection",
            ],
            0,
        )?;

        match choice {
            Some(0) => {
                if let Some(sheet) = manual_entry(input, out)? {
                    save_sheet(store, &sheet, out)?;
                    created.push(sheet);
                }
            }
            Some(1) => match auto_generate(provider, config, input, out)? {
                Some(sheet) => {
                    save_sheet(store, &sheet, out)?;
                    created.push(sheet);
                }
                None => {}
            },
            Some(2) => view_created(&created, out)?,
            Some(3) | None => return Ok(()),
            Some(_) => unreachable!(),
        }
    }
}

/// Walk the form fields in order. Returns `None` when the
/// user abandons the form (EOF) or omits the required name.
fn manual_entry<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Option<CharacterSheet>, AppError> {
    let Some(name) = console::read_line(input, out, "Character name: ")? else {
        return Ok(None);
    };
    if name.is_empty() {
        writeln!(out, "Missing name — please provide a character name.")?;
        return Ok(None);
    }

    let Some(gender) = console::select(input, out, "Gender:", GENDERS, 0)? else {
        return Ok(None);
    };
    let Some(race) = console::select(input, out, "Race:", RACES, 0)? else {
        return Ok(None);
    };
    let Some(class) = console::select(input, out, "Class:", CLASSES, 0)? else {
        return Ok(None);
    };
    let Some(level) = console::read_number(input, out, "Level", LEVEL_MIN, LEVEL_MAX, 1)? else {
        return Ok(None);
    };
    let Some(alignment) = console::select(input, out, "Alignment:", ALIGNMENTS, 0)? else {
        return Ok(None);
    };
    let Some(background) = console::read_line(input, out, "Background: ")? else {
        return Ok(None);
    };
    let Some(stats) = prompt_stats(input, out)? else {
        return Ok(None);
    };
    let Some(portrait) = console::select(input, out, "Portrait:", PORTRAITS, 0)? else {
        return Ok(None);
    };

    let sheet = CharacterSheet {
        id: Uuid::new_v4(),
        name,
        gender: GENDERS[gender].to_string(),
        race: RACES[race].to_string(),
        class_name: CLASSES[class].to_string(),
        level,
        alignment: ALIGNMENTS[alignment].to_string(),
        background,
        stats,
        portrait: PORTRAITS[portrait].to_string(),
    };
    sheet.validate()?;
    Ok(Some(sheet))
}

fn prompt_stats<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Option<Stats>, AppError> {
    writeln!(out, "Stats ({STAT_MIN}-{STAT_MAX}):")?;
    let mut values = [0u8; 6];
    for (slot, (label, _)) in values.iter_mut().zip(Stats::default().named()) {
        let Some(v) = console::read_number(input, out, &format!("  {label}"), STAT_MIN, STAT_MAX, 10)?
        else {
            return Ok(None);
        };
        *slot = v;
    }
    Ok(Some(Stats {
        strength: values[0],
        dexterity: values[1],
        constitution: values[2],
        intelligence: values[3],
        wisdom: values[4],
        charisma: values[5],
    }))
}

/// Ask the model for a sheet, parse, validate, and confirm before saving.
/// Every failure is reported and leaves the form unpopulated.
fn auto_generate<R: BufRead, W: Write>(
    provider: &LlmProvider,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<Option<CharacterSheet>, AppError> {
    writeln!(out, "Auto-generating character...")?;

    let reply = match provider.generate(
        &prompt::character_generation(),
        &GenerateOptions::sheet_generation(config),
    ) {
        Ok(reply) => reply,
        Err(e) => {
            warn!("character generation failed: {e}");
            writeln!(out, "Error: an error occurred while generating a character: {e}")?;
            return Ok(None);
        }
    };

    let mut sheet = match CharacterSheet::from_generated(&reply) {
        Ok(sheet) => sheet,
        Err(e) => {
            warn!("generated sheet rejected: {e}");
            writeln!(out, "Error: {e}")?;
            return Ok(None);
        }
    };

    writeln!(out, "Character generated:")?;
    print_sheet(&sheet, out)?;

    let Some(keep) = console::confirm(input, out, "Save this character?", true)? else {
        return Ok(None);
    };
    if !keep {
        return Ok(None);
    }

    if sheet.portrait.is_empty() {
        let Some(portrait) = console::select(input, out, "Portrait:", PORTRAITS, 0)? else {
            return Ok(None);
        };
        sheet.portrait = PORTRAITS[portrait].to_string();
    }
    Ok(Some(sheet))
}

fn save_sheet<W: Write>(
    store: &CharacterStore,
    sheet: &CharacterSheet,
    out: &mut W,
) -> Result<(), AppError> {
    match store.save(sheet) {
        Ok(path) => {
            writeln!(out, "Character '{}' saved to {}.", sheet.name, path.display())?;
        }
        Err(e) => {
            // Non-fatal: the sheet stays in memory for this run.
            warn!("character save failed: {e}");
            writeln!(out, "Error: failed to save character: {e}")?;
        }
    }
    Ok(())
}

fn view_created<W: Write>(created: &[CharacterSheet], out: &mut W) -> Result<(), AppError> {
    if created.is_empty() {
        writeln!(out, "No characters have been created yet.")?;
        return Ok(());
    }
    for (idx, sheet) in created.iter().enumerate() {
        writeln!(out, "Character {}:", idx + 1)?;
        print_sheet(sheet, out)?;
        writeln!(out, "{}", "-".repeat(40))?;
    }
    Ok(())
}

fn print_sheet<W: Write>(sheet: &CharacterSheet, out: &mut W) -> Result<(), AppError> {
    writeln!(out, "  Name: {}", sheet.name)?;
    writeln!(out, "  Gender: {}", sheet.gender)?;
    writeln!(out, "  Race: {}", sheet.race)?;
    writeln!(out, "  Class: {}", sheet.class_name)?;
    writeln!(out, "  Level: {}", sheet.level)?;
    writeln!(out, "  Alignment: {}", sheet.alignment)?;
    writeln!(out, "  Background: {}", sheet.background)?;
    writeln!(out, "  Stats:")?;
    for (stat, value) in sheet.stats.named() {
        writeln!(out, "    {stat}: {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn dummy_setup(dir: &Path) -> (Config, LlmProvider, CharacterStore) {
        let config = Config::test_default(dir);
        let provider = LlmProvider::from_config(&config).unwrap();
        let store = CharacterStore::new(dir.join("characters"));
        (config, provider, store)
    }

    const GENERATED: &str = r#"{
        "name": "Thorin", "gender": "Male", "race": "Dwarf", "class": "Fighter",
        "level": 5, "alignment": "Lawful Good", "background": "Mountain veteran.",
        "stats": {"Strength": 17, "Dexterity": 12, "Constitution": 16,
                  "Intelligence": 9, "Wisdom": 11, "Charisma": 10}
    }"#;

    #[test]
    fn manual_entry_saves_a_sheet() {
        let dir = TempDir::new().unwrap();
        let (config, provider, store) = dummy_setup(dir.path());

        // menu 1 (create), name, defaults for gender/race/class/level/alignment,
        // background, defaults for six stats and the portrait, then menu 4 (done).
        let script = "1\nLyra\n\n\n\n\n\nA quiet scholar.\n\n\n\n\n\n\n\n4\n";
        let mut input = Cursor::new(script);
        let mut out = Vec::new();
        run(&store, &provider, &config, &mut input, &mut out).unwrap();

        let sheets = store.list().unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].1.name, "Lyra");
        assert_eq!(sheets[0].1.gender, "Male");
        assert_eq!(sheets[0].1.level, 1);
        assert_eq!(sheets[0].1.stats, Stats::default());
    }

    #[test]
    fn empty_name_aborts_entry() {
        let dir = TempDir::new().unwrap();
        let (config, provider, store) = dummy_setup(dir.path());

        let mut input = Cursor::new("1\n\n4\n");
        let mut out = Vec::new();
        run(&store, &provider, &config, &mut input, &mut out).unwrap();

        assert!(store.list().unwrap().is_empty());
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Missing name"));
    }

    #[test]
    fn auto_generate_saves_valid_sheet() {
        let dir = TempDir::new().unwrap();
        let (config, provider, store) = dummy_setup(dir.path());
        if let LlmProvider::Dummy(d) = &provider {
            d.push_reply(GENERATED);
        }

        // menu 2 (auto), accept save, default portrait, menu 4 (done).
        let mut input = Cursor::new("2\ny\n\n4\n");
        let mut out = Vec::new();
        run(&store, &provider, &config, &mut input, &mut out).unwrap();

        let sheets = store.list().unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].1.name, "Thorin");
        assert_eq!(sheets[0].1.portrait, PORTRAITS[0]);
    }

    #[test]
    fn malformed_generation_reported_and_nothing_saved() {
        let dir = TempDir::new().unwrap();
        let (config, provider, store) = dummy_setup(dir.path());
        if let LlmProvider::Dummy(d) = &provider {
            d.push_reply("```json\n{\"name\": \"X\"}\n```");
        }

        let mut input = Cursor::new("2\n4\n");
        let mut out = Vec::new();
        run(&store, &provider, &config, &mut input, &mut out).unwrap();

        assert!(store.list().unwrap().is_empty());
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("not valid JSON"));
    }

    #[test]
    fn missing_fields_reported_per_field() {
        let dir = TempDir::new().unwrap();
        let (config, provider, store) = dummy_setup(dir.path());
        if let LlmProvider::Dummy(d) = &provider {
            d.push_reply(r#"{"name": "X", "gender": "Male"}"#);
        }

        let mut input = Cursor::new("2\n4\n");
        let mut out = Vec::new();
        run(&store, &provider, &config, &mut input, &mut out).unwrap();

        assert!(store.list().unwrap().is_empty());
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("race"));
        assert!(shown.contains("stats"));
    }

    #[test]
    fn view_lists_created_characters() {
        let dir = TempDir::new().unwrap();
        let (config, provider, store) = dummy_setup(dir.path());

        let script = "1\nLyra\n\n\n\n\n\nBackground.\n\n\n\n\n\n\n\n3\n4\n";
        let mut input = Cursor::new(script);
        let mut out = Vec::new();
        run(&store, &provider, &config, &mut input, &mut out).unwrap();

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Character 1:"));
        assert!(shown.contains("Name: Lyra"));
    }
}
