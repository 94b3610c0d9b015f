//! Game settings screen — choose the five session options, then write the
//! save bundle that the chat screen plays against.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::game::settings::{Difficulty, GameLength, InteractionLevel, NarrativeStyle};
use crate::game::{GameSettings, Party};
use crate::storage::SaveBundle;
use crate::ui::console;

/// Walk the five options (pre-selecting `defaults`), then create the bundle
/// under `saves_dir`. When prior saves exist the user may first re-apply a
/// saved bundle's settings as the defaults. `None` on end-of-input.
pub fn run<R: BufRead, W: Write>(
    saves_dir: &Path,
    party: &Party,
    mut defaults: GameSettings,
    input: &mut R,
    out: &mut W,
) -> Result<Option<(PathBuf, SaveBundle)>, AppError> {
    writeln!(out, "\n=== Game Settings ===")?;

    if let Some(loaded) = load_previous(saves_dir, input, out)? {
        defaults = loaded;
    }

    let Some(difficulty) = pick(input, out, "Difficulty:", &Difficulty::ALL, defaults.difficulty)?
    else {
        return Ok(None);
    };
    let Some(length) = pick(input, out, "Game Length:", &GameLength::ALL, defaults.length)? else {
        return Ok(None);
    };
    let Some(permadeath) = console::confirm(input, out, "Permadeath?", defaults.permadeath)? else {
        return Ok(None);
    };
    let Some(narrative_style) = pick(
        input,
        out,
        "Narrative Style:",
        &NarrativeStyle::ALL,
        defaults.narrative_style,
    )?
    else {
        return Ok(None);
    };
    let Some(interaction_level) = pick(
        input,
        out,
        "Player Interaction Level:",
        &InteractionLevel::ALL,
        defaults.interaction_level,
    )?
    else {
        return Ok(None);
    };

    let settings = GameSettings {
        difficulty,
        length,
        permadeath,
        narrative_style,
        interaction_level,
    };
    let (path, bundle) = SaveBundle::create(saves_dir, party, settings)?;
    writeln!(out, "Game saved to {}", path.display())?;
    Ok(Some((path, bundle)))
}

/// Offer the settings of an existing save bundle as the new defaults.
/// Skipped silently when there are no saves yet.
fn load_previous<R: BufRead, W: Write>(
    saves_dir: &Path,
    input: &mut R,
    out: &mut W,
) -> Result<Option<GameSettings>, AppError> {
    let saved = SaveBundle::list(saves_dir)?;
    if saved.is_empty() {
        return Ok(None);
    }

    match console::confirm(input, out, "Load settings from a previous save?", false)? {
        Some(true) => {}
        _ => return Ok(None),
    }

    let names: Vec<String> = saved
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let Some(index) = console::select(input, out, "Which save?", &refs, refs.len() - 1)? else {
        return Ok(None);
    };

    let bundle = SaveBundle::load(&saved[index])?;
    writeln!(out, "Loaded settings from {}.", names[index])?;
    Ok(Some(bundle.settings))
}

/// Numbered pick over one option enum, defaulting to the current value.
fn pick<R: BufRead, W: Write, T: Copy + PartialEq + std::fmt::Display>(
    input: &mut R,
    out: &mut W,
    title: &str,
    options: &[T],
    current: T,
) -> Result<Option<T>, AppError> {
    let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);

    match console::select(input, out, title, &refs, default)? {
        Some(index) => Ok(Some(options[index])),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CharacterSheet, PartyMember};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn party() -> Party {
        let members = ["A", "B", "C", "D"]
            .iter()
            .map(|n| {
                let sheet = CharacterSheet::sample(n);
                PartyMember { file: PathBuf::from(sheet.file_name()), sheet }
            })
            .collect();
        Party::assemble(members).unwrap()
    }

    #[test]
    fn defaults_all_the_way_through() {
        let dir = TempDir::new().unwrap();
        let saves = dir.path().join("saves");
        let mut input = Cursor::new("\n\n\n\n\n");
        let mut out = Vec::new();

        let (path, bundle) =
            run(&saves, &party(), GameSettings::default(), &mut input, &mut out)
                .unwrap()
                .unwrap();
        assert!(path.exists());
        assert_eq!(bundle.settings, GameSettings::default());
        assert_eq!(bundle.party_members.len(), 4);
    }

    #[test]
    fn explicit_choices_are_recorded() {
        let dir = TempDir::new().unwrap();
        let saves = dir.path().join("saves");
        // Hard, Short, permadeath yes, Mysterious, Story-Driven.
        let mut input = Cursor::new("3\n1\ny\n3\n3\n");
        let mut out = Vec::new();

        let (_, bundle) =
            run(&saves, &party(), GameSettings::default(), &mut input, &mut out)
                .unwrap()
                .unwrap();
        assert_eq!(bundle.settings.difficulty, Difficulty::Hard);
        assert_eq!(bundle.settings.length, GameLength::Short);
        assert!(bundle.settings.permadeath);
        assert_eq!(bundle.settings.narrative_style, NarrativeStyle::Mysterious);
        assert_eq!(bundle.settings.interaction_level, InteractionLevel::StoryDriven);
    }

    #[test]
    fn previous_save_settings_become_defaults() {
        let dir = TempDir::new().unwrap();
        let saves = dir.path().join("saves");

        let prior = GameSettings {
            difficulty: Difficulty::Hard,
            permadeath: true,
            ..GameSettings::default()
        };
        SaveBundle::create(&saves, &party(), prior).unwrap();

        // Accept the load prompt, pick the only save, then take every
        // default — which should now be the prior settings.
        let mut input = Cursor::new("y\n\n\n\n\n\n\n");
        let mut out = Vec::new();

        let (_, bundle) =
            run(&saves, &party(), GameSettings::default(), &mut input, &mut out)
                .unwrap()
                .unwrap();
        assert_eq!(bundle.settings, prior);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Loaded settings from"));
    }

    #[test]
    fn eof_mid_screen_backs_out() {
        let dir = TempDir::new().unwrap();
        let saves = dir.path().join("saves");
        let mut input = Cursor::new("2\n");
        let mut out = Vec::new();

        let result =
            run(&saves, &party(), GameSettings::default(), &mut input, &mut out).unwrap();
        assert!(result.is_none());
        assert!(SaveBundle::list(&saves).unwrap().is_empty());
    }
}
