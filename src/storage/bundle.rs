//! Save bundles — the file tying together a party, settings, and a chat-log
//! reference. One bundle per saved session under the saves directory, named
//! `game_{timestamp}.json` with its chat log beside it at
//! `game_{timestamp}_chat.json`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::game::{GameSettings, Party};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveBundle {
    /// Sheet file references, in selection order.
    pub party_members: Vec<PathBuf>,
    pub settings: GameSettings,
    pub chat_file: PathBuf,
}

impl SaveBundle {
    /// Write a new timestamped bundle for `party` and `settings`, creating
    /// the saves directory if needed. Returns the bundle path and the bundle
    /// itself (whose `chat_file` the chat screen appends to).
    pub fn create(
        saves_dir: &Path,
        party: &Party,
        settings: GameSettings,
    ) -> Result<(PathBuf, Self), AppError> {
        fs::create_dir_all(saves_dir)
            .map_err(|e| AppError::Storage(format!("cannot create {}: {e}", saves_dir.display())))?;

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let save_file = saves_dir.join(format!("game_{timestamp}.json"));
        let chat_file = saves_dir.join(format!("game_{timestamp}_chat.json"));

        let bundle = Self {
            party_members: party.files(),
            settings,
            chat_file,
        };
        bundle.write(&save_file)?;

        info!(path = %save_file.display(), "game settings saved");
        Ok((save_file, bundle))
    }

    fn write(&self, path: &Path) -> Result<(), AppError> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Storage(format!("serialise save bundle: {e}")))?;
        fs::write(path, data)
            .map_err(|e| AppError::Storage(format!("cannot write {}: {e}", path.display())))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let data = fs::read_to_string(path)
            .map_err(|e| AppError::Storage(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&data)
            .map_err(|e| AppError::Storage(format!("malformed {}: {e}", path.display())))
    }

    /// Bundle files available to "Load Game": every `.json` in the saves
    /// directory except the chat logs, newest name last.
    pub fn list(saves_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        if !saves_dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(saves_dir)
            .map_err(|e| AppError::Storage(format!("cannot list {}: {e}", saves_dir.display())))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .filter(|p| {
                p.file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|s| !s.ends_with("_chat"))
            })
            .collect();
        paths.sort();
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CharacterSheet, PartyMember};
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
    fn create_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let saves = dir.path().join("saves");

        let settings = GameSettings { permadeath: true, ..GameSettings::default() };
        let (path, bundle) = SaveBundle::create(&saves, &party(), settings).unwrap();
        assert!(path.exists());
        assert!(bundle.chat_file.to_string_lossy().ends_with("_chat.json"));

        let loaded = SaveBundle::load(&path).unwrap();
        assert_eq!(loaded.party_members.len(), 4);
        assert_eq!(loaded.settings, settings);
        assert_eq!(loaded.chat_file, bundle.chat_file);
    }

    #[test]
    fn list_excludes_chat_logs() {
        let dir = TempDir::new().unwrap();
        let saves = dir.path().join("saves");

        let (path, bundle) = SaveBundle::create(&saves, &party(), GameSettings::default()).unwrap();
        fs::write(&bundle.chat_file, "{}").unwrap();

        let listed = SaveBundle::list(&saves).unwrap();
        assert_eq!(listed, vec![path]);
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(SaveBundle::list(&dir.path().join("saves")).unwrap().is_empty());
    }

    #[test]
    fn load_missing_bundle_errors() {
        let dir = TempDir::new().unwrap();
        let err = SaveBundle::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
