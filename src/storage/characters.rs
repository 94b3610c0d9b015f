//! Character sheet store — one JSON file per sheet in a flat directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::AppError;
use crate::game::CharacterSheet;

pub struct CharacterStore {
    dir: PathBuf,
}

impl CharacterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `sheet` to its derived filename, creating the directory on
    /// first use. Returns the file path for party selection.
    pub fn save(&self, sheet: &CharacterSheet) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Storage(format!("cannot create {}: {e}", self.dir.display())))?;

        let path = self.dir.join(sheet.file_name());
        let data = serde_json::to_string_pretty(sheet)
            .map_err(|e| AppError::Storage(format!("serialise character: {e}")))?;
        fs::write(&path, data)
            .map_err(|e| AppError::Storage(format!("cannot write {}: {e}", path.display())))?;

        info!(name = %sheet.name, path = %path.display(), "character saved");
        Ok(path)
    }

    /// Read a single sheet file.
    pub fn load(&self, path: &Path) -> Result<CharacterSheet, AppError> {
        let data = fs::read_to_string(path)
            .map_err(|e| AppError::Storage(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&data)
            .map_err(|e| AppError::Storage(format!("malformed {}: {e}", path.display())))
    }

    /// All readable sheets in the directory, sorted by filename for a stable
    /// listing. Unreadable or malformed files are skipped with a warning so
    /// one bad file never hides the rest.
    pub fn list(&self) -> Result<Vec<(PathBuf, CharacterSheet)>, AppError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| AppError::Storage(format!("cannot list {}: {e}", self.dir.display())))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut sheets = Vec::with_capacity(paths.len());
        for path in paths {
            match self.load(&path) {
                Ok(sheet) => sheets.push((path, sheet)),
                Err(e) => warn!("skipping character file: {e}"),
            }
        }
        Ok(sheets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = CharacterStore::new(dir.path().join("characters"));

        let sheet = CharacterSheet::sample("Lyra");
        let path = store.save(&sheet).unwrap();
        assert!(path.ends_with("Lyra_Level_3_Wizard.json"));

        let loaded = store.load(&path).unwrap();
        assert_eq!(loaded.id, sheet.id);
        assert_eq!(loaded.name, "Lyra");
        assert_eq!(loaded.stats, sheet.stats);
    }

    #[test]
    fn list_is_sorted_and_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        let store = CharacterStore::new(dir.path());

        store.save(&CharacterSheet::sample("Zed")).unwrap();
        store.save(&CharacterSheet::sample("Ann")).unwrap();
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sheets = store.list().unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].1.name, "Ann");
        assert_eq!(sheets[1].1.name, "Zed");
    }

    #[test]
    fn missing_directory_lists_empty() {
        let dir = TempDir::new().unwrap();
        let store = CharacterStore::new(dir.path().join("never_created"));
        assert!(store.list().unwrap().is_empty());
    }
}
