//! Checkpointed append log for conversation history.
//!
//! The file holds `{last_saved_index, conversation_history}`; the checkpoint
//! is the highest exchange id ever flushed. Saving appends only the entries
//! beyond the stored checkpoint and rewrites the file in one overwrite.
//! Any failure is surfaced as a non-fatal error value — the in-memory
//! history is never touched by persistence.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::session::Exchange;

/// On-disk shape of a chat log file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatLog {
    pub last_saved_index: u64,
    pub conversation_history: Vec<Exchange>,
}

/// Result of one [`append_and_save`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New entries were flushed; `checkpoint` is the new highest saved id.
    Appended { checkpoint: u64, appended: usize },
    /// Nothing beyond the stored checkpoint — file untouched.
    UpToDate { checkpoint: u64 },
}

impl SaveOutcome {
    pub fn checkpoint(&self) -> u64 {
        match self {
            SaveOutcome::Appended { checkpoint, .. } => *checkpoint,
            SaveOutcome::UpToDate { checkpoint } => *checkpoint,
        }
    }
}

/// Read a chat log from `path`. A missing file is an empty log with
/// checkpoint 0; a present-but-unreadable file is an error.
pub fn load(path: &Path) -> Result<ChatLog, AppError> {
    if !path.exists() {
        return Ok(ChatLog::default());
    }
    let data = fs::read_to_string(path)
        .map_err(|e| AppError::Storage(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&data)
        .map_err(|e| AppError::Storage(format!("malformed {}: {e}", path.display())))
}

/// Flush the entries of `history` not yet on disk.
///
/// Reads the prior state from `path` (missing file ⇒ checkpoint 0), selects
/// entries with `id` greater than the stored checkpoint, appends them to the
/// saved list, and rewrites the file with the checkpoint recomputed as the
/// maximum id across the combined list. A call with nothing new is a no-op
/// and leaves the file byte-identical.
pub fn append_and_save(path: &Path, history: &[Exchange]) -> Result<SaveOutcome, AppError> {
    let mut log = load(path)?;

    let new_entries: Vec<Exchange> = history
        .iter()
        .filter(|e| e.id > log.last_saved_index)
        .cloned()
        .collect();

    if new_entries.is_empty() {
        debug!(path = %path.display(), checkpoint = log.last_saved_index, "no new messages to save");
        return Ok(SaveOutcome::UpToDate { checkpoint: log.last_saved_index });
    }

    let appended = new_entries.len();
    log.conversation_history.extend(new_entries);
    log.last_saved_index = log
        .conversation_history
        .iter()
        .map(|e| e.id)
        .max()
        .unwrap_or(0);

    let data = serde_json::to_string_pretty(&log)
        .map_err(|e| AppError::Storage(format!("serialise chat log: {e}")))?;
    fs::write(path, data)
        .map_err(|e| AppError::Storage(format!("cannot write {}: {e}", path.display())))?;

    info!(path = %path.display(), appended, checkpoint = log.last_saved_index, "chat history saved");
    Ok(SaveOutcome::Appended { checkpoint: log.last_saved_index, appended })
}
