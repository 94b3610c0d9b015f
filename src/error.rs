//! Application-wide error types.
//!
//! Nothing here is fatal to a running session: every variant degrades to a
//! user-visible notice and a safe fallback state at the screen layer.

use thiserror::Error;

use crate::llm::ProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    /// Transport or provider failure from the generation collaborator.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Generated text that was supposed to be a character sheet but does not
    /// parse as JSON. Carries the raw parse error for the user.
    #[error("character sheet is not valid JSON: {0}")]
    SheetParse(String),

    /// Parsed sheet JSON missing a required field or violating a bound.
    #[error("invalid character sheet: {0}")]
    SheetInvalid(String),

    #[error("party error: {0}")]
    Party(String),

    /// Read/write/parse failure on a character, save-bundle, or chat-log file.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn sheet_errors_display() {
        let e = AppError::SheetParse("expected value at line 1".into());
        assert!(e.to_string().contains("not valid JSON"));
        let e = AppError::SheetInvalid("missing required field: name".into());
        assert!(e.to_string().contains("missing required field"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }
}
