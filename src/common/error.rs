//! Error types for the e2e report tool
//!
//! Messages name the offending file or identifier so a CI log is enough to
//! tell what went wrong.

use std::path::Path;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the e2e report tool
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read test case configuration '{path}': {error}")]
    ConfigRead { path: String, error: String },

    #[error("Invalid test case configuration '{path}': {error}")]
    ConfigParse { path: String, error: String },

    #[error("Invalid settings file: {0}")]
    SettingsParse(String),

    // === File System Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Report Errors ===
    #[error("Malformed report line {line}: '{content}'")]
    ReportFormat { line: usize, content: String },

    #[error("Failed to update report entry '{identifier}': {reason}")]
    ReportUpdate { identifier: String, reason: String },

    // === Run Errors ===
    #[error("Setup test case '{identifier}' not found in execution log. Test cases may not have executed")]
    SetupFailed { identifier: String },
}

impl Error {
    /// Create a file read error for a path
    pub fn file_read(path: &Path, error: impl ToString) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a file write error for a path
    pub fn file_write(path: &Path, error: impl ToString) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a report update error for an identifier
    pub fn report_update(identifier: &str, reason: impl ToString) -> Self {
        Self::ReportUpdate {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        }
    }
}
