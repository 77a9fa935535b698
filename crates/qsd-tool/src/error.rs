//! Error types for the QSD tool.

use qsd_formats::QsdError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input file does not exist
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),
}

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Load or save phase failed
    #[error("QSD error: {0}")]
    Codec(#[from] QsdError),

    /// Structure report could not be written
    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),
}
