//! Tool configuration management.
//!
//! Configuration comes from CLI arguments, environment variables or defaults.
//! With no arguments at all the tool reads `PVP13-01.QSD` from the working
//! directory and writes it back in place.
//!
//! # Example
//!
//! ```no_run
//! use qsd_tool::ToolConfig;
//!
//! let config = ToolConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading {}", config.input.display());
//! println!("Writing {}", config.output_path().display());
//! ```

use crate::error::ConfigError;
use clap::Parser;
use std::path::{Path, PathBuf};

/// File processed when no input is given
pub const DEFAULT_INPUT: &str = "PVP13-01.QSD";

/// Tool configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "qsd-tool",
    about = "Load a QSD quest script file, report its structure and write it back",
    version
)]
pub struct ToolConfig {
    /// QSD file to read
    #[arg(long, env = "QSD_TOOL_INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the re-encoded file (defaults to the input path)
    #[arg(long, env = "QSD_TOOL_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print the structure report and skip writing
    #[arg(long, env = "QSD_TOOL_REPORT_ONLY")]
    pub report_only: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            report_only: false,
        }
    }
}

impl ToolConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Path the save phase writes to.
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }

    /// Whether the save phase replaces the input file.
    pub fn overwrites_input(&self) -> bool {
        !self.report_only && self.output_path() == self.input
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingInput` if the input file doesn't exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input.exists() {
            return Err(ConfigError::MissingInput(self.input.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_file() {
        let config = ToolConfig::try_parse_from(["qsd-tool"]).unwrap();
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.output, None);
        assert!(!config.report_only);
        assert_eq!(config.output_path(), Path::new(DEFAULT_INPUT));
        assert!(config.overwrites_input());
    }

    #[test]
    fn test_explicit_paths() {
        let config =
            ToolConfig::try_parse_from(["qsd-tool", "--input", "in.qsd", "--output", "out.qsd"])
                .unwrap();
        assert_eq!(config.input, PathBuf::from("in.qsd"));
        assert_eq!(config.output_path(), Path::new("out.qsd"));
        assert!(!config.overwrites_input());
    }

    #[test]
    fn test_report_only_never_overwrites() {
        let config = ToolConfig::try_parse_from(["qsd-tool", "--report-only"]).unwrap();
        assert!(config.report_only);
        assert!(!config.overwrites_input());
    }

    #[test]
    fn test_validate_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            input: dir.path().join("missing.qsd"),
            ..ToolConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingInput(_))
        ));

        let present = dir.path().join("present.qsd");
        std::fs::write(&present, b"").unwrap();
        let config = ToolConfig {
            input: present,
            ..ToolConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
