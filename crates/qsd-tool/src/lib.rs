//! QSD quest script tool.
//!
//! Loads a QSD file, prints its structure for the operator and writes it
//! back out through the codec in `qsd-formats`.
//!
//! # Architecture
//!
//! - `config`: CLI / environment configuration and validation
//! - `report`: structure report with legacy names converted for display
//! - `pipeline`: load, report and save phases
//! - `error`: configuration and run errors
//!
//! # Example
//!
//! ```no_run
//! use qsd_tool::{ToolConfig, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = ToolConfig::from_args();
//!     config.validate()?;
//!
//!     let summary = run(&config)?;
//!     println!("{} bytes read", summary.bytes_read);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::{DEFAULT_INPUT, ToolConfig};
pub use error::{ConfigError, ToolError};
pub use pipeline::{RunSummary, run, run_with_report};
pub use report::{render_report, write_report};
