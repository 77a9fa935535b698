//! QSD tool binary entry point.
//!
//! Thin wrapper around the qsd-tool library that:
//! 1. Initializes logging (stderr, `RUST_LOG`, default `info`)
//! 2. Parses configuration
//! 3. Runs the load, report and save phases

use anyhow::Result;
use qsd_tool::{ToolConfig, run};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ToolConfig::from_args();

    tracing::info!(
        "Configuration loaded: input={}, output={}, report_only={}",
        config.input.display(),
        config.output_path().display(),
        config.report_only
    );

    config.validate()?;

    let summary = run(&config)?;
    tracing::debug!(?summary, "Run finished");

    Ok(())
}
