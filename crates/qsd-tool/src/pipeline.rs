//! Load, report and save phases.

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::report::write_report;
use qsd_formats::{Document, QsdError};
use std::io::Write;
use tracing::{info, warn};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Size of the input file
    pub bytes_read: usize,
    /// Size of the written file, `None` when saving was skipped
    pub bytes_written: Option<usize>,
    /// Whether the written bytes equal the input bytes
    pub byte_identical: Option<bool>,
}

/// Run all phases, printing the report to stdout.
pub fn run(config: &ToolConfig) -> Result<RunSummary, ToolError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_report(config, &mut out)
}

/// Run all phases, writing the report to `report`.
///
/// The input is read and closed before the output is opened, so the input
/// and output may be the same file. A load failure stops the run before
/// anything is written.
pub fn run_with_report<W: Write>(
    config: &ToolConfig,
    report: &mut W,
) -> Result<RunSummary, ToolError> {
    // Load phase
    let original = std::fs::read(&config.input).map_err(|source| QsdError::Open {
        path: config.input.clone(),
        source,
    })?;
    let document = Document::parse(&original)?;

    let stats = document.stats();
    info!(
        file = %config.input.display(),
        blocks = stats.blocks,
        records = stats.records,
        conditions = stats.conditions,
        actions = stats.actions,
        "Loaded QSD file"
    );

    if let Err(error) = document.validate() {
        warn!(%error, "Document holds placeholder or inconsistent frames");
    }

    // Report phase
    write_report(&document, report).map_err(ToolError::Report)?;
    report.flush().map_err(ToolError::Report)?;

    if config.report_only {
        info!("Report only, skipping save");
        return Ok(RunSummary {
            bytes_read: original.len(),
            bytes_written: None,
            byte_identical: None,
        });
    }

    // Save phase
    let output = config.output_path();
    let rebuilt = document.build()?;
    std::fs::write(output, &rebuilt).map_err(|source| QsdError::Create {
        path: output.to_path_buf(),
        source,
    })?;
    let byte_identical = rebuilt == original;

    if byte_identical {
        info!(file = %output.display(), "Rewrite is byte-identical to the input");
    } else {
        info!(
            file = %output.display(),
            before = original.len(),
            after = rebuilt.len(),
            "Rewrite differs from the input"
        );
    }

    Ok(RunSummary {
        bytes_read: original.len(),
        bytes_written: Some(rebuilt.len()),
        byte_identical: Some(byte_identical),
    })
}
