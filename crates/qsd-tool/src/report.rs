//! Human-readable structure report.
//!
//! Names are stored in the legacy code page and converted for display here.
//! The conversion result is only ever printed.

use qsd_formats::Document;
use std::io::{self, Write};

/// Write the structure of a loaded document.
///
/// ```text
/// QSD:
/// File Version: 1
/// Block Count: 1
/// QSD Name: Q
///
/// Block 0: B
///   Record 0: R
///     Conditions: 0
///     Actions: 1
/// ```
pub fn write_report<W: Write>(document: &Document, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "QSD:")?;
    writeln!(writer, "File Version: {}", document.file_version)?;
    writeln!(writer, "Block Count: {}", document.block_count())?;
    writeln!(writer, "QSD Name: {}", document.name.to_display())?;

    for (b, block) in document.blocks.iter().enumerate() {
        writeln!(writer)?;
        writeln!(writer, "Block {b}: {}", block.name.to_display())?;

        for (r, record) in block.records.iter().enumerate() {
            writeln!(writer, "  Record {r}: {}", record.name.to_display())?;
            writeln!(writer, "    Conditions: {}", record.condition_count())?;
            writeln!(writer, "    Actions: {}", record.action_count())?;
        }
    }

    Ok(())
}

/// Render the report into a string.
pub fn render_report(document: &Document) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_report(document, &mut buffer)?;
    String::from_utf8(buffer).map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
}
