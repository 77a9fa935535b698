//! Parser and builder for QSD quest script data files
//!
#![allow(clippy::cast_possible_truncation)] // Counts and lengths are bounded by the format
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::derive_partial_eq_without_eq)] // Binary format structs
//! QSD files hold the rule tables of a game's quest scripting subsystem.
//! This crate provides a symmetric (parser and builder) implementation of the
//! on-disk layout:
//!
//! ```text
//! Document   := u32 file_version, u32 block_count, PStr name, Block[block_count]
//! Block      := u32 record_count, PStr name, Record[record_count]
//! Record     := u8 check_next, u32 condition_count, u32 action_count, PStr name,
//!               Condition[condition_count], Action[action_count]
//! Condition  := u32 length, u32 command, u8[length-8] data
//! Action     := u32 length, u32 command, u8[length-8] data
//! PStr       := u16 length, u8[length] bytes
//! ```
//!
//! All integers are little-endian. There is no magic number and no checksum.
//!
//! # Design Principles
//!
//! - **Opaque payloads**: condition and action bodies are kept as raw bytes
//!   keyed by their command code and are never interpreted
//! - **Derived counts**: every count and string length prefix is recomputed
//!   from the in-memory value when writing
//! - **Entry-local recovery**: a damaged condition or action frame is replaced
//!   with an empty placeholder and decoding carries on
//! - **Raw strings**: names stay in their legacy code page; conversion to
//!   Unicode happens only for display
//!
//! # Example
//!
//! ```rust,no_run
//! use qsd_formats::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = Document::load("PVP13-01.QSD")?;
//!
//! println!("File version: {}", document.file_version);
//! for block in &document.blocks {
//!     println!("{}: {} records", block.name.to_display(), block.record_count());
//! }
//!
//! document.save("PVP13-01.QSD")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod block;
pub mod document;
pub mod error;
mod fixed;
pub mod frame;
pub mod record;
pub mod string;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use block::Block;
pub use document::{Document, QsdHeader, QsdStats};
pub use error::{QsdError, Result};
pub use frame::{
    ACTION_COMMAND_MASK, Action, Condition, FRAME_HEADER_SIZE, Frame, FrameHeader, FrameKind,
};
pub use record::{Record, RecordHeader};
pub use string::QsdString;

/// Common format trait for symmetric QSD structures
pub trait QsdFormat: Sized {
    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>>;

    /// Verify that parsing and rebuilding reproduces the input byte for byte
    fn verify_round_trip(data: &[u8]) -> Result<()> {
        let parsed = Self::parse(data)?;
        let rebuilt = parsed.build()?;
        if data != rebuilt.as_slice() {
            return Err(QsdError::RoundTripMismatch {
                original: data.len(),
                rebuilt: rebuilt.len(),
            });
        }
        Ok(())
    }
}
