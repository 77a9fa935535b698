//! Error types for QSD parsing and building

use crate::frame::FrameKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing or building QSD files
#[derive(Error, Debug)]
pub enum QsdError {
    /// Source file could not be opened or read
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Destination file could not be created or written
    #[error("Failed to write {path}: {source}")]
    Create {
        /// Path that was being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Length-prefixed string runs past the end of the stream
    #[error("Truncated string: length prefix says {expected} bytes, only {available} available")]
    TruncatedString {
        /// Declared byte length
        expected: u16,
        /// Bytes actually present
        available: usize,
    },

    /// String too long for its 16-bit length prefix
    #[error("String of {0} bytes does not fit a 16-bit length prefix")]
    StringTooLong(usize),

    /// Payload too large for a 32-bit frame length
    #[error("Payload of {0} bytes does not fit a 32-bit frame length")]
    PayloadTooLarge(usize),

    /// Frame length smaller than its own 8-byte header
    #[error("Invalid frame length {0}: must be at least 8")]
    InvalidFrameLength(u32),

    /// Frame payload runs past the end of the stream
    #[error("Truncated frame: expected {expected} payload bytes, only {available} available")]
    TruncatedFrame {
        /// Declared payload size
        expected: usize,
        /// Bytes actually present
        available: usize,
    },

    /// Sequence too long for its 32-bit count field
    #[error("Too many {kind} for a 32-bit count: {count}")]
    CountOverflow {
        /// What was being counted
        kind: &'static str,
        /// Actual sequence length
        count: usize,
    },

    /// Frame whose length field disagrees with its payload
    #[error(
        "Inconsistent {kind} {index} in block {block}, record {record}: length {length}, payload {payload} bytes"
    )]
    InconsistentFrame {
        /// Block index
        block: usize,
        /// Record index within the block
        record: usize,
        /// Condition or action
        kind: FrameKind,
        /// Entry index within the record
        index: usize,
        /// Stored length field
        length: u32,
        /// Actual payload size
        payload: usize,
    },

    /// Rebuilt bytes differ from the parsed input
    #[error("Round-trip verification failed: {original} bytes in, {rebuilt} bytes out")]
    RoundTripMismatch {
        /// Size of the original data
        original: usize,
        /// Size of the rebuilt data
        rebuilt: usize,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRW` parsing/writing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Type alias for QSD operation results
pub type Result<T> = std::result::Result<T, QsdError>;

pub(crate) fn checked_count(kind: &'static str, count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| QsdError::CountOverflow { kind, count })
}
