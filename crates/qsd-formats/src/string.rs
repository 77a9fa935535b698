//! Length-prefixed strings
//!
//! Every name in a QSD file is stored as a 16-bit little-endian byte count
//! followed by that many bytes. Writers always include a terminating NUL in
//! the counted bytes; readers cut the string at the first NUL and drop the rest.
//!
//! The bytes are in the game's legacy Korean code page (EUC-KR / windows-949).
//! [`QsdString`] keeps them untouched so that a loaded file can be written back
//! exactly. [`QsdString::to_display`] is the only place they are converted.

use crate::error::{QsdError, Result};
use crate::fixed::read_fixed;
use binrw::BinWrite;
use encoding_rs::EUC_KR;
use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Seek, Write};

/// Raw legacy-encoded string as stored in a QSD file
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QsdString(Vec<u8>);

impl QsdString {
    /// Create an empty string
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Encode Unicode text into the legacy code page
    ///
    /// Characters EUC-KR cannot represent are written as HTML numeric
    /// character references (`&#NNNN;`).
    pub fn from_display(text: &str) -> Self {
        let (bytes, _, _) = EUC_KR.encode(text);
        Self(bytes.into_owned())
    }

    /// Decode the stored bytes for display
    ///
    /// Malformed sequences are replaced with U+FFFD. The result is never fed
    /// back into the codec.
    pub fn to_display(&self) -> Cow<'_, str> {
        EUC_KR.decode_without_bom_handling(&self.0).0
    }

    /// Raw stored bytes, without the terminating NUL
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the string and return the raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes, without the terminating NUL
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string holds no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Size on disk: length prefix, bytes and terminating NUL
    pub fn encoded_len(&self) -> usize {
        2 + self.0.len() + 1
    }

    /// Read a length-prefixed string
    ///
    /// Reads the 16-bit length `L`, then exactly `L` bytes, and keeps the
    /// bytes before the first NUL. A stream holding fewer than `L` bytes is a
    /// [`QsdError::TruncatedString`], never an empty string.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let length: u16 = read_fixed(reader, 2)?;

        let mut raw = Vec::with_capacity(usize::from(length));
        reader
            .by_ref()
            .take(u64::from(length))
            .read_to_end(&mut raw)?;
        if raw.len() < usize::from(length) {
            return Err(QsdError::TruncatedString {
                expected: length,
                available: raw.len(),
            });
        }

        if let Some(nul) = raw.iter().position(|&b| b == 0) {
            raw.truncate(nul);
        }

        Ok(Self(raw))
    }

    /// Write a length-prefixed string
    ///
    /// The prefix is always recomputed as `len + 1` and a single NUL follows
    /// the bytes, whatever padding the string was originally read with.
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        let length =
            u16::try_from(self.0.len() + 1).map_err(|_| QsdError::StringTooLong(self.0.len()))?;
        length.write_le(writer)?;
        writer.write_all(&self.0)?;
        writer.write_all(&[0])?;
        Ok(())
    }
}

impl fmt::Display for QsdString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

impl From<&str> for QsdString {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<&[u8]> for QsdString {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Vec<u8>> for QsdString {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}
