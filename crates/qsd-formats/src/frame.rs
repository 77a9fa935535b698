//! Condition and action frames
//!
//! A frame is a self-describing run of bytes: a 4-byte total length (which
//! counts the 8-byte header itself), a 4-byte command code and `length - 8`
//! bytes of payload. Payloads are opaque and kept bit for bit.

use crate::error::{QsdError, Result};
use crate::fixed::read_fixed;
use binrw::{BinRead, BinWrite};
use std::fmt;
use std::io::{Read, Seek, Write};

/// Size of the `length` + `command` header that starts every frame
pub const FRAME_HEADER_SIZE: u32 = 8;

/// Bits of an action command that survive decoding
///
/// The upper half of the on-disk field carries values whose meaning is
/// unknown; they are dropped when an action is read.
pub const ACTION_COMMAND_MASK: u32 = 0x0000_FFFF;

/// Fixed 8-byte frame header
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct FrameHeader {
    /// Total frame length including this header
    pub length: u32,
    /// Command code
    pub command: u32,
}

/// Length field for a payload of `payload_len` bytes
pub(crate) fn frame_length(payload_len: usize) -> Result<u32> {
    u32::try_from(payload_len)
        .ok()
        .and_then(|len| len.checked_add(FRAME_HEADER_SIZE))
        .ok_or(QsdError::PayloadTooLarge(payload_len))
}

/// Which list of a record a frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Entry of a record's condition list
    Condition,
    /// Entry of a record's action list
    Action,
}

impl FrameKind {
    /// Mask applied to the raw command field on read
    pub const fn command_mask(self) -> u32 {
        match self {
            Self::Condition => u32::MAX,
            Self::Action => ACTION_COMMAND_MASK,
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition => f.write_str("condition"),
            Self::Action => f.write_str("action"),
        }
    }
}

/// One condition or action entry
///
/// `Default` yields the all-zero placeholder that stands in for an entry
/// which could not be decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Total frame length as stored, header included
    pub length: u32,
    /// Command code
    pub command: u32,
    /// Opaque payload
    pub data: Vec<u8>,
}

/// Entry of a record's condition list
pub type Condition = Frame;

/// Entry of a record's action list
pub type Action = Frame;

impl Frame {
    /// Create a frame whose length matches its payload
    ///
    /// # Errors
    /// Returns [`QsdError::PayloadTooLarge`] when `8 + data.len()` does not
    /// fit the 32-bit length field.
    pub fn new(command: u32, data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            length: frame_length(data.len())?,
            command,
            data,
        })
    }

    /// Payload size in bytes
    pub fn payload_len(&self) -> usize {
        self.data.len()
    }

    /// Bytes written for this frame
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_SIZE as usize + self.data.len()
    }

    /// Whether the stored length agrees with the payload
    pub fn is_consistent(&self) -> bool {
        self.length
            .checked_sub(FRAME_HEADER_SIZE)
            .is_some_and(|payload| payload as usize == self.data.len())
    }

    /// Decode a single frame
    ///
    /// Reads the header, masks the command for actions and then reads exactly
    /// `length - 8` payload bytes. The stream is left wherever the failure
    /// happened; callers decide whether to carry on.
    pub fn read_entry<R: Read + Seek>(reader: &mut R, kind: FrameKind) -> Result<Self> {
        let header: FrameHeader = read_fixed(reader, FRAME_HEADER_SIZE as usize)?;

        let payload = header
            .length
            .checked_sub(FRAME_HEADER_SIZE)
            .ok_or(QsdError::InvalidFrameLength(header.length))?;

        // Bounded by what the stream actually holds, not by the length field
        let mut data = Vec::new();
        reader
            .by_ref()
            .take(u64::from(payload))
            .read_to_end(&mut data)?;
        if data.len() < payload as usize {
            return Err(QsdError::TruncatedFrame {
                expected: payload as usize,
                available: data.len(),
            });
        }

        Ok(Self {
            length: header.length,
            command: header.command & kind.command_mask(),
            data,
        })
    }

    /// Encode the frame with its fields taken verbatim
    ///
    /// A length that disagrees with the payload is written as is.
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        FrameHeader {
            length: self.length,
            command: self.command,
        }
        .write(writer)?;
        writer.write_all(&self.data)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use binrw::io::Cursor;

    #[test]
    fn test_frame_new() {
        let frame = Frame::new(7, vec![0x2A]).unwrap();
        assert_eq!(frame.length, 9);
        assert_eq!(frame.command, 7);
        assert_eq!(frame.payload_len(), 1);
        assert_eq!(frame.encoded_len(), 9);
        assert!(frame.is_consistent());
    }

    #[test]
    fn test_frame_length_overflow_is_rejected() {
        let largest = u32::MAX as usize - 8;
        assert_eq!(frame_length(largest).unwrap(), u32::MAX);
        assert!(matches!(
            frame_length(largest + 1),
            Err(QsdError::PayloadTooLarge(len)) if len == largest + 1
        ));
    }

    #[test]
    fn test_default_is_empty_placeholder() {
        let frame = Frame::default();
        assert_eq!(frame.length, 0);
        assert_eq!(frame.command, 0);
        assert!(frame.data.is_empty());
        assert!(!frame.is_consistent());
    }

    #[test]
    fn test_read_condition() {
        let data = [
            11u8, 0, 0, 0, // length
            0x34, 0x12, 0xCD, 0xAB, // command
            1, 2, 3, // payload
            0xFF, // next entry
        ];
        let mut cursor = Cursor::new(&data[..]);
        let frame =
            Frame::read_entry(&mut cursor, FrameKind::Condition).expect("Operation should succeed");

        assert_eq!(frame.length, 11);
        assert_eq!(frame.command, 0xABCD_1234);
        assert_eq!(frame.data, vec![1, 2, 3]);
        assert_eq!(cursor.position(), 11);
    }

    #[test]
    fn test_read_action_masks_command() {
        let data = [
            8u8, 0, 0, 0, // length
            0x34, 0x12, 0xCD, 0xAB, // command 0xABCD1234
        ];
        let frame = Frame::read_entry(&mut Cursor::new(&data[..]), FrameKind::Action)
            .expect("Operation should succeed");

        assert_eq!(frame.command, 0x1234);
        assert!(frame.data.is_empty());
    }

    #[test]
    fn test_length_below_header_is_rejected() {
        let data = [7u8, 0, 0, 0, 1, 0, 0, 0];
        let result = Frame::read_entry(&mut Cursor::new(&data[..]), FrameKind::Condition);
        assert!(matches!(result, Err(QsdError::InvalidFrameLength(7))));
    }

    #[test]
    fn test_truncated_payload_is_rejected() {
        let data = [20u8, 0, 0, 0, 1, 0, 0, 0, 9, 9];
        let result = Frame::read_entry(&mut Cursor::new(&data[..]), FrameKind::Action);
        assert!(matches!(
            result,
            Err(QsdError::TruncatedFrame {
                expected: 12,
                available: 2
            })
        ));
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        let data = [9u8, 0, 0];
        let mut cursor = Cursor::new(&data[..]);
        let result = Frame::read_entry(&mut cursor, FrameKind::Condition);
        assert!(matches!(result, Err(QsdError::BinRw(_))));
        // No rewind on failure
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_huge_length_does_not_preallocate() {
        let data = [0xFFu8, 0xFF, 0xFF, 0xFF, 1, 0, 0, 0, 5];
        let result = Frame::read_entry(&mut Cursor::new(&data[..]), FrameKind::Condition);
        assert!(matches!(
            result,
            Err(QsdError::TruncatedFrame { available: 1, .. })
        ));
    }

    #[test]
    fn test_write_is_verbatim() {
        // Inconsistent on purpose: the writer does not fix it up
        let frame = Frame {
            length: 100,
            command: 0xABCD_0001,
            data: vec![1, 2],
        };
        let mut buffer = Vec::new();
        frame
            .write(&mut Cursor::new(&mut buffer))
            .expect("Operation should succeed");

        assert_eq!(buffer, [100, 0, 0, 0, 0x01, 0x00, 0xCD, 0xAB, 1, 2]);
    }

    #[test]
    fn test_frame_kind_display() {
        assert_eq!(FrameKind::Condition.to_string(), "condition");
        assert_eq!(FrameKind::Action.to_string(), "action");
        assert_eq!(FrameKind::Condition.command_mask(), u32::MAX);
        assert_eq!(FrameKind::Action.command_mask(), ACTION_COMMAND_MASK);
    }
}
