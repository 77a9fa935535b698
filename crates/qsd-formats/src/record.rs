//! Rule records
//!
//! A record is one rule: a flag, a name, a list of conditions and a list of
//! actions. Damaged condition or action frames are recovered here; anything
//! wrong with the record header or name is fatal for the whole decode.

use crate::error::{Result, checked_count};
use crate::fixed::read_fixed;
use crate::frame::{Action, Condition, Frame, FrameKind};
use crate::string::QsdString;
use binrw::{BinRead, BinWrite};
use std::io::{Read, Seek, Write};
use tracing::{debug, warn};

/// Upper bound on up-front allocation for declared entry counts
const MAX_PREALLOCATED_ENTRIES: u32 = 1024;

/// On-disk record prefix
///
/// The flag is a single byte; any non-zero value reads as `true` and is
/// written back as `1`.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct RecordHeader {
    /// Whether evaluation continues with the next record
    #[br(map = |flag: u8| flag != 0)]
    #[bw(map = |flag: &bool| u8::from(*flag))]
    pub check_next: bool,
    /// Number of condition frames that follow the name
    pub condition_count: u32,
    /// Number of action frames that follow the conditions
    pub action_count: u32,
}

impl RecordHeader {
    /// Encoded size in bytes
    pub const SIZE: usize = 9;
}

/// A single rule entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Whether evaluation continues with the next record
    pub check_next: bool,
    /// Record name in the legacy code page
    pub name: QsdString,
    /// Conditions, in file order
    pub conditions: Vec<Condition>,
    /// Actions, in file order
    pub actions: Vec<Action>,
}

impl Record {
    /// Create an empty record
    pub fn new(name: impl Into<QsdString>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the continue flag
    #[must_use]
    pub fn with_check_next(mut self, check_next: bool) -> Self {
        self.check_next = check_next;
        self
    }

    /// Append a condition
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append an action
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Number of conditions, as written to disk
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Number of actions, as written to disk
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Bytes written for this record
    pub fn encoded_len(&self) -> usize {
        RecordHeader::SIZE + self.name.encoded_len()
            + self.conditions.iter().map(Frame::encoded_len).sum::<usize>()
            + self.actions.iter().map(Frame::encoded_len).sum::<usize>()
    }

    /// Decode a record and all of its frames
    ///
    /// Always yields exactly the declared number of conditions and actions.
    /// A frame that fails to decode is logged and replaced by
    /// [`Frame::default`].
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let header: RecordHeader = read_fixed(reader, RecordHeader::SIZE)?;
        let name = QsdString::read(reader)?;

        debug!(
            name = %name,
            check_next = header.check_next,
            conditions = header.condition_count,
            actions = header.action_count,
            "Decoding record"
        );

        let conditions = read_frames(reader, FrameKind::Condition, header.condition_count);
        let actions = read_frames(reader, FrameKind::Action, header.action_count);

        Ok(Self {
            check_next: header.check_next,
            name,
            conditions,
            actions,
        })
    }

    /// Encode the record, deriving both counts from the lists
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        RecordHeader {
            check_next: self.check_next,
            condition_count: checked_count("conditions", self.conditions.len())?,
            action_count: checked_count("actions", self.actions.len())?,
        }
        .write(writer)?;
        self.name.write(writer)?;

        for condition in &self.conditions {
            condition.write(writer)?;
        }
        for action in &self.actions {
            action.write(writer)?;
        }

        Ok(())
    }
}

fn read_frames<R: Read + Seek>(reader: &mut R, kind: FrameKind, count: u32) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(count.min(MAX_PREALLOCATED_ENTRIES) as usize);

    for index in 0..count {
        match Frame::read_entry(reader, kind) {
            Ok(frame) => {
                debug!(
                    %kind,
                    index,
                    command = frame.command,
                    length = frame.length,
                    "Decoded frame"
                );
                frames.push(frame);
            }
            Err(error) => {
                warn!(%kind, index, %error, "Failed to decode frame, substituting empty entry");
                frames.push(Frame::default());
            }
        }
    }

    frames
}
