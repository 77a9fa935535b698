//! Named groups of records

use crate::error::{Result, checked_count};
use crate::fixed::read_fixed;
use crate::record::Record;
use crate::string::QsdString;
use binrw::BinWrite;
use std::io::{Read, Seek, Write};
use tracing::{debug, debug_span};

/// Named grouping of records
///
/// The record count stored in front of a block drives decoding and is then
/// dropped; it is recomputed from `records` on every write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Block name in the legacy code page
    pub name: QsdString,
    /// Records, in file order
    pub records: Vec<Record>,
}

impl Block {
    /// Create an empty block
    pub fn new(name: impl Into<QsdString>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Append a record
    #[must_use]
    pub fn with_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    /// Number of records, as written to disk
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Bytes written for this block
    pub fn encoded_len(&self) -> usize {
        4 + self.name.encoded_len() + self.records.iter().map(Record::encoded_len).sum::<usize>()
    }

    /// Decode a block and its records
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let record_count: u32 = read_fixed(reader, 4)?;
        let name = QsdString::read(reader)?;

        debug!(name = %name, records = record_count, "Decoding block");

        let mut records = Vec::new();
        for index in 0..record_count {
            let _span = debug_span!("record", index).entered();
            records.push(Record::read(reader)?);
        }

        Ok(Self { name, records })
    }

    /// Encode the block with a freshly derived record count
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        checked_count("records", self.records.len())?.write_le(writer)?;
        self.name.write(writer)?;
        for record in &self.records {
            record.write(writer)?;
        }
        Ok(())
    }
}
