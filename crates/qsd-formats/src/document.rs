//! QSD document: file header, name and blocks

use crate::QsdFormat;
use crate::block::Block;
use crate::error::{QsdError, Result, checked_count};
use crate::fixed::read_fixed;
use crate::frame::{Frame, FrameKind};
use crate::record::Record;
use crate::string::QsdString;
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use std::io::{Read, Seek, Write};
use std::path::Path;
use tracing::{debug, debug_span, info};

/// Fixed 8-byte file header
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct QsdHeader {
    /// Opaque format tag
    pub file_version: u32,
    /// Number of blocks that follow the document name
    pub block_count: u32,
}

impl QsdHeader {
    /// Encoded size in bytes
    pub const SIZE: usize = 8;

    /// Create a header
    pub const fn new(file_version: u32, block_count: u32) -> Self {
        Self {
            file_version,
            block_count,
        }
    }
}

/// A whole QSD file
///
/// Decoding trusts the stored block count; encoding writes `blocks.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Opaque format tag, kept as read
    pub file_version: u32,
    /// Document name in the legacy code page
    pub name: QsdString,
    /// Blocks, in file order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document
    pub fn new(file_version: u32, name: impl Into<QsdString>) -> Self {
        Self {
            file_version,
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a block
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Number of blocks, as written to disk
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Header that [`Document::build`] writes
    pub fn header(&self) -> Result<QsdHeader> {
        Ok(QsdHeader::new(
            self.file_version,
            checked_count("blocks", self.blocks.len())?,
        ))
    }

    /// Bytes written for this document
    pub fn encoded_len(&self) -> usize {
        QsdHeader::SIZE
            + self.name.encoded_len()
            + self.blocks.iter().map(Block::encoded_len).sum::<usize>()
    }

    /// Parse a document from binary data
    ///
    /// Bytes past the last declared block are ignored.
    ///
    /// # Errors
    /// Returns error if the header, a block or record prefix, or any name is
    /// truncated. Damaged condition and action frames are not errors; they
    /// come back as [`Frame::default`] placeholders.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let document = Self::read_from(&mut cursor)?;

        let unread = data.len() as u64 - cursor.position();
        if unread > 0 {
            debug!(unread, "Trailing bytes left after last block");
        }

        Ok(document)
    }

    /// Decode a document from a stream, strictly front to back
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let header: QsdHeader = read_fixed(reader, QsdHeader::SIZE)?;
        let name = QsdString::read(reader)?;

        debug!(
            file_version = header.file_version,
            blocks = header.block_count,
            name = %name,
            "Decoding document"
        );

        let mut blocks = Vec::new();
        for index in 0..header.block_count {
            let _span = debug_span!("block", index).entered();
            blocks.push(Block::read(reader)?);
        }

        Ok(Self {
            file_version: header.file_version,
            name,
            blocks,
        })
    }

    /// Build the document to binary data
    ///
    /// Counts and string length prefixes are derived from the current
    /// contents. Frames are written verbatim and are not checked.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut Cursor::new(&mut buffer))?;
        Ok(buffer)
    }

    /// Encode the document into a stream
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        self.header()?.write(writer)?;
        self.name.write(writer)?;
        for block in &self.blocks {
            block.write(writer)?;
        }
        Ok(())
    }

    /// Read and parse a file
    ///
    /// The file is read completely and closed before parsing starts.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| QsdError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded {} ({} bytes)", path.display(), data.len());
        Self::parse(&data)
    }

    /// Build the document and write it to a file, replacing any existing one
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let data = self.build()?;
        std::fs::write(path, &data).map_err(|source| QsdError::Create {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved {} ({} bytes)", path.display(), data.len());
        Ok(data.len())
    }

    /// Verify round-trip compatibility
    pub fn verify_round_trip(data: &[u8]) -> Result<()> {
        <Self as QsdFormat>::verify_round_trip(data)
    }

    /// Check that every frame's length agrees with its payload
    ///
    /// The encoder never runs this; it is for callers that edited payloads.
    pub fn validate(&self) -> Result<()> {
        for (block_index, block) in self.blocks.iter().enumerate() {
            for (record_index, record) in block.records.iter().enumerate() {
                check_frames(block_index, record_index, FrameKind::Condition, &record.conditions)?;
                check_frames(block_index, record_index, FrameKind::Action, &record.actions)?;
            }
        }
        Ok(())
    }

    /// Iterate over every record together with its block and record index
    pub fn records(&self) -> impl Iterator<Item = (usize, usize, &Record)> {
        self.blocks.iter().enumerate().flat_map(|(block_index, block)| {
            block
                .records
                .iter()
                .enumerate()
                .map(move |(record_index, record)| (block_index, record_index, record))
        })
    }

    /// Summary counts
    pub fn stats(&self) -> QsdStats {
        let mut stats = QsdStats {
            blocks: self.blocks.len(),
            ..QsdStats::default()
        };

        for (_, _, record) in self.records() {
            stats.records += 1;
            stats.conditions += record.conditions.len();
            stats.actions += record.actions.len();
            stats.payload_bytes += record
                .conditions
                .iter()
                .chain(&record.actions)
                .map(Frame::payload_len)
                .sum::<usize>();
        }

        stats
    }
}

fn check_frames(block: usize, record: usize, kind: FrameKind, frames: &[Frame]) -> Result<()> {
    match frames.iter().position(|frame| !frame.is_consistent()) {
        Some(index) => Err(QsdError::InconsistentFrame {
            block,
            record,
            kind,
            index,
            length: frames[index].length,
            payload: frames[index].payload_len(),
        }),
        None => Ok(()),
    }
}

/// Statistics about a QSD document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QsdStats {
    /// Number of blocks
    pub blocks: usize,
    /// Number of records across all blocks
    pub records: usize,
    /// Number of conditions across all records
    pub conditions: usize,
    /// Number of actions across all records
    pub actions: usize,
    /// Total opaque payload bytes of all frames
    pub payload_bytes: usize,
}

impl QsdFormat for Document {
    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    fn build(&self) -> Result<Vec<u8>> {
        self.build()
    }
}
