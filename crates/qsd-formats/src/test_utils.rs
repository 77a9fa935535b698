//! Test utilities for QSD round-trip testing
//!
//! Shared fixtures and round-trip helpers used across the module tests.

use crate::QsdFormat;
use crate::block::Block;
use crate::document::Document;
use crate::frame::Frame;
use crate::record::Record;
use crate::string::QsdString;
use std::fmt::Debug;

/// Test round-trip serialization for a format instance
///
/// Builds the value, parses the bytes back and compares.
pub fn test_round_trip<T>(original: &T) -> Result<(), Box<dyn std::error::Error>>
where
    T: QsdFormat + PartialEq + Debug,
{
    let data = original.build()?;
    let parsed = T::parse(&data)?;

    if original != &parsed {
        return Err(format!(
            "Round-trip verification failed:\nOriginal: {:?}\nParsed: {:?}",
            original, parsed
        )
        .into());
    }

    Ok(())
}

/// Test round-trip with existing binary data
///
/// Parses, rebuilds and checks the rebuilt bytes are identical.
pub fn test_round_trip_with_data<T>(data: &[u8]) -> Result<(), Box<dyn std::error::Error>>
where
    T: QsdFormat + PartialEq + Debug,
{
    let parsed = T::parse(data)?;
    let rebuilt = parsed.build()?;

    if data != rebuilt.as_slice() {
        return Err(format!(
            "Round-trip with data failed: {} bytes in, {} bytes out",
            data.len(),
            rebuilt.len()
        )
        .into());
    }

    Ok(())
}

/// Smallest useful document: one block, one record, one action
pub fn minimal_document() -> Document {
    Document::new(1, "Q").with_block(
        Block::new("B")
            .with_record(Record::new("R").with_action(Frame::new(7, vec![0x2A]).unwrap())),
    )
}

/// Byte image of [`minimal_document`]
pub fn minimal_document_bytes() -> Vec<u8> {
    vec![
        1, 0, 0, 0, // file_version
        1, 0, 0, 0, // block_count
        2, 0, b'Q', 0, // name
        1, 0, 0, 0, // record_count
        2, 0, b'B', 0, // block name
        0, // check_next
        0, 0, 0, 0, // condition_count
        1, 0, 0, 0, // action_count
        2, 0, b'R', 0, // record name
        9, 0, 0, 0, // action length
        7, 0, 0, 0, // action command
        0x2A, // action payload
    ]
}

/// Two blocks, three records, legacy-encoded names and mixed frames
///
/// Totals: 3 conditions, 4 actions, 14 payload bytes.
pub fn sample_document() -> Document {
    Document::new(2, QsdString::from_display("테스트 퀘스트"))
        .with_block(
            Block::new("Start")
                .with_record(
                    Record::new("Greeting")
                        .with_check_next(true)
                        .with_condition(Frame::new(0x01, vec![1, 2, 3, 4]).unwrap())
                        .with_action(Frame::new(0x10, vec![0xAA, 0xBB]).unwrap()),
                )
                .with_record(Record::new("").with_action(Frame::new(0x11, vec![]).unwrap())),
        )
        .with_block(
            Block::new(QsdString::from_display("퀘스트")).with_record(
                Record::new(QsdString::from_display("보상"))
                    .with_condition(Frame::new(0xABCD_0002, vec![5; 4]).unwrap())
                    .with_condition(Frame::new(0x03, vec![]).unwrap())
                    .with_action(Frame::new(0x20, vec![9, 9]).unwrap())
                    .with_action(Frame::new(0x21, vec![7, 7]).unwrap()),
            ),
        )
}
