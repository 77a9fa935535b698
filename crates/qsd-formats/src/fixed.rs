//! Forward-only reads of fixed-size fields
//!
//! binrw restores the stream position when a read fails part way. Decoding
//! here never seeks, so fixed-size fields are first pulled off the stream
//! into a buffer and only then handed to binrw. A short stream stays
//! consumed up to its end.

use crate::error::Result;
use binrw::io::Cursor;
use binrw::{BinRead, Endian};
use std::io::Read;

/// Read `size` bytes and decode them as a little-endian `T`
///
/// # Errors
/// Returns [`QsdError::BinRw`](crate::QsdError::BinRw) when fewer than
/// `size` bytes are left; those bytes have already been consumed.
pub(crate) fn read_fixed<T, R>(reader: &mut R, size: usize) -> Result<T>
where
    T: for<'a> BinRead<Args<'a> = ()>,
    R: Read,
{
    let mut buffer = Vec::with_capacity(size);
    reader.by_ref().take(size as u64).read_to_end(&mut buffer)?;
    Ok(T::read_options(&mut Cursor::new(buffer), Endian::Little, ())?)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::QsdError;

    #[test]
    fn test_reads_little_endian() {
        let mut cursor = Cursor::new(vec![0x04u8, 0x03, 0x02, 0x01, 0xFF]);
        let value: u32 = read_fixed(&mut cursor, 4).expect("Operation should succeed");
        assert_eq!(value, 0x0102_0304);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_short_read_stays_consumed() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        let result: Result<u32> = read_fixed(&mut cursor, 4);
        assert!(matches!(result, Err(QsdError::BinRw(_))));
        assert_eq!(cursor.position(), 3);
    }
}
