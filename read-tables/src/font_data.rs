//! raw table bytes

use std::ops::RangeBounds;

use ot_types::{FixedSize, Scalar};

use crate::read::ReadError;

/// A reference to raw binary table data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data. It does not own the bytes; it is
/// `Copy` and free to create, and its lifetime is tied to the buffer it
/// views.
///
/// Every read re-validates its bounds against the underlying slice, so a
/// `FontData` constructed over truncated or malformed input can never read
/// past the end of the buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A cursor for validating bytes during parsing.
///
/// Used by table `read` impls to step through the fixed header fields and
/// confirm the minimum table size once, up front.
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    ///
    /// The bytes should be the extracted range for a single table, as
    /// offsets within a table are relative to the table's own start.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the data beginning at `pos`, or `None` if `pos` is out of range.
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    /// Returns a sub-range of the data, or `None` if the range is out of bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    /// Read a scalar value at the provided byte offset.
    ///
    /// Returns [`ReadError::OutOfBounds`] if `offset + T::RAW_BYTE_LEN`
    /// exceeds the length of the data.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        offset
            .checked_add(T::RAW_BYTE_LEN)
            .and_then(|end| self.bytes.get(offset..end))
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Read element `index` of an array of `T` beginning at `first_elem_offset`.
    ///
    /// The stride is `T::RAW_BYTE_LEN`; each access is individually bounds
    /// checked, so an oversized count field only fails the indexes that
    /// actually fall outside the data.
    pub fn read_array_item<T: Scalar>(
        &self,
        first_elem_offset: usize,
        index: usize,
    ) -> Result<T, ReadError> {
        let offset = index
            .checked_mul(T::RAW_BYTE_LEN)
            .and_then(|rel| rel.checked_add(first_elem_offset))
            .ok_or(ReadError::OutOfBounds)?;
        self.read_at(offset)
    }

    pub(crate) fn check_in_bounds(&self, offset: usize) -> Result<(), ReadError> {
        self.bytes
            .get(..offset)
            .ok_or(ReadError::OutOfBounds)
            .map(|_| ())
    }

    pub(crate) fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    /// The underlying bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    pub(crate) fn advance<T: Scalar>(&mut self) {
        self.pos += T::RAW_BYTE_LEN
    }

    pub(crate) fn advance_by(&mut self, n_bytes: usize) {
        self.pos += n_bytes;
    }

    pub(crate) fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos += T::RAW_BYTE_LEN;
        temp
    }

    pub(crate) fn finish(self) -> Result<(), ReadError> {
        self.data.check_in_bounds(self.pos)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_at_checks_every_width() {
        let data = FontData::new(&[1, 2, 3, 4, 5]);
        assert_eq!(data.read_at::<u8>(4), Ok(5));
        assert_eq!(data.read_at::<u16>(3), Ok(0x0405));
        assert_eq!(data.read_at::<u32>(1), Ok(0x0203_0405));
        assert_eq!(data.read_at::<u16>(4), Err(ReadError::OutOfBounds));
        assert_eq!(data.read_at::<u32>(2), Err(ReadError::OutOfBounds));
        assert_eq!(data.read_at::<u64>(0), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn read_at_boundary_exact() {
        let data = FontData::new(&[0xde, 0xad, 0xbe, 0xef]);
        // offset + width == len is the last legal read
        assert_eq!(data.read_at::<u32>(0), Ok(0xdead_beef));
        assert_eq!(data.read_at::<u8>(3), Ok(0xef));
        assert_eq!(data.read_at::<u8>(4), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn read_at_overflow_safe() {
        let data = FontData::new(&[0; 8]);
        assert_eq!(
            data.read_at::<u32>(usize::MAX - 1),
            Err(ReadError::OutOfBounds)
        );
        assert_eq!(
            data.read_array_item::<u16>(2, usize::MAX / 2),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn array_items_fail_individually() {
        // three u16s, then truncation
        let data = FontData::new(&[0, 1, 0, 2, 0, 3, 0]);
        assert_eq!(data.read_array_item::<u16>(0, 2), Ok(3));
        assert_eq!(
            data.read_array_item::<u16>(0, 3),
            Err(ReadError::OutOfBounds)
        );
        // a failed index does not prevent re-reading a good one
        assert_eq!(data.read_array_item::<u16>(0, 0), Ok(1));
    }

    #[test]
    fn split_and_slice() {
        let data = FontData::new(&[9, 8, 7, 6]);
        assert_eq!(data.split_off(2).unwrap().as_bytes(), &[7, 6]);
        assert!(data.split_off(5).is_none());
        assert_eq!(data.slice(1..3).unwrap().as_bytes(), &[8, 7]);
        assert!(data.slice(1..9).is_none());
    }

    #[test]
    fn signed_reads() {
        let data = FontData::new(&[0xff, 0xfe]);
        assert_eq!(data.read_at::<i16>(0), Ok(-2));
        assert_eq!(data.read_at::<i8>(1), Ok(-2));
    }
}
