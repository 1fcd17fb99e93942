//! raw font bytes

use std::ops::{Range, RangeBounds};

use types::{FixedSize, ReadScalar};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, providing the big-endian reads,
/// bounded slicing and search primitives used by every table decoder.
///
/// Slicing produces a sub-buffer sharing the same backing storage, so a
/// `FontData` is cheap to copy and views handed out by one table remain
/// valid for the lifetime of the underlying bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns self[pos..], or `None` if `pos` is out of bounds.
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    /// Returns self[..pos], and updates self to self[pos..].
    pub fn take_up_to(&mut self, pos: usize) -> Option<FontData<'a>> {
        if pos > self.len() {
            return None;
        }
        let (head, tail) = self.bytes.split_at(pos);
        self.bytes = tail;
        Some(FontData { bytes: head })
    }

    /// Return a sub-buffer covering `range`, or `None` if it is out of bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    /// Read a scalar at the provided offset.
    ///
    /// Fails with [`ReadError::OutOfBounds`] if `offset + T::RAW_BYTE_LEN`
    /// exceeds the length of the buffer.
    pub fn read_at<T: ReadScalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Read a 32-bit unsigned value into a signed host integer.
    ///
    /// Fails with [`ReadError::OutOfRange`] if the top bit of the value is
    /// set; offsets stored as uint32 are used as indices, and an index that
    /// cannot be represented is better rejected at the read site.
    pub fn read_u32_as_int(&self, offset: usize) -> Result<i32, ReadError> {
        let raw: u32 = self.read_at(offset)?;
        i32::try_from(raw).map_err(|_| ReadError::OutOfRange)
    }

    /// Interpret the bytes in `range` as a slice of some record type `T`.
    ///
    /// `T` must be a type composed entirely of unaligned big-endian fields.
    pub fn read_array<T: FixedSize>(&self, range: Range<usize>) -> Result<&'a [T], ReadError> {
        assert_ne!(std::mem::size_of::<T>(), 0);
        assert_eq!(std::mem::align_of::<T>(), 1);
        let bytes = self
            .bytes
            .get(range.clone())
            .ok_or(ReadError::OutOfBounds)?;
        if bytes.len() % std::mem::size_of::<T>() != 0 {
            return Err(ReadError::InvalidArrayLen);
        }
        // safety: T has alignment 1, no padding, and the length is a multiple
        // of the item size (checked above)
        unsafe { Ok(self.read_array_unchecked(range)) }
    }

    /// Interpret the bytes in `range` as a slice of some record type `T`.
    ///
    /// # Safety
    ///
    /// `T` must be a struct or scalar that has an alignment of 1, a non-zero
    /// size and no internal padding, and `range` must be in bounds with a
    /// length that is a multiple of `size_of::<T>()`.
    unsafe fn read_array_unchecked<T: FixedSize>(&self, range: Range<usize>) -> &'a [T] {
        let bytes = self.bytes.get_unchecked(range);
        let elems = bytes.len() / std::mem::size_of::<T>();
        std::slice::from_raw_parts(bytes.as_ptr() as *const _, elems)
    }

    /// The OpenType table checksum of these bytes.
    ///
    /// This is the wrapping sum of the data interpreted as big-endian 32-bit
    /// words, with a final partial word zero-padded on the right.
    pub fn checksum(&self) -> u32 {
        let mut sum = 0u32;
        let mut iter = self.bytes.chunks_exact(4);
        for quad in &mut iter {
            // this can't fail, and we trust the compiler to avoid a branch
            let array: [u8; 4] = quad.try_into().unwrap_or_default();
            sum = sum.wrapping_add(u32::from_be_bytes(array));
        }
        let rem = match *iter.remainder() {
            [a] => u32::from_be_bytes([a, 0, 0, 0]),
            [a, b] => u32::from_be_bytes([a, b, 0, 0]),
            [a, b, c] => u32::from_be_bytes([a, b, c, 0]),
            _ => 0,
        };
        sum.wrapping_add(rem)
    }

    /// Binary search over two parallel arrays of `u16` range bounds.
    ///
    /// See [`search_u32`](Self::search_u32) for the search contract.
    pub fn search_u16(
        &self,
        start_offset: usize,
        start_stride: usize,
        end_offset: usize,
        end_stride: usize,
        count: usize,
        key: u16,
    ) -> Result<Option<usize>, ReadError> {
        self.search_ranges::<u16>(start_offset, start_stride, end_offset, end_stride, count, key)
    }

    /// Binary search over two parallel arrays of `u32` range bounds.
    ///
    /// The arrays are indexed by the same `i` in `0..count`: the start value
    /// of range `i` lives at `start_offset + i * start_stride` and its end
    /// value at `end_offset + i * end_stride`. Ranges are inclusive on both
    /// ends, and the caller must ensure the end values are non-decreasing.
    ///
    /// Returns the index of the range containing `key`, or `None` if `key`
    /// falls in a gap between ranges or outside all of them.
    pub fn search_u32(
        &self,
        start_offset: usize,
        start_stride: usize,
        end_offset: usize,
        end_stride: usize,
        count: usize,
        key: u32,
    ) -> Result<Option<usize>, ReadError> {
        self.search_ranges::<u32>(start_offset, start_stride, end_offset, end_stride, count, key)
    }

    fn search_ranges<T: ReadScalar + Ord>(
        &self,
        start_offset: usize,
        start_stride: usize,
        end_offset: usize,
        end_stride: usize,
        count: usize,
        key: T,
    ) -> Result<Option<usize>, ReadError> {
        let mut bottom = 0;
        let mut top = count;
        while top != bottom {
            let location = (top + bottom) / 2;
            let start: T = self.read_at(start_offset + location * start_stride)?;
            if key < start {
                top = location;
            } else {
                let end: T = self.read_at(end_offset + location * end_stride)?;
                if key <= end {
                    return Ok(Some(location));
                }
                bottom = location + 1;
            }
        }
        Ok(None)
    }

    /// Error unless the buffer is at least `len` bytes long.
    ///
    /// Tables with a fixed minimum layout call this once at read time so
    /// that their field getters cannot fail afterwards.
    pub(crate) fn check_min_len(&self, len: usize) -> Result<(), ReadError> {
        if self.len() < len {
            Err(ReadError::OutOfBounds)
        } else {
            Ok(())
        }
    }

    pub(crate) fn check_in_bounds(&self, offset: usize) -> Result<(), ReadError> {
        self.bytes
            .get(..offset)
            .ok_or(ReadError::OutOfBounds)
            .map(|_| ())
    }

    /// A cursor positioned at the start of this data.
    pub fn cursor(&self) -> Cursor<'a> {
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

/// A sequential reader over a [`FontData`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> Cursor<'a> {
    /// Advance past one value of scalar type `T`.
    pub fn advance<T: FixedSize>(&mut self) {
        self.pos += T::RAW_BYTE_LEN;
    }

    /// Advance the position by `n_bytes`.
    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos += n_bytes;
    }

    /// Read a scalar and advance past it.
    pub fn read<T: ReadScalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos += T::RAW_BYTE_LEN;
        temp
    }

    /// Read an array of `n_elem` records and advance past it.
    pub fn read_array<T: FixedSize>(&mut self, n_elem: usize) -> Result<&'a [T], ReadError> {
        let len = n_elem * T::RAW_BYTE_LEN;
        let temp = self.data.read_array(self.pos..self.pos + len);
        self.pos += len;
        temp
    }

    /// The current position, or an error if we are out of bounds.
    pub fn position(&self) -> Result<usize, ReadError> {
        self.data.check_in_bounds(self.pos).map(|_| self.pos)
    }

    /// The number of bytes remaining past the current position.
    ///
    /// Used when handling fields with an implicit length, which must be at
    /// the end of a table.
    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    #[test]
    fn read_at_bounds() {
        let data = FontData::new(&[0, 1, 2, 3]);
        assert_eq!(data.read_at::<u16>(0), Ok(1));
        assert_eq!(data.read_at::<u32>(0), Ok(0x00010203));
        assert_eq!(data.read_at::<u32>(1), Err(ReadError::OutOfBounds));
        assert_eq!(data.read_at::<u8>(4), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn u32_as_int() {
        let data = FontData::new(&[0x7F, 0xFF, 0xFF, 0xFF, 0x80, 0, 0, 0]);
        assert_eq!(data.read_u32_as_int(0), Ok(i32::MAX));
        assert_eq!(data.read_u32_as_int(4), Err(ReadError::OutOfRange));
    }

    #[test]
    fn slicing_is_transitive() {
        let bytes: Vec<u8> = (0..32).collect();
        let data = FontData::new(&bytes);
        for (a, n, b, m) in [(0usize, 32usize, 4usize, 8usize), (2, 20, 6, 10), (5, 27, 0, 27)] {
            let once = data.slice(a + b..a + b + m).unwrap();
            let twice = data.slice(a..a + n).unwrap().slice(b..b + m).unwrap();
            assert_eq!(once.as_bytes(), twice.as_bytes());
        }
    }

    #[test]
    fn checksum_pads_partial_words() {
        assert_eq!(FontData::new(&[0, 0, 0, 1]).checksum(), 1);
        assert_eq!(FontData::new(&[0, 0, 0, 1, 0x80]).checksum(), 0x80000001);
        // wrapping
        assert_eq!(
            FontData::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 2]).checksum(),
            1
        );
    }

    #[test]
    fn search_parallel_ranges() {
        // starts = [0, 10, 20, 50], ends = [5, 15, 30, 70]
        let buf = BeBuffer::new()
            .extend([0u16, 10, 20, 50])
            .extend([5u16, 15, 30, 70]);
        let data = buf.font_data();
        let search = |key| data.search_u16(0, 2, 8, 2, 4, key).unwrap();
        assert_eq!(search(25), Some(2));
        assert_eq!(search(7), None);
        assert_eq!(search(100), None);
        assert_eq!(search(10), Some(1));
        assert_eq!(search(15), Some(1));
        assert_eq!(search(0), Some(0));
    }

    #[test]
    fn search_strided() {
        // the same ranges, interleaved as (start, end) pairs of u32
        let buf = BeBuffer::new().extend([0u32, 5, 10, 15, 20, 30, 50, 70]);
        let data = buf.font_data();
        let search = |key| data.search_u32(0, 8, 4, 8, 4, key).unwrap();
        assert_eq!(search(25), Some(2));
        assert_eq!(search(7), None);
        assert_eq!(search(70), Some(3));
        assert_eq!(search(71), None);
    }

    #[test]
    fn cursor_reads() {
        let data = FontData::new(&[0, 2, 0xFF, 0xFE, 9]);
        let mut cursor = data.cursor();
        assert_eq!(cursor.read::<u16>(), Ok(2));
        assert_eq!(cursor.read::<i16>(), Ok(-2));
        assert_eq!(cursor.remaining_bytes(), 1);
        assert_eq!(cursor.read::<u8>(), Ok(9));
        assert!(cursor.read::<u8>().is_err());
    }
}
