//! The sfnt header and table directory.

use types::{BigEndian, FixedSize, MajorMinor, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The tag identifying a font collection file.
pub const TTC_HEADER_TAG: Tag = Tag::new(b"ttcf");

/// The table directory at the start of every sfnt font.
///
/// This is the offset table (sfnt version plus the binary-search
/// acceleration fields) followed by one [`TableRecord`] per table.
#[derive(Clone, Debug)]
pub struct TableDirectory<'a> {
    data: FontData<'a>,
    table_records: &'a [TableRecord],
}

impl<'a> TableDirectory<'a> {
    /// The number of bytes preceding the table records.
    pub const HEADER_LEN: usize = 12;

    const SFNT_VERSION: usize = 0;
    const NUM_TABLES: usize = 4;
    const SEARCH_RANGE: usize = 6;
    const ENTRY_SELECTOR: usize = 8;
    const RANGE_SHIFT: usize = 10;

    /// The sfnt version of the font.
    pub fn sfnt_version(&self) -> u32 {
        self.data.read_at(Self::SFNT_VERSION).unwrap_or_default()
    }

    /// The number of tables in the font.
    pub fn num_tables(&self) -> u16 {
        self.data.read_at(Self::NUM_TABLES).unwrap_or_default()
    }

    /// `16 * 2^⌊log2(num_tables)⌋`.
    pub fn search_range(&self) -> u16 {
        self.data.read_at(Self::SEARCH_RANGE).unwrap_or_default()
    }

    /// `⌊log2(num_tables)⌋`.
    pub fn entry_selector(&self) -> u16 {
        self.data.read_at(Self::ENTRY_SELECTOR).unwrap_or_default()
    }

    /// `num_tables * 16 - search_range`.
    pub fn range_shift(&self) -> u16 {
        self.data.read_at(Self::RANGE_SHIFT).unwrap_or_default()
    }

    /// The table records, sorted by tag.
    pub fn table_records(&self) -> &'a [TableRecord] {
        self.table_records
    }

    /// Check the ordering invariants of the directory.
    ///
    /// Records must be sorted by tag with no tag occurring twice. The
    /// directory's binary search relies on this, so it is enforced at load
    /// time; table *contents* are never inspected here.
    pub(crate) fn check_ordering(&self) -> Result<(), ReadError> {
        for pair in self.table_records.windows(2) {
            let (prev, next) = (pair[0].tag(), pair[1].tag());
            if prev == next {
                return Err(ReadError::DuplicateTag(next));
            }
            if prev > next {
                return Err(ReadError::UnorderedDirectory);
            }
        }
        Ok(())
    }
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_tables: u16 = data.read_at(Self::NUM_TABLES)?;
        let records_end =
            Self::HEADER_LEN + num_tables as usize * TableRecord::RAW_BYTE_LEN;
        let table_records = data.read_array(Self::HEADER_LEN..records_end)?;
        Ok(TableDirectory {
            data,
            table_records,
        })
    }
}

/// A record locating one table within the font file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct TableRecord {
    tag: BigEndian<Tag>,
    checksum: BigEndian<u32>,
    offset: BigEndian<u32>,
    length: BigEndian<u32>,
}

impl TableRecord {
    /// The table's tag.
    pub fn tag(&self) -> Tag {
        self.tag.get()
    }

    /// The checksum declared for the table's bytes.
    pub fn checksum(&self) -> u32 {
        self.checksum.get()
    }

    /// The offset of the table from the beginning of the file.
    pub fn offset(&self) -> u32 {
        self.offset.get()
    }

    /// The length of the table, excluding any padding.
    pub fn length(&self) -> u32 {
        self.length.get()
    }
}

impl FixedSize for TableRecord {
    const RAW_BYTE_LEN: usize = 16;
}

/// The header of a font collection (`ttc`) file.
#[derive(Clone)]
pub struct TTCHeader<'a> {
    data: FontData<'a>,
    table_directory_offsets: &'a [BigEndian<u32>],
}

impl<'a> TTCHeader<'a> {
    const TTC_TAG: usize = 0;
    const VERSION: usize = 4;
    const NUM_FONTS: usize = 8;
    const OFFSETS: usize = 12;

    /// The `ttcf` tag.
    pub fn ttc_tag(&self) -> Tag {
        self.data.read_at(Self::TTC_TAG).unwrap_or(Tag::new(b"    "))
    }

    /// The version of the collection header.
    pub fn version(&self) -> MajorMinor {
        self.data.read_at(Self::VERSION).unwrap_or_default()
    }

    /// The number of fonts in the collection.
    pub fn num_fonts(&self) -> u32 {
        self.table_directory_offsets.len() as u32
    }

    /// Offsets from the start of the file to each member font's directory.
    ///
    /// Member fonts commonly share table storage: the same offset/length
    /// pair may be referenced from several directories.
    pub fn table_directory_offsets(&self) -> &'a [BigEndian<u32>] {
        self.table_directory_offsets
    }
}

impl<'a> FontRead<'a> for TTCHeader<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let tag: Tag = data.read_at(Self::TTC_TAG)?;
        if tag != TTC_HEADER_TAG {
            return Err(ReadError::InvalidTtc(tag));
        }
        let num_fonts: u32 = data.read_at(Self::NUM_FONTS)?;
        let offsets_end = Self::OFFSETS + num_fonts as usize * u32::RAW_BYTE_LEN;
        // version 2 headers carry a trailing dsig record; nothing here needs it
        let table_directory_offsets = data.read_array(Self::OFFSETS..offsets_end)?;
        Ok(TTCHeader {
            data,
            table_directory_offsets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    fn directory_with_tags(tags: &[&[u8; 4]]) -> BeBuffer {
        let mut buf = BeBuffer::new()
            .push(types::TT_SFNT_VERSION)
            .push(tags.len() as u16)
            .push(16u16)
            .push(0u16)
            .push(0u16);
        for tag in tags {
            buf = buf
                .push(Tag::new(*tag))
                .push(0u32)
                .push(0u32)
                .push(0u32);
        }
        buf
    }

    #[test]
    fn reads_records() {
        let buf = directory_with_tags(&[b"cmap", b"glyf", b"head"]);
        let directory = TableDirectory::read(buf.font_data()).unwrap();
        assert_eq!(directory.num_tables(), 3);
        assert_eq!(directory.table_records()[1].tag(), Tag::new(b"glyf"));
        assert!(directory.check_ordering().is_ok());
    }

    #[test]
    fn rejects_unsorted() {
        let buf = directory_with_tags(&[b"glyf", b"cmap"]);
        let directory = TableDirectory::read(buf.font_data()).unwrap();
        assert_eq!(
            directory.check_ordering(),
            Err(ReadError::UnorderedDirectory)
        );
    }

    #[test]
    fn rejects_duplicates() {
        let buf = directory_with_tags(&[b"cmap", b"cmap"]);
        let directory = TableDirectory::read(buf.font_data()).unwrap();
        assert_eq!(
            directory.check_ordering(),
            Err(ReadError::DuplicateTag(Tag::new(b"cmap")))
        );
    }

    #[test]
    fn truncated_records_are_out_of_bounds() {
        let buf = directory_with_tags(&[b"cmap"]);
        let bytes = &buf.as_slice()[..buf.len() - 1];
        assert_eq!(
            TableDirectory::read(FontData::new(bytes)).unwrap_err(),
            ReadError::OutOfBounds
        );
    }
}
