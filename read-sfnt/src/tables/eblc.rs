//! The [EBLC (Embedded Bitmap Location)](https://docs.microsoft.com/en-us/typography/opentype/spec/eblc) table

use types::{BigEndian, FixedSize, GlyphId, MajorMinor, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
use crate::table_provider::TopLevelTable;

/// The [EBLC] table.
///
/// [EBLC]: https://docs.microsoft.com/en-us/typography/opentype/spec/eblc
#[derive(Clone)]
pub struct Eblc<'a> {
    data: FontData<'a>,
    bitmap_sizes: &'a [BitmapSize],
}

impl TopLevelTable for Eblc<'_> {
    const TAG: Tag = Tag::new(b"EBLC");
}

impl<'a> Eblc<'a> {
    const BITMAP_SIZES: usize = 8;

    pub fn version(&self) -> MajorMinor {
        self.data.read_at(0).unwrap_or_default()
    }

    /// One record per strike (pixel size) in the font.
    pub fn bitmap_sizes(&self) -> &'a [BitmapSize] {
        self.bitmap_sizes
    }

    /// The table data, against which all stored offsets resolve.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }

    /// Locate a glyph's image within `EBDT` for the given strike.
    pub fn glyph_location(
        &self,
        size_index: usize,
        glyph_id: GlyphId,
    ) -> Result<Option<BitmapLocation>, ReadError> {
        let size = self
            .bitmap_sizes
            .get(size_index)
            .ok_or(ReadError::OutOfBounds)?;
        size.location(self.data, glyph_id)
    }
}

impl<'a> FontRead<'a> for Eblc<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_sizes: u32 = data.read_at(4)?;
        let end = Self::BITMAP_SIZES + num_sizes as usize * BitmapSize::RAW_BYTE_LEN;
        let bitmap_sizes = data.read_array(Self::BITMAP_SIZES..end)?;
        Ok(Eblc { data, bitmap_sizes })
    }
}

/// Line metrics for one direction of a strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct SbitLineMetrics {
    pub ascender: i8,
    pub descender: i8,
    pub width_max: u8,
    pub caret_slope_numerator: i8,
    pub caret_slope_denominator: i8,
    pub caret_offset: i8,
    pub min_origin_sb: i8,
    pub min_advance_sb: i8,
    pub max_before_bl: i8,
    pub min_after_bl: i8,
    pub pad1: i8,
    pub pad2: i8,
}

impl FixedSize for SbitLineMetrics {
    const RAW_BYTE_LEN: usize = 12;
}

/// One strike: line metrics, a glyph range and an index subtable array.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct BitmapSize {
    index_subtable_array_offset: BigEndian<u32>,
    index_tables_size: BigEndian<u32>,
    number_of_index_subtables: BigEndian<u32>,
    color_ref: BigEndian<u32>,
    hori: SbitLineMetrics,
    vert: SbitLineMetrics,
    start_glyph_index: BigEndian<u16>,
    end_glyph_index: BigEndian<u16>,
    ppem_x: u8,
    ppem_y: u8,
    bit_depth: u8,
    flags: i8,
}

impl FixedSize for BitmapSize {
    const RAW_BYTE_LEN: usize = 48;
}

impl BitmapSize {
    /// Offset from the start of EBLC to the index subtable array.
    pub fn index_subtable_array_offset(&self) -> u32 {
        self.index_subtable_array_offset.get()
    }

    pub fn number_of_index_subtables(&self) -> u32 {
        self.number_of_index_subtables.get()
    }

    pub fn hori(&self) -> SbitLineMetrics {
        self.hori
    }

    pub fn vert(&self) -> SbitLineMetrics {
        self.vert
    }

    /// The lowest glyph id covered by this strike.
    pub fn start_glyph_index(&self) -> u16 {
        self.start_glyph_index.get()
    }

    /// The highest glyph id covered by this strike.
    pub fn end_glyph_index(&self) -> u16 {
        self.end_glyph_index.get()
    }

    pub fn ppem_x(&self) -> u8 {
        self.ppem_x
    }

    pub fn ppem_y(&self) -> u8 {
        self.ppem_y
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn flags(&self) -> i8 {
        self.flags
    }

    /// Read the index subtable at `index` in this strike's array.
    ///
    /// `offset_data` is the EBLC table data.
    pub fn subtable<'a>(
        &self,
        offset_data: FontData<'a>,
        index: u32,
    ) -> Result<BitmapSizeSubtable<'a>, ReadError> {
        let base_offset = self.index_subtable_array_offset() as usize;
        let record_offset = base_offset + index as usize * IndexSubtableRecord::RAW_BYTE_LEN;
        let record: &IndexSubtableRecord = &offset_data
            .read_array(record_offset..record_offset + IndexSubtableRecord::RAW_BYTE_LEN)?[0];
        let subtable_offset =
            base_offset + record.additional_offset_to_index_subtable() as usize;
        let subtable_data = offset_data
            .split_off(subtable_offset)
            .ok_or(ReadError::OutOfBounds)?;
        let first = record.first_glyph_index();
        let last = record.last_glyph_index();
        let kind = IndexSubtable::read_with_args(subtable_data, &(first, last))?;
        Ok(BitmapSizeSubtable {
            first_glyph_index: first,
            last_glyph_index: last,
            kind,
        })
    }

    /// Locate a glyph's image data for this strike.
    ///
    /// A glyph outside the strike's range fails with
    /// [`ReadError::GlyphOutOfRange`]; a glyph in range that the index
    /// subtables do not enumerate yields `Ok(None)`.
    pub fn location(
        &self,
        offset_data: FontData,
        glyph_id: GlyphId,
    ) -> Result<Option<BitmapLocation>, ReadError> {
        let gid = glyph_id.to_u16();
        if !(self.start_glyph_index()..=self.end_glyph_index()).contains(&gid) {
            return Err(ReadError::GlyphOutOfRange(gid));
        }
        for ix in 0..self.number_of_index_subtables() {
            let subtable = self.subtable(offset_data, ix)?;
            if !(subtable.first_glyph_index..=subtable.last_glyph_index).contains(&gid) {
                continue;
            }
            return subtable.location(glyph_id);
        }
        Ok(None)
    }
}

/// One entry of a strike's index subtable array.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct IndexSubtableRecord {
    first_glyph_index: BigEndian<u16>,
    last_glyph_index: BigEndian<u16>,
    additional_offset_to_index_subtable: BigEndian<u32>,
}

impl IndexSubtableRecord {
    pub fn first_glyph_index(&self) -> u16 {
        self.first_glyph_index.get()
    }

    pub fn last_glyph_index(&self) -> u16 {
        self.last_glyph_index.get()
    }

    /// Offset from the start of the index subtable array.
    pub fn additional_offset_to_index_subtable(&self) -> u32 {
        self.additional_offset_to_index_subtable.get()
    }
}

impl FixedSize for IndexSubtableRecord {
    const RAW_BYTE_LEN: usize = 8;
}

/// An index subtable along with the glyph range it covers.
#[derive(Clone)]
pub struct BitmapSizeSubtable<'a> {
    pub first_glyph_index: u16,
    pub last_glyph_index: u16,
    pub kind: IndexSubtable<'a>,
}

impl BitmapSizeSubtable<'_> {
    /// Locate a glyph within this subtable's EBDT block.
    pub fn location(&self, glyph_id: GlyphId) -> Result<Option<BitmapLocation>, ReadError> {
        let gid = glyph_id.to_u16();
        if !(self.first_glyph_index..=self.last_glyph_index).contains(&gid) {
            return Err(ReadError::GlyphOutOfRange(gid));
        }
        let glyph_ix = (gid - self.first_glyph_index) as usize;
        self.kind.location(glyph_ix, gid)
    }
}

/// The location of one glyph's image within the EBDT table.
#[derive(Clone, Debug, PartialEq)]
pub struct BitmapLocation {
    /// Format of the EBDT image data.
    pub image_format: u16,
    /// Offset of the image data from the start of EBDT.
    pub data_offset: usize,
    /// Length of the image data in bytes.
    pub data_size: usize,
    /// Metrics stored in the index subtable, for formats that hoist them
    /// out of EBDT.
    pub metrics: Option<BigGlyphMetrics>,
}

/// An index subtable: five formats trading space against lookup cost.
#[derive(Clone)]
pub enum IndexSubtable<'a> {
    Format1(IndexSubtable1<'a>),
    Format2(IndexSubtable2),
    Format3(IndexSubtable3<'a>),
    Format4(IndexSubtable4<'a>),
    Format5(IndexSubtable5<'a>),
}

/// The header common to all five index subtable formats.
const INDEX_SUBTABLE_HEADER_LEN: usize = 8;

fn read_index_header(data: FontData) -> Result<(u16, u16, u32), ReadError> {
    let index_format: u16 = data.read_at(0)?;
    let image_format: u16 = data.read_at(2)?;
    // stored unsigned, used as an index; reject offsets that cannot be one
    let image_data_offset = data.read_u32_as_int(4)? as u32;
    Ok((index_format, image_format, image_data_offset))
}

impl ReadArgs for IndexSubtable<'_> {
    /// `(first_glyph_index, last_glyph_index)`
    type Args = (u16, u16);
}

impl<'a> FontReadWithArgs<'a> for IndexSubtable<'a> {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let (first, last) = *args;
        let (index_format, image_format, image_data_offset) = read_index_header(data)?;
        let num_glyphs = (last as usize).saturating_sub(first as usize) + 1;
        match index_format {
            1 => {
                let offsets = data.read_array(
                    INDEX_SUBTABLE_HEADER_LEN
                        ..INDEX_SUBTABLE_HEADER_LEN + (num_glyphs + 1) * 4,
                )?;
                Ok(Self::Format1(IndexSubtable1 {
                    image_format,
                    image_data_offset,
                    sbit_offsets: offsets,
                }))
            }
            2 => {
                let image_size: u32 = data.read_at(8)?;
                let big_metrics = read_big_metrics(data, 12)?;
                Ok(Self::Format2(IndexSubtable2 {
                    image_format,
                    image_data_offset,
                    image_size,
                    big_metrics,
                }))
            }
            3 => {
                let offsets = data.read_array(
                    INDEX_SUBTABLE_HEADER_LEN
                        ..INDEX_SUBTABLE_HEADER_LEN + (num_glyphs + 1) * 2,
                )?;
                Ok(Self::Format3(IndexSubtable3 {
                    image_format,
                    image_data_offset,
                    sbit_offsets: offsets,
                }))
            }
            4 => {
                let num_glyphs: u32 = data.read_at(8)?;
                let glyph_array = data.read_array(
                    12..12 + (num_glyphs as usize + 1) * GlyphIdOffsetPair::RAW_BYTE_LEN,
                )?;
                Ok(Self::Format4(IndexSubtable4 {
                    image_format,
                    image_data_offset,
                    glyph_array,
                }))
            }
            5 => {
                let image_size: u32 = data.read_at(8)?;
                let big_metrics = read_big_metrics(data, 12)?;
                let num_glyphs: u32 = data.read_at(20)?;
                let glyph_array = data.read_array(24..24 + num_glyphs as usize * 2)?;
                Ok(Self::Format5(IndexSubtable5 {
                    image_format,
                    image_data_offset,
                    image_size,
                    big_metrics,
                    glyph_array,
                }))
            }
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }
}

impl IndexSubtable<'_> {
    /// The format number of this subtable.
    pub fn index_format(&self) -> u16 {
        match self {
            Self::Format1(_) => 1,
            Self::Format2(_) => 2,
            Self::Format3(_) => 3,
            Self::Format4(_) => 4,
            Self::Format5(_) => 5,
        }
    }

    /// The EBDT image format of the glyphs this subtable locates.
    pub fn image_format(&self) -> u16 {
        match self {
            Self::Format1(st) => st.image_format,
            Self::Format2(st) => st.image_format,
            Self::Format3(st) => st.image_format,
            Self::Format4(st) => st.image_format,
            Self::Format5(st) => st.image_format,
        }
    }

    /// The offset of this subtable's block within EBDT.
    pub fn image_data_offset(&self) -> u32 {
        match self {
            Self::Format1(st) => st.image_data_offset,
            Self::Format2(st) => st.image_data_offset,
            Self::Format3(st) => st.image_data_offset,
            Self::Format4(st) => st.image_data_offset,
            Self::Format5(st) => st.image_data_offset,
        }
    }

    fn location(
        &self,
        glyph_ix: usize,
        gid: u16,
    ) -> Result<Option<BitmapLocation>, ReadError> {
        let image_format = self.image_format();
        let base = self.image_data_offset() as usize;
        let location = match self {
            Self::Format1(st) => {
                let start = st.sbit_offset(glyph_ix).ok_or(ReadError::OutOfBounds)?;
                let end = st.sbit_offset(glyph_ix + 1).ok_or(ReadError::OutOfBounds)?;
                let size = end
                    .checked_sub(start)
                    .ok_or(ReadError::MalformedData("descending sbit offsets"))?;
                BitmapLocation {
                    image_format,
                    data_offset: base + start as usize,
                    data_size: size as usize,
                    metrics: None,
                }
            }
            Self::Format2(st) => BitmapLocation {
                image_format,
                data_offset: base + glyph_ix * st.image_size as usize,
                data_size: st.image_size as usize,
                metrics: Some(st.big_metrics),
            },
            Self::Format3(st) => {
                let start = st.sbit_offset(glyph_ix).ok_or(ReadError::OutOfBounds)?;
                let end = st.sbit_offset(glyph_ix + 1).ok_or(ReadError::OutOfBounds)?;
                let size = end
                    .checked_sub(start)
                    .ok_or(ReadError::MalformedData("descending sbit offsets"))?;
                BitmapLocation {
                    image_format,
                    data_offset: base + start as usize,
                    data_size: size as usize,
                    metrics: None,
                }
            }
            Self::Format4(st) => {
                let Some(found) = st.pair_index(gid) else {
                    // in range, but not enumerated by this sparse subtable
                    return Ok(None);
                };
                let start = st.glyph_array[found].sbit_offset();
                let end = st
                    .glyph_array
                    .get(found + 1)
                    .ok_or(ReadError::OutOfBounds)?
                    .sbit_offset();
                let size = end
                    .checked_sub(start)
                    .ok_or(ReadError::MalformedData("descending sbit offsets"))?;
                BitmapLocation {
                    image_format,
                    data_offset: base + start as usize,
                    data_size: size as usize,
                    metrics: None,
                }
            }
            Self::Format5(st) => {
                let Some(found) = st.glyph_index(gid) else {
                    return Ok(None);
                };
                BitmapLocation {
                    image_format,
                    data_offset: base + found * st.image_size as usize,
                    data_size: st.image_size as usize,
                    metrics: Some(st.big_metrics),
                }
            }
        };
        Ok(Some(location))
    }
}

/// Format 1: one 32-bit offset per glyph, plus a terminator.
#[derive(Clone)]
pub struct IndexSubtable1<'a> {
    pub image_format: u16,
    pub image_data_offset: u32,
    sbit_offsets: &'a [BigEndian<u32>],
}

impl IndexSubtable1<'_> {
    pub fn sbit_offset(&self, index: usize) -> Option<u32> {
        self.sbit_offsets.get(index).map(|off| off.get())
    }
}

/// Format 2: equally sized images, no offset array.
#[derive(Clone)]
pub struct IndexSubtable2 {
    pub image_format: u16,
    pub image_data_offset: u32,
    pub image_size: u32,
    pub big_metrics: BigGlyphMetrics,
}

/// Format 3: like format 1 with 16-bit offsets.
#[derive(Clone)]
pub struct IndexSubtable3<'a> {
    pub image_format: u16,
    pub image_data_offset: u32,
    sbit_offsets: &'a [BigEndian<u16>],
}

impl IndexSubtable3<'_> {
    pub fn sbit_offset(&self, index: usize) -> Option<u16> {
        self.sbit_offsets.get(index).map(|off| off.get())
    }
}

/// Format 4: a sparse, sorted list of (glyph, offset) pairs.
#[derive(Clone)]
pub struct IndexSubtable4<'a> {
    pub image_format: u16,
    pub image_data_offset: u32,
    glyph_array: &'a [GlyphIdOffsetPair],
}

impl IndexSubtable4<'_> {
    pub fn glyph_array(&self) -> &[GlyphIdOffsetPair] {
        self.glyph_array
    }

    fn pair_index(&self, gid: u16) -> Option<usize> {
        // the final pair is a terminator, not a glyph entry
        let pairs = self.glyph_array.split_last().map(|(_, rest)| rest)?;
        pairs
            .binary_search_by(|pair| pair.glyph_id().cmp(&gid))
            .ok()
    }
}

/// Format 5: equally sized images for a sparse, sorted set of glyphs.
#[derive(Clone)]
pub struct IndexSubtable5<'a> {
    pub image_format: u16,
    pub image_data_offset: u32,
    pub image_size: u32,
    pub big_metrics: BigGlyphMetrics,
    glyph_array: &'a [BigEndian<u16>],
}

impl IndexSubtable5<'_> {
    pub fn glyph_array(&self) -> &[BigEndian<u16>] {
        self.glyph_array
    }

    fn glyph_index(&self, gid: u16) -> Option<usize> {
        self.glyph_array
            .binary_search_by(|entry| entry.get().cmp(&gid))
            .ok()
    }
}

/// A (glyph id, offset) pair of an index format 4 subtable.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct GlyphIdOffsetPair {
    glyph_id: BigEndian<u16>,
    sbit_offset: BigEndian<u16>,
}

impl GlyphIdOffsetPair {
    pub fn glyph_id(&self) -> u16 {
        self.glyph_id.get()
    }

    pub fn sbit_offset(&self) -> u16 {
        self.sbit_offset.get()
    }
}

impl FixedSize for GlyphIdOffsetPair {
    const RAW_BYTE_LEN: usize = 4;
}

/// Metrics for a glyph drawn in one direction only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct SmallGlyphMetrics {
    pub height: u8,
    pub width: u8,
    pub bearing_x: i8,
    pub bearing_y: i8,
    pub advance: u8,
}

impl FixedSize for SmallGlyphMetrics {
    const RAW_BYTE_LEN: usize = 5;
}

/// Metrics for a glyph drawn in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct BigGlyphMetrics {
    pub height: u8,
    pub width: u8,
    pub hori_bearing_x: i8,
    pub hori_bearing_y: i8,
    pub hori_advance: u8,
    pub vert_bearing_x: i8,
    pub vert_bearing_y: i8,
    pub vert_advance: u8,
}

impl FixedSize for BigGlyphMetrics {
    const RAW_BYTE_LEN: usize = 8;
}

fn read_big_metrics(data: FontData, offset: usize) -> Result<BigGlyphMetrics, ReadError> {
    Ok(data
        .read_array::<BigGlyphMetrics>(offset..offset + BigGlyphMetrics::RAW_BYTE_LEN)?[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    fn index_header(index_format: u16, image_format: u16, image_data_offset: u32) -> BeBuffer {
        BeBuffer::new()
            .push(index_format)
            .push(image_format)
            .push(image_data_offset)
    }

    fn big_metrics_bytes(buf: BeBuffer) -> BeBuffer {
        buf.extend([12u8, 10]) // height, width
            .push(0i8)
            .push(10i8)
            .push(11u8)
            .push(0i8)
            .push(0i8)
            .push(12u8)
    }

    fn location(
        subtable: &IndexSubtable,
        first: u16,
        last: u16,
        gid: u16,
    ) -> Result<Option<BitmapLocation>, ReadError> {
        BitmapSizeSubtable {
            first_glyph_index: first,
            last_glyph_index: last,
            kind: subtable.clone(),
        }
        .location(GlyphId::new(gid))
    }

    #[test]
    fn format_1_offset_array() {
        let buf = index_header(1, 6, 1000).extend([0u32, 30, 30, 90]);
        let st = IndexSubtable::read_with_args(buf.font_data(), &(10, 12)).unwrap();
        let loc = location(&st, 10, 12, 11).unwrap().unwrap();
        assert_eq!(loc.data_offset, 1030);
        assert_eq!(loc.data_size, 0); // empty glyph
        let loc = location(&st, 10, 12, 12).unwrap().unwrap();
        assert_eq!(loc.data_offset, 1030);
        assert_eq!(loc.data_size, 60);
        assert!(matches!(
            location(&st, 10, 12, 13),
            Err(ReadError::GlyphOutOfRange(13))
        ));
    }

    #[test]
    fn format_2_constant_size() {
        let buf = big_metrics_bytes(index_header(2, 5, 500).push(24u32));
        let st = IndexSubtable::read_with_args(buf.font_data(), &(4, 8)).unwrap();
        let loc = location(&st, 4, 8, 6).unwrap().unwrap();
        assert_eq!(loc.data_offset, 500 + 2 * 24);
        assert_eq!(loc.data_size, 24);
        assert_eq!(loc.metrics.unwrap().width, 10);
    }

    #[test]
    fn format_3_short_offsets() {
        let buf = index_header(3, 1, 64).extend([0u16, 8, 20, 20]);
        let st = IndexSubtable::read_with_args(buf.font_data(), &(1, 3)).unwrap();
        let loc = location(&st, 1, 3, 2).unwrap().unwrap();
        assert_eq!(loc.data_offset, 64 + 8);
        assert_eq!(loc.data_size, 12);
        // equal adjacent offsets: present but empty
        assert_eq!(location(&st, 1, 3, 3).unwrap().unwrap().data_size, 0);
    }

    #[test]
    fn format_4_sparse_pairs() {
        let buf = index_header(4, 1, 256)
            .push(2u32) // two glyphs
            .extend([20u16, 0, 23, 40, 0xFFFF, 100]); // pairs + terminator
        let st = IndexSubtable::read_with_args(buf.font_data(), &(20, 30)).unwrap();
        let loc = location(&st, 20, 30, 20).unwrap().unwrap();
        assert_eq!(loc.data_offset, 256);
        assert_eq!(loc.data_size, 40);
        let loc = location(&st, 20, 30, 23).unwrap().unwrap();
        assert_eq!(loc.data_offset, 256 + 40);
        assert_eq!(loc.data_size, 60);
        // glyph 21 is in range but not enumerated
        assert_eq!(location(&st, 20, 30, 21).unwrap(), None);
        assert!(location(&st, 20, 30, 31).is_err());
    }

    #[test]
    fn format_5_sparse_constant_size() {
        let buf = big_metrics_bytes(index_header(5, 2, 0).push(16u32))
            .push(3u32)
            .extend([7u16, 9, 10]);
        let st = IndexSubtable::read_with_args(buf.font_data(), &(7, 10)).unwrap();
        let loc = location(&st, 7, 10, 9).unwrap().unwrap();
        assert_eq!(loc.data_offset, 16); // second entry
        assert_eq!(loc.data_size, 16);
        assert_eq!(location(&st, 7, 10, 8).unwrap(), None);
    }

    #[test]
    fn whole_table() {
        // one strike, one format 1 subtable covering glyphs 1..=2
        let mut buf = BeBuffer::new()
            .push(MajorMinor::VERSION_2_0)
            .push(1u32); // num sizes
        // BitmapSize record
        buf = buf
            .push(56u32) // index subtable array offset
            .push(28u32) // index tables size
            .push(1u32) // number of index subtables
            .push(0u32); // color ref
        for _ in 0..2 {
            // hori + vert line metrics
            buf = buf
                .push(10i8)
                .push(-2i8)
                .push(12u8)
                .extend([0i8; 7])
                .extend([0i8; 2]);
        }
        buf = buf
            .push(1u16) // start glyph
            .push(2u16) // end glyph
            .extend([12u8, 12, 1])
            .push(0i8);
        assert_eq!(buf.len(), 56);
        // index subtable array: one record
        buf = buf.push(1u16).push(2u16).push(8u32);
        // the format 1 subtable itself @ 64
        buf = buf
            .push(1u16)
            .push(6u16)
            .push(128u32)
            .extend([0u32, 10, 50]);
        let eblc = Eblc::read(buf.font_data()).unwrap();
        assert_eq!(eblc.version(), MajorMinor::VERSION_2_0);
        assert_eq!(eblc.bitmap_sizes().len(), 1);
        let size = &eblc.bitmap_sizes()[0];
        assert_eq!(size.ppem_x(), 12);
        let loc = eblc
            .glyph_location(0, GlyphId::new(2))
            .unwrap()
            .unwrap();
        assert_eq!(loc.image_format, 6);
        assert_eq!(loc.data_offset, 128 + 10);
        assert_eq!(loc.data_size, 40);
        assert!(matches!(
            eblc.glyph_location(0, GlyphId::new(9)),
            Err(ReadError::GlyphOutOfRange(9))
        ));
    }
}
