//! The [cmap (Character to Glyph Mapping)](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table

use std::ops::Range;

use types::{BigEndian, FixedSize, GlyphId, Tag, Uint24};

use crate::font_data::FontData;
use crate::read::{FontRead, Format, ReadError};
use crate::table_provider::TopLevelTable;

/// The [cmap] table.
///
/// [cmap]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
#[derive(Clone)]
pub struct Cmap<'a> {
    data: FontData<'a>,
    encoding_records: &'a [EncodingRecord],
}

impl TopLevelTable for Cmap<'_> {
    const TAG: Tag = Tag::new(b"cmap");
}

impl<'a> Cmap<'a> {
    const ENCODING_RECORDS: usize = 4;

    /// Table version number (zero).
    pub fn version(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// The encoding records, sorted by platform id, then encoding id.
    pub fn encoding_records(&self) -> &'a [EncodingRecord] {
        self.encoding_records
    }

    /// The data for the whole table, against which subtable offsets resolve.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }

    /// Map a codepoint to a nominal glyph identifier.
    ///
    /// This uses the first subtable that provides a mapping other than
    /// [`GlyphId::NOTDEF`].
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        for record in self.encoding_records {
            if let Ok(subtable) = record.subtable(self.data) {
                let gid = subtable.glyph_id(codepoint);
                if gid != GlyphId::NOTDEF {
                    return Some(gid);
                }
            }
        }
        None
    }
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_tables: u16 = data.read_at(2)?;
        let records_end =
            Self::ENCODING_RECORDS + num_tables as usize * EncodingRecord::RAW_BYTE_LEN;
        let encoding_records = data.read_array(Self::ENCODING_RECORDS..records_end)?;
        Ok(Cmap {
            data,
            encoding_records,
        })
    }
}

/// One entry in the cmap's list of subtables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct EncodingRecord {
    platform_id: BigEndian<u16>,
    encoding_id: BigEndian<u16>,
    subtable_offset: BigEndian<u32>,
}

impl EncodingRecord {
    pub fn platform_id(&self) -> u16 {
        self.platform_id.get()
    }

    pub fn encoding_id(&self) -> u16 {
        self.encoding_id.get()
    }

    /// The offset of the subtable from the beginning of the cmap table.
    pub fn subtable_offset(&self) -> u32 {
        self.subtable_offset.get()
    }

    /// Read this record's subtable.
    ///
    /// `data` is the cmap table data, as returned by [`Cmap::offset_data`].
    pub fn subtable<'a>(&self, data: FontData<'a>) -> Result<CmapSubtable<'a>, ReadError> {
        let data = data
            .split_off(self.subtable_offset() as usize)
            .ok_or(ReadError::OutOfBounds)?;
        CmapSubtable::read(data)
    }
}

impl FixedSize for EncodingRecord {
    const RAW_BYTE_LEN: usize = 8;
}

/// A cmap subtable: one case per on-disk format.
///
/// The format is dispatched on the leading `uint16` of the subtable;
/// unrecognized values fail with [`ReadError::InvalidFormat`] and leave the
/// raw bytes untouched for callers that want to preserve them.
#[derive(Clone)]
pub enum CmapSubtable<'a> {
    Format0(Cmap0<'a>),
    Format2(Cmap2<'a>),
    Format4(Cmap4<'a>),
    Format6(Cmap6<'a>),
    Format8(Cmap8<'a>),
    Format10(Cmap10<'a>),
    Format12(Cmap12<'a>),
    Format13(Cmap13<'a>),
    Format14(Cmap14<'a>),
}

impl<'a> FontRead<'a> for CmapSubtable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            0 => Cmap0::read(data).map(Self::Format0),
            2 => Cmap2::read(data).map(Self::Format2),
            4 => Cmap4::read(data).map(Self::Format4),
            6 => Cmap6::read(data).map(Self::Format6),
            8 => Cmap8::read(data).map(Self::Format8),
            10 => Cmap10::read(data).map(Self::Format10),
            12 => Cmap12::read(data).map(Self::Format12),
            13 => Cmap13::read(data).map(Self::Format13),
            14 => Cmap14::read(data).map(Self::Format14),
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }
}

impl<'a> CmapSubtable<'a> {
    /// The subtable's format number.
    pub fn format(&self) -> u16 {
        match self {
            Self::Format0(_) => 0,
            Self::Format2(_) => 2,
            Self::Format4(_) => 4,
            Self::Format6(_) => 6,
            Self::Format8(_) => 8,
            Self::Format10(_) => 10,
            Self::Format12(_) => 12,
            Self::Format13(_) => 13,
            Self::Format14(_) => 14,
        }
    }

    /// The language field, where the format carries one.
    pub fn language(&self) -> u32 {
        match self {
            Self::Format0(item) => item.language() as u32,
            Self::Format2(item) => item.language() as u32,
            Self::Format4(item) => item.language() as u32,
            Self::Format6(item) => item.language() as u32,
            Self::Format8(item) => item.language(),
            Self::Format10(item) => item.language(),
            Self::Format12(item) => item.language(),
            Self::Format13(item) => item.language(),
            _ => 0,
        }
    }

    /// Map a codepoint to a glyph identifier.
    ///
    /// Returns [`GlyphId::NOTDEF`] for codepoints the subtable does not
    /// cover, and for format 14, which maps (codepoint, selector) pairs
    /// rather than bare codepoints; use [`Cmap14::map_variant`] for those.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        match self {
            Self::Format0(item) => item.glyph_id(codepoint),
            Self::Format2(item) => item.glyph_id(codepoint),
            Self::Format4(item) => item.glyph_id(codepoint),
            Self::Format6(item) => item.glyph_id(codepoint),
            Self::Format8(item) => item.glyph_id(codepoint),
            Self::Format10(item) => item.glyph_id(codepoint),
            Self::Format12(item) => item.glyph_id(codepoint),
            Self::Format13(item) => item.glyph_id(codepoint),
            Self::Format14(_) => GlyphId::NOTDEF,
        }
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    ///
    /// Format 14 pairs carry a variation selector and are not included;
    /// iterate those with [`Cmap14::iter`].
    pub fn codepoints(&self) -> Box<dyn Iterator<Item = (u32, GlyphId)> + 'a> {
        match self {
            Self::Format0(item) => Box::new(item.iter()),
            Self::Format2(item) => Box::new(item.iter()),
            Self::Format4(item) => Box::new(item.iter()),
            Self::Format6(item) => Box::new(item.iter()),
            Self::Format8(item) => Box::new(item.iter()),
            Self::Format10(item) => Box::new(item.iter()),
            Self::Format12(item) => Box::new(item.iter()),
            Self::Format13(item) => Box::new(item.iter()),
            Self::Format14(_) => Box::new(std::iter::empty()),
        }
    }
}

/// Subtables that cover a set of codepoint ranges.
///
/// This is the parameterization behind [`Codepoints`]: a format supplies its
/// declared ranges and a lookup, and the shared driver walks every code in
/// every range, skipping the ones that map to [`GlyphId::NOTDEF`]. Sparse
/// formats may over-declare; the gap-skipping makes that harmless.
pub trait CodepointRanges: Clone {
    /// The half-open range at `index`, or `None` past the last range.
    fn range(&self, index: usize) -> Option<Range<u64>>;

    /// The mapping used to filter uncovered codes while iterating.
    fn lookup(&self, codepoint: u32) -> GlyphId;
}

/// Iterator over the `(codepoint, glyph id)` pairs covered by a subtable.
#[derive(Clone)]
pub struct Codepoints<T> {
    source: T,
    cur_range: Range<u64>,
    cur_range_ix: usize,
}

impl<T: CodepointRanges> Codepoints<T> {
    fn new(source: T) -> Self {
        let cur_range = source.range(0).unwrap_or(0..0);
        Self {
            source,
            cur_range,
            cur_range_ix: 0,
        }
    }
}

impl<T: CodepointRanges> Iterator for Codepoints<T> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(codepoint) = self.cur_range.next() {
                let codepoint = codepoint as u32;
                let glyph_id = self.source.lookup(codepoint);
                // Tables may explicitly map some codes to 0; skip those too.
                if glyph_id == GlyphId::NOTDEF {
                    continue;
                }
                return Some((codepoint, glyph_id));
            }
            self.cur_range_ix += 1;
            let next = self.source.range(self.cur_range_ix)?;
            // Ranges should be ordered and non-overlapping; clamping keeps a
            // malformed table from rewinding the cursor and looping forever.
            self.cur_range =
                next.start.max(self.cur_range.end)..next.end.max(self.cur_range.end);
        }
    }
}

/// A [format 0](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-0-byte-encoding-table)
/// subtable: a direct byte-to-glyph array.
#[derive(Clone)]
pub struct Cmap0<'a> {
    data: FontData<'a>,
}

impl Format<u16> for Cmap0<'_> {
    const FORMAT: u16 = 0;
}

impl<'a> Cmap0<'a> {
    const GLYPH_ID_ARRAY: usize = 6;
    const LEN: usize = 262;

    pub fn length(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    pub fn language(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }

    /// Map a codepoint to a glyph identifier.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        if codepoint > 0xFF {
            return GlyphId::NOTDEF;
        }
        let gid: u8 = self
            .data
            .read_at(Self::GLYPH_ID_ARRAY + codepoint as usize)
            .unwrap_or_default();
        GlyphId::new(gid as u16)
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    pub fn iter(&self) -> Codepoints<Self> {
        Codepoints::new(self.clone())
    }
}

impl CodepointRanges for Cmap0<'_> {
    fn range(&self, index: usize) -> Option<Range<u64>> {
        (index == 0).then_some(0..0x100)
    }

    fn lookup(&self, codepoint: u32) -> GlyphId {
        self.glyph_id(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap0<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.check_min_len(Self::LEN)?;
        Ok(Cmap0 { data })
    }
}

/// A [format 2](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-2-high-byte-mapping-through-table)
/// subtable: high-byte subheaders, used for legacy CJK encodings.
#[derive(Clone)]
pub struct Cmap2<'a> {
    data: FontData<'a>,
}

impl Format<u16> for Cmap2<'_> {
    const FORMAT: u16 = 2;
}

/// A subheader of a format 2 subtable, selecting a slice of its glyph
/// index array.
#[derive(Clone, Copy, Debug)]
pub struct SubHeader {
    pub first_code: u16,
    pub entry_count: u16,
    pub id_delta: i16,
    pub id_range_offset: u16,
    /// the position of the `id_range_offset` field itself, relative to the
    /// subtable; the offset is measured from here
    id_range_offset_location: usize,
}

impl<'a> Cmap2<'a> {
    const SUB_HEADER_KEYS: usize = 6;
    const SUB_HEADERS: usize = 518;

    pub fn length(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    pub fn language(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }

    /// The subheader key for a high byte; keys are subheader index × 8.
    pub fn sub_header_key(&self, high_byte: u8) -> u16 {
        self.data
            .read_at(Self::SUB_HEADER_KEYS + high_byte as usize * 2)
            .unwrap_or_default()
    }

    /// Read the subheader at the given index.
    pub fn sub_header(&self, index: usize) -> Option<SubHeader> {
        let pos = Self::SUB_HEADERS + index * 8;
        Some(SubHeader {
            first_code: self.data.read_at(pos).ok()?,
            entry_count: self.data.read_at(pos + 2).ok()?,
            id_delta: self.data.read_at(pos + 4).ok()?,
            id_range_offset: self.data.read_at(pos + 6).ok()?,
            id_range_offset_location: pos + 6,
        })
    }

    /// Map a codepoint to a glyph identifier.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        if codepoint > 0xFFFF {
            return GlyphId::NOTDEF;
        }
        let high = (codepoint >> 8) as u8;
        let index = self.sub_header_key(high) as usize / 8;
        let low = if index == 0 {
            // subheader 0 maps single-byte codes; a two-byte code routed
            // here has no mapping
            if codepoint > 0xFF {
                return GlyphId::NOTDEF;
            }
            codepoint as u16
        } else {
            (codepoint & 0xFF) as u16
        };
        let Some(sub_header) = self.sub_header(index) else {
            return GlyphId::NOTDEF;
        };
        if low < sub_header.first_code
            || low >= sub_header.first_code.saturating_add(sub_header.entry_count)
        {
            return GlyphId::NOTDEF;
        }
        let pos = sub_header.id_range_offset_location
            + sub_header.id_range_offset as usize
            + 2 * (low - sub_header.first_code) as usize;
        let gid: u16 = self.data.read_at(pos).unwrap_or_default();
        if gid == 0 {
            return GlyphId::NOTDEF;
        }
        GlyphId::new((gid as i32 + sub_header.id_delta as i32).rem_euclid(65536) as u16)
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    pub fn iter(&self) -> Codepoints<Self> {
        Codepoints::new(self.clone())
    }
}

impl CodepointRanges for Cmap2<'_> {
    fn range(&self, index: usize) -> Option<Range<u64>> {
        // one range per high byte; empty subheaders produce empty ranges and
        // codes without a mapping are dropped by the gap-skipping driver
        if index > 0xFF {
            return None;
        }
        let sub_header = self.sub_header(self.sub_header_key(index as u8) as usize / 8)?;
        let start = ((index as u64) << 8) + sub_header.first_code as u64;
        Some(start..start + sub_header.entry_count as u64)
    }

    fn lookup(&self, codepoint: u32) -> GlyphId {
        self.glyph_id(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        // the fixed part: header plus the 256 subheader keys and subheader 0
        data.check_min_len(Self::SUB_HEADERS + 8)?;
        Ok(Cmap2 { data })
    }
}

/// A [format 4](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values)
/// subtable: segmented mapping of 16-bit codes, the workhorse for the BMP.
#[derive(Clone)]
pub struct Cmap4<'a> {
    data: FontData<'a>,
    seg_count: usize,
}

impl Format<u16> for Cmap4<'_> {
    const FORMAT: u16 = 4;
}

impl<'a> Cmap4<'a> {
    const HEADER_LEN: usize = 14;
    const END_CODES: usize = Self::HEADER_LEN;

    pub fn length(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    pub fn language(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }

    pub fn seg_count_x2(&self) -> u16 {
        (self.seg_count * 2) as u16
    }

    /// The number of segments.
    pub fn seg_count(&self) -> usize {
        self.seg_count
    }

    pub fn search_range(&self) -> u16 {
        self.data.read_at(8).unwrap_or_default()
    }

    pub fn entry_selector(&self) -> u16 {
        self.data.read_at(10).unwrap_or_default()
    }

    pub fn range_shift(&self) -> u16 {
        self.data.read_at(12).unwrap_or_default()
    }

    fn start_codes(&self) -> usize {
        // the reserved pad sits between the end and start code arrays
        Self::HEADER_LEN + self.seg_count * 2 + 2
    }

    fn id_deltas(&self) -> usize {
        self.start_codes() + self.seg_count * 2
    }

    fn id_range_offsets(&self) -> usize {
        self.id_deltas() + self.seg_count * 2
    }

    /// The last code of the given segment.
    pub fn end_code(&self, segment: usize) -> Option<u16> {
        (segment < self.seg_count)
            .then(|| self.data.read_at(Self::END_CODES + segment * 2).ok())
            .flatten()
    }

    /// The first code of the given segment.
    pub fn start_code(&self, segment: usize) -> Option<u16> {
        (segment < self.seg_count)
            .then(|| self.data.read_at(self.start_codes() + segment * 2).ok())
            .flatten()
    }

    /// The glyph delta applied to codes in the given segment.
    pub fn id_delta(&self, segment: usize) -> Option<i16> {
        (segment < self.seg_count)
            .then(|| self.data.read_at(self.id_deltas() + segment * 2).ok())
            .flatten()
    }

    /// The glyph-array indirection offset of the given segment.
    pub fn id_range_offset(&self, segment: usize) -> Option<u16> {
        (segment < self.seg_count)
            .then(|| self.data.read_at(self.id_range_offsets() + segment * 2).ok())
            .flatten()
    }

    /// The entry at `index` in the trailing glyph id array.
    pub fn glyph_id_array_entry(&self, index: usize) -> Option<u16> {
        let pos = self.id_range_offsets() + self.seg_count * 2 + index * 2;
        (pos + 2 <= self.length() as usize)
            .then(|| self.data.read_at(pos).ok())
            .flatten()
    }

    /// Map a codepoint to a glyph identifier.
    ///
    /// An `id_range_offset` indirection landing outside the subtable is
    /// treated as unmapped; [`map_codepoint_strict`](Self::map_codepoint_strict)
    /// reports it instead.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        self.glyph_id_impl(codepoint).unwrap_or(GlyphId::NOTDEF)
    }

    /// Map a codepoint, failing on indirections outside the subtable.
    pub fn map_codepoint_strict(&self, codepoint: u32) -> Result<GlyphId, ReadError> {
        self.glyph_id_impl(codepoint).map_err(|_| {
            ReadError::MalformedData("cmap4 id_range_offset points outside the subtable")
        })
    }

    fn glyph_id_impl(&self, codepoint: u32) -> Result<GlyphId, ReadError> {
        if codepoint > 0xFFFF {
            return Ok(GlyphId::NOTDEF);
        }
        let codepoint = codepoint as u16;
        let segment = match self.data.search_u16(
            self.start_codes(),
            2,
            Self::END_CODES,
            2,
            self.seg_count,
            codepoint,
        )? {
            Some(segment) => segment,
            None => return Ok(GlyphId::NOTDEF),
        };
        self.retrieve_glyph_id(segment, codepoint)
    }

    /// The final phase of lookup, once a segment is known.
    fn retrieve_glyph_id(&self, segment: usize, codepoint: u16) -> Result<GlyphId, ReadError> {
        let start_code = self.start_code(segment).unwrap_or(0xFFFF);
        if codepoint < start_code {
            return Ok(GlyphId::NOTDEF);
        }
        let id_delta = self.id_delta(segment).unwrap_or_default() as i32;
        let id_range_offset = self.id_range_offset(segment).unwrap_or_default() as usize;
        if id_range_offset == 0 {
            return Ok(GlyphId::new(
                (codepoint as i32 + id_delta).rem_euclid(65536) as u16,
            ));
        }
        // the offset is measured from the position of the id_range_offset
        // field itself
        let pos = self.id_range_offsets()
            + segment * 2
            + id_range_offset
            + 2 * (codepoint - start_code) as usize;
        let gid: u16 = self.data.read_at(pos)?;
        if gid == 0 {
            return Ok(GlyphId::NOTDEF);
        }
        Ok(GlyphId::new((gid as i32 + id_delta).rem_euclid(65536) as u16))
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    pub fn iter(&self) -> Codepoints<Self> {
        Codepoints::new(self.clone())
    }
}

impl CodepointRanges for Cmap4<'_> {
    fn range(&self, index: usize) -> Option<Range<u64>> {
        let start = self.start_code(index)? as u64;
        let end = self.end_code(index)? as u64;
        Some(start..end + 1)
    }

    fn lookup(&self, codepoint: u32) -> GlyphId {
        self.glyph_id(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let seg_count_x2: u16 = data.read_at(6)?;
        let seg_count = seg_count_x2 as usize / 2;
        if seg_count == 0 {
            return Err(ReadError::MalformedData("cmap4 has no segments"));
        }
        // header + end codes + pad + start codes + deltas + range offsets
        data.check_min_len(Self::HEADER_LEN + 2 + seg_count * 8)?;
        let table = Cmap4 { data, seg_count };
        if table.end_code(seg_count - 1) != Some(0xFFFF) {
            return Err(ReadError::MalformedData(
                "cmap4 last segment must end at 0xFFFF",
            ));
        }
        Ok(table)
    }
}

/// A [format 6](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-6-trimmed-table-mapping)
/// subtable: a dense array over a single 16-bit range.
#[derive(Clone)]
pub struct Cmap6<'a> {
    data: FontData<'a>,
}

impl Format<u16> for Cmap6<'_> {
    const FORMAT: u16 = 6;
}

impl<'a> Cmap6<'a> {
    const GLYPH_ID_ARRAY: usize = 10;

    pub fn language(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }

    /// The first covered codepoint.
    pub fn first_code(&self) -> u16 {
        self.data.read_at(6).unwrap_or_default()
    }

    /// The number of covered codepoints.
    pub fn entry_count(&self) -> u16 {
        self.data.read_at(8).unwrap_or_default()
    }

    /// Map a codepoint to a glyph identifier.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        let first = self.first_code() as u32;
        if codepoint < first || codepoint >= first + self.entry_count() as u32 {
            return GlyphId::NOTDEF;
        }
        let index = (codepoint - first) as usize;
        let gid: u16 = self
            .data
            .read_at(Self::GLYPH_ID_ARRAY + index * 2)
            .unwrap_or_default();
        GlyphId::new(gid)
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    pub fn iter(&self) -> Codepoints<Self> {
        Codepoints::new(self.clone())
    }
}

impl CodepointRanges for Cmap6<'_> {
    fn range(&self, index: usize) -> Option<Range<u64>> {
        let start = self.first_code() as u64;
        (index == 0).then(|| start..start + self.entry_count() as u64)
    }

    fn lookup(&self, codepoint: u32) -> GlyphId {
        self.glyph_id(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap6<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let entry_count: u16 = data.read_at(8)?;
        data.check_min_len(Self::GLYPH_ID_ARRAY + entry_count as usize * 2)?;
        Ok(Cmap6 { data })
    }
}

/// A group record shared by the 32-bit formats 8, 12 and 13.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct SequentialMapGroup {
    start_char_code: BigEndian<u32>,
    end_char_code: BigEndian<u32>,
    start_glyph_id: BigEndian<u32>,
}

impl SequentialMapGroup {
    /// The first codepoint in the group, inclusive.
    pub fn start_char_code(&self) -> u32 {
        self.start_char_code.get()
    }

    /// The last codepoint in the group, inclusive.
    pub fn end_char_code(&self) -> u32 {
        self.end_char_code.get()
    }

    /// For formats 8 and 12 the glyph of `start_char_code`; for format 13
    /// the single glyph shared by the whole group.
    pub fn start_glyph_id(&self) -> u32 {
        self.start_glyph_id.get()
    }
}

impl FixedSize for SequentialMapGroup {
    const RAW_BYTE_LEN: usize = 12;
}

fn read_groups(
    data: FontData,
    count_offset: usize,
) -> Result<&[SequentialMapGroup], ReadError> {
    let num_groups: u32 = data.read_at(count_offset)?;
    let start = count_offset + 4;
    let end = start + num_groups as usize * SequentialMapGroup::RAW_BYTE_LEN;
    data.read_array(start..end)
}

/// A [format 8](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-8-mixed-16-bit-and-32-bit-coverage)
/// subtable: mixed 16/32-bit coverage.
///
/// No mainstream producer emits this format, so the implementation has only
/// been exercised against synthetic data.
#[derive(Clone)]
pub struct Cmap8<'a> {
    data: FontData<'a>,
    groups: &'a [SequentialMapGroup],
}

impl Format<u16> for Cmap8<'_> {
    const FORMAT: u16 = 8;
}

impl<'a> Cmap8<'a> {
    const IS_32: usize = 12;
    const NUM_GROUPS: usize = Self::IS_32 + 8192;

    pub fn language(&self) -> u32 {
        self.data.read_at(8).unwrap_or_default()
    }

    /// The packed bitmap marking the high-words that begin a 32-bit code.
    pub fn is_32(&self) -> &'a [u8] {
        self.data
            .slice(Self::IS_32..Self::NUM_GROUPS)
            .map(|data| data.as_bytes())
            .unwrap_or_default()
    }

    /// `true` if the 16-bit value `high` is the leading half of a 32-bit code.
    pub fn is_32_bit_start(&self, high: u16) -> bool {
        let byte: u8 = self
            .data
            .read_at(Self::IS_32 + high as usize / 8)
            .unwrap_or_default();
        byte & (0x80 >> (high % 8)) != 0
    }

    pub fn groups(&self) -> &'a [SequentialMapGroup] {
        self.groups
    }

    /// Map a codepoint to a glyph identifier.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        lookup_sequential(self.groups, codepoint)
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    pub fn iter(&self) -> Codepoints<Self> {
        Codepoints::new(self.clone())
    }
}

impl CodepointRanges for Cmap8<'_> {
    fn range(&self, index: usize) -> Option<Range<u64>> {
        group_range(self.groups, index)
    }

    fn lookup(&self, codepoint: u32) -> GlyphId {
        self.glyph_id(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap8<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let groups = read_groups(data, Self::NUM_GROUPS)?;
        Ok(Cmap8 { data, groups })
    }
}

/// A [format 10](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-10-trimmed-array)
/// subtable: a dense array over a single 32-bit range.
#[derive(Clone)]
pub struct Cmap10<'a> {
    data: FontData<'a>,
}

impl Format<u16> for Cmap10<'_> {
    const FORMAT: u16 = 10;
}

impl<'a> Cmap10<'a> {
    const GLYPHS: usize = 20;

    pub fn language(&self) -> u32 {
        self.data.read_at(8).unwrap_or_default()
    }

    /// The first covered codepoint.
    pub fn start_char_code(&self) -> u32 {
        self.data.read_at(12).unwrap_or_default()
    }

    /// The number of covered codepoints.
    pub fn num_chars(&self) -> u32 {
        self.data.read_at(16).unwrap_or_default()
    }

    /// Map a codepoint to a glyph identifier.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        let start = self.start_char_code();
        if codepoint < start || codepoint - start >= self.num_chars() {
            return GlyphId::NOTDEF;
        }
        let index = (codepoint - start) as usize;
        let gid: u16 = self
            .data
            .read_at(Self::GLYPHS + index * 2)
            .unwrap_or_default();
        GlyphId::new(gid)
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    pub fn iter(&self) -> Codepoints<Self> {
        Codepoints::new(self.clone())
    }
}

impl CodepointRanges for Cmap10<'_> {
    fn range(&self, index: usize) -> Option<Range<u64>> {
        let start = self.start_char_code() as u64;
        (index == 0).then(|| start..start + self.num_chars() as u64)
    }

    fn lookup(&self, codepoint: u32) -> GlyphId {
        self.glyph_id(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap10<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_chars: u32 = data.read_at(16)?;
        data.check_min_len(Self::GLYPHS + num_chars as usize * 2)?;
        Ok(Cmap10 { data })
    }
}

/// A [format 12](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage)
/// subtable: sequential groups of 32-bit codes.
#[derive(Clone)]
pub struct Cmap12<'a> {
    data: FontData<'a>,
    groups: &'a [SequentialMapGroup],
}

impl Format<u16> for Cmap12<'_> {
    const FORMAT: u16 = 12;
}

/// The offset of the group count in formats 12 and 13.
const GROUPED_NUM_GROUPS: usize = 12;

impl<'a> Cmap12<'a> {
    pub fn language(&self) -> u32 {
        self.data.read_at(8).unwrap_or_default()
    }

    pub fn groups(&self) -> &'a [SequentialMapGroup] {
        self.groups
    }

    /// Map a codepoint to a glyph identifier.
    ///
    /// Each group maps a run of consecutive codes to a run of consecutive
    /// glyphs starting at its `start_glyph_id`.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        lookup_sequential(self.groups, codepoint)
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    pub fn iter(&self) -> Codepoints<Self> {
        Codepoints::new(self.clone())
    }
}

impl CodepointRanges for Cmap12<'_> {
    fn range(&self, index: usize) -> Option<Range<u64>> {
        group_range(self.groups, index)
    }

    fn lookup(&self, codepoint: u32) -> GlyphId {
        self.glyph_id(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap12<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let groups = read_groups(data, GROUPED_NUM_GROUPS)?;
        Ok(Cmap12 { data, groups })
    }
}

/// A [format 13](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-13-many-to-one-range-mappings)
/// subtable: the format 12 group layout with a many-to-one mapping rule.
///
/// Every code in a group maps to the *same* glyph; this is the only
/// difference from format 12 and the parsing is shared.
#[derive(Clone)]
pub struct Cmap13<'a> {
    data: FontData<'a>,
    groups: &'a [SequentialMapGroup],
}

impl Format<u16> for Cmap13<'_> {
    const FORMAT: u16 = 13;
}

impl<'a> Cmap13<'a> {
    pub fn language(&self) -> u32 {
        self.data.read_at(8).unwrap_or_default()
    }

    pub fn groups(&self) -> &'a [SequentialMapGroup] {
        self.groups
    }

    /// Map a codepoint to a glyph identifier.
    pub fn glyph_id(&self, codepoint: u32) -> GlyphId {
        match find_group(self.groups, codepoint) {
            Some(group) => gid_from_u32(group.start_glyph_id()),
            None => GlyphId::NOTDEF,
        }
    }

    /// An iterator over the `(codepoint, glyph id)` pairs in this subtable.
    pub fn iter(&self) -> Codepoints<Self> {
        Codepoints::new(self.clone())
    }
}

impl CodepointRanges for Cmap13<'_> {
    fn range(&self, index: usize) -> Option<Range<u64>> {
        group_range(self.groups, index)
    }

    fn lookup(&self, codepoint: u32) -> GlyphId {
        self.glyph_id(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap13<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let groups = read_groups(data, GROUPED_NUM_GROUPS)?;
        Ok(Cmap13 { data, groups })
    }
}

fn find_group(groups: &[SequentialMapGroup], codepoint: u32) -> Option<&SequentialMapGroup> {
    groups
        .binary_search_by(|group| {
            if codepoint < group.start_char_code() {
                std::cmp::Ordering::Greater
            } else if codepoint > group.end_char_code() {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .ok()
        .and_then(|ix| groups.get(ix))
}

fn lookup_sequential(groups: &[SequentialMapGroup], codepoint: u32) -> GlyphId {
    match find_group(groups, codepoint) {
        Some(group) => gid_from_u32(
            group
                .start_glyph_id()
                .wrapping_add(codepoint.wrapping_sub(group.start_char_code())),
        ),
        None => GlyphId::NOTDEF,
    }
}

fn group_range(groups: &[SequentialMapGroup], index: usize) -> Option<Range<u64>> {
    let group = groups.get(index)?;
    // widen before the +1 so a group ending at u32::MAX doesn't wrap
    Some(group.start_char_code() as u64..group.end_char_code() as u64 + 1)
}

fn gid_from_u32(raw: u32) -> GlyphId {
    u16::try_from(raw).map(GlyphId::new).unwrap_or(GlyphId::NOTDEF)
}

/// Result of mapping a codepoint with a variation selector.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MapVariant {
    /// The variation selector should be ignored and the default mapping
    /// of the character should be used.
    UseDefault,
    /// The variant glyph mapped by a codepoint and associated variation
    /// selector.
    Variant(GlyphId),
}

/// A [format 14](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-14-unicode-variation-sequences)
/// subtable: Unicode variation sequences.
#[derive(Clone)]
pub struct Cmap14<'a> {
    data: FontData<'a>,
    var_selectors: &'a [VariationSelector],
}

impl Format<u16> for Cmap14<'_> {
    const FORMAT: u16 = 14;
}

impl<'a> Cmap14<'a> {
    const VAR_SELECTORS: usize = 10;

    /// The variation selector records, sorted by selector value.
    pub fn var_selectors(&self) -> &'a [VariationSelector] {
        self.var_selectors
    }

    /// Map a codepoint and variation selector.
    ///
    /// The lookup is two-level: find the selector record, then search its
    /// default ranges (meaning "use the cmap's own mapping") and its
    /// non-default mappings (a specific variant glyph).
    pub fn map_variant(
        &self,
        codepoint: impl Into<u32>,
        selector: impl Into<u32>,
    ) -> Option<MapVariant> {
        let codepoint = codepoint.into();
        let selector = selector.into();
        let record = self
            .var_selectors
            .binary_search_by(|rec| rec.var_selector().cmp(&selector))
            .ok()
            .and_then(|ix| self.var_selectors.get(ix))?;
        if let Some(Ok(default_uvs)) = record.default_uvs(self.data) {
            if default_uvs.contains(codepoint) {
                return Some(MapVariant::UseDefault);
            }
        }
        let non_default_uvs = record.non_default_uvs(self.data)?.ok()?;
        non_default_uvs
            .glyph_id(codepoint)
            .map(MapVariant::Variant)
    }

    /// An iterator over `(codepoint, selector, variant)` triples.
    pub fn iter(&self) -> Cmap14Iter<'a> {
        Cmap14Iter::new(self.clone())
    }
}

impl<'a> FontRead<'a> for Cmap14<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_records: u32 = data.read_at(6)?;
        let end = Self::VAR_SELECTORS + num_records as usize * VariationSelector::RAW_BYTE_LEN;
        let var_selectors = data.read_array(Self::VAR_SELECTORS..end)?;
        Ok(Cmap14 {
            data,
            var_selectors,
        })
    }
}

/// One variation selector record in a format 14 subtable.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct VariationSelector {
    var_selector: BigEndian<Uint24>,
    default_uvs_offset: BigEndian<u32>,
    non_default_uvs_offset: BigEndian<u32>,
}

impl VariationSelector {
    /// The variation selector codepoint.
    pub fn var_selector(&self) -> u32 {
        self.var_selector.get().to_u32()
    }

    /// The default-UVS table, if the record has one.
    ///
    /// `data` is the format 14 subtable data; offsets are relative to it.
    pub fn default_uvs<'a>(
        &self,
        data: FontData<'a>,
    ) -> Option<Result<DefaultUvs<'a>, ReadError>> {
        resolve_uvs(data, self.default_uvs_offset.get()).map(|data| data.and_then(DefaultUvs::read))
    }

    /// The non-default-UVS table, if the record has one.
    pub fn non_default_uvs<'a>(
        &self,
        data: FontData<'a>,
    ) -> Option<Result<NonDefaultUvs<'a>, ReadError>> {
        resolve_uvs(data, self.non_default_uvs_offset.get())
            .map(|data| data.and_then(NonDefaultUvs::read))
    }
}

impl FixedSize for VariationSelector {
    const RAW_BYTE_LEN: usize = 11;
}

fn resolve_uvs(data: FontData, offset: u32) -> Option<Result<FontData, ReadError>> {
    if offset == 0 {
        return None;
    }
    Some(data.split_off(offset as usize).ok_or(ReadError::OutOfBounds))
}

/// The "use the standard mapping" ranges of a variation selector record.
#[derive(Clone)]
pub struct DefaultUvs<'a> {
    ranges: &'a [UnicodeRange],
}

impl<'a> DefaultUvs<'a> {
    pub fn ranges(&self) -> &'a [UnicodeRange] {
        self.ranges
    }

    /// `true` if `codepoint` falls in any of the ranges.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.ranges
            .binary_search_by(|range| {
                let start = range.start_unicode_value();
                if codepoint < start {
                    std::cmp::Ordering::Greater
                } else if codepoint > start + range.additional_count() as u32 {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }
}

impl<'a> FontRead<'a> for DefaultUvs<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_ranges: u32 = data.read_at(0)?;
        let ranges = data.read_array(4..4 + num_ranges as usize * UnicodeRange::RAW_BYTE_LEN)?;
        Ok(DefaultUvs { ranges })
    }
}

/// A range of default-mapped codepoints: a start value and an extra count.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct UnicodeRange {
    start_unicode_value: BigEndian<Uint24>,
    additional_count: u8,
}

impl UnicodeRange {
    pub fn start_unicode_value(&self) -> u32 {
        self.start_unicode_value.get().to_u32()
    }

    /// The number of codepoints in the range after the first.
    pub fn additional_count(&self) -> u8 {
        self.additional_count
    }
}

impl FixedSize for UnicodeRange {
    const RAW_BYTE_LEN: usize = 4;
}

/// The explicit `codepoint → variant glyph` list of a selector record.
#[derive(Clone)]
pub struct NonDefaultUvs<'a> {
    mappings: &'a [UvsMapping],
}

impl<'a> NonDefaultUvs<'a> {
    pub fn mappings(&self) -> &'a [UvsMapping] {
        self.mappings
    }

    /// The variant glyph for `codepoint`, if it is enumerated.
    pub fn glyph_id(&self, codepoint: u32) -> Option<GlyphId> {
        self.mappings
            .binary_search_by(|mapping| mapping.unicode_value().cmp(&codepoint))
            .ok()
            .and_then(|ix| self.mappings.get(ix))
            .map(|mapping| GlyphId::new(mapping.glyph_id()))
    }
}

impl<'a> FontRead<'a> for NonDefaultUvs<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_mappings: u32 = data.read_at(0)?;
        let mappings = data.read_array(4..4 + num_mappings as usize * UvsMapping::RAW_BYTE_LEN)?;
        Ok(NonDefaultUvs { mappings })
    }
}

/// A single `codepoint → variant glyph` mapping.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct UvsMapping {
    unicode_value: BigEndian<Uint24>,
    glyph_id: BigEndian<u16>,
}

impl UvsMapping {
    pub fn unicode_value(&self) -> u32 {
        self.unicode_value.get().to_u32()
    }

    pub fn glyph_id(&self) -> u16 {
        self.glyph_id.get()
    }
}

impl FixedSize for UvsMapping {
    const RAW_BYTE_LEN: usize = 5;
}

/// Iterator over the `(codepoint, selector, variant)` triples of a
/// format 14 subtable.
#[derive(Clone)]
pub struct Cmap14Iter<'a> {
    subtable: Cmap14<'a>,
    cur_selector_ix: usize,
    default_uvs: Option<DefaultUvsIter<'a>>,
    non_default_uvs: Option<NonDefaultUvsIter<'a>>,
}

impl<'a> Cmap14Iter<'a> {
    fn new(subtable: Cmap14<'a>) -> Self {
        let mut iter = Self {
            subtable,
            cur_selector_ix: 0,
            default_uvs: None,
            non_default_uvs: None,
        };
        iter.load_selector();
        iter
    }

    fn load_selector(&mut self) {
        let data = self.subtable.data;
        let record = self.subtable.var_selectors.get(self.cur_selector_ix);
        self.default_uvs = record
            .and_then(|rec| rec.default_uvs(data))
            .and_then(Result::ok)
            .map(DefaultUvsIter::new);
        self.non_default_uvs = record
            .and_then(|rec| rec.non_default_uvs(data))
            .and_then(Result::ok)
            .map(NonDefaultUvsIter::new);
    }
}

impl Iterator for Cmap14Iter<'_> {
    type Item = (u32, u32, MapVariant);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = self.subtable.var_selectors.get(self.cur_selector_ix)?;
            let selector = record.var_selector();
            if let Some(default_uvs) = self.default_uvs.as_mut() {
                if let Some(codepoint) = default_uvs.next() {
                    return Some((codepoint, selector, MapVariant::UseDefault));
                }
            }
            if let Some(non_default_uvs) = self.non_default_uvs.as_mut() {
                if let Some((codepoint, variant)) = non_default_uvs.next() {
                    return Some((codepoint, selector, MapVariant::Variant(variant)));
                }
            }
            self.cur_selector_ix += 1;
            self.load_selector();
        }
    }
}

#[derive(Clone)]
struct DefaultUvsIter<'a> {
    ranges: std::slice::Iter<'a, UnicodeRange>,
    cur_range: Range<u64>,
}

impl<'a> DefaultUvsIter<'a> {
    fn new(uvs: DefaultUvs<'a>) -> Self {
        Self {
            ranges: uvs.ranges.iter(),
            cur_range: 0..0,
        }
    }
}

impl Iterator for DefaultUvsIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(codepoint) = self.cur_range.next() {
                return Some(codepoint as u32);
            }
            let range = self.ranges.next()?;
            let start = range.start_unicode_value() as u64;
            self.cur_range = start..start + range.additional_count() as u64 + 1;
        }
    }
}

#[derive(Clone)]
struct NonDefaultUvsIter<'a> {
    mappings: std::slice::Iter<'a, UvsMapping>,
}

impl<'a> NonDefaultUvsIter<'a> {
    fn new(uvs: NonDefaultUvs<'a>) -> Self {
        Self {
            mappings: uvs.mappings.iter(),
        }
    }
}

impl Iterator for NonDefaultUvsIter<'_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        let mapping = self.mappings.next()?;
        Some((mapping.unicode_value(), GlyphId::new(mapping.glyph_id())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    /// Three segments: an indirect one (via the glyph id array), a delta
    /// one, and the required 0xFFFF terminator.
    fn format_4_data() -> BeBuffer {
        // layout with 3 segments: end codes @14, start codes @22,
        // deltas @28, range offsets @34, glyph id array @40
        BeBuffer::new()
            .push(4u16) // format
            .push(46u16) // length
            .push(0u16) // language
            .push(6u16) // segCountX2
            .push(4u16) // searchRange
            .push(1u16) // entrySelector
            .push(2u16) // rangeShift
            .extend([0x22u16, 0x5A, 0xFFFF]) // end codes
            .push(0u16) // reservedPad
            .extend([0x20u16, 0x41, 0xFFFF]) // start codes
            .extend([0i16, -64, 1]) // id deltas
            .extend([6u16, 0, 0]) // id range offsets
            .extend([5u16, 0, 7]) // glyph id array
    }

    fn format_4(data: &BeBuffer) -> Cmap4 {
        Cmap4::read(data.font_data()).unwrap()
    }

    #[test]
    fn format_4_lookup() {
        let data = format_4_data();
        let cmap4 = format_4(&data);
        // indirect segment
        assert_eq!(cmap4.glyph_id(0x20), GlyphId::new(5));
        assert_eq!(cmap4.glyph_id(0x21), GlyphId::NOTDEF); // explicit zero
        assert_eq!(cmap4.glyph_id(0x22), GlyphId::new(7));
        // delta segment
        assert_eq!(cmap4.glyph_id(0x41), GlyphId::new(1));
        assert_eq!(cmap4.glyph_id(0x5A), GlyphId::new(26));
        // gaps and the terminator
        assert_eq!(cmap4.glyph_id(0x30), GlyphId::NOTDEF);
        assert_eq!(cmap4.glyph_id(0xFFFF), GlyphId::NOTDEF);
        assert_eq!(cmap4.glyph_id(0x1F600), GlyphId::NOTDEF);
    }

    /// The binary-search lookup must agree with a naive scan over segments.
    #[test]
    fn format_4_matches_linear_scan() {
        let data = format_4_data();
        let cmap4 = format_4(&data);
        for codepoint in 0u32..=0xFFFF {
            let mut expected = GlyphId::NOTDEF;
            for segment in 0..cmap4.seg_count() {
                if codepoint <= cmap4.end_code(segment).unwrap() as u32 {
                    expected = cmap4
                        .retrieve_glyph_id(segment, codepoint as u16)
                        .unwrap_or(GlyphId::NOTDEF);
                    break;
                }
            }
            assert_eq!(cmap4.glyph_id(codepoint), expected, "at {codepoint:#x}");
        }
    }

    #[test]
    fn format_4_rejects_missing_terminator() {
        let data = BeBuffer::new()
            .push(4u16)
            .push(24u16)
            .push(0u16)
            .push(2u16) // one segment
            .extend([2u16, 0, 1]) // search fields
            .push(0x41u16) // end code != 0xFFFF
            .push(0u16)
            .push(0x41u16)
            .push(0i16)
            .push(0u16);
        assert!(matches!(
            Cmap4::read(data.font_data()),
            Err(ReadError::MalformedData(_))
        ));
    }

    #[test]
    fn format_4_iter_skips_gaps() {
        let data = format_4_data();
        let cmap4 = format_4(&data);
        let pairs: Vec<_> = cmap4.iter().collect();
        // 0x21 maps to zero and 0xFFFF maps to zero via delta; both skipped
        assert_eq!(pairs.len(), 2 + 26);
        assert_eq!(pairs[0], (0x20, GlyphId::new(5)));
        assert_eq!(pairs[1], (0x22, GlyphId::new(7)));
        assert_eq!(pairs[2], (0x41, GlyphId::new(1)));
        assert_eq!(pairs.last(), Some(&(0x5A, GlyphId::new(26))));
    }

    #[test]
    fn format_0_direct_array() {
        let mut glyph_ids = [0u8; 256];
        glyph_ids[b'A' as usize] = 3;
        glyph_ids[b'B' as usize] = 4;
        let data = BeBuffer::new()
            .push(0u16)
            .push(262u16)
            .push(0u16)
            .extend(glyph_ids);
        let cmap0 = Cmap0::read(data.font_data()).unwrap();
        assert_eq!(cmap0.glyph_id(b'A' as u32), GlyphId::new(3));
        assert_eq!(cmap0.glyph_id(b'C' as u32), GlyphId::NOTDEF);
        assert_eq!(cmap0.glyph_id(0x100), GlyphId::NOTDEF);
        let pairs: Vec<_> = cmap0.iter().collect();
        assert_eq!(
            pairs,
            vec![(b'A' as u32, GlyphId::new(3)), (b'B' as u32, GlyphId::new(4))]
        );
    }

    #[test]
    fn format_2_subheaders() {
        // subheader 0 handles single bytes 0x41..=0x42; high byte 0x81
        // selects subheader 1 with lows 0x40..=0x41
        let mut keys = [0u16; 256];
        keys[0x81] = 8;
        let data = BeBuffer::new()
            .push(2u16) // format
            .push(542u16) // length
            .push(0u16) // language
            .extend(keys)
            // subheader 0 @518; its idRangeOffset field is at 524 and the
            // glyph array starts at 534
            .extend([0x41u16, 2, 0, 10])
            // subheader 1 @526; field at 532, target entries at 538
            .extend([0x40u16, 2, 0, 6])
            .extend([10u16, 11]) // glyphs for subheader 0
            .extend([20u16, 21]); // glyphs for subheader 1
        let cmap2 = Cmap2::read(data.font_data()).unwrap();
        assert_eq!(cmap2.glyph_id(0x41), GlyphId::new(10));
        assert_eq!(cmap2.glyph_id(0x42), GlyphId::new(11));
        assert_eq!(cmap2.glyph_id(0x40), GlyphId::NOTDEF);
        assert_eq!(cmap2.glyph_id(0x8140), GlyphId::new(20));
        assert_eq!(cmap2.glyph_id(0x8141), GlyphId::new(21));
        assert_eq!(cmap2.glyph_id(0x8142), GlyphId::NOTDEF);
        // a two-byte code whose high byte routes to subheader 0
        assert_eq!(cmap2.glyph_id(0x4141), GlyphId::NOTDEF);
        let pairs: Vec<_> = cmap2.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (0x41, GlyphId::new(10)),
                (0x42, GlyphId::new(11)),
                (0x8140, GlyphId::new(20)),
                (0x8141, GlyphId::new(21)),
            ]
        );
    }

    #[test]
    fn format_6_trimmed() {
        let data = BeBuffer::new()
            .push(6u16)
            .push(16u16) // length
            .push(0u16)
            .push(0x100u16) // first code
            .push(3u16) // entry count
            .extend([7u16, 0, 9]);
        let cmap6 = Cmap6::read(data.font_data()).unwrap();
        assert_eq!(cmap6.glyph_id(0xFF), GlyphId::NOTDEF);
        assert_eq!(cmap6.glyph_id(0x100), GlyphId::new(7));
        assert_eq!(cmap6.glyph_id(0x102), GlyphId::new(9));
        assert_eq!(cmap6.glyph_id(0x103), GlyphId::NOTDEF);
        let pairs: Vec<_> = cmap6.iter().collect();
        assert_eq!(pairs, vec![(0x100, GlyphId::new(7)), (0x102, GlyphId::new(9))]);
    }

    fn grouped_subtable(format: u16) -> BeBuffer {
        // one group: chars 0x10000..=0x10010, start glyph 100
        BeBuffer::new()
            .push(format)
            .push(0u16) // reserved
            .push(28u32) // length
            .push(0u32) // language
            .push(1u32) // num groups
            .push(0x10000u32)
            .push(0x10010u32)
            .push(100u32)
    }

    #[test]
    fn format_12_sequential_groups() {
        let data = grouped_subtable(12);
        let cmap12 = Cmap12::read(data.font_data()).unwrap();
        assert_eq!(cmap12.glyph_id(0x10000), GlyphId::new(100));
        assert_eq!(cmap12.glyph_id(0x10010), GlyphId::new(116));
        assert_eq!(cmap12.glyph_id(0xFFFF), GlyphId::NOTDEF);
        assert_eq!(cmap12.glyph_id(0x10011), GlyphId::NOTDEF);
    }

    /// Format 13 shares format 12's layout; only the mapping rule differs.
    #[test]
    fn format_13_constant_groups() {
        let data = grouped_subtable(13);
        let cmap13 = Cmap13::read(data.font_data()).unwrap();
        for codepoint in 0x10000u32..=0x10010 {
            assert_eq!(cmap13.glyph_id(codepoint), GlyphId::new(100));
        }
        assert_eq!(cmap13.glyph_id(0x10011), GlyphId::NOTDEF);
        let pairs: Vec<_> = cmap13.iter().collect();
        assert_eq!(pairs.len(), 17);
        assert!(pairs.iter().all(|(_, gid)| *gid == GlyphId::new(100)));
    }

    #[test]
    fn format_8_groups_with_bitmap() {
        let mut buf = BeBuffer::new()
            .push(8u16)
            .push(0u16)
            .push(8236u32) // length
            .push(0u32); // language
        let mut is_32 = [0u8; 8192];
        // mark 0x0001 as the leading word of 32-bit codes
        is_32[0] = 0x40;
        buf = buf
            .extend(is_32)
            .push(1u32)
            .push(0x10000u32)
            .push(0x10010u32)
            .push(100u32);
        let cmap8 = Cmap8::read(buf.font_data()).unwrap();
        assert!(cmap8.is_32_bit_start(1));
        assert!(!cmap8.is_32_bit_start(0));
        assert_eq!(cmap8.glyph_id(0x10003), GlyphId::new(103));
        assert_eq!(cmap8.glyph_id(0x20000), GlyphId::NOTDEF);
    }

    #[test]
    fn format_10_trimmed_array() {
        let data = BeBuffer::new()
            .push(10u16)
            .push(0u16)
            .push(24u32) // length
            .push(0u32)
            .push(0x10330u32) // start
            .push(2u32)
            .extend([40u16, 41]);
        let cmap10 = Cmap10::read(data.font_data()).unwrap();
        assert_eq!(cmap10.glyph_id(0x10330), GlyphId::new(40));
        assert_eq!(cmap10.glyph_id(0x10331), GlyphId::new(41));
        assert_eq!(cmap10.glyph_id(0x10332), GlyphId::NOTDEF);
    }

    fn format_14_data() -> BeBuffer {
        BeBuffer::new()
            .push(14u16) // format
            .push(38u32) // length
            .push(1u32) // num selector records
            // record @10: selector U+FE00, default uvs @21, non-default @29
            .push(Uint24::new(0xFE00))
            .push(21u32)
            .push(29u32)
            // default uvs: one range, 0x4E00 plus one additional
            .push(1u32)
            .push(Uint24::new(0x4E00))
            .push(1u8)
            // non-default uvs: 0x4E03 -> glyph 9
            .push(1u32)
            .push(Uint24::new(0x4E03))
            .push(9u16)
    }

    #[test]
    fn format_14_two_level_lookup() {
        let data = format_14_data();
        let cmap14 = Cmap14::read(data.font_data()).unwrap();
        assert_eq!(
            cmap14.map_variant(0x4E00u32, 0xFE00u32),
            Some(MapVariant::UseDefault)
        );
        assert_eq!(
            cmap14.map_variant(0x4E01u32, 0xFE00u32),
            Some(MapVariant::UseDefault)
        );
        assert_eq!(
            cmap14.map_variant(0x4E03u32, 0xFE00u32),
            Some(MapVariant::Variant(GlyphId::new(9)))
        );
        assert_eq!(cmap14.map_variant(0x4E05u32, 0xFE00u32), None);
        assert_eq!(cmap14.map_variant(0x4E00u32, 0xFE01u32), None);
    }

    #[test]
    fn format_14_iter() {
        let data = format_14_data();
        let cmap14 = Cmap14::read(data.font_data()).unwrap();
        let triples: Vec<_> = cmap14.iter().collect();
        assert_eq!(
            triples,
            vec![
                (0x4E00, 0xFE00, MapVariant::UseDefault),
                (0x4E01, 0xFE00, MapVariant::UseDefault),
                (0x4E03, 0xFE00, MapVariant::Variant(GlyphId::new(9))),
            ]
        );
    }

    #[test]
    fn full_table_dispatch() {
        let subtable = format_4_data();
        let mut buf = BeBuffer::new()
            .push(0u16) // version
            .push(1u16) // num tables
            .push(3u16) // windows
            .push(1u16) // unicode bmp
            .push(12u32); // subtable offset
        buf = buf.extend(subtable.as_slice().iter().copied());
        let cmap = Cmap::read(buf.font_data()).unwrap();
        assert_eq!(cmap.encoding_records().len(), 1);
        let subtable = cmap.encoding_records()[0].subtable(cmap.offset_data()).unwrap();
        assert_eq!(subtable.format(), 4);
        assert_eq!(cmap.map_codepoint('A'), Some(GlyphId::new(1)));
        assert_eq!(cmap.map_codepoint('0'), None);
    }

    #[test]
    fn unknown_format_is_invalid() {
        let data = BeBuffer::new().push(5u16).push(0u16);
        assert!(matches!(
            CmapSubtable::read(data.font_data()),
            Err(ReadError::InvalidFormat(5))
        ));
    }
}
