//! the [cmap] table
//!
//! [cmap]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap

use read_sfnt::tables::cmap::{Cmap12 as ReadCmap12, Cmap4 as ReadCmap4};
use read_sfnt::{FontData, TopLevelTable};
use types::{FixedSize, GlyphId, Tag};

use crate::from_obj::{FromObjRef, FromTableRef};
use crate::util::SearchRange;
use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

// https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#windows-platform-platform-id--3
const WINDOWS_BMP_ENCODING: u16 = 1;
const WINDOWS_FULL_REPERTOIRE_ENCODING: u16 = 10;

// https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#unicode-platform-platform-id--0
const UNICODE_BMP_ENCODING: u16 = 3;
const UNICODE_FULL_REPERTOIRE_ENCODING: u16 = 4;

const ENCODING_RECORD_LEN: usize = 8;

/// The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cmap {
    pub encoding_records: Vec<EncodingRecord>,
}

/// The platform id of an encoding record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u16)]
pub enum PlatformId {
    Unicode = 0,
    Macintosh = 1,
    Iso = 2,
    Windows = 3,
    Custom = 4,
}

/// One encoding record: a platform/encoding pair and its subtable.
///
/// Identical subtables referenced from multiple records are written once
/// and share bytes in the output.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodingRecord {
    pub platform_id: PlatformId,
    pub encoding_id: u16,
    pub subtable: CmapSubtable,
}

impl EncodingRecord {
    pub fn new(platform_id: PlatformId, encoding_id: u16, subtable: CmapSubtable) -> Self {
        EncodingRecord {
            platform_id,
            encoding_id,
            subtable,
        }
    }
}

/// A writable cmap subtable.
///
/// Only the formats this crate compiles are represented: format 4 for the
/// basic multilingual plane and format 12 for the full Unicode repertoire.
/// Fonts carrying other formats round-trip them as pristine bytes at the
/// font level.
#[derive(Clone, Debug, PartialEq)]
pub enum CmapSubtable {
    Format4(Cmap4),
    Format12(Cmap12),
}

impl FontWrite for CmapSubtable {
    fn write_into(&self, writer: &mut TableWriter) {
        match self {
            Self::Format4(table) => table.write_into(writer),
            Self::Format12(table) => table.write_into(writer),
        }
    }
}

impl Validate for CmapSubtable {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        match self {
            Self::Format4(table) => table.validate_impl(ctx),
            Self::Format12(table) => table.validate_impl(ctx),
        }
    }
}

fn size_of_cmap4(seg_count: u16, gid_count: u16) -> u16 {
    8 * 2  // 8 uint16's
    + 2 * seg_count * 4  // 4 parallel arrays of len seg_count, 2 bytes per entry
    + 2 * gid_count // 2 bytes per gid in glyph_id_array
}

/// A [format 4](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values)
/// subtable: segment mapping to delta values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cmap4 {
    pub language: u16,
    pub end_code: Vec<u16>,
    pub start_code: Vec<u16>,
    pub id_delta: Vec<i16>,
    pub id_range_offsets: Vec<u16>,
    pub glyph_id_array: Vec<u16>,
}

impl Cmap4 {
    fn seg_count(&self) -> u16 {
        self.start_code.len() as u16
    }
}

impl FontWrite for Cmap4 {
    fn write_into(&self, writer: &mut TableWriter) {
        let seg_count = self.seg_count();
        let computed = SearchRange::compute(seg_count as usize, u16::RAW_BYTE_LEN);
        4u16.write_into(writer); // format
        size_of_cmap4(seg_count, self.glyph_id_array.len() as u16).write_into(writer);
        self.language.write_into(writer);
        (seg_count * 2).write_into(writer);
        computed.search_range.write_into(writer);
        computed.entry_selector.write_into(writer);
        computed.range_shift.write_into(writer);
        self.end_code.write_into(writer);
        0u16.write_into(writer); // reservedPad
        self.start_code.write_into(writer);
        self.id_delta.write_into(writer);
        self.id_range_offsets.write_into(writer);
        self.glyph_id_array.write_into(writer);
    }
}

impl Validate for Cmap4 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Cmap4", |ctx| {
            ctx.in_field("start_code", |ctx| {
                ctx.array_too_long(self.start_code.len());
                if self.start_code.len() != self.end_code.len()
                    || self.start_code.len() != self.id_delta.len()
                    || self.start_code.len() != self.id_range_offsets.len()
                {
                    ctx.report("the four segment arrays must have equal lengths");
                }
                if self.end_code.last() != Some(&0xFFFF) {
                    ctx.report("the last segment must end at 0xFFFF");
                }
            });
        })
    }
}

/// A group of a format 12 subtable: consecutive codes mapped to
/// consecutive glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequentialMapGroup {
    pub start_char_code: u32,
    pub end_char_code: u32,
    pub start_glyph_id: u32,
}

fn size_of_cmap12(num_groups: u32) -> u32 {
    2 * 2 + 3 * 4  // 2 uint16's and 3 uint32's
    + num_groups * 3 * 4 // 3 uint32's per group
}

/// A [format 12](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage)
/// subtable: segmented coverage of the full Unicode repertoire.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cmap12 {
    pub language: u32,
    pub groups: Vec<SequentialMapGroup>,
}

impl FontWrite for Cmap12 {
    fn write_into(&self, writer: &mut TableWriter) {
        12u16.write_into(writer); // format
        0u16.write_into(writer); // reserved
        size_of_cmap12(self.groups.len() as u32).write_into(writer);
        self.language.write_into(writer);
        (self.groups.len() as u32).write_into(writer);
        for group in &self.groups {
            group.start_char_code.write_into(writer);
            group.end_char_code.write_into(writer);
            group.start_glyph_id.write_into(writer);
        }
    }
}

impl Validate for Cmap12 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Cmap12", |ctx| {
            ctx.in_field("groups", |ctx| {
                if self
                    .groups
                    .windows(2)
                    .any(|pair| pair[0].end_char_code >= pair[1].start_char_code)
                {
                    ctx.report("groups must be sorted and non-overlapping");
                }
            })
        })
    }
}

impl CmapSubtable {
    /// Create a new format 4 subtable from a list of `(char, GlyphId)` pairs.
    ///
    /// The pairs are expected to be sorted by codepoint. Characters beyond
    /// the BMP are ignored; if all characters are beyond the BMP, `None` is
    /// returned.
    fn create_format_4(mappings: &[(char, GlyphId)]) -> Option<Self> {
        let mut end_code = Vec::new();
        let mut start_code = Vec::new();
        let mut id_delta = Vec::new();

        let mut prev = (u16::MAX - 1, u16::MAX - 1);
        for (codepoint, gid) in mappings {
            if *codepoint > '\u{FFFF}' {
                // sorted input, so the rest is beyond the BMP too
                break;
            }
            let codepoint = *codepoint as u16;
            let gid = gid.to_u16();
            let next_in_run = (prev.0.wrapping_add(1), prev.1.wrapping_add(1));
            let current = (codepoint, gid);
            // codepoint and glyph both need to be consecutive to extend a run
            if current != next_in_run {
                start_code.push(codepoint);
                end_code.push(codepoint);
                // the delta is stored modulo 65536
                id_delta.push((gid as i32 - codepoint as i32).rem_euclid(0x10000) as u16 as i16);
            } else {
                *end_code.last_mut().unwrap() = codepoint;
            }
            prev = current;
        }

        if start_code.is_empty() {
            return None;
        }

        // close out with the required terminator
        start_code.push(0xFFFF);
        end_code.push(0xFFFF);
        id_delta.push(1);

        let id_range_offsets = vec![0; id_delta.len()];
        Some(CmapSubtable::Format4(Cmap4 {
            // language is zero for all subtables on non-Macintosh platforms
            language: 0,
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            // all our id_range_offsets are zero, so no glyph id array
            glyph_id_array: Vec::new(),
        }))
    }

    /// Create a new format 12 subtable from a list of `(char, GlyphId)` pairs.
    ///
    /// The pairs are expected to be sorted by codepoint.
    fn create_format_12(mappings: &[(char, GlyphId)]) -> Self {
        let mut groups: Vec<SequentialMapGroup> = Vec::new();
        for (codepoint, gid) in mappings {
            let codepoint = *codepoint as u32;
            let gid = gid.to_u32();
            match groups.last_mut() {
                Some(group)
                    if codepoint == group.end_char_code + 1
                        && gid
                            == group.start_glyph_id
                                + (codepoint - group.start_char_code) =>
                {
                    group.end_char_code = codepoint;
                }
                _ => groups.push(SequentialMapGroup {
                    start_char_code: codepoint,
                    end_char_code: codepoint,
                    start_glyph_id: gid,
                }),
            }
        }
        CmapSubtable::Format12(Cmap12 { language: 0, groups })
    }
}

/// A conflicting cmap definition: one char mapped to two distinct glyphs.
///
/// If there are multiple conflicting mappings, one is chosen arbitrarily.
/// `gid1` is less than `gid2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmapConflict {
    ch: char,
    gid1: GlyphId,
    gid2: GlyphId,
}

impl std::fmt::Display for CmapConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ch32 = self.ch as u32;
        write!(
            f,
            "cannot map {:?} (U+{ch32:04X}) to two different glyph ids: {} and {}",
            self.ch, self.gid1, self.gid2
        )
    }
}

impl std::error::Error for CmapConflict {}

impl Cmap {
    /// Generate a cmap that is expected to work in most modern environments.
    ///
    /// This emits format 4 and format 12 subtables, respectively for the
    /// basic multilingual plane and the full repertoire, under both the
    /// Unicode and Windows platforms; the format 12 pair is only present
    /// when a supplementary-plane character is mapped.
    ///
    /// Also see <https://learn.microsoft.com/en-us/typography/opentype/spec/recom#cmap-table>
    pub fn from_mappings(
        mappings: impl IntoIterator<Item = (char, GlyphId)>,
    ) -> Result<Cmap, CmapConflict> {
        let mut mappings: Vec<_> = mappings.into_iter().collect();
        mappings.sort();
        mappings.dedup();
        if let Some((ch, gid1, gid2)) =
            mappings
                .iter()
                .zip(mappings.iter().skip(1))
                .find_map(|((c1, g1), (c2, g2))| {
                    (c1 == c2 && g1 != g2).then(|| (*c1, *g1.min(g2), *g1.max(g2)))
                })
        {
            return Err(CmapConflict { ch, gid1, gid2 });
        }

        let mut uni_records = Vec::new(); // platform 0
        let mut win_records = Vec::new(); // platform 3

        // characters in the basic multilingual plane go in a format 4
        // subtable, shared between the Unicode and Windows platforms
        if let Some(bmp_subtable) = CmapSubtable::create_format_4(&mappings) {
            uni_records.push(EncodingRecord::new(
                PlatformId::Unicode,
                UNICODE_BMP_ENCODING,
                bmp_subtable.clone(),
            ));
            win_records.push(EncodingRecord::new(
                PlatformId::Windows,
                WINDOWS_BMP_ENCODING,
                bmp_subtable,
            ));
        }

        // supplementary-plane characters additionally need format 12,
        // which covers the whole repertoire
        if mappings.iter().any(|(cp, _)| *cp > '\u{FFFF}') {
            let full_subtable = CmapSubtable::create_format_12(&mappings);
            uni_records.push(EncodingRecord::new(
                PlatformId::Unicode,
                UNICODE_FULL_REPERTOIRE_ENCODING,
                full_subtable.clone(),
            ));
            win_records.push(EncodingRecord::new(
                PlatformId::Windows,
                WINDOWS_FULL_REPERTOIRE_ENCODING,
                full_subtable,
            ));
        }

        // records are required to be ordered by (platform id, encoding id)
        Ok(Cmap {
            encoding_records: uni_records.into_iter().chain(win_records).collect(),
        })
    }
}

impl TopLevelTable for Cmap {
    const TAG: Tag = Tag::new(b"cmap");
}

impl FontWrite for Cmap {
    fn write_into(&self, writer: &mut TableWriter) {
        0u16.write_into(writer); // version
        (self.encoding_records.len() as u16).write_into(writer);
        // serialize each distinct subtable once; identical subtables are
        // byte-shared between their records
        let mut subtables: Vec<(&CmapSubtable, Vec<u8>)> = Vec::new();
        let mut record_subtable_ix = Vec::with_capacity(self.encoding_records.len());
        for record in &self.encoding_records {
            let existing = subtables
                .iter()
                .position(|(subtable, _)| *subtable == &record.subtable);
            let ix = existing.unwrap_or_else(|| {
                let mut subtable_writer = TableWriter::default();
                record.subtable.write_into(&mut subtable_writer);
                subtables.push((&record.subtable, subtable_writer.into_data()));
                subtables.len() - 1
            });
            record_subtable_ix.push(ix);
        }
        let header_len = 4 + self.encoding_records.len() * ENCODING_RECORD_LEN;
        let mut offsets = Vec::with_capacity(subtables.len());
        let mut position = header_len as u32;
        for (_, bytes) in &subtables {
            offsets.push(position);
            position += bytes.len() as u32;
        }
        for (record, subtable_ix) in self.encoding_records.iter().zip(&record_subtable_ix) {
            (record.platform_id as u16).write_into(writer);
            record.encoding_id.write_into(writer);
            offsets[*subtable_ix].write_into(writer);
        }
        for (_, bytes) in &subtables {
            writer.write_slice(bytes);
        }
    }
}

impl Validate for Cmap {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Cmap", |ctx| {
            ctx.in_field("encoding_records", |ctx| {
                ctx.array_too_long(self.encoding_records.len());
                let mut keys: Vec<_> = self
                    .encoding_records
                    .iter()
                    .map(|record| (record.platform_id, record.encoding_id))
                    .collect();
                let sorted = keys.windows(2).all(|pair| pair[0] <= pair[1]);
                keys.dedup();
                if !sorted || keys.len() != self.encoding_records.len() {
                    ctx.report("records must be sorted by (platform, encoding), without duplicates");
                }
                for record in &self.encoding_records {
                    record.subtable.validate_impl(ctx);
                }
            })
        })
    }
}

impl FromObjRef<ReadCmap4<'_>> for Cmap4 {
    fn from_obj_ref(obj: &ReadCmap4, _data: FontData) -> Self {
        let seg_count = obj.seg_count();
        let mut table = Cmap4 {
            language: obj.language(),
            ..Default::default()
        };
        for segment in 0..seg_count {
            table.end_code.push(obj.end_code(segment).unwrap_or_default());
            table
                .start_code
                .push(obj.start_code(segment).unwrap_or_default());
            table.id_delta.push(obj.id_delta(segment).unwrap_or_default());
            table
                .id_range_offsets
                .push(obj.id_range_offset(segment).unwrap_or_default());
        }
        // everything between the segment arrays and the declared length is
        // the glyph id array
        let array_len = (obj.length() as usize)
            .saturating_sub(16 + seg_count * 8)
            / 2;
        for index in 0..array_len {
            table
                .glyph_id_array
                .push(obj.glyph_id_array_entry(index).unwrap_or_default());
        }
        table
    }
}

impl FromTableRef<ReadCmap4<'_>> for Cmap4 {}

impl FromObjRef<ReadCmap12<'_>> for Cmap12 {
    fn from_obj_ref(obj: &ReadCmap12, _data: FontData) -> Self {
        Cmap12 {
            language: obj.language(),
            groups: obj
                .groups()
                .iter()
                .map(|group| SequentialMapGroup {
                    start_char_code: group.start_char_code(),
                    end_char_code: group.end_char_code(),
                    start_glyph_id: group.start_glyph_id(),
                })
                .collect(),
        }
    }
}

impl FromTableRef<ReadCmap12<'_>> for Cmap12 {}

#[cfg(test)]
mod tests {
    use read_sfnt::tables::cmap::{Cmap as ReadCmap, CmapSubtable as ReadSubtable};
    use read_sfnt::FontRead;

    use super::*;
    use crate::dump_table;
    use crate::from_obj::ToOwnedTable;

    fn read_back(bytes: &[u8]) -> ReadCmap {
        ReadCmap::read(FontData::new(bytes)).unwrap()
    }

    #[test]
    fn bmp_mappings_make_format_4() {
        let cmap = Cmap::from_mappings([
            ('A', GlyphId::new(1)),
            ('B', GlyphId::new(2)),
            ('Z', GlyphId::new(5)),
        ])
        .unwrap();
        // one subtable under each of the two platforms
        assert_eq!(cmap.encoding_records.len(), 2);
        assert_eq!(cmap.encoding_records[0].platform_id, PlatformId::Unicode);
        assert_eq!(cmap.encoding_records[1].platform_id, PlatformId::Windows);

        let bytes = dump_table(&cmap).unwrap();
        let view = read_back(&bytes);
        assert_eq!(view.map_codepoint('A'), Some(GlyphId::new(1)));
        assert_eq!(view.map_codepoint('B'), Some(GlyphId::new(2)));
        assert_eq!(view.map_codepoint('Z'), Some(GlyphId::new(5)));
        assert_eq!(view.map_codepoint('C'), None);
        assert_eq!(view.map_codepoint(0xFFFFu32), None);
    }

    #[test]
    fn records_share_identical_subtables() {
        let cmap = Cmap::from_mappings([('A', GlyphId::new(1))]).unwrap();
        let bytes = dump_table(&cmap).unwrap();
        let view = read_back(&bytes);
        let offsets: Vec<_> = view
            .encoding_records()
            .iter()
            .map(|record| record.subtable_offset())
            .collect();
        assert_eq!(offsets.len(), 2);
        assert_eq!(offsets[0], offsets[1]);
    }

    #[test]
    fn supplementary_chars_add_format_12() {
        let cmap = Cmap::from_mappings([
            ('A', GlyphId::new(1)),
            ('\u{10330}', GlyphId::new(7)),
            ('\u{10331}', GlyphId::new(8)),
        ])
        .unwrap();
        assert_eq!(cmap.encoding_records.len(), 4);
        let bytes = dump_table(&cmap).unwrap();
        let view = read_back(&bytes);
        assert_eq!(view.map_codepoint('\u{10330}'), Some(GlyphId::new(7)));
        assert_eq!(view.map_codepoint('\u{10331}'), Some(GlyphId::new(8)));
        assert_eq!(view.map_codepoint('A'), Some(GlyphId::new(1)));

        // the format 12 subtable sees consecutive codes as one group
        let record = &view.encoding_records()[1];
        let ReadSubtable::Format12(format12) = record.subtable(view.offset_data()).unwrap()
        else {
            panic!("expected format 12");
        };
        assert_eq!(format12.groups().len(), 2);
    }

    #[test]
    fn conflicting_mappings_are_rejected() {
        let err =
            Cmap::from_mappings([('A', GlyphId::new(1)), ('A', GlyphId::new(2))]).unwrap_err();
        assert_eq!(
            err,
            CmapConflict {
                ch: 'A',
                gid1: GlyphId::new(1),
                gid2: GlyphId::new(2),
            }
        );
    }

    #[test]
    fn format_4_materializes_from_bytes() {
        let cmap = Cmap::from_mappings([('a', GlyphId::new(4)), ('b', GlyphId::new(5))]).unwrap();
        let bytes = dump_table(&cmap).unwrap();
        let view = read_back(&bytes);
        let ReadSubtable::Format4(format4) = view.encoding_records()[0]
            .subtable(view.offset_data())
            .unwrap()
        else {
            panic!("expected format 4");
        };
        let owned: Cmap4 = format4.to_owned_table();
        let CmapSubtable::Format4(original) = &cmap.encoding_records[0].subtable else {
            panic!();
        };
        assert_eq!(&owned, original);
        // and the round trip reproduces the exact bytes
        assert_eq!(
            dump_table(&owned).unwrap(),
            dump_table(original).unwrap()
        );
    }
}
