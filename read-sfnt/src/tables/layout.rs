//! Record structures shared by the [OpenType layout][layout] tables.
//!
//! Only the structural skeleton is provided: scripts, features and lookups
//! can be enumerated and their subtable offsets resolved, but no lookup
//! application logic lives here.
//!
//! [layout]: https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2

use types::{BigEndian, FixedSize, GlyphId, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// A list of tagged scripts.
#[derive(Clone)]
pub struct ScriptList<'a> {
    data: FontData<'a>,
    records: &'a [TagOffsetRecord],
}

/// A list of tagged features.
#[derive(Clone)]
pub struct FeatureList<'a> {
    data: FontData<'a>,
    records: &'a [TagOffsetRecord],
}

/// A `{tag, offset}` record used by the script and feature lists.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct TagOffsetRecord {
    tag: BigEndian<Tag>,
    offset: BigEndian<u16>,
}

impl TagOffsetRecord {
    pub fn tag(&self) -> Tag {
        self.tag.get()
    }

    /// Offset from the start of the enclosing list.
    pub fn offset(&self) -> u16 {
        self.offset.get()
    }
}

impl FixedSize for TagOffsetRecord {
    const RAW_BYTE_LEN: usize = 6;
}

fn read_tag_offset_list(data: FontData) -> Result<&[TagOffsetRecord], ReadError> {
    let count: u16 = data.read_at(0)?;
    data.read_array(2..2 + count as usize * TagOffsetRecord::RAW_BYTE_LEN)
}

impl<'a> ScriptList<'a> {
    /// The script records, sorted by tag.
    pub fn records(&self) -> &'a [TagOffsetRecord] {
        self.records
    }

    /// Resolve the script with the given tag.
    pub fn script(&self, tag: Tag) -> Option<Result<Script<'a>, ReadError>> {
        let record = self
            .records
            .binary_search_by(|rec| rec.tag().cmp(&tag))
            .ok()
            .and_then(|ix| self.records.get(ix))?;
        Some(
            self.data
                .split_off(record.offset() as usize)
                .ok_or(ReadError::OutOfBounds)
                .and_then(Script::read),
        )
    }
}

impl<'a> FontRead<'a> for ScriptList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let records = read_tag_offset_list(data)?;
        Ok(ScriptList { data, records })
    }
}

impl<'a> FeatureList<'a> {
    /// The feature records, in feature-index order.
    pub fn records(&self) -> &'a [TagOffsetRecord] {
        self.records
    }

    /// Resolve the feature at the given index.
    pub fn feature(&self, index: u16) -> Option<Result<Feature<'a>, ReadError>> {
        let record = self.records.get(index as usize)?;
        Some(
            self.data
                .split_off(record.offset() as usize)
                .ok_or(ReadError::OutOfBounds)
                .and_then(Feature::read),
        )
    }
}

impl<'a> FontRead<'a> for FeatureList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let records = read_tag_offset_list(data)?;
        Ok(FeatureList { data, records })
    }
}

/// A script: a default language system plus tagged alternates.
#[derive(Clone)]
pub struct Script<'a> {
    data: FontData<'a>,
    records: &'a [TagOffsetRecord],
}

impl<'a> Script<'a> {
    /// The language-system records, sorted by tag.
    pub fn lang_sys_records(&self) -> &'a [TagOffsetRecord] {
        self.records
    }

    /// The default language system, if the script declares one.
    pub fn default_lang_sys(&self) -> Option<Result<LangSys<'a>, ReadError>> {
        let offset: u16 = self.data.read_at(0).ok()?;
        if offset == 0 {
            return None;
        }
        Some(
            self.data
                .split_off(offset as usize)
                .ok_or(ReadError::OutOfBounds)
                .and_then(LangSys::read),
        )
    }
}

impl<'a> FontRead<'a> for Script<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let count: u16 = data.read_at(2)?;
        let records = data.read_array(4..4 + count as usize * TagOffsetRecord::RAW_BYTE_LEN)?;
        Ok(Script { data, records })
    }
}

/// A language system: the feature indices active for one language.
#[derive(Clone)]
pub struct LangSys<'a> {
    data: FontData<'a>,
    feature_indices: &'a [BigEndian<u16>],
}

impl<'a> LangSys<'a> {
    /// The feature required by this language system, if any.
    pub fn required_feature_index(&self) -> Option<u16> {
        let index: u16 = self.data.read_at(2).unwrap_or(0xFFFF);
        (index != 0xFFFF).then_some(index)
    }

    /// Indices into the feature list.
    pub fn feature_indices(&self) -> &'a [BigEndian<u16>] {
        self.feature_indices
    }
}

impl<'a> FontRead<'a> for LangSys<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let count: u16 = data.read_at(4)?;
        let feature_indices = data.read_array(6..6 + count as usize * 2)?;
        Ok(LangSys {
            data,
            feature_indices,
        })
    }
}

/// A feature: a set of lookup indices.
#[derive(Clone)]
pub struct Feature<'a> {
    data: FontData<'a>,
    lookup_list_indices: &'a [BigEndian<u16>],
}

impl<'a> Feature<'a> {
    /// Offset to the feature's parameter block, zero if absent.
    pub fn feature_params_offset(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// Indices into the lookup list.
    pub fn lookup_list_indices(&self) -> &'a [BigEndian<u16>] {
        self.lookup_list_indices
    }
}

impl<'a> FontRead<'a> for Feature<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let count: u16 = data.read_at(2)?;
        let lookup_list_indices = data.read_array(4..4 + count as usize * 2)?;
        Ok(Feature {
            data,
            lookup_list_indices,
        })
    }
}

/// A list of lookups.
#[derive(Clone)]
pub struct LookupList<'a> {
    data: FontData<'a>,
    lookup_offsets: &'a [BigEndian<u16>],
}

impl<'a> LookupList<'a> {
    /// The number of lookups.
    pub fn lookup_count(&self) -> u16 {
        self.lookup_offsets.len() as u16
    }

    /// Resolve the lookup at the given index.
    pub fn lookup(&self, index: u16) -> Option<Result<Lookup<'a>, ReadError>> {
        let offset = self.lookup_offsets.get(index as usize)?.get();
        Some(
            self.data
                .split_off(offset as usize)
                .ok_or(ReadError::OutOfBounds)
                .and_then(Lookup::read),
        )
    }
}

impl<'a> FontRead<'a> for LookupList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let count: u16 = data.read_at(0)?;
        let lookup_offsets = data.read_array(2..2 + count as usize * 2)?;
        Ok(LookupList {
            data,
            lookup_offsets,
        })
    }
}

/// A lookup: a typed set of subtables.
///
/// Subtable contents are table-specific (GSUB or GPOS) and out of scope;
/// their raw data can be resolved for inspection.
#[derive(Clone)]
pub struct Lookup<'a> {
    data: FontData<'a>,
    subtable_offsets: &'a [BigEndian<u16>],
}

impl<'a> Lookup<'a> {
    pub fn lookup_type(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    pub fn lookup_flag(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    /// The number of subtables.
    pub fn subtable_count(&self) -> u16 {
        self.subtable_offsets.len() as u16
    }

    /// The raw data of the subtable at the given index.
    pub fn subtable_data(&self, index: u16) -> Option<FontData<'a>> {
        let offset = self.subtable_offsets.get(index as usize)?.get();
        self.data.split_off(offset as usize)
    }

    /// The mark filtering set, present when bit 0x0010 of the flag is set.
    pub fn mark_filtering_set(&self) -> Option<u16> {
        const USE_MARK_FILTERING_SET: u16 = 0x0010;
        if self.lookup_flag() & USE_MARK_FILTERING_SET == 0 {
            return None;
        }
        self.data
            .read_at(6 + self.subtable_offsets.len() * 2)
            .ok()
    }
}

impl<'a> FontRead<'a> for Lookup<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let count: u16 = data.read_at(4)?;
        let subtable_offsets = data.read_array(6..6 + count as usize * 2)?;
        Ok(Lookup {
            data,
            subtable_offsets,
        })
    }
}

/// A [coverage table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table),
/// mapping glyphs to their coverage index.
#[derive(Clone)]
pub enum CoverageTable<'a> {
    /// A sorted list of covered glyphs.
    Format1(&'a [BigEndian<u16>]),
    /// Sorted, non-overlapping glyph ranges.
    Format2(&'a [RangeRecord]),
}

impl CoverageTable<'_> {
    /// The position of `glyph_id` in the coverage, or `None` if uncovered.
    pub fn coverage_index(&self, glyph_id: GlyphId) -> Option<u16> {
        let gid = glyph_id.to_u16();
        match self {
            Self::Format1(glyphs) => glyphs
                .binary_search_by(|g| g.get().cmp(&gid))
                .ok()
                .map(|ix| ix as u16),
            Self::Format2(ranges) => {
                let ix = ranges
                    .binary_search_by(|range| {
                        if gid < range.start_glyph_id() {
                            std::cmp::Ordering::Greater
                        } else if gid > range.end_glyph_id() {
                            std::cmp::Ordering::Less
                        } else {
                            std::cmp::Ordering::Equal
                        }
                    })
                    .ok()?;
                let range = &ranges[ix];
                Some(range.start_coverage_index() + (gid - range.start_glyph_id()))
            }
        }
    }
}

impl<'a> FontRead<'a> for CoverageTable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        let count: u16 = data.read_at(2)?;
        match format {
            1 => data.read_array(4..4 + count as usize * 2).map(Self::Format1),
            2 => data
                .read_array(4..4 + count as usize * RangeRecord::RAW_BYTE_LEN)
                .map(Self::Format2),
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }
}

/// A glyph range of a format 2 coverage table.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct RangeRecord {
    start_glyph_id: BigEndian<u16>,
    end_glyph_id: BigEndian<u16>,
    start_coverage_index: BigEndian<u16>,
}

impl RangeRecord {
    pub fn start_glyph_id(&self) -> u16 {
        self.start_glyph_id.get()
    }

    pub fn end_glyph_id(&self) -> u16 {
        self.end_glyph_id.get()
    }

    pub fn start_coverage_index(&self) -> u16 {
        self.start_coverage_index.get()
    }
}

impl FixedSize for RangeRecord {
    const RAW_BYTE_LEN: usize = 6;
}

/// A [class definition table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table),
/// mapping glyphs to class values.
#[derive(Clone)]
pub enum ClassDef<'a> {
    /// Class values for a contiguous glyph range.
    Format1 {
        start_glyph_id: u16,
        class_values: &'a [BigEndian<u16>],
    },
    /// Glyph ranges with a class per range.
    Format2(&'a [ClassRangeRecord]),
}

impl ClassDef<'_> {
    /// The class of `glyph_id`; glyphs not mentioned are class 0.
    pub fn glyph_class(&self, glyph_id: GlyphId) -> u16 {
        let gid = glyph_id.to_u16();
        match self {
            Self::Format1 {
                start_glyph_id,
                class_values,
            } => gid
                .checked_sub(*start_glyph_id)
                .and_then(|ix| class_values.get(ix as usize))
                .map(|class| class.get())
                .unwrap_or_default(),
            Self::Format2(ranges) => ranges
                .binary_search_by(|range| {
                    if gid < range.start_glyph_id() {
                        std::cmp::Ordering::Greater
                    } else if gid > range.end_glyph_id() {
                        std::cmp::Ordering::Less
                    } else {
                        std::cmp::Ordering::Equal
                    }
                })
                .ok()
                .map(|ix| ranges[ix].class())
                .unwrap_or_default(),
        }
    }
}

impl<'a> FontRead<'a> for ClassDef<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            1 => {
                let start_glyph_id: u16 = data.read_at(2)?;
                let count: u16 = data.read_at(4)?;
                let class_values = data.read_array(6..6 + count as usize * 2)?;
                Ok(Self::Format1 {
                    start_glyph_id,
                    class_values,
                })
            }
            2 => {
                let count: u16 = data.read_at(2)?;
                data.read_array(4..4 + count as usize * ClassRangeRecord::RAW_BYTE_LEN)
                    .map(Self::Format2)
            }
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }
}

/// A glyph range of a format 2 class definition.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct ClassRangeRecord {
    start_glyph_id: BigEndian<u16>,
    end_glyph_id: BigEndian<u16>,
    class: BigEndian<u16>,
}

impl ClassRangeRecord {
    pub fn start_glyph_id(&self) -> u16 {
        self.start_glyph_id.get()
    }

    pub fn end_glyph_id(&self) -> u16 {
        self.end_glyph_id.get()
    }

    pub fn class(&self) -> u16 {
        self.class.get()
    }
}

impl FixedSize for ClassRangeRecord {
    const RAW_BYTE_LEN: usize = 6;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    #[test]
    fn coverage_format_1() {
        let buf = BeBuffer::new()
            .push(1u16)
            .push(3u16)
            .extend([2u16, 9, 40]);
        let coverage = CoverageTable::read(buf.font_data()).unwrap();
        assert_eq!(coverage.coverage_index(GlyphId::new(2)), Some(0));
        assert_eq!(coverage.coverage_index(GlyphId::new(40)), Some(2));
        assert_eq!(coverage.coverage_index(GlyphId::new(3)), None);
    }

    #[test]
    fn coverage_format_2() {
        let buf = BeBuffer::new()
            .push(2u16)
            .push(2u16)
            .extend([10u16, 12, 0]) // glyphs 10..=12 -> coverage 0..=2
            .extend([20u16, 20, 3]);
        let coverage = CoverageTable::read(buf.font_data()).unwrap();
        assert_eq!(coverage.coverage_index(GlyphId::new(11)), Some(1));
        assert_eq!(coverage.coverage_index(GlyphId::new(20)), Some(3));
        assert_eq!(coverage.coverage_index(GlyphId::new(13)), None);
    }

    #[test]
    fn class_def_formats() {
        let buf = BeBuffer::new()
            .push(1u16)
            .push(5u16) // start glyph
            .push(2u16)
            .extend([1u16, 2]);
        let classes = ClassDef::read(buf.font_data()).unwrap();
        assert_eq!(classes.glyph_class(GlyphId::new(5)), 1);
        assert_eq!(classes.glyph_class(GlyphId::new(6)), 2);
        assert_eq!(classes.glyph_class(GlyphId::new(7)), 0);
        assert_eq!(classes.glyph_class(GlyphId::new(4)), 0);

        let buf = BeBuffer::new()
            .push(2u16)
            .push(1u16)
            .extend([8u16, 10, 7]);
        let classes = ClassDef::read(buf.font_data()).unwrap();
        assert_eq!(classes.glyph_class(GlyphId::new(9)), 7);
        assert_eq!(classes.glyph_class(GlyphId::new(11)), 0);
    }

    #[test]
    fn script_list_navigation() {
        // a script list with one script, whose default lang sys has two
        // feature indices
        let buf = BeBuffer::new()
            .push(1u16) // script count
            .push(Tag::new(b"latn"))
            .push(8u16) // script offset
            // script @8: default lang sys at script-relative 4, no lang sys
            // records
            .push(4u16)
            .push(0u16)
            // lang sys @12 absolute
            .push(0u16) // lookup order
            .push(0xFFFFu16) // no required feature
            .push(2u16)
            .extend([3u16, 5]);
        let list = ScriptList::read(buf.font_data()).unwrap();
        assert_eq!(list.records().len(), 1);
        let script = list.script(Tag::new(b"latn")).unwrap().unwrap();
        let lang_sys = script.default_lang_sys().unwrap().unwrap();
        assert_eq!(lang_sys.required_feature_index(), None);
        let indices: Vec<u16> = lang_sys.feature_indices().iter().map(|i| i.get()).collect();
        assert_eq!(indices, vec![3, 5]);
        assert!(list.script(Tag::new(b"grek")).is_none());
    }

    #[test]
    fn lookup_list_navigation() {
        let buf = BeBuffer::new()
            .push(1u16) // lookup count
            .push(4u16) // lookup offset
            // lookup @4: type 1, flag 0, one subtable @8
            .push(1u16)
            .push(0u16)
            .push(1u16)
            .push(8u16)
            .push(0xBEEFu16); // "subtable"
        let list = LookupList::read(buf.font_data()).unwrap();
        assert_eq!(list.lookup_count(), 1);
        let lookup = list.lookup(0).unwrap().unwrap();
        assert_eq!(lookup.lookup_type(), 1);
        assert_eq!(lookup.subtable_count(), 1);
        let subtable = lookup.subtable_data(0).unwrap();
        assert_eq!(subtable.read_at::<u16>(0), Ok(0xBEEF));
        assert_eq!(lookup.mark_filtering_set(), None);
    }
}
