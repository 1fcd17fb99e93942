//! The [GPOS (Glyph Positioning)](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) table

use types::{MajorMinor, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

use super::gsub::resolve_list;
use super::layout::{FeatureList, LookupList, ScriptList};

/// The [GPOS] table.
///
/// Structurally identical to `GSUB` at this level: a version header and
/// offsets to the three shared layout lists.
///
/// [GPOS]: https://docs.microsoft.com/en-us/typography/opentype/spec/gpos
#[derive(Clone)]
pub struct Gpos<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Gpos<'_> {
    const TAG: Tag = Tag::new(b"GPOS");
}

impl<'a> Gpos<'a> {
    pub fn version(&self) -> MajorMinor {
        self.data.read_at(0).unwrap_or_default()
    }

    pub fn script_list(&self) -> Result<ScriptList<'a>, ReadError> {
        resolve_list(self.data, 4)
    }

    pub fn feature_list(&self) -> Result<FeatureList<'a>, ReadError> {
        resolve_list(self.data, 6)
    }

    pub fn lookup_list(&self) -> Result<LookupList<'a>, ReadError> {
        resolve_list(self.data, 8)
    }

    /// Offset to the feature variations table (version 1.1), zero if absent.
    pub fn feature_variations_offset(&self) -> Option<u32> {
        if self.version() < MajorMinor::VERSION_1_1 {
            return None;
        }
        let offset: u32 = self.data.read_at(10).ok()?;
        (offset != 0).then_some(offset)
    }
}

impl<'a> FontRead<'a> for Gpos<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: MajorMinor = data.read_at(0)?;
        let len = if version >= MajorMinor::VERSION_1_1 { 14 } else { 10 };
        data.check_min_len(len)?;
        Ok(Gpos { data })
    }
}
