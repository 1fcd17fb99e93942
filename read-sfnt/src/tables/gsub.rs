//! The [GSUB (Glyph Substitution)](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub) table

use types::{MajorMinor, Offset16, Tag};

use crate::font_data::FontData;
use crate::offset::ResolveOffset;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

use super::layout::{FeatureList, LookupList, ScriptList};

/// The [GSUB] table.
///
/// Only the header and the shared layout lists are decoded; lookup
/// subtables are available as raw data through
/// [`Lookup::subtable_data`](super::layout::Lookup::subtable_data).
///
/// [GSUB]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub
#[derive(Clone)]
pub struct Gsub<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Gsub<'_> {
    const TAG: Tag = Tag::new(b"GSUB");
}

impl<'a> Gsub<'a> {
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

pub(crate) fn resolve_list<'a, T: FontRead<'a>>(
    data: FontData<'a>,
    offset_pos: usize,
) -> Result<T, ReadError> {
    let offset: Offset16 = data.read_at(offset_pos)?;
    offset.resolve(data)
}

impl<'a> FontRead<'a> for Gsub<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: MajorMinor = data.read_at(0)?;
        let len = if version >= MajorMinor::VERSION_1_1 { 14 } else { 10 };
        data.check_min_len(len)?;
        Ok(Gsub { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    #[test]
    fn header_navigation() {
        let buf = BeBuffer::new()
            .push(MajorMinor::VERSION_1_0)
            .push(10u16) // script list
            .push(12u16) // feature list
            .push(14u16) // lookup list
            .push(0u16) // empty script list @10
            .push(0u16) // empty feature list @12
            .push(0u16); // empty lookup list @14
        let gsub = Gsub::read(buf.font_data()).unwrap();
        assert_eq!(gsub.version(), MajorMinor::VERSION_1_0);
        assert!(gsub.script_list().unwrap().records().is_empty());
        assert!(gsub.feature_list().unwrap().records().is_empty());
        assert_eq!(gsub.lookup_list().unwrap().lookup_count(), 0);
        assert_eq!(gsub.feature_variations_offset(), None);
    }
}
