//! The [GDEF (Glyph Definition)](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef) table

use types::{MajorMinor, Nullable, Offset16, Tag};

use crate::font_data::FontData;
use crate::offset::ResolveNullableOffset;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

use super::layout::ClassDef;

/// The [GDEF] table.
///
/// All subtable offsets are nullable; the getters return `None` both for a
/// zero offset and for fields not present in the table's version.
///
/// [GDEF]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef
#[derive(Clone)]
pub struct Gdef<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Gdef<'_> {
    const TAG: Tag = Tag::new(b"GDEF");
}

impl<'a> Gdef<'a> {
    pub fn version(&self) -> MajorMinor {
        self.data.read_at(0).unwrap_or_default()
    }

    fn resolve<T: FontRead<'a>>(&self, offset_pos: usize) -> Option<Result<T, ReadError>> {
        let offset: Nullable<Offset16> = self.data.read_at(offset_pos).ok()?;
        offset.resolve(self.data)
    }

    /// The glyph class definition: base, ligature, mark or component.
    pub fn glyph_class_def(&self) -> Option<Result<ClassDef<'a>, ReadError>> {
        self.resolve(4)
    }

    /// The raw attachment point list data.
    pub fn attach_list_data(&self) -> Option<FontData<'a>> {
        self.resolve_data(6)
    }

    /// The raw ligature caret list data.
    pub fn lig_caret_list_data(&self) -> Option<FontData<'a>> {
        self.resolve_data(8)
    }

    /// The mark attachment class definition.
    pub fn mark_attach_class_def(&self) -> Option<Result<ClassDef<'a>, ReadError>> {
        self.resolve(10)
    }

    /// The raw mark glyph sets data (version 1.2 and later).
    pub fn mark_glyph_sets_def_data(&self) -> Option<FontData<'a>> {
        if self.version() < MajorMinor::VERSION_1_2 {
            return None;
        }
        self.resolve_data(12)
    }

    /// Offset to the item variation store (version 1.3 and later).
    pub fn item_var_store_offset(&self) -> Option<u32> {
        if self.version() < MajorMinor::VERSION_1_3 {
            return None;
        }
        let offset: u32 = self.data.read_at(14).ok()?;
        (offset != 0).then_some(offset)
    }

    fn resolve_data(&self, offset_pos: usize) -> Option<FontData<'a>> {
        let offset: u16 = self.data.read_at(offset_pos).ok()?;
        if offset == 0 {
            return None;
        }
        self.data.split_off(offset as usize)
    }
}

impl<'a> FontRead<'a> for Gdef<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: MajorMinor = data.read_at(0)?;
        let len = match version {
            MajorMinor::VERSION_1_0 => 12,
            MajorMinor::VERSION_1_2 => 14,
            MajorMinor::VERSION_1_3 => 18,
            _ => return Err(ReadError::InvalidFormat(version.major as i64)),
        };
        data.check_min_len(len)?;
        Ok(Gdef { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;
    use types::GlyphId;

    #[test]
    fn nullable_offsets() {
        let buf = BeBuffer::new()
            .push(MajorMinor::VERSION_1_0)
            .push(12u16) // glyph class def
            .push(0u16) // no attach list
            .push(0u16) // no lig carets
            .push(0u16) // no mark attach classes
            // class def @12: format 1, glyphs 1..=2 are class 3
            .push(1u16)
            .push(1u16)
            .push(2u16)
            .extend([3u16, 3]);
        let gdef = Gdef::read(buf.font_data()).unwrap();
        assert_eq!(gdef.version(), MajorMinor::VERSION_1_0);
        let classes = gdef.glyph_class_def().unwrap().unwrap();
        assert_eq!(classes.glyph_class(GlyphId::new(2)), 3);
        assert!(gdef.attach_list_data().is_none());
        assert!(gdef.mark_glyph_sets_def_data().is_none());
        assert!(gdef.item_var_store_offset().is_none());
    }
}
