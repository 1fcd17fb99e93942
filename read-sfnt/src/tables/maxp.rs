//! The [maxp (Maximum Profile)](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::{Tag, Version16Dot16};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

/// The [maxp] table.
///
/// Version 0.5 carries only the glyph count; version 1.0 adds the TrueType
/// rasterizer limits. The version-gated getters return `None` on a 0.5
/// table.
///
/// [maxp]: https://docs.microsoft.com/en-us/typography/opentype/spec/maxp
#[derive(Clone)]
pub struct Maxp<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Maxp<'_> {
    const TAG: Tag = Tag::new(b"maxp");
}

macro_rules! v1_field {
    ($name:ident, $offset:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name(&self) -> Option<u16> {
            self.is_v1().then(|| self.data.read_at($offset).unwrap_or_default())
        }
    };
}

impl<'a> Maxp<'a> {
    /// The length of a version 0.5 table.
    pub const V0_5_LEN: usize = 6;
    /// The length of a version 1.0 table.
    pub const V1_0_LEN: usize = 32;

    pub fn version(&self) -> Version16Dot16 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// The number of glyphs in the font.
    pub fn num_glyphs(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }

    fn is_v1(&self) -> bool {
        self.version() >= Version16Dot16::VERSION_1_0
    }

    v1_field!(max_points, 6, "Maximum points in a non-composite glyph.");
    v1_field!(max_contours, 8, "Maximum contours in a non-composite glyph.");
    v1_field!(max_composite_points, 10, "Maximum points in a composite glyph.");
    v1_field!(max_composite_contours, 12, "Maximum contours in a composite glyph.");
    v1_field!(max_zones, 14, "1 if instructions do not use the twilight zone, 2 otherwise.");
    v1_field!(max_twilight_points, 16, "Maximum points used in the twilight zone.");
    v1_field!(max_storage, 18, "Number of Storage Area locations.");
    v1_field!(max_function_defs, 20, "Number of FDEFs.");
    v1_field!(max_instruction_defs, 22, "Number of IDEFs.");
    v1_field!(max_stack_elements, 24, "Maximum stack depth across all programs.");
    v1_field!(max_size_of_instructions, 26, "Maximum byte count for glyph instructions.");
    v1_field!(max_component_elements, 28, "Maximum number of components at the top level.");
    v1_field!(max_component_depth, 30, "Maximum level of composite nesting.");
}

impl<'a> FontRead<'a> for Maxp<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: Version16Dot16 = data.read_at(0)?;
        let len = if version >= Version16Dot16::VERSION_1_0 {
            Self::V1_0_LEN
        } else {
            Self::V0_5_LEN
        };
        data.check_min_len(len)?;
        Ok(Maxp { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    #[test]
    fn version_0_5() {
        let buf = BeBuffer::new()
            .push(Version16Dot16::VERSION_0_5)
            .push(22u16);
        let maxp = Maxp::read(buf.font_data()).unwrap();
        assert_eq!(maxp.num_glyphs(), 22);
        assert_eq!(maxp.max_points(), None);
    }

    #[test]
    fn version_1_0() {
        let buf = BeBuffer::new()
            .push(Version16Dot16::VERSION_1_0)
            .push(22u16)
            .extend([10u16, 4, 30, 8, 2, 0, 0, 0, 0, 64, 46, 2, 1]);
        let maxp = Maxp::read(buf.font_data()).unwrap();
        assert_eq!(maxp.num_glyphs(), 22);
        assert_eq!(maxp.max_points(), Some(10));
        assert_eq!(maxp.max_component_depth(), Some(1));
    }

    #[test]
    fn version_1_0_requires_all_fields() {
        let buf = BeBuffer::new()
            .push(Version16Dot16::VERSION_1_0)
            .push(22u16)
            .push(10u16);
        assert!(Maxp::read(buf.font_data()).is_err());
    }
}
