//! The maxp table

use read_sfnt::tables::maxp::Maxp as ReadMaxp;
use read_sfnt::{FontData, TopLevelTable};
use types::{Tag, Version16Dot16};

use crate::from_obj::{FromObjRef, FromTableRef};
use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table.
///
/// The version is computed: if any of the version 1.0 fields is set, a
/// full 1.0 table is written (unset fields default to zero); otherwise the
/// short 0.5 form is used.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Maxp {
    pub num_glyphs: u16,
    pub max_points: Option<u16>,
    pub max_contours: Option<u16>,
    pub max_composite_points: Option<u16>,
    pub max_composite_contours: Option<u16>,
    pub max_zones: Option<u16>,
    pub max_twilight_points: Option<u16>,
    pub max_storage: Option<u16>,
    pub max_function_defs: Option<u16>,
    pub max_instruction_defs: Option<u16>,
    pub max_stack_elements: Option<u16>,
    pub max_size_of_instructions: Option<u16>,
    pub max_component_elements: Option<u16>,
    pub max_component_depth: Option<u16>,
}

impl Maxp {
    fn compute_version(&self) -> Version16Dot16 {
        if self.max_points.is_some()
            || self.max_contours.is_some()
            || self.max_composite_points.is_some()
            || self.max_composite_contours.is_some()
            || self.max_zones.is_some()
            || self.max_twilight_points.is_some()
            || self.max_storage.is_some()
            || self.max_function_defs.is_some()
            || self.max_instruction_defs.is_some()
            || self.max_stack_elements.is_some()
            || self.max_size_of_instructions.is_some()
            || self.max_component_elements.is_some()
            || self.max_component_depth.is_some()
        {
            Version16Dot16::VERSION_1_0
        } else {
            Version16Dot16::VERSION_0_5
        }
    }
}

impl TopLevelTable for Maxp {
    const TAG: Tag = Tag::new(b"maxp");
}

impl FontWrite for Maxp {
    fn write_into(&self, writer: &mut TableWriter) {
        let version = self.compute_version();
        version.write_into(writer);
        self.num_glyphs.write_into(writer);
        if version == Version16Dot16::VERSION_1_0 {
            self.max_points.unwrap_or_default().write_into(writer);
            self.max_contours.unwrap_or_default().write_into(writer);
            self.max_composite_points
                .unwrap_or_default()
                .write_into(writer);
            self.max_composite_contours
                .unwrap_or_default()
                .write_into(writer);
            self.max_zones.unwrap_or(2).write_into(writer);
            self.max_twilight_points
                .unwrap_or_default()
                .write_into(writer);
            self.max_storage.unwrap_or_default().write_into(writer);
            self.max_function_defs
                .unwrap_or_default()
                .write_into(writer);
            self.max_instruction_defs
                .unwrap_or_default()
                .write_into(writer);
            self.max_stack_elements
                .unwrap_or_default()
                .write_into(writer);
            self.max_size_of_instructions
                .unwrap_or_default()
                .write_into(writer);
            self.max_component_elements
                .unwrap_or_default()
                .write_into(writer);
            self.max_component_depth
                .unwrap_or_default()
                .write_into(writer);
        }
    }
}

impl Validate for Maxp {
    fn validate_impl(&self, _ctx: &mut ValidationCtx) {}
}

impl FromObjRef<ReadMaxp<'_>> for Maxp {
    fn from_obj_ref(obj: &ReadMaxp, _data: FontData) -> Self {
        Maxp {
            num_glyphs: obj.num_glyphs(),
            max_points: obj.max_points(),
            max_contours: obj.max_contours(),
            max_composite_points: obj.max_composite_points(),
            max_composite_contours: obj.max_composite_contours(),
            max_zones: obj.max_zones(),
            max_twilight_points: obj.max_twilight_points(),
            max_storage: obj.max_storage(),
            max_function_defs: obj.max_function_defs(),
            max_instruction_defs: obj.max_instruction_defs(),
            max_stack_elements: obj.max_stack_elements(),
            max_size_of_instructions: obj.max_size_of_instructions(),
            max_component_elements: obj.max_component_elements(),
            max_component_depth: obj.max_component_depth(),
        }
    }
}

impl FromTableRef<ReadMaxp<'_>> for Maxp {}

#[cfg(test)]
mod tests {
    use read_sfnt::FontRead;

    use super::*;
    use crate::dump_table;

    #[test]
    fn version_0_5_is_short() {
        let maxp = Maxp {
            num_glyphs: 7,
            ..Default::default()
        };
        let bytes = dump_table(&maxp).unwrap();
        assert_eq!(bytes.len(), ReadMaxp::V0_5_LEN);
        let view = ReadMaxp::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.version(), Version16Dot16::VERSION_0_5);
        assert_eq!(view.num_glyphs(), 7);
    }

    #[test]
    fn any_limit_forces_version_1() {
        let maxp = Maxp {
            num_glyphs: 7,
            max_points: Some(24),
            ..Default::default()
        };
        let bytes = dump_table(&maxp).unwrap();
        assert_eq!(bytes.len(), ReadMaxp::V1_0_LEN);
        let view = ReadMaxp::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.version(), Version16Dot16::VERSION_1_0);
        assert_eq!(view.max_points(), Some(24));
        assert_eq!(view.max_zones(), Some(2));
    }
}
