//! The [OS/2 (OS/2 and Windows Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use read_sfnt::tables::os2::Os2 as ReadOs2;
use read_sfnt::{FontData, TopLevelTable};
use types::{FWord, Tag, UfWord};

use crate::from_obj::{FromObjRef, FromTableRef};
use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The [OS/2] table.
///
/// The version is computed from the optional field groups: setting any
/// field of a group forces that version (with the group's other fields
/// defaulting to zero), the same way the `maxp` version is derived.
///
/// [OS/2]: https://docs.microsoft.com/en-us/typography/opentype/spec/os2
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Os2 {
    pub x_avg_char_width: FWord,
    pub us_weight_class: u16,
    pub us_width_class: u16,
    pub fs_type: u16,
    pub y_subscript_x_size: FWord,
    pub y_subscript_y_size: FWord,
    pub y_subscript_x_offset: FWord,
    pub y_subscript_y_offset: FWord,
    pub y_superscript_x_size: FWord,
    pub y_superscript_y_size: FWord,
    pub y_superscript_x_offset: FWord,
    pub y_superscript_y_offset: FWord,
    pub y_strikeout_size: FWord,
    pub y_strikeout_position: FWord,
    pub s_family_class: i16,
    pub panose: [u8; 10],
    pub ul_unicode_range_1: u32,
    pub ul_unicode_range_2: u32,
    pub ul_unicode_range_3: u32,
    pub ul_unicode_range_4: u32,
    pub ach_vend_id: Tag,
    pub fs_selection: u16,
    pub us_first_char_index: u16,
    pub us_last_char_index: u16,
    pub s_typo_ascender: FWord,
    pub s_typo_descender: FWord,
    pub s_typo_line_gap: FWord,
    pub us_win_ascent: UfWord,
    pub us_win_descent: UfWord,
    /// Version 1.
    pub ul_code_page_range_1: Option<u32>,
    /// Version 1.
    pub ul_code_page_range_2: Option<u32>,
    /// Version 2.
    pub sx_height: Option<FWord>,
    /// Version 2.
    pub s_cap_height: Option<FWord>,
    /// Version 2.
    pub us_default_char: Option<u16>,
    /// Version 2.
    pub us_break_char: Option<u16>,
    /// Version 2.
    pub us_max_context: Option<u16>,
    /// Version 5.
    pub us_lower_optical_point_size: Option<u16>,
    /// Version 5.
    pub us_upper_optical_point_size: Option<u16>,
}

impl Os2 {
    fn compute_version(&self) -> u16 {
        if self.us_lower_optical_point_size.is_some()
            || self.us_upper_optical_point_size.is_some()
        {
            return 5;
        }
        if self.sx_height.is_some()
            || self.s_cap_height.is_some()
            || self.us_default_char.is_some()
            || self.us_break_char.is_some()
            || self.us_max_context.is_some()
        {
            // version 3 and 4 only redefined flag semantics; emit 4
            return 4;
        }
        if self.ul_code_page_range_1.is_some() || self.ul_code_page_range_2.is_some() {
            return 1;
        }
        0
    }
}

impl TopLevelTable for Os2 {
    const TAG: Tag = Tag::new(b"OS/2");
}

impl FontWrite for Os2 {
    fn write_into(&self, writer: &mut TableWriter) {
        let version = self.compute_version();
        version.write_into(writer);
        self.x_avg_char_width.write_into(writer);
        self.us_weight_class.write_into(writer);
        self.us_width_class.write_into(writer);
        self.fs_type.write_into(writer);
        self.y_subscript_x_size.write_into(writer);
        self.y_subscript_y_size.write_into(writer);
        self.y_subscript_x_offset.write_into(writer);
        self.y_subscript_y_offset.write_into(writer);
        self.y_superscript_x_size.write_into(writer);
        self.y_superscript_y_size.write_into(writer);
        self.y_superscript_x_offset.write_into(writer);
        self.y_superscript_y_offset.write_into(writer);
        self.y_strikeout_size.write_into(writer);
        self.y_strikeout_position.write_into(writer);
        self.s_family_class.write_into(writer);
        writer.write_slice(&self.panose);
        self.ul_unicode_range_1.write_into(writer);
        self.ul_unicode_range_2.write_into(writer);
        self.ul_unicode_range_3.write_into(writer);
        self.ul_unicode_range_4.write_into(writer);
        self.ach_vend_id.write_into(writer);
        self.fs_selection.write_into(writer);
        self.us_first_char_index.write_into(writer);
        self.us_last_char_index.write_into(writer);
        self.s_typo_ascender.write_into(writer);
        self.s_typo_descender.write_into(writer);
        self.s_typo_line_gap.write_into(writer);
        self.us_win_ascent.write_into(writer);
        self.us_win_descent.write_into(writer);
        if version >= 1 {
            self.ul_code_page_range_1.unwrap_or_default().write_into(writer);
            self.ul_code_page_range_2.unwrap_or_default().write_into(writer);
        }
        if version >= 2 {
            self.sx_height.unwrap_or_default().write_into(writer);
            self.s_cap_height.unwrap_or_default().write_into(writer);
            self.us_default_char.unwrap_or_default().write_into(writer);
            self.us_break_char.unwrap_or_default().write_into(writer);
            self.us_max_context.unwrap_or_default().write_into(writer);
        }
        if version >= 5 {
            self.us_lower_optical_point_size
                .unwrap_or_default()
                .write_into(writer);
            self.us_upper_optical_point_size
                .unwrap_or_default()
                .write_into(writer);
        }
    }
}

impl Validate for Os2 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("OS/2", |ctx| {
            ctx.in_field("us_weight_class", |ctx| {
                if !(1..=1000).contains(&self.us_weight_class) {
                    ctx.report("weight class must be in the range 1..=1000");
                }
            });
            ctx.in_field("us_width_class", |ctx| {
                if !(1..=9).contains(&self.us_width_class) {
                    ctx.report("width class must be in the range 1..=9");
                }
            });
        })
    }
}

impl FromObjRef<ReadOs2<'_>> for Os2 {
    fn from_obj_ref(obj: &ReadOs2, _data: FontData) -> Self {
        let mut panose = [0u8; 10];
        panose.copy_from_slice(obj.panose());
        Os2 {
            x_avg_char_width: obj.x_avg_char_width(),
            us_weight_class: obj.us_weight_class(),
            us_width_class: obj.us_width_class(),
            fs_type: obj.fs_type(),
            y_subscript_x_size: obj.y_subscript_x_size(),
            y_subscript_y_size: obj.y_subscript_y_size(),
            y_subscript_x_offset: obj.y_subscript_x_offset(),
            y_subscript_y_offset: obj.y_subscript_y_offset(),
            y_superscript_x_size: obj.y_superscript_x_size(),
            y_superscript_y_size: obj.y_superscript_y_size(),
            y_superscript_x_offset: obj.y_superscript_x_offset(),
            y_superscript_y_offset: obj.y_superscript_y_offset(),
            y_strikeout_size: obj.y_strikeout_size(),
            y_strikeout_position: obj.y_strikeout_position(),
            s_family_class: obj.s_family_class(),
            panose,
            ul_unicode_range_1: obj.ul_unicode_range_1(),
            ul_unicode_range_2: obj.ul_unicode_range_2(),
            ul_unicode_range_3: obj.ul_unicode_range_3(),
            ul_unicode_range_4: obj.ul_unicode_range_4(),
            ach_vend_id: obj.ach_vend_id(),
            fs_selection: obj.fs_selection(),
            us_first_char_index: obj.us_first_char_index(),
            us_last_char_index: obj.us_last_char_index(),
            s_typo_ascender: obj.s_typo_ascender(),
            s_typo_descender: obj.s_typo_descender(),
            s_typo_line_gap: obj.s_typo_line_gap(),
            us_win_ascent: obj.us_win_ascent(),
            us_win_descent: obj.us_win_descent(),
            ul_code_page_range_1: obj.ul_code_page_range_1(),
            ul_code_page_range_2: obj.ul_code_page_range_2(),
            sx_height: obj.sx_height(),
            s_cap_height: obj.s_cap_height(),
            us_default_char: obj.us_default_char(),
            us_break_char: obj.us_break_char(),
            us_max_context: obj.us_max_context(),
            us_lower_optical_point_size: obj.us_lower_optical_point_size(),
            us_upper_optical_point_size: obj.us_upper_optical_point_size(),
        }
    }
}

impl FromTableRef<ReadOs2<'_>> for Os2 {}

#[cfg(test)]
mod tests {
    use read_sfnt::FontRead;

    use super::*;
    use crate::dump_table;

    fn basic_os2() -> Os2 {
        Os2 {
            us_weight_class: 400,
            us_width_class: 5,
            ach_vend_id: Tag::new(b"NONE"),
            us_win_ascent: UfWord::new(900),
            ..Default::default()
        }
    }

    #[test]
    fn version_0_layout() {
        let bytes = dump_table(&basic_os2()).unwrap();
        assert_eq!(bytes.len(), ReadOs2::V0_LEN);
        let view = ReadOs2::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.version(), 0);
        assert_eq!(view.us_win_ascent(), UfWord::new(900));
    }

    #[test]
    fn metrics_force_version_4() {
        let table = Os2 {
            sx_height: Some(FWord::new(480)),
            ..basic_os2()
        };
        let bytes = dump_table(&table).unwrap();
        let view = ReadOs2::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.version(), 4);
        assert_eq!(view.sx_height(), Some(FWord::new(480)));
        // lower version groups are materialized as zero
        assert_eq!(view.ul_code_page_range_1(), Some(0));
    }

    #[test]
    fn weight_class_is_checked() {
        let table = Os2 {
            us_weight_class: 0,
            ..basic_os2()
        };
        assert!(dump_table(&table).is_err());
    }
}
