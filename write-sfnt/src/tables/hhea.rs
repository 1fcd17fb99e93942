//! The [hhea (Horizontal Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use read_sfnt::tables::hhea::Hhea as ReadHhea;
use read_sfnt::{FontData, TopLevelTable};
use types::{FWord, MajorMinor, Tag, UfWord};

use crate::from_obj::{FromObjRef, FromTableRef};
use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The [hhea] table.
///
/// [hhea]: https://docs.microsoft.com/en-us/typography/opentype/spec/hhea
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hhea {
    pub ascender: FWord,
    pub descender: FWord,
    pub line_gap: FWord,
    pub advance_width_max: UfWord,
    pub min_left_side_bearing: FWord,
    pub min_right_side_bearing: FWord,
    pub x_max_extent: FWord,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    /// The number of long metric records in `hmtx`; kept consistent with
    /// that table by the caller.
    pub number_of_h_metrics: u16,
}

impl TopLevelTable for Hhea {
    const TAG: Tag = Tag::new(b"hhea");
}

impl FontWrite for Hhea {
    fn write_into(&self, writer: &mut TableWriter) {
        MajorMinor::VERSION_1_0.write_into(writer);
        self.ascender.write_into(writer);
        self.descender.write_into(writer);
        self.line_gap.write_into(writer);
        self.advance_width_max.write_into(writer);
        self.min_left_side_bearing.write_into(writer);
        self.min_right_side_bearing.write_into(writer);
        self.x_max_extent.write_into(writer);
        self.caret_slope_rise.write_into(writer);
        self.caret_slope_run.write_into(writer);
        self.caret_offset.write_into(writer);
        [0i16; 4].write_into(writer); // reserved
        0i16.write_into(writer); // metric data format
        self.number_of_h_metrics.write_into(writer);
    }
}

impl Validate for Hhea {
    fn validate_impl(&self, _ctx: &mut ValidationCtx) {}
}

impl FromObjRef<ReadHhea<'_>> for Hhea {
    fn from_obj_ref(obj: &ReadHhea, _data: FontData) -> Self {
        Hhea {
            ascender: obj.ascender(),
            descender: obj.descender(),
            line_gap: obj.line_gap(),
            advance_width_max: obj.advance_width_max(),
            min_left_side_bearing: obj.min_left_side_bearing(),
            min_right_side_bearing: obj.min_right_side_bearing(),
            x_max_extent: obj.x_max_extent(),
            caret_slope_rise: obj.caret_slope_rise(),
            caret_slope_run: obj.caret_slope_run(),
            caret_offset: obj.caret_offset(),
            number_of_h_metrics: obj.number_of_h_metrics(),
        }
    }
}

impl FromTableRef<ReadHhea<'_>> for Hhea {}

#[cfg(test)]
mod tests {
    use read_sfnt::FontRead;

    use super::*;
    use crate::dump_table;

    #[test]
    fn round_trip_through_model() {
        let hhea = Hhea {
            ascender: FWord::new(750),
            descender: FWord::new(-250),
            caret_slope_rise: 1,
            number_of_h_metrics: 3,
            ..Default::default()
        };
        let bytes = dump_table(&hhea).unwrap();
        assert_eq!(bytes.len(), ReadHhea::LEN);
        let view = ReadHhea::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.ascender(), FWord::new(750));
        assert_eq!(view.metric_data_format(), 0);
        assert_eq!(view.number_of_h_metrics(), 3);
    }
}
