//! The [hhea (Horizontal Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use types::{FWord, MajorMinor, Tag, UfWord};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

/// The [hhea] table.
///
/// [hhea]: https://docs.microsoft.com/en-us/typography/opentype/spec/hhea
#[derive(Clone)]
pub struct Hhea<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Hhea<'_> {
    const TAG: Tag = Tag::new(b"hhea");
}

impl<'a> Hhea<'a> {
    /// The length of the table in bytes.
    pub const LEN: usize = 36;

    pub fn version(&self) -> MajorMinor {
        self.data.read_at(0).unwrap_or_default()
    }

    /// Typographic ascent.
    pub fn ascender(&self) -> FWord {
        self.data.read_at(4).unwrap_or_default()
    }

    /// Typographic descent.
    pub fn descender(&self) -> FWord {
        self.data.read_at(6).unwrap_or_default()
    }

    /// Typographic line gap.
    pub fn line_gap(&self) -> FWord {
        self.data.read_at(8).unwrap_or_default()
    }

    /// Maximum advance width in the `hmtx` table.
    pub fn advance_width_max(&self) -> UfWord {
        self.data.read_at(10).unwrap_or_default()
    }

    pub fn min_left_side_bearing(&self) -> FWord {
        self.data.read_at(12).unwrap_or_default()
    }

    pub fn min_right_side_bearing(&self) -> FWord {
        self.data.read_at(14).unwrap_or_default()
    }

    /// `max(lsb + (x_max - x_min))` over all glyphs.
    pub fn x_max_extent(&self) -> FWord {
        self.data.read_at(16).unwrap_or_default()
    }

    pub fn caret_slope_rise(&self) -> i16 {
        self.data.read_at(18).unwrap_or_default()
    }

    pub fn caret_slope_run(&self) -> i16 {
        self.data.read_at(20).unwrap_or_default()
    }

    pub fn caret_offset(&self) -> i16 {
        self.data.read_at(22).unwrap_or_default()
    }

    /// 0 for current format.
    pub fn metric_data_format(&self) -> i16 {
        self.data.read_at(32).unwrap_or_default()
    }

    /// The number of long metric records in the `hmtx` table.
    pub fn number_of_h_metrics(&self) -> u16 {
        self.data.read_at(34).unwrap_or_default()
    }
}

impl<'a> FontRead<'a> for Hhea<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.check_min_len(Self::LEN)?;
        Ok(Hhea { data })
    }
}
