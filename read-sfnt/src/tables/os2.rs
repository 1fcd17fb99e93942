//! The [OS/2 (OS/2 and Windows Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use types::{FWord, Tag, UfWord};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

/// The [OS/2] table.
///
/// Versions 0 through 5 are supported; fields introduced after version 0
/// are exposed through `Option` getters.
///
/// [OS/2]: https://docs.microsoft.com/en-us/typography/opentype/spec/os2
#[derive(Clone)]
pub struct Os2<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Os2<'_> {
    const TAG: Tag = Tag::new(b"OS/2");
}

impl<'a> Os2<'a> {
    /// The length of a version 0 table.
    pub const V0_LEN: usize = 78;
    const V1_LEN: usize = 86;
    const V2_LEN: usize = 96;
    const V5_LEN: usize = 100;

    fn version_len(version: u16) -> usize {
        match version {
            0 => Self::V0_LEN,
            1 => Self::V1_LEN,
            2..=4 => Self::V2_LEN,
            _ => Self::V5_LEN,
        }
    }

    pub fn version(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    pub fn x_avg_char_width(&self) -> FWord {
        self.data.read_at(2).unwrap_or_default()
    }

    /// Visual weight class, 1-1000.
    pub fn us_weight_class(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }

    /// Relative aspect-ratio class, 1-9.
    pub fn us_width_class(&self) -> u16 {
        self.data.read_at(6).unwrap_or_default()
    }

    /// Embedding licensing rights.
    pub fn fs_type(&self) -> u16 {
        self.data.read_at(8).unwrap_or_default()
    }

    pub fn y_subscript_x_size(&self) -> FWord {
        self.data.read_at(10).unwrap_or_default()
    }

    pub fn y_subscript_y_size(&self) -> FWord {
        self.data.read_at(12).unwrap_or_default()
    }

    pub fn y_subscript_x_offset(&self) -> FWord {
        self.data.read_at(14).unwrap_or_default()
    }

    pub fn y_subscript_y_offset(&self) -> FWord {
        self.data.read_at(16).unwrap_or_default()
    }

    pub fn y_superscript_x_size(&self) -> FWord {
        self.data.read_at(18).unwrap_or_default()
    }

    pub fn y_superscript_y_size(&self) -> FWord {
        self.data.read_at(20).unwrap_or_default()
    }

    pub fn y_superscript_x_offset(&self) -> FWord {
        self.data.read_at(22).unwrap_or_default()
    }

    pub fn y_superscript_y_offset(&self) -> FWord {
        self.data.read_at(24).unwrap_or_default()
    }

    pub fn y_strikeout_size(&self) -> FWord {
        self.data.read_at(26).unwrap_or_default()
    }

    pub fn y_strikeout_position(&self) -> FWord {
        self.data.read_at(28).unwrap_or_default()
    }

    pub fn s_family_class(&self) -> i16 {
        self.data.read_at(30).unwrap_or_default()
    }

    /// The 10-byte PANOSE classification.
    pub fn panose(&self) -> &'a [u8] {
        self.data
            .slice(32..42)
            .map(|data| data.as_bytes())
            .unwrap_or_default()
    }

    pub fn ul_unicode_range_1(&self) -> u32 {
        self.data.read_at(42).unwrap_or_default()
    }

    pub fn ul_unicode_range_2(&self) -> u32 {
        self.data.read_at(46).unwrap_or_default()
    }

    pub fn ul_unicode_range_3(&self) -> u32 {
        self.data.read_at(50).unwrap_or_default()
    }

    pub fn ul_unicode_range_4(&self) -> u32 {
        self.data.read_at(54).unwrap_or_default()
    }

    /// Font vendor identifier.
    pub fn ach_vend_id(&self) -> Tag {
        self.data.read_at(58).unwrap_or(Tag::new(b"    "))
    }

    pub fn fs_selection(&self) -> u16 {
        self.data.read_at(62).unwrap_or_default()
    }

    pub fn us_first_char_index(&self) -> u16 {
        self.data.read_at(64).unwrap_or_default()
    }

    pub fn us_last_char_index(&self) -> u16 {
        self.data.read_at(66).unwrap_or_default()
    }

    pub fn s_typo_ascender(&self) -> FWord {
        self.data.read_at(68).unwrap_or_default()
    }

    pub fn s_typo_descender(&self) -> FWord {
        self.data.read_at(70).unwrap_or_default()
    }

    pub fn s_typo_line_gap(&self) -> FWord {
        self.data.read_at(72).unwrap_or_default()
    }

    pub fn us_win_ascent(&self) -> UfWord {
        self.data.read_at(74).unwrap_or_default()
    }

    pub fn us_win_descent(&self) -> UfWord {
        self.data.read_at(76).unwrap_or_default()
    }

    /// Version 1+.
    pub fn ul_code_page_range_1(&self) -> Option<u32> {
        (self.version() >= 1).then(|| self.data.read_at(78).unwrap_or_default())
    }

    /// Version 1+.
    pub fn ul_code_page_range_2(&self) -> Option<u32> {
        (self.version() >= 1).then(|| self.data.read_at(82).unwrap_or_default())
    }

    /// Version 2+.
    pub fn sx_height(&self) -> Option<FWord> {
        (self.version() >= 2).then(|| self.data.read_at(86).unwrap_or_default())
    }

    /// Version 2+.
    pub fn s_cap_height(&self) -> Option<FWord> {
        (self.version() >= 2).then(|| self.data.read_at(88).unwrap_or_default())
    }

    /// Version 2+.
    pub fn us_default_char(&self) -> Option<u16> {
        (self.version() >= 2).then(|| self.data.read_at(90).unwrap_or_default())
    }

    /// Version 2+.
    pub fn us_break_char(&self) -> Option<u16> {
        (self.version() >= 2).then(|| self.data.read_at(92).unwrap_or_default())
    }

    /// Version 2+.
    pub fn us_max_context(&self) -> Option<u16> {
        (self.version() >= 2).then(|| self.data.read_at(94).unwrap_or_default())
    }

    /// Version 5.
    pub fn us_lower_optical_point_size(&self) -> Option<u16> {
        (self.version() >= 5).then(|| self.data.read_at(96).unwrap_or_default())
    }

    /// Version 5.
    pub fn us_upper_optical_point_size(&self) -> Option<u16> {
        (self.version() >= 5).then(|| self.data.read_at(98).unwrap_or_default())
    }
}

impl<'a> FontRead<'a> for Os2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: u16 = data.read_at(0)?;
        data.check_min_len(Self::version_len(version))?;
        Ok(Os2 { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    fn os2_v0() -> BeBuffer {
        let mut buf = BeBuffer::new()
            .push(0u16) // version
            .push(FWord::new(520))
            .push(400u16)
            .push(5u16)
            .push(0u16);
        buf = buf.extend([FWord::new(0); 10]);
        buf = buf.push(0i16); // family class
        buf = buf.extend([2u8, 0, 5, 3, 0, 0, 0, 0, 0, 0]); // panose
        buf = buf.extend([1u32, 0, 0, 0]); // unicode ranges
        buf = buf
            .push(Tag::new(b"NONE"))
            .push(0x40u16) // fs_selection
            .push(0x20u16)
            .push(0x7Eu16)
            .push(FWord::new(750))
            .push(FWord::new(-250))
            .push(FWord::new(0))
            .push(UfWord::new(900))
            .push(UfWord::new(300));
        buf
    }

    #[test]
    fn version_0() {
        let buf = os2_v0();
        let os2 = Os2::read(buf.font_data()).unwrap();
        assert_eq!(os2.us_weight_class(), 400);
        assert_eq!(os2.panose()[2], 5);
        assert_eq!(os2.ach_vend_id(), Tag::new(b"NONE"));
        assert_eq!(os2.s_typo_descender(), FWord::new(-250));
        assert_eq!(os2.ul_code_page_range_1(), None);
        assert_eq!(os2.sx_height(), None);
    }

    #[test]
    fn version_2() {
        let buf = os2_v0()
            .extend([1u32, 0]) // code page ranges
            .push(FWord::new(500))
            .push(FWord::new(700))
            .push(0u16)
            .push(0x20u16)
            .push(3u16);
        let mut bytes = buf.as_slice().to_vec();
        bytes[0] = 0;
        bytes[1] = 2;
        let os2 = Os2::read(FontData::new(&bytes)).unwrap();
        assert_eq!(os2.version(), 2);
        assert_eq!(os2.ul_code_page_range_1(), Some(1));
        assert_eq!(os2.s_cap_height(), Some(FWord::new(700)));
        assert_eq!(os2.us_max_context(), Some(3));
    }
}
