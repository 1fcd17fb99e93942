//! The [head (Font Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{Fixed, LongDateTime, MajorMinor, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

/// The expected value of the [`magic_number`](Head::magic_number) field.
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The [head] table.
///
/// [head]: https://docs.microsoft.com/en-us/typography/opentype/spec/head
#[derive(Clone)]
pub struct Head<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Head<'_> {
    const TAG: Tag = Tag::new(b"head");
}

impl<'a> Head<'a> {
    /// The length of the table in bytes.
    pub const LEN: usize = 54;
    /// The position of the `checksum_adjustment` field within the table.
    ///
    /// The font serializer patches this field in place after computing the
    /// whole-font checksum.
    pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

    /// Version number of the font header table (1.0).
    pub fn version(&self) -> MajorMinor {
        self.data.read_at(0).unwrap_or_default()
    }

    /// Set by the font manufacturer.
    pub fn font_revision(&self) -> Fixed {
        self.data.read_at(4).unwrap_or_default()
    }

    /// The value that makes the whole-font checksum come out to
    /// `0xB1B0AFBA`.
    pub fn checksum_adjustment(&self) -> u32 {
        self.data
            .read_at(Self::CHECKSUM_ADJUSTMENT_OFFSET)
            .unwrap_or_default()
    }

    /// Always `0x5F0F3CF5` in a well-formed font.
    pub fn magic_number(&self) -> u32 {
        self.data.read_at(12).unwrap_or_default()
    }

    pub fn flags(&self) -> u16 {
        self.data.read_at(16).unwrap_or_default()
    }

    /// The granularity of the font's coordinate grid; 16 to 16384.
    pub fn units_per_em(&self) -> u16 {
        self.data.read_at(18).unwrap_or_default()
    }

    /// Creation time, in seconds since 1904-01-01 00:00:00 UTC.
    pub fn created(&self) -> LongDateTime {
        self.data.read_at(20).unwrap_or_default()
    }

    /// Modification time, in seconds since 1904-01-01 00:00:00 UTC.
    pub fn modified(&self) -> LongDateTime {
        self.data.read_at(28).unwrap_or_default()
    }

    /// Minimum x of all glyph bounding boxes.
    pub fn x_min(&self) -> i16 {
        self.data.read_at(36).unwrap_or_default()
    }

    /// Minimum y of all glyph bounding boxes.
    pub fn y_min(&self) -> i16 {
        self.data.read_at(38).unwrap_or_default()
    }

    /// Maximum x of all glyph bounding boxes.
    pub fn x_max(&self) -> i16 {
        self.data.read_at(40).unwrap_or_default()
    }

    /// Maximum y of all glyph bounding boxes.
    pub fn y_max(&self) -> i16 {
        self.data.read_at(42).unwrap_or_default()
    }

    pub fn mac_style(&self) -> u16 {
        self.data.read_at(44).unwrap_or_default()
    }

    /// Smallest readable size in pixels.
    pub fn lowest_rec_ppem(&self) -> u16 {
        self.data.read_at(46).unwrap_or_default()
    }

    /// Deprecated; set to 2 in modern fonts.
    pub fn font_direction_hint(&self) -> i16 {
        self.data.read_at(48).unwrap_or_default()
    }

    /// 0 for short `loca` offsets, 1 for long.
    pub fn index_to_loc_format(&self) -> i16 {
        self.data.read_at(50).unwrap_or_default()
    }

    /// 0 for current format.
    pub fn glyph_data_format(&self) -> i16 {
        self.data.read_at(52).unwrap_or_default()
    }
}

impl<'a> FontRead<'a> for Head<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.check_min_len(Self::LEN)?;
        Ok(Head { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;
    use types::MajorMinor;

    pub(crate) fn head_bytes() -> BeBuffer {
        BeBuffer::new()
            .push(MajorMinor::VERSION_1_0)
            .push(Fixed::from_f32(2.5)) // font_revision
            .push(0u32) // checksum adjustment
            .push(MAGIC_NUMBER)
            .push(0b11u16) // flags
            .push(1000u16) // units_per_em
            .push(LongDateTime::new(3_000_000_000))
            .push(LongDateTime::new(3_000_500_000))
            .push(-150i16) // x_min
            .push(-288i16)
            .push(950i16)
            .push(800i16)
            .push(0u16) // mac_style
            .push(7u16) // lowest_rec_ppem
            .push(2i16) // font_direction_hint
            .push(0i16) // index_to_loc_format
            .push(0i16) // glyph_data_format
    }

    #[test]
    fn read_fields() {
        let buf = head_bytes();
        let head = Head::read(buf.font_data()).unwrap();
        assert_eq!(head.version(), MajorMinor::VERSION_1_0);
        assert_eq!(head.font_revision(), Fixed::from_f32(2.5));
        assert_eq!(head.magic_number(), MAGIC_NUMBER);
        assert_eq!(head.units_per_em(), 1000);
        assert_eq!(head.x_min(), -150);
        assert_eq!(head.y_max(), 800);
        assert_eq!(head.index_to_loc_format(), 0);
    }

    #[test]
    fn truncated() {
        let buf = head_bytes();
        let short = &buf.as_slice()[..Head::LEN - 2];
        assert!(Head::read(FontData::new(short)).is_err());
    }
}
