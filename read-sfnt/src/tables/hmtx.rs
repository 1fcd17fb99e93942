//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use types::{BigEndian, FixedSize, GlyphId, Tag};

use crate::font_data::FontData;
use crate::read::{FontReadWithArgs, ReadArgs, ReadError};
use crate::table_provider::TopLevelTable;

/// The [hmtx] table.
///
/// Construction needs two counts from other tables, supplied as arguments:
/// `number_of_h_metrics` from `hhea` and `num_glyphs` from `maxp`.
/// [`TableProvider::hmtx`](crate::TableProvider::hmtx) resolves both.
///
/// [hmtx]: https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx
#[derive(Clone)]
pub struct Hmtx<'a> {
    h_metrics: &'a [LongMetric],
    left_side_bearings: &'a [BigEndian<i16>],
}

impl TopLevelTable for Hmtx<'_> {
    const TAG: Tag = Tag::new(b"hmtx");
}

/// An advance width and left side bearing for one glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct LongMetric {
    advance: BigEndian<u16>,
    side_bearing: BigEndian<i16>,
}

impl LongMetric {
    /// The advance width, in font design units.
    pub fn advance(&self) -> u16 {
        self.advance.get()
    }

    /// The left side bearing, in font design units.
    pub fn side_bearing(&self) -> i16 {
        self.side_bearing.get()
    }
}

impl FixedSize for LongMetric {
    const RAW_BYTE_LEN: usize = 4;
}

impl<'a> Hmtx<'a> {
    /// The long metric records.
    ///
    /// There is one record per glyph up to `number_of_h_metrics`; glyphs past
    /// that share the last record's advance.
    pub fn h_metrics(&self) -> &'a [LongMetric] {
        self.h_metrics
    }

    /// Bearings for the glyphs past the end of [`h_metrics`](Self::h_metrics).
    pub fn left_side_bearings(&self) -> &'a [BigEndian<i16>] {
        self.left_side_bearings
    }

    /// The advance width for the given glyph.
    ///
    /// A monospaced font can store a single long metric; every trailing
    /// glyph takes its advance from the last record.
    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        let idx = glyph_id.to_u16() as usize;
        if idx >= self.h_metrics.len() + self.left_side_bearings.len() {
            return None;
        }
        self.h_metrics
            .get(idx)
            .or_else(|| self.h_metrics.last())
            .map(|metric| metric.advance())
    }

    /// The left side bearing for the given glyph.
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        let idx = glyph_id.to_u16() as usize;
        self.h_metrics
            .get(idx)
            .map(|metric| metric.side_bearing())
            .or_else(|| {
                self.left_side_bearings
                    .get(idx.checked_sub(self.h_metrics.len())?)
                    .map(|bearing| bearing.get())
            })
    }
}

impl ReadArgs for Hmtx<'_> {
    /// `(number_of_h_metrics, num_glyphs)`
    type Args = (u16, u16);
}

impl<'a> FontReadWithArgs<'a> for Hmtx<'a> {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let (number_of_h_metrics, num_glyphs) = *args;
        let mut cursor = data.cursor();
        let h_metrics = cursor.read_array(number_of_h_metrics as usize)?;
        let num_bearings = (num_glyphs as usize).saturating_sub(number_of_h_metrics as usize);
        let left_side_bearings = cursor.read_array(num_bearings)?;
        Ok(Hmtx {
            h_metrics,
            left_side_bearings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    #[test]
    fn trailing_bearings() {
        let buf = BeBuffer::new()
            .extend([500u16, 10]) // one long metric
            .extend([-4i16, 12]); // two bare bearings
        let hmtx = Hmtx::read_with_args(buf.font_data(), &(1, 3)).unwrap();
        assert_eq!(hmtx.h_metrics().len(), 1);
        assert_eq!(hmtx.left_side_bearings().len(), 2);
        assert_eq!(hmtx.advance(GlyphId::new(0)), Some(500));
        // glyphs past number_of_h_metrics reuse the last advance
        assert_eq!(hmtx.advance(GlyphId::new(2)), Some(500));
        assert_eq!(hmtx.advance(GlyphId::new(3)), None);
        assert_eq!(hmtx.side_bearing(GlyphId::new(0)), Some(10));
        assert_eq!(hmtx.side_bearing(GlyphId::new(1)), Some(-4));
        assert_eq!(hmtx.side_bearing(GlyphId::new(2)), Some(12));
    }

    #[test]
    fn truncated_metrics() {
        let buf = BeBuffer::new().extend([500u16, 10]);
        assert!(Hmtx::read_with_args(buf.font_data(), &(2, 2)).is_err());
    }
}
