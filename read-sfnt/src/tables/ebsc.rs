//! The [EBSC (Embedded Bitmap Scaling)](https://docs.microsoft.com/en-us/typography/opentype/spec/ebsc) table

use types::{FixedSize, MajorMinor, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

use super::eblc::SbitLineMetrics;

/// The [EBSC] table: bitmap strikes produced by scaling another strike.
///
/// This table is read-only in this crate; fonts that carry one round-trip
/// it as raw bytes.
///
/// [EBSC]: https://docs.microsoft.com/en-us/typography/opentype/spec/ebsc
#[derive(Clone)]
pub struct Ebsc<'a> {
    data: FontData<'a>,
    bitmap_scales: &'a [BitmapScale],
}

impl TopLevelTable for Ebsc<'_> {
    const TAG: Tag = Tag::new(b"EBSC");
}

impl<'a> Ebsc<'a> {
    const BITMAP_SCALES: usize = 8;

    pub fn version(&self) -> MajorMinor {
        self.data.read_at(0).unwrap_or_default()
    }

    /// One record per scaled strike.
    pub fn bitmap_scales(&self) -> &'a [BitmapScale] {
        self.bitmap_scales
    }

    /// The record for the strike closest to the requested pixel size, if
    /// any strike exists.
    pub fn scale_for_ppem(&self, ppem: u8) -> Option<&'a BitmapScale> {
        self.bitmap_scales
            .iter()
            .min_by_key(|scale| (scale.ppem_y() as i32 - ppem as i32).abs())
    }
}

impl<'a> FontRead<'a> for Ebsc<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_sizes: u32 = data.read_at(4)?;
        let end = Self::BITMAP_SCALES + num_sizes as usize * BitmapScale::RAW_BYTE_LEN;
        let bitmap_scales = data.read_array(Self::BITMAP_SCALES..end)?;
        Ok(Ebsc {
            data,
            bitmap_scales,
        })
    }
}

/// One scaled strike: target metrics plus the strike to scale from.
#[derive(Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct BitmapScale {
    hori: SbitLineMetrics,
    vert: SbitLineMetrics,
    ppem_x: u8,
    ppem_y: u8,
    substitute_ppem_x: u8,
    substitute_ppem_y: u8,
}

impl BitmapScale {
    pub fn hori(&self) -> SbitLineMetrics {
        self.hori
    }

    pub fn vert(&self) -> SbitLineMetrics {
        self.vert
    }

    /// The nominal horizontal pixels-per-em of this scaled strike.
    pub fn ppem_x(&self) -> u8 {
        self.ppem_x
    }

    /// The nominal vertical pixels-per-em of this scaled strike.
    pub fn ppem_y(&self) -> u8 {
        self.ppem_y
    }

    /// The actual strike to scale, horizontally.
    pub fn substitute_ppem_x(&self) -> u8 {
        self.substitute_ppem_x
    }

    /// The actual strike to scale, vertically.
    pub fn substitute_ppem_y(&self) -> u8 {
        self.substitute_ppem_y
    }
}

impl FixedSize for BitmapScale {
    const RAW_BYTE_LEN: usize = 28;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    #[test]
    fn read_scales() {
        let mut buf = BeBuffer::new()
            .push(MajorMinor::VERSION_2_0)
            .push(2u32);
        for (ppem, substitute) in [(9u8, 12u8), (11, 12)] {
            buf = buf
                .extend([8i8, -2, 10])
                .extend([0u8; 9]) // rest of hori
                .extend([0u8; 12]) // vert
                .extend([ppem, ppem, substitute, substitute]);
        }
        let ebsc = Ebsc::read(buf.font_data()).unwrap();
        assert_eq!(ebsc.bitmap_scales().len(), 2);
        assert_eq!(ebsc.bitmap_scales()[0].ppem_y(), 9);
        assert_eq!(ebsc.bitmap_scales()[0].substitute_ppem_y(), 12);
        let closest = ebsc.scale_for_ppem(10).unwrap();
        assert_eq!(closest.ppem_y(), 9);
    }
}
