//! The [EBDT (Embedded Bitmap Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/ebdt) table

use types::{FixedSize, MajorMinor, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

use super::eblc::{BigGlyphMetrics, BitmapLocation, SmallGlyphMetrics};

/// The [EBDT] table.
///
/// The table is a bag of bytes; glyph images are found through the
/// locations produced by the `EBLC` table.
///
/// [EBDT]: https://docs.microsoft.com/en-us/typography/opentype/spec/ebdt
#[derive(Clone)]
pub struct Ebdt<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Ebdt<'_> {
    const TAG: Tag = Tag::new(b"EBDT");
}

impl<'a> Ebdt<'a> {
    pub fn version(&self) -> MajorMinor {
        self.data.read_at(0).unwrap_or_default()
    }

    /// Decode the glyph image at the given location.
    pub fn glyph_data(&self, location: &BitmapLocation) -> Result<BitmapData<'a>, ReadError> {
        let data = self
            .data
            .slice(location.data_offset..location.data_offset + location.data_size)
            .ok_or(ReadError::OutOfBounds)?;
        let mut cursor = data.cursor();
        let (metrics, content) = match location.image_format {
            1 => (
                Some(BitmapMetrics::Small(read_small_metrics(&mut cursor)?)),
                BitmapContent::ByteAligned(remaining(data, SmallGlyphMetrics::RAW_BYTE_LEN)?),
            ),
            2 => (
                Some(BitmapMetrics::Small(read_small_metrics(&mut cursor)?)),
                BitmapContent::BitAligned(remaining(data, SmallGlyphMetrics::RAW_BYTE_LEN)?),
            ),
            // metrics for format 5 live in the index subtable
            5 => (None, BitmapContent::BitAligned(data.as_bytes())),
            6 => (
                Some(BitmapMetrics::Big(read_big_metrics(&mut cursor)?)),
                BitmapContent::ByteAligned(remaining(data, BigGlyphMetrics::RAW_BYTE_LEN)?),
            ),
            7 => (
                Some(BitmapMetrics::Big(read_big_metrics(&mut cursor)?)),
                BitmapContent::BitAligned(remaining(data, BigGlyphMetrics::RAW_BYTE_LEN)?),
            ),
            8 => {
                let metrics = read_small_metrics(&mut cursor)?;
                cursor.advance::<u8>(); // pad
                let num_components: u16 = cursor.read()?;
                let components = cursor.read_array(num_components as usize)?;
                (
                    Some(BitmapMetrics::Small(metrics)),
                    BitmapContent::Components(components),
                )
            }
            9 => {
                let metrics = read_big_metrics(&mut cursor)?;
                let num_components: u16 = cursor.read()?;
                let components = cursor.read_array(num_components as usize)?;
                (
                    Some(BitmapMetrics::Big(metrics)),
                    BitmapContent::Components(components),
                )
            }
            _ => return Err(ReadError::InvalidFormat(location.image_format as i64)),
        };
        Ok(BitmapData { metrics, content })
    }
}

impl<'a> FontRead<'a> for Ebdt<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.check_min_len(4)?;
        Ok(Ebdt { data })
    }
}

fn remaining<'a>(data: FontData<'a>, skip: usize) -> Result<&'a [u8], ReadError> {
    data.split_off(skip)
        .map(|data| data.as_bytes())
        .ok_or(ReadError::OutOfBounds)
}

fn read_small_metrics(
    cursor: &mut crate::font_data::Cursor,
) -> Result<SmallGlyphMetrics, ReadError> {
    cursor.read_array::<SmallGlyphMetrics>(1).map(|m| m[0])
}

fn read_big_metrics(
    cursor: &mut crate::font_data::Cursor,
) -> Result<BigGlyphMetrics, ReadError> {
    cursor.read_array::<BigGlyphMetrics>(1).map(|m| m[0])
}

/// The metrics stored inline with a glyph image, when present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitmapMetrics {
    Small(SmallGlyphMetrics),
    Big(BigGlyphMetrics),
}

/// The payload of one glyph image.
#[derive(Clone, Debug, PartialEq)]
pub enum BitmapContent<'a> {
    /// Rows padded to byte boundaries.
    ByteAligned(&'a [u8]),
    /// A continuous bit stream.
    BitAligned(&'a [u8]),
    /// A composite built from other bitmap glyphs.
    Components(&'a [EbdtComponent]),
}

/// A decoded glyph image.
#[derive(Clone, Debug, PartialEq)]
pub struct BitmapData<'a> {
    pub metrics: Option<BitmapMetrics>,
    pub content: BitmapContent<'a>,
}

/// One component of a composite bitmap (image formats 8 and 9).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct EbdtComponent {
    glyph_id: types::BigEndian<u16>,
    x_offset: i8,
    y_offset: i8,
}

impl EbdtComponent {
    pub fn glyph_id(&self) -> u16 {
        self.glyph_id.get()
    }

    pub fn x_offset(&self) -> i8 {
        self.x_offset
    }

    pub fn y_offset(&self) -> i8 {
        self.y_offset
    }
}

impl FixedSize for EbdtComponent {
    const RAW_BYTE_LEN: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    fn ebdt_with(image: BeBuffer) -> BeBuffer {
        BeBuffer::new()
            .push(MajorMinor::VERSION_2_0)
            .extend(image.as_slice().iter().copied())
    }

    #[test]
    fn format_1_small_metrics() {
        let image = BeBuffer::new()
            .extend([8u8, 6]) // height, width
            .push(0i8)
            .push(7i8)
            .push(7u8) // advance
            .extend([0xF0u8, 0x0F, 0xAA]);
        let buf = ebdt_with(image);
        let ebdt = Ebdt::read(buf.font_data()).unwrap();
        let location = BitmapLocation {
            image_format: 1,
            data_offset: 4,
            data_size: 8,
            metrics: None,
        };
        let data = ebdt.glyph_data(&location).unwrap();
        let Some(BitmapMetrics::Small(metrics)) = data.metrics else {
            panic!("expected small metrics");
        };
        assert_eq!(metrics.height, 8);
        assert_eq!(metrics.advance, 7);
        assert_eq!(data.content, BitmapContent::ByteAligned(&[0xF0, 0x0F, 0xAA]));
    }

    #[test]
    fn format_5_metrics_elsewhere() {
        let image = BeBuffer::new().extend([0b1010_0000u8, 0b0100_0000]);
        let buf = ebdt_with(image);
        let ebdt = Ebdt::read(buf.font_data()).unwrap();
        let location = BitmapLocation {
            image_format: 5,
            data_offset: 4,
            data_size: 2,
            metrics: None,
        };
        let data = ebdt.glyph_data(&location).unwrap();
        assert_eq!(data.metrics, None);
        assert!(matches!(data.content, BitmapContent::BitAligned(_)));
    }

    #[test]
    fn format_9_components() {
        let image = BeBuffer::new()
            .extend([10u8, 10]) // big metrics
            .push(0i8)
            .push(9i8)
            .push(11u8)
            .push(0i8)
            .push(0i8)
            .push(11u8)
            .push(2u16) // component count
            .push(5u16)
            .push(1i8)
            .push(-2i8)
            .push(6u16)
            .push(0i8)
            .push(0i8);
        let buf = ebdt_with(image);
        let ebdt = Ebdt::read(buf.font_data()).unwrap();
        let location = BitmapLocation {
            image_format: 9,
            data_offset: 4,
            data_size: 18,
            metrics: None,
        };
        let data = ebdt.glyph_data(&location).unwrap();
        let BitmapContent::Components(components) = data.content else {
            panic!("expected components");
        };
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].glyph_id(), 5);
        assert_eq!(components[0].y_offset(), -2);
    }

    #[test]
    fn unknown_image_format() {
        let buf = ebdt_with(BeBuffer::new().extend([0u8; 4]));
        let ebdt = Ebdt::read(buf.font_data()).unwrap();
        let location = BitmapLocation {
            image_format: 3,
            data_offset: 4,
            data_size: 4,
            metrics: None,
        };
        assert!(matches!(
            ebdt.glyph_data(&location),
            Err(ReadError::InvalidFormat(3))
        ));
    }
}
