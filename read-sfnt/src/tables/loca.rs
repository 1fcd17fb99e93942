//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use std::ops::Range;

use types::{BigEndian, GlyphId, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
use crate::table_provider::TopLevelTable;

/// The [loca] table.
///
/// `loca` stores `num_glyphs + 1` offsets into `glyf`; glyph `i` occupies
/// the bytes between offsets `i` and `i + 1`, and equal adjacent offsets
/// denote an empty glyph. The short form stores offsets divided by two;
/// which form is in use is recorded in `head.index_to_loc_format` and must
/// be supplied when reading.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone)]
pub enum Loca<'a> {
    Short(&'a [BigEndian<u16>]),
    Long(&'a [BigEndian<u32>]),
}

impl TopLevelTable for Loca<'_> {
    const TAG: Tag = Tag::new(b"loca");
}

impl<'a> Loca<'a> {
    /// Read a loca table; `is_long` comes from `head.index_to_loc_format`.
    pub fn read(data: FontData<'a>, is_long: bool) -> Result<Self, ReadError> {
        Self::read_with_args(data, &is_long)
    }

    /// The number of glyphs covered by this table.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len().saturating_sub(1),
            Loca::Long(data) => data.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored offset at `idx`, with short offsets scaled up.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(idx).map(|x| x.get() as u32 * 2),
            Loca::Long(data) => data.get(idx).map(|x| x.get()),
        }
    }

    /// `true` if `loca[i] <= loca[i + 1]` for all `i`.
    ///
    /// Well-formed fonts always satisfy this; a font that doesn't cannot
    /// have its glyph lengths trusted.
    pub fn all_offsets_are_ascending(&self) -> bool {
        match self {
            Loca::Short(data) => !data
                .iter()
                .zip(data.iter().skip(1))
                .any(|(start, end)| start > end),
            Loca::Long(data) => !data
                .iter()
                .zip(data.iter().skip(1))
                .any(|(start, end)| start > end),
        }
    }

    /// The byte range of the given glyph within the `glyf` table.
    pub fn glyph_range(&self, glyph_id: GlyphId) -> Result<Range<usize>, ReadError> {
        let idx = glyph_id.to_u16() as usize;
        let start = self.get_raw(idx).ok_or(ReadError::OutOfBounds)? as usize;
        let end = self.get_raw(idx + 1).ok_or(ReadError::OutOfBounds)? as usize;
        if end < start {
            return Err(ReadError::MalformedData("loca offsets must not descend"));
        }
        Ok(start..end)
    }

    /// The length in bytes of the given glyph; zero means "no outline".
    pub fn glyph_length(&self, glyph_id: GlyphId) -> Result<usize, ReadError> {
        self.glyph_range(glyph_id).map(|range| range.len())
    }

    /// Resolve the given glyph's outline data in `glyf`.
    ///
    /// Returns `Ok(None)` for an empty glyph.
    pub fn get_glyf(
        &self,
        glyph_id: GlyphId,
        glyf: &super::glyf::Glyf<'a>,
    ) -> Result<Option<super::glyf::Glyph<'a>>, ReadError> {
        let range = self.glyph_range(glyph_id)?;
        if range.is_empty() {
            return Ok(None);
        }
        let data = glyf
            .offset_data()
            .slice(range)
            .ok_or(ReadError::OutOfBounds)?;
        super::glyf::Glyph::read(data).map(Some)
    }
}

impl ReadArgs for Loca<'_> {
    type Args = bool;
}

impl<'a> FontReadWithArgs<'a> for Loca<'a> {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let is_long = *args;
        if is_long {
            data.read_array(0..data.len()).map(Loca::Long)
        } else {
            data.read_array(0..data.len()).map(Loca::Short)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    fn short_loca(values: &[u16]) -> BeBuffer {
        BeBuffer::new().extend(values.iter().copied())
    }

    #[test]
    fn short_offsets_are_doubled() {
        let buf = short_loca(&[0, 10, 10, 40]);
        let loca = Loca::read(buf.font_data(), false).unwrap();
        assert_eq!(loca.len(), 3);
        assert_eq!(loca.get_raw(1), Some(20));
        assert_eq!(loca.glyph_range(GlyphId::new(0)).unwrap(), 0..20);
        // equal adjacent offsets: an empty glyph
        assert_eq!(loca.glyph_length(GlyphId::new(1)).unwrap(), 0);
        assert_eq!(loca.glyph_length(GlyphId::new(2)).unwrap(), 60);
        assert!(loca.glyph_range(GlyphId::new(3)).is_err());
    }

    #[test]
    fn long_offsets_are_raw() {
        let buf = BeBuffer::new().extend([0u32, 13, 21]);
        let loca = Loca::read(buf.font_data(), true).unwrap();
        assert_eq!(loca.len(), 2);
        assert_eq!(loca.get_raw(1), Some(13));
        assert_eq!(loca.glyph_range(GlyphId::new(1)).unwrap(), 13..21);
    }

    #[test]
    fn monotonicity() {
        for (values, is_sorted) in [
            (vec![], true),
            (vec![0u16], true),
            (vec![0, 0], true),
            (vec![1, 2, 2, 3, 7], true),
            (vec![1, 0], false),
            (vec![1, 3, 2], false),
            (vec![1, 2, 3, 2, 7], false),
        ] {
            let buf = short_loca(&values);
            let loca = Loca::read(buf.font_data(), false).unwrap();
            assert_eq!(loca.all_offsets_are_ascending(), is_sorted, "{values:?}");
        }
    }

    #[test]
    fn descending_offsets_are_malformed() {
        let buf = BeBuffer::new().extend([10u32, 4]);
        let loca = Loca::read(buf.font_data(), true).unwrap();
        assert!(matches!(
            loca.glyph_range(GlyphId::new(0)),
            Err(ReadError::MalformedData(_))
        ));
    }

    #[test]
    fn odd_length_data_is_invalid() {
        let data = [0u8, 0, 1];
        assert!(Loca::read(FontData::new(&data), false).is_err());
    }
}
