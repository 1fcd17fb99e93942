//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use read_sfnt::TopLevelTable;
use types::Tag;

use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The [loca] table.
///
/// You generally do not construct this directly; it is built alongside the
/// corresponding `glyf` table by the
/// [`GlyfLocaBuilder`](super::glyf::GlyfLocaBuilder).
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Debug, PartialEq)]
pub struct Loca {
    // always stored as 32-bit; halved during writing if the format is short
    offsets: Vec<u32>,
    format: LocaFormat,
}

/// Whether the table uses short (divided by two) or long offsets.
///
/// The choice is recorded in `head.index_to_loc_format`, which callers must
/// keep in sync when replacing a `loca` table.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LocaFormat {
    Short = 0,
    Long = 1,
}

impl TopLevelTable for Loca {
    const TAG: Tag = Tag::new(b"loca");
}

impl Loca {
    /// Create a new loca table from raw 32-bit offsets.
    ///
    /// The format is chosen from the values: short offsets require every
    /// offset to be even and the total length to stay under 128 KiB.
    pub fn new(offsets: Vec<u32>) -> Self {
        let format = LocaFormat::new(&offsets);
        Loca { offsets, format }
    }

    pub fn format(&self) -> LocaFormat {
        self.format
    }

    /// The stored offsets.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }
}

impl LocaFormat {
    fn new(offsets: &[u32]) -> LocaFormat {
        const MAX_SHORT_LOCA_VALUE: u32 = 0x20000;
        if offsets.last().copied().unwrap_or_default() < MAX_SHORT_LOCA_VALUE
            && offsets.iter().all(|offset| offset % 2 == 0)
        {
            LocaFormat::Short
        } else {
            LocaFormat::Long
        }
    }
}

impl FontWrite for Loca {
    fn write_into(&self, writer: &mut TableWriter) {
        match self.format {
            LocaFormat::Long => self.offsets.write_into(writer),
            LocaFormat::Short => self
                .offsets
                .iter()
                .for_each(|off| ((off >> 1) as u16).write_into(writer)),
        }
    }
}

impl Validate for Loca {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("loca", |ctx| {
            ctx.in_field("offsets", |ctx| {
                if self.offsets.windows(2).any(|pair| pair[0] > pair[1]) {
                    ctx.report("offsets must be monotonically non-decreasing");
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use read_sfnt::tables::loca::Loca as ReadLoca;
    use read_sfnt::FontData;
    use types::GlyphId;

    use super::*;
    use crate::dump_table;

    #[test]
    fn format_selection() {
        assert_eq!(Loca::new(vec![0, 12, 50]).format(), LocaFormat::Short);
        assert_eq!(Loca::new(vec![0, 11, 50]).format(), LocaFormat::Long);
        assert_eq!(Loca::new(vec![0, 2, 0x20000]).format(), LocaFormat::Long);
        assert_eq!(Loca::new(Vec::new()).format(), LocaFormat::Short);
    }

    #[test]
    fn short_loca_halves_values() {
        let loca = Loca::new(vec![0, 12, 50, 50]);
        let bytes = dump_table(&loca).unwrap();
        assert_eq!(bytes.len(), 8);
        let view = ReadLoca::read(FontData::new(&bytes), false).unwrap();
        assert_eq!(view.get_raw(1), Some(12));
        assert_eq!(view.glyph_length(GlyphId::new(2)).unwrap(), 0);
    }

    #[test]
    fn long_loca_round_trips() {
        let loca = Loca::new(vec![0, 13, 21]);
        let bytes = dump_table(&loca).unwrap();
        let view = ReadLoca::read(FontData::new(&bytes), true).unwrap();
        assert_eq!(view.get_raw(2), Some(21));
        assert!(view.all_offsets_are_ascending());
    }

    #[test]
    fn descending_offsets_fail_validation() {
        assert!(dump_table(&Loca::new(vec![10, 4])).is_err());
    }
}
