//! The [head (Font Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use read_sfnt::tables::head::{Head as ReadHead, MAGIC_NUMBER};
use read_sfnt::{FontData, TopLevelTable};
use types::{Fixed, LongDateTime, MajorMinor, Tag};

use crate::from_obj::{FromObjRef, FromTableRef};
use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The [head] table.
///
/// The `checksum_adjustment` field is owned by
/// [`FontBuilder`](crate::FontBuilder): whatever value the model carries is
/// overwritten when the font is assembled.
///
/// [head]: https://docs.microsoft.com/en-us/typography/opentype/spec/head
#[derive(Clone, Debug, PartialEq)]
pub struct Head {
    pub font_revision: Fixed,
    pub checksum_adjustment: u32,
    pub flags: u16,
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub index_to_loc_format: i16,
    pub glyph_data_format: i16,
}

impl Default for Head {
    fn default() -> Self {
        Head {
            font_revision: Fixed::from_i32(1),
            checksum_adjustment: 0,
            flags: 0,
            units_per_em: 1000,
            created: LongDateTime::new(0),
            modified: LongDateTime::new(0),
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
            mac_style: 0,
            lowest_rec_ppem: 6,
            font_direction_hint: 2,
            index_to_loc_format: 0,
            glyph_data_format: 0,
        }
    }
}

impl TopLevelTable for Head {
    const TAG: Tag = Tag::new(b"head");
}

impl FontWrite for Head {
    fn write_into(&self, writer: &mut TableWriter) {
        MajorMinor::VERSION_1_0.write_into(writer);
        self.font_revision.write_into(writer);
        self.checksum_adjustment.write_into(writer);
        MAGIC_NUMBER.write_into(writer);
        self.flags.write_into(writer);
        self.units_per_em.write_into(writer);
        self.created.write_into(writer);
        self.modified.write_into(writer);
        self.x_min.write_into(writer);
        self.y_min.write_into(writer);
        self.x_max.write_into(writer);
        self.y_max.write_into(writer);
        self.mac_style.write_into(writer);
        self.lowest_rec_ppem.write_into(writer);
        self.font_direction_hint.write_into(writer);
        self.index_to_loc_format.write_into(writer);
        self.glyph_data_format.write_into(writer);
    }
}

impl Validate for Head {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("head", |ctx| {
            ctx.in_field("units_per_em", |ctx| {
                if !(16..=16384).contains(&self.units_per_em) {
                    ctx.report("units_per_em must be in the range 16..=16384");
                }
            });
            ctx.in_field("index_to_loc_format", |ctx| {
                if !(0..=1).contains(&self.index_to_loc_format) {
                    ctx.report("index_to_loc_format must be 0 (short) or 1 (long)");
                }
            });
        })
    }
}

impl FromObjRef<ReadHead<'_>> for Head {
    fn from_obj_ref(obj: &ReadHead, _data: FontData) -> Self {
        Head {
            font_revision: obj.font_revision(),
            checksum_adjustment: obj.checksum_adjustment(),
            flags: obj.flags(),
            units_per_em: obj.units_per_em(),
            created: obj.created(),
            modified: obj.modified(),
            x_min: obj.x_min(),
            y_min: obj.y_min(),
            x_max: obj.x_max(),
            y_max: obj.y_max(),
            mac_style: obj.mac_style(),
            lowest_rec_ppem: obj.lowest_rec_ppem(),
            font_direction_hint: obj.font_direction_hint(),
            index_to_loc_format: obj.index_to_loc_format(),
            glyph_data_format: obj.glyph_data_format(),
        }
    }
}

impl FromTableRef<ReadHead<'_>> for Head {}

#[cfg(test)]
mod tests {
    use read_sfnt::FontRead;

    use super::*;
    use crate::dump_table;
    use crate::from_obj::ToOwnedTable;

    #[test]
    fn round_trip_through_model() {
        let head = Head {
            font_revision: Fixed::from_f32(1.5),
            units_per_em: 2048,
            x_min: -100,
            y_max: 900,
            index_to_loc_format: 1,
            ..Default::default()
        };
        let bytes = dump_table(&head).unwrap();
        assert_eq!(bytes.len(), ReadHead::LEN);
        let view = ReadHead::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.magic_number(), MAGIC_NUMBER);
        assert_eq!(view.units_per_em(), 2048);
        let back: Head = view.to_owned_table();
        assert_eq!(back, head);
    }

    #[test]
    fn rejects_bad_upem() {
        let head = Head {
            units_per_em: 12,
            ..Default::default()
        };
        assert!(dump_table(&head).is_err());
    }
}
