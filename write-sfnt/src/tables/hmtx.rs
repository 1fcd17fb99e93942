//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use read_sfnt::tables::hmtx::Hmtx as ReadHmtx;
use read_sfnt::{FontData, TopLevelTable};
use types::Tag;

use crate::from_obj::{FromObjRef, FromTableRef};
use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The [hmtx] table.
///
/// `hhea.number_of_h_metrics` must equal `h_metrics.len()`; the two tables
/// are built together.
///
/// [hmtx]: https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hmtx {
    pub h_metrics: Vec<LongMetric>,
    pub left_side_bearings: Vec<i16>,
}

/// An advance width and side bearing for one glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LongMetric {
    pub advance: u16,
    pub side_bearing: i16,
}

impl TopLevelTable for Hmtx {
    const TAG: Tag = Tag::new(b"hmtx");
}

impl FontWrite for Hmtx {
    fn write_into(&self, writer: &mut TableWriter) {
        for metric in &self.h_metrics {
            metric.advance.write_into(writer);
            metric.side_bearing.write_into(writer);
        }
        self.left_side_bearings.write_into(writer);
    }
}

impl Validate for Hmtx {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("hmtx", |ctx| {
            ctx.in_field("h_metrics", |ctx| {
                ctx.array_too_long(self.h_metrics.len());
                if self.h_metrics.is_empty() {
                    ctx.report("at least one long metric is required");
                }
            });
            ctx.in_field("left_side_bearings", |ctx| {
                ctx.array_too_long(self.left_side_bearings.len());
            });
        })
    }
}

impl FromObjRef<ReadHmtx<'_>> for Hmtx {
    fn from_obj_ref(obj: &ReadHmtx, _data: FontData) -> Self {
        Hmtx {
            h_metrics: obj
                .h_metrics()
                .iter()
                .map(|metric| LongMetric {
                    advance: metric.advance(),
                    side_bearing: metric.side_bearing(),
                })
                .collect(),
            left_side_bearings: obj
                .left_side_bearings()
                .iter()
                .map(|bearing| bearing.get())
                .collect(),
        }
    }
}

impl FromTableRef<ReadHmtx<'_>> for Hmtx {}

#[cfg(test)]
mod tests {
    use read_sfnt::FontReadWithArgs;

    use super::*;
    use crate::dump_table;

    #[test]
    fn round_trip_through_model() {
        let hmtx = Hmtx {
            h_metrics: vec![
                LongMetric {
                    advance: 500,
                    side_bearing: 20,
                },
                LongMetric {
                    advance: 620,
                    side_bearing: -8,
                },
            ],
            left_side_bearings: vec![15],
        };
        let bytes = dump_table(&hmtx).unwrap();
        let view = ReadHmtx::read_with_args(FontData::new(&bytes), &(2, 3)).unwrap();
        let back: Hmtx = crate::from_obj::ToOwnedTable::to_owned_table(&view);
        assert_eq!(back, hmtx);
    }

    #[test]
    fn requires_a_metric() {
        assert!(dump_table(&Hmtx::default()).is_err());
    }
}
