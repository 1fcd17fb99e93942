//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use read_sfnt::tables::glyf::{
    Anchor, CompositeGlyph as ReadCompositeGlyph, CompositeGlyphFlags, ComponentTransform,
    CurvePoint, Glyph as ReadGlyph, SimpleGlyph as ReadSimpleGlyph, SimpleGlyphFlags,
};
use read_sfnt::{FontData, TopLevelTable};
use types::{GlyphId, Tag};

use super::loca::Loca;
use crate::from_obj::{FromObjRef, FromTableRef};
use crate::validate::{Validate, ValidationCtx};
use crate::write::{dump_table, FontWrite, TableWriter};

/// The [glyf] table: the concatenated bytes of all glyphs.
///
/// Built together with `loca` by the [`GlyfLocaBuilder`].
///
/// [glyf]: https://docs.microsoft.com/en-us/typography/opentype/spec/glyf
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Glyf(Vec<u8>);

impl TopLevelTable for Glyf {
    const TAG: Tag = Tag::new(b"glyf");
}

impl FontWrite for Glyf {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&self.0);
    }
}

impl Validate for Glyf {
    fn validate_impl(&self, _ctx: &mut ValidationCtx) {}
}

/// A bounding box for a glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bbox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Bbox {
    /// The smallest box containing both `self` and `other`.
    pub fn union(self, other: Bbox) -> Bbox {
        Bbox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    fn write_into(&self, writer: &mut TableWriter) {
        self.x_min.write_into(writer);
        self.y_min.write_into(writer);
        self.x_max.write_into(writer);
        self.y_max.write_into(writer);
    }
}

/// A single contour, as a list of points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contour(Vec<CurvePoint>);

impl Contour {
    /// The number of points in this contour.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if this contour is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurvePoint> {
        self.0.iter()
    }
}

impl From<Vec<CurvePoint>> for Contour {
    fn from(points: Vec<CurvePoint>) -> Self {
        Self(points)
    }
}

/// A simple (without components) glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleGlyph {
    pub bbox: Bbox,
    pub contours: Vec<Contour>,
    pub instructions: Vec<u8>,
}

/// A delta encoded as the shortest form its value permits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CoordDelta {
    // this is a repeat (set the same-value flag, write nothing)
    Skip,
    Short(u8),
    Long(i16),
}

impl CoordDelta {
    fn write_into(self, writer: &mut TableWriter) {
        match self {
            Self::Skip => (),
            Self::Short(value) => value.write_into(writer),
            Self::Long(value) => value.write_into(writer),
        }
    }
}

impl SimpleGlyph {
    /// Create a simple glyph from contours, computing the bounding box.
    pub fn from_contours(contours: Vec<Contour>) -> Self {
        let mut glyph = SimpleGlyph {
            bbox: Bbox::default(),
            contours,
            instructions: Vec::new(),
        };
        glyph.recompute_bounding_box();
        glyph
    }

    /// An iterator over all points, across contours.
    pub fn points(&self) -> impl Iterator<Item = &CurvePoint> {
        self.contours.iter().flat_map(|contour| contour.iter())
    }

    /// Recompute the bounding box from the current contours.
    pub fn recompute_bounding_box(&mut self) {
        let mut points = self.points().map(|point| (point.x, point.y));
        if let Some((mut x_min, mut y_min)) = points.next() {
            let mut x_max = x_min;
            let mut y_max = y_min;
            for (x, y) in points {
                x_min = x_min.min(x);
                y_min = y_min.min(y);
                x_max = x_max.max(x);
                y_max = y_max.max(y);
            }
            self.bbox = Bbox {
                x_min,
                y_min,
                x_max,
                y_max,
            };
        }
    }

    /// Compute the flag and delta pair for each point.
    ///
    /// Coordinates are delta-encoded from the previous point; zero deltas
    /// become "same" flags, small deltas a sign flag plus one byte.
    fn compute_point_deltas(
        &self,
    ) -> impl Iterator<Item = (SimpleGlyphFlags, CoordDelta, CoordDelta)> + '_ {
        // reused for x & y by passing in the flags
        fn flag_and_delta(
            value: i16,
            short_flag: SimpleGlyphFlags,
            same_or_pos: SimpleGlyphFlags,
        ) -> (SimpleGlyphFlags, CoordDelta) {
            const SHORT_MAX: i16 = u8::MAX as i16;
            const SHORT_MIN: i16 = -SHORT_MAX;
            match value {
                0 => (same_or_pos, CoordDelta::Skip),
                SHORT_MIN..=-1 => (short_flag, CoordDelta::Short(value.unsigned_abs() as u8)),
                1..=SHORT_MAX => (short_flag | same_or_pos, CoordDelta::Short(value as _)),
                _other => (SimpleGlyphFlags::empty(), CoordDelta::Long(value)),
            }
        }

        let (mut last_x, mut last_y) = (0, 0);
        let mut iter = self.points();
        std::iter::from_fn(move || {
            let point = iter.next()?;
            let mut flag = SimpleGlyphFlags::empty();
            let d_x = point.x.wrapping_sub(last_x);
            let d_y = point.y.wrapping_sub(last_y);
            last_x = point.x;
            last_y = point.y;

            if point.on_curve {
                flag |= SimpleGlyphFlags::ON_CURVE_POINT;
            }
            let (x_flag, x_data) = flag_and_delta(
                d_x,
                SimpleGlyphFlags::X_SHORT_VECTOR,
                SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            );
            let (y_flag, y_data) = flag_and_delta(
                d_y,
                SimpleGlyphFlags::Y_SHORT_VECTOR,
                SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            );

            flag |= x_flag | y_flag;
            Some((flag, x_data, y_data))
        })
    }
}

impl FontWrite for SimpleGlyph {
    fn write_into(&self, writer: &mut TableWriter) {
        (self.contours.len() as i16).write_into(writer);
        self.bbox.write_into(writer);
        let mut end_point = 0u16;
        let mut first = true;
        for contour in &self.contours {
            if !first {
                end_point += 1;
            }
            end_point += contour.len().saturating_sub(1) as u16;
            end_point.write_into(writer);
            first = false;
        }
        (self.instructions.len() as u16).write_into(writer);
        writer.write_slice(&self.instructions);

        let deltas: Vec<_> = self.compute_point_deltas().collect();
        // merge runs of identical flags with the repeat flag
        let mut deltas_iter = deltas.iter().peekable();
        while let Some((flag, _, _)) = deltas_iter.next() {
            let mut repeats = 0u8;
            while repeats < u8::MAX && deltas_iter.peek().map(|(next, _, _)| next) == Some(flag)
            {
                deltas_iter.next();
                repeats += 1;
            }
            if repeats > 0 {
                (*flag | SimpleGlyphFlags::REPEAT_FLAG).bits().write_into(writer);
                repeats.write_into(writer);
            } else {
                flag.bits().write_into(writer);
            }
        }
        deltas.iter().for_each(|(_, x, _)| x.write_into(writer));
        deltas.iter().for_each(|(_, _, y)| y.write_into(writer));
    }
}

impl Validate for SimpleGlyph {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("SimpleGlyph", |ctx| {
            ctx.in_field("contours", |ctx| {
                ctx.array_too_long(self.contours.len());
                let n_points: usize = self.contours.iter().map(Contour::len).sum();
                ctx.array_too_long(n_points);
                if self.contours.iter().any(Contour::is_empty) {
                    ctx.report("contours must not be empty");
                }
            });
            ctx.in_field("instructions", |ctx| {
                ctx.array_too_long(self.instructions.len());
            });
        })
    }
}

/// One component of a composite glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    /// The glyph being referenced.
    pub glyph: GlyphId,
    /// The positioning of the component.
    pub anchor: Anchor,
    /// The transform applied to the component.
    pub transform: ComponentTransform,
    /// Flags that carry options rather than structure; the structural bits
    /// (argument widths, transform kind, more-components) are computed
    /// during serialization.
    pub flags: CompositeGlyphFlags,
}

impl Component {
    pub fn new(
        glyph: GlyphId,
        anchor: Anchor,
        transform: ComponentTransform,
        flags: CompositeGlyphFlags,
    ) -> Self {
        Component {
            glyph,
            anchor,
            transform,
            flags,
        }
    }

    fn computed_flags(&self, more_components: bool, have_instructions: bool) -> CompositeGlyphFlags {
        // strip the structural bits from the user-provided flags, then
        // recompute them from the model
        const STRUCTURAL: CompositeGlyphFlags = CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS
            .union(CompositeGlyphFlags::ARGS_ARE_XY_VALUES)
            .union(CompositeGlyphFlags::WE_HAVE_A_SCALE)
            .union(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE)
            .union(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO)
            .union(CompositeGlyphFlags::MORE_COMPONENTS)
            .union(CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS);
        let mut flags = self.flags & !STRUCTURAL;
        match self.anchor {
            Anchor::Offset { x, y } => {
                flags |= CompositeGlyphFlags::ARGS_ARE_XY_VALUES;
                if i8::try_from(x).is_err() || i8::try_from(y).is_err() {
                    flags |= CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS;
                }
            }
            Anchor::Point { base, component } => {
                if u8::try_from(base).is_err() || u8::try_from(component).is_err() {
                    flags |= CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS;
                }
            }
        }
        flags |= match self.transform {
            ComponentTransform::None => CompositeGlyphFlags::empty(),
            ComponentTransform::Scale(_) => CompositeGlyphFlags::WE_HAVE_A_SCALE,
            ComponentTransform::ScaleXy { .. } => CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE,
            ComponentTransform::TwoByTwo { .. } => CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO,
        };
        if more_components {
            flags |= CompositeGlyphFlags::MORE_COMPONENTS;
        }
        if have_instructions {
            flags |= CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS;
        }
        flags
    }
}

/// A glyph composed of references to other glyphs.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeGlyph {
    pub bbox: Bbox,
    components: Vec<Component>,
    /// The instruction block placed after the last component.
    pub instructions: Vec<u8>,
}

impl CompositeGlyph {
    /// Create a new composite glyph with the given first component.
    ///
    /// A composite must reference at least one glyph, so construction
    /// requires one; more are added with [`add_component`][Self::add_component].
    pub fn new(first: Component, bbox: Bbox) -> Self {
        CompositeGlyph {
            bbox,
            components: vec![first],
            instructions: Vec::new(),
        }
    }

    /// Append a component.
    pub fn add_component(&mut self, component: Component) -> &mut Self {
        self.components.push(component);
        self
    }

    /// The glyph's components.
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

impl FontWrite for CompositeGlyph {
    fn write_into(&self, writer: &mut TableWriter) {
        (-1i16).write_into(writer);
        self.bbox.write_into(writer);
        let have_instructions = !self.instructions.is_empty();
        let last = self.components.len().saturating_sub(1);
        for (i, component) in self.components.iter().enumerate() {
            let flags = component.computed_flags(
                i != last,
                // the flag belongs on the last component, ahead of the block
                i == last && have_instructions,
            );
            flags.bits().write_into(writer);
            component.glyph.write_into(writer);
            match component.anchor {
                Anchor::Offset { x, y } => {
                    if flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS) {
                        x.write_into(writer);
                        y.write_into(writer);
                    } else {
                        (x as i8).write_into(writer);
                        (y as i8).write_into(writer);
                    }
                }
                Anchor::Point { base, component } => {
                    if flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS) {
                        base.write_into(writer);
                        component.write_into(writer);
                    } else {
                        (base as u8).write_into(writer);
                        (component as u8).write_into(writer);
                    }
                }
            }
            match component.transform {
                ComponentTransform::None => (),
                ComponentTransform::Scale(scale) => scale.write_into(writer),
                ComponentTransform::ScaleXy { x_scale, y_scale } => {
                    x_scale.write_into(writer);
                    y_scale.write_into(writer);
                }
                ComponentTransform::TwoByTwo { xx, yx, xy, yy } => {
                    xx.write_into(writer);
                    yx.write_into(writer);
                    xy.write_into(writer);
                    yy.write_into(writer);
                }
            }
        }
        if have_instructions {
            (self.instructions.len() as u16).write_into(writer);
            writer.write_slice(&self.instructions);
        }
    }
}

impl Validate for CompositeGlyph {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("CompositeGlyph", |ctx| {
            ctx.in_field("components", |ctx| {
                if self.components.is_empty() {
                    ctx.report("a composite must reference at least one glyph");
                }
            });
            ctx.in_field("instructions", |ctx| {
                ctx.array_too_long(self.instructions.len());
            });
        })
    }
}

/// Either a simple or composite glyph.
#[derive(Clone, Debug, PartialEq)]
pub enum Glyph {
    Simple(SimpleGlyph),
    Composite(CompositeGlyph),
}

impl Glyph {
    pub fn bbox(&self) -> Bbox {
        match self {
            Self::Simple(glyph) => glyph.bbox,
            Self::Composite(glyph) => glyph.bbox,
        }
    }
}

impl FontWrite for Glyph {
    fn write_into(&self, writer: &mut TableWriter) {
        match self {
            Self::Simple(glyph) => glyph.write_into(writer),
            Self::Composite(glyph) => glyph.write_into(writer),
        }
    }
}

impl Validate for Glyph {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        match self {
            Self::Simple(glyph) => glyph.validate_impl(ctx),
            Self::Composite(glyph) => glyph.validate_impl(ctx),
        }
    }
}

impl From<SimpleGlyph> for Glyph {
    fn from(src: SimpleGlyph) -> Self {
        Self::Simple(src)
    }
}

impl From<CompositeGlyph> for Glyph {
    fn from(src: CompositeGlyph) -> Self {
        Self::Composite(src)
    }
}

/// A builder for the `glyf` and `loca` tables.
///
/// The two tables must agree, so they are built together: each added glyph
/// appends its bytes to `glyf` (padded to even length) and its offset to
/// `loca`.
///
/// ```
/// # use write_sfnt::tables::glyf::{GlyfLocaBuilder, SimpleGlyph, Glyph};
/// let mut builder = GlyfLocaBuilder::new();
/// builder.add_empty_glyph(); // .notdef with no outline
/// let (glyf, loca) = builder.build();
/// ```
#[derive(Debug, Default)]
pub struct GlyfLocaBuilder {
    glyphs: Vec<u8>,
    offsets: Vec<u32>,
}

impl GlyfLocaBuilder {
    pub fn new() -> Self {
        GlyfLocaBuilder {
            glyphs: Vec::new(),
            offsets: vec![0],
        }
    }

    /// Serialize the glyph and append it to the table.
    pub fn add_glyph(&mut self, glyph: &Glyph) -> Result<&mut Self, crate::validate::ValidationReport> {
        let bytes = dump_table(glyph)?;
        self.glyphs.extend_from_slice(&bytes);
        // glyph data is kept at even offsets
        if self.glyphs.len() % 2 != 0 {
            self.glyphs.push(0);
        }
        self.offsets.push(self.glyphs.len() as u32);
        Ok(self)
    }

    /// Append a glyph with no outline.
    pub fn add_empty_glyph(&mut self) -> &mut Self {
        self.offsets.push(self.glyphs.len() as u32);
        self
    }

    /// Finish, producing the two tables.
    pub fn build(self) -> (Glyf, Loca) {
        (Glyf(self.glyphs), Loca::new(self.offsets))
    }
}

impl FromObjRef<ReadSimpleGlyph<'_>> for SimpleGlyph {
    fn from_obj_ref(obj: &ReadSimpleGlyph, _data: FontData) -> Self {
        let mut points = obj.points();
        let mut contours = Vec::new();
        let mut prev_end = 0usize;
        for end in obj.end_pts_of_contours() {
            let end = end.get() as usize + 1;
            contours.push(Contour(points.by_ref().take(end - prev_end).collect()));
            prev_end = end;
        }
        SimpleGlyph {
            bbox: Bbox {
                x_min: obj.x_min(),
                y_min: obj.y_min(),
                x_max: obj.x_max(),
                y_max: obj.y_max(),
            },
            contours,
            instructions: obj.instructions().to_vec(),
        }
    }
}

impl FromTableRef<ReadSimpleGlyph<'_>> for SimpleGlyph {}

impl FromObjRef<ReadCompositeGlyph<'_>> for CompositeGlyph {
    fn from_obj_ref(obj: &ReadCompositeGlyph, _data: FontData) -> Self {
        CompositeGlyph {
            bbox: Bbox {
                x_min: obj.x_min(),
                y_min: obj.y_min(),
                x_max: obj.x_max(),
                y_max: obj.y_max(),
            },
            components: obj
                .components()
                .map(|component| Component {
                    glyph: component.glyph,
                    anchor: component.anchor,
                    transform: component.transform,
                    flags: component.flags,
                })
                .collect(),
            instructions: obj.instructions().map(<[u8]>::to_vec).unwrap_or_default(),
        }
    }
}

impl FromTableRef<ReadCompositeGlyph<'_>> for CompositeGlyph {}

impl FromObjRef<ReadGlyph<'_>> for Glyph {
    fn from_obj_ref(obj: &ReadGlyph, data: FontData) -> Self {
        match obj {
            ReadGlyph::Simple(glyph) => Glyph::Simple(SimpleGlyph::from_obj_ref(glyph, data)),
            ReadGlyph::Composite(glyph) => {
                Glyph::Composite(CompositeGlyph::from_obj_ref(glyph, data))
            }
        }
    }
}

impl FromTableRef<ReadGlyph<'_>> for Glyph {}

#[cfg(test)]
mod tests {
    use read_sfnt::FontRead;

    use super::*;
    use crate::from_obj::ToOwnedTable;

    fn triangle() -> SimpleGlyph {
        SimpleGlyph::from_contours(vec![Contour(vec![
            CurvePoint::on_curve(0, 0),
            CurvePoint::on_curve(500, 0),
            CurvePoint::on_curve(250, 800),
        ])])
    }

    #[test]
    fn bbox_is_computed() {
        let glyph = triangle();
        assert_eq!(
            glyph.bbox,
            Bbox {
                x_min: 0,
                y_min: 0,
                x_max: 500,
                y_max: 800
            }
        );
    }

    #[test]
    fn simple_glyph_round_trip() {
        let mut glyph = triangle();
        glyph.instructions = vec![0xB0, 0x00];
        let bytes = dump_table(&glyph).unwrap();
        let view = ReadSimpleGlyph::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.number_of_contours(), 1);
        assert_eq!(view.num_points(), 3);
        assert_eq!(view.instructions(), &[0xB0, 0x00]);
        let back: SimpleGlyph = view.to_owned_table();
        assert_eq!(back, glyph);
    }

    #[test]
    fn zero_deltas_use_same_flags() {
        // two points sharing an x coordinate: the second flag carries the
        // "same" bit and no x byte is written
        let glyph = SimpleGlyph::from_contours(vec![Contour(vec![
            CurvePoint::on_curve(10, 0),
            CurvePoint::on_curve(10, 40),
        ])]);
        let bytes = dump_table(&glyph).unwrap();
        let view = ReadSimpleGlyph::read(FontData::new(&bytes)).unwrap();
        let points: Vec<_> = view.points().collect();
        assert_eq!(points[1], CurvePoint::on_curve(10, 40));
        // header 10 + end pts 2 + instruction len 2 + 2 flags + x: 1 + y: 1
        assert_eq!(bytes.len(), 18);
    }

    #[test]
    fn repeated_flags_are_merged() {
        let points: Vec<_> = (0..8)
            .map(|i| CurvePoint::on_curve(i * 10, 5))
            .collect();
        let glyph = SimpleGlyph::from_contours(vec![Contour(points)]);
        let bytes = dump_table(&glyph).unwrap();
        let view = ReadSimpleGlyph::read(FontData::new(&bytes)).unwrap();
        let decoded: Vec<_> = view.points().collect();
        assert_eq!(decoded.len(), 8);
        assert_eq!(decoded[7], CurvePoint::on_curve(70, 5));
        // the first point's flags differ (y delta nonzero), the remaining
        // seven share one repeated flag byte
        // header 10 + end pts 2 + instr len 2 + flags (1 + 2) + x 7 + y 1
        assert_eq!(bytes.len(), 25);
    }

    #[test]
    fn composite_round_trip() {
        let mut glyph = CompositeGlyph::new(
            Component::new(
                GlyphId::new(3),
                Anchor::Offset { x: 0, y: 0 },
                ComponentTransform::None,
                CompositeGlyphFlags::ROUND_XY_TO_GRID,
            ),
            Bbox {
                x_min: 0,
                y_min: 0,
                x_max: 1000,
                y_max: 1000,
            },
        );
        glyph.add_component(Component::new(
            GlyphId::new(4),
            Anchor::Offset { x: 350, y: -20 },
            ComponentTransform::ScaleXy {
                x_scale: types::F2Dot14::from_f32(0.75),
                y_scale: types::F2Dot14::from_f32(1.0),
            },
            CompositeGlyphFlags::empty(),
        ));
        glyph.instructions = vec![0x4F];
        let bytes = dump_table(&Glyph::Composite(glyph.clone())).unwrap();
        let view = ReadCompositeGlyph::read(FontData::new(&bytes)).unwrap();
        let components: Vec<_> = view.components().collect();
        assert_eq!(components.len(), 2);
        assert!(components[0]
            .flags
            .contains(CompositeGlyphFlags::MORE_COMPONENTS));
        assert!(!components[1]
            .flags
            .contains(CompositeGlyphFlags::MORE_COMPONENTS));
        // the second anchor needs word arguments, the first does not
        assert!(!components[0]
            .flags
            .contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS));
        assert!(components[1]
            .flags
            .contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS));
        assert_eq!(view.instructions(), Some(&[0x4Fu8][..]));

        let back: CompositeGlyph = view.to_owned_table();
        // the read-side flags carry the computed structural bits, so
        // compare the semantic parts
        assert_eq!(back.components()[1].anchor, glyph.components()[1].anchor);
        assert_eq!(
            back.components()[1].transform,
            glyph.components()[1].transform
        );
        assert_eq!(back.instructions, glyph.instructions);
    }

    #[test]
    fn builder_pads_and_offsets() {
        let mut builder = GlyfLocaBuilder::new();
        builder.add_empty_glyph();
        builder.add_glyph(&triangle().into()).unwrap();
        builder.add_glyph(&triangle().into()).unwrap();
        let (glyf, loca) = builder.build();
        let offsets = loca.offsets();
        assert_eq!(offsets.len(), 4);
        assert_eq!(offsets[0], 0);
        assert_eq!(offsets[1], 0); // empty glyph
        assert!(offsets[2] % 2 == 0);
        assert_eq!(offsets[3], dump_table(&glyf).unwrap().len() as u32);
    }

    #[test]
    fn empty_contours_fail_validation() {
        let glyph = SimpleGlyph {
            contours: vec![Contour(Vec::new())],
            ..Default::default()
        };
        assert!(dump_table(&glyph).is_err());
    }
}
