//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use bitflags::bitflags;
use types::{F2Dot14, GlyphId, Tag};

use crate::font_data::{Cursor, FontData};
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

/// The [glyf] table.
///
/// The table itself is opaque: glyph locations come from `loca`, which
/// slices this data and hands the pieces to [`Glyph::read`]. See
/// [`Loca::get_glyf`](super::loca::Loca::get_glyf).
///
/// [glyf]: https://docs.microsoft.com/en-us/typography/opentype/spec/glyf
#[derive(Clone)]
pub struct Glyf<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Glyf<'_> {
    const TAG: Tag = Tag::new(b"glyf");
}

impl<'a> Glyf<'a> {
    /// The raw table data.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }

    /// Read the glyph stored in the given byte range of this table.
    pub fn glyph(&self, range: std::ops::Range<usize>) -> Result<Glyph<'a>, ReadError> {
        let data = self.data.slice(range).ok_or(ReadError::OutOfBounds)?;
        Glyph::read(data)
    }
}

impl<'a> FontRead<'a> for Glyf<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Glyf { data })
    }
}

/// A glyph outline record: simple, or composed of other glyphs.
///
/// The two cases share a header; dispatch is on the sign of
/// `number_of_contours`.
#[derive(Clone)]
pub enum Glyph<'a> {
    Simple(SimpleGlyph<'a>),
    Composite(CompositeGlyph<'a>),
}

macro_rules! glyph_field_getter {
    ($field:ident, $ty:ty, $doc:literal) => {
        #[doc = $doc]
        pub fn $field(&self) -> $ty {
            match self {
                Self::Simple(table) => table.$field(),
                Self::Composite(table) => table.$field(),
            }
        }
    };
}

impl<'a> Glyph<'a> {
    glyph_field_getter!(
        number_of_contours,
        i16,
        "Contour count; negative for composites."
    );
    glyph_field_getter!(x_min, i16, "Minimum x of the coordinate bounds.");
    glyph_field_getter!(y_min, i16, "Minimum y of the coordinate bounds.");
    glyph_field_getter!(x_max, i16, "Maximum x of the coordinate bounds.");
    glyph_field_getter!(y_max, i16, "Maximum y of the coordinate bounds.");
}

impl<'a> FontRead<'a> for Glyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let number_of_contours: i16 = data.read_at(0)?;
        if number_of_contours < 0 {
            CompositeGlyph::read(data).map(Self::Composite)
        } else {
            SimpleGlyph::read(data).map(Self::Simple)
        }
    }
}

/// The header shared by simple and composite glyphs.
const GLYPH_HEADER_LEN: usize = 10;

macro_rules! glyph_header_impl {
    () => {
        /// The number of contours; negative for composite glyphs.
        pub fn number_of_contours(&self) -> i16 {
            self.data.read_at(0).unwrap_or_default()
        }

        /// Minimum x for coordinate data.
        pub fn x_min(&self) -> i16 {
            self.data.read_at(2).unwrap_or_default()
        }

        /// Minimum y for coordinate data.
        pub fn y_min(&self) -> i16 {
            self.data.read_at(4).unwrap_or_default()
        }

        /// Maximum x for coordinate data.
        pub fn x_max(&self) -> i16 {
            self.data.read_at(6).unwrap_or_default()
        }

        /// Maximum y for coordinate data.
        pub fn y_max(&self) -> i16 {
            self.data.read_at(8).unwrap_or_default()
        }
    };
}

bitflags! {
    /// Flags describing a point in a simple glyph's flag stream.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SimpleGlyphFlags: u8 {
        const ON_CURVE_POINT = 0x01;
        /// The x coordinate is one byte instead of two.
        const X_SHORT_VECTOR = 0x02;
        /// The y coordinate is one byte instead of two.
        const Y_SHORT_VECTOR = 0x04;
        /// The next byte repeats this flag that many additional times.
        const REPEAT_FLAG = 0x08;
        /// Sign bit for short x, "same as previous" for long x.
        const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR = 0x10;
        /// Sign bit for short y, "same as previous" for long y.
        const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR = 0x20;
        /// Contours may overlap; when used it must be set on the first flag.
        const OVERLAP_SIMPLE = 0x40;
    }
}

/// A glyph consisting of contours of its own.
#[derive(Clone)]
pub struct SimpleGlyph<'a> {
    data: FontData<'a>,
    end_pts_of_contours: &'a [types::BigEndian<u16>],
    instructions: &'a [u8],
    /// the flag + coordinate stream
    glyph_data: &'a [u8],
}

impl<'a> SimpleGlyph<'a> {
    glyph_header_impl!();

    /// One point index per contour: the index of its last point.
    pub fn end_pts_of_contours(&self) -> &'a [types::BigEndian<u16>] {
        self.end_pts_of_contours
    }

    /// The hinting instructions.
    pub fn instructions(&self) -> &'a [u8] {
        self.instructions
    }

    /// The raw flag and coordinate bytes.
    pub fn glyph_data(&self) -> &'a [u8] {
        self.glyph_data
    }

    /// The total number of points.
    pub fn num_points(&self) -> usize {
        self.end_pts_of_contours
            .last()
            .map(|last| last.get() as usize + 1)
            .unwrap_or(0)
    }

    /// Returns true if the contours in the simple glyph may overlap.
    pub fn has_overlapping_contours(&self) -> bool {
        // Spec says: "When used, it must be set on the first flag byte
        // for the glyph."
        FontData::new(self.glyph_data)
            .read_at::<u8>(0)
            .map(|flag| SimpleGlyphFlags::from_bits_truncate(flag).contains(SimpleGlyphFlags::OVERLAP_SIMPLE))
            .unwrap_or_default()
    }

    /// Returns an iterator over the points in the glyph.
    ///
    /// Flags are run-length expanded and coordinate deltas accumulated, so
    /// the items are absolute positions.
    pub fn points(&self) -> PointIter<'a> {
        self.points_impl()
            .unwrap_or_else(|| PointIter::new(&[], &[], &[], 0))
    }

    fn points_impl(&self) -> Option<PointIter<'a>> {
        let n_points = self.num_points();
        let lens =
            resolve_coords_len(self.glyph_data, u16::try_from(n_points).ok()?).ok()?;
        let total_len = lens.flags + lens.x_coords + lens.y_coords;
        if self.glyph_data.len() < total_len as usize {
            return None;
        }
        let (flags, data) = self.glyph_data.split_at(lens.flags as usize);
        let (x_coords, y_coords) = data.split_at(lens.x_coords as usize);
        Some(PointIter::new(flags, x_coords, y_coords, n_points))
    }
}

impl<'a> FontRead<'a> for SimpleGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let number_of_contours: i16 = data.read_at(0)?;
        if number_of_contours < 0 {
            return Err(ReadError::MalformedData(
                "negative contour count in a simple glyph",
            ));
        }
        let mut cursor = data.cursor();
        cursor.advance_by(GLYPH_HEADER_LEN);
        let end_pts_of_contours = cursor.read_array(number_of_contours as usize)?;
        let instruction_length: u16 = cursor.read()?;
        let instructions = cursor.read_array(instruction_length as usize)?;
        let glyph_data_start = cursor.position()?;
        let glyph_data = data
            .split_off(glyph_data_start)
            .ok_or(ReadError::OutOfBounds)?
            .as_bytes();
        Ok(SimpleGlyph {
            data,
            end_pts_of_contours,
            instructions,
            glyph_data,
        })
    }
}

/// Point with an associated on-curve flag in a simple glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    /// X coordinate.
    pub x: i16,
    /// Y coordinate.
    pub y: i16,
    /// True if this is an on-curve point.
    pub on_curve: bool,
}

impl CurvePoint {
    /// Construct a new `CurvePoint`.
    pub fn new(x: i16, y: i16, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    /// Convenience method to construct an on-curve point.
    pub fn on_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, true)
    }

    /// Convenience method to construct an off-curve point.
    pub fn off_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, false)
    }
}

/// Iterator over the decoded points of a simple glyph.
#[derive(Clone)]
pub struct PointIter<'a> {
    flags: Cursor<'a>,
    x_coords: Cursor<'a>,
    y_coords: Cursor<'a>,
    flag_repeats: u8,
    cur_flags: SimpleGlyphFlags,
    cur_x: i16,
    cur_y: i16,
    points_remaining: usize,
}

impl Iterator for PointIter<'_> {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.points_remaining == 0 {
            return None;
        }
        self.points_remaining -= 1;
        self.advance_flags()?;
        self.advance_points();
        let is_on_curve = self.cur_flags.contains(SimpleGlyphFlags::ON_CURVE_POINT);
        Some(CurvePoint::new(self.cur_x, self.cur_y, is_on_curve))
    }
}

impl<'a> PointIter<'a> {
    fn new(flags: &'a [u8], x_coords: &'a [u8], y_coords: &'a [u8], n_points: usize) -> Self {
        Self {
            flags: FontData::new(flags).cursor(),
            x_coords: FontData::new(x_coords).cursor(),
            y_coords: FontData::new(y_coords).cursor(),
            flag_repeats: 0,
            cur_flags: SimpleGlyphFlags::empty(),
            cur_x: 0,
            cur_y: 0,
            points_remaining: n_points,
        }
    }

    fn advance_flags(&mut self) -> Option<()> {
        if self.flag_repeats == 0 {
            self.cur_flags = SimpleGlyphFlags::from_bits_truncate(self.flags.read().ok()?);
            self.flag_repeats = self
                .cur_flags
                .contains(SimpleGlyphFlags::REPEAT_FLAG)
                .then(|| self.flags.read().ok())
                .flatten()
                .unwrap_or(0)
                + 1;
        }
        self.flag_repeats -= 1;
        Some(())
    }

    fn advance_points(&mut self) {
        let x_short = self.cur_flags.contains(SimpleGlyphFlags::X_SHORT_VECTOR);
        let x_same_or_pos = self
            .cur_flags
            .contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR);
        let y_short = self.cur_flags.contains(SimpleGlyphFlags::Y_SHORT_VECTOR);
        let y_same_or_pos = self
            .cur_flags
            .contains(SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR);

        let delta_x = match (x_short, x_same_or_pos) {
            (true, false) => -(self.x_coords.read::<u8>().unwrap_or(0) as i16),
            (true, true) => self.x_coords.read::<u8>().unwrap_or(0) as i16,
            (false, false) => self.x_coords.read::<i16>().unwrap_or(0),
            _ => 0,
        };

        let delta_y = match (y_short, y_same_or_pos) {
            (true, false) => -(self.y_coords.read::<u8>().unwrap_or(0) as i16),
            (true, true) => self.y_coords.read::<u8>().unwrap_or(0) as i16,
            (false, false) => self.y_coords.read::<i16>().unwrap_or(0),
            _ => 0,
        };

        self.cur_x = self.cur_x.wrapping_add(delta_x);
        self.cur_y = self.cur_y.wrapping_add(delta_y);
    }
}

struct FieldLengths {
    flags: u32,
    x_coords: u32,
    y_coords: u32,
}

/// Resolves coordinate array lengths.
///
/// The lengths depend on the flags, so the whole flag stream has to be
/// processed to find them.
fn resolve_coords_len(data: &[u8], points_total: u16) -> Result<FieldLengths, ReadError> {
    let mut cursor = FontData::new(data).cursor();
    let mut flags_left = u32::from(points_total);
    let mut x_coords_len = 0;
    let mut y_coords_len = 0;
    while flags_left > 0 {
        let flags = SimpleGlyphFlags::from_bits_truncate(cursor.read::<u8>()?);

        // The number of times a glyph point repeats.
        let repeats = if flags.contains(SimpleGlyphFlags::REPEAT_FLAG) {
            let repeats: u8 = cursor.read()?;
            u32::from(repeats) + 1
        } else {
            1
        };

        if repeats > flags_left {
            return Err(ReadError::MalformedData("repeat count too large in glyf"));
        }

        if flags.contains(SimpleGlyphFlags::X_SHORT_VECTOR) {
            x_coords_len += repeats;
        } else if !flags.contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
            x_coords_len += repeats * 2;
        }
        if flags.contains(SimpleGlyphFlags::Y_SHORT_VECTOR) {
            y_coords_len += repeats;
        } else if !flags.contains(SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR) {
            y_coords_len += repeats * 2;
        }

        flags_left -= repeats;
    }
    Ok(FieldLengths {
        flags: cursor.position().unwrap_or_default() as u32,
        x_coords: x_coords_len,
        y_coords: y_coords_len,
    })
}

bitflags! {
    /// Flags of one component record in a composite glyph.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct CompositeGlyphFlags: u16 {
        /// Arguments are 16-bit rather than 8-bit.
        const ARG_1_AND_2_ARE_WORDS = 0x0001;
        /// Arguments are an x/y offset rather than point numbers.
        const ARGS_ARE_XY_VALUES = 0x0002;
        const ROUND_XY_TO_GRID = 0x0004;
        /// A single scale applies to both axes.
        const WE_HAVE_A_SCALE = 0x0008;
        /// Another component follows this one.
        const MORE_COMPONENTS = 0x0020;
        /// Separate scales for x and y.
        const WE_HAVE_AN_X_AND_Y_SCALE = 0x0040;
        /// A full 2×2 transform.
        const WE_HAVE_A_TWO_BY_TWO = 0x0080;
        /// An instruction block follows the last component.
        const WE_HAVE_INSTRUCTIONS = 0x0100;
        const USE_MY_METRICS = 0x0200;
        const OVERLAP_COMPOUND = 0x0400;
        const SCALED_COMPONENT_OFFSET = 0x0800;
        const UNSCALED_COMPONENT_OFFSET = 0x1000;
    }
}

/// A glyph composed of references to other glyphs.
#[derive(Clone)]
pub struct CompositeGlyph<'a> {
    data: FontData<'a>,
}

impl<'a> CompositeGlyph<'a> {
    glyph_header_impl!();

    /// An iterator over the component records.
    ///
    /// Iteration stops after the first record without
    /// [`MORE_COMPONENTS`](CompositeGlyphFlags::MORE_COMPONENTS).
    pub fn components(&self) -> ComponentIter<'a> {
        let mut cursor = self.data.cursor();
        cursor.advance_by(GLYPH_HEADER_LEN);
        ComponentIter {
            cursor,
            done: false,
        }
    }

    /// The trailing hinting instructions, if any component declares them.
    pub fn instructions(&self) -> Option<&'a [u8]> {
        let mut components = self.components();
        let mut have_instructions = false;
        for component in components.by_ref() {
            have_instructions |= component
                .flags
                .contains(CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS);
        }
        if components.done && have_instructions {
            let mut cursor = components.cursor;
            let len: u16 = cursor.read().ok()?;
            cursor.read_array(len as usize).ok()
        } else {
            None
        }
    }
}

impl<'a> FontRead<'a> for CompositeGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let number_of_contours: i16 = data.read_at(0)?;
        if number_of_contours >= 0 {
            return Err(ReadError::MalformedData(
                "non-negative contour count in a composite glyph",
            ));
        }
        data.check_min_len(GLYPH_HEADER_LEN)?;
        Ok(CompositeGlyph { data })
    }
}

/// The positioning of a component: an offset, or point-matching numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// An x/y offset applied to the component.
    Offset { x: i16, y: i16 },
    /// A point of the compound so far matched to a point of the component.
    Point { base: u16, component: u16 },
}

/// The scaling applied to a component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComponentTransform {
    None,
    /// One scale factor for both axes.
    Scale(F2Dot14),
    /// Separate x and y scale factors.
    ScaleXy { x_scale: F2Dot14, y_scale: F2Dot14 },
    /// A full 2×2 matrix, in `xx yx xy yy` order.
    TwoByTwo {
        xx: F2Dot14,
        yx: F2Dot14,
        xy: F2Dot14,
        yy: F2Dot14,
    },
}

/// One component of a composite glyph.
#[derive(Clone, Debug)]
pub struct Component {
    pub flags: CompositeGlyphFlags,
    pub glyph: GlyphId,
    pub anchor: Anchor,
    pub transform: ComponentTransform,
}

/// An iterator over the components of a composite glyph.
#[derive(Clone)]
pub struct ComponentIter<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl Iterator for ComponentIter<'_> {
    type Item = Component;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let flags = CompositeGlyphFlags::from_bits_truncate(self.cursor.read::<u16>().ok()?);
        let glyph = GlyphId::new(self.cursor.read::<u16>().ok()?);
        let anchor = if flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS) {
            let arg1 = self.cursor.read::<i16>().ok()?;
            let arg2 = self.cursor.read::<i16>().ok()?;
            if flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES) {
                Anchor::Offset { x: arg1, y: arg2 }
            } else {
                Anchor::Point {
                    base: arg1 as u16,
                    component: arg2 as u16,
                }
            }
        } else {
            let arg1 = self.cursor.read::<u8>().ok()?;
            let arg2 = self.cursor.read::<u8>().ok()?;
            if flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES) {
                Anchor::Offset {
                    x: arg1 as i8 as i16,
                    y: arg2 as i8 as i16,
                }
            } else {
                Anchor::Point {
                    base: arg1 as u16,
                    component: arg2 as u16,
                }
            }
        };
        let transform = if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
            ComponentTransform::Scale(self.cursor.read().ok()?)
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
            ComponentTransform::ScaleXy {
                x_scale: self.cursor.read().ok()?,
                y_scale: self.cursor.read().ok()?,
            }
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
            ComponentTransform::TwoByTwo {
                xx: self.cursor.read().ok()?,
                yx: self.cursor.read().ok()?,
                xy: self.cursor.read().ok()?,
                yy: self.cursor.read().ok()?,
            }
        } else {
            ComponentTransform::None
        };
        if !flags.contains(CompositeGlyphFlags::MORE_COMPONENTS) {
            self.done = true;
        }
        Some(Component {
            flags,
            glyph,
            anchor,
            transform,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    /// A triangle with mixed coordinate encodings.
    fn simple_glyph_data() -> BeBuffer {
        let on = SimpleGlyphFlags::ON_CURVE_POINT;
        let x_short_pos = SimpleGlyphFlags::X_SHORT_VECTOR
            | SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR;
        let x_same = SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR;
        let y_short_neg = SimpleGlyphFlags::Y_SHORT_VECTOR;
        BeBuffer::new()
            .push(1i16) // one contour
            .push(0i16) // x_min
            .push(0i16)
            .push(120i16) // x_max
            .push(300i16)
            .push(2u16) // end point of contour 0
            .push(1u16) // instruction length
            .push(0xAFu8) // one instruction byte
            // flags: 3 points
            .push((on | x_short_pos).bits())
            .push((on | x_same).bits()) // x unchanged, y long
            .push((on | x_short_pos | y_short_neg).bits())
            // x deltas: 120 (short), (same), 0? no: third point x delta 20
            .push(120u8)
            .push(20u8)
            // y deltas: 0 (long, omitted? no: first y long 0), 300 (long), -250 (short)
            .push(0i16)
            .push(300i16)
            .push(250u8)
    }

    #[test]
    fn simple_glyph_points() {
        let buf = simple_glyph_data();
        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert_eq!(glyph.number_of_contours(), 1);
        assert_eq!(glyph.num_points(), 3);
        assert_eq!(glyph.instructions(), &[0xAF]);
        let points: Vec<_> = glyph.points().collect();
        assert_eq!(
            points,
            vec![
                CurvePoint::on_curve(120, 0),
                CurvePoint::on_curve(120, 300),
                CurvePoint::on_curve(140, 50),
            ]
        );
    }

    #[test]
    fn flag_repeats_expand() {
        let on_repeat = SimpleGlyphFlags::ON_CURVE_POINT
            | SimpleGlyphFlags::X_SHORT_VECTOR
            | SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR
            | SimpleGlyphFlags::Y_SHORT_VECTOR
            | SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR
            | SimpleGlyphFlags::REPEAT_FLAG;
        let buf = BeBuffer::new()
            .push(1i16)
            .extend([0i16; 4]) // bbox
            .push(3u16) // 4 points
            .push(0u16) // no instructions
            .push(on_repeat.bits())
            .push(3u8) // + 3 repeats = 4 points
            .extend([10u8, 10, 10, 10]) // x deltas
            .extend([1u8, 2, 3, 4]); // y deltas
        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        let points: Vec<_> = glyph.points().collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[3], CurvePoint::on_curve(40, 10));
    }

    fn composite_data(second_flags: CompositeGlyphFlags) -> BeBuffer {
        let first = CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS
            | CompositeGlyphFlags::ARGS_ARE_XY_VALUES
            | CompositeGlyphFlags::MORE_COMPONENTS;
        let second = CompositeGlyphFlags::ARGS_ARE_XY_VALUES
            | CompositeGlyphFlags::WE_HAVE_A_SCALE
            | second_flags;
        BeBuffer::new()
            .push(-1i16)
            .extend([0i16, 0, 500, 500])
            .push(first.bits())
            .push(4u16) // glyph id
            .push(250i16) // dx
            .push(0i16) // dy
            .push(second.bits())
            .push(9u16) // glyph id
            .push(0u8) // dx
            .push(50u8) // dy
            .push(F2Dot14::from_f32(0.5))
    }

    #[test]
    fn composite_components_terminate() {
        let buf = composite_data(CompositeGlyphFlags::empty());
        let glyph = CompositeGlyph::read(buf.font_data()).unwrap();
        let components: Vec<_> = glyph.components().collect();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].glyph, GlyphId::new(4));
        assert_eq!(components[0].anchor, Anchor::Offset { x: 250, y: 0 });
        assert_eq!(components[1].glyph, GlyphId::new(9));
        assert_eq!(components[1].anchor, Anchor::Offset { x: 0, y: 50 });
        assert_eq!(
            components[1].transform,
            ComponentTransform::Scale(F2Dot14::from_f32(0.5))
        );
        assert_eq!(glyph.instructions(), None);
    }

    #[test]
    fn composite_trailing_instructions() {
        let buf = composite_data(CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS)
            .push(2u16)
            .extend([0xB0u8, 0x01]);
        let glyph = CompositeGlyph::read(buf.font_data()).unwrap();
        assert_eq!(glyph.components().count(), 2);
        assert_eq!(glyph.instructions(), Some(&[0xB0u8, 0x01][..]));
    }

    #[test]
    fn dispatch_on_contour_sign() {
        let simple = simple_glyph_data();
        assert!(matches!(
            Glyph::read(simple.font_data()),
            Ok(Glyph::Simple(_))
        ));
        let composite = composite_data(CompositeGlyphFlags::empty());
        assert!(matches!(
            Glyph::read(composite.font_data()),
            Ok(Glyph::Composite(_))
        ));
    }
}
