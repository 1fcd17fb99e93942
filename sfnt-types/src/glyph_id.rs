//! Glyph identifiers.

/// A 16-bit glyph identifier.
///
/// Glyph id 0 is reserved for the `.notdef` glyph.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GlyphId(u16);

impl GlyphId {
    /// The identifier reserved for unknown glyphs.
    pub const NOTDEF: GlyphId = GlyphId(0);

    /// Construct a new `GlyphId`.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The identifier as a `u16`.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// The identifier as a `u32`.
    pub const fn to_u32(self) -> u32 {
        self.0 as u32
    }
}

impl From<u16> for GlyphId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl crate::raw::Scalar for GlyphId {
    type Raw = [u8; 2];

    fn to_raw(self) -> Self::Raw {
        self.0.to_be_bytes()
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self(u16::from_be_bytes(raw))
    }
}

impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "GID_{}", self.0)
    }
}
