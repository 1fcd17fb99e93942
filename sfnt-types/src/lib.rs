//! Common [scalar data types][data types] used in sfnt font files
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

mod fixed;
mod fword;
mod glyph_id;
mod longdatetime;
mod offset;
mod raw;
mod tag;
mod uint24;
mod version;

pub use fixed::{F2Dot14, Fixed};
pub use fword::{FWord, UfWord};
pub use glyph_id::GlyphId;
pub use longdatetime::LongDateTime;
pub use offset::{Nullable, Offset16, Offset24, Offset32};
pub use raw::{BigEndian, FixedSize, ReadScalar, Scalar};
pub use tag::{InvalidTag, Tag};
pub use uint24::Uint24;
pub use version::{MajorMinor, Version16Dot16};

/// The sfnt version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x0001_0000;
/// The sfnt version for fonts containing CFF outlines (the `OTTO` tag).
pub const CFF_SFNT_VERSION: u32 = 0x4F54_544F;
/// The (Apple-only) `true` sfnt version.
pub const TRUE_SFNT_VERSION: u32 = 0x7472_7565;
