//! Traits for interpreting font data

use types::Tag;

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for all font tables that are self-describing:
/// that is, tables that do not require any external state in order to
/// interpret their underlying bytes. (Tables that require external state
/// implement [`FontReadWithArgs`] instead.)
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    ///
    /// In the case of a table, this method is responsible for ensuring the
    /// input data is consistent: that any versioned fields are present as
    /// required by the version, and that any array lengths are not
    /// out-of-bounds.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// A trait for a type that needs additional arguments to be read.
pub trait ReadArgs {
    type Args: Copy;
}

/// A trait for types that require external data in order to be constructed.
///
/// Any type that requires external arguments also has a custom constructor
/// where those arguments can be passed like normal.
pub trait FontReadWithArgs<'a>: Sized + ReadArgs {
    /// Read an item of this type, using the provided args.
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError>;
}

/// A trait for tables that have multiple possible formats.
pub trait Format<T> {
    /// The format value for this table.
    const FORMAT: T;
}

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq)]
pub enum ReadError {
    /// A read, write or slice exceeded the bounds of the buffer.
    OutOfBounds,
    /// A 32-bit unsigned value did not fit in a signed host integer.
    OutOfRange,
    /// A subtable format number was not recognized.
    InvalidFormat(i64),
    /// The font header did not carry a known sfnt version.
    InvalidSfnt(u32),
    /// The collection header did not carry the `ttcf` tag.
    InvalidTtc(Tag),
    /// A font index outside the bounds of a collection.
    InvalidCollectionIndex(u32),
    /// An array length that is not a multiple of the item size.
    InvalidArrayLen,
    /// An offset was unexpectedly null.
    NullOffset,
    /// A table required by the current operation is not in the font.
    TableIsMissing(Tag),
    /// A structural invariant of a table did not hold.
    MalformedData(&'static str),
    /// The table directory contains the same tag twice.
    DuplicateTag(Tag),
    /// The table directory records are not sorted by tag.
    UnorderedDirectory,
    /// A computed table checksum did not match the directory's claim.
    ///
    /// Only reported by opt-in verification; never raised while loading.
    ChecksumMismatch(Tag),
    /// A glyph id outside the range covered by a bitmap index subtable.
    GlyphOutOfRange(u16),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::OutOfRange => write!(f, "A value was outside the representable range"),
            ReadError::InvalidFormat(x) => write!(f, "Invalid format '{x}'"),
            ReadError::InvalidSfnt(ver) => write!(f, "Invalid sfnt version 0x{ver:08X}"),
            ReadError::InvalidTtc(tag) => write!(f, "Invalid ttc tag {tag}"),
            ReadError::InvalidCollectionIndex(ix) => {
                write!(f, "Invalid index {ix} for font collection")
            }
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::NullOffset => write!(f, "An offset was unexpectedly null"),
            ReadError::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
            ReadError::DuplicateTag(tag) => write!(f, "the {tag} table occurs twice"),
            ReadError::UnorderedDirectory => {
                write!(f, "the table directory is not sorted by tag")
            }
            ReadError::ChecksumMismatch(tag) => {
                write!(f, "checksum mismatch in the {tag} table")
            }
            ReadError::GlyphOutOfRange(gid) => {
                write!(f, "glyph {gid} is outside of the subtable's range")
            }
        }
    }
}

impl std::error::Error for ReadError {}
