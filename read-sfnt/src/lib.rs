//! Reading sfnt font tables
//!
//! This crate provides memory safe zero-allocation parsing of font files.
//! It is unopinionated, and attempts to provide raw access to the underlying
//! font data as it is described in the [OpenType specification][spec].
//!
//! Every table is a thin view over a range of the input bytes: reads happen
//! on demand, and a corrupt offset surfaces as an error at the access site
//! rather than at load time. Only the table *directory* is validated while
//! loading, so broken fonts can still be opened and inspected.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use read_sfnt::{FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! // Single fonts only. for font collections (.ttc) use FontRef::from_index
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let head = font.head().expect("missing 'head' table");
//! let maxp = font.maxp().expect("missing 'maxp' table");
//!
//! println!("font version {} containing {} glyphs", head.font_revision(), maxp.num_glyphs());
//! ```
//!
//! [spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/

#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod offset;
mod read;
mod table_directory;
mod table_provider;
pub mod tables;

#[doc(hidden)]
pub mod test_helpers;

pub use font_data::{Cursor, FontData};
pub use offset::{Offset, ResolveNullableOffset, ResolveOffset};
pub use read::{FontRead, FontReadWithArgs, Format, ReadArgs, ReadError};
pub use table_directory::{TTCHeader, TableDirectory, TableRecord, TTC_HEADER_TAG};
pub use table_provider::{TableProvider, TopLevelTable};

/// Public re-export of the sfnt-types crate.
pub extern crate sfnt_types as types;

use types::{Tag, CFF_SFNT_VERSION, TRUE_SFNT_VERSION, TT_SFNT_VERSION};

/// Reference to the content of a font or font collection file.
#[derive(Clone)]
pub enum FileRef<'a> {
    /// A single font.
    Font(FontRef<'a>),
    /// A collection of fonts.
    Collection(CollectionRef<'a>),
}

impl<'a> FileRef<'a> {
    /// Creates a new reference to a file representing a font or font collection.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Ok(if let Ok(collection) = CollectionRef::new(data) {
            Self::Collection(collection)
        } else {
            Self::Font(FontRef::new(data)?)
        })
    }

    /// Returns an iterator over the fonts contained in the file.
    pub fn fonts(&self) -> impl Iterator<Item = Result<FontRef<'a>, ReadError>> + 'a + Clone {
        let (iter_one, iter_two) = match self {
            Self::Font(font) => (Some(Ok(font.clone())), None),
            Self::Collection(collection) => (None, Some(collection.iter())),
        };
        iter_two.into_iter().flatten().chain(iter_one)
    }
}

/// Reference to the content of a font collection file.
///
/// Member fonts may share table storage; each [`FontRef`] produced here
/// resolves its directory against the whole file, so shared ranges are
/// decoded from the same bytes rather than copied.
#[derive(Clone)]
pub struct CollectionRef<'a> {
    data: FontData<'a>,
    header: TTCHeader<'a>,
}

impl<'a> CollectionRef<'a> {
    /// Creates a new reference to a font collection.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let header = TTCHeader::read(data)?;
        Ok(Self { data, header })
    }

    /// Returns the number of fonts in the collection.
    pub fn len(&self) -> u32 {
        self.header.num_fonts()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the font in the collection at the specified index.
    pub fn get(&self, index: u32) -> Result<FontRef<'a>, ReadError> {
        let offset = self
            .header
            .table_directory_offsets()
            .get(index as usize)
            .ok_or(ReadError::InvalidCollectionIndex(index))?
            .get() as usize;
        let table_dir_data = self.data.slice(offset..).ok_or(ReadError::OutOfBounds)?;
        FontRef::with_table_directory(self.data, TableDirectory::read(table_dir_data)?)
    }

    /// Returns an iterator over the fonts in the collection.
    pub fn iter(&self) -> impl Iterator<Item = Result<FontRef<'a>, ReadError>> + 'a + Clone {
        let copy = self.clone();
        (0..self.len()).map(move |ix| copy.get(ix))
    }
}

/// Reference to an in-memory font.
///
/// This is a simple implementation of the [`TableProvider`] trait backed
/// by a borrowed slice containing font data.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    /// The font's table directory.
    pub table_directory: TableDirectory<'a>,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must be a single font (not a font collection) and must begin
    /// with a table directory to be considered valid.
    ///
    /// To load a font from a font collection, use [`FontRef::from_index`]
    /// instead.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        Self::with_table_directory(data, TableDirectory::read(data)?)
    }

    /// Creates a new reference to the font at `index` in the given data.
    ///
    /// This accepts either font collection (ttc) or single font (ttf/otf)
    /// files. If a single font file is provided, the index must be 0.
    pub fn from_index(data: &'a [u8], index: u32) -> Result<Self, ReadError> {
        let file = FileRef::new(data)?;
        match file {
            FileRef::Font(font) => {
                if index == 0 {
                    Ok(font)
                } else {
                    Err(ReadError::InvalidCollectionIndex(index))
                }
            }
            FileRef::Collection(collection) => collection.get(index),
        }
    }

    /// Returns the data for the table with the specified tag, if present.
    ///
    /// Tables with tags this crate knows nothing about are served the same
    /// way as known ones: the raw bytes are always available, which lets
    /// tools copy or inspect tables they cannot decode.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_directory
            .table_records()
            .binary_search_by(|rec| rec.tag().cmp(&tag))
            .ok()
            .and_then(|idx| self.table_directory.table_records().get(idx))
            .and_then(|record| {
                let start = record.offset() as usize;
                let len = record.length() as usize;
                self.data.slice(start..start + len)
            })
    }

    /// Compare each table's computed checksum against the directory's claim.
    ///
    /// Returns one [`ReadError::ChecksumMismatch`] per disagreeing table.
    /// This is an opt-in verification pass: loading never checks checksums,
    /// and a mismatch does not prevent the table from being used.
    ///
    /// The `head` table is summed with its `checksum_adjustment` field
    /// zeroed, per the computation that produced the stored value.
    pub fn verify_checksums(&self) -> Vec<ReadError> {
        let mut mismatches = Vec::new();
        for record in self.table_directory.table_records() {
            let tag = record.tag();
            let Some(data) = self.table_data(tag) else {
                mismatches.push(ReadError::TableIsMissing(tag));
                continue;
            };
            let mut sum = data.checksum();
            if tag == tables::head::Head::TAG {
                // back out the adjustment so the comparison sees the value
                // that was summed when the font was built
                if let Ok(adjustment) =
                    data.read_at::<u32>(tables::head::Head::CHECKSUM_ADJUSTMENT_OFFSET)
                {
                    sum = sum.wrapping_sub(adjustment);
                }
            }
            if sum != record.checksum() {
                mismatches.push(ReadError::ChecksumMismatch(tag));
            }
        }
        mismatches
    }

    fn with_table_directory(
        data: FontData<'a>,
        table_directory: TableDirectory<'a>,
    ) -> Result<Self, ReadError> {
        if ![TT_SFNT_VERSION, CFF_SFNT_VERSION, TRUE_SFNT_VERSION]
            .contains(&table_directory.sfnt_version())
        {
            return Err(ReadError::InvalidSfnt(table_directory.sfnt_version()));
        }
        table_directory.check_ordering()?;
        for record in table_directory.table_records() {
            let start = record.offset() as usize;
            let end = start
                .checked_add(record.length() as usize)
                .ok_or(ReadError::OutOfBounds)?;
            if end > data.len() {
                return Err(ReadError::OutOfBounds);
            }
        }
        Ok(FontRef {
            data,
            table_directory,
        })
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_data(tag)
    }
}
