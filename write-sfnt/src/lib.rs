//! Building and editing sfnt font tables
//!
//! This crate is the writing counterpart of [`read-sfnt`][read_sfnt]: where
//! that crate exposes views over existing bytes, this one provides owned,
//! mutable versions of the same tables, which can be compiled back into
//! valid font binaries.
//!
//! A table model is obtained either by constructing it directly, or by
//! converting a parsed view with [`ToOwnedTable`](from_obj::ToOwnedTable).
//! Models carry no cached bytes: once converted, the model is the single
//! source of truth, and serialization always recomputes the byte layout.
//! Tables that are *not* edited never take this path at all; the
//! [`FontBuilder`] passes their original bytes through untouched.
//!
//! # Example
//!
//! ```no_run
//! # fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
//! # let font_bytes = Vec::new();
//! use read_sfnt::{FontRef, TableProvider};
//! use write_sfnt::{from_obj::ToOwnedTable, FontBuilder};
//!
//! let font = FontRef::new(&font_bytes)?;
//! let mut head: write_sfnt::tables::head::Head = font.head()?.to_owned_table();
//! head.units_per_em = 2048;
//! let new_bytes = FontBuilder::new()
//!     .add_table(&head)?
//!     .copy_missing_tables(font)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

mod error;
pub mod font_builder;
pub mod from_obj;
pub mod tables;
pub mod util;
pub mod validate;
mod write;

pub use error::BuildError;
pub use font_builder::FontBuilder;
pub use write::{dump_table, FontWrite, TableWriter};

/// Public re-export of the read crate.
pub extern crate read_sfnt as read;
/// Public re-export of the types crate.
pub extern crate sfnt_types as types;
