//! Serializing tables to big-endian bytes.

use crate::validate::{Validate, ValidationReport};

/// A type that can be written out as part of a font file.
///
/// Implementations write their fields in file order. Tables whose layout
/// contains interior offsets (such as `cmap`) compute those offsets while
/// writing; every layout in this crate is statically determined by the
/// model, so no fixup pass is needed.
pub trait FontWrite {
    /// Write our data into the provided [`TableWriter`].
    fn write_into(&self, writer: &mut TableWriter);
}

/// Attempt to serialize a table.
///
/// The table is validated first; a malformed table returns the
/// [`ValidationReport`] instead of bytes.
pub fn dump_table<T: FontWrite + Validate>(table: &T) -> Result<Vec<u8>, ValidationReport> {
    table.validate()?;
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    Ok(writer.into_data())
}

/// Accumulates the serialized bytes of one table.
#[derive(Debug, Default)]
pub struct TableWriter {
    data: Vec<u8>,
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// The number of bytes written so far.
    ///
    /// Useful for asserting that a computed offset matched the actual
    /// write position.
    pub fn position(&self) -> usize {
        self.data.len()
    }

    /// Pad with zero bytes until the position is a multiple of `n`.
    pub fn pad_to_multiple_of(&mut self, n: usize) {
        while self.data.len() % n != 0 {
            self.data.push(0);
        }
    }

    pub(crate) fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(i64);
write_be_bytes!(types::Fixed);
write_be_bytes!(types::F2Dot14);
write_be_bytes!(types::LongDateTime);
write_be_bytes!(types::Tag);
write_be_bytes!(types::Uint24);

macro_rules! write_be_scalar {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(types::Scalar::to_raw(*self).as_ref())
            }
        }
    };
}

write_be_scalar!(types::FWord);
write_be_scalar!(types::UfWord);
write_be_scalar!(types::GlyphId);
write_be_scalar!(types::MajorMinor);
write_be_scalar!(types::Version16Dot16);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: FontWrite> FontWrite for Vec<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoFields {
        a: u16,
        b: i16,
    }

    impl FontWrite for TwoFields {
        fn write_into(&self, writer: &mut TableWriter) {
            self.a.write_into(writer);
            self.b.write_into(writer);
        }
    }

    impl Validate for TwoFields {
        fn validate_impl(&self, _ctx: &mut crate::validate::ValidationCtx) {}
    }

    #[test]
    fn scalars_are_big_endian() {
        let table = TwoFields { a: 0x0102, b: -2 };
        assert_eq!(dump_table(&table).unwrap(), &[1, 2, 0xFF, 0xFE]);
    }

    #[test]
    fn padding() {
        let mut writer = TableWriter::default();
        writer.write_slice(&[1, 2, 3]);
        writer.pad_to_multiple_of(4);
        assert_eq!(writer.into_data(), &[1, 2, 3, 0]);
    }
}
