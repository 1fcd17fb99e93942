//! Raw font types: unaligned big-endian bytes.

mod sealed {
    /// A fixed-size array of big-endian bytes.
    ///
    /// This is the raw representation of every scalar; it exists so that
    /// [`BigEndian`](super::BigEndian) can be stored unaligned inside record
    /// structs that mirror the on-disk layout.
    pub trait BeByteArray: Copy + AsRef<[u8]> {
        fn from_slice(slice: &[u8]) -> Option<Self>;
    }

    macro_rules! be_byte_array {
        ($len:literal) => {
            impl BeByteArray for [u8; $len] {
                #[inline]
                fn from_slice(slice: &[u8]) -> Option<Self> {
                    slice.get(..$len)?.try_into().ok()
                }
            }
        };
    }

    be_byte_array!(1);
    be_byte_array!(2);
    be_byte_array!(3);
    be_byte_array!(4);
    be_byte_array!(8);
}

pub(crate) use sealed::BeByteArray;

/// A trait for font scalars.
///
/// This is an internal trait for encoding and decoding big-endian bytes.
///
/// You do not need to implement this trait directly; it is an implementation
/// detail of the [`BigEndian`] wrapper.
pub trait Scalar: Sized + Copy {
    /// The raw big-endian byte representation of this type.
    type Raw: sealed::BeByteArray;

    /// Encode this type as raw big-endian bytes.
    fn to_raw(self) -> Self::Raw;

    /// Create an instance of this type from raw big-endian bytes.
    fn from_raw(raw: Self::Raw) -> Self;
}

/// A trait for types that have a known, fixed size in the font file.
pub trait FixedSize: Sized {
    /// The size of the raw encoding of this type, in bytes.
    const RAW_BYTE_LEN: usize;
}

/// A trait for types that can be read from the front of a byte slice.
pub trait ReadScalar: FixedSize {
    /// Attempt to read this type from the start of `bytes`.
    ///
    /// Returns `None` if `bytes` is shorter than [`Self::RAW_BYTE_LEN`].
    fn read(bytes: &[u8]) -> Option<Self>;
}

impl<T: Scalar> FixedSize for T {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<T::Raw>();
}

impl<T: Scalar> ReadScalar for T {
    #[inline]
    fn read(bytes: &[u8]) -> Option<Self> {
        T::Raw::from_slice(bytes).map(Self::from_raw)
    }
}

/// A wrapper around raw big-endian bytes for some type.
///
/// The wrapped value has an alignment of 1, so record structs composed of
/// `BigEndian` fields can be overlaid directly onto table data.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct BigEndian<T: Scalar>(T::Raw);

impl<T: Scalar> BigEndian<T> {
    /// Create a new `BigEndian` wrapper from the given value.
    pub fn new(value: T) -> Self {
        Self(value.to_raw())
    }

    /// Read a copy of this type from the raw bytes.
    #[inline]
    pub fn get(self) -> T {
        T::from_raw(self.0)
    }

    /// Set the value, overwriting the bytes.
    pub fn set(&mut self, value: T) {
        self.0 = value.to_raw();
    }

    /// The raw big-endian bytes.
    pub fn be_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T: Scalar> FixedSize for BigEndian<T> {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<T::Raw>();
}

impl<T: Scalar + Default> Default for BigEndian<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Scalar> From<T> for BigEndian<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Scalar + PartialEq> PartialEq for BigEndian<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Scalar + Eq> Eq for BigEndian<T> {}

impl<T: Scalar + PartialEq> PartialEq<T> for BigEndian<T> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<T: Scalar + PartialOrd> PartialOrd for BigEndian<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.get().partial_cmp(&other.get())
    }
}

impl<T: Scalar + Ord> Ord for BigEndian<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.get().cmp(&other.get())
    }
}

impl<T: Scalar + std::fmt::Debug> std::fmt::Debug for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: Scalar + std::fmt::Display> std::fmt::Display for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;

            #[inline]
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            #[inline]
            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);
int_scalar!(i64, [u8; 8]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_ints() {
        assert_eq!(u16::read(&[0x12, 0x34]), Some(0x1234));
        assert_eq!(i16::read(&[0xFF, 0xFE]), Some(-2));
        assert_eq!(u32::read(&[0, 0, 0x12, 0x34]), Some(0x1234));
        assert_eq!(u16::read(&[0x12]), None);
    }

    #[test]
    fn big_endian_set_get() {
        let mut be = BigEndian::new(0x0102u16);
        assert_eq!(be.be_bytes(), &[1, 2]);
        be.set(0xFFFE);
        assert_eq!(be.get(), 0xFFFE);
    }
}
