//! Offsets to tables and records.

use crate::raw::Scalar;
use crate::Uint24;

macro_rules! impl_offset {
    ($name:ident, $docname:literal, $repr:ty, $raw:ty) => {
        #[doc = concat!("A ", $docname, " offset to a table or record.")]
        ///
        /// Offsets are always relative to some position known to the caller,
        /// usually the start of the enclosing table.
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name($repr);

        impl $name {
            /// Create a new offset.
            pub const fn new(raw: $repr) -> Self {
                Self(raw)
            }

            /// This offset as a `u32`.
            pub fn to_u32(self) -> u32 {
                self.0.into()
            }
        }

        impl crate::raw::Scalar for $name {
            type Raw = $raw;

            fn to_raw(self) -> Self::Raw {
                self.0.to_raw()
            }

            fn from_raw(raw: Self::Raw) -> Self {
                Self(crate::raw::Scalar::from_raw(raw))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.to_u32(), f)
            }
        }
    };
}

impl_offset!(Offset16, "16-bit", u16, [u8; 2]);
impl_offset!(Offset24, "24-bit", Uint24, [u8; 3]);
impl_offset!(Offset32, "32-bit", u32, [u8; 4]);

/// An offset that may be null (zero).
///
/// A number of offset fields use `0` to mean "not present". Wrapping those
/// fields distinguishes them from offsets where zero is merely out of spec.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Nullable<T>(T);

impl<T: crate::raw::Scalar> Nullable<T> {
    /// The wrapped offset.
    pub fn offset(&self) -> T {
        self.0
    }
}

impl<T: crate::raw::Scalar + Default + PartialEq> Nullable<T> {
    /// `true` if the wrapped offset is zero.
    pub fn is_null(&self) -> bool {
        self.0 == T::default()
    }
}

impl<T: crate::raw::Scalar> crate::raw::Scalar for Nullable<T> {
    type Raw = T::Raw;

    fn to_raw(self) -> Self::Raw {
        self.0.to_raw()
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self(T::from_raw(raw))
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}
