//! Fixed-point numeric types.

/// An internal macro for defining the fixed-point types.
macro_rules! fixed_type {
    ($name:ident, $docname:literal, $bits:literal, $repr:ty, $frac_bits:literal, $raw:ty) => {
        #[doc = concat!("A ", $docname, " fixed-point number.")]
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($repr);

        impl $name {
            /// The smallest representable value.
            pub const MIN: $name = $name(<$repr>::MIN);
            /// The largest representable value.
            pub const MAX: $name = $name(<$repr>::MAX);
            /// The smallest positive difference between values.
            pub const EPSILON: $name = $name(1);
            /// Zero.
            pub const ZERO: $name = $name(0);
            /// One.
            pub const ONE: $name = $name(1 << $frac_bits);

            /// Create a value from its underlying bit representation.
            pub const fn from_bits(bits: $repr) -> Self {
                Self(bits)
            }

            /// The underlying bit representation of this value.
            pub const fn to_bits(self) -> $repr {
                self.0
            }

            /// Create a value, rounding the nearest representable value.
            pub fn from_f32(value: f32) -> Self {
                Self((value * (1 << $frac_bits) as f32).round() as $repr)
            }

            /// This value as an `f32`.
            pub fn to_f32(self) -> f32 {
                self.0 as f32 / (1 << $frac_bits) as f32
            }

            /// This value as an `f64`.
            pub fn to_f64(self) -> f64 {
                self.0 as f64 / (1 << $frac_bits) as f64
            }

            /// The big-endian encoding of this value.
            pub const fn to_be_bytes(self) -> $raw {
                self.0.to_be_bytes()
            }

            /// Decode a value from big-endian bytes.
            pub const fn from_be_bytes(bytes: $raw) -> Self {
                Self(<$repr>::from_be_bytes(bytes))
            }
        }

        impl crate::raw::Scalar for $name {
            type Raw = $raw;

            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: $raw) -> Self {
                Self::from_be_bytes(raw)
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0.wrapping_add(rhs.0))
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0.wrapping_sub(rhs.0))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_f32())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.to_f32().fmt(f)
            }
        }
    };
}

fixed_type!(Fixed, "32-bit signed 16.16", 32, i32, 16, [u8; 4]);
fixed_type!(F2Dot14, "16-bit signed 2.14", 16, i16, 14, [u8; 2]);

impl Fixed {
    /// Construct a `Fixed` from an integer value.
    pub const fn from_i32(value: i32) -> Self {
        Self(value << 16)
    }

    /// This value rounded to the nearest integer.
    pub fn round_to_i32(self) -> i32 {
        (self.0.wrapping_add(0x8000)) >> 16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_conversion() {
        assert_eq!(Fixed::from_i32(1), Fixed::ONE);
        assert_eq!(Fixed::from_f32(1.5).to_bits(), 0x18000);
        assert_eq!(Fixed::from_f32(-1.0).to_be_bytes(), [0xFF, 0xFF, 0, 0]);
        assert_eq!(Fixed::from_bits(0x18000).to_f32(), 1.5);
    }

    #[test]
    fn f2dot14_range() {
        assert_eq!(F2Dot14::from_f32(1.0).to_bits(), 0x4000);
        assert_eq!(F2Dot14::from_f32(-1.0).to_bits(), -0x4000);
        assert_eq!(F2Dot14::from_bits(0x7FFF).to_f32(), 1.999939);
    }

    #[test]
    fn rounding() {
        assert_eq!(Fixed::from_f32(2.5).round_to_i32(), 3);
        assert_eq!(Fixed::from_f32(-0.4).round_to_i32(), 0);
    }
}
