//! The LONGDATETIME type.

/// A date and time, represented as seconds since 1904-01-01 00:00:00 UTC.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LongDateTime(i64);

impl LongDateTime {
    /// Create a new timestamp from a number of seconds since the epoch.
    pub const fn new(secs: i64) -> Self {
        Self(secs)
    }

    /// The number of seconds since 1904-01-01 00:00:00 UTC.
    ///
    /// This can be negative, for dates preceding the epoch.
    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// The big-endian encoding of this timestamp.
    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl crate::raw::Scalar for LongDateTime {
    type Raw = [u8; 8];

    fn to_raw(self) -> Self::Raw {
        self.to_be_bytes()
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self(i64::from_be_bytes(raw))
    }
}
