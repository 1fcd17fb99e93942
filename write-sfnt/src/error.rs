//! Errors that occur while building fonts

use types::Tag;

use crate::validate::ValidationReport;

/// An error produced while assembling a font binary.
#[derive(Clone, Debug)]
pub enum BuildError {
    /// A table's validation failed, so its bytes cannot be emitted.
    NotReadyForSerialization {
        /// The tag of the offending table.
        tag: Tag,
        report: ValidationReport,
    },
    /// More tables than the directory's `uint16` count can hold.
    TooManyTables,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::NotReadyForSerialization { tag, report } => {
                write!(f, "the {tag} table is not ready to serialize: {report}")
            }
            BuildError::TooManyTables => write!(f, "too many tables for one font"),
        }
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Some users like their errors Send.
    #[test]
    fn assert_build_error_is_send() {
        fn send_me_baby<T: Send>() {}
        send_me_baby::<BuildError>();
    }
}
