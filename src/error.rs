//! Error types for BCH configuration, decoding and correction

use thiserror::Error;

/// Reasons a received word cannot be corrected
///
/// These are reported inside a [`Decoded`](crate::bch::Decoded) rather than as
/// a failed call: decoding succeeded, the word is simply beyond the code's reach.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Uncorrectable {
    /// Berlekamp-Massey produced a locator of degree greater than `t`
    #[error("too many errors: locator degree {degree} exceeds correction strength {t}")]
    TooManyErrors { degree: usize, t: usize },

    /// The locator polynomial does not split into `degree` distinct roots over the field
    #[error("bad message: locator of degree {degree} has {roots} roots in the field")]
    RootCountMismatch { degree: usize, roots: usize },

    /// A located bit lies outside the data+ecc block
    #[error("error location {location} outside the {limit}-bit block")]
    OutOfRange { location: usize, limit: usize },
}

/// Errors that can occur during BCH operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BchError {
    /// Field or generator polynomial cannot be built from (m, polynomial, t)
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Buffer or sequence length does not match the configured code
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The word carries more errors than the code can correct
    #[error(transparent)]
    Uncorrectable(#[from] Uncorrectable),
}

/// Type alias for Result with BchError
pub type Result<T> = std::result::Result<T, BchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncorrectable_converts_into_bch_error() {
        let err: BchError = Uncorrectable::TooManyErrors { degree: 5, t: 4 }.into();
        assert_eq!(
            err,
            BchError::Uncorrectable(Uncorrectable::TooManyErrors { degree: 5, t: 4 })
        );
        assert_eq!(
            err.to_string(),
            "too many errors: locator degree 5 exceeds correction strength 4"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = Uncorrectable::OutOfRange {
            location: 9000,
            limit: 4152,
        };
        assert_eq!(
            err.to_string(),
            "error location 9000 outside the 4152-bit block"
        );
    }
}
