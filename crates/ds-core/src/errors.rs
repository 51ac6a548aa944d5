//! Error types for dateset.
//!
//! Every fallible operation in the workspace returns the single
//! `thiserror`-derived [`Error`] enum below.  The variants follow the error
//! taxonomy of the calendar engine: invalid dates and descriptors, bad
//! arguments, failed lookups, and positional or shift overflows.  The
//! [`ensure!`](crate::ensure) macro is the shorthand used for argument checks.

use thiserror::Error;

/// The top-level error type used throughout dateset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An invalid calendar date (bad year/month/day triple, serial overflow).
    #[error("date error: {0}")]
    Date(String),

    /// A value that cannot be used to build the requested object
    /// (e.g. a business-day selector with an invalid base).
    #[error("type error: {0}")]
    Type(String),

    /// Missing, conflicting or unrecognised arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A date that is required to be present is not, or a boundary lookup
    /// fell outside the calendar.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Positional index outside `[-size, size)`.
    #[error("index ({index}) out of range [-{size}, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: isize,
        /// The size of the container.
        size: usize,
    },

    /// A shift that runs past either end of a calendar.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

/// Shorthand `Result` type used throughout dateset.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return early with the given [`Error`] variant if `$cond` is false.
///
/// # Example
/// ```
/// use ds_core::{ensure, errors::Error};
/// fn month(m: u8) -> ds_core::errors::Result<u8> {
///     ensure!((1..=12).contains(&m), InvalidArgument, "month {m} out of range [1, 12]");
///     Ok(m)
/// }
/// assert!(month(3).is_ok());
/// assert_eq!(
///     month(13).unwrap_err(),
///     Error::InvalidArgument("month 13 out of range [1, 12]".into())
/// );
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:ident, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::$kind(format!($($msg)*)));
        }
    };
}
