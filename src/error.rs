// error.rs
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, UtilsError>;

/// The error type shared by every module in this crate.
///
/// All operations fail strictly with one of these variants; nothing is
/// retried and nothing falls back to a sentinel value. The only logged
/// non-error in the crate is `file_utils::safe_remove_tree` on a missing
/// path.
#[derive(Error, Debug)]
pub enum UtilsError {
    /// A value or element did not have the expected type. Always names the
    /// offending key or index.
    #[error("type of {subject} must be {expected}, but found {found}")]
    InvalidType {
        subject: String,
        expected: String,
        found: String,
    },

    /// An argument had the wrong shape: a missing column or key, a ragged
    /// row, a zero split count, or mismatched columns across concatenated
    /// files.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A string could not be parsed in the expected format.
    #[error("'{value}' is not a valid {expected} string")]
    InvalidFormat { value: String, expected: String },

    /// An operation that requires rows (or loadable files) was given none.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// An index list referenced positions outside the target sequence.
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    /// A scalar value was given where an iterable one is required.
    #[error("{0} is not iterable")]
    NotIterable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Calamine errors, flattened to their message (the XLS and XLSX readers
    /// carry distinct error types).
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),
}
