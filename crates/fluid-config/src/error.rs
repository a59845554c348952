//! Named error types at the crate's API boundaries (SPEC_FULL.md §2
//! "Errors"). Both are surfaced through `anyhow::Context` by the CLI
//! binary, which attaches a diagnostic and a non-zero exit code
//! (spec.md §7, error kinds 1 and 2).

use thiserror::Error;

/// Configuration error kind (spec.md §7 kind 1): a malformed or unknown
/// numeric type tag, or a non-positive thread count.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown numeric type tag: {0:?}")]
    UnknownTypeTag(String),

    #[error("malformed FIXED/FAST_FIXED tag {0:?}: expected NAME(n,k)")]
    MalformedFixedTag(String),

    #[error("thread count must be positive, got {0}")]
    NonPositiveThreadCount(i64),

    #[error("fixed-point width {n} exceeds the supported 64-bit raw storage")]
    FixedWidthTooWide { n: u32 },

    #[error("fixed-point fractional bits {k} must be less than total width {n}")]
    FixedFractionOverflow { n: u32, k: u32 },
}

/// I/O and format error kind (spec.md §7 kind 2): a field file or
/// checkpoint that cannot be opened, is truncated, or is malformed.
#[derive(Debug, Error)]
pub enum FieldFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: expected header `N K T`, found {found:?}")]
    MissingHeader { path: String, found: String },

    #[error("{path}: header field {field} is not a valid integer: {value:?}")]
    BadHeaderInt {
        path: String,
        field: &'static str,
        value: String,
    },

    #[error("{path}: expected {expected} rows, found {found}")]
    RowCountMismatch {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("{path}: row {row} has {found} characters, expected {expected}")]
    RowWidthMismatch {
        path: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}: outer border must be all `#`, row {row} col {col} is {found:?}")]
    BorderNotWall {
        path: String,
        row: usize,
        col: usize,
        found: char,
    },

    #[error("{path}: unexpected end of input while reading {what}")]
    UnexpectedEof { path: String, what: &'static str },

    #[error("{path}: malformed {what}: {value:?}")]
    BadValue {
        path: String,
        what: &'static str,
        value: String,
    },
}
