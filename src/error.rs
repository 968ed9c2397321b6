//! Typed errors for the size model and the row aggregator.
//!
//! Tree walking failures are plain I/O errors and travel as `anyhow` errors
//! with path context attached; the types here cover the cases callers may
//! want to match on.

use std::num::ParseIntError;

use thiserror::Error;

/// Name of a numeric size column, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    /// Data fork size.
    Primary,
    /// Resource fork size.
    Auxiliary,
    /// Data plus resource fork size.
    Combined,
}

impl Column {
    /// All columns in the order they appear in a row.
    pub const ALL: [Self; 3] = [Self::Primary, Self::Auxiliary, Self::Combined];
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Primary => "data size",
            Self::Auxiliary => "rsrc size",
            Self::Combined => "total size",
        };
        f.write_str(name)
    }
}

/// A running total no longer fits in a `u64`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{column} total overflowed")]
pub struct SizeOverflow {
    pub column: Column,
}

/// Why a single input row was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("expected 4 tab-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("{column} {value:?} is not an integer: {source}")]
    InvalidNumber {
        column: Column,
        value: String,
        source: ParseIntError,
    },

    #[error(transparent)]
    Overflow(#[from] SizeOverflow),
}

/// A row of aggregator input could not be used.
#[derive(Debug, Error)]
#[error("{input}:{line}: {kind}")]
pub struct ParseError {
    /// File name, or `<stdin>`.
    pub input: String,
    /// 1-based line number within `input`.
    pub line: usize,
    pub kind: LineError,
}
