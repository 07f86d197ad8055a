use std::fmt;

/// Structural failures: the document is unusable before any row parsing
/// starts. Everything recoverable is reported as data in the validation
/// result instead, so this enum stays small.
#[derive(Debug, PartialEq, Eq)]
pub enum CodecError {
    /// The grid lacks a header row plus at least one data row.
    MalformedDocument { rows: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDocument { rows } => write!(
                f,
                "malformed document: expected a header row and at least one data row, found {rows} row(s)"
            ),
        }
    }
}

impl std::error::Error for CodecError {}
