//! Error type shared by the library.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("can't decode {} as {encoding}", .path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    #[error("can't convert CSV file without a header line")]
    NoHeaderLine,

    #[error("row {row}: missing field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: can't parse date '{value}': {source}")]
    BadDate {
        row: usize,
        value: String,
        source: chrono::ParseError,
    },

    #[error("unknown CSV format")]
    UnknownFormat,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
