use std::io;
use std::num::ParseIntError;

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TruncFixError {
    #[error("Invalid frequency '{value}' on line {line}: {source}")]
    InvalidFrequency {
        line: usize,
        value: String,
        source: ParseIntError,
    },

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error("Malformed {table} record on line {line}: '{record}'")]
    MalformedRecord {
        table: &'static str,
        line: usize,
        record: String,
    },

    #[error(transparent)]
    RegexError(#[from] regex::Error),

    #[error("Cannot relativize path: {0}")]
    RelativizePathError(String),

    #[error(transparent)]
    TomlDeserializationError(#[from] toml::de::Error),
}
