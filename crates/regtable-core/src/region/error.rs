//! Error types for region table import

use std::io;
use std::string::String;
use thiserror::Error;

/// Errors raised while loading a region table
#[derive(Debug, Error)]
pub enum RegionError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A CSV line could not be parsed
    #[error("CSV parse error on line {line}: {message}")]
    Csv {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// The TOML document could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The input defines no regions
    #[error("region table has no entries")]
    Empty,
}
