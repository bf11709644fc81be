//! Error types for handscene

use thiserror::Error;

/// Main error type for handscene operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for handscene operations
pub type Result<T> = std::result::Result<T, Error>;
