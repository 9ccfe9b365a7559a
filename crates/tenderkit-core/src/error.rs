//! Error types for TenderKit.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("no input files given")]
    EmptyInput,

    #[error("store error: {0}")]
    Store(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
