//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Resizer failures are reported per file (`UnreadableFile`, `UnsupportedFormat`,
//! `WriteFailure`); pixel-grid failures (`Parse`, `ExtraLines`, `Shape`, `OutOfRange`) are fatal
//! for the single input being rendered.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unreadable file {path:?}: {reason}")]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("Unsupported image format {path:?}: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("Failed to write {path:?}: {reason}")]
    WriteFailure { path: PathBuf, reason: String },

    #[error("Invalid pixel value at index {index}: {token:?}")]
    Parse { index: usize, token: String },

    #[error("Expected one line of pixel values in {path:?}, found {count}")]
    ExtraLines { path: PathBuf, count: usize },

    #[error("Pixel count {count} is not a perfect square")]
    Shape { count: usize },

    #[error("Pixel value {value} at index {index} is outside [0, 1]")]
    OutOfRange { index: usize, value: f64 },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: usize },

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }

    pub(crate) fn write_failure<E: std::fmt::Display>(path: impl Into<PathBuf>, e: E) -> Self {
        Error::WriteFailure {
            path: path.into(),
            reason: e.to_string(),
        }
    }

    /// True for the error kinds that belong to a single file of a resize batch.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Error::UnreadableFile { .. }
                | Error::UnsupportedFormat { .. }
                | Error::WriteFailure { .. }
        )
    }
}
