use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid size parameter: {size}. Must be a positive integer or WIDTHxHEIGHT")]
    InvalidSize { size: String },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error(transparent)]
    Pixprep(#[from] pixprep::Error),
}
