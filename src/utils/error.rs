//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the indexing API
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("API error: {0}")]
    Upstream(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while normalizing a single record field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid token id: {0}")]
    InvalidTokenId(String),
}

/// Errors that can occur during distribution analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Invalid bucket configuration: {0}")]
    InvalidBucketConfig(String),
}

/// Errors that can occur while reading input tables
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("Duplicate address: {0}")]
    DuplicateAddress(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
