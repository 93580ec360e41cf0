// src/utils/error.rs
use thiserror::Error;

// Errors raised while locating, downloading or decoding a workbook.
// None of these reach the extractors: the loading boundary logs them
// and falls back to an empty worksheet list.
#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Access to workbook export denied: {0}")]
    Forbidden(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode workbook: {0}")]
    Decode(#[from] calamine::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Output serialization failed: {0}")]
    Output(#[from] serde_json::Error),
}
