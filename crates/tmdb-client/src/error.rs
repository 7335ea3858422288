//! Errors that can occur when talking to the metadata service.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("Request to metadata API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Metadata API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not the JSON we expect
    #[error("Invalid response from metadata API: {0}")]
    InvalidResponse(String),

    #[error("Failed to load config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
