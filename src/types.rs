//! Shared error types for URL handling

use thiserror::Error;

/// Errors from the URL normalizers
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("URL is empty")]
    Empty,
    #[error("Not an HTTP(S) URL: {0}")]
    NotHttp(String),
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),
}

/// Errors from URL host extraction
#[derive(Debug, Error)]
pub enum GetHostError {
    #[error("URL is empty")]
    Empty,
    #[error("Not an HTTP(S) URL with a host: {0}")]
    NoHost(String),
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),
}
