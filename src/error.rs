//! Error handling for certpush

use thiserror::Error;

/// Main error type for certpush operations
#[derive(Error, Debug)]
pub enum CertPushError {
    #[error("{0}")]
    Usage(String),

    #[error("Invalid appliance address: {0}")]
    InvalidAddress(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Building payload failed: file not found: {0}")]
    FileNotFound(String),

    #[error("Building payload failed: permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Building payload failed: {0}")]
    Payload(String),

    #[error("SSL/TLS error: {0}")]
    Ssl(String),

    #[error("Sending request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reading response failed: {0}")]
    ResponseRead(reqwest::Error),
}

/// Result type alias for certpush operations
pub type Result<T> = std::result::Result<T, CertPushError>;

/// Render `err` followed by its `source()` chain. reqwest keeps the useful
/// part (refused, handshake, certificate) in the sources.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
