//! Error types for the tweetmojo run.
//!
//! Every failure is terminal: an operation returns the first error it meets and the
//! binary reports it and exits.

use thiserror::Error;

/// Errors that can end a tweetmojo run.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or missing command-line input
    #[error("Usage error: {0}")]
    Usage(String),

    /// Missing or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP failure or undecodable response from Twitter or Instamojo
    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// The latest post is not an offer command
    #[error("No offer found: {0}")]
    NoOfferFound(String),

    /// The offer command lacks required parameters
    #[error("The tweet format does not match the offer format, missing: {}", .missing.join(", "))]
    InvalidOfferFormat { missing: Vec<String> },

    /// Instamojo rejected the username/password pair
    #[error("Instamojo authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Instamojo did not hand out an upload URL
    #[error("Unable to get file upload URL for {0}")]
    UploadUrlUnavailable(String),

    /// Offer creation attempted before a session token was obtained
    #[error("Cannot create offer without a session token")]
    UnauthenticatedOfferCreation,

    /// Local I/O failure (log file setup, stdin)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::RemoteService(format!("HTTP request failed: {}", e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::RemoteService(format!("Unable to decode response: {}", e))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
