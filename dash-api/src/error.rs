/// Error types for analytics API calls
use thiserror::Error;

/// Main error type for analytics requests
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure or undecodable body
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("{path} returned status {status}")]
    Status { path: String, status: u16 },

    /// No answer within the configured timeout
    #[error("{path} timed out after {after_ms} ms")]
    Timeout { path: String, after_ms: u64 },
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
