/// Error types for filter parsing and persistence
use thiserror::Error;

/// Main error type for filter codecs
#[derive(Error, Debug)]
pub enum FilterError {
    /// Persisted cookie could not be decoded
    #[error("Malformed filter cookie: {0}")]
    MalformedCookie(#[from] serde_json::Error),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// Unknown series label
    #[error("Unknown series: {0:?}")]
    UnknownSeries(String),

    /// Unknown age group
    #[error("Unknown age group: {0:?}")]
    UnknownAgeGroup(String),

    /// Unknown gender
    #[error("Unknown gender: {0:?}")]
    UnknownGender(String),
}

/// Type alias for Results using FilterError
pub type Result<T> = std::result::Result<T, FilterError>;
