use thiserror::Error;

/// salestrack error types
#[derive(Error, Debug)]
pub enum SalesError {
    /// Failed to parse a JSON/JSONL snapshot
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An order document is missing fields or carries unusable values
    #[error("malformed record {record}: {reason}")]
    MalformedRecord { record: String, reason: String },

    /// Order export endpoint could not be fetched
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// PDF rendering or font loading failed
    #[error("report error: {0}")]
    Report(String),

    /// Unknown report period name
    #[error("invalid report period: {0}")]
    InvalidPeriod(String),
}

impl SalesError {
    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for salestrack
pub type Result<T> = std::result::Result<T, SalesError>;
