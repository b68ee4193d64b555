use crate::core::kernel::response::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum McapError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; displays as `<METHOD> <URL>: [<status>] <message>`.
    #[error(transparent)]
    Status(#[from] Box<ErrorResponse>),

    #[error("JSON decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Candle parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),
}

impl McapError {
    /// Returns the server error when the call failed with a non-2xx status.
    pub fn as_error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Status(response) => Some(response.as_ref()),
            _ => None,
        }
    }
}

/// Failures while coercing a loosely-typed candle row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("candle row has {len} fields, expected at least 5")]
    RowTooShort { len: usize },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid {field} price: {value}")]
    InvalidPrice { field: &'static str, value: String },
}
