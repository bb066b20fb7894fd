use thiserror::Error;

use crate::http_client::HttpError;

/// Validation errors for tickers and other user-supplied values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 or RFC2822: '{value}'")]
    InvalidTimestamp { value: String },
}

/// A response body that does not match the shape the endpoint promises.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{endpoint} response does not match schema: {detail}")]
pub struct SchemaError {
    pub endpoint: &'static str,
    pub detail: String,
}

impl SchemaError {
    pub fn new(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self {
            endpoint,
            detail: detail.into(),
        }
    }
}

/// Failure to load the ticker directory backing the symbol index.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ticker directory request failed: {0}")]
    Transport(#[from] HttpError),

    #[error("ticker directory returned status {status}")]
    Status { status: u16 },

    #[error("failed to read ticker directory '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Failure of a panel fetch (filings or news).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("{0}")]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl FetchError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Status { .. } => "fetch.status",
            Self::Transport(_) => "fetch.transport",
            Self::Schema(_) => "fetch.schema",
        }
    }
}

/// Invalid widget configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("header '{value}' must look like 'name: value'")]
    InvalidHeader { value: String },
    #[error("user agent is not a valid header value: {value:?}")]
    InvalidUserAgent { value: String },
}
