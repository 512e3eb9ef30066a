// In crates/api-client/src/error.rs

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("{operation} timed out after {elapsed:?}")]
    Timeout { operation: String, elapsed: Duration },
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),
    #[error("No price data returned for {0}")]
    EmptySeries(String),
    #[error("Invalid market data: {0}")]
    InvalidData(#[from] core_types::Error),
}

impl Error {
    /// Whether the failure happened in transport and a repeated attempt may succeed.
    ///
    /// Content errors (bad JSON, API error objects, 4xx) are never transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
