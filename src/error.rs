//! Error types for fetching and shaping fundamentals

use thiserror::Error;

use crate::request::common::Function;

/// Errors that abort a comparison run.
///
/// Growth-ratio failures are not represented here: they are recovered locally
/// as [`GrowthError`](crate::transform::GrowthError) diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key configured on the client
    #[error("API key not set")]
    MissingApiKey,

    /// Ticker symbol rejected before any request was made
    #[error("invalid ticker: {0:?}")]
    InvalidTicker(String),

    /// Non-200 response from the API
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// Value of the `X-Request-Id` header, if any
        request_id: Option<String>,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The provider answered with an `Error Message` body (e.g. an unknown symbol)
    #[error("{function} rejected by provider: {message}")]
    Provider {
        /// Endpoint that was called
        function: Function,
        /// Provider message
        message: String,
    },

    /// The provider answered with a rate-limit `Note` or `Information` body
    #[error("{function} rate limited: {message}")]
    RateLimited {
        /// Endpoint that was called
        function: Function,
        /// Provider message
        message: String,
    },

    /// A required field is absent from a response
    #[error("{table} has no field {field:?}")]
    MissingField {
        /// Table the field was looked up in
        table: Function,
        /// Field name
        field: &'static str,
    },

    /// An annual statement with no rows
    #[error("{statement} has no annual reports")]
    EmptyStatement {
        /// Statement that was empty
        statement: Function,
    },

    /// Annual reports are not ordered most-recent-first
    #[error("{statement} is not ordered by descending fiscalDateEnding: {reason}")]
    StatementOrder {
        /// Statement that failed validation
        statement: Function,
        /// What was wrong with the ordering
        reason: String,
    },

    /// Transport failure below the API layer
    #[error("HTTP error: {0}")]
    Http(String),

    /// reqwest transport failure
    #[cfg(feature = "reqwest")]
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Malformed JSON body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query string could not be encoded
    #[error("query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// CSV serialization failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("{0}")]
    Custom(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingField {
            table: Function::Overview,
            field: "Sector",
        };
        assert_eq!(err.to_string(), "OVERVIEW has no field \"Sector\"");

        let err = Error::EmptyStatement {
            statement: Function::BalanceSheet,
        };
        assert_eq!(err.to_string(), "BALANCE_SHEET has no annual reports");
    }

    #[test]
    fn test_missing_key_mentions_api_key() {
        assert!(Error::MissingApiKey.to_string().contains("API key"));
    }
}
