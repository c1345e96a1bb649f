//! Error types shared between the gateway, the accessors and the renderers.
//!
//! The `MarketError` enum unifies transport, HTTP, JSON, configuration and
//! per-record data failures so every crate in the workspace can propagate a
//! single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the library and the CLI.
#[derive(Error, Debug)]
pub enum MarketError {
    /// I/O error while writing tables or chart files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Network or transport failure reported by the HTTP client.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status outside the 2xx range.
    #[error("HTTP request failed with status: {status}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// Failure while decoding a response body or a typed model via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API signalled throttling inside an otherwise successful response.
    #[error("Alpha Vantage API Rate Limit Exceeded: {0}")]
    RateLimited(String),

    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A configuration value is present but unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A movers record lacks a column that the first record of its table has.
    #[error("{table}: record {row} has no '{column}' field")]
    MissingColumn {
        /// Table title, e.g. `Top Gainers`.
        table: String,
        /// Zero-based record index within the table.
        row: usize,
        /// Column name taken from the first record.
        column: String,
    },

    /// A commodity observation whose date or value cannot be parsed.
    #[error("Invalid observation {date}={value}: {reason}")]
    InvalidObservation {
        /// Raw date text.
        date: String,
        /// Raw value text.
        value: String,
        /// Parser message.
        reason: String,
    },
}
