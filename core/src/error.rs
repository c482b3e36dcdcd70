//! Error types for the Holiday Oracle client.
//!
//! # Design
//! Validation failures are raised before any I/O. `UnexpectedStatus` and
//! `MalformedEnvelope` come from unwrapping a response the transport did
//! return. Errors raised by the transport itself are carried through as
//! `Transport` without being rewrapped, so a 4xx keeps the code and message
//! the transport reported.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `OracleClient` and `ClientConfig`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client could not be configured (e.g. no token was provided).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A date-shaped argument does not contain a `YYYY-MM-DD` sequence.
    #[error("invalid date format for {argument}: {value:?}")]
    InvalidDateFormat {
        argument: &'static str,
        value: String,
    },

    /// The server answered with a status other than 200.
    #[error("invalid response \"{code}\" ({reason})")]
    UnexpectedStatus { code: u16, reason: String },

    /// A 200 response whose body is not a `{status, data}` envelope.
    #[error("invalid response envelope: {0}")]
    MalformedEnvelope(String),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
