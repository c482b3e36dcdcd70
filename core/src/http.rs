//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `OracleClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and parses the `HttpResponse` it
//! gets back; the client itself never opens a socket. The default transport
//! lives in `crate::transport`, tests substitute their own.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be recorded
//! and compared without lifetime concerns.

use thiserror::Error;
use ureq::http::StatusCode;

/// HTTP method for a request. Every Holiday Oracle endpoint is `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL (base URL joined with the endpoint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Human-readable reason phrase, e.g. `"OK"` or `"Not Found"`.
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Build a response with the canonical reason phrase for `status` and no
    /// headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: canonical_reason(status).to_string(),
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Canonical reason phrase for a status code, or `""` for unknown codes.
pub fn canonical_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("")
}

/// Failures raised by a `Transport` instead of returning a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a 4xx status.
    #[error("{message}")]
    Client { status: u16, message: String },

    /// The request never produced a response (DNS, connect, TLS, I/O).
    #[error("transport failed: {0}")]
    Network(String),
}

/// Executes one blocking HTTP round trip.
///
/// Implementations return every non-4xx response as an `HttpResponse`,
/// including 5xx, and report 4xx responses as `TransportError::Client`.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
