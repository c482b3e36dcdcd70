//! Wire and status types for the Holiday Oracle API.
//!
//! # Design
//! Endpoint payloads are left as `serde_json::Value`: the service adds fields
//! without notice and the client passes `data` through untouched. Only the
//! envelope around it has a fixed shape.

use serde_json::{Map, Value};

use crate::error::ApiError;

/// Extra body parameters for an endpoint call. Keys given here override the
/// fields the client builds itself.
pub type Options = Map<String, Value>;

/// Envelope wrapping every successful response: `{"status": ..., "data": ...}`.
///
/// Both keys must be present. `data` may be `null`; `status` is not
/// interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub status: Value,
    pub data: Value,
}

impl ResponseEnvelope {
    /// Decode a response body. A key repeated in the body keeps its last value.
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        let mut fields: Map<String, Value> = serde_json::from_str(body)
            .map_err(|e| ApiError::MalformedEnvelope(e.to_string()))?;
        let status = fields
            .remove("status")
            .ok_or_else(|| ApiError::MalformedEnvelope("missing field `status`".to_string()))?;
        let data = fields
            .remove("data")
            .ok_or_else(|| ApiError::MalformedEnvelope("missing field `data`".to_string()))?;
        Ok(Self { status, data })
    }
}

/// Code and reason of the most recent round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    pub code: u16,
    pub reason: String,
}
