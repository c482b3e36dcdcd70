//! Holiday Oracle API client.
//!
//! # Design
//! `OracleClient` owns its transport, its `ClientConfig`, and the request
//! headers derived from the config at construction. Every endpoint method
//! builds a JSON body and goes through `request`, the single place that talks
//! to the transport.
//!
//! The only mutable state is the status of the most recent round trip. Each
//! call path computes a `ResponseStatus` and assigns it explicitly; reading it
//! back through `last_response_status` gives the outcome of the last attempt
//! even when that attempt returned an error. Calls take `&mut self`, so a
//! client shared between threads needs a `Mutex`, and the status then
//! reflects whichever call finished last.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use crate::transport::UreqTransport;
use crate::types::{Options, ResponseEnvelope, ResponseStatus};
use crate::validate::{check_date, is_timestamp};

pub const LOCATIONS_ENDPOINT: &str = "api/v1/date/locations";
pub const DATE_ENDPOINT: &str = "api/v1/date";
pub const HOLIDAYS_ENDPOINT: &str = "api/v1/date/holidays";
pub const BUSINESS_DAYS_ENDPOINT: &str = "api/v1/date/business-days";

/// Synchronous client for the Holiday Oracle API.
pub struct OracleClient<T = UreqTransport> {
    config: ClientConfig,
    headers: Vec<(String, String)>,
    transport: T,
    last_status: Option<ResponseStatus>,
}

impl OracleClient<UreqTransport> {
    /// Client over the default blocking `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> OracleClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", config.token())),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        Self {
            config,
            headers,
            transport,
            last_status: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Code and reason of the last round trip, `None` before the first call.
    pub fn last_response_status(&self) -> Option<&ResponseStatus> {
        self.last_status.as_ref()
    }

    /// Unwrap a raw response into the envelope's `data`.
    ///
    /// The response status is recorded before anything is checked. Only 200
    /// is accepted.
    pub fn parse_response(&mut self, response: HttpResponse) -> Result<Value, ApiError> {
        let (status, result) = unwrap_envelope(response);
        self.last_status = Some(status);
        result
    }

    /// Build the `HttpRequest` for `endpoint` without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        json: Option<&Options>,
    ) -> Result<HttpRequest, ApiError> {
        let body = json
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!(
                "{}/{}",
                self.config.base_url().trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            ),
            headers: self.headers.clone(),
            body,
        })
    }

    /// Send one request and unwrap its envelope.
    ///
    /// A 4xx reported by the transport is recorded as the last status and
    /// returned unchanged. Network failures are returned without touching the
    /// last status.
    pub fn request(
        &mut self,
        method: HttpMethod,
        endpoint: &str,
        json: Option<&Options>,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(method, endpoint, json)?;
        debug!(method = method.as_str(), path = %request.path, "sending request");

        match self.transport.send(&request) {
            Ok(response) => self.parse_response(response),
            Err(err) => {
                if let TransportError::Client { status, message } = &err {
                    warn!(code = *status, "client error from transport");
                    self.last_status = Some(ResponseStatus {
                        code: *status,
                        reason: message.clone(),
                    });
                }
                Err(err.into())
            }
        }
    }

    /// Locations supported by the service.
    ///
    /// See <https://holidayoracle.io/docs/index.html#locations>.
    pub fn locations(&mut self) -> Result<Value, ApiError> {
        self.request(HttpMethod::Post, LOCATIONS_ENDPOINT, None)
    }

    /// Date information for a `YYYY-MM-DD` date or a Unix timestamp.
    ///
    /// An all-digit input is sent as `timestamp`, anything else must contain a
    /// `YYYY-MM-DD` sequence and is sent as `date`. `options` may override
    /// `country` but not the date itself.
    ///
    /// See <https://holidayoracle.io/docs/index.html#date>.
    pub fn date(
        &mut self,
        date_or_timestamp: &str,
        country: &str,
        options: Options,
    ) -> Result<Value, ApiError> {
        let mut body = merge_options(Options::from_iter([field("country", country)]), options);
        if is_timestamp(date_or_timestamp) {
            body.insert("timestamp".to_string(), Value::from(date_or_timestamp));
        } else {
            check_date("date", date_or_timestamp)?;
            body.insert("date".to_string(), Value::from(date_or_timestamp));
        }
        self.request(HttpMethod::Post, DATE_ENDPOINT, Some(&body))
    }

    /// Holidays of `country` in `year`. `year` is passed through as given.
    ///
    /// See <https://holidayoracle.io/docs/index.html#holidays>.
    pub fn holidays(
        &mut self,
        country: &str,
        year: &str,
        options: Options,
    ) -> Result<Value, ApiError> {
        let body = merge_options(
            Options::from_iter([field("country", country), field("year", year)]),
            options,
        );
        self.request(HttpMethod::Post, HOLIDAYS_ENDPOINT, Some(&body))
    }

    /// Business days of `country` between `date1` and `date2`.
    ///
    /// `date1` is validated before `date2`.
    ///
    /// See <https://holidayoracle.io/docs/index.html#business-days>.
    pub fn business_days(
        &mut self,
        date1: &str,
        date2: &str,
        country: &str,
        options: Options,
    ) -> Result<Value, ApiError> {
        check_date("date1", date1)?;
        check_date("date2", date2)?;

        let body = merge_options(
            Options::from_iter([
                field("country", country),
                field("date1", date1),
                field("date2", date2),
            ]),
            options,
        );
        self.request(HttpMethod::Post, BUSINESS_DAYS_ENDPOINT, Some(&body))
    }
}

/// Compute the status to record and the unwrapped result for `response`.
fn unwrap_envelope(response: HttpResponse) -> (ResponseStatus, Result<Value, ApiError>) {
    let status = ResponseStatus {
        code: response.status,
        reason: response.reason,
    };
    debug!(code = status.code, reason = %status.reason, "response received");

    if status.code != 200 {
        warn!(code = status.code, "unexpected response status");
        let err = ApiError::UnexpectedStatus {
            code: status.code,
            reason: status.reason.clone(),
        };
        return (status, Err(err));
    }

    let result = ResponseEnvelope::from_body(&response.body)
        .map(|envelope| envelope.data)
        .inspect_err(|e| warn!(error = %e, "malformed response envelope"));
    (status, result)
}

/// Extend `base` with `options`; keys in `options` win.
fn merge_options(mut base: Options, options: Options) -> Options {
    base.extend(options);
    base
}

fn field(key: &str, value: &str) -> (String, Value) {
    (key.to_string(), Value::from(value))
}
