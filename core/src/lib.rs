//! Synchronous client for the Holiday Oracle date-information API.
//!
//! # Overview
//! `OracleClient` authenticates with a bearer token, posts JSON bodies to the
//! four Holiday Oracle endpoints (locations, date, holidays, business days)
//! and unwraps the `{status, data}` envelope every response carries.
//!
//! # Design
//! - One blocking round trip per call, no retries, no caching.
//! - The network sits behind the `Transport` trait. `UreqTransport` is the
//!   default; tests inject their own.
//! - Endpoint payloads stay `serde_json::Value`, and extra parameters are an
//!   open `Options` map merged over the fields the client sets.
//! - The status of the last round trip is kept on the client and readable
//!   through `last_response_status`, including after a failed call.
//!
//! ```no_run
//! use holiday_oracle_core::{ClientConfig, OracleClient, Options};
//!
//! let mut client = OracleClient::new(ClientConfig::new("my-token"));
//! let holidays = client.holidays("AU", "2024", Options::new())?;
//! println!("{holidays}");
//! # Ok::<(), holiday_oracle_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::OracleClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use transport::UreqTransport;
pub use types::{Options, ResponseEnvelope, ResponseStatus};
