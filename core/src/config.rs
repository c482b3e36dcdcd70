//! Client configuration.
//!
//! A `ClientConfig` is built once and never changes afterwards. It can be
//! built directly, through `ClientConfigBuilder`, or from the environment:
//!
//! - `HOLIDAY_ORACLE_TOKEN` (required)
//! - `HOLIDAY_ORACLE_BASE_URL` (optional, defaults to [`DEFAULT_BASE_URL`])

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://staging.holidayoracle.io";
pub const TOKEN_ENV: &str = "HOLIDAY_ORACLE_TOKEN";
pub const BASE_URL_ENV: &str = "HOLIDAY_ORACLE_BASE_URL";

/// Token and base URL an `OracleClient` is bound to.
///
/// An empty token is accepted; the service rejects it at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    token: String,
    base_url: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load the configuration from `HOLIDAY_ORACLE_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(token) = lookup(TOKEN_ENV) {
            builder = builder.token(token);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        builder.build().map_err(|_| {
            ApiError::Configuration(format!("environment variable {TOKEN_ENV} is not set"))
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    token: Option<String>,
    base_url: Option<String>,
}

impl ClientConfigBuilder {
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Fails with `ApiError::Configuration` when no token was provided.
    pub fn build(self) -> Result<ClientConfig, ApiError> {
        let token = self
            .token
            .ok_or_else(|| ApiError::Configuration("an API token is required".to_string()))?;
        Ok(ClientConfig {
            token,
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}
