//! Blocking `Transport` backed by `ureq`.

use ureq::{Agent, RequestBuilder};

use crate::http::{
    canonical_reason, HttpMethod, HttpRequest, HttpResponse, Transport, TransportError,
};

/// Default transport used by `OracleClient::new`.
///
/// The agent is configured with `http_status_as_error(false)` so every status
/// comes back as a response; `send` then turns 4xx into
/// `TransportError::Client` and returns everything else as data.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap a caller-configured agent (timeouts, proxy, TLS).
    ///
    /// Agents that keep `http_status_as_error` enabled still work: a 4xx
    /// becomes `TransportError::Client` and any other status a response with
    /// an empty body.
    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request.path.as_str();
        let builder = match request.method {
            HttpMethod::Post => with_headers(self.agent.post(path), &request.headers),
        };
        let result = match &request.body {
            Some(body) => builder.send(body.as_bytes()),
            None => builder.send_empty(),
        };
        let mut response = match result {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(code)) => return status_only(request, code),
            Err(e) => return Err(TransportError::Network(e.to_string())),
        };

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Bytes first: a body that is not UTF-8 must not hide the status.
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        if status.is_client_error() {
            return Err(client_error(request, status.as_u16(), &reason, &body));
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            headers,
            body,
        })
    }
}

/// Outcome for a status reported by an agent that treats statuses as errors.
fn status_only(request: &HttpRequest, code: u16) -> Result<HttpResponse, TransportError> {
    if (400..500).contains(&code) {
        return Err(client_error(request, code, canonical_reason(code), ""));
    }
    Ok(HttpResponse::new(code, String::new()))
}

fn client_error(request: &HttpRequest, code: u16, reason: &str, body: &str) -> TransportError {
    TransportError::Client {
        status: code,
        message: format!(
            "client error: `{} {}` resulted in a `{} {}` response: {}",
            request.method.as_str(),
            request.path,
            code,
            reason,
            body
        ),
    }
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
