//! Verify every endpoint against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request, a simulated
//! response, and the expected result or error. Bodies are compared as parsed
//! JSON so key order does not matter.

use std::cell::RefCell;

use holiday_oracle_core::{
    ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse, OracleClient, Options,
    Transport, TransportError,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";
const TOKEN: &str = "vector-token";

/// Transport that answers with a fixed response and keeps what it was sent.
struct CannedTransport {
    response: Option<HttpResponse>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl Transport for CannedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request.clone());
        Ok(self
            .response
            .clone()
            .expect("transport called for a case without a simulated response"))
    }
}

fn client_for(case: &Value) -> OracleClient<CannedTransport> {
    let response = case.get("simulated_response").map(|sim| {
        HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        )
    });
    let transport = CannedTransport {
        response,
        sent: RefCell::new(Vec::new()),
    };
    OracleClient::with_transport(ClientConfig::new(TOKEN).with_base_url(BASE_URL), transport)
}

fn options(input: &Value) -> Options {
    input["options"].as_object().cloned().unwrap_or_default()
}

fn str_input<'a>(input: &'a Value, key: &str) -> &'a str {
    input[key].as_str().unwrap()
}

/// Check the recorded request and the call result against one case.
fn verify(
    name: &str,
    case: &Value,
    client: &OracleClient<CannedTransport>,
    result: Result<Value, ApiError>,
) {
    let sent = client.transport().sent.borrow();

    if let Some(expected_req) = case.get("expected_request") {
        assert_eq!(sent.len(), 1, "{name}: exactly one request");
        let req = &sent[0];
        assert_eq!(req.method, HttpMethod::Post, "{name}: method");
        let expected_path = format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap());
        assert_eq!(req.path, expected_path, "{name}: path");
        assert_eq!(
            req.headers,
            vec![
                ("Authorization".to_string(), format!("Bearer {TOKEN}")),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            "{name}: headers"
        );
        let body = match req.body.as_deref() {
            Some(body) => serde_json::from_str(body).unwrap(),
            None => Value::Null,
        };
        assert_eq!(body, expected_req["body"], "{name}: body");
    } else {
        assert!(sent.is_empty(), "{name}: no request expected");
    }

    match case.get("expected_error").and_then(Value::as_str) {
        Some(expected) => {
            let err = result.unwrap_err();
            let matched = match expected {
                "UnexpectedStatus" => matches!(err, ApiError::UnexpectedStatus { .. }),
                "MalformedEnvelope" => matches!(err, ApiError::MalformedEnvelope(_)),
                "InvalidDateFormat" => matches!(err, ApiError::InvalidDateFormat { .. }),
                "InvalidDateFormat:date1" => {
                    matches!(err, ApiError::InvalidDateFormat { argument: "date1", .. })
                }
                "InvalidDateFormat:date2" => {
                    matches!(err, ApiError::InvalidDateFormat { argument: "date2", .. })
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            };
            assert!(matched, "{name}: expected {expected}, got {err:?}");
        }
        None => {
            assert_eq!(result.unwrap(), case["expected_result"], "{name}: parsed result");
            assert_eq!(client.last_response_status().unwrap().code, 200, "{name}: status");
        }
    }
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[test]
fn locations_test_vectors() {
    for case in cases(include_str!("../../test-vectors/locations.json")) {
        let name = case["name"].as_str().unwrap();
        let mut client = client_for(&case);
        let result = client.locations();
        verify(name, &case, &client, result);
    }
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

#[test]
fn date_test_vectors() {
    for case in cases(include_str!("../../test-vectors/date.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let mut client = client_for(&case);
        let result = client.date(
            str_input(input, "date_or_timestamp"),
            str_input(input, "country"),
            options(input),
        );
        verify(name, &case, &client, result);
    }
}

// ---------------------------------------------------------------------------
// Holidays
// ---------------------------------------------------------------------------

#[test]
fn holidays_test_vectors() {
    for case in cases(include_str!("../../test-vectors/holidays.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let mut client = client_for(&case);
        let result = client.holidays(
            str_input(input, "country"),
            str_input(input, "year"),
            options(input),
        );
        verify(name, &case, &client, result);
    }
}

// ---------------------------------------------------------------------------
// Business days
// ---------------------------------------------------------------------------

#[test]
fn business_days_test_vectors() {
    for case in cases(include_str!("../../test-vectors/business-days.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let mut client = client_for(&case);
        let result = client.business_days(
            str_input(input, "date1"),
            str_input(input, "date2"),
            str_input(input, "country"),
            options(input),
        );
        verify(name, &case, &client, result);
    }
}
