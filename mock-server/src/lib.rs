use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DEFAULT_TOKEN: &str = "test-token";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Deserialize)]
pub struct DateQuery {
    pub country: String,
    pub date: Option<String>,
    pub timestamp: Option<Value>,
}

#[derive(Deserialize)]
pub struct HolidaysQuery {
    pub country: String,
    pub year: Value,
    pub month: Option<u32>,
}

#[derive(Deserialize)]
pub struct BusinessDaysQuery {
    pub country: String,
    pub date1: String,
    pub date2: String,
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
}

/// Failure response: `{"status": "error", "message": ...}` with a 4xx code.
pub struct ApiFailure(StatusCode, String);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({"status": "error", "message": self.1});
        (self.0, Json(body)).into_response()
    }
}

/// Fixed-date holidays per country, as `(month, day, name)`.
const CALENDARS: &[(&str, &str, &[(u32, u32, &str)])] = &[
    (
        "AU",
        "Australia",
        &[
            (1, 1, "New Year's Day"),
            (1, 26, "Australia Day"),
            (4, 25, "Anzac Day"),
            (12, 25, "Christmas Day"),
            (12, 26, "Boxing Day"),
        ],
    ),
    (
        "GB",
        "United Kingdom",
        &[
            (1, 1, "New Year's Day"),
            (12, 25, "Christmas Day"),
            (12, 26, "Boxing Day"),
        ],
    ),
    (
        "US",
        "United States",
        &[
            (1, 1, "New Year's Day"),
            (7, 4, "Independence Day"),
            (11, 11, "Veterans Day"),
            (12, 25, "Christmas Day"),
        ],
    ),
];

pub fn app() -> Router {
    app_with_token(DEFAULT_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
    };
    Router::new()
        .route("/api/v1/date/locations", post(locations))
        .route("/api/v1/date", post(date))
        .route("/api/v1/date/holidays", post(holidays))
        .route("/api/v1/date/business-days", post(business_days))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_token(token)).await
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == &*state.token);
    if !authorized {
        tracing::warn!(path = %request.uri().path(), "rejected request without valid token");
        return ApiFailure(StatusCode::UNAUTHORIZED, "invalid API token".to_string())
            .into_response();
    }
    next.run(request).await
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({"status": "ok", "data": data}))
}

async fn locations() -> Json<Value> {
    let locations: Vec<Location> = CALENDARS
        .iter()
        .map(|(code, name, _)| Location {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect();
    envelope(json!(locations))
}

async fn date(Json(input): Json<DateQuery>) -> Result<Json<Value>, ApiFailure> {
    let calendar = calendar(&input.country)?;
    let day = match (&input.date, &input.timestamp) {
        (Some(date), _) => parse_date(date)?,
        (None, Some(timestamp)) => {
            let seconds = as_integer(timestamp)
                .ok_or_else(|| unprocessable(format!("invalid timestamp: {timestamp}")))?;
            DateTime::from_timestamp(seconds, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| unprocessable(format!("timestamp out of range: {seconds}")))?
        }
        (None, None) => {
            return Err(unprocessable(
                "either date or timestamp is required".to_string(),
            ))
        }
    };

    let names: Vec<String> = holidays_in(calendar, day.year())
        .into_iter()
        .filter(|holiday| holiday.date == day)
        .map(|holiday| holiday.name)
        .collect();
    Ok(envelope(json!({
        "date": day,
        "country": input.country,
        "weekday": day.format("%A").to_string(),
        "isHoliday": !names.is_empty(),
        "holidays": names,
        "isBusinessDay": is_business_day(calendar, day),
    })))
}

async fn holidays(Json(input): Json<HolidaysQuery>) -> Result<Json<Value>, ApiFailure> {
    let calendar = calendar(&input.country)?;
    let year = as_integer(&input.year)
        .and_then(|year| i32::try_from(year).ok())
        .ok_or_else(|| unprocessable(format!("invalid year: {}", input.year)))?;

    let holidays: Vec<Holiday> = holidays_in(calendar, year)
        .into_iter()
        .filter(|holiday| input.month.is_none_or(|month| holiday.date.month() == month))
        .collect();
    Ok(envelope(json!(holidays)))
}

async fn business_days(Json(input): Json<BusinessDaysQuery>) -> Result<Json<Value>, ApiFailure> {
    let calendar = calendar(&input.country)?;
    let date1 = parse_date(&input.date1)?;
    let date2 = parse_date(&input.date2)?;

    let (start, end) = if date1 <= date2 { (date1, date2) } else { (date2, date1) };
    let count = start
        .iter_days()
        .take_while(|day| *day < end)
        .filter(|day| is_business_day(calendar, *day))
        .count();
    Ok(envelope(json!({
        "country": input.country,
        "date1": date1,
        "date2": date2,
        "businessDays": count,
    })))
}

type Calendar = &'static [(u32, u32, &'static str)];

fn calendar(country: &str) -> Result<Calendar, ApiFailure> {
    CALENDARS
        .iter()
        .find(|(code, _, _)| code.eq_ignore_ascii_case(country))
        .map(|(_, _, days)| *days)
        .ok_or_else(|| ApiFailure(StatusCode::NOT_FOUND, format!("unknown country: {country}")))
}

fn holidays_in(calendar: Calendar, year: i32) -> Vec<Holiday> {
    calendar
        .iter()
        .filter_map(|(month, day, name)| {
            NaiveDate::from_ymd_opt(year, *month, *day).map(|date| Holiday {
                date,
                name: name.to_string(),
            })
        })
        .collect()
}

fn is_business_day(calendar: Calendar, day: NaiveDate) -> bool {
    let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
    let holiday = calendar
        .iter()
        .any(|(month, dom, _)| day.month() == *month && day.day() == *dom);
    !weekend && !holiday
}

fn parse_date(value: &str) -> Result<NaiveDate, ApiFailure> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| unprocessable(format!("invalid date: {value}")))
}

/// Integers may arrive as JSON numbers or digit strings.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn unprocessable(message: String) -> ApiFailure {
    ApiFailure(StatusCode::UNPROCESSABLE_ENTITY, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn au() -> Calendar {
        calendar("AU").unwrap_or_else(|_| panic!("AU calendar missing"))
    }

    #[test]
    fn holiday_serializes_date_as_iso_string() {
        let holiday = Holiday {
            date: NaiveDate::from_ymd_opt(2023, 12, 25).unwrap(),
            name: "Christmas Day".to_string(),
        };
        let json = serde_json::to_value(&holiday).unwrap();
        assert_eq!(json["date"], "2023-12-25");
        assert_eq!(json["name"], "Christmas Day");
    }

    #[test]
    fn country_lookup_ignores_case() {
        assert!(calendar("au").is_ok());
        assert!(calendar("ZZ").is_err());
    }

    #[test]
    fn weekends_and_holidays_are_not_business_days() {
        // 2023-01-26 is a Thursday, 2023-01-28 a Saturday.
        assert!(!is_business_day(au(), NaiveDate::from_ymd_opt(2023, 1, 26).unwrap()));
        assert!(!is_business_day(au(), NaiveDate::from_ymd_opt(2023, 1, 28).unwrap()));
        assert!(is_business_day(au(), NaiveDate::from_ymd_opt(2023, 1, 27).unwrap()));
    }

    #[test]
    fn holidays_in_skips_nothing_for_valid_dates() {
        assert_eq!(holidays_in(au(), 2023).len(), 5);
    }

    #[test]
    fn integers_accept_numbers_and_digit_strings() {
        assert_eq!(as_integer(&json!(2023)), Some(2023));
        assert_eq!(as_integer(&json!("2023")), Some(2023));
        assert_eq!(as_integer(&json!("twenty")), None);
        assert_eq!(as_integer(&json!(null)), None);
    }
}
