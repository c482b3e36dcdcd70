//! Client-side checks on date-shaped arguments.
//!
//! The date check is a substring match: any run of `DDDD-DD-DD` (ASCII
//! digits) anywhere in the input passes, so `"xx2023-01-01xx"` is accepted and
//! `"2023-13-45"` is too. The service does the real parsing.

use crate::error::ApiError;

const DATE_SHAPE: &[u8; 10] = b"dddd-dd-dd";

/// True when `value` is non-empty and made only of ASCII digits.
pub fn is_timestamp(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// True when `value` contains a `DDDD-DD-DD` sequence anywhere.
pub fn contains_date(value: &str) -> bool {
    value.as_bytes().windows(DATE_SHAPE.len()).any(|window| {
        window.iter().zip(DATE_SHAPE).all(|(byte, shape)| match shape {
            b'd' => byte.is_ascii_digit(),
            _ => byte == shape,
        })
    })
}

pub(crate) fn check_date(argument: &'static str, value: &str) -> Result<(), ApiError> {
    if contains_date(value) {
        Ok(())
    } else {
        Err(ApiError::InvalidDateFormat {
            argument,
            value: value.to_string(),
        })
    }
}
