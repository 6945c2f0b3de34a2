//! Rules shared by the business-date endpoint.

use chrono::{DateTime, NaiveDateTime, Utc};
use validator::ValidationError;

/// Largest `days` or `hours` value accepted in one request.
pub const MAX_BUSINESS_UNITS: u32 = 100_000;

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Parses a strictly positive whole number such as `"3"`, `" 3 "` or `"3.0"`.
pub fn parse_positive_count(name: &str, raw: &str) -> Result<u32, ValidationError> {
    let not_positive = || {
        invalid(
            "not_positive_integer",
            format!("'{}' must be a positive integer.", name),
        )
    };

    let value: f64 = raw.trim().parse().map_err(|_| not_positive())?;
    if !value.is_finite() || value.fract() != 0.0 || value <= 0.0 {
        return Err(not_positive());
    }
    if value > f64::from(MAX_BUSINESS_UNITS) {
        return Err(invalid(
            "too_large",
            format!("'{}' must not exceed {}.", name, MAX_BUSINESS_UNITS),
        ));
    }

    Ok(value as u32)
}

/// Parses an ISO-8601 instant explicitly marked as UTC with a trailing `Z`.
pub fn parse_utc_instant(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let not_utc = || {
        invalid(
            "date_not_utc_iso",
            "'date' must be an ISO-8601 UTC timestamp ending in 'Z'.".to_string(),
        )
    };

    let Some(without_suffix) = raw.strip_suffix('Z') else {
        return Err(not_utc());
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(without_suffix, "%Y-%m-%dT%H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|_| not_utc())
}
