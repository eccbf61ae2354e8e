//! Form value parsing.
//!
//! Callers hand over raw strings straight from a form or a JSON payload.
//! Malformed numbers and dates are never an error: they become `None`, and the
//! business rules decide what an absent value means.

use chrono::NaiveDate;

/// Trimmed text, or `None` when empty.
#[must_use]
pub fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Parses a monetary amount or quantity. Empty, non-numeric and non-finite
/// input gives `None`, never zero.
#[must_use]
pub fn parse_amount(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parses a whole count (family size, seats, seat index, table number).
#[must_use]
pub fn parse_count(raw: Option<&str>) -> Option<i32> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i32>().ok())
}

/// Parses an ISO `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// A positive seat count, or `None`.
#[must_use]
pub fn parse_seats(raw: Option<&str>) -> Option<u32> {
    parse_count(raw)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n > 0)
}
