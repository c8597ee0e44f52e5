//! Parse-or-default coercion for loosely typed scenario input
//!
//! Scenario payloads arrive from form fields, URL query strings, and local
//! storage, so numbers may show up as strings, be blank, or be garbage.
//! Every numeric field passes through these helpers once, at load time; the
//! projection loop only ever sees clean values.
//!
//! Rules:
//! - JSON numbers pass through when finite
//! - Strings are trimmed and parsed; blank or non-numeric strings fail
//! - Everything else (null, bool, array, object, absent) fails
//! - Failed values become the caller's default (0 for amounts)

use super::EndMonth;
use serde_json::Value;

/// Interpret a JSON value as a finite number, if possible
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Numeric value of an optional field, or `default` when absent or malformed
pub fn parse_or_default(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(parse_number).unwrap_or(default)
}

/// Start bound of a window: the first whole month at or after the value.
///
/// Missing or malformed values start at month 0; negative values clamp to 0
/// since every month index already satisfies them.
pub fn parse_start_month(value: Option<&Value>) -> u32 {
    to_month(parse_or_default(value, 0.0).ceil())
}

/// Exact month for a one-time cost.
///
/// Returns `None` for negative or fractional values, which no month index
/// can equal.
pub fn parse_exact_month(value: Option<&Value>) -> Option<u32> {
    let month = parse_or_default(value, 0.0);
    if month < 0.0 || month.fract() != 0.0 {
        return None;
    }
    Some(to_month(month))
}

/// End bound of a window: the last whole month at or before the value.
///
/// Absent, null, or malformed values mean the window is open-ended.
/// Returns `None` when the bound falls before month 0, i.e. the entry can
/// never be active.
pub fn parse_end_month(value: Option<&Value>) -> Option<EndMonth> {
    match value.and_then(parse_number) {
        None => Some(EndMonth::Indefinite),
        Some(end) if end < 0.0 => None,
        Some(end) => Some(EndMonth::EndsAt(to_month(end.floor()))),
    }
}

fn to_month(value: f64) -> u32 {
    // Saturating float-to-int cast; negatives land on 0
    value as u32
}
