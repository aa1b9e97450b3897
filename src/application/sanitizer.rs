// Coercion of untrusted telemetry fields into finite numbers
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Coerce a raw field to a finite number. Anything that fails to coerce,
/// or coerces to NaN/infinity, becomes `None`.
pub fn sanitize_number(value: &Value) -> Option<f64> {
    let numeric = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    numeric.is_finite().then_some(numeric)
}

/// Like [`sanitize_number`], but a power factor must be strictly positive.
pub fn sanitize_power_factor(value: &Value) -> Option<f64> {
    sanitize_number(value).filter(|pf| *pf > 0.0)
}

/// Resolve a sample timestamp to epoch milliseconds. Numeric values are
/// taken as-is; strings that are not numeric fall back to date parsing.
/// Zero, and values outside the representable date range, count as
/// "no timestamp".
pub fn resolve_timestamp(value: &Value) -> Option<i64> {
    let resolved = match sanitize_number(value) {
        Some(ms) => representable_millis(ms),
        None => value.as_str().and_then(parse_date),
    };
    resolved.filter(|ms| *ms != 0)
}

/// `as i64` saturates, so anything beyond chrono's range is rejected here.
fn representable_millis(ms: f64) -> Option<i64> {
    let millis = ms.trunc() as i64;
    DateTime::from_timestamp_millis(millis).map(|_| millis)
}

const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_date(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}
