//! Value predicates shared by the attribute checks.

use chrono::Datelike;
use serde_json::Value;

/// The string if it is non-empty after trimming.
pub fn non_empty_string(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

/// The integer carried by a JSON integer or an integer string such as `"1999"`.
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

/// Next calendar year in local time.
pub fn next_year() -> i32 {
    chrono::Local::now().year() + 1
}
