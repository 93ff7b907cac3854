//! Lenient numeric request fields.
//!
//! Clients send day counts either as JSON numbers or as numeric strings
//! (`"3"`, `" -2 "`). Whole floats such as `3.0` are accepted too. Anything
//! else fails deserialization and surfaces as a 400.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize an optional integer that may arrive as a number or a string.
///
/// Use with `#[serde(default, deserialize_with = "coerced_int")]`.
pub fn coerced_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {value}"))),
    }
}

fn coerce(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "coerced_int")]
        days: Option<i64>,
    }

    fn days(body: Value) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_value::<Body>(body).map(|b| b.days)
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(days(json!({"days": 3})).unwrap(), Some(3));
        assert_eq!(days(json!({"days": -2})).unwrap(), Some(-2));
        assert_eq!(days(json!({"days": "7"})).unwrap(), Some(7));
        assert_eq!(days(json!({"days": " -1 "})).unwrap(), Some(-1));
        assert_eq!(days(json!({"days": 4.0})).unwrap(), Some(4));
    }

    #[test]
    fn missing_or_null_is_none() {
        assert_eq!(days(json!({})).unwrap(), None);
        assert_eq!(days(json!({"days": null})).unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(days(json!({"days": "soon"})).is_err());
        assert!(days(json!({"days": 1.5})).is_err());
        assert!(days(json!({"days": true})).is_err());
    }
}
