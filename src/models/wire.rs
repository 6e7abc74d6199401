//! Lenient readers for record fields
//!
//! Snapshot fields are read through `serde_json::Value` so that a value of
//! an unexpected JSON type degrades to raw text instead of failing the
//! whole snapshot.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text of a wire value: strings as-is, other values as their JSON text
///
/// `null` has no text.
pub fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Deserialize an optional text field that may arrive as any JSON type
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(text_from_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_from_value() {
        assert_eq!(text_from_value(json!("Dinner")), Some("Dinner".into()));
        assert_eq!(text_from_value(json!(12)), Some("12".into()));
        assert_eq!(text_from_value(json!([2024, 7, 19])), Some("[2024,7,19]".into()));
        assert_eq!(text_from_value(Value::Null), None);
    }
}
