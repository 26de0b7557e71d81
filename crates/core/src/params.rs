//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail; a mistyped key silently yields its default, which is how
//! a hand-edited params object degrades.

use serde_json::Value;

/// Human-readable JSON type name, used in type mismatch errors.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only non-negative JSON integers are read. Values beyond `usize::MAX` on the
/// target saturate rather than wrap, so range checks downstream still see them
/// as too large.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_type_name_covers_every_variant() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }

    #[test]
    fn hand_edited_params_read_with_fallbacks() {
        let params = json!({
            "link_distance": 120,
            "max_speed": "fast",
            "self_links": 1,
            "color": "#00ff00",
            "size_max": null
        });
        assert_eq!(param_f64(&params, "link_distance", 100.0), 120.0);
        assert_eq!(param_f64(&params, "max_speed", 0.25), 0.25);
        assert_eq!(param_f64(&params, "size_max", 2.5), 2.5);
        assert!(param_bool(&params, "self_links", true));
        assert_eq!(param_string(&params, "color", "#ff6b00"), "#00ff00");
        assert_eq!(param_usize(&params, "count", 80), 80);
    }

    #[test]
    fn count_must_be_a_non_negative_integer() {
        assert_eq!(param_usize(&json!({"count": 12}), "count", 80), 12);
        assert_eq!(param_usize(&json!({"count": 12.5}), "count", 80), 80);
        assert_eq!(param_usize(&json!({"count": -3}), "count", 80), 80);
    }

    #[test]
    fn huge_count_is_not_truncated() {
        let n = param_usize(&json!({"count": u64::MAX}), "count", 80);
        assert!(n > 100_000);
    }

    #[test]
    fn non_object_params_yield_defaults() {
        let params = json!([1, 2, 3]);
        assert_eq!(param_f64(&params, "link_alpha", 0.15), 0.15);
        assert!(!param_bool(&params, "self_links", false));
        assert_eq!(param_string(&params, "color", "#ff6b00"), "#ff6b00");
    }
}
