//! Tolerant readers over stored sheet JSON.
//!
//! Stored sheets come from older schema versions and hand edits, so a field may be
//! missing, null, a numeric string, or a float. These helpers read what they can and
//! fall back to a default instead of failing.

use serde_json::{Map, Value};

/// Largest magnitude any number on a sheet may have. Values read from JSON or typed
/// into a form are clamped to `-MAX_SHEET_NUMBER..=MAX_SHEET_NUMBER`, which keeps
/// every derived sum and product well inside `i32`.
pub const MAX_SHEET_NUMBER: i32 = 999_999;

/// Clamps to the sheet number range.
pub fn bounded(value: i64) -> i32 {
    // The clamp bounds fit in i32.
    value.clamp(-i64::from(MAX_SHEET_NUMBER), i64::from(MAX_SHEET_NUMBER)) as i32
}

/// Parses a numeric string: integers, decimals (truncated) and exponents. The result
/// is clamped to the sheet number range; NaN and infinities are rejected.
pub fn parse_int(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(bounded(v));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| bounded(f.trunc() as i64))
}

/// Reads an integer, accepting JSON numbers (floats are truncated) and numeric strings.
/// Out-of-range values are clamped to the sheet number range.
pub fn int(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .map(bounded),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

pub fn int_or(obj: &Map<String, Value>, key: &str, default: i32) -> i32 {
    int(obj.get(key)).unwrap_or(default)
}

pub fn opt_int(obj: &Map<String, Value>, key: &str) -> Option<i32> {
    int(obj.get(key))
}

/// Reads a string; numbers are rendered, anything else becomes empty.
pub fn text(obj: &Map<String, Value>, key: &str) -> String {
    opt_text(obj, key).unwrap_or_default()
}

/// Like [`text`] but treats a missing or empty value as `None`.
pub fn opt_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn boolean(obj: &Map<String, Value>, key: &str, default: bool) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

/// Elements of an array field that are objects; anything else is skipped.
pub fn objects<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
    obj.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

pub fn object<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}

/// The root object of a sheet, or an empty map for non-object input.
pub fn root(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        root(&v)
    }

    #[test]
    fn int_accepts_numbers_floats_and_numeric_strings() {
        let m = map(json!({"a": 3, "b": 4.9, "c": " 12 ", "d": "x", "e": null}));
        assert_eq!(opt_int(&m, "a"), Some(3));
        assert_eq!(opt_int(&m, "b"), Some(4));
        assert_eq!(opt_int(&m, "c"), Some(12));
        assert_eq!(opt_int(&m, "d"), None);
        assert_eq!(opt_int(&m, "e"), None);
        assert_eq!(int_or(&m, "missing", 7), 7);
    }

    #[test]
    fn int_clamps_huge_numbers_and_strings() {
        let m = map(json!({
            "max": i32::MAX,
            "min": i64::MIN,
            "u64": u64::MAX,
            "float": 1e300,
            "exp": "1e20",
            "neg_exp": "-1e20",
            "long": "99999999999999999999",
            "nan": "NaN",
            "inf": "inf",
        }));
        assert_eq!(opt_int(&m, "max"), Some(MAX_SHEET_NUMBER));
        assert_eq!(opt_int(&m, "min"), Some(-MAX_SHEET_NUMBER));
        assert_eq!(opt_int(&m, "u64"), Some(MAX_SHEET_NUMBER));
        assert_eq!(opt_int(&m, "float"), Some(MAX_SHEET_NUMBER));
        assert_eq!(opt_int(&m, "exp"), Some(MAX_SHEET_NUMBER));
        assert_eq!(opt_int(&m, "neg_exp"), Some(-MAX_SHEET_NUMBER));
        assert_eq!(opt_int(&m, "long"), Some(MAX_SHEET_NUMBER));
        assert_eq!(opt_int(&m, "nan"), None);
        assert_eq!(opt_int(&m, "inf"), None);
    }

    #[test]
    fn parse_int_truncates_decimals() {
        assert_eq!(parse_int("12.5"), Some(12));
        assert_eq!(parse_int("-3.9"), Some(-3));
        assert_eq!(parse_int(" 42 "), Some(42));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn text_renders_numbers_and_ignores_other_types() {
        let m = map(json!({"s": "hi", "n": 5, "b": true, "empty": ""}));
        assert_eq!(text(&m, "s"), "hi");
        assert_eq!(text(&m, "n"), "5");
        assert_eq!(text(&m, "b"), "");
        assert_eq!(opt_text(&m, "empty"), None);
    }

    #[test]
    fn objects_skips_non_object_entries() {
        let m = map(json!({"list": [{"a": 1}, 3, "x", {"b": 2}], "notalist": {}}));
        assert_eq!(objects(&m, "list").count(), 2);
        assert_eq!(objects(&m, "notalist").count(), 0);
        assert_eq!(objects(&m, "missing").count(), 0);
    }

    #[test]
    fn root_of_non_object_is_empty() {
        assert!(root(&json!([1, 2])).is_empty());
        assert!(root(&Value::Null).is_empty());
    }
}
