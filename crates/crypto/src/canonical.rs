//! Canonical JSON serialization for signing strings.
//!
//! Signer and verifier must agree on the exact bytes of a request body, so
//! this module does not rely on the map ordering of `serde_json::Map` (which
//! changes when the `preserve_order` feature is enabled anywhere in the
//! build). Output rules:
//!
//! - object keys sorted by their UTF-8 bytes, recursively
//! - no whitespace between tokens
//! - strings escaped exactly as `serde_json` escapes them
//! - numbers in `serde_json::Number` display form

use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// Canonical form of an absent body.
pub const EMPTY_BODY: &str = "{}";

/// Serialize any `Serialize` value to canonical JSON.
///
/// Fails only when the value cannot be represented as JSON (for example a
/// map with non-string keys).
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(canonical_json(&value))
}

/// Serialize an already-built JSON value to canonical JSON.
#[must_use]
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push_str(&Value::String(s.to_owned()).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_keys_sorted_without_whitespace() {
        let value = json!({"currency": "USD", "amount": 100});
        assert_eq!(canonical_json(&value), r#"{"amount":100,"currency":"USD"}"#);
    }

    #[test]
    fn test_nested_objects_sorted() {
        let value = json!({
            "b": {"z": 1, "a": [3, {"y": null, "x": true}]},
            "a": "first"
        });
        assert_eq!(
            canonical_json(&value),
            r#"{"a":"first","b":{"a":[3,{"x":true,"y":null}],"z":1}}"#
        );
    }

    #[test]
    fn test_array_order_preserved() {
        assert_eq!(canonical_json(&json!([3, 1, 2])), "[3,1,2]");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(canonical_json(&json!(100)), "100");
        assert_eq!(canonical_json(&json!(-7)), "-7");
        assert_eq!(canonical_json(&json!(100.5)), "100.5");
        assert_eq!(canonical_json(&json!(100.0)), "100.0");
    }

    #[test]
    fn test_string_escaping() {
        let value = json!({"note": "say \"hi\"\n", "name": "Zoë"});
        assert_eq!(
            canonical_json(&value),
            r#"{"name":"Zoë","note":"say \"hi\"\n"}"#
        );
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(canonical_json(&json!({})), EMPTY_BODY);
    }

    #[test]
    fn test_to_canonical_json_from_struct() {
        #[derive(Serialize)]
        struct Order {
            order_id: &'static str,
            amount: u32,
        }

        let body = to_canonical_json(&Order { order_id: "A1", amount: 5 }).unwrap();
        assert_eq!(body, r#"{"amount":5,"order_id":"A1"}"#);
    }

    #[test]
    fn test_non_string_keys_fail() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(to_canonical_json(&map).is_err());
    }
}
