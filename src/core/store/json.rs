use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::{FlatMapping, KEY_DELIMITER};

/// Parse a single-document JSON store into a flat mapping.
///
/// Top-level keys are taken as-is (they are usually already dotted). Nested
/// objects are flattened with the key delimiter and arrays by index. Numbers
/// and booleans keep their JSON text; `null` is skipped.
pub fn parse_document(content: &str) -> Result<FlatMapping> {
    let json: Value = serde_json::from_str(content).context("Failed to parse JSON")?;

    let Value::Object(_) = json else {
        bail!("Root of JSON document must be an object");
    };

    let mut mapping = FlatMapping::new();
    flatten_json(&json, String::new(), &mut mapping);
    Ok(mapping)
}

fn flatten_json(value: &Value, prefix: String, result: &mut FlatMapping) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_json(val, child_key(&prefix, key), result);
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.iter().enumerate() {
                flatten_json(val, child_key(&prefix, &index.to_string()), result);
            }
        }
        Value::String(s) => {
            result.insert(prefix, s.clone());
        }
        Value::Number(n) => {
            result.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            result.insert(prefix, b.to_string());
        }
        Value::Null => {}
    }
}

fn child_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, KEY_DELIMITER, key)
    }
}
