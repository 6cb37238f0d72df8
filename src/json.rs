// ABOUTME: Conversions between runtime values and serde_json values

//! Conversions between the runtime [`Value`] and `serde_json::Value`.
//!
//! The value model is JSON-shaped by construction (spec §3: undefined,
//! null, boolean, number, string, array, object, function — minus function,
//! which has no JSON representation), so this is the same conversion table
//! the teacher's `json:encode`/`json:decode` builtins use, repurposed here
//! for building a host [`crate::env::Environment`] from a JSON document
//! instead of exposing it as a callable `std` member.

use crate::value::Value;
use std::collections::HashMap;

/// Converts a value to JSON. Fails on `Function`, which has no JSON
/// representation, and on non-finite numbers, which JSON cannot encode.
pub fn value_to_json(value: &Value) -> Result<serde_json::Value, String> {
    match value {
        Value::Undefined => Ok(serde_json::Value::Null),
        Value::Null => Ok(serde_json::Value::Null),
        Value::Boolean(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .ok_or_else(|| format!("cannot encode non-finite number {n} as JSON")),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Array(items) => {
            let encoded: Result<Vec<_>, _> = items.iter().map(value_to_json).collect();
            Ok(serde_json::Value::Array(encoded?))
        }
        Value::Object(members) => {
            let mut map = serde_json::Map::with_capacity(members.len());
            for (key, val) in members.iter() {
                map.insert(key.clone(), value_to_json(val)?);
            }
            Ok(serde_json::Value::Object(map))
        }
        Value::Function(_) => Err("functions have no JSON representation".to_string()),
    }
}

/// Converts a parsed JSON document into a runtime `Value`. Infallible: every
/// `serde_json::Value` shape maps onto an admissible value.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::array(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(members) => {
            let mut map = HashMap::with_capacity(members.len());
            for (key, val) in members {
                map.insert(key.clone(), json_to_value(val));
            }
            Value::object(map)
        }
    }
}

/// Parses a JSON document directly into a `Value`, for hosts that construct
/// an environment from a JSON file.
pub fn value_from_json_str(text: &str) -> Result<Value, String> {
    let parsed: serde_json::Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    Ok(json_to_value(&parsed))
}
