//! JSON boundary for plain values.
//!
//! Plain forms usually arrive as untyped JSON (HTTP bodies, files, message
//! payloads). These helpers move between `serde_json::Value` and the plain
//! subset of `surrealdb::sql::Value` so the converters can be applied
//! directly to deserialized data.

use serde_json::json;
use std::collections::BTreeMap;
use surrealdb::sql::{Array, Number, Object, Strand, Value};

use crate::config::ConversionConfig;
use crate::error::{ConversionError, Result};
use crate::forward::convert_to_pojo_with_config;
use crate::kind::describe;
use crate::reverse::convert_to_surreal_with_config;

/// Plain value from JSON. Integers that fit in `i64` stay integers.
pub fn plain_from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::Int(i))
            } else if let Some(f) = n.as_f64() {
                Value::Number(Number::Float(f))
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::Strand(Strand::from(s)),
        serde_json::Value::Array(items) => Value::Array(Array::from(
            items.into_iter().map(plain_from_json).collect::<Vec<_>>(),
        )),
        serde_json::Value::Object(map) => {
            let map: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, plain_from_json(v)))
                .collect();
            Value::Object(Object::from(map))
        }
    }
}

/// JSON form of a plain value.
///
/// Fails with [`ConversionError::NotPlain`] when a rich value (or any other
/// value without a JSON form) is found at any depth.
pub fn plain_to_json(value: &Value) -> Result<serde_json::Value> {
    match value {
        Value::None | Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(json!(b)),
        Value::Number(Number::Int(i)) => Ok(json!(i)),
        // Non-finite floats have no JSON form
        Value::Number(Number::Float(f)) => Ok(serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)),
        Value::Strand(s) => Ok(json!(s.as_str())),
        Value::Datetime(dt) => Ok(json!(dt.0.to_rfc3339())),
        Value::Array(arr) => Ok(serde_json::Value::Array(
            arr.iter().map(plain_to_json).collect::<Result<Vec<_>>>()?,
        )),
        Value::Object(obj) => {
            let map = obj
                .iter()
                .map(|(k, v)| Ok((k.clone(), plain_to_json(v)?)))
                .collect::<Result<serde_json::Map<_, _>>>()?;
            Ok(serde_json::Value::Object(map))
        }
        other => Err(ConversionError::NotPlain {
            kind: describe(other),
        }),
    }
}

/// Parse plain JSON and convert it to SurrealDB values.
pub fn rich_from_json(value: serde_json::Value) -> Result<Value> {
    rich_from_json_with_config(value, &ConversionConfig::default())
}

pub fn rich_from_json_with_config(
    value: serde_json::Value,
    config: &ConversionConfig,
) -> Result<Value> {
    convert_to_surreal_with_config(&plain_from_json(value), config)
}

/// Convert SurrealDB values to their plain form and render it as JSON.
pub fn rich_to_json(value: &Value) -> Result<serde_json::Value> {
    rich_to_json_with_config(value, &ConversionConfig::default())
}

pub fn rich_to_json_with_config(
    value: &Value,
    config: &ConversionConfig,
) -> Result<serde_json::Value> {
    plain_to_json(&convert_to_pojo_with_config(value, config)?)
}
