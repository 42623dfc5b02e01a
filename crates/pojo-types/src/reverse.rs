//! Reverse conversion: plain value → SurrealDB value.
//!
//! Objects are matched against the plain-form recognizers in a fixed
//! priority (record id, uuid, duration, decimal, table, geometry). Matches are
//! rebuilt as SurrealDB values; other objects and arrays are walked
//! recursively and everything else is copied through. Geometry collections
//! have no rich form, so they are walked as ordinary objects.
//!
//! A failure anywhere aborts the whole conversion.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use surrealdb::sql::{Array, Duration, Id, Number, Object, Table, Thing, Value};

use crate::config::ConversionConfig;
use crate::error::{ConversionError, Result};
use crate::geometry::PlainGeometry;
use crate::guards::classify;
use crate::kind::{describe, GeometryKind, PlainKind};

/// Convert a plain value to SurrealDB values with the default configuration.
///
/// # Example
///
/// ```rust
/// use pojo_types::{convert_to_surreal, factories::new_duration};
/// use surrealdb::sql::Value;
///
/// let rich = convert_to_surreal(&new_duration("1h30m")).unwrap();
/// assert!(matches!(rich, Value::Duration(ref d) if d.to_string() == "1h30m"));
/// ```
pub fn convert_to_surreal(value: &Value) -> Result<Value> {
    convert_to_surreal_with_config(value, &ConversionConfig::default())
}

/// Convert a plain value to SurrealDB values.
pub fn convert_to_surreal_with_config(value: &Value, config: &ConversionConfig) -> Result<Value> {
    Reverse { config }.convert(value, 0)
}

struct Reverse<'a> {
    config: &'a ConversionConfig,
}

impl Reverse<'_> {
    fn convert(&self, value: &Value, depth: usize) -> Result<Value> {
        if depth > self.config.max_depth {
            return Err(ConversionError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        match value {
            Value::Object(obj) => match classify(value) {
                Some(kind) => self.convert_plain(kind, depth),
                None => self.object(obj, depth),
            },
            Value::Array(arr) => self.array(arr, depth),
            _ => Ok(value.clone()),
        }
    }

    fn convert_plain(&self, kind: PlainKind<'_>, depth: usize) -> Result<Value> {
        match kind {
            PlainKind::RecordId { tb, id } => self.record_id(tb, id, depth),
            PlainKind::Uuid(s) => {
                let uuid = uuid::Uuid::parse_str(s).map_err(|e| ConversionError::InvalidUuid {
                    value: s.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Value::Uuid(surrealdb::sql::Uuid::from(uuid)))
            }
            PlainKind::Duration(s) => {
                let duration =
                    Duration::try_from(s).map_err(|_| ConversionError::InvalidDuration {
                        value: s.to_string(),
                    })?;
                Ok(Value::Duration(duration))
            }
            PlainKind::Decimal(s) => Ok(Value::Number(Number::Decimal(parse_decimal(s)?))),
            PlainKind::Table(name) => Ok(Value::Table(Table::from(name.to_string()))),
            // Collections have no rich form and are walked like any object
            PlainKind::Geometry { kind, object } if !kind.is_supported() => {
                self.object(object, depth)
            }
            PlainKind::Geometry { kind, object } => geometry(kind, object),
        }
    }

    fn record_id(&self, tb: &Value, id: &Value, depth: usize) -> Result<Value> {
        let Value::Strand(tb) = tb else {
            return Err(ConversionError::InvalidRecordId(format!(
                "table part must be a string, found {}",
                describe(tb)
            )));
        };
        let id = record_id_key(self.convert(id, depth + 1)?)?;
        tracing::trace!("Rebuilt record id on table {}", tb.as_str());
        Ok(Value::Thing(Thing::from((tb.as_str(), id))))
    }

    fn array(&self, arr: &Array, depth: usize) -> Result<Value> {
        let values = arr
            .iter()
            .map(|v| self.convert(v, depth + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Array(Array::from(values)))
    }

    fn object(&self, obj: &Object, depth: usize) -> Result<Value> {
        let map = obj
            .iter()
            .map(|(k, v)| Ok((k.clone(), self.convert(v, depth + 1)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Value::Object(Object::from(map)))
    }
}

fn geometry(kind: GeometryKind, object: &Object) -> Result<Value> {
    let rich = PlainGeometry::from_object(kind, object)
        .and_then(PlainGeometry::into_rich)
        .inspect_err(|e| tracing::debug!("Invalid plain {kind} geometry: {e}"))?;
    Ok(Value::Geometry(rich))
}

/// Decimal strings in plain or scientific notation.
fn parse_decimal(s: &str) -> Result<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|e| ConversionError::InvalidDecimal {
            value: s.to_string(),
            reason: e.to_string(),
        })
}

/// Turn an already converted `id` value into a record id key.
fn record_id_key(value: Value) -> Result<Id> {
    match value {
        Value::Number(Number::Int(n)) => Ok(Id::Number(n)),
        Value::Number(Number::Float(f))
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
        {
            Ok(Id::Number(f as i64))
        }
        Value::Strand(s) => Ok(Id::String(s.as_str().to_string())),
        Value::Uuid(uuid) => Ok(Id::Uuid(uuid)),
        Value::Array(arr) => Ok(Id::Array(arr)),
        Value::Object(obj) => Ok(Id::Object(obj)),
        other => Err(ConversionError::InvalidRecordId(format!(
            "id part cannot be a {}",
            describe(&other)
        ))),
    }
}
