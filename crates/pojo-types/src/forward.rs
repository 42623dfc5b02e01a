//! Forward conversion: SurrealDB value → plain value.
//!
//! Rich values are found by their variant at any depth (inside objects,
//! arrays and record id keys) and replaced with their plain form. Everything
//! else is copied through.

use std::collections::BTreeMap;
use surrealdb::sql::{Array, Id, Number, Object, Strand, Value};

use crate::config::ConversionConfig;
use crate::error::{ConversionError, Result};
use crate::factories::{
    new_decimal, new_duration, new_geometry, new_record_id, new_table, new_uuid,
};
use crate::geometry::PlainGeometry;
use crate::kind::RichKind;

/// Convert a SurrealDB value to its plain form with the default configuration.
///
/// # Example
///
/// ```rust
/// use pojo_types::{convert_to_pojo, new_record_id};
/// use surrealdb::sql::{Thing, Value};
///
/// let plain = convert_to_pojo(&Value::Thing(Thing::from(("thing", "1")))).unwrap();
/// assert_eq!(plain, new_record_id("thing", Value::from("1")));
/// ```
pub fn convert_to_pojo(value: &Value) -> Result<Value> {
    convert_to_pojo_with_config(value, &ConversionConfig::default())
}

/// Convert a SurrealDB value to its plain form.
///
/// Fails only for geometry collections, record ids whose key has no plain
/// form (generated or range keys), and input nested deeper than
/// `config.max_depth`.
pub fn convert_to_pojo_with_config(value: &Value, config: &ConversionConfig) -> Result<Value> {
    Forward { config }.convert(value, 0)
}

struct Forward<'a> {
    config: &'a ConversionConfig,
}

impl Forward<'_> {
    fn convert(&self, value: &Value, depth: usize) -> Result<Value> {
        if depth > self.config.max_depth {
            return Err(ConversionError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        if let Some(kind) = RichKind::of(value) {
            return self.convert_rich(kind, depth);
        }

        match value {
            Value::Array(arr) => self.array(arr, depth),
            // Datetimes are already plain
            Value::Datetime(_) => Ok(value.clone()),
            Value::Object(obj) => self.object(obj, depth),
            _ => Ok(value.clone()),
        }
    }

    fn convert_rich(&self, kind: RichKind<'_>, depth: usize) -> Result<Value> {
        match kind {
            RichKind::RecordId(thing) => {
                let id = self.record_id_key(&thing.id, depth)?;
                Ok(new_record_id(thing.tb.clone(), id))
            }
            RichKind::Uuid(uuid) => Ok(new_uuid(uuid.0.to_string())),
            RichKind::Duration(duration) => Ok(new_duration(duration.to_string())),
            RichKind::Geometry(geometry) => {
                let plain = PlainGeometry::from_rich(geometry).inspect_err(|e| {
                    tracing::debug!("Rejecting geometry during forward conversion: {e}");
                })?;
                Ok(new_geometry(plain))
            }
            RichKind::Decimal(decimal) => Ok(new_decimal(decimal.to_string())),
            RichKind::Table(table) => Ok(new_table(table.0.clone())),
        }
    }

    /// The `id` half of a record id, converted like any nested value.
    fn record_id_key(&self, id: &Id, depth: usize) -> Result<Value> {
        match id {
            Id::Number(n) => Ok(Value::Number(Number::Int(*n))),
            Id::String(s) => Ok(Value::Strand(Strand::from(s.as_str()))),
            Id::Uuid(uuid) => Ok(new_uuid(uuid.0.to_string())),
            Id::Array(arr) => self.array(arr, depth + 1),
            Id::Object(obj) => self.object(obj, depth + 1),
            other => Err(ConversionError::UnsupportedRecordId(other.to_string())),
        }
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
