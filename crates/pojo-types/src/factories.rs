//! Plain-form constructors.
//!
//! Each builder assigns fields and nothing else; validation happens when a
//! plain value is converted back with [`crate::reverse`].

use std::collections::BTreeMap;
use surrealdb::sql::{Object, Strand, Value};

use crate::geometry::PlainGeometry;

pub(crate) const TYPE_FIELD: &str = "type";
pub(crate) const VALUE_FIELD: &str = "value";
pub(crate) const NAME_FIELD: &str = "name";
pub(crate) const TB_FIELD: &str = "tb";
pub(crate) const ID_FIELD: &str = "id";

pub(crate) const UUID_TAG: &str = "uuid";
pub(crate) const DURATION_TAG: &str = "duration";
pub(crate) const DECIMAL_TAG: &str = "decimal";
pub(crate) const TABLE_TAG: &str = "table";

/// Build a plain object from key/value pairs.
pub(crate) fn object<I, K>(entries: I) -> Value
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let map: BTreeMap<String, Value> = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
    Value::Object(Object::from(map))
}

fn strand(s: impl Into<String>) -> Value {
    let s: String = s.into();
    Value::Strand(Strand::from(s))
}

fn tagged(tag: &str, field: &str, payload: impl Into<String>) -> Value {
    object([(TYPE_FIELD, strand(tag)), (field, strand(payload))])
}

/// Plain record identifier: `{ tb, id }`.
pub fn new_record_id(tb: impl Into<String>, id: Value) -> Value {
    object([(TB_FIELD, strand(tb)), (ID_FIELD, id)])
}

/// Plain UUID: `{ type: "uuid", value }`.
pub fn new_uuid(value: impl Into<String>) -> Value {
    tagged(UUID_TAG, VALUE_FIELD, value)
}

/// Plain duration: `{ type: "duration", value }`.
pub fn new_duration(value: impl Into<String>) -> Value {
    tagged(DURATION_TAG, VALUE_FIELD, value)
}

/// Plain decimal: `{ type: "decimal", value }`.
pub fn new_decimal(value: impl Into<String>) -> Value {
    tagged(DECIMAL_TAG, VALUE_FIELD, value)
}

/// Plain table reference: `{ type: "table", name }`.
pub fn new_table(name: impl Into<String>) -> Value {
    tagged(TABLE_TAG, NAME_FIELD, name)
}

/// Plain geometry: `{ type: <variant>, coordinates }` (or `geometries` for
/// collections).
pub fn new_geometry(geometry: PlainGeometry) -> Value {
    geometry.into_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::sql::Number;

    fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
        match value {
            Value::Object(obj) => obj.get(key),
            _ => None,
        }
    }

    #[test]
    fn test_new_record_id() {
        let rid = new_record_id("user", Value::Number(Number::Int(7)));
        assert_eq!(field(&rid, "tb"), Some(&Value::Strand(Strand::from("user"))));
        assert_eq!(field(&rid, "id"), Some(&Value::Number(Number::Int(7))));
        assert!(field(&rid, "type").is_none());
    }

    #[test]
    fn test_tagged_builders() {
        let uuid = new_uuid("00000000-0000-0000-0000-000000000000");
        assert_eq!(field(&uuid, "type"), Some(&Value::Strand(Strand::from("uuid"))));

        let duration = new_duration("2h45m");
        assert_eq!(
            field(&duration, "value"),
            Some(&Value::Strand(Strand::from("2h45m")))
        );

        let decimal = new_decimal("200.75");
        assert_eq!(
            field(&decimal, "type"),
            Some(&Value::Strand(Strand::from("decimal")))
        );

        let table = new_table("science");
        assert_eq!(
            field(&table, "name"),
            Some(&Value::Strand(Strand::from("science")))
        );
        assert!(field(&table, "value").is_none());
    }

    #[test]
    fn test_new_geometry_point() {
        let point = new_geometry(PlainGeometry::Point {
            coordinates: [3.0, 4.0],
        });
        assert_eq!(
            field(&point, "type"),
            Some(&Value::Strand(Strand::from("Point")))
        );
        if let Some(Value::Array(coords)) = field(&point, "coordinates") {
            assert_eq!(coords.len(), 2);
        } else {
            panic!("Expected coordinates array");
        }
    }
}
