//! Plain-form recognizers.
//!
//! These are structural predicates over values of unknown shape, typically
//! freshly deserialized data. [`classify`] applies them in the reverse
//! converter's priority order and hands back a typed [`PlainKind`].

use surrealdb::sql::{Object, Value};

use crate::factories::{
    DECIMAL_TAG, DURATION_TAG, ID_FIELD, NAME_FIELD, TABLE_TAG, TB_FIELD, TYPE_FIELD,
    UUID_TAG, VALUE_FIELD,
};
use crate::kind::{GeometryKind, PlainKind};

fn as_object(value: &Value) -> Option<&Object> {
    match value {
        Value::Object(obj) => Some(obj),
        _ => None,
    }
}

fn str_field<'a>(obj: &'a Object, key: &str) -> Option<&'a str> {
    match obj.get(key) {
        Some(Value::Strand(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Payload string of a `{ type: <tag>, <field>: <string> }` object.
fn tagged_str<'a>(obj: &'a Object, tag: &str, field: &str) -> Option<&'a str> {
    if str_field(obj, TYPE_FIELD)? == tag {
        str_field(obj, field)
    } else {
        None
    }
}

fn record_id_parts(obj: &Object) -> Option<(&Value, &Value)> {
    Some((obj.get(TB_FIELD)?, obj.get(ID_FIELD)?))
}

fn geometry_kind(obj: &Object) -> Option<GeometryKind> {
    str_field(obj, TYPE_FIELD)?.parse().ok()
}

/// An object carrying both a `tb` and an `id` field.
pub fn is_record_id(value: &Value) -> bool {
    as_object(value).and_then(record_id_parts).is_some()
}

/// `{ type: "uuid", value: <string> }`.
pub fn is_uuid(value: &Value) -> bool {
    as_object(value)
        .and_then(|obj| tagged_str(obj, UUID_TAG, VALUE_FIELD))
        .is_some()
}

/// `{ type: "duration", value: <string> }`.
pub fn is_duration(value: &Value) -> bool {
    as_object(value)
        .and_then(|obj| tagged_str(obj, DURATION_TAG, VALUE_FIELD))
        .is_some()
}

/// `{ type: "decimal", value: <string> }`.
pub fn is_decimal(value: &Value) -> bool {
    as_object(value)
        .and_then(|obj| tagged_str(obj, DECIMAL_TAG, VALUE_FIELD))
        .is_some()
}

/// `{ type: "table", name: <string> }`.
pub fn is_table(value: &Value) -> bool {
    as_object(value)
        .and_then(|obj| tagged_str(obj, TABLE_TAG, NAME_FIELD))
        .is_some()
}

/// An object whose `type` is one of the seven geometry tags, including
/// `Collection`.
pub fn is_geometry(value: &Value) -> bool {
    as_object(value).and_then(geometry_kind).is_some()
}

/// Classify a plain value.
///
/// Record identifiers are checked first, then uuid, duration, decimal, table
/// and geometry, so an object matching several shapes resolves the same way
/// every time.
pub fn classify(value: &Value) -> Option<PlainKind<'_>> {
    let obj = as_object(value)?;
    if let Some((tb, id)) = record_id_parts(obj) {
        return Some(PlainKind::RecordId { tb, id });
    }
    if let Some(s) = tagged_str(obj, UUID_TAG, VALUE_FIELD) {
        return Some(PlainKind::Uuid(s));
    }
    if let Some(s) = tagged_str(obj, DURATION_TAG, VALUE_FIELD) {
        return Some(PlainKind::Duration(s));
    }
    if let Some(s) = tagged_str(obj, DECIMAL_TAG, VALUE_FIELD) {
        return Some(PlainKind::Decimal(s));
    }
    if let Some(s) = tagged_str(obj, TABLE_TAG, NAME_FIELD) {
        return Some(PlainKind::Table(s));
    }
    geometry_kind(obj).map(|kind| PlainKind::Geometry { kind, object: obj })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factories::{new_decimal, new_duration, new_record_id, new_table, new_uuid, object};
    use surrealdb::sql::{Array, Number, Strand};

    fn s(v: &str) -> Value {
        Value::Strand(Strand::from(v))
    }

    #[test]
    fn test_record_id_needs_both_fields() {
        assert!(is_record_id(&new_record_id("user", s("1"))));
        assert!(!is_record_id(&object([("tb", s("user"))])));
        assert!(!is_record_id(&object([("id", s("1"))])));
        // Field types are not checked by the recognizer
        assert!(is_record_id(&object([
            ("tb", Value::Number(Number::Int(1))),
            ("id", Value::Null),
        ])));
    }

    #[test]
    fn test_tagged_recognizers() {
        assert!(is_uuid(&new_uuid("11111111-1111-1111-1111-111111111111")));
        assert!(is_duration(&new_duration("3d12h")));
        assert!(is_decimal(&new_decimal("1.5")));
        assert!(is_table(&new_table("math")));

        assert!(!is_uuid(&new_duration("3d12h")));
        assert!(!is_table(&new_uuid("x")));
    }

    #[test]
    fn test_tagged_payload_must_be_string() {
        let not_uuid = object([("type", s("uuid")), ("value", Value::Number(Number::Int(5)))]);
        assert!(!is_uuid(&not_uuid));
        assert!(classify(&not_uuid).is_none());

        // Tables carry `name`, not `value`
        let not_table = object([("type", s("table")), ("value", s("math"))]);
        assert!(!is_table(&not_table));
    }

    #[test]
    fn test_geometry_recognizer_accepts_collection() {
        assert!(is_geometry(&object([("type", s("Point"))])));
        assert!(is_geometry(&object([("type", s("Collection"))])));
        assert!(!is_geometry(&object([("type", s("Circle"))])));
        assert!(!is_geometry(&s("Point")));
    }

    #[test]
    fn test_non_objects_are_never_recognized() {
        let values = [Value::Null, Value::None, s("uuid"), Value::Bool(true)];
        for v in &values {
            assert!(!is_record_id(v));
            assert!(!is_uuid(v));
            assert!(!is_geometry(v));
            assert!(classify(v).is_none());
        }
    }

    #[test]
    fn test_classify_priority() {
        // A record id wins even when a type tag is present
        let v = object([("tb", s("user")), ("id", s("1")), ("type", s("uuid")), ("value", s("x"))]);
        assert!(matches!(classify(&v), Some(PlainKind::RecordId { .. })));

        let v = new_decimal("10.5");
        assert!(matches!(classify(&v), Some(PlainKind::Decimal("10.5"))));

        let v = object([("type", s("MultiPoint")), ("coordinates", Value::Array(Array::from(Vec::<Value>::new())))]);
        assert!(matches!(
            classify(&v),
            Some(PlainKind::Geometry {
                kind: GeometryKind::MultiPoint,
                ..
            })
        ));

        let v = object([("name", s("plain")), ("count", Value::Number(Number::Int(2)))]);
        assert!(classify(&v).is_none());
    }
}
