//! Closed sets of the value kinds the converters understand.
//!
//! [`RichKind`] classifies SurrealDB values that have a plain form, and
//! [`PlainKind`] classifies plain values that stand for a rich one. Both
//! converters are total matches over these enumerations, so adding a kind is
//! a compiler-checked change.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use surrealdb::sql::{Duration, Geometry, Number, Object, Table, Thing, Uuid, Value};

/// Geometry discriminant tags used by the plain form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    /// Declared by the plain form but never converted in either direction.
    Collection,
}

impl GeometryKind {
    /// All tags recognized by [`crate::guards::is_geometry`].
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
        GeometryKind::Collection,
    ];

    /// The `type` tag of this variant.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::Collection => "Collection",
        }
    }

    /// Whether values of this variant can be converted.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Collection)
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for GeometryKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|k| k.tag() == s).ok_or(())
    }
}

/// A SurrealDB value that has a plain-form counterpart.
#[derive(Debug, Clone, Copy)]
pub enum RichKind<'a> {
    RecordId(&'a Thing),
    Uuid(&'a Uuid),
    Duration(&'a Duration),
    Geometry(&'a Geometry),
    Decimal(&'a Decimal),
    Table(&'a Table),
}

impl<'a> RichKind<'a> {
    /// Classify a value, returning `None` for values that are already plain
    /// (or have no plain form and pass through untouched).
    pub fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Thing(thing) => Some(Self::RecordId(thing)),
            Value::Uuid(uuid) => Some(Self::Uuid(uuid)),
            Value::Duration(duration) => Some(Self::Duration(duration)),
            Value::Geometry(geometry) => Some(Self::Geometry(geometry)),
            Value::Number(Number::Decimal(decimal)) => Some(Self::Decimal(decimal)),
            Value::Table(table) => Some(Self::Table(table)),
            _ => None,
        }
    }
}

/// A plain value recognized as the plain form of a rich kind.
///
/// Produced by [`crate::guards::classify`]; payloads borrow from the
/// classified object.
#[derive(Debug, Clone, Copy)]
pub enum PlainKind<'a> {
    RecordId { tb: &'a Value, id: &'a Value },
    Uuid(&'a str),
    Duration(&'a str),
    Decimal(&'a str),
    Table(&'a str),
    Geometry {
        kind: GeometryKind,
        object: &'a Object,
    },
}

/// Short name of a value's kind, for error messages.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::None => "none",
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(Number::Int(_)) => "int",
        Value::Number(Number::Float(_)) => "float",
        Value::Number(Number::Decimal(_)) => "decimal",
        Value::Strand(_) => "string",
        Value::Duration(_) => "duration",
        Value::Datetime(_) => "datetime",
        Value::Uuid(_) => "uuid",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Geometry(_) => "geometry",
        Value::Bytes(_) => "bytes",
        Value::Thing(_) => "record",
        Value::Table(_) => "table",
        _ => "expression",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_kind_tags_roundtrip() {
        for kind in GeometryKind::ALL {
            assert_eq!(kind.tag().parse::<GeometryKind>(), Ok(kind));
        }
        assert!("GeometryCollection".parse::<GeometryKind>().is_err());
        assert!("point".parse::<GeometryKind>().is_err());
    }

    #[test]
    fn test_only_collection_is_unsupported() {
        let unsupported: Vec<_> = GeometryKind::ALL
            .into_iter()
            .filter(|k| !k.is_supported())
            .collect();
        assert_eq!(unsupported, vec![GeometryKind::Collection]);
    }

    #[test]
    fn test_rich_kind_of() {
        let decimal = Value::Number(Number::Decimal(Decimal::new(10050, 2)));
        assert!(matches!(RichKind::of(&decimal), Some(RichKind::Decimal(_))));

        let table = Value::Table(Table::from("math".to_string()));
        assert!(matches!(RichKind::of(&table), Some(RichKind::Table(_))));

        let thing = Value::Thing(Thing::from(("user", "1")));
        assert!(matches!(RichKind::of(&thing), Some(RichKind::RecordId(_))));

        assert!(RichKind::of(&Value::Number(Number::Int(1))).is_none());
        assert!(RichKind::of(&Value::Null).is_none());
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&Value::None), "none");
        assert_eq!(describe(&Value::Number(Number::Float(1.5))), "float");
        assert_eq!(
            describe(&Value::Thing(Thing::from(("user", "1")))),
            "record"
        );
    }
}
