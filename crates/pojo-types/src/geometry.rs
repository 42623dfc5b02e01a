//! Plain-form geometry.
//!
//! [`PlainGeometry`] is the typed form of a `{ type, coordinates }` object.
//! Plain geometries are parsed into it first, checked against the arity
//! rules of each variant, and only then turned into SurrealDB geometries, so
//! an invalid shape never produces a partially built value.

use geo_types::{LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Array, Geometry, Number, Object, Strand, Value};

use crate::error::{ArityError, ConversionError, Result};
use crate::factories::{object, TYPE_FIELD};
use crate::kind::GeometryKind;

const COORDINATES_FIELD: &str = "coordinates";
const GEOMETRIES_FIELD: &str = "geometries";

/// Tag SurrealDB uses for geometry collections.
const RICH_COLLECTION_TAG: &str = "GeometryCollection";

/// An `[x, y]` coordinate pair.
pub type Position = [f64; 2];

/// Typed plain-form geometry.
///
/// Serializes to the same shape as the untyped plain form:
///
/// ```rust
/// use pojo_types::PlainGeometry;
///
/// let point = PlainGeometry::Point { coordinates: [2.0, 1.0] };
/// let json = serde_json::to_value(&point).unwrap();
/// assert_eq!(json, serde_json::json!({ "type": "Point", "coordinates": [2.0, 1.0] }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlainGeometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPoint { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    Collection { geometries: Vec<PlainGeometry> },
}

impl PlainGeometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point { .. } => GeometryKind::Point,
            Self::LineString { .. } => GeometryKind::LineString,
            Self::Polygon { .. } => GeometryKind::Polygon,
            Self::MultiPoint { .. } => GeometryKind::MultiPoint,
            Self::MultiLineString { .. } => GeometryKind::MultiLineString,
            Self::MultiPolygon { .. } => GeometryKind::MultiPolygon,
            Self::Collection { .. } => GeometryKind::Collection,
        }
    }

    /// Plain form of a SurrealDB geometry. Collections are rejected.
    pub fn from_rich(geometry: &Geometry) -> Result<Self> {
        match geometry {
            Geometry::Point(p) => Ok(Self::Point {
                coordinates: [p.x(), p.y()],
            }),
            Geometry::Line(line) => Ok(Self::LineString {
                coordinates: line_positions(line),
            }),
            Geometry::Polygon(polygon) => Ok(Self::Polygon {
                coordinates: polygon_rings(polygon),
            }),
            Geometry::MultiPoint(points) => Ok(Self::MultiPoint {
                coordinates: points.0.iter().map(|p| [p.x(), p.y()]).collect(),
            }),
            Geometry::MultiLine(lines) => Ok(Self::MultiLineString {
                coordinates: lines.0.iter().map(line_positions).collect(),
            }),
            Geometry::MultiPolygon(polygons) => Ok(Self::MultiPolygon {
                coordinates: polygons.0.iter().map(polygon_rings).collect(),
            }),
            // Collections, and any variant added to SurrealDB later
            _ => Err(ConversionError::UnsupportedGeometry(
                RICH_COLLECTION_TAG.to_string(),
            )),
        }
    }

    /// Parse the coordinates of a plain geometry object whose `type` tag has
    /// already been recognized as `kind`.
    ///
    /// Only the nesting and element types are checked here; arity is checked
    /// by [`PlainGeometry::validate`].
    pub fn from_object(kind: GeometryKind, obj: &Object) -> Result<Self> {
        let coordinates = || field(obj, COORDINATES_FIELD, kind);
        let geometry = match kind {
            GeometryKind::Point => Self::Point {
                coordinates: position(coordinates()?, kind)?,
            },
            GeometryKind::LineString => Self::LineString {
                coordinates: positions(coordinates()?, kind)?,
            },
            GeometryKind::Polygon => Self::Polygon {
                coordinates: rings(coordinates()?, kind)?,
            },
            GeometryKind::MultiPoint => Self::MultiPoint {
                coordinates: positions(coordinates()?, kind)?,
            },
            GeometryKind::MultiLineString => Self::MultiLineString {
                coordinates: rings(coordinates()?, kind)?,
            },
            GeometryKind::MultiPolygon => Self::MultiPolygon {
                coordinates: items(coordinates()?, kind)?
                    .iter()
                    .map(|polygon| rings(polygon, kind))
                    .collect::<Result<_>>()?,
            },
            GeometryKind::Collection => Self::Collection {
                geometries: items(field(obj, GEOMETRIES_FIELD, kind)?, kind)?
                    .iter()
                    .map(|member| member_geometry(member, kind))
                    .collect::<Result<_>>()?,
            },
        };
        Ok(geometry)
    }

    /// Check the minimum-cardinality rules of the variant.
    ///
    /// Container counts are checked before their members, so an empty
    /// MultiPolygon reports the MultiPolygon rule rather than a ring rule.
    pub fn validate(&self) -> std::result::Result<(), ArityError> {
        match self {
            Self::Point { .. } => Ok(()),
            Self::LineString { coordinates } => check_line(coordinates),
            Self::Polygon { coordinates } => check_polygon(coordinates),
            Self::MultiPoint { coordinates } => {
                if coordinates.is_empty() {
                    return Err(ArityError::EmptyMultiPoint);
                }
                Ok(())
            }
            Self::MultiLineString { coordinates } => {
                if coordinates.is_empty() {
                    return Err(ArityError::EmptyMultiLine);
                }
                coordinates.iter().try_for_each(|line| check_line(line))
            }
            Self::MultiPolygon { coordinates } => {
                if coordinates.is_empty() {
                    return Err(ArityError::EmptyMultiPolygon);
                }
                coordinates.iter().try_for_each(|polygon| check_polygon(polygon))
            }
            Self::Collection { geometries } => geometries.iter().try_for_each(Self::validate),
        }
    }

    /// Build the SurrealDB geometry after validating arity. Collections are
    /// rejected.
    pub fn into_rich(self) -> Result<Geometry> {
        self.validate()?;

        let geometry = match self {
            Self::Point { coordinates: [x, y] } => Geometry::Point(Point::new(x, y)),
            Self::LineString { coordinates } => Geometry::Line(line_string(coordinates)),
            Self::Polygon { coordinates } => Geometry::Polygon(polygon(coordinates)),
            Self::MultiPoint { coordinates } => Geometry::MultiPoint(MultiPoint(
                coordinates
                    .into_iter()
                    .map(|[x, y]| Point::new(x, y))
                    .collect(),
            )),
            Self::MultiLineString { coordinates } => Geometry::MultiLine(MultiLineString(
                coordinates.into_iter().map(line_string).collect(),
            )),
            Self::MultiPolygon { coordinates } => Geometry::MultiPolygon(MultiPolygon(
                coordinates.into_iter().map(polygon).collect(),
            )),
            Self::Collection { .. } => {
                return Err(ConversionError::UnsupportedGeometry(
                    GeometryKind::Collection.tag().to_string(),
                ))
            }
        };
        Ok(geometry)
    }

    /// Untyped plain form of this geometry.
    pub fn into_value(self) -> Value {
        let tag = Value::Strand(Strand::from(self.kind().tag()));
        match self {
            Self::Point { coordinates } => {
                object([(TYPE_FIELD, tag), (COORDINATES_FIELD, position_value(coordinates))])
            }
            Self::LineString { coordinates } | Self::MultiPoint { coordinates } => object([
                (TYPE_FIELD, tag),
                (COORDINATES_FIELD, positions_value(coordinates)),
            ]),
            Self::Polygon { coordinates } | Self::MultiLineString { coordinates } => object([
                (TYPE_FIELD, tag),
                (COORDINATES_FIELD, rings_value(coordinates)),
            ]),
            Self::MultiPolygon { coordinates } => object([
                (TYPE_FIELD, tag),
                (
                    COORDINATES_FIELD,
                    array(coordinates.into_iter().map(rings_value)),
                ),
            ]),
            Self::Collection { geometries } => object([
                (TYPE_FIELD, tag),
                (
                    GEOMETRIES_FIELD,
                    array(geometries.into_iter().map(Self::into_value)),
                ),
            ]),
        }
    }
}

fn check_line(points: &[Position]) -> std::result::Result<(), ArityError> {
    if points.len() < 2 {
        return Err(ArityError::LineTooShort);
    }
    Ok(())
}

fn check_polygon(rings: &[Vec<Position>]) -> std::result::Result<(), ArityError> {
    if rings.is_empty() {
        return Err(ArityError::EmptyPolygon);
    }
    rings.iter().try_for_each(|ring| check_line(ring))
}

// Rich -> typed

fn line_positions(line: &LineString<f64>) -> Vec<Position> {
    line.coords().map(|c| [c.x, c.y]).collect()
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(line_positions)
        .collect()
}

// Typed -> rich

fn line_string(points: Vec<Position>) -> LineString<f64> {
    LineString::from(
        points
            .into_iter()
            .map(|[x, y]| (x, y))
            .collect::<Vec<_>>(),
    )
}

/// First ring is the exterior, the rest are interiors. Callers validate
/// that at least one ring is present.
fn polygon(rings: Vec<Vec<Position>>) -> Polygon<f64> {
    let mut lines = rings.into_iter().map(line_string);
    let exterior = lines.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, lines.collect())
}

// Untyped -> typed

fn invalid(kind: GeometryKind, reason: impl Into<String>) -> ConversionError {
    ConversionError::InvalidCoordinates {
        geometry: kind.tag(),
        reason: reason.into(),
    }
}

fn field<'a>(obj: &'a Object, key: &str, kind: GeometryKind) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| invalid(kind, format!("missing '{key}' field")))
}

fn items(value: &Value, kind: GeometryKind) -> Result<&[Value]> {
    match value {
        Value::Array(arr) => Ok(arr.0.as_slice()),
        other => Err(invalid(
            kind,
            format!("expected an array, found {}", crate::kind::describe(other)),
        )),
    }
}

fn number(value: &Value, kind: GeometryKind) -> Result<f64> {
    match value {
        Value::Number(Number::Int(i)) => Ok(*i as f64),
        Value::Number(Number::Float(f)) => Ok(*f),
        Value::Number(Number::Decimal(d)) => d
            .to_f64()
            .ok_or_else(|| invalid(kind, format!("decimal {d} is out of range"))),
        other => Err(invalid(
            kind,
            format!("expected a number, found {}", crate::kind::describe(other)),
        )),
    }
}

fn position(value: &Value, kind: GeometryKind) -> Result<Position> {
    match items(value, kind)? {
        [x, y] => Ok([number(x, kind)?, number(y, kind)?]),
        other => Err(invalid(
            kind,
            format!("a position needs 2 numbers, found {}", other.len()),
        )),
    }
}

fn positions(value: &Value, kind: GeometryKind) -> Result<Vec<Position>> {
    items(value, kind)?
        .iter()
        .map(|p| position(p, kind))
        .collect()
}

fn rings(value: &Value, kind: GeometryKind) -> Result<Vec<Vec<Position>>> {
    items(value, kind)?
        .iter()
        .map(|ring| positions(ring, kind))
        .collect()
}

fn member_geometry(value: &Value, parent: GeometryKind) -> Result<PlainGeometry> {
    let Value::Object(obj) = value else {
        return Err(invalid(parent, "collection members must be geometry objects"));
    };
    let kind = match obj.get(TYPE_FIELD) {
        Some(Value::Strand(tag)) => tag.as_str().parse::<GeometryKind>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(parent, "collection member has no geometry type"))?;
    PlainGeometry::from_object(kind, obj)
}

// Typed -> untyped

fn array(values: impl Iterator<Item = Value>) -> Value {
    Value::Array(Array::from(values.collect::<Vec<Value>>()))
}

fn position_value([x, y]: Position) -> Value {
    array([x, y].into_iter().map(|n| Value::Number(Number::Float(n))))
}

fn positions_value(points: Vec<Position>) -> Value {
    array(points.into_iter().map(position_value))
}

fn rings_value(rings: Vec<Vec<Position>>) -> Value {
    array(rings.into_iter().map(positions_value))
}
