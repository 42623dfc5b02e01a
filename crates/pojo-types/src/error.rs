//! Error types for plain-form conversion.

/// Minimum-cardinality violations for plain-form geometries.
///
/// The messages are part of the public contract: callers match on them when
/// surfacing validation failures to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArityError {
    #[error("A line must have at least two points")]
    LineTooShort,

    #[error("A polygon must have at least one line")]
    EmptyPolygon,

    #[error("A MultiPoint must have at least one point")]
    EmptyMultiPoint,

    #[error("A MultiLine must have at least one line")]
    EmptyMultiLine,

    #[error("A MultiPolygon must have at least one polygon")]
    EmptyMultiPolygon,
}

/// Errors raised while converting between rich and plain values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Geometry variant with no conversion path (collections).
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    #[error(transparent)]
    Arity(#[from] ArityError),

    /// Coordinates that do not have the nesting or element types the
    /// geometry variant requires.
    #[error("Invalid {geometry} coordinates: {reason}")]
    InvalidCoordinates {
        geometry: &'static str,
        reason: String,
    },

    #[error("Invalid UUID '{value}': {reason}")]
    InvalidUuid { value: String, reason: String },

    #[error("Invalid duration '{value}'")]
    InvalidDuration { value: String },

    #[error("Invalid decimal '{value}': {reason}")]
    InvalidDecimal { value: String, reason: String },

    /// Plain record identifier whose table or id part cannot form a record id.
    #[error("Invalid record id: {0}")]
    InvalidRecordId(String),

    /// Rich record identifier whose id kind has no plain form.
    #[error("Unsupported record id: {0}")]
    UnsupportedRecordId(String),

    #[error("Maximum nesting depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// A value that is not plain reached the JSON boundary.
    #[error("Value of kind '{kind}' has no plain JSON representation")]
    NotPlain { kind: &'static str },
}

pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_messages_are_transparent() {
        let err = ConversionError::from(ArityError::LineTooShort);
        assert_eq!(err.to_string(), "A line must have at least two points");

        let err = ConversionError::from(ArityError::EmptyMultiPolygon);
        assert_eq!(
            err.to_string(),
            "A MultiPolygon must have at least one polygon"
        );
    }

    #[test]
    fn test_unsupported_geometry_message() {
        let err = ConversionError::UnsupportedGeometry("GeometryCollection".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported geometry type: GeometryCollection"
        );
    }
}
