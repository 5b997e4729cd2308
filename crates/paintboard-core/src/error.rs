//! Error types for document operations.

use crate::shapes::{ShapeId, ShapeKind};
use thiserror::Error;

/// Errors raised by document operations.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Unknown shape kind: {0}")]
    UnknownShapeKind(String),
    #[error("Invalid gesture for {kind}: {reason}")]
    InvalidGesture { kind: ShapeKind, reason: &'static str },
    #[error("Move delta received outside of a drag")]
    NotDragging,
    #[error("Edit would leave non-finite geometry")]
    NonFiniteGeometry,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Encoding error: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Errors raised while turning an import payload into shapes.
///
/// A decode failure never leaves a partially loaded document behind.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("Malformed JSON: {0}")]
    Json(String),
    #[error("Malformed XML: {0}")]
    Xml(String),
    #[error("Unknown shape kind: {0}")]
    UnknownKind(String),
    #[error("Missing field `{field}` for {kind}")]
    MissingField { kind: ShapeKind, field: &'static str },
    #[error("Invalid shape id: {0}")]
    InvalidId(String),
    #[error("Duplicate shape id: {0}")]
    DuplicateId(ShapeId),
    #[error("Invalid value for `{field}`: {value}")]
    InvalidValue { field: String, value: String },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for document operations.
pub type PaintResult<T> = Result<T, PaintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PaintError::UnknownShapeKind("hexagon".to_string());
        assert_eq!(err.to_string(), "Unknown shape kind: hexagon");

        let err = DecodeError::MissingField {
            kind: ShapeKind::Circle,
            field: "radius",
        };
        assert_eq!(err.to_string(), "Missing field `radius` for circle");
    }

    #[test]
    fn test_decode_converts_into_paint_error() {
        let err: PaintError = DecodeError::Json("eof".to_string()).into();
        assert!(matches!(err, PaintError::Decode(DecodeError::Json(_))));
        assert_eq!(err.to_string(), "Malformed JSON: eof");
    }
}
