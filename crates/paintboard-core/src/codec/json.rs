//! JSON encoding: a pretty-printed array of records.

use crate::error::{DecodeError, PaintError, PaintResult};
use crate::record::ShapeRecord;

pub(super) fn to_string(records: &[ShapeRecord]) -> PaintResult<String> {
    serde_json::to_string_pretty(records).map_err(|e| PaintError::Encode(e.to_string()))
}

pub(super) fn from_str(input: &str) -> Result<Vec<ShapeRecord>, DecodeError> {
    serde_json::from_str(input).map_err(|e| DecodeError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_layout() {
        let records = vec![ShapeRecord {
            kind: "circle".to_string(),
            x: Some(1.0),
            y: Some(2.0),
            radius: Some(3.0),
            ..Default::default()
        }];
        let json = to_string(&records).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"type\": \"circle\""));
        assert_eq!(from_str(&json).unwrap(), records);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(from_str("[{"), Err(DecodeError::Json(_))));
        assert!(matches!(from_str(r#"{"type":"circle"}"#), Err(DecodeError::Json(_))));
        assert!(matches!(from_str(r#"[{"x":1}]"#), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_empty_array() {
        assert!(from_str("[]").unwrap().is_empty());
    }
}
