//! Byte-level encodings of a record sequence.

mod json;
mod xml;

use crate::error::{DecodeError, PaintResult};
use crate::record::ShapeRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported export/import encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Xml,
}

impl ExportFormat {
    /// Pick the format from an uploaded or on-disk file name.
    ///
    /// `.xml` (any case) selects XML; everything else is read as JSON.
    pub fn from_file_name(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".xml") {
            ExportFormat::Xml
        } else {
            ExportFormat::Json
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Xml => "application/xml",
        }
    }

    /// Default download name.
    pub fn file_name(&self) -> String {
        format!("drawing.{}", self.extension())
    }

    /// Encode records in this format.
    pub fn encode(&self, records: &[ShapeRecord]) -> PaintResult<String> {
        match self {
            ExportFormat::Json => json::to_string(records),
            ExportFormat::Xml => xml::to_string(records),
        }
    }

    /// Decode records from this format.
    pub fn decode(&self, input: &str) -> Result<Vec<ShapeRecord>, DecodeError> {
        match self {
            ExportFormat::Json => json::from_str(input),
            ExportFormat::Xml => xml::from_str(input),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "xml" => Ok(ExportFormat::Xml),
            _ => Err(DecodeError::UnsupportedFormat(s.to_string())),
        }
    }
}
