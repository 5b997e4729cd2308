//! Export to and import from files on disk.
//!
//! The encoding is picked from the file extension: `.xml` is XML, anything
//! else is JSON.

use crate::codec::ExportFormat;
use crate::document::Document;
use crate::error::{PaintError, PaintResult};
use std::fs;
use std::path::Path;

fn format_for(path: &Path) -> ExportFormat {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ExportFormat::from_file_name(&name)
}

/// Write the document's shapes to `path`.
pub fn export_to_path(document: &Document, path: &Path) -> PaintResult<()> {
    let format = format_for(path);
    let contents = document.export(format)?;
    fs::write(path, contents).map_err(|e| {
        PaintError::Io(format!("Failed to write {}: {}", path.display(), e))
    })?;
    log::info!("Exported {} shapes to {}", document.len(), path.display());
    Ok(())
}

/// Replace the document's shapes with the contents of `path`.
///
/// The document is untouched if the file cannot be read or decoded.
pub fn import_from_path(document: &mut Document, path: &Path) -> PaintResult<()> {
    let format = format_for(path);
    let contents = fs::read_to_string(path).map_err(|e| {
        PaintError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    document.import(format, &contents)
}
