//! JSON document output
//!
//! Documents are UTF-8, indented with four spaces, with non-ASCII characters
//! written as-is. They land at `<folder>/<prefix>_<sanitized name>.json`.

use crate::core::sanitize::sanitize;
use crate::domain::{ExportResult, IfcBatchError, Result, ScheduleRecord, ViewRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

/// A record set written as its own JSON document
pub trait NamedDocument: Serialize {
    /// Display name the file is named after
    fn document_name(&self) -> &str;
}

impl NamedDocument for ViewRecord {
    fn document_name(&self) -> &str {
        &self.name
    }
}

impl NamedDocument for ScheduleRecord {
    fn document_name(&self) -> &str {
        &self.name
    }
}

/// Output path for a document name
pub fn document_path(folder: &Path, prefix: Option<&str>, name: &str) -> PathBuf {
    let safe = sanitize(name, None);
    let file_name = match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{prefix}_{safe}.json"),
        None => format!("{safe}.json"),
    };
    folder.join(file_name)
}

/// Serializes `value` with a four-space indent
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// Writes one JSON document, creating `folder` if needed
pub fn write_json_document<T: Serialize + ?Sized>(
    folder: &Path,
    prefix: Option<&str>,
    name: &str,
    value: &T,
) -> Result<PathBuf> {
    fs::create_dir_all(folder).map_err(|e| {
        IfcBatchError::Io(format!("Failed to create {}: {e}", folder.display()))
    })?;
    let path = document_path(folder, prefix, name);
    fs::write(&path, to_json_bytes(value)?)
        .map_err(|e| IfcBatchError::Io(format!("Failed to write {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "JSON document written");
    Ok(path)
}

/// Reads a JSON document back
pub fn read_json_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path)
        .map_err(|e| IfcBatchError::Io(format!("Failed to read {}: {e}", path.display())))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Writes each document on its own; one failure does not stop the others
pub fn export_named_documents<T: NamedDocument>(
    unit: &str,
    folder: &Path,
    prefix: Option<&str>,
    documents: &[T],
) -> Vec<ExportResult> {
    documents
        .iter()
        .map(|doc| {
            let name = doc.document_name();
            match write_json_document(folder, prefix, name, doc) {
                Ok(path) => ExportResult::exported(unit, name, path),
                Err(e) => {
                    tracing::warn!(unit = %unit, target = %name, error = %e, "JSON export failed");
                    ExportResult::failed(unit, name, e.to_string())
                }
            }
        })
        .collect()
}
