//! Manifest-driven host for headless runs
//!
//! A unit manifest is a JSON file listing the documents of a batch and the
//! sub-targets selected in each:
//!
//! ```json
//! {
//!   "units": [
//!     { "path": "models/Tower.rvt", "targets": ["Level 1", "Roof"] },
//!     { "path": "models/Central.rvt", "targets": ["Site"], "special": true }
//!   ]
//! }
//! ```
//!
//! [`ManifestHost`] serves those documents without a modeling host and
//! [`DryRunExporter`] records what each export would have produced.

use super::host::{DocumentProvider, ExportRequest, Exporter, HostDocument, HostTransaction};
use crate::core::options::EffectiveOptions;
use crate::domain::{HostError, IfcBatchError, Result, UnitDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub targets: Vec<String>,
    /// Central or linked document that rejects transactions
    #[serde(default)]
    pub special: bool,
}

/// Units of a headless batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitManifest {
    pub units: Vec<ManifestEntry>,
}

impl UnitManifest {
    /// Loads a manifest; relative unit paths are taken from the manifest's directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            IfcBatchError::Configuration(format!("Failed to read manifest {}: {e}", path.display()))
        })?;
        let mut manifest: UnitManifest = serde_json::from_str(&contents).map_err(|e| {
            IfcBatchError::Configuration(format!("Invalid manifest {}: {e}", path.display()))
        })?;

        if let Some(base) = path.parent() {
            for entry in &mut manifest.units {
                if entry.path.is_relative() {
                    entry.path = base.join(&entry.path);
                }
            }
        }

        Ok(manifest)
    }

    /// Unit descriptors in manifest order
    pub fn descriptors(&self) -> Vec<UnitDescriptor> {
        self.units
            .iter()
            .map(|entry| UnitDescriptor::new(entry.path.clone(), entry.targets.clone()))
            .collect()
    }
}

/// Document provider backed by a manifest
pub struct ManifestHost {
    entries: HashMap<PathBuf, ManifestEntry>,
    open_documents: usize,
}

impl ManifestHost {
    pub fn new(manifest: &UnitManifest) -> Self {
        let entries = manifest
            .units
            .iter()
            .map(|entry| (entry.path.clone(), entry.clone()))
            .collect();
        Self {
            entries,
            open_documents: 0,
        }
    }

    /// Documents opened and not yet closed
    pub fn open_documents(&self) -> usize {
        self.open_documents
    }
}

impl DocumentProvider for ManifestHost {
    fn open(&mut self, path: &Path) -> std::result::Result<Box<dyn HostDocument>, HostError> {
        let open_failed = |message: &str| HostError::OpenFailed {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        let entry = self
            .entries
            .get(path)
            .ok_or_else(|| open_failed("not listed in the manifest"))?;
        if !path.exists() {
            return Err(open_failed("file not found"));
        }

        self.open_documents += 1;
        Ok(Box::new(ManifestDocument {
            title: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            special: entry.special,
        }))
    }

    fn close(
        &mut self,
        _document: Box<dyn HostDocument>,
        _save_changes: bool,
    ) -> std::result::Result<(), HostError> {
        self.open_documents = self.open_documents.saturating_sub(1);
        Ok(())
    }
}

struct ManifestDocument {
    title: String,
    special: bool,
}

impl HostDocument for ManifestDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn begin_transaction(&self, name: &str) -> std::result::Result<Box<dyn HostTransaction>, HostError> {
        if self.special {
            return Err(HostError::TransactionRejected(format!(
                "'{name}' refused by {}",
                self.title
            )));
        }
        Ok(Box::new(NoopTransaction))
    }
}

struct NoopTransaction;

impl HostTransaction for NoopTransaction {
    fn commit(self: Box<Self>) -> std::result::Result<(), HostError> {
        Ok(())
    }

    fn rollback(self: Box<Self>) -> std::result::Result<(), HostError> {
        Ok(())
    }
}

/// Output an export would have written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedOutput {
    pub document: String,
    pub target: String,
    pub path: PathBuf,
    pub options: EffectiveOptions,
}

/// Exporter that writes nothing and records every request
#[derive(Debug, Default)]
pub struct DryRunExporter {
    planned: Vec<PlannedOutput>,
}

impl DryRunExporter {
    pub fn planned(&self) -> &[PlannedOutput] {
        &self.planned
    }

    pub fn into_planned(self) -> Vec<PlannedOutput> {
        self.planned
    }
}

impl Exporter for DryRunExporter {
    fn export(
        &mut self,
        document: &dyn HostDocument,
        request: &ExportRequest,
    ) -> std::result::Result<bool, HostError> {
        tracing::debug!(
            document = %document.title(),
            target = %request.target,
            path = %request.output_path().display(),
            "Dry run export"
        );
        self.planned.push(PlannedOutput {
            document: document.title().to_string(),
            target: request.target.clone(),
            path: request.output_path(),
            options: request.options.clone(),
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir) -> PathBuf {
        fs::create_dir_all(dir.path().join("models")).unwrap();
        fs::write(dir.path().join("models/Tower.rvt"), b"").unwrap();
        fs::write(dir.path().join("models/Central.rvt"), b"").unwrap();

        let path = dir.path().join("units.json");
        fs::write(
            &path,
            r#"{"units": [
                {"path": "models/Tower.rvt", "targets": ["Level 1"]},
                {"path": "models/Central.rvt", "targets": ["Site"], "special": true},
                {"path": "models/Missing.rvt", "targets": ["A"]}
            ]}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let manifest = UnitManifest::load(write_manifest(&dir)).unwrap();

        let descriptors = manifest.descriptors();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(descriptors[0].path, dir.path().join("models/Tower.rvt"));
        assert_eq!(descriptors[0].unit_name(), "Tower");
        assert!(manifest.units[1].special);
    }

    #[test]
    fn test_open_rules() {
        let dir = TempDir::new().unwrap();
        let manifest = UnitManifest::load(write_manifest(&dir)).unwrap();
        let mut host = ManifestHost::new(&manifest);

        let tower = host.open(&dir.path().join("models/Tower.rvt")).unwrap();
        assert_eq!(tower.title(), "Tower.rvt");
        assert!(tower.begin_transaction("Test Transaction").is_ok());

        let central = host.open(&dir.path().join("models/Central.rvt")).unwrap();
        assert!(central.begin_transaction("Test Transaction").is_err());

        let missing = host.open(&dir.path().join("models/Missing.rvt")).err().unwrap();
        assert!(missing.to_string().contains("file not found"));

        let unlisted = host.open(Path::new("elsewhere.rvt")).err().unwrap();
        assert!(unlisted.to_string().contains("not listed"));

        assert_eq!(host.open_documents(), 2);
        host.close(tower, false).unwrap();
        assert_eq!(host.open_documents(), 1);
    }

    #[test]
    fn test_invalid_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("units.json");
        fs::write(&path, r#"{"units": "Tower.rvt"}"#).unwrap();

        let err = UnitManifest::load(&path).unwrap_err();
        assert!(matches!(err, IfcBatchError::Configuration(_)));
    }
}
