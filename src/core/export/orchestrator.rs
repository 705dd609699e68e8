//! Per-unit export loop
//!
//! Exports every selected sub-target of one open document. A failing
//! sub-target is recorded and the loop moves on; only a document that rejects
//! the transaction probe aborts the unit.

use super::context::ExportContext;
use super::transaction::{probe_transactions, TransactionGuard};
use crate::adapters::host::{ExportRequest, Exporter, HostDocument, EXPORT_TRANSACTION};
use crate::config::ExportConfig;
use crate::core::options::{resolve, ExportProfile, OverrideOptions};
use crate::core::sanitize::sanitize;
use crate::domain::{ExportResult, HostError, IfcBatchError, Result, WorkItem};
use std::fs;
use std::path::{Path, PathBuf};

/// Reason given for documents that cannot be batch exported
pub const SPECIAL_DOCUMENT_REASON: &str = "the file has a special status (central or linked); \
     open it directly in the host and use the active-document export";

/// Reason recorded when the exporter returns `false`
pub const EXPORTER_REPORTED_FAILURE: &str = "exporter reported failure";

/// Export settings shared by every unit of a run
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub profile: ExportProfile,
    pub overrides: Option<OverrideOptions>,
    pub enforce_active_view_only: bool,
    pub destination_root: PathBuf,
}

impl ExportSettings {
    pub fn new(profile: ExportProfile, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            overrides: None,
            enforce_active_view_only: false,
            destination_root: destination_root.into(),
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideOptions) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_active_view_only(mut self, enforce: bool) -> Self {
        self.enforce_active_view_only = enforce;
        self
    }

    /// Builds settings from the `[export]` section
    ///
    /// Only the custom profile reads the override file; any other profile
    /// drops it with a warning. An override file that cannot be loaded is a
    /// warning and the run continues without overrides. A custom profile left
    /// without overrides falls back to the default profile.
    pub fn from_config(config: &ExportConfig, ctx: &mut ExportContext) -> Self {
        let overrides = match config.override_file.as_deref() {
            Some(path) if !config.profile.accepts_overrides() => {
                ctx.warn(format!(
                    "Override file ignored: {} is only read by the custom profile, not '{}'",
                    path.display(),
                    config.profile
                ));
                None
            }
            Some(path) => match OverrideOptions::load(path) {
                Ok(overrides) => Some(overrides),
                Err(e) => {
                    ctx.warn(format!("Override file ignored: {e}"));
                    None
                }
            },
            None => None,
        };

        let mut profile = config.profile;
        if profile == ExportProfile::Custom && overrides.is_none() {
            ctx.warn("Custom profile selected without an override file; using the default profile");
            profile = ExportProfile::Default;
        }

        Self {
            profile,
            overrides,
            enforce_active_view_only: config.active_view_only,
            destination_root: config.destination_root.clone(),
        }
    }

    /// Report label of the effective profile
    pub fn profile_label(&self) -> &'static str {
        self.profile.label(self.overrides.as_ref())
    }

    /// Output file prefix of the effective profile
    pub fn file_prefix(&self) -> &'static str {
        self.profile.file_prefix(self.overrides.as_ref())
    }

    /// Output directory of a unit
    pub fn unit_directory(&self, unit: &str) -> PathBuf {
        self.destination_root.join(sanitize(unit, None))
    }
}

/// Runs the export loop for one unit
pub struct ExportOrchestrator<'a> {
    settings: &'a ExportSettings,
}

impl<'a> ExportOrchestrator<'a> {
    pub fn new(settings: &'a ExportSettings) -> Self {
        Self { settings }
    }

    /// Exports every target of `item` from `document`
    ///
    /// # Errors
    ///
    /// Returns [`IfcBatchError::SpecialDocument`] if the document rejects the
    /// transaction probe. No target is attempted in that case.
    pub fn export_unit(
        &self,
        item: WorkItem,
        document: &dyn HostDocument,
        exporter: &mut dyn Exporter,
        ctx: &mut ExportContext,
    ) -> Result<Vec<ExportResult>> {
        if let Err(e) = probe_transactions(document) {
            tracing::warn!(unit = %item.name(), error = %e, "Transaction probe failed");
            return Err(IfcBatchError::SpecialDocument {
                unit: item.name().to_string(),
                reason: SPECIAL_DOCUMENT_REASON.to_string(),
            });
        }

        let unit_dir = self.settings.unit_directory(item.name());
        let prefix = self.settings.file_prefix();
        let mut results = Vec::with_capacity(item.targets().len());

        for (index, target) in item.targets().iter().enumerate() {
            let result = match self.export_target(document, exporter, &unit_dir, prefix, target, index == 0, ctx) {
                Ok(path) => ExportResult::exported(item.name(), target, path),
                Err(reason) => ExportResult::failed(item.name(), target, reason),
            };
            ctx.progress().on_target_finished(&result);
            results.push(result);
        }

        Ok(results)
    }

    #[allow(clippy::too_many_arguments)]
    fn export_target(
        &self,
        document: &dyn HostDocument,
        exporter: &mut dyn Exporter,
        unit_dir: &Path,
        prefix: &str,
        target: &str,
        report_warnings: bool,
        ctx: &mut ExportContext,
    ) -> std::result::Result<PathBuf, String> {
        let resolution = resolve(
            self.settings.profile,
            self.settings.overrides.as_ref(),
            self.settings.enforce_active_view_only,
        );
        // Overrides are the same for every target; report their warnings once
        if report_warnings {
            for warning in &resolution.warnings {
                ctx.warn(warning.to_string());
            }
        }

        fs::create_dir_all(unit_dir)
            .map_err(|e| format!("Failed to create {}: {e}", unit_dir.display()))?;

        let request = ExportRequest {
            directory: unit_dir.to_path_buf(),
            file_stem: sanitize(target, Some(prefix)),
            target: target.to_string(),
            options: resolution.options,
        };

        match run_export(document, exporter, &request) {
            Ok(true) => Ok(request.output_path()),
            Ok(false) => Err(EXPORTER_REPORTED_FAILURE.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Exporter call inside a guarded transaction
///
/// The transaction is committed once the exporter returns, whatever it
/// reported; an exporter error rolls it back.
fn run_export(
    document: &dyn HostDocument,
    exporter: &mut dyn Exporter,
    request: &ExportRequest,
) -> std::result::Result<bool, HostError> {
    let guard = TransactionGuard::begin(document, EXPORT_TRANSACTION)?;
    let exported = exporter.export(document, request)?;
    guard.commit()?;
    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::host::HostTransaction;
    use crate::core::options::IfcVersion;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Txn(String, Log);

    impl HostTransaction for Txn {
        fn commit(self: Box<Self>) -> std::result::Result<(), HostError> {
            self.1.borrow_mut().push(format!("commit {}", self.0));
            Ok(())
        }

        fn rollback(self: Box<Self>) -> std::result::Result<(), HostError> {
            self.1.borrow_mut().push(format!("rollback {}", self.0));
            Ok(())
        }
    }

    struct Doc {
        special: bool,
        log: Log,
    }

    impl HostDocument for Doc {
        fn title(&self) -> &str {
            "Tower"
        }

        fn begin_transaction(
            &self,
            name: &str,
        ) -> std::result::Result<Box<dyn HostTransaction>, HostError> {
            if self.special {
                return Err(HostError::TransactionRejected("central model".to_string()));
            }
            Ok(Box::new(Txn(name.to_string(), self.log.clone())))
        }
    }

    /// Fails targets named "Broken", reports false for "Empty"
    struct ScriptedExporter {
        requests: Vec<ExportRequest>,
        log: Log,
    }

    impl Exporter for ScriptedExporter {
        fn export(
            &mut self,
            _document: &dyn HostDocument,
            request: &ExportRequest,
        ) -> std::result::Result<bool, HostError> {
            self.requests.push(request.clone());
            self.log.borrow_mut().push(format!("export {}", request.target));
            match request.target.as_str() {
                "Broken" => Err(HostError::ExportFailed("writer crashed".to_string())),
                "Empty" => Ok(false),
                _ => Ok(true),
            }
        }
    }

    fn fixture(special: bool) -> (Doc, ScriptedExporter, Log) {
        let log: Log = Rc::default();
        let doc = Doc {
            special,
            log: log.clone(),
        };
        let exporter = ScriptedExporter {
            requests: Vec::new(),
            log: log.clone(),
        };
        (doc, exporter, log)
    }

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_targets_are_isolated() {
        let dir = TempDir::new().unwrap();
        let settings = ExportSettings::new(ExportProfile::Default, dir.path());
        let (doc, mut exporter, log) = fixture(false);
        let mut ctx = ExportContext::default();

        let item = WorkItem::new("Tower", targets(&["Level 1", "Broken", "Empty", "Roof/Top"]));
        let results = ExportOrchestrator::new(&settings)
            .export_unit(item, &doc, &mut exporter, &mut ctx)
            .unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].path(),
            Some(dir.path().join("Tower").join("IFC2x3_Level 1.ifc").as_path())
        );
        assert_eq!(results[1].reason(), Some("Exporter failed: writer crashed"));
        assert_eq!(results[2].reason(), Some(EXPORTER_REPORTED_FAILURE));
        assert_eq!(exporter.requests[3].file_stem, "IFC2x3_RoofTop");

        let log = log.borrow();
        assert_eq!(log[0], "rollback Test Transaction");
        assert!(log.contains(&"rollback IFC Export".to_string()));
        assert_eq!(log.iter().filter(|l| *l == "commit IFC Export").count(), 3);
    }

    #[test]
    fn test_special_document_produces_no_results() {
        let dir = TempDir::new().unwrap();
        let settings = ExportSettings::new(ExportProfile::Default, dir.path());
        let (doc, mut exporter, _) = fixture(true);
        let mut ctx = ExportContext::default();

        let err = ExportOrchestrator::new(&settings)
            .export_unit(WorkItem::new("Central", targets(&["Level 1"])), &doc, &mut exporter, &mut ctx)
            .unwrap_err();

        assert!(err.is_special_document());
        assert!(err.to_string().starts_with("Central: the file has a special status"));
        assert!(exporter.requests.is_empty());
        assert!(!dir.path().join("Central").exists());
    }

    #[test]
    fn test_custom_ifc4_override_flips_prefix() {
        let dir = TempDir::new().unwrap();
        let overrides = OverrideOptions::from_json_str(r#"{"IFCVersion": 25, "SpaceBoundaries": "x"}"#).unwrap();
        let settings = ExportSettings::new(ExportProfile::Custom, dir.path())
            .with_overrides(overrides)
            .with_active_view_only(true);
        let (doc, mut exporter, _) = fixture(false);
        let mut ctx = ExportContext::default();

        ExportOrchestrator::new(&settings)
            .export_unit(WorkItem::new("Tower", targets(&["A", "B"])), &doc, &mut exporter, &mut ctx)
            .unwrap();

        assert_eq!(exporter.requests[0].file_stem, "IFC4_A");
        assert_eq!(exporter.requests[0].options.version(), IfcVersion::Ifc4);
        assert_eq!(exporter.requests[1].options.option_token("ExportLinkedFiles").as_deref(), Some("false"));
        assert_eq!(ctx.warnings().len(), 1);
        assert_eq!(settings.profile_label(), "IFC 4 - Custom configuration");
    }

    #[test]
    fn test_warnings_reported_when_directory_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();
        let overrides = OverrideOptions::from_json_str(r#"{"SpaceBoundaries": "x"}"#).unwrap();
        let settings = ExportSettings::new(ExportProfile::Custom, &blocker).with_overrides(overrides);
        let (doc, mut exporter, _) = fixture(false);
        let mut ctx = ExportContext::default();

        let results = ExportOrchestrator::new(&settings)
            .export_unit(WorkItem::new("Tower", targets(&["A", "B"])), &doc, &mut exporter, &mut ctx)
            .unwrap();

        assert!(results.iter().all(|r| !r.is_success()));
        assert!(results[0].reason().unwrap().starts_with("Failed to create"));
        assert!(exporter.requests.is_empty());
        assert_eq!(ctx.warnings().len(), 1);
        assert!(ctx.warnings()[0].contains("SpaceBoundaries"));
    }

    #[test]
    fn test_from_config_drops_overrides_for_preset_profiles() {
        let dir = TempDir::new().unwrap();
        let override_path = dir.path().join("ifc_override.json");
        fs::write(&override_path, r#"{"IFCVersion": 25, "SpaceBoundaries": 2}"#).unwrap();

        for profile in [ExportProfile::Default, ExportProfile::Reference] {
            let config = ExportConfig {
                profile,
                override_file: Some(override_path.clone()),
                active_view_only: false,
                destination_root: PathBuf::from("out"),
            };
            let mut ctx = ExportContext::default();

            let settings = ExportSettings::from_config(&config, &mut ctx);
            assert_eq!(settings.profile, profile);
            assert!(settings.overrides.is_none());
            assert_eq!(ctx.warnings().len(), 1);
            assert!(ctx.warnings()[0].contains("only read by the custom profile"));
        }
    }

    #[test]
    fn test_from_config_falls_back_to_default() {
        let config = ExportConfig {
            profile: ExportProfile::Custom,
            override_file: Some(PathBuf::from("missing_override.json")),
            active_view_only: true,
            destination_root: PathBuf::from("out"),
        };
        let mut ctx = ExportContext::default();

        let settings = ExportSettings::from_config(&config, &mut ctx);
        assert_eq!(settings.profile, ExportProfile::Default);
        assert!(settings.overrides.is_none());
        assert!(settings.enforce_active_view_only);
        assert_eq!(ctx.warnings().len(), 2);
        assert_eq!(settings.profile_label(), "IFC 2x3 - Coordination View 2.0");
    }
}
