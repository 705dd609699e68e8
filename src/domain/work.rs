//! Work units and per-target results
//!
//! A unit is one host document (or one file) paired with the sub-targets the
//! caller selected in it. Units are described up front by the caller, turned
//! into a [`WorkItem`] once the document is open, and consumed exactly once
//! by the export orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Caller-side description of a unit, before its document is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    /// Path of the host document
    pub path: PathBuf,

    /// Selected sub-target names (views or schedules), in export order
    pub targets: Vec<String>,
}

impl UnitDescriptor {
    /// Creates a descriptor for a document path and its selected targets
    pub fn new(path: impl Into<PathBuf>, targets: Vec<String>) -> Self {
        Self {
            path: path.into(),
            targets,
        }
    }

    /// Unit name derived from the document path (file stem)
    pub fn unit_name(&self) -> String {
        unit_name_from_path(&self.path)
    }
}

/// One opened unit paired with its selected sub-targets
///
/// Fields are private: a work item is never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    name: String,
    targets: Vec<String>,
}

impl WorkItem {
    /// Creates a work item with an explicit unit name
    pub fn new(name: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }

    /// Creates a work item for a batch unit, named after its file stem
    pub fn from_descriptor(descriptor: UnitDescriptor) -> Self {
        let name = descriptor.unit_name();
        Self::new(name, descriptor.targets)
    }

    /// Creates a work item for the document already active in the host
    ///
    /// The unit is named after the document title, see [`unit_name_from_title`].
    pub fn from_active_document(title: &str, targets: Vec<String>) -> Self {
        Self::new(unit_name_from_title(title), targets)
    }

    /// Unit name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selected sub-targets
    pub fn targets(&self) -> &[String] {
        &self.targets
    }
}

/// File stem of a document path, or the whole file name when it has no stem
pub fn unit_name_from_path(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Unit name for an active document title
///
/// Drops a trailing `.rvt` and everything from the first `_`, which is where
/// local workshared copies append the user name (`Tower_jdoe.rvt` → `Tower`).
pub fn unit_name_from_title(title: &str) -> String {
    let name = title.strip_suffix(".rvt").unwrap_or(title);
    match name.split_once('_') {
        Some((base, _)) => base.to_string(),
        None => name.to_string(),
    }
}

/// Outcome of one sub-target export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportOutcome {
    /// The exporter produced the file at `path`
    Exported { path: PathBuf },
    /// The export failed for `reason`
    Failed { reason: String },
}

/// Per sub-target outcome, appended to the unit's result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    /// Unit the target belongs to
    pub unit: String,

    /// Target display name
    pub target: String,

    /// Outcome
    #[serde(flatten)]
    pub outcome: ExportOutcome,
}

impl ExportResult {
    /// Successful export at `path`
    pub fn exported(unit: impl Into<String>, target: impl Into<String>, path: PathBuf) -> Self {
        Self {
            unit: unit.into(),
            target: target.into(),
            outcome: ExportOutcome::Exported { path },
        }
    }

    /// Failed export with a reason
    pub fn failed(
        unit: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            unit: unit.into(),
            target: target.into(),
            outcome: ExportOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Whether the target was exported
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ExportOutcome::Exported { .. })
    }

    /// Output path on success
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            ExportOutcome::Exported { path } => Some(path),
            ExportOutcome::Failed { .. } => None,
        }
    }

    /// Failure reason
    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            ExportOutcome::Exported { .. } => None,
            ExportOutcome::Failed { reason } => Some(reason),
        }
    }
}

impl fmt::Display for ExportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ExportOutcome::Exported { path } => {
                write!(f, "{} / {} -> {}", self.unit, self.target, path.display())
            }
            ExportOutcome::Failed { reason } => {
                write!(f, "{} / {} failed: {}", self.unit, self.target, reason)
            }
        }
    }
}
