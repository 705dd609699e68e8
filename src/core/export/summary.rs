//! Batch report
//!
//! Consolidated outcome of a batch run: unit counters, ordered unit-level
//! failures, every per-target result and the profile label.

use crate::domain::ExportResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Unit-level failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub unit: String,
    pub reason: String,
}

impl UnitFailure {
    pub fn new(unit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.unit, self.reason)
    }
}

/// Outcome of a batch run
///
/// Read-only once returned by the runner.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    #[serde(with = "duration_ms")]
    duration: Duration,
    total_units: usize,
    successful_units: usize,
    failures: Vec<UnitFailure>,
    results: Vec<ExportResult>,
    profile_label: String,
    interrupted: bool,
    warnings: Vec<String>,
}

impl BatchReport {
    pub(crate) fn new(profile_label: impl Into<String>, total_units: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            duration: Duration::ZERO,
            total_units,
            successful_units: 0,
            failures: Vec::new(),
            results: Vec::new(),
            profile_label: profile_label.into(),
            interrupted: false,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn record_success(&mut self) {
        self.successful_units += 1;
    }

    pub(crate) fn record_failure(&mut self, failure: UnitFailure) {
        self.failures.push(failure);
    }

    pub(crate) fn append_results(&mut self, results: Vec<ExportResult>) {
        self.results.extend(results);
    }

    pub(crate) fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    pub(crate) fn finish(mut self, duration: Duration, warnings: Vec<String>) -> Self {
        self.duration = duration;
        self.warnings = warnings;
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn total_units(&self) -> usize {
        self.total_units
    }

    pub fn successful_units(&self) -> usize {
        self.successful_units
    }

    /// Unit-level failures, in processing order
    pub fn failures(&self) -> &[UnitFailure] {
        &self.failures
    }

    /// Per-target results, in processing order
    pub fn results(&self) -> &[ExportResult] {
        &self.results
    }

    pub fn profile_label(&self) -> &str {
        &self.profile_label
    }

    /// Whether a shutdown signal stopped the run between units
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn exported_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn exported_paths(&self) -> impl Iterator<Item = &Path> {
        self.results.iter().filter_map(ExportResult::path)
    }

    pub fn is_successful(&self) -> bool {
        self.failures.is_empty() && !self.interrupted
    }

    /// Process exit code: 0 success, 1 failures, 130 interrupted
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            130
        } else if !self.failures.is_empty() {
            1
        } else {
            0
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            profile = %self.profile_label,
            total_units = self.total_units,
            successful_units = self.successful_units,
            failed_units = self.failures.len(),
            exported_targets = self.exported_count(),
            duration_ms = self.duration.as_millis() as u64,
            "Batch completed"
        );

        for failure in &self.failures {
            tracing::warn!(unit = %failure.unit, reason = %failure.reason, "Unit failed");
        }

        if self.interrupted {
            tracing::warn!("Batch interrupted before all units were processed");
        }
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
