//! Batch runner
//!
//! Drives the units of a run one at a time: open, export through the
//! [`ExportOrchestrator`], close. A unit that fails to open or exports
//! nothing is recorded and the run moves on to the next unit.

use super::context::ExportContext;
use super::orchestrator::{ExportOrchestrator, ExportSettings};
use super::summary::{BatchReport, UnitFailure};
use crate::adapters::host::{DocumentProvider, Exporter};
use crate::domain::context::ResultExt;
use crate::domain::{IfcBatchError, Result, UnitDescriptor, WorkItem};
use std::fs;
use std::time::Instant;

/// Reason recorded for a unit without a single exported target
pub const NO_VIEW_EXPORTED: &str = "no view exported";

/// Runs a batch over a document provider and an exporter
pub struct BatchRunner<P, E> {
    provider: P,
    exporter: E,
    settings: ExportSettings,
}

impl<P: DocumentProvider, E: Exporter> BatchRunner<P, E> {
    pub fn new(provider: P, exporter: E, settings: ExportSettings) -> Self {
        Self {
            provider,
            exporter,
            settings,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    pub fn into_parts(self) -> (P, E) {
        (self.provider, self.exporter)
    }

    /// Processes `units` in order
    ///
    /// # Errors
    ///
    /// Only a destination root that cannot be used is fatal. Every other
    /// failure is recorded in the returned report.
    pub fn run(&mut self, units: Vec<UnitDescriptor>, ctx: &mut ExportContext) -> Result<BatchReport> {
        let start = Instant::now();
        self.prepare_destination()?;

        let total = units.len();
        let mut report = BatchReport::new(self.settings.profile_label(), total);

        tracing::info!(
            run_id = %report.run_id(),
            units = total,
            profile = %report.profile_label(),
            destination = %self.settings.destination_root.display(),
            "Starting batch export"
        );

        for (index, descriptor) in units.into_iter().enumerate() {
            if ctx.is_shutdown_requested() {
                tracing::warn!(processed = index, total, "Shutdown requested, stopping batch");
                report.mark_interrupted();
                break;
            }

            let unit = descriptor.unit_name();
            ctx.progress().on_unit_start(&unit, index, total);
            self.run_unit(descriptor, &unit, ctx, &mut report);
        }

        let report = report.finish(start.elapsed(), ctx.take_warnings());
        report.log_summary();
        Ok(report)
    }

    fn run_unit(
        &mut self,
        descriptor: UnitDescriptor,
        unit: &str,
        ctx: &mut ExportContext,
        report: &mut BatchReport,
    ) {
        let document = match self.provider.open(&descriptor.path) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(unit = %unit, error = %e, "Failed to open document");
                report.record_failure(UnitFailure::new(unit, e.to_string()));
                return;
            }
        };

        let item = WorkItem::from_descriptor(descriptor);
        let outcome = ExportOrchestrator::new(&self.settings).export_unit(
            item,
            document.as_ref(),
            &mut self.exporter,
            ctx,
        );

        let special = matches!(&outcome, Err(e) if e.is_special_document());
        match outcome {
            Ok(results) => {
                if results.iter().any(|r| r.is_success()) {
                    report.record_success();
                } else {
                    report.record_failure(UnitFailure::new(unit, NO_VIEW_EXPORTED));
                }
                report.append_results(results);
            }
            Err(IfcBatchError::SpecialDocument { reason, .. }) => {
                report.record_failure(UnitFailure::new(unit, reason));
            }
            Err(e) => {
                tracing::error!(unit = %unit, error = %e, "Unit export failed");
                report.record_failure(UnitFailure::new(unit, e.to_string()));
            }
        }

        // Special documents stay open; the host owns them
        if special {
            return;
        }
        if let Err(e) = self.provider.close(document, false).context(format!("Closing {unit}")) {
            ctx.warn(e.to_string());
        }
    }

    fn prepare_destination(&self) -> Result<()> {
        let root = &self.settings.destination_root;
        let invalid = |reason: String| IfcBatchError::InvalidDestination {
            path: root.clone(),
            reason,
        };

        if root.as_os_str().is_empty() {
            return Err(invalid("no destination root given".to_string()));
        }
        if root.exists() && !root.is_dir() {
            return Err(invalid("not a directory".to_string()));
        }
        fs::create_dir_all(root).map_err(|e| invalid(e.to_string()))
    }
}
