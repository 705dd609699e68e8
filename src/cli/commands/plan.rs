//! Plan command implementation
//!
//! This module implements the `plan` command: the full batch pipeline over
//! the units of a manifest, served by the manifest host and a dry-run
//! exporter. Destination directories are created; no IFC file is written.

use super::load_config_or_default;
use crate::adapters::{DryRunExporter, ManifestHost, PlannedOutput, UnitManifest};
use crate::core::export::{BatchReport, BatchRunner, ExportContext, ExportSettings};
use crate::log_error_with_context;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// JSON manifest listing the units and their targets
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Override the destination root from the configuration
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    report: &'a BatchReport,
    planned: &'a [PlannedOutput],
}

impl PlanArgs {
    /// Execute the plan command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(manifest = %self.manifest.display(), "Starting plan command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(destination) = &self.destination {
            tracing::info!(destination = %destination.display(), "Overriding destination root from CLI");
            config.export.destination_root = destination.clone();
        }

        let manifest = match UnitManifest::load(&self.manifest) {
            Ok(manifest) => manifest,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load unit manifest");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let mut ctx = ExportContext::default().with_shutdown(shutdown_signal);
        let settings = ExportSettings::from_config(&config.export, &mut ctx);
        let mut runner = BatchRunner::new(ManifestHost::new(&manifest), DryRunExporter::default(), settings);

        let report = match runner.run(manifest.descriptors(), &mut ctx) {
            Ok(report) => report,
            Err(e) => {
                log_error_with_context!(&e, "Batch aborted");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let (_, exporter) = runner.into_parts();
        let planned = exporter.into_planned();

        if self.json {
            let output = PlanOutput {
                report: &report,
                planned: &planned,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_report(&report, &planned);
        }

        Ok(report.exit_code())
    }
}

fn print_report(report: &BatchReport, planned: &[PlannedOutput]) {
    println!("Export plan ({})", report.profile_label());
    println!("  Run ID: {}", report.run_id());
    println!(
        "  Units: {}/{} successful",
        report.successful_units(),
        report.total_units()
    );
    println!("  Outputs: {}", report.exported_count());
    println!();

    for output in planned {
        println!(
            "  {} / {} -> {} ({})",
            output.document,
            output.target,
            output.path.display(),
            output.options.version()
        );
    }

    if !report.failures().is_empty() {
        println!();
        println!("Failed units:");
        for failure in report.failures() {
            println!("  - {failure}");
        }
    }

    let failed_targets: Vec<_> = report.results().iter().filter(|r| !r.is_success()).collect();
    if !failed_targets.is_empty() {
        println!();
        println!("Failed targets:");
        for result in failed_targets {
            println!(
                "  - {} / {}: {}",
                result.unit,
                result.target,
                result.reason().unwrap_or_default()
            );
        }
    }

    if !report.warnings().is_empty() {
        println!();
        println!("Warnings:");
        for warning in report.warnings() {
            println!("  - {warning}");
        }
    }

    if report.interrupted() {
        println!();
        println!("Interrupted before all units were processed.");
    }
}
