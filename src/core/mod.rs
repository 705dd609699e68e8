//! Core logic for ifcbatch.
//!
//! # Modules
//!
//! - [`options`] - Profiles, override files and option resolution
//! - [`sanitize`] - Filesystem-safe names
//! - [`export`] - Per-unit export loop and batch runner
//! - [`extract`] - IFC record extraction and JSON documents
//!
//! # Export Workflow
//!
//! 1. **Settings**: profile, override file and destination root from `[export]`
//! 2. **Open**: the document provider opens each unit in turn
//! 3. **Probe**: a throwaway transaction detects special documents
//! 4. **Resolve**: options are merged per sub-target
//! 5. **Export**: the exporter runs inside a guarded transaction
//! 6. **Report**: results and unit failures land in a [`export::BatchReport`]
//!
//! # Example
//!
//! ```rust,no_run
//! use ifcbatch::adapters::manifest::{DryRunExporter, ManifestHost, UnitManifest};
//! use ifcbatch::core::export::{BatchRunner, ExportContext, ExportSettings};
//! use ifcbatch::core::options::ExportProfile;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = UnitManifest::load("units.json")?;
//! let settings = ExportSettings::new(ExportProfile::Reference, "exports");
//! let mut runner = BatchRunner::new(
//!     ManifestHost::new(&manifest),
//!     DryRunExporter::default(),
//!     settings,
//! );
//!
//! let report = runner.run(manifest.descriptors(), &mut ExportContext::default())?;
//! println!("{} of {} units exported", report.successful_units(), report.total_units());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod extract;
pub mod options;
pub mod sanitize;
