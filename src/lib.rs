// ifcbatch - Batch IFC export and IFC-to-JSON extraction
// Copyright (c) 2025 ifcbatch Contributors
// Licensed under the MIT License

//! # ifcbatch - Batch IFC export and IFC-to-JSON extraction
//!
//! ifcbatch drives batch export of building-model documents to IFC files and
//! scrapes entity records from IFC interchange files into JSON.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** export options from a named profile, an enforced
//!   active-view-only rule and a JSON override file
//! - **Exporting** every selected view of every document in a batch, one
//!   IFC file per view, with per-view failure isolation
//! - **Extracting** `#id=IFCTYPE(...)` records from IFC text, grouped by type
//! - **Writing** extraction, view and schedule record sets as JSON documents
//!
//! ## Architecture
//!
//! ifcbatch follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Option resolution, export orchestration, record extraction
//! - [`adapters`] - Modeling host traits and the manifest-driven host
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ifcbatch::adapters::{DryRunExporter, ManifestHost, UnitManifest};
//! use ifcbatch::config::load_config;
//! use ifcbatch::core::export::{BatchRunner, ExportContext, ExportSettings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ifcbatch.toml")?;
//!     let manifest = UnitManifest::load("units.json")?;
//!
//!     let mut ctx = ExportContext::default();
//!     let settings = ExportSettings::from_config(&config.export, &mut ctx);
//!     let mut runner = BatchRunner::new(ManifestHost::new(&manifest), DryRunExporter::default(), settings);
//!
//!     let report = runner.run(manifest.descriptors(), &mut ctx)?;
//!     println!("Exported {} views", report.exported_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Option Resolution
//!
//! ```rust
//! use ifcbatch::core::options::{resolve, ExportProfile, IfcVersion, OverrideOptions};
//!
//! let overrides = OverrideOptions::from_json_str(r#"{"IFCVersion": 25, "ExportLinkedFiles": true}"#).unwrap();
//! let resolution = resolve(ExportProfile::Custom, Some(&overrides), true);
//!
//! assert_eq!(resolution.options.version(), IfcVersion::Ifc4);
//! assert_eq!(resolution.options.option_token("ExportLinkedFiles").as_deref(), Some("false"));
//! ```
//!
//! ### Record Extraction
//!
//! ```rust
//! use ifcbatch::core::extract::extract;
//!
//! let records = extract("#12=IFCWALL('2O2Fr$t4X7Zf8NOew3FLOH',$);\n");
//! assert_eq!(records["IFCWALL"][0].id, "12");
//! ```
//!
//! ## Error Handling
//!
//! ifcbatch uses the [`domain::IfcBatchError`] type for all errors:
//!
//! ```rust,no_run
//! use ifcbatch::domain::IfcBatchError;
//!
//! fn example() -> Result<(), IfcBatchError> {
//!     let config = ifcbatch::config::load_config("ifcbatch.toml")?;
//!     println!("{}", config.export.profile);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
