//! Host integrations for ifcbatch.
//!
//! - [`host`] - Collaborator traits the core drives (documents, transactions, exporter)
//! - [`manifest`] - Manifest-driven host and dry-run exporter for headless runs
//!
//! # Design Pattern
//!
//! The modeling host is reached only through the traits in [`host`]. An
//! embedding application implements them over its own object model; tests
//! and the CLI use in-memory implementations.

pub mod host;
pub mod manifest;

pub use host::{DocumentProvider, ExportRequest, Exporter, HostDocument, HostTransaction};
pub use manifest::{DryRunExporter, ManifestHost, PlannedOutput, UnitManifest};
