//! Record extraction and JSON output
//!
//! - [`scanner`] - Line scanner for IFC text
//! - [`document`] - Per-file extraction documents
//! - [`schedule`] - Tab-delimited schedule text
//! - [`writer`] - JSON document files

pub mod document;
pub mod scanner;
pub mod schedule;
pub mod writer;

pub use document::{type_from_choice, FileInfo, IfcExtraction, IfcProjection};
pub use scanner::{extract, extract_reader, parse_line, project, ExtractionStats, SkipReason};
pub use schedule::{parse_schedule_text, schedule_from_export};
pub use writer::{
    export_named_documents, read_json_document, write_json_document, NamedDocument,
};
