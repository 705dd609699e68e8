//! IFC extraction documents

use super::scanner::{self, ExtractionStats};
use crate::domain::{IfcBatchError, RecordSet, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Source file description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
}

/// Every record of one IFC file, grouped by type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfcExtraction {
    pub file_info: FileInfo,
    /// Record count per type
    pub element_types: BTreeMap<String, usize>,
    pub elements_by_type: RecordSet,
    #[serde(skip)]
    pub stats: ExtractionStats,
}

/// Selected types of one IFC file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfcProjection {
    pub file_info: FileInfo,
    pub selected_types: Vec<String>,
    pub elements: RecordSet,
}

impl IfcExtraction {
    /// Reads and scans an IFC file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extraction_error =
            |e: std::io::Error| IfcBatchError::Extraction(format!("{}: {e}", path.display()));

        let file_size = path.metadata().map_err(extraction_error)?.len();
        let file = File::open(path).map_err(extraction_error)?;
        let (elements_by_type, stats) =
            scanner::extract_reader(BufReader::new(file)).map_err(extraction_error)?;

        let file_info = FileInfo {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_path: path.display().to_string(),
            file_size,
        };

        tracing::debug!(
            file = %file_info.file_name,
            lines = stats.lines,
            records = stats.records,
            malformed = stats.malformed,
            undecodable = stats.undecodable,
            "IFC file scanned"
        );

        Ok(Self::from_records(file_info, elements_by_type, stats))
    }

    pub fn from_records(file_info: FileInfo, elements_by_type: RecordSet, stats: ExtractionStats) -> Self {
        let element_types = elements_by_type
            .iter()
            .map(|(t, records)| (t.clone(), records.len()))
            .collect();
        Self {
            file_info,
            element_types,
            elements_by_type,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.element_types.is_empty()
    }

    /// Selection labels, sorted: `"IFCWALL  (12 elements)"`
    pub fn type_choices(&self) -> Vec<String> {
        // element_types is a BTreeMap, so this is already sorted by type
        self.element_types
            .iter()
            .map(|(t, count)| format!("{t}  ({count} elements)"))
            .collect()
    }

    /// Restricts the document to `selected_types`
    pub fn project<S: AsRef<str>>(&self, selected_types: &[S]) -> IfcProjection {
        IfcProjection {
            file_info: self.file_info.clone(),
            selected_types: selected_types.iter().map(|s| s.as_ref().to_string()).collect(),
            elements: scanner::project(&self.elements_by_type, selected_types),
        }
    }
}

/// Entity type of a selection label produced by [`IfcExtraction::type_choices`]
pub fn type_from_choice(choice: &str) -> &str {
    choice.split_once("  (").map_or(choice, |(t, _)| t)
}
