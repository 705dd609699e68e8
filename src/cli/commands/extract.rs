//! Extract command implementation
//!
//! This module implements the `extract` command: every listed IFC file is
//! scanned for entity records and written as one JSON document.

use super::load_config_or_default;
use crate::config::ExtractConfig;
use crate::core::extract::{write_json_document, IfcExtraction};
use crate::domain::{IfcBatchError, Result};
use crate::{log_error_with_context, log_extraction_complete};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// IFC files to extract
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Entity types to keep (comma-separated, e.g. IFCWALL,IFCDOOR)
    #[arg(short, long)]
    pub types: Option<String>,

    /// Override the JSON output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Prefix joined to output file names
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// List the entity types of each file instead of writing JSON
    #[arg(long)]
    pub list_types: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(files = self.files.len(), "Starting extract command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config.extract,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        self.apply_overrides(&mut config);

        let mut failed = 0;
        for file in &self.files {
            if self.list_types {
                match IfcExtraction::read(file) {
                    Ok(extraction) => print_type_choices(file, &extraction),
                    Err(e) => {
                        log_error_with_context!(&e, "Failed to read IFC file");
                        eprintln!("{e}");
                        failed += 1;
                    }
                }
                continue;
            }

            match extract_file(file, &config) {
                Ok(Some(path)) => println!("{} -> {}", file.display(), path.display()),
                Ok(None) => println!("{}: no IFC records found", file.display()),
                Err(e) => {
                    log_error_with_context!(&e, "Extraction failed");
                    eprintln!("{e}");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            tracing::warn!(failed, total = self.files.len(), "Some files could not be extracted");
            return Ok(1);
        }
        Ok(0)
    }

    fn apply_overrides(&self, config: &mut ExtractConfig) {
        if let Some(types) = &self.types {
            config.selected_types = types
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_uppercase)
                .collect();
            tracing::info!(types = ?config.selected_types, "Overriding selected types from CLI");
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.file_name_prefix = Some(prefix.clone());
        }
    }
}

/// Extracts one file and writes its JSON document
///
/// Returns `None` when the file holds no entity records; nothing is written
/// in that case.
pub fn extract_file(file: &Path, config: &ExtractConfig) -> Result<Option<PathBuf>> {
    let extraction = IfcExtraction::read(file)?;
    if extraction.is_empty() {
        tracing::warn!(file = %file.display(), "No IFC records found");
        return Ok(None);
    }

    let name = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| IfcBatchError::Extraction(format!("{}: no file name", file.display())))?;
    let prefix = config.file_name_prefix.as_deref();

    let (path, types, records) = if config.selected_types.is_empty() {
        let path = write_json_document(&config.output_dir, prefix, &name, &extraction)?;
        (path, extraction.element_types.len(), extraction.stats.records)
    } else {
        let projection = extraction.project(&config.selected_types);
        let records = projection.elements.values().map(Vec::len).sum::<usize>();
        let path = write_json_document(&config.output_dir, prefix, &name, &projection)?;
        (path, projection.elements.len(), records)
    };

    log_extraction_complete!(file.display(), types, records, path.display());
    Ok(Some(path))
}

fn print_type_choices(file: &Path, extraction: &IfcExtraction) {
    println!("{}", file.display());
    if extraction.is_empty() {
        println!("  no IFC records found");
        return;
    }
    for choice in extraction.type_choices() {
        println!("  {choice}");
    }
}
