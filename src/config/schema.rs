//! Configuration schema types
//!
//! This module defines the structure of `ifcbatch.toml`.

use crate::core::options::ExportProfile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main ifcbatch configuration
///
/// Every section is optional in the TOML file and falls back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IfcBatchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// IFC batch export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// IFC-to-JSON extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IfcBatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.extract.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export profile (default, ifc4 or custom)
    #[serde(default)]
    pub profile: ExportProfile,

    /// JSON override file, read by the custom profile only
    #[serde(default)]
    pub override_file: Option<PathBuf>,

    /// Export only elements visible in the active view
    #[serde(default = "default_true")]
    pub active_view_only: bool,

    /// Root directory receiving one subdirectory per unit
    #[serde(default = "default_destination_root")]
    pub destination_root: PathBuf,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.destination_root.as_os_str().is_empty() {
            return Err("export.destination_root cannot be empty".to_string());
        }

        if let Some(path) = &self.override_file {
            if path.as_os_str().is_empty() {
                return Err("export.override_file cannot be empty when set".to_string());
            }
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            profile: ExportProfile::default(),
            override_file: None,
            active_view_only: true,
            destination_root: default_destination_root(),
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Directory receiving the JSON documents
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Entity types to keep (empty = every type)
    #[serde(default)]
    pub selected_types: Vec<String>,

    /// Prefix joined to document names with `_`
    #[serde(default)]
    pub file_name_prefix: Option<String>,
}

impl ExtractConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("extract.output_dir cannot be empty".to_string());
        }

        if let Some(bad) = self.selected_types.iter().find(|t| t.trim().is_empty()) {
            return Err(format!("extract.selected_types contains a blank entry: '{bad}'"));
        }

        Ok(())
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            selected_types: Vec::new(),
            file_name_prefix: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_destination_root() -> PathBuf {
    PathBuf::from("ifc_exports")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("json_exports")
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
