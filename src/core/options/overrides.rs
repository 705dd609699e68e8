//! User override files
//!
//! An override file is a flat JSON object of option names to primitive
//! values. [`write_default_template`] produces the canonical template users
//! author against.

use super::profile::IfcVersion;
use crate::domain::{IfcBatchError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Option name carrying the override version code
pub const VERSION_KEY: &str = "IFCVersion";

/// Parsed override file, entries in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideOptions(Map<String, Value>);

impl OverrideOptions {
    /// Wraps an already parsed JSON object
    pub fn new(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    /// Parses override JSON text; the top level must be an object
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            IfcBatchError::Configuration(format!("Failed to parse override JSON: {e}"))
        })?;
        match value {
            Value::Object(entries) => Ok(Self(entries)),
            other => Err(IfcBatchError::Configuration(format!(
                "Override file must contain a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Loads an override file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing, unreadable or not
    /// a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IfcBatchError::Configuration(format!(
                "Override file not found: {}",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path).map_err(|e| {
            IfcBatchError::Configuration(format!(
                "Failed to read override file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// Version code, when `IFCVersion` holds a whole number
    pub fn version_code(&self) -> Option<i64> {
        self.0.get(VERSION_KEY).and_then(whole_number)
    }

    /// Whether the version code selects IFC 4 (codes 23 and 25)
    pub fn targets_ifc4(&self) -> bool {
        self.version_code().and_then(IfcVersion::from_code) == Some(IfcVersion::Ifc4)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Integer value of a JSON number with no fractional part
pub(crate) fn whole_number(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Default override template, fields in file order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OverrideTemplate {
    #[serde(rename = "IFCVersion")]
    pub ifc_version: i64,
    pub exchange_requirement: i64,
    #[serde(rename = "IFCFileType")]
    pub ifc_file_type: i64,
    pub space_boundaries: i64,
    pub split_walls_and_columns: bool,
    pub include_steel_elements: bool,
    pub export_base_quantities: bool,
    #[serde(rename = "Export2DElements")]
    pub export_2d_elements: bool,
    pub export_linked_files: bool,
    pub visible_elements_of_current_view: bool,
    pub export_rooms_in_view: bool,
    pub export_internal_revit_property_sets: bool,
    #[serde(rename = "ExportIFCCommonPropertySets")]
    pub export_ifc_common_property_sets: bool,
    pub tessellation_level_of_detail: f64,
    pub use_active_view_geometry: bool,
    pub use_family_and_type_name_for_reference: bool,
    #[serde(rename = "Use2DRoomBoundaryForVolume")]
    pub use_2d_room_boundary_for_volume: bool,
    pub include_site_elevation: bool,
    #[serde(rename = "StoreIFCGUID")]
    pub store_ifc_guid: bool,
}

impl Default for OverrideTemplate {
    fn default() -> Self {
        Self {
            ifc_version: 21,
            exchange_requirement: 3,
            ifc_file_type: 0,
            space_boundaries: 0,
            split_walls_and_columns: false,
            include_steel_elements: true,
            export_base_quantities: false,
            export_2d_elements: false,
            export_linked_files: false,
            visible_elements_of_current_view: true,
            export_rooms_in_view: false,
            export_internal_revit_property_sets: true,
            export_ifc_common_property_sets: false,
            tessellation_level_of_detail: 0.5,
            use_active_view_geometry: true,
            use_family_and_type_name_for_reference: false,
            use_2d_room_boundary_for_volume: false,
            include_site_elevation: true,
            store_ifc_guid: true,
        }
    }
}

/// Default template as pretty JSON (2-space indent)
pub fn default_template_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&OverrideTemplate::default())?)
}

/// Writes the default override template to `path`
pub fn write_default_template(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_template_json()?)?;
    tracing::info!(path = %path.display(), "Default override template written");
    Ok(())
}
