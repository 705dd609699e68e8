//! Export profiles and IFC file versions

use super::overrides::OverrideOptions;
use super::value::OptionMap;
use crate::domain::{IfcBatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// IFC file version written by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IfcVersion {
    /// IFC 2x3, Coordination View 2.0
    #[serde(rename = "IFC2x3CV2")]
    Ifc2x3Cv2,
    /// IFC 4, Reference View
    #[serde(rename = "IFC4")]
    Ifc4,
}

impl IfcVersion {
    /// Maps an override-file version code
    ///
    /// `21` is IFC 2x3 CV2.0, `23` and `25` are IFC 4. Other codes are not
    /// recognized and return `None`; callers keep the version they had.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            21 => Some(IfcVersion::Ifc2x3Cv2),
            23 | 25 => Some(IfcVersion::Ifc4),
            _ => None,
        }
    }

    /// Output file name prefix
    pub fn file_prefix(self) -> &'static str {
        match self {
            IfcVersion::Ifc2x3Cv2 => "IFC2x3_",
            IfcVersion::Ifc4 => "IFC4_",
        }
    }
}

impl fmt::Display for IfcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IfcVersion::Ifc2x3Cv2 => f.write_str("IFC2x3CV2"),
            IfcVersion::Ifc4 => f.write_str("IFC4"),
        }
    }
}

/// Named export profile selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportProfile {
    /// IFC 2x3 Coordination View 2.0
    #[default]
    Default,
    /// IFC 4 Reference View
    #[serde(rename = "ifc4")]
    Reference,
    /// Override file on top of the coordination preset
    Custom,
}

impl ExportProfile {
    /// Preset layer for this profile
    ///
    /// The custom profile starts from the coordination preset.
    pub fn preset(self) -> Preset {
        match self {
            ExportProfile::Default | ExportProfile::Custom => Preset::coordination(),
            ExportProfile::Reference => Preset::reference(),
        }
    }

    /// Whether the override layer applies when resolving this profile
    pub fn accepts_overrides(self) -> bool {
        self == ExportProfile::Custom
    }

    /// Report label for this profile with the override file in use
    ///
    /// An override version code resolving to IFC 4 switches the label (and
    /// the file prefix, see [`ExportProfile::file_prefix`]) to the reference
    /// family. The version code is the only override the default profile
    /// reads; the reference profile reads none.
    pub fn label(self, overrides: Option<&OverrideOptions>) -> &'static str {
        let overrides_to_ifc4 = overrides.is_some_and(OverrideOptions::targets_ifc4);
        match self {
            ExportProfile::Reference => "IFC 4 - Reference View",
            ExportProfile::Default if overrides_to_ifc4 => "IFC 4 - Reference View",
            ExportProfile::Default => "IFC 2x3 - Coordination View 2.0",
            ExportProfile::Custom if overrides.is_none() => "Custom configuration",
            ExportProfile::Custom if overrides_to_ifc4 => "IFC 4 - Custom configuration",
            ExportProfile::Custom => "IFC 2x3 - Custom configuration",
        }
    }

    /// Output file prefix for this profile with the override file in use
    pub fn file_prefix(self, overrides: Option<&OverrideOptions>) -> &'static str {
        let overrides_to_ifc4 = overrides.is_some_and(OverrideOptions::targets_ifc4);
        if self == ExportProfile::Reference || overrides_to_ifc4 {
            IfcVersion::Ifc4.file_prefix()
        } else {
            IfcVersion::Ifc2x3Cv2.file_prefix()
        }
    }
}

impl FromStr for ExportProfile {
    type Err = IfcBatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" | "ifc2x3" => Ok(ExportProfile::Default),
            "ifc4" | "reference" => Ok(ExportProfile::Reference),
            "custom" => Ok(ExportProfile::Custom),
            other => Err(IfcBatchError::Configuration(format!(
                "Invalid export profile '{other}'. Must be one of: default, ifc4, custom"
            ))),
        }
    }
}

impl fmt::Display for ExportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportProfile::Default => f.write_str("default"),
            ExportProfile::Reference => f.write_str("ifc4"),
            ExportProfile::Custom => f.write_str("custom"),
        }
    }
}

/// Hard-coded first layer of the option bag
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub version: IfcVersion,
    pub space_boundary_level: i64,
    pub export_base_quantities: bool,
    pub wall_and_column_splitting: bool,
    /// Profile-specific secondary options
    pub options: OptionMap,
}

impl Preset {
    /// IFC 2x3 Coordination View 2.0
    pub fn coordination() -> Self {
        Self {
            version: IfcVersion::Ifc2x3Cv2,
            space_boundary_level: 0,
            export_base_quantities: false,
            wall_and_column_splitting: false,
            options: OptionMap::new(),
        }
    }

    /// IFC 4 Reference View
    pub fn reference() -> Self {
        let mut options = OptionMap::new();
        options.insert("ExchangeRequirement", "ReferenceView");
        options.insert("IFCVersion", "IFC4");
        options.insert("ExportBoundingBox", "false");
        options.insert("UseTypeNameOnlyForIfcType", "true");
        options.insert("UseOnlyTriangulation", "true");

        Self {
            version: IfcVersion::Ifc4,
            space_boundary_level: 0,
            export_base_quantities: false,
            wall_and_column_splitting: false,
            options,
        }
    }
}
