//! Layered option resolution
//!
//! Layers, later wins:
//!
//! 1. Profile preset (coordination or reference view)
//! 2. `VisibleElementsOfCurrentView = true`
//! 3. Active-view-only enforcement, when requested
//! 4. Override file entries, type-checked per recognized key (custom profile only)
//! 5. Active-view-only enforcement again
//!
//! Resolution never fails. A rejected override entry becomes a
//! [`ResolutionWarning`] and the key is skipped. The preset profiles ignore
//! overrides entirely; only their label and file prefix look at the version
//! code, see [`ExportProfile::label`].

use super::overrides::{json_kind, whole_number, OverrideOptions, VERSION_KEY};
use super::profile::{ExportProfile, IfcVersion};
use super::value::{OptionMap, OptionValue};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub const VISIBLE_ELEMENTS_OF_CURRENT_VIEW: &str = "VisibleElementsOfCurrentView";
pub const EXPORT_LINKED_FILES: &str = "ExportLinkedFiles";
pub const EXPORT_2D_ELEMENTS: &str = "Export2DElements";

const SPACE_BOUNDARIES: &str = "SpaceBoundaries";
const SPLIT_WALLS_AND_COLUMNS: &str = "SplitWallsAndColumns";
const EXPORT_BASE_QUANTITIES: &str = "ExportBaseQuantities";
const EXCLUDE_FILTER: &str = "ExcludeFilter";

/// Options whose boolean value is passed to the exporter as a lowercase token
const BOOL_TOKEN_KEYS: &[&str] = &[
    VISIBLE_ELEMENTS_OF_CURRENT_VIEW,
    EXPORT_2D_ELEMENTS,
    EXPORT_LINKED_FILES,
    "UseActiveViewGeometry",
    "ExportIFCCommonPropertySets",
    "Use2DRoomBoundaryForVolume",
    "UseOnlyTriangulation",
    "UseTypeNameOnlyForIfcType",
    "ExportRoomsInView",
    "ExportSolidModelRep",
];

/// Fully merged option bag for one export
///
/// Built once per sub-target by [`resolve`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveOptions {
    version: IfcVersion,
    space_boundary_level: i64,
    export_base_quantities: bool,
    wall_and_column_splitting: bool,
    options: OptionMap,
}

impl EffectiveOptions {
    pub fn version(&self) -> IfcVersion {
        self.version
    }

    pub fn space_boundary_level(&self) -> i64 {
        self.space_boundary_level
    }

    pub fn export_base_quantities(&self) -> bool {
        self.export_base_quantities
    }

    pub fn wall_and_column_splitting(&self) -> bool {
        self.wall_and_column_splitting
    }

    /// Secondary options in first-set order
    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    /// Exporter token for a secondary option
    pub fn option_token(&self, name: &str) -> Option<String> {
        self.options.get(name).map(OptionValue::token)
    }

    /// All secondary options rendered as exporter tokens
    pub fn tokens(&self) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|(name, value)| (name.to_string(), value.token()))
            .collect()
    }
}

/// Override entry rejected during resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionWarning {
    pub key: String,
    pub message: String,
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Override '{}' skipped: {}", self.key, self.message)
    }
}

/// Resolved options plus the warnings collected on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub options: EffectiveOptions,
    pub warnings: Vec<ResolutionWarning>,
}

/// Merges preset, enforcement and overrides into one option bag
pub fn resolve(
    profile: ExportProfile,
    overrides: Option<&OverrideOptions>,
    enforce_active_view_only: bool,
) -> Resolution {
    let preset = profile.preset();
    let mut options = EffectiveOptions {
        version: preset.version,
        space_boundary_level: preset.space_boundary_level,
        export_base_quantities: preset.export_base_quantities,
        wall_and_column_splitting: preset.wall_and_column_splitting,
        options: preset.options,
    };
    let mut warnings = Vec::new();

    options.options.insert(VISIBLE_ELEMENTS_OF_CURRENT_VIEW, "true");

    if enforce_active_view_only {
        enforce(&mut options.options);
    }

    if let Some(overrides) = overrides.filter(|_| profile.accepts_overrides()) {
        for (key, value) in overrides.iter() {
            if let Err(message) = apply_override(&mut options, key, value) {
                tracing::warn!(key = %key, reason = %message, "Override option skipped");
                warnings.push(ResolutionWarning {
                    key: key.clone(),
                    message,
                });
            }
        }
    }

    if enforce_active_view_only {
        enforce(&mut options.options);
    }

    Resolution { options, warnings }
}

fn enforce(options: &mut OptionMap) {
    options.insert(VISIBLE_ELEMENTS_OF_CURRENT_VIEW, "true");
    options.insert(EXPORT_LINKED_FILES, "false");
    options.insert(EXPORT_2D_ELEMENTS, "false");
}

fn apply_override(
    options: &mut EffectiveOptions,
    key: &str,
    value: &Value,
) -> std::result::Result<(), String> {
    match key {
        VERSION_KEY => {
            let code = whole_number(value)
                .ok_or_else(|| format!("expected an integer version code, found {}", json_kind(value)))?;
            // Unrecognized codes keep the version already set
            if let Some(version) = IfcVersion::from_code(code) {
                options.version = version;
            }
        }
        SPACE_BOUNDARIES => {
            let level = whole_number(value)
                .ok_or_else(|| format!("expected an integer, found {}", json_kind(value)))?;
            if !(0..=2).contains(&level) {
                return Err(format!("space boundary level must be 0, 1 or 2, found {level}"));
            }
            options.space_boundary_level = level;
        }
        SPLIT_WALLS_AND_COLUMNS => options.wall_and_column_splitting = strict_bool(value)?,
        EXPORT_BASE_QUANTITIES => options.export_base_quantities = strict_bool(value)?,
        EXCLUDE_FILTER => match value {
            Value::String(filter) => options.options.insert(key, filter.as_str()),
            other => return Err(format!("expected a string, found {}", json_kind(other))),
        },
        key if BOOL_TOKEN_KEYS.contains(&key) => {
            let token = bool_token(value)?;
            options.options.insert(key, token);
        }
        _ => {
            let opaque = OptionValue::from_json(value).ok_or_else(|| {
                format!("expected a primitive value, found {}", json_kind(value))
            })?;
            options.options.insert(key, opaque);
        }
    }
    Ok(())
}

fn strict_bool(value: &Value) -> std::result::Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("expected a boolean, found {}", json_kind(value)))
}

fn bool_token(value: &Value) -> std::result::Result<&'static str, String> {
    let flag = match value {
        Value::Bool(b) => *b,
        Value::String(s) if s.eq_ignore_ascii_case("true") => true,
        Value::String(s) if s.eq_ignore_ascii_case("false") => false,
        other => {
            return Err(format!(
                "expected a boolean or \"true\"/\"false\", found {}",
                json_kind(other)
            ))
        }
    };
    Ok(if flag { "true" } else { "false" })
}
