//! Properties of option resolution across profiles

use ifcbatch::core::options::{
    default_template_json, resolve, ExportProfile, IfcVersion, OverrideOptions,
};
use test_case::test_case;

const HOSTILE_OVERRIDES: &str = r#"{
    "VisibleElementsOfCurrentView": false,
    "ExportLinkedFiles": "TRUE",
    "Export2DElements": true,
    "IFCVersion": 23,
    "UseOnlyTriangulation": "maybe",
    "ExchangeRequirement": 3
}"#;

#[test_case(ExportProfile::Default ; "default")]
#[test_case(ExportProfile::Reference ; "reference")]
#[test_case(ExportProfile::Custom ; "custom")]
fn test_enforcement_always_wins(profile: ExportProfile) {
    let overrides = OverrideOptions::from_json_str(HOSTILE_OVERRIDES).unwrap();
    let options = resolve(profile, Some(&overrides), true).options;

    assert_eq!(options.option_token("VisibleElementsOfCurrentView").as_deref(), Some("true"));
    assert_eq!(options.option_token("ExportLinkedFiles").as_deref(), Some("false"));
    assert_eq!(options.option_token("Export2DElements").as_deref(), Some("false"));
}

#[test_case(ExportProfile::Default ; "default")]
#[test_case(ExportProfile::Reference ; "reference")]
#[test_case(ExportProfile::Custom ; "custom")]
fn test_visible_elements_without_overrides(profile: ExportProfile) {
    let resolution = resolve(profile, None, false);
    assert!(resolution.warnings.is_empty());
    assert_eq!(
        resolution.options.option_token("VisibleElementsOfCurrentView").as_deref(),
        Some("true")
    );
}

#[test_case(ExportProfile::Default, IfcVersion::Ifc2x3Cv2 ; "default")]
#[test_case(ExportProfile::Reference, IfcVersion::Ifc4 ; "reference")]
#[test_case(ExportProfile::Custom, IfcVersion::Ifc2x3Cv2 ; "custom")]
fn test_preset_versions(profile: ExportProfile, expected: IfcVersion) {
    assert_eq!(resolve(profile, None, true).options.version(), expected);
}

const MANDATORY_OVERRIDES: &str = r#"{
    "IFCVersion": 21,
    "SpaceBoundaries": 2,
    "ExportBaseQuantities": true,
    "SplitWallsAndColumns": true,
    "ExchangeRequirement": 3
}"#;

#[test_case(ExportProfile::Default, HOSTILE_OVERRIDES, IfcVersion::Ifc2x3Cv2 ; "default_hostile")]
#[test_case(ExportProfile::Default, MANDATORY_OVERRIDES, IfcVersion::Ifc2x3Cv2 ; "default_mandatory")]
#[test_case(ExportProfile::Reference, HOSTILE_OVERRIDES, IfcVersion::Ifc4 ; "reference_hostile")]
#[test_case(ExportProfile::Reference, MANDATORY_OVERRIDES, IfcVersion::Ifc4 ; "reference_mandatory")]
fn test_preset_fields_survive_overrides(profile: ExportProfile, json: &str, version: IfcVersion) {
    let overrides = OverrideOptions::from_json_str(json).unwrap();
    let resolution = resolve(profile, Some(&overrides), false);
    let options = &resolution.options;

    assert!(resolution.warnings.is_empty());
    assert_eq!(options.version(), version);
    assert_eq!(options.space_boundary_level(), 0);
    assert!(!options.export_base_quantities());
    assert!(!options.wall_and_column_splitting());
    assert_eq!(options.option_token("ExportLinkedFiles"), None);
    assert_ne!(options.option_token("ExchangeRequirement").as_deref(), Some("3"));
    assert_eq!(options, &resolve(profile, None, false).options);
}

#[test]
fn test_default_label_follows_ifc4_version_code() {
    let overrides = OverrideOptions::from_json_str(HOSTILE_OVERRIDES).unwrap();

    assert_eq!(ExportProfile::Default.file_prefix(Some(&overrides)), "IFC4_");
    assert_eq!(ExportProfile::Default.label(Some(&overrides)), "IFC 4 - Reference View");
}

#[test]
fn test_custom_profile_applies_overrides() {
    let overrides = OverrideOptions::from_json_str(HOSTILE_OVERRIDES).unwrap();
    let resolution = resolve(ExportProfile::Custom, Some(&overrides), false);

    assert_eq!(resolution.options.version(), IfcVersion::Ifc4);
    assert_eq!(
        resolution.options.option_token("ExportLinkedFiles").as_deref(),
        Some("true")
    );
    assert_eq!(
        resolution.options.option_token("ExchangeRequirement").as_deref(),
        Some("3")
    );
    assert_eq!(resolution.warnings.len(), 1);
    assert_eq!(resolution.warnings[0].key, "UseOnlyTriangulation");
}

#[test]
fn test_resolution_is_deterministic() {
    let overrides = OverrideOptions::from_json_str(HOSTILE_OVERRIDES).unwrap();
    let first = resolve(ExportProfile::Custom, Some(&overrides), true);
    let second = resolve(ExportProfile::Custom, Some(&overrides), true);

    assert_eq!(first, second);
    assert_eq!(first.options.tokens(), second.options.tokens());
}

#[test]
fn test_default_template_resolves_cleanly() {
    let overrides = OverrideOptions::from_json_str(&default_template_json().unwrap()).unwrap();
    let resolution = resolve(ExportProfile::Custom, Some(&overrides), true);

    assert!(resolution.warnings.is_empty());
    assert_eq!(resolution.options.version(), IfcVersion::Ifc2x3Cv2);
    assert_eq!(resolution.options.space_boundary_level(), 0);
    assert_eq!(
        resolution.options.option_token("TessellationLevelOfDetail").as_deref(),
        Some("0.5")
    );
    assert_eq!(
        resolution.options.option_token("UseActiveViewGeometry").as_deref(),
        Some("true")
    );
}
