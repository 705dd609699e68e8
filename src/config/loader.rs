//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::IfcBatchConfig;
use crate::domain::errors::IfcBatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`IfcBatchConfig`]
/// 4. Applies environment variable overrides (`IFCBATCH_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use ifcbatch::config::loader::load_config;
///
/// let config = load_config("ifcbatch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<IfcBatchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IfcBatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        IfcBatchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn load_config_str(contents: &str) -> Result<IfcBatchConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: IfcBatchConfig = toml::from_str(&contents)
        .map_err(|e| IfcBatchError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        IfcBatchError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| IfcBatchError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(IfcBatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the `IFCBATCH_*` prefix
///
/// Variables follow the pattern `IFCBATCH_<SECTION>_<KEY>`, for example
/// `IFCBATCH_EXPORT_PROFILE` or `IFCBATCH_LOGGING_LOCAL_PATH`.
fn apply_env_overrides(config: &mut IfcBatchConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("IFCBATCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("IFCBATCH_EXPORT_PROFILE") {
        config.export.profile = val.parse()?;
    }
    if let Ok(val) = std::env::var("IFCBATCH_EXPORT_OVERRIDE_FILE") {
        config.export.override_file = (!val.is_empty()).then(|| PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("IFCBATCH_EXPORT_ACTIVE_VIEW_ONLY") {
        config.export.active_view_only = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("IFCBATCH_EXPORT_DESTINATION_ROOT") {
        config.export.destination_root = PathBuf::from(val);
    }

    // Extract overrides
    if let Ok(val) = std::env::var("IFCBATCH_EXTRACT_OUTPUT_DIR") {
        config.extract.output_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("IFCBATCH_EXTRACT_SELECTED_TYPES") {
        config.extract.selected_types = val
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
    }
    if let Ok(val) = std::env::var("IFCBATCH_EXTRACT_FILE_NAME_PREFIX") {
        config.extract.file_name_prefix = (!val.is_empty()).then_some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("IFCBATCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("IFCBATCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("IFCBATCH_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("IFCBATCH_TEST_ROOT", "/srv/exports");
        let input = "destination_root = \"${IFCBATCH_TEST_ROOT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "destination_root = \"/srv/exports\"");
        std::env::remove_var("IFCBATCH_TEST_ROOT");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("IFCBATCH_TEST_MISSING");
        let result = substitute_env_vars("override_file = \"${IFCBATCH_TEST_MISSING}\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("IFCBATCH_TEST_MISSING"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# root = \"${IFCBATCH_TEST_NEVER_SET}\"\nprofile = \"ifc4\"";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[export]
profile = "custom"
override_file = "ifc_override.json"
destination_root = "out/ifc"

[extract]
selected_types = ["IFCWALL", "IFCDOOR"]
file_name_prefix = "Tower"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.export.destination_root, PathBuf::from("out/ifc"));
        assert_eq!(config.extract.selected_types.len(), 2);
        assert_eq!(config.extract.file_name_prefix.as_deref(), Some("Tower"));
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let err = load_config_str("[logging]\nlocal_rotation = \"weekly\"\n").unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));

        let err = load_config_str("[export]\nprofile = \"mvd\"\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
