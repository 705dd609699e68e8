//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod extract;
pub mod init;
pub mod init_override;
pub mod plan;
pub mod validate;

use crate::config::{load_config, IfcBatchConfig};
use crate::domain::Result;
use std::path::Path;

/// Loads `config_path`, or the built-in defaults when the file does not exist
pub(crate) fn load_config_or_default(config_path: &str) -> Result<IfcBatchConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::info!(config_path = %config_path, "Configuration file not found, using defaults");
        Ok(IfcBatchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config_or_default("does/not/exist/ifcbatch.toml").unwrap();
        assert!(config.export.active_view_only);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ifcbatch.toml");
        fs::write(&path, "[export]\nprofile = \"mvd\"\n").unwrap();

        assert!(load_config_or_default(path.to_str().unwrap()).is_err());
    }
}
