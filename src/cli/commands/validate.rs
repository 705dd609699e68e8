//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the ifcbatch configuration file and its override file.

use crate::config::{load_config, IfcBatchConfig};
use crate::core::options::{resolve, OverrideOptions};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            return Ok(2);
        }

        println!("✅ Configuration is valid");
        println!();
        print_summary(&config);

        Ok(check_override_file(&config))
    }
}

fn print_summary(config: &IfcBatchConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Export Profile: {}", config.export.profile);
    println!(
        "  Override File: {}",
        config
            .export
            .override_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string())
    );
    println!("  Active View Only: {}", config.export.active_view_only);
    println!("  Destination Root: {}", config.export.destination_root.display());
    println!("  JSON Output: {}", config.extract.output_dir.display());
    println!(
        "  Selected Types: {}",
        if config.extract.selected_types.is_empty() {
            "All".to_string()
        } else {
            config.extract.selected_types.join(", ")
        }
    );
    println!(
        "  Local Logging: {}",
        if config.logging.local_enabled {
            format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
        } else {
            "disabled".to_string()
        }
    );
    println!();
}

/// Loads and resolves the override file; skipped keys are reported, not fatal
fn check_override_file(config: &IfcBatchConfig) -> i32 {
    let Some(path) = &config.export.override_file else {
        return 0;
    };
    if !config.export.profile.accepts_overrides() {
        println!(
            "⚠️  Override file {} is ignored by the '{}' profile",
            path.display(),
            config.export.profile
        );
        return 0;
    }

    let overrides = match OverrideOptions::load(path) {
        Ok(overrides) => overrides,
        Err(e) => {
            println!("❌ Override file could not be loaded");
            println!("   Error: {e}");
            return 2;
        }
    };

    let resolution = resolve(config.export.profile, Some(&overrides), config.export.active_view_only);
    println!(
        "✅ Override file loaded: {} keys, {} ({})",
        overrides.len(),
        config.export.profile.label(Some(&overrides)),
        resolution.options.version()
    );
    for warning in &resolution.warnings {
        println!("   ⚠️  {warning}");
    }

    0
}
