//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ifcbatch.toml")]
    pub output: String,

    /// Include comments explaining every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ifcbatch configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. For a custom profile, write an override file: ifcbatch init-override");
                println!("  3. Validate configuration: ifcbatch validate-config");
                println!("  4. Plan a batch: ifcbatch plan --manifest units.json");
                println!("  5. Extract IFC records: ifcbatch extract model.ifc");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# ifcbatch configuration

[application]
log_level = "info"

[export]
profile = "default"
# override_file = "ifc_override.json"
active_view_only = true
destination_root = "ifc_exports"

[extract]
output_dir = "json_exports"
selected_types = []

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# ifcbatch configuration
#
# Values may reference environment variables as ${VAR_NAME}; every key can
# also be overridden with IFCBATCH_<SECTION>_<KEY>.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[export]
# Export profile:
#   default - IFC 2x3 Coordination View 2.0
#   ifc4    - IFC 4 Reference View
#   custom  - IFC 2x3 base plus the override file below
profile = "default"

# JSON override file, read by the custom profile only
# (generate one with: ifcbatch init-override)
# override_file = "${IFCBATCH_CONFIG_DIR}/ifc_override.json"

# Export only the elements visible in each view
active_view_only = true

# One subdirectory per unit is created under this root
destination_root = "ifc_exports"

[extract]
# Directory receiving one JSON document per IFC file
output_dir = "json_exports"

# Entity types to keep; empty keeps every type
selected_types = ["IFCWALL", "IFCDOOR", "IFCWINDOW"]

# Prefix joined to output file names with "_"
# file_name_prefix = "Project"

[logging]
# JSON log files next to the console output
local_enabled = false
local_path = "logs"

# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
