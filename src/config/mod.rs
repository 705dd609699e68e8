//! Configuration management for ifcbatch.
//!
//! TOML configuration loading, parsing and validation.
//!
//! # Overview
//!
//! ifcbatch reads `ifcbatch.toml` with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `IFCBATCH_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Per-section validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ifcbatch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ifcbatch.toml")?;
//!
//! println!("Profile: {}", config.export.profile);
//! println!("Destination: {}", config.export.destination_root.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ExportConfig`] - Profile, override file, active-view-only flag, destination root
//! - [`ExtractConfig`] - JSON output directory, selected entity types, file-name prefix
//! - [`LoggingConfig`] - Local JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! profile = "custom"
//! override_file = "${IFCBATCH_CONFIG_DIR}/ifc_override.json"
//! active_view_only = true
//! destination_root = "ifc_exports"
//!
//! [extract]
//! output_dir = "json_exports"
//! selected_types = ["IFCWALL", "IFCDOOR"]
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! local_rotation = "daily"
//! ```
//!
//! Override files are JSON; `ifcbatch init-override` writes the default
//! template.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{ApplicationConfig, ExportConfig, ExtractConfig, IfcBatchConfig, LoggingConfig};
