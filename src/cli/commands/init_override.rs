//! Init-override command implementation
//!
//! Writes the default export override template, the starting point for a
//! `custom` export profile.

use crate::core::options::{default_template_json, write_default_template};
use clap::Args;
use std::path::Path;

/// Arguments for the init-override command
#[derive(Args, Debug)]
pub struct InitOverrideArgs {
    /// Path where to create the override file
    #[arg(short, long, default_value = "ifc_override.json")]
    pub output: String,

    /// Print the template instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitOverrideArgs {
    /// Execute the init-override command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        if self.stdout {
            println!("{}", default_template_json()?);
            return Ok(0);
        }

        tracing::info!(output = %self.output, "Writing override template");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Override file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match write_default_template(&self.output) {
            Ok(()) => {
                println!("✅ Override template created: {}", self.output);
                println!("   Set profile = \"custom\" and override_file in ifcbatch.toml to use it");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write override template");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}
