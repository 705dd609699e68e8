//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ifcbatch using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ifcbatch - Batch IFC export planning and IFC-to-JSON extraction
#[derive(Parser, Debug)]
#[command(name = "ifcbatch")]
#[command(version, about, long_about = None)]
#[command(author = "ifcbatch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ifcbatch.toml", env = "IFCBATCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "IFCBATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the batch pipeline over a unit manifest without writing IFC files
    Plan(commands::plan::PlanArgs),

    /// Extract IFC entity records to JSON
    Extract(commands::extract::ExtractArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Write the default export override template
    InitOverride(commands::init_override::InitOverrideArgs),
}
