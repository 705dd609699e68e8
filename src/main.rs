// ifcbatch - Batch IFC export and IFC-to-JSON extraction
// Copyright (c) 2025 ifcbatch Contributors
// Licensed under the MIT License

use ifcbatch::cli::{Cli, Commands};
use ifcbatch::config::{load_config, IfcBatchConfig};
use ifcbatch::logging::init_logging;
use clap::Parser;
use std::path::Path;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging follows the configuration when it loads; console only otherwise
    let config = startup_config(&cli.config);
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let log_guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "ifcbatch - Batch IFC export and IFC-to-JSON extraction"
    );

    // Create shutdown signal channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        tracing::info!("Shutdown signal received, finishing the current unit");
        println!("\n⚠️  Shutdown signal received, finishing the current unit...");
        let _ = shutdown_tx.send(true);
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush the file writer first
    drop(log_guard);
    process::exit(exit_code);
}

/// Configuration used before any command runs; load errors are reported by the command
fn startup_config(config_path: &str) -> IfcBatchConfig {
    if !Path::new(config_path).exists() {
        return IfcBatchConfig::default();
    }
    load_config(config_path).unwrap_or_default()
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("Received SIGINT (Ctrl+C)"),
                _ = sigterm.recv() => tracing::info!("Received SIGTERM"),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler, listening for Ctrl+C only");
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Plan(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::Extract(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
        Commands::InitOverride(args) => args.execute().await,
    }
}
