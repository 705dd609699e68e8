//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//! - Level from configuration, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use ifcbatch::logging::init_logging;
//! use ifcbatch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(unit = "Tower", "Processing unit");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ifcbatch::log_error_with_context;
/// use ifcbatch::domain::IfcBatchError;
///
/// let error = IfcBatchError::Configuration("Invalid profile".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Operation failed"
        );
    };
}

/// Log the outcome of one IFC-to-JSON extraction
///
/// # Example
///
/// ```no_run
/// use ifcbatch::log_extraction_complete;
///
/// log_extraction_complete!("Tower.ifc", 3, 1250, "json_exports/Tower.json");
/// ```
#[macro_export]
macro_rules! log_extraction_complete {
    ($file:expr, $types:expr, $records:expr, $output:expr) => {
        tracing::info!(
            file = %$file,
            types = $types,
            records = $records,
            output = %$output,
            "IFC extraction written"
        );
    };
}
