//! Domain error types
//!
//! This module defines the error hierarchy for ifcbatch. Host-side failures
//! are expressed through [`HostError`] so that host adapters never leak their
//! own error types into the core.

use std::path::PathBuf;
use thiserror::Error;

/// Main ifcbatch error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum IfcBatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Modeling host errors (document provider, transactions, exporter)
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// The document rejected the transaction probe and cannot be batch exported
    #[error("{unit}: {reason}")]
    SpecialDocument { unit: String, reason: String },

    /// The destination root cannot be used for output
    #[error("Invalid destination root {}: {reason}", path.display())]
    InvalidDestination { path: PathBuf, reason: String },

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Record extraction errors (I/O on the interchange file itself)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl IfcBatchError {
    /// Whether this error classifies a unit as special (non-transactional)
    pub fn is_special_document(&self) -> bool {
        matches!(self, IfcBatchError::SpecialDocument { .. })
    }
}

/// Modeling host errors
///
/// Raised by implementations of the host traits in [`crate::adapters::host`].
#[derive(Debug, Error)]
pub enum HostError {
    /// The document could not be opened
    #[error("Failed to open document {}: {message}", path.display())]
    OpenFailed { path: PathBuf, message: String },

    /// The document could not be closed
    #[error("Failed to close document: {0}")]
    CloseFailed(String),

    /// The document refused to start a transaction
    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    /// Commit or rollback failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// The exporter raised while writing a sub-target
    #[error("Exporter failed: {0}")]
    ExportFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for IfcBatchError {
    fn from(err: std::io::Error) -> Self {
        IfcBatchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for IfcBatchError {
    fn from(err: serde_json::Error) -> Self {
        IfcBatchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for IfcBatchError {
    fn from(err: toml::de::Error) -> Self {
        IfcBatchError::Configuration(format!("TOML parse error: {err}"))
    }
}
