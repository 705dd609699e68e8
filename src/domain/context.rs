//! Error context for host and I/O results
//!
//! ```rust
//! use ifcbatch::domain::Result;
//! use ifcbatch::domain::context::ResultExt;
//!
//! fn read_ifc(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).context(format!("Reading {path}"))
//! }
//! ```

use crate::domain::errors::IfcBatchError;
use crate::domain::result::Result;
use std::fmt::Display;

/// Prefixes the error of a `Result` with what was being attempted
pub trait ResultExt<T> {
    fn context(self, context: impl Display) -> Result<T>;
}

impl<T, E: Into<IfcBatchError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Display) -> Result<T> {
        self.map_err(|e| IfcBatchError::Other(format!("{context}: {}", e.into())))
    }
}
