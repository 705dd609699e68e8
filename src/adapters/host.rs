//! Modeling host collaborator traits
//!
//! The host owns the document object model and the IFC writer. ifcbatch
//! only drives it through these traits, so every host error is reported as a
//! [`HostError`].

use crate::core::options::EffectiveOptions;
use crate::domain::HostError;
use std::path::{Path, PathBuf};

/// Name of the transaction opened and rolled back to detect special documents
pub const PROBE_TRANSACTION: &str = "Test Transaction";

/// Name of the transaction wrapping one export call
pub const EXPORT_TRANSACTION: &str = "IFC Export";

/// Open transaction on a host document
///
/// Exactly one of [`commit`](HostTransaction::commit) or
/// [`rollback`](HostTransaction::rollback) consumes it.
pub trait HostTransaction {
    /// Commit the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the commit.
    fn commit(self: Box<Self>) -> Result<(), HostError>;

    /// Roll the transaction back
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to discard the changes.
    fn rollback(self: Box<Self>) -> Result<(), HostError>;
}

/// Document open in the host
pub trait HostDocument {
    /// Document title as shown by the host
    fn title(&self) -> &str;

    /// Begin a named transaction
    ///
    /// # Errors
    ///
    /// Central models, linked documents and other special documents reject
    /// transactions with [`HostError::TransactionRejected`].
    fn begin_transaction(&self, name: &str) -> Result<Box<dyn HostTransaction>, HostError>;
}

/// Opens and closes documents by path
pub trait DocumentProvider {
    /// Open a document
    ///
    /// # Errors
    ///
    /// Returns [`HostError::OpenFailed`] if the document cannot be loaded.
    fn open(&mut self, path: &Path) -> Result<Box<dyn HostDocument>, HostError>;

    /// Close a document, saving it only if `save_changes` is set
    ///
    /// # Errors
    ///
    /// Returns [`HostError::CloseFailed`] if the host cannot release it.
    fn close(&mut self, document: Box<dyn HostDocument>, save_changes: bool) -> Result<(), HostError>;
}

/// One exporter call
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Output directory, already created
    pub directory: PathBuf,
    /// File name without extension
    pub file_stem: String,
    /// Sub-target (view) display name
    pub target: String,
    pub options: EffectiveOptions,
}

impl ExportRequest {
    /// Path the exporter is expected to write
    pub fn output_path(&self) -> PathBuf {
        self.directory.join(format!("{}.ifc", self.file_stem))
    }
}

/// IFC writer
pub trait Exporter {
    /// Export one sub-target of `document`
    ///
    /// Returns `Ok(false)` when the writer reports failure without raising.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ExportFailed`] if the writer raises.
    fn export(&mut self, document: &dyn HostDocument, request: &ExportRequest) -> Result<bool, HostError>;
}
