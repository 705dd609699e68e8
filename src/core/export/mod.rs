//! Export orchestration and batch processing
//!
//! - [`batch`] - Multi-unit runner
//! - [`orchestrator`] - Per-unit export loop and run settings
//! - [`transaction`] - Guarded host transactions
//! - [`context`] - Progress, warnings and shutdown signal
//! - [`summary`] - Batch report

pub mod batch;
pub mod context;
pub mod orchestrator;
pub mod summary;
pub mod transaction;

pub use batch::BatchRunner;
pub use context::{ExportContext, ProgressSink, TracingProgress};
pub use orchestrator::{ExportOrchestrator, ExportSettings};
pub use summary::{BatchReport, UnitFailure};
pub use transaction::{probe_transactions, TransactionGuard};
