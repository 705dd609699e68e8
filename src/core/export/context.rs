//! Explicit run context
//!
//! Progress reporting, collected warnings and the shutdown signal travel
//! through an [`ExportContext`] handed down the call chain.

use crate::domain::ExportResult;
use tokio::sync::watch;

/// Receives progress notifications
pub trait ProgressSink {
    fn on_unit_start(&mut self, _unit: &str, _index: usize, _total: usize) {}

    fn on_target_finished(&mut self, _result: &ExportResult) {}

    fn on_warning(&mut self, _message: &str) {}
}

/// Progress sink that logs through `tracing`
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_unit_start(&mut self, unit: &str, index: usize, total: usize) {
        tracing::info!(unit = %unit, position = index + 1, total, "Processing unit");
    }

    fn on_target_finished(&mut self, result: &ExportResult) {
        match result.path() {
            Some(path) => tracing::info!(
                unit = %result.unit,
                target = %result.target,
                path = %path.display(),
                "Target exported"
            ),
            None => tracing::warn!(
                unit = %result.unit,
                target = %result.target,
                reason = result.reason().unwrap_or_default(),
                "Target failed"
            ),
        }
    }

    fn on_warning(&mut self, message: &str) {
        tracing::warn!(message = %message, "Export warning");
    }
}

/// Per-run context
pub struct ExportContext {
    progress: Box<dyn ProgressSink>,
    warnings: Vec<String>,
    shutdown: Option<watch::Receiver<bool>>,
}

impl ExportContext {
    pub fn new(progress: Box<dyn ProgressSink>) -> Self {
        Self {
            progress,
            warnings: Vec::new(),
            shutdown: None,
        }
    }

    /// Attach a shutdown signal checked between units
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn progress(&mut self) -> &mut dyn ProgressSink {
        self.progress.as_mut()
    }

    /// Record a warning and forward it to the progress sink
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.progress.on_warning(&message);
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown.as_ref().is_some_and(|rx| *rx.borrow())
    }
}

impl Default for ExportContext {
    fn default() -> Self {
        Self::new(Box::new(TracingProgress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_are_collected() {
        let mut ctx = ExportContext::default();
        ctx.warn("override file missing");
        assert_eq!(ctx.warnings().to_vec(), vec!["override file missing"]);
        assert_eq!(ctx.take_warnings().len(), 1);
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_shutdown_signal() {
        let (tx, rx) = watch::channel(false);
        let ctx = ExportContext::default().with_shutdown(rx);
        assert!(!ctx.is_shutdown_requested());

        tx.send(true).unwrap();
        assert!(ctx.is_shutdown_requested());
        assert!(!ExportContext::default().is_shutdown_requested());
    }
}
