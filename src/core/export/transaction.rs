//! Guarded host transactions

use crate::adapters::host::{HostDocument, HostTransaction, PROBE_TRANSACTION};
use crate::domain::HostError;

/// Transaction that rolls back unless committed
///
/// Every exit path other than [`TransactionGuard::commit`] discards the
/// transaction on drop.
pub struct TransactionGuard {
    name: String,
    transaction: Option<Box<dyn HostTransaction>>,
}

impl TransactionGuard {
    /// Begin a named transaction on `document`
    pub fn begin(document: &dyn HostDocument, name: &str) -> Result<Self, HostError> {
        let transaction = document.begin_transaction(name)?;
        Ok(Self {
            name: name.to_string(),
            transaction: Some(transaction),
        })
    }

    pub fn commit(mut self) -> Result<(), HostError> {
        match self.transaction.take() {
            Some(transaction) => transaction.commit(),
            None => Ok(()),
        }
    }

    pub fn rollback(mut self) -> Result<(), HostError> {
        match self.transaction.take() {
            Some(transaction) => transaction.rollback(),
            None => Ok(()),
        }
    }
}

impl Drop for TransactionGuard {
    fn drop(&mut self) {
        if let Some(transaction) = self.transaction.take() {
            if let Err(e) = transaction.rollback() {
                tracing::warn!(transaction = %self.name, error = %e, "Rollback failed");
            }
        }
    }
}

/// Opens and immediately rolls back a transaction
///
/// Documents that cannot start one (central models, linked files) fail here.
pub fn probe_transactions(document: &dyn HostDocument) -> Result<(), HostError> {
    TransactionGuard::begin(document, PROBE_TRANSACTION)?.rollback()
}
