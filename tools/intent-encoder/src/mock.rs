//! Recording transport for offline use and tests.

use std::sync::{Mutex, PoisonError};

use alloy_primitives::{keccak256, B256};
use async_trait::async_trait;

use crate::dispatch::{ModuleTransaction, ModuleTransport};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MockTransportError(pub String);

/// Transport that records module transactions instead of sending them.
///
/// The returned handle is `keccak256(data)` so identical submissions yield identical handles.
#[derive(Debug, Default)]
pub struct MockTransport {
    submitted: Mutex<Vec<ModuleTransaction>>,
    failure: Option<String>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every submission fails with `reason`, after being recorded.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            submitted: Mutex::default(),
            failure: Some(reason.into()),
        }
    }

    pub fn submitted(&self) -> Vec<ModuleTransaction> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ModuleTransport for MockTransport {
    type Receipt = B256;
    type Error = MockTransportError;

    async fn submit(&self, tx: ModuleTransaction) -> Result<B256, MockTransportError> {
        let handle = keccak256(&tx.data);
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        match &self.failure {
            Some(reason) => Err(MockTransportError(reason.clone())),
            None => Ok(handle),
        }
    }
}
