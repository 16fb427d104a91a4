// SPDX-License-Identifier: MIT

//! The persistence contract the lifecycle manager writes completed
//! executions through. See spec §6 (External Interfaces): a dependency
//! the subsystem owns but does not implement storage for — the concrete
//! implementation lives in the storage crate.

use async_trait::async_trait;
use codebox_core::ExecutionRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to persist execution record: {0}")]
    Write(String),
}

#[async_trait]
pub trait ExecutionRecordSink: Send + Sync {
    async fn record(&self, record: ExecutionRecord) -> Result<(), SinkError>;
}

/// Sink that discards every record. Useful as a default when no
/// persistence backend is wired up, and in tests that only care about
/// the lifecycle manager's control flow.
#[derive(Debug, Clone, Default)]
pub struct NullSink;

#[async_trait]
impl ExecutionRecordSink for NullSink {
    async fn record(&self, _record: ExecutionRecord) -> Result<(), SinkError> {
        Ok(())
    }
}
