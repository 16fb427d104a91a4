// SPDX-License-Identifier: MIT

//! A JSONL-backed `ExecutionRecordSink`: every execution is appended as
//! one versioned JSON object per line. No schema versioning is imposed by
//! the core (spec §6), but the sink stamps one anyway so a future reader
//! can distinguish old and new shapes without guessing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use codebox_core::ExecutionRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use codebox_sandbox::sink::{ExecutionRecordSink, SinkError};

pub const CURRENT_RECORD_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One line of the JSONL execution log.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    #[serde(rename = "v")]
    version: u32,
    #[serde(flatten)]
    record: ExecutionRecord,
}

/// Appends every execution record to a single JSONL file, serializing
/// concurrent writers through an async mutex around the open file handle.
///
/// Opened once at construction and kept open for the sink's lifetime —
/// matches the teacher's pattern of holding the WAL file open rather than
/// reopening per write.
pub struct JsonlExecutionSink {
    path: PathBuf,
    file: Mutex<tokio::fs::File>,
}

impl JsonlExecutionSink {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let file = tokio::fs::OpenOptions::new().create(true).append(true).open(&path).await?;
        Ok(Self { path, file: Mutex::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every record currently on disk, in insertion order. Used
    /// by tests and operator tooling; not on the hot path.
    pub async fn read_all(&self) -> Result<Vec<ExecutionRecord>, StorageError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Ok(serde_json::from_str::<StoredRecord>(line)?.record))
            .collect()
    }
}

#[async_trait]
impl ExecutionRecordSink for JsonlExecutionSink {
    async fn record(&self, record: ExecutionRecord) -> Result<(), SinkError> {
        let chat_key = record.chat_key.clone();
        let stored = StoredRecord { version: CURRENT_RECORD_VERSION, record };

        let mut line = serde_json::to_string(&stored).map_err(|err| {
            tracing::error!(%chat_key, error = %err, "failed to serialize execution record");
            SinkError::Write(err.to_string())
        })?;
        line.push('\n');

        let mut file = self.file.lock().await;
        if let Err(err) = file.write_all(line.as_bytes()).await {
            tracing::error!(%chat_key, path = %self.path.display(), error = %err, "failed to append execution record");
            return Err(SinkError::Write(err.to_string()));
        }
        if let Err(err) = file.flush().await {
            tracing::error!(%chat_key, path = %self.path.display(), error = %err, "failed to flush execution record log");
            return Err(SinkError::Write(err.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "jsonl_sink_tests.rs"]
mod tests;
