// SPDX-License-Identifier: MIT

//! Carries a process exit code alongside the error message, so `main`
//! can map failures to a specific code instead of always exiting 1.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExitError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage error: {0}")]
    Storage(#[from] codebox_storage::StorageError),
    #[error("{message}")]
    Other { code: i32, message: String },
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self::Other { code, message: message.into() }
    }

    /// The process exit code this error should map to. `Io`/`Storage`
    /// conversions (via `?`) always land on 1; callers that need a
    /// specific code construct `ExitError::new` directly.
    pub fn code(&self) -> i32 {
        match self {
            ExitError::Io(_) | ExitError::Storage(_) => 1,
            ExitError::Other { code, .. } => *code,
        }
    }
}
