// SPDX-License-Identifier: MIT

//! Fixed-capacity, platform-wide admission gate for concurrent executions.
//! See spec §4.4.

use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};

/// Gates concurrent sandbox executions at `SANDBOX_MAX_CONCURRENT`.
///
/// `tokio::sync::Semaphore` is FIFO-fair among waiters and has no
/// acquisition timeout, matching spec §4.4 exactly.
#[derive(Clone)]
pub struct AdmissionController {
    semaphore: Arc<Semaphore>,
}

impl AdmissionController {
    pub fn new(max_concurrent: usize) -> Self {
        Self { semaphore: Arc::new(Semaphore::new(max_concurrent)) }
    }

    /// Acquire a permit, holding it for the entire execution. Cancelling
    /// the future before it resolves simply drops out of the wait queue.
    pub async fn acquire(&self) -> AdmissionPermit<'_> {
        // unwrap_used is denied; the semaphore is never closed, so this
        // can only fail if `close()` were called, which this type never
        // exposes.
        let permit = self.semaphore.acquire().await.unwrap_or_else(|_| {
            unreachable!("AdmissionController never closes its semaphore")
        });
        AdmissionPermit { _permit: permit }
    }

    /// Permits currently available, for diagnostics/tests only.
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// RAII guard: dropping it releases the admission slot.
pub struct AdmissionPermit<'a> {
    _permit: SemaphorePermit<'a>,
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod tests;
