// SPDX-License-Identifier: MIT

//! Idle garbage collector: 30 minutes after a container's last activity,
//! remove its shared directory and container if nothing superseded that
//! activity timestamp in the meantime. See spec §4.8 and property P7.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use codebox_core::ChatKey;

use crate::container::ContainerEngine;
use crate::registry::SessionRegistry;

pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Spawn the deferred cleanup task for one submission. `activity_ms` is
/// the activity timestamp this task is scoped to — if by the time it
/// wakes the registry no longer agrees that this is the most recent
/// activity for `chat_key`, the task is a no-op (P7): a newer submission
/// already replaced this container and owns its own cleanup task.
pub fn spawn_idle_cleanup<E>(
    registry: Arc<SessionRegistry>,
    engine: Arc<E>,
    chat_key: ChatKey,
    container_id: String,
    shared_dir: PathBuf,
    activity_ms: u64,
) -> tokio::task::JoinHandle<()>
where
    E: ContainerEngine + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(IDLE_TIMEOUT).await;

        if !registry.is_current_activity(&chat_key, activity_ms) {
            tracing::debug!(%chat_key, "idle cleanup superseded, skipping");
            return;
        }

        if let Err(err) = tokio::fs::remove_dir_all(&shared_dir).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::error!(%chat_key, error = %err, "failed to remove idle shared directory");
            }
        }

        if let Err(err) = engine.delete(&container_id).await {
            tracing::warn!(%chat_key, error = %err, "failed to delete idle container");
        }

        registry.remove_container(&chat_key);
        tracing::debug!(%chat_key, "idle cleanup completed");
    })
}

#[cfg(test)]
#[path = "idle_gc_tests.rs"]
mod tests;
