// SPDX-License-Identifier: MIT

//! Per-session registry: the three maps tracking live container handles,
//! pending idle-cleanup tasks, and last-activity timestamps, keyed by
//! chat_key. See spec §4.4 (data model) and invariants I1/I2.

use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::task::JoinHandle;

use codebox_core::ChatKey;

/// A live container handle as tracked by the registry. Opaque to the
/// registry itself; the lifecycle manager and container engine agree on
/// its meaning.
#[derive(Debug, Clone)]
pub struct ContainerHandle {
    pub container_id: String,
    pub container_name: String,
}

/// Tracks, per chat_key: the live container handle (if any), the handle
/// to its pending idle-cleanup task (if any), and the timestamp that
/// task was scheduled against.
///
/// All three maps are guarded independently, matching the registry's role
/// as bookkeeping rather than a transactional store — callers that need
/// atomicity across maps (the replace-slot sequence) take the locks in a
/// fixed order via `take_for_replacement`.
pub struct SessionRegistry {
    containers: Mutex<HashMap<ChatKey, ContainerHandle>>,
    cleanup_tasks: Mutex<HashMap<ChatKey, JoinHandle<()>>>,
    last_activity_ms: Mutex<HashMap<ChatKey, u64>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            containers: Mutex::new(HashMap::new()),
            cleanup_tasks: Mutex::new(HashMap::new()),
            last_activity_ms: Mutex::new(HashMap::new()),
        }
    }

    /// Tear down any prior slot for `chat_key` before a new container is
    /// launched: cancel its pending cleanup task first, then remove (and
    /// return) its container handle so the caller can delete it. This
    /// ordering matters — cancelling the cleanup task first means it can
    /// never race the caller's own deletion of the same container.
    pub fn take_for_replacement(&self, chat_key: &ChatKey) -> Option<ContainerHandle> {
        if let Some(task) = self.cleanup_tasks.lock().remove(chat_key) {
            task.abort();
        }
        self.last_activity_ms.lock().remove(chat_key);
        self.containers.lock().remove(chat_key)
    }

    /// Record the freshly launched container and its activity timestamp.
    /// Enforces I1 (at most one live container per chat_key) by construction:
    /// callers must have already called `take_for_replacement`.
    pub fn insert(&self, chat_key: ChatKey, handle: ContainerHandle, activity_ms: u64) {
        self.containers.lock().insert(chat_key.clone(), handle);
        self.last_activity_ms.lock().insert(chat_key, activity_ms);
    }

    /// Register the idle-cleanup task spawned for `chat_key`. Enforces I2
    /// (at most one pending cleanup task per chat_key) by construction:
    /// replacing a slot always goes through `take_for_replacement` first.
    pub fn set_cleanup_task(&self, chat_key: ChatKey, task: JoinHandle<()>) {
        self.cleanup_tasks.lock().insert(chat_key, task);
    }

    pub fn container(&self, chat_key: &ChatKey) -> Option<ContainerHandle> {
        self.containers.lock().get(chat_key).cloned()
    }

    pub fn last_activity_ms(&self, chat_key: &ChatKey) -> Option<u64> {
        self.last_activity_ms.lock().get(chat_key).copied()
    }

    /// True if `activity_ms` is still the most recent activity recorded
    /// for `chat_key` — the no-op-on-supersede check the idle GC makes
    /// before acting (P7).
    pub fn is_current_activity(&self, chat_key: &ChatKey, activity_ms: u64) -> bool {
        self.last_activity_ms.lock().get(chat_key) == Some(&activity_ms)
    }

    /// Remove a chat_key's container and activity record unconditionally,
    /// without touching its cleanup task slot. Used by the idle GC once it
    /// has confirmed its own task is still current.
    pub fn remove_container(&self, chat_key: &ChatKey) -> Option<ContainerHandle> {
        self.last_activity_ms.lock().remove(chat_key);
        self.containers.lock().remove(chat_key)
    }

    /// Snapshot of every chat_key with a live container, for orphan
    /// sweeps and diagnostics.
    pub fn live_chat_keys(&self) -> Vec<ChatKey> {
        self.containers.lock().keys().cloned().collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
