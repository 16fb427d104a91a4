// SPDX-License-Identifier: MIT

//! In-memory `ContainerEngine` for exercising the lifecycle manager
//! without a real Docker daemon.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use super::{ContainerEngine, ContainerError, ContainerSpec};

#[derive(Debug, Clone)]
pub struct FakeContainerOutcome {
    pub exit_code: i64,
    pub logs: String,
    /// If set, `wait` never observes the exit and instead times out,
    /// simulating a runaway container.
    pub hangs: bool,
}

#[derive(Default)]
struct State {
    outcomes: HashMap<String, FakeContainerOutcome>,
    default_outcome: Option<FakeContainerOutcome>,
    live: HashMap<String, ContainerSpec>,
    next_id: u64,
    killed: Vec<String>,
    deleted: Vec<String>,
}

/// A scripted container engine: the test pre-registers what each
/// container name should produce, then drives the lifecycle manager
/// against it.
#[derive(Default, Clone)]
pub struct FakeContainerEngine {
    state: std::sync::Arc<Mutex<State>>,
}

impl FakeContainerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for the next container launched under `name`.
    pub fn script(&self, name: &str, outcome: FakeContainerOutcome) {
        self.state.lock().outcomes.insert(name.to_string(), outcome);
    }

    /// Outcome used for any container with no name-specific script —
    /// lets callers exercise the lifecycle manager without predicting
    /// its randomly-suffixed container names.
    pub fn set_default_outcome(&self, outcome: FakeContainerOutcome) {
        self.state.lock().default_outcome = Some(outcome);
    }

    pub fn killed(&self) -> Vec<String> {
        self.state.lock().killed.clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().deleted.clone()
    }

    pub fn is_live(&self, container_id: &str) -> bool {
        self.state.lock().live.contains_key(container_id)
    }
}

#[async_trait]
impl ContainerEngine for FakeContainerEngine {
    async fn run(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = format!("fake-{}", state.next_id);
        state.live.insert(id.clone(), spec.clone());
        Ok(id)
    }

    async fn wait(
        &self,
        container_id: &str,
        timeout: Duration,
    ) -> Result<Option<i64>, ContainerError> {
        let (name, outcome) = {
            let state = self.state.lock();
            let spec = state
                .live
                .get(container_id)
                .ok_or_else(|| ContainerError::WaitFailed(format!("no such container: {container_id}")))?;
            let outcome = state.outcomes.get(&spec.name).cloned().or_else(|| state.default_outcome.clone());
            (spec.name.clone(), outcome)
        };
        let outcome = outcome.ok_or_else(|| {
            ContainerError::WaitFailed(format!("no scripted outcome for container {name}"))
        })?;
        if outcome.hangs {
            tokio::time::sleep(timeout).await;
            return Ok(None);
        }
        Ok(Some(outcome.exit_code))
    }

    async fn logs(&self, container_id: &str) -> Result<String, ContainerError> {
        let state = self.state.lock();
        let spec = state
            .live
            .get(container_id)
            .ok_or_else(|| ContainerError::LogsFailed(format!("no such container: {container_id}")))?;
        let logs = state
            .outcomes
            .get(&spec.name)
            .or(state.default_outcome.as_ref())
            .map(|o| o.logs.clone())
            .unwrap_or_default();
        Ok(logs)
    }

    async fn kill(&self, container_id: &str) -> Result<(), ContainerError> {
        self.state.lock().killed.push(container_id.to_string());
        Ok(())
    }

    async fn delete(&self, container_id_or_name: &str) -> Result<(), ContainerError> {
        let mut state = self.state.lock();
        if state.live.remove(container_id_or_name).is_none() {
            // Real `docker rm` accepts either id or name; the orphan
            // sweeper only ever has names in hand.
            let by_name = state
                .live
                .iter()
                .find(|(_, spec)| spec.name == container_id_or_name)
                .map(|(id, _)| id.clone());
            if let Some(id) = by_name {
                state.live.remove(&id);
            }
        }
        state.deleted.push(container_id_or_name.to_string());
        Ok(())
    }

    async fn list_names(&self) -> Result<Vec<String>, ContainerError> {
        Ok(self.state.lock().live.values().map(|s| s.name.clone()).collect())
    }
}
