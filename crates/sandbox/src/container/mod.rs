// SPDX-License-Identifier: MIT

//! Abstraction over container runtime operations, so the lifecycle
//! manager can be tested against a fake engine instead of real Docker.
//! See spec §4.5.

pub mod docker;
#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Everything the lifecycle manager needs to launch a container: already
/// resolved host paths, resource limits, and the launcher command. Mirrors
/// the docker run configuration in spec §4.5.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    /// (host_path, container_path, read_only)
    pub binds: Vec<(PathBuf, String, bool)>,
    pub memory_bytes: u64,
    pub nano_cpus: u64,
    pub user: String,
    pub network_host_gateway: bool,
    pub apparmor_unconfined: bool,
    pub auto_remove: bool,
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("failed to launch container: {0}")]
    LaunchFailed(String),
    #[error("failed to wait on container: {0}")]
    WaitFailed(String),
    #[error("failed to fetch container logs: {0}")]
    LogsFailed(String),
    #[error("failed to kill container: {0}")]
    KillFailed(String),
    #[error("failed to delete container: {0}")]
    DeleteFailed(String),
    #[error("failed to list containers: {0}")]
    ListFailed(String),
}

/// Runtime engine abstraction: create, wait, collect logs, kill, delete,
/// and list containers. A real implementation shells out to the `docker`
/// CLI; a fake implementation exists for tests.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Launch a container per `spec` and return its engine-assigned id.
    async fn run(&self, spec: &ContainerSpec) -> Result<String, ContainerError>;

    /// Block until the container exits, or the deadline elapses —
    /// whichever comes first. `Ok(Some(_))` is the exit code; `Ok(None)`
    /// means the deadline elapsed and the container is still running.
    async fn wait(
        &self,
        container_id: &str,
        timeout: std::time::Duration,
    ) -> Result<Option<i64>, ContainerError>;

    /// Fetch the container's combined stdout/stderr captured so far.
    async fn logs(&self, container_id: &str) -> Result<String, ContainerError>;

    /// Send SIGKILL. Not finding the container is not an error.
    async fn kill(&self, container_id: &str) -> Result<(), ContainerError>;

    /// Remove the container. Not finding the container is not an error —
    /// this matches `AutoRemove` racing an explicit delete.
    async fn delete(&self, container_id: &str) -> Result<(), ContainerError>;

    /// List the names of every container currently known to the engine,
    /// used by the orphan sweeper.
    async fn list_names(&self) -> Result<Vec<String>, ContainerError>;
}
