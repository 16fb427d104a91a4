// SPDX-License-Identifier: MIT

//! Docker CLI-backed `ContainerEngine`. Shells out to the `docker` binary
//! rather than talking to the daemon's HTTP API directly, matching the
//! `run_docker` helper pattern used for container lifecycle elsewhere in
//! this codebase.

use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

use super::{ContainerEngine, ContainerError, ContainerSpec};

#[derive(Debug, Clone, Default)]
pub struct DockerContainerEngine;

impl DockerContainerEngine {
    pub fn new() -> Self {
        Self
    }

    fn build_run_args(spec: &ContainerSpec) -> Vec<String> {
        let mut args = vec!["run".to_string(), "-d".to_string(), "--name".to_string(), spec.name.clone()];

        for (host_path, container_path, read_only) in &spec.binds {
            let mode = if *read_only { "ro" } else { "rw" };
            args.push("-v".to_string());
            args.push(format!("{}:{}:{}", host_path.display(), container_path, mode));
        }

        args.push("--memory".to_string());
        args.push(spec.memory_bytes.to_string());
        args.push("--cpus".to_string());
        args.push(format!("{:.2}", spec.nano_cpus as f64 / 1_000_000_000.0));

        if spec.apparmor_unconfined {
            args.push("--security-opt".to_string());
            args.push("apparmor=unconfined".to_string());
        }

        if spec.network_host_gateway {
            args.push("--network".to_string());
            args.push("bridge".to_string());
            args.push("--add-host".to_string());
            args.push("host.docker.internal:host-gateway".to_string());
        }

        args.push("--user".to_string());
        args.push(spec.user.clone());

        if spec.auto_remove {
            args.push("--rm".to_string());
        }

        args.push(spec.image.clone());
        args.extend(spec.command.iter().cloned());
        args
    }

    async fn run_docker(args: &[String]) -> Result<String, String> {
        let output = Command::new("docker")
            .args(args)
            .output()
            .await
            .map_err(|e| format!("failed to exec docker: {e}"))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let subcommand = args.first().map(String::as_str).unwrap_or("");
            Err(format!("docker {subcommand} failed: {}", stderr.trim()))
        }
    }

    fn is_not_found(message: &str) -> bool {
        message.contains("No such container") || message.contains("404")
    }
}

#[async_trait]
impl ContainerEngine for DockerContainerEngine {
    async fn run(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        let args = Self::build_run_args(spec);
        Self::run_docker(&args).await.map_err(ContainerError::LaunchFailed)
    }

    async fn wait(
        &self,
        container_id: &str,
        timeout: Duration,
    ) -> Result<Option<i64>, ContainerError> {
        let wait = Self::run_docker(&["wait".to_string(), container_id.to_string()]);
        match tokio::time::timeout(timeout, wait).await {
            Ok(Ok(code)) => {
                code.trim().parse::<i64>().map(Some).map_err(|e| {
                    ContainerError::WaitFailed(format!("unparsable exit code {code:?}: {e}"))
                })
            }
            Ok(Err(e)) => Err(ContainerError::WaitFailed(e)),
            Err(_) => Ok(None),
        }
    }

    async fn logs(&self, container_id: &str) -> Result<String, ContainerError> {
        Self::run_docker(&["logs".to_string(), container_id.to_string()])
            .await
            .map_err(ContainerError::LogsFailed)
    }

    async fn kill(&self, container_id: &str) -> Result<(), ContainerError> {
        match Self::run_docker(&["kill".to_string(), container_id.to_string()]).await {
            Ok(_) => Ok(()),
            Err(e) if Self::is_not_found(&e) => Ok(()),
            Err(e) => Err(ContainerError::KillFailed(e)),
        }
    }

    async fn delete(&self, container_id: &str) -> Result<(), ContainerError> {
        match Self::run_docker(&[
            "rm".to_string(),
            "-f".to_string(),
            container_id.to_string(),
        ])
        .await
        {
            Ok(_) => Ok(()),
            Err(e) if Self::is_not_found(&e) => Ok(()),
            Err(e) => Err(ContainerError::DeleteFailed(e)),
        }
    }

    async fn list_names(&self) -> Result<Vec<String>, ContainerError> {
        let output = Self::run_docker(&[
            "ps".to_string(),
            "-a".to_string(),
            "--format".to_string(),
            "{{.Names}}".to_string(),
        ])
        .await
        .map_err(ContainerError::ListFailed)?;
        Ok(output.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
