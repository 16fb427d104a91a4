// SPDX-License-Identifier: MIT

//! Environment-derived configuration for the sandbox subsystem. See
//! spec §6 (External Interfaces) and §10 (configuration).

use std::path::PathBuf;

const DEFAULT_IMAGE_NAME: &str = "kromsais/nekro-agent-sandbox:latest";
const DEFAULT_MAX_CONCURRENT: usize = 4;
const DEFAULT_RUNNING_TIMEOUT_SECS: u64 = 60;

/// Fixed configuration read once at startup from the process environment.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    pub image_name: String,
    pub max_concurrent: usize,
    pub running_timeout_secs: u64,
    pub shared_host_dir: PathBuf,
    pub upload_host_dir: PathBuf,
    pub run_in_docker: bool,
}

impl SandboxConfig {
    /// Build a config from the process environment, substituting the
    /// documented defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            image_name: env_string("SANDBOX_IMAGE_NAME", DEFAULT_IMAGE_NAME),
            max_concurrent: env_parsed("SANDBOX_MAX_CONCURRENT", DEFAULT_MAX_CONCURRENT),
            running_timeout_secs: env_parsed(
                "SANDBOX_RUNNING_TIMEOUT",
                DEFAULT_RUNNING_TIMEOUT_SECS,
            ),
            shared_host_dir: env_path("SANDBOX_SHARED_HOST_DIR", "./data/sandboxes"),
            upload_host_dir: env_path("USER_UPLOAD_DIR", "./data/uploads"),
            run_in_docker: env_bool("RUN_IN_DOCKER"),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok()).unwrap_or(default)
}

/// Any non-empty value other than "0"/"false"/"" counts as set, matching
/// the original's plain truthiness check on the env var's presence.
fn env_bool(key: &str) -> bool {
    match std::env::var(key) {
        Ok(raw) => !matches!(raw.as_str(), "" | "0" | "false"),
        Err(_) => false,
    }
}
