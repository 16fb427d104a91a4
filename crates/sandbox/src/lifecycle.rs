// SPDX-License-Identifier: MIT

//! Container Lifecycle Manager: orchestrates the full submit flow from a
//! code submission to a returned `(display_output, stop_code)` pair. See
//! spec §4.5 — the core component this subsystem exists to provide.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use codebox_core::{ChatKey, Clock, ExecutionRecord, StopType, TriggeringMessage};

use crate::admission::AdmissionController;
use crate::classifier::{self, Classification};
use crate::config::SandboxConfig;
use crate::container::{ContainerEngine, ContainerSpec};
use crate::error::SandboxError;
use crate::idle_gc;
use crate::preamble::{self, API_CALLER_FILENAME, RUN_SCRIPT_FILENAME};
use crate::registry::{ContainerHandle, SessionRegistry};
use crate::sink::ExecutionRecordSink;

const LAUNCHER_SCRIPT: &str = r#"
rm -f /app/run_script.py &&
cp /app/shared/run_script.py.code /app/run_script.py &&
cp /app/shared/api_caller.py.code /app/api_caller.py &&
export MPLCONFIGDIR=/app/tmp/matplotlib &&
python run_script.py
exit_code=$?
case $exit_code in
  0) echo "[SANDBOX_RUN_ENDS_WITH_NORMAL]";;
  8) echo "[SANDBOX_RUN_ENDS_WITH_AGENT]";;
  9) echo "[SANDBOX_RUN_ENDS_WITH_MANUAL]";;
  *) echo "[SANDBOX_RUN_ENDS_WITH_ERROR]";;
esac
"#;

/// A single code submission's inputs, gathered ahead of time by the
/// caller (e.g. from an incoming chat message).
pub struct SubmitRequest {
    pub chat_key: ChatKey,
    pub code_text: String,
    pub thought_chain: String,
    pub output_limit: usize,
    pub generation_time_ms: u64,
    pub trigger: Option<TriggeringMessage>,
}

/// The result returned to the caller: what to show, and the raw process
/// exit code convention (§3's `stop_code`).
pub struct SubmitOutcome {
    pub display_output: String,
    pub stop_code: i32,
}

pub struct ContainerLifecycleManager<C, E> {
    clock: Arc<C>,
    engine: Arc<E>,
    registry: Arc<SessionRegistry>,
    admission: AdmissionController,
    sink: Arc<dyn ExecutionRecordSink>,
    config: SandboxConfig,
}

impl<C, E> ContainerLifecycleManager<C, E>
where
    C: Clock + Send + Sync + 'static,
    E: ContainerEngine + 'static,
{
    pub fn new(
        clock: Arc<C>,
        engine: Arc<E>,
        registry: Arc<SessionRegistry>,
        admission: AdmissionController,
        sink: Arc<dyn ExecutionRecordSink>,
        config: SandboxConfig,
    ) -> Self {
        Self { clock, engine, registry, admission, sink, config }
    }

    /// Run one submission to completion. Fails only when the engine
    /// refuses to launch the container at all (§7 `SandboxLaunchFailed`);
    /// no registry slot is claimed and no record is persisted in that
    /// case. Every other failure mode (timeout, nonzero exit, teardown
    /// errors) is reported through a successful `SubmitOutcome`.
    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmitOutcome, SandboxError> {
        let _permit = self.admission.acquire().await;
        let start = self.clock.now();

        let container_key = format!("sandbox_{}", request.chat_key.as_str());
        let container_name =
            format!("nekro-agent-sandbox-{container_key}-{}", random_hex(4));

        let shared_dir = self.config.shared_host_dir.join(&container_key);
        self.prepare_share_directory(&shared_dir, &request, &container_key).await.map_err(|err| {
            tracing::error!(chat_key = %request.chat_key, error = %err, "failed to prepare share directory");
            SandboxError::SharePrep(err)
        })?;

        self.replace_prior_slot(&request.chat_key).await;

        let upload_dir = self.config.upload_host_dir.join(request.chat_key.as_str());
        let spec = ContainerSpec {
            name: container_name.clone(),
            image: self.config.image_name.clone(),
            command: vec!["bash".to_string(), "-c".to_string(), LAUNCHER_SCRIPT.trim().to_string()],
            binds: vec![
                (shared_dir.clone(), "/app/shared".to_string(), false),
                (upload_dir, "/app/uploads".to_string(), true),
            ],
            memory_bytes: 512 * 1024 * 1024,
            nano_cpus: 1_000_000_000,
            user: "nobody".to_string(),
            network_host_gateway: true,
            apparmor_unconfined: !self.config.run_in_docker,
            auto_remove: true,
        };

        let container_id = self.engine.run(&spec).await.map_err(|err| {
            tracing::error!(chat_key = %request.chat_key, error = %err, "failed to launch sandbox container");
            SandboxError::LaunchFailed(err.to_string())
        })?;
        self.registry.insert(
            request.chat_key.clone(),
            ContainerHandle { container_id: container_id.clone(), container_name: container_name.clone() },
            self.clock.epoch_ms(),
        );

        let timeout = Duration::from_secs(self.config.running_timeout_secs);
        let classification = self.run_to_completion(&container_id, timeout).await;

        let exec_time_ms = self.clock.now().duration_since(start).as_millis() as u64;

        let record = ExecutionRecord::new(
            request.chat_key.clone(),
            request.code_text,
            request.thought_chain,
            classification.output.clone(),
            classification.stop_type,
            exec_time_ms,
            request.generation_time_ms,
            request.trigger.as_ref(),
        );
        if let Err(err) = self.sink.record(record).await {
            tracing::error!(chat_key = %request.chat_key, error = %err, "failed to persist execution record");
        }

        let activity_ms = self.clock.epoch_ms();
        self.registry.insert(
            request.chat_key.clone(),
            ContainerHandle { container_id: container_id.clone(), container_name },
            activity_ms,
        );
        let cleanup_task = idle_gc::spawn_idle_cleanup(
            self.registry.clone(),
            self.engine.clone(),
            request.chat_key.clone(),
            container_id,
            shared_dir,
            activity_ms,
        );
        self.registry.set_cleanup_task(request.chat_key, cleanup_task);

        let display_output = truncate_for_display(&classification.output, request.output_limit);
        Ok(SubmitOutcome { display_output, stop_code: classification.stop_type.stop_code() })
    }

    async fn prepare_share_directory(
        &self,
        shared_dir: &Path,
        request: &SubmitRequest,
        container_key: &str,
    ) -> std::io::Result<()> {
        tokio::fs::create_dir_all(shared_dir).await?;

        let api_caller = preamble::render_api_caller(container_key, request.chat_key.as_str());
        tokio::fs::write(shared_dir.join(API_CALLER_FILENAME), api_caller).await?;

        let run_script = preamble::render_run_script(&request.code_text);
        tokio::fs::write(shared_dir.join(RUN_SCRIPT_FILENAME), run_script).await?;

        if let Err(err) = set_world_rwx(shared_dir).await {
            tracing::error!(error = %err, dir = %shared_dir.display(), "failed to chmod share directory");
        }
        Ok(())
    }

    async fn replace_prior_slot(&self, chat_key: &ChatKey) {
        if let Some(prior) = self.registry.take_for_replacement(chat_key) {
            if let Err(err) = self.engine.delete(&prior.container_id).await {
                tracing::error!(%chat_key, error = %err, "failed to delete prior sandbox container");
            }
        }
    }

    async fn run_to_completion(&self, container_id: &str, timeout: Duration) -> Classification {
        match self.engine.wait(container_id, timeout).await {
            Ok(Some(_exit_code)) => {
                let raw_output = self.engine.logs(container_id).await.unwrap_or_default();
                if let Err(err) = self.engine.delete(container_id).await {
                    tracing::warn!(error = %err, "failed to delete completed container");
                }
                classifier::classify(&raw_output)
            }
            Ok(None) => {
                let mut raw_output = self.engine.logs(container_id).await.unwrap_or_default();
                raw_output.push_str(&format!(
                    "\n# This container has been killed because it exceeded the {} seconds limit.",
                    timeout.as_secs()
                ));
                if let Err(err) = self.engine.kill(container_id).await {
                    tracing::warn!(error = %err, "failed to kill timed-out container");
                }
                if let Err(err) = self.engine.delete(container_id).await {
                    tracing::warn!(error = %err, "failed to delete timed-out container");
                }
                Classification {
                    stop_type: StopType::Timeout,
                    output: classifier::strip_all_sentinels(&raw_output),
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to wait on sandbox container");
                Classification { stop_type: StopType::Error, output: String::new() }
            }
        }
    }
}

async fn set_world_rwx(dir: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o777);
        tokio::fs::set_permissions(dir, perms).await
    }
    #[cfg(not(unix))]
    {
        let _ = dir;
        Ok(())
    }
}

fn random_hex(bytes: usize) -> String {
    let uuid = uuid::Uuid::new_v4();
    uuid.simple().to_string()[..bytes * 2].to_string()
}

/// Truncation law (P5): output at or under the limit is returned as-is;
/// beyond it, a header reports how many characters were hidden and only
/// the trailing `output_limit` characters are kept.
fn truncate_for_display(output: &str, output_limit: usize) -> String {
    let char_count = output.chars().count();
    if char_count <= output_limit {
        return output.to_string();
    }
    let hidden = char_count - output_limit;
    let tail: String = output.chars().skip(hidden).collect();
    format!("(output too long, hidden {hidden} characters)...{tail}")
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
