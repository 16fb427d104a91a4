// SPDX-License-Identifier: MIT

//! `codebox submit`: reads code, runs it through the full sandbox submit
//! pipeline, and prints the classified output and stop code.

use std::io::Read;
use std::sync::Arc;

use codebox_core::{ChatKey, SystemClock};
use codebox_sandbox::admission::AdmissionController;
use codebox_sandbox::config::SandboxConfig;
use codebox_sandbox::container::docker::DockerContainerEngine;
use codebox_sandbox::lifecycle::{ContainerLifecycleManager, SubmitRequest};
use codebox_sandbox::registry::SessionRegistry;
use codebox_storage::JsonlExecutionSink;

use crate::cli::SubmitArgs;
use crate::exit_error::ExitError;

pub async fn run(
    args: SubmitArgs,
    config: Arc<SandboxConfig>,
    engine: Arc<DockerContainerEngine>,
) -> Result<i32, ExitError> {
    let code_text = read_code(&args)?;

    let record_log = args
        .record_log
        .unwrap_or_else(|| config.shared_host_dir.join("executions.jsonl"));
    let sink = Arc::new(JsonlExecutionSink::open(record_log).await?);

    let registry = Arc::new(SessionRegistry::new());
    let admission = AdmissionController::new(config.max_concurrent);
    let clock = Arc::new(SystemClock);

    let manager = ContainerLifecycleManager::new(
        clock,
        engine,
        registry,
        admission,
        sink,
        (*config).clone(),
    );

    let request = SubmitRequest {
        chat_key: ChatKey::new(args.chat_key),
        code_text,
        thought_chain: args.thought_chain,
        output_limit: args.output_limit,
        generation_time_ms: args.generation_time_ms,
        trigger: None,
    };

    let outcome = manager
        .submit(request)
        .await
        .map_err(|err| ExitError::new(1, format!("sandbox launch failed: {err}")))?;

    println!("{}", outcome.display_output);
    Ok(outcome.stop_code)
}

fn read_code(args: &SubmitArgs) -> Result<String, ExitError> {
    match &args.code_file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ExitError::new(1, format!("failed to read stdin: {e}")))?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
