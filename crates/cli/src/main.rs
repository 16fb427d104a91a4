// SPDX-License-Identifier: MIT

//! `codebox`: thin binary wiring the sandbox execution subsystem to a
//! command line. See spec §10.7 — the platform's HTTP surface and
//! persona management are out of scope; this binary exists only to drive
//! the Sandbox Execution Subsystem end to end for local use and testing.

mod cli;
mod commands;
mod exit_error;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};

use codebox_sandbox::config::SandboxConfig;
use codebox_sandbox::container::docker::DockerContainerEngine;
use codebox_sandbox::orphan_sweep;

use cli::{Cli, Command};
use exit_error::ExitError;

/// Installs a stdout layer plus a daily-rolling file layer under
/// `CODEBOX_LOG_DIR` (default `./data/logs`), matching the teacher
/// daemon crate's `tracing-appender` dependency. The returned guard must
/// stay alive for the process lifetime — dropping it stops flushing the
/// non-blocking file writer.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_dir = std::env::var("CODEBOX_LOG_DIR").unwrap_or_else(|_| "./data/logs".to_string());
    let file_appender = tracing_appender::rolling::daily(log_dir, "codebox.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_ansi(false).with_writer(non_blocking))
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    let _tracing_guard = init_tracing();
    let cli = Cli::parse();
    let config = Arc::new(SandboxConfig::from_env());
    let engine = Arc::new(DockerContainerEngine::new());

    // The orphan sweeper runs on startup and is raced against Ctrl-C for
    // the duration of the command, so a shutdown mid-submission also
    // sweeps (spec §4.9 / §10.7). `sweep` runs it explicitly itself, so
    // skip the implicit startup pass to avoid doing it twice.
    if !matches!(cli.command, Command::Sweep) {
        let swept = orphan_sweep::sweep_orphans(&engine, &config.image_name).await;
        if swept > 0 {
            tracing::info!(swept, "removed orphaned sandbox containers on startup");
        }
    }

    let work = run(cli, config.clone(), engine.clone());
    tokio::pin!(work);

    tokio::select! {
        result = &mut work => match result {
            Ok(code) => ExitCode::from(code as u8),
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::from(err.code() as u8)
            }
        },
        ctrl_c = tokio::signal::ctrl_c() => {
            if let Err(err) = ctrl_c {
                tracing::error!(error = %err, "failed to listen for ctrl-c");
            }
            tracing::info!("received ctrl-c, sweeping orphaned sandbox containers before exit");
            let swept = orphan_sweep::sweep_orphans(&engine, &config.image_name).await;
            tracing::info!(swept, "swept orphaned sandbox containers on shutdown");
            ExitCode::from(130)
        }
    }
}

async fn run(
    cli: Cli,
    config: Arc<SandboxConfig>,
    engine: Arc<DockerContainerEngine>,
) -> Result<i32, ExitError> {
    match cli.command {
        Command::Submit(args) => commands::submit::run(args, config, engine).await,
        Command::Sweep => commands::sweep::run(config, engine).await,
    }
}
