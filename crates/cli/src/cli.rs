// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "codebox", about = "Run untrusted code in a disposable sandbox container")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a code block for sandboxed execution.
    Submit(SubmitArgs),
    /// Sweep any orphaned sandbox containers left behind by a prior run.
    Sweep,
}

#[derive(Debug, Parser)]
pub struct SubmitArgs {
    /// Chat session key the submission belongs to.
    #[arg(long)]
    pub chat_key: String,

    /// Path to a file containing the code to run. Reads stdin if omitted.
    #[arg(long)]
    pub code_file: Option<PathBuf>,

    /// Free-form reasoning trace supplied by the caller, stored alongside
    /// the execution record.
    #[arg(long, default_value = "")]
    pub thought_chain: String,

    /// Maximum number of trailing characters of output to display.
    #[arg(long, default_value_t = 1000)]
    pub output_limit: usize,

    /// Caller-reported cost (in ms) of producing the code, added to
    /// `exec_time_ms` for the persisted `total_time_ms`.
    #[arg(long, default_value_t = 0)]
    pub generation_time_ms: u64,

    /// Path to the JSONL execution record log. Defaults to
    /// `<SANDBOX_SHARED_HOST_DIR>/executions.jsonl`.
    #[arg(long)]
    pub record_log: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
