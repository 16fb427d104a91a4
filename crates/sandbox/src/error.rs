// SPDX-License-Identifier: MIT

//! Error kinds surfaced by the sandbox execution subsystem.
//!
//! Mirrors the error-kind taxonomy of spec §7: routine user-code failures
//! never appear here (they're encoded in `StopType`/`stop_code`), and
//! teardown/cleanup errors never propagate past the module that absorbs
//! them — they're logged with `tracing::warn!` and swallowed.

use thiserror::Error;

/// Errors the Path Mapper can raise.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidPathError {
    #[error("path `{0}` does not contain an `uploads` or `shared` segment")]
    NoLocationMarker(String),
    #[error("path `{0}` resolves under `shared` but no container key was supplied")]
    MissingContainerKey(String),
}

/// Errors that can prevent a container from ever starting.
///
/// Per spec §7, these are the engine-level errors that propagate to the
/// submit caller: no registry slot is claimed and no execution record is
/// persisted. `SharePrep` covers directory-creation and code-file write
/// failures ahead of slot replacement; the chmod step that follows those
/// writes stays log-and-continue, matching spec §4.5 step 2's explicit
/// carve-out ("failure to chmod is logged, not fatal").
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("invalid sandbox path: {0}")]
    InvalidPath(#[from] InvalidPathError),

    #[error("failed to prepare share directory: {0}")]
    SharePrep(#[source] std::io::Error),

    #[error("sandbox launch failed: {0}")]
    LaunchFailed(String),
}
