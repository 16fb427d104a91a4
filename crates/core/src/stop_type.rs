// SPDX-License-Identifier: MIT

//! Stop-type enumeration: how a sandboxed execution ended.
//!
//! The launcher script inside the container prints exactly one sentinel
//! line naming the stop type, in addition to its real exit code. The
//! classifier (see `codebox_sandbox::classifier`) turns that sentinel back
//! into a `StopType`; this module only owns the enum, its numeric
//! `stop_code`, and the sentinel text each variant corresponds to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a sandboxed execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopType {
    /// User code returned success (sentinel / exit 0).
    Normal,
    /// Orderly agent-requested stop (sentinel / exit 8).
    Agent,
    /// User-requested stop (sentinel / exit 9).
    Manual,
    /// Any other nonzero exit.
    Error,
    /// Wall-clock deadline exceeded; no sentinel, forced kill.
    Timeout,
}

impl StopType {
    /// The fixed order in which sentinels are searched for in captured
    /// output. The first one found wins, matching the launcher script's
    /// `if/elif` chain.
    pub const SEARCH_ORDER: [StopType; 4] =
        [StopType::Normal, StopType::Agent, StopType::Manual, StopType::Error];

    /// The sentinel substring the launcher script prints for this stop
    /// type. `Timeout` has none — it is never produced by the script.
    pub fn sentinel(self) -> Option<&'static str> {
        match self {
            StopType::Normal => Some("[SANDBOX_RUN_ENDS_WITH_NORMAL]"),
            StopType::Agent => Some("[SANDBOX_RUN_ENDS_WITH_AGENT]"),
            StopType::Manual => Some("[SANDBOX_RUN_ENDS_WITH_MANUAL]"),
            StopType::Error => Some("[SANDBOX_RUN_ENDS_WITH_ERROR]"),
            StopType::Timeout => None,
        }
    }

    /// All sentinel strings any stop type may print, for blanket stripping
    /// on the timeout path.
    pub fn all_sentinels() -> [&'static str; 4] {
        [
            "[SANDBOX_RUN_ENDS_WITH_NORMAL]",
            "[SANDBOX_RUN_ENDS_WITH_AGENT]",
            "[SANDBOX_RUN_ENDS_WITH_MANUAL]",
            "[SANDBOX_RUN_ENDS_WITH_ERROR]",
        ]
    }

    /// Numeric `stop_code` returned to the caller alongside the output.
    pub fn stop_code(self) -> i32 {
        match self {
            StopType::Normal => 0,
            StopType::Agent => 8,
            StopType::Manual => 9,
            StopType::Error => 1,
            StopType::Timeout => 2,
        }
    }

    /// Whether this stop type counts as a successful execution.
    /// `Agent` counts as success: it is an orderly, agent-requested stop.
    pub fn is_success(self) -> bool {
        matches!(self, StopType::Normal | StopType::Agent)
    }
}

impl fmt::Display for StopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopType::Normal => "normal",
            StopType::Agent => "agent",
            StopType::Manual => "manual",
            StopType::Error => "error",
            StopType::Timeout => "timeout",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "stop_type_tests.rs"]
mod tests;
