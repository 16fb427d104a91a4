// SPDX-License-Identifier: MIT

//! The immutable execution record persisted once per sandboxed run.

use crate::chat_key::ChatKey;
use crate::stop_type::StopType;
use serde::{Deserialize, Serialize};

/// Metadata about the chat message that triggered an execution, when one
/// was supplied. Absent for system-initiated runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeringMessage {
    pub sender_id: i64,
    pub sender_real_nickname: String,
}

/// Immutable record of a single sandboxed execution.
///
/// Written once, after the container has terminated (or been killed on
/// timeout) and its output has been classified. See spec §3 / §4.7.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub chat_key: ChatKey,
    pub code_text: String,
    pub thought_chain: String,
    pub captured_output: String,
    pub success_flag: bool,
    pub stop_type: StopType,
    pub exec_time_ms: u64,
    pub generation_time_ms: u64,
    pub total_time_ms: u64,
    pub trigger_user_id: i64,
    pub trigger_user_name: String,
}

impl ExecutionRecord {
    /// Build a record from the pieces the Lifecycle Manager has in hand at
    /// the end of a run. `trigger` defaults `trigger_user_id` to 0 and
    /// `trigger_user_name` to `"System"` when absent, per spec §3.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chat_key: ChatKey,
        code_text: impl Into<String>,
        thought_chain: impl Into<String>,
        captured_output: impl Into<String>,
        stop_type: StopType,
        exec_time_ms: u64,
        generation_time_ms: u64,
        trigger: Option<&TriggeringMessage>,
    ) -> Self {
        let (trigger_user_id, trigger_user_name) = match trigger {
            Some(msg) => (msg.sender_id, msg.sender_real_nickname.clone()),
            None => (0, "System".to_string()),
        };
        Self {
            chat_key,
            code_text: code_text.into(),
            thought_chain: thought_chain.into(),
            captured_output: captured_output.into(),
            success_flag: stop_type.is_success(),
            stop_type,
            exec_time_ms,
            generation_time_ms,
            total_time_ms: generation_time_ms + exec_time_ms,
            trigger_user_id,
            trigger_user_name,
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
