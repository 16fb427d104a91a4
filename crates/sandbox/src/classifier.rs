// SPDX-License-Identifier: MIT

//! Stop-type classification from captured container output. See spec §4.2.

use codebox_core::StopType;

/// The outcome of classifying a terminated (non-timeout) execution:
/// the stop type found, and the output with the matching sentinel
/// substring removed.
pub struct Classification {
    pub stop_type: StopType,
    pub output: String,
}

/// Search `raw_output` for each sentinel in `StopType::SEARCH_ORDER`, in
/// that order, and on the first match strip it from the output and
/// return its stop type. If none match, the result is `Error` with the
/// output unchanged — this should not happen absent a timeout.
pub fn classify(raw_output: &str) -> Classification {
    for stop_type in StopType::SEARCH_ORDER {
        if let Some(sentinel) = stop_type.sentinel() {
            if let Some(idx) = raw_output.find(sentinel) {
                let mut output = String::with_capacity(raw_output.len() - sentinel.len());
                output.push_str(&raw_output[..idx]);
                output.push_str(&raw_output[idx + sentinel.len()..]);
                return Classification { stop_type, output: output.trim().to_string() };
            }
        }
    }
    Classification { stop_type: StopType::Error, output: raw_output.to_string() }
}

/// Strip every known sentinel from `raw_output` unconditionally. Used on
/// the timeout path, where the classifier itself is not consulted and the
/// caller sets `StopType::Timeout` directly.
pub fn strip_all_sentinels(raw_output: &str) -> String {
    let mut output = raw_output.to_string();
    for sentinel in StopType::all_sentinels() {
        output = output.replace(sentinel, "");
    }
    output.trim().to_string()
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
