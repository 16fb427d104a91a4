// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn normal_exit_is_classified_and_sentinel_stripped() {
    let result = classify("hi\n[SANDBOX_RUN_ENDS_WITH_NORMAL]\n");
    assert_eq!(result.stop_type, StopType::Normal);
    assert_eq!(result.output, "hi");
}

#[test]
fn agent_sentinel_classified_as_agent() {
    let result = classify("[SANDBOX_RUN_ENDS_WITH_AGENT]");
    assert_eq!(result.stop_type, StopType::Agent);
    assert_eq!(result.output, "");
}

#[test]
fn manual_sentinel_classified_as_manual() {
    let result = classify("doing work\n[SANDBOX_RUN_ENDS_WITH_MANUAL]");
    assert_eq!(result.stop_type, StopType::Manual);
    assert_eq!(result.output, "doing work");
}

#[test]
fn error_sentinel_classified_as_error() {
    let result = classify("Traceback...\n[SANDBOX_RUN_ENDS_WITH_ERROR]");
    assert_eq!(result.stop_type, StopType::Error);
    assert_eq!(result.output, "Traceback...");
}

#[test]
fn missing_sentinel_falls_back_to_error_with_output_unchanged() {
    let result = classify("no sentinel here");
    assert_eq!(result.stop_type, StopType::Error);
    assert_eq!(result.output, "no sentinel here");
}

#[test]
fn search_order_wins_on_first_match_even_if_multiple_present() {
    // Pathological output containing two sentinels: Normal comes first in
    // the fixed search order and wins regardless of string position.
    let result = classify("[SANDBOX_RUN_ENDS_WITH_ERROR][SANDBOX_RUN_ENDS_WITH_NORMAL]");
    assert_eq!(result.stop_type, StopType::Normal);
}

#[test]
fn strip_all_sentinels_removes_every_known_marker() {
    let raw = "partial output\n[SANDBOX_RUN_ENDS_WITH_NORMAL]\n# killed";
    let stripped = strip_all_sentinels(raw);
    assert!(!stripped.contains("SANDBOX_RUN_ENDS_WITH"));
    assert!(stripped.contains("partial output"));
    assert!(stripped.contains("# killed"));
}

#[test]
fn result_never_contains_sentinels_property_p3() {
    for raw in [
        "x[SANDBOX_RUN_ENDS_WITH_NORMAL]",
        "y[SANDBOX_RUN_ENDS_WITH_AGENT]",
        "z[SANDBOX_RUN_ENDS_WITH_MANUAL]",
        "w[SANDBOX_RUN_ENDS_WITH_ERROR]",
    ] {
        let result = classify(raw);
        for sentinel in StopType::all_sentinels() {
            assert!(!result.output.contains(sentinel));
        }
    }
}
