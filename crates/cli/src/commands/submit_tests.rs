// SPDX-License-Identifier: MIT

use super::*;

fn args_with_file(path: Option<std::path::PathBuf>) -> SubmitArgs {
    SubmitArgs {
        chat_key: "g1".to_string(),
        code_file: path,
        thought_chain: String::new(),
        output_limit: 1000,
        generation_time_ms: 0,
        record_log: None,
    }
}

#[test]
fn read_code_reads_from_file_when_given() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("code.py");
    std::fs::write(&path, "print('hi')").unwrap();

    let code = read_code(&args_with_file(Some(path))).unwrap();
    assert_eq!(code, "print('hi')");
}

#[test]
fn read_code_reports_missing_file() {
    let args = args_with_file(Some(std::path::PathBuf::from("/does/not/exist.py")));
    assert!(read_code(&args).is_err());
}
