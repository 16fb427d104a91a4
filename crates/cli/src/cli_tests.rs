// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn submit_requires_chat_key() {
    let result = Cli::try_parse_from(["codebox", "submit"]);
    assert!(result.is_err());
}

#[test]
fn submit_parses_defaults() {
    let cli = Cli::try_parse_from(["codebox", "submit", "--chat-key", "g1"]).unwrap();
    let Command::Submit(args) = cli.command else {
        panic!("expected submit command");
    };
    assert_eq!(args.chat_key, "g1");
    assert_eq!(args.output_limit, 1000);
    assert_eq!(args.generation_time_ms, 0);
    assert_eq!(args.thought_chain, "");
    assert!(args.code_file.is_none());
}

#[test]
fn submit_parses_explicit_overrides() {
    let cli = Cli::try_parse_from([
        "codebox",
        "submit",
        "--chat-key",
        "g1",
        "--code-file",
        "/tmp/code.py",
        "--thought-chain",
        "plan: print hi",
        "--output-limit",
        "100",
        "--generation-time-ms",
        "250",
    ])
    .unwrap();
    let Command::Submit(args) = cli.command else {
        panic!("expected submit command");
    };
    assert_eq!(args.code_file, Some(PathBuf::from("/tmp/code.py")));
    assert_eq!(args.thought_chain, "plan: print hi");
    assert_eq!(args.output_limit, 100);
    assert_eq!(args.generation_time_ms, 250);
}

#[test]
fn sweep_takes_no_arguments() {
    let cli = Cli::try_parse_from(["codebox", "sweep"]).unwrap();
    assert!(matches!(cli.command, Command::Sweep));
}
