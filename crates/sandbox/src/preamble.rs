// SPDX-License-Identifier: MIT

//! Generates the two text files dropped into the per-execution share
//! directory before container launch: the fixed preamble prepended to
//! user code, and the generated bridge module. See spec §4.3.

/// Filename for the generated bridge module, as written to the share dir.
pub const API_CALLER_FILENAME: &str = "api_caller.py.code";
/// Filename the preamble + user code is written under in the share dir.
pub const RUN_SCRIPT_FILENAME: &str = "run_script.py.code";

/// Fixed preamble prepended to every submission: imports, exception
/// trapping, and the convention by which user code signals the two
/// distinguished exit codes (8 = Agent, 9 = Manual).
const CODE_PREAMBLE: &str = r#"
import sys
import traceback


def _sandbox_excepthook(exc_type, exc_value, tb):
    traceback.print_exception(exc_type, exc_value, tb)
    sys.exit(1)


sys.excepthook = _sandbox_excepthook


def agent_stop() -> None:
    """Call to end the run as an orderly agent-requested stop (sentinel: Agent)."""
    sys.exit(8)


def manual_stop() -> None:
    """Call to end the run as a user-requested stop (sentinel: Manual)."""
    sys.exit(9)
"#;

/// Render the user code file: the fixed preamble, a blank line, then the
/// submitted code verbatim.
pub fn render_run_script(code_text: &str) -> String {
    format!("{}\n\n{}", CODE_PREAMBLE.trim(), code_text)
}

/// Render the generated bridge module.
///
/// The contract: each stub, when invoked from inside the sandbox,
/// identifies itself with `container_key` (so the host can authorize and
/// attribute the call) and `chat_key` (so the host can route side
/// effects). A fixed set of stubs is generated from a known schema rather
/// than relying on runtime attribute dispatch, per the redesign note in
/// spec §9.
pub fn render_api_caller(container_key: &str, chat_key: &str) -> String {
    format!(
        r#"# Generated bridge module — do not edit.
# container_key={container_key}
# chat_key={chat_key}

import json
import os
import urllib.request

_CONTAINER_KEY = {container_key:?}
_CHAT_KEY = {chat_key:?}
_HOST_BASE_URL = os.environ.get("NEKRO_HOST_BASE_URL", "http://host.docker.internal:8021")


def _call(method: str, *args, **kwargs):
    """Dispatch a single remote-procedure-call stub to the host platform."""
    payload = json.dumps(
        {{
            "container_key": _CONTAINER_KEY,
            "chat_key": _CHAT_KEY,
            "method": method,
            "args": args,
            "kwargs": kwargs,
        }}
    ).encode("utf-8")
    request = urllib.request.Request(
        f"{{_HOST_BASE_URL}}/api/sandbox/rpc",
        data=payload,
        headers={{"Content-Type": "application/json"}},
        method="POST",
    )
    with urllib.request.urlopen(request) as response:
        return json.loads(response.read().decode("utf-8"))


def send_message(text: str):
    return _call("send_message", text)


def upload_file(sandbox_path: str):
    return _call("upload_file", sandbox_path)


def get_preset_info():
    return _call("get_preset_info")


def stop_agent():
    return _call("stop_agent")
"#,
        container_key = container_key,
        chat_key = chat_key,
    )
}

#[cfg(test)]
#[path = "preamble_tests.rs"]
mod tests;
