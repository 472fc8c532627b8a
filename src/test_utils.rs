//! Shared test utilities for the packager crate.

use crate::error::Result;
use crate::installer::CommandExecutor;
use std::cell::RefCell;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates a successful command `Output` with empty stdout and stderr.
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// One recorded command invocation.
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// The program that was invoked.
    pub cmd: String,
    /// The arguments it received.
    pub args: Vec<String>,
    /// The environment overrides it received.
    pub env: Vec<(String, String)>,
    /// Content of the staged manifest, captured at invocation time because
    /// the temp file does not outlive the call.
    pub manifest_body: Option<String>,
}

/// A `CommandExecutor` that records every invocation and returns a fixed
/// response, allowing tests to verify backend dispatch without side effects.
#[derive(Debug)]
pub struct RecordingExecutor {
    response: Output,
    calls: RefCell<Vec<CallRecord>>,
}

impl RecordingExecutor {
    /// Creates a recorder that answers every call with `response`.
    pub fn new(response: Output) -> Self {
        Self {
            response,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// The invocations recorded so far.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn run(&self, cmd: &str, args: &[String], env: &[(String, String)]) -> Result<Output> {
        let manifest_body = args
            .iter()
            .position(|arg| arg == "--manifest")
            .and_then(|index| args.get(index + 1))
            .and_then(|path| std::fs::read_to_string(path).ok());

        self.calls.borrow_mut().push(CallRecord {
            cmd: cmd.to_owned(),
            args: args.to_vec(),
            env: env.to_vec(),
            manifest_body,
        });
        Ok(Output {
            status: self.response.status,
            stdout: self.response.stdout.clone(),
            stderr: self.response.stderr.clone(),
        })
    }
}
