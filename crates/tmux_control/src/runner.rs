use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::trace;
use wait_timeout::ChildExt;

use crate::error::MuxError;

/// Upper bound on any single multiplexer call.
pub const DEFAULT_TMUX_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs one multiplexer invocation and returns its stdout.
pub trait TmuxRunner {
    fn run(&mut self, args: &[&str]) -> Result<String, MuxError>;
}

/// Spawns the real `tmux` binary with a bounded wait.
#[derive(Debug, Clone)]
pub struct SystemTmux {
    program: String,
    timeout: Duration,
}

impl SystemTmux {
    pub fn new() -> Self {
        Self::with_program("tmux")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TMUX_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut command = self.program.clone();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}

impl Default for SystemTmux {
    fn default() -> Self {
        Self::new()
    }
}

impl TmuxRunner for SystemTmux {
    fn run(&mut self, args: &[&str]) -> Result<String, MuxError> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| MuxError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let status = wait_bounded(&mut child, self.timeout).map_err(|err| match err {
            WaitError::TimedOut => MuxError::Timeout {
                command: self.describe(args),
                timeout: self.timeout,
            },
            WaitError::Io(source) => MuxError::Wait {
                command: self.describe(args),
                source,
            },
        })?;

        let stdout = read_pipe(child.stdout.take());
        let stderr = read_pipe(child.stderr.take());
        trace!(target: "tmux_control", command = %self.describe(args), %status, "tmux finished");

        if !status.success() {
            return Err(MuxError::Failed {
                command: self.describe(args),
                status: format_exit_status(status),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(stdout)
    }
}

enum WaitError {
    TimedOut,
    Io(std::io::Error),
}

fn wait_bounded(child: &mut Child, timeout: Duration) -> Result<ExitStatus, WaitError> {
    match child.wait_timeout(timeout) {
        Ok(Some(status)) => Ok(status),
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            Err(WaitError::TimedOut)
        }
        Err(error) => {
            let _ = child.kill();
            Err(WaitError::Io(error))
        }
    }
}

fn read_pipe(pipe: Option<impl Read>) -> String {
    let mut bytes = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut bytes);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn format_exit_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit_code={code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Runner that records every invocation instead of spawning anything.
///
/// Calls whose arguments contain one of the configured failure markers return a timeout error,
/// so callers can exercise their failure paths.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    fail_on: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call that has `marker` among its arguments. May be chained.
    pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_on.push(marker.into());
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        lock_unpoisoned(&self.calls).clone()
    }
}

impl TmuxRunner for RecordingRunner {
    fn run(&mut self, args: &[&str]) -> Result<String, MuxError> {
        lock_unpoisoned(&self.calls).push(args.iter().map(|arg| arg.to_string()).collect());
        let failing = self
            .fail_on
            .iter()
            .any(|marker| args.iter().any(|arg| arg == marker));
        if failing {
            return Err(MuxError::Timeout {
                command: format!("tmux {}", args.join(" ")),
                timeout: DEFAULT_TMUX_TIMEOUT,
            });
        }
        Ok(String::new())
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
