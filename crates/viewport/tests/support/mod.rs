use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tmux_control::{MuxError, Multiplexer, PaneHandle};
use viewport::{RemoteHost, ViewSettings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuxCall {
    Clear(String),
    Inject(String, String),
    Interrupt(String),
    KillSession(String),
}

/// Records every primitive; optionally fails them all.
#[derive(Clone, Default)]
pub struct RecordingMux {
    calls: Arc<Mutex<Vec<MuxCall>>>,
    failing: bool,
}

impl RecordingMux {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<MuxCall> {
        lock_unpoisoned(&self.calls).clone()
    }

    pub fn take_calls(&self) -> Vec<MuxCall> {
        std::mem::take(&mut *lock_unpoisoned(&self.calls))
    }

    fn record(&self, call: MuxCall) -> Result<(), MuxError> {
        lock_unpoisoned(&self.calls).push(call);
        if self.failing {
            return Err(MuxError::Timeout {
                command: "tmux".to_string(),
                timeout: Duration::from_secs(2),
            });
        }
        Ok(())
    }
}

impl Multiplexer for RecordingMux {
    fn clear(&mut self, pane: &PaneHandle) -> Result<(), MuxError> {
        self.record(MuxCall::Clear(pane.target()))
    }

    fn inject(&mut self, pane: &PaneHandle, command_line: &str) -> Result<(), MuxError> {
        self.record(MuxCall::Inject(pane.target(), command_line.to_string()))
    }

    fn interrupt(&mut self, pane: &PaneHandle) -> Result<(), MuxError> {
        self.record(MuxCall::Interrupt(pane.target()))
    }

    fn kill_session(&mut self, session: &str) -> Result<(), MuxError> {
        self.record(MuxCall::KillSession(session.to_string()))
    }
}

pub const PANE: &str = "desk:0.2";

pub fn settings(runtime_dir: &Path) -> ViewSettings {
    ViewSettings {
        pane: PaneHandle::new("desk", "0", "2"),
        dashboard: "python3 /opt/oopuo/dashboard.py".to_string(),
        logs: "python3 /opt/oopuo/logs.py".to_string(),
        timemachine: "python3 /opt/oopuo/timemachine.py".to_string(),
        settings: "python3 /opt/oopuo/settings.py".to_string(),
        brain: Some(RemoteHost {
            address: "10.0.0.5".to_string(),
            user: "adminuser".to_string(),
            key_path: "/root/oopuo_vault/oopuo_key".to_string(),
        }),
        guard_ct: "100".to_string(),
        runtime_dir: runtime_dir.to_path_buf(),
        disconnect_settle: Duration::ZERO,
    }
}

pub fn clear() -> MuxCall {
    MuxCall::Clear(PANE.to_string())
}

pub fn inject(line: &str) -> MuxCall {
    MuxCall::Inject(PANE.to_string(), line.to_string())
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
