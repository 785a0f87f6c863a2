use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use command_bus::{BusError, Command};
use navigator::CommandSender;
use oopuo_tui::Terminal;

#[derive(Default)]
pub struct TerminalTrace {
    pub writes: Vec<String>,
    pub reads: usize,
    pub start_calls: usize,
    pub stop_calls: usize,
}

/// Terminal fed from a script of input chunks; once the script runs out it raises `stop_when_idle`.
pub struct ScriptedTerminal {
    state: Arc<Mutex<TerminalTrace>>,
    script: VecDeque<String>,
    stop_when_idle: Option<Arc<AtomicBool>>,
    columns: u16,
    rows: u16,
}

impl ScriptedTerminal {
    pub fn new(columns: u16, rows: u16, script: &[&str]) -> (Self, Arc<Mutex<TerminalTrace>>) {
        let state = Arc::new(Mutex::new(TerminalTrace::default()));
        (
            Self {
                state: Arc::clone(&state),
                script: script.iter().map(|chunk| chunk.to_string()).collect(),
                stop_when_idle: None,
                columns,
                rows,
            },
            state,
        )
    }

    pub fn stop_when_idle(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_when_idle = Some(flag);
        self
    }
}

impl Terminal for ScriptedTerminal {
    fn start(&mut self) -> io::Result<()> {
        lock_unpoisoned(&self.state).start_calls += 1;
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        lock_unpoisoned(&self.state).stop_calls += 1;
        Ok(())
    }

    fn read_input(&mut self, _timeout: Duration) -> io::Result<Option<String>> {
        lock_unpoisoned(&self.state).reads += 1;
        let next = self.script.pop_front();
        if next.is_none() {
            if let Some(flag) = &self.stop_when_idle {
                flag.store(true, Ordering::SeqCst);
            }
        }
        Ok(next)
    }

    fn write(&mut self, data: &str) -> io::Result<()> {
        lock_unpoisoned(&self.state).writes.push(data.to_string());
        Ok(())
    }

    fn columns(&self) -> u16 {
        self.columns
    }

    fn rows(&self) -> u16 {
        self.rows
    }
}

/// Records published commands; optionally rejects them all as if no viewport were listening.
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<Command>>>,
    reject: bool,
}

impl RecordingSender {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Command> {
        lock_unpoisoned(&self.sent).clone()
    }
}

impl CommandSender for RecordingSender {
    fn send(&self, command: Command) -> Result<(), BusError> {
        lock_unpoisoned(&self.sent).push(command);
        if self.reject {
            return Err(BusError::NoReader {
                path: "/tmp/oopuo_cmd".into(),
            });
        }
        Ok(())
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
