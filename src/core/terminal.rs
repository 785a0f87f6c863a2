//! Terminal trait and lifecycle helpers.

use std::io;
use std::time::Duration;

/// Minimal terminal interface for full-screen, raw-mode programs.
pub trait Terminal {
    /// Enter raw mode and hide the cursor.
    fn start(&mut self) -> io::Result<()>;

    /// Leave raw mode and show the cursor. Safe to call more than once.
    fn stop(&mut self) -> io::Result<()>;

    /// Wait up to `timeout` for input; `Ok(None)` when nothing arrived.
    fn read_input(&mut self, timeout: Duration) -> io::Result<Option<String>>;

    /// Write output to the terminal.
    fn write(&mut self, data: &str) -> io::Result<()>;

    /// Terminal dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
}

/// RAII guard that starts the terminal and stops it again on drop, including during unwinding.
pub struct TerminalGuard<T: Terminal> {
    terminal: T,
}

impl<T: Terminal> TerminalGuard<T> {
    pub fn start(mut terminal: T) -> io::Result<Self> {
        terminal.start()?;
        Ok(Self { terminal })
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }
}

impl<T: Terminal> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        let _ = self.terminal.stop();
    }
}
