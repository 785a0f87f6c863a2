use crate::error::MuxError;
use crate::pane::PaneHandle;
use crate::runner::TmuxRunner;

/// Primitives the viewport needs from the terminal multiplexer.
///
/// Every call is expected to return within a bounded time; a slow multiplexer surfaces as an
/// error rather than a hang.
pub trait Multiplexer {
    /// Wipe whatever the pane currently shows.
    fn clear(&mut self, pane: &PaneHandle) -> Result<(), MuxError>;

    /// Type `command_line` into the pane followed by Enter.
    fn inject(&mut self, pane: &PaneHandle, command_line: &str) -> Result<(), MuxError>;

    /// Deliver Ctrl-C to the pane's foreground process.
    fn interrupt(&mut self, pane: &PaneHandle) -> Result<(), MuxError>;

    /// Tear down the whole session and every pane in it.
    fn kill_session(&mut self, session: &str) -> Result<(), MuxError>;
}

/// [`Multiplexer`] backed by `tmux send-keys` / `kill-session`.
#[derive(Debug, Clone, Default)]
pub struct TmuxMultiplexer<R> {
    runner: R,
}

impl<R: TmuxRunner> TmuxMultiplexer<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut R {
        &mut self.runner
    }

    fn send_keys(&mut self, pane: &PaneHandle, keys: &[&str]) -> Result<(), MuxError> {
        let target = pane.target();
        let mut args = vec!["send-keys", "-t", target.as_str()];
        args.extend_from_slice(keys);
        self.runner.run(&args).map(|_| ())
    }
}

impl<R: TmuxRunner> Multiplexer for TmuxMultiplexer<R> {
    fn clear(&mut self, pane: &PaneHandle) -> Result<(), MuxError> {
        self.send_keys(pane, &["clear", "Enter"])
    }

    fn inject(&mut self, pane: &PaneHandle, command_line: &str) -> Result<(), MuxError> {
        self.send_keys(pane, &[command_line, "Enter"])
    }

    fn interrupt(&mut self, pane: &PaneHandle) -> Result<(), MuxError> {
        self.send_keys(pane, &["C-c"])
    }

    fn kill_session(&mut self, session: &str) -> Result<(), MuxError> {
        self.runner.run(&["kill-session", "-t", session]).map(|_| ())
    }
}
