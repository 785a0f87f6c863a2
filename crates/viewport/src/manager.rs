use std::ops::ControlFlow;
use std::thread;

use command_bus::{BusError, Command, CommandBus, CommandChannel};
use tmux_control::{shell_quote, MuxError, Multiplexer};
use tracing::{debug, error, info, warn};

use crate::settings::ViewSettings;
use crate::state::{RemoteTarget, ViewState};
use crate::wrapper::{WrapperScript, IDLE_BANNER};

/// Owns the shared pane and moves it between views as commands arrive.
///
/// Transitions are optimistic: the state advances once the injection has been issued, whether
/// or not the multiplexer accepted it. Failures are logged and never stop the manager.
pub struct ViewportManager<M> {
    mux: M,
    settings: ViewSettings,
    state: ViewState,
}

impl<M: Multiplexer> ViewportManager<M> {
    pub fn new(mux: M, settings: ViewSettings) -> Self {
        Self {
            mux,
            settings,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn mux(&self) -> &M {
        &self.mux
    }

    /// Clear the pane and show the idle banner.
    pub fn show_ready(&mut self) {
        self.clear();
        self.inject(&echo(IDLE_BANNER));
        self.state = ViewState::Idle;
    }

    /// Handle one line read from the bus. Unknown text is logged once and otherwise ignored.
    pub fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        match line.parse::<Command>() {
            Ok(command) => self.apply(command),
            Err(unknown) => {
                warn!(target: "viewport", command = %unknown.0, state = %self.state, "unrecognized command ignored");
                ControlFlow::Continue(())
            }
        }
    }

    pub fn apply(&mut self, command: Command) -> ControlFlow<()> {
        let from = self.state;
        debug!(target: "viewport", %command, %from, "applying command");
        let flow = match command {
            Command::ShowDashboard => self.show_view(command, self.settings.dashboard.clone()),
            Command::ShowLogs => self.show_view(command, self.settings.logs.clone()),
            Command::ShowTimemachine => self.show_view(command, self.settings.timemachine.clone()),
            Command::ShowSettings => self.show_view(command, self.settings.settings.clone()),
            Command::ConnectBrain => self.connect(RemoteTarget::Brain),
            Command::ConnectGuard => self.connect(RemoteTarget::Guard),
            Command::Disconnect => self.disconnect(),
            Command::Exit => self.terminate(),
        };
        info!(target: "viewport", %command, %from, to = %self.state, "view changed");
        flow
    }

    fn show_view(&mut self, command: Command, command_line: String) -> ControlFlow<()> {
        self.clear();
        self.inject(&command_line);
        self.state = ViewState::after(command);
        ControlFlow::Continue(())
    }

    fn connect(&mut self, target: RemoteTarget) -> ControlFlow<()> {
        let script = match target {
            RemoteTarget::Brain => match &self.settings.brain {
                Some(host) => WrapperScript::brain(host),
                None => {
                    error!(target: "viewport", "brain address is not configured");
                    self.show_notice("Brain VM address not configured. Run setup from SETTINGS.");
                    return ControlFlow::Continue(());
                }
            },
            RemoteTarget::Guard => WrapperScript::guard(&self.settings.guard_ct),
        };

        let command_line = match script.install(&self.settings.runtime_dir) {
            Ok(path) => WrapperScript::invocation(&path),
            Err(err) => {
                error!(
                    target: "viewport",
                    dir = %self.settings.runtime_dir.display(),
                    script = script.file_name(),
                    error = %err,
                    "failed to write session wrapper, running it inline"
                );
                script.inline()
            }
        };

        self.clear();
        self.inject(&command_line);
        self.state = ViewState::RemoteShell(target);
        ControlFlow::Continue(())
    }

    fn disconnect(&mut self) -> ControlFlow<()> {
        if let Err(err) = self.mux.interrupt(&self.settings.pane) {
            self.log_failure("interrupt", &err);
        }
        if !self.settings.disconnect_settle.is_zero() {
            thread::sleep(self.settings.disconnect_settle);
        }
        self.show_ready();
        ControlFlow::Continue(())
    }

    fn terminate(&mut self) -> ControlFlow<()> {
        let session = self.settings.pane.session().to_string();
        if let Err(err) = self.mux.kill_session(&session) {
            self.log_failure("kill-session", &err);
        }
        self.state = ViewState::Terminating;
        ControlFlow::Break(())
    }

    fn show_notice(&mut self, message: &str) {
        self.clear();
        self.inject(&echo(&format!("ERROR: {message}")));
        self.state = ViewState::Idle;
    }

    fn clear(&mut self) {
        if let Err(err) = self.mux.clear(&self.settings.pane) {
            self.log_failure("clear", &err);
        }
    }

    fn inject(&mut self, command_line: &str) {
        if let Err(err) = self.mux.inject(&self.settings.pane, command_line) {
            self.log_failure("inject", &err);
        }
    }

    fn log_failure(&self, action: &'static str, err: &MuxError) {
        warn!(target: "viewport", action, pane = %self.settings.pane, error = %err, "multiplexer call failed");
    }
}

/// Show the idle banner, then apply commands from `bus` until `EXIT` or the channel closes.
pub fn run<C, M>(bus: &CommandBus<C>, manager: &mut ViewportManager<M>) -> Result<(), BusError>
where
    C: CommandChannel,
    M: Multiplexer,
{
    manager.show_ready();
    bus.listen(|line| manager.handle_line(line))
}

fn echo(text: &str) -> String {
    format!("echo {}", shell_quote(text))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use tmux_control::{MuxError, PaneHandle};
    use tracing_test::traced_test;

    use super::*;

    #[derive(Default)]
    struct CountingMux {
        calls: usize,
    }

    impl Multiplexer for CountingMux {
        fn clear(&mut self, _pane: &PaneHandle) -> Result<(), MuxError> {
            self.calls += 1;
            Ok(())
        }

        fn inject(&mut self, _pane: &PaneHandle, _line: &str) -> Result<(), MuxError> {
            self.calls += 1;
            Ok(())
        }

        fn interrupt(&mut self, _pane: &PaneHandle) -> Result<(), MuxError> {
            self.calls += 1;
            Ok(())
        }

        fn kill_session(&mut self, _session: &str) -> Result<(), MuxError> {
            self.calls += 1;
            Ok(())
        }
    }

    fn settings() -> ViewSettings {
        ViewSettings {
            pane: PaneHandle::new("desk", "0", "2"),
            dashboard: "dash".to_string(),
            logs: "logs".to_string(),
            timemachine: "tm".to_string(),
            settings: "settings".to_string(),
            brain: None,
            guard_ct: "100".to_string(),
            runtime_dir: PathBuf::from("/nonexistent"),
            disconnect_settle: Duration::ZERO,
        }
    }

    #[traced_test]
    #[test]
    fn unknown_command_is_logged_once_and_changes_nothing() {
        let mut manager = ViewportManager::new(CountingMux::default(), settings());
        manager.state = ViewState::LogStream;

        let flow = manager.handle_line("REBOOT");

        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(manager.state(), ViewState::LogStream);
        assert_eq!(manager.mux().calls, 0);
        logs_assert(|lines: &[&str]| {
            let matching = lines
                .iter()
                .filter(|line| line.contains("unrecognized command ignored"))
                .count();
            match (matching, lines.len()) {
                (1, 1) => Ok(()),
                other => Err(format!("expected exactly one log line, got {other:?}: {lines:?}")),
            }
        });
    }

    #[test]
    fn lowercase_tokens_are_not_commands() {
        let mut manager = ViewportManager::new(CountingMux::default(), settings());
        assert_eq!(manager.handle_line("exit"), ControlFlow::Continue(()));
        assert_eq!(manager.state(), ViewState::Idle);
        assert_eq!(manager.mux().calls, 0);
    }
}
