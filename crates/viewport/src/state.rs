use std::fmt;

use command_bus::Command;

/// Host a remote-shell view is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteTarget {
    /// Primary compute VM, reached over ssh.
    Brain,
    /// Gateway container, reached through its console.
    Guard,
}

/// What currently occupies the shared pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Dashboard,
    RemoteShell(RemoteTarget),
    LogStream,
    SnapshotBrowser,
    Settings,
    Terminating,
}

impl ViewState {
    /// State a command leads to. Every command is accepted from every state.
    pub const fn after(command: Command) -> ViewState {
        match command {
            Command::ShowDashboard => ViewState::Dashboard,
            Command::ConnectBrain => ViewState::RemoteShell(RemoteTarget::Brain),
            Command::ConnectGuard => ViewState::RemoteShell(RemoteTarget::Guard),
            Command::ShowLogs => ViewState::LogStream,
            Command::ShowTimemachine => ViewState::SnapshotBrowser,
            Command::ShowSettings => ViewState::Settings,
            Command::Disconnect => ViewState::Idle,
            Command::Exit => ViewState::Terminating,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Idle => f.write_str("IDLE"),
            ViewState::Dashboard => f.write_str("DASHBOARD"),
            ViewState::RemoteShell(RemoteTarget::Brain) => f.write_str("REMOTE_SHELL(brain)"),
            ViewState::RemoteShell(RemoteTarget::Guard) => f.write_str("REMOTE_SHELL(guard)"),
            ViewState::LogStream => f.write_str("LOG_STREAM"),
            ViewState::SnapshotBrowser => f.write_str("SNAPSHOT_BROWSER"),
            ViewState::Settings => f.write_str("SETTINGS"),
            ViewState::Terminating => f.write_str("TERMINATING"),
        }
    }
}
