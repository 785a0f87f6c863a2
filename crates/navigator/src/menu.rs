use command_bus::Command;

/// One selectable entry and the command it publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub command: Command,
}

/// Sidebar entries, top to bottom.
pub const MENU: [MenuEntry; 8] = [
    MenuEntry {
        label: "DASHBOARD",
        command: Command::ShowDashboard,
    },
    MenuEntry {
        label: "CONNECT BRAIN",
        command: Command::ConnectBrain,
    },
    MenuEntry {
        label: "CONNECT GUARD",
        command: Command::ConnectGuard,
    },
    MenuEntry {
        label: "LIVE LOGS",
        command: Command::ShowLogs,
    },
    MenuEntry {
        label: "TIME MACHINE",
        command: Command::ShowTimemachine,
    },
    MenuEntry {
        label: "SETTINGS",
        command: Command::ShowSettings,
    },
    MenuEntry {
        label: "DISCONNECT",
        command: Command::Disconnect,
    },
    MenuEntry {
        label: "EXIT",
        command: Command::Exit,
    },
];

impl MenuEntry {
    /// Shown de-emphasised; it tears down rather than opens a view.
    pub fn is_muted(&self) -> bool {
        self.command == Command::Disconnect
    }
}
