use std::path::Path;
use std::time::Duration;

use desktop_config::{DesktopConfig, SESSION_NAME};
use tmux_control::{shell_quote, PaneHandle};
use tracing::warn;

/// Pause after killing a stale session so tmux has released it.
pub const DEFAULT_KILL_SETTLE: Duration = Duration::from_millis(500);

/// Pane order produced by the layout splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneRole {
    Header,
    Sidebar,
    Main,
    Minilog,
}

impl PaneRole {
    pub const ALL: [PaneRole; 4] = [
        PaneRole::Header,
        PaneRole::Sidebar,
        PaneRole::Main,
        PaneRole::Minilog,
    ];

    pub const fn index(self) -> usize {
        match self {
            PaneRole::Header => 0,
            PaneRole::Sidebar => 1,
            PaneRole::Main => 2,
            PaneRole::Minilog => 3,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            PaneRole::Header => "header",
            PaneRole::Sidebar => "sidebar",
            PaneRole::Main => "main",
            PaneRole::Minilog => "minilog",
        }
    }
}

/// Everything needed to build and populate the desktop session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopPlan {
    pub session: String,
    pub header: String,
    pub navigator: String,
    pub viewport: String,
    pub minilog: String,
    pub kill_settle: Duration,
}

impl DesktopPlan {
    /// The session name comes from `panes.main`, the same key the viewport reads, so `EXIT`
    /// tears down the session built here.
    pub fn from_config(config: &DesktopConfig, log_file: &Path) -> Self {
        Self {
            session: session_from_config(config),
            header: config.get_str("views.header", "python3 /opt/oopuo/metrics.py"),
            navigator: config.get_str("views.navigator", "oopuo-navigator"),
            viewport: config.get_str("views.viewport", "oopuo-viewport"),
            minilog: format!("tail -f {}", shell_quote(&log_file.to_string_lossy())),
            kill_settle: DEFAULT_KILL_SETTLE,
        }
    }

    pub fn pane(&self, role: PaneRole) -> PaneHandle {
        PaneHandle::new(self.session.as_str(), "0", role.index().to_string())
    }

    /// Command line typed into each pane once the layout exists.
    pub fn launch_line(&self, role: PaneRole) -> String {
        match role {
            PaneRole::Header => self.header.clone(),
            PaneRole::Sidebar => self.navigator.clone(),
            PaneRole::Main => format!("clear && echo {}", shell_quote("[ VIEWPORT READY ]")),
            PaneRole::Minilog => self.minilog.clone(),
        }
    }
}

fn session_from_config(config: &DesktopConfig) -> String {
    let Some(main) = config.get_opt_str("panes.main") else {
        return SESSION_NAME.to_string();
    };
    match main.parse::<PaneHandle>() {
        Ok(pane) => pane.session().to_string(),
        Err(error) => {
            warn!(target: "desktop", pane = %main, %error, "invalid main pane; using default session");
            SESSION_NAME.to_string()
        }
    }
}
