use std::path::PathBuf;
use std::time::Duration;

use desktop_config::DesktopConfig;
use tmux_control::PaneHandle;
use tracing::warn;

/// Pause between interrupting a remote shell and clearing the pane.
pub const DEFAULT_DISCONNECT_SETTLE: Duration = Duration::from_millis(500);

/// Fallback when `panes.main` is missing or malformed.
pub const DEFAULT_MAIN_PANE: &str = "oopuo-desktop:0.2";

/// ssh coordinates of the brain VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHost {
    pub address: String,
    pub user: String,
    pub key_path: String,
}

/// Everything the viewport reads from configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub pane: PaneHandle,
    pub dashboard: String,
    pub logs: String,
    pub timemachine: String,
    pub settings: String,
    /// `None` until the brain VM has an address.
    pub brain: Option<RemoteHost>,
    pub guard_ct: String,
    pub runtime_dir: PathBuf,
    pub disconnect_settle: Duration,
}

impl ViewSettings {
    pub fn from_config(config: &DesktopConfig) -> Self {
        let pane_text = config.get_str("panes.main", DEFAULT_MAIN_PANE);
        let pane = pane_text.parse().unwrap_or_else(|error| {
            warn!(target: "viewport", pane = %pane_text, %error, "invalid main pane; using default");
            default_pane()
        });

        let brain = config
            .get_opt_str("network.brain_ip")
            .filter(|address| !address.trim().is_empty())
            .map(|address| RemoteHost {
                address,
                user: config.get_str("credentials.user", "adminuser"),
                key_path: config.get_str("credentials.key_path", "/root/oopuo_vault/oopuo_key"),
            });

        Self {
            pane,
            dashboard: config.get_str("views.dashboard", "python3 /opt/oopuo/dashboard.py"),
            logs: config.get_str("views.logs", "python3 /opt/oopuo/logs.py"),
            timemachine: config.get_str("views.timemachine", "python3 /opt/oopuo/timemachine.py"),
            settings: config.get_str("views.settings", "python3 /opt/oopuo/settings.py"),
            brain,
            guard_ct: config.get_str("ids.guard_ct", "100"),
            runtime_dir: PathBuf::from(config.get_str("paths.runtime_dir", "/tmp")),
            disconnect_settle: DEFAULT_DISCONNECT_SETTLE,
        }
    }
}

fn default_pane() -> PaneHandle {
    PaneHandle::new("oopuo-desktop", "0", "2")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_brain_host() {
        let settings = ViewSettings::from_config(&DesktopConfig::defaults("/nonexistent"));
        assert_eq!(settings.pane.target(), DEFAULT_MAIN_PANE);
        assert_eq!(settings.brain, None);
        assert_eq!(settings.guard_ct, "100");
        assert_eq!(settings.runtime_dir, PathBuf::from("/tmp"));
    }
}
