//! Well-known locations and their environment overrides.

use std::env;
use std::path::PathBuf;

pub const CONF_DIR: &str = "/etc/oopuo";
pub const DATA_DIR: &str = "/opt/oopuo";
pub const LOG_DIR: &str = "/var/log/oopuo";
pub const VAULT_DIR: &str = "/root/oopuo_vault";

pub const CONFIG_FILE: &str = "/etc/oopuo/config.json";
pub const LOG_FILE: &str = "/var/log/oopuo/system.log";
pub const BUS_PATH: &str = "/tmp/oopuo_cmd";

/// Tmux session hosting the desktop.
pub const SESSION_NAME: &str = "oopuo-desktop";

/// Paths and flags resolved from the environment, falling back to the well-known defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverrides {
    pub config_file: PathBuf,
    pub log_file: PathBuf,
    pub bus_path: PathBuf,
    pub debug: bool,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            config_file: env_path("OOPUO_CONFIG").unwrap_or_else(|| PathBuf::from(CONFIG_FILE)),
            log_file: env_path("OOPUO_LOG_FILE").unwrap_or_else(|| PathBuf::from(LOG_FILE)),
            bus_path: env_path("OOPUO_BUS_PATH").unwrap_or_else(|| PathBuf::from(BUS_PATH)),
            debug: env_flag("OOPUO_DEBUG"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).and_then(|value| {
        if value.is_empty() {
            None
        } else {
            Some(PathBuf::from(value))
        }
    })
}
