//! Desktop configuration: a JSON document read and written by dotted key path.

mod defaults;
mod error;
mod paths;
mod store;

pub use defaults::DEFAULT_CONFIG;
pub use error::ConfigError;
pub use paths::{
    EnvOverrides, BUS_PATH, CONFIG_FILE, CONF_DIR, DATA_DIR, LOG_DIR, LOG_FILE, SESSION_NAME,
    VAULT_DIR,
};
pub use store::{deep_merge, DesktopConfig};
