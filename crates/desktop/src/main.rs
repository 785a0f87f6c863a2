use std::fs;
use std::os::unix::process::CommandExt;

use anyhow::Context;
use command_bus::FifoChannel;
use desktop::{attach_command, spawn_detached, Bootstrap, DesktopPlan};
use desktop_config::{DesktopConfig, EnvOverrides, CONF_DIR, LOG_DIR, VAULT_DIR};
use tmux_control::SystemTmux;
use tracing::{debug, error, info, warn};

fn main() -> anyhow::Result<()> {
    let env = EnvOverrides::from_env();
    if let Err(err) = oopuo_tui::logging::init_file_logging(&env.log_file, env.debug) {
        eprintln!("oopuo-desktop: logging disabled: {err}");
    }
    info!(target: "desktop", "OOPUO desktop starting");

    for dir in [LOG_DIR, CONF_DIR, VAULT_DIR] {
        if let Err(err) = fs::create_dir_all(dir) {
            warn!(target: "desktop", dir, error = %err, "failed to create directory");
        }
    }

    let config = DesktopConfig::load(&env.config_file);
    match FifoChannel::new(&env.bus_path).ensure() {
        Ok(outcome) => debug!(target: "desktop", ?outcome, "command bus ready"),
        Err(err) => error!(target: "desktop", error = %err, "failed to prepare command bus"),
    }

    let plan = DesktopPlan::from_config(&config, &env.log_file);
    let mut bootstrap = Bootstrap::new(SystemTmux::new(), plan.clone());
    bootstrap
        .run()
        .context("failed to create the desktop tmux session")?;

    match spawn_detached(&plan.viewport) {
        Ok(pid) => info!(target: "desktop", pid, command = %plan.viewport, "viewport started"),
        Err(err) => error!(target: "desktop", command = %plan.viewport, error = %err, "failed to start viewport"),
    }

    println!("✓ OOPUO Desktop Environment initialized");
    println!("  Attaching to tmux session: {}", plan.session);
    let err = attach_command(&plan.session).exec();
    Err(err).context("failed to exec tmux attach-session")
}
