use command_bus::{CommandBus, FifoChannel};
use desktop_config::{DesktopConfig, EnvOverrides};
use tmux_control::{SystemTmux, TmuxMultiplexer};
use tracing::{debug, error, info};
use viewport::{run, ViewSettings, ViewportManager};

fn main() {
    let env = EnvOverrides::from_env();
    if let Err(err) = oopuo_tui::logging::init_file_logging(&env.log_file, env.debug) {
        eprintln!("oopuo-viewport: logging disabled: {err}");
    }

    let config = DesktopConfig::load(&env.config_file);
    let settings = ViewSettings::from_config(&config);

    let channel = FifoChannel::new(&env.bus_path);
    match channel.ensure() {
        Ok(outcome) => debug!(path = %env.bus_path.display(), ?outcome, "command bus ready"),
        Err(err) => error!(path = %env.bus_path.display(), error = %err, "failed to prepare command bus"),
    }

    info!(pane = %settings.pane, "viewport manager started");
    let bus = CommandBus::new(channel);
    let mut manager = ViewportManager::new(TmuxMultiplexer::new(SystemTmux::new()), settings);
    match run(&bus, &mut manager) {
        Ok(()) => info!(state = %manager.state(), "viewport manager stopped"),
        Err(err) => error!(error = %err, "viewport manager stopped on bus error"),
    }
}
