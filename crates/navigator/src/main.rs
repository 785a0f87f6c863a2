use anyhow::Context;
use command_bus::{lock_path_for, BusError, CommandBus, FifoChannel, WriterLock};
use desktop_config::{DesktopConfig, EnvOverrides};
use navigator::{run, Navigator};
use oopuo_tui::{ProcessTerminal, StopSignals, TerminalGuard, Theme};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let env = EnvOverrides::from_env();
    if let Err(err) = oopuo_tui::logging::init_file_logging(&env.log_file, env.debug) {
        eprintln!("oopuo-navigator: logging disabled: {err}");
    }

    let config = DesktopConfig::load(&env.config_file);
    let theme = theme_from_config(&config);
    let tunnel_active = config.get_bool("cloudflare.tunnel_configured", false);

    let lock_path = lock_path_for(&env.bus_path);
    let _writer_lock = match WriterLock::try_acquire(&lock_path) {
        Ok(lock) => lock,
        Err(err @ BusError::LockHeld { .. }) => {
            error!(target: "navigator", error = %err, "another navigator is already running");
            return Err(err).context("command bus already has a writer");
        }
        Err(err) => return Err(err).context("failed to acquire command bus writer lock"),
    };

    let signals = StopSignals::install().context("failed to install signal handlers")?;
    let stop = signals.flag();

    let bus = CommandBus::new(FifoChannel::new(&env.bus_path));
    let mut navigator = Navigator::new(bus, theme, tunnel_active);

    let mut guard = TerminalGuard::start(ProcessTerminal::new())
        .context("failed to put the terminal into raw mode")?;
    info!(target: "navigator", bus = %env.bus_path.display(), "navigator started");

    let result = run(guard.terminal_mut(), &mut navigator, &stop);
    drop(guard);
    match &result {
        Ok(()) => info!(target: "navigator", "navigator stopped"),
        Err(err) => error!(target: "navigator", error = %err, "navigator stopped on terminal error"),
    }
    result.context("terminal input failed")
}

fn theme_from_config(config: &DesktopConfig) -> Theme {
    let defaults = Theme::default();
    let colour = |key: &str, fallback: u8| {
        u8::try_from(config.get_u64(key, u64::from(fallback))).unwrap_or(fallback)
    };
    Theme {
        primary: colour("theme.primary", defaults.primary),
        success: colour("theme.success", defaults.success),
        error: colour("theme.error", defaults.error),
        muted: colour("theme.muted", defaults.muted),
        accent: colour("theme.accent", defaults.accent),
        text: colour("theme.text", defaults.text),
    }
}
