//! Thin control layer over tmux: pane addressing, bounded-time invocations and the
//! keystroke-injection primitives the viewport drives.

mod error;
mod multiplexer;
mod pane;
mod runner;

pub use error::MuxError;
pub use multiplexer::{Multiplexer, TmuxMultiplexer};
pub use pane::PaneHandle;
pub use runner::{RecordingRunner, SystemTmux, TmuxRunner, DEFAULT_TMUX_TIMEOUT};

/// Single-quote `value` for a POSIX shell command line.
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "-_./:@=+,%".contains(ch))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}
