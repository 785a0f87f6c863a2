//! The navigation process: a raw-mode sidebar menu that publishes commands to the viewport.

mod app;
mod menu;
mod render;
mod runtime;

pub use app::{CommandSender, Navigator};
pub use menu::{MenuEntry, MENU};
pub use render::{screen, TUNNEL_ACTIVE, TUNNEL_HINT, TUNNEL_MISSING};
pub use runtime::{run, POLL_INTERVAL};
