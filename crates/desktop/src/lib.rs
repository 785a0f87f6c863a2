//! Desktop bootstrap: builds the tmux session, starts every pane, launches the viewport
//! process and hands the terminal over to tmux.

mod bootstrap;
mod plan;
mod process;

pub use bootstrap::Bootstrap;
pub use plan::{DesktopPlan, PaneRole, DEFAULT_KILL_SETTLE};
pub use process::{attach_command, spawn_detached};
