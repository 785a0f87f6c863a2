//! The viewport process: a single-threaded state machine that owns the shared pane and
//! repopulates it through keystroke injection whenever a command arrives on the bus.

mod manager;
mod settings;
mod state;
mod wrapper;

pub use manager::{run, ViewportManager};
pub use settings::{RemoteHost, ViewSettings, DEFAULT_DISCONNECT_SETTLE, DEFAULT_MAIN_PANE};
pub use state::{RemoteTarget, ViewState};
pub use wrapper::{WrapperScript, IDLE_BANNER};
