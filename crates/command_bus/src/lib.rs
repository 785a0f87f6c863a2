//! Command bus between the navigator and the viewport.
//!
//! One long-lived reader consumes newline-framed [`Command`] tokens in arrival order; any number
//! of writers may send, but sends never block when nobody is listening.

mod bus;
mod channel;
mod command;
mod error;
mod fifo;
mod lock;

pub use bus::{CommandBus, DEFAULT_BACKOFF};
pub use channel::{CommandChannel, LineReader, MemoryChannel};
pub use command::{Command, UnknownCommand};
pub use error::BusError;
pub use fifo::{EnsureOutcome, FifoChannel, ATOMIC_WRITE_LIMIT, DEFAULT_BUS_PATH};
pub use lock::{lock_path_for, WriterLock};
