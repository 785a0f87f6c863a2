use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::channel::CommandChannel;
use crate::command::Command;
use crate::error::BusError;

/// Pause before reopening the channel after a read failure.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Typed front end over a [`CommandChannel`].
pub struct CommandBus<C> {
    channel: C,
    backoff: Duration,
}

impl<C: CommandChannel> CommandBus<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            backoff: DEFAULT_BACKOFF,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Fire-and-forget send. Nothing is retried or buffered on failure.
    pub fn send(&self, command: Command) -> Result<(), BusError> {
        self.channel.send_line(command.as_str())?;
        debug!(target: "command_bus", %command, "sent command");
        Ok(())
    }

    /// Feed each received line, trimmed, to `handler` in arrival order.
    ///
    /// Read failures are logged and the channel is reopened after the backoff. The loop ends
    /// only when `handler` breaks (`Ok`) or the channel is gone for good (`Err(Closed)`).
    pub fn listen<F>(&self, mut handler: F) -> Result<(), BusError>
    where
        F: FnMut(&str) -> ControlFlow<()>,
    {
        loop {
            let mut reader = match self.channel.open_reader() {
                Ok(reader) => reader,
                Err(BusError::Closed) => return Err(BusError::Closed),
                Err(err) => {
                    error!(target: "command_bus", error = %err, "failed to open bus for reading");
                    thread::sleep(self.backoff);
                    continue;
                }
            };

            loop {
                match reader.read_line() {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        if handler(line).is_break() {
                            return Ok(());
                        }
                    }
                    Ok(None) => {
                        debug!(target: "command_bus", "bus reached end of stream; reopening");
                        break;
                    }
                    Err(BusError::Closed) => return Err(BusError::Closed),
                    Err(err) => {
                        warn!(target: "command_bus", error = %err, "bus read failed; reopening after backoff");
                        thread::sleep(self.backoff);
                        break;
                    }
                }
            }
        }
    }
}
