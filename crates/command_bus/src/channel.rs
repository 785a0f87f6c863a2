//! Channel abstraction behind the bus, plus an in-process implementation.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crate::error::BusError;

/// Reading end of a channel. Lines are returned with their framing intact.
pub trait LineReader: Send {
    /// Block until the next line arrives. `Ok(None)` means end of stream.
    fn read_line(&mut self) -> Result<Option<String>, BusError>;
}

/// Byte channel carrying newline-framed command lines between processes.
pub trait CommandChannel: Send + Sync {
    /// Deliver one line without blocking when nobody is listening.
    fn send_line(&self, line: &str) -> Result<(), BusError>;

    /// Attach a reader. The channel has at most one reader by convention.
    fn open_reader(&self) -> Result<Box<dyn LineReader>, BusError>;
}

impl<C: CommandChannel + ?Sized> CommandChannel for Arc<C> {
    fn send_line(&self, line: &str) -> Result<(), BusError> {
        (**self).send_line(line)
    }

    fn open_reader(&self) -> Result<Box<dyn LineReader>, BusError> {
        (**self).open_reader()
    }
}

#[derive(Default)]
struct MemoryState {
    queue: VecDeque<String>,
    readers: usize,
    opens: usize,
    closed: bool,
    pending_error: Option<io::ErrorKind>,
}

#[derive(Default)]
struct Shared {
    state: Mutex<MemoryState>,
    ready: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory channel used in place of the named pipe in tests and embedded setups.
#[derive(Clone, Default)]
pub struct MemoryChannel {
    shared: Arc<Shared>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// End the stream: readers drain what is queued, then see end of stream.
    pub fn close(&self) {
        self.shared.lock().closed = true;
        self.shared.ready.notify_all();
    }

    /// Make the next read on an attached reader fail with the given kind.
    pub fn fail_next_read(&self, kind: io::ErrorKind) {
        self.shared.lock().pending_error = Some(kind);
        self.shared.ready.notify_all();
    }

    pub fn reader_attached(&self) -> bool {
        self.shared.lock().readers > 0
    }

    /// Number of times a reader has been opened on this channel.
    pub fn open_count(&self) -> usize {
        self.shared.lock().opens
    }

    pub fn queued(&self) -> usize {
        self.shared.lock().queue.len()
    }
}

impl CommandChannel for MemoryChannel {
    fn send_line(&self, line: &str) -> Result<(), BusError> {
        let mut state = self.shared.lock();
        if state.closed {
            return Err(BusError::Closed);
        }
        if state.readers == 0 {
            return Err(BusError::NoReader {
                path: "memory".into(),
            });
        }
        state.queue.push_back(format!("{line}\n"));
        drop(state);
        self.shared.ready.notify_all();
        Ok(())
    }

    fn open_reader(&self) -> Result<Box<dyn LineReader>, BusError> {
        let mut state = self.shared.lock();
        if state.closed && state.queue.is_empty() {
            return Err(BusError::Closed);
        }
        state.readers += 1;
        state.opens += 1;
        Ok(Box::new(MemoryReader {
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct MemoryReader {
    shared: Arc<Shared>,
}

impl LineReader for MemoryReader {
    fn read_line(&mut self) -> Result<Option<String>, BusError> {
        let mut state = self.shared.lock();
        loop {
            if let Some(kind) = state.pending_error.take() {
                return Err(BusError::io(
                    "reading memory channel",
                    "memory",
                    io::Error::from(kind),
                ));
            }
            if let Some(line) = state.queue.pop_front() {
                return Ok(Some(line));
            }
            if state.closed {
                return Ok(None);
            }
            state = self
                .shared
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

impl Drop for MemoryReader {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.readers = state.readers.saturating_sub(1);
    }
}
