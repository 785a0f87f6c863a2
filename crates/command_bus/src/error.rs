use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("no reader attached to {path}")]
    NoReader { path: PathBuf },

    #[error("command line of {len} bytes exceeds the atomic write limit of {max} bytes")]
    LineTooLong { len: usize, max: usize },

    #[error("short write to {path}: {written} of {expected} bytes")]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writer lock {path} is held by another process")]
    LockHeld { path: PathBuf },

    #[error("channel closed")]
    Closed,
}

impl BusError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether the failure means nobody is listening, as opposed to a broken endpoint.
    pub fn is_no_reader(&self) -> bool {
        matches!(self, Self::NoReader { .. })
    }
}
