//! Named-pipe channel.

use std::ffi::CString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::channel::{CommandChannel, LineReader};
use crate::error::BusError;

pub const DEFAULT_BUS_PATH: &str = "/tmp/oopuo_cmd";

/// Largest line (framing included) written with a single `write(2)`.
///
/// POSIX guarantees pipe writes up to `_POSIX_PIPE_BUF` bytes are never interleaved with
/// other writers, so framing survives concurrent senders.
pub const ATOMIC_WRITE_LIMIT: usize = 512;

const FIFO_MODE: libc::mode_t = 0o600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Existing,
    Created,
    Replaced,
}

#[derive(Debug, Clone)]
pub struct FifoChannel {
    path: PathBuf,
}

impl FifoChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the endpoint if absent, replacing anything at the path that is not a FIFO.
    pub fn ensure(&self) -> Result<EnsureOutcome, BusError> {
        let replaced = match fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.file_type().is_fifo() => return Ok(EnsureOutcome::Existing),
            Ok(meta) => {
                let removal = if meta.is_dir() {
                    fs::remove_dir_all(&self.path)
                } else {
                    fs::remove_file(&self.path)
                };
                removal.map_err(|err| BusError::io("removing stale endpoint", &self.path, err))?;
                info!(path = %self.path.display(), "replaced non-FIFO object at bus path");
                true
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => return Err(BusError::io("inspecting endpoint", &self.path, err)),
        };

        match make_fifo(&self.path) {
            Ok(()) => {}
            // Another process won the race; accept its endpoint if it is a FIFO.
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return match fs::symlink_metadata(&self.path) {
                    Ok(meta) if meta.file_type().is_fifo() => Ok(EnsureOutcome::Existing),
                    _ => Err(BusError::io("creating endpoint", &self.path, err)),
                };
            }
            Err(err) => return Err(BusError::io("creating endpoint", &self.path, err)),
        }

        debug!(path = %self.path.display(), "created bus endpoint");
        Ok(if replaced {
            EnsureOutcome::Replaced
        } else {
            EnsureOutcome::Created
        })
    }

    fn open_checked(&self, options: &OpenOptions, operation: &'static str) -> Result<File, BusError> {
        let file = options.open(&self.path).map_err(|err| {
            if err.raw_os_error() == Some(libc::ENXIO) {
                BusError::NoReader {
                    path: self.path.clone(),
                }
            } else {
                BusError::io(operation, &self.path, err)
            }
        })?;
        let meta = file
            .metadata()
            .map_err(|err| BusError::io(operation, &self.path, err))?;
        if !meta.file_type().is_fifo() {
            return Err(BusError::io(
                operation,
                &self.path,
                io::Error::new(io::ErrorKind::InvalidInput, "endpoint is not a FIFO"),
            ));
        }
        Ok(file)
    }
}

impl Default for FifoChannel {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_PATH)
    }
}

impl CommandChannel for FifoChannel {
    fn send_line(&self, line: &str) -> Result<(), BusError> {
        let mut payload = Vec::with_capacity(line.len() + 1);
        payload.extend_from_slice(line.as_bytes());
        payload.push(b'\n');
        if payload.len() > ATOMIC_WRITE_LIMIT {
            return Err(BusError::LineTooLong {
                len: payload.len(),
                max: ATOMIC_WRITE_LIMIT,
            });
        }

        // O_NONBLOCK makes the open fail with ENXIO instead of waiting for a reader.
        let mut options = OpenOptions::new();
        options.write(true).custom_flags(libc::O_NONBLOCK);
        let mut file = self.open_checked(&options, "opening endpoint for write")?;

        let written = file
            .write(&payload)
            .map_err(|err| BusError::io("writing command", &self.path, err))?;
        if written != payload.len() {
            return Err(BusError::ShortWrite {
                path: self.path.clone(),
                written,
                expected: payload.len(),
            });
        }
        Ok(())
    }

    fn open_reader(&self) -> Result<Box<dyn LineReader>, BusError> {
        // Holding a write end as well keeps the pipe from reporting EOF between senders,
        // so the reader stays attached for its whole lifetime.
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        let file = self.open_checked(&options, "opening endpoint for read")?;
        Ok(Box::new(FifoReader {
            path: self.path.clone(),
            reader: BufReader::new(file),
        }))
    }
}

struct FifoReader {
    path: PathBuf,
    reader: BufReader<File>,
}

impl FifoReader {
    /// Read up to one line, never buffering more than [`ATOMIC_WRITE_LIMIT`] bytes.
    fn read_bounded(&mut self, buf: &mut Vec<u8>) -> Result<usize, BusError> {
        loop {
            let mut limited = (&mut self.reader).take((ATOMIC_WRITE_LIMIT - buf.len()) as u64);
            match limited.read_until(b'\n', buf) {
                Ok(_) => return Ok(buf.len()),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(BusError::io("reading endpoint", &self.path, err)),
            }
        }
    }

    /// Discard input up to and including the next newline. Returns the bytes dropped.
    fn skip_line(&mut self) -> Result<usize, BusError> {
        let mut dropped = 0;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(BusError::io("reading endpoint", &self.path, err)),
            };
            if available.is_empty() {
                return Ok(dropped);
            }
            match available.iter().position(|&byte| byte == b'\n') {
                Some(pos) => {
                    self.reader.consume(pos + 1);
                    return Ok(dropped + pos + 1);
                }
                None => {
                    let len = available.len();
                    self.reader.consume(len);
                    dropped += len;
                }
            }
        }
    }
}

impl LineReader for FifoReader {
    fn read_line(&mut self) -> Result<Option<String>, BusError> {
        loop {
            let mut buf = Vec::new();
            let read = self.read_bounded(&mut buf)?;
            if read == 0 {
                return Ok(None);
            }
            if buf.ends_with(b"\n") || read < ATOMIC_WRITE_LIMIT {
                return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
            }
            let dropped = read + self.skip_line()?;
            warn!(
                target: "command_bus",
                path = %self.path.display(),
                len = dropped,
                max = ATOMIC_WRITE_LIMIT,
                "oversized line dropped"
            );
        }
    }
}

fn make_fifo(path: &Path) -> io::Result<()> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let result = unsafe { libc::mkfifo(c_path.as_ptr(), FIFO_MODE) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
