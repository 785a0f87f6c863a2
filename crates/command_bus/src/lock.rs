use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use crate::error::BusError;

/// Advisory exclusive lock held by the bus writer for its lifetime.
///
/// The lock is released when the guard drops or the process exits.
#[derive(Debug)]
pub struct WriterLock {
    file: File,
    path: PathBuf,
}

impl WriterLock {
    /// Take the lock without waiting. Fails with [`BusError::LockHeld`] if another writer owns it.
    pub fn try_acquire(path: impl Into<PathBuf>) -> Result<Self, BusError> {
        let path = path.into();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|err| BusError::io("opening writer lock", &path, err))?;

        let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
        if result != 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::WouldBlock {
                return Err(BusError::LockHeld { path });
            }
            return Err(BusError::io("locking writer lock", &path, err));
        }

        file.set_len(0)
            .and_then(|()| writeln!(file, "{}", std::process::id()))
            .map_err(|err| BusError::io("recording lock owner", &path, err))?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        unsafe {
            libc::flock(self.file.as_raw_fd(), libc::LOCK_UN);
        }
    }
}

/// Conventional lock path for a bus endpoint.
pub fn lock_path_for(endpoint: &Path) -> PathBuf {
    let mut name = endpoint.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}
