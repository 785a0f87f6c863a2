//! Process-based terminal implementation over the controlling tty.

use std::io;
use std::time::Duration;

use libc::{self, c_int};

use crate::core::style::{HIDE_CURSOR, SHOW_CURSOR};
use crate::core::terminal::Terminal;

const FALLBACK_SIZE: (u16, u16) = (80, 24);

fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            continue;
        }
        if (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }
        return Err(io::Error::other(format!(
            "poll(POLLOUT) returned revents=0x{:x}",
            fds.revents
        )));
    }
}

fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> io::Result<usize>,
    FWait: FnMut(c_int) -> io::Result<()>,
{
    let mut written = 0;
    while written < bytes.len() {
        match write_once(fd, &bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "write returned 0"));
            }
            Ok(count) => {
                if count > bytes.len() - written {
                    return Err(io::Error::other("write returned more bytes than requested"));
                }
                written += count;
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => wait_writable(fd)?,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn write_fd(fd: c_int, data: &str) -> io::Result<()> {
    write_all_fd_with(
        fd,
        data.as_bytes(),
        |fd, buf| {
            let result = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
            if result < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        },
        wait_writable,
    )
}

fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

/// `Ok(true)` when `fd` has input. EINTR counts as "no input yet".
fn poll_readable(fd: c_int, timeout_ms: i32) -> io::Result<bool> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    if result < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    if result > 0 && (fds.revents & libc::POLLNVAL) != 0 {
        return Err(io::Error::from_raw_os_error(libc::EBADF));
    }
    Ok(result > 0 && (fds.revents & (libc::POLLIN | libc::POLLHUP)) != 0)
}

fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Terminal backed by the process's stdin/stdout.
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
}

impl ProcessTerminal {
    pub fn new() -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: None,
        }
    }

    pub fn is_raw(&self) -> bool {
        self.original_termios.is_some()
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        let original = get_termios(self.stdin_fd)?;
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(self.stdin_fd, &raw)?;
        self.original_termios = Some(original);
        Ok(())
    }

    fn restore_raw_mode(&mut self) -> io::Result<()> {
        if let Some(original) = self.original_termios.take() {
            set_termios(self.stdin_fd, &original)?;
        }
        Ok(())
    }
}

impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ProcessTerminal {
    fn start(&mut self) -> io::Result<()> {
        if self.is_raw() {
            return Ok(());
        }
        self.enable_raw_mode()?;
        if let Err(err) = write_fd(self.stdout_fd, HIDE_CURSOR) {
            let _ = self.restore_raw_mode();
            return Err(err);
        }
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        if !self.is_raw() {
            return Ok(());
        }
        let shown = write_fd(self.stdout_fd, SHOW_CURSOR);
        self.restore_raw_mode()?;
        shown
    }

    fn read_input(&mut self, timeout: Duration) -> io::Result<Option<String>> {
        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
        if !poll_readable(self.stdin_fd, timeout_ms)? {
            return Ok(None);
        }

        let mut buffer = [0u8; 1024];
        let read_len =
            unsafe { libc::read(self.stdin_fd, buffer.as_mut_ptr() as *mut _, buffer.len()) };
        if read_len < 0 {
            let err = io::Error::last_os_error();
            return match err.kind() {
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                _ => Err(err),
            };
        }
        if read_len == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "terminal input closed"));
        }
        Ok(Some(
            String::from_utf8_lossy(&buffer[..read_len as usize]).into_owned(),
        ))
    }

    fn write(&mut self, data: &str) -> io::Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        write_fd(self.stdout_fd, data)
    }

    fn columns(&self) -> u16 {
        read_winsize(self.stdout_fd).unwrap_or(FALLBACK_SIZE).0
    }

    fn rows(&self) -> u16 {
        read_winsize(self.stdout_fd).unwrap_or(FALLBACK_SIZE).1
    }
}

impl Drop for ProcessTerminal {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
