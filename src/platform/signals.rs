//! Termination signals folded into a shared stop flag.

use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use libc::c_int;
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use signal_hook::SigId;

/// Signals that ask a full-screen process to restore the terminal and leave.
pub const STOP_SIGNALS: [c_int; 3] = [SIGTERM, SIGHUP, SIGINT];

/// Keeps the registrations alive; dropping it unregisters the handlers.
pub struct StopSignals {
    flag: Arc<AtomicBool>,
    ids: Vec<SigId>,
}

impl StopSignals {
    /// Register [`STOP_SIGNALS`] so each of them sets the returned flag.
    pub fn install() -> io::Result<Self> {
        let flag = Arc::new(AtomicBool::new(false));
        let mut ids = Vec::with_capacity(STOP_SIGNALS.len());
        for signal in STOP_SIGNALS {
            match signal_hook::flag::register(signal, Arc::clone(&flag)) {
                Ok(id) => ids.push(id),
                Err(err) => {
                    for id in ids {
                        signal_hook::low_level::unregister(id);
                    }
                    return Err(err);
                }
            }
        }
        Ok(Self { flag, ids })
    }

    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

impl Drop for StopSignals {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}
