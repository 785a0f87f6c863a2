use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use oopuo_tui::{Key, KeyDecoder, Terminal};
use tracing::info;

use crate::app::{CommandSender, Navigator};
use crate::render::screen;

/// How long one tick waits for a key before redrawing and re-checking the stop flag.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drive the navigator until it stops itself or `stop` is raised.
///
/// Every tick redraws the whole menu; the screen is only cleared on the first frame and after
/// a resize.
pub fn run<T, S>(terminal: &mut T, navigator: &mut Navigator<S>, stop: &AtomicBool) -> io::Result<()>
where
    T: Terminal,
    S: CommandSender,
{
    let mut drawn_size = None;
    let mut decoder = KeyDecoder::new();

    while navigator.is_running() {
        if stop.load(Ordering::SeqCst) {
            info!(target: "navigator", "stop signal received");
            break;
        }

        let size = (terminal.columns(), terminal.rows());
        let lines = navigator.render(usize::from(size.0), usize::from(size.1));
        terminal.write(&screen(&lines, drawn_size != Some(size)))?;
        drawn_size = Some(size);

        let keys = match terminal.read_input(POLL_INTERVAL)? {
            Some(input) => decoder.feed(&input),
            None => decoder.flush(),
        };
        apply_keys(navigator, &keys);
    }
    Ok(())
}

fn apply_keys<S: CommandSender>(navigator: &mut Navigator<S>, keys: &[Key]) {
    for key in keys {
        navigator.handle_key(key);
        if !navigator.is_running() {
            break;
        }
    }
}
