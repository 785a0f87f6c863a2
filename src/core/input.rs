//! Key decoding for raw-mode input.
//!
//! A single read may carry several keys (fast typing, pasted text), so input is split into a
//! sequence of [`Key`]s rather than matched as a whole.

use crate::core::text::ansi::extract_ansi_code;

const LEGACY_UP: [&str; 2] = ["\x1b[A", "\x1bOA"];
const LEGACY_DOWN: [&str; 2] = ["\x1b[B", "\x1bOB"];
const LEGACY_RIGHT: [&str; 2] = ["\x1b[C", "\x1bOC"];
const LEGACY_LEFT: [&str; 2] = ["\x1b[D", "\x1bOD"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    /// Ctrl-C. Raw mode delivers it as a byte, not a signal.
    CtrlC,
    Char(char),
    /// Any escape sequence without a dedicated variant.
    Sequence(String),
}

/// Split raw terminal input into keys.
pub fn parse_keys(data: &str) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut idx = 0;
    while idx < data.len() {
        if let Some(code) = extract_ansi_code(data, idx) {
            keys.push(sequence_key(&code.code));
            idx += code.length;
            continue;
        }

        let Some(ch) = data[idx..].chars().next() else {
            break;
        };
        idx += ch.len_utf8();
        keys.push(match ch {
            '\r' | '\n' => Key::Enter,
            '\x03' => Key::CtrlC,
            '\x1b' => Key::Escape,
            other => Key::Char(other),
        });
    }
    keys
}

/// Decodes keys across reads, holding back an escape sequence cut off at the end of a chunk.
///
/// A held tail is completed by the next chunk, or released as plain keys by [`flush`](Self::flush)
/// once input goes quiet.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: String,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, data: &str) -> Vec<Key> {
        let mut buffer = std::mem::take(&mut self.pending);
        buffer.push_str(data);
        let split = incomplete_tail_start(&buffer).unwrap_or(buffer.len());
        self.pending = buffer.split_off(split);
        parse_keys(&buffer)
    }

    /// Release whatever is held back.
    pub fn flush(&mut self) -> Vec<Key> {
        parse_keys(&std::mem::take(&mut self.pending))
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Byte offset of a trailing escape sequence that could still be completed by more input.
fn incomplete_tail_start(data: &str) -> Option<usize> {
    let start = data.rfind('\x1b')?;
    if extract_ansi_code(data, start).is_some() {
        return None;
    }
    let tail = &data.as_bytes()[start + 1..];
    let incomplete = match tail.split_first() {
        None => true,
        Some((b'[', rest)) => rest.iter().all(|byte| (0x20..=0x3f).contains(byte)),
        Some((b'O', rest)) => rest.is_empty(),
        Some((b']', rest)) => !rest.contains(&0x07),
        Some(_) => false,
    };
    incomplete.then_some(start)
}

fn sequence_key(sequence: &str) -> Key {
    if LEGACY_UP.contains(&sequence) {
        Key::Up
    } else if LEGACY_DOWN.contains(&sequence) {
        Key::Down
    } else if LEGACY_RIGHT.contains(&sequence) {
        Key::Right
    } else if LEGACY_LEFT.contains(&sequence) {
        Key::Left
    } else {
        Key::Sequence(sequence.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_keys, Key, KeyDecoder};

    #[test]
    fn arrows_in_both_cursor_modes() {
        assert_eq!(parse_keys("\x1b[A\x1bOB"), vec![Key::Up, Key::Down]);
        assert_eq!(parse_keys("\x1bOA"), vec![Key::Up]);
    }

    #[test]
    fn batched_input_yields_every_key() {
        assert_eq!(
            parse_keys("jj\r\x03"),
            vec![Key::Char('j'), Key::Char('j'), Key::Enter, Key::CtrlC]
        );
    }

    #[test]
    fn unknown_sequences_and_lone_escape() {
        assert_eq!(
            parse_keys("\x1b[21~"),
            vec![Key::Sequence("\x1b[21~".to_string())]
        );
        assert_eq!(parse_keys("\x1b"), vec![Key::Escape]);
        assert_eq!(
            parse_keys("\x1b[1"),
            vec![Key::Escape, Key::Char('['), Key::Char('1')]
        );
    }

    #[test]
    fn decoder_joins_sequences_split_across_reads() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.feed("j\x1b"), vec![Key::Char('j')]);
        assert!(decoder.has_pending());
        assert_eq!(decoder.feed("["), Vec::<Key>::new());
        assert_eq!(decoder.feed("Bk"), vec![Key::Down, Key::Char('k')]);
        assert!(!decoder.has_pending());

        assert_eq!(decoder.feed("\x1bO"), Vec::<Key>::new());
        assert_eq!(decoder.feed("A"), vec![Key::Up]);
    }

    #[test]
    fn decoder_flush_releases_a_lone_escape() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.feed("\x1b"), Vec::<Key>::new());
        assert_eq!(decoder.flush(), vec![Key::Escape]);
        assert_eq!(decoder.flush(), Vec::<Key>::new());
    }

    #[test]
    fn decoder_passes_complete_input_straight_through() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.feed("\x1b[A\r"), vec![Key::Up, Key::Enter]);
        assert_eq!(decoder.feed("\x1bx"), vec![Key::Escape, Key::Char('x')]);
        assert!(!decoder.has_pending());
    }
}
