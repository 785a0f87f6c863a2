//! ANSI escape sequence recognition.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiCodeKind {
    Csi,
    Osc,
    Ss3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiCode {
    pub code: String,
    pub length: usize,
    pub kind: AnsiCodeKind,
}

/// Recognise a complete escape sequence starting at byte `pos`.
pub fn extract_ansi_code(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    if pos + 1 >= bytes.len() || bytes[pos] != 0x1b {
        return None;
    }

    match bytes[pos + 1] {
        b'[' => extract_csi(input, pos),
        b']' => extract_osc(input, pos),
        b'O' => extract_ss3(input, pos),
        _ => None,
    }
}

/// Remove every recognised escape sequence from `input`.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(code) = extract_ansi_code(input, idx) {
            idx += code.length;
            continue;
        }
        let Some(ch) = input[idx..].chars().next() else {
            break;
        };
        out.push(ch);
        idx += ch.len_utf8();
    }
    out
}

fn code(input: &str, pos: usize, end: usize, kind: AnsiCodeKind) -> AnsiCode {
    AnsiCode {
        code: input[pos..end].to_string(),
        length: end - pos,
        kind,
    }
}

fn extract_csi(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    (pos + 2..bytes.len())
        .find(|&idx| (0x40..=0x7e).contains(&bytes[idx]))
        .map(|idx| code(input, pos, idx + 1, AnsiCodeKind::Csi))
}

fn extract_osc(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    let mut idx = pos + 2;
    while idx < bytes.len() {
        if bytes[idx] == 0x07 {
            return Some(code(input, pos, idx + 1, AnsiCodeKind::Osc));
        }
        if bytes[idx] == 0x1b && bytes.get(idx + 1) == Some(&b'\\') {
            return Some(code(input, pos, idx + 2, AnsiCodeKind::Osc));
        }
        idx += 1;
    }
    None
}

fn extract_ss3(input: &str, pos: usize) -> Option<AnsiCode> {
    let end = pos + 3;
    if end > input.len() || !input.is_char_boundary(end) {
        return None;
    }
    Some(code(input, pos, end, AnsiCodeKind::Ss3))
}
