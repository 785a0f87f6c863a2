//! Grapheme width and visible width helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::ansi::extract_ansi_code;

const ANSI_RESET: &str = "\x1b[0m";

/// Column width of `input` once escape sequences are ignored.
pub fn visible_width(input: &str) -> usize {
    let mut width = 0;
    for segment in segments(input) {
        if let Segment::Grapheme(grapheme) = segment {
            width += UnicodeWidthStr::width(grapheme);
        }
    }
    width
}

/// Cut `text` to at most `max_width` visible columns, keeping escape sequences intact.
///
/// When anything is cut, a reset is appended so a truncated style cannot leak.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if visible_width(text) <= max_width {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + ANSI_RESET.len());
    let mut width = 0;
    for segment in segments(text) {
        match segment {
            Segment::Ansi(code) => out.push_str(code),
            Segment::Grapheme(grapheme) => {
                let grapheme_width = UnicodeWidthStr::width(grapheme);
                if width + grapheme_width > max_width {
                    break;
                }
                out.push_str(grapheme);
                width += grapheme_width;
            }
        }
    }
    out.push_str(ANSI_RESET);
    out
}

/// Truncate or right-pad `text` with spaces to exactly `width` visible columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let visible = visible_width(&truncated);
    format!("{truncated}{}", " ".repeat(width.saturating_sub(visible)))
}

enum Segment<'a> {
    Ansi(&'a str),
    Grapheme(&'a str),
}

fn segments(input: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut idx = 0;
    while idx < input.len() {
        if let Some(ansi) = extract_ansi_code(input, idx) {
            out.push(Segment::Ansi(&input[idx..idx + ansi.length]));
            idx += ansi.length;
            continue;
        }
        let end = next_escape_or_end(input, idx);
        out.extend(input[idx..end].graphemes(true).map(Segment::Grapheme));
        idx = end;
    }
    out
}

fn next_escape_or_end(input: &str, start: usize) -> usize {
    // An unrecognised ESC is treated as text so the scan always advances.
    let first = input[start..].chars().next().map_or(1, char::len_utf8);
    let from = start + first;
    input[from..]
        .find('\x1b')
        .map(|offset| from + offset)
        .unwrap_or(input.len())
}
