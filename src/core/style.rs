//! 256-colour ANSI styling.

pub const RESET: &str = "\x1b[0m";
pub const CURSOR_HOME: &str = "\x1b[H";
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[J";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Wrap `text` in a 256-colour foreground.
pub fn fg(text: &str, colour: u8) -> String {
    format!("\x1b[38;5;{colour}m{text}{RESET}")
}

pub fn bold(text: &str) -> String {
    format!("\x1b[1m{text}{RESET}")
}

/// Palette shared by the desktop's panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: u8,
    pub success: u8,
    pub error: u8,
    pub muted: u8,
    pub accent: u8,
    pub text: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: 51,
            success: 46,
            error: 196,
            muted: 240,
            accent: 198,
            text: 255,
        }
    }
}
