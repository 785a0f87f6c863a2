use oopuo_tui::core::style::{fg, CLEAR_SCREEN, CURSOR_HOME};
use oopuo_tui::{Component, DoubleFrame, SelectList, Theme};

/// Frame border plus one column of padding on each side.
const FRAME_CHROME: usize = 4;

pub const TUNNEL_ACTIVE: &str = "✓ Tunnel active";
pub const TUNNEL_MISSING: &str = "LXC not connected!";
pub const TUNNEL_HINT: &str = "Connect now in SETTINGS";

pub(crate) fn frame_lines(
    list: &mut SelectList,
    theme: &Theme,
    tunnel_active: bool,
    width: usize,
    height: usize,
) -> Vec<String> {
    let inner = width.saturating_sub(FRAME_CHROME);
    let sections = [list.render(inner), tunnel_footer(theme, tunnel_active)];
    let primary = theme.primary;
    DoubleFrame::new(Box::new(move |text| fg(text, primary))).render(width, height, &sections)
}

fn tunnel_footer(theme: &Theme, tunnel_active: bool) -> Vec<String> {
    if tunnel_active {
        return vec![fg(TUNNEL_ACTIVE, theme.success)];
    }
    vec![
        format!("{}{}", fg("⚠ ", theme.error), fg(TUNNEL_MISSING, theme.text)),
        fg(TUNNEL_HINT, theme.muted),
    ]
}

/// One frame for a raw-mode terminal. Without `clear` the previous frame is overwritten in place,
/// which is enough because every line spans the full width.
pub fn screen(lines: &[String], clear: bool) -> String {
    let prefix = if clear { CLEAR_SCREEN } else { CURSOR_HOME };
    format!("{prefix}{}", lines.join("\r\n"))
}

#[cfg(test)]
mod tests {
    use oopuo_tui::core::text::ansi::strip_ansi;
    use oopuo_tui::{visible_width, SelectItem, SelectListTheme, Theme};

    use super::*;

    fn list() -> SelectList {
        SelectList::new(
            vec![SelectItem::new("DASHBOARD"), SelectItem::muted("DISCONNECT")],
            SelectListTheme::plain(),
        )
    }

    #[test]
    fn footer_reflects_tunnel_state() {
        let theme = Theme::default();
        let active: Vec<String> = frame_lines(&mut list(), &theme, true, 30, 10)
            .iter()
            .map(|line| strip_ansi(line))
            .collect();
        assert!(active.iter().any(|line| line.contains(TUNNEL_ACTIVE)));
        assert!(!active.iter().any(|line| line.contains(TUNNEL_MISSING)));

        let missing: Vec<String> = frame_lines(&mut list(), &theme, false, 30, 10)
            .iter()
            .map(|line| strip_ansi(line))
            .collect();
        assert!(missing.iter().any(|line| line.contains("⚠ LXC not connected!")));
        assert!(missing.iter().any(|line| line.contains(TUNNEL_HINT)));
    }

    #[test]
    fn frame_fills_terminal() {
        let lines = frame_lines(&mut list(), &Theme::default(), true, 30, 12);
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|line| visible_width(line) == 30));
        assert!(strip_ansi(&lines[0]).starts_with('╔'));
        assert!(strip_ansi(&lines[11]).starts_with('╚'));
    }

    #[test]
    fn screen_clears_only_when_asked() {
        let lines = ["a".to_string(), "b".to_string()];
        assert_eq!(screen(&lines, true), "\x1b[H\x1b[Ja\r\nb");
        assert_eq!(screen(&lines, false), "\x1b[Ha\r\nb");
    }
}
