//! Double-line frame around stacked sections.

use crate::core::text::width::pad_to_width;

const TOP_LEFT: &str = "╔";
const TOP_RIGHT: &str = "╗";
const BOTTOM_LEFT: &str = "╚";
const BOTTOM_RIGHT: &str = "╝";
const TEE_LEFT: &str = "╠";
const TEE_RIGHT: &str = "╣";
const HORIZONTAL: &str = "═";
const VERTICAL: &str = "║";

/// Draws sections inside a box, separated by horizontal rules and stretched to a fixed height.
pub struct DoubleFrame {
    border: Box<dyn Fn(&str) -> String>,
}

impl DoubleFrame {
    pub fn new(border: Box<dyn Fn(&str) -> String>) -> Self {
        Self { border }
    }

    pub fn plain() -> Self {
        Self::new(Box::new(|text| text.to_string()))
    }

    /// Lines of the framed block, each exactly `width` columns, `height` lines in total when
    /// the content fits. Frames narrower than 4 columns render nothing.
    pub fn render(&self, width: usize, height: usize, sections: &[Vec<String>]) -> Vec<String> {
        if width < 4 {
            return Vec::new();
        }
        let inner = width - 2;
        let mut lines = vec![self.rule(TOP_LEFT, TOP_RIGHT, inner)];

        for (index, section) in sections.iter().enumerate() {
            if index > 0 {
                lines.push(self.rule(TEE_LEFT, TEE_RIGHT, inner));
            }
            for line in section {
                lines.push(self.row(line, inner));
            }
        }

        while lines.len() + 1 < height {
            lines.push(self.row("", inner));
        }
        lines.push(self.rule(BOTTOM_LEFT, BOTTOM_RIGHT, inner));
        lines
    }

    fn rule(&self, left: &str, right: &str, inner: usize) -> String {
        (self.border)(&format!("{left}{}{right}", HORIZONTAL.repeat(inner)))
    }

    fn row(&self, content: &str, inner: usize) -> String {
        let vertical = (self.border)(VERTICAL);
        let body = pad_to_width(content, inner.saturating_sub(2));
        format!("{vertical} {body} {vertical}")
    }
}
