//! Renderable component interface.

/// Something that renders itself as a block of terminal lines.
pub trait Component {
    /// Render to a list of lines, each at most `width` columns wide.
    fn render(&mut self, width: usize) -> Vec<String>;
}
