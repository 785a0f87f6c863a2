//! SelectList widget: a vertical menu with one highlighted entry.

use crate::core::component::Component;
use crate::core::text::width::truncate_to_width;

pub const SELECTED_PREFIX: &str = "➜ ";
const UNSELECTED_PREFIX: &str = "  ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectItem {
    pub label: String,
    /// De-emphasised when not selected.
    pub muted: bool,
}

impl SelectItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            muted: false,
        }
    }

    pub fn muted(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            muted: true,
        }
    }
}

pub struct SelectListTheme {
    pub selected_text: Box<dyn Fn(&str) -> String>,
    pub text: Box<dyn Fn(&str) -> String>,
    pub muted_text: Box<dyn Fn(&str) -> String>,
}

impl SelectListTheme {
    /// Theme that leaves labels unstyled.
    pub fn plain() -> Self {
        Self {
            selected_text: Box::new(|text| text.to_string()),
            text: Box::new(|text| text.to_string()),
            muted_text: Box::new(|text| text.to_string()),
        }
    }
}

/// Cursor movement stops at either end; there is no wrap-around.
pub struct SelectList {
    items: Vec<SelectItem>,
    selected_index: usize,
    theme: SelectListTheme,
}

impl SelectList {
    pub fn new(items: Vec<SelectItem>, theme: SelectListTheme) -> Self {
        Self {
            items,
            selected_index: 0,
            theme,
        }
    }

    pub fn items(&self) -> &[SelectItem] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn set_selected_index(&mut self, index: usize) {
        self.selected_index = index.min(self.items.len().saturating_sub(1));
    }

    pub fn selected_item(&self) -> Option<&SelectItem> {
        self.items.get(self.selected_index)
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.set_selected_index(self.selected_index + 1);
    }

    fn render_item(&self, index: usize, item: &SelectItem, width: usize) -> String {
        let label_width = width.saturating_sub(SELECTED_PREFIX.chars().count());
        let label = truncate_to_width(&item.label, label_width);
        if index == self.selected_index {
            format!("{SELECTED_PREFIX}{}", (self.theme.selected_text)(&label))
        } else if item.muted {
            format!("{UNSELECTED_PREFIX}{}", (self.theme.muted_text)(&label))
        } else {
            format!("{UNSELECTED_PREFIX}{}", (self.theme.text)(&label))
        }
    }
}

impl Component for SelectList {
    fn render(&mut self, width: usize) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| self.render_item(index, item, width))
            .collect()
    }
}
