//! Menu widgets.

pub mod frame;
pub mod select_list;

pub use frame::DoubleFrame;
pub use select_list::{SelectItem, SelectList, SelectListTheme, SELECTED_PREFIX};
