//! Terminal building blocks shared by the OOPUO desktop processes.
//!
//! # Public API Overview
//! - Drive a raw-mode terminal through [`Terminal`], backed by [`ProcessTerminal`] and kept
//!   consistent by [`TerminalGuard`].
//! - Decode raw input with [`parse_keys`], or across reads with [`KeyDecoder`].
//! - Render menus with [`SelectList`] inside a [`DoubleFrame`].
//! - Route `tracing` output to the shared log file with [`logging::init_file_logging`].

pub mod core;
pub mod logging;
pub mod platform;
pub mod widgets;

/// Keyboard input decoding.
pub use crate::core::input::{parse_keys, Key, KeyDecoder};

/// Styling primitives and the shared palette.
pub use crate::core::style::Theme;

/// Terminal interfaces and process-backed implementation.
pub use crate::core::terminal::{Terminal, TerminalGuard};
pub use crate::platform::process_terminal::ProcessTerminal;
pub use crate::platform::signals::StopSignals;

/// Runtime component trait.
pub use crate::core::component::Component;

/// Built-in menu widgets.
pub use crate::widgets::{DoubleFrame, SelectItem, SelectList, SelectListTheme};

/// Width-aware text helpers that ignore ANSI control sequences.
pub use crate::core::text::width::{pad_to_width, truncate_to_width, visible_width};
