//! Terminal-facing primitives: the terminal contract, key decoding, styling and text measurement.

pub mod component;
pub mod input;
pub mod style;
pub mod terminal;
pub mod text;
