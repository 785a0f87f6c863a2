//! Text helpers (ANSI parsing, width calculations, truncation and padding).
//!
//! These helpers are pure (string in/string out) so widgets can use them freely.

pub mod ansi;
pub mod width;
