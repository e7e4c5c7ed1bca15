//! Applying moves and writing them down

mod base;

pub mod san;
pub mod uci;

pub use base::*;

pub use san::Style;
