//! # Base types for chessgrid
//!
//! This is an auxiliary crate for `chessgrid` which contains plain value types: squares, colors,
//! pieces and sets of squares. It has no game logic.
//!
//! Normally you don't want to use this crate directly. Use `chessgrid` instead, which re-exports
//! everything declared here.

pub mod bitboard;
pub mod geometry;
pub mod types;
