//! Rule engine for two-player chess on an 8x8 grid
//!
//! The core is a set of pure functions over a [`Board`] value: [`Board::initial`] builds the
//! start position, [`legal::is_legal_move`] decides whether a piece may go to a square,
//! [`movegen::legal_destinations`] lists all such squares, and [`moves::apply_move`] together
//! with [`moves::san::notate`] produce the next board and the move text.
//!
//! The rules are simplified: there is no castling, en passant or promotion, and the validator
//! doesn't care whose turn it is or whether the own king is left under attack. Turns, captured
//! pieces, check flags and clocks are kept by [`MoveChain`].

pub mod between;
pub mod board;
pub mod chain;
pub mod clock;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod status;

pub use chessgrid_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::Board;
pub use chain::MoveChain;
pub use moves::Move;
pub use types::{Cell, Color, Coord, File, Piece, Rank};
