//! Utilities to work with moves in UCI format

use super::base;
use crate::board::Board;
use crate::types::{Coord, CoordParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a move in UCI format from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
}

/// Parsed move in UCI format, like `e2e4`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// Source square
    pub src: Coord,
    /// Destination square
    pub dst: Coord,
}

impl Move {
    /// Applies the move on board `b`, checking its legality
    ///
    /// This is a shorthand for [`moves::Move::make_legal`](super::Move::make_legal).
    #[inline]
    pub fn make_legal(self, b: &Board) -> Result<(Board, base::Move), base::MakeError> {
        base::Move::make_legal(b, self.src, self.dst)
    }
}

impl From<&base::Move> for Move {
    #[inline]
    fn from(mv: &base::Move) -> Move {
        mv.uci()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

impl FromStr for Move {
    type Err = RawParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if s.len() != 4 {
            return Err(RawParseError::BadLength);
        }
        let (Some(src), Some(dst)) = (s.get(0..2), s.get(2..4)) else {
            return Err(RawParseError::BadLength);
        };
        let src = Coord::from_str(src).map_err(RawParseError::BadSrc)?;
        let dst = Coord::from_str(dst).map_err(RawParseError::BadDst)?;
        Ok(Move { src, dst })
    }
}
