use super::{san, uci};
use crate::board::Board;
use crate::legal;
use crate::types::{Cell, Color, Coord, Piece};

use std::fmt;

use thiserror::Error;

/// Error making a [`Move`]
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MakeError {
    /// There is no piece on the source square
    #[error("no piece on {0}")]
    EmptySource(Coord),
    /// The validator rejected the move
    #[error("move {src}{dst} is not legal")]
    NotLegal { src: Coord, dst: Coord },
}

/// Moves the contents of `src` to `dst` and returns the new board with the captured cell
///
/// The old board is left intact. Whatever stood on `dst` is overwritten and returned as the
/// captured cell ([`Cell::EMPTY`] if the square was free), and `src` becomes empty.
///
/// This function doesn't check legality. Use [`legal::is_legal_move`] or [`Move::make_legal`]
/// first if the move comes from an untrusted source.
pub fn apply_move(b: &Board, src: Coord, dst: Coord) -> (Board, Cell) {
    let mut res = *b;
    let captured = res.get(dst);
    res.put(dst, b.get(src));
    res.put(src, Cell::EMPTY);
    (res, captured)
}

/// Committed move
///
/// This is a record of a move which was already made: what moved, from where, to where,
/// what was captured, and how the move is written in algebraic notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    san: String,
    cell: Cell,
    src: Coord,
    dst: Coord,
    captured: Cell,
}

impl Move {
    /// Applies the move from `src` to `dst` without checking its legality
    ///
    /// Returns the new board and the record of the move. Fails only if `src` is empty.
    pub fn make(b: &Board, src: Coord, dst: Coord) -> Result<(Board, Move), MakeError> {
        let cell = b.get(src);
        let piece = cell.piece().ok_or(MakeError::EmptySource(src))?;
        let (board, captured) = apply_move(b, src, dst);
        let mv = Move {
            san: san::notate(piece, src, dst, captured),
            cell,
            src,
            dst,
            captured,
        };
        Ok((board, mv))
    }

    /// Same as [`Move::make`], but fails if the validator rejects the move
    pub fn make_legal(b: &Board, src: Coord, dst: Coord) -> Result<(Board, Move), MakeError> {
        let cell = b.get(src);
        if cell.is_empty() {
            return Err(MakeError::EmptySource(src));
        }
        if !legal::is_legal_move(b, cell, src, dst) {
            return Err(MakeError::NotLegal { src, dst });
        }
        Self::make(b, src, dst)
    }

    /// Move in algebraic notation, like `e4`, `Nc3` or `dxe6`
    #[inline]
    pub fn san(&self) -> &str {
        &self.san
    }

    /// Cell of the moved piece
    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.cell.piece().unwrap_or(Piece::Pawn)
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.cell.color().unwrap_or(Color::White)
    }

    #[inline]
    pub fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub fn dst(&self) -> Coord {
        self.dst
    }

    /// Captured cell, or `None` if the destination was empty
    #[inline]
    pub fn captured(&self) -> Option<Cell> {
        self.captured.is_occupied().then_some(self.captured)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_occupied()
    }

    /// Converts this move into source and destination squares in UCI format
    #[inline]
    pub fn uci(&self) -> uci::Move {
        uci::Move {
            src: self.src,
            dst: self.dst,
        }
    }

    /// Converts this move into the parsed representation of its algebraic notation
    #[inline]
    pub fn san_data(&self) -> san::Data {
        san::Data::new(self.piece(), self.src, self.dst, self.is_capture())
    }

    /// Returns the notation of the move in the given style
    ///
    /// # Example
    ///
    /// ```
    /// # use chessgrid::{Board, Coord, Move, moves::Style};
    /// #
    /// let b = Board::initial();
    /// let g1 = "g1".parse::<Coord>().unwrap();
    /// let f3 = "f3".parse::<Coord>().unwrap();
    /// let (_, mv) = Move::make_legal(&b, g1, f3).unwrap();
    /// assert_eq!(mv.styled(Style::Algebraic), "Nf3");
    /// assert_eq!(mv.styled(Style::Utf8), "♘f3");
    /// assert_eq!(mv.uci().to_string(), "g1f3");
    /// ```
    pub fn styled(&self, style: san::Style) -> String {
        self.san_data().styled(style).to_string()
    }
}

impl fmt::Display for Move {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(&self.san)
    }
}
