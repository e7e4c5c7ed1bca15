//! Board and related things

use crate::geometry;
use crate::types::{Cell, Color, Coord, File, Piece, Rank};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the piece placement part of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Chess board
///
/// The board is just an 8×8 grid of [`Cell`]s. It doesn't know whose turn it is and doesn't
/// validate the position, so any placement of pieces (including boards without kings) is allowed.
///
/// `Board` is `Copy`: making a move produces a new board and leaves the old one intact.
///
/// # Example
///
/// ```
/// # use chessgrid::{Board, Cell, Color, File, Piece, Rank};
/// #
/// let mut board = Board::empty();
/// board.put2(File::B, Rank::R2, Cell::from_parts(Color::White, Piece::King));
/// board.put2(File::D, Rank::R5, Cell::from_parts(Color::Black, Piece::King));
/// assert_eq!(board.as_fen(), "8/8/8/3k4/8/8/1K6/8");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Cell; 64],
}

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
        }
    }

    /// Returns a board with the standard initial position
    ///
    /// Black occupies rows 0 and 1 (ranks 8 and 7), White occupies rows 6 and 7 (ranks 2 and 1).
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for color in [Color::White, Color::Black] {
            let pawn_rank = geometry::pawn_home_rank(color);
            let back_rank = geometry::back_rank(color);
            for (file, piece) in File::iter().zip(geometry::BACK_RANK_ORDER) {
                res.put2(file, pawn_rank, Cell::from_parts(color, Piece::Pawn));
                res.put2(file, back_rank, Cell::from_parts(color, piece));
            }
        }
        res
    }

    /// Parses a board from the piece placement part of FEN
    ///
    /// Does the same as [`Board::from_str`].
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Board, CellsParseError> {
        Board::from_str(fen)
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` to the square with coordinate `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Returns a copy of the board with `cell` put to `c`
    #[inline]
    pub fn with(mut self, c: Coord, cell: Cell) -> Board {
        self.put(c, cell);
        self
    }

    /// Iterates over all the occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        Coord::iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, cell)| cell.is_occupied())
    }

    /// Returns the position of the king of color `c`
    ///
    /// Boards are not validated, so this returns `None` if there is no such king. If there are
    /// many, the first one in row-major order is returned.
    pub fn king_pos(&self, c: Color) -> Option<Coord> {
        let king = Cell::from_parts(c, Piece::King);
        Coord::iter().find(|&p| self.get(p) == king)
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    ///
    /// # Example
    ///
    /// ```
    /// # use chessgrid::{Board, board::PrettyStyle};
    /// #
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// let out = Board::initial().pretty(PrettyStyle::Ascii).to_string();
    /// assert_eq!(out.trim_end(), res.trim_start_matches('\n').trim_end());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Converts the board into the piece placement part of FEN
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn cell(c: Cell) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(b.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}

impl FromStr for Board {
    type Err = CellsParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = CellsParseError;

        let mut file = 0_usize;
        let mut rank = 0_usize;
        let mut pos = 0_usize;
        let mut cells = [Cell::EMPTY; 64];
        for c in s.chars() {
            match c {
                '1'..='8' => {
                    let add = c as usize - '0' as usize;
                    if file + add > 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    file += add;
                    pos += add;
                }
                '/' => {
                    if file < 8 {
                        return Err(Error::RankUnderflow(Rank::from_index(rank)));
                    }
                    rank += 1;
                    file = 0;
                    if rank >= 8 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    if file >= 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    cells[pos] = match Cell::from_char(c) {
                        Some(cell) if cell.is_occupied() => cell,
                        _ => return Err(Error::UnexpectedChar(c)),
                    };
                    file += 1;
                    pos += 1;
                }
            }
        }

        if file < 8 {
            return Err(Error::RankUnderflow(Rank::from_index(rank)));
        }
        if rank < 7 {
            return Err(Error::Underflow);
        }

        Ok(Board { cells })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank != Rank::R8 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let cell = self.get2(file, rank);
                if cell.is_empty() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", empty)?;
                    empty = 0;
                }
                write!(f, "{}", cell)?;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INI_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn test_initial() {
        assert_eq!(Board::initial().as_fen(), INI_FEN);
        assert_eq!(Board::from_fen(INI_FEN), Ok(Board::initial()));
    }

    #[test]
    fn test_initial_layout() {
        let b = Board::initial();
        for c in Coord::iter() {
            let cell = b.get(c);
            match c.row() {
                0 => assert_eq!(
                    cell,
                    Cell::from_parts(Color::Black, geometry::BACK_RANK_ORDER[c.col()])
                ),
                1 => assert_eq!(cell, Cell::from_parts(Color::Black, Piece::Pawn)),
                6 => assert_eq!(cell, Cell::from_parts(Color::White, Piece::Pawn)),
                7 => assert_eq!(
                    cell,
                    Cell::from_parts(Color::White, geometry::BACK_RANK_ORDER[c.col()])
                ),
                _ => assert!(cell.is_empty(), "{} must be empty", c),
            }
        }
        assert_eq!(
            b.get(Coord::from_row_col(0, 3).unwrap()),
            Cell::from_parts(Color::Black, Piece::Queen)
        );
        assert_eq!(
            b.get(Coord::from_row_col(7, 4).unwrap()),
            Cell::from_parts(Color::White, Piece::King)
        );
        assert_eq!(b.pieces().count(), 32);
    }

    #[test]
    fn test_midgame() {
        const FEN: &str = "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K";

        let board = Board::from_fen(FEN).unwrap();
        assert_eq!(board.as_fen(), FEN);
        assert_eq!(
            board.get2(File::B, Rank::R4),
            Cell::from_parts(Color::Black, Piece::Bishop)
        );
        assert_eq!(
            board.get2(File::F, Rank::R2),
            Cell::from_parts(Color::White, Piece::Queen)
        );
        assert_eq!(
            board.king_pos(Color::White),
            Some(Coord::from_parts(File::H, Rank::R1))
        );
        assert_eq!(
            board.king_pos(Color::Black),
            Some(Coord::from_parts(File::G, Rank::R8))
        );
        assert_eq!(Board::empty().king_pos(Color::White), None);
    }

    #[test]
    fn test_bad_fen() {
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP"),
            Err(CellsParseError::Underflow)
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8"),
            Err(CellsParseError::Overflow)
        );
        assert_eq!(
            Board::from_fen("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(CellsParseError::RankOverflow(Rank::R8))
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(CellsParseError::RankUnderflow(Rank::R7))
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4x3/8/PPPPPPPP/RNBQKBNR"),
            Err(CellsParseError::UnexpectedChar('x'))
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4.3/8/PPPPPPPP/RNBQKBNR"),
            Err(CellsParseError::UnexpectedChar('.'))
        );
    }

    #[test]
    fn test_copy_semantics() {
        let b = Board::initial();
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let changed = b.with(e2, Cell::EMPTY);
        assert!(changed.get(e2).is_empty());
        assert!(b.get(e2).is_occupied());
    }

    #[test]
    fn test_pretty_utf8() {
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        let res = "8│....♚...\n\
                   7│........\n\
                   6│........\n\
                   5│........\n\
                   4│........\n\
                   3│........\n\
                   2│........\n\
                   1│....♔...\n\
                   ─┼────────\n \
                   │abcdefgh\n";
        assert_eq!(b.pretty(PrettyStyle::Utf8).to_string(), res);
    }
}
