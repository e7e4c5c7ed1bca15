use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing [`Coord`] from string
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    /// First char is not in `a..=h`
    #[error("unexpected file char {0:?}")]
    UnexpectedFile(char),
    /// Second char is not in `1..=8`
    #[error("unexpected rank char {0:?}")]
    UnexpectedRank(char),
    /// String is not two chars long
    #[error("invalid string length")]
    BadLength,
}

/// Error parsing [`Color`] from string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color {0:?}")]
    Unexpected(String),
}

/// Error parsing [`Cell`] from string
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// Board file (column)
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Column index, `0` for file `a`
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn try_from_index(val: usize) -> Option<File> {
        match val {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// # Panics
    ///
    /// Panics if `val` is not in `0..8`.
    pub const fn from_index(val: usize) -> File {
        match Self::try_from_index(val) {
            Some(file) => file,
            None => panic!("file index must be between 0 and 7"),
        }
    }

    #[inline]
    pub const fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }

    pub fn from_char(c: char) -> Option<File> {
        match c {
            'a'..='h' => File::try_from_index(c as usize - 'a' as usize),
            _ => None,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(File::from_index)
    }
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Board rank (row)
///
/// Ranks are declared top to bottom, so `Rank::R8` has index `0`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

impl Rank {
    /// Row index, `0` for rank 8
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn try_from_index(val: usize) -> Option<Rank> {
        match val {
            0 => Some(Rank::R8),
            1 => Some(Rank::R7),
            2 => Some(Rank::R6),
            3 => Some(Rank::R5),
            4 => Some(Rank::R4),
            5 => Some(Rank::R3),
            6 => Some(Rank::R2),
            7 => Some(Rank::R1),
            _ => None,
        }
    }

    /// # Panics
    ///
    /// Panics if `val` is not in `0..8`.
    pub const fn from_index(val: usize) -> Rank {
        match Self::try_from_index(val) {
            Some(rank) => rank,
            None => panic!("rank index must be between 0 and 7"),
        }
    }

    /// Rank digit, i.e. `8 - row`
    #[inline]
    pub const fn as_char(&self) -> char {
        (b'8' - *self as u8) as char
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            '1'..='8' => Rank::try_from_index('8' as usize - c as usize),
            _ => None,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(Rank::from_index)
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Square on the board
///
/// Internally, it is stored as `row * 8 + col`, so iterating over indices walks the board in
/// row-major order, starting from `a8`. Row 0 is rank 8 and row 7 is rank 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    /// # Panics
    ///
    /// Panics if `val` is not in `0..64`.
    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord(val as u8)
    }

    pub const fn try_from_index(val: usize) -> Option<Coord> {
        if val < 64 {
            Some(Coord(val as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(((rank as u8) << 3) | file as u8)
    }

    /// Creates a square from signed row and column
    ///
    /// Returns `None` if any of them lies outside `0..8`.
    #[inline]
    pub const fn from_row_col(row: isize, col: isize) -> Option<Coord> {
        if row < 0 || row >= 8 || col < 0 || col >= 8 {
            return None;
        }
        Some(Coord((row * 8 + col) as u8))
    }

    #[inline]
    pub const fn file(&self) -> File {
        File::from_index((self.0 & 7) as usize)
    }

    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index((self.0 >> 3) as usize)
    }

    #[inline]
    pub const fn row(&self) -> usize {
        (self.0 >> 3) as usize
    }

    #[inline]
    pub const fn col(&self) -> usize {
        (self.0 & 7) as usize
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the square shifted by `drow` rows and `dcol` columns, or `None` if it falls off the board
    #[inline]
    pub const fn offset(self, drow: isize, dcol: isize) -> Option<Coord> {
        Coord::from_row_col(self.row() as isize + drow, self.col() as isize + dcol)
    }

    /// Iterates over all the squares in row-major order
    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Coord)
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file().as_char(), self.rank().as_char())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CoordParseError::BadLength);
        };
        let file = File::from_char(file).ok_or(CoordParseError::UnexpectedFile(file))?;
        let rank = Rank::from_char(rank).ok_or(CoordParseError::UnexpectedRank(rank))?;
        Ok(Coord::from_parts(file, rank))
    }
}

/// Side color
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Returns the opposite color
    #[inline]
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn as_str(&self) -> &'static str {
        match *self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Color, Self::Err> {
        match s {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            _ => Err(ColorParseError::Unexpected(s.to_string())),
        }
    }
}

/// Piece kind
///
/// This is a closed set; every piece-specific rule in the crate matches on it exhaustively.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl Piece {
    pub const COUNT: usize = 6;

    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Piece::Pawn,
            Piece::King,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
        ]
        .into_iter()
    }

    /// Uppercase Latin letter of the piece (`P` for pawn)
    pub const fn as_char(&self) -> char {
        match *self {
            Piece::Pawn => 'P',
            Piece::King => 'K',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
        }
    }
}

/// Contents of a single square: either empty or a piece of some color
///
/// A cell is a plain value. Pieces have no identity, so moving a piece just copies its cell to
/// another square.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const COUNT: usize = 13;

    #[inline]
    pub const fn from_parts(c: Color, p: Piece) -> Cell {
        Cell(match c {
            Color::White => 1 + p as u8,
            Color::Black => 7 + p as u8,
        })
    }

    /// # Panics
    ///
    /// Panics if `val` is not less than [`Cell::COUNT`].
    pub const fn from_index(val: usize) -> Cell {
        assert!(val < Self::COUNT, "index too large");
        Cell(val as u8)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    #[inline]
    pub const fn piece(&self) -> Option<Piece> {
        match self.0 {
            0 => None,
            1 | 7 => Some(Piece::Pawn),
            2 | 8 => Some(Piece::King),
            3 | 9 => Some(Piece::Knight),
            4 | 10 => Some(Piece::Bishop),
            5 | 11 => Some(Piece::Rook),
            _ => Some(Piece::Queen),
        }
    }

    /// Returns color and piece kind together, or `None` for an empty cell
    #[inline]
    pub const fn parts(&self) -> Option<(Color, Piece)> {
        match (self.color(), self.piece()) {
            (Some(c), Some(p)) => Some((c, p)),
            _ => None,
        }
    }

    /// Returns `true` if both cells are occupied and have different colors
    #[inline]
    pub fn is_enemy_of(&self, other: Cell) -> bool {
        matches!((self.color(), other.color()), (Some(a), Some(b)) if a != b)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Cell::from_index)
    }

    /// FEN letter of the cell, `.` for an empty one
    pub fn as_char(&self) -> char {
        b".PKNBRQpknbrq"[self.index()] as char
    }

    pub fn as_utf8_char(&self) -> char {
        [
            '.', '♙', '♔', '♘', '♗', '♖', '♕', '♟', '♚', '♞', '♝', '♜', '♛',
        ][self.index()]
    }

    pub fn from_char(c: char) -> Option<Cell> {
        if c == '.' {
            return Some(Cell::EMPTY);
        }
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'k' => Piece::King,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            _ => return None,
        };
        Some(Cell::from_parts(color, piece))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Cell::from_char(c).ok_or(CellParseError::UnexpectedChar(c)),
            _ => Err(CellParseError::BadLength),
        }
    }
}
