//! Utilities to work with moves in algebraic notation
//!
//! The notation used here is a simplified SAN: a piece letter (none for pawns), an `x` on
//! captures (preceded by the source file for pawns), and the destination square. There is no
//! disambiguation, no castling, no promotion, and no check marks.

use crate::board::Board;
use crate::legal;
use crate::types::{Cell, Color, Coord, CoordParseError, File, Piece};

use std::fmt;
use std::marker::PhantomData;
use std::str::{self, FromStr};

use thiserror::Error;

/// Error parsing algebraic notation from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// String is empty
    #[error("string is empty")]
    EmptyString,
    /// String contains non-ASCII chars
    #[error("string contains non-ASCII chars")]
    NonAscii,
    /// Destination square is invalid
    #[error("invalid destination square: {0}")]
    InvalidDst(#[from] CoordParseError),
    /// Extra bytes in non-pawn move
    #[error("non-pawn move too long")]
    NonPawnMoveTooLong,
    /// String for pawn move is too short
    #[error("pawn move too short")]
    PawnMoveTooShort,
    /// Extra bytes in pawn move
    #[error("pawn move too long")]
    PawnMoveTooLong,
    /// Parsing failed for unspecified reasons
    #[error("syntax error")]
    Syntax,
}

/// Error resolving parsed notation into a move on the board
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum IntoMoveError {
    /// Capture sign is put when the destination is empty
    #[error("got capture sign on a non-capture move")]
    CaptureExpected,
    /// No piece of the moving side can make the described move
    #[error("no such move")]
    NotFound,
    /// More than one piece can make the described move
    #[error("ambiguous move (pieces on at least `{0}` and `{1}` can make it)")]
    Ambiguity(Coord, Coord),
}

/// Error parsing a move from algebraic notation
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Cannot parse the string
    #[error("cannot parse move: {0}")]
    Parse(#[from] RawParseError),
    /// Cannot convert the parsed string into a move
    #[error("cannot convert move: {0}")]
    Convert(#[from] IntoMoveError),
}

/// Style for formatting moves
///
/// The style affects only _formatting_. The parser accepts ASCII letters only.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Style {
    /// Use capital Latin letters for pieces
    #[default]
    Algebraic,
    /// Use Unicode chess symbols for pieces
    Utf8,
}

trait PieceTheme {
    fn marker() -> PhantomData<Self>;
    fn piece_to_str(piece: Piece) -> &'static str;
}

struct AlgebraicTheme;

impl PieceTheme for AlgebraicTheme {
    fn marker() -> PhantomData<Self> {
        PhantomData
    }

    fn piece_to_str(piece: Piece) -> &'static str {
        match piece {
            Piece::Pawn => "",
            Piece::King => "K",
            Piece::Knight => "N",
            Piece::Bishop => "B",
            Piece::Rook => "R",
            Piece::Queen => "Q",
        }
    }
}

struct Utf8Theme;

impl PieceTheme for Utf8Theme {
    fn marker() -> PhantomData<Self> {
        PhantomData
    }

    fn piece_to_str(piece: Piece) -> &'static str {
        match piece {
            Piece::Pawn => "",
            Piece::King => "♔",
            Piece::Knight => "♘",
            Piece::Bishop => "♗",
            Piece::Rook => "♖",
            Piece::Queen => "♕",
        }
    }
}

/// Parsed move in algebraic notation, without check marks
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Data {
    /// Pawn move without capture, like `e4`
    PawnMove {
        /// Destination square
        dst: Coord,
    },
    /// Pawn capture, like `exd5`
    PawnCapture {
        /// Source file
        src: File,
        /// Destination square
        dst: Coord,
    },
    /// Non-pawn move, like `Nc3` or `Qxd7`
    Piece {
        /// Piece to move
        piece: Piece,
        /// Is the move capture?
        is_capture: bool,
        /// Destination square
        dst: Coord,
    },
}

/// Wrapper to format [`Data`] with the given style
///
/// See [`Data::styled()`] for details.
pub struct StyledData<'a>(&'a Data, Style);

#[derive(Copy, Clone)]
enum AmbigSearcherState {
    Empty,
    Found(Coord),
    Ambiguity(Coord, Coord),
}

struct AmbigSearcher {
    state: AmbigSearcherState,
}

impl AmbigSearcher {
    fn new() -> AmbigSearcher {
        AmbigSearcher {
            state: AmbigSearcherState::Empty,
        }
    }

    fn push(&mut self, src: Coord) {
        self.state = match self.state {
            AmbigSearcherState::Empty => AmbigSearcherState::Found(src),
            AmbigSearcherState::Found(first) => AmbigSearcherState::Ambiguity(first, src),
            s @ AmbigSearcherState::Ambiguity(_, _) => s,
        };
    }

    fn get_src(&self) -> Result<Coord, IntoMoveError> {
        match self.state {
            AmbigSearcherState::Empty => Err(IntoMoveError::NotFound),
            AmbigSearcherState::Found(src) => Ok(src),
            AmbigSearcherState::Ambiguity(a, b) => Err(IntoMoveError::Ambiguity(a, b)),
        }
    }
}

impl Data {
    /// Creates the notation for a move of `piece` from `src` to `dst`
    ///
    /// The move is a capture if and only if `is_capture` is set.
    pub fn new(piece: Piece, src: Coord, dst: Coord, is_capture: bool) -> Data {
        match (piece, is_capture) {
            (Piece::Pawn, false) => Data::PawnMove { dst },
            (Piece::Pawn, true) => Data::PawnCapture {
                src: src.file(),
                dst,
            },
            (piece, is_capture) => Data::Piece {
                piece,
                is_capture,
                dst,
            },
        }
    }

    /// Destination square
    #[inline]
    pub fn dst(&self) -> Coord {
        match *self {
            Data::PawnMove { dst } | Data::PawnCapture { dst, .. } | Data::Piece { dst, .. } => dst,
        }
    }

    /// Returns the wrapper which helps to format the move with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`].
    ///
    /// # Example
    ///
    /// ```
    /// # use chessgrid::{Coord, Piece, moves::{san::Data, Style}};
    /// #
    /// let d = Data::new(Piece::Queen, "d1".parse().unwrap(), "d7".parse().unwrap(), true);
    /// assert_eq!(d.styled(Style::Algebraic).to_string(), "Qxd7");
    /// assert_eq!(d.styled(Style::Utf8).to_string(), "♕xd7");
    /// ```
    #[inline]
    pub fn styled(&self, style: Style) -> StyledData<'_> {
        StyledData(self, style)
    }

    /// Finds the piece of side `side` on board `b` which makes this move
    ///
    /// Returns source and destination squares. Every piece of the right kind is checked against
    /// the validator, and the move is accepted only if exactly one of them fits.
    pub fn into_move(self, b: &Board, side: Color) -> Result<(Coord, Coord), IntoMoveError> {
        let (piece, is_capture, file) = match self {
            Data::PawnMove { .. } => (Piece::Pawn, false, None),
            Data::PawnCapture { src, .. } => (Piece::Pawn, true, Some(src)),
            Data::Piece {
                piece, is_capture, ..
            } => (piece, is_capture, None),
        };
        let dst = self.dst();
        if is_capture && b.get(dst).is_empty() {
            return Err(IntoMoveError::CaptureExpected);
        }
        let cell = Cell::from_parts(side, piece);
        let mut searcher = AmbigSearcher::new();
        for (src, _) in b.pieces().filter(|&(_, c)| c == cell) {
            if piece == Piece::Pawn && file.unwrap_or(dst.file()) != src.file() {
                continue;
            }
            if legal::is_legal_move(b, cell, src, dst) {
                searcher.push(src);
            }
        }
        Ok((searcher.get_src()?, dst))
    }

    fn do_fmt<P: PieceTheme>(&self, f: &mut fmt::Formatter<'_>, _: PhantomData<P>) -> fmt::Result {
        match *self {
            Self::PawnMove { dst } => write!(f, "{}", dst),
            Self::PawnCapture { src, dst } => write!(f, "{}x{}", src.as_char(), dst),
            Self::Piece {
                piece,
                is_capture,
                dst,
            } => {
                f.write_str(P::piece_to_str(piece))?;
                if is_capture {
                    f.write_str("x")?;
                }
                write!(f, "{}", dst)
            }
        }
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.do_fmt(f, AlgebraicTheme::marker())
    }
}

impl<'a> fmt::Display for StyledData<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Style::Algebraic => self.0.do_fmt(f, AlgebraicTheme::marker()),
            Style::Utf8 => self.0.do_fmt(f, Utf8Theme::marker()),
        }
    }
}

fn parse_dst(bytes: &[u8]) -> Result<Coord, RawParseError> {
    // Input is checked to be ASCII, so any split is on a char boundary
    let s = str::from_utf8(bytes).map_err(|_| RawParseError::NonAscii)?;
    Ok(Coord::from_str(s)?)
}

impl FromStr for Data {
    type Err = RawParseError;

    fn from_str(data: &str) -> Result<Data, Self::Err> {
        if !data.is_ascii() {
            return Err(RawParseError::NonAscii);
        }
        let data = data.trim_end_matches(['+', '#']);
        if data.is_empty() {
            return Err(RawParseError::EmptyString);
        }

        let bytes = data.as_bytes();

        if let first @ (b'N' | b'B' | b'R' | b'Q' | b'K') = bytes[0] {
            let piece = match first {
                b'N' => Piece::Knight,
                b'B' => Piece::Bishop,
                b'R' => Piece::Rook,
                b'Q' => Piece::Queen,
                _ => Piece::King,
            };
            let bytes = &bytes[1..];
            let (is_capture, bytes) = match bytes.first() {
                Some(b'x' | b':') => (true, &bytes[1..]),
                _ => (false, bytes),
            };
            if bytes.len() > 2 {
                return Err(RawParseError::NonPawnMoveTooLong);
            }
            let dst = parse_dst(bytes)?;
            return Ok(Data::Piece {
                piece,
                is_capture,
                dst,
            });
        }

        match bytes.len() {
            0 | 1 => Err(RawParseError::PawnMoveTooShort),
            2 => Ok(Data::PawnMove {
                dst: parse_dst(bytes)?,
            }),
            3 => Err(RawParseError::Syntax),
            4 => {
                let (Some(src), b'x' | b':') = (File::from_char(bytes[0] as char), bytes[1]) else {
                    return Err(RawParseError::Syntax);
                };
                Ok(Data::PawnCapture {
                    src,
                    dst: parse_dst(&bytes[2..])?,
                })
            }
            _ => Err(RawParseError::PawnMoveTooLong),
        }
    }
}

/// Writes down the move of `piece` from `src` to `dst`, where `captured` is the former
/// contents of `dst`
///
/// # Example
///
/// ```
/// # use chessgrid::{Cell, Color, Coord, Piece, moves::san};
/// #
/// let d7 = Coord::from_row_col(1, 3).unwrap();
/// let e6 = Coord::from_row_col(2, 4).unwrap();
/// let captured = Cell::from_parts(Color::White, Piece::Knight);
/// assert_eq!(san::notate(Piece::Pawn, d7, e6, captured), "dxe6");
/// assert_eq!(san::notate(Piece::Bishop, d7, e6, Cell::EMPTY), "Be6");
/// ```
pub fn notate(piece: Piece, src: Coord, dst: Coord, captured: Cell) -> String {
    Data::new(piece, src, dst, captured.is_occupied()).to_string()
}

/// Parses the move in algebraic notation and finds it on board `b` for side `side`
///
/// Trailing check marks (`+` and `#`) are ignored.
pub fn parse(s: &str, b: &Board, side: Color) -> Result<(Coord, Coord), ParseError> {
    Ok(Data::from_str(s)?.into_move(b, side)?)
}
