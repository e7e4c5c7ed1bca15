use crate::board::Board;
use crate::clock::{self, Clock};
use crate::movegen::Selection;
use crate::moves::{san, uci, MakeError, Move};
use crate::status::{self, Status};
use crate::types::{Cell, Color, Coord};

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, trace};

/// Error applying a move to a [`MoveChain`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// There is no piece on the source square
    #[error("no piece on {0}")]
    EmptySource(Coord),
    /// The piece on the source square belongs to the side which is not to move
    #[error("piece on {square} is {found}, but {expected} is to move")]
    WrongSide {
        square: Coord,
        expected: Color,
        found: Color,
    },
    /// The validator rejected the move
    #[error("move {src}{dst} is not legal")]
    IllegalMove { src: Coord, dst: Coord },
    /// Cannot parse UCI move
    #[error("cannot parse UCI move: {0}")]
    Uci(#[from] uci::RawParseError),
    /// Cannot parse or resolve SAN move
    #[error("cannot parse SAN move: {0}")]
    San(#[from] san::ParseError),
}

impl From<MakeError> for ChainError {
    fn from(e: MakeError) -> ChainError {
        match e {
            MakeError::EmptySource(c) => ChainError::EmptySource(c),
            MakeError::NotLegal { src, dst } => ChainError::IllegalMove { src, dst },
        }
    }
}

/// Error applying a list of UCI moves
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot apply UCI move #{}: {}", .pos + 1, .source)]
pub struct UciListError {
    pub pos: usize,
    pub source: ChainError,
}

/// Settings of a [`MoveChain`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// Time given to each side
    pub time_limit: Duration,
    /// Recalculate check flags after each move
    ///
    /// If unset, [`MoveChain::status()`] always returns an empty [`Status`].
    pub track_status: bool,
}

impl Config {
    #[inline]
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    #[inline]
    pub fn track_status(mut self, track: bool) -> Self {
        self.track_status = track;
        self
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Config {
            time_limit: clock::DEFAULT_TIME_LIMIT,
            track_status: true,
        }
    }
}

/// Sequence of moves played from a start position
///
/// The chain owns the live board and is the place where turns are enforced: the validator
/// itself doesn't know whose turn it is.
///
/// # Example
///
/// ```
/// # use chessgrid::MoveChain;
/// #
/// let mut chain = MoveChain::new_initial();
/// chain.push_san("e4").unwrap();
/// chain.push_uci("e7e5").unwrap();
/// chain.push_san("Nf3").unwrap();
/// assert_eq!(chain.san_list().to_string(), "1. e4 e5 2. Nf3");
/// assert!(chain.push_san("Nf3").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveChain {
    config: Config,
    start_side: Color,
    board: Board,
    side: Color,
    stack: Vec<(Move, Board)>,
    captured: [Vec<Cell>; 2],
    status: Status,
    clock: Clock,
}

impl MoveChain {
    /// Creates a chain starting from the initial position
    pub fn new(config: Config) -> Self {
        Self::from_board(Board::initial(), Color::White, config)
    }

    /// Creates a chain starting from the initial position with the default config
    pub fn new_initial() -> Self {
        Self::new(Config::default())
    }

    /// Creates a chain starting from board `b` with side `side` to move
    pub fn from_board(b: Board, side: Color, config: Config) -> Self {
        let mut res = MoveChain {
            config,
            start_side: side,
            board: b,
            side,
            stack: Vec::new(),
            captured: [Vec::new(), Vec::new()],
            status: Status::default(),
            clock: Clock::new(config.time_limit),
        };
        res.update_status();
        res
    }

    /// Current board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Moves made so far, in chronological order
    #[inline]
    pub fn moves(&self) -> impl ExactSizeIterator<Item = &Move> + '_ {
        self.stack.iter().map(|(mv, _)| mv)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.stack.last().map(|(mv, _)| mv)
    }

    /// Pieces captured by side `c`, in the order of capture
    #[inline]
    pub fn captured(&self, c: Color) -> &[Cell] {
        &self.captured[c.index()]
    }

    /// Check flags of the side to move
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns `true` if the side to move is checkmated or has run out of time
    ///
    /// Moves can still be pushed into a finished chain.
    pub fn is_finished(&self) -> bool {
        self.status.checkmate || self.clock.is_flagged(self.side)
    }

    fn check_side(&self, src: Coord) -> Result<Cell, ChainError> {
        let cell = self.board.get(src);
        match cell.color() {
            None => Err(ChainError::EmptySource(src)),
            Some(found) if found != self.side => Err(ChainError::WrongSide {
                square: src,
                expected: self.side,
                found,
            }),
            Some(_) => Ok(cell),
        }
    }

    /// Selects the piece on `src`, which must belong to the side to move
    pub fn select(&self, src: Coord) -> Result<Selection, ChainError> {
        self.check_side(src)?;
        let sel = Selection::new(&self.board, src).ok_or(ChainError::EmptySource(src))?;
        debug!(square = %src, targets = sel.targets().len(), "piece selected");
        Ok(sel)
    }

    /// Makes the move from `src` to `dst`
    ///
    /// On error, the chain is left unchanged.
    pub fn push(&mut self, src: Coord, dst: Coord) -> Result<&Move, ChainError> {
        let (board, mv) = self
            .check_side(src)
            .and_then(|_| Ok(Move::make_legal(&self.board, src, dst)?))
            .map_err(|e| {
                trace!(%src, %dst, error = %e, "move rejected");
                e
            })?;
        debug!(side = %self.side, san = mv.san(), "move accepted");
        if let Some(cell) = mv.captured() {
            self.captured[self.side.index()].push(cell);
        }
        let prev = std::mem::replace(&mut self.board, board);
        self.stack.push((mv, prev));
        self.side = self.side.inv();
        self.update_status();
        Ok(&self.stack[self.stack.len() - 1].0)
    }

    /// Parses the move in UCI format (like `e2e4`) and makes it
    pub fn push_uci(&mut self, s: &str) -> Result<&Move, ChainError> {
        let mv: uci::Move = s.parse()?;
        self.push(mv.src, mv.dst)
    }

    /// Parses the move in algebraic notation (like `Nf3`) and makes it
    pub fn push_san(&mut self, s: &str) -> Result<&Move, ChainError> {
        let (src, dst) = san::parse(s, &self.board, self.side)?;
        self.push(src, dst)
    }

    /// Makes all the moves from a whitespace-separated list in UCI format
    ///
    /// Moves before the failed one stay applied.
    pub fn push_uci_list(&mut self, list: &str) -> Result<(), UciListError> {
        for (pos, token) in list.split_ascii_whitespace().enumerate() {
            self.push_uci(token)
                .map_err(|source| UciListError { pos, source })?;
        }
        Ok(())
    }

    /// Takes back the last move
    ///
    /// The clock is not rewound.
    pub fn pop(&mut self) -> Option<Move> {
        let (mv, prev) = self.stack.pop()?;
        self.board = prev;
        self.side = self.side.inv();
        if mv.is_capture() {
            self.captured[self.side.index()].pop();
        }
        self.update_status();
        debug!(san = mv.san(), "move taken back");
        Some(mv)
    }

    /// Charges one second to the side to move
    pub fn tick(&mut self) {
        let was_flagged = self.clock.is_flagged(self.side);
        self.clock.tick(self.side);
        if !was_flagged && self.clock.is_flagged(self.side) {
            info!(side = %self.side, "time is over");
        }
    }

    /// Returns moves together with their numbers
    ///
    /// White's move and the following Black's move share the same number.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Move)> + '_ {
        let offset = self.start_side.index();
        self.moves()
            .enumerate()
            .map(move |(i, mv)| ((i + offset) / 2 + 1, mv))
    }

    /// Returns the wrapper to format moves in algebraic notation, like `1. e4 e5 2. Nf3`
    #[inline]
    pub fn san_list(&self) -> SanList<'_> {
        SanList(self)
    }

    /// Returns the wrapper to format moves in UCI format, like `e2e4 e7e5 g1f3`
    #[inline]
    pub fn uci_list(&self) -> UciList<'_> {
        UciList(self)
    }

    fn update_status(&mut self) {
        if !self.config.track_status {
            return;
        }
        let status = status::calc(&self.board, self.side);
        if status.checkmate {
            info!(side = %self.side, "checkmate");
        } else if status.check {
            debug!(side = %self.side, "check");
        }
        self.status = status;
    }
}

impl Default for MoveChain {
    #[inline]
    fn default() -> Self {
        Self::new_initial()
    }
}

pub struct SanList<'a>(&'a MoveChain);

impl<'a> fmt::Display for SanList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, (num, mv)) in self.0.numbered().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            match mv.side() {
                Color::White => write!(f, "{}. ", num)?,
                Color::Black if i == 0 => write!(f, "{}... ", num)?,
                Color::Black => {}
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}

pub struct UciList<'a>(&'a MoveChain);

impl<'a> fmt::Display for UciList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, mv) in self.0.moves().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mv.uci())?;
        }
        Ok(())
    }
}
