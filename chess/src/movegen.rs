use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::legal;
use crate::types::{Cell, Color, Coord};

/// Returns all the squares to which the piece in `cell` standing on `src` may move
///
/// The board is scanned in row-major order and every square accepted by
/// [`legal::is_legal_move`] is included.
///
/// # Example
///
/// ```
/// # use chessgrid::{movegen, Board, Coord};
/// #
/// let b = Board::initial();
/// let e2 = "e2".parse::<Coord>().unwrap();
/// let targets = movegen::legal_destinations(&b, e2, b.get(e2));
/// let names: Vec<_> = targets.into_iter().map(|c| c.to_string()).collect();
/// assert_eq!(names, vec!["e4", "e3"]);
/// ```
pub fn legal_destinations(b: &Board, src: Coord, cell: Cell) -> Bitboard {
    Coord::iter()
        .filter(|&dst| legal::is_legal_move(b, cell, src, dst))
        .collect()
}

/// Returns all the moves of side `c` accepted by the validator, as `(src, dst)` pairs
///
/// Moves are ordered by source square, then by destination square, both in row-major order.
/// Moves leaving the own king under attack are included, as the validator doesn't look at checks.
pub fn gen_all(b: &Board, c: Color) -> Vec<(Coord, Coord)> {
    b.pieces()
        .filter(|(_, cell)| cell.color() == Some(c))
        .flat_map(|(src, cell)| {
            legal_destinations(b, src, cell)
                .into_iter()
                .map(move |dst| (src, dst))
        })
        .collect()
}

/// Currently selected piece together with its legal destinations
///
/// This is what a user interface keeps between the click that picks a piece and the click that
/// moves it. It is a snapshot: if the board changes, the selection must be recreated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection {
    src: Coord,
    cell: Cell,
    targets: Bitboard,
}

impl Selection {
    /// Selects the piece on `src`
    ///
    /// Returns `None` if the square is empty.
    pub fn new(b: &Board, src: Coord) -> Option<Selection> {
        let cell = b.get(src);
        if cell.is_empty() {
            return None;
        }
        Some(Selection {
            src,
            cell,
            targets: legal_destinations(b, src, cell),
        })
    }

    #[inline]
    pub fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    #[inline]
    pub fn targets(&self) -> Bitboard {
        self.targets
    }

    #[inline]
    pub fn contains(&self, dst: Coord) -> bool {
        self.targets.has(dst)
    }
}
