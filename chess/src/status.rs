use crate::board::Board;
use crate::legal;
use crate::movegen;
use crate::moves;
use crate::types::{Cell, Color, Coord, Piece};

/// Check flags for one side
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Status {
    /// The king is attacked
    pub check: bool,
    /// The king is attacked and no move can fix it
    pub checkmate: bool,
}

/// Returns `true` if some piece of color `by` can move to `coord`
///
/// Empty squares are probed as if an enemy piece stood there, so pawns attack diagonally
/// and not forward.
pub fn is_cell_attacked(b: &Board, coord: Coord, by: Color) -> bool {
    let target = if b.get(coord).is_empty() {
        b.with(coord, Cell::from_parts(by.inv(), Piece::Pawn))
    } else {
        *b
    };
    let attacked = target
        .pieces()
        .filter(|(_, cell)| cell.color() == Some(by))
        .any(|(src, cell)| legal::is_legal_move(&target, cell, src, coord));
    attacked
}

/// Returns `true` if the king of color `c` is attacked
///
/// A board without such king is never in check.
pub fn is_check(b: &Board, c: Color) -> bool {
    match b.king_pos(c) {
        Some(king) => is_cell_attacked(b, king, c.inv()),
        None => false,
    }
}

/// Returns `true` if the king of color `c` is attacked and every move of `c` keeps it attacked
pub fn is_checkmate(b: &Board, c: Color) -> bool {
    is_check(b, c)
        && movegen::gen_all(b, c).into_iter().all(|(src, dst)| {
            let (after, _) = moves::apply_move(b, src, dst);
            is_check(&after, c)
        })
}

/// Calculates check flags for side `c`
pub fn calc(b: &Board, c: Color) -> Status {
    let check = is_check(b, c);
    Status {
        check,
        checkmate: check && is_checkmate(b, c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(calc(&b, Color::White), Status::default());
        assert_eq!(calc(&b, Color::Black), Status::default());
        assert!(is_cell_attacked(&b, coord("f3"), Color::White));
        assert!(is_cell_attacked(&b, coord("d3"), Color::White));
        assert!(!is_cell_attacked(&b, coord("e4"), Color::White));
        assert!(is_cell_attacked(&b, coord("e6"), Color::Black));
    }

    #[test]
    fn test_pawn_attacks() {
        let b = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap();
        // Pawns attack diagonally, not forward
        assert!(is_cell_attacked(&b, coord("d3"), Color::White));
        assert!(is_cell_attacked(&b, coord("f3"), Color::White));
        assert!(!is_cell_attacked(&b, coord("e3"), Color::White));
        assert!(!is_cell_attacked(&b, coord("e4"), Color::White));
    }

    #[test]
    fn test_own_piece_not_attacked() {
        let b = Board::initial();
        assert!(!is_cell_attacked(&b, coord("e2"), Color::White));
        assert!(!is_cell_attacked(&b, coord("e8"), Color::Black));
    }

    #[test]
    fn test_occupied_attacked() {
        let b = Board::from_fen("4k3/8/8/8/8/8/r7/K7").unwrap();
        assert!(is_cell_attacked(&b, coord("a2"), Color::White));
        assert!(is_cell_attacked(&b, coord("a1"), Color::Black));
        assert!(!is_cell_attacked(&b, coord("a2"), Color::Black));
        assert_eq!(
            calc(&b, Color::White),
            Status {
                check: true,
                checkmate: false
            }
        );
    }

    #[test]
    fn test_check() {
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4R1K1").unwrap();
        assert!(is_check(&b, Color::Black));
        assert!(!is_check(&b, Color::White));
        assert_eq!(
            calc(&b, Color::Black),
            Status {
                check: true,
                checkmate: false
            }
        );

        let blocked = Board::from_fen("4k3/4p3/8/8/8/8/8/4R1K1").unwrap();
        assert!(!is_check(&blocked, Color::Black));
    }

    #[test]
    fn test_no_king() {
        let b = Board::from_fen("8/8/8/8/8/8/8/R7").unwrap();
        assert!(!is_check(&b, Color::White));
        assert!(!is_check(&b, Color::Black));
        assert!(!is_checkmate(&b, Color::Black));
    }

    #[test]
    fn test_checkmate() {
        // Back rank mate
        let b = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1").unwrap();
        assert_eq!(
            calc(&b, Color::Black),
            Status {
                check: true,
                checkmate: true
            }
        );

        // Blocked, then the rook can be captured
        let b = Board::from_fen("R4rk1/5ppp/8/8/8/8/8/6K1").unwrap();
        assert!(!is_check(&b, Color::Black));
        let b = Board::from_fen("R5k1/5ppp/8/8/8/8/8/r5K1").unwrap();
        assert!(is_check(&b, Color::Black));
        assert!(!is_checkmate(&b, Color::Black));

        // Fool's mate
        let b = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR").unwrap();
        assert!(is_checkmate(&b, Color::White));
        assert!(!is_check(&b, Color::Black));
    }
}
