use crate::between;
use crate::board::Board;
use crate::geometry;
use crate::types::{Cell, Color, Coord, Piece};

#[inline]
fn delta(src: Coord, dst: Coord) -> (isize, isize) {
    (
        dst.row() as isize - src.row() as isize,
        dst.col() as isize - src.col() as isize,
    )
}

fn is_pawn_move(b: &Board, color: Color, src: Coord, dst: Coord) -> bool {
    let dir = geometry::pawn_direction(color);
    let (dr, dc) = delta(src, dst);

    if dc == 0 {
        if dr == dir && b.get(dst).is_empty() {
            return true;
        }
        if dr == 2 * dir && src.rank() == geometry::pawn_home_rank(color) {
            return match src.offset(dir, 0) {
                Some(mid) => b.get(mid).is_empty() && b.get(dst).is_empty(),
                None => false,
            };
        }
        return false;
    }

    dr == dir && dc.abs() == 1 && b.get(dst).color() == Some(color.inv())
}

fn is_knight_move(src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

fn is_rook_move(b: &Board, src: Coord, dst: Coord) -> bool {
    between::rook_strict(src, dst).map_or(false, |path| between::is_clear(b, &path))
}

fn is_bishop_move(b: &Board, src: Coord, dst: Coord) -> bool {
    between::bishop_strict(src, dst).map_or(false, |path| between::is_clear(b, &path))
}

fn is_king_move(src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    dr.abs() <= 1 && dc.abs() <= 1
}

/// Returns `true` if the piece in `cell` standing on `src` may move to `dst`
///
/// The checks are done in the following order, and the first failing one makes the move illegal:
///
/// - `dst` must not contain a piece of the same color as `cell`
/// - `src` and `dst` must differ
/// - the move must follow the movement rules of the piece kind
///
/// An empty `cell` never moves. Note that `cell` is not required to be equal to `b.get(src)`,
/// so the caller may ask about a hypothetical piece.
///
/// # Example
///
/// ```
/// # use chessgrid::{legal, Board, Cell, Color, Coord, Piece};
/// #
/// let b = Board::initial();
/// let knight = Cell::from_parts(Color::White, Piece::Knight);
/// let b1 = Coord::from_row_col(7, 1).unwrap();
/// assert!(legal::is_legal_move(&b, knight, b1, Coord::from_row_col(5, 2).unwrap()));
/// assert!(!legal::is_legal_move(&b, knight, b1, Coord::from_row_col(6, 3).unwrap()));
/// ```
pub fn is_legal_move(b: &Board, cell: Cell, src: Coord, dst: Coord) -> bool {
    let Some((color, piece)) = cell.parts() else {
        return false;
    };
    if b.get(dst).color() == Some(color) || src == dst {
        return false;
    }
    match piece {
        Piece::Pawn => is_pawn_move(b, color, src, dst),
        Piece::Knight => is_knight_move(src, dst),
        Piece::Bishop => is_bishop_move(b, src, dst),
        Piece::Rook => is_rook_move(b, src, dst),
        Piece::Queen => is_rook_move(b, src, dst) || is_bishop_move(b, src, dst),
        Piece::King => is_king_move(src, dst),
    }
}

/// Same as [`is_legal_move`], but takes the destination as a raw row and column
///
/// Out-of-board destinations are rejected before anything else.
#[inline]
pub fn is_legal_target(b: &Board, cell: Cell, src: Coord, row: isize, col: isize) -> bool {
    match Coord::from_row_col(row, col) {
        Some(dst) => is_legal_move(b, cell, src, dst),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn rc(row: isize, col: isize) -> Coord {
        Coord::from_row_col(row, col).unwrap()
    }

    fn white(p: Piece) -> Cell {
        Cell::from_parts(Color::White, p)
    }

    fn black(p: Piece) -> Cell {
        Cell::from_parts(Color::Black, p)
    }

    fn random_board(rng: &mut StdRng) -> Board {
        let mut b = Board::empty();
        for c in Coord::iter() {
            if rng.gen_bool(0.35) {
                b.put(c, Cell::from_index(rng.gen_range(1..Cell::COUNT)));
            }
        }
        b
    }

    #[test]
    fn test_pawn_single_and_double() {
        let b = Board::empty();
        let pawn = white(Piece::Pawn);
        assert!(is_legal_move(&b, pawn, rc(6, 4), rc(5, 4)));
        assert!(is_legal_move(&b, pawn, rc(6, 4), rc(4, 4)));
        assert!(!is_legal_move(&b, pawn, rc(5, 4), rc(3, 4)));
        assert!(is_legal_move(&b, pawn, rc(5, 4), rc(4, 4)));
        assert!(!is_legal_move(&b, pawn, rc(6, 4), rc(7, 4)));
        assert!(!is_legal_move(&b, pawn, rc(6, 4), rc(3, 4)));

        let pawn = black(Piece::Pawn);
        assert!(is_legal_move(&b, pawn, rc(1, 3), rc(2, 3)));
        assert!(is_legal_move(&b, pawn, rc(1, 3), rc(3, 3)));
        assert!(!is_legal_move(&b, pawn, rc(2, 3), rc(4, 3)));
        assert!(!is_legal_move(&b, pawn, rc(1, 3), rc(0, 3)));
    }

    #[test]
    fn test_pawn_blocked() {
        let pawn = white(Piece::Pawn);
        let b = Board::empty().with(rc(5, 4), black(Piece::Knight));
        assert!(!is_legal_move(&b, pawn, rc(6, 4), rc(5, 4)));
        assert!(!is_legal_move(&b, pawn, rc(6, 4), rc(4, 4)));

        let b = Board::empty().with(rc(4, 4), black(Piece::Knight));
        assert!(is_legal_move(&b, pawn, rc(6, 4), rc(5, 4)));
        assert!(!is_legal_move(&b, pawn, rc(6, 4), rc(4, 4)));
    }

    #[test]
    fn test_pawn_capture() {
        let pawn = white(Piece::Pawn);
        let src = rc(4, 4);
        let b = Board::empty();
        assert!(!is_legal_move(&b, pawn, src, rc(3, 3)));
        assert!(!is_legal_move(&b, pawn, src, rc(3, 5)));

        let b = Board::empty()
            .with(rc(3, 3), black(Piece::Rook))
            .with(rc(3, 5), white(Piece::Rook));
        assert!(is_legal_move(&b, pawn, src, rc(3, 3)));
        assert!(!is_legal_move(&b, pawn, src, rc(3, 5)));

        // Backwards captures are not allowed
        let b = Board::empty().with(rc(5, 3), black(Piece::Rook));
        assert!(!is_legal_move(&b, pawn, src, rc(5, 3)));

        // Black captures towards row 7
        let b = Board::empty().with(rc(2, 4), white(Piece::Bishop));
        assert!(is_legal_move(&b, black(Piece::Pawn), rc(1, 3), rc(2, 4)));
        assert!(!is_legal_move(&b, black(Piece::Pawn), rc(3, 3), rc(2, 4)));
    }

    #[test]
    fn test_knight() {
        let knight = white(Piece::Knight);
        let src = rc(4, 4);
        let b = Board::empty();
        let targets: Vec<_> = Coord::iter()
            .filter(|&dst| is_legal_move(&b, knight, src, dst))
            .collect();
        assert_eq!(
            targets,
            vec![
                rc(2, 3),
                rc(2, 5),
                rc(3, 2),
                rc(3, 6),
                rc(5, 2),
                rc(5, 6),
                rc(6, 3),
                rc(6, 5)
            ]
        );

        // Knights jump over anything
        let mut b = Board::empty();
        for c in Coord::iter() {
            if c != src {
                b.put(c, black(Piece::Pawn));
            }
        }
        for dst in &targets {
            assert!(is_legal_move(&b, knight, src, *dst));
        }
    }

    #[test]
    fn test_initial_knight() {
        let b = Board::initial();
        let knight = white(Piece::Knight);
        assert!(is_legal_move(&b, knight, rc(7, 1), rc(5, 2)));
        assert!(is_legal_move(&b, knight, rc(7, 1), rc(5, 0)));
        assert!(!is_legal_move(&b, knight, rc(7, 1), rc(6, 3)));
    }

    #[test]
    fn test_rook() {
        let rook = white(Piece::Rook);
        let b = Board::empty();
        assert!(is_legal_move(&b, rook, rc(4, 4), rc(4, 0)));
        assert!(is_legal_move(&b, rook, rc(4, 4), rc(0, 4)));
        assert!(!is_legal_move(&b, rook, rc(4, 4), rc(3, 3)));
        assert!(!is_legal_move(&b, rook, rc(4, 4), rc(2, 5)));

        let b = Board::empty().with(rc(4, 2), black(Piece::Pawn));
        assert!(is_legal_move(&b, rook, rc(4, 4), rc(4, 2)));
        assert!(!is_legal_move(&b, rook, rc(4, 4), rc(4, 1)));
    }

    #[test]
    fn test_bishop_and_queen() {
        let b = Board::initial();
        let bishop = white(Piece::Bishop);
        let queen = white(Piece::Queen);
        assert!(!is_legal_move(&b, bishop, rc(7, 2), rc(5, 4)));
        assert!(!is_legal_move(&b, queen, rc(7, 3), rc(5, 3)));

        let b = Board::empty();
        assert!(is_legal_move(&b, bishop, rc(7, 2), rc(2, 7)));
        assert!(!is_legal_move(&b, bishop, rc(7, 2), rc(6, 2)));
        assert!(is_legal_move(&b, queen, rc(7, 3), rc(5, 3)));
        assert!(is_legal_move(&b, queen, rc(7, 3), rc(4, 0)));
        assert!(!is_legal_move(&b, queen, rc(7, 3), rc(5, 4)));
    }

    #[test]
    fn test_sliders_blocked() {
        let src = Coord::from_parts(File::D, Rank::R4);
        for piece in [Piece::Rook, Piece::Bishop, Piece::Queen] {
            let cell = white(piece);
            for dst in Coord::iter() {
                if !is_legal_move(&Board::empty(), cell, src, dst) {
                    continue;
                }
                let path = between::rook_strict(src, dst)
                    .or_else(|| between::bishop_strict(src, dst))
                    .unwrap();
                for &blocker in &path {
                    for block in [white(Piece::Pawn), black(Piece::Pawn)] {
                        let b = Board::empty().with(blocker, block);
                        assert!(
                            !is_legal_move(&b, cell, src, dst),
                            "{:?} {} -> {} must be blocked by {}",
                            piece,
                            src,
                            dst,
                            blocker
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_king() {
        let king = black(Piece::King);
        let b = Board::empty();
        let count = Coord::iter()
            .filter(|&dst| is_legal_move(&b, king, rc(0, 0), dst))
            .count();
        assert_eq!(count, 3);
        assert!(is_legal_move(&b, king, rc(4, 4), rc(5, 5)));
        assert!(!is_legal_move(&b, king, rc(4, 4), rc(6, 4)));
    }

    #[test]
    fn test_empty_cell() {
        let b = Board::initial();
        assert!(!is_legal_move(&b, Cell::EMPTY, rc(6, 4), rc(5, 4)));
    }

    #[test]
    fn test_out_of_bounds() {
        let b = Board::empty();
        let queen = white(Piece::Queen);
        assert!(is_legal_target(&b, queen, rc(0, 0), 7, 7));
        assert!(!is_legal_target(&b, queen, rc(0, 0), 8, 8));
        assert!(!is_legal_target(&b, queen, rc(0, 0), -1, 0));
        assert!(!is_legal_target(&b, white(Piece::Knight), rc(0, 0), -1, 2));
    }

    #[test]
    fn test_invariants_on_random_boards() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let b = random_board(&mut rng);
            for src in Coord::iter() {
                for cell in Cell::iter().skip(1) {
                    assert!(!is_legal_move(&b, cell, src, src));
                    for dst in Coord::iter() {
                        if b.get(dst).color() == cell.color() && is_legal_move(&b, cell, src, dst)
                        {
                            panic!("{} lands on its own color: {} -> {}", cell, src, dst);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_queen_is_rook_or_bishop() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let b = random_board(&mut rng);
            let src = Coord::from_index(rng.gen_range(0..64));
            for color in [Color::White, Color::Black] {
                let queen = Cell::from_parts(color, Piece::Queen);
                let rook = Cell::from_parts(color, Piece::Rook);
                let bishop = Cell::from_parts(color, Piece::Bishop);
                for dst in Coord::iter() {
                    assert_eq!(
                        is_legal_move(&b, queen, src, dst),
                        is_legal_move(&b, rook, src, dst) || is_legal_move(&b, bishop, src, dst)
                    );
                }
            }
        }
    }
}
