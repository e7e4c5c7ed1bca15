use crate::board::Board;
use crate::types::Coord;

use arrayvec::ArrayVec;

/// Strictly-intermediate squares of a sliding move, in the order they are walked from the source
///
/// There are at most six such squares on an 8×8 board.
pub type Path = ArrayVec<Coord, 6>;

fn delta(src: Coord, dst: Coord) -> (isize, isize) {
    (
        dst.row() as isize - src.row() as isize,
        dst.col() as isize - src.col() as isize,
    )
}

// `src` and `dst` must lie on one line or diagonal, otherwise the walk would not reach `dst`.
fn walk(src: Coord, dst: Coord, step: (isize, isize)) -> Path {
    let mut path = Path::new();
    let mut cur = src.offset(step.0, step.1);
    while let Some(c) = cur {
        if c == dst {
            break;
        }
        path.push(c);
        cur = c.offset(step.0, step.1);
    }
    path
}

/// Returns the squares strictly between `src` and `dst` if they share a row or a column
///
/// Returns `None` if the squares are not aligned horizontally or vertically, or if they are equal.
pub fn rook_strict(src: Coord, dst: Coord) -> Option<Path> {
    let (dr, dc) = delta(src, dst);
    if src == dst || (dr != 0 && dc != 0) {
        return None;
    }
    Some(walk(src, dst, (dr.signum(), dc.signum())))
}

/// Returns the squares strictly between `src` and `dst` if they share a diagonal
///
/// Returns `None` if the squares are not on one diagonal, or if they are equal.
pub fn bishop_strict(src: Coord, dst: Coord) -> Option<Path> {
    let (dr, dc) = delta(src, dst);
    if src == dst || dr.abs() != dc.abs() {
        return None;
    }
    Some(walk(src, dst, (dr.signum(), dc.signum())))
}

/// Returns `true` if none of the squares in `path` is occupied
#[inline]
pub fn is_clear(b: &Board, path: &[Coord]) -> bool {
    path.iter().all(|&c| b.get(c).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    fn coords(items: &[(File, Rank)]) -> Vec<Coord> {
        items
            .iter()
            .map(|&(file, rank)| Coord::from_parts(file, rank))
            .collect()
    }

    #[test]
    fn test_bishop() {
        let b4 = Coord::from_parts(File::B, Rank::R4);
        let e7 = Coord::from_parts(File::E, Rank::R7);
        assert_eq!(
            bishop_strict(b4, e7).unwrap().to_vec(),
            coords(&[(File::C, Rank::R5), (File::D, Rank::R6)])
        );
        assert_eq!(
            bishop_strict(e7, b4).unwrap().to_vec(),
            coords(&[(File::D, Rank::R6), (File::C, Rank::R5)])
        );

        let f3 = Coord::from_parts(File::F, Rank::R3);
        let c6 = Coord::from_parts(File::C, Rank::R6);
        assert_eq!(
            bishop_strict(f3, c6).unwrap().to_vec(),
            coords(&[(File::E, Rank::R4), (File::D, Rank::R5)])
        );

        let a1 = Coord::from_parts(File::A, Rank::R1);
        let h8 = Coord::from_parts(File::H, Rank::R8);
        assert_eq!(bishop_strict(a1, h8).unwrap().len(), 6);
        assert!(bishop_strict(a1, a1.offset(-1, 1).unwrap())
            .unwrap()
            .is_empty());

        assert_eq!(bishop_strict(b4, c6), None);
        assert_eq!(bishop_strict(b4, b4), None);
    }

    #[test]
    fn test_rook() {
        let b4 = Coord::from_parts(File::B, Rank::R4);
        let e4 = Coord::from_parts(File::E, Rank::R4);
        assert_eq!(
            rook_strict(b4, e4).unwrap().to_vec(),
            coords(&[(File::C, Rank::R4), (File::D, Rank::R4)])
        );

        let d3 = Coord::from_parts(File::D, Rank::R3);
        let d6 = Coord::from_parts(File::D, Rank::R6);
        assert_eq!(
            rook_strict(d6, d3).unwrap().to_vec(),
            coords(&[(File::D, Rank::R5), (File::D, Rank::R4)])
        );

        let a8 = Coord::from_parts(File::A, Rank::R8);
        let a1 = Coord::from_parts(File::A, Rank::R1);
        assert_eq!(rook_strict(a8, a1).unwrap().len(), 6);

        assert_eq!(rook_strict(b4, d6), None);
        assert_eq!(rook_strict(e4, e4), None);
    }

    #[test]
    fn test_is_clear() {
        let b = Board::initial();
        let a1 = Coord::from_parts(File::A, Rank::R1);
        let a8 = Coord::from_parts(File::A, Rank::R8);
        let a3 = Coord::from_parts(File::A, Rank::R3);
        let a6 = Coord::from_parts(File::A, Rank::R6);
        assert!(!is_clear(&b, &rook_strict(a1, a8).unwrap()));
        assert!(is_clear(&b, &rook_strict(a3, a6).unwrap()));
    }
}
