//! Move calculation
//!
//! Pure functions with no side effects. [`knight_destinations`] is the single-hop knight
//! geometry; [`legal_moves`] is the calculator behind the moves endpoint.
//!
//! For a knight, [`legal_moves`] reports every square the knight can reach within two
//! moves: one hop, or two consecutive hops. The origin square is never reported, and
//! neither is any square on the first rank. For a knight on h1 this gives
//! `d3 e2 e4 f2 f5 g3 g4 h3 h5`.

use std::collections::BTreeSet;

use crate::error::{RulesError, RulesResult};
use crate::types::{PieceKind, Rank, Square};

/// (file, rank) displacements of a knight jump
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Number of consecutive knight hops covered by a move query
const KNIGHT_TURNS: usize = 2;

/// Squares a knight on `from` attacks, sorted by file then rank
///
/// # Examples
///
/// ```
/// use chess_rules::{knight_destinations, Square};
/// let moves: Vec<String> = knight_destinations("h1".parse().unwrap())
///     .into_iter()
///     .map(|s| s.to_algebraic())
///     .collect();
/// assert_eq!(moves, ["f2", "g3"]);
/// ```
pub fn knight_destinations(from: Square) -> Vec<Square> {
    let mut moves: Vec<Square> = KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(d_file, d_rank)| from.offset(d_file, d_rank))
        .collect();
    moves.sort();
    moves
}

/// Destinations reported for `kind` standing on `coordinate`
///
/// `coordinate` is the raw query value. It is validated before the piece kind is
/// considered, so a missing or malformed coordinate is an error for every kind.
/// Pieces other than the knight have no reported moves.
///
/// # Errors
///
/// [`RulesError::MissingCoordinate`] when `coordinate` is `None`, and
/// [`RulesError::InvalidSquare`] when it is not a square between a1 and h8.
pub fn legal_moves(kind: PieceKind, coordinate: Option<&str>) -> RulesResult<Vec<Square>> {
    let from = coordinate
        .ok_or(RulesError::MissingCoordinate)?
        .parse::<Square>()?;

    Ok(match kind {
        PieceKind::Knight => knight_reach(from, KNIGHT_TURNS),
        _ => Vec::new(),
    })
}

/// Squares reachable from `from` in 1..=`turns` knight hops, sorted and unique
fn knight_reach(from: Square, turns: usize) -> Vec<Square> {
    let mut reached = BTreeSet::from([from]);
    let mut frontier = vec![from];

    for _ in 0..turns {
        frontier = frontier
            .into_iter()
            .flat_map(knight_destinations)
            .filter(|&square| reached.insert(square))
            .collect();
    }

    reached.remove(&from);
    reached.retain(|square| is_reported(*square));
    reached.into_iter().collect()
}

/// First-rank landing squares are left out of move reports
fn is_reported(square: Square) -> bool {
    square.rank() != Rank::FIRST
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(squares: &[Square]) -> Vec<String> {
        squares.iter().map(|s| s.to_algebraic()).collect()
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_knight_destinations_from_center() {
        assert_eq!(
            names(&knight_destinations(sq("d4"))),
            ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"]
        );
    }

    #[test]
    fn test_knight_destinations_from_corners() {
        assert_eq!(names(&knight_destinations(sq("a1"))), ["b3", "c2"]);
        assert_eq!(names(&knight_destinations(sq("h8"))), ["f7", "g6"]);
    }

    #[test]
    fn test_knight_destinations_from_edge() {
        assert_eq!(
            names(&knight_destinations(sq("a4"))),
            ["b2", "b6", "c3", "c5"]
        );
    }

    #[test]
    fn test_knight_reach_one_turn_is_plain_geometry() {
        assert_eq!(names(&knight_reach(sq("d4"), 1)), names(&knight_destinations(sq("d4"))));
    }

    #[test]
    fn test_knight_on_h1() {
        let moves = legal_moves(PieceKind::Knight, Some("h1")).unwrap();
        assert_eq!(
            names(&moves),
            ["d3", "e2", "e4", "f2", "f5", "g3", "g4", "h3", "h5"]
        );
    }

    #[test]
    fn test_knight_excludes_origin() {
        let moves = legal_moves(PieceKind::Knight, Some("d4")).unwrap();
        assert!(!moves.contains(&sq("d4")));
        assert!(moves.contains(&sq("b3")));
        assert!(moves.contains(&sq("d8")));
    }

    #[test]
    fn test_non_knight_pieces_have_no_moves() {
        for kind in PieceKind::ALL.into_iter().filter(|k| *k != PieceKind::Knight) {
            assert_eq!(legal_moves(kind, Some("h1")), Ok(Vec::new()), "{kind}");
        }
    }

    #[test]
    fn test_missing_coordinate_is_rejected_for_every_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(legal_moves(kind, None), Err(RulesError::MissingCoordinate));
        }
    }

    #[test]
    fn test_malformed_coordinate_is_rejected() {
        assert_eq!(
            legal_moves(PieceKind::Queen, Some("z9")),
            Err(RulesError::InvalidSquare("z9".to_string()))
        );
        assert!(legal_moves(PieceKind::Knight, Some("")).is_err());
    }

    #[test]
    fn test_results_are_sorted_and_unique() {
        let moves = legal_moves(PieceKind::Knight, Some("e5")).unwrap();
        let mut expected = moves.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(moves, expected);
    }
}
