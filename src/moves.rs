//! Jump geometry, move validation and in-place move application.
//!
//! A triangular grid has three axes: along a row, along a column, and the
//! diagonal where row and column grow together. Each axis can be jumped in
//! both directions, giving six directions around a pivot ("jumped") cell.

use std::fmt;

use serde::Serialize;

use crate::board::{Board, Coord};

/// Distinguished color for the restricted jump mode.
const UNIT_COLOR: u8 = 1;

/// Offsets of the start and end cells relative to the jumped cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction {
    pub start: Coord,
    pub end: Coord,
}

impl Direction {
    /// The move through `jumped` in this direction (possibly off the board).
    #[inline(always)]
    pub const fn around(&self, jumped: Coord) -> Move {
        Move {
            start: (jumped.0 + self.start.0, jumped.1 + self.start.1),
            jumped,
            end: (jumped.0 + self.end.0, jumped.1 + self.end.1),
        }
    }
}

/// The six jump directions, in search order.
///
/// Ordering note: the solver tries directions in exactly this order, so
/// changing it changes which solution is found first.
pub const DIRECTIONS: [Direction; 6] = [
    // diagonal, moving down-right
    Direction { start: (-1, -1), end: (1, 1) },
    // column, moving down
    Direction { start: (-1, 0), end: (1, 0) },
    // row, moving left
    Direction { start: (0, 1), end: (0, -1) },
    // diagonal, moving up-left
    Direction { start: (1, 1), end: (-1, -1) },
    // column, moving up
    Direction { start: (1, 0), end: (-1, 0) },
    // row, moving right
    Direction { start: (0, -1), end: (0, 1) },
];

/// A peg moves from `start` to `end`, jumping over `jumped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub start: Coord,
    pub jumped: Coord,
    pub end: Coord,
}

impl Move {
    /// Returns true if the three cells sit on one axis with `jumped` one
    /// step from each end.
    pub fn is_aligned(&self) -> bool {
        let step_in = (self.jumped.0 - self.start.0, self.jumped.1 - self.start.1);
        let step_out = (self.end.0 - self.jumped.0, self.end.1 - self.jumped.1);

        step_in == step_out
            && matches!(
                step_in,
                (0, 1) | (0, -1) | (1, 0) | (-1, 0) | (1, 1) | (-1, -1)
            )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {})({}, {})({}, {})]",
            self.start.0, self.start.1, self.jumped.0, self.jumped.1, self.end.0, self.end.1
        )
    }
}

/// Move legality rules for one search session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveRules {
    /// Only allow jumps where one of the two pegs has color 1, or the two
    /// colors differ.
    pub restrict_to_n_jumps: bool,
}

impl MoveRules {
    pub fn new(restrict_to_n_jumps: bool) -> Self {
        Self {
            restrict_to_n_jumps,
        }
    }

    /// Checks a candidate move against board bounds, the restriction mode,
    /// fill state and geometry, in that order.
    pub fn is_valid(&self, board: &Board, mv: &Move) -> bool {
        if !board.contains(mv.start) || !board.contains(mv.jumped) || !board.contains(mv.end) {
            return false;
        }

        let start_color = board.get(mv.start);
        let jumped_color = board.get(mv.jumped);

        if self.restrict_to_n_jumps
            && start_color != UNIT_COLOR
            && jumped_color != UNIT_COLOR
            && start_color == jumped_color
        {
            return false;
        }

        if start_color == 0 || jumped_color == 0 || board.get(mv.end) != 0 {
            return false;
        }

        mv.is_aligned()
    }
}

/// Applies a move in place.
///
/// The peg lands on `end` with its original color, `start` empties, and the
/// jumped cell becomes `(new end color + old jumped color) mod colors`, so it
/// only empties when that sum wraps to zero.
///
/// Panics if the move is not aligned along a board axis.
#[inline]
pub fn apply_move(board: &mut Board, mv: &Move) {
    assert!(mv.is_aligned(), "misaligned move {mv}");

    let moving = board.get(mv.start);
    board.set(mv.end, moving);
    board.set(mv.start, 0);

    // recolor from the landed peg, not the emptied start cell
    let recolored = (board.get(mv.end) + board.get(mv.jumped)) % board.colors();
    board.set(mv.jumped, recolored);
}

/// The three cells a move touches, captured before the move is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    cells: [(Coord, u8); 3],
}

impl Snapshot {
    pub fn take(board: &Board, mv: &Move) -> Self {
        Self {
            cells: [
                (mv.start, board.get(mv.start)),
                (mv.jumped, board.get(mv.jumped)),
                (mv.end, board.get(mv.end)),
            ],
        }
    }

    /// Writes the captured colors back, undoing the move.
    pub fn restore(&self, board: &mut Board) {
        for &(coord, color) in &self.cells {
            board.set(coord, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mv(start: Coord, jumped: Coord, end: Coord) -> Move {
        Move { start, jumped, end }
    }

    #[test]
    fn test_directions_mirror_through_pivot() {
        for direction in &DIRECTIONS {
            assert_eq!(direction.start.0, -direction.end.0);
            assert_eq!(direction.start.1, -direction.end.1);
            assert!(direction.around((5, 2)).is_aligned());
        }
    }

    #[test]
    fn test_directions_cover_three_axes_both_ways() {
        let mut starts: Vec<Coord> = DIRECTIONS.iter().map(|direction| direction.start).collect();
        starts.sort();
        assert_eq!(starts, vec![(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_alignment() {
        assert!(mv((2, 0), (1, 0), (0, 0)).is_aligned());
        assert!(mv((2, 2), (2, 1), (2, 0)).is_aligned());
        assert!(mv((0, 0), (1, 1), (2, 2)).is_aligned());
        // anti-diagonal is not an axis of the triangle
        assert!(!mv((0, 2), (1, 1), (2, 0)).is_aligned());
        assert!(!mv((2, 0), (1, 0), (1, 1)).is_aligned());
        assert!(!mv((3, 0), (1, 0), (0, 0)).is_aligned());
    }

    #[test]
    fn test_valid_move_requires_fill_state() {
        let rules = MoveRules::default();
        let board = Board::parse("0/11/111", 2).unwrap();

        assert!(rules.is_valid(&board, &mv((2, 0), (1, 0), (0, 0))));
        assert!(rules.is_valid(&board, &mv((2, 2), (1, 1), (0, 0))));
        // end occupied
        assert!(!rules.is_valid(&board, &mv((2, 0), (2, 1), (2, 2))));
        // start empty
        assert!(!rules.is_valid(&board, &mv((0, 0), (1, 0), (2, 0))));
        // off the board
        assert!(!rules.is_valid(&board, &mv((1, 1), (1, 2), (1, 3))));
    }

    #[test]
    fn test_full_board_has_no_valid_move() {
        let rules = MoveRules::default();
        let board = Board::parse("1/11/111", 2).unwrap();
        for jumped in board.coords() {
            for direction in &DIRECTIONS {
                assert!(!rules.is_valid(&board, &direction.around(jumped)));
            }
        }
    }

    #[test]
    fn test_restricted_mode_rejects_equal_non_unit_colors() {
        let restricted = MoveRules::new(true);
        let open = MoveRules::default();

        let equal_twos = Board::parse("0/21/211", 3).unwrap();
        let jump = mv((2, 0), (1, 0), (0, 0));
        assert!(open.is_valid(&equal_twos, &jump));
        assert!(!restricted.is_valid(&equal_twos, &jump));

        let mixed = Board::parse("0/21/111", 3).unwrap();
        assert!(restricted.is_valid(&mixed, &jump));

        let ones = Board::parse("0/11/111", 3).unwrap();
        assert!(restricted.is_valid(&ones, &jump));
    }

    #[test]
    fn test_binary_jump_removes_peg() {
        let mut board = Board::parse("0/11/111", 2).unwrap();
        apply_move(&mut board, &mv((2, 0), (1, 0), (0, 0)));
        assert_eq!(board.rows(), vec![vec![1], vec![0, 1], vec![0, 1, 1]]);
        assert_eq!(board.peg_count(), 4);
    }

    #[test]
    fn test_multicolor_jump_recolors_jumped_peg() {
        let mut board = Board::parse("0/11/121", 3).unwrap();
        apply_move(&mut board, &mv((2, 0), (1, 0), (0, 0)));
        // (1 + 1) mod 3 = 2: the jumped peg stays, recolored
        assert_eq!(board.rows(), vec![vec![1], vec![2, 1], vec![0, 2, 1]]);
        assert_eq!(board.peg_count(), 5);
    }

    #[test]
    fn test_multicolor_jump_removes_peg_when_sum_wraps() {
        let mut board = Board::parse("0/21/111", 3).unwrap();
        apply_move(&mut board, &mv((2, 0), (1, 0), (0, 0)));
        // (1 + 2) mod 3 = 0
        assert_eq!(board.rows(), vec![vec![1], vec![0, 1], vec![0, 1, 1]]);
    }

    #[test]
    fn test_snapshot_restores_board() {
        let original = Board::parse("0/21/121", 3).unwrap();
        let mut board = original.clone();
        let jump = mv((2, 0), (1, 0), (0, 0));

        let snapshot = Snapshot::take(&board, &jump);
        apply_move(&mut board, &jump);
        assert_ne!(board, original);
        snapshot.restore(&mut board);
        assert_eq!(board, original);
    }

    #[test]
    #[should_panic(expected = "misaligned move")]
    fn test_apply_misaligned_move_panics() {
        let mut board = Board::parse("0/11/111", 2).unwrap();
        apply_move(&mut board, &mv((0, 0), (1, 1), (2, 0)));
    }

    #[test]
    fn test_move_display() {
        assert_eq!(mv((2, 0), (1, 0), (0, 0)).to_string(), "[(2, 0)(1, 0)(0, 0)]");
    }

    fn arbitrary_board() -> impl Strategy<Value = Board> {
        (2usize..=6, 2u8..=7).prop_flat_map(|(side, colors)| {
            proptest::collection::vec(0..colors, side * (side + 1) / 2)
                .prop_map(move |cells| Board::from_cells(cells, colors).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_every_valid_move_keeps_invariants(
            board in arbitrary_board(),
            rules in any::<bool>(),
        ) {
            let rules = MoveRules::new(rules);
            for jumped in board.coords() {
                for direction in &DIRECTIONS {
                    let jump = direction.around(jumped);
                    if !rules.is_valid(&board, &jump) {
                        continue;
                    }

                    let mut working = board.clone();
                    let start_color = working.get(jump.start);
                    let jumped_color = working.get(jump.jumped);
                    let snapshot = Snapshot::take(&working, &jump);
                    apply_move(&mut working, &jump);

                    // color bound
                    prop_assert!(working.cells().iter().all(|&color| color < board.colors()));

                    // peg count never grows, and drops by one iff the sum wraps
                    let removed = (start_color + jumped_color) % board.colors() == 0;
                    let expected = board.peg_count() - usize::from(removed);
                    prop_assert_eq!(working.peg_count(), expected);

                    // undo is exact
                    snapshot.restore(&mut working);
                    prop_assert_eq!(&working, &board);
                }
            }
        }

        #[test]
        fn prop_binary_moves_always_remove_a_peg(cells in proptest::collection::vec(0u8..2, 15)) {
            let board = Board::from_cells(cells, 2).unwrap();
            let rules = MoveRules::default();
            for jumped in board.coords() {
                for direction in &DIRECTIONS {
                    let jump = direction.around(jumped);
                    if rules.is_valid(&board, &jump) {
                        let mut working = board.clone();
                        apply_move(&mut working, &jump);
                        prop_assert_eq!(working.peg_count(), board.peg_count() - 1);
                    }
                }
            }
        }

        #[test]
        fn prop_code_roundtrip(board in arbitrary_board()) {
            let decoded = Board::from_code(&board.code(), board.colors()).unwrap();
            prop_assert_eq!(decoded, board);
        }
    }
}
