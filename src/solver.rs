//! Depth-first backtracking solver.
//!
//! Key points:
//! - One working board mutated in place, with a three-cell snapshot per move
//!   for undo instead of cloning boards
//! - Pre-computed candidate moves per cell, so geometry is resolved once
//! - FxHashSet registry of entered states for pruning repeats
//! - Explicit frame stack instead of recursion, so long multicolor paths
//!   cannot overflow the call stack
//!
//! Candidates are tried cell by cell in row-major order, and per cell in the
//! fixed `DIRECTIONS` order. The first solution found is returned, so a given
//! board and option set always yields the same path.

use tracing::debug;

use crate::board::{idx_to_coord, triangular, Board};
use crate::error::SearchError;
use crate::moves::{apply_move, Move, MoveRules, Snapshot, DIRECTIONS};
use crate::registry::{RegistryBinding, VisitedRegistry};

/// Options for one solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only allow jumps where one peg has color 1 or the two colors differ.
    pub restrict_to_n_jumps: bool,
}

/// Counters gathered during a solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Board states entered (including the start board).
    pub nodes: u64,
    /// Candidate moves skipped because they led to an already visited state.
    pub pruned: u64,
    /// Longest move sequence held at any point.
    pub max_depth: usize,
}

/// Candidate moves for one jumped cell, restricted to those that fit on the board.
type CellCandidates = Vec<Move>;

/// Builds the candidate table indexed by flat cell index.
///
/// Only keeps moves whose three cells are all on the board; fill state is
/// checked during search.
fn build_candidate_table(board: &Board) -> Vec<CellCandidates> {
    (0..triangular(board.side()))
        .map(|cell_index| {
            let jumped = idx_to_coord(cell_index);
            DIRECTIONS
                .iter()
                .map(|direction| direction.around(jumped))
                .filter(|mv| board.contains(mv.start) && board.contains(mv.end))
                .collect()
        })
        .collect()
}

/// One level of the search: the cursor into the candidate table, and the
/// snapshot needed to leave this state again.
struct Frame {
    /// Flat index of the jumped cell being tried.
    cell_index: usize,
    /// Index of the next candidate to try for that cell.
    candidate_index: usize,
    /// Undo for the move that entered this state (`None` for the start board).
    entered_by: Option<Snapshot>,
}

impl Frame {
    fn new(entered_by: Option<Snapshot>) -> Self {
        Self {
            cell_index: 0,
            candidate_index: 0,
            entered_by,
        }
    }
}

/// Backtracking search over one board with a caller-owned registry.
pub struct SearchEngine<'r> {
    rules: MoveRules,
    registry: &'r mut VisitedRegistry,
    stats: SearchStats,
}

impl<'r> SearchEngine<'r> {
    pub fn new(options: SearchOptions, registry: &'r mut VisitedRegistry) -> Self {
        Self {
            rules: MoveRules::new(options.restrict_to_n_jumps),
            registry,
            stats: SearchStats::default(),
        }
    }

    /// Counters from the solves run by this engine so far.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches for a move sequence leaving at most one peg.
    ///
    /// The caller's board is never modified. Returns `Ok(None)` when every
    /// reachable, not yet visited state has been exhausted. Fails only when
    /// the registry was bound to different settings.
    pub fn solve(&mut self, initial: &Board) -> Result<Option<Vec<Move>>, SearchError> {
        self.registry.bind(RegistryBinding {
            side: initial.side(),
            colors: initial.colors(),
            restrict_to_n_jumps: self.rules.restrict_to_n_jumps,
        })?;

        let mut board = initial.clone();
        let before = self.stats;
        let solution = self.search(&mut board);

        debug!(
            code = %initial.code(),
            solved = solution.is_some(),
            nodes = self.stats.nodes - before.nodes,
            pruned = self.stats.pruned - before.pruned,
            max_depth = self.stats.max_depth,
            "search finished"
        );

        Ok(solution)
    }

    fn enter(&mut self, board: &Board, depth: usize) {
        self.registry.insert(board);
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
    }

    /// Finds the next valid candidate for the top frame, advancing its cursor.
    fn next_candidate(
        &self,
        board: &Board,
        table: &[CellCandidates],
        frame: &mut Frame,
    ) -> Option<Move> {
        while frame.cell_index < table.len() {
            // an empty cell cannot be jumped
            if board.cells()[frame.cell_index] != 0 {
                let candidates = &table[frame.cell_index];
                while frame.candidate_index < candidates.len() {
                    let mv = candidates[frame.candidate_index];
                    frame.candidate_index += 1;
                    if self.rules.is_valid(board, &mv) {
                        return Some(mv);
                    }
                }
            }

            frame.cell_index += 1;
            frame.candidate_index = 0;
        }

        None
    }

    fn search(&mut self, board: &mut Board) -> Option<Vec<Move>> {
        let table = build_candidate_table(board);
        let mut path: Vec<Move> = Vec::new();

        self.enter(board, 0);
        if board.is_solved() {
            return Some(path);
        }

        let mut stack = vec![Frame::new(None)];

        while let Some(frame) = stack.last_mut() {
            let Some(mv) = self.next_candidate(board, &table, frame) else {
                // every candidate from this state failed; step back out of it
                if let Some(frame) = stack.pop() {
                    if let Some(snapshot) = frame.entered_by {
                        snapshot.restore(board);
                        path.pop();
                    }
                }
                continue;
            };

            let snapshot = Snapshot::take(board, &mv);
            apply_move(board, &mv);

            if self.registry.contains(board) {
                self.stats.pruned += 1;
                snapshot.restore(board);
                continue;
            }

            path.push(mv);
            self.enter(board, path.len());
            if board.is_solved() {
                return Some(path);
            }
            stack.push(Frame::new(Some(snapshot)));
        }

        None
    }
}

/// Solves a board with a fresh registry.
pub fn solve(board: &Board, options: SearchOptions) -> Option<Vec<Move>> {
    let mut registry = VisitedRegistry::new();
    let mut engine = SearchEngine::new(options, &mut registry);
    // a fresh registry binds to any settings
    engine.solve(board).ok().flatten()
}

/// Replays a move sequence on a copy of the board, returning every
/// intermediate state (the start board first).
pub fn replay(board: &Board, moves: &[Move]) -> Vec<Board> {
    let mut current = board.clone();
    let mut states = Vec::with_capacity(moves.len() + 1);
    states.push(current.clone());

    for mv in moves {
        apply_move(&mut current, mv);
        states.push(current.clone());
    }

    states
}
