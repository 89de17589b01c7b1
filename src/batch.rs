//! Board construction and batch solving over many starting boards.
//!
//! A batch enumerates every peg coloring of a board size for each chosen
//! vacancy and solves each resulting board. Whether the visited registry is
//! reset between boards is an explicit [`RegistryPolicy`].

use tracing::{info, warn};

use crate::board::{on_triangle, triangular, Board, Coord};
use crate::error::{BatchError, BoardError};
use crate::registry::VisitedRegistry;
use crate::report::ReportSink;
use crate::solver::{SearchEngine, SearchOptions};

/// Fills a triangle row-major from `sequence`, leaving `hole` empty.
pub fn populate_board(
    side: usize,
    sequence: &[u8],
    hole: Coord,
    colors: u8,
) -> Result<Board, BoardError> {
    if side == 0 {
        return Err(BoardError::Empty);
    }
    if !on_triangle(side, hole) {
        return Err(BoardError::HoleOffBoard(hole.0, hole.1));
    }
    let expected = triangular(side) - 1;
    if sequence.len() != expected {
        return Err(BoardError::SequenceLength {
            side,
            found: sequence.len(),
            expected,
        });
    }

    let mut pegs = sequence.iter();
    let mut cells = Vec::with_capacity(triangular(side));
    for row in 0..side as i32 {
        for col in 0..=row {
            if (row, col) == hole {
                cells.push(0);
            } else {
                cells.push(pegs.next().copied().unwrap_or(0));
            }
        }
    }

    Board::from_cells(cells, colors)
}

/// Rearranges `data` into its next lexicographic permutation.
///
/// Returns false, leaving `data` untouched, if it is already the last one.
pub fn next_permutation(data: &mut [u8]) -> bool {
    if data.len() < 2 {
        return false;
    }

    // rightmost position that is smaller than its successor
    let Some(pivot) = (0..data.len() - 1).rev().find(|&k| data[k] < data[k + 1]) else {
        return false;
    };

    let pivot_value = data[pivot];
    let Some(successor) = data.iter().rposition(|&value| value > pivot_value) else {
        return false;
    };

    data.swap(pivot, successor);
    data[pivot + 1..].reverse();
    true
}

/// Advances a nondecreasing sequence over `1..=max` to the next one in
/// lexicographic order.
fn next_multiset(data: &mut [u8], max: u8) -> bool {
    let Some(position) = data.iter().rposition(|&value| value < max) else {
        return false;
    };

    let value = data[position] + 1;
    for slot in &mut data[position..] {
        *slot = value;
    }
    true
}

/// Iterator over every peg coloring of a given length.
///
/// Colorings are grouped by multiset of colors (multisets ascending), each
/// group walked in lexicographic permutation order.
pub struct PegSequences {
    max_color: u8,
    multiset: Vec<u8>,
    current: Option<Vec<u8>>,
}

/// All sequences of `len` pegs with colors in `1..colors`.
pub fn peg_sequences(len: usize, colors: u8) -> PegSequences {
    let multiset = vec![1; len];
    PegSequences {
        max_color: colors.saturating_sub(1).max(1),
        current: Some(multiset.clone()),
        multiset,
    }
}

impl Iterator for PegSequences {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.as_mut()?;
        let sequence = current.clone();

        if !next_permutation(current) {
            if next_multiset(&mut self.multiset, self.max_color) {
                *current = self.multiset.clone();
            } else {
                self.current = None;
            }
        }

        Some(sequence)
    }
}

/// One vacancy per symmetry class of the triangle, first in row-major order.
///
/// The six symmetries permute the distances of a cell to the three sides,
/// so two cells are equivalent iff those distances agree as a multiset.
pub fn symmetric_holes(side: usize) -> Vec<Coord> {
    let last = side as i32 - 1;
    let mut seen: Vec<[i32; 3]> = Vec::new();
    let mut holes = Vec::new();

    for row in 0..side as i32 {
        for col in 0..=row {
            let mut distances = [col, row - col, last - row];
            distances.sort_unstable();
            if !seen.contains(&distances) {
                seen.push(distances);
                holes.push((row, col));
            }
        }
    }

    holes
}

/// Whether boards in a batch share one visited registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegistryPolicy {
    /// A fresh registry for every board.
    #[default]
    PerBoard,
    /// One registry for the whole batch. States explored for one board prune
    /// the search of later boards, so later results depend on board order.
    Shared,
}

/// Parameters of a batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub side: usize,
    pub colors: u8,
    pub holes: Vec<Coord>,
    pub options: SearchOptions,
    pub policy: RegistryPolicy,
}

impl BatchConfig {
    /// Batch over every symmetry class of vacancy.
    pub fn new(side: usize, colors: u8) -> Self {
        Self {
            side,
            colors,
            holes: symmetric_holes(side),
            options: SearchOptions::default(),
            policy: RegistryPolicy::default(),
        }
    }
}

/// Totals of a batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub boards: usize,
    pub solved: usize,
}

/// Solves every board of the batch and hands each result to `sink`.
pub fn run_batch(
    config: &BatchConfig,
    sink: &mut dyn ReportSink,
) -> Result<BatchSummary, BatchError> {
    let sequence_len = triangular(config.side).saturating_sub(1);
    let mut shared = VisitedRegistry::new();
    let mut summary = BatchSummary::default();

    if config.policy == RegistryPolicy::Shared {
        warn!("sharing one visited registry across boards; results depend on board order");
    }

    for &hole in &config.holes {
        for sequence in peg_sequences(sequence_len, config.colors) {
            let board = populate_board(config.side, &sequence, hole, config.colors)?;

            let mut fresh = VisitedRegistry::new();
            let registry = match config.policy {
                RegistryPolicy::PerBoard => &mut fresh,
                RegistryPolicy::Shared => &mut shared,
            };
            let solution = SearchEngine::new(config.options, registry).solve(&board)?;

            info!(
                code = %board.code(),
                solved = solution.is_some(),
                moves = solution.as_ref().map_or(0, Vec::len),
                "board searched"
            );

            sink.record(&board, solution.as_deref())?;
            summary.boards += 1;
            if solution.is_some() {
                summary.solved += 1;
            }
        }
    }

    sink.finish()?;
    info!(
        boards = summary.boards,
        solved = summary.solved,
        unsolved = summary.boards - summary.solved,
        "batch finished"
    );

    Ok(summary)
}
