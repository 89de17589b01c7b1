//! Error types for board construction, search setup and batch runs.
//!
//! Running out of moves is not an error: the solver reports it as `None`.

use thiserror::Error;

use crate::board::MAX_COLORS;

/// Malformed input detected before any search starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board needs at least one row")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("color count {0} is outside 2..={max}", max = MAX_COLORS)]
    ColorCount(usize),

    #[error("cell ({row}, {col}) holds color {color}, but only {colors} colors are in play")]
    ColorOutOfRange {
        row: usize,
        col: usize,
        color: u8,
        colors: u8,
    },

    #[error("code length {0} is not a triangular number")]
    CodeLength(usize),

    #[error("invalid color character '{0}'")]
    InvalidChar(char),

    #[error("sequence has {found} colors, a side-{side} board with one vacancy needs {expected}")]
    SequenceLength {
        side: usize,
        found: usize,
        expected: usize,
    },

    #[error("vacancy ({0}, {1}) is not on the board")]
    HoleOffBoard(i32, i32),
}

/// Setup failures of a search session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// A shared registry only holds meaningful states for the settings it
    /// was first used with.
    #[error(
        "registry was filled for side {expected_side}, {expected_colors} colors, \
         restricted={expected_restrict}; got side {side}, {colors} colors, restricted={restrict}"
    )]
    RegistryMismatch {
        expected_side: usize,
        expected_colors: u8,
        expected_restrict: bool,
        side: usize,
        colors: u8,
        restrict: bool,
    },
}

/// Anything that can stop a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
