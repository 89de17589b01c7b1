//! Multicolor Triangular Peg Solitaire Solver Library
//!
//! Searches for a jump sequence that reduces a triangular board to at most
//! one peg. A jumped peg is recolored by adding the moving peg's color modulo
//! the color count, and only leaves the board when that sum wraps to zero.

pub mod batch;
pub mod board;
pub mod error;
pub mod moves;
pub mod parity;
pub mod registry;
pub mod report;
pub mod solver;

pub use board::{Board, Coord};
pub use error::{BatchError, BoardError, SearchError};
pub use moves::Move;
pub use registry::VisitedRegistry;
pub use solver::{solve, SearchEngine, SearchOptions, SearchStats};
