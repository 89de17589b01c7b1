//! Set of board states already explored.
//!
//! States are inserted when the search enters them and never removed. A
//! registry may be kept across several solves, in which case it only stays
//! meaningful while side length, color count and restriction mode agree, so
//! the first solve binds those settings and later ones are checked.

use rustc_hash::FxHashSet;

use crate::board::{Board, BoardKey};
use crate::error::SearchError;

/// Settings a registry's states were explored under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryBinding {
    pub side: usize,
    pub colors: u8,
    pub restrict_to_n_jumps: bool,
}

/// Visited board states, keyed by canonical encoding.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    seen: FxHashSet<BoardKey>,
    binding: Option<RegistryBinding>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the registry to a session's settings, or checks that they match
    /// the ones it was first bound to.
    pub fn bind(&mut self, binding: RegistryBinding) -> Result<(), SearchError> {
        match self.binding {
            None => {
                self.binding = Some(binding);
                Ok(())
            }
            Some(expected) if expected == binding => Ok(()),
            Some(expected) => Err(SearchError::RegistryMismatch {
                expected_side: expected.side,
                expected_colors: expected.colors,
                expected_restrict: expected.restrict_to_n_jumps,
                side: binding.side,
                colors: binding.colors,
                restrict: binding.restrict_to_n_jumps,
            }),
        }
    }

    pub fn binding(&self) -> Option<RegistryBinding> {
        self.binding
    }

    /// Records a board state. Returns false if it was already present.
    #[inline]
    pub fn insert(&mut self, board: &Board) -> bool {
        if self.seen.contains(board.cells()) {
            return false;
        }
        self.seen.insert(board.key())
    }

    /// Checks a state without allocating a key.
    #[inline]
    pub fn contains(&self, board: &Board) -> bool {
        self.seen.contains(board.cells())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forgets every state and the binding.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.binding = None;
    }
}
