//! Histories of played moves.
//!
//! A [`LinearTracker`] is a plain list. A [`BranchingTracker`] is a main line
//! whose entries may own variations, each a separate line seeded with a copy
//! of the entry it branches from. A [`PairedTracker`] keeps two trackers in
//! lockstep, which is how analysis games store each move alongside the
//! position it led to.

mod branching;
mod linear;
mod paired;
mod record;

use thiserror::Error;

pub use branching::{BranchSelection, BranchingTracker};
pub use linear::LinearTracker;
pub use paired::PairedTracker;
pub use record::MoveRecord;

/// Operations every history supports on its active line.
pub trait MoveTracker {
    type Item;

    fn push(&mut self, item: Self::Item);

    fn get(&self, index: usize) -> Option<&Self::Item>;

    fn len(&self) -> usize;

    /// Shortens the active line to at most `len` entries.
    fn truncate(&mut self, len: usize);

    /// The shortest length [`Self::truncate`] can reach on the active line.
    fn floor(&self) -> usize {
        0
    }

    fn last(&self) -> Option<&Self::Item> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("there is no move at index {0} to branch from")]
    NoSuchMove(usize),
    #[error("move {start} has no variation {index}")]
    NoSuchVariation { start: usize, index: usize },
    #[error("there is no move to revert on this line")]
    NothingToRevert,
    #[error("variations are only available in analysis mode")]
    VariationsUnsupported,
    #[error("index {index} is past the end of the line ({len} moves)")]
    IndexOutOfRange { index: usize, len: usize },
}
