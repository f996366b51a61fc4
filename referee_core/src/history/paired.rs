use super::{BranchSelection, BranchingTracker, HistoryError, MoveTracker};

/// Two trackers kept in lockstep: every push, truncation and branch
/// selection applies to both, so index `i` of one always corresponds to
/// index `i` of the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairedTracker<A, B> {
    first: A,
    second: B,
}

impl<A: MoveTracker, B: MoveTracker> PairedTracker<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn push(&mut self, first: A::Item, second: B::Item) {
        self.first.push(first);
        self.second.push(second);
    }

    pub fn get(&self, index: usize) -> Option<(&A::Item, &B::Item)> {
        self.first.get(index).zip(self.second.get(index))
    }

    pub fn last_move(&self) -> Option<(&A::Item, &B::Item)> {
        self.first.last().zip(self.second.last())
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn floor(&self) -> usize {
        self.first.floor()
    }

    pub fn truncate(&mut self, len: usize) {
        self.first.truncate(len);
        self.second.truncate(len);
    }
}

impl<T: Clone, U: Clone> PairedTracker<BranchingTracker<T>, BranchingTracker<U>> {
    pub fn selection(&self) -> BranchSelection {
        self.first.selection()
    }

    pub fn set_branch(&mut self, selection: BranchSelection) -> Result<(), HistoryError> {
        self.first.check_branch(selection)?;
        self.second.check_branch(selection)?;

        self.first.set_branch(selection)?;
        self.second.set_branch(selection)
    }
}
