use std::fmt::Display;

use crate::{
    history::{
        BranchSelection, BranchingTracker, HistoryError, LinearTracker, MoveRecord, MoveTracker,
        PairedTracker,
    },
    notation::NotatedMove,
    position::Position,
};

/// How a game keeps its history, fixed when the game is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// A single line of moves, as in a game being played.
    #[default]
    Standard,
    /// Moves and the positions they lead to, with variations.
    Analysis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameHistory {
    Linear(LinearTracker<NotatedMove>),
    Analysis(PairedTracker<BranchingTracker<NotatedMove>, BranchingTracker<Position>>),
}

impl GameHistory {
    pub fn new(mode: GameMode) -> Self {
        match mode {
            GameMode::Standard => GameHistory::Linear(LinearTracker::new()),
            GameMode::Analysis => GameHistory::Analysis(PairedTracker::new(
                BranchingTracker::new(),
                BranchingTracker::new(),
            )),
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            GameHistory::Linear(_) => GameMode::Standard,
            GameHistory::Analysis(_) => GameMode::Analysis,
        }
    }

    /// Records a move and, for analysis, the position it led to.
    pub fn push(&mut self, notated: NotatedMove, after: &Position) {
        match self {
            GameHistory::Linear(tracker) => tracker.push(notated),
            GameHistory::Analysis(paired) => paired.push(notated, after.clone()),
        }
    }

    /// The number of moves on the active line.
    pub fn len(&self) -> usize {
        match self {
            GameHistory::Linear(tracker) => tracker.len(),
            GameHistory::Analysis(paired) => paired.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn floor(&self) -> usize {
        match self {
            GameHistory::Linear(tracker) => tracker.floor(),
            GameHistory::Analysis(paired) => paired.floor(),
        }
    }

    pub fn truncate(&mut self, len: usize) {
        match self {
            GameHistory::Linear(tracker) => tracker.truncate(len),
            GameHistory::Analysis(paired) => paired.truncate(len),
        }
    }

    pub fn get(&self, index: usize) -> Option<&NotatedMove> {
        match self {
            GameHistory::Linear(tracker) => tracker.get(index),
            GameHistory::Analysis(paired) => paired.first().get(index),
        }
    }

    /// The moves of the active line in order.
    pub fn moves(&self) -> Vec<NotatedMove> {
        (0..self.len())
            .filter_map(|index| self.get(index))
            .copied()
            .collect()
    }

    /// The stored position after move `index` of the active line. Only
    /// analysis histories store positions.
    pub fn position_after(&self, index: usize) -> Option<&Position> {
        match self {
            GameHistory::Linear(_) => None,
            GameHistory::Analysis(paired) => paired.get(index).map(|(_, position)| position),
        }
    }

    pub fn selection(&self) -> BranchSelection {
        match self {
            GameHistory::Linear(_) => BranchSelection::MainLine,
            GameHistory::Analysis(paired) => paired.selection(),
        }
    }

    pub fn set_branch(&mut self, selection: BranchSelection) -> Result<(), HistoryError> {
        match self {
            GameHistory::Linear(_) => Err(HistoryError::VariationsUnsupported),
            GameHistory::Analysis(paired) => paired.set_branch(selection),
        }
    }

    pub fn records(&self) -> Vec<MoveRecord> {
        match self {
            GameHistory::Linear(tracker) => tracker.records(),
            GameHistory::Analysis(paired) => paired.first().records(),
        }
    }
}

impl Display for GameHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameHistory::Linear(tracker) => tracker.fmt(f),
            GameHistory::Analysis(paired) => paired.first().fmt(f),
        }
    }
}
