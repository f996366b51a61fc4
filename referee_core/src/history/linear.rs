use std::fmt::Display;

use crate::notation::NotatedMove;

use super::{record::Movetext, MoveRecord, MoveTracker};

/// A single ordered line of moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearTracker<T> {
    items: Vec<T>,
}

impl<T> Default for LinearTracker<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> LinearTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> MoveTracker for LinearTracker<T> {
    type Item = T;

    fn push(&mut self, item: T) {
        self.items.push(item);
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }
}

impl LinearTracker<NotatedMove> {
    pub fn records(&self) -> Vec<MoveRecord> {
        self.items
            .iter()
            .map(|notated| MoveRecord::new(*notated, true))
            .collect()
    }
}

impl Display for LinearTracker<NotatedMove> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut movetext = Movetext::default();
        for notated in &self.items {
            movetext.push(notated);
        }
        f.write_str(movetext.as_str())
    }
}
