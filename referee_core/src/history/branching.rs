use std::fmt::Display;

use crate::notation::NotatedMove;

use super::{record::Movetext, HistoryError, MoveRecord, MoveTracker};

/// Which line of a [`BranchingTracker`] pushes and lookups go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BranchSelection {
    #[default]
    MainLine,
    /// Variation `index` of main line entry `start`. Selecting
    /// `index == variation_count(start)` opens a new variation.
    Variation { start: usize, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<T> {
    item: T,
    variations: Vec<Vec<T>>,
}

/// A main line whose entries own variations.
///
/// A variation of entry `start` begins with a copy of that entry, so on the
/// active line indices up to `start` read the main line and `start + k`
/// reads entry `k` of the variation. Pushing onto a variation never touches
/// the main line or any sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchingTracker<T> {
    main: Vec<Entry<T>>,
    selection: BranchSelection,
}

impl<T> Default for BranchingTracker<T> {
    fn default() -> Self {
        Self {
            main: Vec::new(),
            selection: BranchSelection::MainLine,
        }
    }
}

impl<T: Clone> BranchingTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> BranchSelection {
        self.selection
    }

    pub fn main_line_len(&self) -> usize {
        self.main.len()
    }

    pub fn variation_count(&self, start: usize) -> usize {
        self.main.get(start).map_or(0, |entry| entry.variations.len())
    }

    /// The whole of a variation, seed included.
    pub fn variation(&self, start: usize, index: usize) -> Option<&[T]> {
        self.main
            .get(start)
            .and_then(|entry| entry.variations.get(index))
            .map(Vec::as_slice)
    }

    /// Whether `selection` could be made without making it.
    pub fn check_branch(&self, selection: BranchSelection) -> Result<(), HistoryError> {
        let BranchSelection::Variation { start, index } = selection else {
            return Ok(());
        };

        if start >= self.main.len() {
            return Err(HistoryError::NoSuchMove(start));
        }
        if index > self.variation_count(start) {
            return Err(HistoryError::NoSuchVariation { start, index });
        }

        Ok(())
    }

    pub fn set_branch(&mut self, selection: BranchSelection) -> Result<(), HistoryError> {
        self.check_branch(selection)?;

        if let BranchSelection::Variation { start, index } = selection {
            let entry = &mut self.main[start];
            if index == entry.variations.len() {
                let seed = entry.item.clone();
                entry.variations.push(vec![seed]);
            }
        }

        self.selection = selection;
        Ok(())
    }

    pub fn active_line(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len()).filter_map(|index| self.get(index))
    }

    fn active_variation(&self) -> Option<(usize, &Vec<T>)> {
        match self.selection {
            BranchSelection::MainLine => None,
            BranchSelection::Variation { start, index } => {
                Some((start, &self.main[start].variations[index]))
            }
        }
    }
}

impl<T: Clone> MoveTracker for BranchingTracker<T> {
    type Item = T;

    fn push(&mut self, item: T) {
        match self.selection {
            BranchSelection::MainLine => self.main.push(Entry {
                item,
                variations: Vec::new(),
            }),
            BranchSelection::Variation { start, index } => {
                self.main[start].variations[index].push(item)
            }
        }
    }

    fn get(&self, index: usize) -> Option<&T> {
        match self.active_variation() {
            Some((start, variation)) if index >= start => variation.get(index - start),
            _ => self.main.get(index).map(|entry| &entry.item),
        }
    }

    fn len(&self) -> usize {
        match self.active_variation() {
            Some((start, variation)) => start + variation.len(),
            None => self.main.len(),
        }
    }

    fn truncate(&mut self, len: usize) {
        match self.selection {
            BranchSelection::MainLine => self.main.truncate(len),
            BranchSelection::Variation { start, index } => {
                // the seed stays
                self.main[start].variations[index].truncate(len.saturating_sub(start).max(1))
            }
        }
    }

    fn floor(&self) -> usize {
        match self.selection {
            BranchSelection::MainLine => 0,
            BranchSelection::Variation { start, .. } => start + 1,
        }
    }
}

impl BranchingTracker<NotatedMove> {
    /// The main line as records, each carrying the variations rooted at it.
    pub fn records(&self) -> Vec<MoveRecord> {
        self.main
            .iter()
            .map(|entry| MoveRecord {
                variations: entry
                    .variations
                    .iter()
                    .map(|variation| {
                        variation[1..]
                            .iter()
                            .map(|notated| MoveRecord::new(*notated, false))
                            .collect()
                    })
                    .collect(),
                ..MoveRecord::new(entry.item, true)
            })
            .collect()
    }
}

/// Variations rooted at a move are written after the main line move that
/// they replace.
impl Display for BranchingTracker<NotatedMove> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut movetext = Movetext::default();

        for (i, entry) in self.main.iter().enumerate() {
            movetext.push(&entry.item);
            if let Some(previous) = i.checked_sub(1) {
                for variation in &self.main[previous].variations {
                    movetext.push_variation(&variation[1..]);
                }
            }
        }

        if let Some(last) = self.main.last() {
            for variation in &last.variations {
                movetext.push_variation(&variation[1..]);
            }
        }

        f.write_str(movetext.as_str())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tracker_of(items: &[&'static str]) -> BranchingTracker<&'static str> {
        let mut tracker = BranchingTracker::new();
        for &item in items {
            tracker.push(item);
        }
        tracker
    }

    #[test]
    fn main_line_only() {
        let tracker = tracker_of(&["e4", "e5", "Nf3"]);
        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.last(), Some(&"Nf3"));
        assert_eq!(tracker.selection(), BranchSelection::MainLine);
        assert_eq!(tracker.active_line().copied().collect::<Vec<_>>(), ["e4", "e5", "Nf3"]);
    }

    #[test]
    fn new_variation_is_seeded_with_its_branch_point() {
        let mut tracker = tracker_of(&["e4", "e5", "Nf3"]);
        tracker
            .set_branch(BranchSelection::Variation { start: 1, index: 0 })
            .unwrap();

        assert_eq!(tracker.variation(1, 0), Some(&["e5"][..]));
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.get(0), Some(&"e4"));
        assert_eq!(tracker.get(1), Some(&"e5"));
        assert_eq!(tracker.get(2), None);
        assert_eq!(tracker.floor(), 2);

        tracker.push("Nc3");
        assert_eq!(tracker.get(2), Some(&"Nc3"));
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn variations_are_isolated() {
        let mut tracker = tracker_of(&["e4", "e5", "Nf3"]);
        let main_before = tracker.clone();

        tracker
            .set_branch(BranchSelection::Variation { start: 1, index: 0 })
            .unwrap();
        tracker.push("Nc3");
        tracker
            .set_branch(BranchSelection::Variation { start: 1, index: 1 })
            .unwrap();
        tracker.push("Bc4");
        tracker.push("Nc6");

        assert_eq!(tracker.variation(1, 0), Some(&["e5", "Nc3"][..]));
        assert_eq!(tracker.variation(1, 1), Some(&["e5", "Bc4", "Nc6"][..]));
        assert_eq!(tracker.variation_count(1), 2);

        tracker.set_branch(BranchSelection::MainLine).unwrap();
        assert_eq!(
            tracker.active_line().collect::<Vec<_>>(),
            main_before.active_line().collect::<Vec<_>>()
        );
    }

    #[test]
    fn truncation_keeps_the_seed() {
        let mut tracker = tracker_of(&["e4", "e5", "Nf3"]);
        tracker
            .set_branch(BranchSelection::Variation { start: 1, index: 0 })
            .unwrap();
        tracker.push("Nc3");
        tracker.push("Nf6");

        tracker.truncate(3);
        assert_eq!(tracker.variation(1, 0), Some(&["e5", "Nc3"][..]));
        tracker.truncate(0);
        assert_eq!(tracker.variation(1, 0), Some(&["e5"][..]));
        assert_eq!(tracker.main_line_len(), 3);
    }

    #[test]
    fn rejects_unknown_branches() {
        let mut tracker = tracker_of(&["e4", "e5"]);

        assert_eq!(
            tracker.set_branch(BranchSelection::Variation { start: 2, index: 0 }),
            Err(HistoryError::NoSuchMove(2))
        );
        assert_eq!(
            tracker.set_branch(BranchSelection::Variation { start: 0, index: 1 }),
            Err(HistoryError::NoSuchVariation { start: 0, index: 1 })
        );
        assert_eq!(tracker.selection(), BranchSelection::MainLine);
        assert_eq!(tracker.variation_count(0), 0);
    }
}
