//! Move path enumeration, for validating the move generator against known
//! node counts.

use crate::{board::Move, position::Position};

/// Counts the leaves of the legal move tree of `position` at `depth`.
///
/// Draws by rule do not stop the count; only positions without legal moves
/// are leaves before `depth`.
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|m| {
            let mut next = position.clone();
            next.play_unchecked(m);
            perft(&next, depth - 1)
        })
        .sum()
}

/// [`perft`] split by first move.
pub fn divide(position: &Position, depth: usize) -> Vec<(Move, u64)> {
    assert!(depth >= 1);

    position
        .legal_moves()
        .into_iter()
        .map(|m| {
            let mut next = position.clone();
            next.play_unchecked(m);
            (m, perft(&next, depth - 1))
        })
        .collect()
}
