use crate::board::{Color, PieceType, Square};

use super::{BoardSnapshot, InteractionSet, KingCheck};

pub(super) fn scan(snapshot: &BoardSnapshot, from: Square, color: Color, set: &mut InteractionSet) {
    let board = snapshot.board;
    let forward = color.forward();

    if let Some(single) = from.offset(forward, 0) {
        if board.piece_at(single).is_none() {
            set.possible_moves.insert(single);

            if from.rank() == color.pawn_rank() {
                if let Some(double) = single.offset(forward, 0) {
                    if board.piece_at(double).is_none() {
                        set.possible_moves.insert(double);
                    }
                }
            }
        }
    }

    let en_passant = en_passant_target(snapshot, color);

    for file_delta in [-1, 1] {
        let Some(target) = from.offset(forward, file_delta) else {
            continue;
        };
        set.attacked.insert(target);

        match board.piece_at(target) {
            Some(piece) if piece.color() == color => set.defended.insert(target),
            Some(piece) if piece.is(PieceType::King) => set.checks.push(KingCheck::contact(from)),
            Some(_) => set.captures.insert(target),
            None if en_passant == Some(target) => set.captures.insert(target),
            None => {}
        }
    }
}

/// The en passant target, provided `color` could actually capture onto it:
/// the square is empty, on the right rank, and the pawn that skipped it is
/// still standing just beyond.
fn en_passant_target(snapshot: &BoardSnapshot, color: Color) -> Option<Square> {
    let target = snapshot.en_passant?;
    if target.rank() != color.en_passant_rank() || snapshot.board.piece_at(target).is_some() {
        return None;
    }

    let victim = target.offset(-color.forward(), 0)?;
    (snapshot.board.piece_at(victim) == Some(PieceType::Pawn.with_color(color.flip())))
        .then_some(target)
}
