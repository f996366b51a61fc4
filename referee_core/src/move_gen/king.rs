use crate::board::{Bitboard, BoardRepr, Castling, Color, PieceType, Square};

use super::{BoardSnapshot, InteractionSet, Lookups};

/// The squares a king attacks and the friendly pieces it defends, before any
/// safety filtering.
pub(super) fn reach(board: &BoardRepr, color: Color) -> InteractionSet {
    let mut set = InteractionSet::default();
    let Some(king) = board.king_square(color) else {
        return set;
    };

    for square in Lookups::get_instance().king_moves(king).squares() {
        set.attacked.insert(square);
        if board.piece_with_color_at(color, square).is_some() {
            set.defended.insert(square);
        }
    }

    set
}

/// Completes a king's interaction set from its `reach`, given the enemy's
/// combined piece set and the enemy king's reach.
pub(super) fn interactions(
    snapshot: &BoardSnapshot,
    color: Color,
    mut set: InteractionSet,
    enemy: &InteractionSet,
    enemy_king: &InteractionSet,
) -> InteractionSet {
    let board = snapshot.board;
    let Some(king) = board.king_square(color) else {
        return set;
    };

    let enemy_attacked = enemy.attacked | enemy_king.attacked;
    let enemy_defended = enemy.defended | enemy_king.defended;
    let no_escape = enemy
        .checks
        .iter()
        .fold(Bitboard::EMPTY, |acc, check| acc | check.cannot_escape_to);

    for square in Lookups::get_instance().king_moves(king).squares() {
        if no_escape.contains(square) {
            continue;
        }

        match board.piece_at(square) {
            None if !enemy_attacked.contains(square) => set.possible_moves.insert(square),
            Some(piece)
                if piece.color() != color
                    && !piece.is(PieceType::King)
                    && !enemy_defended.contains(square) =>
            {
                set.captures.insert(square)
            }
            _ => {}
        }
    }

    if enemy.checks.is_empty() {
        add_castling(snapshot, color, king, enemy_attacked, &mut set);
    }

    set
}

fn add_castling(
    snapshot: &BoardSnapshot,
    color: Color,
    king: Square,
    enemy_attacked: Bitboard,
    set: &mut InteractionSet,
) {
    let rank = color.back_rank();
    if king != Square::new_unchecked(rank, 4) {
        return;
    }

    let board = snapshot.board;
    let sides = [
        (Castling::kingside(color), 7, [5, 6]),
        (Castling::queenside(color), 0, [3, 2]),
    ];

    for (right, rook_file, [transit, destination]) in sides {
        if !snapshot.castling.contains(right) {
            continue;
        }

        let rook = Square::new_unchecked(rank, rook_file);
        if board.piece_at(rook) != Some(PieceType::Rook.with_color(color)) {
            continue;
        }

        let (low, high) = if rook_file < 4 { (rook_file + 1, 4) } else { (5, rook_file) };
        let path_clear = (low..high).all(|file| board.piece_at(Square::new_unchecked(rank, file)).is_none());

        let transit = Square::new_unchecked(rank, transit);
        let destination = Square::new_unchecked(rank, destination);

        if path_clear && !enemy_attacked.contains(transit) && !enemy_attacked.contains(destination) {
            set.possible_moves.insert(destination);
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{move_gen::interactions_for, test_utils::board_from_diagram};

    use super::*;

    fn king_set(diagram: &str, castling: Castling, color: Color) -> InteractionSet {
        let board = board_from_diagram(diagram);
        let snapshot = BoardSnapshot {
            board: &board,
            castling,
            en_passant: None,
        };
        interactions_for(&snapshot).king(color).clone()
    }

    #[test]
    fn castles_both_ways() {
        let set = king_set(
            "
                r...k..r
                ........
                ........
                ........
                ........
                ........
                ........
                R...K..R
            ",
            Castling::all(),
            Color::White,
        );

        assert!(set.possible_moves.contains(Square::G1));
        assert!(set.possible_moves.contains(Square::C1));
    }

    #[test]
    fn no_castling_without_rights() {
        let set = king_set(
            "
                r...k..r
                ........
                ........
                ........
                ........
                ........
                ........
                R...K..R
            ",
            Castling::BLACK | Castling::WHITE_QUEENSIDE,
            Color::White,
        );

        assert!(!set.possible_moves.contains(Square::G1));
        assert!(set.possible_moves.contains(Square::C1));
    }

    #[test]
    fn no_castling_through_attack_or_pieces() {
        // f1 is attacked by the rook on f8, b1 is occupied by a knight
        let set = king_set(
            "
                r...kr..
                ........
                ........
                ........
                ........
                ........
                ........
                RN..K..R
            ",
            Castling::all(),
            Color::White,
        );

        assert!(!set.possible_moves.contains(Square::G1));
        assert!(!set.possible_moves.contains(Square::C1));
    }

    #[test]
    fn queenside_allows_attacked_b_file() {
        let set = king_set(
            "
                .r..k...
                ........
                ........
                ........
                ........
                ........
                ........
                R...K...
            ",
            Castling::WHITE_QUEENSIDE,
            Color::White,
        );

        assert!(set.possible_moves.contains(Square::C1));
    }

    #[test]
    fn no_castling_out_of_check() {
        let set = king_set(
            "
                r...k..r
                ........
                ........
                ........
                ........
                ........
                ........
                R...K..R
            ",
            Castling::all(),
            Color::Black,
        );
        assert!(set.possible_moves.contains(Square::G8));

        let set = king_set(
            "
                r...k..r
                ........
                ........
                .B......
                ........
                ........
                ........
                R...K..R
            ",
            Castling::all(),
            Color::Black,
        );
        assert_eq!(set.possible_moves & Bitboard::from([Square::G8, Square::C8]), Bitboard::EMPTY);
    }
}
