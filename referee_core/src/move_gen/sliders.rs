use crate::board::{Bitboard, BoardRepr, Color, PieceType, Square};

use super::{Direction, InteractionSet, KingCheck, Pin};

/// Walks every ray of a bishop, rook or queen standing on `from`.
pub(super) fn scan(
    board: &BoardRepr,
    from: Square,
    color: Color,
    directions: &[Direction],
    set: &mut InteractionSet,
) {
    for &direction in directions {
        scan_ray(board, from, color, direction, set);
    }
}

fn scan_ray(
    board: &BoardRepr,
    from: Square,
    color: Color,
    direction: Direction,
    set: &mut InteractionSet,
) {
    let mut crossed = Bitboard::EMPTY;
    let mut cursor = from;

    while let Some(square) = direction.step(cursor) {
        cursor = square;
        set.attacked.insert(square);

        let Some(piece) = board.piece_at(square) else {
            set.possible_moves.insert(square);
            crossed.insert(square);
            continue;
        };

        if piece.color() == color {
            set.defended.insert(square);
        } else if piece.is(PieceType::King) {
            let cannot_escape_to = xray_behind_king(board, square, color, direction, set);
            set.checks.push(KingCheck {
                attacker: from,
                possible_blocks: crossed,
                cannot_escape_to,
            });
        } else {
            set.captures.insert(square);
            if let Some(pin) = confirm_pin(board, from, square, color, direction, crossed) {
                set.pins.push(pin);
            }
        }

        return;
    }
}

/// Continues a checking ray past the king: the empty squares and the first
/// occupied square behind it stay attacked once the king steps back.
fn xray_behind_king(
    board: &BoardRepr,
    king: Square,
    color: Color,
    direction: Direction,
    set: &mut InteractionSet,
) -> Bitboard {
    let mut behind = Bitboard::EMPTY;
    let mut cursor = king;

    while let Some(square) = direction.step(cursor) {
        cursor = square;
        behind.insert(square);
        set.attacked.insert(square);

        if let Some(piece) = board.piece_at(square) {
            if piece.color() == color {
                set.defended.insert(square);
            }
            break;
        }
    }

    behind
}

/// After hitting an enemy piece, looks one piece further along the ray. If
/// that is the enemy king, the first piece is pinned.
fn confirm_pin(
    board: &BoardRepr,
    pinner: Square,
    pinned: Square,
    color: Color,
    direction: Direction,
    crossed: Bitboard,
) -> Option<Pin> {
    let mut between = crossed;
    between.insert(pinner);
    let mut cursor = pinned;

    while let Some(square) = direction.step(cursor) {
        cursor = square;

        match board.piece_at(square) {
            None => between.insert(square),
            Some(piece) if piece.color() != color && piece.is(PieceType::King) => {
                return Some(Pin {
                    pinned,
                    pinner,
                    line: between,
                    possible_moves: Bitboard::EMPTY,
                });
            }
            Some(_) => return None,
        }
    }

    None
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::test_utils::board_from_diagram;

    use super::*;

    #[test]
    fn rook_rays_stop_at_first_piece() {
        let board = board_from_diagram(
            "
                ....k...
                ........
                ...p....
                ........
                .P.R..n.
                ........
                ........
                ....K...
            ",
        );
        let mut set = InteractionSet::default();
        scan(&board, Square::D4, Color::White, &Direction::ORTHOGONAL, &mut set);

        assert_eq!(
            set.possible_moves,
            Bitboard::from([
                Square::D5,
                Square::C4,
                Square::E4,
                Square::F4,
                Square::D3,
                Square::D2,
                Square::D1,
            ])
        );
        assert_eq!(set.captures, Bitboard::from([Square::D6, Square::G4]));
        assert_eq!(set.defended, Bitboard::from([Square::B4]));
        assert!(set.checks.is_empty());
        assert!(set.pins.is_empty());
    }

    #[test]
    fn bishop_pins_knight_to_king() {
        let board = board_from_diagram(
            "
                ....k...
                ........
                ..n.....
                ........
                B.......
                ........
                ........
                ....K...
            ",
        );
        let mut set = InteractionSet::default();
        scan(&board, Square::A4, Color::White, &Direction::DIAGONAL, &mut set);

        assert_eq!(
            set.pins,
            vec![Pin {
                pinned: Square::C6,
                pinner: Square::A4,
                line: Bitboard::from([Square::A4, Square::B5, Square::D7]),
                possible_moves: Bitboard::EMPTY,
            }]
        );
    }

    #[test]
    fn second_piece_cancels_pin() {
        let board = board_from_diagram(
            "
                ....k...
                ...p....
                ..n.....
                ........
                B.......
                ........
                ........
                ....K...
            ",
        );
        let mut set = InteractionSet::default();
        scan(&board, Square::A4, Color::White, &Direction::DIAGONAL, &mut set);

        assert!(set.pins.is_empty());
        assert!(set.captures.contains(Square::C6));
    }
}
