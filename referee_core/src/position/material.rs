//! Material-based draw detection.

use crate::board::{Bitboard, BoardRepr, Color, PieceType};

/// True when neither side can possibly deliver mate with what is left.
///
/// Any pawn, rook or queen on the board is enough. Otherwise only minor
/// pieces remain and the position is drawn when both sides are bare, when a
/// lone bishop or knight faces a bare king, when two knights face a bare
/// king, or when any number of bishops all on one square color face a bare
/// king. Every other combination counts as sufficient.
pub fn is_insufficient(board: &BoardRepr) -> bool {
    if has_heavy_material(board, Color::White) || has_heavy_material(board, Color::Black) {
        return false;
    }

    let white = MinorPieces::of(board, Color::White);
    let black = MinorPieces::of(board, Color::Black);

    match (white.count(), black.count()) {
        (0, 0) => true,
        (_, 0) => white.cannot_mate_alone(),
        (0, _) => black.cannot_mate_alone(),
        _ => false,
    }
}

/// Whether `color` could deliver mate by some sequence of legal moves.
///
/// Rooks, queens, pawns and any two minor pieces that are not all bishops on
/// one square color are always enough. A lone knight needs an enemy man
/// besides the king to hem the king in. Bishops all on one square color need
/// an enemy blocker that is not a bishop of that same color.
pub fn has_mating_material(board: &BoardRepr, color: Color) -> bool {
    if has_heavy_material(board, color) {
        return true;
    }

    let own = MinorPieces::of(board, color);
    let enemy = MinorPieces::of(board, color.flip());
    let enemy_heavy = has_heavy_material(board, color.flip());

    match (own.knights, own.bishops.pop_count()) {
        (0, 0) => false,
        (1, 0) => enemy_heavy || enemy.count() > 0,
        (0, _) if own.bishops_share_a_color() => {
            let blocking_bishops = enemy.bishops.without(own.bishop_squares());
            enemy_heavy || enemy.knights > 0 || blocking_bishops.has_piece()
        }
        _ => true,
    }
}

fn has_heavy_material(board: &BoardRepr, color: Color) -> bool {
    [PieceType::Pawn, PieceType::Rook, PieceType::Queen]
        .into_iter()
        .any(|piece_type| board[piece_type.with_color(color)].has_piece())
}

struct MinorPieces {
    knights: u32,
    bishops: Bitboard,
}

impl MinorPieces {
    fn of(board: &BoardRepr, color: Color) -> Self {
        Self {
            knights: board.count(PieceType::Knight.with_color(color)),
            bishops: board[PieceType::Bishop.with_color(color)],
        }
    }

    fn count(&self) -> u32 {
        self.knights + self.bishops.pop_count()
    }

    fn bishops_share_a_color(&self) -> bool {
        (self.bishops & Bitboard::LIGHT_SQUARES).is_empty()
            || (self.bishops & Bitboard::DARK_SQUARES).is_empty()
    }

    /// The squares of the color the bishops stand on. Only meaningful when
    /// they share one.
    fn bishop_squares(&self) -> Bitboard {
        if (self.bishops & Bitboard::LIGHT_SQUARES).has_piece() {
            Bitboard::LIGHT_SQUARES
        } else {
            Bitboard::DARK_SQUARES
        }
    }

    fn cannot_mate_alone(&self) -> bool {
        match (self.knights, self.bishops.pop_count()) {
            (1, 0) | (0, 1) => true,
            (2, 0) => true,
            (0, _) => self.bishops_share_a_color(),
            _ => false,
        }
    }
}
