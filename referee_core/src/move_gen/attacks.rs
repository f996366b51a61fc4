use crate::board::{BoardRepr, Color, Piece, PieceType, Square};

use super::{Direction, Lookups};

/// Whether any piece of color `by` attacks `square` on this board.
///
/// Used to confirm that a candidate move does not leave the mover's king in
/// check, so it looks outward from the square instead of generating every
/// enemy move.
pub fn is_square_attacked(board: &BoardRepr, square: Square, by: Color) -> bool {
    let lookups = Lookups::get_instance();

    if (lookups.knight_moves(square) & board[PieceType::Knight.with_color(by)]).has_piece()
        || (lookups.king_moves(square) & board[PieceType::King.with_color(by)]).has_piece()
    {
        return true;
    }

    // an attacking pawn stands one rank behind the square, from its own side
    let pawn = PieceType::Pawn.with_color(by);
    if [-1, 1]
        .into_iter()
        .filter_map(|file_delta| square.offset(-by.forward(), file_delta))
        .any(|origin| board.piece_at(origin) == Some(pawn))
    {
        return true;
    }

    let queen = PieceType::Queen.with_color(by);
    let rook = PieceType::Rook.with_color(by);
    let bishop = PieceType::Bishop.with_color(by);

    Direction::ALL.into_iter().any(|direction| {
        let Some(blocker) = first_piece_along(board, square, direction) else {
            return false;
        };
        let slider = if direction.is_diagonal() { bishop } else { rook };
        blocker == queen || blocker == slider
    })
}

fn first_piece_along(board: &BoardRepr, from: Square, direction: Direction) -> Option<Piece> {
    let mut cursor = from;
    while let Some(square) = direction.step(cursor) {
        if let Some(piece) = board.piece_at(square) {
            return Some(piece);
        }
        cursor = square;
    }
    None
}
