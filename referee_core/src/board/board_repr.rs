use std::{
    fmt::{Display, Write},
    ops::{Index, IndexMut, Range},
};

use super::{Bitboard, Color, Move, Piece, PieceType, Square};

/// Piece placement only: which piece, if any, stands on each square.
///
/// Internally one [`Bitboard`] per colored piece kind plus one per color,
/// readable by indexing with a [`Piece`] or a [`Color`]:
/// ```
/// # use referee_core::board::{BoardRepr, Color, Piece};
/// fn describe(board: &BoardRepr) {
///     println!("White king: {:?}", board[Piece::WHITE_KING]);
///     println!("All black pieces: {:?}", board[Color::Black]);
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoardRepr {
    // 0: all white pieces, 1-6: white pawns..kings, 7: unused,
    // 8: all black pieces, 9-14: black pawns..kings
    boards: [Bitboard; 15],
}

impl BoardRepr {
    const WHITE_RANGE: Range<usize> = 1..7;
    const BLACK_RANGE: Range<usize> = 9..15;

    /// Builds a board from squares listed in [`Square::index`] order. Missing
    /// trailing squares are empty and anything past the 64th is ignored.
    pub fn new(board: &[Option<Piece>]) -> Self {
        let mut repr = Self::default();

        for (i, &piece) in board.iter().take(64).enumerate() {
            if let Some(piece) = piece {
                repr.put(Square::from_index_unchecked(i), piece);
            }
        }

        repr
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !self.occupied().contains(square) {
            return None;
        }

        Self::WHITE_RANGE
            .chain(Self::BLACK_RANGE)
            .find(|&i| self.boards[i].contains(square))
            .and_then(|i| Piece::try_from_u8(i as u8))
    }

    pub fn piece_with_color_at(&self, color: Color, square: Square) -> Option<Piece> {
        self.piece_at(square)
            .filter(|piece| piece.color() == color)
    }

    pub fn occupied(&self) -> Bitboard {
        self[Color::White] | self[Color::Black]
    }

    pub fn empty(&self) -> Bitboard {
        !self.occupied()
    }

    /// Number of pieces of the given kind and color.
    pub fn count(&self, piece: Piece) -> u32 {
        self[piece].pop_count()
    }

    /// Where the given side's king stands, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self[PieceType::King.with_color(color)].first()
    }

    /// Every piece on the board with its square, grouped by piece kind.
    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Color::BOTH
            .into_iter()
            .flat_map(move |color| self.pieces_of(color))
    }

    /// Every piece of one color with its square.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Piece, Square)> + '_ {
        PieceType::ALL.into_iter().flat_map(move |piece_type| {
            let piece = piece_type.with_color(color);
            self[piece].squares().map(move |square| (piece, square))
        })
    }

    /// Places a piece on an empty square.
    pub fn put(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.piece_at(square).is_none(), "{square} is occupied");
        self[piece].insert(square);
        self[piece.color()].insert(square);
    }

    /// Lifts whatever stands on the square off the board.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        self[piece].remove(square);
        self[piece.color()].remove(square);
        Some(piece)
    }

    /// Plays the move on the board without any legality checks: the moving
    /// piece relocates (becoming its promotion piece if any), a captured piece
    /// is removed, an en passant victim is removed from beside the
    /// destination, and a castling rook jumps over the king.
    pub fn make_move_unchecked(&mut self, the_move: Move) {
        let from = the_move.from_square();
        let to = the_move.to_square();

        let Some(piece) = self.take(from) else {
            return;
        };

        if the_move.is_en_passant() {
            self.take(the_move.en_passant_square());
        }
        self.take(to);
        self.put(to, the_move.promotion().unwrap_or(piece));

        if the_move.is_castle() {
            let (rook_from, rook_to) = the_move.castling_rook_squares();
            if let Some(rook) = self.take(rook_from) {
                self.put(rook_to, rook);
            }
        }
    }

    /// The board as a 64-entry array in [`Square::index`] order.
    pub fn to_array(&self) -> [Option<Piece>; 64] {
        let mut squares = [None; 64];
        for (piece, square) in self.pieces() {
            squares[square.index()] = Some(piece);
        }
        squares
    }
}

impl Display for BoardRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let square = Square::new_unchecked(rank, file);
                f.write_char(self.piece_at(square).map_or('.', Piece::as_fen_char))?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl Index<Piece> for BoardRepr {
    type Output = Bitboard;

    fn index(&self, index: Piece) -> &Self::Output {
        &self.boards[index.get() as usize]
    }
}

impl Index<Color> for BoardRepr {
    type Output = Bitboard;

    fn index(&self, index: Color) -> &Self::Output {
        &self.boards[index as usize]
    }
}

impl IndexMut<Piece> for BoardRepr {
    fn index_mut(&mut self, index: Piece) -> &mut Self::Output {
        &mut self.boards[index.get() as usize]
    }
}

impl IndexMut<Color> for BoardRepr {
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self.boards[index as usize]
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::test_utils::board_from_diagram;

    use super::*;

    fn starting_board() -> BoardRepr {
        board_from_diagram(
            "
                rnbqkbnr
                pppppppp
                ........
                ........
                ........
                ........
                PPPPPPPP
                RNBQKBNR
            ",
        )
    }

    #[test]
    fn short_input_leaves_rest_empty() {
        let board = BoardRepr::new(&[
            Some(Piece::WHITE_ROOK),
            Some(Piece::BLACK_KING),
            None,
            Some(Piece::BLACK_BISHOP),
        ]);

        let mut pieces = board.pieces().collect::<Vec<_>>();
        pieces.sort_by_key(|&(_piece, square)| square);

        assert_eq!(
            pieces,
            vec![
                (Piece::WHITE_ROOK, Square::A1),
                (Piece::BLACK_KING, Square::B1),
                (Piece::BLACK_BISHOP, Square::D1),
            ]
        );
    }

    #[test]
    fn piece_lookup() {
        let board = starting_board();

        assert_eq!(board.piece_at(Square::D1), Some(Piece::WHITE_QUEEN));
        assert_eq!(board.piece_at(Square::B8), Some(Piece::BLACK_KNIGHT));
        assert_eq!(board.piece_at(Square::H7), Some(Piece::BLACK_PAWN));
        assert_eq!(board.piece_at(Square::E4), None);

        assert_eq!(
            board.piece_with_color_at(Color::White, Square::D1),
            Some(Piece::WHITE_QUEEN)
        );
        assert_eq!(board.piece_with_color_at(Color::Black, Square::D1), None);

        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(board.count(Piece::WHITE_PAWN), 8);
        assert_eq!(board.occupied().pop_count(), 32);
    }

    #[test]
    fn take_and_put() {
        let mut board = starting_board();

        assert_eq!(board.take(Square::G1), Some(Piece::WHITE_KNIGHT));
        assert_eq!(board.take(Square::G1), None);
        board.put(Square::F3, Piece::WHITE_KNIGHT);

        assert_eq!(board.piece_at(Square::F3), Some(Piece::WHITE_KNIGHT));
        assert!(board[Color::White].contains(Square::F3));
        assert!(!board[Color::White].contains(Square::G1));
    }

    #[test]
    fn make_move_unchecked_capture() {
        let mut board = board_from_diagram(
            "
                ....k...
                ........
                ........
                ...p....
                ....P...
                ........
                ........
                ....K...
            ",
        );

        board.make_move_unchecked(
            Move::builder(Square::E4, Square::D5, Piece::WHITE_PAWN)
                .captures(Piece::BLACK_PAWN)
                .build(),
        );

        assert_eq!(board.piece_at(Square::D5), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_at(Square::E4), None);
        assert_eq!(board[Color::Black].pop_count(), 1);
    }

    #[test]
    fn make_move_unchecked_en_passant() {
        let mut board = board_from_diagram(
            "
                ....k...
                ........
                ........
                ...pP...
                ........
                ........
                ........
                ....K...
            ",
        );

        board.make_move_unchecked(
            Move::builder(Square::E5, Square::D6, Piece::WHITE_PAWN)
                .captures(Piece::BLACK_PAWN)
                .is_en_passant()
                .build(),
        );

        assert_eq!(board.piece_at(Square::D6), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_at(Square::D5), None);
        assert_eq!(board.piece_at(Square::E5), None);
    }

    #[test]
    fn make_move_unchecked_castles() {
        let mut board = board_from_diagram(
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
        );

        board.make_move_unchecked(
            Move::builder(Square::E1, Square::G1, Piece::WHITE_KING)
                .is_castle()
                .build(),
        );
        board.make_move_unchecked(
            Move::builder(Square::E8, Square::C8, Piece::BLACK_KING)
                .is_castle()
                .build(),
        );

        assert_eq!(
            board,
            board_from_diagram(
                "
                    ..kr...r
                    ........
                    ........
                    ........
                    ........
                    ........
                    ........
                    R....RK.
                ",
            )
        );
    }

    #[test]
    fn make_move_unchecked_promotion() {
        let mut board = board_from_diagram(
            "
                ...r.k..
                ....P...
                ........
                ........
                ........
                ........
                ........
                ....K...
            ",
        );

        board.make_move_unchecked(
            Move::builder(Square::E7, Square::D8, Piece::WHITE_PAWN)
                .captures(Piece::BLACK_ROOK)
                .promotes_to(PieceType::Knight)
                .build(),
        );

        assert_eq!(board.piece_at(Square::D8), Some(Piece::WHITE_KNIGHT));
        assert_eq!(board.count(Piece::WHITE_PAWN), 0);
        assert_eq!(board.count(Piece::BLACK_ROOK), 0);
    }

    #[test]
    fn display_diagram() {
        assert_eq!(
            starting_board().to_string(),
            "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n"
        );
    }
}
