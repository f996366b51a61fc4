use std::{
    fmt::Debug,
    ops::{BitXor, BitXorAssign},
    sync::OnceLock,
};

use rand::{RngCore, SeedableRng};

use super::{BoardRepr, Castling, Color, Piece, Square};

/// A 64-bit Zobrist key over the parts of a position that decide whether two
/// positions are the same for repetition purposes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZobristHash(pub u64);

impl ZobristHash {
    /// Hashes piece placement, side to move, castling rights and, when a
    /// capture is actually available, the en passant file.
    pub fn of(
        board: &BoardRepr,
        to_move: Color,
        castling: Castling,
        capturable_en_passant: Option<Square>,
    ) -> Self {
        let mut hash = board
            .pieces()
            .fold(Self::default(), |hash, (piece, square)| {
                hash ^ Self::piece(piece, square)
            });

        hash ^= Self::color(to_move);
        hash ^= Self::castling(castling);
        hash ^= Self::en_passant(capturable_en_passant);
        hash
    }

    pub fn piece(piece: Piece, square: Square) -> Self {
        let table = ZobristTable::get_instance();
        Self(table.pieces[piece.get() as usize * 64 + square.index()])
    }

    pub fn color(color: Color) -> Self {
        match color {
            Color::White => Self(0),
            Color::Black => Self(ZobristTable::get_instance().black),
        }
    }

    pub fn castling(castling: Castling) -> Self {
        Self(ZobristTable::get_instance().castling[castling.bits() as usize])
    }

    pub fn en_passant(en_passant: Option<Square>) -> Self {
        match en_passant {
            Some(square) => Self(ZobristTable::get_instance().en_passant[square.file() as usize]),
            None => Self(0),
        }
    }
}

impl BitXor for ZobristHash {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for ZobristHash {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Debug for ZobristHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ZobristHash")
            .field(&format_args!("{:#018X}", self.0))
            .finish()
    }
}

struct ZobristTable {
    pieces: [u64; 16 * 64],
    black: u64,
    castling: [u64; 16],
    en_passant: [u64; 8],
}

impl ZobristTable {
    fn new() -> Self {
        // Fixed seed, so keys are stable between runs.
        let mut rng = rand_chacha::ChaCha12Rng::from_seed([
            0x3b, 0x7e, 0x51, 0x0c, 0xa4, 0x19, 0xd2, 0x66, 0x8f, 0x40, 0xe7, 0x2a, 0x95, 0x13,
            0xcb, 0x78, 0x06, 0xbd, 0x5f, 0xe1, 0x32, 0x9a, 0x74, 0xc8, 0x2d, 0x61, 0xf0, 0x17,
            0x8b, 0x44, 0xae, 0x59,
        ]);

        let mut pieces = [0; 16 * 64];
        pieces.fill_with(|| rng.next_u64());

        let black = rng.next_u64();

        let mut castling = [0; 16];
        castling.fill_with(|| rng.next_u64());

        let mut en_passant = [0; 8];
        en_passant.fill_with(|| rng.next_u64());

        Self {
            pieces,
            black,
            castling,
            en_passant,
        }
    }

    fn get_instance() -> &'static Self {
        static INSTANCE: OnceLock<ZobristTable> = OnceLock::new();

        INSTANCE.get_or_init(Self::new)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_feature_changes_the_key() {
        let mut board = BoardRepr::default();
        board.put(Square::E1, Piece::WHITE_KING);
        board.put(Square::E8, Piece::BLACK_KING);

        let base = ZobristHash::of(&board, Color::White, Castling::empty(), None);

        assert_eq!(
            base,
            ZobristHash::of(&board, Color::White, Castling::empty(), None)
        );
        assert_ne!(
            base,
            ZobristHash::of(&board, Color::Black, Castling::empty(), None)
        );
        assert_ne!(
            base,
            ZobristHash::of(&board, Color::White, Castling::WHITE_KINGSIDE, None)
        );
        assert_ne!(
            base,
            ZobristHash::of(&board, Color::White, Castling::empty(), Some(Square::D6))
        );

        let mut moved = board.clone();
        moved.take(Square::E1);
        moved.put(Square::D1, Piece::WHITE_KING);
        assert_ne!(
            base,
            ZobristHash::of(&moved, Color::White, Castling::empty(), None)
        );
    }
}
