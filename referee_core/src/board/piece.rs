use std::{
    fmt::{Debug, Display, Write},
    num::NonZeroU8,
};

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

/// The kind of a piece, without its color.
///
/// Kinds are numbered 1-6 so they fit in 3 bits and 0 stays free for the
/// empty square, which lets `Option<Piece>` stay a single byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceType {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// The pieces a pawn may become on the last rank, most valuable first.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    pub const fn with_color(self, color: Color) -> Piece {
        Piece::new(color, self)
    }

    pub const fn white(self) -> Piece {
        Piece::new(Color::White, self)
    }

    pub const fn black(self) -> Piece {
        Piece::new(Color::Black, self)
    }

    /// The letter used for this piece in FEN and algebraic notation.
    pub const fn as_uppercase_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub const fn as_lowercase_char(self) -> char {
        self.as_uppercase_char().to_ascii_lowercase()
    }

    /// Reads a piece letter in either case.
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Bishops, rooks and queens move along rays until blocked.
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }

    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen
        )
    }
}

/// One of the two players.
///
/// White is 0 and Black is 8 so that a [`Piece`] is the bitwise or of its
/// [`Color`] and [`PieceType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    White = 0,
    Black = 8,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    pub const fn is_black(self) -> bool {
        !self.is_white()
    }

    pub const fn flip(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// 0 for White, 1 for Black.
    pub const fn index(self) -> usize {
        (self as usize) >> 3
    }

    /// Rank delta of a single pawn push.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank the king and rooks start on.
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The rank pawns start on and may double-step from.
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// The rank this side's pawns promote on.
    pub const fn promotion_rank(self) -> u8 {
        self.flip().back_rank()
    }

    /// The rank this side's pawns land on when capturing en passant.
    pub const fn en_passant_rank(self) -> u8 {
        match self {
            Color::White => 5,
            Color::Black => 2,
        }
    }

    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// A colored piece, packed into 4 bits.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece(NonZeroU8);

impl Piece {
    pub const WHITE_PAWN: Piece = Piece::new(Color::White, PieceType::Pawn);
    pub const WHITE_KNIGHT: Piece = Piece::new(Color::White, PieceType::Knight);
    pub const WHITE_BISHOP: Piece = Piece::new(Color::White, PieceType::Bishop);
    pub const WHITE_ROOK: Piece = Piece::new(Color::White, PieceType::Rook);
    pub const WHITE_QUEEN: Piece = Piece::new(Color::White, PieceType::Queen);
    pub const WHITE_KING: Piece = Piece::new(Color::White, PieceType::King);
    pub const BLACK_PAWN: Piece = Piece::new(Color::Black, PieceType::Pawn);
    pub const BLACK_KNIGHT: Piece = Piece::new(Color::Black, PieceType::Knight);
    pub const BLACK_BISHOP: Piece = Piece::new(Color::Black, PieceType::Bishop);
    pub const BLACK_ROOK: Piece = Piece::new(Color::Black, PieceType::Rook);
    pub const BLACK_QUEEN: Piece = Piece::new(Color::Black, PieceType::Queen);
    pub const BLACK_KING: Piece = Piece::new(Color::Black, PieceType::King);

    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        // Safety: piece types start at 1, so the or is never zero
        unsafe { Self(NonZeroU8::new_unchecked(color as u8 | piece_type as u8)) }
    }

    /// Unpacks a piece from its 4-bit form, ignoring any higher bits.
    /// Returns `None` for the encodings that name no piece (including 0).
    pub fn try_from_u8(value: u8) -> Option<Self> {
        let color = if value & 0x08 == 0 {
            Color::White
        } else {
            Color::Black
        };

        PieceType::from_u8(value & 0x07).map(|piece_type| Self::new(color, piece_type))
    }

    pub const fn get(self) -> u8 {
        self.0.get()
    }

    pub const fn color(self) -> Color {
        if self.0.get() & 0x08 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub const fn piece_type(self) -> PieceType {
        match self.0.get() & 0x07 {
            1 => PieceType::Pawn,
            2 => PieceType::Knight,
            3 => PieceType::Bishop,
            4 => PieceType::Rook,
            5 => PieceType::Queen,
            6 => PieceType::King,
            _ => unreachable!(),
        }
    }

    pub const fn is(self, piece_type: PieceType) -> bool {
        self.0.get() & 0x07 == piece_type as u8
    }

    pub const fn is_white(self) -> bool {
        self.color().is_white()
    }

    pub const fn is_black(self) -> bool {
        self.color().is_black()
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub const fn as_fen_char(self) -> char {
        match self.color() {
            Color::White => self.piece_type().as_uppercase_char(),
            Color::Black => self.piece_type().as_lowercase_char(),
        }
    }

    pub const fn try_from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        match PieceType::try_from_char(c) {
            Some(piece_type) => Some(Self::new(color, piece_type)),
            None => None,
        }
    }

    pub const fn as_unicode_char(self) -> char {
        match (self.color(), self.piece_type()) {
            (Color::White, PieceType::Pawn) => '♙',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::King) => '♔',
            (Color::Black, PieceType::Pawn) => '♟',
            (Color::Black, PieceType::Knight) => '♞',
            (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Rook) => '♜',
            (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::King) => '♚',
        }
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Piece")
            .field(&self.color())
            .field(&self.piece_type())
            .finish()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.as_fen_char())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn option_piece_is_one_byte() {
        assert_eq!(std::mem::size_of::<Option<Piece>>(), 1);
    }

    #[test]
    fn packing_round_trips() {
        for color in Color::BOTH {
            for piece_type in PieceType::ALL {
                let piece = piece_type.with_color(color);
                assert_eq!(piece.color(), color);
                assert_eq!(piece.piece_type(), piece_type);
                assert_eq!(Piece::try_from_u8(piece.get()), Some(piece));
            }
        }
    }

    #[test]
    fn invalid_encodings() {
        for value in [0, 7, 8, 15] {
            assert_eq!(Piece::try_from_u8(value), None);
        }
    }

    #[test]
    fn fen_chars() {
        assert_eq!(Piece::WHITE_KNIGHT.as_fen_char(), 'N');
        assert_eq!(Piece::BLACK_QUEEN.as_fen_char(), 'q');
        assert_eq!(Piece::try_from_fen_char('k'), Some(Piece::BLACK_KING));
        assert_eq!(Piece::try_from_fen_char('P'), Some(Piece::WHITE_PAWN));
        assert_eq!(Piece::try_from_fen_char('x'), None);
        assert_eq!(Piece::try_from_fen_char('1'), None);
    }

    #[test]
    fn color_geometry() {
        assert_eq!(Color::White.forward(), 1);
        assert_eq!(Color::Black.forward(), -1);
        assert_eq!(Color::White.promotion_rank(), 7);
        assert_eq!(Color::Black.promotion_rank(), 0);
        assert_eq!(Color::Black.pawn_rank(), 6);
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
        assert_eq!(Color::White.flip(), Color::Black);
    }

    #[test]
    fn promotion_targets() {
        assert!(PieceType::PROMOTIONS
            .iter()
            .all(|piece_type| piece_type.is_promotion_target()));
        assert!(!PieceType::Pawn.is_promotion_target());
        assert!(!PieceType::King.is_promotion_target());
    }
}
