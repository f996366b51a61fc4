use std::{
    fmt::{Debug, Display, Write},
    num::NonZeroU32,
};

use bitflags::bitflags;

use super::{Piece, PieceType, Square};

bitflags! {
    /// Marks the moves whose side effects go beyond relocating one piece.
    /// At most one flag is set on any move.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u32 {
        /// A pawn's initial two-square advance, which opens en passant for
        /// the reply.
        const DOUBLE_PAWN_PUSH = 0b0001 << 24;
        /// A castle, written as the two-square king move; the rook follows.
        const CASTLE           = 0b0010 << 24;
        /// An en passant capture; the captured pawn is not on the destination.
        const EN_PASSANT       = 0b0100 << 24;
    }
}

/// A fully described chess move packed into 32 bits.
///
/// Besides the squares, a move remembers the moving piece, the captured piece
/// and the promotion piece, so it can be replayed, notated and undone without
/// consulting the board it was made on.
///
/// ```txt
/// bits  0-5   from square
/// bits  6-11  to square
/// bits 12-15  promotion piece (0 if none)
/// bits 16-19  moving piece
/// bits 20-23  captured piece (0 if none)
/// bits 24-27  move flags
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Move(NonZeroU32);

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PROMOTION_SHIFT: u32 = 12;
const PIECE_SHIFT: u32 = 16;
const CAPTURE_SHIFT: u32 = 20;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x0F;
const PIECE_TYPE_MASK: u32 = 0x07;

const fn pack_piece(piece: Option<Piece>) -> u32 {
    match piece {
        Some(piece) => piece.get() as u32,
        None => 0,
    }
}

impl Move {
    /// Packs a move. No legality checking is done here.
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured_piece: Option<Piece>,
        promotion: Option<Piece>,
        flags: MoveFlags,
    ) -> Self {
        let packed = (from.get() as u32) << FROM_SHIFT
            | (to.get() as u32) << TO_SHIFT
            | pack_piece(promotion) << PROMOTION_SHIFT
            | (piece.get() as u32) << PIECE_SHIFT
            | pack_piece(captured_piece) << CAPTURE_SHIFT
            | flags.bits();

        match NonZeroU32::new(packed) {
            Some(packed) => Self(packed),
            None => unreachable!(),
        }
    }

    pub const fn builder(from: Square, to: Square, piece: Piece) -> MoveBuilder {
        MoveBuilder::new(from, to, piece)
    }

    const fn field(self, shift: u32, mask: u32) -> u32 {
        (self.0.get() >> shift) & mask
    }

    fn piece_field(self, shift: u32) -> Option<Piece> {
        Piece::try_from_u8(self.field(shift, PIECE_MASK) as u8)
    }

    pub const fn from_square(self) -> Square {
        Square::from_index_unchecked(self.field(FROM_SHIFT, SQUARE_MASK) as usize)
    }

    pub const fn to_square(self) -> Square {
        Square::from_index_unchecked(self.field(TO_SHIFT, SQUARE_MASK) as usize)
    }

    pub fn piece(self) -> Piece {
        self.piece_field(PIECE_SHIFT)
            .expect("moves always record the moving piece")
    }

    pub const fn is_move_of(self, piece_type: PieceType) -> bool {
        self.field(PIECE_SHIFT, PIECE_TYPE_MASK) == piece_type as u32
    }

    /// The captured piece. It stands on the destination square, except for en
    /// passant where it stands on [`Self::en_passant_square`].
    pub fn captured_piece(self) -> Option<Piece> {
        self.piece_field(CAPTURE_SHIFT)
    }

    pub fn promotion(self) -> Option<Piece> {
        self.piece_field(PROMOTION_SHIFT)
    }

    pub const fn flags(self) -> MoveFlags {
        MoveFlags::from_bits_truncate(self.0.get())
    }

    pub const fn is_capture(self) -> bool {
        self.field(CAPTURE_SHIFT, PIECE_MASK) != 0
    }

    pub const fn is_double_pawn_push(self) -> bool {
        self.flags().contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    pub const fn is_castle(self) -> bool {
        self.flags().contains(MoveFlags::CASTLE)
    }

    pub const fn is_en_passant(self) -> bool {
        self.flags().contains(MoveFlags::EN_PASSANT)
    }

    /// True for a castle towards the h-file.
    pub const fn is_kingside_castle(self) -> bool {
        self.is_castle() && self.to_square().file() > self.from_square().file()
    }

    /// The square of the pawn removed by an en passant capture: the start
    /// rank of the capturing pawn on the destination file. Only meaningful
    /// for en passant moves.
    pub const fn en_passant_square(self) -> Square {
        Square::new_unchecked(self.from_square().rank(), self.to_square().file())
    }

    /// Source and destination of the rook taking part in a castle. Only
    /// meaningful for castling moves.
    pub const fn castling_rook_squares(self) -> (Square, Square) {
        let rank = self.from_square().rank();
        let (king_from, king_to) = (self.from_square().file(), self.to_square().file());
        let corner = if king_to > king_from { 7 } else { 0 };

        (
            Square::new_unchecked(rank, corner),
            Square::new_unchecked(rank, (king_from + king_to) / 2),
        )
    }

    /// The square skipped by a double pawn push, which becomes the en passant
    /// target.
    pub const fn skipped_square(self) -> Square {
        let from = self.from_square();
        Square::new_unchecked((from.rank() + self.to_square().rank()) / 2, from.file())
    }

    /// Captures and pawn moves reset the fifty-move count.
    pub const fn resets_halfmove_clock(self) -> bool {
        self.is_capture() || self.is_move_of(PieceType::Pawn)
    }

    pub fn into_builder(self) -> MoveBuilder {
        MoveBuilder {
            captured_piece: self.captured_piece(),
            promotion: self.promotion(),
            flags: self.flags(),
            ..MoveBuilder::new(self.from_square(), self.to_square(), self.piece())
        }
    }
}

/// Compact form naming the pieces by FEN letter, e.g. `Pe7xrd8=Q` or
/// `ke8c8 MoveFlags(CASTLE)`.
impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.piece(), self.from_square())?;
        if let Some(captured) = self.captured_piece() {
            write!(f, "x{captured}")?;
        }
        write!(f, "{}", self.to_square())?;
        if let Some(promotion) = self.promotion() {
            write!(f, "={promotion}")?;
        }
        if !self.flags().is_empty() {
            write!(f, " {:?}", self.flags())?;
        }
        Ok(())
    }
}

/// Long coordinate form, e.g. `e2e4` or `e7e8q`.
impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from_square(), self.to_square())?;
        if let Some(promotion) = self.promotion() {
            f.write_char(promotion.piece_type().as_lowercase_char())?;
        }
        Ok(())
    }
}

/// Incremental construction of a [`Move`], for when most of the optional
/// parts are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveBuilder {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured_piece: Option<Piece>,
    pub promotion: Option<Piece>,
    pub flags: MoveFlags,
}

impl MoveBuilder {
    pub const fn new(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured_piece: None,
            promotion: None,
            flags: MoveFlags::empty(),
        }
    }

    pub const fn captures(self, captured_piece: Piece) -> Self {
        Self {
            captured_piece: Some(captured_piece),
            ..self
        }
    }

    /// The promotion piece takes the color of the moving pawn.
    pub const fn promotes_to(self, promotion: PieceType) -> Self {
        Self {
            promotion: Some(promotion.with_color(self.piece.color())),
            ..self
        }
    }

    pub const fn is_double_pawn_push(self) -> Self {
        Self {
            flags: MoveFlags::DOUBLE_PAWN_PUSH,
            ..self
        }
    }

    pub const fn is_castle(self) -> Self {
        Self {
            flags: MoveFlags::CASTLE,
            ..self
        }
    }

    pub const fn is_en_passant(self) -> Self {
        Self {
            flags: MoveFlags::EN_PASSANT,
            ..self
        }
    }

    pub const fn build(self) -> Move {
        Move::new(
            self.from,
            self.to,
            self.piece,
            self.captured_piece,
            self.promotion,
            self.flags,
        )
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    const CASES: &[MoveBuilder] = &[
        MoveBuilder::new(Square::B5, Square::A6, Piece::WHITE_PAWN)
            .captures(Piece::BLACK_PAWN)
            .is_en_passant(),
        MoveBuilder::new(Square::H2, Square::G1, Piece::BLACK_PAWN)
            .captures(Piece::WHITE_BISHOP)
            .promotes_to(PieceType::Rook),
        MoveBuilder::new(Square::D2, Square::D4, Piece::WHITE_PAWN).is_double_pawn_push(),
        MoveBuilder::new(Square::E8, Square::C8, Piece::BLACK_KING).is_castle(),
        MoveBuilder::new(Square::E4, Square::C5, Piece::WHITE_KNIGHT).captures(Piece::BLACK_ROOK),
        MoveBuilder::new(Square::B2, Square::B5, Piece::BLACK_QUEEN),
    ];

    #[test]
    fn builder_survives_packing() {
        for case in CASES {
            let the_move = case.build();
            assert_eq!(the_move.into_builder(), *case);
            assert_eq!(the_move.is_capture(), case.captured_piece.is_some());
            assert!(the_move.is_move_of(case.piece.piece_type()));
        }
    }

    #[test]
    fn special_move_squares() {
        let en_passant = CASES[0].build();
        assert!(en_passant.is_en_passant());
        assert_eq!(en_passant.en_passant_square(), Square::A5);

        let double_push = CASES[2].build();
        assert!(double_push.is_double_pawn_push());
        assert_eq!(double_push.skipped_square(), Square::D3);

        let castle = CASES[3].build();
        assert!(castle.is_castle());
        assert!(!castle.is_kingside_castle());
        assert_eq!(castle.castling_rook_squares(), (Square::A8, Square::D8));

        let kingside = Move::builder(Square::E1, Square::G1, Piece::WHITE_KING)
            .is_castle()
            .build();
        assert!(kingside.is_kingside_castle());
        assert_eq!(kingside.castling_rook_squares(), (Square::H1, Square::F1));
    }

    #[test]
    fn halfmove_clock_resets() {
        assert!(CASES[2].build().resets_halfmove_clock());
        assert!(CASES[4].build().resets_halfmove_clock());
        assert!(!CASES[5].build().resets_halfmove_clock());
        assert!(!CASES[3].build().resets_halfmove_clock());
    }

    #[test]
    fn debug_names_the_pieces() {
        let capture = Move::builder(Square::E7, Square::D8, Piece::WHITE_PAWN)
            .captures(Piece::BLACK_ROOK)
            .promotes_to(PieceType::Queen)
            .build();
        assert_eq!(format!("{capture:?}"), "Pe7xrd8=Q");
        assert_eq!(format!("{:?}", CASES[5].build()), "qb2b5");
    }

    #[test]
    fn display_coordinates() {
        assert_eq!(CASES[2].build().to_string(), "d2d4");
        assert_eq!(CASES[1].build().to_string(), "h2g1r");
    }
}
