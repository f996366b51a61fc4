use bitflags::bitflags;

use super::{Color, Square};

bitflags! {
    /// Which castling moves each side still has the right to make.
    ///
    /// A right is held while the king and the rook on that side have never
    /// moved and the rook has not been captured on its corner. The flags say
    /// nothing about the temporary conditions (pieces in between, the king in
    /// check or passing through an attacked square); the move generator
    /// checks those.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Castling: u8 {
        const WHITE_KINGSIDE  = 0b0001;
        const WHITE_QUEENSIDE = 0b0010;
        const BLACK_KINGSIDE  = 0b0100;
        const BLACK_QUEENSIDE = 0b1000;

        const WHITE = Self::WHITE_KINGSIDE.bits() | Self::WHITE_QUEENSIDE.bits();
        const BLACK = Self::BLACK_KINGSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
    }
}

impl Default for Castling {
    fn default() -> Self {
        Self::all()
    }
}

impl Castling {
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE,
            Color::Black => Self::BLACK,
        }
    }

    pub const fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub const fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// The rights lost when a piece leaves or arrives on the square: a king
    /// leaving home loses both of its side's rights, a rook leaving or being
    /// captured on its corner loses that one.
    pub fn lost_by_touching(square: Square) -> Self {
        match square {
            Square::E1 => Self::WHITE,
            Square::A1 => Self::WHITE_QUEENSIDE,
            Square::H1 => Self::WHITE_KINGSIDE,
            Square::E8 => Self::BLACK,
            Square::A8 => Self::BLACK_QUEENSIDE,
            Square::H8 => Self::BLACK_KINGSIDE,
            _ => Self::empty(),
        }
    }

    /// The third field of a FEN record: some of `KQkq` in that order, or `-`.
    pub fn as_fen_str(self) -> String {
        if self.is_empty() {
            return "-".to_owned();
        }

        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .into_iter()
        .filter(|&(flag, _)| self.contains(flag))
        .map(|(_, c)| c)
        .collect()
    }

    /// Parses the third field of a FEN record. Each letter may appear at most
    /// once; `-` alone means no rights.
    pub fn from_fen_str(s: &str) -> Option<Self> {
        if s == "-" {
            return Some(Self::empty());
        }
        if s.is_empty() {
            return None;
        }

        let mut castling = Self::empty();
        for c in s.chars() {
            let flag = match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => return None,
            };
            if castling.contains(flag) {
                return None;
            }
            castling |= flag;
        }

        Some(castling)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fen_str() {
        assert_eq!(Castling::all().as_fen_str(), "KQkq");
        assert_eq!(Castling::empty().as_fen_str(), "-");
        assert_eq!(
            (Castling::WHITE_QUEENSIDE | Castling::BLACK_KINGSIDE).as_fen_str(),
            "Qk"
        );
    }

    #[test]
    fn parse_fen_str() {
        assert_eq!(Castling::from_fen_str("KQkq"), Some(Castling::all()));
        assert_eq!(Castling::from_fen_str("-"), Some(Castling::empty()));
        assert_eq!(
            Castling::from_fen_str("kQ"),
            Some(Castling::WHITE_QUEENSIDE | Castling::BLACK_KINGSIDE)
        );
        assert_eq!(Castling::from_fen_str(""), None);
        assert_eq!(Castling::from_fen_str("KK"), None);
        assert_eq!(Castling::from_fen_str("KQx"), None);
    }

    #[test]
    fn rights_lost_by_touching_squares() {
        assert_eq!(Castling::lost_by_touching(Square::E1), Castling::WHITE);
        assert_eq!(
            Castling::lost_by_touching(Square::H8),
            Castling::BLACK_KINGSIDE
        );
        assert_eq!(Castling::lost_by_touching(Square::D4), Castling::empty());
    }
}
