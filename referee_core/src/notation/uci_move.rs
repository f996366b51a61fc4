use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use thiserror::Error;

use crate::board::{Move, PieceType, Square};

/// A move in long coordinate notation: origin and destination squares plus
/// an optional promotion letter, as used by UCI engines and in persisted move
/// lists.
///
/// * `e2e4`
/// * `e1g1` (white short castling)
/// * `e7e8q` (promotion)
///
/// ```
/// # use referee_core::{board::{PieceType, Square}, notation::UciMove};
/// assert_eq!(
///     "e7e8q".parse(),
///     Ok(UciMove {
///         from: Square::E7,
///         to: Square::E8,
///         promotion: Some(PieceType::Queen),
///     })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Display for UciMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.from.fmt(f)?;
        self.to.fmt(f)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseUciMoveError {
    #[error("expected 4 or 5 characters")]
    IncorrectLength,
    #[error("invalid square {0:?}")]
    InvalidSquare(String),
    #[error("invalid promotion target {0:?}")]
    InvalidPromoTarget(char),
}

impl FromStr for UciMove {
    type Err = ParseUciMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.chars().collect::<Vec<_>>();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(ParseUciMoveError::IncorrectLength);
        }

        let from_str = String::from_iter(&chars[0..2]);
        let from = from_str
            .parse()
            .map_err(|_| ParseUciMoveError::InvalidSquare(from_str))?;

        let to_str = String::from_iter(&chars[2..4]);
        let to = to_str
            .parse()
            .map_err(|_| ParseUciMoveError::InvalidSquare(to_str))?;

        let promotion = match chars.get(4) {
            Some(&c) => Some(
                Some(c)
                    .filter(char::is_ascii_lowercase)
                    .and_then(PieceType::try_from_char)
                    .filter(|piece_type| piece_type.is_promotion_target())
                    .ok_or(ParseUciMoveError::InvalidPromoTarget(c))?,
            ),
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl From<Move> for UciMove {
    fn from(value: Move) -> Self {
        Self {
            from: value.from_square(),
            to: value.to_square(),
            promotion: value.promotion().map(|p| p.piece_type()),
        }
    }
}
