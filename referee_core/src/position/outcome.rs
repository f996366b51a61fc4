use std::fmt::Display;

use crate::board::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    Mate,
    Stalemate,
    Repetition,
    FiftyMove,
    InsufficientMaterial,
    Resignation,
    Abandonment,
    Timeout,
    Agreement,
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Reason::Mate => "checkmate",
            Reason::Stalemate => "stalemate",
            Reason::Repetition => "threefold repetition",
            Reason::FiftyMove => "fifty-move rule",
            Reason::InsufficientMaterial => "insufficient material",
            Reason::Resignation => "resignation",
            Reason::Abandonment => "abandonment",
            Reason::Timeout => "timeout",
            Reason::Agreement => "agreement",
        })
    }
}

/// The terminal result of a game. Once a position or game has one it never
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameResult {
    pub winner: Winner,
    pub reason: Reason,
}

impl GameResult {
    pub fn win(color: Color, reason: Reason) -> Self {
        Self {
            winner: color.into(),
            reason,
        }
    }

    pub const fn draw(reason: Reason) -> Self {
        Self {
            winner: Winner::Draw,
            reason,
        }
    }

    pub const fn is_draw(self) -> bool {
        matches!(self.winner, Winner::Draw)
    }

    /// The PGN result token: `1-0`, `0-1` or `1/2-1/2`.
    pub const fn score(self) -> &'static str {
        match self.winner {
            Winner::White => "1-0",
            Winner::Black => "0-1",
            Winner::Draw => "1/2-1/2",
        }
    }
}

impl Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.score(), self.reason)
    }
}
