use std::fmt::Display;

use crate::{
    board::{Color, Move},
    position::Position,
};

use super::{San, UciMove};

/// A played move together with everything needed to write it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotatedMove {
    /// The full-move number the move was played on.
    pub number: u32,
    pub color: Color,
    pub the_move: Move,
    pub san: San,
    pub uci: UciMove,
}

impl NotatedMove {
    /// `before` is the position the move was chosen in, `after` the position
    /// once it (and any promotion) completed.
    pub fn new(before: &Position, the_move: Move, after: &Position) -> Self {
        Self {
            number: before.fullmoves(),
            color: the_move.piece().color(),
            the_move,
            san: San::new(before, the_move, after),
            uci: the_move.into(),
        }
    }

    /// The move number prefix used when this move starts a line of movetext:
    /// `12.` for White and `12...` for Black.
    pub fn number_prefix(&self) -> String {
        match self.color {
            Color::White => format!("{}.", self.number),
            Color::Black => format!("{}...", self.number),
        }
    }
}

impl Display for NotatedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.san)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::board::Square;

    use super::*;

    #[test]
    fn describes_a_black_move() {
        let mut before = Position::new();
        before.make_move(Square::E2, Square::E4, Color::White).unwrap();

        let mut after = before.clone();
        let the_move = after.make_move(Square::G8, Square::F6, Color::Black).unwrap();
        let notated = NotatedMove::new(&before, the_move, &after);

        assert_eq!(notated.number, 1);
        assert_eq!(notated.color, Color::Black);
        assert_eq!(notated.to_string(), "Nf6");
        assert_eq!(notated.uci.to_string(), "g8f6");
        assert_eq!(notated.number_prefix(), "1...");
    }
}
