use std::fmt::{Display, Write};

use thiserror::Error;

use crate::{
    board::{Move, Piece, PieceType, Square},
    position::{Position, Reason},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disambiguator {
    File(u8),
    Rank(u8),
    Square(Square),
}

impl Display for Disambiguator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disambiguator::File(file) => f.write_char((file + b'a') as char),
            Disambiguator::Rank(rank) => f.write_char((rank + b'1') as char),
            Disambiguator::Square(square) => write!(f, "{square}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegularSanRepr {
    piece_type: PieceType,
    disambiguator: Option<Disambiguator>,
    is_capture: bool,
    to_square: Square,
    promotion: Option<PieceType>,
}

impl Display for RegularSanRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.piece_type != PieceType::Pawn {
            f.write_char(self.piece_type.as_uppercase_char())?;
        }

        if let Some(disambiguator) = self.disambiguator {
            write!(f, "{disambiguator}")?;
        }

        if self.is_capture {
            f.write_char('x')?;
        }

        write!(f, "{}", self.to_square)?;

        if let Some(promotion) = self.promotion {
            f.write_char('=')?;
            f.write_char(promotion.as_uppercase_char())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanRepr {
    Regular(RegularSanRepr),
    Castle { is_long: bool },
}

impl Display for SanRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SanRepr::Regular(r) => write!(f, "{r}"),
            SanRepr::Castle { is_long: false } => f.write_str("O-O"),
            SanRepr::Castle { is_long: true } => f.write_str("O-O-O"),
        }
    }
}

/// A move in standard algebraic notation, e.g. `Nbd2`, `exd5`, `e8=Q+` or
/// `O-O-O#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct San {
    repr: SanRepr,
    is_check: bool,
    is_checkmate: bool,
}

impl San {
    /// Describes `the_move`, played from `before` and resulting in `after`.
    ///
    /// `the_move` must be one of `before`'s legal moves, including its
    /// promotion piece if it has one.
    pub fn new(before: &Position, the_move: Move, after: &Position) -> Self {
        let repr = if the_move.is_castle() {
            SanRepr::Castle {
                is_long: !the_move.is_kingside_castle(),
            }
        } else {
            SanRepr::Regular(RegularSanRepr {
                piece_type: the_move.piece().piece_type(),
                disambiguator: disambiguator(the_move, &before.legal_moves()),
                is_capture: the_move.is_capture(),
                to_square: the_move.to_square(),
                promotion: the_move.promotion().map(Piece::piece_type),
            })
        };

        let is_checkmate = after
            .result()
            .is_some_and(|result| result.reason == Reason::Mate);

        Self {
            repr,
            is_check: !is_checkmate && after.is_in_check(after.to_move()),
            is_checkmate,
        }
    }

    pub fn is_check(&self) -> bool {
        self.is_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }
}

impl Display for San {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repr)?;

        if self.is_checkmate {
            f.write_char('#')
        } else if self.is_check {
            f.write_char('+')
        } else {
            Ok(())
        }
    }
}

fn disambiguator(the_move: Move, legal_moves: &[Move]) -> Option<Disambiguator> {
    let from = the_move.from_square();

    // pawn captures always name the origin file
    if the_move.is_move_of(PieceType::Pawn) {
        return the_move
            .is_capture()
            .then_some(Disambiguator::File(from.file()));
    }

    let mut ambiguous_piece_exists = false;
    let mut same_rank = false;
    let mut same_file = false;

    for m in legal_moves {
        if m.piece() == the_move.piece()
            && m.from_square() != from
            && m.to_square() == the_move.to_square()
        {
            ambiguous_piece_exists = true;

            same_rank |= m.from_square().rank() == from.rank();
            same_file |= m.from_square().file() == from.file();
        }
    }

    if !ambiguous_piece_exists {
        None
    } else if !same_file {
        Some(Disambiguator::File(from.file()))
    } else if !same_rank {
        Some(Disambiguator::Rank(from.rank()))
    } else {
        Some(Disambiguator::Square(from))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("empty move")]
    Empty,
    #[error("malformed algebraic move {0:?}")]
    Malformed(String),
    #[error("{0:?} does not match any legal move")]
    NoMatch(String),
    #[error("{0:?} matches more than one legal move")]
    Ambiguous(String),
}

/// What a SAN string pins down about a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanPattern {
    Castle {
        is_long: bool,
    },
    Regular {
        piece_type: PieceType,
        file: Option<u8>,
        rank: Option<u8>,
        is_capture: bool,
        to: Square,
        promotion: Option<PieceType>,
    },
}

impl SanPattern {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "O-O" | "0-0" => return Some(SanPattern::Castle { is_long: false }),
            "O-O-O" | "0-0-0" => return Some(SanPattern::Castle { is_long: true }),
            _ => {}
        }

        if !text.is_ascii() {
            return None;
        }

        let (piece_type, rest) = match text.as_bytes()[0] {
            c @ (b'K' | b'Q' | b'R' | b'B' | b'N') => {
                (PieceType::try_from_char(c as char)?, &text[1..])
            }
            _ => (PieceType::Pawn, text),
        };

        let (rest, promotion) = match rest.split_once('=') {
            Some((head, promotion)) => (head, Some(parse_promotion(promotion)?)),
            None => match rest.as_bytes().last() {
                Some(b'Q' | b'R' | b'B' | b'N') if piece_type == PieceType::Pawn => (
                    &rest[..rest.len() - 1],
                    Some(parse_promotion(&rest[rest.len() - 1..])?),
                ),
                _ => (rest, None),
            },
        };

        if rest.len() < 2 {
            return None;
        }
        let (head, to) = rest.split_at(rest.len() - 2);
        let to = to.parse().ok()?;

        let (head, is_capture) = match head.strip_suffix('x') {
            Some(head) => (head, true),
            None => (head, false),
        };

        let mut file = None;
        let mut rank = None;
        for c in head.bytes() {
            match c {
                b'a'..=b'h' if file.is_none() && rank.is_none() => file = Some(c - b'a'),
                b'1'..=b'8' if rank.is_none() => rank = Some(c - b'1'),
                _ => return None,
            }
        }

        Some(SanPattern::Regular {
            piece_type,
            file,
            rank,
            is_capture,
            to,
            promotion,
        })
    }

    fn matches(self, the_move: Move) -> bool {
        match self {
            SanPattern::Castle { is_long } => {
                the_move.is_castle() && the_move.is_kingside_castle() != is_long
            }
            SanPattern::Regular {
                piece_type,
                file,
                rank,
                is_capture,
                to,
                promotion,
            } => {
                let from = the_move.from_square();

                // pawns only leave their file when capturing, which names it
                let pawn_file_matches = piece_type != PieceType::Pawn
                    || from.file() == file.unwrap_or(to.file());

                !the_move.is_castle()
                    && the_move.is_move_of(piece_type)
                    && the_move.to_square() == to
                    && file.map_or(true, |file| from.file() == file)
                    && rank.map_or(true, |rank| from.rank() == rank)
                    && (!is_capture || the_move.is_capture())
                    && the_move.promotion().map(Piece::piece_type) == promotion
                    && pawn_file_matches
            }
        }
    }
}

fn parse_promotion(text: &str) -> Option<PieceType> {
    let mut chars = text.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    PieceType::try_from_char(c).filter(|piece_type| piece_type.is_promotion_target())
}

impl Position {
    /// Resolves a move in algebraic notation against this position's legal
    /// moves. Check, mate and annotation marks (`+#!?`) are ignored.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let text = san.trim().trim_end_matches(['+', '#', '!', '?']);
        if text.is_empty() {
            return Err(SanError::Empty);
        }

        let pattern = SanPattern::parse(text).ok_or_else(|| SanError::Malformed(san.to_string()))?;

        let mut candidates = self
            .legal_moves()
            .into_iter()
            .filter(|&the_move| pattern.matches(the_move));

        match (candidates.next(), candidates.next()) {
            (Some(the_move), None) => Ok(the_move),
            (None, _) => Err(SanError::NoMatch(san.to_string())),
            (Some(_), Some(_)) => Err(SanError::Ambiguous(san.to_string())),
        }
    }
}
