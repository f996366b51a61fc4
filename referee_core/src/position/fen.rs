use std::str::FromStr;

use thiserror::Error;

use crate::board::{BoardRepr, Castling, Color, Piece, PieceType, Square};

use super::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 space-separated fields, got {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in the piece placement, got {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: u8 },
    #[error("unknown piece symbol {0:?}")]
    UnknownPiece(char),
    #[error("pawn on a back rank at {0}")]
    PawnOnBackRank(Square),
    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: u32 },
    #[error("invalid side to move {0:?}")]
    Turn(String),
    #[error("invalid castling rights {0:?}")]
    Castling(String),
    #[error("invalid en passant square {0:?}")]
    EnPassant(String),
    #[error("invalid halfmove clock {0:?}")]
    HalfmoveClock(String),
    #[error("invalid fullmove number {0:?}")]
    Fullmoves(String),
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<_> = fen.split_ascii_whitespace().collect();
        let &[placement, to_move, castling, en_passant, halfmove_clock, fullmoves] =
            fields.as_slice()
        else {
            return Err(FenError::FieldCount(fields.len()));
        };

        let board = parse_placement(placement)?;

        let to_move = match to_move {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::Turn(to_move.to_string())),
        };

        let castling = Castling::from_fen_str(castling)
            .ok_or_else(|| FenError::Castling(castling.to_string()))?;

        let en_passant = match en_passant {
            "-" => None,
            _ => Some(
                en_passant
                    .parse::<Square>()
                    .ok()
                    .filter(|square| square.rank() == to_move.en_passant_rank())
                    .ok_or_else(|| FenError::EnPassant(en_passant.to_string()))?,
            ),
        };

        let halfmove_clock = halfmove_clock
            .parse()
            .map_err(|_| FenError::HalfmoveClock(halfmove_clock.to_string()))?;
        let fullmoves = fullmoves
            .parse()
            .ok()
            .filter(|&n: &u32| n >= 1)
            .ok_or_else(|| FenError::Fullmoves(fullmoves.to_string()))?;

        Ok(Self::from_parts(
            board,
            to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmoves,
        ))
    }

    pub fn fen(&self) -> String {
        let mut result = String::new();

        for rank in (0..8).rev() {
            let mut empty_squares = 0u8;
            for file in 0..8 {
                match self.board.piece_at(Square::new_unchecked(rank, file)) {
                    None => empty_squares += 1,
                    Some(piece) => {
                        if empty_squares > 0 {
                            result.push((empty_squares + b'0') as char);
                        }
                        result.push(piece.as_fen_char());
                        empty_squares = 0;
                    }
                }
            }
            if empty_squares > 0 {
                result.push((empty_squares + b'0') as char);
            }
            if rank > 0 {
                result.push('/');
            }
        }

        result.push(' ');
        result.push(self.to_move.fen_char());
        result.push(' ');
        result.push_str(&self.castling.as_fen_str());
        result.push(' ');
        match self.en_passant {
            Some(square) => result.push_str(&square.to_string()),
            None => result.push('-'),
        }
        result.push(' ');
        result.push_str(&self.halfmove_clock.to_string());
        result.push(' ');
        result.push_str(&self.fullmoves.to_string());

        result
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

fn parse_placement(placement: &str) -> Result<BoardRepr, FenError> {
    let ranks: Vec<_> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = BoardRepr::default();
    for (rank_index, rank_pieces) in ranks.into_iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let width_error = FenError::RankWidth { rank: rank + 1 };

        let mut file = 0u8;
        for c in rank_pieces.chars() {
            if let Some(digit) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += digit as u8;
                if file > 8 {
                    return Err(width_error);
                }
                continue;
            }

            let piece = Piece::try_from_fen_char(c).ok_or(FenError::UnknownPiece(c))?;
            let square = Square::new(rank, file).ok_or(width_error.clone())?;
            if piece.is(PieceType::Pawn) && (rank == 0 || rank == 7) {
                return Err(FenError::PawnOnBackRank(square));
            }

            board.put(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(width_error);
        }
    }

    for color in Color::BOTH {
        let count = board.count(PieceType::King.with_color(color));
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    Ok(board)
}
