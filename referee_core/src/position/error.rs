use thiserror::Error;

use crate::board::{Color, PieceType, Square};

use super::GameResult;

/// Why a move was refused. The position is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over: {0}")]
    GameOver(GameResult),
    #[error("the pawn on {0} must be promoted first")]
    AwaitingPromotion(Square),
    #[error("it is not {0}'s turn to move")]
    NotYourTurn(Color),
    #[error("there is no piece on {0}")]
    NoPiece(Square),
    #[error("the piece on {square} does not belong to {mover}")]
    NotOwnPiece { square: Square, mover: Color },
    #[error("the piece on {from} cannot move to {to}")]
    Unreachable { from: Square, to: Square },
    #[error("{from}{to} would leave the king in check")]
    LeavesKingInCheck { from: Square, to: Square },
}

/// Why a promotion choice was refused. The position is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromotionError {
    #[error("no pawn is waiting to be promoted")]
    NothingPending,
    #[error("the pawn on {square} does not belong to {mover}")]
    NotOwnPawn { square: Square, mover: Color },
    #[error("a pawn cannot become a {0:?}")]
    InvalidPiece(PieceType),
}
