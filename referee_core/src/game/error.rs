use thiserror::Error;

use crate::{
    history::HistoryError,
    notation::{ParseUciMoveError, SanError, UciMove},
    position::{FenError, GameResult, MoveError, PromotionError},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Promotion(#[from] PromotionError),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Uci(#[from] ParseUciMoveError),
    #[error(transparent)]
    San(#[from] SanError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("the game is already over: {0}")]
    GameOver(GameResult),
    #[error("{0} reaches the last rank but names no promotion piece")]
    MissingPromotion(UciMove),
    #[error("{0} names a promotion piece but is not a promotion")]
    UnexpectedPromotion(UciMove),
    #[error("move {index} ({token}) could not be replayed")]
    Replay {
        index: usize,
        token: String,
        #[source]
        source: Box<GameError>,
    },
}
