//! Text forms of moves: standard algebraic notation in both directions, long
//! coordinate notation, and the combined record kept for each played move.
//! FEN lives with [`Position`](crate::position::Position).

mod notated;
mod san;
mod uci_move;

pub use notated::NotatedMove;
pub use san::{San, SanError};
pub use uci_move::{ParseUciMoveError, UciMove};
