//! Value types describing the board: squares, pieces, square sets, piece
//! placement, castling rights, moves and position keys.

mod bitboard;
mod board_repr;
mod castling;
mod move_repr;
mod piece;
mod square;
mod zobrist;

pub use bitboard::{Bitboard, Squares};
pub use board_repr::BoardRepr;
pub use castling::Castling;
pub use move_repr::{Move, MoveBuilder, MoveFlags};
pub use piece::{Color, Piece, PieceType};
pub use square::{ParseSquareError, Square};
pub use zobrist::ZobristHash;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
