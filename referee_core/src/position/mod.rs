//! A chess position: piece placement plus every piece of rule state, and the
//! state machine driven by [`Position::make_move`] and
//! [`Position::promote`].
//!
//! A position is always in one of three states. In the normal state the side
//! to move may move. After a pawn reaches the last rank the position awaits a
//! promotion choice from the same side, and nothing else is accepted. Once a
//! [`GameResult`] is set the position is terminal and refuses all moves.

mod error;
mod fen;
pub mod material;
mod outcome;

use crate::{
    board::{
        Bitboard, BoardRepr, Castling, Color, Move, Piece, PieceType, Square, ZobristHash,
        STARTING_POSITION_FEN,
    },
    move_gen::{
        interactions_for, is_square_attacked, piece_interactions, BoardSnapshot, InteractionSet,
        Interactions, MoveVec,
    },
};

pub use error::{MoveError, PromotionError};
pub use fen::FenError;
pub use outcome::{GameResult, Reason, Winner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: BoardRepr,
    to_move: Color,
    castling: Castling,
    en_passant: Option<Square>,
    /// The pawn move that reached the last rank, while its promotion piece
    /// has not been chosen yet.
    pending_promotion: Option<Move>,
    halfmove_clock: u32,
    fullmoves: u32,
    interactions: Interactions,
    result: Option<GameResult>,
}

impl Default for Position {
    fn default() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("the starting position is valid FEN")
    }
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a position from already validated parts, computing the
    /// interaction sets and any result the position is already in.
    fn from_parts(
        board: BoardRepr,
        to_move: Color,
        castling: Castling,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmoves: u32,
    ) -> Self {
        let mut position = Self {
            board,
            to_move,
            castling,
            en_passant,
            pending_promotion: None,
            halfmove_clock,
            fullmoves,
            interactions: Interactions::default(),
            result: None,
        };

        position.interactions = interactions_for(&position.snapshot());
        position.result = position.adjudicate_loaded();
        position
    }

    pub fn board(&self) -> &BoardRepr {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// The square of the pawn waiting to be promoted, if any.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion.map(Move::to_square)
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.board
            .king_square(color)
            .expect("positions always have one king per side")
    }

    pub fn interactions(&self) -> &Interactions {
        &self.interactions
    }

    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        BoardSnapshot {
            board: &self.board,
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }

    /// The candidate moves of the piece on `square`, pins applied.
    pub fn moves_of(&self, square: Square) -> Option<InteractionSet> {
        piece_interactions(&self.snapshot(), &self.interactions, square)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.interactions.is_in_check(color)
    }

    /// Every legal move for the side to move, with each promotion listed once
    /// per promotion piece. Empty while a promotion is pending.
    pub fn legal_moves(&self) -> MoveVec {
        let mut moves = MoveVec::new();
        if self.pending_promotion.is_some() {
            return moves;
        }

        for (piece, from) in self.board.pieces_of(self.to_move) {
            for the_move in self.legal_moves_from(from, piece) {
                if reaches_last_rank(the_move) {
                    moves.extend(
                        PieceType::PROMOTIONS
                            .map(|piece_type| the_move.into_builder().promotes_to(piece_type).build()),
                    );
                } else {
                    moves.push(the_move);
                }
            }
        }

        moves
    }

    /// Moves `mover`'s piece from `from` to `to`.
    ///
    /// On success returns the move played. A pawn reaching the last rank is
    /// returned without a promotion piece and the position waits for
    /// [`Self::promote`]; otherwise the turn passes and the result is
    /// re-evaluated. On error nothing changes.
    pub fn make_move(&mut self, from: Square, to: Square, mover: Color) -> Result<Move, MoveError> {
        if let Some(result) = self.result {
            return Err(MoveError::GameOver(result));
        }
        if let Some(square) = self.pending_promotion() {
            return Err(MoveError::AwaitingPromotion(square));
        }
        if mover != self.to_move {
            return Err(MoveError::NotYourTurn(mover));
        }

        let piece = self.board.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color() != mover {
            return Err(MoveError::NotOwnPiece {
                square: from,
                mover,
            });
        }

        if !self.reachable_from(from).contains(to) {
            return Err(MoveError::Unreachable { from, to });
        }

        let the_move = self.build_move(from, to, piece);
        let board = self.board_after(the_move);
        if king_attacked(&board, mover) {
            return Err(MoveError::LeavesKingInCheck { from, to });
        }

        self.commit(the_move, board);
        Ok(the_move)
    }

    /// Completes a pending promotion and passes the turn. Returns the full
    /// move including its promotion piece.
    pub fn promote(&mut self, piece_type: PieceType, mover: Color) -> Result<Move, PromotionError> {
        let pending = self.pending_promotion.ok_or(PromotionError::NothingPending)?;
        let square = pending.to_square();

        if pending.piece().color() != mover {
            return Err(PromotionError::NotOwnPawn { square, mover });
        }
        if !piece_type.is_promotion_target() {
            return Err(PromotionError::InvalidPiece(piece_type));
        }

        self.board.take(square);
        self.board.put(square, piece_type.with_color(mover));
        self.pending_promotion = None;
        self.pass_turn();

        Ok(pending.into_builder().promotes_to(piece_type).build())
    }

    /// The key under which this position counts towards threefold
    /// repetition. The en passant file only counts when the side to move
    /// has a legal en passant capture.
    pub fn repetition_key(&self) -> ZobristHash {
        let capturable = self
            .en_passant
            .filter(|&target| self.has_legal_en_passant(target));

        ZobristHash::of(&self.board, self.to_move, self.castling, capturable)
    }

    /// Sets the result unless one is already set. Returns whether it was set.
    pub(crate) fn declare_result(&mut self, result: GameResult) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.result = Some(result);
        true
    }

    /// Plays a move known to be legal here, e.g. one taken from
    /// [`Self::legal_moves`] or from an already validated game record. A
    /// promotion piece on the move completes the promotion immediately.
    pub(crate) fn play_unchecked(&mut self, the_move: Move) {
        let board = self.board_after(the_move);
        self.commit(the_move, board);
    }

    fn reachable_from(&self, from: Square) -> Bitboard {
        self.moves_of(from)
            .map_or(Bitboard::EMPTY, |set| set.reachable())
    }

    fn legal_moves_from(&self, from: Square, piece: Piece) -> impl Iterator<Item = Move> + '_ {
        self.reachable_from(from)
            .squares()
            .map(move |to| self.build_move(from, to, piece))
            .filter(move |&the_move| !king_attacked(&self.board_after(the_move), piece.color()))
    }

    fn has_legal_en_passant(&self, target: Square) -> bool {
        self.board
            .pieces_of(self.to_move)
            .filter(|(piece, _)| piece.is(PieceType::Pawn))
            .any(|(pawn, from)| {
                self.legal_moves_from(from, pawn)
                    .any(|the_move| the_move.is_en_passant() && the_move.to_square() == target)
            })
    }

    fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .any(|(piece, from)| self.legal_moves_from(from, piece).next().is_some())
    }

    fn build_move(&self, from: Square, to: Square, piece: Piece) -> Move {
        let builder = Move::builder(from, to, piece);
        let captured = self.board.piece_at(to);

        let builder = match (piece.piece_type(), captured) {
            (_, Some(captured)) => builder.captures(captured),
            (PieceType::Pawn, None) if from.file() != to.file() => builder
                .captures(PieceType::Pawn.with_color(piece.color().flip()))
                .is_en_passant(),
            (PieceType::Pawn, None) if from.rank().abs_diff(to.rank()) == 2 => {
                builder.is_double_pawn_push()
            }
            (PieceType::King, None) if from.file().abs_diff(to.file()) == 2 => builder.is_castle(),
            _ => builder,
        };

        builder.build()
    }

    fn board_after(&self, the_move: Move) -> BoardRepr {
        let mut board = self.board.clone();
        board.make_move_unchecked(the_move);
        board
    }

    fn commit(&mut self, the_move: Move, board: BoardRepr) {
        let mover = the_move.piece().color();

        self.board = board;
        self.castling.remove(
            Castling::lost_by_touching(the_move.from_square())
                | Castling::lost_by_touching(the_move.to_square()),
        );
        if the_move.is_move_of(PieceType::King) {
            self.castling.remove(Castling::for_color(mover));
        }

        self.halfmove_clock = if the_move.resets_halfmove_clock() {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.en_passant = the_move
            .is_double_pawn_push()
            .then(|| the_move.skipped_square());

        if the_move.promotion().is_none() && reaches_last_rank(the_move) {
            self.pending_promotion = Some(the_move);
            self.interactions = interactions_for(&self.snapshot());
            return;
        }

        self.pass_turn();
    }

    fn pass_turn(&mut self) {
        if self.to_move.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.to_move = self.to_move.flip();
        self.interactions = interactions_for(&self.snapshot());

        if self.result.is_none() {
            self.result = self.adjudicate();
        }
    }

    /// Mate and stalemate of the side to move take precedence over the
    /// fifty-move rule, which takes precedence over insufficient material.
    fn adjudicate(&self) -> Option<GameResult> {
        let side = self.to_move;

        if !self.has_legal_move(side) {
            return Some(if self.is_in_check(side) {
                GameResult::win(side.flip(), Reason::Mate)
            } else {
                GameResult::draw(Reason::Stalemate)
            });
        }

        if self.halfmove_clock >= 100 {
            return Some(GameResult::draw(Reason::FiftyMove));
        }

        if material::is_insufficient(&self.board) {
            return Some(GameResult::draw(Reason::InsufficientMaterial));
        }

        None
    }

    /// A loaded position may show the side that just moved as mated, which
    /// cannot arise from play.
    fn adjudicate_loaded(&self) -> Option<GameResult> {
        let waiting = self.to_move.flip();
        if self.is_in_check(waiting) && !self.has_legal_move(waiting) {
            return Some(GameResult::win(self.to_move, Reason::Mate));
        }

        self.adjudicate()
    }
}

fn reaches_last_rank(the_move: Move) -> bool {
    the_move.is_move_of(PieceType::Pawn)
        && the_move.to_square().rank() == the_move.piece().color().promotion_rank()
}

fn king_attacked(board: &BoardRepr, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.flip()))
}
