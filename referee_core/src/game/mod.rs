//! A game: one position driven forward by players, with its history, its
//! repetition count and the externally decided endings (resignation,
//! abandonment, timeout, agreed draw).

mod error;
mod history;

use std::{borrow::Cow, collections::HashMap};

use tracing::{debug, info, warn};

use crate::{
    board::{Color, Move, PieceType, Square, ZobristHash},
    history::{BranchSelection, HistoryError, MoveRecord},
    notation::{NotatedMove, UciMove},
    position::{material, GameResult, MoveError, Position, Reason},
};

pub use error::GameError;
pub use history::{GameHistory, GameMode};

/// What happened after a move request was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Played(NotatedMove),
    /// The pawn now on this square waits for [`Game::promote`].
    AwaitingPromotion(Square),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    start: Position,
    position: Position,
    history: GameHistory,
    repetitions: HashMap<ZobristHash, u32>,
    /// The position a pending promotion's pawn move was played from.
    before_promotion: Option<Position>,
    /// The history index being displayed, or `None` to follow the latest
    /// position.
    display_index: Option<usize>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameMode::Standard)
    }
}

impl Game {
    pub fn new(mode: GameMode) -> Self {
        Self::from_position(Position::new(), mode)
    }

    pub fn from_fen(fen: &str, mode: GameMode) -> Result<Self, GameError> {
        Ok(Self::from_position(Position::from_fen(fen)?, mode))
    }

    pub fn from_position(start: Position, mode: GameMode) -> Self {
        let repetitions = HashMap::from([(start.repetition_key(), 1)]);

        Self {
            position: start.clone(),
            start,
            history: GameHistory::new(mode),
            repetitions,
            before_promotion: None,
            display_index: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.history.mode()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn starting_position(&self) -> &Position {
        &self.start
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    pub fn fen(&self) -> String {
        self.position.fen()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.position.result()
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.position.pending_promotion()
    }

    pub fn to_move(&self) -> Color {
        self.position.to_move()
    }

    /// How many times the current position has occurred on the active line.
    pub fn occurrences(&self) -> u32 {
        self.repetitions
            .get(&self.position.repetition_key())
            .copied()
            .unwrap_or(0)
    }

    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        color: Color,
    ) -> Result<MoveOutcome, GameError> {
        let before = self.position.clone();
        let the_move = self.position.make_move(from, to, color)?;

        if let Some(square) = self.position.pending_promotion() {
            debug!("[GAME] {color} moved {from}{to}, awaiting promotion");
            self.before_promotion = Some(before);
            return Ok(MoveOutcome::AwaitingPromotion(square));
        }

        Ok(MoveOutcome::Played(self.record(&before, the_move)))
    }

    pub fn promote(&mut self, piece_type: PieceType, color: Color) -> Result<NotatedMove, GameError> {
        let the_move = self.position.promote(piece_type, color)?;
        let before = self
            .before_promotion
            .take()
            .expect("a pending promotion keeps the position it was played from");

        Ok(self.record(&before, the_move))
    }

    /// Plays a move given in algebraic notation, promotion included.
    pub fn make_san_move(&mut self, san: &str, color: Color) -> Result<NotatedMove, GameError> {
        let the_move = self.position.parse_san(san)?;
        self.play(
            the_move.from_square(),
            the_move.to_square(),
            the_move.promotion().map(|piece| piece.piece_type()),
            color,
        )
    }

    /// Plays a move given in long coordinate notation for the side to move.
    pub fn make_uci_move(&mut self, uci: UciMove) -> Result<NotatedMove, GameError> {
        self.play(uci.from, uci.to, uci.promotion, self.to_move())
    }

    /// Replays space-separated long coordinate moves, e.g. a persisted move
    /// list. Either every move is played or the game is left unchanged.
    pub fn play_out_from_moves(&mut self, moves: &str) -> Result<(), GameError> {
        let backup = self.clone();

        for (index, token) in moves.split_ascii_whitespace().enumerate() {
            let played = token
                .parse::<UciMove>()
                .map_err(GameError::from)
                .and_then(|uci| self.make_uci_move(uci));

            if let Err(error) = played {
                warn!("[GAME] Rejected replayed move {index} ({token}): {error}");
                *self = backup;
                return Err(GameError::Replay {
                    index,
                    token: token.to_string(),
                    source: Box::new(error),
                });
            }
        }

        Ok(())
    }

    /// Takes back the latest move of the active line, or cancels a pawn move
    /// still waiting for its promotion.
    ///
    /// Finished standard games cannot be taken back. In analysis mode the
    /// position is rebuilt by replay, so a result declared from outside the
    /// board (resignation and the like) is dropped with it.
    pub fn revert_last_move(&mut self) -> Result<(), GameError> {
        if let Some(before) = self.before_promotion.take() {
            debug!("[GAME] Cancelled pending promotion");
            self.position = before;
            return Ok(());
        }

        if let (GameMode::Standard, Some(result)) = (self.mode(), self.result()) {
            return Err(GameError::GameOver(result));
        }

        if self.history.len() <= self.history.floor() {
            return Err(HistoryError::NothingToRevert.into());
        }

        self.history.truncate(self.history.len() - 1);
        self.rebuild();
        debug!("[GAME] Reverted to {} moves", self.history.len());
        Ok(())
    }

    /// Selects the line that moves are played on and rebuilds the game at
    /// its end. Analysis games only.
    pub fn set_branch(&mut self, selection: BranchSelection) -> Result<(), GameError> {
        if let Some(square) = self.pending_promotion() {
            return Err(MoveError::AwaitingPromotion(square).into());
        }

        self.history.set_branch(selection)?;
        self.rebuild();
        Ok(())
    }

    pub fn selection(&self) -> BranchSelection {
        self.history.selection()
    }

    pub fn resign(&mut self, color: Color) -> Result<GameResult, GameError> {
        self.end(GameResult::win(color.flip(), Reason::Resignation))
    }

    pub fn abandon(&mut self, color: Color) -> Result<GameResult, GameError> {
        self.end(GameResult::win(color.flip(), Reason::Abandonment))
    }

    /// `color` ran out of time. The opponent wins unless no sequence of
    /// legal moves lets them mate, counting `color`'s own men as possible
    /// blockers. Then the game is drawn.
    pub fn timeout(&mut self, color: Color) -> Result<GameResult, GameError> {
        let opponent = color.flip();
        let result = if material::has_mating_material(self.position.board(), opponent) {
            GameResult::win(opponent, Reason::Timeout)
        } else {
            GameResult::draw(Reason::Timeout)
        };

        self.end(result)
    }

    pub fn agree_draw(&mut self) -> Result<GameResult, GameError> {
        self.end(GameResult::draw(Reason::Agreement))
    }

    /// Shows the position after move `index` of the active line, `0` being
    /// the starting position. Showing the latest index follows new moves.
    pub fn set_move_index(&mut self, index: usize) -> Result<(), GameError> {
        let len = self.history.len();
        if index > len {
            return Err(HistoryError::IndexOutOfRange { index, len }.into());
        }

        self.display_index = (index < len).then_some(index);
        Ok(())
    }

    pub fn move_index(&self) -> usize {
        self.display_index.unwrap_or(self.history.len())
    }

    /// The position selected with [`Self::set_move_index`].
    pub fn display_position(&self) -> Cow<'_, Position> {
        match self.display_index {
            None => Cow::Borrowed(&self.position),
            Some(0) => Cow::Borrowed(&self.start),
            Some(index) => self
                .history
                .position_after(index - 1)
                .map(Cow::Borrowed)
                .unwrap_or_else(|| Cow::Owned(self.replayed(index))),
        }
    }

    /// The active line as movetext, followed by the result once there is one.
    pub fn history_text(&self) -> String {
        let mut text = self.history.to_string();
        if let Some(result) = self.result() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(result.score());
        }
        text
    }

    pub fn records(&self) -> Vec<MoveRecord> {
        self.history.records()
    }

    /// The active line in long coordinate notation, as accepted by
    /// [`Self::play_out_from_moves`].
    pub fn moves_uci(&self) -> String {
        self.history
            .moves()
            .iter()
            .map(|notated| notated.uci.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
        color: Color,
    ) -> Result<NotatedMove, GameError> {
        let uci = UciMove {
            from,
            to,
            promotion,
        };

        let moves_own_pawn_to_last_rank = self
            .position
            .board()
            .piece_with_color_at(color, from)
            .is_some_and(|piece| piece.is(PieceType::Pawn) && to.rank() == color.promotion_rank());
        if promotion.is_some() && !moves_own_pawn_to_last_rank {
            return Err(GameError::UnexpectedPromotion(uci));
        }

        match self.make_move(from, to, color)? {
            MoveOutcome::Played(notated) => Ok(notated),
            MoveOutcome::AwaitingPromotion(_) => {
                let promoted = promotion
                    .ok_or(GameError::MissingPromotion(uci))
                    .and_then(|piece_type| self.promote(piece_type, color));

                if promoted.is_err() {
                    self.revert_last_move()?;
                }
                promoted
            }
        }
    }

    fn record(&mut self, before: &Position, the_move: Move) -> NotatedMove {
        count_occurrence(&mut self.repetitions, &mut self.position);

        let notated = NotatedMove::new(before, the_move, &self.position);
        self.history.push(notated, &self.position);
        debug!("[GAME] {} played {}", notated.color, notated.san);

        if let Some(result) = self.position.result() {
            info!("[GAME] Game ended: {result}");
        }

        notated
    }

    fn end(&mut self, result: GameResult) -> Result<GameResult, GameError> {
        if let Some(existing) = self.result() {
            return Err(GameError::GameOver(existing));
        }

        self.position.declare_result(result);
        info!("[GAME] Game ended: {result}");
        Ok(result)
    }

    /// Replays the active line from the start, recounting repetitions.
    fn rebuild(&mut self) {
        let mut position = self.start.clone();
        let mut repetitions = HashMap::from([(position.repetition_key(), 1)]);

        for notated in self.history.moves() {
            position.play_unchecked(notated.the_move);
            count_occurrence(&mut repetitions, &mut position);
        }

        self.position = position;
        self.repetitions = repetitions;
        self.display_index = None;
    }

    /// The position after the first `index` moves of the active line.
    fn replayed(&self, index: usize) -> Position {
        let mut position = self.start.clone();
        for notated in self.history.moves().into_iter().take(index) {
            position.play_unchecked(notated.the_move);
        }
        position
    }
}

/// Counts `position` once more and declares the repetition draw on its third
/// occurrence.
fn count_occurrence(repetitions: &mut HashMap<ZobristHash, u32>, position: &mut Position) {
    let count = repetitions.entry(position.repetition_key()).or_default();
    *count += 1;

    if *count >= 3 {
        position.declare_result(GameResult::draw(Reason::Repetition));
    }
}
