//! Attack and move generation.
//!
//! Generation is a pure function of a [`BoardSnapshot`]: for each side it
//! produces an [`InteractionSet`] describing where that side's pieces can go,
//! what they attack, capture and defend, which checks they give and which
//! enemy pieces they pin. Kings get interaction sets of their own, computed
//! from the opponent's attacks and defences.
//!
//! The sets are candidate moves. Pins are already honoured, but moves that
//! leave the king in check (for example a non-king move that ignores a check,
//! or an en passant capture that opens a rank) are only rejected when the
//! position tries the move; see [`is_square_attacked`].

mod attacks;
mod king;
mod lookups;
mod pawns;
mod sliders;

use arrayvec::ArrayVec;

use crate::board::{Bitboard, BoardRepr, Castling, Color, Move, Piece, PieceType, Square};

pub use attacks::is_square_attacked;
pub use lookups::{Direction, Lookups};

/// Upper bound on legal moves in any position (218 is the known maximum).
pub const MAX_MOVES: usize = 256;

pub type MoveVec = ArrayVec<Move, MAX_MOVES>;

/// Read-only view of everything move generation depends on.
#[derive(Debug, Clone, Copy)]
pub struct BoardSnapshot<'a> {
    pub board: &'a BoardRepr,
    pub castling: Castling,
    pub en_passant: Option<Square>,
}

/// A check given to the enemy king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KingCheck {
    /// Square of the checking piece.
    pub attacker: Square,
    /// Empty squares strictly between attacker and king; interposing on any
    /// of them blocks the check. Empty for knight and pawn checks.
    pub possible_blocks: Bitboard,
    /// Squares behind the king along the checking ray, up to and including the
    /// first occupied one. The king stays in check if it retreats there.
    pub cannot_escape_to: Bitboard,
}

impl KingCheck {
    fn contact(attacker: Square) -> Self {
        Self {
            attacker,
            possible_blocks: Bitboard::EMPTY,
            cannot_escape_to: Bitboard::EMPTY,
        }
    }
}

/// An enemy piece that may not leave the line between its king and the
/// slider attacking through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub pinned: Square,
    pub pinner: Square,
    /// The squares between pinner and king plus the pinner itself.
    pub line: Bitboard,
    /// The pinned piece's own moves and captures restricted to `line`.
    pub possible_moves: Bitboard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionSet {
    /// Empty squares that can be moved to.
    pub possible_moves: Bitboard,
    /// Squares attacked, whether empty, friendly or enemy occupied, including
    /// the squares x-rayed behind an enemy king.
    pub attacked: Bitboard,
    /// Enemy pieces that can be captured (plus the en passant target square).
    pub captures: Bitboard,
    /// Friendly pieces that are protected, i.e. could be recaptured on.
    pub defended: Bitboard,
    pub checks: Vec<KingCheck>,
    /// Pins imposed on enemy pieces.
    pub pins: Vec<Pin>,
}

impl InteractionSet {
    /// Every destination: quiet moves and captures.
    pub fn reachable(&self) -> Bitboard {
        self.possible_moves | self.captures
    }

    pub fn gives_check(&self) -> bool {
        !self.checks.is_empty()
    }

    fn restrict_to(&mut self, line: Bitboard) {
        self.possible_moves &= line;
        self.captures &= line;
    }
}

/// Interaction sets for both sides, with kings kept apart from the other
/// pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interactions {
    pub white: InteractionSet,
    pub black: InteractionSet,
    pub white_king: InteractionSet,
    pub black_king: InteractionSet,
}

impl Interactions {
    /// The combined set of a side's non-king pieces.
    pub fn pieces(&self, color: Color) -> &InteractionSet {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn king(&self, color: Color) -> &InteractionSet {
        match color {
            Color::White => &self.white_king,
            Color::Black => &self.black_king,
        }
    }

    /// Every square the side attacks, king included.
    pub fn attacked_by(&self, color: Color) -> Bitboard {
        self.pieces(color).attacked | self.king(color).attacked
    }

    /// Checks currently given to `color`'s king.
    pub fn checks_against(&self, color: Color) -> &[KingCheck] {
        &self.pieces(color.flip()).checks
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.pieces(color.flip()).gives_check()
    }

    /// The pin holding `color`'s piece on `square`, if any.
    pub fn pin_on(&self, color: Color, square: Square) -> Option<&Pin> {
        self.pieces(color.flip())
            .pins
            .iter()
            .find(|pin| pin.pinned == square)
    }
}

/// Computes the interaction sets of both sides.
pub fn interactions_for(snapshot: &BoardSnapshot) -> Interactions {
    let white_scans = scan_pieces(snapshot, Color::White);
    let black_scans = scan_pieces(snapshot, Color::Black);

    let white = aggregate(&white_scans, &black_scans);
    let black = aggregate(&black_scans, &white_scans);

    let white_reach = king::reach(snapshot.board, Color::White);
    let black_reach = king::reach(snapshot.board, Color::Black);

    let white_king = king::interactions(snapshot, Color::White, white_reach.clone(), &black, &black_reach);
    let black_king = king::interactions(snapshot, Color::Black, black_reach, &white, &white_reach);

    Interactions {
        white,
        black,
        white_king,
        black_king,
    }
}

/// Computes the interaction set of the single piece on `square`, or `None` if
/// the square is empty.
pub fn moves_of(snapshot: &BoardSnapshot, square: Square) -> Option<InteractionSet> {
    piece_interactions(snapshot, &interactions_for(snapshot), square)
}

/// Like [`moves_of`], reusing already computed interactions for pins and
/// king safety.
pub fn piece_interactions(
    snapshot: &BoardSnapshot,
    interactions: &Interactions,
    square: Square,
) -> Option<InteractionSet> {
    let piece = snapshot.board.piece_at(square)?;
    let color = piece.color();

    if piece.is(PieceType::King) {
        return Some(interactions.king(color).clone());
    }

    let mut set = scan_piece(snapshot, square, piece);
    if let Some(pin) = interactions.pin_on(color, square) {
        set.restrict_to(pin.line);
    }
    Some(set)
}

fn scan_pieces(snapshot: &BoardSnapshot, color: Color) -> Vec<(Square, InteractionSet)> {
    snapshot
        .board
        .pieces_of(color)
        .filter(|(piece, _)| !piece.is(PieceType::King))
        .map(|(piece, square)| (square, scan_piece(snapshot, square, piece)))
        .collect()
}

fn scan_piece(snapshot: &BoardSnapshot, square: Square, piece: Piece) -> InteractionSet {
    let mut set = InteractionSet::default();
    let color = piece.color();
    let board = snapshot.board;

    match piece.piece_type() {
        PieceType::Pawn => pawns::scan(snapshot, square, color, &mut set),
        PieceType::Knight => scan_knight(board, square, color, &mut set),
        PieceType::Bishop => sliders::scan(board, square, color, &Direction::DIAGONAL, &mut set),
        PieceType::Rook => sliders::scan(board, square, color, &Direction::ORTHOGONAL, &mut set),
        PieceType::Queen => sliders::scan(board, square, color, &Direction::ALL, &mut set),
        PieceType::King => {}
    }

    set
}

fn scan_knight(board: &BoardRepr, from: Square, color: Color, set: &mut InteractionSet) {
    for square in Lookups::get_instance().knight_moves(from).squares() {
        set.attacked.insert(square);
        match board.piece_at(square) {
            None => set.possible_moves.insert(square),
            Some(piece) if piece.color() == color => set.defended.insert(square),
            Some(piece) if piece.is(PieceType::King) => set.checks.push(KingCheck::contact(from)),
            Some(_) => set.captures.insert(square),
        }
    }
}

/// Unions one side's piece scans, restricting each pinned piece to its pin
/// line. Pins come from the opposing scans of the same snapshot, so they are
/// never stale.
fn aggregate(
    own: &[(Square, InteractionSet)],
    enemy: &[(Square, InteractionSet)],
) -> InteractionSet {
    let pins_against: Vec<&Pin> = enemy.iter().flat_map(|(_, scan)| &scan.pins).collect();

    let mut result = InteractionSet::default();

    for (square, scan) in own {
        let line = pins_against
            .iter()
            .find(|pin| pin.pinned == *square)
            .map_or(Bitboard::ALL, |pin| pin.line);

        result.possible_moves |= scan.possible_moves & line;
        result.captures |= scan.captures & line;
        result.attacked |= scan.attacked;
        result.defended |= scan.defended;
        result.checks.extend_from_slice(&scan.checks);

        result.pins.extend(scan.pins.iter().map(|pin| {
            let pinned_reach = enemy
                .iter()
                .find(|(square, _)| *square == pin.pinned)
                .map_or(Bitboard::EMPTY, |(_, scan)| scan.reachable());

            Pin {
                possible_moves: pinned_reach & pin.line,
                ..*pin
            }
        }));
    }

    result
}
