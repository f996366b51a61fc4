//! Precomputed leaper patterns and the ray directions sliders walk along.

use std::sync::OnceLock;

use num_derive::FromPrimitive;

use crate::board::{Bitboard, Square};

/// The eight compass directions, clockwise from north. North is towards
/// Black's side of the board (increasing rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// (rank, file) displacement of one step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        self as u8 % 2 == 1
    }

    /// The neighbour of `square` in this direction, if still on the board.
    pub const fn step(self, square: Square) -> Option<Square> {
        let (rank_delta, file_delta) = self.delta();
        square.offset(rank_delta, file_delta)
    }
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Knight and king destination patterns for every square, built once and
/// shared read-only for the life of the process.
pub struct Lookups {
    knight_moves: [Bitboard; 64],
    king_moves: [Bitboard; 64],
}

static LOOKUPS: OnceLock<Lookups> = OnceLock::new();

impl Lookups {
    fn new() -> Self {
        let king_deltas = Direction::ALL.map(Direction::delta);

        Self {
            knight_moves: gen_leaper_moves(&KNIGHT_DELTAS),
            king_moves: gen_leaper_moves(&king_deltas),
        }
    }

    /// Builds the tables on first use.
    pub fn get_instance() -> &'static Self {
        LOOKUPS.get_or_init(Self::new)
    }

    pub fn knight_moves(&self, square: Square) -> Bitboard {
        self.knight_moves[square.index()]
    }

    pub fn king_moves(&self, square: Square) -> Bitboard {
        self.king_moves[square.index()]
    }
}

fn gen_leaper_moves(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut result = [Bitboard::EMPTY; 64];

    for square in Square::all() {
        result[square.index()] = deltas
            .iter()
            .filter_map(|&(rank_delta, file_delta)| square.offset(rank_delta, file_delta))
            .collect();
    }

    result
}
