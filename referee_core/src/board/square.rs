use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use paste::paste;
use seq_macro::seq;
use thiserror::Error;

/// A square on the board.
///
/// Stored as a single index from 0 to 63, ordered by increasing file and then
/// rank: a1 is 0, b1 is 1, ..., h1 is 7, a2 is 8, ..., h8 is 63. Rank 0 is
/// White's back rank.
///
/// Squares are plain values, so two handles for the same coordinate compare
/// and hash equal and can be used directly as map keys.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Square(u8);

macro_rules! square_constants {
    ($($file:ident = $file_index:literal),* $(,)?) => {
        impl Square {
            $(
                seq!(RANK in 1..=8 {
                    paste! {
                        pub const [<$file RANK>]: Self = Self::new_unchecked(RANK - 1, $file_index);
                    }
                });
            )*
        }
    };
}

square_constants!(A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7);

impl Square {
    /// Returns the square on the given rank and file, or `None` if either is
    /// outside of `0..8`.
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Self::new_unchecked(rank, file))
        } else {
            None
        }
    }

    /// Like [`Self::new`], but the caller promises both coordinates are in
    /// range.
    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self(rank * 8 + file)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn from_index_unchecked(index: usize) -> Self {
        Self(index as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square displaced by the given number of ranks and files,
    /// or `None` if that walks off the board.
    pub const fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        let rank = self.rank() as i8 + rank_delta;
        let file = self.file() as i8 + file_delta;

        if rank < 0 || file < 0 {
            None
        } else {
            Self::new(rank as u8, file as u8)
        }
    }

    /// Light squares are those where rank and file have differing parity, so
    /// a1 is dark and h1 is light.
    pub const fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }

    /// Iterates over every square from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.file_char())?;
        f.write_char(self.rank_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square `{0}`: expected a file a-h followed by a rank 1-8")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSquareError(s.to_owned());

        match s.as_bytes() {
            &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Self::new_unchecked(rank - b'1', file - b'a'))
            }
            _ => Err(error()),
        }
    }
}
