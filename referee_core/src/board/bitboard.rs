use std::{fmt::Debug, ops};

use super::Square;

/// A set of squares, one bit per square in [`Square::index`] order.
///
/// Every square set in the crate (move destinations, attacked squares, pin
/// lines, ...) is a [`Bitboard`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(u64::MAX);

    /// Squares where rank and file have differing parity (b1, a2, ...).
    pub const LIGHT_SQUARES: Self = Self(0x55AA_55AA_55AA_55AA);
    pub const DARK_SQUARES: Self = Self(!Self::LIGHT_SQUARES.0);

    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.get())
    }

    pub const fn has_piece(self) -> bool {
        self.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1 << square.get()) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1 << square.get();
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1 << square.get());
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn pop_count(self) -> u32 {
        self.0.count_ones()
    }

    /// The lowest-indexed square in the set.
    pub const fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as usize))
        }
    }

    /// Iterates over the squares in the set from a1 towards h8.
    pub fn squares(self) -> Squares {
        Squares(self.0)
    }
}

impl Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Bitboard(\n")?;
        for rank in (0..8).rev() {
            f.write_str("    ")?;
            for file in 0..8 {
                let square = Square::new_unchecked(rank, file);
                f.write_str(if self.contains(square) { " #" } else { " ." })?;
            }
            f.write_str("\n")?;
        }
        f.write_str(")")
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut result = Self::EMPTY;
        for square in iter {
            result.insert(square);
        }
        result
    }
}

impl<const N: usize> From<[Square; N]> for Bitboard {
    fn from(squares: [Square; N]) -> Self {
        squares.into_iter().collect()
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl ops::BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl ops::BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Iterator over the squares of a [`Bitboard`].
#[derive(Debug, Clone)]
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros();
            self.0 &= self.0 - 1;
            Some(Square::from_index_unchecked(index as usize))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Squares {}
