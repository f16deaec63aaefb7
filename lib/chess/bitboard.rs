use crate::chess::Square;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use std::fmt::{self, Write};

/// A set of squares on a chess board.
#[derive(
    Default, Copy, Clone, Eq, PartialEq, Hash, BitAnd, BitAndAssign, BitOr, BitOrAssign, Not,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct Bitboard(u64);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for sq in Square::iter() {
            f.write_char(if self.contains(sq) { '■' } else { '◻' })?;
            f.write_char(if sq.col() < 7 { ' ' } else { '\n' })?;
        }

        Ok(())
    }
}

impl Bitboard {
    /// An empty set.
    #[inline(always)]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// A set that contains every square.
    #[inline(always)]
    pub const fn full() -> Self {
        Bitboard(u64::MAX)
    }

    /// The number of [`Square`]s in the set.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the set is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this [`Square`] is in the set.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        self.0 & (1 << sq.index()) != 0
    }

    /// Adds a [`Square`] to this set.
    #[inline(always)]
    pub fn with(&self, sq: Square) -> Self {
        Bitboard(self.0 | 1 << sq.index())
    }

    /// Removes a [`Square`] from this set.
    #[inline(always)]
    pub fn without(&self, sq: Square) -> Self {
        Bitboard(self.0 & !(1 << sq.index()))
    }

    /// Adds a [`Square`] to this set in place.
    #[inline(always)]
    pub fn insert(&mut self, sq: Square) {
        *self = self.with(sq);
    }

    /// Removes a [`Square`] from this set in place.
    #[inline(always)]
    pub fn remove(&mut self, sq: Square) {
        *self = self.without(sq);
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::empty(), |bb, sq| bb.with(sq))
    }
}

/// An iterator over the [`Square`]s in a [`Bitboard`].
#[derive(Debug)]
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let i = self.0.trailing_zeros() as usize;
            self.0 &= self.0 - 1;
            Square::from_index(i)
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Squares {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        Squares(self.0)
    }
}
