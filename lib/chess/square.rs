use crate::chess::Bitboard;
use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A square on the chess board.
///
/// Squares are addressed by `(row, col)`, where row 0 is black's back rank and
/// row 7 is white's back rank, so `(0, 0)` is `a8` and `(7, 7)` is `h1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct Square(#[cfg_attr(test, strategy(0u8..64))] u8);

impl Square {
    /// Constructs [`Square`] from a pair of row and column.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside of `0..8`.
    #[inline(always)]
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "({row}, {col}) is off the board");
        Square(row * 8 + col)
    }

    /// Constructs [`Square`] from signed coordinates, if they fall on the board.
    #[inline(always)]
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Constructs [`Square`] from its index in row-major order.
    #[inline(always)]
    pub fn from_index(i: usize) -> Option<Self> {
        (i < 64).then_some(Square(i as u8))
    }

    /// This square's row.
    #[inline(always)]
    pub fn row(&self) -> u8 {
        self.0 / 8
    }

    /// This square's column.
    #[inline(always)]
    pub fn col(&self) -> u8 {
        self.0 % 8
    }

    /// This square's index in row-major order.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns a [`Bitboard`] that only contains this square.
    #[inline(always)]
    pub fn bitboard(self) -> Bitboard {
        Bitboard::empty().with(self)
    }

    /// The signed `(row, col)` displacement from this square to another.
    #[inline(always)]
    pub fn delta(&self, whither: Square) -> (i8, i8) {
        (
            whither.row() as i8 - self.row() as i8,
            whither.col() as i8 - self.col() as i8,
        )
    }

    /// The square displaced from this one, if it falls on the board.
    #[inline(always)]
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        Square::try_new(self.row() as i8 + dr, self.col() as i8 + dc)
    }

    /// An iterator over all squares in row-major order.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + self.col()) as char)?;
        f.write_char((b'8' - self.row()) as char)
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse square, expected a file in `a..=h` followed by a rank in `1..=8`")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Square::new(b'8' - r, f - b'a')),
            _ => Err(ParseSquareError),
        }
    }
}
