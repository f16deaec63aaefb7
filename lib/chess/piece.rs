use crate::chess::{Color, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};

/// A chess [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece(pub Color, pub Role);

impl Piece {
    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        self.0
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.1
    }

    /// Whether this piece is a king.
    #[inline(always)]
    pub fn is_king(&self) -> bool {
        self.1 == Role::King
    }

    /// The letter of this piece, uppercase for white and lowercase for black.
    pub fn letter(&self) -> char {
        match self.0 {
            Color::White => self.1.letter().to_ascii_uppercase(),
            Color::Black => self.1.letter(),
        }
    }

    /// The piece identified by a letter, whose case encodes the [`Color`].
    pub fn from_letter(c: char) -> Option<Self> {
        let role = Role::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Some(Piece(color, role))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(self.letter())
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `PNBRQKpnbrqk`")]
pub struct ParsePieceError;

impl std::str::FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_letter(c).ok_or(ParsePieceError),
            _ => Err(ParsePieceError),
        }
    }
}
