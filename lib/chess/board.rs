use crate::chess::{Bitboard, Color, Piece, Role, Square};
use derive_more::{DebugCustom, Display, Error};
use std::fmt::{self, Write};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The chess board, an 8×8 grid of optional [`Piece`]s.
///
/// The board knows nothing about legality, it is pure placement data.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Board({self})")]
pub struct Board([Option<Piece>; 64]);

impl Default for Board {
    /// The standard starting position.
    fn default() -> Self {
        use {Color::*, Role::*};

        const BACK: [Role; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for (col, &role) in BACK.iter().enumerate() {
            let col = col as u8;
            board[Square::new(0, col)] = Some(Piece(Black, role));
            board[Square::new(1, col)] = Some(Piece(Black, Pawn));
            board[Square::new(6, col)] = Some(Piece(White, Pawn));
            board[Square::new(7, col)] = Some(Piece(White, role));
        }

        board
    }
}

impl Board {
    /// A board without any pieces.
    #[inline(always)]
    pub const fn empty() -> Self {
        Board([None; 64])
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.index()]
    }

    /// Places a [`Piece`] on the given [`Square`], or clears it.
    ///
    /// Returns the previous occupant.
    #[inline(always)]
    pub fn set(&mut self, sq: Square, p: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.0[sq.index()], p)
    }

    /// The [`Color`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|p| p.color())
    }

    /// The [`Role`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn role_on(&self, sq: Square) -> Option<Role> {
        self.get(sq).map(|p| p.role())
    }

    /// An iterator over all pieces on the board.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|sq| Some((self.get(sq)?, sq)))
    }

    /// [`Square`]s occupied by pieces.
    pub fn occupied(&self) -> Bitboard {
        self.iter().map(|(_, sq)| sq).collect()
    }

    /// [`Square`]s occupied by pieces of a [`Color`].
    pub fn by_color(&self, c: Color) -> Bitboard {
        self.iter()
            .filter(|(p, _)| p.color() == c)
            .map(|(_, sq)| sq)
            .collect()
    }

    /// [`Square`] occupied by the king of a [`Color`].
    pub fn king(&self, c: Color) -> Option<Square> {
        self.iter()
            .find(|&(p, _)| p == Piece(c, Role::King))
            .map(|(_, sq)| sq)
    }

    /// Moves whatever stands on `whence` onto `whither`.
    ///
    /// Returns the previous occupant of `whither`.
    #[inline(always)]
    pub fn relocate(&mut self, whence: Square, whither: Square) -> Option<Piece> {
        let p = self.set(whence, None);
        self.set(whither, p)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[sq.index()]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.0[sq.index()]
    }
}

/// Formats the board as the piece placement field of a FEN string, row 0 first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            if row > 0 {
                f.write_char('/')?;
            }

            let mut empty = 0;
            for col in 0..8 {
                match self.get(Square::new(row, col)) {
                    None => empty += 1,
                    Some(p) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }

                        f.write_char(p.letter())?;
                    }
                }
            }

            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing the piece placement failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseBoardError {
    #[display(fmt = "expected 8 rows separated by `/`")]
    InvalidRowCount,
    #[display(fmt = "row {_0} does not describe exactly 8 squares")]
    InvalidRowLength(#[error(not(source))] usize),
    #[display(fmt = "unexpected character `{_0}`")]
    InvalidCharacter(#[error(not(source))] char),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(ParseBoardError::InvalidRowCount);
        }

        let mut board = Board::empty();
        for (row, text) in rows.into_iter().enumerate() {
            let mut col = 0usize;
            for c in text.chars() {
                if let Some(n) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    col += n as usize;
                } else if let Some(p) = Piece::from_letter(c) {
                    if col < 8 {
                        board[Square::new(row as u8, col as u8)] = Some(p);
                    }

                    col += 1;
                } else {
                    return Err(ParseBoardError::InvalidCharacter(c));
                }

                if col > 8 {
                    return Err(ParseBoardError::InvalidRowLength(row));
                }
            }

            if col != 8 {
                return Err(ParseBoardError::InvalidRowLength(row));
            }
        }

        Ok(board)
    }
}
