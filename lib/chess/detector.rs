use crate::chess::{Bitboard, Color, MoveValidator, Square};

/// Evaluates attacks on the kings and whether either side has run out of moves.
#[derive(Debug, Copy, Clone)]
pub struct CheckDetector<'a> {
    validator: MoveValidator<'a>,
}

impl<'a> CheckDetector<'a> {
    /// Constructs a detector that consults the given [`MoveValidator`].
    pub fn new(validator: MoveValidator<'a>) -> Self {
        CheckDetector { validator }
    }

    /// The squares of the opposing pieces that attack the king of this [`Color`].
    pub fn checkers(&self, side: Color) -> Bitboard {
        let board = self.validator.board();
        let Some(king) = board.king(side) else {
            return Bitboard::empty();
        };

        board
            .by_color(!side)
            .into_iter()
            .filter(|&sq| self.validator.is_legal(sq, king, false))
            .collect()
    }

    /// Whether the king of this [`Color`] is attacked.
    ///
    /// A side without a king is never in check.
    pub fn is_in_check(&self, side: Color) -> bool {
        !self.checkers(side).is_empty()
    }

    /// Whether any piece of this [`Color`] has at least one legal move.
    pub fn has_legal_move(&self, side: Color) -> bool {
        self.validator
            .board()
            .by_color(side)
            .into_iter()
            .any(|sq| !self.movable(sq).is_empty())
    }

    /// Whether this [`Color`] is in check and has no legal moves.
    pub fn is_checkmate(&self, side: Color) -> bool {
        self.is_in_check(side) && !self.has_legal_move(side)
    }

    /// Whether this [`Color`] is not in check but has no legal moves.
    pub fn is_stalemate(&self, side: Color) -> bool {
        !self.is_in_check(side) && !self.has_legal_move(side)
    }

    fn movable(&self, whence: Square) -> Bitboard {
        self.validator.destinations(whence)
    }
}
