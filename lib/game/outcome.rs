use crate::chess::Color;
use derive_more::Display;

/// One of the possible outcomes of a game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    #[display(fmt = "checkmate by the {_0} player")]
    Checkmate(Color),

    #[display(fmt = "{_0} player lost on time")]
    LossOnTime(Color),

    #[display(fmt = "{_0} player resigned")]
    Resignation(Color),

    #[display(fmt = "stalemate")]
    Stalemate,
}

impl Outcome {
    /// Whether neither side has won.
    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }

    /// Whether one of the sides has won.
    pub fn is_decisive(&self) -> bool {
        use Outcome::*;
        matches!(self, Checkmate(_) | LossOnTime(_) | Resignation(_))
    }

    /// The winning side, if the outcome is [decisive](`Self::is_decisive`).
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            Outcome::LossOnTime(c) => Some(!c),
            Outcome::Resignation(c) => Some(!c),
            Outcome::Stalemate => None,
        }
    }
}
