use crate::chess::Square;
use derive_more::{DebugCustom, Display};

/// A record of a piece moving between two [`Square`]s.
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "Move({self})")]
#[display(fmt = "{_0}{_1}")]
pub struct Move(pub Square, pub Square);

impl Move {
    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }

    /// Whether this move spans exactly two rows along a single column.
    #[inline(always)]
    pub fn is_double_step(&self) -> bool {
        let (dr, dc) = self.0.delta(self.1);
        dr.abs() == 2 && dc == 0
    }
}
