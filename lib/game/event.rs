use crate::chess::{Color, Move, Piece, Square};
use crate::game::Outcome;
use crate::power::Power;
use derive_more::Display;

/// Something noteworthy that happened during a [`Game`][`crate::game::Game`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Event {
    #[display(fmt = "{_0} played {_1}")]
    Moved(Color, Move),

    #[display(fmt = "{_0} captured {_1}")]
    Captured(Color, Piece),

    #[display(fmt = "{_0} activated {_1}")]
    PowerActivated(Color, Power),

    #[display(fmt = "{_0} shielded the piece on {_1}")]
    ShieldPlaced(Color, Square),

    #[display(fmt = "the shield on {_0} blocked a capture")]
    ShieldBlocked(Square),

    #[display(fmt = "{_0} is in check")]
    Check(Color),

    #[display(fmt = "the pawn on {_0} was promoted to {_1}")]
    Promoted(Square, Piece),

    #[display(fmt = "game over, {_0}")]
    GameOver(Outcome),
}

/// Trait for consumers of [`Event`]s.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    /// Called once for every [`Event`], in the order they happened.
    fn notify(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> Observer for F {
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}
