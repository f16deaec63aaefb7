use crate::chess::{Color, Square};
use crate::game::Phase;
use crate::power::Power;
use derive_more::{Display, Error};

/// The reason why the [`Game`][`crate::game::Game`] rejected a command.
///
/// A rejected command leaves the game exactly as it was.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Rejection {
    #[display(fmt = "illegal move")]
    InvalidMove,

    #[display(fmt = "the piece on {_0} is shielded")]
    BlockedByShield(#[error(not(source))] Square),

    #[display(fmt = "the king on {_0} cannot be captured")]
    KingCaptureAttempt(#[error(not(source))] Square),

    #[display(fmt = "{power} costs {cost} energy, but only {available} is available")]
    InsufficientEnergy { power: Power, cost: u8, available: u8 },

    #[display(fmt = "pawns may only promote to a queen, rook, bishop or knight")]
    InvalidPromotionChoice,

    #[display(fmt = "it is not the {_0} player's turn")]
    OutOfTurn(#[error(not(source))] Color),

    #[display(fmt = "the pawn on {_0} must be promoted first")]
    AwaitingPromotion(#[error(not(source))] Square),

    #[display(fmt = "select a friendly piece to shield")]
    AwaitingShieldTarget,

    #[display(fmt = "not allowed while the game is in the {_0} phase")]
    WrongPhase(#[error(not(source))] Phase),
}
