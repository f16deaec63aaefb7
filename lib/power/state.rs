use crate::chess::{Bitboard, Square};
use crate::power::Power;

/// The rule overrides currently in effect for one color.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct PowerState {
    queen_rush: bool,
    teleport: bool,
    #[cfg_attr(test, strategy(proptest::option::of(0u8..2)))]
    double_turn: Option<u8>,
    shield_armed: bool,
    shielded: Bitboard,
}

impl PowerState {
    /// Puts the effect of a [`Power`] in place.
    pub fn apply(&mut self, power: Power) {
        match power {
            Power::QueenRush => self.queen_rush = true,
            Power::DoubleTurn => self.double_turn = Some(0),
            Power::Teleport => self.teleport = true,
            Power::Shield => self.shield_armed = true,
            Power::Combo => {
                self.queen_rush = true;
                self.double_turn = Some(0);
            }
        }
    }

    /// Whether the next move follows queen geometry.
    pub fn is_queen_rush(&self) -> bool {
        self.queen_rush
    }

    /// Whether the next move ignores geometry.
    pub fn is_teleport(&self) -> bool {
        self.teleport
    }

    /// Whether a double-turn is in progress.
    pub fn is_double_turn(&self) -> bool {
        self.double_turn.is_some()
    }

    /// How many actions were completed during the current double-turn.
    pub fn moves_made(&self) -> u8 {
        self.double_turn.unwrap_or(0)
    }

    /// Whether the next friendly piece selected becomes shielded.
    pub fn is_shield_armed(&self) -> bool {
        self.shield_armed
    }

    /// The shielded squares, kept until the game is reset.
    pub fn shielded(&self) -> Bitboard {
        self.shielded
    }

    /// Shields this [`Square`] and disarms the select mode.
    pub fn place_shield(&mut self, sq: Square) {
        self.shielded.insert(sq);
        self.shield_armed = false;
    }

    /// Clears the single-use overrides after a move was applied.
    pub fn consume(&mut self) {
        self.queen_rush = false;
        self.teleport = false;
    }

    /// Records a completed action and returns whether the turn passes.
    pub fn complete_action(&mut self) -> bool {
        match self.double_turn {
            Some(0) => {
                self.double_turn = Some(1);
                false
            }

            _ => {
                self.double_turn = None;
                true
            }
        }
    }
}
