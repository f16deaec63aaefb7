use derive_more::{Display, Error};
use std::str::FromStr;

/// A temporary rule override that may be bought with energy.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Power {
    /// The next move of any piece follows queen geometry.
    #[display(fmt = "queen-rush")]
    QueenRush,

    /// Two consecutive actions before the turn passes.
    #[display(fmt = "double-turn")]
    DoubleTurn,

    /// The next move ignores movement geometry and king safety.
    #[display(fmt = "teleport")]
    Teleport,

    /// A friendly piece becomes immune to capture.
    #[display(fmt = "shield")]
    Shield,

    /// [`Power::DoubleTurn`] and [`Power::QueenRush`] at once.
    #[display(fmt = "combo")]
    Combo,
}

impl Power {
    /// The powers that may be bought individually.
    pub const CATALOG: [Power; 4] = [
        Power::QueenRush,
        Power::DoubleTurn,
        Power::Teleport,
        Power::Shield,
    ];

    /// The energy this power costs.
    pub fn cost(&self) -> u8 {
        match self {
            Power::QueenRush => 3,
            Power::DoubleTurn => 4,
            Power::Teleport => 5,
            Power::Shield => 2,
            Power::Combo => 6,
        }
    }

    /// How many powers an activation of this one counts as.
    pub fn uses(&self) -> u32 {
        match self {
            Power::Combo => 2,
            _ => 1,
        }
    }
}

/// The reason why parsing [`Power`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(
    fmt = "failed to parse power, expected one of `queen-rush`, `double-turn`, `teleport`, `shield` or `combo`"
)]
pub struct ParsePowerError;

impl FromStr for Power {
    type Err = ParsePowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queen-rush" => Ok(Power::QueenRush),
            "double-turn" => Ok(Power::DoubleTurn),
            "teleport" => Ok(Power::Teleport),
            "shield" => Ok(Power::Shield),
            "combo" => Ok(Power::Combo),
            _ => Err(ParsePowerError),
        }
    }
}
