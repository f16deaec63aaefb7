use derive_more::Display;

/// The stage a [`Game`][`crate::game::Game`] is in.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Phase {
    #[display(fmt = "setup")]
    Setup,
    #[display(fmt = "playing")]
    Playing,
    #[display(fmt = "ended")]
    Ended,
}

/// Where a finished game goes next.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Reset {
    /// Straight into a fresh game.
    #[display(fmt = "rematch")]
    Rematch,

    /// Back to the setup stage.
    #[display(fmt = "setup")]
    ToSetup,
}

impl Reset {
    /// The [`Phase`] the game is in after resetting.
    pub fn phase(&self) -> Phase {
        match self {
            Reset::Rematch => Phase::Playing,
            Reset::ToSetup => Phase::Setup,
        }
    }
}
