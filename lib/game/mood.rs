use derive_more::Display;

/// A side's disposition, derived from the state of the game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mood {
    #[display(fmt = "calm")]
    Calm,
    #[display(fmt = "focused")]
    Focused,
    #[display(fmt = "under pressure")]
    UnderPressure,
}

impl Mood {
    /// The mood of a side given whether it is in check, how many of its pieces were
    /// captured and how many moves it made.
    pub fn new(in_check: bool, lost: usize, moves: u32) -> Self {
        if in_check {
            Mood::UnderPressure
        } else if moves > 0 && lost as f64 / moves as f64 > 0.3 {
            Mood::Focused
        } else {
            Mood::Calm
        }
    }
}
