use lib::chess::Color;
use std::time::{Duration, Instant};

/// A pair of chess clocks.
///
/// At most one clock runs at a time, elapsed time is charged to its side.
#[derive(Debug, Clone)]
pub struct Clock {
    remaining: [Duration; 2],
    running: Option<(Color, Instant)>,
}

impl Clock {
    /// Constructs stopped clocks that start out with `limit` each.
    pub fn new(limit: Duration) -> Self {
        Clock {
            remaining: [limit; 2],
            running: None,
        }
    }

    /// Stops whichever clock is running and starts the one for `side`.
    pub fn start(&mut self, side: Color, now: Instant) {
        self.stop(now);
        self.running = Some((side, now));
    }

    /// Stops whichever clock is running.
    pub fn stop(&mut self, now: Instant) {
        if let Some((side, since)) = self.running.take() {
            let elapsed = now.saturating_duration_since(since);
            let remaining = &mut self.remaining[side as usize];
            *remaining = remaining.saturating_sub(elapsed);
        }
    }

    /// The time left for `side`.
    pub fn remaining(&self, side: Color, now: Instant) -> Duration {
        let remaining = self.remaining[side as usize];
        match self.running {
            Some((s, since)) if s == side => {
                remaining.saturating_sub(now.saturating_duration_since(since))
            }
            _ => remaining,
        }
    }

    /// The side whose running clock ran out of time, if any.
    pub fn flagged(&self, now: Instant) -> Option<Color> {
        let (side, _) = self.running?;
        self.remaining(side, now).is_zero().then_some(side)
    }
}
