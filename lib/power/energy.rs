use derive_more::Display;

/// An amount of energy clamped to `0..=cap`.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{amount}/{cap}")]
pub struct Energy {
    #[cfg_attr(test, strategy(0u8..=10))]
    cap: u8,
    #[cfg_attr(test, strategy(0..=#cap))]
    amount: u8,
}

impl Energy {
    /// An empty pool that holds at most `cap` energy.
    pub fn new(cap: u8) -> Self {
        Energy { cap, amount: 0 }
    }

    /// The current amount.
    pub fn get(&self) -> u8 {
        self.amount
    }

    /// The most this pool can hold.
    pub fn cap(&self) -> u8 {
        self.cap
    }

    /// Adds energy up to the cap.
    pub fn add(&mut self, n: u8) {
        self.amount = self.amount.saturating_add(n).min(self.cap);
    }

    /// Spends exactly `cost`, returning what is left.
    ///
    /// Leaves the pool unchanged if it holds less than `cost`.
    pub fn spend(&mut self, cost: u8) -> Option<u8> {
        self.amount = self.amount.checked_sub(cost)?;
        Some(self.amount)
    }
}
