mod catalog;
mod energy;
mod state;

pub use catalog::*;
pub use energy::*;
pub use state::*;
