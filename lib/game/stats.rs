use derive_more::Display;

/// Counters kept for each side.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "moves: {moves}, captures: {captures}, powers used: {powers_used}")]
pub struct Stats {
    pub moves: u32,
    pub captures: u32,
    pub powers_used: u32,
}
