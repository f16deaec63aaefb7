/// Chess domain types and move legality.
pub mod chess;
/// The game state machine.
pub mod game;
/// Energy and the rule overrides it buys.
pub mod power;
