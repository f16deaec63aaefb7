mod bitboard;
mod board;
mod color;
mod detector;
mod r#move;
mod piece;
mod promotion;
mod role;
mod square;
mod validator;

pub use bitboard::*;
pub use board::*;
pub use color::*;
pub use detector::*;
pub use piece::*;
pub use promotion::*;
pub use r#move::*;
pub use role::*;
pub use square::*;
pub use validator::*;
