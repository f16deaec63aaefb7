use crate::chess::Role;
use derive_more::{Display, Error};
use std::str::FromStr;

/// The piece a pawn may be promoted to.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Promotion {
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
}

/// The reason why a [`Role`] is not a valid [`Promotion`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "pawns may only promote to a queen, rook, bishop or knight")]
pub struct InvalidPromotion;

impl From<Promotion> for Role {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Knight => Role::Knight,
            Promotion::Bishop => Role::Bishop,
            Promotion::Rook => Role::Rook,
            Promotion::Queen => Role::Queen,
        }
    }
}

impl TryFrom<Role> for Promotion {
    type Error = InvalidPromotion;

    fn try_from(r: Role) -> Result<Self, Self::Error> {
        match r {
            Role::Knight => Ok(Promotion::Knight),
            Role::Bishop => Ok(Promotion::Bishop),
            Role::Rook => Ok(Promotion::Rook),
            Role::Queen => Ok(Promotion::Queen),
            Role::Pawn | Role::King => Err(InvalidPromotion),
        }
    }
}

impl FromStr for Promotion {
    type Err = InvalidPromotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Role::from_letter(c).ok_or(InvalidPromotion)?.try_into(),
            _ => Err(InvalidPromotion),
        }
    }
}
