use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{Display, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Gen I type ids, in engine order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
    IntoStaticStr,
    Serialize_repr,
    Deserialize_repr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum PokemonType {
    #[default]
    Normal = 0,
    Fighting = 1,
    Flying = 2,
    Poison = 3,
    Ground = 4,
    Rock = 5,
    Bug = 6,
    Ghost = 7,
    Fire = 8,
    Water = 9,
    Grass = 10,
    Electric = 11,
    Psychic = 12,
    Ice = 13,
    Dragon = 14,
}

/// Primary and secondary type. Single-typed creatures repeat the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Types {
    pub type1: PokemonType,
    pub type2: PokemonType,
}

impl Types {
    pub const fn single(t: PokemonType) -> Self {
        Self { type1: t, type2: t }
    }

    pub const fn dual(type1: PokemonType, type2: PokemonType) -> Self {
        Self { type1, type2 }
    }

    pub fn has(&self, t: PokemonType) -> bool {
        self.type1 == t || self.type2 == t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_case_insensitively() {
        assert_eq!("ghost".parse::<PokemonType>().unwrap(), PokemonType::Ghost);
        assert_eq!("PSYCHIC".parse::<PokemonType>().unwrap(), PokemonType::Psychic);
        assert!("steel".parse::<PokemonType>().is_err());
        assert_eq!(PokemonType::from_repr(14), Some(PokemonType::Dragon));
        assert_eq!(PokemonType::from_repr(15), None);
    }
}
