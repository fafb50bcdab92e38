//! Species and move data, keyed by engine id.
//!
//! Names are Showdown display names. Lookups by name go through [`to_id`],
//! so `"Mr. Mime"`, `"mr mime"` and `"mrmime"` all resolve.

use crate::model::{PokemonType, Stats, Types};

pub mod gen1;

/// Base data for one species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Species {
    pub name: &'static str,
    /// Base stats; `hp` is base HP.
    pub base: Stats,
    pub types: Types,
}

impl Species {
    pub(crate) const fn new(
        name: &'static str,
        base: [u16; 5],
        type1: PokemonType,
        type2: PokemonType,
    ) -> Self {
        Self {
            name,
            base: Stats::from_values(base),
            types: Types::dual(type1, type2),
        }
    }
}

/// One move and its base PP (before PP Ups).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub name: &'static str,
    pub pp: u8,
}

impl Move {
    pub(crate) const fn new(name: &'static str, pp: u8) -> Self {
        Self { name, pp }
    }
}

/// Lowercase alphanumerics only, the way Showdown keys its data.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn find<T>(table: &'static [T], name: &str, key: impl Fn(&T) -> &str) -> Option<u8> {
    let id = to_id(name);
    if id.is_empty() {
        return None;
    }
    table
        .iter()
        .position(|entry| to_id(key(entry)) == id)
        .and_then(|index| u8::try_from(index + 1).ok())
}

fn get<T>(table: &'static [T], id: u8) -> Option<&'static T> {
    (id as usize).checked_sub(1).and_then(|index| table.get(index))
}

/// Gen I species by engine id (1-based, 0 is "no species").
pub fn species(id: u8) -> Option<&'static Species> {
    get(gen1::SPECIES, id)
}

pub fn species_id(name: &str) -> Option<u8> {
    find(gen1::SPECIES, name, |s| s.name)
}

/// Gen I move by engine id (1-based, 0 is "no move").
pub fn moves(id: u8) -> Option<&'static Move> {
    get(gen1::MOVES, id)
}

pub fn move_id(name: &str) -> Option<u8> {
    find(gen1::MOVES, name, |m| m.name)
}

pub fn species_name(id: u8) -> Option<&'static str> {
    species(id).map(|s| s.name)
}

pub fn move_name(id: u8) -> Option<&'static str> {
    moves(id).map(|m| m.name)
}
