//! Team files: species, DVs and moves, turned into battle-ready creatures.
//!
//! Species and moves are given by name or engine id. Types, base stats and
//! base PP default to the Gen I data and can be overridden per entry.

use std::path::Path;

use pkmn_core::data;
use pkmn_core::statcalc::{self, Dvs};
use pkmn_core::{Pokemon, PokemonType, Stats, Types};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("cannot read team file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse team file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{side}[{index}]: unknown species '{species}'")]
    UnknownSpecies {
        side: &'static str,
        index: usize,
        species: DataRef,
    },

    #[error("{side}[{index}]: unknown move '{name}'")]
    UnknownMove {
        side: &'static str,
        index: usize,
        name: DataRef,
    },

    #[error("{side}[{index}]: unknown type '{name}'")]
    UnknownType {
        side: &'static str,
        index: usize,
        name: String,
    },

    #[error("{side}[{index}]: expected 1 or 2 types, got {count}")]
    TypeCount {
        side: &'static str,
        index: usize,
        count: usize,
    },

    #[error("{side}: team is empty")]
    EmptyTeam { side: &'static str },
}

/// A species or move, by engine id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataRef {
    Id(u8),
    Name(String),
}

impl std::fmt::Display for DataRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataRef::Id(id) => write!(f, "#{id}"),
            DataRef::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for DataRef {
    fn from(name: &str) -> Self {
        DataRef::Name(name.to_string())
    }
}

impl From<u8> for DataRef {
    fn from(id: u8) -> Self {
        DataRef::Id(id)
    }
}

/// `"Surf"`, `57` or `{"id": 57, "base_pp": 15}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveSpec {
    Ref(DataRef),
    Full {
        id: DataRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_pp: Option<u8>,
    },
}

impl MoveSpec {
    /// Engine id and base PP.
    fn resolve(&self, side: &'static str, index: usize) -> Result<(u8, u8), TeamError> {
        let (id, base_pp) = match self {
            MoveSpec::Ref(id) => (id, None),
            MoveSpec::Full { id, base_pp } => (id, *base_pp),
        };
        let unknown = || TeamError::UnknownMove {
            side,
            index,
            name: id.clone(),
        };
        let raw = match id {
            DataRef::Id(raw) => *raw,
            DataRef::Name(name) => data::move_id(name).ok_or_else(unknown)?,
        };
        let pp = match base_pp {
            Some(pp) => pp,
            None => data::moves(raw).ok_or_else(unknown)?.pp,
        };
        Ok((raw, pp))
    }
}

fn default_level() -> u8 {
    100
}

fn default_stat_exp() -> u16 {
    statcalc::MAX_STAT_EXP
}

/// One creature as written in a team file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSpec {
    pub species: DataRef,
    #[serde(default = "default_level")]
    pub level: u8,
    /// Type names, e.g. `["ghost", "poison"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Base stats; `hp` is the base HP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Stats>,
    #[serde(default)]
    pub dvs: Dvs,
    #[serde(default = "default_stat_exp")]
    pub stat_exp: u16,
    #[serde(default)]
    pub moves: Vec<MoveSpec>,
}

impl PokemonSpec {
    /// Level 100, max DVs and stat experience.
    pub fn named(species: &str, moves: &[&str]) -> Self {
        Self {
            species: species.into(),
            level: default_level(),
            types: None,
            base: None,
            dvs: Dvs::max(),
            stat_exp: default_stat_exp(),
            moves: moves.iter().map(|&m| MoveSpec::Ref(m.into())).collect(),
        }
    }

    fn build(&self, side: &'static str, index: usize) -> Result<Pokemon, TeamError> {
        let unknown = || TeamError::UnknownSpecies {
            side,
            index,
            species: self.species.clone(),
        };
        let species = match &self.species {
            DataRef::Id(id) => *id,
            DataRef::Name(name) => data::species_id(name).ok_or_else(unknown)?,
        };
        let known = data::species(species);

        let types = match (&self.types, known) {
            (Some(names), _) => parse_types(names, side, index)?,
            (None, Some(known)) => known.types,
            (None, None) => return Err(unknown()),
        };
        let base = match (self.base, known) {
            (Some(base), _) => base,
            (None, Some(known)) => known.base,
            (None, None) => return Err(unknown()),
        };
        let stats = statcalc::calc_stats(&base, self.dvs, self.stat_exp, self.level);
        self.moves.iter().try_fold(
            Pokemon::new(species, self.level, stats, types),
            |p, m| {
                let (id, base_pp) = m.resolve(side, index)?;
                Ok::<_, TeamError>(p.with_move(id, base_pp))
            },
        )
    }
}

fn parse_types(names: &[String], side: &'static str, index: usize) -> Result<Types, TeamError> {
    let parse = |name: &String| {
        name.parse::<PokemonType>()
            .map_err(|_| TeamError::UnknownType {
                side,
                index,
                name: name.clone(),
            })
    };
    match names {
        [t] => Ok(Types::single(parse(t)?)),
        [t1, t2] => Ok(Types::dual(parse(t1)?, parse(t2)?)),
        other => Err(TeamError::TypeCount {
            side,
            index,
            count: other.len(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamsFile {
    pub p1: Vec<PokemonSpec>,
    pub p2: Vec<PokemonSpec>,
}

/// Both teams, built and ready to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teams {
    pub p1: Vec<Pokemon>,
    pub p2: Vec<Pokemon>,
}

impl TeamsFile {
    pub fn load(path: &Path) -> Result<Self, TeamError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn build(&self) -> Result<Teams, TeamError> {
        Ok(Teams {
            p1: build_side("p1", &self.p1)?,
            p2: build_side("p2", &self.p2)?,
        })
    }
}

fn build_side(side: &'static str, specs: &[PokemonSpec]) -> Result<Vec<Pokemon>, TeamError> {
    if specs.is_empty() {
        return Err(TeamError::EmptyTeam { side });
    }
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| spec.build(side, i))
        .collect()
}

impl Default for TeamsFile {
    /// A small mirror match used when no team file is given.
    fn default() -> Self {
        let team = vec![
            PokemonSpec::named("Chansey", &["Seismic Toss", "Thunder Wave", "Soft-Boiled"]),
            PokemonSpec::named("Starmie", &["Surf", "Blizzard", "Thunderbolt"]),
            PokemonSpec::named("Snorlax", &["Body Slam", "Earthquake", "Rest"]),
        ];
        Self {
            p1: team.clone(),
            p2: team,
        }
    }
}
