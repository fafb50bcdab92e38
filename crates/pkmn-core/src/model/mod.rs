//! Structured view of a battle.
//!
//! These types hold exactly what the buffer holds, nothing derived. Capacity
//! limits are not enforced here; [`crate::codec::encode`] rejects anything
//! that does not fit.

use pkmn_rng::{Psrng, Seed};
use serde::{Deserialize, Serialize};

use crate::choice::Player;
use crate::statcalc;

mod status;
mod types;
mod volatiles;

pub use status::Status;
pub use types::{PokemonType, Types};
pub use volatiles::{Boosts, VolatileFlags, Volatiles};

/// Gen I stat block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spe: u16,
    pub spc: u16,
}

impl Stats {
    pub const fn new(hp: u16, atk: u16, def: u16, spe: u16, spc: u16) -> Self {
        Self {
            hp,
            atk,
            def,
            spe,
            spc,
        }
    }

    pub const fn values(&self) -> [u16; 5] {
        [self.hp, self.atk, self.def, self.spe, self.spc]
    }

    pub const fn from_values(v: [u16; 5]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveSlot {
    pub id: u8,
    pub pp: u8,
}

impl MoveSlot {
    pub const EMPTY: MoveSlot = MoveSlot { id: 0, pp: 0 };

    pub const fn new(id: u8, pp: u8) -> Self {
        Self { id, pp }
    }

    pub const fn is_empty(&self) -> bool {
        self.id == 0
    }
}

/// A team member as stored in its party slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pokemon {
    pub species: u8,
    pub level: u8,
    /// Current HP; max HP is `stats.hp`.
    pub hp: u16,
    pub status: Status,
    pub stats: Stats,
    pub types: Types,
    /// Known moves, never containing id 0.
    pub moves: Vec<MoveSlot>,
}

impl Pokemon {
    /// A healthy creature at full HP with no moves yet.
    pub fn new(species: u8, level: u8, stats: Stats, types: Types) -> Self {
        Self {
            species,
            level,
            hp: stats.hp,
            status: Status::HEALTHY,
            stats,
            types,
            moves: Vec::new(),
        }
    }

    /// Learn a move at full PP (three PP Ups applied).
    pub fn with_move(mut self, id: u8, base_pp: u8) -> Self {
        self.moves.push(MoveSlot::new(id, statcalc::max_pp(base_pp)));
        self
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }
}

/// The creature on the field: its battle copy of stats, plus everything that
/// resets on switch-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivePokemon {
    pub stats: Stats,
    pub species: u8,
    pub types: Types,
    pub boosts: Boosts,
    pub volatiles: Volatiles,
    pub moves: [MoveSlot; 4],
}

impl ActivePokemon {
    /// Battle view of a team member as it enters the field.
    pub fn from_pokemon(p: &Pokemon) -> Self {
        let mut moves = [MoveSlot::EMPTY; 4];
        for (dst, src) in moves.iter_mut().zip(&p.moves) {
            *dst = *src;
        }
        Self {
            stats: p.stats,
            species: p.species,
            types: p.types,
            boosts: Boosts::default(),
            volatiles: Volatiles::default(),
            moves,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideState {
    /// Party slots, in slot order.
    pub team: Vec<Pokemon>,
    pub active: ActivePokemon,
    /// 1-based party slots in battle position order; `order[0]` is active.
    pub order: Vec<u8>,
    pub last_selected_move: u8,
    pub last_used_move: u8,
}

impl SideState {
    /// A side whose order matches its party slots.
    pub fn new(team: Vec<Pokemon>) -> Self {
        let order = (1..=team.len() as u8).collect();
        Self {
            team,
            order,
            ..Self::default()
        }
    }

    /// Party slot of the battle position `position` (0 = active).
    pub fn slot_at(&self, position: usize) -> Option<usize> {
        self.order
            .get(position)
            .and_then(|&o| (o as usize).checked_sub(1))
    }

    /// The team member currently in front.
    pub fn lead(&self) -> Option<&Pokemon> {
        self.slot_at(0).and_then(|slot| self.team.get(slot))
    }

    pub fn is_defeated(&self) -> bool {
        self.team.iter().all(Pokemon::is_fainted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleState {
    pub sides: [SideState; 2],
    pub turn: u16,
    pub last_damage: u16,
    /// Last move slot index per player.
    pub last_moves: [u8; 2],
    /// PSRNG state.
    pub rng: u64,
    /// Engine scratch bytes in buffer order; empty means all zero.
    pub scratch: Vec<u8>,
}

impl BattleState {
    pub fn new(p1: Vec<Pokemon>, p2: Vec<Pokemon>, seed: Seed) -> Self {
        Self {
            sides: [SideState::new(p1), SideState::new(p2)],
            rng: Psrng::new(seed).state(),
            ..Self::default()
        }
    }

    pub fn side(&self, player: Player) -> &SideState {
        &self.sides[player.index()]
    }

    pub fn side_mut(&mut self, player: Player) -> &mut SideState {
        &mut self.sides[player.index()]
    }

    /// Generator continuing from the stored state.
    pub fn rng(&self) -> Psrng {
        Psrng::from_state(self.rng)
    }
}
