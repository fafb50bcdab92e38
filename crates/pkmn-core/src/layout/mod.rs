//! Per-generation buffer layout tables.
//!
//! A [`LayoutTable`] is plain data: struct sizes, field descriptors and the
//! scratch ranges the engine keeps for itself. The codec walks a table, so
//! adding a generation means adding a table, not new codec logic.
//!
//! Field offsets are relative to the enclosing struct; [`Field::at`] rebases a
//! field onto an absolute buffer position.

use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{Display, EnumIter};

use crate::bits;
use crate::error::LayoutError;

mod gen1;

pub use gen1::GEN1;

/// A (possibly bit-packed) integer inside a little-endian word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    /// Byte offset of the containing word.
    pub offset: usize,
    /// Width of the containing word in bytes.
    pub width: usize,
    /// Position of the lowest bit inside the word.
    pub shift: u32,
    /// Number of bits the value occupies.
    pub bits: u32,
}

impl Field {
    pub const fn byte(name: &'static str, offset: usize) -> Self {
        Self::packed(name, offset, 1, 0, 8)
    }

    pub const fn u16(name: &'static str, offset: usize) -> Self {
        Self::packed(name, offset, 2, 0, 16)
    }

    pub const fn u64(name: &'static str, offset: usize) -> Self {
        Self::packed(name, offset, 8, 0, 64)
    }

    pub const fn packed(
        name: &'static str,
        offset: usize,
        width: usize,
        shift: u32,
        bits: u32,
    ) -> Self {
        Self {
            name,
            offset,
            width,
            shift,
            bits,
        }
    }

    /// The same field, `base` bytes further into the buffer.
    pub const fn at(self, base: usize) -> Self {
        Self {
            offset: self.offset + base,
            ..self
        }
    }

    pub const fn mask(&self) -> u64 {
        bits::mask(self.bits)
    }

    /// First bit of the value, counted from the start of the buffer.
    pub const fn bit_start(&self) -> usize {
        self.offset * 8 + self.shift as usize
    }

    pub fn read(&self, buf: &[u8]) -> u64 {
        (bits::read_le(buf, self.offset, self.width) >> self.shift) & self.mask()
    }

    pub fn read_signed(&self, buf: &[u8]) -> i64 {
        bits::sign_extend(self.read(buf), self.bits)
    }

    /// Store `value`, leaving every other bit of the word untouched.
    pub fn write(&self, buf: &mut [u8], value: u64) -> Result<(), LayoutError> {
        if value & !self.mask() != 0 {
            return Err(self.overflow(value as i64));
        }
        self.store(buf, value);
        Ok(())
    }

    pub fn write_signed(&self, buf: &mut [u8], value: i64) -> Result<(), LayoutError> {
        let (min, max) = bits::signed_range(self.bits);
        if value < min || value > max {
            return Err(self.overflow(value));
        }
        self.store(buf, value as u64 & self.mask());
        Ok(())
    }

    fn store(&self, buf: &mut [u8], value: u64) {
        let word = bits::read_le(buf, self.offset, self.width);
        let cleared = word & !(self.mask() << self.shift);
        bits::write_le(buf, self.offset, self.width, cleared | (value << self.shift));
    }

    fn overflow(&self, value: i64) -> LayoutError {
        LayoutError::FieldOverflow {
            field: self.name.to_string(),
            value,
            bits: self.bits,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatsLayout {
    pub size: usize,
    pub hp: Field,
    pub atk: Field,
    pub def: Field,
    pub spe: Field,
    pub spc: Field,
}

impl StatsLayout {
    pub const fn fields(&self) -> [Field; 5] {
        [self.hp, self.atk, self.def, self.spe, self.spc]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MoveSlotLayout {
    pub size: usize,
    pub id: Field,
    pub pp: Field,
}

/// A team member's stored form.
#[derive(Debug, Clone, Copy)]
pub struct PokemonLayout {
    pub size: usize,
    pub stats: usize,
    pub moves: usize,
    pub hp: Field,
    pub status: Field,
    pub species: Field,
    pub type1: Field,
    pub type2: Field,
    pub level: Field,
}

#[derive(Debug, Clone, Copy)]
pub struct BoostsLayout {
    pub atk: Field,
    pub def: Field,
    pub spe: Field,
    pub spc: Field,
    pub accuracy: Field,
    pub evasion: Field,
}

impl BoostsLayout {
    pub const fn fields(&self) -> [Field; 6] {
        [
            self.atk,
            self.def,
            self.spe,
            self.spc,
            self.accuracy,
            self.evasion,
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VolatilesLayout {
    pub flags: Field,
    pub confusion: Field,
    pub attacks: Field,
    pub state: Field,
    pub substitute: Field,
    pub transform: Field,
    pub disable_duration: Field,
    pub disable_move: Field,
    pub toxic: Field,
}

impl VolatilesLayout {
    pub const fn fields(&self) -> [Field; 9] {
        [
            self.flags,
            self.confusion,
            self.attacks,
            self.state,
            self.substitute,
            self.transform,
            self.disable_duration,
            self.disable_move,
            self.toxic,
        ]
    }
}

/// The creature currently on the field.
#[derive(Debug, Clone, Copy)]
pub struct ActiveLayout {
    pub size: usize,
    pub stats: usize,
    pub moves: usize,
    pub species: Field,
    pub type1: Field,
    pub type2: Field,
    pub boosts: BoostsLayout,
    pub volatiles: VolatilesLayout,
}

#[derive(Debug, Clone, Copy)]
pub struct SideLayout {
    pub size: usize,
    pub pokemon: usize,
    pub active: usize,
    /// First entry of the team order array; entry `i` is at `order.at(i)`.
    pub order: Field,
    pub last_selected_move: Field,
    pub last_used_move: Field,
}

#[derive(Debug, Clone, Copy)]
pub struct BattleLayout {
    pub size: usize,
    pub sides: [usize; 2],
    pub turn: Field,
    pub last_damage: Field,
    pub last_move_p1: Field,
    pub last_move_p2: Field,
    pub rng: Field,
}

/// Byte range owned by the engine, carried through the codec verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchRange {
    pub offset: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub team: usize,
    pub moves: usize,
    pub choices: usize,
    /// Protocol log bytes one step may write.
    pub logs: usize,
}

/// Everything the codec needs to know about one generation's buffer.
#[derive(Debug, Clone, Copy)]
pub struct LayoutTable {
    pub generation: Generation,
    pub battle: BattleLayout,
    pub side: SideLayout,
    pub pokemon: PokemonLayout,
    pub active: ActiveLayout,
    pub stats: StatsLayout,
    pub move_slot: MoveSlotLayout,
    pub capacity: Capacity,
    /// Number of valid type ids (`0..type_count`).
    pub type_count: u8,
    /// Absolute scratch ranges, in buffer order.
    pub scratch: &'static [ScratchRange],
}

/// A field placed at its absolute position, with a readable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub path: String,
    pub field: Field,
}

impl LayoutTable {
    pub const fn buffer_len(&self) -> usize {
        self.battle.size
    }

    pub fn scratch_len(&self) -> usize {
        self.scratch.iter().map(|r| r.len).sum()
    }

    pub const fn side_base(&self, side: usize) -> usize {
        self.battle.sides[side]
    }

    pub const fn pokemon_base(&self, side: usize, slot: usize) -> usize {
        self.side_base(side) + self.side.pokemon + slot * self.pokemon.size
    }

    pub const fn active_base(&self, side: usize) -> usize {
        self.side_base(side) + self.side.active
    }

    /// Absolute offset of move slot `index` in a struct whose move array
    /// starts at `moves`.
    pub const fn move_base(&self, moves: usize, index: usize) -> usize {
        moves + index * self.move_slot.size
    }

    /// Every field of the buffer at its absolute position.
    pub fn fields(&self) -> Vec<FieldEntry> {
        let mut out = Vec::new();
        let mut push = |path: String, field: Field, base: usize| {
            out.push(FieldEntry {
                path,
                field: field.at(base),
            })
        };

        for (s, name) in ["p1", "p2"].into_iter().enumerate() {
            let side = self.side_base(s);
            for slot in 0..self.capacity.team {
                let base = self.pokemon_base(s, slot);
                let path = format!("{name}.pokemon[{slot}]");
                for f in self.stats.fields() {
                    push(format!("{path}.stats.{}", f.name), f, base + self.pokemon.stats);
                }
                for m in 0..self.capacity.moves {
                    let mb = self.move_base(base + self.pokemon.moves, m);
                    push(format!("{path}.moves[{m}].id"), self.move_slot.id, mb);
                    push(format!("{path}.moves[{m}].pp"), self.move_slot.pp, mb);
                }
                let p = &self.pokemon;
                for f in [p.hp, p.status, p.species, p.type1, p.type2, p.level] {
                    push(format!("{path}.{}", f.name), f, base);
                }
            }

            let base = self.active_base(s);
            let a = &self.active;
            for f in self.stats.fields() {
                push(format!("{name}.active.stats.{}", f.name), f, base + a.stats);
            }
            for f in [a.species, a.type1, a.type2] {
                push(format!("{name}.active.{}", f.name), f, base);
            }
            for f in a.boosts.fields() {
                push(format!("{name}.active.boosts.{}", f.name), f, base);
            }
            for f in a.volatiles.fields() {
                push(format!("{name}.active.volatiles.{}", f.name), f, base);
            }
            for m in 0..self.capacity.moves {
                let mb = self.move_base(base + a.moves, m);
                push(format!("{name}.active.moves[{m}].id"), self.move_slot.id, mb);
                push(format!("{name}.active.moves[{m}].pp"), self.move_slot.pp, mb);
            }

            for i in 0..self.capacity.team {
                push(format!("{name}.order[{i}]"), self.side.order, side + i);
            }
            push(
                format!("{name}.last_selected_move"),
                self.side.last_selected_move,
                side,
            );
            push(format!("{name}.last_used_move"), self.side.last_used_move, side);
        }

        let b = &self.battle;
        for f in [b.turn, b.last_damage, b.last_move_p1, b.last_move_p2, b.rng] {
            push(f.name.to_string(), f, 0);
        }
        out
    }
}

/// Supported game generations.
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
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u8)]
#[non_exhaustive]
pub enum Generation {
    #[default]
    #[strum(serialize = "gen1")]
    One = 1,
}

impl Generation {
    pub fn layout(self) -> &'static LayoutTable {
        match self {
            Generation::One => &GEN1,
        }
    }

    pub fn buffer_len(self) -> usize {
        self.layout().buffer_len()
    }

    pub fn logs_len(self) -> usize {
        self.layout().capacity.logs
    }
}
