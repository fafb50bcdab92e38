//! Structured state <-> engine buffer.
//!
//! One algorithm for every generation: all offsets come from the
//! [`LayoutTable`]. Encoding and decoding are all-or-nothing; a failed encode
//! produces no buffer and a failed [`encode_into`] leaves the target
//! untouched.

use std::collections::HashSet;

use crate::error::{CodecError, LayoutError, ProtocolMismatchError};
use crate::layout::{Field, Generation, LayoutTable};
use crate::model::{
    ActivePokemon, BattleState, Boosts, MoveSlot, Pokemon, PokemonType, SideState, Stats, Status,
    Types, VolatileFlags, Volatiles,
};

pub mod access;
mod buffer;

pub use buffer::BattleBuffer;

const SIDE_NAMES: [&str; 2] = ["p1", "p2"];

/// Lay `state` out as a fresh buffer.
pub fn encode(state: &BattleState, generation: Generation) -> Result<BattleBuffer, LayoutError> {
    let table = generation.layout();
    let mut buffer = BattleBuffer::zeroed(generation);
    Encoder { t: table }.battle(buffer.as_mut_bytes(), state)?;
    Ok(buffer)
}

/// Encode over an existing byte slice of exactly the generation's length.
pub fn encode_into(
    state: &BattleState,
    bytes: &mut [u8],
    generation: Generation,
) -> Result<(), LayoutError> {
    check_len(bytes, generation)?;
    let buffer = encode(state, generation)?;
    bytes.copy_from_slice(buffer.as_bytes());
    Ok(())
}

/// Read a buffer back into structured form.
pub fn decode(bytes: &[u8], generation: Generation) -> Result<BattleState, CodecError> {
    check_len(bytes, generation)?;
    let state = Decoder {
        t: generation.layout(),
        buf: bytes,
    }
    .battle()?;
    tracing::debug!(turn = state.turn, %generation, "decoded battle");
    Ok(state)
}

pub(crate) fn check_len(bytes: &[u8], generation: Generation) -> Result<(), LayoutError> {
    let expected = generation.buffer_len();
    if bytes.len() != expected {
        return Err(LayoutError::BufferLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn with_path(err: LayoutError, path: &str) -> LayoutError {
    match err {
        LayoutError::FieldOverflow { field, value, bits } => LayoutError::FieldOverflow {
            field: format!("{path}.{field}"),
            value,
            bits,
        },
        other => other,
    }
}

struct Encoder<'t> {
    t: &'t LayoutTable,
}

impl Encoder<'_> {
    fn battle(&self, buf: &mut [u8], state: &BattleState) -> Result<(), LayoutError> {
        let b = &self.t.battle;
        for (s, side) in state.sides.iter().enumerate() {
            self.side(buf, s, side)?;
        }
        b.turn.write(buf, state.turn as u64)?;
        b.last_damage.write(buf, state.last_damage as u64)?;
        b.last_move_p1.write(buf, state.last_moves[0] as u64)?;
        b.last_move_p2.write(buf, state.last_moves[1] as u64)?;
        b.rng.write(buf, state.rng)?;
        self.scratch(buf, &state.scratch)
    }

    fn side(&self, buf: &mut [u8], s: usize, side: &SideState) -> Result<(), LayoutError> {
        let cap = self.t.capacity.team;
        if side.team.len() > cap {
            return Err(LayoutError::TooManyCreatures {
                side: s,
                count: side.team.len(),
                capacity: cap,
            });
        }
        validate_order(s, &side.order, side.team.len())?;

        for (slot, pokemon) in side.team.iter().enumerate() {
            let path = format!("{}.pokemon[{slot}]", SIDE_NAMES[s]);
            self.pokemon(buf, self.t.pokemon_base(s, slot), pokemon, &path)
                .map_err(|e| with_path(e, &path))?;
        }
        self.active(buf, self.t.active_base(s), &side.active)
            .map_err(|e| with_path(e, &format!("{}.active", SIDE_NAMES[s])))?;

        let base = self.t.side_base(s);
        let layout = &self.t.side;
        for (i, &o) in side.order.iter().enumerate() {
            layout.order.at(base + i).write(buf, o as u64)?;
        }
        layout
            .last_selected_move
            .at(base)
            .write(buf, side.last_selected_move as u64)?;
        layout
            .last_used_move
            .at(base)
            .write(buf, side.last_used_move as u64)
    }

    fn pokemon(
        &self,
        buf: &mut [u8],
        base: usize,
        p: &Pokemon,
        path: &str,
    ) -> Result<(), LayoutError> {
        let layout = &self.t.pokemon;
        let cap = self.t.capacity.moves;
        if p.moves.len() > cap {
            return Err(LayoutError::TooManyMoves {
                path: path.to_string(),
                count: p.moves.len(),
                capacity: cap,
            });
        }
        if let Some(i) = p.moves.iter().position(MoveSlot::is_empty) {
            return Err(LayoutError::EmptyMoveSlot {
                path: format!("{path}.moves[{i}]"),
            });
        }

        self.stats(buf, base + layout.stats, &p.stats)?;
        self.moves(buf, base + layout.moves, &p.moves)?;
        layout.hp.at(base).write(buf, p.hp as u64)?;
        layout.status.at(base).write(buf, p.status.bits() as u64)?;
        layout.species.at(base).write(buf, p.species as u64)?;
        self.types(buf, layout.type1.at(base), layout.type2.at(base), p.types)?;
        layout.level.at(base).write(buf, p.level as u64)
    }

    fn active(&self, buf: &mut [u8], base: usize, a: &ActivePokemon) -> Result<(), LayoutError> {
        let layout = &self.t.active;
        self.stats(buf, base + layout.stats, &a.stats)?;
        layout.species.at(base).write(buf, a.species as u64)?;
        self.types(buf, layout.type1.at(base), layout.type2.at(base), a.types)?;

        for (field, value) in layout.boosts.fields().into_iter().zip(a.boosts.values()) {
            if !(Boosts::MIN..=Boosts::MAX).contains(&value) {
                return Err(LayoutError::FieldOverflow {
                    field: format!("boosts.{}", field.name),
                    value: value as i64,
                    bits: field.bits,
                });
            }
            field.at(base).write_signed(buf, value as i64)?;
        }

        let v = &layout.volatiles;
        let vol = &a.volatiles;
        let values = [
            (v.flags, vol.flags.bits() as u64),
            (v.confusion, vol.confusion as u64),
            (v.attacks, vol.attacks as u64),
            (v.state, vol.state as u64),
            (v.substitute, vol.substitute as u64),
            (v.transform, vol.transform as u64),
            (v.disable_duration, vol.disable_duration as u64),
            (v.disable_move, vol.disable_move as u64),
            (v.toxic, vol.toxic as u64),
        ];
        for (field, value) in values {
            field
                .at(base)
                .write(buf, value)
                .map_err(|e| with_path(e, "volatiles"))?;
        }

        self.moves(buf, base + layout.moves, &a.moves)
    }

    fn stats(&self, buf: &mut [u8], base: usize, stats: &Stats) -> Result<(), LayoutError> {
        for (field, value) in self.t.stats.fields().into_iter().zip(stats.values()) {
            field.at(base).write(buf, value as u64)?;
        }
        Ok(())
    }

    fn moves(&self, buf: &mut [u8], base: usize, moves: &[MoveSlot]) -> Result<(), LayoutError> {
        let slot = &self.t.move_slot;
        for (i, m) in moves.iter().enumerate() {
            let at = self.t.move_base(base, i);
            slot.id.at(at).write(buf, m.id as u64)?;
            slot.pp.at(at).write(buf, m.pp as u64)?;
        }
        Ok(())
    }

    fn types(&self, buf: &mut [u8], f1: Field, f2: Field, types: Types) -> Result<(), LayoutError> {
        f1.write(buf, types.type1 as u64)?;
        f2.write(buf, types.type2 as u64)
    }

    fn scratch(&self, buf: &mut [u8], scratch: &[u8]) -> Result<(), LayoutError> {
        if scratch.is_empty() {
            return Ok(());
        }
        let expected = self.t.scratch_len();
        if scratch.len() != expected {
            return Err(LayoutError::ScratchLength {
                expected,
                actual: scratch.len(),
            });
        }
        let mut rest = scratch;
        for range in self.t.scratch {
            let (head, tail) = rest.split_at(range.len);
            buf[range.offset..range.offset + range.len].copy_from_slice(head);
            rest = tail;
        }
        Ok(())
    }
}

fn validate_order(side: usize, order: &[u8], team_len: usize) -> Result<(), LayoutError> {
    let invalid = |reason: String| LayoutError::InvalidOrder { side, reason };
    if order.len() != team_len {
        return Err(invalid(format!(
            "{} entries for {team_len} creatures",
            order.len()
        )));
    }
    let mut seen = HashSet::new();
    for &o in order {
        if o == 0 || o as usize > team_len {
            return Err(invalid(format!("entry {o} outside 1..={team_len}")));
        }
        if !seen.insert(o) {
            return Err(invalid(format!("entry {o} repeated")));
        }
    }
    Ok(())
}

struct Decoder<'a> {
    t: &'a LayoutTable,
    buf: &'a [u8],
}

impl Decoder<'_> {
    fn get(&self, field: Field, base: usize) -> u64 {
        field.at(base).read(self.buf)
    }

    fn battle(&self) -> Result<BattleState, ProtocolMismatchError> {
        let b = &self.t.battle;
        let sides = [self.side(0)?, self.side(1)?];
        let scratch: Vec<u8> = self
            .t
            .scratch
            .iter()
            .flat_map(|r| self.buf[r.offset..r.offset + r.len].iter().copied())
            .collect();
        Ok(BattleState {
            sides,
            turn: self.get(b.turn, 0) as u16,
            last_damage: self.get(b.last_damage, 0) as u16,
            last_moves: [
                self.get(b.last_move_p1, 0) as u8,
                self.get(b.last_move_p2, 0) as u8,
            ],
            rng: self.get(b.rng, 0),
            scratch: if scratch.iter().all(|&x| x == 0) {
                Vec::new()
            } else {
                scratch
            },
        })
    }

    fn side(&self, s: usize) -> Result<SideState, ProtocolMismatchError> {
        let name = SIDE_NAMES[s];
        let base = self.t.side_base(s);
        let layout = &self.t.side;
        let cap = self.t.capacity.team;

        let raw: Vec<u8> = (0..cap)
            .map(|i| self.get(layout.order, base + i) as u8)
            .collect();
        let team_len = raw.iter().take_while(|&&o| o != 0).count();
        let mut seen = HashSet::new();
        for (i, &o) in raw.iter().enumerate() {
            let path = format!("{name}.order[{i}]");
            if i >= team_len {
                if o != 0 {
                    return Err(ProtocolMismatchError::new(path, o as u64, "entry after an empty slot"));
                }
                continue;
            }
            if o as usize > team_len {
                return Err(ProtocolMismatchError::new(path, o as u64, "entry beyond team size"));
            }
            if !seen.insert(o) {
                return Err(ProtocolMismatchError::new(path, o as u64, "repeated entry"));
            }
        }

        let mut team = Vec::with_capacity(team_len);
        for slot in 0..cap {
            let pb = self.t.pokemon_base(s, slot);
            let path = format!("{name}.pokemon[{slot}]");
            if slot < team_len {
                team.push(self.pokemon(pb, &path)?);
            } else {
                let bytes = &self.buf[pb..pb + self.t.pokemon.size];
                if let Some(i) = bytes.iter().position(|&x| x != 0) {
                    return Err(ProtocolMismatchError::new(
                        path,
                        bytes[i] as u64,
                        "unused slot is not empty",
                    ));
                }
            }
        }

        Ok(SideState {
            team,
            active: self.active(self.t.active_base(s), &format!("{name}.active"))?,
            order: raw[..team_len].to_vec(),
            last_selected_move: self.get(layout.last_selected_move, base) as u8,
            last_used_move: self.get(layout.last_used_move, base) as u8,
        })
    }

    fn pokemon(&self, base: usize, path: &str) -> Result<Pokemon, ProtocolMismatchError> {
        let layout = &self.t.pokemon;
        let slots = self.move_slots(base + layout.moves);

        let known = slots.iter().take_while(|m| !m.is_empty()).count();
        if let Some(i) = slots[known..].iter().position(|m| *m != MoveSlot::EMPTY) {
            let m = slots[known + i];
            return Err(ProtocolMismatchError::new(
                format!("{path}.moves[{}]", known + i),
                ((m.id as u64) << 8) | m.pp as u64,
                "gap in move list",
            ));
        }

        let raw_status = self.get(layout.status, base) as u8;
        let status = Status::from_bits(raw_status).map_err(|reason| {
            ProtocolMismatchError::new(format!("{path}.status"), raw_status as u64, reason)
        })?;

        Ok(Pokemon {
            species: self.get(layout.species, base) as u8,
            level: self.get(layout.level, base) as u8,
            hp: self.get(layout.hp, base) as u16,
            status,
            stats: self.stats(base + layout.stats),
            types: self.types(layout.type1.at(base), layout.type2.at(base), path)?,
            moves: slots[..known].to_vec(),
        })
    }

    fn active(&self, base: usize, path: &str) -> Result<ActivePokemon, ProtocolMismatchError> {
        let layout = &self.t.active;

        let mut boosts = [0i8; 6];
        for (dst, field) in boosts.iter_mut().zip(layout.boosts.fields()) {
            let value = field.at(base).read_signed(self.buf);
            if !(Boosts::MIN as i64..=Boosts::MAX as i64).contains(&value) {
                return Err(ProtocolMismatchError::new(
                    format!("{path}.boosts.{}", field.name),
                    field.at(base).read(self.buf),
                    "boost outside -6..=6",
                ));
            }
            *dst = value as i8;
        }

        let v = &layout.volatiles;
        let disable_move = self.get(v.disable_move, base) as u8;
        if disable_move as usize > self.t.capacity.moves {
            return Err(ProtocolMismatchError::new(
                format!("{path}.volatiles.disable_move"),
                disable_move as u64,
                "disabled slot beyond move capacity",
            ));
        }
        let volatiles = Volatiles {
            flags: VolatileFlags::from_bits_retain(self.get(v.flags, base) as u32),
            confusion: self.get(v.confusion, base) as u8,
            attacks: self.get(v.attacks, base) as u8,
            state: self.get(v.state, base) as u16,
            substitute: self.get(v.substitute, base) as u8,
            transform: self.get(v.transform, base) as u8,
            disable_duration: self.get(v.disable_duration, base) as u8,
            disable_move,
            toxic: self.get(v.toxic, base) as u8,
        };

        let slots = self.move_slots(base + layout.moves);
        let mut moves = [MoveSlot::EMPTY; 4];
        for (dst, src) in moves.iter_mut().zip(slots) {
            *dst = src;
        }

        Ok(ActivePokemon {
            stats: self.stats(base + layout.stats),
            species: self.get(layout.species, base) as u8,
            types: self.types(layout.type1.at(base), layout.type2.at(base), path)?,
            boosts: Boosts::from_values(boosts),
            volatiles,
            moves,
        })
    }

    fn stats(&self, base: usize) -> Stats {
        let f = self.t.stats.fields();
        Stats::from_values(f.map(|field| self.get(field, base) as u16))
    }

    fn move_slots(&self, base: usize) -> Vec<MoveSlot> {
        let slot = &self.t.move_slot;
        (0..self.t.capacity.moves)
            .map(|i| {
                let at = self.t.move_base(base, i);
                MoveSlot::new(self.get(slot.id, at) as u8, self.get(slot.pp, at) as u8)
            })
            .collect()
    }

    fn types(&self, f1: Field, f2: Field, path: &str) -> Result<Types, ProtocolMismatchError> {
        let one = |field: Field| {
            let raw = field.read(self.buf) as u8;
            (raw < self.t.type_count)
                .then(|| PokemonType::from_repr(raw))
                .flatten()
                .ok_or_else(|| {
                    ProtocolMismatchError::new(
                        format!("{path}.{}", field.name),
                        raw as u64,
                        "unknown type id",
                    )
                })
        };
        Ok(Types::dual(one(f1)?, one(f2)?))
    }
}
