//! Single-field reads and writes on a raw buffer, without a full decode.
//!
//! `slot` is a party slot (0-based index into the side's creature array), not
//! a battle position.

use super::{BattleBuffer, check_len};
use crate::bits;
use crate::choice::Player;
use crate::error::{CodecError, LayoutError, ProtocolMismatchError};
use crate::layout::{Field, Generation, LayoutTable};
use crate::model::Status;

fn table(buf: &[u8], generation: Generation) -> Result<&'static LayoutTable, LayoutError> {
    check_len(buf, generation)?;
    Ok(generation.layout())
}

fn in_range(what: &'static str, index: usize, limit: usize) -> Result<(), LayoutError> {
    if index >= limit {
        return Err(LayoutError::SlotOutOfRange { what, index, limit });
    }
    Ok(())
}

fn pokemon_field(
    t: &LayoutTable,
    player: Player,
    slot: usize,
    pick: impl Fn(&LayoutTable) -> Field,
) -> Result<Field, LayoutError> {
    in_range("slot", slot, t.capacity.team)?;
    Ok(pick(t).at(t.pokemon_base(player.index(), slot)))
}

fn pp_field(t: &LayoutTable, player: Player, slot: usize, index: usize) -> Result<Field, LayoutError> {
    in_range("slot", slot, t.capacity.team)?;
    in_range("move", index, t.capacity.moves)?;
    let moves = t.pokemon_base(player.index(), slot) + t.pokemon.moves;
    Ok(t.move_slot.pp.at(t.move_base(moves, index)))
}

pub fn hp(buf: &[u8], generation: Generation, player: Player, slot: usize) -> Result<u16, LayoutError> {
    let t = table(buf, generation)?;
    Ok(pokemon_field(t, player, slot, |t| t.pokemon.hp)?.read(buf) as u16)
}

pub fn set_hp(
    buf: &mut [u8],
    generation: Generation,
    player: Player,
    slot: usize,
    hp: u16,
) -> Result<(), LayoutError> {
    let t = table(buf, generation)?;
    pokemon_field(t, player, slot, |t| t.pokemon.hp)?.write(buf, hp as u64)
}

pub fn status(
    buf: &[u8],
    generation: Generation,
    player: Player,
    slot: usize,
) -> Result<Status, CodecError> {
    let t = table(buf, generation)?;
    let field = pokemon_field(t, player, slot, |t| t.pokemon.status)?;
    let raw = field.read(buf) as u8;
    Status::from_bits(raw).map_err(|reason| {
        ProtocolMismatchError::new(format!("{player}.pokemon[{slot}].status"), raw as u64, reason)
            .into()
    })
}

pub fn set_status(
    buf: &mut [u8],
    generation: Generation,
    player: Player,
    slot: usize,
    status: Status,
) -> Result<(), LayoutError> {
    let t = table(buf, generation)?;
    pokemon_field(t, player, slot, |t| t.pokemon.status)?.write(buf, status.bits() as u64)
}

/// Remaining PP of move `index` (0-based) of the creature in `slot`.
pub fn pp(
    buf: &[u8],
    generation: Generation,
    player: Player,
    slot: usize,
    index: usize,
) -> Result<u8, LayoutError> {
    let t = table(buf, generation)?;
    Ok(pp_field(t, player, slot, index)?.read(buf) as u8)
}

pub fn set_pp(
    buf: &mut [u8],
    generation: Generation,
    player: Player,
    slot: usize,
    index: usize,
    pp: u8,
) -> Result<(), LayoutError> {
    let t = table(buf, generation)?;
    pp_field(t, player, slot, index)?.write(buf, pp as u64)
}

pub fn turn(buf: &[u8], generation: Generation) -> Result<u16, LayoutError> {
    Ok(table(buf, generation)?.battle.turn.read(buf) as u16)
}

pub fn set_turn(buf: &mut [u8], generation: Generation, turn: u16) -> Result<(), LayoutError> {
    table(buf, generation)?.battle.turn.write(buf, turn as u64)
}

pub fn last_damage(buf: &[u8], generation: Generation) -> Result<u16, LayoutError> {
    Ok(table(buf, generation)?.battle.last_damage.read(buf) as u16)
}

pub fn set_last_damage(
    buf: &mut [u8],
    generation: Generation,
    damage: u16,
) -> Result<(), LayoutError> {
    table(buf, generation)?
        .battle
        .last_damage
        .write(buf, damage as u64)
}

/// PSRNG state stored in the buffer.
pub fn rng(buf: &[u8], generation: Generation) -> Result<u64, LayoutError> {
    Ok(table(buf, generation)?.battle.rng.read(buf))
}

pub fn set_rng(buf: &mut [u8], generation: Generation, state: u64) -> Result<(), LayoutError> {
    table(buf, generation)?.battle.rng.write(buf, state)
}

impl BattleBuffer {
    pub fn hp(&self, player: Player, slot: usize) -> Result<u16, LayoutError> {
        hp(self.as_bytes(), self.generation(), player, slot)
    }

    pub fn set_hp(&mut self, player: Player, slot: usize, value: u16) -> Result<(), LayoutError> {
        let generation = self.generation();
        set_hp(self.as_mut_bytes(), generation, player, slot, value)
    }

    pub fn status(&self, player: Player, slot: usize) -> Result<Status, CodecError> {
        status(self.as_bytes(), self.generation(), player, slot)
    }

    pub fn set_status(
        &mut self,
        player: Player,
        slot: usize,
        value: Status,
    ) -> Result<(), LayoutError> {
        let generation = self.generation();
        set_status(self.as_mut_bytes(), generation, player, slot, value)
    }

    pub fn pp(&self, player: Player, slot: usize, index: usize) -> Result<u8, LayoutError> {
        pp(self.as_bytes(), self.generation(), player, slot, index)
    }

    pub fn set_pp(
        &mut self,
        player: Player,
        slot: usize,
        index: usize,
        value: u8,
    ) -> Result<(), LayoutError> {
        let generation = self.generation();
        set_pp(self.as_mut_bytes(), generation, player, slot, index, value)
    }

    pub fn turn(&self) -> u16 {
        self.generation().layout().battle.turn.read(self.as_bytes()) as u16
    }

    pub fn set_turn(&mut self, value: u16) {
        let field = self.generation().layout().battle.turn;
        // the turn field is a whole u16 word
        bits::write_le(self.as_mut_bytes(), field.offset, field.width, value as u64);
    }

    pub fn last_damage(&self) -> u16 {
        self.generation()
            .layout()
            .battle
            .last_damage
            .read(self.as_bytes()) as u16
    }

    pub fn set_last_damage(&mut self, value: u16) {
        let field = self.generation().layout().battle.last_damage;
        bits::write_le(self.as_mut_bytes(), field.offset, field.width, value as u64);
    }

    pub fn rng(&self) -> u64 {
        self.generation().layout().battle.rng.read(self.as_bytes())
    }
}
