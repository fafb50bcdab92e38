use crate::choice::Player;
use crate::error::LogError;
use crate::model::Pokemon;

use super::{ArgType, Ident};

/// Appends binary protocol messages to a log buffer.
///
/// The buffer is zeroed up front and one byte is always kept free, so the
/// written log stays zero-terminated. A disabled writer accepts and drops
/// everything.
pub struct LogWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
    enabled: bool,
}

impl<'a> LogWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        buf.fill(0);
        Self {
            buf,
            len: 0,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            buf: &mut [],
            len: 0,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Bytes written so far, without the terminator.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn push(&mut self, bytes: &[u8]) -> Result<(), LogError> {
        if !self.enabled {
            return Ok(());
        }
        let end = self.len + bytes.len();
        if end >= self.buf.len() {
            return Err(LogError::Overflow {
                capacity: self.buf.len(),
            });
        }
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    pub fn used_move(&mut self, source: Ident, id: u8, target: Ident) -> Result<(), LogError> {
        self.push(&[
            ArgType::Move as u8,
            source.to_byte(),
            id,
            target.to_byte(),
            0,
        ])
    }

    pub fn switch(&mut self, ident: Ident, pokemon: &Pokemon) -> Result<(), LogError> {
        let [hp_lo, hp_hi] = pokemon.hp.to_le_bytes();
        let [max_lo, max_hi] = pokemon.max_hp().to_le_bytes();
        self.push(&[
            ArgType::Switch as u8,
            ident.to_byte(),
            pokemon.species,
            pokemon.level,
            hp_lo,
            hp_hi,
            max_lo,
            max_hi,
            pokemon.status.bits(),
        ])
    }

    /// Plain damage, no reason attached.
    pub fn damage(&mut self, ident: Ident, pokemon: &Pokemon) -> Result<(), LogError> {
        let [hp_lo, hp_hi] = pokemon.hp.to_le_bytes();
        let [max_lo, max_hi] = pokemon.max_hp().to_le_bytes();
        self.push(&[
            ArgType::Damage as u8,
            ident.to_byte(),
            hp_lo,
            hp_hi,
            max_lo,
            max_hi,
            pokemon.status.bits(),
            0,
        ])
    }

    pub fn faint(&mut self, ident: Ident) -> Result<(), LogError> {
        self.push(&[ArgType::Faint as u8, ident.to_byte()])
    }

    pub fn turn(&mut self, turn: u16) -> Result<(), LogError> {
        let [lo, hi] = turn.to_le_bytes();
        self.push(&[ArgType::Turn as u8, lo, hi])
    }

    pub fn win(&mut self, winner: Player) -> Result<(), LogError> {
        self.push(&[ArgType::Win as u8, winner as u8])
    }

    pub fn tie(&mut self) -> Result<(), LogError> {
        self.push(&[ArgType::Tie as u8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PokemonType, Stats, Types};
    use crate::protocol::{Slots, parse};

    #[test]
    fn test_written_log_parses() {
        let gengar = Pokemon::new(
            94,
            100,
            Stats::new(323, 228, 218, 318, 358),
            Types::dual(PokemonType::Ghost, PokemonType::Poison),
        );
        let p1 = Ident::new(Player::P1, 1);
        let p2 = Ident::new(Player::P2, 1);
        let mut buf = [0xFFu8; 64];
        let mut log = LogWriter::new(&mut buf);
        log.switch(p1, &gengar).unwrap();
        log.used_move(p1, 94, p2).unwrap();
        log.faint(p2).unwrap();
        log.win(Player::P1).unwrap();
        let len = log.written().len();
        assert_eq!(len, 9 + 5 + 2 + 2);

        let slots = Slots::new(vec!["Gengar".into()], vec!["Mew".into()]);
        assert_eq!(
            parse(&buf, &slots).unwrap(),
            [
                "|switch|p1a: Gengar|Gengar|323/323",
                "|move|p1a: Gengar|Psychic|p2a: Mew",
                "|faint|p2a: Mew",
                "|win|p1",
            ]
        );
        assert!(buf[len..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_full_buffer_overflows() {
        let mut buf = [0u8; 4];
        let mut log = LogWriter::new(&mut buf);
        log.turn(1).unwrap();
        assert_eq!(log.tie(), Err(LogError::Overflow { capacity: 4 }));
        assert_eq!(log.written(), &[7, 1, 0]);
    }

    #[test]
    fn test_disabled_writer_drops_everything() {
        let mut log = LogWriter::disabled();
        log.turn(3).unwrap();
        log.tie().unwrap();
        assert!(!log.is_enabled());
        assert!(log.written().is_empty());
    }
}
