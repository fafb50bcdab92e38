//! libpkmn's binary protocol log.
//!
//! With logging enabled the engine writes one message per event into a
//! caller-supplied buffer: a type byte followed by fixed arguments, some of
//! which pull in one extra byte depending on the reason. A zero type byte (or
//! the end of the buffer) ends the log. [`parse`] turns a log into Showdown
//! protocol lines; [`LogWriter`] produces logs for engines written in Rust.
//!
//! The output follows Showdown closely but is not guaranteed identical.

use strum::{FromRepr, IntoStaticStr};

use crate::choice::Player;
use crate::data;
use crate::error::LogError;
use crate::model::{BattleState, PokemonType};

mod writer;

pub use writer::LogWriter;

/// Message type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ArgType {
    None = 0,
    LastStill = 1,
    LastMiss = 2,
    Move = 3,
    Switch = 4,
    Cant = 5,
    Faint = 6,
    Turn = 7,
    Win = 8,
    Tie = 9,
    Damage = 10,
    Heal = 11,
    Status = 12,
    CureStatus = 13,
    Boost = 14,
    ClearAllBoost = 15,
    Fail = 16,
    Miss = 17,
    HitCount = 18,
    Prepare = 19,
    MustRecharge = 20,
    Activate = 21,
    FieldActivate = 22,
    Start = 23,
    End = 24,
    Ohko = 25,
    Crit = 26,
    SuperEffective = 27,
    Resisted = 28,
    Immune = 29,
    Transform = 30,
}

impl ArgType {
    fn name(self) -> &'static str {
        self.into()
    }
}

const MOVE_REASONS: &[&str] = &["", "|[from] "];
const MOVE_FROM: u8 = 1;

const CANT_REASONS: &[&str] = &[
    "|slp",
    "|frz",
    "|par",
    "|partiallytrapped",
    "|flinch",
    "|Disable|",
    "|recharge",
    "|nopp",
];
const CANT_DISABLE: u8 = 5;

const DAMAGE_REASONS: &[&str] = &[
    "",
    "|[from] psn",
    "|[from] brn",
    "|[from] confusion",
    "|[from] Leech Seed",
    "|[from] Recoil|[of] ",
];
const DAMAGE_RECOIL: u8 = 5;

const HEAL_REASONS: &[&str] = &["", "|[silent]", "|[from] drain|[of] "];
const HEAL_DRAIN: u8 = 2;

const STATUS_REASONS: &[&str] = &["", "|[silent]", "|[from] "];
const STATUS_FROM: u8 = 2;

const CURESTATUS_REASONS: &[&str] = &["|[msg]", "|[silent]"];

const FAIL_REASONS: &[&str] = &[
    "",
    "|slp",
    "|psn",
    "|brn",
    "|frz",
    "|par",
    "|tox",
    "|move: Substitute",
    "|move: Substitute|[weak]",
];

const ACTIVATE_REASONS: &[&str] = &[
    "|Bide",
    "|confusion",
    "|move: Haze",
    "|move: Mist",
    "|move: Struggle",
    "|Substitute|[damage]",
    "|move: Splash",
];
const ACTIVATE_MIST: u8 = 3;
const ACTIVATE_SPLASH: u8 = 6;

const BOOST_REASONS: &[&str] = &[
    "|atk|[from] Rage",
    "|atk",
    "|def",
    "|spe",
    "|spa",
    "|spd",
    "|accuracy",
    "|evasion",
];

const START_REASONS: &[&str] = &[
    "|Bide",
    "|confusion",
    "|confusion|[silent]",
    "|move: Focus Energy",
    "|move: Leech Seed",
    "|Light Screen",
    "|Mist",
    "|Reflect",
    "|Substitute",
    "",
    "|Disable|",
    "|Mimic|move: ",
];
const START_TYPECHANGE: u8 = 9;
const START_WITH_MOVE: u8 = 10;

const END_REASONS: &[&str] = &[
    "|Disable",
    "|confusion",
    "|move: Bide",
    "|Substitute",
    "|Disable|[silent]",
    "|confusion|[silent]",
    "|Mist|[silent]",
    "|move: Focus Energy|[silent]",
    "|move: Leech Seed|[silent]",
    "|Toxic counter|[silent]",
    "|Light Screen|[silent]",
    "|Reflect|[silent]",
];

const IMMUNE_REASONS: &[&str] = &["", "|[ohko]"];

/// A creature reference: side, party slot (1-based) and field position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident {
    pub player: Player,
    pub slot: u8,
    /// Second field position; never set in singles.
    pub b: bool,
}

impl Ident {
    pub const fn new(player: Player, slot: u8) -> Self {
        Self {
            player,
            slot,
            b: false,
        }
    }

    pub const fn from_byte(byte: u8) -> Self {
        let player = if (byte >> 3) & 1 == 1 {
            Player::P2
        } else {
            Player::P1
        };
        Self {
            player,
            slot: byte & 0x07,
            b: (byte >> 4) & 1 == 1,
        }
    }

    pub const fn to_byte(self) -> u8 {
        ((self.b as u8) << 4) | ((self.player as u8) << 3) | (self.slot & 0x07)
    }
}

/// Display names for each side's party slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slots {
    names: [Vec<String>; 2],
}

impl Default for Slots {
    /// `Pokémon #1` through `Pokémon #6` on both sides.
    fn default() -> Self {
        let side = || (1..=6).map(|n| format!("Pokémon #{n}")).collect::<Vec<_>>();
        Self {
            names: [side(), side()],
        }
    }
}

impl Slots {
    pub fn new(p1: Vec<String>, p2: Vec<String>) -> Self {
        Self { names: [p1, p2] }
    }

    /// Species names of each party, by slot.
    pub fn from_state(state: &BattleState) -> Self {
        let side = |player: Player| {
            state
                .side(player)
                .team
                .iter()
                .enumerate()
                .map(|(i, p)| match data::species_name(p.species) {
                    Some(name) => name.to_string(),
                    None => format!("Pokémon #{}", i + 1),
                })
                .collect()
        };
        Self::new(side(Player::P1), side(Player::P2))
    }

    pub fn name(&self, ident: Ident) -> Result<&str, LogError> {
        (ident.slot as usize)
            .checked_sub(1)
            .and_then(|i| self.names[ident.player.index()].get(i))
            .map(String::as_str)
            .ok_or(LogError::UnknownSlot {
                player: ident.player,
                slot: ident.slot,
            })
    }

    /// `p1a: Name` as Showdown writes it.
    pub fn label(&self, ident: Ident) -> Result<String, LogError> {
        let position = if ident.b { 'b' } else { 'a' };
        Ok(format!("{}{position}: {}", ident.player, self.name(ident)?))
    }
}

/// Showdown's short name for a raw status byte.
pub fn status_name(raw: u8) -> &'static str {
    if raw & 0b111 != 0 {
        "slp"
    } else if raw & 0x80 != 0 {
        "tox"
    } else if raw & 0x40 != 0 {
        "par"
    } else if raw & 0x20 != 0 {
        "frz"
    } else if raw & 0x10 != 0 {
        "brn"
    } else if raw & 0x08 != 0 {
        "psn"
    } else {
        ""
    }
}

fn health(hp: u16, max: u16, status: u8) -> String {
    if hp == 0 {
        return "0 fnt".to_string();
    }
    match status_name(status) {
        "" => format!("{hp}/{max}"),
        s => format!("{hp}/{max} {s}"),
    }
}

struct Reader<'a> {
    log: &'a [u8],
    pos: usize,
    slots: &'a Slots,
    message: ArgType,
}

impl Reader<'_> {
    fn byte(&mut self) -> Result<u8, LogError> {
        let byte = self.log.get(self.pos).copied().ok_or(LogError::Truncated {
            message: self.message.name(),
            offset: self.pos,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    fn u16(&mut self) -> Result<u16, LogError> {
        let lo = self.byte()?;
        let hi = self.byte()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn ident(&mut self) -> Result<String, LogError> {
        let byte = self.byte()?;
        self.slots.label(Ident::from_byte(byte))
    }

    fn move_name(&mut self) -> Result<&'static str, LogError> {
        let id = self.byte()?;
        data::move_name(id).ok_or(LogError::UnknownId { what: "move", id })
    }

    fn species_name(&mut self) -> Result<&'static str, LogError> {
        let id = self.byte()?;
        data::species_name(id).ok_or(LogError::UnknownId { what: "species", id })
    }

    fn health(&mut self) -> Result<String, LogError> {
        let hp = self.u16()?;
        let max = self.u16()?;
        let status = self.byte()?;
        Ok(health(hp, max, status))
    }

    fn reason(&mut self, table: &[&'static str]) -> Result<(u8, &'static str), LogError> {
        let reason = self.byte()?;
        let text = table
            .get(reason as usize)
            .copied()
            .ok_or(LogError::UnknownReason {
                message: self.message.name(),
                reason,
            })?;
        Ok((reason, text))
    }

    /// One message whose type byte was already consumed. `None` means an
    /// earlier line was amended instead.
    fn read_message(&mut self, lines: &mut [String]) -> Result<Option<String>, LogError> {
        let message = self.message;
        let line = match message {
            ArgType::None => return Ok(None),
            ArgType::LastStill | ArgType::LastMiss => {
                self.amend_last_move(lines)?;
                return Ok(None);
            }
            ArgType::Move => {
                let source = self.ident()?;
                let name = self.move_name()?;
                let target = self.ident()?;
                let (reason, text) = self.reason(MOVE_REASONS)?;
                let mut line = format!("|move|{source}|{name}|{target}{text}");
                if reason == MOVE_FROM {
                    line.push_str(self.move_name()?);
                }
                line
            }
            ArgType::Switch => {
                let ident = self.ident()?;
                let species = self.species_name()?;
                let level = self.byte()?;
                let health = self.health()?;
                if level == 100 {
                    format!("|switch|{ident}|{species}|{health}")
                } else {
                    format!("|switch|{ident}|{species}, L{level}|{health}")
                }
            }
            ArgType::Cant => {
                let ident = self.ident()?;
                let (reason, text) = self.reason(CANT_REASONS)?;
                let mut line = format!("|cant|{ident}{text}");
                if reason == CANT_DISABLE {
                    line.push_str(self.move_name()?);
                }
                line
            }
            ArgType::Faint => format!("|faint|{}", self.ident()?),
            ArgType::Turn => format!("|turn|{}", self.u16()?),
            ArgType::Win => format!("|win|p{}", u16::from(self.byte()?) + 1),
            ArgType::Tie => "|tie".to_string(),
            ArgType::Damage | ArgType::Heal => {
                let (kind, table, extra) = if message == ArgType::Damage {
                    ("-damage", DAMAGE_REASONS, DAMAGE_RECOIL)
                } else {
                    ("-heal", HEAL_REASONS, HEAL_DRAIN)
                };
                let ident = self.ident()?;
                let health = self.health()?;
                let (reason, text) = self.reason(table)?;
                let mut line = format!("|{kind}|{ident}|{health}{text}");
                if reason == extra {
                    line.push_str(&self.ident()?);
                }
                line
            }
            ArgType::Status => {
                let ident = self.ident()?;
                let status = status_name(self.byte()?);
                let (reason, text) = self.reason(STATUS_REASONS)?;
                let mut line = format!("|-status|{ident}|{status}{text}");
                if reason == STATUS_FROM {
                    line.push_str("move: ");
                    line.push_str(self.move_name()?);
                }
                line
            }
            ArgType::CureStatus => {
                let ident = self.ident()?;
                let status = status_name(self.byte()?);
                let (_, text) = self.reason(CURESTATUS_REASONS)?;
                format!("|-curestatus|{ident}|{status}{text}")
            }
            ArgType::Boost => {
                let ident = self.ident()?;
                let (_, text) = self.reason(BOOST_REASONS)?;
                let amount = i16::from(self.byte()?) - 6;
                let kind = if amount > 0 { "boost" } else { "unboost" };
                format!("|-{kind}|{ident}{text}|{}", amount.abs())
            }
            ArgType::ClearAllBoost => "|-clearallboost|[silent]".to_string(),
            ArgType::Fail => {
                let ident = self.ident()?;
                let (_, text) = self.reason(FAIL_REASONS)?;
                format!("|-fail|{ident}{text}")
            }
            ArgType::Miss => format!("|-miss|{}", self.ident()?),
            ArgType::HitCount => {
                let ident = self.ident()?;
                format!("|-hitcount|{ident}|{}", self.byte()?)
            }
            ArgType::Prepare => {
                let ident = self.ident()?;
                format!("|-prepare|{ident}|{}", self.move_name()?)
            }
            ArgType::MustRecharge => format!("|-mustrecharge|{}", self.ident()?),
            ArgType::Activate => {
                let raw = self.byte()?;
                let (reason, text) = self.reason(ACTIVATE_REASONS)?;
                let ident = if reason == ACTIVATE_SPLASH {
                    String::new()
                } else {
                    self.slots.label(Ident::from_byte(raw))?
                };
                let kind = if reason == ACTIVATE_MIST {
                    "block"
                } else {
                    "activate"
                };
                format!("|-{kind}|{ident}{text}")
            }
            ArgType::FieldActivate => "|-fieldactivate|move: Pay Day".to_string(),
            ArgType::Start => {
                let ident = self.ident()?;
                let (reason, text) = self.reason(START_REASONS)?;
                let mut line = format!("|-start|{ident}{text}");
                if reason == START_TYPECHANGE {
                    let types = self.byte()?;
                    let type1 = type_name(types & 0x0F)?;
                    let type2 = type_name(types >> 4)?;
                    let source = self.ident()?;
                    line.push_str("|typechange|");
                    line.push_str(type1);
                    if type1 != type2 {
                        line.push('/');
                        line.push_str(type2);
                    }
                    line.push_str("|[from] move: Conversion|[of] ");
                    line.push_str(&source);
                } else if reason >= START_WITH_MOVE {
                    line.push_str(self.move_name()?);
                }
                line
            }
            ArgType::End => {
                let ident = self.ident()?;
                let (_, text) = self.reason(END_REASONS)?;
                format!("|-end|{ident}{text}")
            }
            ArgType::Ohko => "|-ohko".to_string(),
            ArgType::Crit => format!("|-crit|{}", self.ident()?),
            ArgType::SuperEffective => format!("|-supereffective|{}", self.ident()?),
            ArgType::Resisted => format!("|-resisted|{}", self.ident()?),
            ArgType::Immune => {
                let ident = self.ident()?;
                let (_, text) = self.reason(IMMUNE_REASONS)?;
                format!("|-immune|{ident}{text}")
            }
            ArgType::Transform => {
                let ident = self.ident()?;
                format!("|-transform|{ident}|{}", self.ident()?)
            }
        };
        Ok(Some(line))
    }

    /// `LastStill` drops the target of the latest move line; `LastMiss`
    /// flags it as a miss.
    fn amend_last_move(&self, lines: &mut [String]) -> Result<(), LogError> {
        let line = lines
            .iter_mut()
            .rev()
            .find(|l| l.starts_with("|move|"))
            .ok_or(LogError::NoMoveToAmend {
                message: self.message.name(),
            })?;
        if self.message == ArgType::LastMiss {
            line.push_str("|[miss]");
            return Ok(());
        }
        if let Some(cut) = line.rfind('|') {
            let tail = line[cut + 1..].as_bytes();
            let is_target = tail.len() >= 4
                && tail[0] == b'p'
                && tail[1].is_ascii_digit()
                && matches!(tail[2], b'a' | b'b')
                && tail[3] == b':';
            if is_target {
                line.truncate(cut);
                line.push_str("|[still]");
            }
        }
        Ok(())
    }
}

fn type_name(id: u8) -> Result<&'static str, LogError> {
    PokemonType::from_repr(id)
        .map(<&'static str>::from)
        .ok_or(LogError::UnknownId { what: "type", id })
}

/// Convert a binary log into Showdown protocol lines.
pub fn parse(log: &[u8], slots: &Slots) -> Result<Vec<String>, LogError> {
    let mut lines = Vec::new();
    let mut reader = Reader {
        log,
        pos: 0,
        slots,
        message: ArgType::None,
    };
    while reader.pos < log.len() {
        let offset = reader.pos;
        let byte = log[offset];
        reader.pos += 1;
        reader.message = ArgType::from_repr(byte).ok_or(LogError::UnknownMessage { byte, offset })?;
        if reader.message == ArgType::None {
            break;
        }
        if let Some(line) = reader.read_message(&mut lines)? {
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(log: &[u8]) -> Result<Vec<String>, LogError> {
        parse(log, &Slots::default())
    }

    #[test]
    fn test_move() {
        assert_eq!(
            parse_default(&[3, 1, 94, 9, 0]).unwrap(),
            ["|move|p1a: Pokémon #1|Psychic|p2a: Pokémon #1"]
        );
    }

    #[test]
    fn test_supereffective() {
        assert_eq!(
            parse_default(&[27, 9]).unwrap(),
            ["|-supereffective|p2a: Pokémon #1"]
        );
    }

    #[test]
    fn test_damage_to_zero_is_a_faint_marker() {
        assert_eq!(
            parse_default(&[10, 9, 0, 0, 250, 2, 0, 0]).unwrap(),
            ["|-damage|p2a: Pokémon #1|0 fnt"]
        );
    }

    #[test]
    fn test_faint_and_win() {
        assert_eq!(
            parse_default(&[6, 9, 8, 0]).unwrap(),
            ["|faint|p2a: Pokémon #1", "|win|p1"]
        );
    }

    #[test]
    fn test_switch_shows_level_and_status() {
        // slot 2 of p2, Gengar, L50, 100/120 paralyzed
        let log = [4, 0b1010, 94, 50, 100, 0, 120, 0, 0x40];
        let slots = Slots::new(vec![], vec!["Alpha".into(), "Gengar".into()]);
        assert_eq!(
            parse(&log, &slots).unwrap(),
            ["|switch|p2a: Gengar|Gengar, L50|100/120 par"]
        );
        let log = [4, 1, 25, 100, 35, 1, 35, 1, 0];
        assert_eq!(
            parse_default(&log).unwrap(),
            ["|switch|p1a: Pokémon #1|Pikachu|291/291"]
        );
    }

    #[test]
    fn test_reasons_pull_in_extra_bytes() {
        let log = [
            10, 1, 10, 0, 100, 0, 0, 5, 9, // recoil of p2a
            11, 9, 50, 0, 100, 0, 0x10, 2, 1, // drained from p1a
            12, 1, 0x08, 2, 92, // poisoned by Toxic
            5, 9, 5, 94, // disabled Psychic
            7, 2, 1, // turn 258
        ];
        assert_eq!(
            parse_default(&log).unwrap(),
            [
                "|-damage|p1a: Pokémon #1|10/100|[from] Recoil|[of] p2a: Pokémon #1",
                "|-heal|p2a: Pokémon #1|50/100 brn|[from] drain|[of] p1a: Pokémon #1",
                "|-status|p1a: Pokémon #1|psn|[from] move: Toxic",
                "|cant|p2a: Pokémon #1|Disable|Psychic",
                "|turn|258",
            ]
        );
    }

    #[test]
    fn test_boosts_and_typechange() {
        let log = [
            14, 1, 1, 8, // +2 atk
            14, 9, 3, 5, // -1 spe
            23, 1, 9, 0x9B, 9, // Conversion: Electric/Water from p2a
            23, 9, 11, 94, // Mimic Psychic
        ];
        assert_eq!(
            parse_default(&log).unwrap(),
            [
                "|-boost|p1a: Pokémon #1|atk|2",
                "|-unboost|p2a: Pokémon #1|spe|1",
                "|-start|p1a: Pokémon #1|typechange|Electric/Water|[from] move: Conversion|[of] p2a: Pokémon #1",
                "|-start|p2a: Pokémon #1|Mimic|move: Psychic",
            ]
        );
    }

    #[test]
    fn test_activate_variants() {
        assert_eq!(
            parse_default(&[21, 1, 3, 21, 9, 6, 21, 1, 1]).unwrap(),
            [
                "|-block|p1a: Pokémon #1|move: Mist",
                "|-activate||move: Splash",
                "|-activate|p1a: Pokémon #1|confusion",
            ]
        );
    }

    #[test]
    fn test_last_still_and_miss_amend_the_move() {
        let log = [3, 1, 76, 9, 0, 1, 3, 9, 33, 1, 0, 2];
        assert_eq!(
            parse_default(&log).unwrap(),
            [
                "|move|p1a: Pokémon #1|Solar Beam|[still]",
                "|move|p2a: Pokémon #1|Tackle|p1a: Pokémon #1|[miss]",
            ]
        );
        assert_eq!(
            parse_default(&[2]),
            Err(LogError::NoMoveToAmend { message: "last_miss" })
        );
    }

    #[test]
    fn test_zero_byte_ends_the_log() {
        assert_eq!(parse_default(&[9, 0, 7, 1, 0]).unwrap(), ["|tie"]);
        assert!(parse_default(&[0; 16]).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_logs() {
        assert_eq!(
            parse_default(&[31]),
            Err(LogError::UnknownMessage { byte: 31, offset: 0 })
        );
        assert_eq!(
            parse_default(&[9, 10, 1, 0]),
            Err(LogError::Truncated { message: "damage", offset: 4 })
        );
        assert_eq!(
            parse_default(&[16, 1, 42]),
            Err(LogError::UnknownReason { message: "fail", reason: 42 })
        );
        assert_eq!(
            parse_default(&[19, 1, 200]),
            Err(LogError::UnknownId { what: "move", id: 200 })
        );
        assert_eq!(
            parse_default(&[26, 7]),
            Err(LogError::UnknownSlot { player: Player::P1, slot: 7 })
        );
    }

    #[test]
    fn test_ident_bits() {
        let ident = Ident::from_byte(0b1_1011);
        assert_eq!(ident.player, Player::P2);
        assert_eq!(ident.slot, 3);
        assert!(ident.b);
        assert_eq!(ident.to_byte(), 0b1_1011);
        assert_eq!(Ident::new(Player::P1, 1).to_byte(), 1);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(status_name(0), "");
        assert_eq!(status_name(3), "slp");
        assert_eq!(status_name(0x88), "tox");
        assert_eq!(status_name(0x40), "par");
        assert_eq!(status_name(0x20), "frz");
        assert_eq!(status_name(0x10), "brn");
        assert_eq!(status_name(0x08), "psn");
    }
}
