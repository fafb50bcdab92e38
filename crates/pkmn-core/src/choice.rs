//! Choice and result bytes exchanged with the engine.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{Display, EnumIter, FromRepr};

use crate::error::{LayoutError, ProtocolMismatchError};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    FromRepr,
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u8)]
pub enum Player {
    #[strum(serialize = "p1")]
    P1 = 0,
    #[strum(serialize = "p2")]
    P2 = 1,
}

impl Player {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn foe(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }
}

/// What a choice does, and also what kind of choice a player is asked for.
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
    FromRepr,
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u8)]
pub enum ChoiceKind {
    #[default]
    #[strum(serialize = "pass")]
    Pass = 0,
    #[strum(serialize = "move")]
    Move = 1,
    #[strum(serialize = "switch")]
    Switch = 2,
}

/// One player's action for a step: kind in bits 0..2, data in bits 2..8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Choice {
    kind: ChoiceKind,
    data: u8,
}

impl Choice {
    pub const MAX_DATA: u8 = 63;
    pub const PASS: Choice = Choice {
        kind: ChoiceKind::Pass,
        data: 0,
    };
    /// Move choice with no slot, used when every move is out of PP.
    pub const STRUGGLE: Choice = Choice {
        kind: ChoiceKind::Move,
        data: 0,
    };

    pub fn new(kind: ChoiceKind, data: u8) -> Result<Self, LayoutError> {
        if data > Self::MAX_DATA {
            return Err(LayoutError::FieldOverflow {
                field: "choice.data".to_string(),
                value: data as i64,
                bits: 6,
            });
        }
        Ok(Self { kind, data })
    }

    /// Use the move in 1-based slot `slot` (0 lets the engine pick, e.g. Struggle).
    pub fn use_move(slot: u8) -> Result<Self, LayoutError> {
        Self::new(ChoiceKind::Move, slot)
    }

    /// Switch to the creature at 1-based battle position `position`.
    pub fn switch(position: u8) -> Result<Self, LayoutError> {
        Self::new(ChoiceKind::Switch, position)
    }

    pub const fn kind(&self) -> ChoiceKind {
        self.kind
    }

    pub const fn data(&self) -> u8 {
        self.data
    }

    pub const fn to_byte(self) -> u8 {
        (self.data << 2) | self.kind as u8
    }

    pub fn from_byte(byte: u8) -> Result<Self, ProtocolMismatchError> {
        let kind = ChoiceKind::from_repr(byte & 0b11).ok_or_else(|| {
            ProtocolMismatchError::new("choice.kind", (byte & 0b11) as u64, "unknown choice kind")
        })?;
        Ok(Self {
            kind,
            data: byte >> 2,
        })
    }
}

impl TryFrom<u8> for Choice {
    type Error = ProtocolMismatchError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Choice::from_byte(byte)
    }
}

impl From<Choice> for u8 {
    fn from(choice: Choice) -> Self {
        choice.to_byte()
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChoiceKind::Pass => f.write_str("pass"),
            kind => write!(f, "{kind} {}", self.data),
        }
    }
}

/// Result type in the low nibble of the engine's result byte.
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
    FromRepr,
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u8)]
pub enum ResultKind {
    #[default]
    None = 0,
    Win = 1,
    Lose = 2,
    Tie = 3,
    Error = 4,
}

/// How a battle stands after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    #[default]
    Ongoing,
    P1Win,
    P2Win,
    Tie,
    Error,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl From<ResultKind> for Outcome {
    fn from(kind: ResultKind) -> Self {
        match kind {
            ResultKind::None => Outcome::Ongoing,
            ResultKind::Win => Outcome::P1Win,
            ResultKind::Lose => Outcome::P2Win,
            ResultKind::Tie => Outcome::Tie,
            ResultKind::Error => Outcome::Error,
        }
    }
}

/// Decoded result byte: outcome plus the request each player must answer next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EngineResult {
    pub kind: ResultKind,
    pub p1: ChoiceKind,
    pub p2: ChoiceKind,
}

impl EngineResult {
    pub fn from_byte(byte: u8) -> Result<Self, ProtocolMismatchError> {
        let kind = ResultKind::from_repr(byte & 0x0F).ok_or_else(|| {
            ProtocolMismatchError::new("result.type", (byte & 0x0F) as u64, "unknown result type")
        })?;
        let request = |field: &'static str, bits: u8| {
            ChoiceKind::from_repr(bits).ok_or_else(|| {
                ProtocolMismatchError::new(field, bits as u64, "unknown request kind")
            })
        };
        Ok(Self {
            kind,
            p1: request("result.p1", (byte >> 4) & 0b11)?,
            p2: request("result.p2", byte >> 6)?,
        })
    }

    pub const fn to_byte(self) -> u8 {
        self.kind as u8 | (self.p1 as u8) << 4 | (self.p2 as u8) << 6
    }

    pub fn outcome(&self) -> Outcome {
        self.kind.into()
    }

    pub fn is_terminal(&self) -> bool {
        self.kind != ResultKind::None
    }

    /// What `player` must choose next.
    pub fn request(&self, player: Player) -> ChoiceKind {
        match player {
            Player::P1 => self.p1,
            Player::P2 => self.p2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_bytes() {
        assert_eq!(Choice::PASS.to_byte(), 0);
        assert_eq!(Choice::use_move(1).unwrap().to_byte(), 0b101);
        assert_eq!(Choice::switch(3).unwrap().to_byte(), 0b1110);
        assert_eq!(Choice::use_move(63).unwrap().to_byte(), 0xFD);
        assert!(Choice::use_move(64).is_err());

        let back = Choice::from_byte(0b1110).unwrap();
        assert_eq!(back.kind(), ChoiceKind::Switch);
        assert_eq!(back.data(), 3);
        assert!(Choice::from_byte(0b11).is_err());
    }

    #[test]
    fn test_result_bytes() {
        let r = EngineResult::from_byte(0b0110_0000).unwrap();
        assert_eq!(r.kind, ResultKind::None);
        assert_eq!(r.p1, ChoiceKind::Switch);
        assert_eq!(r.p2, ChoiceKind::Move);
        assert_eq!(r.to_byte(), 0b0110_0000);
        assert!(!r.is_terminal());

        let win = EngineResult::from_byte(1).unwrap();
        assert_eq!(win.outcome(), Outcome::P1Win);
        assert_eq!(EngineResult::from_byte(2).unwrap().outcome(), Outcome::P2Win);
        assert_eq!(EngineResult::from_byte(3).unwrap().outcome(), Outcome::Tie);
        assert_eq!(EngineResult::from_byte(4).unwrap().outcome(), Outcome::Error);
    }

    #[test]
    fn test_bad_result_bytes() {
        assert!(EngineResult::from_byte(5).is_err());
        assert!(EngineResult::from_byte(0b0011_0000).is_err());
        assert!(EngineResult::from_byte(0b1100_0000).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Choice::use_move(2).unwrap().to_string(), "move 2");
        assert_eq!(Choice::PASS.to_string(), "pass");
        assert_eq!(Player::P2.to_string(), "p2");
        assert_eq!(Outcome::P1Win.to_string(), "p1_win");
    }
}
