//! Major status byte.
//!
//! Bits 0..3 hold the remaining sleep turns; the upper bits are one-hot
//! flags. Sleep excludes every other condition, and at most one of
//! poison/burn/freeze/paralysis may be set. `EXT` marks a self-inflicted
//! sleep (Rest) and only appears together with sleep turns.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolMismatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Status(u8);

impl Status {
    pub const SLEEP_MASK: u8 = 0b111;
    pub const PSN: u8 = 1 << 3;
    pub const BRN: u8 = 1 << 4;
    pub const FRZ: u8 = 1 << 5;
    pub const PAR: u8 = 1 << 6;
    pub const EXT: u8 = 1 << 7;

    const MAJOR: u8 = Self::PSN | Self::BRN | Self::FRZ | Self::PAR;

    pub const HEALTHY: Status = Status(0);
    pub const POISONED: Status = Status(Self::PSN);
    pub const BURNED: Status = Status(Self::BRN);
    pub const FROZEN: Status = Status(Self::FRZ);
    pub const PARALYZED: Status = Status(Self::PAR);

    /// Asleep for `turns` (clamped to 1..=7).
    pub const fn sleep(turns: u8) -> Self {
        let turns = if turns == 0 {
            1
        } else if turns > 7 {
            7
        } else {
            turns
        };
        Status(turns)
    }

    /// Self-inflicted sleep, as from Rest.
    pub const fn rest(turns: u8) -> Self {
        Status(Self::sleep(turns).0 | Self::EXT)
    }

    /// Validate a raw status byte.
    pub fn from_bits(raw: u8) -> Result<Self, &'static str> {
        let sleep = raw & Self::SLEEP_MASK;
        let major = raw & Self::MAJOR;
        if sleep != 0 && major != 0 {
            return Err("sleep combined with another status");
        }
        if major.count_ones() > 1 {
            return Err("more than one major status");
        }
        if raw & Self::EXT != 0 && sleep == 0 {
            return Err("self-inflicted marker without sleep");
        }
        Ok(Status(raw))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_healthy(self) -> bool {
        self.0 == 0
    }

    pub const fn is_asleep(self) -> bool {
        self.sleep_turns() != 0
    }

    pub const fn sleep_turns(self) -> u8 {
        self.0 & Self::SLEEP_MASK
    }

    pub const fn is_self_inflicted(self) -> bool {
        self.0 & Self::EXT != 0
    }

    pub const fn is_poisoned(self) -> bool {
        self.0 & Self::PSN != 0
    }

    pub const fn is_burned(self) -> bool {
        self.0 & Self::BRN != 0
    }

    pub const fn is_frozen(self) -> bool {
        self.0 & Self::FRZ != 0
    }

    pub const fn is_paralyzed(self) -> bool {
        self.0 & Self::PAR != 0
    }
}

impl TryFrom<u8> for Status {
    type Error = ProtocolMismatchError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Status::from_bits(raw).map_err(|reason| ProtocolMismatchError::new("status", raw as u64, reason))
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.is_asleep() {
            "slp"
        } else if self.is_poisoned() {
            "psn"
        } else if self.is_burned() {
            "brn"
        } else if self.is_frozen() {
            "frz"
        } else if self.is_paralyzed() {
            "par"
        } else {
            ""
        };
        f.write_str(name)
    }
}
