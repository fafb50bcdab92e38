use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Volatile conditions on the active creature, in engine bit order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct VolatileFlags: u32 {
        const BIDE = 1 << 0;
        const THRASHING = 1 << 1;
        const MULTI_HIT = 1 << 2;
        const FLINCH = 1 << 3;
        const CHARGING = 1 << 4;
        const BINDING = 1 << 5;
        const INVULNERABLE = 1 << 6;
        const CONFUSION = 1 << 7;
        const MIST = 1 << 8;
        const FOCUS_ENERGY = 1 << 9;
        const SUBSTITUTE = 1 << 10;
        const RECHARGING = 1 << 11;
        const RAGE = 1 << 12;
        const LEECH_SEED = 1 << 13;
        const TOXIC = 1 << 14;
        const LIGHT_SCREEN = 1 << 15;
        const REFLECT = 1 << 16;
        const TRANSFORM = 1 << 17;
    }
}

/// Volatile flags plus their counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Volatiles {
    pub flags: VolatileFlags,
    /// Confusion turns left (3 bits).
    pub confusion: u8,
    /// Remaining hits of a multi-turn attack (3 bits).
    pub attacks: u8,
    /// Bide damage accumulator or similar per-move state.
    pub state: u16,
    /// Substitute HP.
    pub substitute: u8,
    /// Transform source: player in bit 3, team slot in bits 0..3.
    pub transform: u8,
    pub disable_duration: u8,
    /// Disabled move slot, 1-based; 0 when nothing is disabled.
    pub disable_move: u8,
    /// Toxic counter (5 bits).
    pub toxic: u8,
}

impl Volatiles {
    pub fn has(&self, flag: VolatileFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn transform_source(&self) -> Option<(u8, u8)> {
        self.flags
            .contains(VolatileFlags::TRANSFORM)
            .then(|| ((self.transform >> 3) & 1, self.transform & 0b111))
    }
}

/// Stat stages, each in -6..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Boosts {
    pub atk: i8,
    pub def: i8,
    pub spe: i8,
    pub spc: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl Boosts {
    pub const MIN: i8 = -6;
    pub const MAX: i8 = 6;

    pub const fn values(&self) -> [i8; 6] {
        [
            self.atk,
            self.def,
            self.spe,
            self.spc,
            self.accuracy,
            self.evasion,
        ]
    }

    pub const fn from_values(v: [i8; 6]) -> Self {
        Self {
            atk: v[0],
            def: v[1],
            spe: v[2],
            spc: v[3],
            accuracy: v[4],
            evasion: v[5],
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.values().iter().all(|&b| b == 0)
    }
}
