//! Gen I stat and PP formulas.

use serde::{Deserialize, Serialize};

use crate::model::Stats;

/// Stat experience cap.
pub const MAX_STAT_EXP: u16 = u16::MAX;
pub const MAX_DV: u8 = 15;

/// Determinant values. The HP DV is derived from the low bit of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dvs {
    pub atk: u8,
    pub def: u8,
    pub spe: u8,
    pub spc: u8,
}

impl Default for Dvs {
    fn default() -> Self {
        Self::max()
    }
}

impl Dvs {
    pub const fn max() -> Self {
        Self {
            atk: MAX_DV,
            def: MAX_DV,
            spe: MAX_DV,
            spc: MAX_DV,
        }
    }

    pub const fn hp(&self) -> u8 {
        (self.atk & 1) << 3 | (self.def & 1) << 2 | (self.spe & 1) << 1 | (self.spc & 1)
    }
}

fn core(base: u8, dv: u8, stat_exp: u16, level: u8) -> u32 {
    let root = (stat_exp as u32).isqrt();
    let ceil = if root * root < stat_exp as u32 { root + 1 } else { root };
    let e = ceil.min(255);
    ((base as u32 + dv as u32) * 2 + e / 4) * level as u32 / 100
}

/// A non-HP stat.
pub fn stat(base: u8, dv: u8, stat_exp: u16, level: u8) -> u16 {
    (core(base, dv, stat_exp, level) + 5) as u16
}

pub fn hp(base: u8, dv: u8, stat_exp: u16, level: u8) -> u16 {
    (core(base, dv, stat_exp, level) + level as u32 + 10) as u16
}

/// Full stat block from base stats (given as `Stats` for convenience).
pub fn calc_stats(base: &Stats, dvs: Dvs, stat_exp: u16, level: u8) -> Stats {
    let b = |v: u16| v.min(255) as u8;
    Stats {
        hp: hp(b(base.hp), dvs.hp(), stat_exp, level),
        atk: stat(b(base.atk), dvs.atk, stat_exp, level),
        def: stat(b(base.def), dvs.def, stat_exp, level),
        spe: stat(b(base.spe), dvs.spe, stat_exp, level),
        spc: stat(b(base.spc), dvs.spc, stat_exp, level),
    }
}

/// PP with three PP Ups applied, capped at 61.
pub fn max_pp(base_pp: u8) -> u8 {
    (base_pp as u16 / 5 * 8).min(61) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENGAR: Stats = Stats::new(60, 65, 60, 110, 130);

    #[test]
    fn test_gengar_max_stats() {
        let s = calc_stats(&GENGAR, Dvs::max(), MAX_STAT_EXP, 100);
        assert_eq!(s, Stats::new(323, 228, 218, 318, 358));
    }

    #[test]
    fn test_zero_investment() {
        // Level 50, no stat exp, zero DVs: ((base * 2) * 50 / 100) + 5
        assert_eq!(stat(100, 0, 0, 50), 105);
        assert_eq!(hp(100, 0, 0, 50), 160);
    }

    #[test]
    fn test_stat_exp_uses_ceiling_sqrt() {
        // ceil(sqrt(2)) = 2, 2 / 4 = 0; ceil(sqrt(17)) = 5, 5 / 4 = 1
        assert_eq!(stat(50, 0, 2, 100), stat(50, 0, 0, 100));
        assert_eq!(stat(50, 0, 17, 100), stat(50, 0, 0, 100) + 1);
    }

    #[test]
    fn test_hp_dv_from_low_bits() {
        assert_eq!(Dvs::max().hp(), 15);
        let dvs = Dvs {
            atk: 1,
            def: 2,
            spe: 3,
            spc: 4,
        };
        assert_eq!(dvs.hp(), 0b1010);
    }

    #[test]
    fn test_pp_ups() {
        assert_eq!(max_pp(35), 56);
        assert_eq!(max_pp(10), 16);
        assert_eq!(max_pp(5), 8);
        assert_eq!(max_pp(40), 61);
    }
}
