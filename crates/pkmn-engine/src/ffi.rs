//! FFI bindings to libpkmn (Showdown-compatible build).
//!
//! Only the Gen I battle entry points and the PSRNG are declared. Battle
//! pointers are the raw 384-byte buffer; libpkmn reads it in place.

use libc::size_t;
use pkmn_core::{ChoiceKind, Generation, Player};

use crate::BattleEngine;

/// Gen I battle size in bytes (`PKMN_GEN1_BATTLE_SIZE`).
pub const PKMN_GEN1_BATTLE_SIZE: usize = 384;
/// Maximum number of choices (`PKMN_OPTIONS_SIZE`).
pub const PKMN_OPTIONS_SIZE: usize = 9;
/// Protocol log bytes a Gen I step may write (`PKMN_GEN1_LOGS_SIZE`).
pub const PKMN_GEN1_LOGS_SIZE: usize = 512;
/// libpkmn reads the battle with 8-byte loads.
pub const PKMN_BATTLE_ALIGN: usize = 8;

/// `pkmn_psrng`: opaque 8-byte state.
#[repr(C, align(8))]
#[derive(Debug, Default)]
pub struct PkmnPsrng {
    pub bytes: [u8; 8],
}

unsafe extern "C" {
    /// Run one battle step. `buf`/`len` receive protocol logs; null/0 disables them.
    pub fn pkmn_gen1_battle_update(
        battle: *mut u8,
        c1: u8,
        c2: u8,
        buf: *mut u8,
        len: size_t,
    ) -> u8;

    /// Fill `out` with legal choices for `player`; returns how many were written.
    pub fn pkmn_gen1_battle_choices(
        battle: *mut u8,
        player: u8,
        request: u8,
        out: *mut u8,
        len: size_t,
    ) -> u8;

    pub fn pkmn_psrng_init(psrng: *mut PkmnPsrng, seed: u64);

    pub fn pkmn_psrng_next(psrng: *mut PkmnPsrng) -> u32;
}

/// The linked libpkmn, Gen I.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    pub fn new() -> Self {
        Self
    }

    fn fits(buffer: &[u8]) -> bool {
        buffer.len() == PKMN_GEN1_BATTLE_SIZE
            && (buffer.as_ptr() as usize) % PKMN_BATTLE_ALIGN == 0
    }
}

impl BattleEngine for NativeEngine {
    fn generation(&self) -> Generation {
        Generation::One
    }

    fn required_alignment(&self) -> usize {
        PKMN_BATTLE_ALIGN
    }

    fn update(&mut self, buffer: &mut [u8], c1: u8, c2: u8) -> u8 {
        if !Self::fits(buffer) {
            return pkmn_core::ResultKind::Error as u8;
        }
        // SAFETY: the buffer is exactly one aligned Gen I battle, exclusively
        // borrowed for the call; a null log buffer with length 0 is allowed.
        unsafe { pkmn_gen1_battle_update(buffer.as_mut_ptr(), c1, c2, core::ptr::null_mut(), 0) }
    }

    /// Needs a libpkmn built with protocol logging; other builds leave `log` zeroed.
    fn update_logged(&mut self, buffer: &mut [u8], c1: u8, c2: u8, log: &mut [u8]) -> u8 {
        if !Self::fits(buffer) {
            return pkmn_core::ResultKind::Error as u8;
        }
        log.fill(0);
        // SAFETY: as in `update`; `log` is valid for `log.len()` writes and
        // libpkmn never writes past the length it is given.
        unsafe {
            pkmn_gen1_battle_update(buffer.as_mut_ptr(), c1, c2, log.as_mut_ptr(), log.len())
        }
    }

    fn choices(
        &mut self,
        buffer: &mut [u8],
        player: Player,
        request: ChoiceKind,
        out: &mut [u8],
    ) -> usize {
        if !Self::fits(buffer) {
            return 0;
        }
        // SAFETY: as in `update`; `out` is valid for `out.len()` writes.
        let n = unsafe {
            pkmn_gen1_battle_choices(
                buffer.as_mut_ptr(),
                player as u8,
                request as u8,
                out.as_mut_ptr(),
                out.len(),
            )
        };
        n as usize
    }
}

/// Safe wrapper around libpkmn's PSRNG, for parity checks against
/// [`pkmn_core::Psrng`].
pub struct NativePsrng {
    ctx: PkmnPsrng,
    call_count: u64,
}

impl NativePsrng {
    pub fn new(seed: u64) -> Self {
        let mut ctx = PkmnPsrng::default();
        // SAFETY: `ctx` is a valid, writable pkmn_psrng.
        unsafe { pkmn_psrng_init(&mut ctx, seed) };
        Self { ctx, call_count: 0 }
    }

    pub fn next(&mut self) -> u32 {
        self.call_count += 1;
        // SAFETY: `ctx` was initialised in `new`.
        unsafe { pkmn_psrng_next(&mut self.ctx) }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Raw state, which equals [`pkmn_core::Psrng::state`] after the same calls.
    pub fn state(&self) -> u64 {
        u64::from_le_bytes(self.ctx.bytes)
    }
}
