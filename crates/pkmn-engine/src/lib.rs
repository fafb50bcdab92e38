//! pkmn-engine: one battle step through the engine
//!
//! [`BattleEngine`] is the seam between the bridge and whatever actually
//! simulates: the linked libpkmn ([`NativeEngine`], feature `native`) or the
//! pure-Rust [`StubEngine`]. [`EngineBridge`] owns the preconditions and the
//! result translation so engines stay thin.

use pkmn_core::{ChoiceKind, Generation, Player};

mod bridge;
mod error;
#[cfg(feature = "native")]
pub mod ffi;
pub mod stub;

pub use bridge::EngineBridge;
pub use error::BridgeError;
#[cfg(feature = "native")]
pub use ffi::NativeEngine;
pub use stub::StubEngine;

/// Something that can advance a battle buffer by one step.
pub trait BattleEngine {
    /// Generation whose buffer layout this engine reads.
    fn generation(&self) -> Generation;

    /// Alignment the buffer start must satisfy.
    fn required_alignment(&self) -> usize {
        1
    }

    /// Apply both choices and return the raw result byte. `buffer` is the
    /// whole battle, mutated in place.
    fn update(&mut self, buffer: &mut [u8], c1: u8, c2: u8) -> u8;

    /// [`update`](Self::update), also writing the step's protocol log into
    /// `log`. Engines that cannot log leave it zeroed.
    fn update_logged(&mut self, buffer: &mut [u8], c1: u8, c2: u8, log: &mut [u8]) -> u8 {
        log.fill(0);
        self.update(buffer, c1, c2)
    }

    /// Write the legal choice bytes for `player` into `out`; returns the count.
    fn choices(
        &mut self,
        buffer: &mut [u8],
        player: Player,
        request: ChoiceKind,
        out: &mut [u8],
    ) -> usize;
}

impl<E: BattleEngine + ?Sized> BattleEngine for &mut E {
    fn generation(&self) -> Generation {
        (**self).generation()
    }

    fn required_alignment(&self) -> usize {
        (**self).required_alignment()
    }

    fn update(&mut self, buffer: &mut [u8], c1: u8, c2: u8) -> u8 {
        (**self).update(buffer, c1, c2)
    }

    fn update_logged(&mut self, buffer: &mut [u8], c1: u8, c2: u8, log: &mut [u8]) -> u8 {
        (**self).update_logged(buffer, c1, c2, log)
    }

    fn choices(
        &mut self,
        buffer: &mut [u8],
        player: Player,
        request: ChoiceKind,
        out: &mut [u8],
    ) -> usize {
        (**self).choices(buffer, player, request, out)
    }
}
