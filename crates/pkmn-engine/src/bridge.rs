use pkmn_core::{Choice, ChoiceKind, EngineResult, Generation, Player, ResultKind};

use crate::{BattleEngine, BridgeError};

/// Validates a buffer, hands it to the engine for one call and translates the
/// result byte. Holds no buffer between calls.
pub struct EngineBridge<E> {
    engine: E,
    calls: u64,
}

impl<E: BattleEngine> EngineBridge<E> {
    pub fn new(engine: E) -> Self {
        Self { engine, calls: 0 }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_inner(self) -> E {
        self.engine
    }

    pub fn generation(&self) -> Generation {
        self.engine.generation()
    }

    /// Number of calls that reached the engine.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    fn check(&self, buffer: &[u8]) -> Result<(), BridgeError> {
        let expected = self.generation().buffer_len();
        if buffer.len() != expected {
            return Err(BridgeError::BufferLength {
                expected,
                actual: buffer.len(),
            });
        }
        let align = self.engine.required_alignment();
        let address = buffer.as_ptr() as usize;
        if align > 1 && address % align != 0 {
            return Err(BridgeError::Misaligned { address, align });
        }
        Ok(())
    }

    /// Run one step. The buffer is mutated in place; on `Err` it holds
    /// whatever the engine left there (untouched if a precondition failed).
    pub fn advance(
        &mut self,
        buffer: &mut [u8],
        p1: Choice,
        p2: Choice,
    ) -> Result<EngineResult, BridgeError> {
        self.check(buffer)?;
        self.calls += 1;
        let raw = self.engine.update(buffer, p1.to_byte(), p2.to_byte());
        tracing::debug!(call = self.calls, %p1, %p2, raw, "engine update");
        Self::translate(raw)
    }

    /// [`advance`](Self::advance) with protocol logging into `log`, which
    /// must hold at least [`Generation::logs_len`] bytes.
    pub fn advance_logged(
        &mut self,
        buffer: &mut [u8],
        p1: Choice,
        p2: Choice,
        log: &mut [u8],
    ) -> Result<EngineResult, BridgeError> {
        self.check(buffer)?;
        let expected = self.generation().logs_len();
        if log.len() < expected {
            return Err(BridgeError::LogLength {
                expected,
                actual: log.len(),
            });
        }
        self.calls += 1;
        let raw = self
            .engine
            .update_logged(buffer, p1.to_byte(), p2.to_byte(), log);
        tracing::debug!(call = self.calls, %p1, %p2, raw, "engine update (logged)");
        Self::translate(raw)
    }

    fn translate(raw: u8) -> Result<EngineResult, BridgeError> {
        let result = EngineResult::from_byte(raw)
            .map_err(|source| BridgeError::UnknownResult { raw, source })?;
        if result.kind == ResultKind::Error {
            return Err(BridgeError::EngineError { raw });
        }
        Ok(result)
    }

    /// Legal choices for `player` answering a `request` of the given kind.
    pub fn choices(
        &mut self,
        buffer: &mut [u8],
        player: Player,
        request: ChoiceKind,
    ) -> Result<Vec<Choice>, BridgeError> {
        self.check(buffer)?;
        let mut out = vec![0u8; self.generation().layout().capacity.choices];
        let count = self
            .engine
            .choices(buffer, player, request, &mut out)
            .min(out.len());
        if count == 0 {
            return Err(BridgeError::NoChoices { player, request });
        }
        out[..count]
            .iter()
            .map(|&b| Choice::from_byte(b).map_err(BridgeError::InvalidChoice))
            .collect()
    }
}
