use pkmn_core::{ChoiceKind, Player, ProtocolMismatchError};
use thiserror::Error;

/// Failures around a single engine call. Precondition variants are raised
/// before the engine is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("buffer is {actual} bytes, engine expects {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("buffer at {address:#x} is not {align}-byte aligned")]
    Misaligned { address: usize, align: usize },

    #[error("log buffer is {actual} bytes, engine may write {expected}")]
    LogLength { expected: usize, actual: usize },

    #[error("engine reported an error (result byte {raw:#04x})")]
    EngineError { raw: u8 },

    #[error("engine returned unknown result byte {raw:#04x}: {source}")]
    UnknownResult {
        raw: u8,
        #[source]
        source: ProtocolMismatchError,
    },

    #[error("engine returned an invalid choice byte: {0}")]
    InvalidChoice(#[source] ProtocolMismatchError),

    #[error("{player} has no legal choices for a {request} request")]
    NoChoices { player: Player, request: ChoiceKind },
}
