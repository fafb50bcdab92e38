use pkmn_core::{CodecError, LayoutError, LogError};
use pkmn_engine::BridgeError;
use thiserror::Error;

use crate::Phase;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("protocol log: {0}")]
    Log(#[from] LogError),

    #[error("driver is {phase}, not awaiting choices")]
    NotAwaitingChoices { phase: Phase },

    #[error("battle already started")]
    AlreadyStarted,
}

impl From<LayoutError> for DriverError {
    fn from(err: LayoutError) -> Self {
        DriverError::Codec(err.into())
    }
}
