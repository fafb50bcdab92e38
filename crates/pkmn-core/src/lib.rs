//! pkmn-core: battle data model and the libpkmn buffer layout
//!
//! This crate has no engine dependency. It describes what a battle looks
//! like, how it is laid out byte for byte in the buffer the native engine
//! mutates, and how choices and results are encoded. It also carries the
//! Gen I species and move tables and the protocol log reader.

pub mod bits;
pub mod choice;
pub mod codec;
pub mod data;
pub mod error;
pub mod layout;
pub mod model;
pub mod protocol;
pub mod statcalc;

pub use choice::{Choice, ChoiceKind, EngineResult, Outcome, Player, ResultKind};
pub use codec::{BattleBuffer, decode, encode, encode_into};
pub use error::{CodecError, LayoutError, LogError, ProtocolMismatchError};
pub use layout::{Generation, LayoutTable};
pub use model::{
    ActivePokemon, BattleState, Boosts, MoveSlot, Pokemon, PokemonType, SideState, Stats, Status,
    Types, VolatileFlags, Volatiles,
};
pub use pkmn_rng::{Psrng, Seed};
