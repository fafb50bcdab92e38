//! pkmn-driver: run one battle from start to a terminal result
//!
//! [`BattleDriver`] owns the buffer and the bridge for a single battle and
//! walks the state machine
//! `Initialized -> AwaitingChoices -> Advancing -> ... -> Terminal`,
//! decoding after every engine step. Policies decide what each side
//! submits; the trace records every step.

mod config;
pub mod diff;
mod driver;
mod error;
pub mod policy;
pub mod trace;

pub use config::DriverConfig;
pub use diff::{FieldChange, Severity, diff_states};
pub use driver::{BattleDriver, Phase};
pub use error::DriverError;
pub use policy::{ChoicePolicy, FirstChoice, RandomChoice};
pub use trace::TraceEntry;
