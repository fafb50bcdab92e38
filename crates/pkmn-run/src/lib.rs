//! pkmn-run: seeded battle batches from the command line
//!
//! Library half of the `pkmn-run` binary, split out so the batch logic is
//! testable without a process.

pub mod batch;
pub mod config;
pub mod teams;

pub use batch::{BatchSummary, BattleReport, BattleSeeds, derive_seeds, run_batch, write_traces};
pub use config::{EngineKind, PolicyKind, RunConfig};
pub use teams::{Teams, TeamsFile};
