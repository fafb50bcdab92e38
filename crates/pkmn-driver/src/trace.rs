//! Per-step battle trace.

use std::io::{Read, Write};

use pkmn_core::{BattleState, Choice, EngineResult, Outcome};
use serde::{Deserialize, Serialize};

/// One engine step: what was submitted, what came back, and the decoded
/// buffer afterwards. `messages` holds the parsed protocol log when the
/// driver asked for one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub step: u64,
    pub p1: Choice,
    pub p2: Choice,
    pub result: EngineResult,
    pub outcome: Outcome,
    pub state: BattleState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

pub fn to_json(entries: &[TraceEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

pub fn from_json(json: &str) -> serde_json::Result<Vec<TraceEntry>> {
    serde_json::from_str(json)
}

pub fn write_json<W: Write>(writer: W, entries: &[TraceEntry]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, entries)
}

pub fn read_json<R: Read>(reader: R) -> serde_json::Result<Vec<TraceEntry>> {
    serde_json::from_reader(reader)
}
