//! Run configuration: JSON file first, then command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::Context;
use pkmn_driver::DriverConfig;
use pkmn_rng::Seed;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EngineKind {
    #[default]
    Stub,
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PolicyKind {
    First,
    #[default]
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub battles: u32,
    /// Master seed; every battle's seeds are drawn from it. Drawn from
    /// entropy when absent.
    pub seed: Option<Seed>,
    /// Worker threads (0 = rayon default).
    pub jobs: usize,
    pub engine: EngineKind,
    pub policy: PolicyKind,
    pub teams: Option<PathBuf>,
    /// Directory receiving one JSON trace per battle plus `summary.json`.
    pub trace_out: Option<PathBuf>,
    pub driver: DriverConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            battles: 10,
            seed: None,
            jobs: 0,
            engine: EngineKind::default(),
            policy: PolicyKind::default(),
            teams: None,
            trace_out: None,
            driver: DriverConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: RunConfig = serde_json::from_str(
            r#"{"battles": 3, "seed": 35, "policy": "first", "driver": {"max_turns": 50}}"#,
        )
        .unwrap();
        assert_eq!(config.battles, 3);
        assert_eq!(config.seed, Some(Seed::new(35)));
        assert_eq!(config.policy, PolicyKind::First);
        assert_eq!(config.engine, EngineKind::Stub);
        assert_eq!(config.driver.max_turns, 50);
        assert!(config.driver.record_trace);
    }

    #[test]
    fn test_kinds_parse_from_flags() {
        assert_eq!("native".parse::<EngineKind>().unwrap(), EngineKind::Native);
        assert_eq!(PolicyKind::Random.to_string(), "random");
    }
}
