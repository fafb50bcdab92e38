use serde::{Deserialize, Serialize};

/// Per-battle driver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// `run` stops between turns once this many turns were played.
    pub max_turns: u16,
    /// Keep a decoded snapshot for every step.
    pub record_trace: bool,
    /// Ask the engine for its protocol log and keep the parsed lines.
    pub protocol_log: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_turns: 1000,
            record_trace: true,
            protocol_log: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DriverConfig = serde_json::from_str(r#"{"max_turns": 5}"#).unwrap();
        assert_eq!(config.max_turns, 5);
        assert!(config.record_trace);
        assert!(!config.protocol_log);
    }
}
