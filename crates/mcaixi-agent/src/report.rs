use mcaixi_core::{Action, Observation, Reward, SearchReport};
use serde::Serialize;

/// Outcome of one real agent/environment cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// Agent age after the cycle.
    pub cycle: u64,
    pub action: Action,
    pub observation: Observation,
    pub reward: Reward,
    pub average_reward: f64,
    pub model_size: usize,
    pub search: SearchReport,
}

impl CycleReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
