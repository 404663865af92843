use std::{fs, path::Path};

use mcaixi_core::{SearchConfig, SearchConfigError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_AGENT_CONFIG_YAML: &str = include_str!("../config/agent.default.yaml");

/// Agent configuration: the model's context depth, the learning cutoff, and the
/// planner settings used for every decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Number of most recent bits the context tree conditions on.
    pub depth: usize,
    /// Real cycles to learn percepts for. After that percepts only extend the
    /// history. `0` never stops learning.
    pub learning_period: u64,
    pub search: SearchConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            depth: 16,
            learning_period: 0,
            search: SearchConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Parse an agent config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AgentConfigError> {
        let config: AgentConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an agent config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, AgentConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn default_yaml() -> &'static str {
        DEFAULT_AGENT_CONFIG_YAML
    }

    pub fn from_default_yaml() -> Result<Self, AgentConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn to_yaml(&self) -> Result<String, AgentConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), AgentConfigError> {
        self.search.validate()?;
        Ok(())
    }
}

/// Error type for loading and validating `AgentConfig`.
#[derive(Debug, Error)]
pub enum AgentConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Search(#[from] SearchConfigError),
}
