use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SEARCH_CONFIG_YAML: &str = include_str!("../../config/search.default.yaml");

/// Search configuration for one planning decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Action/percept cycles simulated per rollout.
    pub horizon: usize,
    /// Rollouts run before the action is chosen.
    pub simulations: usize,
    /// UCB exploration constant.
    pub exploration: f64,
    /// Upper bound of the uniform noise added to root means when picking the final
    /// action, so exact ties do not always resolve the same way.
    pub tie_noise: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            horizon: 4,
            simulations: 300,
            exploration: 2.0,
            tie_noise: 0.01,
        }
    }
}

impl SearchConfig {
    /// Parse a search config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SearchConfigError> {
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a search config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SearchConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SEARCH_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SearchConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn validate(&self) -> Result<(), SearchConfigError> {
        if self.horizon == 0 {
            return Err(SearchConfigError::Invalid(
                "horizon must be greater than 0".to_string(),
            ));
        }
        if self.simulations == 0 {
            return Err(SearchConfigError::Invalid(
                "simulations must be greater than 0".to_string(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchConfigError::Invalid(
                "exploration must be finite and >= 0".to_string(),
            ));
        }
        if !self.tie_noise.is_finite() || self.tie_noise < 0.0 {
            return Err(SearchConfigError::Invalid(
                "tie_noise must be finite and >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating `SearchConfig`.
#[derive(Debug, Error)]
pub enum SearchConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid search config: {0}")]
    Invalid(String),
}
