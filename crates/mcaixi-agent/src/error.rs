use mcaixi_core::SearchError;
use mcaixi_ctw::ModelError;
use thiserror::Error;

use crate::{config::AgentConfigError, undo::UpdateKind};

#[derive(Debug, Error)]
/// Error type for agent construction, model updates, and planning.
pub enum AgentError {
    #[error("invalid agent config: {0}")]
    Config(#[from] AgentConfigError),

    #[error("the {channel} alphabet must contain at least one value")]
    EmptyChannel { channel: &'static str },

    #[error("action {action} is not a valid action")]
    InvalidAction { action: u64 },

    #[error("observation {observation} is not a valid observation")]
    InvalidObservation { observation: u64 },

    #[error("reward {reward} is not a valid reward")]
    InvalidReward { reward: u64 },

    #[error("expected {expected} update next, got {got} update")]
    OutOfOrder { expected: UpdateKind, got: UpdateKind },

    #[error("expected {expected} symbols, got {got}")]
    SymbolCount { expected: usize, got: usize },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("environment failed: {0}")]
    Environment(#[source] Box<dyn std::error::Error + Send + Sync>),
}
