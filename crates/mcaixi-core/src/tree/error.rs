use thiserror::Error;

use crate::tree::ids::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Error type for search tree construction and simulation.
pub enum SearchError {
    #[error("missing search node with id {}", node_id.index())]
    MissingNode { node_id: NodeId },

    #[error("node {} is a chance node, actions are only chosen at decision nodes", node_id.index())]
    NotADecisionNode { node_id: NodeId },

    #[error("node {} is a decision node, percepts are only sampled at chance nodes", node_id.index())]
    NotAChanceNode { node_id: NodeId },

    #[error("the simulator offers no legal actions")]
    NoLegalActions,

    #[error("invalid reward bounds: minimum {min} exceeds maximum {max}")]
    InvalidRewardBounds { min: u64, max: u64 },

    #[error("child for the same key inserted twice under node {}", node_id.index())]
    ChildInsertFailed { node_id: NodeId },
}
