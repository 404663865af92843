use std::fmt;

use serde::{Deserialize, Serialize};

/// Which half of a cycle the agent applied last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    Action,
    Percept,
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateKind::Action => write!(f, "action"),
            UpdateKind::Percept => write!(f, "percept"),
        }
    }
}

/// Scalar agent state captured before a simulated rollout.
///
/// Restoring it with [`crate::Agent::model_revert`] also unwinds the context tree
/// back to `history_len` symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub age: u64,
    pub total_reward: u64,
    pub history_len: usize,
    pub last_update: UpdateKind,
}
