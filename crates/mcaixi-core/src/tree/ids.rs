use serde::{Deserialize, Serialize};

/// A wrapper for an integer index used to index search nodes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the raw arena slot of this node.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        NodeId(value)
    }
}

/// An agent action, as the non-negative integer the environment defines it as.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action(u64);

impl Action {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Action {
    fn from(value: u64) -> Self {
        Action(value)
    }
}

/// The observation half of a percept.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Observation(u64);

impl Observation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Observation {
    fn from(value: u64) -> Self {
        Observation(value)
    }
}

/// The reward half of a percept. Rewards are encoded as non-negative integers;
/// environments with negative payoffs shift them into range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reward(u64);

impl Reward {
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Reward as a return contribution.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl From<u64> for Reward {
    fn from(value: u64) -> Self {
        Reward(value)
    }
}
