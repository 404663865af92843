mod tree;

pub use tree::children::ChildSet;
pub use tree::config::{SearchConfig, SearchConfigError};
pub use tree::error::SearchError;
pub use tree::ids::{Action, NodeId, Observation, Reward};
pub use tree::node::{NodeKind, SearchNode};
pub use tree::report::{ActionReport, RunMetrics, SearchReport};
pub use tree::search_tree::SearchTree;
pub use tree::simulator::Simulator;
pub use tree::stats::NodeStats;
