use serde::Serialize;

use crate::tree::symbol::Symbol;

/// Read-only view of a whole context tree, nodes in depth-first order
/// (the `Zero` child before the `One` child).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextTreeSnapshot {
    pub depth: usize,
    pub history_len: usize,
    pub node_count: usize,
    pub nodes: Vec<ContextNodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextNodeSnapshot {
    /// Context that selects this node, most recent symbol first. Empty for the root.
    pub context: Vec<Symbol>,
    pub zeros: u64,
    pub ones: u64,
    pub log_kt: f64,
    pub log_probability: f64,
}
