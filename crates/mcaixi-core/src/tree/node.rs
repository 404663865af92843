use crate::tree::{
    children::ChildSet,
    ids::{Action, NodeId, Observation},
    stats::NodeStats,
};

#[derive(Debug, Clone)]
/// What a search node branches on. Decision and chance nodes alternate along every
/// path: a decision node's children are chance nodes, one per tried action, and a
/// chance node's children are decision nodes, one per sampled observation.
pub enum NodeKind {
    Decision(ChildSet<Action>),
    Chance(ChildSet<Observation>),
}

#[derive(Debug, Clone)]
/// One node of the lookahead tree built for a single decision.
pub struct SearchNode {
    kind: NodeKind,
    stats: NodeStats,
}

impl SearchNode {
    /// A node where the agent picks an action.
    pub fn decision() -> Self {
        SearchNode {
            kind: NodeKind::Decision(ChildSet::new()),
            stats: NodeStats::new(),
        }
    }

    /// A node where the environment model samples a percept.
    pub fn chance() -> Self {
        SearchNode {
            kind: NodeKind::Chance(ChildSet::new()),
            stats: NodeStats::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn is_decision(&self) -> bool {
        matches!(self.kind, NodeKind::Decision(_))
    }

    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    pub fn visits(&self) -> u64 {
        self.stats.visits()
    }

    pub fn mean(&self) -> f64 {
        self.stats.mean()
    }

    /// Fold a simulated return into this node.
    pub fn record(&mut self, simulated_return: f64) {
        self.stats.record(simulated_return);
    }

    /// Child reached by taking `action`. Always `None` on chance nodes.
    pub fn action_child(&self, action: Action) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Decision(children) => children.get(action),
            NodeKind::Chance(_) => None,
        }
    }

    /// Child reached by observing `observation`. Always `None` on decision nodes.
    pub fn observation_child(&self, observation: Observation) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Chance(children) => children.get(observation),
            NodeKind::Decision(_) => None,
        }
    }

    /// Number of children, whichever kind they are keyed by.
    pub fn child_count(&self) -> usize {
        match &self.kind {
            NodeKind::Decision(children) => children.len(),
            NodeKind::Chance(children) => children.len(),
        }
    }
}
