use rand::Rng;

use crate::tree::{
    arena::Arena,
    error::ModelError,
    history::History,
    ids::NodeId,
    journal::Journal,
    node::{ContextNode, LOG_HALF},
    snapshot::{ContextNodeSnapshot, ContextTreeSnapshot},
    symbol::Symbol,
};

#[derive(Debug, Clone)]
/// Context Tree Weighting model over a binary history.
///
/// The tree conditions on exactly `depth` of the most recent symbols. Nodes are
/// created the first time their context is visited and removed again when a
/// rollback brings their visit count back to zero, so the tree only ever holds
/// contexts that are present in the current history.
///
/// Symbols that arrive before the history holds `depth` symbols have no full
/// context. They are appended to the history without being learned, and the
/// model gives each of them probability 1/2.
///
/// `update` / `revert` are exact inverses of each other (up to floating point
/// rounding), which is what lets the planner simulate futures directly on the
/// live model and unwind them afterwards.
pub struct ContextTree {
    nodes: Arena<ContextNode>,
    root: NodeId,
    history: History,
    depth: usize,
    /// Root-to-leaf node ids for the current history tail.
    /// Only valid right after `update_context`.
    context: Vec<NodeId>,
    journals: Vec<Journal>,
}

impl ContextTree {
    /// Create an empty tree that conditions on up to `depth` symbols.
    pub fn new(depth: usize) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.allocate(ContextNode::new());
        ContextTree {
            nodes,
            root,
            history: History::new(),
            depth,
            context: Vec::with_capacity(depth + 1),
            journals: Vec::new(),
        }
    }

    /// Forget every node and the whole history.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.allocate(ContextNode::new());
        self.history.clear();
        self.context.clear();
        self.journals.clear();
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of nodes currently in the tree, root included.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn history(&self) -> &[Symbol] {
        self.history.as_slice()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// `ln` of the weighted probability of the entire history seen so far.
    pub fn root_log_probability(&self) -> f64 {
        self.node(self.root).log_probability()
    }

    /// Learn `symbols` one by one and append them to the history.
    /// Symbols without a full context are only appended.
    pub fn update(&mut self, symbols: &[Symbol]) {
        for &symbol in symbols {
            self.update_symbol(symbol);
        }
    }

    /// Append `symbols` to the history without learning from them.
    pub fn update_history(&mut self, symbols: &[Symbol]) {
        self.history.extend(symbols);
    }

    /// Unlearn the `count` most recent symbols, newest first, and drop them from the history.
    /// Every symbol being reverted must have gone through [`ContextTree::update`].
    /// Nothing changes if `count` exceeds the history length.
    pub fn revert(&mut self, count: usize) -> Result<(), ModelError> {
        self.check_revert(count)?;
        self.revert_unchecked(count);
        Ok(())
    }

    /// Drop the last `count` symbols from the history without touching node statistics.
    pub fn revert_history(&mut self, count: usize) -> Result<(), ModelError> {
        self.history.truncate_by(count)
    }

    /// Conditional probability of seeing `symbols` next, `rho(h symbols) / rho(h)`.
    /// The tree is left exactly as it was.
    pub fn predict(&mut self, symbols: &[Symbol]) -> f64 {
        let unlearned = self.depth.saturating_sub(self.history.len()).min(symbols.len());
        let before = self.root_log_probability();
        self.journals.push(Journal::new());
        self.update(symbols);
        let after = self.root_log_probability();
        self.revert_unchecked(symbols.len());
        self.close_journal();
        (after - before + unlearned as f64 * LOG_HALF).exp()
    }

    /// Sample `count` symbols from the model, learning each one as it is drawn.
    pub fn generate_random_symbols_and_update<R>(&mut self, count: usize, rng: &mut R) -> Vec<Symbol>
    where
        R: Rng + ?Sized,
    {
        let mut symbols = Vec::with_capacity(count);
        for _ in 0..count {
            let p_one = self.predict(&[Symbol::One]);
            let symbol = Symbol::from(rng.r#gen::<f64>() < p_one);
            self.update_symbol(symbol);
            symbols.push(symbol);
        }
        symbols
    }

    /// Sample `count` symbols from the model and leave the model unchanged.
    pub fn generate_random_symbols<R>(&mut self, count: usize, rng: &mut R) -> Vec<Symbol>
    where
        R: Rng + ?Sized,
    {
        self.journals.push(Journal::new());
        let symbols = self.generate_random_symbols_and_update(count, rng);
        self.revert_unchecked(count);
        self.close_journal();
        symbols
    }

    /// Depth-first dump of every node.
    pub fn snapshot(&self) -> ContextTreeSnapshot {
        let mut nodes = Vec::with_capacity(self.size());
        let mut stack = vec![(self.root, Vec::new())];
        while let Some((node_id, context)) = stack.pop() {
            let node = self.node(node_id);
            for symbol in [Symbol::One, Symbol::Zero] {
                if let Some(child) = node.child(symbol) {
                    let mut child_context = context.clone();
                    child_context.push(symbol);
                    stack.push((child, child_context));
                }
            }
            nodes.push(ContextNodeSnapshot {
                context,
                zeros: node.symbol_count(Symbol::Zero),
                ones: node.symbol_count(Symbol::One),
                log_kt: node.log_kt(),
                log_probability: node.log_probability(),
            });
        }
        ContextTreeSnapshot {
            depth: self.depth,
            history_len: self.history.len(),
            node_count: self.size(),
            nodes,
        }
    }

    fn check_revert(&self, count: usize) -> Result<(), ModelError> {
        let available = self.history.len();
        if count > available {
            return Err(ModelError::RevertBeyondHistory {
                requested: count,
                available,
            });
        }
        Ok(())
    }

    fn update_symbol(&mut self, symbol: Symbol) {
        if !self.has_full_context() {
            self.history.push(symbol);
            return;
        }
        self.update_context();
        // Deepest first: a parent mixes its children's already updated values.
        for i in (0..self.context.len()).rev() {
            let node_id = self.context[i];
            self.capture(node_id);
            self.node_mut(node_id).record(symbol);
            self.refresh(node_id);
        }
        self.history.push(symbol);
    }

    /// Callers guarantee `count <= history_len`.
    fn revert_unchecked(&mut self, count: usize) {
        for _ in 0..count {
            let Some(symbol) = self.history.pop() else {
                return;
            };
            if !self.has_full_context() {
                continue;
            }
            self.update_context();
            for i in (0..self.context.len()).rev() {
                let node_id = self.context[i];
                self.capture(node_id);
                self.node_mut(node_id).unrecord(symbol);
                self.prune_unvisited_children(node_id);
                self.refresh(node_id);
            }
        }
    }

    /// Whether the next symbol would see `depth` symbols of context.
    fn has_full_context(&self) -> bool {
        self.history.len() >= self.depth
    }

    /// Rebuild `context` from the current history tail, creating missing nodes.
    /// Callers check `has_full_context` first, so the path always reaches depth `depth`.
    fn update_context(&mut self) {
        self.context.clear();
        let mut current = self.root;
        self.context.push(current);
        for offset in 0..self.depth {
            let Some(symbol) = self.history.recent(offset) else {
                break;
            };
            current = match self.node(current).child(symbol) {
                Some(child) => child,
                None => {
                    let child = self.nodes.allocate(ContextNode::new());
                    self.node_mut(current).set_child(symbol, Some(child));
                    child
                }
            };
            self.context.push(current);
        }
    }

    fn prune_unvisited_children(&mut self, node_id: NodeId) {
        for symbol in [Symbol::Zero, Symbol::One] {
            let Some(child) = self.node(node_id).child(symbol) else {
                continue;
            };
            if self.node(child).visits() == 0 {
                self.release_subtree(child);
                self.node_mut(node_id).set_child(symbol, None);
            }
        }
    }

    fn release_subtree(&mut self, node_id: NodeId) {
        let mut stack = vec![node_id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.release(id) {
                stack.extend(node.children().into_iter().flatten());
            }
        }
    }

    fn refresh(&mut self, node_id: NodeId) {
        let children_log_probability: f64 = self
            .node(node_id)
            .children()
            .into_iter()
            .flatten()
            .map(|child| self.node(child).log_probability())
            .sum();
        self.node_mut(node_id)
            .refresh_log_probability(children_log_probability);
    }

    fn capture(&mut self, node_id: NodeId) {
        let Some(journal) = self.journals.last_mut() else {
            return;
        };
        if let Some(node) = self.nodes.get(node_id) {
            journal.capture(node_id, node.log_kt(), node.log_probability());
        }
    }

    fn close_journal(&mut self) {
        let Some(journal) = self.journals.pop() else {
            return;
        };
        for (node_id, log_kt, log_probability) in journal.drain_newest_first() {
            // Nodes created during the speculation are gone again after the revert.
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.restore(log_kt, log_probability);
            }
        }
    }

    // Every id reachable from `root` or held in `context` is live: ids are only
    // released together with the parent link that pointed at them.
    fn node(&self, node_id: NodeId) -> &ContextNode {
        &self.nodes[node_id]
    }

    fn node_mut(&mut self, node_id: NodeId) -> &mut ContextNode {
        &mut self.nodes[node_id]
    }
}
