use crate::tree::{ids::NodeId, symbol::Symbol};

/// ln(1/2), used by every weighted-probability mix.
pub(crate) const LOG_HALF: f64 = -std::f64::consts::LN_2;

#[derive(Debug, Clone, PartialEq)]
/// One context (a suffix of history) in the context tree.
///
/// With `a` zeros and `b` ones seen while this context was active, the node keeps
///
/// - `log_kt = ln Pr_kt(a, b)`, the Krichevsky–Trofimov block estimate, grown by
///   the multiplier `(count + 1/2) / (a + b + 1)` per observed symbol, with
///   `Pr_kt(0, 0) = 1`;
/// - `log_probability`, the weighted block probability: `log_kt` for a leaf,
///   otherwise `ln(1/2 Pr_kt + 1/2 Pw(child0) Pw(child1))`.
///
/// The node cannot see its children's values, so the owning tree hands their
/// summed log probabilities to [`ContextNode::refresh_log_probability`].
pub struct ContextNode {
    symbol_count: [u64; 2],
    log_kt: f64,
    log_probability: f64,
    children: [Option<NodeId>; 2],
}

impl ContextNode {
    /// Create an unvisited node.
    pub fn new() -> Self {
        ContextNode {
            symbol_count: [0, 0],
            log_kt: 0.0,
            log_probability: 0.0,
            children: [None, None],
        }
    }

    /// Number of symbols observed in this context.
    pub fn visits(&self) -> u64 {
        self.symbol_count[0] + self.symbol_count[1]
    }

    pub fn symbol_count(&self, symbol: Symbol) -> u64 {
        self.symbol_count[symbol.index()]
    }

    pub fn log_kt(&self) -> f64 {
        self.log_kt
    }

    pub fn log_probability(&self) -> f64 {
        self.log_probability
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub fn child(&self, symbol: Symbol) -> Option<NodeId> {
        self.children[symbol.index()]
    }

    pub fn children(&self) -> [Option<NodeId>; 2] {
        self.children
    }

    pub fn set_child(&mut self, symbol: Symbol, child: Option<NodeId>) {
        self.children[symbol.index()] = child;
    }

    /// `ln Pr_kt(symbol | a, b)` for the current counts.
    pub fn log_kt_multiplier(&self, symbol: Symbol) -> f64 {
        let count = self.symbol_count[symbol.index()] as f64;
        ((count + 0.5) / (self.visits() as f64 + 1.0)).ln()
    }

    /// Account for one more `symbol` in this context.
    pub fn record(&mut self, symbol: Symbol) {
        self.log_kt += self.log_kt_multiplier(symbol);
        self.symbol_count[symbol.index()] += 1;
    }

    /// Undo one [`ContextNode::record`] of `symbol`.
    /// The multiplier is taken with the decremented counts, which are the counts `record` saw.
    pub fn unrecord(&mut self, symbol: Symbol) {
        let count = &mut self.symbol_count[symbol.index()];
        debug_assert!(*count > 0, "unrecord on a symbol this context never saw");
        *count = count.saturating_sub(1);
        self.log_kt -= self.log_kt_multiplier(symbol);
    }

    /// Recompute the weighted probability. `children_log_probability` is the sum of
    /// the existing children's `log_probability`; it is ignored for leaves.
    pub fn refresh_log_probability(&mut self, children_log_probability: f64) {
        self.log_probability = if self.is_leaf() {
            self.log_kt
        } else {
            log_mix(self.log_kt, children_log_probability)
        };
    }

    /// Overwrite both cached probabilities with previously captured values.
    pub fn restore(&mut self, log_kt: f64, log_probability: f64) {
        self.log_kt = log_kt;
        self.log_probability = log_probability;
    }
}

/// `ln(1/2 e^x + 1/2 e^y)`, with the exponent taken over the smaller term.
pub(crate) fn log_mix(x: f64, y: f64) -> f64 {
    let (hi, lo) = if x >= y { (x, y) } else { (y, x) };
    LOG_HALF + hi + (lo - hi).exp().ln_1p()
}
