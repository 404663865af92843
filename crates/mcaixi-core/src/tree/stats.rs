/// Running statistics MCTS updates on every simulation through a node.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeStats {
    visits: u64,
    mean: f64,
}

impl NodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of simulations that passed through the node.
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Average simulated return from the node onward.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn is_unvisited(&self) -> bool {
        self.visits == 0
    }

    /// Fold one simulated return into the running mean and count the visit.
    pub fn record(&mut self, simulated_return: f64) {
        let visits = self.visits as f64;
        self.mean = (simulated_return + visits * self.mean) / (visits + 1.0);
        self.visits += 1;
    }
}
