use serde::Serialize;

/// Root statistics of a finished search, for logging and inspection.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub simulations: u64,
    pub node_count: usize,
    pub root_mean: f64,
    pub actions: Vec<ActionReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub action: u64,
    pub visits: u64,
    pub mean: f64,
}

impl SearchReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Statistics for one root action, if it was ever tried.
    pub fn action(&self, action: u64) -> Option<&ActionReport> {
        self.actions.iter().find(|report| report.action == action)
    }
}

/// Aggregate metrics for a complete search run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub simulations_requested: usize,
    pub simulations_completed: usize,
    pub total_return_sum: f64,
    pub average_return: f64,
}

impl RunMetrics {
    pub(crate) fn new(simulations_requested: usize) -> Self {
        RunMetrics {
            simulations_requested,
            simulations_completed: 0,
            total_return_sum: 0.0,
            average_return: 0.0,
        }
    }

    pub(crate) fn record(&mut self, simulated_return: f64) {
        self.simulations_completed += 1;
        self.total_return_sum += simulated_return;
        self.average_return = self.total_return_sum / self.simulations_completed as f64;
    }
}
