use crate::tree::ids::NodeId;

#[derive(Debug, Clone, Copy)]
struct Entry {
    node_id: NodeId,
    log_kt: f64,
    log_probability: f64,
}

/// Captured probabilities of nodes touched during a speculative update.
///
/// `log_kt += m; log_kt -= m` is not exact in floating point, so queries that
/// update and then revert replay the journal afterwards to put every surviving
/// node back to its exact prior value.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal {
    entries: Vec<Entry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, node_id: NodeId, log_kt: f64, log_probability: f64) {
        self.entries.push(Entry {
            node_id,
            log_kt,
            log_probability,
        });
    }

    /// Entries newest first, so the oldest capture of a node is applied last.
    pub fn drain_newest_first(self) -> impl Iterator<Item = (NodeId, f64, f64)> {
        self.entries
            .into_iter()
            .rev()
            .map(|entry| (entry.node_id, entry.log_kt, entry.log_probability))
    }
}
