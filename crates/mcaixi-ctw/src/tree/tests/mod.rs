use crate::tree::snapshot::ContextTreeSnapshot;

mod revert_tests;

/// Structural equality with a floating point tolerance on the cached probabilities.
pub(super) fn snapshots_match(a: &ContextTreeSnapshot, b: &ContextTreeSnapshot, tolerance: f64) -> bool {
    a.depth == b.depth
        && a.history_len == b.history_len
        && a.node_count == b.node_count
        && a.nodes.len() == b.nodes.len()
        && a.nodes.iter().zip(&b.nodes).all(|(x, y)| {
            x.context == y.context
                && x.zeros == y.zeros
                && x.ones == y.ones
                && (x.log_kt - y.log_kt).abs() <= tolerance
                && (x.log_probability - y.log_probability).abs() <= tolerance
        })
}
