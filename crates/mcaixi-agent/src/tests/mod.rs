use mcaixi_ctw::ContextTreeSnapshot;

use crate::{agent::Agent, alphabet::Alphabet, config::AgentConfig};

mod agent_update_tests;

/// Two actions, two observations, rewards 0/1: one action bit, two percept bits.
pub(super) fn binary_alphabet() -> Alphabet {
    Alphabet::new([0, 1], [0, 1], [0, 1]).expect("valid alphabet")
}

pub(super) fn agent_with(depth: usize, learning_period: u64, simulations: usize) -> Agent {
    let mut config = AgentConfig {
        depth,
        learning_period,
        ..AgentConfig::default()
    };
    config.search.horizon = 2;
    config.search.simulations = simulations;
    Agent::new(binary_alphabet(), config, 17).expect("valid agent")
}

pub(super) fn snapshots_match(a: &ContextTreeSnapshot, b: &ContextTreeSnapshot, tol: f64) -> bool {
    a.depth == b.depth
        && a.history_len == b.history_len
        && a.node_count == b.node_count
        && a.nodes.len() == b.nodes.len()
        && a.nodes.iter().zip(&b.nodes).all(|(x, y)| {
            x.context == y.context
                && x.zeros == y.zeros
                && x.ones == y.ones
                && (x.log_kt - y.log_kt).abs() <= tol
                && (x.log_probability - y.log_probability).abs() <= tol
        })
}
