use mcaixi_agent::{
    Action, Agent, AgentConfig, AgentConfigError, AgentError, Alphabet, Environment, Observation,
    Reward, UpdateKind,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("the lever jammed")]
struct Jammed;

/// Pays 1 for pulling lever 1 and 0 for lever 0. Observes nothing useful.
struct Levers {
    actions: Vec<Action>,
    observations: Vec<Observation>,
    rewards: Vec<Reward>,
    jam_after: Option<usize>,
    pulls: usize,
}

impl Levers {
    fn new() -> Self {
        Levers {
            actions: vec![Action::from(0), Action::from(1)],
            observations: vec![Observation::from(0)],
            rewards: vec![Reward::from(0), Reward::from(1)],
            jam_after: None,
            pulls: 0,
        }
    }
}

impl Environment for Levers {
    type Error = Jammed;

    fn valid_actions(&self) -> &[Action] {
        &self.actions
    }

    fn valid_observations(&self) -> &[Observation] {
        &self.observations
    }

    fn valid_rewards(&self) -> &[Reward] {
        &self.rewards
    }

    fn perform_action(&mut self, action: Action) -> Result<(Observation, Reward), Self::Error> {
        if self.jam_after == Some(self.pulls) {
            return Err(Jammed);
        }
        self.pulls += 1;
        Ok((Observation::from(0), Reward::from(action.value())))
    }
}

fn agent_for(env: &Levers, simulations: usize, seed: u64) -> Agent {
    let mut config = AgentConfig {
        depth: 4,
        ..AgentConfig::default()
    };
    config.search.horizon = 1;
    config.search.simulations = simulations;

    let alphabet = Alphabet::from_environment(env).expect("valid environment");
    let mut agent = Agent::new(alphabet, config, seed).expect("valid agent");
    agent
        .model_update_percept(Observation::from(0), Reward::from(0))
        .expect("initial percept");
    agent
}

#[test]
fn agent_learns_which_lever_pays() {
    let mut env = Levers::new();
    let mut agent = agent_for(&env, 64, 3);

    let mut late_reward = 0;
    for cycle in 0..40 {
        let report = agent.step(&mut env).expect("cycle should succeed");
        if cycle >= 30 {
            late_reward += report.reward.value();
        }
    }

    assert_eq!(agent.age(), 40);
    assert!(late_reward >= 8, "late reward was {late_reward}");
}

#[test]
fn cycle_reports_track_the_agent() {
    let mut env = Levers::new();
    let mut agent = agent_for(&env, 16, 5);

    let mut total = 0;
    for expected_cycle in 1..=5 {
        let report = agent.step(&mut env).expect("cycle should succeed");
        total += report.reward.value();

        assert_eq!(report.cycle, expected_cycle);
        assert_eq!(report.reward.value(), report.action.value());
        assert_eq!(report.search.simulations, 16);
        assert_eq!(report.model_size, agent.model_size());
    }

    assert_eq!(agent.total_reward(), total);
    assert_eq!(agent.average_reward(), total as f64 / 5.0);
    // Initial percept, then five (action, percept) cycles.
    assert_eq!(agent.history_len(), 2 + 5 * 3);
    assert_eq!(agent.last_update(), UpdateKind::Percept);
}

#[test]
fn cycle_report_serializes_to_json() {
    let mut env = Levers::new();
    let mut agent = agent_for(&env, 8, 9);
    let report = agent.step(&mut env).expect("cycle should succeed");

    let json = report.to_json().expect("report should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["cycle"], 1);
    assert!(value["search"]["actions"].is_array());
}

#[test]
fn environment_failures_surface_as_agent_errors() {
    let mut env = Levers::new();
    env.jam_after = Some(2);
    let mut agent = agent_for(&env, 8, 11);

    agent.step(&mut env).expect("first pull");
    agent.step(&mut env).expect("second pull");
    let err = agent.step(&mut env).expect_err("third pull jams");

    assert!(matches!(err, AgentError::Environment(_)));
    assert_eq!(err.to_string(), "environment failed: the lever jammed");
    // The action was recorded before the environment failed.
    assert_eq!(agent.last_update(), UpdateKind::Action);
}

#[test]
fn default_agent_config_parses() {
    let config = AgentConfig::from_default_yaml().expect("default yaml should parse");
    assert_eq!(config, AgentConfig::default());

    let yaml = config.to_yaml().expect("config should serialize");
    assert_eq!(AgentConfig::from_yaml_str(&yaml).expect("round trip"), config);
}

#[test]
fn agent_config_rejects_invalid_search_settings() {
    let err = AgentConfig::from_yaml_str("depth: 8\nsearch:\n  simulations: 0\n")
        .expect_err("zero simulations");
    assert!(matches!(err, AgentConfigError::Search(_)));

    let partial = AgentConfig::from_yaml_str("learning_period: 25\n").expect("defaults fill in");
    assert_eq!(partial.learning_period, 25);
    assert_eq!(partial.depth, AgentConfig::default().depth);
}

#[test]
fn agent_rejects_an_invalid_config() {
    let mut config = AgentConfig::default();
    config.search.horizon = 0;
    let alphabet = Alphabet::new([0, 1], [0], [0, 1]).expect("valid alphabet");

    let err = Agent::new(alphabet, config, 0).expect_err("zero horizon");
    assert!(matches!(err, AgentError::Config(_)));
}
