use mcaixi_core::{Action, Observation, Reward};

use super::agent_with;
use crate::{error::AgentError, undo::UpdateKind};

fn percept(observation: u64, reward: u64) -> (Observation, Reward) {
    (Observation::from(observation), Reward::from(reward))
}

#[test]
fn fresh_agent_expects_a_percept_first() {
    let mut agent = agent_with(4, 0, 10);
    assert_eq!(agent.last_update(), UpdateKind::Action);

    let err = agent
        .model_update_action(Action::from(0))
        .expect_err("percept must come first");
    assert!(matches!(
        err,
        AgentError::OutOfOrder {
            expected: UpdateKind::Percept,
            got: UpdateKind::Action
        }
    ));
    assert_eq!(err.to_string(), "expected percept update next, got action update");
}

#[test]
fn updates_alternate_and_track_age_and_reward() {
    let mut agent = agent_with(4, 0, 10);
    let (observation, reward) = percept(1, 1);

    agent
        .model_update_percept(observation, reward)
        .expect("first percept");
    assert_eq!(agent.history_len(), 2);
    assert_eq!(agent.age(), 0);
    assert_eq!(agent.total_reward(), 1);
    assert_eq!(agent.average_reward(), 0.0);

    let err = agent
        .model_update_percept(observation, reward)
        .expect_err("two percepts in a row");
    assert!(matches!(err, AgentError::OutOfOrder { .. }));

    agent.model_update_action(Action::from(1)).expect("action");
    assert_eq!(agent.history_len(), 3);
    assert_eq!(agent.age(), 1);
    assert_eq!(agent.last_update(), UpdateKind::Action);
    assert_eq!(agent.average_reward(), 1.0);
}

#[test]
fn actions_extend_history_without_learning() {
    let mut agent = agent_with(4, 0, 10);
    agent
        .model_update_percept(Observation::from(0), Reward::from(0))
        .expect("percept");
    let before = agent.model().snapshot();

    agent.model_update_action(Action::from(1)).expect("action");

    let after = agent.model().snapshot();
    assert_eq!(after.nodes, before.nodes);
    assert_eq!(after.history_len, before.history_len + 1);
}

#[test]
fn invalid_values_leave_the_agent_unchanged() {
    let mut agent = agent_with(4, 0, 10);
    let undo = agent.undo();

    let err = agent
        .model_update_percept(Observation::from(0), Reward::from(7))
        .expect_err("reward outside the set");
    assert!(matches!(err, AgentError::InvalidReward { reward: 7 }));
    assert_eq!(agent.undo(), undo);
    assert_eq!(agent.history_len(), 0);
}

#[test]
fn percepts_past_the_learning_period_are_not_learned() {
    let mut agent = agent_with(4, 1, 10);
    let (observation, reward) = percept(1, 0);

    agent.model_update_percept(observation, reward).expect("age 0");
    agent.model_update_action(Action::from(0)).expect("age 1");
    agent.model_update_percept(observation, reward).expect("age 1 still learns");
    agent.model_update_action(Action::from(0)).expect("age 2");

    let before = agent.model().snapshot();
    agent.model_update_percept(observation, reward).expect("age 2 only records");
    let after = agent.model().snapshot();

    assert_eq!(after.nodes, before.nodes);
    assert_eq!(after.history_len, before.history_len + 2);
    assert_eq!(agent.total_reward(), 0);
}

#[test]
fn percept_probabilities_sum_to_one() {
    let mut agent = agent_with(3, 0, 10);
    for (observation, action) in [(1, 0), (0, 1), (1, 1)] {
        agent
            .model_update_percept(Observation::from(observation), Reward::from(observation))
            .expect("percept");
        agent.model_update_action(Action::from(action)).expect("action");
    }

    let mut total = 0.0;
    for observation in 0..2 {
        for reward in 0..2 {
            total += agent
                .percept_probability(Observation::from(observation), Reward::from(reward))
                .expect("valid percept");
        }
    }
    assert!((total - 1.0).abs() < 1e-9, "sum was {total}");
}

#[test]
fn action_probabilities_sum_to_one() {
    let mut agent = agent_with(3, 0, 10);
    agent
        .model_update_percept(Observation::from(1), Reward::from(1))
        .expect("percept");

    let zero = agent.action_probability(Action::from(0)).expect("valid");
    let one = agent.action_probability(Action::from(1)).expect("valid");
    assert!((zero + one - 1.0).abs() < 1e-9);
}

#[test]
fn generating_without_update_leaves_the_model_alone() {
    let mut agent = agent_with(3, 0, 10);
    agent
        .model_update_percept(Observation::from(1), Reward::from(0))
        .expect("percept");
    agent.model_update_action(Action::from(1)).expect("action");
    let before = agent.model().snapshot();
    let undo = agent.undo();

    for _ in 0..5 {
        let (observation, reward) = agent.generate_percept().expect("percept sample");
        assert!(observation.value() < 2 && reward.value() < 2);
        let action = agent.generate_action().expect("action sample");
        assert!(action.value() < 2);
    }

    assert_eq!(agent.model().snapshot(), before);
    assert_eq!(agent.undo(), undo);
}

#[test]
fn generated_percepts_are_learned_and_counted() {
    let mut agent = agent_with(3, 0, 10);
    agent
        .model_update_percept(Observation::from(0), Reward::from(1))
        .expect("percept");

    let err = agent
        .generate_percept_and_update()
        .expect_err("an action must come first");
    assert!(matches!(err, AgentError::OutOfOrder { .. }));

    agent.model_update_action(Action::from(0)).expect("action");
    let (_, reward) = agent.generate_percept_and_update().expect("sampled percept");

    assert_eq!(agent.history_len(), 5);
    assert_eq!(agent.total_reward(), 1 + reward.value());
    assert_eq!(agent.last_update(), UpdateKind::Percept);
}

#[test]
fn reset_forgets_everything() {
    let mut agent = agent_with(3, 0, 10);
    agent
        .model_update_percept(Observation::from(1), Reward::from(1))
        .expect("percept");
    agent.model_update_action(Action::from(1)).expect("action");

    agent.reset();

    assert_eq!(agent.age(), 0);
    assert_eq!(agent.total_reward(), 0);
    assert_eq!(agent.history_len(), 0);
    assert_eq!(agent.model_size(), 1);
    assert_eq!(agent.last_update(), UpdateKind::Action);
}
