use mcaixi_core::{Action, Observation, Reward};
use mcaixi_ctw::Symbol;

use crate::{environment::Environment, error::AgentError};

/// Bits needed to write `value` in binary, at least one.
pub fn bits_required(value: u64) -> usize {
    (u64::BITS - value.leading_zeros()).max(1) as usize
}

/// Fixed-width big-endian encoding of the low `bits` bits of `value`.
pub fn encode(value: u64, bits: usize) -> Vec<Symbol> {
    (0..bits)
        .rev()
        .map(|shift| Symbol::from(shift < 64 && (value >> shift) & 1 == 1))
        .collect()
}

/// Inverse of [`encode`].
pub fn decode(symbols: &[Symbol]) -> u64 {
    symbols
        .iter()
        .fold(0, |value, symbol| (value << 1) | u64::from(symbol.is_one()))
}

/// The value sets of the three channels and their bit widths.
///
/// Each channel is as wide as its largest value needs. A percept is the reward
/// bits followed by the observation bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    actions: Vec<Action>,
    observations: Vec<Observation>,
    rewards: Vec<Reward>,
    action_bits: usize,
    observation_bits: usize,
    reward_bits: usize,
}

impl Alphabet {
    /// Build an alphabet from raw values. Each set is sorted and deduplicated and
    /// must not be empty.
    pub fn new(
        actions: impl IntoIterator<Item = u64>,
        observations: impl IntoIterator<Item = u64>,
        rewards: impl IntoIterator<Item = u64>,
    ) -> Result<Self, AgentError> {
        let actions = value_set(actions, "action")?;
        let observations = value_set(observations, "observation")?;
        let rewards = value_set(rewards, "reward")?;

        Ok(Alphabet {
            action_bits: width(&actions),
            observation_bits: width(&observations),
            reward_bits: width(&rewards),
            actions: actions.into_iter().map(Action::from).collect(),
            observations: observations.into_iter().map(Observation::from).collect(),
            rewards: rewards.into_iter().map(Reward::from).collect(),
        })
    }

    /// Take the value sets an environment advertises.
    pub fn from_environment<E>(env: &E) -> Result<Self, AgentError>
    where
        E: Environment + ?Sized,
    {
        Self::new(
            env.valid_actions().iter().map(Action::value),
            env.valid_observations().iter().map(Observation::value),
            env.valid_rewards().iter().map(Reward::value),
        )
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn action_bits(&self) -> usize {
        self.action_bits
    }

    pub fn observation_bits(&self) -> usize {
        self.observation_bits
    }

    pub fn reward_bits(&self) -> usize {
        self.reward_bits
    }

    pub fn percept_bits(&self) -> usize {
        self.reward_bits + self.observation_bits
    }

    pub fn min_reward(&self) -> Reward {
        self.rewards.first().copied().unwrap_or(Reward::from(0))
    }

    pub fn max_reward(&self) -> Reward {
        self.rewards.last().copied().unwrap_or(Reward::from(0))
    }

    pub fn is_valid_action(&self, action: Action) -> bool {
        self.actions.binary_search(&action).is_ok()
    }

    pub fn is_valid_observation(&self, observation: Observation) -> bool {
        self.observations.binary_search(&observation).is_ok()
    }

    pub fn is_valid_reward(&self, reward: Reward) -> bool {
        self.rewards.binary_search(&reward).is_ok()
    }

    pub fn encode_action(&self, action: Action) -> Result<Vec<Symbol>, AgentError> {
        if !self.is_valid_action(action) {
            return Err(AgentError::InvalidAction {
                action: action.value(),
            });
        }
        Ok(encode(action.value(), self.action_bits))
    }

    pub fn encode_percept(
        &self,
        observation: Observation,
        reward: Reward,
    ) -> Result<Vec<Symbol>, AgentError> {
        if !self.is_valid_observation(observation) {
            return Err(AgentError::InvalidObservation {
                observation: observation.value(),
            });
        }
        if !self.is_valid_reward(reward) {
            return Err(AgentError::InvalidReward {
                reward: reward.value(),
            });
        }
        let mut symbols = encode(reward.value(), self.reward_bits);
        symbols.extend(encode(observation.value(), self.observation_bits));
        Ok(symbols)
    }

    /// Read an action back from exactly `action_bits` symbols. The result is not
    /// checked against the action set: a sampled bit string may name a value the
    /// environment never uses.
    pub fn decode_action(&self, symbols: &[Symbol]) -> Result<Action, AgentError> {
        check_len(symbols, self.action_bits)?;
        Ok(Action::from(decode(symbols)))
    }

    /// Read a percept back from exactly `percept_bits` symbols, reward first.
    pub fn decode_percept(&self, symbols: &[Symbol]) -> Result<(Observation, Reward), AgentError> {
        check_len(symbols, self.percept_bits())?;
        let (reward, observation) = symbols.split_at(self.reward_bits);
        Ok((Observation::from(decode(observation)), Reward::from(decode(reward))))
    }
}

fn value_set(
    values: impl IntoIterator<Item = u64>,
    channel: &'static str,
) -> Result<Vec<u64>, AgentError> {
    let mut values: Vec<u64> = values.into_iter().collect();
    values.sort_unstable();
    values.dedup();
    if values.is_empty() {
        return Err(AgentError::EmptyChannel { channel });
    }
    Ok(values)
}

fn width(values: &[u64]) -> usize {
    values.last().copied().map_or(1, bits_required)
}

fn check_len(symbols: &[Symbol], expected: usize) -> Result<(), AgentError> {
    if symbols.len() != expected {
        return Err(AgentError::SymbolCount {
            expected,
            got: symbols.len(),
        });
    }
    Ok(())
}
