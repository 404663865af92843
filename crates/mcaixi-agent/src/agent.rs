use mcaixi_core::{Action, Observation, Reward, SearchReport, SearchTree, Simulator};
use mcaixi_ctw::ContextTree;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    alphabet::Alphabet,
    config::AgentConfig,
    environment::Environment,
    error::AgentError,
    report::CycleReport,
    undo::{Undo, UpdateKind},
};

#[derive(Debug, Clone)]
/// MC-AIXI-CTW agent: a context tree over the interleaved action/percept bits and
/// a ρUCT planner that searches against it.
///
/// Real cycles alternate strictly: a percept, then an action, then a percept, and
/// so on. Actions only extend the history; percepts are learned (until the
/// learning period runs out). Planning runs every rollout on the live model and
/// unwinds it with [`Agent::model_revert`] afterwards.
pub struct Agent {
    alphabet: Alphabet,
    config: AgentConfig,
    model: ContextTree,
    rng: ChaCha8Rng,
    age: u64,
    total_reward: u64,
    last_update: UpdateKind,
}

impl Agent {
    /// Create an agent with deterministic RNG seed.
    pub fn new(alphabet: Alphabet, config: AgentConfig, seed: u64) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Agent {
            model: ContextTree::new(config.depth),
            alphabet,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            age: 0,
            total_reward: 0,
            last_update: UpdateKind::Action,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The learned model.
    pub fn model(&self) -> &ContextTree {
        &self.model
    }

    /// Number of actions taken.
    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn total_reward(&self) -> u64 {
        self.total_reward
    }

    /// Reward per cycle so far, `0.0` before the first action.
    pub fn average_reward(&self) -> f64 {
        if self.age == 0 {
            0.0
        } else {
            self.total_reward as f64 / self.age as f64
        }
    }

    pub fn history_len(&self) -> usize {
        self.model.history_len()
    }

    /// Number of nodes in the context tree.
    pub fn model_size(&self) -> usize {
        self.model.size()
    }

    pub fn last_update(&self) -> UpdateKind {
        self.last_update
    }

    /// Forget everything learned. The agent expects a percept next.
    pub fn reset(&mut self) {
        self.model.clear();
        self.age = 0;
        self.total_reward = 0;
        self.last_update = UpdateKind::Action;
    }

    pub fn undo(&self) -> Undo {
        Undo {
            age: self.age,
            total_reward: self.total_reward,
            history_len: self.model.history_len(),
            last_update: self.last_update,
        }
    }

    /// Record the agent's own action. It becomes context but is not learned.
    pub fn model_update_action(&mut self, action: Action) -> Result<(), AgentError> {
        let symbols = self.alphabet.encode_action(action)?;
        self.check_order(UpdateKind::Action)?;

        self.model.update_history(&symbols);
        self.age += 1;
        self.last_update = UpdateKind::Action;
        Ok(())
    }

    /// Learn a percept from the environment. Past the learning period the percept
    /// only extends the history.
    pub fn model_update_percept(
        &mut self,
        observation: Observation,
        reward: Reward,
    ) -> Result<(), AgentError> {
        let symbols = self.alphabet.encode_percept(observation, reward)?;
        self.check_order(UpdateKind::Percept)?;

        let learning_over =
            self.config.learning_period > 0 && self.age > self.config.learning_period;
        if learning_over {
            self.model.update_history(&symbols);
        } else {
            self.model.update(&symbols);
        }
        self.total_reward += reward.value();
        self.last_update = UpdateKind::Percept;
        Ok(())
    }

    /// Unwind simulated cycles until the history is back at `undo.history_len`,
    /// then restore the scalar state.
    ///
    /// Percepts are reverted as learned symbols, so only cycles whose percepts went
    /// through [`Agent::generate_percept_and_update`] (or were learned by
    /// [`Agent::model_update_percept`]) can be unwound.
    pub fn model_revert(&mut self, undo: &Undo) -> Result<(), AgentError> {
        while self.model.history_len() > undo.history_len {
            match self.last_update {
                UpdateKind::Percept => {
                    self.model.revert(self.alphabet.percept_bits())?;
                    self.last_update = UpdateKind::Action;
                }
                UpdateKind::Action => {
                    self.model.revert_history(self.alphabet.action_bits())?;
                    self.last_update = UpdateKind::Percept;
                }
            }
        }

        self.age = undo.age;
        self.total_reward = undo.total_reward;
        self.last_update = undo.last_update;
        Ok(())
    }

    /// Model probability of the next percept being `(observation, reward)`.
    pub fn percept_probability(
        &mut self,
        observation: Observation,
        reward: Reward,
    ) -> Result<f64, AgentError> {
        let symbols = self.alphabet.encode_percept(observation, reward)?;
        Ok(self.model.predict(&symbols))
    }

    /// Model probability of the agent's own next action being `action`.
    pub fn action_probability(&mut self, action: Action) -> Result<f64, AgentError> {
        let symbols = self.alphabet.encode_action(action)?;
        Ok(self.model.predict(&symbols))
    }

    /// Sample an action from the model without changing it.
    pub fn generate_action(&mut self) -> Result<Action, AgentError> {
        let symbols = self
            .model
            .generate_random_symbols(self.alphabet.action_bits(), &mut self.rng);
        self.alphabet.decode_action(&symbols)
    }

    /// Sample a percept from the model without changing it.
    pub fn generate_percept(&mut self) -> Result<(Observation, Reward), AgentError> {
        let symbols = self
            .model
            .generate_random_symbols(self.alphabet.percept_bits(), &mut self.rng);
        self.alphabet.decode_percept(&symbols)
    }

    /// Sample a percept from the model and learn it, as if it had been observed.
    pub fn generate_percept_and_update(&mut self) -> Result<(Observation, Reward), AgentError> {
        self.check_order(UpdateKind::Percept)?;
        let symbols = self
            .model
            .generate_random_symbols_and_update(self.alphabet.percept_bits(), &mut self.rng);
        let (observation, reward) = self.alphabet.decode_percept(&symbols)?;

        self.total_reward += reward.value();
        self.last_update = UpdateKind::Percept;
        Ok((observation, reward))
    }

    /// Plan the next action with ρUCT.
    pub fn search(&mut self) -> Result<Action, AgentError> {
        self.search_with_report().map(|(action, _)| action)
    }

    /// Plan the next action and return the root statistics of the search as well.
    pub fn search_with_report(&mut self) -> Result<(Action, SearchReport), AgentError> {
        self.check_order(UpdateKind::Action)?;

        let mut tree = SearchTree::new(self.config.search.clone());
        tree.run(self)?;
        let action = tree.best_action(self)?;
        let report = tree.report()?;

        log::debug!(
            "cycle {}: chose action {} after {} rollouts over {} search nodes",
            self.age,
            action.value(),
            report.simulations,
            report.node_count
        );
        Ok((action, report))
    }

    /// One real cycle: plan, act in `env`, learn the percept it returns.
    pub fn step<E>(&mut self, env: &mut E) -> Result<CycleReport, AgentError>
    where
        E: Environment + ?Sized,
    {
        let (action, search) = self.search_with_report()?;
        self.model_update_action(action)?;

        let (observation, reward) = env
            .perform_action(action)
            .map_err(|err| AgentError::Environment(Box::new(err)))?;
        self.model_update_percept(observation, reward)?;

        log::debug!(
            "cycle {}: observation {}, reward {}, average reward {:.4}, model size {}",
            self.age,
            observation.value(),
            reward.value(),
            self.average_reward(),
            self.model_size()
        );

        Ok(CycleReport {
            cycle: self.age,
            action,
            observation,
            reward,
            average_reward: self.average_reward(),
            model_size: self.model_size(),
            search,
        })
    }

    fn check_order(&self, next: UpdateKind) -> Result<(), AgentError> {
        if self.last_update == next {
            return Err(AgentError::OutOfOrder {
                expected: opposite(next),
                got: next,
            });
        }
        Ok(())
    }
}

fn opposite(kind: UpdateKind) -> UpdateKind {
    match kind {
        UpdateKind::Action => UpdateKind::Percept,
        UpdateKind::Percept => UpdateKind::Action,
    }
}

impl Simulator for Agent {
    type Checkpoint = Undo;
    type Error = AgentError;

    fn legal_actions(&self) -> &[Action] {
        self.alphabet.actions()
    }

    fn reward_bounds(&self) -> (Reward, Reward) {
        (self.alphabet.min_reward(), self.alphabet.max_reward())
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }

    fn apply_action(&mut self, action: Action) -> Result<(), Self::Error> {
        self.model_update_action(action)
    }

    fn sample_percept(&mut self) -> Result<(Observation, Reward), Self::Error> {
        self.generate_percept_and_update()
    }

    fn checkpoint(&self) -> Self::Checkpoint {
        self.undo()
    }

    fn restore(&mut self, checkpoint: &Self::Checkpoint) -> Result<(), Self::Error> {
        self.model_revert(checkpoint)
    }
}
