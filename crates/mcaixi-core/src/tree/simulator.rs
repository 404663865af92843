use rand::{Rng, RngCore};

use crate::tree::{
    error::SearchError,
    ids::{Action, Observation, Reward},
};

/// The model side of a lookahead search.
///
/// The search tree never sees the environment. It drives a simulator that applies
/// hypothetical actions, samples percepts from a learned model, and can be rolled
/// back to a checkpoint once a rollout is over. Every change a rollout makes must be
/// undone by [`Simulator::restore`]; the next rollout assumes it starts from the
/// checkpointed state.
pub trait Simulator {
    /// State captured before a rollout.
    type Checkpoint;
    type Error: From<SearchError>;

    /// Actions available at every decision, in a fixed order.
    fn legal_actions(&self) -> &[Action];

    /// Smallest and largest reward a single percept can carry.
    fn reward_bounds(&self) -> (Reward, Reward);

    /// Source of randomness for tie breaking and rollouts.
    fn rng(&mut self) -> &mut dyn RngCore;

    /// Apply a simulated action.
    fn apply_action(&mut self, action: Action) -> Result<(), Self::Error>;

    /// Sample a percept from the model and apply it.
    fn sample_percept(&mut self) -> Result<(Observation, Reward), Self::Error>;

    fn checkpoint(&self) -> Self::Checkpoint;

    /// Put the simulator back to `checkpoint`, discarding everything simulated since.
    fn restore(&mut self, checkpoint: &Self::Checkpoint) -> Result<(), Self::Error>;

    /// Pick a legal action uniformly at random.
    fn random_action(&mut self) -> Result<Action, Self::Error> {
        let count = self.legal_actions().len();
        if count == 0 {
            return Err(SearchError::NoLegalActions.into());
        }
        let index = self.rng().gen_range(0..count);
        Ok(self.legal_actions()[index])
    }

    /// Uniform random rollout policy: `horizon` cycles of a random action followed
    /// by a sampled percept. Returns the summed reward.
    fn playout(&mut self, horizon: usize) -> Result<f64, Self::Error> {
        let mut total = 0.0;
        for _ in 0..horizon {
            let action = self.random_action()?;
            self.apply_action(action)?;
            let (_, reward) = self.sample_percept()?;
            total += reward.as_f64();
        }
        Ok(total)
    }
}
