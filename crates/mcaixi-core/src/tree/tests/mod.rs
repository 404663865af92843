use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::tree::{
    error::SearchError,
    ids::{Action, Observation, Reward},
    simulator::Simulator,
};


/// Deterministic bandit: every percept pays the reward attached to the most recent
/// action and observes that action's index.
pub(super) struct BanditSim {
    actions: Vec<Action>,
    payouts: Vec<u64>,
    rng: ChaCha8Rng,
    pub trail: Vec<Step>,
    pub restores: usize,
    pub fail_on_percept: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Act(Action),
    Percept(Reward),
}

impl BanditSim {
    pub fn new(payouts: &[u64], seed: u64) -> Self {
        BanditSim {
            actions: (0..payouts.len() as u64).map(Action::from).collect(),
            payouts: payouts.to_vec(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            trail: Vec::new(),
            restores: 0,
            fail_on_percept: None,
        }
    }

    pub fn percepts(&self) -> usize {
        self.trail
            .iter()
            .filter(|step| matches!(step, Step::Percept(_)))
            .count()
    }
}

#[derive(Debug, PartialEq)]
pub(super) enum BanditError {
    Search(SearchError),
    Broken,
}

impl From<SearchError> for BanditError {
    fn from(err: SearchError) -> Self {
        BanditError::Search(err)
    }
}

impl Simulator for BanditSim {
    type Checkpoint = usize;
    type Error = BanditError;

    fn legal_actions(&self) -> &[Action] {
        &self.actions
    }

    fn reward_bounds(&self) -> (Reward, Reward) {
        let min = self.payouts.iter().copied().min().unwrap_or(0);
        let max = self.payouts.iter().copied().max().unwrap_or(0);
        (Reward::from(min), Reward::from(max))
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }

    fn apply_action(&mut self, action: Action) -> Result<(), Self::Error> {
        self.trail.push(Step::Act(action));
        Ok(())
    }

    fn sample_percept(&mut self) -> Result<(Observation, Reward), Self::Error> {
        if self.fail_on_percept == Some(self.percepts()) {
            return Err(BanditError::Broken);
        }
        let Some(Step::Act(action)) = self.trail.last().copied() else {
            return Err(BanditError::Broken);
        };
        let reward = Reward::from(self.payouts[action.value() as usize]);
        self.trail.push(Step::Percept(reward));
        Ok((Observation::from(action.value()), reward))
    }

    fn checkpoint(&self) -> Self::Checkpoint {
        self.trail.len()
    }

    fn restore(&mut self, checkpoint: &Self::Checkpoint) -> Result<(), Self::Error> {
        self.trail.truncate(*checkpoint);
        self.restores += 1;
        Ok(())
    }
}
