use rand::Rng;

use crate::tree::{
    arena::Arena,
    config::SearchConfig,
    error::SearchError,
    ids::{Action, NodeId, Observation},
    node::{NodeKind, SearchNode},
    report::{ActionReport, RunMetrics, SearchReport},
    simulator::Simulator,
};

#[derive(Debug, Clone)]
/// Lookahead tree for one decision (ρUCT).
///
/// Owns the arena (the root decision node is always at index 0). Rollouts run
/// against a [`Simulator`], which is checkpointed before the first rollout and
/// restored after every one. The tree is meant to be dropped once the action
/// has been chosen.
pub struct SearchTree {
    arena: Arena<SearchNode>,
    config: SearchConfig,
}

impl SearchTree {
    /// Create a tree holding a single root decision node.
    pub fn new(config: SearchConfig) -> Self {
        let mut arena = Arena::new();
        let _ = arena.allocate(SearchNode::decision());
        SearchTree { arena, config }
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        NodeId::from(0)
    }

    /// Return how many nodes exist in the tree arena.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Return an immutable node handle.
    pub fn node(&self, node_id: NodeId) -> Result<&SearchNode, SearchError> {
        self.arena
            .get(node_id)
            .ok_or(SearchError::MissingNode { node_id })
    }

    fn node_mut(&mut self, node_id: NodeId) -> Result<&mut SearchNode, SearchError> {
        self.arena
            .get_mut(node_id)
            .ok_or(SearchError::MissingNode { node_id })
    }

    /// Run `config.simulations` rollouts from the root, restoring the simulator
    /// after each one.
    pub fn run<S>(&mut self, sim: &mut S) -> Result<RunMetrics, S::Error>
    where
        S: Simulator,
    {
        let checkpoint = sim.checkpoint();
        let mut metrics = RunMetrics::new(self.config.simulations);

        for simulation in 0..self.config.simulations {
            let sampled = self.sample(sim, self.root_id(), self.config.horizon);
            // Restore even when the rollout failed.
            let restored = sim.restore(&checkpoint);
            let simulated_return = sampled?;
            restored?;

            log::trace!("rollout {simulation} returned {simulated_return:.4}");
            metrics.record(simulated_return);
        }

        log::debug!(
            "search finished: {} rollouts, {} nodes, average return {:.4}",
            metrics.simulations_completed,
            self.node_count(),
            metrics.average_return
        );
        Ok(metrics)
    }

    /// Simulate one trajectory of `horizon` action/percept cycles below `node_id`
    /// and return the reward collected.
    ///
    /// Only the chance → decision step consumes horizon: one cycle is an action
    /// followed by a percept. An unvisited decision node is not expanded further;
    /// its value is estimated with [`Simulator::playout`] instead.
    pub fn sample<S>(&mut self, sim: &mut S, node_id: NodeId, horizon: usize) -> Result<f64, S::Error>
    where
        S: Simulator,
    {
        if horizon == 0 {
            return Ok(0.0);
        }

        let (is_decision, unvisited) = {
            let node = self.node(node_id)?;
            (node.is_decision(), node.stats().is_unvisited())
        };

        let simulated_return = if !is_decision {
            let (observation, reward) = sim.sample_percept()?;
            let child = self.child_for_observation(node_id, observation)?;
            reward.as_f64() + self.sample(sim, child, horizon - 1)?
        } else if unvisited {
            sim.playout(horizon)?
        } else {
            let action = self.select_action(sim, node_id)?;
            sim.apply_action(action)?;
            let child = self.child_for_action(node_id, action)?;
            self.sample(sim, child, horizon)?
        };

        self.node_mut(node_id)?.record(simulated_return);
        Ok(simulated_return)
    }

    /// UCB action choice at a decision node.
    ///
    /// Untried actions come first, picked uniformly at random. Once every legal
    /// action has a child, the action maximising
    /// `mean / (horizon * reward_span) + C * sqrt(ln(visits) / child_visits)` wins,
    /// ties going to the earliest legal action.
    pub fn select_action<S>(&self, sim: &mut S, node_id: NodeId) -> Result<Action, S::Error>
    where
        S: Simulator,
    {
        let node = self.node(node_id)?;
        let NodeKind::Decision(children) = node.kind() else {
            return Err(SearchError::NotADecisionNode { node_id }.into());
        };

        let legal = sim.legal_actions();
        if legal.is_empty() {
            return Err(SearchError::NoLegalActions.into());
        }
        let unexplored: Vec<Action> = legal
            .iter()
            .copied()
            .filter(|action| children.get(*action).is_none())
            .collect();
        if !unexplored.is_empty() {
            let index = sim.rng().gen_range(0..unexplored.len());
            return Ok(unexplored[index]);
        }

        let span = self.return_span(sim)?;
        let log_visits = (node.visits().max(1) as f64).ln();
        let mut best: Option<(Action, f64)> = None;

        for &action in sim.legal_actions() {
            let Some(child_id) = children.get(action) else {
                continue;
            };
            // Every chance child is sampled as soon as it is created, so visits >= 1.
            let child = self.node(child_id)?;
            let score = child.mean() / span
                + self.config.exploration * (log_visits / child.visits() as f64).sqrt();

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((action, score));
            }
        }

        best.map(|(action, _)| action)
            .ok_or_else(|| SearchError::NoLegalActions.into())
    }

    /// Pick the root action with the highest mean return.
    ///
    /// The scan starts from a uniformly drawn default action, so untried actions
    /// can still be returned when nothing was explored, and each mean gets a small
    /// uniform jitter (`config.tie_noise`) to break exact ties.
    pub fn best_action<S>(&self, sim: &mut S) -> Result<Action, S::Error>
    where
        S: Simulator,
    {
        let default = sim.random_action()?;
        let root = self.node(self.root_id())?;

        let mut candidates = Vec::new();
        for &action in sim.legal_actions() {
            if let Some(child_id) = root.action_child(action) {
                candidates.push((action, self.node(child_id)?.mean()));
            }
        }

        let mut best_action = default;
        let mut best_score = f64::NEG_INFINITY;
        if let Some(&(_, mean)) = candidates.iter().find(|(action, _)| *action == default) {
            best_score = mean + self.jitter(sim);
        }

        for (action, mean) in candidates {
            if action == default {
                continue;
            }
            let score = mean + self.jitter(sim);
            if score > best_score {
                best_action = action;
                best_score = score;
            }
        }

        Ok(best_action)
    }

    /// Root statistics for every tried action, in the order they were first tried.
    pub fn report(&self) -> Result<SearchReport, SearchError> {
        let root = self.node(self.root_id())?;
        let mut actions = Vec::new();
        if let NodeKind::Decision(children) = root.kind() {
            for (action, child_id) in children.iter() {
                let child = self.node(child_id)?;
                actions.push(ActionReport {
                    action: action.value(),
                    visits: child.visits(),
                    mean: child.mean(),
                });
            }
        }

        Ok(SearchReport {
            simulations: root.visits(),
            node_count: self.node_count(),
            root_mean: root.mean(),
            actions,
        })
    }

    /// Normaliser that maps a summed return into roughly `[0, 1]`.
    fn return_span<S>(&self, sim: &S) -> Result<f64, SearchError>
    where
        S: Simulator,
    {
        let (min, max) = sim.reward_bounds();
        if min > max {
            return Err(SearchError::InvalidRewardBounds {
                min: min.value(),
                max: max.value(),
            });
        }
        let span = self.config.horizon as f64 * (max.value() - min.value()) as f64;
        // A constant reward carries no signal; leave the means unscaled.
        Ok(if span > 0.0 { span } else { 1.0 })
    }

    fn jitter<S>(&self, sim: &mut S) -> f64
    where
        S: Simulator,
    {
        if self.config.tie_noise > 0.0 {
            sim.rng().gen_range(0.0..self.config.tie_noise)
        } else {
            0.0
        }
    }

    /// Chance child reached by `action`, created on first use.
    fn child_for_action(&mut self, node_id: NodeId, action: Action) -> Result<NodeId, SearchError> {
        if let Some(child) = self.node(node_id)?.action_child(action) {
            return Ok(child);
        }
        if !self.node(node_id)?.is_decision() {
            return Err(SearchError::NotADecisionNode { node_id });
        }

        let child = self.arena.allocate(SearchNode::chance());
        if let NodeKind::Decision(children) = self.node_mut(node_id)?.kind_mut() {
            children
                .insert(action, child)
                .ok_or(SearchError::ChildInsertFailed { node_id })?;
        }
        Ok(child)
    }

    /// Decision child reached by `observation`, created on first use.
    fn child_for_observation(
        &mut self,
        node_id: NodeId,
        observation: Observation,
    ) -> Result<NodeId, SearchError> {
        if let Some(child) = self.node(node_id)?.observation_child(observation) {
            return Ok(child);
        }

        if self.node(node_id)?.is_decision() {
            return Err(SearchError::NotAChanceNode { node_id });
        }

        let child = self.arena.allocate(SearchNode::decision());
        if let NodeKind::Chance(children) = self.node_mut(node_id)?.kind_mut() {
            children
                .insert(observation, child)
                .ok_or(SearchError::ChildInsertFailed { node_id })?;
        }
        Ok(child)
    }
}
