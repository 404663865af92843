use mcaixi_core::{Action, Observation, Reward};

/// A real environment the agent acts in.
///
/// The value sets fix the agent's [`crate::Alphabet`]; `perform_action` is only
/// called for real cycles, never during planning.
pub trait Environment {
    type Error: std::error::Error + Send + Sync + 'static;

    fn valid_actions(&self) -> &[Action];

    fn valid_observations(&self) -> &[Observation];

    fn valid_rewards(&self) -> &[Reward];

    /// Execute `action` and return the resulting percept.
    fn perform_action(&mut self, action: Action) -> Result<(Observation, Reward), Self::Error>;
}
