use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Error type for context tree updates and rollbacks.
pub enum ModelError {
    #[error("cannot revert {requested} symbols, history only holds {available}")]
    RevertBeyondHistory { requested: usize, available: usize },

    #[error("value {value} is not a binary symbol")]
    InvalidSymbol { value: u8 },
}
