mod agent;
mod alphabet;
mod config;
mod environment;
mod error;
mod report;
mod undo;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use alphabet::{Alphabet, bits_required, decode, encode};
pub use config::{AgentConfig, AgentConfigError};
pub use environment::Environment;
pub use error::AgentError;
pub use report::CycleReport;
pub use undo::{Undo, UpdateKind};

pub use mcaixi_core::{Action, Observation, Reward, SearchConfig, SearchReport};
pub use mcaixi_ctw::Symbol;
