mod arena;
pub mod children;
pub mod config;
pub mod error;
pub mod ids;
pub mod node;
pub mod report;
pub mod search_tree;
pub mod simulator;
pub mod stats;

#[cfg(test)]
mod tests;
