mod arena;
pub mod context_tree;
pub mod error;
mod history;
pub mod ids;
mod journal;
mod node;
pub mod snapshot;
pub mod symbol;

#[cfg(test)]
mod tests;
