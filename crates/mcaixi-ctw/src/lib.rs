mod tree;

pub use tree::context_tree::ContextTree;
pub use tree::error::ModelError;
pub use tree::ids::NodeId;
pub use tree::snapshot::{ContextNodeSnapshot, ContextTreeSnapshot};
pub use tree::symbol::Symbol;
