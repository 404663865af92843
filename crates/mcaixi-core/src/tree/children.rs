use crate::tree::ids::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Children of one search node keyed by the action or observation that leads to them,
/// kept in insertion order.
/// Branching is small (the legal actions, or the percepts actually sampled), so a
/// linear scan beats hashing here.
pub struct ChildSet<K> {
    children: Vec<(K, NodeId)>,
}

impl<K> ChildSet<K>
where
    K: Copy + Eq,
{
    /// Create a new empty ChildSet
    pub fn new() -> Self {
        ChildSet {
            children: Vec::new(),
        }
    }

    /// Find the child reached through `key`.
    pub fn get(&self, key: K) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, child)| *child)
    }

    /// Register a new child. Returns `None` if `key` already has one.
    pub fn insert(&mut self, key: K, child: NodeId) -> Option<NodeId> {
        if self.get(key).is_some() {
            return None;
        }
        self.children.push((key, child));
        Some(child)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, NodeId)> + '_ {
        self.children.iter().copied()
    }
}

impl<K> Default for ChildSet<K>
where
    K: Copy + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
