use std::ops::{Index, IndexMut};

use crate::tree::ids::NodeId;

/// Holds all context nodes in one vector and recycles the slots of removed nodes.
/// Rollback removes nodes regularly, so freed slots go on a free list instead of
/// shifting the storage.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<NodeId>,
    live: usize,
}

impl<T> Arena<T> {
    /// Create a new empty storage
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Allocate a new item, reusing a released slot when one is available.
    pub fn allocate(&mut self, item: T) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(item);
                id
            }
            None => {
                let id = NodeId::from(self.slots.len());
                self.slots.push(Some(item));
                id
            }
        }
    }

    /// Remove an item and hand its slot back to the free list.
    pub fn release(&mut self, node_id: NodeId) -> Option<T> {
        let item = self.slots.get_mut(node_id.index())?.take()?;
        self.free.push(node_id);
        self.live -= 1;
        Some(item)
    }

    /// Retrieve a live item from the arena
    pub fn get(&self, node_id: NodeId) -> Option<&T> {
        self.slots.get(node_id.index())?.as_ref()
    }

    /// Retrieve a live item from the arena as a mutable borrow
    pub fn get_mut(&mut self, node_id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(node_id.index())?.as_mut()
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Drop every item and forget all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}

/// Indexing a released slot is a broken tree invariant, not a recoverable error.
impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, node_id: NodeId) -> &T {
        match self.get(node_id) {
            Some(item) => item,
            None => panic!("node {} is not live", node_id.index()),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, node_id: NodeId) -> &mut T {
        match self.get_mut(node_id) {
            Some(item) => item,
            None => panic!("node {} is not live", node_id.index()),
        }
    }
}
