//! Node stores: keyed storage for the nodes of a tree.
//!
//! Two variants share the [`NodeStore`] contract:
//! - [`OrderedStore`] iterates in insertion order.
//! - [`UnorderedStore`] keeps nodes in a generational arena and iterates in
//!   arena slot order, which is stable between mutations but not tied to
//!   insertion order once slots are reused.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use indexmap::IndexMap;
use tracing::instrument;

use crate::domain::error::{StoreError, StoreResult};
use crate::domain::node::{Node, NodeId};

/// Keyed node storage used by [`crate::domain::Tree`].
pub trait NodeStore<P>: Default {
    /// Inserts `node` under `id`.
    ///
    /// Fails with [`StoreError::InvalidKey`] for negative ids and
    /// [`StoreError::DuplicateKey`] if `id` is already present.
    fn add(&mut self, id: NodeId, node: Node<P>) -> StoreResult<()>;

    fn get(&self, id: NodeId) -> StoreResult<&Node<P>>;

    fn get_mut(&mut self, id: NodeId) -> StoreResult<&mut Node<P>>;

    fn remove(&mut self, id: NodeId) -> StoreResult<Node<P>>;

    fn contains(&self, id: NodeId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Node<P>> + '_>;

    fn ids(&self) -> Vec<NodeId> {
        self.iter().map(Node::id).collect()
    }
}

fn check_key(id: NodeId) -> StoreResult<()> {
    if id < 0 {
        return Err(StoreError::InvalidKey(id));
    }
    Ok(())
}

/// Insertion-ordered node store.
pub struct OrderedStore<P> {
    nodes: IndexMap<NodeId, Node<P>>,
}

impl<P> Default for OrderedStore<P> {
    fn default() -> Self {
        Self {
            nodes: IndexMap::new(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for OrderedStore<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.nodes.iter()).finish()
    }
}

impl<P> NodeStore<P> for OrderedStore<P> {
    #[instrument(level = "trace", skip(self, node))]
    fn add(&mut self, id: NodeId, node: Node<P>) -> StoreResult<()> {
        check_key(id)?;
        if self.nodes.contains_key(&id) {
            return Err(StoreError::DuplicateKey(id));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    fn get(&self, id: NodeId) -> StoreResult<&Node<P>> {
        self.nodes.get(&id).ok_or(StoreError::NonExistentKey(id))
    }

    fn get_mut(&mut self, id: NodeId) -> StoreResult<&mut Node<P>> {
        self.nodes.get_mut(&id).ok_or(StoreError::NonExistentKey(id))
    }

    #[instrument(level = "trace", skip(self))]
    fn remove(&mut self, id: NodeId) -> StoreResult<Node<P>> {
        // shift_remove keeps the remaining entries in insertion order
        self.nodes
            .shift_remove(&id)
            .ok_or(StoreError::NonExistentKey(id))
    }

    fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Node<P>> + '_> {
        Box::new(self.nodes.values())
    }
}

/// Arena-backed node store with an id index.
pub struct UnorderedStore<P> {
    arena: Arena<Node<P>>,
    index: HashMap<NodeId, Index>,
}

impl<P> Default for UnorderedStore<P> {
    fn default() -> Self {
        Self {
            arena: Arena::new(),
            index: HashMap::new(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for UnorderedStore<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.arena.iter().map(|(_, node)| node))
            .finish()
    }
}

impl<P> NodeStore<P> for UnorderedStore<P> {
    #[instrument(level = "trace", skip(self, node))]
    fn add(&mut self, id: NodeId, node: Node<P>) -> StoreResult<()> {
        check_key(id)?;
        if self.index.contains_key(&id) {
            return Err(StoreError::DuplicateKey(id));
        }
        let idx = self.arena.insert(node);
        self.index.insert(id, idx);
        Ok(())
    }

    fn get(&self, id: NodeId) -> StoreResult<&Node<P>> {
        self.index
            .get(&id)
            .and_then(|&idx| self.arena.get(idx))
            .ok_or(StoreError::NonExistentKey(id))
    }

    fn get_mut(&mut self, id: NodeId) -> StoreResult<&mut Node<P>> {
        match self.index.get(&id) {
            Some(&idx) => self
                .arena
                .get_mut(idx)
                .ok_or(StoreError::NonExistentKey(id)),
            None => Err(StoreError::NonExistentKey(id)),
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn remove(&mut self, id: NodeId) -> StoreResult<Node<P>> {
        let idx = self
            .index
            .remove(&id)
            .ok_or(StoreError::NonExistentKey(id))?;
        self.arena
            .remove(idx)
            .ok_or(StoreError::NonExistentKey(id))
    }

    fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Node<P>> + '_> {
        Box::new(self.arena.iter().map(|(_, node)| node))
    }
}
