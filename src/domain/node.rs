//! Tree nodes and the flat descriptors they are hydrated from.

use std::fmt;

use crate::domain::error::{TreeError, TreeResult};

/// Caller-supplied node identity. Valid ids are non-negative.
pub type NodeId = i64;

/// Tree node stored in a node store.
///
/// Links to parent and children are ids into the owning tree's store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<P> {
    id: NodeId,
    parent_id: Option<NodeId>,
    payload: P,
    children: Vec<NodeId>,
}

impl<P> Node<P> {
    /// Creates a node with an empty children list.
    pub fn new(id: NodeId, parent_id: Option<NodeId>, payload: P) -> Self {
        Self {
            id,
            parent_id,
            payload,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Child ids in the tree's children order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub(crate) fn insert_child(&mut self, position: usize, child: NodeId) {
        self.children.insert(position, child);
    }

    pub(crate) fn remove_child(&mut self, child: NodeId) {
        self.children.retain(|&id| id != child);
    }
}

impl<P: fmt::Display> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.payload)
    }
}

/// Flat record a tree is hydrated from: id, optional parent id and payload.
///
/// Ids start unset when built with [`NodeDescriptor::new`] and may be
/// assigned exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor<P> {
    node_id: Option<NodeId>,
    parent_id: Option<NodeId>,
    payload: P,
}

impl<P> NodeDescriptor<P> {
    pub fn new(payload: P) -> Self {
        Self {
            node_id: None,
            parent_id: None,
            payload,
        }
    }

    /// Descriptor for a root candidate.
    pub fn root(node_id: NodeId, payload: P) -> Self {
        Self {
            node_id: Some(node_id),
            parent_id: None,
            payload,
        }
    }

    pub fn child(node_id: NodeId, parent_id: NodeId, payload: P) -> Self {
        Self {
            node_id: Some(node_id),
            parent_id: Some(parent_id),
            payload,
        }
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.node_id
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn set_node_id(&mut self, node_id: NodeId) -> TreeResult<()> {
        if let Some(existing) = self.node_id {
            return Err(TreeError::AlreadySetNodeId(existing));
        }
        self.node_id = Some(node_id);
        Ok(())
    }

    pub fn set_parent_id(&mut self, parent_id: NodeId) -> TreeResult<()> {
        if let Some(existing) = self.parent_id {
            return Err(TreeError::AlreadySetParent {
                node: self.node_id,
                parent: existing,
            });
        }
        self.parent_id = Some(parent_id);
        Ok(())
    }

    /// Converts into an unlinked node; fails if the id was never set.
    pub(crate) fn into_node(self) -> TreeResult<Node<P>> {
        let id = self.node_id.ok_or(TreeError::NodeIdUnset)?;
        Ok(Node::new(id, self.parent_id, self.payload))
    }
}

impl<P> From<(NodeId, Option<NodeId>, P)> for NodeDescriptor<P> {
    fn from((node_id, parent_id, payload): (NodeId, Option<NodeId>, P)) -> Self {
        Self {
            node_id: Some(node_id),
            parent_id,
            payload,
        }
    }
}
