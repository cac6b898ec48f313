//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Errors raised by a node store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    DuplicateKey(NodeId),

    #[error("invalid key: {0} (ids must be non-negative)")]
    InvalidKey(NodeId),

    #[error("non-existent key: {0}")]
    NonExistentKey(NodeId),
}

/// Errors raised when a tree operation would violate a structural invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("root already set to node {existing}, cannot make {rejected} a root")]
    AlreadySetRoot { existing: NodeId, rejected: NodeId },

    #[error("invalid parent node {parent} for node {node}")]
    InvalidParentNode { node: NodeId, parent: NodeId },

    #[error("circular graph detected at node {0}")]
    CircularGraph(NodeId),

    #[error("cannot delete interior node {0} without recursion")]
    DeleteInteriorNode(NodeId),

    #[error("node not in tree: {0}")]
    NodeNotInTree(NodeId),

    #[error("node id already set: {0}")]
    AlreadySetNodeId(NodeId),

    #[error("parent already set to {parent} for node {node:?}")]
    AlreadySetParent { node: Option<NodeId>, parent: NodeId },

    #[error("tree has no root")]
    RootUnset,

    #[error("tree must be empty before hydration, found {0} nodes")]
    TreeNotEmpty(usize),

    #[error("node id unset")]
    NodeIdUnset,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
