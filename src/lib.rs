//! Arena-backed hierarchical trees with pluggable traversal.
//!
//! A [`domain::Tree`] owns its nodes in a [`domain::NodeStore`] and links
//! them by id. Trees are built incrementally with
//! [`domain::Tree::add_node`] or in bulk with [`domain::Tree::hydrate`],
//! and walked with the strategies in [`search`].

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod search;
pub mod render;
pub mod util;

pub use domain::{
    Node, NodeDescriptor, NodeId, NodeStore, OrderedTree, StoreError, Tree, TreeError,
    TreeEventHandler, UnorderedTree,
};
pub use search::{
    BreadthFirstSearch, DepthFirstSearch, FilterDescent, SearchError, SearchFilter,
    SearchState, SearchStrategy,
};
