//! Domain layer: nodes, stores and the tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod hooks;
pub mod node;
pub mod order;
pub mod store;
pub mod tree;

pub use error::{StoreError, StoreResult, TreeError, TreeResult};
pub use hooks::{NoopHandler, TreeEventHandler};
pub use node::{Node, NodeDescriptor, NodeId};
pub use order::{ById, ByPayload, NodeComparator};
pub use store::{NodeStore, OrderedStore, UnorderedStore};
pub use tree::{OrderedTree, Tree, TreeId, UnorderedTree};
