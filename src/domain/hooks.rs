//! Mutation hooks invoked around tree add/delete.

use crate::domain::node::Node;

/// Receives notifications around node insertion and removal.
///
/// Hooks run synchronously on the caller's thread. All methods default to
/// no-ops.
pub trait TreeEventHandler<P> {
    fn before_add_node(&mut self, _node: &Node<P>) {}

    fn after_add_node(&mut self, _node: &Node<P>) {}

    fn before_delete_node(&mut self, _node: &Node<P>) {}

    fn after_delete_node(&mut self, _node: &Node<P>) {}
}

/// Handler that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl<P> TreeEventHandler<P> for NoopHandler {}
