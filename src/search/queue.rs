//! Breadth-first (level order) search driven by a FIFO queue.

use std::collections::VecDeque;

use tracing::{instrument, trace};

use crate::domain::{Node, NodeId, NodeStore, OrderedStore, Tree};
use crate::search::{SearchCore, SearchResult, SearchStrategy};

/// Visits every node at depth d before any node at depth d + 1.
pub struct BreadthFirstSearch<'t, P, S = OrderedStore<P>> {
    core: SearchCore<'t, P, S>,
}

impl<'t, P, S: NodeStore<P>> BreadthFirstSearch<'t, P, S> {
    pub fn new(tree: &'t Tree<P, S>) -> Self {
        Self {
            core: SearchCore::new(tree),
        }
    }

    /// Lazy traversal from the configured start node; state is untouched.
    pub fn iter(&self) -> SearchResult<BreadthFirstIter<'_, 't, P, S>> {
        let start = self.core.require_start()?;
        let mut queue = VecDeque::new();
        queue.push_back((start, 0));
        Ok(BreadthFirstIter {
            core: &self.core,
            queue,
            failed: false,
        })
    }
}

impl<'t, P: 't, S: NodeStore<P> + 't> SearchStrategy<'t, P, S> for BreadthFirstSearch<'t, P, S> {
    fn core(&self) -> &SearchCore<'t, P, S> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SearchCore<'t, P, S> {
        &mut self.core
    }

    #[instrument(level = "debug", skip(self), fields(start = ?self.core.start))]
    fn traverse(&self) -> SearchResult<Vec<&'t Node<P>>> {
        self.iter()?.collect()
    }
}

/// Lazy traversal returned by [`BreadthFirstSearch::iter`].
///
/// The search borrows its tree, so the structure cannot change under a
/// running iterator. A child id that fails to resolve is still reported
/// once as an error, after which the iterator is exhausted.
pub struct BreadthFirstIter<'s, 't, P, S> {
    core: &'s SearchCore<'t, P, S>,
    queue: VecDeque<(NodeId, usize)>,
    failed: bool,
}

impl<'s, 't, P, S: NodeStore<P>> Iterator for BreadthFirstIter<'s, 't, P, S> {
    type Item = SearchResult<&'t Node<P>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let tree = self.core.tree;

        while let Some((current, depth)) = self.queue.pop_front() {
            let node = match tree.get_node(current) {
                Ok(node) => node,
                Err(e) => {
                    self.failed = true;
                    self.queue.clear();
                    return Some(Err(e.into()));
                }
            };

            let included = self.core.accepts(node);
            if self.core.descends(included, depth) {
                for &child in node.children() {
                    self.queue.push_back((child, depth + 1));
                }
            }
            if included {
                trace!(id = current, depth, "visit");
                return Some(Ok(node));
            }
        }
        None
    }
}
