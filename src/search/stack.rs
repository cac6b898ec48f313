//! Depth-first (preorder) search driven by an explicit stack.

use tracing::{instrument, trace};

use crate::domain::{Node, NodeId, NodeStore, OrderedStore, Tree};
use crate::search::{SearchCore, SearchResult, SearchStrategy};

/// Visits a node, then each child's subtree in children order.
pub struct DepthFirstSearch<'t, P, S = OrderedStore<P>> {
    core: SearchCore<'t, P, S>,
}

impl<'t, P, S: NodeStore<P>> DepthFirstSearch<'t, P, S> {
    pub fn new(tree: &'t Tree<P, S>) -> Self {
        Self {
            core: SearchCore::new(tree),
        }
    }

    /// Lazy traversal from the configured start node.
    ///
    /// Unlike [`SearchStrategy::get_nodes`] this leaves the search state
    /// untouched.
    pub fn iter(&self) -> SearchResult<DepthFirstIter<'_, 't, P, S>> {
        let start = self.core.require_start()?;
        Ok(DepthFirstIter {
            core: &self.core,
            stack: vec![(start, 0)],
            failed: false,
        })
    }
}

impl<'t, P: 't, S: NodeStore<P> + 't> SearchStrategy<'t, P, S> for DepthFirstSearch<'t, P, S> {
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

/// Lazy traversal returned by [`DepthFirstSearch::iter`].
///
/// The search borrows its tree, so the structure cannot change under a
/// running iterator. A child id that fails to resolve is still reported
/// once as an error, after which the iterator is exhausted.
pub struct DepthFirstIter<'s, 't, P, S> {
    core: &'s SearchCore<'t, P, S>,
    stack: Vec<(NodeId, usize)>,
    failed: bool,
}

impl<'s, 't, P, S: NodeStore<P>> Iterator for DepthFirstIter<'s, 't, P, S> {
    type Item = SearchResult<&'t Node<P>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let tree = self.core.tree;

        while let Some((current, depth)) = self.stack.pop() {
            let node = match tree.get_node(current) {
                Ok(node) => node,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };

            let included = self.core.accepts(node);
            if self.core.descends(included, depth) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push((child, depth + 1));
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
