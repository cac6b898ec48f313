//! Search layer: restartable, filtered, depth-bounded traversals
//!
//! A search is bound to one tree and one start node at a time and moves
//! through [`SearchState`]: `Uninitialized` until a start node is set,
//! `Ready` until it runs, `Done` afterwards. Running again without changes
//! repeats the identical traversal.
//!
//! - [`DepthFirstSearch`]: preorder, children in the tree's children order
//! - [`BreadthFirstSearch`]: level order, FIFO within a level

pub mod error;
pub mod filter;
pub mod queue;
pub mod stack;

use tracing::{debug, instrument};

use crate::domain::{Node, NodeId, NodeStore, Tree};

pub use error::{SearchError, SearchResult};
pub use filter::{AcceptAll, FilterDescent, SearchFilter, SearchFilterExt};
pub use queue::{BreadthFirstIter, BreadthFirstSearch};
pub use stack::{DepthFirstIter, DepthFirstSearch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Uninitialized,
    Ready,
    Done,
}

/// Configuration and state shared by every search strategy.
pub struct SearchCore<'t, P, S> {
    tree: &'t Tree<P, S>,
    start: Option<NodeId>,
    filter: Option<Box<dyn SearchFilter<P> + 't>>,
    descent: FilterDescent,
    max_levels: Option<usize>,
    state: SearchState,
}

impl<'t, P, S: NodeStore<P>> SearchCore<'t, P, S> {
    pub fn new(tree: &'t Tree<P, S>) -> Self {
        Self {
            tree,
            start: None,
            filter: None,
            descent: FilterDescent::default(),
            max_levels: None,
            state: SearchState::Uninitialized,
        }
    }

    pub fn tree(&self) -> &'t Tree<P, S> {
        self.tree
    }

    pub fn start_node(&self) -> Option<NodeId> {
        self.start
    }

    pub fn max_levels(&self) -> Option<usize> {
        self.max_levels
    }

    pub fn descent(&self) -> FilterDescent {
        self.descent
    }

    /// Start node of a runnable search.
    pub(crate) fn require_start(&self) -> SearchResult<NodeId> {
        self.start.ok_or(SearchError::StartNodeUnset)
    }

    pub(crate) fn accepts(&self, node: &Node<P>) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter.accepts(node))
    }

    /// Whether children of a node at `depth` are visited.
    pub(crate) fn descends(&self, included: bool, depth: usize) -> bool {
        let below_bound = self.max_levels.map_or(true, |max| depth < max);
        below_bound && (included || self.descent == FilterDescent::Transparent)
    }

    /// A finished search becomes runnable again once its configuration changes.
    fn invalidate(&mut self) {
        if self.state == SearchState::Done {
            self.state = SearchState::Ready;
        }
    }
}

/// Contract shared by the depth-first and breadth-first searches.
pub trait SearchStrategy<'t, P: 't, S: NodeStore<P> + 't> {
    fn core(&self) -> &SearchCore<'t, P, S>;

    fn core_mut(&mut self) -> &mut SearchCore<'t, P, S>;

    /// Runs one complete traversal from the configured start node.
    fn traverse(&self) -> SearchResult<Vec<&'t Node<P>>>;

    fn state(&self) -> SearchState {
        self.core().state
    }

    /// Binds the start node and discards any previous traversal.
    ///
    /// Fails with [`crate::domain::TreeError::NodeNotInTree`] if `id` is
    /// not part of the bound tree; the search is left unchanged then.
    fn set_start_node(&mut self, id: NodeId) -> SearchResult<()> {
        self.core().tree.get_node(id)?;
        let core = self.core_mut();
        core.start = Some(id);
        core.state = SearchState::Ready;
        Ok(())
    }

    fn set_filter(&mut self, filter: impl SearchFilter<P> + 't)
    where
        Self: Sized,
    {
        let core = self.core_mut();
        core.filter = Some(Box::new(filter));
        core.invalidate();
    }

    fn clear_filter(&mut self) {
        let core = self.core_mut();
        core.filter = None;
        core.invalidate();
    }

    fn set_descent(&mut self, descent: FilterDescent) {
        let core = self.core_mut();
        core.descent = descent;
        core.invalidate();
    }

    /// Bounds the search depth; the start node is depth 0.
    ///
    /// Nodes deeper than `levels` are never visited. `levels` must be > 0.
    fn set_max_levels(&mut self, levels: i64) -> SearchResult<()> {
        if levels <= 0 {
            return Err(SearchError::SetMaxSearchLevels(levels));
        }
        let core = self.core_mut();
        core.max_levels = Some(levels as usize);
        core.invalidate();
        Ok(())
    }

    fn clear_max_levels(&mut self) {
        let core = self.core_mut();
        core.max_levels = None;
        core.invalidate();
    }

    /// Runs the traversal and returns the included nodes in visit order.
    ///
    /// Fails with [`SearchError::StartNodeUnset`] before a start node is set.
    #[instrument(level = "debug", skip(self))]
    fn get_nodes(&mut self) -> SearchResult<Vec<&'t Node<P>>> {
        self.core().require_start()?;
        let nodes = self.traverse()?;
        self.core_mut().state = SearchState::Done;
        debug!(count = nodes.len(), "search finished");
        Ok(nodes)
    }
}
