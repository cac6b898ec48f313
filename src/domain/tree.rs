//! Tree structure over a node store with invariant enforcement.

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::domain::error::{StoreError, TreeError, TreeResult};
use crate::domain::hooks::{NoopHandler, TreeEventHandler};
use crate::domain::node::{Node, NodeDescriptor, NodeId};
use crate::domain::order::NodeComparator;
use crate::domain::store::{NodeStore, OrderedStore, UnorderedStore};

/// Caller-supplied tree identifier.
pub type TreeId = String;

/// Strict hierarchy of nodes with a single root.
///
/// Nodes are owned by the store `S`; parent and child links are ids. After
/// every mutating call the tree holds at most one root, every parent link
/// resolves, and no node is its own ancestor.
pub struct Tree<P, S = OrderedStore<P>> {
    tree_id: TreeId,
    root_id: Option<NodeId>,
    store: S,
    comparator: Option<Box<dyn NodeComparator<P>>>,
    handler: Box<dyn TreeEventHandler<P>>,
}

/// Tree with insertion-ordered node storage.
pub type OrderedTree<P> = Tree<P, OrderedStore<P>>;

/// Tree with arena-backed node storage.
pub type UnorderedTree<P> = Tree<P, UnorderedStore<P>>;

impl<P, S: fmt::Debug> fmt::Debug for Tree<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("tree_id", &self.tree_id)
            .field("root_id", &self.root_id)
            .field("ordered_children", &self.comparator.is_some())
            .field("store", &self.store)
            .finish()
    }
}

impl<P, S: NodeStore<P>> Tree<P, S> {
    /// Empty tree whose children keep insertion order.
    pub fn new(tree_id: impl Into<TreeId>) -> Self {
        Self {
            tree_id: tree_id.into(),
            root_id: None,
            store: S::default(),
            comparator: None,
            handler: Box::new(NoopHandler),
        }
    }

    /// Empty tree whose children are kept sorted by `comparator`.
    pub fn with_comparator(
        tree_id: impl Into<TreeId>,
        comparator: impl NodeComparator<P> + 'static,
    ) -> Self {
        let mut tree = Self::new(tree_id);
        tree.comparator = Some(Box::new(comparator));
        tree
    }

    /// Replaces the event handler notified around add/delete.
    pub fn with_handler(mut self, handler: impl TreeEventHandler<P> + 'static) -> Self {
        self.handler = Box::new(handler);
        self
    }
}

impl<P, S: NodeStore<P>> Tree<P, S> {
    pub fn tree_id(&self) -> &str {
        &self.tree_id
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.store.contains(id)
    }

    /// All nodes in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<P>> + '_ {
        self.store.iter()
    }

    /// Builds the tree from a flat list of descriptors.
    ///
    /// Nodes are created first and linked second, so descriptors may
    /// reference parents that appear later in the list. The tree must be
    /// empty; on failure it is left unchanged.
    #[instrument(level = "debug", skip(self, descriptors), fields(tree_id = %self.tree_id))]
    pub fn hydrate<I, D>(&mut self, descriptors: I) -> TreeResult<()>
    where
        I: IntoIterator<Item = D>,
        D: Into<NodeDescriptor<P>>,
    {
        if !self.is_empty() {
            return Err(TreeError::TreeNotEmpty(self.len()));
        }

        let mut store = S::default();
        let mut links = Vec::new();
        for descriptor in descriptors {
            let node = descriptor.into().into_node()?;
            links.push((node.id(), node.parent_id()));
            store.add(node.id(), node)?;
        }
        trace!(count = links.len(), "created nodes");

        let mut root_id = None;
        for &(id, parent_id) in &links {
            match parent_id {
                None => match root_id {
                    Some(existing) => {
                        return Err(TreeError::AlreadySetRoot {
                            existing,
                            rejected: id,
                        })
                    }
                    None => root_id = Some(id),
                },
                Some(parent) => {
                    if !store.contains(parent) {
                        return Err(TreeError::InvalidParentNode { node: id, parent });
                    }
                    attach_child(&mut store, self.comparator.as_deref(), parent, id)?;
                }
            }
        }

        check_acyclic(&store)?;

        debug!(count = store.len(), ?root_id, "hydrated tree");
        self.store = store;
        self.root_id = root_id;
        Ok(())
    }

    /// Inserts a single node below an existing parent, or as the root.
    ///
    /// Hooks fire only once every check has passed.
    #[instrument(level = "debug", skip(self, descriptor), fields(tree_id = %self.tree_id))]
    pub fn add_node(&mut self, descriptor: impl Into<NodeDescriptor<P>>) -> TreeResult<NodeId> {
        let node = descriptor.into().into_node()?;
        let id = node.id();

        if id < 0 {
            return Err(StoreError::InvalidKey(id).into());
        }
        if self.store.contains(id) {
            return Err(StoreError::DuplicateKey(id).into());
        }
        match node.parent_id() {
            None => {
                if let Some(existing) = self.root_id {
                    return Err(TreeError::AlreadySetRoot {
                        existing,
                        rejected: id,
                    });
                }
            }
            Some(parent) => {
                if !self.store.contains(parent) {
                    return Err(TreeError::InvalidParentNode { node: id, parent });
                }
            }
        }

        self.handler.before_add_node(&node);
        let parent_id = node.parent_id();
        self.store.add(id, node)?;
        match parent_id {
            Some(parent) => {
                attach_child(&mut self.store, self.comparator.as_deref(), parent, id)?
            }
            None => self.root_id = Some(id),
        }
        self.handler.after_add_node(self.store.get(id)?);

        debug!(id, ?parent_id, "added node");
        Ok(id)
    }

    /// Removes a node, or with `recurse` its whole branch in post-order.
    ///
    /// Returns the number of nodes removed. Deleting the root empties the
    /// tree.
    #[instrument(level = "debug", skip(self), fields(tree_id = %self.tree_id))]
    pub fn delete_node(&mut self, id: NodeId, recurse: bool) -> TreeResult<usize> {
        let node = self.get_node(id)?;
        if !node.is_leaf() && !recurse {
            return Err(TreeError::DeleteInteriorNode(id));
        }

        let victims = self.postorder_ids(id)?;
        for &victim in &victims {
            self.remove_one(victim)?;
        }

        debug!(id, removed = victims.len(), "deleted branch");
        Ok(victims.len())
    }

    fn remove_one(&mut self, id: NodeId) -> TreeResult<()> {
        self.handler.before_delete_node(self.store.get(id)?);
        let removed = self.store.remove(id)?;
        match removed.parent_id() {
            Some(parent) => self.store.get_mut(parent)?.remove_child(id),
            None => self.root_id = None,
        }
        self.handler.after_delete_node(&removed);
        trace!(id, "removed node");
        Ok(())
    }

    /// Ids of the subtree at `id`, children before parents, left to right.
    fn postorder_ids(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut order = Vec::new();
        let mut stack = vec![(id, false)];

        while let Some((current, visited)) = stack.pop() {
            if visited {
                order.push(current);
                continue;
            }
            let node = self.get_node(current)?;
            stack.push((current, true));
            for &child in node.children().iter().rev() {
                stack.push((child, false));
            }
        }
        Ok(order)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, id: NodeId) -> TreeResult<&Node<P>> {
        self.store
            .get(id)
            .map_err(|_| TreeError::NodeNotInTree(id))
    }

    pub fn get_root(&self) -> TreeResult<&Node<P>> {
        let root = self.root_id.ok_or(TreeError::RootUnset)?;
        self.get_node(root)
    }

    /// Parent of `id`, `None` for the root.
    pub fn get_parent_of(&self, id: NodeId) -> TreeResult<Option<&Node<P>>> {
        match self.get_node(id)?.parent_id() {
            Some(parent) => self.get_node(parent).map(Some),
            None => Ok(None),
        }
    }

    pub fn get_children_of(&self, id: NodeId) -> TreeResult<Vec<&Node<P>>> {
        self.get_node(id)?
            .children()
            .iter()
            .map(|&child| self.get_node(child))
            .collect()
    }

    /// Other children of the parent of `id`; empty for the root.
    pub fn get_siblings_of(&self, id: NodeId) -> TreeResult<Vec<&Node<P>>> {
        match self.get_parent_of(id)? {
            Some(parent) => parent
                .children()
                .iter()
                .filter(|&&sibling| sibling != id)
                .map(|&sibling| self.get_node(sibling))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> TreeResult<bool> {
        Ok(self.get_node(id)?.is_leaf())
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors_of(&self, id: NodeId) -> TreeResult<Vec<&Node<P>>> {
        let mut ancestors = Vec::new();
        let mut current = self.get_node(id)?.parent_id();
        while let Some(parent) = current {
            let node = self.get_node(parent)?;
            ancestors.push(node);
            current = node.parent_id();
        }
        Ok(ancestors)
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth_of(&self, id: NodeId) -> TreeResult<usize> {
        Ok(self.ancestors_of(id)?.len())
    }

    /// Number of levels, 0 for an empty tree.
    ///
    /// Walks the tree level by level, so depth is not limited by the call
    /// stack.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> TreeResult<usize> {
        let Some(root) = self.root_id else {
            return Ok(0);
        };

        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        queue.push_back((root, 1)); // (node, depth)

        while let Some((id, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            for &child in self.get_node(id)?.children() {
                queue.push_back((child, depth + 1));
            }
        }
        Ok(max_depth)
    }

    /// Nodes without children, in store order.
    pub fn leaf_nodes(&self) -> Vec<&Node<P>> {
        self.store.iter().filter(|node| node.is_leaf()).collect()
    }
}

/// Links `child` into `parent`'s children list at the comparator position.
fn attach_child<P, S: NodeStore<P>>(
    store: &mut S,
    comparator: Option<&dyn NodeComparator<P>>,
    parent: NodeId,
    child: NodeId,
) -> TreeResult<()> {
    let position = {
        let siblings = store.get(parent)?.children();
        match comparator {
            Some(cmp) => {
                let child_node = store.get(child)?;
                let mut position = siblings.len();
                for (i, &sibling) in siblings.iter().enumerate() {
                    if cmp.compare(store.get(sibling)?, child_node) == Ordering::Greater {
                        position = i;
                        break;
                    }
                }
                position
            }
            None => siblings.len(),
        }
    };
    store.get_mut(parent)?.insert_child(position, child);
    Ok(())
}

/// Walks every node's parent chain; a revisit means a cycle.
fn check_acyclic<P, S: NodeStore<P>>(store: &S) -> TreeResult<()> {
    let limit = store.len();
    let mut acyclic: HashSet<NodeId> = HashSet::with_capacity(limit);

    for start in store.ids() {
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        let mut current = Some(start);

        while let Some(id) = current {
            if acyclic.contains(&id) {
                break;
            }
            if !on_path.insert(id) || path.len() > limit {
                return Err(TreeError::CircularGraph(id));
            }
            path.push(id);
            current = store.get(id)?.parent_id();
        }
        acyclic.extend(path);
    }
    Ok(())
}
