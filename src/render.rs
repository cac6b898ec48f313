//! Conversion of trees into `termtree` structures for display.

use std::fmt::Display;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::{NodeId, NodeStore, Tree, TreeResult};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<P: Display, S: NodeStore<P>> TreeNodeConvert for Tree<P, S> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        match self.root_id() {
            Some(root) => subtree_to_tree_string(self, root)
                .unwrap_or_else(|e| TermTree::new(format!("<{}>", e))),
            None => TermTree::new("Empty tree".to_string()),
        }
    }
}

/// Renders the subtree rooted at `id`, one line per node (`id: payload`).
///
/// Built with an explicit stack of open subtrees, so arbitrarily deep
/// chains do not exhaust the call stack.
pub fn subtree_to_tree_string<P: Display, S: NodeStore<P>>(
    tree: &Tree<P, S>,
    id: NodeId,
) -> TreeResult<TermTree<String>> {
    let node = tree.get_node(id)?;
    // (rendered subtree, children to render, next child index); the
    // root frame stays at the bottom until the walk is finished
    let mut stack = vec![(TermTree::new(node.to_string()), node.children(), 0)];

    loop {
        let top = stack.len() - 1;
        let (_, children, next) = &mut stack[top];
        let pending = children.get(*next).copied();
        *next += 1;

        match pending {
            Some(child) => {
                let child = tree.get_node(child)?;
                stack.push((TermTree::new(child.to_string()), child.children(), 0));
            }
            None if top == 0 => break,
            None => {
                if let Some((finished, _, _)) = stack.pop() {
                    stack[top - 1].0.push(finished);
                }
            }
        }
    }
    Ok(stack.swap_remove(0).0)
}
