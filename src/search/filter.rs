//! Inclusion predicates consulted once per visited node.

use serde::{Deserialize, Serialize};

use crate::domain::Node;

/// Decides whether a visited node appears in the search output.
pub trait SearchFilter<P> {
    fn accepts(&self, node: &Node<P>) -> bool;
}

impl<P, F> SearchFilter<P> for F
where
    F: Fn(&Node<P>) -> bool,
{
    fn accepts(&self, node: &Node<P>) -> bool {
        self(node)
    }
}

/// Filter used when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<P> SearchFilter<P> for AcceptAll {
    fn accepts(&self, _node: &Node<P>) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Not<F>(F);

impl<P, F: SearchFilter<P>> SearchFilter<P> for Not<F> {
    fn accepts(&self, node: &Node<P>) -> bool {
        !self.0.accepts(node)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

impl<P, A: SearchFilter<P>, B: SearchFilter<P>> SearchFilter<P> for And<A, B> {
    fn accepts(&self, node: &Node<P>) -> bool {
        self.0.accepts(node) && self.1.accepts(node)
    }
}

/// Combinators for any filter.
pub trait SearchFilterExt<P>: SearchFilter<P> + Sized {
    fn negate(self) -> Not<Self> {
        Not(self)
    }

    fn and<B: SearchFilter<P>>(self, other: B) -> And<Self, B> {
        And(self, other)
    }
}

impl<P, F: SearchFilter<P>> SearchFilterExt<P> for F {}

/// What happens below a node the filter rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDescent {
    /// Rejected nodes are left out but their children are still visited.
    #[default]
    Transparent,
    /// Rejected nodes and their whole subtree are skipped.
    Prune,
}
