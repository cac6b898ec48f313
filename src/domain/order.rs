//! Children ordering strategies injected at tree construction.

use std::cmp::Ordering;

use crate::domain::node::Node;

/// Orders siblings within a parent's children list.
pub trait NodeComparator<P> {
    fn compare(&self, a: &Node<P>, b: &Node<P>) -> Ordering;
}

impl<P, F> NodeComparator<P> for F
where
    F: Fn(&Node<P>, &Node<P>) -> Ordering,
{
    fn compare(&self, a: &Node<P>, b: &Node<P>) -> Ordering {
        self(a, b)
    }
}

/// Orders siblings by ascending node id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ById;

impl<P> NodeComparator<P> for ById {
    fn compare(&self, a: &Node<P>, b: &Node<P>) -> Ordering {
        a.id().cmp(&b.id())
    }
}

/// Orders siblings by payload, ties broken by id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByPayload;

impl<P: Ord> NodeComparator<P> for ByPayload {
    fn compare(&self, a: &Node<P>, b: &Node<P>) -> Ordering {
        a.payload()
            .cmp(b.payload())
            .then_with(|| a.id().cmp(&b.id()))
    }
}
