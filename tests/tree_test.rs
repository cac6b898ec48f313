//! Tests for tree hydration, incremental mutation and structural queries

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};

use treewalk::domain::{
    ById, Node, NodeDescriptor, NodeId, OrderedTree, StoreError, Tree, TreeError,
    TreeEventHandler, UnorderedTree,
};
use treewalk::util::testing;

//      1
//     / \
//    2   3
//    |
//    4
#[fixture]
fn descriptors() -> Vec<NodeDescriptor<&'static str>> {
    vec![
        NodeDescriptor::root(1, "root"),
        NodeDescriptor::child(2, 1, "a"),
        NodeDescriptor::child(3, 1, "b"),
        NodeDescriptor::child(4, 2, "c"),
    ]
}

#[fixture]
fn tree(descriptors: Vec<NodeDescriptor<&'static str>>) -> OrderedTree<&'static str> {
    testing::init_test_setup();
    let mut tree = OrderedTree::new("fixture");
    tree.hydrate(descriptors).unwrap();
    tree
}

fn ids(nodes: &[&Node<&'static str>]) -> Vec<NodeId> {
    nodes.iter().map(|node| node.id()).collect()
}

// ============================================================
// Hydration
// ============================================================

#[rstest]
fn given_valid_descriptors_when_hydrating_then_links_every_parent(
    descriptors: Vec<NodeDescriptor<&'static str>>,
) {
    let mut tree = OrderedTree::new("hydrate");
    tree.hydrate(descriptors.clone()).unwrap();

    assert_eq!(tree.len(), descriptors.len());
    for descriptor in &descriptors {
        let id = descriptor.node_id().unwrap();
        let parent = tree.get_parent_of(id).unwrap().map(Node::id);
        assert_eq!(parent, descriptor.parent_id());
    }
    assert_eq!(tree.get_root().unwrap().id(), 1);
}

#[rstest]
fn given_children_listed_before_parents_when_hydrating_then_succeeds() {
    let mut tree = OrderedTree::new("forward");
    tree.hydrate(vec![(4, Some(2), "c"), (2, Some(1), "a"), (1, None, "root")])
        .unwrap();

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.depth_of(4).unwrap(), 2);
    assert_eq!(tree.get_root().unwrap().children(), &[2]);
}

#[rstest]
fn given_two_parentless_descriptors_when_hydrating_then_already_set_root() {
    let mut tree = OrderedTree::new("two-roots");
    let result = tree.hydrate(vec![(1, None, ()), (2, None, ())]);

    assert_eq!(
        result,
        Err(TreeError::AlreadySetRoot {
            existing: 1,
            rejected: 2
        })
    );
    assert!(tree.is_empty());
}

#[rstest]
fn given_mutual_parents_when_hydrating_then_circular_graph() {
    let mut tree = OrderedTree::new("cycle");
    let result = tree.hydrate(vec![(1, Some(2), ()), (2, Some(1), ())]);

    assert!(matches!(result, Err(TreeError::CircularGraph(_))));
    assert!(tree.is_empty());
    assert!(tree.get_root().is_err());
}

#[rstest]
fn given_cycle_beside_valid_root_when_hydrating_then_circular_graph() {
    let mut tree = OrderedTree::new("cycle");
    let result = tree.hydrate(vec![
        (0, None, ()),
        (1, Some(0), ()),
        (2, Some(3), ()),
        (3, Some(2), ()),
    ]);

    assert!(matches!(result, Err(TreeError::CircularGraph(_))));
    assert!(tree.is_empty());
}

#[rstest]
fn given_unknown_parent_when_hydrating_then_invalid_parent_node() {
    let mut tree = OrderedTree::new("orphan");
    let result = tree.hydrate(vec![(1, None, ()), (2, Some(9), ())]);

    assert_eq!(
        result,
        Err(TreeError::InvalidParentNode { node: 2, parent: 9 })
    );
}

#[rstest]
#[case(vec![(1, None, ()), (1, Some(1), ())], TreeError::Store(StoreError::DuplicateKey(1)))]
#[case(vec![(1, None, ()), (-2, Some(1), ())], TreeError::Store(StoreError::InvalidKey(-2)))]
fn given_bad_ids_when_hydrating_then_fails_fast(
    #[case] records: Vec<(NodeId, Option<NodeId>, ())>,
    #[case] expected: TreeError,
) {
    let mut tree = OrderedTree::new("bad-ids");
    assert_eq!(tree.hydrate(records), Err(expected));
    assert!(tree.is_empty());
}

#[rstest]
fn given_non_empty_tree_when_hydrating_then_rejects(mut tree: OrderedTree<&'static str>) {
    let result = tree.hydrate(vec![NodeDescriptor::root(10, "other")]);

    assert_eq!(result, Err(TreeError::TreeNotEmpty(4)));
    assert_eq!(tree.len(), 4);
}

#[rstest]
fn given_descriptor_without_id_when_hydrating_then_node_id_unset() {
    let mut tree: OrderedTree<&str> = OrderedTree::new("unset");
    let result = tree.hydrate(vec![NodeDescriptor::new("anonymous")]);

    assert_eq!(result, Err(TreeError::NodeIdUnset));
}

#[rstest]
fn given_empty_descriptor_list_when_hydrating_then_tree_stays_empty() {
    let mut tree: OrderedTree<()> = OrderedTree::new("nothing");
    tree.hydrate(Vec::<NodeDescriptor<()>>::new()).unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.get_root().err(), Some(TreeError::RootUnset));
}

// ============================================================
// Incremental add
// ============================================================

#[rstest]
fn given_empty_tree_when_adding_nodes_then_builds_hierarchy() {
    let mut tree = UnorderedTree::new("incremental");
    tree.add_node(NodeDescriptor::root(1, "root")).unwrap();
    tree.add_node(NodeDescriptor::child(2, 1, "a")).unwrap();
    tree.add_node(NodeDescriptor::child(3, 1, "b")).unwrap();

    assert_eq!(tree.root_id(), Some(1));
    assert_eq!(ids(&tree.get_children_of(1).unwrap()), vec![2, 3]);
    assert!(tree.is_leaf(3).unwrap());
}

#[rstest]
#[case(NodeDescriptor::child(2, 1, "dup"), TreeError::Store(StoreError::DuplicateKey(2)))]
#[case(NodeDescriptor::child(-5, 1, "neg"), TreeError::Store(StoreError::InvalidKey(-5)))]
#[case(NodeDescriptor::root(9, "second"), TreeError::AlreadySetRoot { existing: 1, rejected: 9 })]
#[case(NodeDescriptor::child(9, 42, "orphan"), TreeError::InvalidParentNode { node: 9, parent: 42 })]
fn given_invalid_node_when_adding_then_rejects_without_change(
    mut tree: OrderedTree<&'static str>,
    #[case] descriptor: NodeDescriptor<&'static str>,
    #[case] expected: TreeError,
) {
    assert_eq!(tree.add_node(descriptor), Err(expected));
    assert_eq!(tree.len(), 4);
}

#[rstest]
fn given_id_comparator_when_adding_then_children_are_sorted() {
    let mut tree: OrderedTree<&str> = Tree::with_comparator("sorted", ById);
    tree.add_node((10, None, "root")).unwrap();
    tree.add_node((30, Some(10), "c")).unwrap();
    tree.add_node((20, Some(10), "b")).unwrap();
    tree.add_node((25, Some(10), "bb")).unwrap();

    assert_eq!(tree.get_node(10).unwrap().children(), &[20, 25, 30]);
}

#[rstest]
fn given_payload_closure_comparator_when_hydrating_then_orders_by_payload() {
    let by_label =
        |a: &Node<&'static str>, b: &Node<&'static str>| a.payload().cmp(b.payload());
    let mut tree: OrderedTree<&'static str> = Tree::with_comparator("labels", by_label);
    tree.hydrate(vec![
        (1, None, "root"),
        (2, Some(1), "zeta"),
        (3, Some(1), "alpha"),
        (4, Some(1), "mu"),
    ])
    .unwrap();

    assert_eq!(tree.get_node(1).unwrap().children(), &[3, 4, 2]);
}

// ============================================================
// Delete
// ============================================================

#[rstest]
fn given_leaf_when_deleting_then_removes_exactly_one(mut tree: OrderedTree<&'static str>) {
    assert_eq!(tree.delete_node(4, false), Ok(1));

    assert_eq!(tree.len(), 3);
    assert!(!tree.contains(4));
    assert!(tree.get_node(2).unwrap().is_leaf());
}

#[rstest]
fn given_interior_node_without_recurse_when_deleting_then_rejects(
    mut tree: OrderedTree<&'static str>,
) {
    assert_eq!(
        tree.delete_node(2, false),
        Err(TreeError::DeleteInteriorNode(2))
    );
    assert_eq!(tree.len(), 4);
}

#[rstest]
fn given_interior_node_with_recurse_when_deleting_then_removes_branch(
    mut tree: OrderedTree<&'static str>,
) {
    assert_eq!(tree.delete_node(2, true), Ok(2));

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.get_node(1).unwrap().children(), &[3]);
}

#[rstest]
fn given_root_with_recurse_when_deleting_then_tree_is_empty(mut tree: OrderedTree<&'static str>) {
    assert_eq!(tree.delete_node(1, true), Ok(4));

    assert!(tree.is_empty());
    assert_eq!(tree.root_id(), None);

    // the emptied tree accepts a new root
    tree.add_node(NodeDescriptor::root(7, "fresh")).unwrap();
    assert_eq!(tree.get_root().unwrap().id(), 7);
}

#[rstest]
fn given_missing_node_when_deleting_then_node_not_in_tree(mut tree: OrderedTree<&'static str>) {
    assert_eq!(tree.delete_node(99, true), Err(TreeError::NodeNotInTree(99)));
}

// ============================================================
// Queries
// ============================================================

#[rstest]
fn given_tree_when_querying_relatives_then_returns_expected(tree: OrderedTree<&'static str>) {
    assert_eq!(tree.get_parent_of(4).unwrap().map(Node::id), Some(2));
    assert!(tree.get_parent_of(1).unwrap().is_none());
    assert_eq!(ids(&tree.get_children_of(1).unwrap()), vec![2, 3]);
    assert!(tree.get_children_of(3).unwrap().is_empty());
    assert_eq!(ids(&tree.get_siblings_of(2).unwrap()), vec![3]);
    assert!(tree.get_siblings_of(1).unwrap().is_empty());
    assert_eq!(ids(&tree.ancestors_of(4).unwrap()), vec![2, 1]);
    assert_eq!(tree.height(), Ok(3));

    let mut leaves = ids(&tree.leaf_nodes());
    leaves.sort();
    assert_eq!(leaves, vec![3, 4]);
}

#[rstest]
fn given_deep_chain_when_measuring_then_counts_every_level() {
    const DEPTH: i64 = 20_000;
    let mut tree = OrderedTree::new("chain");
    tree.hydrate((0..DEPTH).map(|id| (id, (id > 0).then(|| id - 1), ())))
        .unwrap();

    assert_eq!(tree.height(), Ok(DEPTH as usize));
    assert_eq!(tree.depth_of(DEPTH - 1), Ok(DEPTH as usize - 1));
    assert_eq!(tree.leaf_nodes().len(), 1);
}

#[rstest]
fn given_missing_id_when_querying_then_node_not_in_tree(tree: OrderedTree<&'static str>) {
    assert_eq!(tree.get_node(42).err(), Some(TreeError::NodeNotInTree(42)));
    assert_eq!(tree.get_parent_of(42).err(), Some(TreeError::NodeNotInTree(42)));
}

// ============================================================
// Event hooks
// ============================================================

#[derive(Clone, Default)]
struct Recorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl TreeEventHandler<&'static str> for Recorder {
    fn before_add_node(&mut self, node: &Node<&'static str>) {
        self.events.borrow_mut().push(format!("before_add {}", node.id()));
    }

    fn after_add_node(&mut self, node: &Node<&'static str>) {
        self.events.borrow_mut().push(format!("after_add {}", node.id()));
    }

    fn before_delete_node(&mut self, node: &Node<&'static str>) {
        self.events.borrow_mut().push(format!("before_delete {}", node.id()));
    }

    fn after_delete_node(&mut self, node: &Node<&'static str>) {
        self.events.borrow_mut().push(format!("after_delete {}", node.id()));
    }
}

#[rstest]
fn given_handler_when_adding_then_hooks_fire_once_and_never_on_failure() {
    let recorder = Recorder::default();
    let mut tree = OrderedTree::new("hooks").with_handler(recorder.clone());

    tree.add_node(NodeDescriptor::root(1, "root")).unwrap();
    assert!(tree.add_node(NodeDescriptor::root(2, "second")).is_err());
    assert!(tree.add_node(NodeDescriptor::child(1, 1, "dup")).is_err());
    tree.add_node(NodeDescriptor::child(2, 1, "a")).unwrap();

    assert_eq!(
        *recorder.events.borrow(),
        vec!["before_add 1", "after_add 1", "before_add 2", "after_add 2"]
    );
}

#[rstest]
fn given_handler_when_deleting_branch_then_hooks_fire_in_post_order(
    descriptors: Vec<NodeDescriptor<&'static str>>,
) {
    let recorder = Recorder::default();
    let mut tree = OrderedTree::new("hooks").with_handler(recorder.clone());
    tree.hydrate(descriptors).unwrap();
    assert!(recorder.events.borrow().is_empty());

    assert!(tree.delete_node(1, false).is_err());
    tree.delete_node(1, true).unwrap();

    assert_eq!(
        *recorder.events.borrow(),
        vec![
            "before_delete 4",
            "after_delete 4",
            "before_delete 2",
            "after_delete 2",
            "before_delete 3",
            "after_delete 3",
            "before_delete 1",
            "after_delete 1",
        ]
    );
}
