extern crate std;

use std::{ops::Range, prelude::v1::*};

use proptest::prelude::*;
use rstest::rstest;

use crate::model;

use super::*;

#[derive(Debug)]
#[repr(C)]
struct TestNode {
    links: Links<TestNode>,
    key: u32,
}

impl TestNode {
    fn new(key: u32) -> Box<TestNode> {
        Box::new(TestNode {
            links: Links::new(),
            key,
        })
    }
}

unsafe impl Linked<Links<TestNode>> for TestNode {
    type Handle = Box<TestNode>;

    fn into_ptr(r: Self::Handle) -> NonNull<Self> {
        NonNull::new(Box::into_raw(r)).unwrap()
    }

    unsafe fn from_ptr(ptr: NonNull<Self>) -> Self::Handle {
        unsafe { Box::from_raw(ptr.as_ptr()) }
    }

    unsafe fn links(ptr: NonNull<Self>) -> NonNull<Links<TestNode>> {
        // SAFETY: Self is #[repr(C)] and `links` is first field
        ptr.cast()
    }
}

impl TreeNode<Links<TestNode>> for TestNode {
    type Key = u32;

    fn key(&self) -> &Self::Key {
        &self.key
    }
}

fn keys<'a>(nodes: impl Iterator<Item = &'a TestNode>) -> Vec<u32> {
    nodes.map(|node| node.key).collect()
}

// Calls `f` with every permutation of `keys`.
fn for_each_permutation(keys: &mut Vec<u32>, k: usize, f: &mut impl FnMut(&[u32])) {
    if k == keys.len() {
        f(keys);
        return;
    }

    for i in k..keys.len() {
        keys.swap(k, i);
        for_each_permutation(keys, k + 1, f);
        keys.swap(k, i);
    }
}

fn insert_find_all(keys: &[u32]) {
    let mut tree: AvlTree<TestNode> = AvlTree::new();

    for &key in keys {
        assert!(tree.insert(TestNode::new(key)).is_none());
        tree.assert_invariants();
    }

    for key in keys {
        let node = tree.get(key).expect("item not found");
        assert_eq!(node.key(), key);
    }

    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    assert_eq!(keys_of_iter(&tree), sorted);
}

fn keys_of_iter(tree: &AvlTree<TestNode>) -> Vec<u32> {
    keys(tree.iter())
}

#[test]
fn zero_elems_find() {
    insert_find_all(&[]);
}

#[test]
fn single_elem_find() {
    insert_find_all(&[0]);
}

#[test]
fn two_elems_find() {
    insert_find_all(&[0, 1]);
    insert_find_all(&[1, 0]);
}

#[test]
fn three_elems_find() {
    insert_find_all(&[0, 1, 2]);
    insert_find_all(&[0, 2, 1]);
    insert_find_all(&[1, 0, 2]);
    insert_find_all(&[1, 2, 0]);
    insert_find_all(&[2, 0, 1]);
    insert_find_all(&[2, 1, 0]);
}

#[test]
fn six_elems_find_all_orders() {
    for_each_permutation(&mut (0..6).collect(), 0, &mut |keys| insert_find_all(keys));
}

fn insert_remove_all(keys: &[u32]) {
    let mut tree: AvlTree<TestNode> = AvlTree::new();

    for &key in keys {
        tree.insert(TestNode::new(key));
        tree.assert_invariants();
    }

    for key in keys {
        let node = tree.get_raw(key).expect("item not found");
        let removed = unsafe { tree.remove_at(node) };
        assert_eq!(removed.key, *key);
        tree.assert_invariants();
    }

    assert!(tree.is_empty());

    for &key in keys {
        tree.insert(TestNode::new(key));
        tree.assert_invariants();
    }

    for key in keys.iter().rev() {
        let removed = tree.remove(key).expect("item not found");
        assert_eq!(removed.key, *key);
        tree.assert_invariants();
    }

    assert!(tree.is_empty());
}

#[test]
fn remove_one() {
    insert_remove_all(&[0]);
}

#[test]
fn remove_two() {
    insert_remove_all(&[0, 1]);
    insert_remove_all(&[1, 0]);
}

#[test]
fn remove_three() {
    insert_remove_all(&[0, 1, 2]);
    insert_remove_all(&[0, 2, 1]);
    insert_remove_all(&[1, 0, 2]);
    insert_remove_all(&[1, 2, 0]);
    insert_remove_all(&[2, 0, 1]);
    insert_remove_all(&[2, 1, 0]);
}

#[test]
fn remove_six_all_orders() {
    for_each_permutation(&mut (0..6).collect(), 0, &mut |keys| insert_remove_all(keys));
}

#[test]
fn remove_each_key_from_every_shape() {
    // Covers removal of leaves, unary nodes and binary nodes at every depth.
    for_each_permutation(&mut (0..6).collect(), 0, &mut |keys| {
        for &victim in keys {
            let mut tree: AvlTree<TestNode> = AvlTree::new();
            for &key in keys {
                tree.insert(TestNode::new(key));
            }

            assert_eq!(tree.remove(&victim).map(|node| node.key), Some(victim));
            tree.assert_invariants();

            let expected: Vec<u32> = (0..6).filter(|&k| k != victim).collect();
            assert_eq!(keys_of_iter(&tree), expected);
        }
    });
}

#[test]
fn duplicate_insert_hands_item_back() {
    let mut tree: AvlTree<TestNode> = AvlTree::new();
    tree.insert(TestNode::new(1));
    tree.insert(TestNode::new(2));

    let rejected = tree.insert(TestNode::new(1)).expect("duplicate must be rejected");
    assert_eq!(rejected.key, 1);
    assert_eq!(tree.len(), 2);
    tree.assert_invariants();
}

#[test]
fn first_and_last() {
    let mut tree: AvlTree<TestNode> = AvlTree::new();
    assert!(tree.first().is_none());
    assert!(tree.last().is_none());

    for key in [4, 9, 1, 7] {
        tree.insert(TestNode::new(key));
    }

    assert_eq!(tree.first().map(|node| node.key), Some(1));
    assert_eq!(tree.last().map(|node| node.key), Some(9));
}

#[test]
fn traversal_orders() {
    let mut tree: AvlTree<TestNode> = AvlTree::new();

    //       4
    //     /   \
    //    2     6
    //   / \   / \
    //  1   3 5   7
    for key in [4, 2, 6, 1, 3, 5, 7] {
        tree.insert(TestNode::new(key));
    }

    assert_eq!(keys(tree.pre_order()), [4, 2, 1, 3, 6, 5, 7]);
    assert_eq!(keys(tree.iter()), [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(keys(tree.post_order()), [1, 3, 2, 5, 7, 6, 4]);
    assert_eq!(keys(tree.level_order()), [4, 2, 6, 1, 3, 5, 7]);

    assert_eq!(tree.pre_order().len(), 7);
    assert_eq!(tree.level_order().len(), 7);
}

#[test]
fn traversals_of_empty_tree() {
    let tree: AvlTree<TestNode> = AvlTree::new();

    assert_eq!(tree.pre_order().count(), 0);
    assert_eq!(tree.iter().count(), 0);
    assert_eq!(tree.post_order().count(), 0);
    assert_eq!(tree.level_order().count(), 0);
}

#[test]
fn root_of_empty_tree_is_an_error() {
    let tree: AvlTree<TestNode> = AvlTree::new();

    assert_eq!(tree.root().unwrap_err(), EmptyTreeError);
    assert_eq!(tree.height(), None);
}

#[test]
fn node_ref_parent_links_are_consistent() {
    let mut tree: AvlTree<TestNode> = AvlTree::new();
    for key in 0..31 {
        tree.insert(TestNode::new(key));
    }

    let mut stack = vec![tree.root().unwrap()];
    while let Some(node) = stack.pop() {
        for child in [node.left(), node.right()].into_iter().flatten() {
            assert_eq!(child.parent(), Some(node));
            assert!(child.height() < node.height());
            stack.push(child);
        }
    }

    // 31 ascending keys fill a perfect tree.
    assert_eq!(tree.height(), Some(4));
}

#[test]
fn ascending_inserts_stay_logarithmic() {
    let mut tree: AvlTree<TestNode> = AvlTree::new();
    for key in 0..10_000 {
        tree.insert(TestNode::new(key));
    }

    tree.assert_invariants();
    model::assert_height_bound(tree.height(), tree.len());

    for key in (0..10_000).step_by(2) {
        tree.remove(&key);
    }

    tree.assert_invariants();
    model::assert_height_bound(tree.height(), tree.len());
}

#[test]
fn clear_drops_everything() {
    let mut tree: AvlTree<TestNode> = AvlTree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(TestNode::new(key));
    }

    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.root().is_err());
    tree.assert_invariants();
}

// Concrete scenarios through the owning tree.

#[rstest]
#[case::single_left_rotation(&[10, 20, 30], 20, &[20, 10, 30])]
#[case::single_right_rotation(&[30, 20, 10], 20, &[20, 10, 30])]
#[case::left_right_rotation(&[30, 10, 20], 20, &[20, 10, 30])]
#[case::right_left_rotation(&[10, 30, 20], 20, &[20, 10, 30])]
#[case::no_rotation(&[20, 10, 30], 20, &[20, 10, 30])]
fn insertion_rotations(#[case] inserts: &[i64], #[case] root: i64, #[case] pre_order: &[i64]) {
    let tree: BalancedTree<i64> = inserts.iter().copied().collect();
    tree.assert_invariants();

    assert_eq!(*tree.root().unwrap().key(), root);
    assert_eq!(tree.pre_order(), pre_order);
    assert_eq!(tree.in_order(), [10, 20, 30]);
}

#[test]
fn double_rotation_children() {
    let tree: BalancedTree<i64> = [30, 10, 20].into_iter().collect();
    let root = tree.root().unwrap();

    assert_eq!(*root.key(), 20);
    assert_eq!(root.left().map(|n| *n.key()), Some(10));
    assert_eq!(root.right().map(|n| *n.key()), Some(30));
}

#[rstest]
// Two children, successor is the direct right child; rebalancing then rotates right.
// A balanced heavy child takes the single rotation (`b >= 0`), not the sign-product rule that
// would double-rotate and root the tree at 15.
#[case::binary_root(&[20, 10, 30, 5, 15], 20, &[10, 5, 30, 15])]
// Leaf.
#[case::leaf(&[20, 10, 30, 5, 15], 5, &[20, 10, 15, 30])]
// Unary node.
#[case::unary(&[20, 10, 30, 5], 10, &[20, 5, 30])]
// Two children, successor is deeper in the right subtree.
#[case::deep_successor(&[20, 10, 30, 5, 25, 40, 27], 20, &[25, 10, 5, 30, 27, 40])]
// Removal leaves the root right-heavy with a right-leaning child.
#[case::rotate_left_after_removal(&[20, 10, 30, 40], 10, &[30, 20, 40])]
// Removal leaves the root right-heavy with a left-leaning child.
#[case::rotate_right_left_after_removal(&[20, 10, 30, 25], 10, &[25, 20, 30])]
fn removal_cases(#[case] inserts: &[i64], #[case] victim: i64, #[case] pre_order: &[i64]) {
    let mut tree: BalancedTree<i64> = inserts.iter().copied().collect();

    assert!(tree.remove(&victim));
    tree.assert_invariants();

    assert_eq!(tree.len(), inserts.len() - 1);
    assert_eq!(tree.pre_order(), pre_order);

    let mut expected: Vec<i64> = inserts.iter().copied().filter(|&k| k != victim).collect();
    expected.sort_unstable();
    assert_eq!(tree.in_order(), expected);
}

#[test]
fn remove_binary_root_keeps_order() {
    let mut tree: BalancedTree<i64> = [20, 10, 30, 5, 15].into_iter().collect();

    assert!(tree.remove(&20));
    assert_eq!(tree.in_order(), [5, 10, 15, 30]);
    assert!(!tree.contains(&20));
}

#[test]
fn empty_tree_queries() {
    let mut tree: BalancedTree<i64> = BalancedTree::new();

    assert_eq!(tree.minimum(), None);
    assert_eq!(tree.root().unwrap_err(), EmptyTreeError);
    assert!(!tree.contains(&1));
    assert!(!tree.remove(&1));
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert!(tree.level_order().is_empty());
}

#[test]
fn removing_absent_key_changes_nothing() {
    let mut tree: BalancedTree<i64> = (0..20).map(|k| k * 3).collect();
    let pre = tree.pre_order();
    let level = tree.level_order();

    assert!(!tree.remove(&4));
    assert_eq!(tree.pre_order(), pre);
    assert_eq!(tree.level_order(), level);
    assert_eq!(tree.len(), 20);
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_btree_equivalence(ops);
    }

    #[test]
    fn reference_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_reference_equivalence(ops);
    }

    #[test]
    fn insert_then_remove_restores_keys(
        keys in proptest::collection::btree_set(0i64..1000, 0..200),
        extra in 1000i64..2000,
    ) {
        let mut tree: BalancedTree<i64> = keys.iter().copied().collect();
        let before = tree.in_order();

        prop_assert!(tree.insert(extra));
        prop_assert!(tree.remove(&extra));

        tree.assert_invariants();
        prop_assert_eq!(tree.in_order(), before);
    }

    #[test]
    fn size_matches_level_order(keys in proptest::collection::vec(0i64..500, 0..300)) {
        let mut tree = BalancedTree::new();

        for (i, key) in keys.into_iter().enumerate() {
            if i % 3 == 2 {
                tree.remove(&key);
            } else {
                tree.insert(key);
            }

            prop_assert_eq!(tree.len(), tree.level_order().len());
        }
    }
}
