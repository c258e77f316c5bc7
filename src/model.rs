//! Model checks for [`BalancedTree`], shared by the property tests and the fuzz targets.

extern crate std;

use std::{
    cmp::Ordering,
    collections::{BTreeSet, VecDeque},
    prelude::v1::*,
};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::BalancedTree;

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Contains(ItemValue),
    Remove(ItemValue),
    Minimum,
    Clear,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Contains(item) => FinalOp::Contains(get_value(sorted, item)),
            Op::Remove(item) => FinalOp::Remove(get_value(sorted, item)),
            Op::Minimum => FinalOp::Minimum,
            Op::Clear => FinalOp::Clear,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Contains(u32),
    Remove(u32),
    Minimum,
    Clear,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        3 => value_strategy().prop_map(Op::Insert),
        1 => value_strategy().prop_map(Op::Contains),
        2 => value_strategy().prop_map(Op::Remove),
        1 => Just(Op::Minimum),
        1 => Just(Op::Clear),
    ]
}

fn insert_sorted(v: &mut Vec<u32>, value: u32) {
    if let Err(idx) = v.binary_search(&value) {
        v.insert(idx, value);
    }
}

fn remove_sorted(v: &mut Vec<u32>, value: u32) {
    if let Ok(idx) = v.binary_search(&value) {
        v.remove(idx);
    }
}

/// Asserts the worst-case AVL height bound, `h ≤ 1.44 * log2(n + 2) - 1`, for a tree of `len`
/// keys with the given height.
pub fn assert_height_bound(height: Option<usize>, len: usize) {
    let Some(height) = height else {
        assert_eq!(len, 0, "non-empty tree must have a height");
        return;
    };

    let bound = 1.44 * ((len + 2) as f64).log2() - 1.0;
    assert!(
        height as f64 <= bound,
        "height {height} exceeds the AVL bound {bound:.2} for {len} keys"
    );
}

// Checks every observable property of `tree` against the set of keys it should hold.
fn assert_matches(tree: &BalancedTree<u32>, btree: &BTreeSet<u32>) {
    tree.assert_invariants();

    assert_eq!(btree.len(), tree.len());
    assert_eq!(btree.is_empty(), tree.is_empty());
    assert!(btree.iter().eq(tree.iter()));
    assert_eq!(tree.in_order(), btree.iter().copied().collect::<Vec<_>>());
    assert_eq!(tree.level_order().len(), tree.len());
    assert_eq!(tree.pre_order().len(), tree.len());
    assert_eq!(tree.post_order().len(), tree.len());
    assert_eq!(tree.root().is_err(), tree.is_empty());

    assert_height_bound(tree.height(), tree.len());
}

pub fn run_btree_equivalence(ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut btree = BTreeSet::new();
    let mut tree: BalancedTree<u32> = BalancedTree::new();

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                insert_sorted(&mut sorted_values, value);

                let from_btree = btree.insert(value);
                let from_tree = tree.insert(value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Contains(value) => {
                let from_btree = btree.contains(&value);
                let from_tree = tree.contains(&value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Remove(value) => {
                remove_sorted(&mut sorted_values, value);

                let before = tree.pre_order();
                let from_btree = btree.remove(&value);
                let from_tree = tree.remove(&value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");

                // Removing an absent key must not touch the shape.
                if !from_tree {
                    assert_eq!(before, tree.pre_order(), "FinalOp #{op_id}: {final_op:?}");
                }
            }

            FinalOp::Minimum => {
                let from_btree = btree.first();
                let from_tree = tree.minimum();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Clear => {
                sorted_values.clear();
                btree.clear();
                tree.clear();
            }
        }

        assert_matches(&tree, &btree);
    }
}

/// An owned AVL tree that recomputes and rebalances the whole tree after every mutation.
///
/// Removal of a node with two children copies its successor's key into it and then removes the
/// successor. This is slow and simple, and serves as the reference shape for [`BalancedTree`],
/// which only repairs the path above each mutation.
#[derive(Debug, Default)]
pub struct ReferenceTree {
    root: Option<Box<RefNode>>,
}

#[derive(Debug)]
struct RefNode {
    key: u32,
    height: i8,
    left: Option<Box<RefNode>>,
    right: Option<Box<RefNode>>,
}

impl ReferenceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: u32) -> bool {
        let inserted = insert_into(&mut self.root, key);
        self.root = rebalance_all(self.root.take());
        inserted
    }

    pub fn remove(&mut self, key: u32) -> bool {
        let removed = remove_from(&mut self.root, key);
        self.root = rebalance_all(self.root.take());
        removed
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    pub fn pre_order(&self) -> Vec<u32> {
        fn visit(link: &Option<Box<RefNode>>, out: &mut Vec<u32>) {
            if let Some(node) = link {
                out.push(node.key);
                visit(&node.left, out);
                visit(&node.right, out);
            }
        }

        let mut out = Vec::new();
        visit(&self.root, &mut out);
        out
    }

    pub fn level_order(&self) -> Vec<u32> {
        let mut out = Vec::new();
        let mut queue: VecDeque<&RefNode> = self.root.as_deref().into_iter().collect();

        while let Some(node) = queue.pop_front() {
            out.push(node.key);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }

        out
    }
}

fn insert_into(link: &mut Option<Box<RefNode>>, key: u32) -> bool {
    let Some(node) = link else {
        *link = Some(Box::new(RefNode {
            key,
            height: 0,
            left: None,
            right: None,
        }));
        return true;
    };

    match key.cmp(&node.key) {
        Ordering::Less => insert_into(&mut node.left, key),
        Ordering::Greater => insert_into(&mut node.right, key),
        Ordering::Equal => false,
    }
}

fn remove_from(link: &mut Option<Box<RefNode>>, key: u32) -> bool {
    let node = match link {
        None => return false,
        Some(node) => node,
    };

    match key.cmp(&node.key) {
        Ordering::Less => return remove_from(&mut node.left, key),
        Ordering::Greater => return remove_from(&mut node.right, key),
        Ordering::Equal => {}
    }

    if node.left.is_some() && node.right.is_some() {
        let mut successor = node.right.as_deref().unwrap();
        while let Some(left) = successor.left.as_deref() {
            successor = left;
        }

        let successor = successor.key;
        node.key = successor;
        return remove_from(&mut node.right, successor);
    }

    let child = node.left.take().or_else(|| node.right.take());
    *link = child;
    true
}

fn height(link: &Option<Box<RefNode>>) -> i8 {
    link.as_ref().map_or(-1, |node| node.height)
}

fn balance(node: &RefNode) -> i8 {
    height(&node.right) - height(&node.left)
}

fn fix_height(node: &mut RefNode) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

fn rotate_left(mut node: Box<RefNode>) -> Box<RefNode> {
    let mut up = node.right.take().unwrap();
    node.right = up.left.take();
    fix_height(&mut node);
    up.left = Some(node);
    fix_height(&mut up);
    up
}

fn rotate_right(mut node: Box<RefNode>) -> Box<RefNode> {
    let mut up = node.left.take().unwrap();
    node.left = up.right.take();
    fix_height(&mut node);
    up.right = Some(node);
    fix_height(&mut up);
    up
}

// Post-order over the whole tree: children first, then the node itself.
fn rebalance_all(link: Option<Box<RefNode>>) -> Option<Box<RefNode>> {
    let mut node = link?;
    node.left = rebalance_all(node.left.take());
    node.right = rebalance_all(node.right.take());
    fix_height(&mut node);

    let node = match balance(&node) {
        2 => {
            if balance(node.right.as_deref().unwrap()) < 0 {
                node.right = Some(rotate_right(node.right.take().unwrap()));
            }
            rotate_left(node)
        }
        -2 => {
            if balance(node.left.as_deref().unwrap()) > 0 {
                node.left = Some(rotate_left(node.left.take().unwrap()));
            }
            rotate_right(node)
        }
        _ => node,
    };

    Some(node)
}

pub fn run_reference_equivalence(ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut reference = ReferenceTree::new();
    let mut tree: BalancedTree<u32> = BalancedTree::new();

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                insert_sorted(&mut sorted_values, value);

                let from_reference = reference.insert(value);
                let from_tree = tree.insert(value);

                assert_eq!(from_reference, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Remove(value) => {
                remove_sorted(&mut sorted_values, value);

                let from_reference = reference.remove(value);
                let from_tree = tree.remove(&value);

                assert_eq!(from_reference, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Clear => {
                sorted_values.clear();
                reference.clear();
                tree.clear();
            }

            // Queries leave both trees as they are.
            FinalOp::Contains(_) | FinalOp::Minimum => continue,
        }

        // A pre-order sequence determines the shape of a search tree.
        assert_eq!(
            reference.pre_order(),
            tree.pre_order(),
            "FinalOp #{op_id}: {final_op:?}"
        );
        assert_eq!(
            reference.level_order(),
            tree.level_order(),
            "FinalOp #{op_id}: {final_op:?}"
        );
        tree.assert_invariants();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_tree_rotates() {
        let mut reference = ReferenceTree::new();
        for key in [10, 20, 30] {
            assert!(reference.insert(key));
        }
        assert_eq!(reference.pre_order(), [20, 10, 30]);

        assert!(!reference.insert(20));
        assert!(reference.remove(20));
        assert_eq!(reference.pre_order(), [30, 10]);
        assert_eq!(reference.level_order(), [30, 10]);

        reference.clear();
        assert!(reference.pre_order().is_empty());
        assert!(reference.insert(5));
        assert_eq!(reference.level_order(), [5]);
    }

    fn ops_with_clear() -> Vec<Op> {
        let mut ops = Vec::new();
        for round in 0..3u32 {
            ops.extend((0..40).map(|k| Op::Insert(ItemValue::Random(k * 7 % 61 + round))));
            ops.extend((0..10).map(|i| Op::Remove(ItemValue::Index(i * 3))));
            ops.push(Op::Minimum);
            ops.push(Op::Clear);
            ops.push(Op::Minimum);
            ops.push(Op::Remove(ItemValue::Random(3)));
        }
        ops
    }

    #[test]
    fn clear_between_operations_matches_btree() {
        run_btree_equivalence(ops_with_clear());
    }

    #[test]
    fn clear_between_operations_matches_reference() {
        run_reference_equivalence(ops_with_clear());
    }

    #[test]
    fn height_bound_accepts_worst_case_trees() {
        // Minimal AVL trees of height h have N(h) = N(h - 1) + N(h - 2) + 1 nodes.
        let (mut smaller, mut larger) = (1, 2);
        assert_height_bound(Some(0), smaller);
        assert_height_bound(Some(1), larger);

        for h in 2..30 {
            (smaller, larger) = (larger, smaller + larger + 1);
            assert_height_bound(Some(h), larger);
        }
    }

    #[test]
    #[should_panic(expected = "exceeds the AVL bound")]
    fn height_bound_rejects_chains() {
        assert_height_bound(Some(9), 10);
    }
}
