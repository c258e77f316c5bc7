extern crate alloc;

use alloc::boxed::Box;
use core::{borrow::Borrow, fmt, marker::PhantomPinned, ptr::NonNull};

use cordyceps::Linked;

use crate::{AvlTree, EmptyTreeError, Links, NodeRef, TreeNode};

/// An ordered set of unique keys, stored in a self-balancing [AVL tree].
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
pub struct BalancedTree<K: Ord + fmt::Debug> {
    tree: AvlTree<SetNode<K>>,
}

struct SetNode<K> {
    links: Links<SetNode<K>>,
    key: K,
    _unpin: PhantomPinned,
}

impl<K> SetNode<K> {
    fn new(key: K) -> Box<Self> {
        Box::new(SetNode {
            links: Links::new(),
            key,
            _unpin: PhantomPinned,
        })
    }
}

unsafe impl<K> Linked<Links<SetNode<K>>> for SetNode<K> {
    type Handle = Box<Self>;

    fn into_ptr(r: Self::Handle) -> NonNull<Self> {
        Box::leak(r).into()
    }

    unsafe fn from_ptr(ptr: NonNull<Self>) -> Self::Handle {
        unsafe { Box::from_raw(ptr.as_ptr()) }
    }

    unsafe fn links(ptr: NonNull<Self>) -> NonNull<Links<SetNode<K>>> {
        let ptr = ptr.as_ptr();
        unsafe { NonNull::new_unchecked(core::ptr::addr_of_mut!((*ptr).links)) }
    }
}

impl<K: Ord + fmt::Debug> TreeNode<Links<SetNode<K>>> for SetNode<K> {
    type Key = K;

    fn key(&self) -> &Self::Key {
        &self.key
    }
}

/// A read-only handle to a node of a [`BalancedTree`].
///
/// Obtained from [`BalancedTree::root`]; follow [`left`](Node::left), [`right`](Node::right) and
/// [`parent`](Node::parent) to walk the rest of the tree.
pub struct Node<'tree, K: Ord + fmt::Debug> {
    inner: NodeRef<'tree, SetNode<K>>,
}

impl<'tree, K: Ord + fmt::Debug> Node<'tree, K> {
    /// Returns the key stored in this node.
    pub fn key(&self) -> &'tree K {
        self.inner.key()
    }

    /// Returns the parent of this node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.inner.parent().map(|inner| Node { inner })
    }

    /// Returns the left child of this node.
    pub fn left(&self) -> Option<Self> {
        self.inner.left().map(|inner| Node { inner })
    }

    /// Returns the right child of this node.
    pub fn right(&self) -> Option<Self> {
        self.inner.right().map(|inner| Node { inner })
    }

    /// Returns the height of the subtree rooted at this node. Leaves have height 0.
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// Returns the height of the right subtree minus the height of the left subtree.
    pub fn balance_factor(&self) -> i8 {
        self.inner.balance_factor()
    }
}

impl<K: Ord + fmt::Debug> Clone for Node<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Ord + fmt::Debug> Copy for Node<'_, K> {}

impl<K: Ord + fmt::Debug> PartialEq for Node<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Ord + fmt::Debug> Eq for Node<'_, K> {}

impl<K: Ord + fmt::Debug> fmt::Debug for Node<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("height", &self.height())
            .field("balance_factor", &self.balance_factor())
            .finish()
    }
}

impl<K: Ord + fmt::Debug> BalancedTree<K> {
    /// Creates a new, empty `BalancedTree`.
    pub const fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }

    /// Returns `true` if the tree contains no keys.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of keys in the tree.
    #[doc(alias = "size")]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the height of the tree, or `None` if it is empty.
    pub fn height(&self) -> Option<usize> {
        self.tree.height()
    }

    /// Adds `key` to the tree.
    ///
    /// Returns `false`, leaving the tree unchanged, if `key` was already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert(SetNode::new(key)).is_none()
    }

    /// Removes `key` from the tree.
    ///
    /// Returns `true` if `key` was present.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).is_some()
    }

    /// Returns `true` if the tree contains `key`.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    /// Returns the minimum key in the tree, or `None` if it is empty.
    #[inline]
    pub fn minimum(&self) -> Option<&K> {
        self.tree.first().map(|node| &node.key)
    }

    /// Returns the maximum key in the tree, or `None` if it is empty.
    #[inline]
    pub fn maximum(&self) -> Option<&K> {
        self.tree.last().map(|node| &node.key)
    }

    /// Returns a handle to the root node.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTreeError`] if the tree has no keys.
    pub fn root(&self) -> Result<Node<'_, K>, EmptyTreeError> {
        self.tree.root().map(|inner| Node { inner })
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.tree.iter().map(|node| &node.key)
    }

    /// Clears the tree, removing all keys.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Writes the tree as a Graphviz DOT digraph named `name`.
    pub fn dotgraph<W>(&self, name: &str, w: W) -> fmt::Result
    where
        W: fmt::Write,
        K: fmt::Display,
    {
        self.tree.dotgraph(name, w)
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.tree.assert_invariants();
    }
}

impl<K: Ord + fmt::Debug + Clone> BalancedTree<K> {
    /// Returns the keys in pre-order: each node before its left subtree, then its right subtree.
    pub fn pre_order(&self) -> Vec<K> {
        self.tree.pre_order().map(|node| node.key.clone()).collect()
    }

    /// Returns the keys in post-order: each node after its left subtree and its right subtree.
    pub fn post_order(&self) -> Vec<K> {
        self.tree.post_order().map(|node| node.key.clone()).collect()
    }

    /// Returns the keys in ascending order.
    pub fn in_order(&self) -> Vec<K> {
        self.tree.iter().map(|node| node.key.clone()).collect()
    }

    /// Returns the keys breadth-first, each level from left to right.
    pub fn level_order(&self) -> Vec<K> {
        self.tree.level_order().map(|node| node.key.clone()).collect()
    }
}

impl<K: Ord + fmt::Debug> Default for BalancedTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug> Extend<K> for BalancedTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord + fmt::Debug> FromIterator<K> for BalancedTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = BalancedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for BalancedTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
