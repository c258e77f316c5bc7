//! An intrusive AVL tree.
//!
//! Every node caches its height and its balance factor. Conventions used in comments:
//! - The height of a leaf is 0, and the height of a missing child is -1.
//! - `h(x)` is the height of `x`, so `h(x) = 1 + max(h(left(x)), h(right(x)))`.
//! - The balance factor of `x` is `b(x) = h(right(x)) - h(left(x))`.
//!
// The AVL invariant is that `b(x) ∈ {-1, 0, 1}` for every node `x`.
//
// A single insertion or removal changes the height of at most the subtrees containing the mutated
// position, so only the ancestors of that position can be left with `b(x) = ±2`. Rebalancing
// walks from the mutated position up to the root, recomputing each ancestor from its children's
// cached heights, and rotates wherever the factor is out of range. Nodes off that path keep their
// cached values, which are still correct.
//
// Rotation choice at a node `z` with `b(z) = 2` and right child `y`:
// - `b(y) ≥ 0`: a single left rotation; `y` rises.
// - `b(y) < 0`: a right-left double rotation; the left child of `y` rises twice.
//
// `b(z) = -2` is the mirror image.

use core::{
    cell::UnsafeCell,
    cmp::Ordering,
    fmt,
    marker::{PhantomData, PhantomPinned},
    mem,
    ops::Not,
    ptr::NonNull,
};
use std::borrow::Borrow;

use cordyceps::Linked;
use tracing::{debug, trace};

mod debug;
mod errors;
mod iter;
mod tree;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

pub use errors::EmptyTreeError;
pub use iter::{InOrder, LevelOrder, PostOrder, PreOrder};
pub use tree::{BalancedTree, Node};

pub trait TreeNode<L>: Linked<L> {
    type Key: Ord + fmt::Debug;

    fn key(&self) -> &Self::Key;
}

/// An intrusive AVL tree.
///
/// Keys are unique: inserting an item whose key is already present hands the item back and leaves
/// the tree untouched.
pub struct AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    root: Link<T>,
    len: usize,
}

pub struct Links<T: ?Sized> {
    inner: UnsafeCell<LinksInner<T>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[repr(C)]
struct LinksInner<T: ?Sized> {
    parent: Link<T>,
    children: [Link<T>; 2],
    height: i8,
    balance: i8,
    _unpin: PhantomPinned,
}

type Link<T> = Option<NonNull<T>>;

/// Returns the height of a possibly missing node.
#[inline]
unsafe fn height_of<T>(link: Link<T>) -> i8
where
    T: TreeNode<Links<T>> + ?Sized,
{
    link.map(|n| unsafe { T::links(n).as_ref().height() })
        .unwrap_or(-1)
}

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<T> {
        AvlTree { root: None, len: 0 }
    }

    /// Returns `true` if the tree contains no elements.
    pub const fn is_empty(&self) -> bool {
        let empty = self.len() == 0;

        if cfg!(debug_assertions) {
            // Can't use assert_eq!() in const fn.
            assert!(empty == self.root.is_none());
        }

        empty
    }

    /// Returns the number of elements in the tree.
    #[doc(alias = "size")]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the height of the tree, or `None` if it is empty.
    ///
    /// A tree holding a single element has height 0.
    pub fn height(&self) -> Option<usize> {
        self.root
            .map(|root| unsafe { T::links(root).as_ref().height() as usize })
    }

    /// Returns a handle to the root node.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTreeError`] if the tree has no elements.
    pub fn root(&self) -> Result<NodeRef<'_, T>, EmptyTreeError> {
        self.root
            .map(|root| unsafe { NodeRef::new(root) })
            .ok_or(EmptyTreeError)
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let mut count = 0;

        if let Some(root) = self.root {
            unsafe {
                assert_eq!(
                    T::links(root).as_ref().parent(),
                    None,
                    "root parent pointer must not be set"
                );
                self.assert_invariants_at(root, None, None, &mut count);
            }
        }

        assert_eq!(count, self.len, "len does not match the number of reachable nodes");
    }

    // Checks the subtree rooted at `node` and returns its height.
    #[allow(clippy::only_used_in_recursion)]
    unsafe fn assert_invariants_at(
        &self,
        node: NonNull<T>,
        lower: Option<&T::Key>,
        upper: Option<&T::Key>,
        count: &mut usize,
    ) -> i8 {
        unsafe {
            *count += 1;

            let key = node.as_ref().key();

            // Ensure the search order holds against every ancestor, not just the parent.
            if let Some(lower) = lower {
                assert!(lower < key, "{key:?} must be greater than {lower:?}");
            }
            if let Some(upper) = upper {
                assert!(key < upper, "{key:?} must be less than {upper:?}");
            }

            let mut heights = [-1; 2];

            for dir in [Dir::Left, Dir::Right] {
                if let Some(child) = T::links(node).as_ref().child(dir) {
                    // Ensure child's parent link points to this node.
                    let parent = T::links(child)
                        .as_ref()
                        .parent()
                        .expect("child parent pointer not set");
                    assert_eq!(node, parent);

                    let (lower, upper) = match dir {
                        Dir::Left => (lower, Some(key)),
                        Dir::Right => (Some(key), upper),
                    };

                    heights[dir as usize] = self.assert_invariants_at(child, lower, upper, count);
                }
            }

            let links = T::links(node).as_ref();
            let height = 1 + heights[0].max(heights[1]);
            let balance = heights[1] - heights[0];

            assert_eq!(links.height(), height, "stale height at {key:?}");
            assert_eq!(links.balance(), balance, "stale balance factor at {key:?}");
            assert!(
                (-1..=1).contains(&balance),
                "{key:?} is out of balance: {balance}"
            );

            height
        }
    }

    /// Returns a reference to the node corresponding to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let ptr = self.get_raw(key)?;
        unsafe { Some(ptr.as_ref()) }
    }

    /// Returns `true` if the tree contains a node corresponding to `key`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.get_raw(key).is_some()
    }

    fn get_raw<Q>(&self, key: &Q) -> Link<T>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;

            unsafe {
                match key.cmp(cur.as_ref().key().borrow()) {
                    Ordering::Less => opt_cur = T::links(cur).as_ref().left(),
                    Ordering::Equal => return Some(cur),
                    Ordering::Greater => opt_cur = T::links(cur).as_ref().right(),
                }
            }
        }
    }

    /// Returns the minimum element of the tree.
    pub fn first(&self) -> Option<&T> {
        let root = self.root?;

        unsafe {
            let (first, _) = self.min_in_subtree(root);
            Some(first.as_ref())
        }
    }

    /// Returns the maximum element of the tree.
    pub fn last(&self) -> Option<&T> {
        let mut cur = self.root?;

        unsafe {
            while let Some(right) = T::links(cur).as_ref().right() {
                cur = right;
            }

            Some(cur.as_ref())
        }
    }

    /// Returns an iterator over the elements of the tree in ascending key order.
    pub fn iter(&self) -> InOrder<'_, T> {
        InOrder::new(self)
    }

    /// Returns an iterator visiting each node before its left subtree, then its right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(self)
    }

    /// Returns an iterator visiting each node after its left subtree and its right subtree.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(self)
    }

    /// Returns an iterator visiting the tree breadth-first, each level from left to right.
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self)
    }

    #[inline]
    unsafe fn replace_child_or_set_root(
        &mut self,
        parent: Link<T>,
        old_child: NonNull<T>,
        new_child: Link<T>,
    ) {
        match parent {
            Some(parent) => unsafe { self.replace_child(parent, old_child, new_child) },
            None => self.root = new_child,
        }
    }

    // Replaces the child pointer of `parent` pointing at `old_child` with `new_child`.
    //
    // `new_child`'s parent pointer is not updated.
    //
    // # Safety
    //
    // The caller must ensure that `old_child` is a child node of `parent`.
    #[inline]
    unsafe fn replace_child(
        &mut self,
        parent: NonNull<T>,
        old_child: NonNull<T>,
        new_child: Link<T>,
    ) {
        unsafe {
            let links = T::links(parent).as_mut();

            let dir = if links.left() == Some(old_child) {
                Dir::Left
            } else {
                debug_assert_eq!(
                    links.right(),
                    Some(old_child),
                    "`old_child` must be a child of `parent`"
                );
                Dir::Right
            };

            links.set_child(dir, new_child);
        }
    }

    // Recomputes the cached height and balance factor of `node` from its children.
    #[inline]
    unsafe fn update(node: NonNull<T>) {
        unsafe {
            let left = height_of(T::links(node).as_ref().left());
            let right = height_of(T::links(node).as_ref().right());

            let links = T::links(node).as_mut();
            links.set_height(1 + left.max(right));
            links.set_balance(right - left);
        }
    }

    // Rotates the subtree rooted at `down` in direction `dir`: the `!dir` child of `down` rises to
    // take its place, and `down` becomes that child's `dir` child.
    //
    // Only the three nodes involved are re-linked. The risen node inherits `down`'s parent
    // pointer, but the parent's child pointer (or the tree root) still points at `down`; the
    // caller must re-link it. Heights of `down` and the risen node are recomputed.
    //
    // Returns the risen node, the new root of the subtree.
    unsafe fn rotate(down: NonNull<T>, dir: Dir) -> NonNull<T> {
        unsafe {
            let up = T::links(down)
                .as_ref()
                .child(!dir)
                .expect("rotation requires a child on the rising side");

            // `across` moves from the `dir` side of `up` to the `!dir` side of `down`.
            let across = T::links(up).as_ref().child(dir);
            T::links(down).as_mut().set_child(!dir, across);
            if let Some(across) = across {
                T::links(across).as_mut().set_parent(Some(down));
            }

            T::links(up).as_mut().set_child(dir, Some(down));
            let parent = T::links(down).as_mut().set_parent(Some(up));
            T::links(up).as_mut().set_parent(parent);

            Self::update(down);
            Self::update(up);

            up
        }
    }

    // Recomputes `node` and, if its balance factor is ±2, rotates the subtree rooted at it.
    //
    // Returns the root of the subtree afterwards, already linked into its parent.
    unsafe fn rebalance_at(&mut self, node: NonNull<T>) -> NonNull<T> {
        unsafe {
            Self::update(node);

            let balance = T::links(node).as_ref().balance();
            let dir = match balance {
                -1..=1 => return node,
                // Right-heavy: rotate left.
                2 => Dir::Left,
                // Left-heavy: rotate right.
                -2 => Dir::Right,
                _ => unreachable!("balance factor {balance} out of range"),
            };

            let heavy = T::links(node)
                .as_ref()
                .child(!dir)
                .expect("heavy side must have a child");
            let heavy_balance = T::links(heavy).as_ref().balance();
            let parent = T::links(node).as_ref().parent();

            let leans_inward = match dir {
                Dir::Left => heavy_balance < 0,
                Dir::Right => heavy_balance > 0,
            };

            if leans_inward {
                trace!(key = ?node.as_ref().key(), balance, heavy_balance, ?dir, "double rotation");

                // Bring the inner grandchild up to the middle first. It keeps `node` as parent.
                let middle = Self::rotate(heavy, !dir);
                T::links(node).as_mut().set_child(!dir, Some(middle));
            } else {
                trace!(key = ?node.as_ref().key(), balance, heavy_balance, ?dir, "single rotation");
            }

            let top = Self::rotate(node, dir);
            self.replace_child_or_set_root(parent, node, Some(top));

            top
        }
    }

    // Rebalances every node from `opt_node` up to the root.
    fn rebalance_from(&mut self, mut opt_node: Link<T>) {
        while let Some(node) = opt_node {
            unsafe {
                let top = self.rebalance_at(node);
                opt_node = T::links(top).as_ref().parent();
            }
        }
    }

    /// Inserts an item into the tree.
    ///
    /// If the tree already contains an item with an equal key, the tree is left unchanged and
    /// `item` is returned.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, item: T::Handle) -> Option<T::Handle> {
        let ptr = T::into_ptr(item);

        unsafe { T::links(ptr).as_mut().reset() };

        let mut parent = match self.root {
            Some(root) => root,
            None => {
                // Tree is empty. Set `item` as the root and return.
                self.root = Some(ptr);
                self.len += 1;
                return None;
            }
        };

        // Descend the tree, looking for a free slot.
        loop {
            let ordering = unsafe { ptr.as_ref().key().cmp(parent.as_ref().key()) };

            let dir = match ordering {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => {
                    trace!(key = ?unsafe { ptr.as_ref().key() }, "rejected duplicate key");
                    return Some(unsafe { T::from_ptr(ptr) });
                }
            };

            unsafe {
                let parent_links = T::links(parent).as_mut();
                match parent_links.child(dir) {
                    // Descend.
                    Some(child) => parent = child,

                    // Set `item` as child.
                    None => {
                        parent_links.set_child(dir, Some(ptr));
                        T::links(ptr).as_mut().set_parent(Some(parent));
                        break;
                    }
                }
            }
        }

        self.len += 1;

        // The new leaf is already up to date; its ancestors may not be.
        self.rebalance_from(Some(parent));

        None
    }

    // Returns the minimum node in the subtree.
    //
    // If the subtree root is not the minimum, also returns the minimum node's parent.
    #[inline]
    unsafe fn min_in_subtree(&self, root: NonNull<T>) -> (NonNull<T>, Option<NonNull<T>>) {
        let mut parent = None;
        let mut cur = root;

        while let Some(left) = unsafe { T::links(cur).as_ref().left() } {
            parent = Some(cur);
            cur = left;
        }

        (cur, parent)
    }

    /// Removes the node corresponding to `key` from the tree and returns it.
    ///
    /// Returns `None`, leaving the tree unchanged, if there is no such node.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T::Handle>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        match self.get_raw(key) {
            Some(node) => Some(unsafe { self.remove_at(node) }),
            None => {
                debug!("key not found for removal");
                None
            }
        }
    }

    /// Removes an arbitrary node from the tree.
    ///
    /// # Safety
    ///
    /// It is the caller's responsibility to ensure that `node` is an element of `self`, and not any
    /// other tree.
    pub unsafe fn remove_at(&mut self, node: NonNull<T>) -> T::Handle {
        // There are three possible cases:
        //
        // 1. `node` has two children.
        //
        //    `node`'s successor[^1] is unlinked from its position and takes `node`'s place. The
        //    successor's right child is elevated to replace it. The resulting layout of keys is
        //    the same as if the successor's key had been moved into `node`.
        //
        //    The successor by definition has no left child, so its own unlinking is a removal
        //    matching case 2 or 3.
        //
        // 2. `node` has one child. The child is elevated to replace it.
        //
        // 3. `node` is a leaf. It is simply unlinked.
        //
        // In every case the heights can only have changed on the path from the lowest re-linked
        // position to the root, which is where rebalancing starts.
        //
        // [^1]: The successor of a node `a` is the least node in `a`'s right subtree.

        unsafe {
            let parent = T::links(node).as_ref().parent();
            let left = T::links(node).as_ref().left();
            let right = T::links(node).as_ref().right();

            let rebalance_start = match (left, right) {
                (Some(left), Some(right)) => {
                    let (successor, successor_parent) = self.min_in_subtree(right);

                    let start = match successor_parent {
                        Some(successor_parent) => {
                            // Elevate the successor's right child to replace it.
                            let successor_right = T::links(successor).as_ref().right();
                            self.replace_child(successor_parent, successor, successor_right);
                            if let Some(sr) = successor_right {
                                T::links(sr).as_mut().set_parent(Some(successor_parent));
                            }

                            T::links(successor).as_mut().set_right(Some(right));
                            T::links(right).as_mut().set_parent(Some(successor));

                            successor_parent
                        }

                        // The successor is `right` itself and keeps its right subtree.
                        None => successor,
                    };

                    self.replace_child_or_set_root(parent, node, Some(successor));
                    T::links(successor).as_mut().set_parent(parent);
                    T::links(successor).as_mut().set_left(Some(left));
                    T::links(left).as_mut().set_parent(Some(successor));

                    Some(start)
                }

                (Some(child), None) | (None, Some(child)) => {
                    self.replace_child_or_set_root(parent, node, Some(child));
                    T::links(child).as_mut().set_parent(parent);

                    parent
                }

                (None, None) => {
                    self.replace_child_or_set_root(parent, node, None);

                    parent
                }
            };

            self.rebalance_from(rebalance_start);

            self.len -= 1;

            T::links(node).as_mut().reset();
            T::from_ptr(node)
        }
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            unsafe {
                // Descend to the minimum node.
                let (cur, parent) = self.min_in_subtree(cur);
                let parent = parent.or_else(|| T::links(cur).as_ref().parent());

                let right = T::links(cur).as_ref().right();

                // Elevate the node's right child (which may be None).
                self.replace_child_or_set_root(parent, cur, right);
                if let Some(right) = right {
                    T::links(right).as_mut().set_parent(parent);
                }

                // Drop the node.
                drop(T::from_ptr(cur));
                self.len -= 1;

                // If the node had no right child, climb to the parent. If the node had no parent,
                // the tree is empty.
                opt_cur = right.or(parent);
            }
        }

        debug_assert!(self.root.is_none());
        debug_assert_eq!(self.len(), 0);
    }
}

impl<T> Default for AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn drop(&mut self) {
        self.clear();
    }
}

/// A shared handle to a node of an [`AvlTree`].
///
/// Handles expose the shape of the tree (parent and child links, cached height and balance
/// factor) for read-only walks, such as exporting the tree as a graph.
pub struct NodeRef<'tree, T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    ptr: NonNull<T>,
    _tree: PhantomData<&'tree T>,
}

impl<'tree, T> NodeRef<'tree, T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    // # Safety
    //
    // `ptr` must be an element of a tree that stays borrowed for `'tree`.
    unsafe fn new(ptr: NonNull<T>) -> Self {
        NodeRef {
            ptr,
            _tree: PhantomData,
        }
    }

    /// Returns a reference to the node's item.
    pub fn get(&self) -> &'tree T {
        unsafe { self.ptr.as_ref() }
    }

    /// Returns the node's key.
    pub fn key(&self) -> &'tree T::Key {
        self.get().key()
    }

    /// Returns the node's parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.links()
            .parent()
            .map(|parent| unsafe { NodeRef::new(parent) })
    }

    /// Returns the node's left child.
    pub fn left(&self) -> Option<Self> {
        self.child(Dir::Left)
    }

    /// Returns the node's right child.
    pub fn right(&self) -> Option<Self> {
        self.child(Dir::Right)
    }

    /// Returns the height of the subtree rooted at this node. Leaves have height 0.
    pub fn height(&self) -> usize {
        self.links().height() as usize
    }

    /// Returns the height of the right subtree minus the height of the left subtree.
    pub fn balance_factor(&self) -> i8 {
        self.links().balance()
    }

    fn child(&self, dir: Dir) -> Option<Self> {
        self.links()
            .child(dir)
            .map(|child| unsafe { NodeRef::new(child) })
    }

    fn links(&self) -> &'tree Links<T> {
        unsafe { T::links(self.ptr).as_ref() }
    }
}

impl<T> Clone for NodeRef<'_, T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> where T: TreeNode<Links<T>> + ?Sized {}

impl<T> PartialEq for NodeRef<'_, T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T> Eq for NodeRef<'_, T> where T: TreeNode<Links<T>> + ?Sized {}

impl<T> fmt::Debug for NodeRef<'_, T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("height", &self.height())
            .field("balance_factor", &self.balance_factor())
            .finish()
    }
}

impl<T: ?Sized> Links<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(LinksInner {
                parent: None,
                children: [None; 2],
                height: 0,
                balance: 0,
                _unpin: PhantomPinned,
            }),
        }
    }

    // Restores the state of a detached leaf.
    #[inline]
    fn reset(&mut self) {
        let inner = self.inner.get_mut();
        inner.parent = None;
        inner.children = [None; 2];
        inner.height = 0;
        inner.balance = 0;
    }

    #[inline]
    fn height(&self) -> i8 {
        unsafe { (*self.inner.get()).height }
    }

    #[inline]
    fn balance(&self) -> i8 {
        unsafe { (*self.inner.get()).balance }
    }

    #[inline]
    fn parent(&self) -> Link<T> {
        unsafe { (*self.inner.get()).parent }
    }

    #[inline]
    fn child(&self, dir: Dir) -> Link<T> {
        unsafe { (*self.inner.get()).children[dir as usize] }
    }

    #[inline]
    fn left(&self) -> Link<T> {
        self.child(Dir::Left)
    }

    #[inline]
    fn right(&self) -> Link<T> {
        self.child(Dir::Right)
    }

    #[inline]
    fn set_parent(&mut self, parent: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().parent, parent)
    }

    #[inline]
    fn set_child(&mut self, dir: Dir, child: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().children[dir as usize], child)
    }

    #[inline]
    fn set_left(&mut self, left: Link<T>) -> Link<T> {
        self.set_child(Dir::Left, left)
    }

    #[inline]
    fn set_right(&mut self, right: Link<T>) -> Link<T> {
        self.set_child(Dir::Right, right)
    }

    #[inline]
    fn set_height(&mut self, height: i8) {
        self.inner.get_mut().height = height;
    }

    #[inline]
    fn set_balance(&mut self, balance: i8) {
        self.inner.get_mut().balance = balance;
    }
}

impl<T: ?Sized> Default for Links<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Links")
            .field("parent", &self.parent())
            .field("left", &self.left())
            .field("right", &self.right())
            .field("height", &self.height())
            .field("balance", &self.balance())
            .finish()
    }
}
