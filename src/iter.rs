//! Traversals over an [`AvlTree`].
//!
//! None of the traversals recurse, so their stack usage does not depend on the height of the tree.

use std::{collections::VecDeque, marker::PhantomData, ptr::NonNull};

use crate::{AvlTree, Link, Links, TreeNode};

/// An in-order iterator over the elements of an [`AvlTree`], yielding them in ascending key order.
pub struct InOrder<'tree, T: TreeNode<Links<T>> + ?Sized> {
    next: Link<T>,
    len: usize,
    _tree: PhantomData<&'tree AvlTree<T>>,
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> InOrder<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>) -> Self {
        InOrder {
            next: tree
                .root
                .map(|root| unsafe { tree.min_in_subtree(root).0 }),
            len: tree.len(),
            _tree: PhantomData,
        }
    }
}

// Returns the node following `cur` in key order.
unsafe fn successor<T: TreeNode<Links<T>> + ?Sized>(mut cur: NonNull<T>) -> Link<T> {
    unsafe {
        if let Some(mut right) = T::links(cur).as_ref().right() {
            // The successor is the minimum of the right subtree.
            while let Some(left) = T::links(right).as_ref().left() {
                right = left;
            }

            return Some(right);
        }

        // Otherwise, ascend until arriving from a left child.
        while let Some(parent) = T::links(cur).as_ref().parent() {
            if T::links(parent).as_ref().left() == Some(cur) {
                return Some(parent);
            }

            cur = parent;
        }

        None
    }
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> Iterator for InOrder<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let cur = self.next?;

        unsafe {
            self.next = successor(cur);
            self.len -= 1;

            Some(cur.as_ref())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T: TreeNode<Links<T>> + ?Sized> ExactSizeIterator for InOrder<'_, T> {}

/// A pre-order iterator over the elements of an [`AvlTree`].
///
/// Each node is yielded before the nodes of its left subtree, which come before those of its right
/// subtree.
pub struct PreOrder<'tree, T: TreeNode<Links<T>> + ?Sized> {
    stack: Vec<NonNull<T>>,
    len: usize,
    _tree: PhantomData<&'tree AvlTree<T>>,
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> PreOrder<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>) -> Self {
        PreOrder {
            stack: tree.root.into_iter().collect(),
            len: tree.len(),
            _tree: PhantomData,
        }
    }
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> Iterator for PreOrder<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.stack.pop()?;

        unsafe {
            let links = T::links(cur).as_ref();

            // Right goes first so that left is popped first.
            self.stack.extend(links.right());
            self.stack.extend(links.left());

            self.len -= 1;
            Some(cur.as_ref())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T: TreeNode<Links<T>> + ?Sized> ExactSizeIterator for PreOrder<'_, T> {}

/// A post-order iterator over the elements of an [`AvlTree`].
///
/// Each node is yielded after the nodes of its left subtree and then those of its right subtree.
pub struct PostOrder<'tree, T: TreeNode<Links<T>> + ?Sized> {
    // Each entry records whether the node's children have already been pushed.
    stack: Vec<(NonNull<T>, bool)>,
    len: usize,
    _tree: PhantomData<&'tree AvlTree<T>>,
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> PostOrder<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>) -> Self {
        PostOrder {
            stack: tree.root.map(|root| (root, false)).into_iter().collect(),
            len: tree.len(),
            _tree: PhantomData,
        }
    }
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> Iterator for PostOrder<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (cur, expanded) = self.stack.pop()?;

            if expanded {
                self.len -= 1;
                return Some(unsafe { cur.as_ref() });
            }

            self.stack.push((cur, true));

            unsafe {
                let links = T::links(cur).as_ref();
                self.stack.extend(links.right().map(|right| (right, false)));
                self.stack.extend(links.left().map(|left| (left, false)));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T: TreeNode<Links<T>> + ?Sized> ExactSizeIterator for PostOrder<'_, T> {}

/// A level-order (breadth-first) iterator over the elements of an [`AvlTree`].
///
/// The root is yielded first, then each following level from left to right.
pub struct LevelOrder<'tree, T: TreeNode<Links<T>> + ?Sized> {
    queue: VecDeque<NonNull<T>>,
    len: usize,
    _tree: PhantomData<&'tree AvlTree<T>>,
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> LevelOrder<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>) -> Self {
        LevelOrder {
            queue: tree.root.into_iter().collect(),
            len: tree.len(),
            _tree: PhantomData,
        }
    }
}

impl<'tree, T: TreeNode<Links<T>> + ?Sized> Iterator for LevelOrder<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.queue.pop_front()?;

        unsafe {
            let links = T::links(cur).as_ref();
            self.queue.extend(links.left());
            self.queue.extend(links.right());

            self.len -= 1;
            Some(cur.as_ref())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T: TreeNode<Links<T>> + ?Sized> ExactSizeIterator for LevelOrder<'_, T> {}
