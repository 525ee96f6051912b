//! Iterators over a [`BinarySearchTree`][crate::BinarySearchTree].
//!
//! All traversals keep their own explicit stack or queue, so walking a
//! degenerate (list-shaped) tree never recurses.

use std::{collections::VecDeque, iter::FusedIterator};

use crate::tree::node::{Link, Node};

// ////////////////////////////////////////////////////////////////////////////
// In-order
// ////////////////////////////////////////////////////////////////////////////

/// Borrowing in-order iterator, yielding values in non-decreasing order.
///
/// Created by [`BinarySearchTree::iter`][crate::BinarySearchTree::iter].
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

// ////////////////////////////////////////////////////////////////////////////
// Pre-order
// ////////////////////////////////////////////////////////////////////////////

/// Borrowing pre-order iterator (node, left subtree, right subtree).
///
/// Created by [`BinarySearchTree::preorder`][crate::BinarySearchTree::preorder].
#[derive(Debug)]
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        PreOrder {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so that the left subtree is popped first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.value)
    }
}

impl<T> FusedIterator for PreOrder<'_, T> {}

// ////////////////////////////////////////////////////////////////////////////
// Post-order
// ////////////////////////////////////////////////////////////////////////////

/// A step of an explicit-stack post-order walk.
#[derive(Debug)]
pub(crate) enum Visit<'a, T> {
    /// First arrival at a node: its children still have to be walked.
    Enter(&'a Node<T>),
    /// Both children have been walked.
    Exit(&'a Node<T>),
}

/// Walks a tree in post-order, handing out each node once both of its
/// subtrees have been fully visited.
#[derive(Debug)]
pub(crate) struct PostOrderNodes<'a, T> {
    stack: Vec<Visit<'a, T>>,
}

impl<'a, T> PostOrderNodes<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        PostOrderNodes {
            stack: root.map(Visit::Enter).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrderNodes<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Visit::Enter(node) => {
                    self.stack.push(Visit::Exit(node));
                    self.stack.extend(node.right.as_deref().map(Visit::Enter));
                    self.stack.extend(node.left.as_deref().map(Visit::Enter));
                }
                Visit::Exit(node) => return Some(node),
            }
        }
    }
}

/// Borrowing post-order iterator (left subtree, right subtree, node).
///
/// Created by [`BinarySearchTree::postorder`][crate::BinarySearchTree::postorder].
#[derive(Debug)]
pub struct PostOrder<'a, T> {
    nodes: PostOrderNodes<'a, T>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        PostOrder {
            nodes: PostOrderNodes::new(root),
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| &node.value)
    }
}

impl<T> FusedIterator for PostOrder<'_, T> {}

// ////////////////////////////////////////////////////////////////////////////
// Level-order
// ////////////////////////////////////////////////////////////////////////////

/// Borrowing level-order iterator. Each item is one level of the tree, from
/// the root downwards, with values ordered left to right.
///
/// Created by [`BinarySearchTree::levels`][crate::BinarySearchTree::levels].
#[derive(Debug)]
pub struct Levels<'a, T> {
    queue: VecDeque<&'a Node<T>>,
}

impl<'a, T> Levels<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Levels {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Levels<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.queue.is_empty() {
            return None;
        }

        let width = self.queue.len();
        let mut level = Vec::with_capacity(width);
        for _ in 0..width {
            let node = self.queue.pop_front()?;
            level.push(&node.value);
            self.queue.extend(node.left.as_deref());
            self.queue.extend(node.right.as_deref());
        }
        Some(level)
    }
}

impl<T> FusedIterator for Levels<'_, T> {}

// ////////////////////////////////////////////////////////////////////////////
// Owning in-order
// ////////////////////////////////////////////////////////////////////////////

/// Consuming in-order iterator.
///
/// Created by the [`IntoIterator`] implementation of
/// [`BinarySearchTree`][crate::BinarySearchTree].
#[derive(Debug)]
pub struct IntoIter<T> {
    // Nodes on the stack have already had their left subtree detached.
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { value, right, .. } = *node;
        self.push_left_spine(right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Right subtrees still hang off the stacked nodes; draining unlinks
        // them one node at a time instead of recursing through `Box::drop`.
        for _ in self.by_ref() {}
    }
}
