//! Nodes of the [`BinarySearchTree`][crate::BinarySearchTree].
//!
//! A node exclusively owns both of its children through a [`Link`]. The tree
//! owns the root link, so each node has exactly one owner and there are no
//! back-references. Algorithms which need the parent of a node instead hold
//! on to the `&mut Link` slot which owns it.

use std::mem;

/// An owning, possibly empty, child slot.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// Which child slot to descend into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

// ////////////////////////////////////////////////////////////////////////////
// Node
// ////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub value: T,
    pub left: Link<T>,
    pub right: Link<T>,
}

impl<T> Node<T> {
    /// Create a new leaf holding `value`.
    #[inline]
    pub fn leaf(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    #[inline]
    pub fn child_mut(&mut self, side: Side) -> &mut Link<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl<T: PartialOrd> Node<T> {
    /// The side on which `value` is placed when inserted below this node.
    ///
    /// Values equal to or greater than the node go right, strictly smaller
    /// values go left.
    #[inline]
    pub fn insert_side(&self, value: &T) -> Side {
        if *value >= self.value {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// The side on which `value` is searched for below this node, or `None` if
    /// this node holds `value`.
    #[inline]
    pub fn search_side(&self, value: &T) -> Option<Side> {
        if self.value < *value {
            Some(Side::Right)
        } else if self.value > *value {
            Some(Side::Left)
        } else {
            None
        }
    }
}

// ///////////////////////////////////////////////
// Slot operations
// ///////////////////////////////////////////////
//
// These operate on the slot owning a node rather than on the node itself, as
// removing a node means rewriting whatever owns it.

/// Walk down from `slot` and return the slot holding the first node equal to
/// `value` along the search path, or the empty slot where the search ended.
pub(crate) fn locate<'a, T: PartialOrd>(mut slot: &'a mut Link<T>, value: &T) -> &'a mut Link<T> {
    while let Some(side) = slot.as_deref().and_then(|node| node.search_side(value)) {
        slot = match slot {
            Some(node) => node.child_mut(side),
            None => break,
        };
    }
    slot
}

/// Walk down from `slot` and return the empty slot where `value` belongs.
pub(crate) fn vacancy<'a, T: PartialOrd>(mut slot: &'a mut Link<T>, value: &T) -> &'a mut Link<T> {
    while let Some(side) = slot.as_deref().map(|node| node.insert_side(value)) {
        slot = match slot {
            Some(node) => node.child_mut(side),
            None => break,
        };
    }
    slot
}

/// Remove the node owned by `slot`, returning its value.
///
/// A node with at most one child is replaced by that child. A node with two
/// children keeps its position and takes the value of its in-order
/// successor, which is spliced out of the right subtree instead.
pub(crate) fn unlink<T>(slot: &mut Link<T>) -> Option<T> {
    let node = slot.as_deref_mut()?;
    if node.left.is_some() && node.right.is_some() {
        let successor = take_leftmost(&mut node.right)?;
        return Some(mem::replace(&mut node.value, successor));
    }

    let node = slot.take()?;
    let Node { value, left, right } = *node;
    *slot = left.or(right);
    Some(value)
}

/// Detach the leftmost node below `slot`, linking its parent to its right
/// child. The leftmost node never has a left child.
fn take_leftmost<T>(mut slot: &mut Link<T>) -> Option<T> {
    while slot.as_ref().is_some_and(|node| node.left.is_some()) {
        slot = match slot {
            Some(node) => &mut node.left,
            None => break,
        };
    }

    let node = slot.take()?;
    let Node { value, right, .. } = *node;
    *slot = right;
    Some(value)
}

/// Follow `side` links from `node` to the last node on that path.
pub(crate) fn extreme<T>(mut node: &Node<T>, side: Side) -> &Node<T> {
    while let Some(next) = node.child(side) {
        node = next;
    }
    node
}

/// Build a subtree from the next `len` values of an ascending iterator.
///
/// The value at index `len / 2` becomes the subtree root, the values before it
/// form the left subtree and those after it the right subtree. Recursion depth
/// is bounded by `log2(len)`.
pub(crate) fn build_balanced<T, I>(values: &mut I, len: usize) -> Link<T>
where
    I: Iterator<Item = T>,
{
    if len == 0 {
        return None;
    }
    let mid = len / 2;
    let left = build_balanced(values, mid);
    let value = values.next()?;
    let right = build_balanced(values, len - mid - 1);
    Some(Box::new(Node { value, left, right }))
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
