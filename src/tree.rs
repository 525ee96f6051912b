//! A binary search tree with rebuild-based balancing and level-order
//! introspection.
//!
//! The tree routes values which are equal to or greater than a node to the
//! right, and strictly smaller values to the left.  Duplicates are therefore
//! kept, and always end up in the right subtree of an equal value:
//!
//! ```text
//!         5
//!       /   \
//!      3     5      <- second 5, inserted after the first
//!     / \     \
//!    1   4     8
//! ```
//!
//! Searching and deleting stop at the first equal value on the path from the
//! root, so they find the shallowest duplicate.
//!
//! Every operation which walks a path or the whole tree does so iteratively,
//! so an unbalanced (list-shaped) tree cannot exhaust the stack.  The only
//! recursive algorithm is the rebuild performed by
//! [`balance`][BinarySearchTree::balance], whose depth is bounded by
//! `log2(n)`.

mod iter;
mod node;

use std::{fmt, iter::Sum};

use thiserror::Error;
use tracing::{debug, trace};

pub use self::iter::{IntoIter, Iter, Levels, PostOrder, PreOrder};
use self::{
    iter::PostOrderNodes,
    node::{Link, Node, Side},
};
use crate::is_orderable;

/// Height reported for an empty tree.
const EMPTY_HEIGHT: isize = -1;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors returned by [`BinarySearchTree`] operations.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum TreeError {
    /// The value cannot be ordered, not even against itself (such as
    /// `f64::NAN`).
    #[error("value cannot be ordered.")]
    InvalidValue,
    /// The operation needs at least one value in the tree.
    #[error("the tree is empty.")]
    EmptyStructure,
}

/// Reject values which cannot take part in the ordering.
#[inline]
fn validate<T: PartialOrd>(value: &T) -> Result<(), TreeError> {
    if is_orderable(value) {
        Ok(())
    } else {
        Err(TreeError::InvalidValue)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// BinarySearchTree
// ////////////////////////////////////////////////////////////////////////////

/// A binary search tree in which each node exclusively owns its children.
///
/// The tree accepts any `T: PartialOrd`, though the values stored must be
/// totally ordered amongst themselves.  Values which cannot even be compared
/// against themselves (`NaN`) are rejected with [`TreeError::InvalidValue`].
///
/// # Examples
///
/// ```
/// use binary_collections::BinarySearchTree;
///
/// let mut tree = BinarySearchTree::new();
/// for value in [5, 3, 8, 1, 4] {
///     tree.insert(value)?;
/// }
///
/// assert_eq!(tree.inorder_traversal()?, vec![1, 3, 4, 5, 8]);
/// assert_eq!(tree.find_min()?, &1);
/// assert_eq!(tree.find_max()?, &8);
/// assert_eq!(tree.height(), 2);
/// # Ok::<(), binary_collections::TreeError>(())
/// ```
pub struct BinarySearchTree<T> {
    root: Link<T>,
    len: usize,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> BinarySearchTree<T> {
    /// Create a new, empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        BinarySearchTree { root: None, len: 0 }
    }

    /// Returns the number of values in the tree, duplicates included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0 || self.root.is_none()
    }

    /// Removes every value from the tree.
    #[inline]
    pub fn clear(&mut self) {
        // Draining through the owning iterator frees the nodes one at a time.
        drop(IntoIter::new(self.root.take(), self.len));
        self.len = 0;
    }

    /// The smallest value, found by following left links from the root.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::{BinarySearchTree, TreeError};
    ///
    /// let mut tree: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert_eq!(tree.find_min(), Err(TreeError::EmptyStructure));
    ///
    /// tree.extend([4, 2, 9]);
    /// assert_eq!(tree.find_min(), Ok(&2));
    /// ```
    #[inline]
    pub fn find_min(&self) -> Result<&T, TreeError> {
        self.extreme(Side::Left)
    }

    /// The largest value, found by following right links from the root.
    ///
    /// When the largest value is duplicated, this is the most recently
    /// inserted copy.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    #[inline]
    pub fn find_max(&self) -> Result<&T, TreeError> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Result<&T, TreeError> {
        self.root
            .as_deref()
            .map(|root| &node::extreme(root, side).value)
            .ok_or(TreeError::EmptyStructure)
    }

    /// The number of edges on the longest path from the root to a leaf.
    ///
    /// An empty tree has height `-1` and a tree with a single value has
    /// height `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend([2, 1, 3]);
    /// assert_eq!(tree.height(), 1);
    /// ```
    #[must_use]
    pub fn height(&self) -> isize {
        let levels = self.levels().count();
        isize::try_from(levels).map_or(isize::MAX, |levels| levels + EMPTY_HEIGHT)
    }

    /// Sum of every value in the tree, or the additive identity if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert_eq!(tree.sum(), 0);
    ///
    /// tree.extend([5, 3, 8]);
    /// assert_eq!(tree.sum(), 16);
    /// ```
    #[inline]
    pub fn sum<'a>(&'a self) -> T
    where
        T: Sum<&'a T>,
    {
        self.iter().sum()
    }

    /// Returns `true` if, at every node, the heights of the two subtrees
    /// differ by at most one.
    ///
    /// The heights are computed in a single bottom-up pass which stops at the
    /// first unbalanced node.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32> = (1..=4).collect();
    /// assert!(!tree.is_balanced()?);
    ///
    /// tree.balance();
    /// assert!(tree.is_balanced()?);
    /// # Ok::<(), binary_collections::TreeError>(())
    /// ```
    pub fn is_balanced(&self) -> Result<bool, TreeError> {
        if self.is_empty() {
            return Err(TreeError::EmptyStructure);
        }

        // Heights of the subtrees visited so far whose parent has not been
        // reached yet. A left subtree always finishes before its sibling.
        let mut heights: Vec<isize> = Vec::new();
        for node in PostOrderNodes::new(self.root.as_deref()) {
            let right = match node.right {
                Some(_) => heights.pop().unwrap_or(EMPTY_HEIGHT),
                None => EMPTY_HEIGHT,
            };
            let left = match node.left {
                Some(_) => heights.pop().unwrap_or(EMPTY_HEIGHT),
                None => EMPTY_HEIGHT,
            };
            if left.abs_diff(right) > 1 {
                return Ok(false);
            }
            heights.push(left.max(right) + 1);
        }
        Ok(true)
    }

    /// Rebuilds the tree into a height-balanced shape.
    ///
    /// The values are drained in order and reassembled by repeatedly picking
    /// the middle value (index `n / 2`) of each range as the subtree root.  The
    /// in-order sequence, and therefore the multiset of values, is unchanged.
    ///
    /// For a range of two values the larger one becomes the parent and the
    /// smaller its left child.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32> = (1..=7).collect();
    /// assert_eq!(tree.height(), 6);
    ///
    /// tree.balance();
    /// assert_eq!(tree.height(), 2);
    /// assert_eq!(tree.bfs(), vec![vec![4], vec![2, 6], vec![1, 3, 5, 7]]);
    /// ```
    pub fn balance(&mut self) {
        let len = self.len;
        let before = self.height();
        let mut values = IntoIter::new(self.root.take(), len);
        self.root = node::build_balanced(&mut values, len);
        debug!(len, before, after = self.height(), "rebuilt tree");
    }

    /// Borrowing in-order iterator over the tree, in non-decreasing order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Borrowing pre-order iterator (node, left, right).
    #[inline]
    #[must_use]
    pub fn preorder(&self) -> PreOrder<'_, T> {
        PreOrder::new(self.root.as_deref())
    }

    /// Borrowing post-order iterator (left, right, node).
    #[inline]
    #[must_use]
    pub fn postorder(&self) -> PostOrder<'_, T> {
        PostOrder::new(self.root.as_deref())
    }

    /// Borrowing level-order iterator, yielding one level at a time.
    #[inline]
    #[must_use]
    pub fn levels(&self) -> Levels<'_, T> {
        Levels::new(self.root.as_deref())
    }

    /// The values in in-order (left, node, right), which is non-decreasing.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    pub fn inorder_traversal(&self) -> Result<Vec<T>, TreeError>
    where
        T: Clone,
    {
        self.collect_nonempty(self.iter())
    }

    /// The values in pre-order (node, left, right).
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    pub fn preorder_traversal(&self) -> Result<Vec<T>, TreeError>
    where
        T: Clone,
    {
        self.collect_nonempty(self.preorder())
    }

    /// The values in post-order (left, right, node).
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyStructure`] if the tree is empty.
    pub fn postorder_traversal(&self) -> Result<Vec<T>, TreeError>
    where
        T: Clone,
    {
        self.collect_nonempty(self.postorder())
    }

    fn collect_nonempty<'a, I>(&self, values: I) -> Result<Vec<T>, TreeError>
    where
        T: Clone + 'a,
        I: Iterator<Item = &'a T>,
    {
        if self.is_empty() {
            return Err(TreeError::EmptyStructure);
        }
        Ok(values.cloned().collect())
    }

    /// The values grouped by level, the root alone in the first level.
    ///
    /// Unlike the depth-first traversals, an empty tree is not an error and
    /// produces no levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert!(tree.bfs().is_empty());
    ///
    /// tree.extend([5, 3, 8, 1, 4]);
    /// assert_eq!(tree.bfs(), vec![vec![5], vec![3, 8], vec![1, 4]]);
    /// ```
    #[must_use]
    pub fn bfs(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.levels()
            .map(|level| level.into_iter().cloned().collect())
            .collect()
    }
}

impl<T: PartialOrd> BinarySearchTree<T> {
    /// Build a tree by inserting each value in turn.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidValue`] on the first value which cannot be
    /// ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::{BinarySearchTree, TreeError};
    ///
    /// let tree = BinarySearchTree::try_from_iter([2.5, 1.0, 4.0])?;
    /// assert_eq!(tree.len(), 3);
    ///
    /// assert_eq!(
    ///     BinarySearchTree::try_from_iter([1.0, f64::NAN]).err(),
    ///     Some(TreeError::InvalidValue)
    /// );
    /// # Ok::<(), TreeError>(())
    /// ```
    pub fn try_from_iter<I>(values: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = BinarySearchTree::new();
        for value in values {
            tree.insert(value)?;
        }
        Ok(tree)
    }

    /// Insert a value into the tree.
    ///
    /// The value descends right at every node it is equal to or greater than,
    /// and left otherwise, until it reaches an empty slot.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidValue`] if the value cannot be ordered.  The tree
    /// is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(1)?;
    /// tree.insert(1)?;
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), binary_collections::TreeError>(())
    /// ```
    pub fn insert(&mut self, value: T) -> Result<(), TreeError> {
        validate(&value)?;
        self.insert_unchecked(value);
        Ok(())
    }

    fn insert_unchecked(&mut self, value: T) {
        let slot = node::vacancy(&mut self.root, &value);
        *slot = Some(Box::new(Node::leaf(value)));
        self.len += 1;
    }

    /// Search for a value equal to `value`.
    ///
    /// Returns the first equal value on the path from the root, or `None` if
    /// the tree has no such value.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidValue`] if the probe cannot be ordered.  An empty
    /// tree is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert_eq!(tree.search(&3)?, None);
    ///
    /// tree.extend([5, 3, 8]);
    /// assert_eq!(tree.search(&3)?, Some(&3));
    /// assert_eq!(tree.search(&4)?, None);
    /// # Ok::<(), binary_collections::TreeError>(())
    /// ```
    pub fn search(&self, value: &T) -> Result<Option<&T>, TreeError> {
        validate(value)?;
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match node.search_side(value) {
                Some(side) => cursor = node.child(side),
                None => return Ok(Some(&node.value)),
            }
        }
        Ok(None)
    }

    /// Returns `true` if the tree holds a value equal to `value`.
    ///
    /// A value which cannot be ordered is never contained.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        matches!(self.search(value), Ok(Some(_)))
    }

    /// Remove a value equal to `value` from the tree and return it.
    ///
    /// The first equal value on the path from the root is removed.  If its
    /// node has two children, the node takes over the value of its in-order
    /// successor (the smallest value of its right subtree), and the
    /// successor's node is spliced out instead.
    ///
    /// Returns `None`, leaving the tree unchanged, if no value matches.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidValue`] if the probe cannot be ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// assert_eq!(tree.delete(&5)?, Some(5));
    /// assert_eq!(tree.bfs()[0], vec![7]);
    /// assert_eq!(tree.inorder_traversal()?, vec![1, 3, 4, 7, 8, 9]);
    ///
    /// assert_eq!(tree.delete(&5)?, None);
    /// assert_eq!(tree.len(), 6);
    /// # Ok::<(), binary_collections::TreeError>(())
    /// ```
    pub fn delete(&mut self, value: &T) -> Result<Option<T>, TreeError> {
        validate(value)?;
        let removed = node::unlink(node::locate(&mut self.root, value));
        if removed.is_some() {
            self.len -= 1;
            trace!(len = self.len, "removed value");
        } else {
            trace!(len = self.len, "value to remove not found");
        }
        Ok(removed)
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for BinarySearchTree<T> {
    #[inline]
    fn default() -> Self {
        BinarySearchTree::new()
    }
}

impl<T> Drop for BinarySearchTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Two trees are equal when they hold the same values in the same order;
/// their shapes may differ.
impl<A, B> PartialEq<BinarySearchTree<B>> for BinarySearchTree<A>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &BinarySearchTree<B>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BinarySearchTree<T> {}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            // Every value of a totally ordered type is valid.
            self.insert_unchecked(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = BinarySearchTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> IntoIterator for BinarySearchTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let len = self.len;
        self.len = 0;
        IntoIter::new(self.root.take(), len)
    }
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> fmt::Debug for BinarySearchTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> fmt::Display for BinarySearchTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, value) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{BinarySearchTree, Node, TreeError};

    /// Tree from the worked examples: 5 at the root, 3 and 8 below it.
    fn sample() -> BinarySearchTree<i32> {
        [5, 3, 8, 1, 4, 7, 9].into_iter().collect()
    }

    /// Verify the structural invariants of the tree.
    fn check<T: PartialOrd>(tree: &BinarySearchTree<T>) {
        assert_eq!(tree.iter().count(), tree.len());
        assert_eq!(tree.is_empty(), tree.len() == 0);
        let values: Vec<_> = tree.iter().collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn empty() {
        let tree: BinarySearchTree<i32> = BinarySearchTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.sum(), 0);
        assert!(tree.bfs().is_empty());
        assert_eq!(tree.find_min(), Err(TreeError::EmptyStructure));
        assert_eq!(tree.find_max(), Err(TreeError::EmptyStructure));
        assert_eq!(tree.is_balanced(), Err(TreeError::EmptyStructure));
        assert_eq!(tree.inorder_traversal(), Err(TreeError::EmptyStructure));
        assert_eq!(tree.preorder_traversal(), Err(TreeError::EmptyStructure));
        assert_eq!(tree.postorder_traversal(), Err(TreeError::EmptyStructure));
    }

    #[test]
    fn search_empty_is_not_an_error() -> Result<()> {
        let tree: BinarySearchTree<i32> = BinarySearchTree::new();
        assert_eq!(tree.search(&1)?, None);
        Ok(())
    }

    #[test]
    fn scenario_insert() -> Result<()> {
        let mut tree = BinarySearchTree::new();
        for value in [5, 3, 8, 1, 4] {
            tree.insert(value)?;
        }
        check(&tree);
        assert_eq!(tree.inorder_traversal()?, vec![1, 3, 4, 5, 8]);
        assert_eq!(tree.find_min()?, &1);
        assert_eq!(tree.find_max()?, &8);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.len(), 5);
        Ok(())
    }

    #[test]
    fn traversal_orders() -> Result<()> {
        let tree = sample();
        assert_eq!(tree.inorder_traversal()?, vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.preorder_traversal()?, vec![5, 3, 1, 4, 8, 7, 9]);
        assert_eq!(tree.postorder_traversal()?, vec![1, 4, 3, 7, 9, 8, 5]);
        assert_eq!(
            tree.bfs(),
            vec![vec![5], vec![3, 8], vec![1, 4, 7, 9]]
        );
        Ok(())
    }

    #[test]
    fn render() {
        let tree = sample();
        assert_snapshot!(tree.to_string(), @"[1, 3, 4, 5, 7, 8, 9]");
        assert_snapshot!(format!("{tree:?}"), @"[1, 3, 4, 5, 7, 8, 9]");
        assert_snapshot!(format!("{:?}", tree.bfs()), @"[[5], [3, 8], [1, 4, 7, 9]]");
    }

    #[test]
    fn duplicates() -> Result<()> {
        let tree: BinarySearchTree<i32> = [2, 2, 1, 2].into_iter().collect();
        check(&tree);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.bfs(), vec![vec![2], vec![1, 2], vec![2]]);
        assert_eq!(tree.search(&2)?, Some(&2));
        assert_eq!(tree.sum(), 7);
        Ok(())
    }

    #[rstest]
    #[case::leaf(1, vec![3, 4, 5, 7, 8, 9])]
    #[case::right_inner(8, vec![1, 3, 4, 5, 7, 9])]
    #[case::left_inner(3, vec![1, 4, 5, 7, 8, 9])]
    #[case::root(5, vec![1, 3, 4, 7, 8, 9])]
    fn delete(#[case] value: i32, #[case] expected: Vec<i32>) -> Result<()> {
        let mut tree = sample();
        assert_eq!(tree.delete(&value)?, Some(value));
        check(&tree);
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.inorder_traversal()?, expected);
        assert!(!tree.contains(&value));
        Ok(())
    }

    #[test]
    fn delete_root_promotes_successor() -> Result<()> {
        let mut tree = sample();
        tree.delete(&5)?;
        assert_eq!(tree.bfs(), vec![vec![7], vec![3, 8], vec![1, 4, 9]]);
        Ok(())
    }

    #[test]
    fn delete_single_child_relinks() -> Result<()> {
        let mut tree: BinarySearchTree<i32> = [5, 3, 1].into_iter().collect();
        tree.delete(&3)?;
        assert_eq!(tree.bfs(), vec![vec![5], vec![1]]);
        tree.delete(&5)?;
        assert_eq!(tree.bfs(), vec![vec![1]]);
        Ok(())
    }

    #[test]
    fn delete_missing_keeps_count() -> Result<()> {
        let mut tree = sample();
        assert_eq!(tree.delete(&6)?, None);
        assert_eq!(tree.len(), 7);

        let mut empty: BinarySearchTree<i32> = BinarySearchTree::new();
        assert_eq!(empty.delete(&6)?, None);
        assert_eq!(empty.len(), 0);
        Ok(())
    }

    #[test]
    fn delete_until_empty() -> Result<()> {
        let mut tree = sample();
        for value in [5, 3, 8, 1, 4, 7, 9] {
            assert_eq!(tree.delete(&value)?, Some(value));
            check(&tree);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        Ok(())
    }

    #[test]
    fn delete_duplicate_removes_one() -> Result<()> {
        let mut tree: BinarySearchTree<i32> = [4, 4, 4].into_iter().collect();
        assert_eq!(tree.delete(&4)?, Some(4));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.inorder_traversal()?, vec![4, 4]);
        Ok(())
    }

    #[test]
    fn invalid_values() {
        let mut tree = BinarySearchTree::new();
        assert_eq!(tree.insert(f64::NAN), Err(TreeError::InvalidValue));
        assert!(tree.is_empty());
        assert_eq!(tree.search(&f64::NAN), Err(TreeError::InvalidValue));
        assert_eq!(tree.delete(&f64::NAN), Err(TreeError::InvalidValue));
        assert!(!tree.contains(&f64::NAN));
    }

    #[test]
    fn floats() -> Result<()> {
        let tree = BinarySearchTree::try_from_iter([2.5, -1.0, 3.25])?;
        assert_eq!(tree.inorder_traversal()?, vec![-1.0, 2.5, 3.25]);
        assert_eq!(tree.search(&2.5)?, Some(&2.5));
        Ok(())
    }

    #[test]
    fn error_messages() {
        assert_eq!(TreeError::InvalidValue.to_string(), "value cannot be ordered.");
        assert_eq!(TreeError::EmptyStructure.to_string(), "the tree is empty.");
    }

    #[rstest]
    #[case(vec![1], 0)]
    #[case(vec![2, 1], 1)]
    #[case(vec![2, 1, 3], 1)]
    #[case(vec![1, 2, 3], 2)]
    #[case(vec![5, 3, 8, 1, 4, 7, 9], 2)]
    fn height(#[case] values: Vec<i32>, #[case] expected: isize) {
        let tree: BinarySearchTree<i32> = values.into_iter().collect();
        assert_eq!(tree.height(), expected);
    }

    #[rstest]
    #[case(vec![1], true)]
    #[case(vec![1, 2], true)]
    #[case(vec![1, 2, 3], false)]
    #[case(vec![2, 1, 3], true)]
    #[case(vec![5, 3, 8, 1], true)]
    #[case(vec![5, 3, 8, 1, 0], false)]
    fn is_balanced(#[case] values: Vec<i32>, #[case] expected: bool) -> Result<()> {
        let tree: BinarySearchTree<i32> = values.into_iter().collect();
        assert_eq!(tree.is_balanced()?, expected);
        Ok(())
    }

    #[rstest]
    fn balance(#[values(1, 2, 3, 10, 100, 1000)] size: i32) -> Result<()> {
        let mut tree: BinarySearchTree<i32> = (0..size).collect();
        let before = tree.inorder_traversal()?;

        tree.balance();
        check(&tree);
        assert!(tree.is_balanced()?);
        assert_eq!(tree.len(), before.len());
        assert_eq!(tree.inorder_traversal()?, before);
        for value in 0..size {
            assert_eq!(tree.search(&value)?, Some(&value));
        }
        Ok(())
    }

    #[test]
    fn balance_shape() {
        let mut tree: BinarySearchTree<i32> = (1..=6).collect();
        tree.balance();
        assert_eq!(tree.bfs(), vec![vec![4], vec![2, 6], vec![1, 3, 5]]);

        let mut pair: BinarySearchTree<i32> = [1, 2].into_iter().collect();
        pair.balance();
        assert_eq!(pair.bfs(), vec![vec![2], vec![1]]);
    }

    #[test]
    fn balance_empty() {
        let mut tree: BinarySearchTree<i32> = BinarySearchTree::new();
        tree.balance();
        assert!(tree.is_empty());
    }

    #[test]
    fn balance_with_duplicates() -> Result<()> {
        let mut tree: BinarySearchTree<i32> = [3, 3, 3, 1, 1, 2].into_iter().collect();
        tree.balance();
        check(&tree);
        assert!(tree.is_balanced()?);
        assert_eq!(tree.inorder_traversal()?, vec![1, 1, 2, 3, 3, 3]);
        assert!(tree.contains(&1) && tree.contains(&2) && tree.contains(&3));
        Ok(())
    }

    #[test]
    fn deep_tree_does_not_overflow() -> Result<()> {
        let size: usize = 100_000;
        // A right-leaning chain, as produced by inserting 0..size in order.
        let mut root = None;
        for value in (0..size).rev() {
            root = Some(Box::new(Node {
                value,
                left: None,
                right: root,
            }));
        }
        let mut tree = BinarySearchTree { root, len: size };

        check(&tree);
        assert_eq!(tree.height(), isize::try_from(size)? - 1);
        assert!(!tree.is_balanced()?);
        assert_eq!(tree.search(&(size - 1))?, Some(&(size - 1)));
        assert_eq!(tree.find_max()?, &(size - 1));
        assert_eq!(tree.postorder().count(), size);
        assert_eq!(tree.preorder().count(), size);
        assert_eq!(tree.delete(&0)?, Some(0));
        tree.insert(size)?;
        assert_eq!(tree.len(), size);
        drop(tree);
        Ok(())
    }

    #[test]
    fn iterators() {
        let tree = sample();
        assert_eq!(tree.iter().len(), 7);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.preorder().copied().collect::<Vec<_>>(), vec![5, 3, 1, 4, 8, 7, 9]);
        assert_eq!(tree.postorder().copied().collect::<Vec<_>>(), vec![1, 4, 3, 7, 9, 8, 5]);
        assert_eq!(tree.levels().count(), 3);
        assert_eq!((&tree).into_iter().max(), Some(&9));
        assert_eq!(tree.into_iter().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn into_iter_partially_consumed() {
        let tree: BinarySearchTree<i32> = (0..1000).rev().collect();
        let mut iter = tree.into_iter();
        assert_eq!(iter.len(), 1000);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.len(), 999);
    }

    #[test]
    fn equality_ignores_shape() {
        let a: BinarySearchTree<i32> = [1, 2, 3].into_iter().collect();
        let mut b: BinarySearchTree<i32> = [1, 2, 3].into_iter().collect();
        b.balance();
        assert_eq!(a, b);

        let c: BinarySearchTree<i32> = [1, 2].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn clear() -> Result<()> {
        let mut tree = sample();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.inorder_traversal(), Err(TreeError::EmptyStructure));
        tree.insert(1)?;
        assert_eq!(tree.len(), 1);
        Ok(())
    }
}
