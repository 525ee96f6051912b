//! Two classic ordered collections:
//!
//! - [`BinarySearchTree`], a node-linked binary search tree which keeps
//!   duplicates (routing them right), deletes two-child nodes by splicing in
//!   their in-order successor, can rebuild itself into a height-balanced
//!   shape, and exposes pre-, in-, post- and level-order views.
//! - [`BinaryHeap`], a binary min-heap stored in a single vector, with
//!   $O(\log n)$ insertion and extraction and an $O(n)$ bulk build.
//!
//! Both collections accept any `T: PartialOrd`.  Values which cannot be
//! ordered against themselves, such as `f64::NAN`, are rejected with an
//! `InvalidValue` error rather than silently corrupting the structure.
//!
//! ```
//! use binary_collections::{BinaryHeap, BinarySearchTree};
//!
//! let mut tree = BinarySearchTree::new();
//! let mut heap = BinaryHeap::new();
//! for value in [5, 3, 8, 1, 4] {
//!     tree.insert(value)?;
//!     heap.insert(value)?;
//! }
//!
//! assert_eq!(tree.bfs(), vec![vec![5], vec![3, 8], vec![1, 4]]);
//! assert_eq!(heap.extract_min(), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The library emits [`tracing`] events on structural rebuilds and
//! deletions; install a subscriber to see them.

pub mod heap;
pub mod tree;

pub use heap::{BinaryHeap, HeapError};
pub use tree::{BinarySearchTree, TreeError};

/// Whether `value` can take part in an ordering at all.
///
/// A value which is not even comparable to itself (`NaN`) would send every
/// comparison down an arbitrary branch.
#[inline]
pub(crate) fn is_orderable<T: PartialOrd>(value: &T) -> bool {
    value.partial_cmp(value).is_some()
}
