//! An array-backed binary min-heap.
//!
//! The heap is a complete binary tree laid out level by level in a single
//! vector, so no node objects or pointers are needed.  For the element at
//! index $i$:
//!
//! - its parent is at $\lfloor (i - 1) / 2 \rfloor$;
//! - its left child is at $2i + 1$;
//! - its right child is at $2i + 2$.
//!
//! The heap invariant is that every element is no smaller than its parent,
//! which places the minimum at index 0:
//!
//! ```text
//!            1                 index:  0  1  2  3  4
//!          /   \               value: [1, 3, 8, 5, 4]
//!         3     8
//!        / \
//!       5   4
//! ```

use std::{fmt, slice};

use thiserror::Error;
use tracing::debug;

use crate::is_orderable;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors returned by [`BinaryHeap`] operations.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum HeapError {
    /// The value cannot be ordered, not even against itself (such as
    /// `f64::NAN`).
    #[error("value cannot be ordered.")]
    InvalidValue,
    /// A heap cannot be built from an empty sequence; use
    /// [`BinaryHeap::new`] for an empty heap.
    #[error("cannot build a heap from an empty sequence.")]
    EmptyInput,
}

// ////////////////////////////////////////////////////////////////////////////
// BinaryHeap
// ////////////////////////////////////////////////////////////////////////////

/// A binary min-heap: [`extract_min`][BinaryHeap::extract_min] always
/// returns the smallest value held.
///
/// # Examples
///
/// ```
/// use binary_collections::BinaryHeap;
///
/// let mut heap = BinaryHeap::build([5, 3, 8, 1, 4])?;
/// heap.insert(2)?;
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 4, 5, 8]);
/// # Ok::<(), binary_collections::HeapError>(())
/// ```
#[derive(Clone)]
pub struct BinaryHeap<T> {
    data: Vec<T>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> BinaryHeap<T> {
    /// Create a new, empty heap.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        BinaryHeap { data: Vec::new() }
    }

    /// Create a new, empty heap with space for at least `capacity` values
    /// before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinaryHeap;
    ///
    /// let heap: BinaryHeap<u64> = BinaryHeap::with_capacity(100);
    /// assert!(heap.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BinaryHeap {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of values in the heap.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes every value from the heap.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The smallest value, without removing it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// The underlying storage, in heap order.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinaryHeap;
    ///
    /// let heap = BinaryHeap::build([5, 3, 8, 1, 4])?;
    /// assert_eq!(heap.as_slice(), &[1, 3, 8, 5, 4]);
    /// # Ok::<(), binary_collections::HeapError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over the values in heap order, which is not sorted order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    // /////////////////////////////
    // Index arithmetic
    // /////////////////////////////

    #[inline]
    fn parent(index: usize) -> Option<usize> {
        index.checked_sub(1).map(|i| i / 2)
    }

    #[inline]
    fn left_child(index: usize) -> usize {
        2 * index + 1
    }

    #[inline]
    fn right_child(index: usize) -> usize {
        2 * index + 2
    }

    #[inline]
    fn is_valid_index(&self, index: usize) -> bool {
        index < self.data.len()
    }

    #[inline]
    fn has_left_child(&self, index: usize) -> bool {
        self.is_valid_index(Self::left_child(index))
    }

    #[inline]
    fn has_right_child(&self, index: usize) -> bool {
        self.is_valid_index(Self::right_child(index))
    }
}

impl<T: PartialOrd> BinaryHeap<T> {
    /// Build a heap from a non-empty sequence in $O(n)$.
    ///
    /// The values are copied into the heap's storage as they are, after which
    /// every parent, from the last one back to the root, is sifted down.
    ///
    /// # Errors
    ///
    /// - [`HeapError::EmptyInput`] if `values` is empty.
    /// - [`HeapError::InvalidValue`] if any value cannot be ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::{BinaryHeap, HeapError};
    ///
    /// let heap = BinaryHeap::build(vec![3, 1, 2])?;
    /// assert_eq!(heap.peek(), Some(&1));
    ///
    /// assert_eq!(BinaryHeap::<i32>::build([]).err(), Some(HeapError::EmptyInput));
    /// # Ok::<(), HeapError>(())
    /// ```
    pub fn build<I>(values: I) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = T>,
    {
        let data: Vec<T> = values.into_iter().collect();
        if data.is_empty() {
            return Err(HeapError::EmptyInput);
        }
        if !data.iter().all(is_orderable) {
            return Err(HeapError::InvalidValue);
        }

        let mut heap = BinaryHeap { data };
        heap.heapify();
        debug!(len = heap.len(), "built heap");
        Ok(heap)
    }

    /// Insert a value, sifting it up until its parent is no larger.
    ///
    /// # Errors
    ///
    /// [`HeapError::InvalidValue`] if the value cannot be ordered.  The heap
    /// is left untouched.
    pub fn insert(&mut self, value: T) -> Result<(), HeapError> {
        if !is_orderable(&value) {
            return Err(HeapError::InvalidValue);
        }
        self.push(value);
        Ok(())
    }

    /// Remove and return the smallest value, or `None` if the heap is empty.
    ///
    /// The last value is moved into the root and sifted down, swapping with
    /// its smaller child for as long as that child is smaller than it.
    ///
    /// # Examples
    ///
    /// ```
    /// use binary_collections::BinaryHeap;
    ///
    /// let mut heap: BinaryHeap<i32> = BinaryHeap::new();
    /// assert_eq!(heap.extract_min(), None);
    ///
    /// heap.insert(2)?;
    /// heap.insert(1)?;
    /// assert_eq!(heap.extract_min(), Some(1));
    /// assert_eq!(heap.extract_min(), Some(2));
    /// assert_eq!(heap.extract_min(), None);
    /// # Ok::<(), binary_collections::HeapError>(())
    /// ```
    pub fn extract_min(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let min = self.data.swap_remove(0);
        self.sift_down(0);
        Some(min)
    }

    /// Consume the heap, returning its values in non-decreasing order.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(value) = self.extract_min() {
            sorted.push(value);
        }
        sorted
    }

    fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    fn heapify(&mut self) {
        for index in (0..self.data.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "`index` is valid and `parent` is always smaller than it"
    )]
    fn sift_up(&mut self, mut index: usize) {
        while let Some(parent) = Self::parent(index) {
            if self.data[parent] > self.data[index] {
                self.data.swap(parent, index);
                index = parent;
            } else {
                break;
            }
        }
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "children are only read after their existence is checked"
    )]
    fn sift_down(&mut self, mut index: usize) {
        while self.has_left_child(index) {
            let left = Self::left_child(index);
            let right = Self::right_child(index);
            let smaller = if self.has_right_child(index) && self.data[right] < self.data[left] {
                right
            } else {
                left
            };

            if self.data[smaller] < self.data[index] {
                self.data.swap(index, smaller);
                index = smaller;
            } else {
                break;
            }
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for BinaryHeap<T> {
    #[inline]
    fn default() -> Self {
        BinaryHeap::new()
    }
}

impl<T: Ord> Extend<T> for BinaryHeap<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        let iterator = iterable.into_iter();
        self.data.reserve(iterator.size_hint().0);
        for value in iterator {
            self.push(value);
        }
    }
}

/// Plain construction: unlike [`BinaryHeap::build`], an empty iterator simply
/// gives an empty heap.
impl<T: Ord> FromIterator<T> for BinaryHeap<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = BinaryHeap {
            data: iter.into_iter().collect(),
        };
        heap.heapify();
        heap
    }
}

impl<'a, T> IntoIterator for &'a BinaryHeap<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<T> fmt::Debug for BinaryHeap<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
