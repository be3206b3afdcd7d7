//! Array-backed binary max-heap with a pluggable comparator.
//!
//! Unlike [`std::collections::BinaryHeap`], ordering is supplied at
//! construction time rather than through `Ord`, so the same structure can
//! rank `f64`-scored items (which are not `Ord`) or order the same items in
//! different ways.
//!
//! Invariant: for every non-root position `i`,
//! `compare(data[parent(i)], data[i]) != Ordering::Less`.

use std::cmp::Ordering;
use std::fmt;

/// An item with a numeric score. Larger scores rank higher.
pub trait Scored {
    fn score(&self) -> f64;
}

/// Default comparator: ascending by [`Scored::score`], so larger scores
/// bubble toward the root. Uses IEEE total ordering; NaN ranks above
/// everything.
pub fn by_score<T: Scored>(a: &T, b: &T) -> Ordering {
    a.score().total_cmp(&b.score())
}

/// Binary max-heap over `T` ordered by `C`.
pub struct MaxHeap<T, C = fn(&T, &T) -> Ordering> {
    data: Vec<T>,
    compare: C,
}

impl<T: Scored> MaxHeap<T> {
    /// Empty heap ordered by [`by_score`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(by_score::<T>)
    }
}

impl<T: Scored> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> MaxHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Empty heap ordered by `compare`; the greatest element is at the root.
    pub const fn with_comparator(compare: C) -> Self {
        Self {
            data: Vec::new(),
            compare,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert `item` and restore the heap upward. `O(log n)` amortized.
    pub fn push(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the greatest element, or `None` when empty.
    /// `O(log n)`.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let top = self.data.pop();
        self.sift_down(0);
        top
    }

    /// The greatest element without removing it, or `None` when empty.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Pop up to `k` elements, greatest first.
    pub fn take_top(&mut self, k: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(k.min(self.data.len()));
        while out.len() < k {
            let Some(item) = self.pop() else { break };
            out.push(item);
        }
        out
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.data[a], &self.data[b]) == Ordering::Greater
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.greater(i, parent) {
                break;
            }
            self.data.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut largest = i;
            if left < len && self.greater(left, largest) {
                largest = left;
            }
            if right < len && self.greater(right, largest) {
                largest = right;
            }
            if largest == i {
                break;
            }
            self.data.swap(i, largest);
            i = largest;
        }
    }
}

impl<T, C> Extend<T> for MaxHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for MaxHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaxHeap").field("data", &self.data).finish_non_exhaustive()
    }
}
