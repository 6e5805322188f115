//! A binary heap that can remove or re-prioritise any element in O(log n).

use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;

use alloc::vec::Vec;
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;

use crate::{Comparator, Container, NaturalOrder};

/// Where a distinct value sits in the slot vector and how many times it was pushed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Tally {
    index: usize,
    count: usize,
}

/// A min-heap (by its [`Comparator`]) with O(log n) removal and update of
/// arbitrary elements.
///
/// Each distinct value occupies a single heap slot; pushing an equal value
/// again only bumps a counter. Values are matched by their [`Hash`] and
/// [`Eq`] implementations and ordered by the comparator, so the comparator may
/// look at state outside the value itself (see [`update`](Self::update)).
///
/// [`len`](Self::len) is the logical size (every push minus every pop or
/// removal, duplicates included) while [`distinct_len`](Self::distinct_len)
/// is the number of occupied slots.
///
/// Use [`Reverse`](crate::Reverse) for a max-heap.
///
/// # Examples
///
/// ```
/// use ordkit::IndexedHeap;
///
/// let mut heap = IndexedHeap::from(vec![6, 8, 5, 9, 3]);
/// heap.push(1);
/// heap.push(8);
/// assert_eq!(heap.len(), 7);
/// assert_eq!(heap.distinct_len(), 6);
///
/// assert!(heap.remove(&5));
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.into_sorted_vec(), [3, 6, 8, 8, 9]);
/// ```
pub struct IndexedHeap<T, C = NaturalOrder> {
    slots: Vec<T>,
    tallies: HashMap<T, Tally, FxBuildHasher>,
    len: usize,
    comparator: C,
}

impl<T> IndexedHeap<T> {
    /// Makes a new, empty heap ordered by `T`'s [`Ord`] implementation.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Makes a new, empty heap with room for `capacity` distinct values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C> IndexedHeap<T, C> {
    /// Makes a new, empty heap ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::{IndexedHeap, NaturalOrder, Reverse};
    ///
    /// let mut heap = IndexedHeap::with_comparator(Reverse(NaturalOrder));
    /// heap.extend([1, 5, 2]);
    /// assert_eq!(heap.peek(), Some(&5));
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        IndexedHeap {
            slots: Vec::new(),
            tallies: HashMap::with_hasher(FxBuildHasher),
            len: 0,
            comparator,
        }
    }

    /// Makes a new, empty heap ordered by `comparator` with room for `capacity` distinct values.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        IndexedHeap {
            slots: Vec::with_capacity(capacity),
            tallies: HashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            len: 0,
            comparator,
        }
    }

    /// Returns the comparator that orders this heap.
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the logical number of elements, duplicates included.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of distinct values, i.e. occupied heap slots.
    pub fn distinct_len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the heap holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct values the heap can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the least element, or `None` if the heap is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn peek(&self) -> Option<&T> {
        self.slots.first()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.tallies.clear();
        self.len = 0;
    }
}

impl<T, C> IndexedHeap<T, C>
where
    T: Hash + Eq + Clone,
    C: Comparator<T>,
{
    /// Pushes `value` onto the heap.
    ///
    /// A value already in the heap only has its count incremented and the
    /// heap shape is left alone.
    ///
    /// # Complexity
    ///
    /// O(1) for a duplicate, otherwise O(log n).
    pub fn push(&mut self, value: T) {
        self.len += 1;
        if let Some(tally) = self.tallies.get_mut(&value) {
            tally.count += 1;
            return;
        }

        let index = self.slots.len();
        self.tallies.insert(value.clone(), Tally { index, count: 1 });
        self.slots.push(value);
        self.sift_up(index);
    }

    /// Removes one occurrence of the least element and returns it.
    ///
    /// # Complexity
    ///
    /// O(1) while other occurrences remain, otherwise O(log n).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::IndexedHeap;
    ///
    /// let mut heap = IndexedHeap::new();
    /// heap.push(3);
    /// heap.push(3);
    /// assert!(heap.remove(&3));
    /// assert_eq!(heap.len(), 1);
    /// assert_eq!(heap.pop(), Some(3));
    /// assert_eq!(heap.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.slots.is_empty() {
            return None;
        }
        Some(self.remove_index(0))
    }

    /// Removes one occurrence of `value`, returning whether it was present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&Tally { index, .. }) = self.tallies.get(value) else {
            return false;
        };
        self.remove_index(index);
        true
    }

    /// Restores heap order around `value` after its priority changed.
    ///
    /// Call this when the comparator's view of a stored value has changed
    /// (for example because it reads priorities kept outside the heap).
    /// Returns `false` and does nothing if `value` is not in the heap.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use ordkit::IndexedHeap;
    ///
    /// let priority = RefCell::new(vec![30, 10, 20]);
    /// let mut heap = IndexedHeap::with_comparator(|a: &usize, b: &usize| {
    ///     let priority = priority.borrow();
    ///     priority[*a].cmp(&priority[*b])
    /// });
    /// heap.extend([0, 1, 2]);
    /// assert_eq!(heap.peek(), Some(&1));
    ///
    /// priority.borrow_mut()[0] = 5;
    /// assert!(heap.update(&0));
    /// assert_eq!(heap.peek(), Some(&0));
    /// ```
    pub fn update<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&Tally { index, .. }) = self.tallies.get(value) else {
            return false;
        };
        if !self.sift_down(index, self.slots.len()) {
            self.sift_up(index);
        }
        true
    }

    /// Adds every value yielded by `values` and re-heapifies from the bottom up.
    ///
    /// New distinct values are appended to the slot vector and the whole heap
    /// is rebuilt in O(n + m), which beats pushing m values one by one when m
    /// is comparable to n.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::IndexedHeap;
    ///
    /// let mut heap = IndexedHeap::new();
    /// heap.build([6, 8, 5, 9, 3]);
    /// heap.push(1);
    /// assert_eq!(heap.into_sorted_vec(), [1, 3, 5, 6, 8, 9]);
    /// ```
    pub fn build<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.len += 1;
            if let Some(tally) = self.tallies.get_mut(&value) {
                tally.count += 1;
            } else {
                let index = self.slots.len();
                self.tallies.insert(value.clone(), Tally { index, count: 1 });
                self.slots.push(value);
            }
        }

        let n = self.slots.len();
        for index in (0..n / 2).rev() {
            self.sift_down(index, n);
        }
    }

    /// Returns how many occurrences of `value` the heap holds.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.tallies.get(value).map_or(0, |tally| tally.count)
    }

    /// Returns `true` if the heap holds at least one occurrence of `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.tallies.contains_key(value)
    }

    /// Consumes the heap and returns every element in ascending comparator
    /// order, duplicates included.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Some(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    // ─── Slot maintenance ──────────────────────────────────────────────────

    /// Drops one occurrence of the value in slot `index`. The slot itself is
    /// only vacated when that was the last occurrence.
    fn remove_index(&mut self, index: usize) -> T {
        self.len -= 1;
        let tally = self
            .tallies
            .get_mut(&self.slots[index])
            .expect("`IndexedHeap::remove_index()` - occupied slot has no tally!");
        if tally.count > 1 {
            tally.count -= 1;
            return self.slots[index].clone();
        }

        let last = self.slots.len() - 1;
        if index != last {
            self.swap(index, last);
            if !self.sift_down(index, last) {
                self.sift_up(index);
            }
        }
        let value = self
            .slots
            .pop()
            .expect("`IndexedHeap::remove_index()` - heap has no slots!");
        self.tallies.remove(&value);
        value
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.comparator.compare(&self.slots[i], &self.slots[j]).is_lt()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
        self.reindex(i);
        self.reindex(j);
    }

    fn reindex(&mut self, index: usize) {
        self.tallies
            .get_mut(&self.slots[index])
            .expect("`IndexedHeap::reindex()` - occupied slot has no tally!")
            .index = index;
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    /// Sifts slot `start` down within the first `end` slots; returns whether it moved.
    fn sift_down(&mut self, start: usize, end: usize) -> bool {
        let mut index = start;
        loop {
            let left = 2 * index + 1;
            if left >= end {
                break;
            }
            let right = left + 1;
            let child = if right < end && self.less(right, left) { right } else { left };
            if !self.less(child, index) {
                break;
            }
            self.swap(index, child);
            index = child;
        }
        index > start
    }
}

impl<T, C> Container for IndexedHeap<T, C>
where
    T: Hash + Eq + Clone,
    C: Comparator<T> + Clone,
{
    type Value = T;

    fn len(&self) -> usize {
        self.len
    }

    /// Drains a clone of the heap, so the values come out in full comparator order.
    fn collect_values(&self) -> Vec<T> {
        self.clone().into_sorted_vec()
    }

    fn clear(&mut self) {
        IndexedHeap::clear(self);
    }
}

impl<T, C: Default> Default for IndexedHeap<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Clone> Clone for IndexedHeap<T, C> {
    fn clone(&self) -> Self {
        IndexedHeap {
            slots: self.slots.clone(),
            tallies: self.tallies.clone(),
            len: self.len,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for IndexedHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedHeap")
            .field("slots", &self.slots)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<T, C> Extend<T> for IndexedHeap<T, C>
where
    T: Hash + Eq + Clone,
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord + Hash + Clone> From<Vec<T>> for IndexedHeap<T> {
    /// Builds a heap from `values` in O(n).
    fn from(values: Vec<T>) -> Self {
        let mut heap = IndexedHeap::with_capacity(values.len());
        heap.build(values);
        heap
    }
}

impl<T: Ord + Hash + Clone> FromIterator<T> for IndexedHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = IndexedHeap::new();
        heap.build(iter);
        heap
    }
}
