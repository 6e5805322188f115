//! An ordered set backed by a [`TreeMap`] with unit values.

use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{BitAnd, BitOr, Sub};

use alloc::vec::Vec;

use crate::red_black_tree::{self, Keys};
use crate::{Comparator, Container, NaturalOrder, TreeMap};

/// An ordered set based on a [red-black tree](crate::RedBlackTree).
///
/// Elements are kept sorted by the set's [`Comparator`]; two elements are
/// duplicates when the comparator reports them equal.
///
/// # Examples
///
/// ```
/// use ordkit::TreeSet;
///
/// let mut books = TreeSet::new();
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// books.remove("The Odyssey");
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
pub struct TreeSet<T, C = NaturalOrder> {
    map: TreeMap<T, (), C>,
}

impl<T> TreeSet<T> {
    /// Makes a new, empty `TreeSet` ordered by `T`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        TreeSet { map: TreeMap::new() }
    }

    /// Makes a new, empty `TreeSet` with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TreeSet {
            map: TreeMap::with_capacity(capacity),
        }
    }
}

impl<T, C> TreeSet<T, C> {
    /// Makes a new, empty `TreeSet` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeSet;
    ///
    /// let mut set = TreeSet::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// set.add_all(["ccc", "a", "bb", "d"]);
    /// // "d" has the same length as "a", so it is a duplicate.
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        TreeSet {
            map: TreeMap::with_comparator(comparator),
        }
    }

    /// Makes a new, empty `TreeSet` ordered by `comparator` with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        TreeSet {
            map: TreeMap::with_capacity_and_comparator(capacity, comparator),
        }
    }

    /// Returns the comparator that orders this set.
    pub const fn comparator(&self) -> &C {
        self.map.comparator()
    }

    /// Returns the number of elements in the set.
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every element from the set.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. An equal element already
    /// in the set is kept.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool
    where
        C: Comparator<T>,
    {
        self.map.insert(value, ()).is_none()
    }

    /// Adds every value yielded by `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.add_all([3, 1, 2, 3]);
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn add_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        C: Comparator<T>,
    {
        for value in values {
            self.insert(value);
        }
    }

    /// Returns `true` if the set contains an element equal to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.contains_key(value)
    }

    /// Returns `true` if every value yielded by `values` is in the set.
    ///
    /// Every set contains all of an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeSet;
    ///
    /// let set = TreeSet::from([1, 2, 3]);
    /// assert!(set.contains_all(&[1, 3]));
    /// assert!(!set.contains_all(&[1, 4]));
    /// assert!(set.contains_all(&[] as &[i32]));
    /// ```
    pub fn contains_all<'a, Q, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: ?Sized + 'a,
        C: Comparator<Q>,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Removes `value` from the set, returning whether it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.remove(value).is_some()
    }

    /// Removes every value yielded by `values`; missing values are ignored.
    pub fn remove_all<'a, Q, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: ?Sized + 'a,
        C: Comparator<Q>,
    {
        for value in values {
            self.remove(value);
        }
    }

    /// Returns the minimum element.
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(value, ())| value)
    }

    /// Returns the maximum element.
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(value, ())| value)
    }

    /// Removes and returns the minimum element.
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(value, ())| value)
    }

    /// Removes and returns the maximum element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(value, ())| value)
    }

    /// Returns the largest element less than or equal to `value`.
    pub fn floor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.floor(value).map(|(value, ())| value)
    }

    /// Returns the smallest element greater than or equal to `value`.
    pub fn ceiling<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.ceiling(value).map(|(value, ())| value)
    }

    /// Gets an iterator that visits the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }

    /// Returns the elements that are in both `self` and `other`.
    ///
    /// The result is ordered by a clone of `self`'s comparator; membership in
    /// `other` is decided by `other`'s own comparator, so the two sets need not
    /// share a comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeSet;
    ///
    /// let a = TreeSet::from(["a", "b", "c", "d"]);
    /// let b = TreeSet::from(["c", "d", "e", "f"]);
    /// assert_eq!(a.intersection(&b), TreeSet::from(["c", "d"]));
    /// ```
    #[must_use]
    pub fn intersection<C2>(&self, other: &TreeSet<T, C2>) -> Self
    where
        T: Clone,
        C: Comparator<T> + Clone,
        C2: Comparator<T>,
    {
        self.filtered(|value| other.contains(value))
    }

    /// Returns the elements that are in `self`, `other`, or both.
    ///
    /// Where both sets hold equal elements, the one from `self` is kept.
    #[must_use]
    pub fn union<C2>(&self, other: &TreeSet<T, C2>) -> Self
    where
        T: Clone,
        C: Comparator<T> + Clone,
    {
        let mut result = self.clone();
        result.add_all(other.iter().cloned());
        result
    }

    /// Returns the elements that are in `self` but not in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeSet;
    ///
    /// let a = TreeSet::from([1, 2, 3, 4, 5]);
    /// let b = TreeSet::from([2, 4]);
    /// assert_eq!(a.difference(&b), TreeSet::from([1, 3, 5]));
    /// assert!(b.difference(&a).is_empty());
    /// ```
    #[must_use]
    pub fn difference<C2>(&self, other: &TreeSet<T, C2>) -> Self
    where
        T: Clone,
        C: Comparator<T> + Clone,
        C2: Comparator<T>,
    {
        self.filtered(|value| !other.contains(value))
    }

    fn filtered<P>(&self, mut keep: P) -> Self
    where
        T: Clone,
        C: Comparator<T> + Clone,
        P: FnMut(&T) -> bool,
    {
        let mut result = TreeSet::with_comparator(self.comparator().clone());
        result.add_all(self.iter().filter(|value| keep(value)).cloned());
        result
    }
}

impl<T: Clone, C> Container for TreeSet<T, C> {
    type Value = T;

    fn len(&self) -> usize {
        self.map.len()
    }

    fn collect_values(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

impl<T, C: Default> Default for TreeSet<T, C> {
    fn default() -> Self {
        TreeSet { map: TreeMap::default() }
    }
}

impl<T: Clone, C: Clone> Clone for TreeSet<T, C> {
    fn clone(&self) -> Self {
        TreeSet { map: self.map.clone() }
    }
}

impl<T: PartialEq, C> PartialEq for TreeSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Eq, C> Eq for TreeSet<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for TreeSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// ```
/// use ordkit::TreeSet;
///
/// assert_eq!(TreeSet::from([3, 1, 2]).to_string(), "TreeSet\n1, 2, 3");
/// ```
impl<T: fmt::Display, C> fmt::Display for TreeSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TreeSet\n")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl<T: Clone, C, C2> BitAnd<&TreeSet<T, C2>> for &TreeSet<T, C>
where
    C: Comparator<T> + Clone,
    C2: Comparator<T>,
{
    type Output = TreeSet<T, C>;

    /// Returns the intersection of `self` and `rhs` as a new `TreeSet<T, C>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeSet;
    ///
    /// let a = TreeSet::from([1, 2, 3]);
    /// let b = TreeSet::from([2, 3, 4]);
    /// assert_eq!(&a & &b, TreeSet::from([2, 3]));
    /// ```
    fn bitand(self, rhs: &TreeSet<T, C2>) -> TreeSet<T, C> {
        self.intersection(rhs)
    }
}

impl<T: Clone, C, C2> BitOr<&TreeSet<T, C2>> for &TreeSet<T, C>
where
    C: Comparator<T> + Clone,
{
    type Output = TreeSet<T, C>;

    /// Returns the union of `self` and `rhs` as a new `TreeSet<T, C>`.
    fn bitor(self, rhs: &TreeSet<T, C2>) -> TreeSet<T, C> {
        self.union(rhs)
    }
}

impl<T: Clone, C, C2> Sub<&TreeSet<T, C2>> for &TreeSet<T, C>
where
    C: Comparator<T> + Clone,
    C2: Comparator<T>,
{
    type Output = TreeSet<T, C>;

    /// Returns the difference of `self` and `rhs` as a new `TreeSet<T, C>`.
    fn sub(self, rhs: &TreeSet<T, C2>) -> TreeSet<T, C> {
        self.difference(rhs)
    }
}

impl<T: Ord> FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::new();
        set.add_all(iter);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for TreeSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, T: Copy + 'a, C: Comparator<T>> Extend<&'a T> for TreeSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.add_all(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for TreeSet<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T, C> IntoIterator for &'a TreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C> IntoIterator for TreeSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the set, yielding its elements in ascending order.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

/// An iterator over the elements of a `TreeSet`, in ascending order.
///
/// This `struct` is created by the [`iter`](TreeSet::iter) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    inner: Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner).finish()
    }
}

/// An owning iterator over the elements of a `TreeSet`, in ascending order.
#[derive(Debug)]
pub struct IntoIter<T> {
    inner: red_black_tree::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|(value, ())| value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Reverse;
    use alloc::string::ToString;
    use core::cmp::Ordering;

    #[test]
    fn display_joins_elements_with_commas() {
        let mut set = TreeSet::new();
        assert_eq!(set.to_string(), "TreeSet\n");
        set.add_all([2, 1]);
        assert_eq!(set.to_string(), "TreeSet\n1, 2");
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut set = TreeSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_all_ignores_missing_values() {
        let mut set = TreeSet::from([1, 2, 3, 4]);
        set.remove_all(&[2, 4, 6]);
        assert_eq!(set.collect_values(), [1, 3]);
    }

    #[test]
    fn union_keeps_left_comparator_order() {
        let descending = TreeSet::from_iter_with(Reverse(NaturalOrder), [1, 3]);
        let ascending = TreeSet::from([2, 3]);
        let union = descending.union(&ascending);
        assert_eq!(union.collect_values(), [3, 2, 1]);
    }

    #[test]
    fn operations_across_distinct_comparator_values() {
        fn by_value(a: &i32, b: &i32) -> Ordering {
            a.cmp(b)
        }
        fn by_negation(a: &i32, b: &i32) -> Ordering {
            (-a).cmp(&-b)
        }

        type FnComparator = fn(&i32, &i32) -> Ordering;
        let mut left: TreeSet<i32, FnComparator> = TreeSet::with_comparator(by_value);
        let mut right: TreeSet<i32, FnComparator> = TreeSet::with_comparator(by_negation);
        left.add_all([1, 2, 3, 4]);
        right.add_all([3, 4, 5, 6]);

        assert_eq!((&left & &right).collect_values(), [3, 4]);
        assert_eq!((&left - &right).collect_values(), [1, 2]);
        assert_eq!((&left | &right).collect_values(), [1, 2, 3, 4, 5, 6]);
        assert_eq!((&right & &left).collect_values(), [4, 3]);
    }

    impl<T, C: Comparator<T>> TreeSet<T, C> {
        fn from_iter_with<I: IntoIterator<Item = T>>(comparator: C, values: I) -> Self {
            let mut set = TreeSet::with_comparator(comparator);
            set.add_all(values);
            set
        }
    }
}
