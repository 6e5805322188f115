//! The ordered-tree engine behind [`TreeMap`](crate::TreeMap) and [`TreeSet`](crate::TreeSet).

use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use alloc::vec::Vec;

use crate::raw::{Handle, RawRedBlackTree};
use crate::{Comparator, Container, NaturalOrder};

/// A self-balancing binary search tree storing key/value pairs in comparator order.
///
/// Keys are ordered by a [`Comparator`] supplied at construction time
/// ([`NaturalOrder`] by default). Two keys are the same key when the comparator
/// returns [`Ordering::Equal`](core::cmp::Ordering::Equal); inserting an equal
/// key overwrites the stored value and keeps the stored key.
///
/// Every node lives in an arena and links to its children and parent through
/// integer handles, so the parent back-links carry no ownership and the tree
/// needs no `unsafe` code or reference counting.
///
/// After every mutation the classic red-black invariants hold: the root is
/// black, no red node has a red child, and every path from a node to a missing
/// child passes through the same number of black nodes. Height is therefore
/// O(log n) and [`insert`](Self::insert), [`get`](Self::get),
/// [`remove`](Self::remove), [`floor`](Self::floor) and
/// [`ceiling`](Self::ceiling) are all O(log n).
///
/// It is a logic error for a key to be modified in such a way that its ordering
/// relative to any other key, as determined by the comparator, changes while it
/// is in the tree. The behavior resulting from such a logic error is not
/// specified, but will be encapsulated to the `RedBlackTree` that observed the
/// logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use ordkit::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(5, "e");
/// tree.insert(3, "c");
/// tree.insert(7, "g");
/// tree.insert(1, "a");
///
/// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 3, 5, 7]);
///
/// tree.remove(&3);
/// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 5, 7]);
/// assert_eq!(tree.get(&3), None);
/// ```
pub struct RedBlackTree<K, V, C = NaturalOrder> {
    raw: RawRedBlackTree<K, V>,
    comparator: C,
}

impl<K, V> RedBlackTree<K, V> {
    /// Makes a new, empty tree ordered by `K`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        RedBlackTree {
            raw: RawRedBlackTree::new(),
            comparator: NaturalOrder,
        }
    }

    /// Makes a new, empty tree with room for `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32, u32> = RedBlackTree::with_capacity(64);
    /// assert!(tree.capacity() >= 64);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, V, C> RedBlackTree<K, V, C> {
    /// Makes a new, empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// tree.insert(1, ());
    /// tree.insert(2, ());
    /// assert_eq!(tree.first_key_value(), Some((&2, &())));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        RedBlackTree {
            raw: RawRedBlackTree::new(),
            comparator,
        }
    }

    /// Makes a new, empty tree ordered by `comparator` with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        RedBlackTree {
            raw: RawRedBlackTree::with_capacity(capacity),
            comparator,
        }
    }

    /// Returns the comparator that orders this tree.
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of nodes in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no nodes.
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Removes every node from the tree.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// The key may be any borrowed form of the tree's key type, provided the
    /// comparator can order the borrowed form consistently with the key type.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(String::from("a"), 1);
    /// assert_eq!(tree.get("a"), Some(&1));
    /// assert_eq!(tree.get("b"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.raw.search(key, &self.comparator)?;
        Some(&self.raw.node(handle).value)
    }

    /// Returns the stored key and its value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.raw.search(key, &self.comparator)?;
        Some(self.raw.key_value(handle))
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.raw.search(key, &self.comparator)?;
        Some(&mut self.raw.node_mut(handle).value)
    }

    /// Returns `true` if the tree stores a value under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.search(key, &self.comparator).is_some()
    }

    /// Inserts a key/value pair.
    ///
    /// If the tree did not have an equal key, `None` is returned and the length
    /// grows by one. Otherwise the stored value is replaced and the old value is
    /// returned; the stored key is not updated.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.insert(37, "a"), None);
    /// assert_eq!(tree.insert(37, "b"), Some("a"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        self.raw.insert(key, value, &self.comparator)
    }

    /// Removes `key` from the tree, returning its value if it was present.
    ///
    /// Removing a missing key is a no-op.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the tree, returning the stored key and value if it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.remove_entry(key, &self.comparator)
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|handle| self.raw.key_value(handle))
    }

    /// Returns the entry with the maximum key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|handle| self.raw.key_value(handle))
    }

    /// Removes and returns the entry with the minimum key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the entry with the maximum key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    ///
    /// Returns `None` when the tree is empty or every stored key is greater
    /// than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.floor(&5), None);
    ///
    /// tree.insert(3, "c");
    /// tree.insert(7, "g");
    /// assert_eq!(tree.floor(&5), Some((&3, &"c")));
    /// assert_eq!(tree.floor(&7), Some((&7, &"g")));
    /// assert_eq!(tree.floor(&2), None);
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.floor(key, &self.comparator).map(|handle| self.raw.key_value(handle))
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    ///
    /// Returns `None` when the tree is empty or every stored key is less than
    /// `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(3, "c");
    /// tree.insert(7, "g");
    /// assert_eq!(tree.ceiling(&5), Some((&7, &"g")));
    /// assert_eq!(tree.ceiling(&8), None);
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.ceiling(key, &self.comparator).map(|handle| self.raw.key_value(handle))
    }

    /// Calls `f` on every entry in ascending key order.
    ///
    /// Uses Morris traversal: O(n) time and O(1) auxiliary space. While the
    /// walk is in progress some right links are temporarily redirected to
    /// in-order successors; the tree is restored to its exact shape before the
    /// call returns. The exclusive borrow keeps anything else from observing
    /// the intermediate shape. If `f` panics, the remaining links are reset
    /// while unwinding, so a caught panic leaves the tree intact.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([(2, 'b'), (1, 'a'), (3, 'c')]);
    /// let mut seen = String::new();
    /// tree.inorder(|_, c| seen.push(*c));
    /// assert_eq!(seen, "abc");
    /// ```
    pub fn inorder<F>(&mut self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.raw.inorder(f);
    }

    /// Calls `f` on every entry in ascending key order with mutable access to
    /// the values.
    ///
    /// Same traversal and caveats as [`inorder`](Self::inorder).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([(1, 10), (2, 20)]);
    /// tree.inorder_mut(|_, v| *v += 1);
    /// assert_eq!(tree.values().copied().collect::<Vec<_>>(), [11, 21]);
    /// ```
    pub fn inorder_mut<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V),
    {
        self.raw.inorder_mut(f);
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// Each step follows parent links, so iteration needs no stack and only a
    /// shared borrow.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.raw)
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, C> Container for RedBlackTree<K, V, C>
where
    V: Clone,
{
    type Value = V;

    fn len(&self) -> usize {
        self.raw.len()
    }

    fn collect_values(&self) -> Vec<V> {
        self.values().cloned().collect()
    }

    fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<K, V, C: Default> Default for RedBlackTree<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RedBlackTree<K, V, C> {
    fn clone(&self) -> Self {
        RedBlackTree {
            raw: self.raw.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RedBlackTree<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for RedBlackTree<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RedBlackTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Draws the tree sideways: the right subtree above each node, the left below.
///
/// ```
/// use ordkit::RedBlackTree;
///
/// let tree = RedBlackTree::from([(2, ()), (1, ()), (3, ())]);
/// assert_eq!(tree.to_string(), "RedBlackTree\n│   ┌── 3\n└── 2\n    └── 1\n");
/// ```
impl<K: fmt::Display, V, C> fmt::Display for RedBlackTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RedBlackTree")?;
        self.raw.fmt_tree(f)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RedBlackTree<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RedBlackTree<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for RedBlackTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consumes the tree, yielding its entries in ascending key order.
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

/// An iterator over the entries of a `RedBlackTree`, sorted by key.
///
/// This `struct` is created by the [`iter`](RedBlackTree::iter) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawRedBlackTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a RawRedBlackTree<K, V>) -> Self {
        Iter {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(handle);
        Some(self.tree.key_value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(handle);
        Some(self.tree.key_value(handle))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the keys of a `RedBlackTree`, in sorted order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of a `RedBlackTree`, in order by key.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the entries of a `RedBlackTree`, sorted by key.
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("len", &self.inner.len()).finish()
    }
}
