//! An ordered map backed by a [`RedBlackTree`].

use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use alloc::vec::Vec;

use crate::red_black_tree::{IntoIter, Iter, Keys, Values};
use crate::{Comparator, Container, NaturalOrder, RedBlackTree};

/// An ordered map based on a [red-black tree](RedBlackTree).
///
/// Keys are kept sorted by the map's [`Comparator`]. Lookups, insertions and
/// removals are O(log n); iteration visits entries in ascending key order.
///
/// # Examples
///
/// ```
/// use ordkit::TreeMap;
///
/// let mut movie_reviews = TreeMap::new();
/// movie_reviews.insert("Office Space", "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction", "Masterpiece.");
/// movie_reviews.insert("The Godfather", "Very enjoyable.");
///
/// if !movie_reviews.contains_key("Les Misérables") {
///     println!("We've got {} reviews, but Les Misérables ain't one.", movie_reviews.len());
/// }
///
/// movie_reviews.remove("The Godfather");
///
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// A map with a caller-supplied ordering:
///
/// ```
/// use ordkit::{Reverse, NaturalOrder, TreeMap};
///
/// let mut map = TreeMap::with_comparator(Reverse(NaturalOrder));
/// map.insert(1, "a");
/// map.insert(3, "c");
/// map.insert(2, "b");
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub struct TreeMap<K, V, C = NaturalOrder> {
    tree: RedBlackTree<K, V, C>,
}

impl<K, V> TreeMap<K, V> {
    /// Makes a new, empty `TreeMap` ordered by `K`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        TreeMap {
            tree: RedBlackTree::new(),
        }
    }

    /// Makes a new, empty `TreeMap` with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TreeMap {
            tree: RedBlackTree::with_capacity(capacity),
        }
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Makes a new, empty `TreeMap` ordered by `comparator`.
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        TreeMap {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    /// Makes a new, empty `TreeMap` ordered by `comparator` with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        TreeMap {
            tree: RedBlackTree::with_capacity_and_comparator(capacity, comparator),
        }
    }

    /// Returns the comparator that orders this map.
    pub const fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the number of entries in the map.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Inserts a key/value pair, returning the previous value for an equal key.
    ///
    /// The stored key is not updated when an equal key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        self.tree.insert(key, value)
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get_mut(key)
    }

    /// Returns the stored key and its value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get_key_value(key)
    }

    /// Returns `true` if the map stores a value under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.contains_key(key)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.remove(key)
    }

    /// Removes `key`, returning the stored key and value if it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.remove_entry(key)
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordkit::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first_key_value()
    }

    /// Returns the entry with the maximum key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last_key_value()
    }

    /// Removes and returns the entry with the minimum key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    /// Removes and returns the entry with the maximum key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    pub fn floor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.floor(key)
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    pub fn ceiling<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.ceiling(key)
    }

    /// Calls `f` on every entry in ascending key order without an auxiliary stack.
    ///
    /// See [`RedBlackTree::inorder`].
    pub fn inorder<F>(&mut self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.tree.inorder(f);
    }

    /// Calls `f` on every entry in ascending key order with mutable access to the values.
    pub fn inorder_mut<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V),
    {
        self.tree.inorder_mut(f);
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.tree.keys()
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        self.tree.values()
    }
}

impl<K, V: Clone, C> Container for TreeMap<K, V, C> {
    type Value = V;

    fn len(&self) -> usize {
        self.tree.len()
    }

    fn collect_values(&self) -> Vec<V> {
        self.tree.collect_values()
    }

    fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K, V, C: Default> Default for TreeMap<K, V, C> {
    fn default() -> Self {
        TreeMap {
            tree: RedBlackTree::default(),
        }
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for TreeMap<K, V, C> {
    fn clone(&self) -> Self {
        TreeMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

/// ```
/// use ordkit::TreeMap;
///
/// let map = TreeMap::from([(2, "b"), (1, "a")]);
/// assert_eq!(map.to_string(), "TreeMap\nmap[1:a 2:b ]");
/// ```
impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeMap\nmap[")?;
        for (key, value) in self {
            write!(f, "{key}:{value} ")?;
        }
        write!(f, "]")
    }
}

impl<K, Q, V, C> Index<&Q> for TreeMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `TreeMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("`TreeMap::index()` - no entry found for key!")
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        TreeMap {
            tree: RedBlackTree::from_iter(iter),
        }
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.tree.extend(iter);
    }
}

impl<'a, K: Copy + 'a, V: Copy + 'a, C: Comparator<K>> Extend<(&'a K, &'a V)> for TreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.tree.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for TreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        self.tree.into_iter()
    }
}
