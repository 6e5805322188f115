use alloc::vec::Vec;

/// The contract shared by every collection in this crate.
///
/// # Examples
///
/// ```
/// use ordkit::{Container, TreeSet};
///
/// fn describe<C: Container>(container: &C) -> usize {
///     container.len()
/// }
///
/// let set = TreeSet::from([3, 1, 2]);
/// assert_eq!(describe(&set), 3);
/// assert_eq!(set.collect_values(), [1, 2, 3]);
/// ```
pub trait Container {
    /// The element type returned by [`collect_values`](Container::collect_values).
    type Value;

    /// Returns the number of elements in the container.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every element in the container's order.
    ///
    /// Ordered trees yield their values by ascending key; heaps yield their
    /// elements in full comparator order, duplicates included.
    fn collect_values(&self) -> Vec<Self::Value>;

    /// Removes every element.
    fn clear(&mut self);
}
