use core::cmp::Ordering;

/// A three-way ordering over `T`, supplied when a collection is constructed.
///
/// Every collection in this crate orders its elements exclusively through a
/// `Comparator`; two elements are considered the same key when
/// [`compare`](Comparator::compare) returns [`Ordering::Equal`].
///
/// It is a logic error for a comparator to be inconsistent across calls (for
/// example, to depend on mutable state that changes while elements are stored).
/// The behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the collection that observed it and not result in undefined
/// behavior.
///
/// Closures of the form `Fn(&T, &T) -> Ordering` implement this trait directly.
///
/// # Examples
///
/// ```
/// use ordkit::TreeMap;
///
/// // Order strings by length, then alphabetically.
/// let mut map = TreeMap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b)));
/// map.insert("pear", 1);
/// map.insert("fig", 2);
/// map.insert("banana", 3);
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, ["fig", "pear", "banana"]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The comparator used when none is given: the type's own [`Ord`] implementation.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use ordkit::{Comparator, NaturalOrder};
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<T: ?Sized + Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator.
///
/// Wrapping the comparator of an [`IndexedHeap`](crate::IndexedHeap) in
/// `Reverse` turns the min-heap into a max-heap; wrapping the comparator of a
/// tree reverses its iteration order.
///
/// # Examples
///
/// ```
/// use ordkit::{NaturalOrder, Reverse, TreeSet};
///
/// let mut set = TreeSet::with_comparator(Reverse(NaturalOrder));
/// set.add_all([1, 3, 2]);
///
/// let values: Vec<_> = set.iter().copied().collect();
/// assert_eq!(values, [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn closures_are_comparators() {
        let by_abs = |a: &i32, b: &i32| a.abs().cmp(&b.abs());
        assert_eq!(by_abs.compare(&-3, &2), Ordering::Greater);
        assert_eq!(by_abs.compare(&-2, &2), Ordering::Equal);
    }

    proptest! {
        #[test]
        fn reverse_inverts_natural_order(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Reverse(NaturalOrder).compare(&a, &b), NaturalOrder.compare(&a, &b).reverse());
        }

        #[test]
        fn double_reverse_is_identity(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Reverse(Reverse(NaturalOrder)).compare(&a, &b), a.cmp(&b));
        }
    }
}
