use std::cell::RefCell;
use std::cmp::Reverse as StdReverse;
use std::collections::BinaryHeap;

use ordkit::{Container, IndexedHeap, NaturalOrder, Reverse};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

fn value_strategy() -> impl Strategy<Value = u16> {
    0u16..500
}

fn drain<C: ordkit::Comparator<u16>>(heap: &mut IndexedHeap<u16, C>) -> Vec<u16> {
    std::iter::from_fn(|| heap.pop()).collect()
}

// ─── Worked examples ─────────────────────────────────────────────────────────

#[test]
fn build_push_then_pop_all() {
    let mut heap = IndexedHeap::new();
    heap.build([6, 8, 5, 9, 3]);
    heap.push(1);
    assert_eq!(drain(&mut heap), [1, 3, 5, 6, 8, 9]);
}

#[test]
fn duplicate_push_then_single_remove() {
    let mut heap = IndexedHeap::new();
    heap.push(3u16);
    heap.push(3);
    assert!(heap.remove(&3));
    assert_eq!(heap.len(), 1);
    assert_eq!(heap.pop(), Some(3));
    assert_eq!(heap.pop(), None);
    assert_eq!(heap.peek(), None);
}

#[test]
fn balanced_push_pop_pairs_leave_len_unchanged() {
    let mut heap: IndexedHeap<u16> = (10..20).collect();
    for _ in 0..5 {
        heap.push(0);
    }
    assert_eq!((heap.len(), heap.distinct_len(), heap.count(&0)), (15, 11, 5));
    for _ in 0..5 {
        assert_eq!(heap.pop(), Some(0));
    }
    assert_eq!((heap.len(), heap.distinct_len()), (10, 10));
    assert!(!heap.contains(&0));
    assert_eq!(heap.collect_values(), (10..20).collect::<Vec<_>>());
}

#[test]
fn max_heap_via_reverse() {
    let mut heap = IndexedHeap::with_comparator(Reverse(NaturalOrder));
    heap.extend([4u16, 10, 7, 10]);
    assert_eq!(heap.peek(), Some(&10));
    assert_eq!(drain(&mut heap), [10, 10, 7, 4]);
}

#[test]
fn update_after_external_priority_change() {
    // Tasks are ids; their priority lives outside the heap.
    let priority = RefCell::new(vec![50u32, 40, 30, 20, 10]);
    let mut heap = IndexedHeap::with_comparator(|a: &usize, b: &usize| {
        let priority = priority.borrow();
        priority[*a].cmp(&priority[*b])
    });
    heap.extend(0..5);
    assert_eq!(heap.peek(), Some(&4));

    // Raise task 4's priority value so it sinks.
    priority.borrow_mut()[4] = 100;
    assert!(heap.update(&4));
    assert_eq!(heap.peek(), Some(&3));

    // Lower task 0's so it rises to the top.
    priority.borrow_mut()[0] = 0;
    assert!(heap.update(&0));
    assert!(!heap.update(&9));

    let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).collect();
    assert_eq!(order, [0, 3, 2, 1, 4]);
}

#[test]
fn clear_then_reuse() {
    let mut heap: IndexedHeap<u16> = IndexedHeap::from(vec![3, 1, 2]);
    heap.clear();
    assert!(heap.is_empty());
    assert_eq!(heap.distinct_len(), 0);
    heap.push(7);
    assert_eq!(heap.peek(), Some(&7));
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum HeapOp {
    Push(u16),
    Pop,
    Peek,
    Remove(u16),
    Build(Vec<u16>),
}

fn heap_op_strategy() -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        8 => value_strategy().prop_map(HeapOp::Push),
        4 => Just(HeapOp::Pop),
        1 => Just(HeapOp::Peek),
        4 => value_strategy().prop_map(HeapOp::Remove),
        1 => proptest::collection::vec(value_strategy(), 0..64).prop_map(HeapOp::Build),
    ]
}

// ─── Randomized comparison against a sorted Vec and BinaryHeap ───────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations against a sorted Vec model.
    #[test]
    fn heap_ops_match_sorted_vec(ops in proptest::collection::vec(heap_op_strategy(), TEST_SIZE)) {
        let mut heap: IndexedHeap<u16> = IndexedHeap::new();
        let mut model: Vec<u16> = Vec::new();

        for op in &ops {
            match op {
                HeapOp::Push(value) => {
                    heap.push(*value);
                    let at = model.partition_point(|v| v <= value);
                    model.insert(at, *value);
                }
                HeapOp::Pop => {
                    let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                    prop_assert_eq!(heap.pop(), expected, "pop");
                }
                HeapOp::Peek => {
                    prop_assert_eq!(heap.peek(), model.first(), "peek");
                }
                HeapOp::Remove(value) => {
                    let expected = model.binary_search(value).map(|at| model.remove(at)).is_ok();
                    prop_assert_eq!(heap.remove(value), expected, "remove({})", value);
                }
                HeapOp::Build(values) => {
                    heap.build(values.iter().copied());
                    model.extend(values);
                    model.sort_unstable();
                }
            }
            prop_assert_eq!(heap.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(heap.is_empty(), model.is_empty());
        }

        prop_assert_eq!(heap.into_sorted_vec(), model);
    }

    /// A heap built in bulk drains exactly like a min-ordered BinaryHeap.
    #[test]
    fn build_matches_binary_heap(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let mut heap = IndexedHeap::from(values.clone());
        let mut std_heap: BinaryHeap<StdReverse<u16>> = values.into_iter().map(StdReverse).collect();

        prop_assert_eq!(heap.len(), std_heap.len());
        while let Some(StdReverse(expected)) = std_heap.pop() {
            prop_assert_eq!(heap.pop(), Some(expected));
        }
        prop_assert!(heap.is_empty());
    }

    /// Removing every pushed value, in any order, empties the heap.
    #[test]
    fn removing_everything_empties(
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        order in any::<prop::sample::Index>(),
    ) {
        let mut heap: IndexedHeap<u16> = values.iter().copied().collect();
        let mut pending = values;
        if !pending.is_empty() {
            let pivot = order.index(pending.len());
            pending.rotate_left(pivot);
        }
        for value in &pending {
            prop_assert!(heap.remove(value));
        }
        prop_assert!(heap.is_empty());
        prop_assert_eq!(heap.distinct_len(), 0);
        prop_assert_eq!(heap.pop(), None);
    }
}
