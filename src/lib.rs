//! Comparator-ordered collections for Rust.
//!
//! This crate provides:
//!
//! - [`RedBlackTree`] - a self-balancing search tree with floor/ceiling lookups
//!   and a constant-space in-order walk ([`inorder`](RedBlackTree::inorder))
//! - [`TreeMap`] and [`TreeSet`] - ordered map and set façades over the tree,
//!   with set algebra on `TreeSet`
//! - [`IndexedHeap`] - a binary heap that removes or re-prioritises any element
//!   in O(log n) and keeps duplicates as counts (requires the `std` feature)
//!
//! Every collection takes its ordering from a [`Comparator`]. [`NaturalOrder`]
//! (the default) uses [`Ord`], [`Reverse`] flips any comparator, and closures
//! `Fn(&T, &T) -> Ordering` work directly.
//!
//! # Example
//!
//! ```
//! use ordkit::{Container, TreeMap, TreeSet};
//!
//! let mut scores = TreeMap::new();
//! scores.insert("Carol", 92);
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//!
//! assert_eq!(scores.first_key_value(), Some((&"Alice", &100)));
//! assert_eq!(scores.floor("Bz"), Some((&"Bob", &85)));
//! assert_eq!(scores.collect_values(), [100, 85, 92]);
//!
//! let evens = TreeSet::from([2, 4, 6, 8]);
//! let small = TreeSet::from([1, 2, 3, 4]);
//! assert_eq!(&evens & &small, TreeSet::from([2, 4]));
//! assert_eq!(&evens - &small, TreeSet::from([6, 8]));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - The trees only require `alloc`
//! - **`std`** (default) - Enables [`IndexedHeap`], whose value index is a
//!   `HashMap` with the `rustc-hash` Fx hasher
//! - **No `unsafe`** - Tree nodes live in an arena and link to each other,
//!   parents included, through integer handles
//!
//! # Implementation
//!
//! The tree keeps the classic red-black invariants after every insert and
//! remove: the root is black, a red node has no red child, and every root to
//! leaf path crosses the same number of black nodes.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod compare;
mod container;
mod raw;

#[cfg(feature = "std")]
pub mod indexed_heap;
pub mod red_black_tree;
pub mod tree_map;
pub mod tree_set;

pub use compare::{Comparator, NaturalOrder, Reverse};
pub use container::Container;
#[cfg(feature = "std")]
pub use indexed_heap::IndexedHeap;
pub use red_black_tree::RedBlackTree;
pub use tree_map::TreeMap;
pub use tree_set::TreeSet;
