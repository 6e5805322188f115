use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use crate::Comparator;

/// The red-black tree behind `RedBlackTree`, `TreeMap` and `TreeSet`.
///
/// The raw tree does not own a comparator; every ordered operation receives
/// one so that the public wrappers can store it next to the raw tree.
#[derive(Clone)]
pub(crate) struct RawRedBlackTree<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of live nodes, maintained on every insert and removal.
    len: usize,
}

impl<K, V> RawRedBlackTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    pub(crate) fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (&node.key, &node.value)
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.nodes.get(h).is_red())
    }

    fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).color = color;
    }

    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent
    }

    /// Which side of its parent `handle` hangs from. `handle` must not be the root.
    fn side_of(&self, handle: Handle) -> Side {
        let parent = self.parent(handle).expect("`RawRedBlackTree::side_of()` - the root has no side!");
        if self.nodes.get(parent).left == Some(handle) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Follows `side` links from `handle` until they run out.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(next) = self.nodes.get(handle).child(side) {
            handle = next;
        }
        handle
    }

    /// The minimum node of the tree.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    /// The maximum node of the tree.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// The in-order neighbour of `handle` in direction `side`, found through
    /// parent links so that no auxiliary stack is required.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.nodes.get(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut current = handle;
        while let Some(parent) = self.parent(current) {
            if self.nodes.get(parent).child(side.opposite()) == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    // ─── Structural edits ───────────────────────────────────────────────────

    /// Puts `new` in the place `old` occupies under its parent (or at the root).
    /// `old`'s own links are left untouched.
    fn replace_node(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.parent(old);
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(old);
                self.nodes.get_mut(parent).set_child(side, new);
            }
        }
        if let Some(new) = new {
            self.nodes.get_mut(new).parent = parent;
        }
    }

    /// Rotates the subtree at `handle` towards `direction`: rotating left lifts
    /// the right child into `handle`'s place.
    fn rotate(&mut self, handle: Handle, direction: Side) {
        let pivot = self
            .nodes
            .get(handle)
            .child(direction.opposite())
            .expect("`RawRedBlackTree::rotate()` - rotation needs a child to lift!");
        self.replace_node(handle, Some(pivot));

        let inner = self.nodes.get(pivot).child(direction);
        self.nodes.get_mut(handle).set_child(direction.opposite(), inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(handle);
        }

        self.nodes.get_mut(pivot).set_child(direction, Some(handle));
        self.nodes.get_mut(handle).parent = Some(pivot);
    }

    // ─── Insertion ──────────────────────────────────────────────────────────

    /// Restores the red-black properties after `node` was linked in red.
    fn insert_fixup(&mut self, mut node: Handle) {
        loop {
            let Some(parent) = self.parent(node) else {
                self.set_color(node, Color::Black);
                return;
            };
            if !self.is_red(Some(parent)) {
                return;
            }

            // A red parent is never the root, so the grandparent exists.
            let grandparent = self
                .parent(parent)
                .expect("`RawRedBlackTree::insert_fixup()` - red node without a parent!");
            let parent_side = self.side_of(parent);
            let uncle = self.nodes.get(grandparent).child(parent_side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.nodes.get(u).is_red()) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Zig-zag: straighten the path first.
            let parent = if self.side_of(node) == parent_side {
                parent
            } else {
                self.rotate(parent, parent_side);
                node
            };

            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            return;
        }
    }

    // ─── Removal ────────────────────────────────────────────────────────────

    /// Restores black height around `node`, a black leaf that is about to be
    /// unlinked.
    fn remove_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.parent(node) {
            let side = self.side_of(node);
            let sibling_of = |tree: &Self| {
                tree.nodes
                    .get(parent)
                    .child(side.opposite())
                    .expect("`RawRedBlackTree::remove_fixup()` - black node without a sibling!")
            };

            let mut sibling = sibling_of(self);
            if self.is_red(Some(sibling)) {
                self.set_color(parent, Color::Red);
                self.set_color(sibling, Color::Black);
                self.rotate(parent, side);
                sibling = sibling_of(self);
            }

            let near = self.nodes.get(sibling).child(side);
            let far = self.nodes.get(sibling).child(side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                if self.is_red(Some(parent)) {
                    self.set_color(parent, Color::Black);
                    return;
                }
                node = parent;
                continue;
            }

            if !self.is_red(far) {
                let near = near.expect("`RawRedBlackTree::remove_fixup()` - red near nephew is missing!");
                self.set_color(sibling, Color::Red);
                self.set_color(near, Color::Black);
                self.rotate(sibling, side.opposite());
                sibling = sibling_of(self);
            }

            let parent_color = self.nodes.get(parent).color;
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            if let Some(far) = self.nodes.get(sibling).child(side.opposite()) {
                self.set_color(far, Color::Black);
            }
            self.rotate(parent, side);
            return;
        }
    }

    /// Unlinks the node at `handle` and returns its key and value.
    pub(crate) fn remove_handle(&mut self, handle: Handle) -> (K, V) {
        let mut target = handle;
        let node = self.nodes.get(target);
        if let (Some(left), Some(_)) = (node.left, node.right) {
            // Trade places with the in-order predecessor, which has no right child.
            let predecessor = self.extreme(left, Side::Right);
            let (upper, lower) = self.nodes.get_pair_mut(target, predecessor);
            core::mem::swap(&mut upper.key, &mut lower.key);
            core::mem::swap(&mut upper.value, &mut lower.value);
            target = predecessor;
        }

        let node = self.nodes.get(target);
        let child = node.left.or(node.right);
        if !node.is_red() && child.is_none() {
            self.remove_fixup(target);
        }
        self.replace_node(target, child);
        // A node with a single child is black and the child is red.
        if let Some(child) = child {
            self.set_color(child, Color::Black);
        }

        self.len -= 1;
        let removed = self.nodes.take(target);
        (removed.key, removed.value)
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first()?;
        Some(self.remove_handle(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last()?;
        Some(self.remove_handle(last))
    }

    // ─── Traversal ──────────────────────────────────────────────────────────

    /// Visits every entry in ascending order with O(1) auxiliary space.
    ///
    /// Morris traversal: the right link of each in-order predecessor is
    /// temporarily pointed back at its successor and reset once the left
    /// subtree is done, so the tree has its original shape on return. Parent
    /// links are never touched.
    pub(crate) fn inorder<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.inorder_mut(|key, value| f(key, value));
    }

    pub(crate) fn inorder_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        let mut walk = MorrisWalk { current: self.root, tree: self };
        while let Some(handle) = walk.advance() {
            let node = walk.tree.nodes.get_mut(handle);
            f(&node.key, &mut node.value);
        }
    }

    /// Moves every entry out in ascending order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.successor(handle);
        }

        let entries = order
            .into_iter()
            .map(|handle| {
                let node = self.nodes.take(handle);
                (node.key, node.value)
            })
            .collect();
        self.clear();
        entries
    }

    /// Writes the sideways box-drawing rendering of the subtree at `handle`.
    fn render(&self, f: &mut fmt::Formatter<'_>, handle: Handle, prefix: &mut String, is_tail: bool) -> fmt::Result
    where
        K: fmt::Display,
    {
        let node = self.nodes.get(handle);
        let mark = prefix.len();

        if let Some(right) = node.right {
            prefix.push_str(if is_tail { "│   " } else { "    " });
            self.render(f, right, prefix, false)?;
            prefix.truncate(mark);
        }

        writeln!(f, "{prefix}{}{}", if is_tail { "└── " } else { "┌── " }, node.key)?;

        if let Some(left) = node.left {
            prefix.push_str(if is_tail { "    " } else { "│   " });
            self.render(f, left, prefix, true)?;
            prefix.truncate(mark);
        }
        Ok(())
    }

    pub(crate) fn fmt_tree(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        K: fmt::Display,
    {
        match self.root {
            Some(root) => self.render(f, root, &mut String::new(), true),
            None => Ok(()),
        }
    }
}

impl<K, V> RawRedBlackTree<K, V> {
    /// Finds the node whose key compares equal to `key`.
    pub(crate) fn search<Q, C>(&self, key: &Q, cmp: &C) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q> + ?Sized,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match cmp.compare(key, node.key.borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Inserts `key`/`value`, or overwrites the value stored under an equal key
    /// and returns the previous one. The stored key is kept in that case.
    pub(crate) fn insert<C>(&mut self, key: K, value: V, cmp: &C) -> Option<V>
    where
        C: Comparator<K> + ?Sized,
    {
        let Some(mut current) = self.root else {
            let handle = self.nodes.alloc(Node::new(key, value, None));
            self.root = Some(handle);
            self.len += 1;
            self.insert_fixup(handle);
            return None;
        };

        loop {
            let node = self.nodes.get(current);
            let side = match cmp.compare(&key, &node.key) {
                Ordering::Equal => {
                    let slot = &mut self.nodes.get_mut(current).value;
                    return Some(core::mem::replace(slot, value));
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };

            match node.child(side) {
                Some(next) => current = next,
                None => {
                    let handle = self.nodes.alloc(Node::new(key, value, Some(current)));
                    self.nodes.get_mut(current).set_child(side, Some(handle));
                    self.len += 1;
                    self.insert_fixup(handle);
                    return None;
                }
            }
        }
    }

    /// Removes the entry whose key compares equal to `key`.
    pub(crate) fn remove_entry<Q, C>(&mut self, key: &Q, cmp: &C) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q> + ?Sized,
    {
        let handle = self.search(key, cmp)?;
        Some(self.remove_handle(handle))
    }

    /// The node with the largest key that is less than or equal to `key`.
    pub(crate) fn floor<Q, C>(&self, key: &Q, cmp: &C) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q> + ?Sized,
    {
        self.bound(key, cmp, Ordering::Greater)
    }

    /// The node with the smallest key that is greater than or equal to `key`.
    pub(crate) fn ceiling<Q, C>(&self, key: &Q, cmp: &C) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q> + ?Sized,
    {
        self.bound(key, cmp, Ordering::Less)
    }

    /// Single descent remembering the last node at which `key` compared as
    /// `candidate_when`; an equal key ends the search immediately.
    fn bound<Q, C>(&self, key: &Q, cmp: &C, candidate_when: Ordering) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q> + ?Sized,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let ordering = cmp.compare(key, node.key.borrow());
            if ordering == Ordering::Equal {
                return Some(handle);
            }
            if ordering == candidate_when {
                best = Some(handle);
            }
            current = match ordering {
                Ordering::Less => node.left,
                _ => node.right,
            };
        }
        best
    }
}

/// In-progress Morris traversal over a [`RawRedBlackTree`].
///
/// Dropping an unfinished walk runs it to completion without visiting
/// anything, which resets every redirected right link. A panicking visitor
/// therefore cannot leave threads behind in the tree.
struct MorrisWalk<'a, K, V> {
    tree: &'a mut RawRedBlackTree<K, V>,
    current: Option<Handle>,
}

impl<K, V> MorrisWalk<'_, K, V> {
    /// Steps to the next node in ascending order, threading and unthreading
    /// predecessor links on the way.
    fn advance(&mut self) -> Option<Handle> {
        while let Some(handle) = self.current {
            let node = self.tree.nodes.get(handle);
            let Some(left) = node.left else {
                self.current = node.right;
                return Some(handle);
            };

            let mut predecessor = left;
            while let Some(right) = self.tree.nodes.get(predecessor).right.filter(|&r| r != handle) {
                predecessor = right;
            }

            let predecessor = self.tree.nodes.get_mut(predecessor);
            if predecessor.right.is_none() {
                predecessor.right = Some(handle);
                self.current = Some(left);
            } else {
                predecessor.right = None;
                self.current = self.tree.nodes.get(handle).right;
                return Some(handle);
            }
        }
        None
    }
}

impl<K, V> Drop for MorrisWalk<'_, K, V> {
    fn drop(&mut self) {
        while self.advance().is_some() {}
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::NaturalOrder;
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    impl<K, V> RawRedBlackTree<K, V> {
        /// Checks every red-black and linkage invariant, returning the black height.
        fn validate<C: Comparator<K>>(&self, cmp: &C) -> usize {
            assert!(!self.is_red(self.root), "root must be black");
            if let Some(root) = self.root {
                assert_eq!(self.parent(root), None, "root must not have a parent");
            }
            let (count, height) = self.validate_subtree(self.root, cmp);
            assert_eq!(count, self.len, "len must match the number of reachable nodes");
            assert_eq!(self.nodes.len(), self.len, "arena must hold exactly the reachable nodes");
            height
        }

        fn validate_subtree<C: Comparator<K>>(&self, handle: Option<Handle>, cmp: &C) -> (usize, usize) {
            let Some(handle) = handle else {
                return (0, 1);
            };
            let node = self.nodes.get(handle);
            for (side, child) in [(Side::Left, node.left), (Side::Right, node.right)] {
                let Some(child) = child else { continue };
                let child_node = self.nodes.get(child);
                assert_eq!(child_node.parent, Some(handle), "child must link back to its parent");
                if node.is_red() {
                    assert!(!child_node.is_red(), "red node must not have a red child");
                }
                let expected = if side == Side::Left { Ordering::Less } else { Ordering::Greater };
                assert_eq!(cmp.compare(&child_node.key, &node.key), expected, "binary-search order violated");
            }
            let (left_count, left_height) = self.validate_subtree(node.left, cmp);
            let (right_count, right_height) = self.validate_subtree(node.right, cmp);
            assert_eq!(left_height, right_height, "black height must be uniform");
            (left_count + right_count + 1, left_height + usize::from(!node.is_red()))
        }

        fn keys_via_successor(&self) -> Vec<K>
        where
            K: Clone,
        {
            let mut keys = Vec::new();
            let mut current = self.first();
            while let Some(handle) = current {
                keys.push(self.node(handle).key.clone());
                current = self.successor(handle);
            }
            keys
        }

        fn keys_via_predecessor(&self) -> Vec<K>
        where
            K: Clone,
        {
            let mut keys = Vec::new();
            let mut current = self.last();
            while let Some(handle) = current {
                keys.push(self.node(handle).key.clone());
                current = self.predecessor(handle);
            }
            keys
        }

        /// Snapshot of every link so that traversals can be checked for side effects.
        fn shape(&self) -> Vec<(Handle, Option<Handle>, Option<Handle>, Option<Handle>, Color)> {
            let mut shape = Vec::new();
            let mut current = self.first();
            while let Some(handle) = current {
                let node = self.node(handle);
                shape.push((handle, node.left, node.right, node.parent, node.color));
                current = self.successor(handle);
            }
            shape
        }
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = RawRedBlackTree::new();
        for key in 0..1024 {
            assert_eq!(tree.insert(key, key * 2, &NaturalOrder), None);
            tree.validate(&NaturalOrder);
        }
        // A red-black tree of n nodes has black height at most log2(n + 1).
        assert!(tree.validate(&NaturalOrder) <= 11);
        assert_eq!(tree.len(), 1024);
    }

    #[test]
    fn duplicate_insert_overwrites_value_and_keeps_len() {
        let mut tree = RawRedBlackTree::new();
        assert_eq!(tree.insert(5, "e", &NaturalOrder), None);
        assert_eq!(tree.insert(5, "E", &NaturalOrder), Some("e"));
        assert_eq!(tree.len(), 1);
        let handle = tree.search(&5, &NaturalOrder).unwrap();
        assert_eq!(tree.key_value(handle), (&5, &"E"));
    }

    #[test]
    fn removing_two_child_node_uses_predecessor() {
        let mut tree = RawRedBlackTree::new();
        for key in [5, 3, 7, 1, 4, 6, 8] {
            tree.insert(key, (), &NaturalOrder);
        }
        assert_eq!(tree.remove_entry(&5, &NaturalOrder), Some((5, ())));
        tree.validate(&NaturalOrder);
        assert_eq!(tree.keys_via_successor(), [1, 3, 4, 6, 7, 8]);
        assert_eq!(tree.remove_entry(&5, &NaturalOrder), None);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn floor_and_ceiling_on_sparse_keys() {
        let mut tree = RawRedBlackTree::new();
        assert_eq!(tree.floor(&5, &NaturalOrder), None);
        for key in [10, 20, 30] {
            tree.insert(key, (), &NaturalOrder);
        }
        let key_of = |h: Option<Handle>| h.map(|h| tree.node(h).key);
        assert_eq!(key_of(tree.floor(&5, &NaturalOrder)), None);
        assert_eq!(key_of(tree.floor(&25, &NaturalOrder)), Some(20));
        assert_eq!(key_of(tree.floor(&30, &NaturalOrder)), Some(30));
        assert_eq!(key_of(tree.ceiling(&25, &NaturalOrder)), Some(30));
        assert_eq!(key_of(tree.ceiling(&10, &NaturalOrder)), Some(10));
        assert_eq!(key_of(tree.ceiling(&31, &NaturalOrder)), None);
    }

    #[test]
    fn render_draws_right_subtree_above_left() {
        struct Rendered<'a>(&'a RawRedBlackTree<i32, ()>);
        impl fmt::Display for Rendered<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt_tree(f)
            }
        }

        let mut tree = RawRedBlackTree::new();
        for key in [2, 1, 3] {
            tree.insert(key, (), &NaturalOrder);
        }
        let rendered = alloc::format!("{}", Rendered(&tree));
        assert_eq!(rendered, "│   ┌── 3\n└── 2\n    └── 1\n");
    }

    #[test]
    #[cfg(feature = "std")]
    fn panicking_visitor_leaves_tree_intact() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let mut tree = RawRedBlackTree::new();
        for key in (0..32).step_by(2) {
            tree.insert(key, (), &NaturalOrder);
        }
        let before = tree.shape();

        let mut calls = 0;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            tree.inorder(|_, _| {
                calls += 1;
                assert!(calls < 3, "visitor gives up");
            });
        }));

        assert!(outcome.is_err());
        assert_eq!(tree.shape(), before);
        tree.validate(&NaturalOrder);
        for key in (1..32).step_by(2) {
            assert_eq!(tree.search(&key, &NaturalOrder), None);
        }
    }

    proptest! {
        #[test]
        fn random_operations_keep_invariants(operations in prop::collection::vec(strategy(), 0..512)) {
            let mut tree = RawRedBlackTree::new();
            let mut model = BTreeMap::new();

            for operation in operations {
                match operation {
                    Operation::Insert(key, value) => {
                        prop_assert_eq!(tree.insert(key, value, &NaturalOrder), model.insert(key, value));
                    }
                    Operation::Remove(key) => {
                        prop_assert_eq!(tree.remove_entry(&key, &NaturalOrder), model.remove_entry(&key));
                    }
                    Operation::PopFirst => prop_assert_eq!(tree.pop_first(), model.pop_first()),
                    Operation::PopLast => prop_assert_eq!(tree.pop_last(), model.pop_last()),
                }
                tree.validate(&NaturalOrder);
                prop_assert_eq!(tree.len(), model.len());
            }

            let expected: Vec<_> = model.keys().copied().collect();
            prop_assert_eq!(tree.keys_via_successor(), expected.clone());
            let mut reversed = expected;
            reversed.reverse();
            prop_assert_eq!(tree.keys_via_predecessor(), reversed);
        }

        #[test]
        fn morris_traversal_restores_shape(keys in prop::collection::vec(-64i32..64, 0..128)) {
            let mut tree = RawRedBlackTree::new();
            for &key in &keys {
                tree.insert(key, key, &NaturalOrder);
            }
            let before = tree.shape();

            let mut visited = Vec::new();
            tree.inorder(|k, v| {
                assert_eq!(k, v);
                visited.push(*k);
            });

            prop_assert_eq!(tree.shape(), before);
            tree.validate(&NaturalOrder);
            prop_assert_eq!(visited, tree.keys_via_successor());
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Insert(i16, u32),
        Remove(i16),
        PopFirst,
        PopLast,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            10 => (-200i16..200, any::<u32>()).prop_map(|(key, value)| Operation::Insert(key, value)),
            8 => (-200i16..200).prop_map(Operation::Remove),
            1 => Just(Operation::PopFirst),
            1 => Just(Operation::PopLast),
        ]
    }
}
