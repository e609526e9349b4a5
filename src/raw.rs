use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FusedIterator;

use crate::node::{Arena, Link, NodeId};

/// Node storage and the algorithms shared by both tree flavours.
/// Balancing is layered on top by the owner; nothing in here rotates on its own.
#[derive(Clone)]
pub(crate) struct RawTree<T> {
    pub(crate) arena: Arena<T>,
    pub(crate) root: Link,
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

/// An iterator over the items of a tree in ascending order.
pub struct Iter<'a, T> {
    raw: &'a RawTree<T>,
    next: Link,
    remaining: usize,
}

impl<T> RawTree<T> {
    pub(crate) fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    /// Counts nodes reachable from the root with a postorder walk.
    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn node_count(&self) -> usize {
        let mut num_nodes = 0;
        self.postorder(|_| num_nodes += 1);
        num_nodes
    }

    pub(crate) fn height(&self) -> usize {
        self.link_height(self.root)
    }

    pub(crate) fn root_item(&self) -> Option<&T> {
        self.root.map(|root_id| &self.arena[root_id].item)
    }

    pub(crate) fn clear(&mut self) {
        if !self.is_empty() {
            log::debug!("clearing tree of {} nodes", self.len());
        }
        self.arena.clear();
        self.root = None;
    }

    pub(crate) fn link_height(&self, link: Link) -> usize {
        match link {
            None => 0,
            Some(node_id) => self.arena[node_id].height,
        }
    }

    pub(crate) fn left_height(&self, node_id: NodeId) -> usize {
        self.link_height(self.arena[node_id].left)
    }

    pub(crate) fn right_height(&self, node_id: NodeId) -> usize {
        self.link_height(self.arena[node_id].right)
    }

    /// Recomputes the cached height from the children.
    /// Returns whether the height changed.
    pub(crate) fn adjust_height(&mut self, node_id: NodeId) -> bool {
        let height = 1 + cmp::max(self.left_height(node_id), self.right_height(node_id));
        let node = &mut self.arena[node_id];
        let changed = node.height != height;
        node.height = height;
        changed
    }

    /// Walks towards the root refreshing cached heights, stopping at the first unchanged node.
    pub(crate) fn retrace_heights(&mut self, start_from: Link) {
        let mut current = start_from;
        while let Some(node_id) = current {
            if !self.adjust_height(node_id) {
                break;
            }
            current = self.arena[node_id].parent;
        }
    }

    /// Points the parent's slot that referenced `old` (or the root) at `new`.
    /// Does not touch `new`'s parent link.
    pub(crate) fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent_id) => {
                let parent = &mut self.arena[parent_id];
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    debug_assert_eq!(parent.right, Some(old));
                    parent.right = new;
                }
            }
        }
    }

    /// Removes the node from the tree and returns the parent of the node actually excised,
    /// which is where height maintenance has to start.
    ///
    /// A node with at most one child is spliced out and its child takes its place.
    /// A node with two children keeps its slot and receives the item of its in-order successor,
    /// whose node is spliced out instead.
    pub(crate) fn unlink(&mut self, node_id: NodeId) -> Link {
        let node = &self.arena[node_id];
        match (node.left, node.right) {
            (Some(_), Some(right_id)) => {
                let successor_id = self.leftmost(right_id);
                let (retrace_from, item) = self.splice(successor_id);
                self.arena[node_id].item = item;
                retrace_from
            }
            _ => self.splice(node_id).0,
        }
    }

    // Excise a node with at most one child. Returns its former parent and its item.
    fn splice(&mut self, node_id: NodeId) -> (Link, T) {
        let node = &self.arena[node_id];
        debug_assert!(node.left.is_none() || node.right.is_none());
        let child = node.left.or(node.right);
        let parent = node.parent;
        if let Some(child_id) = child {
            self.arena[child_id].parent = parent;
        }
        self.replace_child(parent, node_id, child);
        (parent, self.arena.destroy(node_id))
    }

    pub(crate) fn leftmost(&self, mut node_id: NodeId) -> NodeId {
        while let Some(left_id) = self.arena[node_id].left {
            node_id = left_id;
        }
        node_id
    }

    fn first(&self) -> Link {
        self.root.map(|root_id| self.leftmost(root_id))
    }

    fn successor(&self, node_id: NodeId) -> Link {
        if let Some(right_id) = self.arena[node_id].right {
            return Some(self.leftmost(right_id));
        }
        let mut child_id = node_id;
        let mut current = self.arena[node_id].parent;
        while let Some(parent_id) = current {
            if self.arena[parent_id].left == Some(child_id) {
                break;
            }
            child_id = parent_id;
            current = self.arena[parent_id].parent;
        }
        current
    }

    /// Visits items in ascending order. The visitor may change items but not the shape.
    pub(crate) fn traverse_mut<F: FnMut(&mut T)>(&mut self, mut visit: F) {
        let mut current = self.first();
        while let Some(node_id) = current {
            visit(&mut self.arena[node_id].item);
            current = self.successor(node_id);
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: self,
            next: self.first(),
            remaining: self.len(),
        }
    }

    /// Items of the children of the parent's sibling, left before right.
    pub(crate) fn cousins(&self, node_id: NodeId) -> Vec<&T> {
        let mut cousins = Vec::new();
        let Some(parent_id) = self.arena[node_id].parent else {
            return cousins;
        };
        let Some(grandparent_id) = self.arena[parent_id].parent else {
            return cousins;
        };
        let grandparent = &self.arena[grandparent_id];
        let pairing = if grandparent.left == Some(parent_id) {
            grandparent.right
        } else {
            grandparent.left
        };
        if let Some(pairing_id) = pairing {
            let pairing = &self.arena[pairing_id];
            for child_id in [pairing.left, pairing.right].into_iter().flatten() {
                cousins.push(&self.arena[child_id].item);
            }
        }
        cousins
    }

    /// Clears the tree and rebuilds it from sorted items, always placing the middle item of a
    /// range at the subtree root. The result has minimum height for the number of items.
    pub(crate) fn build_from_sorted(&mut self, items: Vec<T>) {
        log::debug!("building tree from {} sorted items", items.len());
        self.clear();
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        self.root = self.build_range(&mut slots, None);
    }

    fn build_range(&mut self, slots: &mut [Option<T>], parent: Link) -> Link {
        if slots.is_empty() {
            return None;
        }
        let mid = (slots.len() - 1) / 2;
        let item = slots[mid].take()?;
        let node_id = self.arena.create(parent, item);
        let (lower, upper) = slots.split_at_mut(mid);
        let left = self.build_range(lower, Some(node_id));
        let right = self.build_range(&mut upper[1..], Some(node_id));
        let node = &mut self.arena[node_id];
        node.left = left;
        node.right = right;
        self.adjust_height(node_id);
        Some(node_id)
    }

    /// Moves all items out in ascending order, leaving the tree empty.
    pub(crate) fn drain_sorted(&mut self) -> Vec<T> {
        let mut node_ids = Vec::with_capacity(self.len());
        self.inorder(|node_id| node_ids.push(node_id));
        let items = node_ids
            .into_iter()
            .map(|node_id| self.arena.destroy(node_id))
            .collect();
        self.arena.clear();
        self.root = None;
        items
    }

    /// Compares shape and items position by position.
    pub(crate) fn structurally_equal(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        let mut pending = vec![(self.root, other.root)];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(lhs_id), Some(rhs_id)) => {
                    let lhs = &self.arena[lhs_id];
                    let rhs = &other.arena[rhs_id];
                    if lhs.item != rhs.item {
                        return false;
                    }
                    pending.push((lhs.right, rhs.right));
                    pending.push((lhs.left, rhs.left));
                }
                _ => return false,
            }
        }
        true
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn check_consistency(&self, balanced: bool)
    where
        T: Ord,
    {
        // Check root link
        if let Some(root_id) = self.root {
            assert!(self.arena[root_id].parent.is_none());
        }

        // Check tree nodes
        let mut num_nodes = 0;
        self.preorder(|node_id| {
            let node = &self.arena[node_id];
            let mut left_height = 0;
            let mut right_height = 0;

            // Check link for left child node
            if let Some(left_id) = node.left {
                let left = &self.arena[left_id];
                assert_eq!(left.parent, Some(node_id));
                assert!(left.item < node.item);
                left_height = left.height;
            }

            // Check link for right child node
            if let Some(right_id) = node.right {
                let right = &self.arena[right_id];
                assert_eq!(right.parent, Some(node_id));
                assert!(right.item > node.item);
                right_height = right.height;
            }

            // Check height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            if balanced {
                assert!(left_height <= right_height + 1);
                assert!(right_height <= left_height + 1);
            }

            num_nodes += 1;
        });

        // Check number of nodes
        assert_eq!(num_nodes, self.len());
        assert_eq!(num_nodes, self.node_count());

        // Check ordering across subtrees
        let items: Vec<&T> = self.iter().collect();
        assert!(items.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn preorder<F: FnMut(NodeId)>(&self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    fn inorder<F: FnMut(NodeId)>(&self, f: F) {
        self.traverse(|_| {}, f, |_| {});
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn postorder<F: FnMut(NodeId)>(&self, f: F) {
        self.traverse(|_| {}, |_| {}, f);
    }

    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodeId),
        In: FnMut(NodeId),
        Post: FnMut(NodeId),
    {
        if let Some(mut node_id) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(node_id);
                        if let Some(left_id) = self.arena[node_id].left {
                            node_id = left_id;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        inorder(node_id);
                        if let Some(right_id) = self.arena[node_id].right {
                            node_id = right_id;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        postorder(node_id);
                        if let Some(parent_id) = self.arena[node_id].parent {
                            if Some(node_id) == self.arena[parent_id].left {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            node_id = parent_id;
                        } else {
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl<T: Ord> RawTree<T> {
    pub(crate) fn find(&self, item: &T) -> Link {
        let mut current = self.root;
        while let Some(node_id) = current {
            let node = &self.arena[node_id];
            current = match item.cmp(&node.item) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        current
    }

    /// Hangs a new leaf holding `item` into the empty slot the search ends at.
    /// Returns `None` without touching the tree if an equal item is present.
    pub(crate) fn attach(&mut self, item: T) -> Option<NodeId> {
        let mut parent: Link = None;
        let mut ordering = Ordering::Equal;
        let mut current = self.root;
        while let Some(node_id) = current {
            let node = &self.arena[node_id];
            ordering = item.cmp(&node.item);
            current = match ordering {
                Ordering::Equal => return None,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            parent = Some(node_id);
        }

        let node_id = self.arena.create(parent, item);
        match parent {
            None => self.root = Some(node_id),
            Some(parent_id) => {
                if ordering == Ordering::Less {
                    self.arena[parent_id].left = Some(node_id);
                } else {
                    self.arena[parent_id].right = Some(node_id);
                }
            }
        }
        Some(node_id)
    }

    pub(crate) fn height_of(&self, item: &T) -> usize {
        self.link_height(self.find(item))
    }

    pub(crate) fn cousins_of(&self, item: &T) -> Vec<&T> {
        match self.find(item) {
            None => Vec::new(),
            Some(node_id) => self.cousins(node_id),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node_id = self.next?;
        self.next = self.raw.successor(node_id);
        self.remaining -= 1;
        Some(&self.raw.arena[node_id].item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RawTree;

    fn raw_from(items: &[i32]) -> RawTree<i32> {
        let mut raw = RawTree::new();
        for item in items {
            if let Some(node_id) = raw.attach(*item) {
                let parent = raw.arena[node_id].parent;
                raw.retrace_heights(parent);
            }
        }
        raw
    }

    #[test]
    fn test_traversal_orders() {
        //     4
        //    / \
        //   2   6
        //  / \   \
        // 1   3   7
        let raw = raw_from(&[4, 2, 6, 1, 3, 7]);
        raw.check_consistency(false);

        let mut pre = Vec::new();
        raw.preorder(|node_id| pre.push(raw.arena[node_id].item));
        assert_eq!(pre, [4, 2, 1, 3, 6, 7]);

        let mut post = Vec::new();
        raw.postorder(|node_id| post.push(raw.arena[node_id].item));
        assert_eq!(post, [1, 3, 2, 7, 6, 4]);

        let items: Vec<i32> = raw.iter().copied().collect();
        assert_eq!(items, [1, 2, 3, 4, 6, 7]);
        assert_eq!(raw.iter().len(), 6);
    }

    #[test]
    fn test_build_range_midpoints() {
        let mut raw = RawTree::new();
        raw.build_from_sorted((1..=7).collect());
        raw.check_consistency(true);
        assert_eq!(raw.root_item(), Some(&4));
        assert_eq!(raw.height(), 3);

        raw.build_from_sorted(vec![1, 2]);
        assert_eq!(raw.root_item(), Some(&1));
        assert_eq!(raw.height(), 2);
    }

    #[test]
    fn test_drain_sorted() {
        let mut raw = raw_from(&[5, 3, 8, 1, 4]);
        assert_eq!(raw.drain_sorted(), [1, 3, 4, 5, 8]);
        assert!(raw.is_empty());
        assert_eq!(raw.len(), 0);
    }
}
