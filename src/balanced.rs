//! An ordered set implemented with an AVL tree.

use std::fmt;
use std::iter::FromIterator;

use crate::error::TreeError;
use crate::node::{Link, NodeId};
use crate::ordered::OrderedTree;
use crate::raw::{Iter, RawTree};
use crate::tree::SearchTree;

/// An ordered set implemented with a height-balanced (AVL) binary search tree.
///
/// For every node the heights of its two subtrees differ by at most one, which keeps the
/// height of the tree below `1.44 * log2(n + 2)`.
///
/// ```
/// use ordtree::BalancedTree;
/// let mut tree = BalancedTree::new();
/// for item in 1..=26 {
///     tree.insert(item);
/// }
/// assert_eq!(tree.height(), 5);
/// assert!(tree.remove(&13));
/// assert!(!tree.contains(&13));
/// ```
#[derive(Clone)]
pub struct BalancedTree<T> {
    tree: OrderedTree<T>,
}

/// Outcome of restoring balance at a single node.
enum Retrace {
    /// A (single or double) rotation was performed.
    Rotated,
    /// The node got a new height, ancestors may be affected.
    Changed,
    /// Neither balance nor height changed.
    Settled,
}

impl<T> RawTree<T> {
    // Lifts the right child into the node's place.
    fn rotate_left(&mut self, node_id: NodeId) {
        if let Some(right_id) = self.arena[node_id].right {
            let right_left = self.arena[right_id].left;
            self.arena[node_id].right = right_left;
            if let Some(right_left_id) = right_left {
                self.arena[right_left_id].parent = Some(node_id);
            }

            let parent = self.arena[node_id].parent;
            self.arena[right_id].parent = parent;
            self.replace_child(parent, node_id, Some(right_id));

            self.arena[right_id].left = Some(node_id);
            self.arena[node_id].parent = Some(right_id);

            self.adjust_height(node_id);
            self.adjust_height(right_id);
        }
    }

    // Lifts the left child into the node's place.
    fn rotate_right(&mut self, node_id: NodeId) {
        if let Some(left_id) = self.arena[node_id].left {
            let left_right = self.arena[left_id].right;
            self.arena[node_id].left = left_right;
            if let Some(left_right_id) = left_right {
                self.arena[left_right_id].parent = Some(node_id);
            }

            let parent = self.arena[node_id].parent;
            self.arena[left_id].parent = parent;
            self.replace_child(parent, node_id, Some(left_id));

            self.arena[left_id].right = Some(node_id);
            self.arena[node_id].parent = Some(left_id);

            self.adjust_height(node_id);
            self.adjust_height(left_id);
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update.
    fn rebalance_node(&mut self, node_id: NodeId) -> Retrace {
        let left_height = self.left_height(node_id);
        let right_height = self.right_height(node_id);
        debug_assert!(left_height <= right_height + 2);
        debug_assert!(right_height <= left_height + 2);
        if left_height > right_height + 1 {
            // Left heavy, straighten a left-right zig-zag first
            if let Some(left_id) = self.arena[node_id].left {
                if self.right_height(left_id) > self.left_height(left_id) {
                    log::trace!("double rotation at left-right case");
                    self.rotate_left(left_id);
                }
            }
            self.rotate_right(node_id);
            Retrace::Rotated
        } else if right_height > left_height + 1 {
            // Right heavy, straighten a right-left zig-zag first
            if let Some(right_id) = self.arena[node_id].right {
                if self.left_height(right_id) > self.right_height(right_id) {
                    log::trace!("double rotation at right-left case");
                    self.rotate_right(right_id);
                }
            }
            self.rotate_left(node_id);
            Retrace::Rotated
        } else if self.adjust_height(node_id) {
            Retrace::Changed
        } else {
            Retrace::Settled
        }
    }

    // Rebalance nodes starting from given position up to the root node.
    // Stop after first rebalance operation or as soon as a height stays the same.
    // This is enough to restore balance after a single insert operation.
    fn rebalance_once(&mut self, start_from: Link) {
        let mut current = start_from;
        while let Some(node_id) = current {
            let parent = self.arena[node_id].parent;
            match self.rebalance_node(node_id) {
                Retrace::Rotated => {
                    log::trace!("insert retrace stopped after rotation");
                    break;
                }
                Retrace::Settled => break,
                Retrace::Changed => current = parent,
            }
        }
    }

    // Rebalance nodes starting from given position up to the root node.
    // A removal may need a rotation at every level.
    fn rebalance(&mut self, start_from: Link) {
        let mut current = start_from;
        while let Some(node_id) = current {
            let parent = self.arena[node_id].parent;
            self.rebalance_node(node_id);
            current = parent;
        }
    }
}

impl<T: Ord> BalancedTree<T> {
    /// Creates an empty tree.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self {
            tree: OrderedTree::new(),
        }
    }

    /// Creates a tree holding a single item at its root.
    pub fn with_item(item: T) -> Self {
        Self {
            tree: OrderedTree::with_item(item),
        }
    }

    /// Returns the height of the node holding `item`, or 0 if the item is not in the tree.
    pub fn height_of(&self, item: &T) -> usize {
        self.tree.height_of(item)
    }

    /// Returns true if the tree contains the item.
    pub fn contains(&self, item: &T) -> bool {
        self.tree.contains(item)
    }

    /// Returns a reference to the item in the tree that is equal to the given item.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.tree.get(item)
    }

    /// Inserts an item, rotating at most once to restore balance.
    /// Returns false and leaves the tree untouched if an equal item is already present.
    pub fn insert(&mut self, item: T) -> bool {
        let raw = &mut self.tree.raw;
        match raw.attach(item) {
            Some(node_id) => {
                let parent = raw.arena[node_id].parent;
                raw.rebalance_once(parent);
                true
            }
            None => false,
        }
    }

    /// Removes an item from the tree and restores balance along the path to the root.
    /// Returns whether the item was previously in the tree.
    pub fn remove(&mut self, item: &T) -> bool {
        let raw = &mut self.tree.raw;
        if let Some(node_id) = raw.find(item) {
            let rebalance_from = raw.unlink(node_id);
            raw.rebalance(rebalance_from);
            return true;
        }
        false
    }

    /// Returns the items held by the children of the parent's sibling of the node holding
    /// `item`, left before right.
    pub fn cousins_of(&self, item: &T) -> Vec<&T> {
        self.tree.cousins_of(item)
    }

    /// Clears the tree and fills it from sorted `items` at minimum height.
    /// Returns false and leaves the tree untouched if `items` is empty.
    ///
    /// A minimum height tree always satisfies the AVL condition.
    pub fn rebuild_from_sorted<I: IntoIterator<Item = T>>(&mut self, items: I) -> bool {
        self.tree.rebuild_from_sorted(items)
    }

    /// Like [`rebuild_from_sorted`], but rejects input that is not strictly ascending.
    ///
    /// [`rebuild_from_sorted`]: BalancedTree::rebuild_from_sorted
    pub fn try_rebuild_from_sorted<I: IntoIterator<Item = T>>(
        &mut self,
        items: I,
    ) -> Result<bool, TreeError> {
        self.tree.try_rebuild_from_sorted(items)
    }

    /// Rebuilds the tree at minimum height from its own items.
    /// Returns false if the tree is empty.
    pub fn rebalance(&mut self) -> bool {
        self.tree.rebalance()
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.raw.check_consistency(true)
    }
}

impl<T> BalancedTree<T> {
    /// Returns true if the tree contains no items.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of items in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the item at the root of the tree.
    pub fn root(&self) -> Option<&T> {
        self.tree.root()
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Calls `visit` on every item in ascending order.
    /// The visitor may modify items in place but must keep their relative order.
    pub fn traverse<F: FnMut(&mut T)>(&mut self, visit: F) {
        self.tree.traverse(visit);
    }

    /// Gets an iterator over the items of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }
}

impl<T: Ord> SearchTree<T> for BalancedTree<T> {
    fn is_empty(&self) -> bool {
        BalancedTree::is_empty(self)
    }

    fn len(&self) -> usize {
        BalancedTree::len(self)
    }

    fn height(&self) -> usize {
        BalancedTree::height(self)
    }

    fn height_of(&self, item: &T) -> usize {
        BalancedTree::height_of(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        BalancedTree::contains(self, item)
    }

    fn insert(&mut self, item: T) -> bool {
        BalancedTree::insert(self, item)
    }

    fn remove(&mut self, item: &T) -> bool {
        BalancedTree::remove(self, item)
    }

    fn clear(&mut self) {
        BalancedTree::clear(self)
    }

    fn traverse<F: FnMut(&mut T)>(&mut self, visit: F) {
        BalancedTree::traverse(self, visit)
    }

    fn cousins_of(&self, item: &T) -> Vec<&T> {
        BalancedTree::cousins_of(self, item)
    }

    fn rebuild_from_sorted<I: IntoIterator<Item = T>>(&mut self, items: I) -> bool {
        BalancedTree::rebuild_from_sorted(self, items)
    }

    fn rebalance(&mut self) -> bool {
        BalancedTree::rebalance(self)
    }
}

impl<T: Ord> Default for BalancedTree<T> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<T> for BalancedTree<T> {
    fn from(item: T) -> Self {
        Self::with_item(item)
    }
}

impl<T> From<BalancedTree<T>> for OrderedTree<T> {
    /// Keeps the shape; later inserts into the result no longer rebalance.
    fn from(tree: BalancedTree<T>) -> Self {
        tree.tree
    }
}

/// Structural equality, see [`OrderedTree`].
impl<T: PartialEq> PartialEq for BalancedTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq> Eq for BalancedTree<T> {}

impl<T: Ord> FromIterator<T> for BalancedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for item in iter {
            tree.insert(item);
        }
        tree
    }
}

impl<T: Ord> Extend<T> for BalancedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |item| {
            self.insert(item);
        });
    }
}

impl<T: fmt::Debug> fmt::Debug for BalancedTree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a BalancedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
