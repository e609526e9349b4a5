//! An ordered set implemented with a plain binary search tree.

use std::fmt;
use std::iter::FromIterator;

use crate::error::{check_sorted, TreeError};
use crate::raw::{Iter, RawTree};
use crate::tree::SearchTree;

/// An ordered set implemented with an unbalanced binary search tree.
///
/// The shape of the tree follows the order of insertion. Use [`rebalance`] to bring it
/// down to minimum height, or [`BalancedTree`] to keep it balanced on every insert.
///
/// ```
/// use ordtree::OrderedTree;
/// let mut tree = OrderedTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
/// assert!(tree.contains(&1));
/// assert!(!tree.insert(1));
/// tree.remove(&1);
/// assert!(!tree.contains(&1));
/// ```
///
/// [`rebalance`]: OrderedTree::rebalance
/// [`BalancedTree`]: crate::BalancedTree
#[derive(Clone)]
pub struct OrderedTree<T> {
    pub(crate) raw: RawTree<T>,
}

impl<T: Ord> OrderedTree<T> {
    /// Creates an empty tree.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self { raw: RawTree::new() }
    }

    /// Creates a tree holding a single item at its root.
    pub fn with_item(item: T) -> Self {
        let mut tree = Self::new();
        tree.insert(item);
        tree
    }

    /// Returns the height of the node holding `item`, i.e. the number of nodes on the longest
    /// path from it down to a leaf. Returns 0 if the item is not in the tree.
    pub fn height_of(&self, item: &T) -> usize {
        self.raw.height_of(item)
    }

    /// Returns true if the tree contains the item.
    pub fn contains(&self, item: &T) -> bool {
        self.raw.find(item).is_some()
    }

    /// Returns a reference to the item in the tree that is equal to the given item.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.raw.find(item).map(|node_id| &self.raw.arena[node_id].item)
    }

    /// Inserts an item as a new leaf.
    /// Returns false and leaves the tree untouched if an equal item is already present.
    pub fn insert(&mut self, item: T) -> bool {
        match self.raw.attach(item) {
            Some(node_id) => {
                let parent = self.raw.arena[node_id].parent;
                self.raw.retrace_heights(parent);
                true
            }
            None => false,
        }
    }

    /// Removes an item from the tree.
    /// Returns whether the item was previously in the tree.
    ///
    /// If the node holding the item has two children, it takes over the item of its in-order
    /// successor and the successor's node is removed instead.
    pub fn remove(&mut self, item: &T) -> bool {
        if let Some(node_id) = self.raw.find(item) {
            let retrace_from = self.raw.unlink(node_id);
            self.raw.retrace_heights(retrace_from);
            debug_assert!(!self.contains(item));
            return true;
        }
        false
    }

    /// Returns the items held by the children of the parent's sibling of the node holding
    /// `item`, left before right.
    ///
    /// The result is empty if the item is missing or its node has no grandparent.
    pub fn cousins_of(&self, item: &T) -> Vec<&T> {
        self.raw.cousins_of(item)
    }

    /// Clears the tree and fills it from `items`, choosing the middle item of every range as
    /// subtree root. The resulting tree has the minimum height possible for its size.
    ///
    /// `items` must be sorted ascending without duplicates. This is only checked in debug
    /// builds; see [`try_rebuild_from_sorted`] for a checked version.
    /// Returns false and leaves the tree untouched if `items` is empty.
    ///
    /// [`try_rebuild_from_sorted`]: OrderedTree::try_rebuild_from_sorted
    pub fn rebuild_from_sorted<I: IntoIterator<Item = T>>(&mut self, items: I) -> bool {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return false;
        }
        debug_assert!(check_sorted(&items).is_ok(), "bulk load input is not sorted");
        self.raw.build_from_sorted(items);
        true
    }

    /// Like [`rebuild_from_sorted`], but rejects input that is not strictly ascending.
    /// The tree is left untouched on error.
    ///
    /// [`rebuild_from_sorted`]: OrderedTree::rebuild_from_sorted
    pub fn try_rebuild_from_sorted<I: IntoIterator<Item = T>>(
        &mut self,
        items: I,
    ) -> Result<bool, TreeError> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Ok(false);
        }
        check_sorted(&items)?;
        self.raw.build_from_sorted(items);
        Ok(true)
    }

    /// Rebuilds the tree at minimum height from its own items.
    /// Returns false if the tree is empty.
    pub fn rebalance(&mut self) -> bool {
        if self.raw.is_empty() {
            return false;
        }
        let items = self.raw.drain_sorted();
        self.raw.build_from_sorted(items);
        true
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.raw.check_consistency(false)
    }
}

impl<T> OrderedTree<T> {
    /// Returns true if the tree contains no items.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of items in the tree.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the item at the root of the tree.
    pub fn root(&self) -> Option<&T> {
        self.raw.root_item()
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Calls `visit` on every item in ascending order.
    ///
    /// The visitor may modify items in place. It is up to the caller to keep the relative
    /// order of the items intact.
    pub fn traverse<F: FnMut(&mut T)>(&mut self, visit: F) {
        self.raw.traverse_mut(visit);
    }

    /// Gets an iterator over the items of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.raw.iter()
    }
}

impl<T: Ord> SearchTree<T> for OrderedTree<T> {
    fn is_empty(&self) -> bool {
        OrderedTree::is_empty(self)
    }

    fn len(&self) -> usize {
        OrderedTree::len(self)
    }

    fn height(&self) -> usize {
        OrderedTree::height(self)
    }

    fn height_of(&self, item: &T) -> usize {
        OrderedTree::height_of(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        OrderedTree::contains(self, item)
    }

    fn insert(&mut self, item: T) -> bool {
        OrderedTree::insert(self, item)
    }

    fn remove(&mut self, item: &T) -> bool {
        OrderedTree::remove(self, item)
    }

    fn clear(&mut self) {
        OrderedTree::clear(self)
    }

    fn traverse<F: FnMut(&mut T)>(&mut self, visit: F) {
        OrderedTree::traverse(self, visit)
    }

    fn cousins_of(&self, item: &T) -> Vec<&T> {
        OrderedTree::cousins_of(self, item)
    }

    fn rebuild_from_sorted<I: IntoIterator<Item = T>>(&mut self, items: I) -> bool {
        OrderedTree::rebuild_from_sorted(self, items)
    }

    fn rebalance(&mut self) -> bool {
        OrderedTree::rebalance(self)
    }
}

impl<T: Ord> Default for OrderedTree<T> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<T> for OrderedTree<T> {
    fn from(item: T) -> Self {
        Self::with_item(item)
    }
}

/// Trees are equal if they have the same shape and hold equal items at the same positions.
/// Two trees holding the same set of items in different shapes compare unequal.
impl<T: PartialEq> PartialEq for OrderedTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.structurally_equal(&other.raw)
    }
}

impl<T: Eq> Eq for OrderedTree<T> {}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for item in iter {
            tree.insert(item);
        }
        tree
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |item| {
            self.insert(item);
        });
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
