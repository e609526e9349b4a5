/// Operations shared by [`OrderedTree`] and [`BalancedTree`].
///
/// Equality is structural: two trees are equal if they have the same shape and hold equal
/// items at the same positions.
///
/// ```
/// use ordtree::{BalancedTree, OrderedTree, SearchTree};
///
/// fn fill<S: SearchTree<i32> + Default>(items: &[i32]) -> S {
///     let mut tree = S::default();
///     for item in items {
///         tree.insert(*item);
///     }
///     tree
/// }
///
/// let plain: OrderedTree<i32> = fill(&[1, 2, 3]);
/// let balanced: BalancedTree<i32> = fill(&[1, 2, 3]);
/// assert_eq!(plain.height(), 3);
/// assert_eq!(balanced.height(), 2);
/// ```
///
/// [`OrderedTree`]: crate::OrderedTree
/// [`BalancedTree`]: crate::BalancedTree
pub trait SearchTree<T: Ord>: PartialEq {
    /// Returns true if the tree contains no items.
    fn is_empty(&self) -> bool;

    /// Returns the number of items in the tree.
    fn len(&self) -> usize;

    /// Returns the number of nodes on the longest path from the root to a leaf, 0 if empty.
    fn height(&self) -> usize;

    /// Returns the height of the node holding `item`, 0 if the item is missing.
    fn height_of(&self, item: &T) -> usize;

    /// Returns true if the tree contains the item.
    fn contains(&self, item: &T) -> bool;

    /// Inserts an item. Returns false if an equal item was already present.
    fn insert(&mut self, item: T) -> bool;

    /// Removes an item. Returns false if the item was not present.
    fn remove(&mut self, item: &T) -> bool;

    /// Removes all items.
    fn clear(&mut self);

    /// Calls `visit` on every item in ascending order.
    fn traverse<F: FnMut(&mut T)>(&mut self, visit: F);

    /// Returns the items of the children of the parent's sibling of the node holding `item`.
    fn cousins_of(&self, item: &T) -> Vec<&T>;

    /// Replaces the contents with sorted `items` at minimum height.
    /// Returns false and does nothing if `items` is empty.
    fn rebuild_from_sorted<I: IntoIterator<Item = T>>(&mut self, items: I) -> bool;

    /// Rebuilds the tree at minimum height. Returns false if the tree is empty.
    fn rebalance(&mut self) -> bool;
}
