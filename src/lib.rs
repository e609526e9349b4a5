//! Ordered sets backed by binary search trees.
//!
//! [`OrderedTree`] is a plain binary search tree whose shape follows the order of insertion.
//! It can be rebuilt at minimum height from sorted data or from its own items.
//! [`BalancedTree`] keeps the AVL condition on every insert and removal.
//!
//! Both trees store their nodes in an arena and link them by index, including the parent
//! link used to walk back up after a mutation.

mod balanced;
mod error;
mod node;
mod ordered;
mod raw;
mod tree;

pub use balanced::BalancedTree;
pub use error::TreeError;
pub use ordered::OrderedTree;
pub use raw::Iter;
pub use tree::SearchTree;
