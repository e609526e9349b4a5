use std::ops::{Index, IndexMut};

/// Handle of a node slot inside an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

pub(crate) type Link = Option<NodeId>;

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
    pub(crate) height: usize,
}

impl<T> Node<T> {
    fn leaf(parent: Link, item: T) -> Self {
        Self {
            item,
            left: None,
            right: None,
            parent,
            height: 1,
        }
    }
}

/// Slot storage for tree nodes.
/// Vacant slots are kept on a LIFO free list and handed out again before the slot vector grows.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free_list: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub(crate) fn create(&mut self, parent: Link, item: T) -> NodeId {
        let node = Node::leaf(parent, item);
        match self.free_list.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.0].is_none());
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Releases the slot and hands back the item it held.
    /// The caller must already have unlinked the node from its neighbours.
    pub(crate) fn destroy(&mut self, id: NodeId) -> T {
        let node = self.slots[id.0].take();
        debug_assert!(node.is_some(), "double free of {:?}", id);
        self.free_list.push(id);
        match node {
            Some(node) => node.item,
            None => unreachable!("node slot {} is vacant", id.0),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("node slot {} is vacant", id.0),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("node slot {} is vacant", id.0),
        }
    }
}
