//! Call tree model
//!
//! This module provides the structure the driver loop builds while an
//! algorithm runs:
//! - [`node`]: A single call with its position on screen
//! - [`CallTree`]: The forest of calls, the open-call stack, and dirty tracking
//!
//! # Mutation
//!
//! [`CallTree::push`] and [`CallTree::pop`] are the only structural mutators.
//! Both record the touched nodes in the dirty set and bump the tree's
//! revision, which the layout engine compares against its cache.
//!
//! The open-call stack is always a root-to-leaf chain: every entry's parent is
//! the entry below it, and the bottom entry is a root.

pub mod node;

pub use node::{Node, NodeId};

use rustc_hash::{FxHashMap, FxHashSet};

/// The call tree of one simulation run
#[derive(Debug, Clone, Default)]
pub struct CallTree {
    nodes: FxHashMap<NodeId, Node>,
    stack: Vec<NodeId>,
    next_id: NodeId,
    dirty: FxHashSet<NodeId>,
    revision: u64,
}

impl CallTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new call as a child of the current stack top (or as a new root)
    pub fn push(&mut self, label: impl Into<String>) -> NodeId {
        let parent = self.stack.last().copied();
        let depth = parent
            .and_then(|pid| self.nodes.get(&pid))
            .map_or(0, |p| p.depth + 1);

        let id = self.next_id;
        self.next_id += 1;

        self.nodes.insert(id, Node::new(id, label.into(), parent, depth));
        if let Some(pid) = parent {
            if let Some(p) = self.nodes.get_mut(&pid) {
                p.children.push(id);
            }
            self.dirty.insert(pid);
        }

        self.dirty.insert(id);
        self.stack.push(id);
        self.revision += 1;
        id
    }

    /// Close the most recent open call.
    ///
    /// Returns `None` without touching anything when no call is open.
    pub fn pop(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let parent = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.done = true;
                node.parent
            }
            None => None,
        };

        self.dirty.insert(id);
        if let Some(pid) = parent {
            self.dirty.insert(pid);
        }
        self.revision += 1;
        Some(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// All nodes in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// All nodes ordered by id (creation order)
    pub fn nodes_by_id(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by_key(|n| n.id);
        nodes
    }

    /// Parent → child edges
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .values()
            .filter_map(|n| n.parent.map(|pid| (pid, n.id)))
    }

    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|n| n.is_root())
            .map(|n| n.id)
            .collect();
        roots.sort_unstable();
        roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Open calls, bottom (root) first
    pub fn stack(&self) -> &[NodeId] {
        &self.stack
    }

    /// The innermost open call
    pub fn top(&self) -> Option<&Node> {
        self.stack.last().and_then(|id| self.nodes.get(id))
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.nodes.values().map(|n| n.depth).max()
    }

    /// Node ids touched since the last layout pass
    pub fn dirty(&self) -> &FxHashSet<NodeId> {
        &self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Structural revision, bumped by every push and pop
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn take_dirty(&mut self) -> FxHashSet<NodeId> {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self, id: NodeId) {
        if self.nodes.contains_key(&id) {
            self.dirty.insert(id);
        }
    }

    pub(crate) fn mark_all_dirty(&mut self) {
        self.dirty.extend(self.nodes.keys().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_creates_root_then_children() {
        let mut tree = CallTree::new();
        let root = tree.push("f(2)");
        let a = tree.push("f(1)");
        tree.pop();
        let b = tree.push("f(0)");

        let root_node = tree.node(root).unwrap();
        assert!(root_node.is_root());
        assert_eq!(root_node.depth, 0);
        assert_eq!(root_node.children, vec![a, b]);
        assert_eq!(tree.node(b).unwrap().parent, Some(root));
        assert_eq!(tree.node(b).unwrap().depth, 1);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut tree = CallTree::new();
        let ids: Vec<NodeId> = (0..5)
            .map(|i| {
                let id = tree.push(format!("n{}", i));
                tree.pop();
                id
            })
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pop_on_empty_stack() {
        let mut tree = CallTree::new();
        assert_eq!(tree.pop(), None);
        assert!(tree.dirty().is_empty());
        assert_eq!(tree.revision(), 0);
    }

    #[test]
    fn test_push_and_pop_mark_node_and_parent_dirty() {
        let mut tree = CallTree::new();
        let root = tree.push("a");
        tree.take_dirty();

        let child = tree.push("b");
        assert!(tree.dirty().contains(&root));
        assert!(tree.dirty().contains(&child));

        tree.take_dirty();
        assert_eq!(tree.pop(), Some(child));
        assert!(tree.node(child).unwrap().done);
        assert!(tree.dirty().contains(&root));
        assert!(tree.dirty().contains(&child));
    }

    #[test]
    fn test_stack_is_root_to_leaf_chain() {
        let mut tree = CallTree::new();
        tree.push("a");
        tree.push("b");
        tree.pop();
        tree.push("c");
        tree.push("d");

        let stack = tree.stack();
        assert!(tree.node(stack[0]).unwrap().parent.is_none());
        for pair in stack.windows(2) {
            assert_eq!(tree.node(pair[1]).unwrap().parent, Some(pair[0]));
        }
        assert_eq!(tree.top().unwrap().label, "d");
    }

    #[test]
    fn test_second_root_after_stack_empties() {
        let mut tree = CallTree::new();
        tree.push("first");
        tree.pop();
        tree.push("second");
        assert_eq!(tree.roots().len(), 2);
    }
}
