//! Last known positions per node
//!
//! The cache is tagged with the tree revision and viewport it was computed
//! for. Any push or pop bumps the revision, so a structural change makes the
//! whole cache stale at once.

use crate::tree::{CallTree, NodeId};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedPosition {
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    entries: FxHashMap<NodeId, CachedPosition>,
    revision: Option<u64>,
    viewport: Option<(f64, f64)>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cached layout was computed for this exact tree state and viewport
    pub fn is_valid_for(&self, tree: &CallTree, viewport: (f64, f64)) -> bool {
        !self.entries.is_empty()
            && self.revision == Some(tree.revision())
            && self.viewport == Some(viewport)
    }

    pub fn viewport(&self) -> Option<(f64, f64)> {
        self.viewport
    }

    /// Replace the cache with every node's current position
    pub fn store_all(&mut self, tree: &CallTree, viewport: (f64, f64)) {
        self.entries.clear();
        self.entries.extend(tree.nodes().map(|n| {
            (
                n.id,
                CachedPosition {
                    x: n.x,
                    y: n.y,
                    target_x: n.target_x,
                },
            )
        }));
        self.revision = Some(tree.revision());
        self.viewport = Some(viewport);
    }

    /// Refresh only the given nodes; the tag stays as it was
    pub fn store_some<'a>(&mut self, tree: &CallTree, ids: impl IntoIterator<Item = &'a NodeId>) {
        for id in ids {
            if let Some(n) = tree.node(*id) {
                self.entries.insert(
                    n.id,
                    CachedPosition {
                        x: n.x,
                        y: n.y,
                        target_x: n.target_x,
                    },
                );
            }
        }
    }

    /// Copy cached positions back onto the tree. Returns how many nodes were restored.
    pub fn restore(&self, tree: &mut CallTree) -> usize {
        let mut restored = 0;
        for (id, pos) in &self.entries {
            if let Some(node) = tree.node_mut(*id) {
                node.x = pos.x;
                node.y = pos.y;
                node.target_x = pos.target_x;
                restored += 1;
            }
        }
        restored
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.revision = None;
        self.viewport = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_makes_cache_stale() {
        let mut tree = CallTree::new();
        tree.push("a");
        let mut cache = LayoutCache::new();
        cache.store_all(&tree, (800.0, 600.0));
        assert!(cache.is_valid_for(&tree, (800.0, 600.0)));
        assert!(!cache.is_valid_for(&tree, (640.0, 600.0)));

        tree.push("b");
        assert!(!cache.is_valid_for(&tree, (800.0, 600.0)));
    }

    #[test]
    fn test_restore_overwrites_positions() {
        let mut tree = CallTree::new();
        let id = tree.push("a");
        tree.node_mut(id).unwrap().x = 120.0;
        let mut cache = LayoutCache::new();
        cache.store_all(&tree, (800.0, 600.0));

        tree.node_mut(id).unwrap().x = 5.0;
        assert_eq!(cache.restore(&mut tree), 1);
        assert_eq!(tree.node(id).unwrap().x, 120.0);
    }

    #[test]
    fn test_invalidate_clears_tag() {
        let mut tree = CallTree::new();
        tree.push("a");
        let mut cache = LayoutCache::new();
        cache.store_all(&tree, (800.0, 600.0));
        cache.invalidate();
        assert!(cache.is_empty());
        assert_eq!(cache.viewport(), None);
        assert!(!cache.is_valid_for(&tree, (800.0, 600.0)));
    }
}
