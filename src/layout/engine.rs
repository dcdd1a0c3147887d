// Frame-gated tree layout with easing, caching and a fallback placement

use super::cache::LayoutCache;
use super::errors::LayoutError;
use crate::config::Settings;
use crate::logging::Logger;
use crate::tree::{CallTree, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

/// Whether the engine can reuse its cached layout for the current tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// No usable cache: the next pass recomputes every slot
    Cold,
    /// Cache matches the tree revision: only touched nodes move
    Warm,
}

/// What a call to [`LayoutEngine::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing dirty and nothing cached
    Idle,
    /// Nothing dirty; cached positions were reused
    CacheHit,
    /// Dirty nodes are pending but the frame interval has not elapsed
    Throttled,
    /// Positions were recomputed for `touched` nodes
    Recomputed { state: LayoutState, touched: usize },
    /// Recomputation faulted and the fallback placement was applied
    Fallback,
}

#[derive(Debug, Clone, Copy)]
struct Geometry {
    width: f64,
    height: f64,
    margin: f64,
}

impl Geometry {
    fn available_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    fn available_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    fn clamp_x(&self, x: f64) -> f64 {
        x.clamp(self.margin, self.width - self.margin)
    }

    fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(self.margin, self.height - self.margin)
    }
}

/// Maps the call tree onto animated 2D positions inside a viewport
pub struct LayoutEngine {
    settings: Settings,
    cache: LayoutCache,
    /// Nodes that have received a position at least once
    placed: FxHashSet<NodeId>,
    last_update: Option<Instant>,
    last_fault: Option<LayoutError>,
    /// Suppresses repeated cache-hit logs while the tree is idle
    hit_logged: bool,
    logger: Rc<dyn Logger>,
}

impl LayoutEngine {
    pub fn new(settings: Settings, logger: Rc<dyn Logger>) -> Self {
        LayoutEngine {
            settings,
            cache: LayoutCache::new(),
            placed: FxHashSet::default(),
            last_update: None,
            last_fault: None,
            hit_logged: false,
            logger,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// `Warm` when the cached layout belongs to this tree's current revision
    pub fn state(&self, tree: &CallTree) -> LayoutState {
        match self.cache.viewport() {
            Some(viewport) if self.cache.is_valid_for(tree, viewport) => LayoutState::Warm,
            _ => LayoutState::Cold,
        }
    }

    /// Forget everything about the previous tree
    pub fn reset(&mut self) {
        self.cache.invalidate();
        self.placed.clear();
        self.last_update = None;
        self.last_fault = None;
        self.hit_logged = false;
    }

    pub fn update(&mut self, tree: &mut CallTree, width: f64, height: f64) -> UpdateOutcome {
        self.update_at(tree, width, height, Instant::now())
    }

    /// [`update`](Self::update) with an explicit clock reading
    pub fn update_at(
        &mut self,
        tree: &mut CallTree,
        width: f64,
        height: f64,
        now: Instant,
    ) -> UpdateOutcome {
        let viewport = (width, height);

        if self.cache.viewport().is_some_and(|v| v != viewport) {
            self.logger
                .debug(&format!("viewport changed to {}x{}", width, height));
            self.cache.invalidate();
            tree.mark_all_dirty();
        }

        if !tree.is_dirty() {
            if self.cache.is_valid_for(tree, viewport) {
                let restored = self.cache.restore(tree);
                if !self.hit_logged {
                    self.logger.cache_status(true, restored);
                    self.hit_logged = true;
                }
                return UpdateOutcome::CacheHit;
            }
            return UpdateOutcome::Idle;
        }

        if let Some(last) = self.last_update {
            if now.saturating_duration_since(last) < self.settings.frame_interval {
                return UpdateOutcome::Throttled;
            }
        }
        self.last_update = Some(now);

        let started = Instant::now();
        let state = if self.cache.is_valid_for(tree, viewport) {
            LayoutState::Warm
        } else {
            self.logger.cache_status(false, self.cache.len());
            LayoutState::Cold
        };

        let dirty = tree.take_dirty();
        let result = match state {
            LayoutState::Cold => self.layout_cold(tree, width, height, &dirty),
            LayoutState::Warm => self.layout_warm(tree, width, height, &dirty),
        };

        match result {
            Ok(touched) => {
                match state {
                    LayoutState::Cold => self.cache.store_all(tree, viewport),
                    LayoutState::Warm => self.cache.store_some(tree, &touched),
                }
                self.last_fault = None;
                self.hit_logged = false;
                self.logger.performance("layout update", started.elapsed());
                self.logger.layout_update(tree.len(), dirty.len());
                UpdateOutcome::Recomputed {
                    state,
                    touched: touched.len(),
                }
            }
            Err(err) => {
                if self.last_fault.as_ref() == Some(&err) {
                    self.logger.debug(&format!("layout still failing: {}", err));
                } else {
                    self.logger
                        .error(&format!("layout update failed: {}", err));
                }
                self.last_fault = Some(err);
                self.cache.invalidate();
                self.apply_fallback(tree, width, height);
                // retry on the next frame
                for id in dirty {
                    tree.mark_dirty(id);
                }
                UpdateOutcome::Fallback
            }
        }
    }

    fn geometry(&self, width: f64, height: f64) -> Result<Geometry, LayoutError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(LayoutError::InvalidViewport { width, height });
        }
        let margin = self.settings.margin();
        if width <= 2.0 * margin || height <= 2.0 * margin {
            return Err(LayoutError::ViewportTooSmall {
                width,
                height,
                margin,
            });
        }
        Ok(Geometry {
            width,
            height,
            margin,
        })
    }

    /// Full pass: recompute level heights and equal-width slots for every level
    fn layout_cold(
        &mut self,
        tree: &mut CallTree,
        width: f64,
        height: f64,
        dirty: &FxHashSet<NodeId>,
    ) -> Result<Vec<NodeId>, LayoutError> {
        let geo = self.geometry(width, height)?;
        if tree.is_empty() {
            return Err(LayoutError::EmptyTree);
        }
        check_consistency(tree)?;

        let mut levels: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for node in tree.nodes() {
            levels.entry(node.depth).or_default().push(node.id);
        }
        let max_depth = levels.keys().next_back().copied().unwrap_or(0);
        let level_spacing = geo.available_height() / (max_depth + 1) as f64;

        let mut working: FxHashSet<NodeId> = dirty
            .iter()
            .copied()
            .filter(|id| tree.node(*id).is_some())
            .collect();
        let mut slots: FxHashMap<NodeId, f64> = FxHashMap::default();

        for (depth, ids) in levels.iter_mut() {
            // id order approximates left-to-right call order
            ids.sort_unstable();
            let count = ids.len() as f64;
            let spacing =
                (geo.available_width() / count).min(self.settings.min_node_distance * 2.0);
            let start = (width - spacing * count) / 2.0 + spacing / 2.0;
            let y = geo.clamp_y(geo.margin + *depth as f64 * level_spacing);

            for (i, id) in ids.iter().enumerate() {
                let slot = start + i as f64 * spacing;
                slots.insert(*id, slot);
                let fresh = !self.placed.contains(id);
                if let Some(node) = tree.node_mut(*id) {
                    node.y = y;
                    if fresh || (node.target_x - slot).abs() > f64::EPSILON {
                        working.insert(*id);
                    }
                }
            }
        }

        self.settle(tree, &geo, working, Some(&slots))
    }

    /// Incremental pass: keep existing targets, ease only the dirty nodes
    fn layout_warm(
        &mut self,
        tree: &mut CallTree,
        width: f64,
        height: f64,
        dirty: &FxHashSet<NodeId>,
    ) -> Result<Vec<NodeId>, LayoutError> {
        let geo = self.geometry(width, height)?;
        let working = dirty
            .iter()
            .copied()
            .filter(|id| tree.node(*id).is_some())
            .collect();
        self.settle(tree, &geo, working, None)
    }

    /// Assign targets, recenter parents and ease every working node one frame.
    ///
    /// Nodes still short of their target are marked dirty again.
    fn settle(
        &mut self,
        tree: &mut CallTree,
        geo: &Geometry,
        mut working: FxHashSet<NodeId>,
        slots: Option<&FxHashMap<NodeId, f64>>,
    ) -> Result<Vec<NodeId>, LayoutError> {
        // parents keep following children that are still moving
        let parents: Vec<NodeId> = working
            .iter()
            .filter_map(|id| tree.node(*id).and_then(|n| n.parent))
            .collect();
        for pid in parents {
            if tree.node(pid).is_some_and(|p| p.children.len() > 1) {
                working.insert(pid);
            }
        }

        // deepest first, so a parent averages this frame's child positions
        let mut order: Vec<(usize, NodeId)> = working
            .iter()
            .filter_map(|id| tree.node(*id).map(|n| (n.depth, n.id)))
            .collect();
        order.sort_unstable_by(|a, b| b.cmp(a));

        let smoothing = self.settings.smoothing_factor;
        let snap = self.settings.snap_threshold;
        let mut still_moving = Vec::new();
        let mut touched = Vec::with_capacity(order.len());

        for (_, id) in order {
            let node = tree.node(id).ok_or(LayoutError::MissingNode(id))?;

            let target = if node.children.len() > 1 {
                let mut sum = 0.0;
                for child in &node.children {
                    sum += tree.node(*child).ok_or(LayoutError::MissingNode(*child))?.x;
                }
                sum / node.children.len() as f64
            } else if let Some(slots) = slots {
                *slots.get(&id).ok_or(LayoutError::MissingNode(id))?
            } else {
                node.target_x
            };

            // new calls grow out of their parent
            let spawn = if self.placed.contains(&id) {
                None
            } else {
                Some(
                    node.parent
                        .filter(|pid| self.placed.contains(pid))
                        .and_then(|pid| tree.node(pid))
                        .map_or(target, |p| p.x),
                )
            };

            let node = tree.node_mut(id).ok_or(LayoutError::MissingNode(id))?;
            if let Some(x) = spawn {
                node.x = x;
            }
            let target = geo.clamp_x(target);
            node.target_x = target;

            let dx = target - node.x;
            node.x = if dx.abs() < snap {
                target
            } else {
                geo.clamp_x(node.x + dx * smoothing)
            };

            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(LayoutError::NonFinite { id });
            }
            if node.x != node.target_x {
                still_moving.push(id);
            }
            self.placed.insert(id);
            touched.push(id);
        }

        for id in still_moving {
            tree.mark_dirty(id);
        }
        Ok(touched)
    }

    /// Stack every node at the horizontal center, one fixed step per level
    fn apply_fallback(&mut self, tree: &mut CallTree, width: f64, height: f64) {
        let width = if width.is_finite() && width > 0.0 { width } else { 0.0 };
        let height = if height.is_finite() && height > 0.0 { height } else { 0.0 };
        let margin = self.settings.margin();
        let spacing = self.settings.fallback_spacing();

        for node in tree.nodes_mut() {
            node.x = width / 2.0;
            node.target_x = node.x;
            node.y = (margin + node.depth as f64 * spacing).clamp(0.0, height);
            self.placed.insert(node.id);
        }
    }
}

fn check_consistency(tree: &CallTree) -> Result<(), LayoutError> {
    for node in tree.nodes() {
        let expected = match node.parent {
            Some(pid) => tree.node(pid).ok_or(LayoutError::MissingNode(pid))?.depth + 1,
            None => 0,
        };
        if node.depth != expected {
            return Err(LayoutError::InconsistentDepth {
                id: node.id,
                depth: node.depth,
                expected,
            });
        }
        if let Some(missing) = node.children.iter().find(|c| tree.node(**c).is_none()) {
            return Err(LayoutError::MissingNode(*missing));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use std::time::Duration;

    fn engine() -> (LayoutEngine, Rc<MemoryLogger>) {
        let logger = Rc::new(MemoryLogger::new(100));
        (LayoutEngine::new(Settings::default(), logger.clone()), logger)
    }

    #[test]
    fn test_inconsistent_depth_is_detected() {
        let mut tree = CallTree::new();
        tree.push("a");
        let b = tree.push("b");
        tree.node_mut(b).unwrap().depth = 5;
        assert_eq!(
            check_consistency(&tree),
            Err(LayoutError::InconsistentDepth {
                id: b,
                depth: 5,
                expected: 1
            })
        );
    }

    #[test]
    fn test_inconsistent_tree_falls_back() {
        let (mut engine, logger) = engine();
        let mut tree = CallTree::new();
        tree.push("a");
        let b = tree.push("b");
        tree.node_mut(b).unwrap().depth = 3;

        let outcome = engine.update(&mut tree, 800.0, 600.0);
        assert_eq!(outcome, UpdateOutcome::Fallback);
        for node in tree.nodes() {
            assert_eq!(node.x, 400.0);
        }
        assert_eq!(tree.node(b).unwrap().y, 50.0 + 3.0 * 100.0);
        assert!(logger.contains(tracing::Level::ERROR, "expected 1"));
        assert!(tree.is_dirty());
    }

    #[test]
    fn test_repeated_fault_logs_error_once() {
        let (mut engine, logger) = engine();
        let mut tree = CallTree::new();
        tree.push("a");
        let t0 = Instant::now();
        engine.update_at(&mut tree, 60.0, 60.0, t0);
        engine.update_at(&mut tree, 60.0, 60.0, t0 + Duration::from_millis(20));
        let errors = logger
            .records()
            .iter()
            .filter(|r| r.level == tracing::Level::ERROR)
            .count();
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_child_spawns_at_parent_position() {
        let (mut engine, _) = engine();
        let mut tree = CallTree::new();
        let root = tree.push("root");
        let t0 = Instant::now();
        engine.update_at(&mut tree, 800.0, 600.0, t0);
        let root_x = tree.node(root).unwrap().x;

        let child = tree.push("child");
        engine.update_at(&mut tree, 800.0, 600.0, t0 + Duration::from_millis(20));
        // single child keeps the centered slot, so it starts where the parent is
        assert_eq!(tree.node(child).unwrap().x, root_x);
    }
}
