//! The shape graph: owner of every shape and line in the document.

use crate::shapes::{Anchor, Line, Shape, ShapeId, TextMetrics};
use kurbo::Point;
use std::collections::BTreeMap;

/// Structural change recorded by the graph, drained by the editor on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphChange {
    Added(ShapeId),
    Removed(ShapeId),
    Updated(ShapeId),
    /// The whole content was swapped (load, undo of load).
    Replaced,
}

/// A connection point found near the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionHit {
    pub shape_id: ShapeId,
    pub anchor: Anchor,
    pub point: Point,
}

/// Shapes keyed by id. Ids are allocated in increasing order, so key order is
/// creation order and the last match in iteration is the topmost shape.
#[derive(Debug, Clone, Default)]
pub struct ShapeGraph {
    shapes: BTreeMap<ShapeId, Shape>,
    /// Last id handed out by [`ShapeGraph::generate_id`].
    last_allocated: ShapeId,
    /// Highest id ever inserted, including ids since removed.
    highest_seen: ShapeId,
    metrics: TextMetrics,
    changes: Vec<GraphChange>,
    revision: u64,
}

impl ShapeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: TextMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    /// Text metrics used to lay out captions.
    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Insert a shape. An existing shape with the same id is replaced.
    pub fn add(&mut self, shape: Shape) {
        let id = shape.id();
        self.highest_seen = self.highest_seen.max(id);
        self.shapes.insert(id, shape);
        self.record(GraphChange::Added(id));
    }

    /// Remove a shape. Unknown ids are ignored.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id);
        match removed {
            Some(_) => self.record(GraphChange::Removed(id)),
            None => log::debug!("remove: no shape with id {}", id),
        }
        removed
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Mutate a shape in place and record an `Updated` change.
    ///
    /// Returns `None` without calling `f` when the id is unknown.
    pub fn update<R>(
        &mut self,
        id: ShapeId,
        f: impl FnOnce(&mut Shape, &TextMetrics) -> R,
    ) -> Option<R> {
        let shape = self.shapes.get_mut(&id)?;
        let result = f(shape, &self.metrics);
        self.record(GraphChange::Updated(id));
        Some(result)
    }

    /// Mutate a line in place. Non-line ids are treated as unknown.
    pub fn update_line<R>(
        &mut self,
        id: ShapeId,
        f: impl FnOnce(&mut Line, &TextMetrics) -> R,
    ) -> Option<R> {
        let line = self.shapes.get_mut(&id)?.as_line_mut()?;
        let result = f(line, &self.metrics);
        self.record(GraphChange::Updated(id));
        Some(result)
    }

    /// The most recently added non-line shape whose box contains `point`.
    pub fn find_topmost_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .values()
            .rev()
            .find(|shape| shape.contains(point))
            .map(Shape::id)
    }

    pub fn all_ids_ordered_by_creation(&self) -> Vec<ShapeId> {
        self.shapes.keys().copied().collect()
    }

    /// Shapes in creation order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Allocate a fresh id, greater than any id allocated, inserted or loaded.
    pub fn generate_id(&mut self) -> ShapeId {
        let max_current = self.shapes.keys().next_back().copied().unwrap_or(0);
        let next = self
            .last_allocated
            .max(self.highest_seen)
            .max(max_current)
            + 1;
        self.last_allocated = next;
        next
    }

    /// Swap the entire content for `shapes`.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.shapes.clear();
        for shape in shapes {
            let id = shape.id();
            self.highest_seen = self.highest_seen.max(id);
            self.shapes.insert(id, shape);
        }
        self.record(GraphChange::Replaced);
    }

    /// Deep copy of every shape in creation order.
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.values().cloned().collect()
    }

    /// Ids of every line with an end attached to `id`.
    pub fn lines_connected_to(&self, id: ShapeId) -> Vec<ShapeId> {
        self.shapes
            .values()
            .filter_map(Shape::as_line)
            .filter(|line| line.connects(id))
            .map(|line| line.id)
            .collect()
    }

    /// Nearest connection point within `tolerance` on any non-line shape
    /// other than `exclude`. Ties go to the more recently added shape.
    pub fn connection_point_near(
        &self,
        point: Point,
        tolerance: f64,
        exclude: Option<ShapeId>,
    ) -> Option<ConnectionHit> {
        let mut best: Option<(f64, ConnectionHit)> = None;
        for shape in self.shapes.values() {
            if Some(shape.id()) == exclude {
                continue;
            }
            let Some((anchor, p)) = shape.nearest_connection_point(point, tolerance) else {
                continue;
            };
            let dist = p.distance(point);
            if best.as_ref().is_none_or(|(d, _)| dist <= *d) {
                best = Some((
                    dist,
                    ConnectionHit {
                        shape_id: shape.id(),
                        anchor,
                        point: p,
                    },
                ));
            }
        }
        best.map(|(_, hit)| hit)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Counter bumped on every recorded change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take the pending change notifications.
    pub fn drain_changes(&mut self) -> Vec<GraphChange> {
        std::mem::take(&mut self.changes)
    }

    fn record(&mut self, change: GraphChange) {
        self.revision += 1;
        self.changes.push(change);
    }
}
