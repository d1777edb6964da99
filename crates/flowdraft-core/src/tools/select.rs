//! Select mode: hit testing, shape and caption drags, double-click to edit.

use super::{Gesture, Interaction};
use crate::commands::{EditCommand, MoveShape, MoveText};
use crate::graph::ShapeGraph;
use crate::shapes::{LineGeometry, ShapeId};
use kurbo::{Point, Vec2};
use std::time::Instant;

/// What a drag in Select mode is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Shape,
    Text,
}

/// A drag in progress. Positions are recorded at press time so the live
/// preview is always `origin + total delta`, never accumulated per sample.
#[derive(Debug, Clone)]
pub(super) struct Drag {
    pub(super) target: DragTarget,
    shape_id: ShapeId,
    pointer_origin: Point,
    position: Point,
    text_position: Point,
    connection_dot: Point,
    lines: Vec<(ShapeId, LineGeometry)>,
    /// Offset currently shown by the preview.
    total: Vec2,
}

impl Drag {
    fn begin(graph: &ShapeGraph, shape_id: ShapeId, target: DragTarget, pointer: Point) -> Option<Self> {
        let frame = graph.get(shape_id)?.frame();
        let lines = match target {
            DragTarget::Shape => graph
                .lines_connected_to(shape_id)
                .into_iter()
                .filter_map(|id| Some((id, graph.get(id)?.as_line()?.geometry())))
                .collect(),
            DragTarget::Text => Vec::new(),
        };
        Some(Self {
            target,
            shape_id,
            pointer_origin: pointer,
            position: frame.position,
            text_position: frame.text_position,
            connection_dot: frame.connection_dot,
            lines,
            total: Vec2::ZERO,
        })
    }

    /// Show the drag at `total` offset from where it started.
    fn preview(&self, graph: &mut ShapeGraph, total: Vec2) {
        match self.target {
            DragTarget::Shape => {
                graph.update(self.shape_id, |shape, _| {
                    let frame = shape.frame_mut();
                    frame.position = self.position + total;
                    frame.text_position = self.text_position + total;
                    frame.connection_dot = self.connection_dot + total;
                });
                for (line_id, base) in &self.lines {
                    graph.update_line(*line_id, |line, metrics| {
                        line.shift_attached(self.shape_id, base, total, metrics);
                    });
                }
            }
            DragTarget::Text => {
                graph.update(self.shape_id, |shape, metrics| {
                    shape
                        .frame_mut()
                        .set_text_position(self.text_position + total, metrics);
                });
            }
        }
    }

    /// Show the current offset again after a [`Drag::revert`].
    pub(super) fn reapply(&self, graph: &mut ShapeGraph) {
        self.preview(graph, self.total);
    }

    /// Put everything back where it was at press time.
    pub(super) fn revert(&self, graph: &mut ShapeGraph) {
        graph.update(self.shape_id, |shape, _| {
            let frame = shape.frame_mut();
            frame.position = self.position;
            frame.text_position = self.text_position;
            frame.connection_dot = self.connection_dot;
        });
        for (line_id, base) in &self.lines {
            graph.update_line(*line_id, |line, _| line.restore_geometry(base));
        }
    }

    /// Build the single command describing the whole drag.
    fn finish(&self, graph: &ShapeGraph, total: Vec2) -> Option<EditCommand> {
        if total == Vec2::ZERO {
            return None;
        }
        match self.target {
            DragTarget::Shape => MoveShape::new(
                graph,
                self.shape_id,
                self.position,
                self.text_position,
                self.position + total,
                self.text_position + total,
            )
            .map(EditCommand::from),
            DragTarget::Text => MoveText::new(
                graph,
                self.shape_id,
                self.text_position,
                self.text_position + total,
            )
            .map(EditCommand::from),
        }
    }
}

impl Interaction {
    pub(super) fn select_down(
        &mut self,
        graph: &mut ShapeGraph,
        pixel: (i32, i32),
        point: Point,
        now: Instant,
    ) {
        self.cancel_gesture(graph);
        let Some(id) = graph.find_topmost_at(point) else {
            self.selected = None;
            self.clicks.reset();
            return;
        };
        self.selected = Some(id);

        let on_dot = graph
            .get(id)
            .is_some_and(|shape| shape.frame().hits_connection_dot(point, self.settings.dot_hit_radius));
        let target = if on_dot {
            if self.clicks.register(pixel, now) {
                log::debug!("editing text of shape {}", id);
                self.editing_text = Some(id);
                return;
            }
            DragTarget::Text
        } else {
            self.clicks.reset();
            DragTarget::Shape
        };

        if let Some(drag) = Drag::begin(graph, id, target, point) {
            self.gesture = Gesture::Drag(drag);
        }
    }

    pub(super) fn select_move(&mut self, graph: &mut ShapeGraph, point: Point) {
        if let Gesture::Drag(drag) = &mut self.gesture {
            drag.total = point - drag.pointer_origin;
            drag.preview(graph, drag.total);
        }
    }

    pub(super) fn select_up(&mut self, graph: &mut ShapeGraph, point: Point) -> Option<EditCommand> {
        let Gesture::Drag(drag) = std::mem::take(&mut self.gesture) else {
            return None;
        };
        drag.revert(graph);
        drag.finish(graph, point - drag.pointer_origin)
    }
}
