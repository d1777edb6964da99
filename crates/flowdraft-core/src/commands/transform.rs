//! Position changes: whole-shape moves and caption drags.

use super::Command;
use crate::graph::ShapeGraph;
use crate::shapes::{LineGeometry, ShapeId};
use kurbo::Point;

/// Move a shape (and its caption) and drag the attached line ends along.
#[derive(Debug, Clone)]
pub struct MoveShape {
    shape_id: ShapeId,
    old_position: Point,
    old_text_position: Point,
    old_connection_dot: Point,
    new_position: Point,
    new_text_position: Point,
    /// Connected lines as they were before the move.
    lines: Vec<(ShapeId, LineGeometry)>,
}

impl MoveShape {
    /// Build the move from the shape's pre-drag state. `None` if the id is unknown.
    pub fn new(
        graph: &ShapeGraph,
        shape_id: ShapeId,
        old_position: Point,
        old_text_position: Point,
        new_position: Point,
        new_text_position: Point,
    ) -> Option<Self> {
        let shape = graph.get(shape_id)?;
        let lines = graph
            .lines_connected_to(shape_id)
            .into_iter()
            .filter_map(|id| Some((id, graph.get(id)?.as_line()?.geometry())))
            .collect();
        Some(Self {
            shape_id,
            old_position,
            old_text_position,
            old_connection_dot: shape.frame().connection_dot,
            new_position,
            new_text_position,
            lines,
        })
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }
}

impl Command for MoveShape {
    fn execute(&self, graph: &mut ShapeGraph) {
        let moved = graph.update(self.shape_id, |shape, metrics| {
            let frame = shape.frame_mut();
            frame.position = self.new_position;
            frame.text_position = self.new_text_position;
            frame.refresh_connection_dot(metrics);
        });
        if moved.is_none() {
            return;
        }

        let delta = self.new_position - self.old_position;
        for (line_id, base) in &self.lines {
            graph.update_line(*line_id, |line, metrics| {
                line.shift_attached(self.shape_id, base, delta, metrics);
            });
        }
    }

    fn undo(&self, graph: &mut ShapeGraph) {
        graph.update(self.shape_id, |shape, _| {
            let frame = shape.frame_mut();
            frame.position = self.old_position;
            frame.text_position = self.old_text_position;
            frame.connection_dot = self.old_connection_dot;
        });
        for (line_id, base) in &self.lines {
            graph.update_line(*line_id, |line, _| line.restore_geometry(base));
        }
    }

    fn name(&self) -> &'static str {
        "Move Shape"
    }
}

/// Move a caption inside its shape. Lines are not touched.
#[derive(Debug, Clone)]
pub struct MoveText {
    shape_id: ShapeId,
    old_text_position: Point,
    old_connection_dot: Point,
    new_text_position: Point,
}

impl MoveText {
    /// The new position is clamped into the shape's box. `None` if the id is unknown.
    pub fn new(
        graph: &ShapeGraph,
        shape_id: ShapeId,
        old_text_position: Point,
        new_text_position: Point,
    ) -> Option<Self> {
        let frame = graph.get(shape_id)?.frame();
        Some(Self {
            shape_id,
            old_text_position,
            old_connection_dot: frame.connection_dot,
            new_text_position: frame.clamp_text_position(new_text_position),
        })
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }
}

impl Command for MoveText {
    fn execute(&self, graph: &mut ShapeGraph) {
        graph.update(self.shape_id, |shape, metrics| {
            shape
                .frame_mut()
                .set_text_position(self.new_text_position, metrics);
        });
    }

    fn undo(&self, graph: &mut ShapeGraph) {
        graph.update(self.shape_id, |shape, _| {
            let frame = shape.frame_mut();
            frame.text_position = self.old_text_position;
            frame.connection_dot = self.old_connection_dot;
        });
    }

    fn name(&self) -> &'static str {
        "Move Text"
    }
}
