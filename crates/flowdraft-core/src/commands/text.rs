//! Caption edits.

use super::Command;
use crate::graph::ShapeGraph;
use crate::shapes::ShapeId;
use kurbo::Point;

/// Replace a shape's caption and re-centre it.
#[derive(Debug, Clone)]
pub struct ModifyText {
    shape_id: ShapeId,
    old_text: Option<String>,
    old_text_position: Point,
    old_connection_dot: Point,
    new_text: Option<String>,
}

impl ModifyText {
    /// Capture the current caption of `shape_id`. `None` if the id is unknown.
    pub fn new(graph: &ShapeGraph, shape_id: ShapeId, new_text: Option<String>) -> Option<Self> {
        let frame = graph.get(shape_id)?.frame();
        Some(Self {
            shape_id,
            old_text: frame.text.clone(),
            old_text_position: frame.text_position,
            old_connection_dot: frame.connection_dot,
            new_text,
        })
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    pub fn new_text(&self) -> Option<&str> {
        self.new_text.as_deref()
    }
}

impl Command for ModifyText {
    fn execute(&self, graph: &mut ShapeGraph) {
        graph.update(self.shape_id, |shape, metrics| {
            let frame = shape.frame_mut();
            frame.text = self.new_text.clone();
            frame.centre_text(metrics);
        });
    }

    fn undo(&self, graph: &mut ShapeGraph) {
        graph.update(self.shape_id, |shape, _| {
            let frame = shape.frame_mut();
            frame.text = self.old_text.clone();
            frame.text_position = self.old_text_position;
            frame.connection_dot = self.old_connection_dot;
        });
    }

    fn name(&self) -> &'static str {
        "Edit Text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Shape, ShapeKind};
    use kurbo::Rect;

    #[test]
    fn test_modify_text_centres_and_restores() {
        let mut graph = ShapeGraph::new();
        let metrics = *graph.metrics();
        let id = graph.generate_id();
        let mut shape = Shape::from_kind(ShapeKind::Process, id, Rect::new(0.0, 0.0, 100.0, 50.0), &metrics);
        // Caption dragged off-centre before the edit.
        shape.frame_mut().set_text_position(Point::new(3.0, 4.0), &metrics);
        graph.add(shape);
        let before = graph.snapshot();

        let cmd = ModifyText::new(&graph, id, Some("Check".to_string())).unwrap();
        cmd.execute(&mut graph);
        let frame = graph.get(id).unwrap().frame();
        assert_eq!(frame.text.as_deref(), Some("Check"));
        // 5 chars * 7px wide, 14px tall, centred in 100x50.
        assert_eq!(frame.text_position, Point::new(32.5, 18.0));
        assert_eq!(frame.connection_dot, Point::new(67.5, 25.0));

        cmd.undo(&mut graph);
        assert_eq!(graph.snapshot(), before);
    }
}
