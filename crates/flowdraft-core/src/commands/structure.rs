//! Commands that insert or remove whole shapes.

use super::Command;
use crate::graph::ShapeGraph;
use crate::shapes::{Line, Shape, ShapeId};

/// Insert a freshly placed shape.
#[derive(Debug, Clone)]
pub struct AddShape {
    shape: Shape,
}

impl AddShape {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape.id()
    }
}

impl Command for AddShape {
    fn execute(&self, graph: &mut ShapeGraph) {
        graph.add(self.shape.clone());
    }

    fn undo(&self, graph: &mut ShapeGraph) {
        graph.remove(self.shape.id());
    }

    fn name(&self) -> &'static str {
        "Add Shape"
    }
}

/// Remove a shape together with every line attached to it.
#[derive(Debug, Clone)]
pub struct DeleteShape {
    shape: Shape,
    /// Lines referencing the shape when the command was built.
    lines: Vec<Shape>,
}

impl DeleteShape {
    /// Snapshot `id` and its connected lines. `None` if the id is unknown.
    pub fn new(graph: &ShapeGraph, id: ShapeId) -> Option<Self> {
        let shape = graph.get(id)?.clone();
        let lines = graph
            .lines_connected_to(id)
            .into_iter()
            .filter_map(|line_id| graph.get(line_id).cloned())
            .collect();
        Some(Self { shape, lines })
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape.id()
    }

    /// Ids of the lines removed alongside the shape.
    pub fn line_ids(&self) -> Vec<ShapeId> {
        self.lines.iter().map(Shape::id).collect()
    }
}

impl Command for DeleteShape {
    fn execute(&self, graph: &mut ShapeGraph) {
        for line in &self.lines {
            graph.remove(line.id());
        }
        graph.remove(self.shape.id());
    }

    fn undo(&self, graph: &mut ShapeGraph) {
        graph.add(self.shape.clone());
        for line in &self.lines {
            graph.add(line.clone());
        }
    }

    fn name(&self) -> &'static str {
        "Delete Shape"
    }
}

/// Insert a line between two shapes.
#[derive(Debug, Clone)]
pub struct DrawLine {
    line: Line,
}

impl DrawLine {
    pub fn new(line: Line) -> Self {
        Self { line }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }
}

impl Command for DrawLine {
    fn execute(&self, graph: &mut ShapeGraph) {
        graph.add(Shape::Line(self.line.clone()));
    }

    fn undo(&self, graph: &mut ShapeGraph) {
        graph.remove(self.line.id);
    }

    fn name(&self) -> &'static str {
        "Draw Line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Anchor, LineEnd, ShapeKind};
    use kurbo::Rect;

    fn graph_with_two_lines() -> (ShapeGraph, ShapeId, Vec<ShapeId>) {
        let mut graph = ShapeGraph::new();
        let metrics = *graph.metrics();
        let mut ids = Vec::new();
        for x in [0.0, 200.0, 400.0] {
            let id = graph.generate_id();
            let rect = Rect::new(x, 0.0, x + 100.0, 50.0);
            graph.add(Shape::from_kind(ShapeKind::Process, id, rect, &metrics));
            ids.push(id);
        }
        let mut lines = Vec::new();
        for (from, to) in [(ids[0], ids[1]), (ids[1], ids[2])] {
            let start = graph.get(from).unwrap().connection_point(Anchor::Right);
            let end = graph.get(to).unwrap().connection_point(Anchor::Left);
            let id = graph.generate_id();
            let line = Line::new(
                id,
                LineEnd::attached(from, Anchor::Right, start),
                LineEnd::attached(to, Anchor::Left, end),
                &metrics,
            );
            DrawLine::new(line).execute(&mut graph);
            lines.push(id);
        }
        (graph, ids[1], lines)
    }

    #[test]
    fn test_add_shape_round_trip() {
        let mut graph = ShapeGraph::new();
        let metrics = *graph.metrics();
        let id = graph.generate_id();
        let cmd = AddShape::new(Shape::from_kind(
            ShapeKind::Start,
            id,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            &metrics,
        ));
        cmd.execute(&mut graph);
        assert!(graph.contains(id));
        cmd.undo(&mut graph);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_delete_removes_exactly_connected_lines() {
        let (mut graph, middle, lines) = graph_with_two_lines();
        let before = graph.snapshot();

        let cmd = DeleteShape::new(&graph, middle).unwrap();
        assert_eq!(cmd.line_ids(), lines);
        cmd.execute(&mut graph);
        assert_eq!(graph.len(), 2);
        assert!(lines.iter().all(|id| !graph.contains(*id)));

        cmd.undo(&mut graph);
        assert_eq!(graph.snapshot(), before);
    }

    #[test]
    fn test_delete_unknown_shape() {
        let graph = ShapeGraph::new();
        assert!(DeleteShape::new(&graph, 3).is_none());
    }
}
