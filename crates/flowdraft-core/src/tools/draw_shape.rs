//! Draw-Shape mode: rubber-band placement of a new node.

use super::{Gesture, Interaction, InteractionMode};
use crate::commands::{AddShape, EditCommand};
use crate::graph::ShapeGraph;
use crate::shapes::{Shape, ShapeKind};
use kurbo::{Point, Rect};

#[derive(Debug, Clone)]
pub(super) struct Placement {
    pub(super) kind: ShapeKind,
    anchor: Point,
    current: Point,
}

impl Placement {
    /// Normalised box between the anchor and the pointer, whatever the drag direction.
    pub(super) fn rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.current)
    }
}

impl Interaction {
    pub(super) fn place_down(&mut self, kind: ShapeKind, point: Point) {
        self.gesture = Gesture::Place(Placement {
            kind,
            anchor: point,
            current: point,
        });
    }

    pub(super) fn place_move(&mut self, point: Point) {
        if let Gesture::Place(placement) = &mut self.gesture {
            placement.current = point;
        }
    }

    pub(super) fn place_up(&mut self, graph: &mut ShapeGraph, point: Point) -> Option<EditCommand> {
        let Gesture::Place(mut placement) = std::mem::take(&mut self.gesture) else {
            return None;
        };
        placement.current = point;
        let rect = placement.rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            log::debug!("ignoring zero-area {} placement", placement.kind);
            return None;
        }

        let id = graph.generate_id();
        let shape = Shape::from_kind(placement.kind, id, rect, graph.metrics());
        self.enter(InteractionMode::Select);
        Some(AddShape::new(shape).into())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{down, up};
    use super::*;
    use crate::commands::Command;
    use crate::config::EditorConfig;
    use crate::input::PointerEvent;
    use crate::tools::{CursorKind, ToolKind};
    use std::time::Instant;

    #[test]
    fn test_placement_normalises_direction() {
        let mut graph = ShapeGraph::new();
        let mut interaction = Interaction::new(&EditorConfig::default());
        interaction.set_tool(ToolKind::Shape(ShapeKind::Process), &mut graph);
        interaction.take_cursor_change();
        let now = Instant::now();

        interaction.handle_pointer(&mut graph, down(100, 100), now);
        interaction.handle_pointer(&mut graph, PointerEvent::Move { x: 50, y: 50 }, now);
        assert_eq!(
            interaction.preview_rect(),
            Some((ShapeKind::Process, Rect::new(50.0, 50.0, 100.0, 100.0)))
        );
        let cmd = interaction.handle_pointer(&mut graph, up(50, 50), now).unwrap();
        cmd.execute(&mut graph);

        let shape = graph.shapes().next().unwrap();
        assert_eq!(shape.kind(), ShapeKind::Process);
        assert_eq!(shape.frame().position, Point::new(50.0, 50.0));
        assert_eq!(shape.frame().width, 50.0);
        assert_eq!(shape.frame().height, 50.0);
        assert_eq!(interaction.mode(), InteractionMode::Select);
        assert_eq!(interaction.take_cursor_change(), Some(CursorKind::Default));
    }

    #[test]
    fn test_zero_area_keeps_tool_armed() {
        let mut graph = ShapeGraph::new();
        let mut interaction = Interaction::new(&EditorConfig::default());
        interaction.set_tool(ToolKind::Shape(ShapeKind::Start), &mut graph);
        let now = Instant::now();
        interaction.handle_pointer(&mut graph, down(10, 10), now);
        assert!(interaction.handle_pointer(&mut graph, up(10, 40), now).is_none());
        assert_eq!(interaction.mode(), InteractionMode::DrawShape(ShapeKind::Start));
        assert!(interaction.preview_rect().is_none());
    }
}
