//! Draw-Line mode: connect two shapes by their connection points.
//!
//! Both click-click and click-drag work. A press near a connection point arms
//! the line; the end is resolved by the next press, or by the release when the
//! pointer has left the start point.

use super::{Gesture, Interaction, InteractionMode};
use crate::commands::{DrawLine, EditCommand};
use crate::graph::{ConnectionHit, ShapeGraph};
use crate::shapes::{Line, LineEnd};
use kurbo::Point;

/// A line with its start resolved, waiting for an end.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLine {
    pub start: ConnectionHit,
    /// Latest pointer position, for the rubber band.
    pub pointer: Point,
    /// Whether the button is still held since the start press.
    held: bool,
}

impl Interaction {
    pub(super) fn connect_down(&mut self, graph: &mut ShapeGraph, point: Point) -> Option<EditCommand> {
        let tolerance = self.settings.connection_tolerance;
        if let Gesture::Connect(pending) = std::mem::take(&mut self.gesture) {
            let end = graph.connection_point_near(point, tolerance, Some(pending.start.shape_id));
            return self.connect_finish(graph, pending.start, end);
        }

        match graph.connection_point_near(point, tolerance, None) {
            Some(start) => {
                self.gesture = Gesture::Connect(PendingLine {
                    start,
                    pointer: point,
                    held: true,
                });
            }
            None => log::debug!("no connection point near ({}, {})", point.x, point.y),
        }
        None
    }

    pub(super) fn connect_move(&mut self, point: Point) {
        if let Gesture::Connect(pending) = &mut self.gesture {
            pending.pointer = point;
        }
    }

    pub(super) fn connect_up(&mut self, graph: &mut ShapeGraph, point: Point) -> Option<EditCommand> {
        let tolerance = self.settings.connection_tolerance;
        let Gesture::Connect(mut pending) = std::mem::take(&mut self.gesture) else {
            return None;
        };
        if !pending.held {
            self.gesture = Gesture::Connect(pending);
            return None;
        }

        pending.held = false;
        pending.pointer = point;
        let end = graph.connection_point_near(point, tolerance, Some(pending.start.shape_id));
        if end.is_none() && point.distance(pending.start.point) <= tolerance {
            // Released where it was pressed: wait for a second click.
            self.gesture = Gesture::Connect(pending);
            return None;
        }
        self.connect_finish(graph, pending.start, end)
    }

    fn connect_finish(
        &mut self,
        graph: &mut ShapeGraph,
        start: ConnectionHit,
        end: Option<ConnectionHit>,
    ) -> Option<EditCommand> {
        let end = match end {
            Some(end) if end.shape_id != start.shape_id => end,
            _ => {
                log::debug!("line from shape {} has no valid end, resetting", start.shape_id);
                self.gesture = Gesture::Idle;
                return None;
            }
        };

        let id = graph.generate_id();
        let line = Line::new(
            id,
            LineEnd::attached(start.shape_id, start.anchor, start.point),
            LineEnd::attached(end.shape_id, end.anchor, end.point),
            graph.metrics(),
        );
        self.enter(InteractionMode::Select);
        Some(DrawLine::new(line).into())
    }
}
