//! Terminator shape.

use super::{Frame, ShapeId, ShapeKind, ShapeTrait, TextMetrics};
use crate::draw::DrawPrimitives;
use kurbo::Rect;

/// End point of a flowchart, drawn as a stadium: two half arcs joined by
/// straight top and bottom edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminator {
    pub(crate) id: ShapeId,
    pub frame: Frame,
}

impl Terminator {
    pub fn new(id: ShapeId, rect: Rect, metrics: &TextMetrics) -> Self {
        Self {
            id,
            frame: Frame::new(rect, metrics),
        }
    }

    /// Radius of the rounded ends, limited so the arcs never overlap.
    pub fn corner_radius(&self) -> f64 {
        (self.frame.height / 2.0).min(self.frame.width / 2.0)
    }
}

impl ShapeTrait for Terminator {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Terminator
    }

    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn draw_outline(&self, surface: &mut dyn DrawPrimitives) {
        let f = &self.frame;
        let r = self.corner_radius();
        let (x, y, w, h) = (f.position.x, f.position.y, f.width, f.height);

        surface.draw_arc(x, y, 2.0 * r, h, 90.0, 180.0);
        surface.draw_arc(x + w - 2.0 * r, y, 2.0 * r, h, 270.0, 180.0);
        surface.draw_line(x + r, y, x + w - r, y);
        surface.draw_line(x + r, y + h, x + w - r, y + h);
    }
}
