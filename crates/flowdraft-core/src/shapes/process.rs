//! Process shape.

use super::{Frame, ShapeId, ShapeKind, ShapeTrait, TextMetrics};
use crate::draw::DrawPrimitives;
use kurbo::Rect;

/// A processing step, drawn as a plain rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    pub(crate) id: ShapeId,
    pub frame: Frame,
}

impl Process {
    pub fn new(id: ShapeId, rect: Rect, metrics: &TextMetrics) -> Self {
        Self {
            id,
            frame: Frame::new(rect, metrics),
        }
    }
}

impl ShapeTrait for Process {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Process
    }

    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn draw_outline(&self, surface: &mut dyn DrawPrimitives) {
        let f = &self.frame;
        surface.draw_rectangle(f.position.x, f.position.y, f.width, f.height);
    }
}
