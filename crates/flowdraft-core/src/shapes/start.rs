//! Start shape.

use super::{Frame, ShapeId, ShapeKind, ShapeTrait, TextMetrics};
use crate::draw::DrawPrimitives;
use kurbo::Rect;

/// Entry point of a flowchart, drawn as an ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct Start {
    pub(crate) id: ShapeId,
    pub frame: Frame,
}

impl Start {
    pub fn new(id: ShapeId, rect: Rect, metrics: &TextMetrics) -> Self {
        Self {
            id,
            frame: Frame::new(rect, metrics),
        }
    }
}

impl ShapeTrait for Start {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Start
    }

    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn draw_outline(&self, surface: &mut dyn DrawPrimitives) {
        let f = &self.frame;
        surface.draw_ellipse(f.position.x, f.position.y, f.width, f.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCall, Recorder};

    #[test]
    fn test_draws_ellipse() {
        let start = Start::new(1, Rect::new(10.0, 20.0, 110.0, 70.0), &TextMetrics::default());
        let mut rec = Recorder::new();
        start.draw_outline(&mut rec);
        assert_eq!(rec.calls, vec![DrawCall::Ellipse(10.0, 20.0, 100.0, 50.0)]);
    }
}
