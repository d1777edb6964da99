//! Decision shape.

use super::{Anchor, Frame, ShapeId, ShapeKind, ShapeTrait, TextMetrics};
use crate::draw::DrawPrimitives;
use kurbo::Rect;

/// A branch point, drawn as a diamond through the four edge midpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub(crate) id: ShapeId,
    pub frame: Frame,
}

impl Decision {
    pub fn new(id: ShapeId, rect: Rect, metrics: &TextMetrics) -> Self {
        Self {
            id,
            frame: Frame::new(rect, metrics),
        }
    }
}

impl ShapeTrait for Decision {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Decision
    }

    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn draw_outline(&self, surface: &mut dyn DrawPrimitives) {
        let bounds = self.frame.bounds();
        let corners = [Anchor::Top, Anchor::Right, Anchor::Bottom, Anchor::Left]
            .map(|anchor| anchor.point_on(bounds));
        for (i, a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % corners.len()];
            surface.draw_line(a.x, a.y, b.x, b.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCall, Recorder};

    #[test]
    fn test_draws_closed_diamond() {
        let decision = Decision::new(1, Rect::new(0.0, 0.0, 40.0, 20.0), &TextMetrics::default());
        let mut rec = Recorder::new();
        decision.draw_outline(&mut rec);
        assert_eq!(
            rec.calls,
            vec![
                DrawCall::Line(20.0, 0.0, 40.0, 10.0),
                DrawCall::Line(40.0, 10.0, 20.0, 20.0),
                DrawCall::Line(20.0, 20.0, 0.0, 10.0),
                DrawCall::Line(0.0, 10.0, 20.0, 0.0),
            ]
        );
    }
}
