//! Connector line between two shapes.

use super::{Anchor, Frame, ShapeId, ShapeKind, ShapeTrait, TextMetrics};
use crate::draw::DrawPrimitives;
use kurbo::{Point, Rect, Vec2};

/// One end of a line.
///
/// `shape` is a weak reference: the graph owns shapes, the line only holds the
/// id. `point` caches the attached shape's connection point at its last move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEnd {
    pub shape: Option<ShapeId>,
    pub anchor: Anchor,
    pub point: Point,
}

impl LineEnd {
    pub fn attached(shape: ShapeId, anchor: Anchor, point: Point) -> Self {
        Self {
            shape: Some(shape),
            anchor,
            point,
        }
    }

    pub fn detached(point: Point) -> Self {
        Self {
            shape: None,
            anchor: Anchor::Top,
            point,
        }
    }
}

/// Everything a shape move can change on a line, for verbatim restore.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub start_point: Point,
    pub end_point: Point,
    pub frame: Frame,
}

/// A straight segment between two connection points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    pub start: LineEnd,
    pub end: LineEnd,
    /// Derived box spanning both endpoints.
    pub frame: Frame,
}

impl Line {
    pub fn new(id: ShapeId, start: LineEnd, end: LineEnd, metrics: &TextMetrics) -> Self {
        let frame = Frame::new(Rect::from_points(start.point, end.point), metrics);
        Self {
            id,
            start,
            end,
            frame,
        }
    }

    pub fn start_shape(&self) -> Option<ShapeId> {
        self.start.shape
    }

    pub fn end_shape(&self) -> Option<ShapeId> {
        self.end.shape
    }

    /// Whether either end references `shape_id`.
    pub fn connects(&self, shape_id: ShapeId) -> bool {
        self.start.shape == Some(shape_id) || self.end.shape == Some(shape_id)
    }

    pub fn geometry(&self) -> LineGeometry {
        LineGeometry {
            start_point: self.start.point,
            end_point: self.end.point,
            frame: self.frame.clone(),
        }
    }

    pub fn restore_geometry(&mut self, geometry: &LineGeometry) {
        self.start.point = geometry.start_point;
        self.end.point = geometry.end_point;
        self.frame = geometry.frame.clone();
    }

    /// Recompute the derived box as the min/max of the two endpoints.
    pub fn update_bounds(&mut self, metrics: &TextMetrics) {
        let rect = Rect::from_points(self.start.point, self.end.point);
        self.frame.position = rect.origin();
        self.frame.width = rect.width();
        self.frame.height = rect.height();
        self.frame.centre_text(metrics);
    }

    /// Starting from `base`, shift every end attached to `shape_id` by `delta`.
    pub fn shift_attached(
        &mut self,
        shape_id: ShapeId,
        base: &LineGeometry,
        delta: Vec2,
        metrics: &TextMetrics,
    ) {
        self.restore_geometry(base);
        if self.start.shape == Some(shape_id) {
            self.start.point = base.start_point + delta;
        }
        if self.end.shape == Some(shape_id) {
            self.end.point = base.end_point + delta;
        }
        self.update_bounds(metrics);
    }

    pub fn length(&self) -> f64 {
        self.start.point.distance(self.end.point)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn draw_outline(&self, surface: &mut dyn DrawPrimitives) {
        let (a, b) = (self.start.point, self.end.point);
        surface.draw_line(a.x, a.y, b.x, b.y);
    }
}
