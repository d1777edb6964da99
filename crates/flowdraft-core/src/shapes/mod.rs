//! Shape definitions for the flowchart.

mod decision;
mod frame;
mod line;
mod process;
mod start;
mod terminator;

pub use decision::Decision;
pub use frame::{Frame, TextMetrics};
pub use line::{Line, LineEnd, LineGeometry};
pub use process::Process;
pub use start::Start;
pub use terminator::Terminator;

use crate::draw::{DrawContext, DrawPrimitives};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for shapes. Assigned by the graph, never reused.
pub type ShapeId = u64;

/// Shape errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Unknown shape kind: {0}")]
    UnknownKind(String),
}

/// The closed set of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Start,
    Terminator,
    Process,
    Decision,
    Line,
}

impl ShapeKind {
    /// Kind name as shown in the shape table and written to files.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Start => "Start",
            ShapeKind::Terminator => "Terminator",
            ShapeKind::Process => "Process",
            ShapeKind::Decision => "Decision",
            ShapeKind::Line => "Line",
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, ShapeKind::Line)
    }

    /// Kinds that can be placed with the draw-shape tool.
    pub fn node_kinds() -> &'static [ShapeKind] {
        &[
            ShapeKind::Start,
            ShapeKind::Terminator,
            ShapeKind::Process,
            ShapeKind::Decision,
        ]
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Start" => Ok(ShapeKind::Start),
            "Terminator" => Ok(ShapeKind::Terminator),
            "Process" => Ok(ShapeKind::Process),
            "Decision" => Ok(ShapeKind::Decision),
            "Line" => Ok(ShapeKind::Line),
            other => Err(ShapeError::UnknownKind(other.to_string())),
        }
    }
}

/// One of the four bounding-box edge midpoints a line can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
}

impl Anchor {
    pub fn all() -> [Anchor; 4] {
        [Anchor::Top, Anchor::Bottom, Anchor::Left, Anchor::Right]
    }

    /// The midpoint of the matching edge of `rect`.
    pub fn point_on(&self, rect: Rect) -> Point {
        let center = rect.center();
        match self {
            Anchor::Top => Point::new(center.x, rect.y0),
            Anchor::Bottom => Point::new(center.x, rect.y1),
            Anchor::Left => Point::new(rect.x0, center.y),
            Anchor::Right => Point::new(rect.x1, center.y),
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    fn kind(&self) -> ShapeKind;

    /// Box, caption and connection dot.
    fn frame(&self) -> &Frame;

    fn frame_mut(&mut self) -> &mut Frame;

    /// Draw the kind-specific outline. Captions are drawn by [`Shape::draw`].
    fn draw_outline(&self, surface: &mut dyn DrawPrimitives);

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect {
        self.frame().bounds()
    }
}

/// Enum wrapper for all shape kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Start(Start),
    Terminator(Terminator),
    Process(Process),
    Decision(Decision),
    Line(Line),
}

impl Shape {
    /// Factory: build a shape from its kind name.
    pub fn create(
        kind_name: &str,
        id: ShapeId,
        rect: Rect,
        metrics: &TextMetrics,
    ) -> Result<Shape, ShapeError> {
        let kind = kind_name.parse::<ShapeKind>()?;
        Ok(Self::from_kind(kind, id, rect, metrics))
    }

    /// Build a shape of `kind` covering `rect`.
    ///
    /// Lines are created unattached, running from the top-left to the
    /// bottom-right corner of `rect`.
    pub fn from_kind(kind: ShapeKind, id: ShapeId, rect: Rect, metrics: &TextMetrics) -> Shape {
        match kind {
            ShapeKind::Start => Shape::Start(Start::new(id, rect, metrics)),
            ShapeKind::Terminator => Shape::Terminator(Terminator::new(id, rect, metrics)),
            ShapeKind::Process => Shape::Process(Process::new(id, rect, metrics)),
            ShapeKind::Decision => Shape::Decision(Decision::new(id, rect, metrics)),
            ShapeKind::Line => Shape::Line(Line::new(
                id,
                LineEnd::detached(Point::new(rect.x0, rect.y0)),
                LineEnd::detached(Point::new(rect.x1, rect.y1)),
                metrics,
            )),
        }
    }

    fn inner(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Start(s) => s,
            Shape::Terminator(s) => s,
            Shape::Process(s) => s,
            Shape::Decision(s) => s,
            Shape::Line(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Start(s) => s,
            Shape::Terminator(s) => s,
            Shape::Process(s) => s,
            Shape::Decision(s) => s,
            Shape::Line(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.inner().id()
    }

    pub fn kind(&self) -> ShapeKind {
        self.inner().kind()
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn frame(&self) -> &Frame {
        self.inner().frame()
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        self.inner_mut().frame_mut()
    }

    pub fn bounds(&self) -> Rect {
        self.inner().bounds()
    }

    pub fn text(&self) -> Option<&str> {
        self.frame().text.as_deref()
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Shape::Line(_))
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Shape::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut Line> {
        match self {
            Shape::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Bounding-box hit test. Lines never hit.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_line() && self.frame().contains(point)
    }

    /// The point a line attaches to at `anchor`.
    pub fn connection_point(&self, anchor: Anchor) -> Point {
        anchor.point_on(self.bounds())
    }

    /// All four connection points. Empty for lines.
    pub fn connection_points(&self) -> Vec<(Anchor, Point)> {
        if self.is_line() {
            return Vec::new();
        }
        Anchor::all()
            .into_iter()
            .map(|anchor| (anchor, self.connection_point(anchor)))
            .collect()
    }

    /// Nearest connection point within `tolerance` of `point`.
    pub fn nearest_connection_point(&self, point: Point, tolerance: f64) -> Option<(Anchor, Point)> {
        self.connection_points()
            .into_iter()
            .map(|(anchor, p)| (anchor, p, p.distance(point)))
            .filter(|(_, _, dist)| *dist <= tolerance)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(anchor, p, _)| (anchor, p))
    }

    /// Draw outline, caption, and (when selected) the caption border.
    pub fn draw(&self, surface: &mut dyn DrawPrimitives, ctx: &DrawContext) {
        self.inner().draw_outline(surface);

        let frame = self.frame();
        let anchor = frame.text_position;
        if let Some(text) = frame.text.as_deref() {
            let size = ctx.metrics.measure(Some(text));
            surface.draw_text(text, anchor.x, anchor.y, size.width, size.height);
        }
        if ctx.is_selected(self.id()) {
            surface.draw_text_border(frame.text.as_deref().unwrap_or(""), anchor.x, anchor.y);
        }
    }
}
