//! Drawing capability consumed by shapes, and the scene walk that drives it.

use crate::graph::ShapeGraph;
use crate::shapes::{ShapeId, ShapeKind, TextMetrics};
use kurbo::{Point, Rect};

/// Primitive drawing operations provided by the host's rendering backend.
///
/// Coordinates are in canvas pixels; angles are in degrees, clockwise from
/// the positive x axis.
pub trait DrawPrimitives {
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn draw_ellipse(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn draw_arc(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        start_degrees: f64,
        sweep_degrees: f64,
    );

    /// Draw `text` centred in the given box.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, width: f64, height: f64);

    /// Outline the caption at `(x, y)` and draw its connection dot.
    fn draw_text_border(&mut self, text: &str, x: f64, y: f64);
}

/// Per-frame context passed alongside the drawing capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawContext {
    /// Shape whose caption border and connection dot should be drawn.
    pub selected: Option<ShapeId>,
    pub metrics: TextMetrics,
}

impl DrawContext {
    pub fn new(selected: Option<ShapeId>, metrics: TextMetrics) -> Self {
        Self { selected, metrics }
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected == Some(id)
    }
}

/// Draw every shape in creation order.
pub fn render_graph(graph: &ShapeGraph, surface: &mut dyn DrawPrimitives, ctx: &DrawContext) {
    for shape in graph.shapes() {
        shape.draw(surface, ctx);
    }
}

/// Draw the rubber-band outline of a shape being placed.
pub fn render_preview(kind: ShapeKind, rect: Rect, surface: &mut dyn DrawPrimitives) {
    match kind {
        ShapeKind::Line => {
            surface.draw_line(rect.x0, rect.y0, rect.x1, rect.y1);
        }
        _ => surface.draw_rectangle(rect.x0, rect.y0, rect.width(), rect.height()),
    }
}

/// Draw the rubber band from a pending line start to the pointer.
pub fn render_pending_line(start: Point, pointer: Point, surface: &mut dyn DrawPrimitives) {
    surface.draw_line(start.x, start.y, pointer.x, pointer.y);
}

/// A single recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Line(f64, f64, f64, f64),
    Rectangle(f64, f64, f64, f64),
    Ellipse(f64, f64, f64, f64),
    Arc(f64, f64, f64, f64, f64, f64),
    Text(String, f64, f64, f64, f64),
    TextBorder(String, f64, f64),
}

/// Display-list backend that records calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub calls: Vec<DrawCall>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawPrimitives for Recorder {
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.calls.push(DrawCall::Line(x1, y1, x2, y2));
    }

    fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Rectangle(x, y, width, height));
    }

    fn draw_ellipse(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Ellipse(x, y, width, height));
    }

    fn draw_arc(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        start_degrees: f64,
        sweep_degrees: f64,
    ) {
        self.calls.push(DrawCall::Arc(
            x,
            y,
            width,
            height,
            start_degrees,
            sweep_degrees,
        ));
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, width: f64, height: f64) {
        self.calls
            .push(DrawCall::Text(text.to_string(), x, y, width, height));
    }

    fn draw_text_border(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(DrawCall::TextBorder(text.to_string(), x, y));
    }
}
