//! Bounding box, text and connection dot shared by every shape.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Approximate text metrics used to lay out shape captions.
///
/// The real glyph renderer lives outside the core, so captions are measured
/// as a monospace block: `char_width` per character of the longest line and
/// `line_height` per line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 14.0,
        }
    }
}

/// Width, in characters, of the caption box of a shape with no caption.
/// Keeps the connection dot off the middle of the shape so a press there drags
/// the shape.
pub const EMPTY_CAPTION_COLUMNS: usize = 4;

impl TextMetrics {
    /// Measure the box a caption occupies. A missing or empty caption measures
    /// as one line [`EMPTY_CAPTION_COLUMNS`] wide.
    pub fn measure(&self, text: Option<&str>) -> Size {
        let text = text.unwrap_or("");
        let columns = match text.lines().map(|l| l.chars().count()).max() {
            Some(columns) if columns > 0 => columns,
            _ => EMPTY_CAPTION_COLUMNS,
        };
        let rows = text.lines().count().max(1);
        Size::new(
            columns as f64 * self.char_width,
            rows as f64 * self.line_height,
        )
    }
}

/// Geometry and caption common to all shape kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Top-left corner of the bounding box.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Caption, if any.
    pub text: Option<String>,
    /// Top-left corner of the caption box. Always inside the bounding box.
    pub text_position: Point,
    /// Hit target for text drag/edit, derived from the caption box.
    pub connection_dot: Point,
}

impl Frame {
    /// Create a frame covering `rect` with no caption and the text anchor centred.
    pub fn new(rect: Rect, metrics: &TextMetrics) -> Self {
        let mut frame = Self {
            position: rect.origin(),
            width: rect.width(),
            height: rect.height(),
            text: None,
            text_position: rect.center(),
            connection_dot: rect.center(),
        };
        frame.centre_text(metrics);
        frame
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Inclusive bounding-box containment.
    pub fn contains(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    /// Clamp a candidate text position into the bounding box.
    pub fn clamp_text_position(&self, point: Point) -> Point {
        let b = self.bounds();
        Point::new(point.x.clamp(b.x0, b.x1), point.y.clamp(b.y0, b.y1))
    }

    /// Size of the caption box.
    pub fn text_size(&self, metrics: &TextMetrics) -> Size {
        metrics.measure(self.text.as_deref())
    }

    /// Set the caption anchor (clamped) and refresh the connection dot.
    pub fn set_text_position(&mut self, point: Point, metrics: &TextMetrics) {
        self.text_position = self.clamp_text_position(point);
        self.refresh_connection_dot(metrics);
    }

    /// Centre the caption box inside the bounding box.
    pub fn centre_text(&mut self, metrics: &TextMetrics) {
        let size = self.text_size(metrics);
        let centred = Point::new(
            self.position.x + (self.width - size.width) / 2.0,
            self.position.y + (self.height - size.height) / 2.0,
        );
        self.set_text_position(centred, metrics);
    }

    /// The dot sits at the middle of the caption box's right edge.
    pub fn refresh_connection_dot(&mut self, metrics: &TextMetrics) {
        let size = self.text_size(metrics);
        self.connection_dot = Point::new(
            self.text_position.x + size.width,
            self.text_position.y + size.height / 2.0,
        );
    }

    /// Whether `point` falls in the square hit box around the connection dot.
    pub fn hits_connection_dot(&self, point: Point, radius: f64) -> bool {
        (point.x - self.connection_dot.x).abs() <= radius
            && (point.y - self.connection_dot.y).abs() <= radius
    }

    /// Move the box and caption together, keeping the caption offset.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.text_position += delta;
        self.connection_dot += delta;
    }
}
