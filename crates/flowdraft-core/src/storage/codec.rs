//! Flat record format for documents.
//!
//! Lines refer to their end shapes by id. Decoding runs in two passes: nodes
//! first, then lines resolved against the node index.

use super::{StorageError, StorageResult};
use crate::graph::ShapeGraph;
use crate::shapes::{Anchor, Line, LineEnd, Shape, ShapeId, ShapeKind, TextMetrics};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current document format version.
pub const FORMAT_VERSION: u32 = 1;

/// Line-only fields of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub start_shape: Option<ShapeId>,
    pub start_anchor: Anchor,
    pub start_x: f64,
    pub start_y: f64,
    pub end_shape: Option<ShapeId>,
    pub end_anchor: Anchor,
    pub end_x: f64,
    pub end_y: f64,
}

/// One shape, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub kind: String,
    pub id: ShapeId,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub text: Option<String>,
    pub text_position_x: f64,
    pub text_position_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineRecord>,
}

impl ShapeRecord {
    pub fn from_shape(shape: &Shape) -> Self {
        let frame = shape.frame();
        let line = shape.as_line().map(|line| LineRecord {
            start_shape: line.start.shape,
            start_anchor: line.start.anchor,
            start_x: line.start.point.x,
            start_y: line.start.point.y,
            end_shape: line.end.shape,
            end_anchor: line.end.anchor,
            end_x: line.end.point.x,
            end_y: line.end.point.y,
        });
        Self {
            kind: shape.kind_name().to_string(),
            id: shape.id(),
            position_x: frame.position.x,
            position_y: frame.position.y,
            width: frame.width,
            height: frame.height,
            text: frame.text.clone(),
            text_position_x: frame.text_position.x,
            text_position_y: frame.text_position.y,
            line,
        }
    }

    fn rect(&self) -> Rect {
        Rect::new(
            self.position_x,
            self.position_y,
            self.position_x + self.width,
            self.position_y + self.height,
        )
    }

    /// Copy the stored caption and box onto a freshly built shape.
    fn apply_frame(&self, shape: &mut Shape, metrics: &TextMetrics) {
        let frame = shape.frame_mut();
        frame.position = Point::new(self.position_x, self.position_y);
        frame.width = self.width;
        frame.height = self.height;
        frame.text = self.text.clone();
        frame.text_position = Point::new(self.text_position_x, self.text_position_y);
        frame.refresh_connection_dot(metrics);
    }
}

/// A whole document as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub version: u32,
    /// Records in creation order.
    pub shapes: Vec<ShapeRecord>,
}

impl Default for DocumentFile {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            shapes: Vec::new(),
        }
    }
}

impl DocumentFile {
    pub fn from_shapes<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Self {
        Self {
            version: FORMAT_VERSION,
            shapes: shapes.into_iter().map(ShapeRecord::from_shape).collect(),
        }
    }

    /// Snapshot the graph's current content.
    pub fn from_graph(graph: &ShapeGraph) -> Self {
        Self::from_shapes(graph.shapes())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rebuild shapes from records.
    ///
    /// Unknown kinds and duplicate ids fail the whole decode. A line end whose
    /// shape id is missing is kept with that end unattached.
    pub fn into_shapes(self, metrics: &TextMetrics) -> StorageResult<Vec<Shape>> {
        if self.version > FORMAT_VERSION {
            return Err(StorageError::Serialization(format!(
                "unsupported document version {}",
                self.version
            )));
        }

        let mut index: BTreeMap<ShapeId, Shape> = BTreeMap::new();
        let mut lines = Vec::new();

        // Pass 1: nodes.
        for record in self.shapes {
            let kind = record.kind.parse::<ShapeKind>()?;
            if kind.is_line() {
                lines.push(record);
                continue;
            }
            let mut shape = Shape::from_kind(kind, record.id, record.rect(), metrics);
            record.apply_frame(&mut shape, metrics);
            if index.insert(record.id, shape).is_some() {
                return Err(duplicate(record.id));
            }
        }

        // Pass 2: lines, resolved against the node index.
        let nodes: Vec<ShapeId> = index.keys().copied().collect();
        let resolve = |id: Option<ShapeId>, line_id: ShapeId| {
            let id = id?;
            if nodes.binary_search(&id).is_ok() {
                Some(id)
            } else {
                log::warn!("line {} refers to missing shape {}, leaving end unattached", line_id, id);
                None
            }
        };
        for record in lines {
            let data = record.line.clone().ok_or_else(|| {
                StorageError::Serialization(format!("line {} has no endpoint data", record.id))
            })?;
            let start = LineEnd {
                shape: resolve(data.start_shape, record.id),
                anchor: data.start_anchor,
                point: Point::new(data.start_x, data.start_y),
            };
            let end = LineEnd {
                shape: resolve(data.end_shape, record.id),
                anchor: data.end_anchor,
                point: Point::new(data.end_x, data.end_y),
            };
            let mut shape = Shape::Line(Line::new(record.id, start, end, metrics));
            record.apply_frame(&mut shape, metrics);
            if index.insert(record.id, shape).is_some() {
                return Err(duplicate(record.id));
            }
        }

        Ok(index.into_values().collect())
    }
}

fn duplicate(id: ShapeId) -> StorageError {
    StorageError::Serialization(format!("duplicate shape id {}", id))
}
