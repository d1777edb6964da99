//! Opening a document as an undoable replacement of the graph.

use super::Command;
use crate::graph::ShapeGraph;
use crate::shapes::Shape;

/// Replace the whole document with loaded content.
#[derive(Debug, Clone)]
pub struct Load {
    source: String,
    previous: Vec<Shape>,
    loaded: Vec<Shape>,
}

impl Load {
    /// Snapshot the current graph so undo can restore it without touching storage.
    pub fn new(graph: &ShapeGraph, source: impl Into<String>, loaded: Vec<Shape>) -> Self {
        Self {
            source: source.into(),
            previous: graph.snapshot(),
            loaded,
        }
    }

    /// Storage key or path the content came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn shape_count(&self) -> usize {
        self.loaded.len()
    }
}

impl Command for Load {
    fn execute(&self, graph: &mut ShapeGraph) {
        graph.replace_all(self.loaded.clone());
    }

    fn undo(&self, graph: &mut ShapeGraph) {
        graph.replace_all(self.previous.clone());
    }

    fn name(&self) -> &'static str {
        "Open"
    }
}
