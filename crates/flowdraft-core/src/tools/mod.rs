//! Interaction state machine: turns pointer gestures into commands.

mod draw_line;
mod draw_shape;
mod select;

pub use draw_line::PendingLine;
pub use select::DragTarget;

use crate::commands::{DeleteShape, EditCommand, ModifyText};
use crate::config::EditorConfig;
use crate::draw::{DrawPrimitives, render_pending_line, render_preview};
use crate::graph::ShapeGraph;
use crate::input::{ClickTracker, MouseButton, PointerEvent};
use crate::shapes::{ShapeId, ShapeKind};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Tools the host can arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pointer,
    Shape(ShapeKind),
    Line,
}

/// The three mutually exclusive interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Select,
    DrawShape(ShapeKind),
    DrawLine,
}

impl InteractionMode {
    pub fn cursor(&self) -> CursorKind {
        match self {
            InteractionMode::Select => CursorKind::Default,
            InteractionMode::DrawShape(_) | InteractionMode::DrawLine => CursorKind::Cross,
        }
    }
}

/// Abstract cursor requested from the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorKind {
    Default,
    Cross,
}

/// Pixel thresholds used while interpreting gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSettings {
    pub dot_hit_radius: f64,
    pub connection_tolerance: f64,
}

impl From<&EditorConfig> for InteractionSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            dot_hit_radius: config.dot_hit_radius,
            connection_tolerance: config.connection_tolerance,
        }
    }
}

/// Gesture in progress within the current mode.
#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    Drag(select::Drag),
    Place(draw_shape::Placement),
    Connect(PendingLine),
}

/// Interaction state: current mode, selection and in-flight gesture.
#[derive(Debug, Clone)]
pub struct Interaction {
    mode: InteractionMode,
    selected: Option<ShapeId>,
    gesture: Gesture,
    editing_text: Option<ShapeId>,
    clicks: ClickTracker,
    settings: InteractionSettings,
    cursor_change: Option<CursorKind>,
}

impl Interaction {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            mode: InteractionMode::Select,
            selected: None,
            gesture: Gesture::Idle,
            editing_text: None,
            clicks: ClickTracker::new(config.double_click_window(), config.double_click_distance),
            settings: InteractionSettings::from(config),
            cursor_change: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// The tool matching the current mode.
    pub fn tool(&self) -> ToolKind {
        match self.mode {
            InteractionMode::Select => ToolKind::Pointer,
            InteractionMode::DrawShape(kind) => ToolKind::Shape(kind),
            InteractionMode::DrawLine => ToolKind::Line,
        }
    }

    /// Arm a tool. Drawing tools clear the selection.
    pub fn set_tool(&mut self, tool: ToolKind, graph: &mut ShapeGraph) {
        self.cancel_gesture(graph);
        let mode = match tool {
            ToolKind::Pointer => InteractionMode::Select,
            ToolKind::Shape(kind) if kind.is_line() => InteractionMode::DrawLine,
            ToolKind::Shape(kind) => InteractionMode::DrawShape(kind),
            ToolKind::Line => InteractionMode::DrawLine,
        };
        if mode != InteractionMode::Select {
            self.selected = None;
            self.editing_text = None;
        }
        self.enter(mode);
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Select a shape from outside (e.g. the shape table).
    pub fn select(&mut self, id: Option<ShapeId>) {
        self.selected = id;
    }

    /// Drop references to shapes that no longer exist.
    pub fn forget_missing(&mut self, graph: &ShapeGraph) {
        if self.selected.is_some_and(|id| !graph.contains(id)) {
            self.selected = None;
        }
        if self.editing_text.is_some_and(|id| !graph.contains(id)) {
            self.editing_text = None;
        }
    }

    /// What the current drag is moving, if anything.
    pub fn drag_target(&self) -> Option<DragTarget> {
        match &self.gesture {
            Gesture::Drag(drag) => Some(drag.target),
            _ => None,
        }
    }

    /// Live rubber-band box while placing a shape.
    pub fn preview_rect(&self) -> Option<(ShapeKind, Rect)> {
        match &self.gesture {
            Gesture::Place(placement) => Some((placement.kind, placement.rect())),
            _ => None,
        }
    }

    pub fn pending_line_start(&self) -> Option<&PendingLine> {
        match &self.gesture {
            Gesture::Connect(pending) => Some(pending),
            _ => None,
        }
    }

    /// Shape whose caption is open for editing.
    pub fn editing_text(&self) -> Option<ShapeId> {
        self.editing_text
    }

    /// Cursor requested since the last call, if it changed.
    pub fn take_cursor_change(&mut self) -> Option<CursorKind> {
        self.cursor_change.take()
    }

    /// Feed one pointer event. Returns the command to run, if the gesture completed one.
    pub fn handle_pointer(
        &mut self,
        graph: &mut ShapeGraph,
        event: PointerEvent,
        now: Instant,
    ) -> Option<EditCommand> {
        if event.button().is_some_and(|b| b != MouseButton::Left) {
            return None;
        }
        let point = event.position();
        match (event, self.mode) {
            (PointerEvent::Down { .. }, InteractionMode::Select) => {
                self.select_down(graph, event.pixel(), point, now);
                None
            }
            (PointerEvent::Down { .. }, InteractionMode::DrawShape(kind)) => {
                self.place_down(kind, point);
                None
            }
            (PointerEvent::Down { .. }, InteractionMode::DrawLine) => self.connect_down(graph, point),
            (PointerEvent::Move { .. }, _) => {
                match self.mode {
                    InteractionMode::Select => self.select_move(graph, point),
                    InteractionMode::DrawShape(_) => self.place_move(point),
                    InteractionMode::DrawLine => self.connect_move(point),
                }
                None
            }
            (PointerEvent::Up { .. }, InteractionMode::Select) => self.select_up(graph, point),
            (PointerEvent::Up { .. }, InteractionMode::DrawShape(_)) => self.place_up(graph, point),
            (PointerEvent::Up { .. }, InteractionMode::DrawLine) => self.connect_up(graph, point),
        }
    }

    /// Issue a delete for the selected shape.
    pub fn delete_selected(&mut self, graph: &mut ShapeGraph) -> Option<EditCommand> {
        self.cancel_gesture(graph);
        let id = self.selected.take()?;
        if self.editing_text == Some(id) {
            self.editing_text = None;
        }
        DeleteShape::new(graph, id).map(EditCommand::from)
    }

    /// Close the caption editor. Empty text clears the caption.
    ///
    /// Returns `None` when no editor is open or the text did not change.
    pub fn commit_text(&mut self, graph: &ShapeGraph, text: &str) -> Option<EditCommand> {
        let id = self.editing_text.take()?;
        let new_text = (!text.is_empty()).then(|| text.to_string());
        if graph.get(id)?.text() == new_text.as_deref() {
            return None;
        }
        ModifyText::new(graph, id, new_text).map(EditCommand::from)
    }

    pub fn cancel_text_edit(&mut self) {
        self.editing_text = None;
    }

    /// Abandon the in-flight gesture, reverting any live drag.
    pub fn cancel_gesture(&mut self, graph: &mut ShapeGraph) {
        if let Gesture::Drag(drag) = std::mem::take(&mut self.gesture) {
            drag.revert(graph);
        }
    }

    /// Run `f` on the graph as committed, without the live drag preview.
    ///
    /// The preview is put back afterwards, so the gesture carries on.
    pub fn with_committed<R>(
        &self,
        graph: &mut ShapeGraph,
        f: impl FnOnce(&ShapeGraph) -> R,
    ) -> R {
        let Gesture::Drag(drag) = &self.gesture else {
            return f(graph);
        };
        drag.revert(graph);
        let result = f(graph);
        drag.reapply(graph);
        result
    }

    /// Draw the preview box or pending line on top of the scene.
    pub fn draw_overlay(&self, surface: &mut dyn DrawPrimitives) {
        match &self.gesture {
            Gesture::Place(placement) => render_preview(placement.kind, placement.rect(), surface),
            Gesture::Connect(pending) => render_pending_line(pending.start.point, pending.pointer, surface),
            _ => {}
        }
    }

    fn enter(&mut self, mode: InteractionMode) {
        if self.mode.cursor() != mode.cursor() {
            self.cursor_change = Some(mode.cursor());
        }
        if self.mode != mode {
            log::debug!("interaction mode: {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.gesture = Gesture::Idle;
    }
}
