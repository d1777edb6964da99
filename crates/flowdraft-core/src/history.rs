//! Undo/redo stacks.

use crate::commands::{Command, EditCommand};
use crate::graph::ShapeGraph;

/// Availability transitions, raised only when a stack goes empty <-> non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    CanUndoChanged(bool),
    CanRedoChanged(bool),
}

/// Two-stack command history.
#[derive(Debug, Default)]
pub struct CommandManager {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
    events: Vec<HistoryEvent>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a new command. Any pending redo chain is discarded.
    pub fn execute(&mut self, command: EditCommand, graph: &mut ShapeGraph) {
        let (could_undo, could_redo) = (self.can_undo(), self.can_redo());
        log::debug!("execute: {}", command.name());
        command.execute(graph);
        self.undo_stack.push(command);
        self.redo_stack.clear();
        self.emit_transitions(could_undo, could_redo);
    }

    /// Undo the last command. Returns false if there was nothing to undo.
    pub fn undo(&mut self, graph: &mut ShapeGraph) -> bool {
        let (could_undo, could_redo) = (self.can_undo(), self.can_redo());
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("undo: {}", command.name());
        command.undo(graph);
        self.redo_stack.push(command);
        self.emit_transitions(could_undo, could_redo);
        true
    }

    /// Redo the last undone command. Returns false if there was nothing to redo.
    pub fn redo(&mut self, graph: &mut ShapeGraph) -> bool {
        let (could_undo, could_redo) = (self.can_undo(), self.can_redo());
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        log::debug!("redo: {}", command.name());
        command.execute(graph);
        self.undo_stack.push(command);
        self.emit_transitions(could_undo, could_redo);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Name of the command `undo` would revert, for menu labels.
    pub fn undo_name(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|cmd| cmd.name())
    }

    pub fn redo_name(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|cmd| cmd.name())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        let (could_undo, could_redo) = (self.can_undo(), self.can_redo());
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.emit_transitions(could_undo, could_redo);
    }

    /// Take the pending availability transitions.
    pub fn drain_events(&mut self) -> Vec<HistoryEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit_transitions(&mut self, could_undo: bool, could_redo: bool) {
        if could_undo != self.can_undo() {
            self.events.push(HistoryEvent::CanUndoChanged(self.can_undo()));
        }
        if could_redo != self.can_redo() {
            self.events.push(HistoryEvent::CanRedoChanged(self.can_redo()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::AddShape;
    use crate::shapes::{Shape, ShapeKind};
    use kurbo::Rect;

    fn add(graph: &mut ShapeGraph) -> EditCommand {
        let metrics = *graph.metrics();
        let id = graph.generate_id();
        AddShape::new(Shape::from_kind(
            ShapeKind::Process,
            id,
            Rect::new(0.0, 0.0, 40.0, 20.0),
            &metrics,
        ))
        .into()
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut graph = ShapeGraph::new();
        let mut history = CommandManager::new();
        assert!(!history.undo(&mut graph));
        assert!(!history.redo(&mut graph));
        assert!(history.drain_events().is_empty());
    }

    #[test]
    fn test_execute_after_undo_clears_redo() {
        let mut graph = ShapeGraph::new();
        let mut history = CommandManager::new();
        let a = add(&mut graph);
        history.execute(a, &mut graph);
        history.undo(&mut graph);
        assert!(history.can_redo());
        let b = add(&mut graph);
        history.execute(b, &mut graph);
        assert!(!history.can_redo());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_transitions_fire_only_on_edges() {
        let mut graph = ShapeGraph::new();
        let mut history = CommandManager::new();
        let a = add(&mut graph);
        history.execute(a, &mut graph);
        let b = add(&mut graph);
        history.execute(b, &mut graph);
        assert_eq!(history.drain_events(), vec![HistoryEvent::CanUndoChanged(true)]);

        history.undo(&mut graph);
        assert_eq!(history.drain_events(), vec![HistoryEvent::CanRedoChanged(true)]);
        history.undo(&mut graph);
        assert_eq!(history.drain_events(), vec![HistoryEvent::CanUndoChanged(false)]);

        history.redo(&mut graph);
        history.redo(&mut graph);
        assert_eq!(
            history.drain_events(),
            vec![HistoryEvent::CanUndoChanged(true), HistoryEvent::CanRedoChanged(false)]
        );
    }

    #[test]
    fn test_execute_undo_redo_matches_execute() {
        let mut graph = ShapeGraph::new();
        let mut history = CommandManager::new();
        let cmd = add(&mut graph);
        history.execute(cmd, &mut graph);
        let once = graph.snapshot();
        history.undo(&mut graph);
        history.redo(&mut graph);
        assert_eq!(graph.snapshot(), once);
        assert_eq!(history.undo_name(), Some("Add Shape"));
        assert_eq!(history.redo_name(), None);
    }
}
