//! The editor: graph, history and interaction driven from the UI thread.

use crate::commands::{EditCommand, Load, ModifyText, MoveShape, MoveText};
use crate::config::EditorConfig;
use crate::dispatch::{Dispatcher, EditorEvent};
use crate::draw::{DrawContext, DrawPrimitives, render_graph};
use crate::graph::{GraphChange, ShapeGraph};
use crate::history::{CommandManager, HistoryEvent};
use crate::input::{MouseButton, PointerEvent};
use crate::shapes::ShapeId;
use crate::storage::{
    AutoSaveManager, AutoSaveScheduler, DocumentFile, FileStorage, SavePurpose, Storage,
    StorageError, StorageResult, backup_key, latest_backup, spawn_save,
};
use crate::tools::{CursorKind, Interaction, ToolKind};
use chrono::Local;
use kurbo::{Point, Vec2};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Observable change raised on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    GraphChanged(Vec<GraphChange>),
    CanUndoChanged(bool),
    CanRedoChanged(bool),
    SavingChanged(bool),
    Saved { key: String, purpose: SavePurpose },
    SaveFailed { key: String, purpose: SavePurpose, error: StorageError },
}

type Listener = Box<dyn FnMut(&Notification)>;
type CursorSetter = Box<dyn FnMut(CursorKind)>;

/// Editor core. Owned by the UI thread; background work reports back through
/// the dispatcher and is applied in [`Editor::poll_events`].
pub struct Editor {
    config: EditorConfig,
    graph: ShapeGraph,
    history: CommandManager,
    interaction: Interaction,
    dispatcher: Dispatcher,
    saving: bool,
    autosave: Option<AutoSaveManager>,
    scheduler: Option<AutoSaveScheduler>,
    cursor_setter: Option<CursorSetter>,
    listeners: Vec<Listener>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_dispatcher(config, Dispatcher::new())
    }

    /// Use a dispatcher with a waker so the host loop is nudged on background completions.
    pub fn with_dispatcher(config: EditorConfig, dispatcher: Dispatcher) -> Self {
        Self {
            graph: ShapeGraph::with_metrics(config.text_metrics),
            history: CommandManager::new(),
            interaction: Interaction::new(&config),
            dispatcher,
            saving: false,
            autosave: None,
            scheduler: None,
            cursor_setter: None,
            listeners: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn graph(&self) -> &ShapeGraph {
        &self.graph
    }

    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.interaction.selected()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether a save or backup is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Register the host's cursor callback.
    pub fn set_cursor_setter(&mut self, setter: impl FnMut(CursorKind) + 'static) {
        self.cursor_setter = Some(Box::new(setter));
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&Notification) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn pointer_down(&mut self, x: i32, y: i32, button: MouseButton) {
        self.handle_pointer(PointerEvent::Down { x, y, button }, Instant::now());
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.handle_pointer(PointerEvent::Move { x, y }, Instant::now());
    }

    pub fn pointer_up(&mut self, x: i32, y: i32, button: MouseButton) {
        self.handle_pointer(PointerEvent::Up { x, y, button }, Instant::now());
    }

    /// Feed a pointer event stamped with `now`.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        if let Some(command) = self.interaction.handle_pointer(&mut self.graph, event, now) {
            self.history.execute(command, &mut self.graph);
        }
        self.flush();
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.interaction.set_tool(tool, &mut self.graph);
        self.flush();
    }

    pub fn select(&mut self, id: Option<ShapeId>) {
        self.interaction.select(id.filter(|id| self.graph.contains(*id)));
    }

    /// Replace a shape's caption, e.g. from a property form. `None` or an
    /// empty string clears it. Returns false if the shape is unknown or the
    /// caption is unchanged.
    pub fn set_text(&mut self, id: ShapeId, text: Option<&str>) -> bool {
        self.interaction.cancel_gesture(&mut self.graph);
        let text = text.filter(|t| !t.is_empty());
        if self.graph.get(id).is_none_or(|shape| shape.text() == text) {
            return false;
        }
        let command = ModifyText::new(&self.graph, id, text.map(str::to_string));
        self.run(command.map(EditCommand::from))
    }

    /// Move a shape so its top-left corner is at `position`. The caption and
    /// attached line ends follow.
    pub fn move_shape_to(&mut self, id: ShapeId, position: Point) -> bool {
        self.interaction.cancel_gesture(&mut self.graph);
        let Some(frame) = self.graph.get(id).filter(|s| !s.is_line()).map(|s| s.frame()) else {
            return false;
        };
        let (old_position, old_text) = (frame.position, frame.text_position);
        let delta = position - old_position;
        if delta == Vec2::ZERO {
            return false;
        }
        let command = MoveShape::new(
            &self.graph,
            id,
            old_position,
            old_text,
            position,
            old_text + delta,
        );
        self.run(command.map(EditCommand::from))
    }

    /// Move a shape's caption. The position is clamped into the shape's box.
    pub fn move_text_to(&mut self, id: ShapeId, text_position: Point) -> bool {
        self.interaction.cancel_gesture(&mut self.graph);
        let Some(frame) = self.graph.get(id).map(|s| s.frame()) else {
            return false;
        };
        let old = frame.text_position;
        if frame.clamp_text_position(text_position) == old {
            return false;
        }
        let command = MoveText::new(&self.graph, id, old, text_position);
        self.run(command.map(EditCommand::from))
    }

    /// Run a command built from the committed graph.
    fn run(&mut self, command: Option<EditCommand>) -> bool {
        let ran = command.is_some();
        if let Some(command) = command {
            self.history.execute(command, &mut self.graph);
        }
        self.interaction.forget_missing(&self.graph);
        self.flush();
        ran
    }

    pub fn undo(&mut self) -> bool {
        self.interaction.cancel_gesture(&mut self.graph);
        let undone = self.history.undo(&mut self.graph);
        self.interaction.forget_missing(&self.graph);
        self.flush();
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.interaction.cancel_gesture(&mut self.graph);
        let redone = self.history.redo(&mut self.graph);
        self.interaction.forget_missing(&self.graph);
        self.flush();
        redone
    }

    /// Delete the selected shape and its lines as one undo step.
    pub fn delete_selected(&mut self) -> bool {
        let command = self.interaction.delete_selected(&mut self.graph);
        let deleted = command.is_some();
        if let Some(command) = command {
            self.history.execute(command, &mut self.graph);
        }
        self.flush();
        deleted
    }

    /// Commit the open caption editor. Returns true if the caption changed.
    pub fn commit_text(&mut self, text: &str) -> bool {
        self.interaction.cancel_gesture(&mut self.graph);
        let command = self.interaction.commit_text(&self.graph, text);
        let changed = command.is_some();
        if let Some(command) = command {
            self.history.execute(command, &mut self.graph);
        }
        self.flush();
        changed
    }

    pub fn cancel_text_edit(&mut self) {
        self.interaction.cancel_text_edit();
    }

    /// Start over with an empty document and no history.
    pub fn new_document(&mut self) {
        self.interaction.cancel_gesture(&mut self.graph);
        self.graph.replace_all(Vec::new());
        self.history.clear();
        self.interaction.forget_missing(&self.graph);
        self.flush();
    }

    /// Save a snapshot of the graph in the background.
    ///
    /// Fails immediately if another save is in flight.
    pub fn save(&mut self, storage: Arc<dyn Storage>, key: &str) -> StorageResult<()> {
        self.start_save(storage, key.to_string(), SavePurpose::Document)
    }

    /// Save to a `.json` file path in the background.
    pub fn save_file(&mut self, path: &Path) -> StorageResult<()> {
        let (storage, key) = FileStorage::for_file(path)?;
        self.save(Arc::new(storage), &key)
    }

    /// Replace the document with stored content, as one undoable step.
    ///
    /// On failure the graph is left untouched.
    pub fn load(&mut self, storage: &dyn Storage, key: &str) -> StorageResult<()> {
        let shapes = pollster::block_on(storage.load(key))
            .and_then(|document| document.into_shapes(self.graph.metrics()))
            .inspect_err(|e| log::error!("load of {} failed: {}", key, e))?;
        log::info!("loaded {} ({} shapes)", key, shapes.len());
        self.interaction.cancel_gesture(&mut self.graph);
        let command = Load::new(&self.graph, key, shapes);
        self.run(Some(command.into()));
        Ok(())
    }

    pub fn load_file(&mut self, path: &Path) -> StorageResult<()> {
        let (storage, key) = FileStorage::for_file(path)?;
        self.load(&storage, &key)
    }

    /// Start periodic backups into `storage`.
    pub fn enable_autosave(&mut self, storage: Arc<dyn Storage>) -> StorageResult<()> {
        let scheduler =
            AutoSaveScheduler::start(self.config.autosave_interval(), self.dispatcher.handle())?;
        self.autosave = Some(AutoSaveManager::new(
            storage,
            self.config.backup_count,
            self.graph.revision(),
        ));
        self.scheduler = Some(scheduler);
        log::info!(
            "autosave enabled every {:?}, keeping {} backups",
            self.config.autosave_interval(),
            self.config.backup_count
        );
        Ok(())
    }

    /// Start periodic backups into the configured backup directory.
    pub fn enable_default_autosave(&mut self) -> StorageResult<()> {
        let storage = FileStorage::new(self.config.backup_dir.clone())?;
        self.enable_autosave(Arc::new(storage))
    }

    pub fn disable_autosave(&mut self) {
        self.scheduler = None;
        self.autosave = None;
    }

    /// Run one autosave tick now. Returns true if a backup was started.
    pub fn autosave_now(&mut self) -> bool {
        let revision = self.graph.revision();
        let Some(manager) = self.autosave.as_mut() else {
            return false;
        };
        if !manager.should_save(revision, self.saving) {
            log::debug!(
                "autosave skipped (saving: {}, dirty: {})",
                self.saving,
                manager.is_dirty(revision)
            );
            return false;
        }
        manager.begin(revision);
        let storage = manager.storage().clone();
        let purpose = SavePurpose::Backup {
            keep: manager.keep(),
        };
        match self.start_save(storage, backup_key(Local::now()), purpose) {
            Ok(()) => true,
            Err(e) => {
                log::error!("autosave could not start: {}", e);
                if let Some(manager) = self.autosave.as_mut() {
                    manager.finish(false);
                }
                false
            }
        }
    }

    /// Load the newest backup. Returns false when there is none.
    pub fn restore_latest_backup(&mut self) -> StorageResult<bool> {
        let storage: Arc<dyn Storage> = match &self.autosave {
            Some(manager) => manager.storage().clone(),
            None => Arc::new(FileStorage::new(self.config.backup_dir.clone())?),
        };
        let Some(key) = pollster::block_on(latest_backup(storage.as_ref()))? else {
            log::info!("no backup to restore");
            return Ok(false);
        };
        self.load(storage.as_ref(), &key)?;
        Ok(true)
    }

    /// Apply background completions. Call from the UI thread.
    ///
    /// Returns the number of events handled.
    pub fn poll_events(&mut self) -> usize {
        let events = self.dispatcher.drain();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        self.flush();
        count
    }

    /// Block up to `timeout` for the first event, then handle everything queued.
    pub fn wait_events(&mut self, timeout: Duration) -> usize {
        match self.dispatcher.wait_timeout(timeout) {
            Some(event) => {
                self.handle_event(event);
                1 + self.poll_events()
            }
            None => 0,
        }
    }

    /// Draw the scene and any in-progress gesture.
    pub fn draw(&self, surface: &mut dyn DrawPrimitives) {
        let ctx = DrawContext::new(self.interaction.selected(), self.config.text_metrics);
        render_graph(&self.graph, surface, &ctx);
        self.interaction.draw_overlay(surface);
    }

    fn start_save(
        &mut self,
        storage: Arc<dyn Storage>,
        key: String,
        purpose: SavePurpose,
    ) -> StorageResult<()> {
        if self.saving {
            return Err(StorageError::Other("a save is already in progress".to_string()));
        }
        let document = self
            .interaction
            .with_committed(&mut self.graph, DocumentFile::from_graph);
        spawn_save(storage, key, document, purpose, self.dispatcher.handle())?;
        self.saving = true;
        self.notify(Notification::SavingChanged(true));
        Ok(())
    }

    fn handle_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::SaveFinished {
                key,
                purpose,
                result,
            } => {
                self.saving = false;
                if let SavePurpose::Backup { .. } = purpose {
                    if let Some(manager) = self.autosave.as_mut() {
                        manager.finish(result.is_ok());
                    }
                }
                self.notify(Notification::SavingChanged(false));
                let notification = match result {
                    Ok(()) => Notification::Saved { key, purpose },
                    Err(error) => Notification::SaveFailed {
                        key,
                        purpose,
                        error,
                    },
                };
                self.notify(notification);
            }
            EditorEvent::AutosaveTick => {
                self.autosave_now();
            }
        }
    }

    /// Deliver queued graph, history and cursor changes.
    fn flush(&mut self) {
        let changes = self.graph.drain_changes();
        if !changes.is_empty() {
            self.notify(Notification::GraphChanged(changes));
        }
        for event in self.history.drain_events() {
            let notification = match event {
                HistoryEvent::CanUndoChanged(can) => Notification::CanUndoChanged(can),
                HistoryEvent::CanRedoChanged(can) => Notification::CanRedoChanged(can),
            };
            self.notify(notification);
        }
        if let Some(cursor) = self.interaction.take_cursor_change() {
            if let Some(setter) = self.cursor_setter.as_mut() {
                setter(cursor);
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        for listener in &mut self.listeners {
            listener(&notification);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCall, Recorder};
    use crate::shapes::ShapeKind;
    use crate::storage::{BoxFuture, MemoryStorage};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn save(&self, _: &str, _: &DocumentFile) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Err(StorageError::Io("disk full".to_string())) })
        }

        fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<DocumentFile>> {
            let key = key.to_string();
            Box::pin(async move { Err(StorageError::NotFound(key)) })
        }

        fn delete(&self, _: &str) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn exists(&self, _: &str) -> BoxFuture<'_, StorageResult<bool>> {
            Box::pin(async { Ok(false) })
        }
    }

    fn place(editor: &mut Editor, kind: ShapeKind, x0: i32, y0: i32, x1: i32, y1: i32) -> ShapeId {
        editor.set_tool(ToolKind::Shape(kind));
        editor.pointer_down(x0, y0, MouseButton::Left);
        editor.pointer_move(x1, y1);
        editor.pointer_up(x1, y1, MouseButton::Left);
        *editor.graph().all_ids_ordered_by_creation().last().unwrap()
    }

    fn recorded(editor: &mut Editor) -> Rc<RefCell<Vec<Notification>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        editor.subscribe(move |n| sink.borrow_mut().push(n.clone()));
        seen
    }

    #[test]
    fn test_notifications_for_placement_and_undo() {
        let mut editor = Editor::default();
        let seen = recorded(&mut editor);
        let id = place(&mut editor, ShapeKind::Process, 10, 10, 110, 60);

        assert!(seen
            .borrow()
            .contains(&Notification::GraphChanged(vec![GraphChange::Added(id)])));
        assert!(seen.borrow().contains(&Notification::CanUndoChanged(true)));

        seen.borrow_mut().clear();
        assert!(editor.undo());
        assert_eq!(
            *seen.borrow(),
            vec![
                Notification::GraphChanged(vec![GraphChange::Removed(id)]),
                Notification::CanUndoChanged(false),
                Notification::CanRedoChanged(true),
            ]
        );
        assert!(!editor.undo());
    }

    #[test]
    fn test_cursor_setter_follows_tool() {
        let mut editor = Editor::default();
        let cursors = Rc::new(RefCell::new(Vec::new()));
        let sink = cursors.clone();
        editor.set_cursor_setter(move |c| sink.borrow_mut().push(c));
        place(&mut editor, ShapeKind::Start, 0, 0, 40, 40);
        assert_eq!(*cursors.borrow(), vec![CursorKind::Cross, CursorKind::Default]);
    }

    #[test]
    fn test_background_save_reports_on_ui_thread() {
        let mut editor = Editor::default();
        place(&mut editor, ShapeKind::Decision, 0, 0, 80, 40);
        let seen = recorded(&mut editor);
        let storage = Arc::new(MemoryStorage::new());

        editor.save(storage.clone(), "chart").unwrap();
        assert!(editor.is_saving());
        assert!(editor.save(storage.clone(), "chart").is_err());

        assert_eq!(editor.wait_events(Duration::from_secs(5)), 1);
        assert!(!editor.is_saving());
        assert!(seen.borrow().contains(&Notification::Saved {
            key: "chart".to_string(),
            purpose: SavePurpose::Document,
        }));
        let stored = pollster::block_on(storage.load("chart")).unwrap();
        assert_eq!(stored, DocumentFile::from_graph(editor.graph()));
    }

    #[test]
    fn test_failed_save_is_reported() {
        let mut editor = Editor::default();
        let seen = recorded(&mut editor);
        editor.save(Arc::new(FailingStorage), "chart").unwrap();
        editor.wait_events(Duration::from_secs(5));
        assert!(!editor.is_saving());
        assert!(seen.borrow().iter().any(|n| matches!(
            n,
            Notification::SaveFailed { error: StorageError::Io(_), .. }
        )));
    }

    #[test]
    fn test_failed_load_leaves_graph_untouched() {
        let mut editor = Editor::default();
        place(&mut editor, ShapeKind::Process, 0, 0, 50, 50);
        let before = editor.graph().snapshot();
        let err = editor.load(&FailingStorage, "missing").unwrap_err();
        assert_eq!(err, StorageError::NotFound("missing".to_string()));
        assert_eq!(editor.graph().snapshot(), before);
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_load_is_undoable() {
        let storage = MemoryStorage::new();
        let mut source = Editor::default();
        place(&mut source, ShapeKind::Terminator, 0, 0, 90, 30);
        place(&mut source, ShapeKind::Process, 0, 100, 90, 130);
        pollster::block_on(storage.save("two", &DocumentFile::from_graph(source.graph()))).unwrap();

        let mut editor = Editor::default();
        place(&mut editor, ShapeKind::Start, 0, 0, 10, 10);
        let before = editor.graph().snapshot();
        editor.load(&storage, "two").unwrap();
        assert_eq!(editor.graph().snapshot(), source.graph().snapshot());
        assert_eq!(editor.history().undo_name(), Some("Open"));

        editor.undo();
        assert_eq!(editor.graph().snapshot(), before);
    }

    #[test]
    fn test_autosave_skips_clean_graph_and_rotates() {
        let storage = Arc::new(MemoryStorage::new());
        let config = EditorConfig {
            autosave_interval_secs: 3600,
            backup_count: 2,
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config);
        editor.enable_autosave(storage.clone()).unwrap();
        assert!(!editor.autosave_now());

        for i in 0..3 {
            place(&mut editor, ShapeKind::Process, 0, i * 100, 50, i * 100 + 40);
            assert!(editor.autosave_now());
            assert!(!editor.autosave_now());
            editor.wait_events(Duration::from_secs(5));
            assert!(!editor.autosave_now());
            std::thread::sleep(Duration::from_millis(2));
        }
        let backups = pollster::block_on(storage.list()).unwrap();
        assert_eq!(backups.len(), 2);

        let mut restored = Editor::default();
        restored.enable_autosave(storage.clone()).unwrap();
        assert!(restored.restore_latest_backup().unwrap());
        assert_eq!(restored.graph().len(), 3);
    }

    #[test]
    fn test_draw_marks_selection() {
        let mut editor = Editor::default();
        let id = place(&mut editor, ShapeKind::Process, 0, 0, 100, 50);
        editor.select(Some(id));
        let mut rec = Recorder::new();
        editor.draw(&mut rec);
        assert_eq!(rec.calls[0], DrawCall::Rectangle(0.0, 0.0, 100.0, 50.0));
        assert!(matches!(rec.calls.last(), Some(DrawCall::TextBorder(..))));
    }

    /// Press inside the node placed at (0,0)-(100,50) and drag it to (300,200)
    /// without releasing.
    fn mid_drag(editor: &mut Editor, id: ShapeId) {
        editor.pointer_down(5, 5, MouseButton::Left);
        editor.pointer_move(305, 205);
        assert_eq!(
            editor.graph().get(id).unwrap().frame().position,
            Point::new(300.0, 200.0)
        );
    }

    #[test]
    fn test_load_mid_drag_undoes_to_committed_state() {
        let storage = MemoryStorage::new();
        pollster::block_on(storage.save("empty", &DocumentFile::default())).unwrap();
        let mut editor = Editor::default();
        let id = place(&mut editor, ShapeKind::Process, 0, 0, 100, 50);
        let before = editor.graph().snapshot();

        mid_drag(&mut editor, id);
        editor.load(&storage, "empty").unwrap();
        assert!(editor.graph().is_empty());
        assert_eq!(editor.interaction().drag_target(), None);

        editor.undo();
        assert_eq!(editor.graph().snapshot(), before);
    }

    #[test]
    fn test_set_text_mid_drag_keeps_caption_inside() {
        let mut editor = Editor::default();
        let id = place(&mut editor, ShapeKind::Process, 0, 0, 100, 50);
        let before = editor.graph().snapshot();

        mid_drag(&mut editor, id);
        assert!(editor.set_text(id, Some("Go")));
        let frame = editor.graph().get(id).unwrap().frame();
        assert_eq!(frame.position, Point::ZERO);
        assert!(frame.contains(frame.text_position));
        assert!(!editor.set_text(id, Some("Go")));

        editor.undo();
        assert_eq!(editor.graph().snapshot(), before);
        assert!(!editor.set_text(id, Some("")));
        assert!(!editor.set_text(99, Some("Go")));
    }

    #[test]
    fn test_save_mid_drag_writes_committed_geometry() {
        let storage = Arc::new(MemoryStorage::new());
        let mut editor = Editor::default();
        let id = place(&mut editor, ShapeKind::Process, 0, 0, 100, 50);

        mid_drag(&mut editor, id);
        editor.save(storage.clone(), "chart").unwrap();
        assert_eq!(
            editor.graph().get(id).unwrap().frame().position,
            Point::new(300.0, 200.0)
        );
        editor.wait_events(Duration::from_secs(5));
        let stored = pollster::block_on(storage.load("chart")).unwrap();
        assert_eq!((stored.shapes[0].position_x, stored.shapes[0].position_y), (0.0, 0.0));

        editor.pointer_up(305, 205, MouseButton::Left);
        assert_eq!(editor.history().undo_name(), Some("Move Shape"));
    }

    #[test]
    fn test_move_helpers_are_undoable() {
        let mut editor = Editor::default();
        let id = place(&mut editor, ShapeKind::Terminator, 0, 0, 100, 50);
        let before = editor.graph().snapshot();
        let text_before = editor.graph().get(id).unwrap().frame().text_position;

        assert!(editor.move_shape_to(id, Point::new(40.0, 60.0)));
        let frame = editor.graph().get(id).unwrap().frame();
        assert_eq!(frame.position, Point::new(40.0, 60.0));
        assert_eq!(frame.text_position, text_before + Vec2::new(40.0, 60.0));
        assert!(!editor.move_shape_to(id, Point::new(40.0, 60.0)));

        assert!(editor.move_text_to(id, Point::new(500.0, 500.0)));
        let frame = editor.graph().get(id).unwrap().frame();
        assert_eq!(frame.text_position, Point::new(140.0, 110.0));

        editor.undo();
        editor.undo();
        assert_eq!(editor.graph().snapshot(), before);
    }
}
