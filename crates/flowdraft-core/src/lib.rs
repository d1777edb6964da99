//! FlowDraft Core Library
//!
//! Platform-agnostic document model, editing history, pointer interaction and
//! persistence for the FlowDraft flowchart editor. Rendering and windowing are
//! left to the host, which implements [`DrawPrimitives`] and feeds pointer
//! events into an [`Editor`].

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod draw;
pub mod editor;
pub mod graph;
pub mod history;
pub mod input;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use commands::{Command, EditCommand};
pub use config::EditorConfig;
pub use dispatch::{DispatchHandle, Dispatcher, EditorEvent};
pub use draw::{DrawContext, DrawPrimitives, render_graph};
pub use editor::{Editor, Notification};
pub use graph::{GraphChange, ShapeGraph};
pub use history::CommandManager;
pub use input::{ClickTracker, MouseButton, PointerEvent};
pub use shapes::{Anchor, Shape, ShapeId, ShapeKind, TextMetrics};
pub use storage::{DocumentFile, FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use tools::{CursorKind, Interaction, InteractionMode, ToolKind};
