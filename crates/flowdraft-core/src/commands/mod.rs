//! Reversible graph mutations.
//!
//! Every edit the user makes reaches the graph as one of these commands. A
//! command captures everything it needs at construction time, so `undo`
//! restores state verbatim instead of re-deriving it from the current graph.

mod load;
mod structure;
mod text;
mod transform;

pub use load::Load;
pub use structure::{AddShape, DeleteShape, DrawLine};
pub use text::ModifyText;
pub use transform::{MoveShape, MoveText};

use crate::graph::ShapeGraph;

/// A command that can be executed and undone on the shape graph.
pub trait Command {
    /// Apply the command.
    fn execute(&self, graph: &mut ShapeGraph);

    /// Revert exactly what `execute` did.
    fn undo(&self, graph: &mut ShapeGraph);

    /// Returns the name of the command for display.
    fn name(&self) -> &'static str;
}

/// Closed set of edits understood by the command manager.
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum EditCommand {
    AddShape(AddShape),
    DeleteShape(DeleteShape),
    MoveShape(MoveShape),
    ModifyText(ModifyText),
    MoveText(MoveText),
    DrawLine(DrawLine),
    Load(Load),
}

impl EditCommand {
    fn inner(&self) -> &dyn Command {
        match self {
            EditCommand::AddShape(cmd) => cmd,
            EditCommand::DeleteShape(cmd) => cmd,
            EditCommand::MoveShape(cmd) => cmd,
            EditCommand::ModifyText(cmd) => cmd,
            EditCommand::MoveText(cmd) => cmd,
            EditCommand::DrawLine(cmd) => cmd,
            EditCommand::Load(cmd) => cmd,
        }
    }
}

impl Command for EditCommand {
    fn execute(&self, graph: &mut ShapeGraph) {
        self.inner().execute(graph);
    }

    fn undo(&self, graph: &mut ShapeGraph) {
        self.inner().undo(graph);
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EditCommand {
                fn from(cmd: $variant) -> Self {
                    EditCommand::$variant(cmd)
                }
            }
        )*
    };
}

impl_from_command!(AddShape, DeleteShape, MoveShape, ModifyText, MoveText, DrawLine, Load);
