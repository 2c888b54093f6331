mod commands;
mod context;
mod history;
mod snapshot;

pub use commands::{Command, CommandKind, UndoToken};
pub use context::CommandContext;
pub use history::CommandHistory;
pub use snapshot::Snapshot;
