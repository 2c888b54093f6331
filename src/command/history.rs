use log::{debug, info};

use super::{Command, CommandContext, UndoToken};
use crate::document::Document;

/// Manages the history of executed commands for undo.
///
/// Only commands that changed something are recorded. There is no redo stack:
/// executing a command after an undo simply pushes on top.
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Oldest entries are dropped past this depth, `None` keeps everything
    max_depth: Option<usize>,
    next_token: u64,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `depth` commands
    pub fn with_depth(depth: Option<usize>) -> Self {
        Self {
            max_depth: depth,
            ..Self::default()
        }
    }

    /// Back up, execute and record `command`.
    ///
    /// Returns the token of the recorded entry, or `None` if the command was a
    /// query or had nothing to act on.
    pub fn execute(&mut self, mut command: Command, ctx: &mut CommandContext<'_>) -> Option<UndoToken> {
        if command.is_query() {
            command.execute(ctx);
            return None;
        }

        command.save_backup(ctx.document);
        if !command.execute(ctx) {
            debug!("{} had no effect, not recorded", command.name());
            return None;
        }
        Some(self.push(command))
    }

    /// Record an already executed command
    pub fn push(&mut self, mut command: Command) -> UndoToken {
        let token = UndoToken(self.next_token);
        self.next_token += 1;
        command.token = Some(token);
        debug!("Recorded {} ({:?})", command.name(), token);
        self.undo_stack.push(command);

        if let Some(depth) = self.max_depth {
            while self.undo_stack.len() > depth {
                self.undo_stack.remove(0);
            }
        }
        token
    }

    /// Undo the last executed command, returning it
    pub fn undo(&mut self, document: &mut Document) -> Option<Command> {
        let command = self.undo_stack.pop()?;
        if command.undo(document) {
            info!("Undid {}", command.name());
        } else {
            debug!("{} has no backup, undo skipped", command.name());
        }
        Some(command)
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.undo_stack.pop()
    }

    pub fn peek(&self) -> Option<&Command> {
        self.undo_stack.last()
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;

    #[test]
    fn test_depth_drops_oldest() {
        let mut history = CommandHistory::with_depth(Some(2));
        let first = history.push(Command::new(CommandKind::Interaction, None));
        history.push(Command::new(CommandKind::Interaction, None));
        let last = history.push(Command::new(CommandKind::Interaction, None));

        assert_eq!(history.len(), 2);
        assert_eq!(history.peek().and_then(Command::token), Some(last));
        assert!(history.undo_stack.iter().all(|c| c.token() != Some(first)));
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut history = CommandHistory::new();
        let mut doc = Document::new();
        assert!(history.undo(&mut doc).is_none());
    }
}
