use crate::command::UndoToken;
use crate::shape::{ShapeId, ShapeKind};
use crate::tools::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    /// A drawing strategy finished a shape and it was inserted
    ShapeCommitted {
        id: ShapeId,
        kind: ShapeKind,
    },
    SelectionChanged(SelectionEvent),
    /// The one-shot gate of a shape fired at the start of a drag gesture
    InteractionStarted {
        id: ShapeId,
    },
    CommandExecuted {
        name: &'static str,
        token: UndoToken,
    },
    CommandUndone {
        name: &'static str,
    },
    /// Emitted whenever the history may have gone from empty to non-empty or back
    HistoryChanged {
        can_undo: bool,
    },
    DocumentChanged(DocumentEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected(ShapeId),
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    Cleared,
    Loaded { shape_count: usize },
    Saved,
}
