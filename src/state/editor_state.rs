//! The gesture state machine of the editor.
//!
//! ```text
//!              ┌─────────────┐
//!        ┌─────►   Drawing   ├─────┐
//!        │     └─────────────┘     │
//! ┌──────┴───┐                 ┌───▼──────┐
//! │   Idle   │                 │   Idle   │
//! └──────┬───┘                 └───▲──────┘
//!        │     ┌─────────────┐     │
//!        └─────► Transforming├─────┘
//!              └─────────────┘
//! ```
//!
//! `Drawing` lasts while a multi-click strategy holds buffered points;
//! `Transforming` lasts from pointer press to release on the selected shape.
//! Switching tools returns to `Idle` from either.

use crate::shape::ShapeId;
use crate::tools::ToolKind;
use crate::transform::DragOperation;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    /// No active operation
    #[default]
    Idle,
    /// A strategy has collected points for an unfinished shape
    Drawing { tool: ToolKind },
    /// A drag gesture is running on `shape`
    Transforming {
        shape: ShapeId,
        operation: DragOperation,
    },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, _) => true,
            // More clicks for the same unfinished shape
            (EditorState::Drawing { tool: a }, EditorState::Drawing { tool: b }) => a == b,
            (EditorState::Drawing { .. }, EditorState::Idle) => true,
            (EditorState::Transforming { .. }, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    pub fn is_transforming(&self) -> bool {
        matches!(self, EditorState::Transforming { .. })
    }

    /// Returns the shape being dragged if in transforming state
    pub fn transforming_shape(&self) -> Option<ShapeId> {
        match self {
            EditorState::Transforming { shape, .. } => Some(*shape),
            _ => None,
        }
    }
}
