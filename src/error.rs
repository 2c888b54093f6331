use thiserror::Error;

/// Errors that cross the boundary from the editing engine to the host.
///
/// Only I/O and parse problems are reported this way. Geometry and
/// precondition problems (no selection, empty history, a polygon with too
/// few points) are resolved where they are detected and never surface here.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to (de)serialize drawing: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read or write drawing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Drawing must be a JSON array of shapes")]
    NotAnArray,

    #[error("Malformed {kind} record: {reason}")]
    MalformedShape { kind: String, reason: String },

    #[error("Invalid color {0:?}")]
    InvalidColor(String),
}

/// Result type for operations that can fail at the host boundary
pub type EditorResult<T> = Result<T, EditorError>;
