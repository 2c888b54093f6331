#![warn(clippy::all, rust_2018_idioms)]

pub mod clipboard;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod persistence;
pub mod shape;
pub mod state;
pub mod style;
pub mod tools;
pub mod transform;

pub use clipboard::Clipboard;
pub use command::{Command, CommandHistory, CommandKind, UndoToken};
pub use config::EditorConfig;
pub use document::Document;
pub use error::{EditorError, EditorResult};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use shape::{Shape, ShapeId, ShapeKind, factory};
pub use state::{EditorContext, EditorState};
pub use style::{StyleParam, StyleParams};
pub use tools::{DrawingStrategy, Marker, Strategy, ToolKind};
pub use transform::TransformMode;
