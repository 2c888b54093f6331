//! The host-facing entry point of the editing engine.
//!
//! `EditorContext` owns the document, the undo history, the clipboard, the
//! current style and the active drawing strategy. The host surface forwards
//! clicks, pointer gestures, style changes and file bytes to it, and renders
//! whatever [`EditorContext::document`] and [`EditorContext::markers`] hold.
//!
//! Every mutation goes through a [`Command`]: it is backed up, executed and,
//! if it changed anything, pushed onto the history. Observers subscribe to
//! [`EditorContext::event_bus`].
//!
//! # Example
//!
//! ```rust
//! use egui::Pos2;
//! use vector_paint::{EditorContext, ToolKind};
//!
//! let mut editor = EditorContext::new();
//! editor.set_active_tool(ToolKind::Rectangle);
//! editor.on_surface_click(Pos2::new(50.0, 50.0), 1);
//! assert_eq!(editor.document().len(), 1);
//!
//! editor.undo();
//! assert!(editor.document().is_empty());
//! ```
use std::path::Path;

use egui::Pos2;
use log::{debug, info};

use super::EditorState;
use crate::clipboard::Clipboard;
use crate::command::{Command, CommandContext, CommandHistory, CommandKind, UndoToken};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::EditorResult;
use crate::event::{DocumentEvent, EditorEvent, EventBus, SelectionEvent};
use crate::persistence;
use crate::shape::{Shape, ShapeId};
use crate::style::{StyleParam, StyleParams};
use crate::tools::{DrawingStrategy, Marker, Strategy, ToolKind};
use crate::transform::{DragOperation, TransformMode};

#[derive(Debug)]
pub struct EditorContext {
    state: EditorState,
    document: Document,
    history: CommandHistory,
    clipboard: Clipboard,
    style: StyleParams,
    config: EditorConfig,
    strategy: Strategy,
    transform_mode: TransformMode,
    /// The event bus for broadcasting editor events
    pub event_bus: EventBus,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorContext {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Start from `config`; its default style becomes the current style
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            state: EditorState::Idle,
            document: Document::new(),
            history: CommandHistory::with_depth(config.history_depth),
            clipboard: Clipboard::new(),
            style: config.default_style.clone(),
            strategy: Strategy::default(),
            transform_mode: TransformMode::default(),
            event_bus: EventBus::new(),
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn style(&self) -> &StyleParams {
        &self.style
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn active_tool(&self) -> ToolKind {
        self.strategy.kind()
    }

    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        self.transform_mode = mode;
    }

    /// Markers of the points the active strategy has collected so far
    pub fn markers(&self) -> &[Marker] {
        self.strategy.markers()
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.document.selected()
    }

    /// Attempts to transition to a new state. Invalid transitions are refused
    /// and logged.
    fn transition_to(&mut self, new_state: EditorState) -> bool {
        if !self.state.can_transition_to(&new_state) {
            debug!("Refused state transition {:?} -> {:?}", self.state, new_state);
            return false;
        }
        self.state = new_state;
        true
    }

    // ---- Tools and clicks ----

    /// Activate `kind`. Selecting the active tool again goes back to idle.
    /// The outgoing strategy drops any unfinished shape.
    pub fn set_active_tool(&mut self, kind: ToolKind) {
        let old = self.strategy.kind();
        let new = if kind == old { ToolKind::Idle } else { kind };
        if old == new {
            return;
        }

        self.cancel_gesture();
        self.strategy.on_exit();
        self.strategy = Strategy::new(new, &self.config);
        self.state = EditorState::Idle;

        info!("Tool changed from {old:?} to {new:?}");
        self.event_bus.emit(EditorEvent::ToolChanged { old, new });
    }

    /// Handle a click on the drawing surface.
    ///
    /// A click with `click_count >= 2` completes the shape the active strategy
    /// is building. Otherwise, unless a shape is under construction, a click
    /// on an existing shape selects it; a click on empty space clears the
    /// selection and is handed to the strategy.
    pub fn on_surface_click(&mut self, pos: Pos2, click_count: u32) {
        if click_count >= 2 {
            if let Some(shape) = self.strategy.complete(&self.style) {
                self.commit_shape(shape);
            }
            self.sync_drawing_state();
            return;
        }

        if !self.strategy.is_in_progress() {
            let hit = self.document.shape_at(pos, self.config.segment_hit_tolerance).map(Shape::id);
            if let Some(id) = hit {
                self.select(id);
                return;
            }
            self.deselect();
        }

        if let Some(shape) = self.strategy.draw(pos, &self.style) {
            self.commit_shape(shape);
        }
        self.sync_drawing_state();
    }

    fn sync_drawing_state(&mut self) {
        if self.strategy.is_in_progress() {
            self.transition_to(EditorState::Drawing {
                tool: self.strategy.kind(),
            });
        } else if self.state.is_drawing() {
            self.state = EditorState::Idle;
        }
    }

    /// Insert a finished shape, after an undo checkpoint of the world without it
    fn commit_shape(&mut self, shape: Shape) {
        self.run(Command::new(CommandKind::Interaction, None));
        let kind = shape.kind();
        let id = self.document.add_shape(shape);
        info!("Committed {} {}", kind.type_name(), id);
        self.event_bus.emit(EditorEvent::ShapeCommitted { id, kind });
    }

    fn select(&mut self, id: ShapeId) {
        let before = self.document.selected_id();
        if self.document.select(id) && before != Some(id) {
            self.event_bus.emit(EditorEvent::SelectionChanged(SelectionEvent::Selected(id)));
        }
    }

    fn deselect(&mut self) {
        if self.document.selected_id().is_some() {
            self.document.clear_selection();
            self.event_bus.emit(EditorEvent::SelectionChanged(SelectionEvent::Cleared));
        }
    }

    fn sync_selection(&self, before: Option<ShapeId>) {
        let after = self.document.selected_id();
        if after != before {
            let event = match after {
                Some(id) => SelectionEvent::Selected(id),
                None => SelectionEvent::Cleared,
            };
            self.event_bus.emit(EditorEvent::SelectionChanged(event));
        }
    }

    // ---- Style ----

    /// Record a style change for future shapes and, for paint, rotation,
    /// font and text changes, apply it to the selected shape as an undoable
    /// command
    pub fn on_style_param_changed(&mut self, param: StyleParam) -> Option<UndoToken> {
        self.style.apply(&param);
        let kind = match param {
            StyleParam::EdgeColor(color) => CommandKind::ChangeEdgeColor(color),
            StyleParam::FillColor(color) => CommandKind::ChangeFillColor(color),
            StyleParam::Rotation(_) => CommandKind::Rotate(self.style.rotation),
            StyleParam::FontSize(_) => CommandKind::FontSize(self.style.font_size),
            StyleParam::Text(content) => CommandKind::ChangeText(content),
            StyleParam::Width(_) | StyleParam::Height(_) => return None,
        };

        self.document.selected_id()?;
        self.execute_command(kind)
    }

    // ---- Commands ----

    /// Run a command against the selected shape.
    ///
    /// Returns the token of the history entry, or `None` when nothing was
    /// recorded: queries like Copy, commands with nothing to act on, and
    /// Load, which starts a fresh history.
    pub fn execute_command(&mut self, kind: CommandKind) -> Option<UndoToken> {
        let target = self.document.selected_id();
        match kind {
            CommandKind::Load(shapes) => {
                self.replace_with_loaded(shapes);
                None
            }
            CommandKind::New => {
                self.reset_transient();
                let token = self.run(Command::new(CommandKind::New, target));
                self.event_bus.emit(EditorEvent::DocumentChanged(DocumentEvent::Cleared));
                token
            }
            kind => self.run(Command::new(kind, target)),
        }
    }

    fn run(&mut self, command: Command) -> Option<UndoToken> {
        let name = command.name();
        let before = self.document.selected_id();

        let mut ctx = CommandContext::new(&mut self.document, &mut self.clipboard, &self.style, &self.config);
        let token = self.history.execute(command, &mut ctx);

        if let Some(token) = token {
            debug!("Executed {name}");
            self.event_bus.emit(EditorEvent::CommandExecuted { name, token });
            self.event_bus.emit(EditorEvent::HistoryChanged {
                can_undo: self.history.can_undo(),
            });
        }
        self.sync_selection(before);
        token
    }

    fn replace_with_loaded(&mut self, shapes: Vec<Shape>) {
        self.reset_transient();
        let before = self.document.selected_id();

        let mut command = Command::new(CommandKind::Load(shapes), None);
        let mut ctx = CommandContext::new(&mut self.document, &mut self.clipboard, &self.style, &self.config);
        command.execute(&mut ctx);
        self.history.clear();

        let shape_count = self.document.len();
        info!("Loaded drawing with {shape_count} shapes");
        self.sync_selection(before);
        self.event_bus.emit(EditorEvent::HistoryChanged { can_undo: false });
        self.event_bus.emit(EditorEvent::DocumentChanged(DocumentEvent::Loaded { shape_count }));
    }

    /// Drop buffered points and any running gesture
    fn reset_transient(&mut self) {
        self.cancel_gesture();
        self.strategy.on_exit();
        self.state = EditorState::Idle;
    }

    /// Restore the world before the most recent command. Returns false if
    /// the history was empty.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        let before = self.document.selected_id();
        let Some(command) = self.history.undo(&mut self.document) else {
            debug!("Nothing to undo");
            return false;
        };

        self.event_bus.emit(EditorEvent::CommandUndone { name: command.name() });
        self.event_bus.emit(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
        });
        self.sync_selection(before);
        true
    }

    // ---- Pointer gestures ----

    /// Start dragging the selected shape according to the transform mode.
    /// Returns true if a gesture started.
    pub fn on_pointer_down(&mut self, pos: Pos2) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(shape) = self.document.selected() else {
            return false;
        };
        let id = shape.id();
        let Some(operation) = DragOperation::begin(self.transform_mode, shape, pos, &self.config) else {
            return false;
        };

        debug!("{:?} gesture started on {}", operation.mode(), id);
        self.transition_to(EditorState::Transforming { shape: id, operation })
    }

    /// Apply one drag event. The first drag of a gesture records the undo
    /// checkpoint before the shape changes.
    pub fn on_pointer_drag(&mut self, pos: Pos2) {
        let Some(id) = self.state.transforming_shape() else {
            return;
        };
        let Some(shape) = self.document.shape_mut(id) else {
            self.state = EditorState::Idle;
            return;
        };

        if shape.interaction_gate_mut().fire() {
            self.event_bus.emit(EditorEvent::InteractionStarted { id });
            self.run(Command::new(CommandKind::Interaction, Some(id)));
        }

        if let (EditorState::Transforming { operation, .. }, Some(shape)) =
            (&mut self.state, self.document.shape_mut(id))
        {
            operation.update(shape, pos, &self.config);
        }
    }

    /// End the gesture and re-arm the shape for the next one
    pub fn on_pointer_up(&mut self, _pos: Pos2) {
        if self.state.is_transforming() {
            self.cancel_gesture();
        }
    }

    fn cancel_gesture(&mut self) {
        if let Some(id) = self.state.transforming_shape() {
            if let Some(shape) = self.document.shape_mut(id) {
                shape.interaction_gate_mut().rearm();
            }
            self.state = EditorState::Idle;
        }
    }

    // ---- Files ----

    /// Serialize the document as pretty-printed JSON
    pub fn save(&self) -> EditorResult<Vec<u8>> {
        let bytes = persistence::save_shapes(self.document.shapes())?;
        self.event_bus.emit(EditorEvent::DocumentChanged(DocumentEvent::Saved));
        Ok(bytes)
    }

    /// Replace the document with a saved drawing. On error the document is
    /// left untouched.
    pub fn load(&mut self, bytes: &[u8]) -> EditorResult<()> {
        let shapes = persistence::load_shapes(bytes, &self.style)?;
        self.replace_with_loaded(shapes);
        Ok(())
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> EditorResult<()> {
        let bytes = self.save()?;
        std::fs::write(path.as_ref(), bytes)?;
        info!("Saved drawing to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let bytes = std::fs::read(path.as_ref())?;
        self.load(&bytes)
    }
}
