use egui::{Color32, Pos2};
use log::debug;

use super::{CommandContext, Snapshot};
use crate::clipboard;
use crate::shape::{Shape, ShapeId};

/// What a command does. Commands that act on "the selected shape" resolve
/// their target when they are created, see [`Command::new`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    /// Remove the target from the document
    Delete,
    ChangeEdgeColor(Color32),
    ChangeFillColor(Color32),
    /// Move the target to the bottom of the paint order
    Background,
    /// Move the target to the top of the paint order
    Foreground,
    FlipHorizontal,
    FlipVertical,
    /// Set the absolute rotation, in degrees
    Rotate(f32),
    /// Set the font size of a text target
    FontSize(f32),
    /// Replace the content of a text target
    ChangeText(String),
    /// Put a copy of the target on the clipboard
    Copy,
    /// Re-create the clipboard shape at the given point
    Paste { at: Pos2 },
    /// No-op that only anchors an undo checkpoint
    Interaction,
    /// Empty the document
    New,
    /// Replace the document with loaded shapes
    Load(Vec<Shape>),
}

/// Identifies a command on the history stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UndoToken(pub(crate) u64);

/// A unit of mutation: `created -> backed up -> executed -> [undone]`.
#[derive(Debug, Clone)]
pub struct Command {
    kind: CommandKind,
    target: Option<ShapeId>,
    backup: Option<Snapshot>,
    pub(crate) token: Option<UndoToken>,
}

impl Command {
    /// `target` is the shape the command acts on, usually the current selection
    pub fn new(kind: CommandKind, target: Option<ShapeId>) -> Self {
        Self {
            kind,
            target,
            backup: None,
            token: None,
        }
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn target(&self) -> Option<ShapeId> {
        self.target
    }

    pub fn token(&self) -> Option<UndoToken> {
        self.token
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            CommandKind::Delete => "Delete",
            CommandKind::ChangeEdgeColor(_) => "Change edge color",
            CommandKind::ChangeFillColor(_) => "Change fill color",
            CommandKind::Background => "Send to background",
            CommandKind::Foreground => "Bring to foreground",
            CommandKind::FlipHorizontal => "Flip horizontal",
            CommandKind::FlipVertical => "Flip vertical",
            CommandKind::Rotate(_) => "Rotate",
            CommandKind::FontSize(_) => "Font size",
            CommandKind::ChangeText(_) => "Change text",
            CommandKind::Copy => "Copy",
            CommandKind::Paste { .. } => "Paste",
            CommandKind::Interaction => "Interaction",
            CommandKind::New => "New drawing",
            CommandKind::Load(_) => "Load drawing",
        }
    }

    /// Pure queries leave the document alone and need no backup or history entry
    pub fn is_query(&self) -> bool {
        matches!(self.kind, CommandKind::Copy)
    }

    /// Snapshot the whole document. Must happen before `execute` for any
    /// mutating command.
    pub fn save_backup(&mut self, document: &crate::Document) {
        self.backup = Some(Snapshot::capture(document));
    }

    pub fn backup(&self) -> Option<&Snapshot> {
        self.backup.as_ref()
    }

    /// Execute the command. Returns false when it had nothing to act on
    /// (no target, wrong shape kind, empty clipboard); that is not an error.
    pub fn execute(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        match &self.kind {
            CommandKind::Delete => match self.target {
                Some(id) => ctx.document.remove_shape(id).is_some(),
                None => false,
            },
            CommandKind::ChangeEdgeColor(color) => {
                let color = *color;
                self.with_target(ctx, |shape| {
                    shape.set_edge_color(color);
                    true
                })
            }
            CommandKind::ChangeFillColor(color) => {
                let color = *color;
                self.with_target(ctx, |shape| {
                    shape.set_fill_color(color);
                    true
                })
            }
            CommandKind::Background => self.target.is_some_and(|id| ctx.document.send_to_back(id)),
            CommandKind::Foreground => self.target.is_some_and(|id| ctx.document.bring_to_front(id)),
            CommandKind::FlipHorizontal => self.with_target(ctx, |shape| {
                shape.flip_horizontal();
                true
            }),
            CommandKind::FlipVertical => self.with_target(ctx, |shape| {
                shape.flip_vertical();
                true
            }),
            CommandKind::Rotate(degrees) => {
                let degrees = *degrees;
                self.with_target(ctx, |shape| {
                    shape.set_rotation(degrees);
                    true
                })
            }
            CommandKind::FontSize(size) => {
                let size = *size;
                self.with_target(ctx, |shape| match shape.as_text_mut() {
                    Some(text) => {
                        text.set_font_size(size);
                        true
                    }
                    None => false,
                })
            }
            CommandKind::ChangeText(content) => {
                let content = content.clone();
                self.with_target(ctx, |shape| match shape.as_text_mut() {
                    Some(text) => {
                        text.set_content(content);
                        true
                    }
                    None => false,
                })
            }
            CommandKind::Copy => {
                let Some(shape) = self.target.and_then(|id| ctx.document.shape(id)) else {
                    return false;
                };
                ctx.clipboard.store(shape);
                true
            }
            CommandKind::Paste { at } => {
                let Some(source) = ctx.clipboard.content() else {
                    debug!("Paste with empty clipboard");
                    return false;
                };
                match clipboard::paste_shape(source, *at, ctx.style, ctx.config) {
                    Some(shape) => {
                        ctx.document.add_shape(shape);
                        true
                    }
                    None => false,
                }
            }
            CommandKind::Interaction => true,
            CommandKind::New => {
                ctx.document.clear();
                true
            }
            CommandKind::Load(shapes) => {
                ctx.document.replace_all(shapes.clone());
                true
            }
        }
    }

    /// Restore the document to the backup. Without a backup this is a no-op.
    pub fn undo(&self, document: &mut crate::Document) -> bool {
        match &self.backup {
            Some(snapshot) => {
                snapshot.restore(document);
                true
            }
            None => false,
        }
    }

    fn with_target(&self, ctx: &mut CommandContext<'_>, apply: impl FnOnce(&mut Shape) -> bool) -> bool {
        match self.target.and_then(|id| ctx.document.shape_mut(id)) {
            Some(shape) => apply(shape),
            None => false,
        }
    }
}
