use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::style::StyleParams;

/// Context for command execution, providing access to the document and the
/// pieces of editor state a command may read or write.
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// The document being edited
    pub document: &'a mut Document,
    /// Copy/paste buffer
    pub clipboard: &'a mut Clipboard,
    /// Current style, used where a pasted shape carries no value of its own
    pub style: &'a StyleParams,
    pub config: &'a EditorConfig,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        document: &'a mut Document,
        clipboard: &'a mut Clipboard,
        style: &'a StyleParams,
        config: &'a EditorConfig,
    ) -> Self {
        Self {
            document,
            clipboard,
            style,
            config,
        }
    }
}
