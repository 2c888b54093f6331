use crate::document::Document;
use crate::shape::Shape;

/// Deep copy of the whole shape container, taken before a command mutates it.
///
/// Restoring replaces every shape, so undo works the same for reordering,
/// deletion and bulk changes alike.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    shapes: Vec<Shape>,
}

impl Snapshot {
    pub fn capture(document: &Document) -> Self {
        Self {
            shapes: document.shapes().to_vec(),
        }
    }

    pub fn restore(&self, document: &mut Document) {
        document.replace_all(self.shapes.clone());
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}
