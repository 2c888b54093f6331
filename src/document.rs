use egui::Pos2;

use crate::shape::{Shape, ShapeId};

/// The shape container. Iteration order is paint (z) order, bottom first.
///
/// Selection lives on the shapes themselves, but only the document changes
/// it, which keeps at most one shape selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Add a shape on top of the paint order
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        if shape.is_selected() {
            self.clear_selection();
        }
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Topmost shape under `pos`
    pub fn shape_at(&self, pos: Pos2, segment_tolerance: f32) -> Option<&Shape> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.hit_test(pos, segment_tolerance))
    }

    pub fn selected(&self) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.is_selected())
    }

    pub fn selected_mut(&mut self) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.is_selected())
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected().map(Shape::id)
    }

    /// Select `id` and deselect everything else. Returns false if no such shape.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        for shape in &mut self.shapes {
            let is_target = shape.id() == id;
            shape.set_selected(is_target);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        for shape in &mut self.shapes {
            shape.set_selected(false);
        }
    }

    /// Move a shape to the bottom of the paint order
    pub fn send_to_back(&mut self, id: ShapeId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let shape = self.shapes.remove(index);
                self.shapes.insert(0, shape);
                true
            }
            None => false,
        }
    }

    /// Move a shape to the top of the paint order
    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let shape = self.shapes.remove(index);
                self.shapes.push(shape);
                true
            }
            None => false,
        }
    }

    /// Replace the whole contents, keeping the given order
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        // A snapshot or a loaded file may carry more than one selected flag
        let mut seen = false;
        for shape in &mut self.shapes {
            if shape.is_selected() {
                if seen {
                    shape.set_selected(false);
                }
                seen = true;
            }
            shape.interaction_gate_mut().rearm();
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}
