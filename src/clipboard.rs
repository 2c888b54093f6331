use egui::{Pos2, Vec2};
use log::debug;

use crate::config::EditorConfig;
use crate::shape::Shape;
use crate::style::StyleParams;
use crate::tools::{DrawingStrategy, Strategy, ToolKind};

/// Holds a detached copy of the last copied shape
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    content: Option<Shape>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self { content: None }
    }

    /// Store a deep copy; later edits to the original do not leak in
    pub fn store(&mut self, shape: &Shape) {
        self.content = Some(shape.get_copy());
    }

    pub fn content(&self) -> Option<&Shape> {
        self.content.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}

/// Style params that reproduce `shape`'s own colors, size and font,
/// falling back to `base` for anything the shape kind does not carry
pub fn params_from_shape(shape: &Shape, base: &StyleParams) -> StyleParams {
    let mut params = base.clone();
    params.edge_color = shape.edge_color();
    params.fill_color = shape.fill_color();
    params.rotation = shape.rotation();

    match shape {
        Shape::Rectangle(rect) => {
            params.width = rect.size().x;
            params.height = rect.size().y;
        }
        Shape::Ellipse(ellipse) => {
            params.width = ellipse.radii().x * 2.0;
            params.height = ellipse.radii().y * 2.0;
        }
        Shape::Text(text) => {
            params.width = text.wrap_width();
            params.font_size = text.font_size();
            params.text = text.content().to_owned();
        }
        Shape::Segment(_) | Shape::Polygon(_) => {}
    }
    params
}

/// Re-create `source` at `at` by replaying clicks into a fresh strategy of
/// the same kind, with all geometry translated to the new reference point.
pub fn paste_shape(source: &Shape, at: Pos2, base: &StyleParams, config: &EditorConfig) -> Option<Shape> {
    let params = params_from_shape(source, base);
    let mut strategy = Strategy::new(ToolKind::from(source.kind()), config);

    let pasted = match source {
        Shape::Rectangle(_) | Shape::Ellipse(_) | Shape::Text(_) => strategy.draw(at, &params),
        Shape::Segment(segment) => {
            let end = at + segment.extent();
            strategy.draw(at, &params);
            strategy.draw(end, &params)
        }
        Shape::Polygon(polygon) => {
            let delta: Vec2 = at - polygon.first_vertex();
            for vertex in polygon.vertices() {
                strategy.draw(*vertex + delta, &params);
            }
            strategy.complete(&params)
        }
    };

    pasted.map(|mut shape| {
        shape.set_scale(source.scale());
        debug!("Pasted {} {} at {:?}", shape.type_name(), shape.id(), at);
        shape
    })
}
