use egui::{Pos2, Rect, Vec2};

use crate::config::EditorConfig;
use crate::shape::Shape;

/// A corner of a shape's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// The corner of the quadrant `pos` lies in, relative to the rect center
    pub fn nearest(rect: Rect, pos: Pos2) -> Self {
        let center = rect.center();
        match (pos.x < center.x, pos.y < center.y) {
            (true, true) => Corner::TopLeft,
            (false, true) => Corner::TopRight,
            (true, false) => Corner::BottomLeft,
            (false, false) => Corner::BottomRight,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    pub fn position(self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomLeft => rect.left_bottom(),
            Corner::BottomRight => rect.right_bottom(),
        }
    }
}

/// Free-form stretch, one variant per shape kind
#[derive(Debug, Clone, PartialEq)]
pub enum StretchOperation {
    /// Corner diagonally opposite the press stays put
    Rectangle { fixed: Pos2 },
    /// Radii track the pointer distance from the fixed center
    Ellipse { center: Pos2 },
    Segment,
    /// Vertex picked at press
    Polygon { vertex: usize },
    /// Scale follows per-event pointer deltas; `orientation` holds the sign
    /// of each scale component at press
    Text { last: Pos2, orientation: Vec2 },
}

impl StretchOperation {
    /// `None` for a polygon press with no vertex within `vertex_pick_radius`
    pub fn begin(shape: &Shape, press: Pos2, config: &EditorConfig) -> Option<Self> {
        let op = match shape {
            Shape::Rectangle(rect) => {
                let bounds = rect.rect();
                Self::Rectangle {
                    fixed: Corner::nearest(bounds, press).opposite().position(bounds),
                }
            }
            Shape::Ellipse(ellipse) => Self::Ellipse {
                center: ellipse.center(),
            },
            Shape::Segment(_) => Self::Segment,
            Shape::Polygon(polygon) => Self::Polygon {
                vertex: polygon.nearest_vertex(press, config.vertex_pick_radius)?,
            },
            Shape::Text(_) => Self::Text {
                last: press,
                orientation: Vec2::new(shape.scale().x.signum(), shape.scale().y.signum()),
            },
        };
        Some(op)
    }

    pub fn update(&mut self, shape: &mut Shape, pos: Pos2, config: &EditorConfig) {
        match (self, shape) {
            (Self::Rectangle { fixed }, Shape::Rectangle(rect)) => {
                let offset = pos - *fixed;
                let size = offset.abs().max(Vec2::splat(config.min_extent * 2.0));
                let direction = Vec2::new(offset.x.signum(), offset.y.signum());
                rect.set_size(size);
                rect.set_center(*fixed + direction * size * 0.5);
            }
            (Self::Ellipse { center }, Shape::Ellipse(ellipse)) => {
                ellipse.set_radii((pos - *center).abs().max(Vec2::splat(config.min_extent)));
            }
            (Self::Segment, Shape::Segment(segment)) => segment.set_end(pos),
            (Self::Polygon { vertex }, Shape::Polygon(polygon)) => polygon.set_vertex(*vertex, pos),
            (Self::Text { last, orientation }, shape @ Shape::Text(_)) => {
                // Accumulates per event, unlike the distance-based stretches above
                let delta = pos - *last;
                *last = pos;
                let scale = shape.scale() + delta * config.text_stretch_factor;
                let min = config.min_text_scale;
                shape.set_scale(Vec2::new(
                    keep_orientation(scale.x, orientation.x, min),
                    keep_orientation(scale.y, orientation.y, min),
                ));
            }
            (op, shape) => log::warn!("{op:?} does not apply to a {}", shape.type_name()),
        }
    }
}

/// Clamp `value` to at least `min` in magnitude without crossing zero
fn keep_orientation(value: f32, orientation: f32, min: f32) -> f32 {
    if value.signum() == orientation {
        orientation * value.abs().max(min)
    } else {
        orientation * min
    }
}
