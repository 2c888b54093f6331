use egui::{Pos2, Vec2};

use super::clamp_scale;
use crate::config::EditorConfig;
use crate::shape::Shape;

/// Aspect-preserving resize, one variant per shape kind
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeOperation {
    /// `ratio` is height over width of the half-extents at press time
    Rectangle { center: Pos2, ratio: f32 },
    Ellipse { center: Pos2, ratio: f32 },
    /// The end point follows the pointer
    Segment,
    /// Uniform scale about the centroid, relative to the press-time vertices
    Polygon {
        centroid: Pos2,
        original: Vec<Pos2>,
        reference: f32,
    },
    /// Uniform scale from the distance to the bounding-box center
    Text {
        center: Pos2,
        start_distance: f32,
        start_scale: Vec2,
    },
}

impl ResizeOperation {
    pub fn begin(shape: &Shape, press: Pos2) -> Option<Self> {
        match shape {
            Shape::Rectangle(rect) => Some(Self::Rectangle {
                center: rect.center(),
                ratio: aspect_ratio(rect.half_extents()),
            }),
            Shape::Ellipse(ellipse) => Some(Self::Ellipse {
                center: ellipse.center(),
                ratio: aspect_ratio(ellipse.radii()),
            }),
            Shape::Segment(_) => Some(Self::Segment),
            Shape::Polygon(polygon) => {
                let centroid = polygon.centroid();
                let reference = polygon.first_vertex().distance(centroid);
                (reference > f32::EPSILON).then(|| Self::Polygon {
                    centroid,
                    original: polygon.vertices().to_vec(),
                    reference,
                })
            }
            Shape::Text(_) => {
                let center = shape.bounds().center();
                let start_distance = press.distance(center);
                (start_distance > f32::EPSILON).then(|| Self::Text {
                    center,
                    start_distance,
                    start_scale: shape.scale(),
                })
            }
        }
    }

    pub fn update(&self, shape: &mut Shape, pos: Pos2, config: &EditorConfig) {
        match (self, shape) {
            (Self::Rectangle { center, ratio }, Shape::Rectangle(rect)) => {
                rect.set_half_extents(locked_extents(*center, *ratio, pos, config.min_extent));
            }
            (Self::Ellipse { center, ratio }, Shape::Ellipse(ellipse)) => {
                ellipse.set_radii(locked_extents(*center, *ratio, pos, config.min_extent));
            }
            (Self::Segment, Shape::Segment(segment)) => segment.set_end(pos),
            (
                Self::Polygon {
                    centroid,
                    original,
                    reference,
                },
                Shape::Polygon(polygon),
            ) => {
                let scale = (pos.distance(*centroid) / reference).max(config.min_polygon_scale);
                let vertices = original.iter().map(|v| *centroid + (*v - *centroid) * scale).collect();
                polygon.set_vertices(vertices);
            }
            (
                Self::Text {
                    center,
                    start_distance,
                    start_scale,
                },
                shape @ Shape::Text(_),
            ) => {
                let ratio = pos.distance(*center) / start_distance;
                shape.set_scale(clamp_scale(*start_scale * ratio, config.min_text_scale));
            }
            (op, shape) => log::warn!("{op:?} does not apply to a {}", shape.type_name()),
        }
    }
}

/// Height over width, falling back to square for degenerate extents
fn aspect_ratio(half: Vec2) -> f32 {
    let ratio = half.y / half.x;
    if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}

/// Pointer distance per axis, clamped, then the smaller axis grown to keep `ratio`
fn locked_extents(center: Pos2, ratio: f32, pos: Pos2, min_extent: f32) -> Vec2 {
    let mut dx = (pos.x - center.x).abs().max(min_extent);
    let mut dy = (pos.y - center.y).abs().max(min_extent);
    if dx * ratio > dy {
        dy = dx * ratio;
    } else {
        dx = dy / ratio;
    }
    Vec2::new(dx, dy)
}
