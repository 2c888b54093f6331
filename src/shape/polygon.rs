use egui::{Pos2, Rect, Vec2};

use super::ShapeCommon;
use super::common::{self, MIN_POLYGON_VERTICES};

/// Closed polygon; vertices are kept in drawing order
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(crate) common: ShapeCommon,
    vertices: Vec<Pos2>,
}

impl Polygon {
    /// Returns `None` for fewer than three vertices
    pub(crate) fn new(common: ShapeCommon, vertices: Vec<Pos2>) -> Option<Self> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return None;
        }
        Some(Self { common, vertices })
    }

    pub fn vertices(&self) -> &[Pos2] {
        &self.vertices
    }

    /// Flat `[x0, y0, x1, y1, ...]` list, always of even length
    pub fn coordinates(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn first_vertex(&self) -> Pos2 {
        // Construction guarantees at least three vertices
        self.vertices[0]
    }

    pub fn centroid(&self) -> Pos2 {
        common::centroid(&self.vertices)
    }

    pub fn set_vertex(&mut self, index: usize, pos: Pos2) {
        if let Some(vertex) = self.vertices.get_mut(index) {
            *vertex = pos;
        }
    }

    /// Replace all vertices; ignored unless the count stays the same
    pub fn set_vertices(&mut self, vertices: Vec<Pos2>) {
        if vertices.len() == self.vertices.len() {
            self.vertices = vertices;
        }
    }

    /// Index of the vertex closest to `pos`, if it lies within `radius`
    pub fn nearest_vertex(&self, pos: Pos2, radius: f32) -> Option<usize> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (i, v.distance(pos)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    pub fn rect(&self) -> Rect {
        common::calculate_bounds(&self.vertices)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        common::point_in_polygon(pos, &self.vertices)
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }
}
