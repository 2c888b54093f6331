use egui::Pos2;
use log::{debug, info};

use crate::shape::{MIN_POLYGON_VERTICES, Shape, factory};
use crate::style::StyleParams;
use crate::tools::DrawingStrategy;
use crate::tools::point_buffer::{Marker, MarkerStyle, PointBuffer};

/// Any number of clicks, finished by a separate completion trigger
#[derive(Debug, Clone, Default)]
pub struct PolygonStrategy {
    buffer: PointBuffer,
}

impl PolygonStrategy {
    pub fn new(markers: MarkerStyle) -> Self {
        Self {
            buffer: PointBuffer::new(markers),
        }
    }

    pub fn pending_points(&self) -> &[Pos2] {
        self.buffer.points()
    }
}

impl DrawingStrategy for PolygonStrategy {
    fn name(&self) -> &'static str {
        "Polygon"
    }

    fn draw(&mut self, pos: Pos2, _params: &StyleParams) -> Option<Shape> {
        self.buffer.push(pos);
        None
    }

    fn complete(&mut self, params: &StyleParams) -> Option<Shape> {
        let points = self.buffer.take();
        if points.len() < MIN_POLYGON_VERTICES {
            // Too few vertices is not an error, the attempt is simply dropped
            info!("Discarding polygon with {} point(s)", points.len());
            return None;
        }
        debug!("Polygon with {} vertices", points.len());
        factory::create_polygon(points, params)
    }

    fn on_exit(&mut self) {
        if !self.buffer.is_empty() {
            debug!("Discarding unfinished polygon");
        }
        self.buffer.clear();
    }

    fn markers(&self) -> &[Marker] {
        self.buffer.markers()
    }

    fn is_in_progress(&self) -> bool {
        !self.buffer.is_empty()
    }
}
