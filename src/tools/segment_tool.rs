use egui::Pos2;
use log::debug;

use crate::shape::{Shape, factory};
use crate::style::StyleParams;
use crate::tools::DrawingStrategy;
use crate::tools::point_buffer::{Marker, MarkerStyle, PointBuffer};

/// Two clicks: start point, then end point
#[derive(Debug, Clone, Default)]
pub struct SegmentStrategy {
    buffer: PointBuffer,
}

impl SegmentStrategy {
    pub fn new(markers: MarkerStyle) -> Self {
        Self {
            buffer: PointBuffer::new(markers),
        }
    }
}

impl DrawingStrategy for SegmentStrategy {
    fn name(&self) -> &'static str {
        "Segment"
    }

    fn draw(&mut self, pos: Pos2, params: &StyleParams) -> Option<Shape> {
        self.buffer.push(pos);
        if self.buffer.len() < 2 {
            return None;
        }

        let points = self.buffer.take();
        debug!("Segment from {:?} to {:?}", points[0], points[1]);
        Some(factory::create_segment(points[0], points[1], params))
    }

    fn on_exit(&mut self) {
        if !self.buffer.is_empty() {
            debug!("Discarding unfinished segment");
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
