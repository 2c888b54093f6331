use egui::{Pos2, Rect, Vec2};

use super::ShapeCommon;
use super::common;

/// Straight line between a fixed start point and a free end point
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub(crate) common: ShapeCommon,
    start: Pos2,
    end: Pos2,
}

impl Segment {
    pub(crate) fn new(common: ShapeCommon, start: Pos2, end: Pos2) -> Self {
        Self { common, start, end }
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub fn set_start(&mut self, start: Pos2) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Pos2) {
        self.end = end;
    }

    /// Vector from start to end
    pub fn extent(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn rect(&self) -> Rect {
        common::calculate_bounds(&[self.start, self.end])
    }

    pub fn contains(&self, pos: Pos2, tolerance: f32) -> bool {
        common::distance_to_line_segment(pos, self.start, self.end) <= tolerance
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
