use egui::{Pos2, Rect, Vec2};

use super::ShapeCommon;

/// Axis-aligned rectangle anchored at its center
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) common: ShapeCommon,
    center: Pos2,
    /// Full width and height
    size: Vec2,
}

impl Rectangle {
    pub(crate) fn new(common: ShapeCommon, center: Pos2, size: Vec2) -> Self {
        Self {
            common,
            center,
            size: size.max(Vec2::ZERO),
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn set_center(&mut self, center: Pos2) {
        self.center = center;
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
    }

    pub fn set_half_extents(&mut self, half: Vec2) {
        self.set_size(half * 2.0);
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
