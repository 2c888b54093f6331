use egui::{Pos2, Rect, Vec2};

use super::ShapeCommon;

/// Axis-aligned ellipse anchored at its center
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub(crate) common: ShapeCommon,
    center: Pos2,
    radii: Vec2,
}

impl Ellipse {
    pub(crate) fn new(common: ShapeCommon, center: Pos2, radii: Vec2) -> Self {
        Self {
            common,
            center,
            radii: radii.max(Vec2::ZERO),
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn radii(&self) -> Vec2 {
        self.radii
    }

    pub fn set_center(&mut self, center: Pos2) {
        self.center = center;
    }

    pub fn set_radii(&mut self, radii: Vec2) {
        self.radii = radii.max(Vec2::ZERO);
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.radii * 2.0)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        if self.radii.x <= 0.0 || self.radii.y <= 0.0 {
            return false;
        }
        let d = pos - self.center;
        let nx = d.x / self.radii.x;
        let ny = d.y / self.radii.y;
        nx * nx + ny * ny <= 1.0
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
