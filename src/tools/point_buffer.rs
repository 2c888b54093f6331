use egui::{Color32, Pos2};

/// Transient dot drawn by the host for each click of a multi-click tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub center: Pos2,
    pub radius: f32,
    pub color: Color32,
}

/// Look of the markers a tool produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub color: Color32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            color: Color32::BLACK,
        }
    }
}

/// Points collected by a tool while a shape is under construction.
///
/// Nothing in here is ever persisted; a tool either turns the points into a
/// shape or throws them away.
#[derive(Debug, Clone, Default)]
pub struct PointBuffer {
    points: Vec<Pos2>,
    markers: Vec<Marker>,
    style: MarkerStyle,
}

impl PointBuffer {
    pub fn new(style: MarkerStyle) -> Self {
        Self {
            points: Vec::new(),
            markers: Vec::new(),
            style,
        }
    }

    /// Add a point and its marker
    pub fn push(&mut self, point: Pos2) {
        self.points.push(point);
        self.markers.push(Marker {
            center: point,
            radius: self.style.radius,
            color: self.style.color,
        });
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Hand over the collected points, leaving the buffer empty
    pub fn take(&mut self) -> Vec<Pos2> {
        self.markers.clear();
        std::mem::take(&mut self.points)
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.markers.clear();
    }
}
