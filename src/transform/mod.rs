//! Pointer-drag transforms of the selected shape.
//!
//! A gesture is captured on press by [`DragOperation::begin`], which looks up
//! the algorithm for the (mode, shape kind) pair, and then fed every drag
//! position through [`DragOperation::update`].

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::shape::Shape;

mod resize;
mod stretch;

pub use resize::ResizeOperation;
pub use stretch::{Corner, StretchOperation};

/// What a drag on the selected shape does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransformMode {
    /// Translate the whole shape
    #[default]
    Move,
    /// Aspect-preserving resize about a fixed center
    Resize,
    /// Free-form stretch against a fixed corner or point
    Stretch,
}

/// State captured at press time for one drag gesture
#[derive(Debug, Clone, PartialEq)]
pub enum DragOperation {
    Move { last: Pos2 },
    Resize(ResizeOperation),
    Stretch(StretchOperation),
}

impl DragOperation {
    /// Start a gesture on `shape` at `press`.
    ///
    /// Move needs the press to hit the shape; resize and stretch are driven
    /// from handles that may lie outside it. Returns `None` when the shape
    /// offers nothing to drag (e.g. a polygon with a degenerate centroid).
    pub fn begin(mode: TransformMode, shape: &Shape, press: Pos2, config: &EditorConfig) -> Option<Self> {
        match mode {
            TransformMode::Move => shape
                .hit_test(press, config.segment_hit_tolerance)
                .then_some(DragOperation::Move { last: press }),
            TransformMode::Resize => ResizeOperation::begin(shape, press).map(DragOperation::Resize),
            TransformMode::Stretch => StretchOperation::begin(shape, press, config).map(DragOperation::Stretch),
        }
    }

    pub fn mode(&self) -> TransformMode {
        match self {
            DragOperation::Move { .. } => TransformMode::Move,
            DragOperation::Resize(_) => TransformMode::Resize,
            DragOperation::Stretch(_) => TransformMode::Stretch,
        }
    }

    /// Apply the pointer position of one drag event
    pub fn update(&mut self, shape: &mut Shape, pos: Pos2, config: &EditorConfig) {
        match self {
            DragOperation::Move { last } => {
                shape.translate(pos - *last);
                *last = pos;
            }
            DragOperation::Resize(op) => op.update(shape, pos, config),
            DragOperation::Stretch(op) => op.update(shape, pos, config),
        }
    }
}

/// Clamp the magnitude of each scale component, keeping its sign so a
/// flipped shape stays flipped
pub(crate) fn clamp_scale(scale: Vec2, min: f32) -> Vec2 {
    let clamp = |v: f32| v.signum() * v.abs().max(min);
    Vec2::new(clamp(scale.x), clamp(scale.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::factory;
    use crate::style::StyleParams;

    #[test]
    fn test_move_requires_hit() {
        let config = EditorConfig::default();
        let shape = factory::create_rectangle(Pos2::new(50.0, 50.0), &StyleParams::default());
        assert!(DragOperation::begin(TransformMode::Move, &shape, Pos2::new(500.0, 500.0), &config).is_none());
        assert!(DragOperation::begin(TransformMode::Move, &shape, Pos2::new(60.0, 55.0), &config).is_some());
    }

    #[test]
    fn test_move_applies_per_event_delta() {
        let config = EditorConfig::default();
        let mut shape = factory::create_rectangle(Pos2::new(50.0, 50.0), &StyleParams::default());
        let mut op = DragOperation::begin(TransformMode::Move, &shape, Pos2::new(50.0, 50.0), &config).unwrap();
        op.update(&mut shape, Pos2::new(60.0, 50.0), &config);
        op.update(&mut shape, Pos2::new(70.0, 55.0), &config);
        assert_eq!(shape.anchor(), Pos2::new(70.0, 55.0));
    }

    #[test]
    fn test_clamp_scale_keeps_sign() {
        let scale = clamp_scale(Vec2::new(-0.01, 0.05), 0.1);
        assert_eq!(scale, Vec2::new(-0.1, 0.1));
    }
}
