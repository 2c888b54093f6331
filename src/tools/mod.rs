use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::shape::{Shape, ShapeKind};
use crate::style::StyleParams;

/// A drawing strategy turns a stream of surface clicks into a shape.
///
/// Strategies never touch the document: they hand a finished shape back and
/// the editor commits it.
pub trait DrawingStrategy {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Handle a click on the surface that did not select an existing shape.
    /// Returns the finished shape if this click completes one.
    fn draw(&mut self, pos: Pos2, params: &StyleParams) -> Option<Shape>;

    /// Finish a shape that takes an open-ended number of clicks.
    fn complete(&mut self, _params: &StyleParams) -> Option<Shape> {
        None // default: nothing to complete
    }

    /// Called when the tool is deselected or replaced.
    /// Must drop buffered points and markers without producing a shape.
    fn on_exit(&mut self) {}

    /// Transient markers for the clicks collected so far
    fn markers(&self) -> &[Marker] {
        &[]
    }

    /// True while clicks have been collected for an unfinished shape
    fn is_in_progress(&self) -> bool {
        false
    }
}

// Tool implementations
mod point_buffer;
pub use point_buffer::{Marker, MarkerStyle, PointBuffer};

mod single_click;
pub use single_click::{EllipseStrategy, RectangleStrategy, TextStrategy};

mod segment_tool;
pub use segment_tool::SegmentStrategy;

mod polygon_tool;
pub use polygon_tool::PolygonStrategy;

/// The tool the host can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Idle,
    Rectangle,
    Ellipse,
    Segment,
    Polygon,
    Text,
}

impl From<ShapeKind> for ToolKind {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => ToolKind::Rectangle,
            ShapeKind::Ellipse => ToolKind::Ellipse,
            ShapeKind::Segment => ToolKind::Segment,
            ShapeKind::Polygon => ToolKind::Polygon,
            ShapeKind::Text => ToolKind::Text,
        }
    }
}

/// The null strategy: clicks only select, nothing is drawn
#[derive(Debug, Clone, Default)]
pub struct IdleStrategy;

impl DrawingStrategy for IdleStrategy {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn draw(&mut self, _pos: Pos2, _params: &StyleParams) -> Option<Shape> {
        None
    }
}

/// Enum holding all strategies, so the editor never needs `Box<dyn DrawingStrategy>`
#[derive(Debug, Clone)]
pub enum Strategy {
    Idle(IdleStrategy),
    Rectangle(RectangleStrategy),
    Ellipse(EllipseStrategy),
    Segment(SegmentStrategy),
    Polygon(PolygonStrategy),
    Text(TextStrategy),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Idle(IdleStrategy)
    }
}

impl Strategy {
    /// Fresh strategy for `kind`, with empty buffers
    pub fn new(kind: ToolKind, config: &EditorConfig) -> Self {
        let markers = MarkerStyle {
            radius: config.marker_radius,
            color: config.marker_color,
        };
        match kind {
            ToolKind::Idle => Strategy::Idle(IdleStrategy),
            ToolKind::Rectangle => Strategy::Rectangle(RectangleStrategy),
            ToolKind::Ellipse => Strategy::Ellipse(EllipseStrategy),
            ToolKind::Segment => Strategy::Segment(SegmentStrategy::new(markers)),
            ToolKind::Polygon => Strategy::Polygon(PolygonStrategy::new(markers)),
            ToolKind::Text => Strategy::Text(TextStrategy),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Idle(_) => ToolKind::Idle,
            Self::Rectangle(_) => ToolKind::Rectangle,
            Self::Ellipse(_) => ToolKind::Ellipse,
            Self::Segment(_) => ToolKind::Segment,
            Self::Polygon(_) => ToolKind::Polygon,
            Self::Text(_) => ToolKind::Text,
        }
    }

    fn inner(&self) -> &dyn DrawingStrategy {
        match self {
            Self::Idle(tool) => tool,
            Self::Rectangle(tool) => tool,
            Self::Ellipse(tool) => tool,
            Self::Segment(tool) => tool,
            Self::Polygon(tool) => tool,
            Self::Text(tool) => tool,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn DrawingStrategy {
        match self {
            Self::Idle(tool) => tool,
            Self::Rectangle(tool) => tool,
            Self::Ellipse(tool) => tool,
            Self::Segment(tool) => tool,
            Self::Polygon(tool) => tool,
            Self::Text(tool) => tool,
        }
    }
}

impl DrawingStrategy for Strategy {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn draw(&mut self, pos: Pos2, params: &StyleParams) -> Option<Shape> {
        self.inner_mut().draw(pos, params)
    }

    fn complete(&mut self, params: &StyleParams) -> Option<Shape> {
        self.inner_mut().complete(params)
    }

    fn on_exit(&mut self) {
        self.inner_mut().on_exit()
    }

    fn markers(&self) -> &[Marker] {
        self.inner().markers()
    }

    fn is_in_progress(&self) -> bool {
        self.inner().is_in_progress()
    }
}
