use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod common;
mod interaction;
mod rectangle;
mod ellipse;
mod segment;
mod polygon;
mod text;

pub use common::{MIN_POLYGON_VERTICES, SEGMENT_HIT_TOLERANCE};
pub use interaction::InteractionGate;
pub use rectangle::Rectangle;
pub use ellipse::Ellipse;
pub use segment::Segment;
pub use polygon::Polygon;
pub use text::Text;

/// Identity of a live shape. Copies get a fresh id; ids are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag of the shape variants, used for tool lookup and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Segment,
    Polygon,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Segment,
        ShapeKind::Polygon,
        ShapeKind::Text,
    ];

    /// Name used for the persisted `"type"` discriminator
    pub fn type_name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Segment => "segment",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Text => "text",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }
}

/// Paint, transform and view state shared by every shape kind
#[derive(Debug, Clone)]
pub struct ShapeCommon {
    id: ShapeId,
    pub edge_color: Color32,
    pub fill_color: Color32,
    /// Absolute rotation in degrees
    pub rotation: f32,
    /// Scale factors; a negative component means the shape is mirrored
    pub scale: Vec2,
    selected: bool,
    interaction: InteractionGate,
}

impl ShapeCommon {
    pub fn new(edge_color: Color32, fill_color: Color32) -> Self {
        Self {
            id: ShapeId::new(),
            edge_color,
            fill_color,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            selected: false,
            interaction: InteractionGate::Armed,
        }
    }

    /// Same style and transform under a new identity
    fn duplicate(&self) -> Self {
        Self {
            id: ShapeId::new(),
            selected: false,
            interaction: InteractionGate::Armed,
            ..self.clone()
        }
    }
}

// Identity, selection and the interaction gate are not part of a shape's value
impl PartialEq for ShapeCommon {
    fn eq(&self, other: &Self) -> bool {
        self.edge_color == other.edge_color
            && self.fill_color == other.fill_color
            && self.rotation == other.rotation
            && self.scale == other.scale
    }
}

/// Every drawable entity, as a tagged variant
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Segment(Segment),
    Polygon(Polygon),
    Text(Text),
}

impl Shape {
    pub(crate) fn common(&self) -> &ShapeCommon {
        match self {
            Shape::Rectangle(s) => &s.common,
            Shape::Ellipse(s) => &s.common,
            Shape::Segment(s) => &s.common,
            Shape::Polygon(s) => &s.common,
            Shape::Text(s) => &s.common,
        }
    }

    pub(crate) fn common_mut(&mut self) -> &mut ShapeCommon {
        match self {
            Shape::Rectangle(s) => &mut s.common,
            Shape::Ellipse(s) => &mut s.common,
            Shape::Segment(s) => &mut s.common,
            Shape::Polygon(s) => &mut s.common,
            Shape::Text(s) => &mut s.common,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.common().id
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Segment(_) => ShapeKind::Segment,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn edge_color(&self) -> Color32 {
        self.common().edge_color
    }

    pub fn set_edge_color(&mut self, color: Color32) {
        self.common_mut().edge_color = color;
    }

    pub fn fill_color(&self) -> Color32 {
        self.common().fill_color
    }

    pub fn set_fill_color(&mut self, color: Color32) {
        self.common_mut().fill_color = color;
    }

    pub fn rotation(&self) -> f32 {
        self.common().rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.common_mut().rotation = degrees;
    }

    pub fn scale(&self) -> Vec2 {
        self.common().scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.common_mut().scale = scale;
    }

    /// Mirror about the shape's own vertical axis
    pub fn flip_horizontal(&mut self) {
        self.common_mut().scale.x *= -1.0;
    }

    /// Mirror about the shape's own horizontal axis
    pub fn flip_vertical(&mut self) {
        self.common_mut().scale.y *= -1.0;
    }

    pub fn is_selected(&self) -> bool {
        self.common().selected
    }

    /// Only the document changes selection, so that at most one shape is selected
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.common_mut().selected = selected;
    }

    pub(crate) fn interaction_gate_mut(&mut self) -> &mut InteractionGate {
        &mut self.common_mut().interaction
    }

    /// True while the next drag of this shape will start a new undo checkpoint
    pub fn interaction_armed(&self) -> bool {
        self.common().interaction.is_armed()
    }

    /// Primary reference point: center for rectangle/ellipse, start for
    /// segment, first vertex for polygon, top-left for text
    pub fn anchor(&self) -> Pos2 {
        match self {
            Shape::Rectangle(s) => s.center(),
            Shape::Ellipse(s) => s.center(),
            Shape::Segment(s) => s.start(),
            Shape::Polygon(s) => s.first_vertex(),
            Shape::Text(s) => s.position(),
        }
    }

    /// Semantic size: width/height for rectangles, radii for ellipses, the
    /// scale factors for text, and nothing for point-defined shapes
    pub fn dimension(&self) -> Vec2 {
        match self {
            Shape::Rectangle(s) => s.size(),
            Shape::Ellipse(s) => s.radii(),
            Shape::Segment(_) | Shape::Polygon(_) => Vec2::ZERO,
            Shape::Text(s) => s.common.scale,
        }
    }

    /// Axis-aligned bounds in untransformed space
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.rect(),
            Shape::Ellipse(s) => s.rect(),
            Shape::Segment(s) => s.rect(),
            Shape::Polygon(s) => s.rect(),
            Shape::Text(s) => s.rect(),
        }
    }

    /// Hit test in the shape's local, untransformed space, with the default
    /// segment tolerance. The editor hit-tests through [`Shape::hit_test`]
    /// with `EditorConfig::segment_hit_tolerance` instead.
    pub fn contains(&self, pos: Pos2) -> bool {
        self.hit_test(pos, SEGMENT_HIT_TOLERANCE)
    }

    /// Like [`Shape::contains`] with an explicit tolerance for segments
    pub fn hit_test(&self, pos: Pos2, segment_tolerance: f32) -> bool {
        match self {
            Shape::Rectangle(s) => s.contains(pos),
            Shape::Ellipse(s) => s.contains(pos),
            Shape::Segment(s) => s.contains(pos, segment_tolerance),
            Shape::Polygon(s) => s.contains(pos),
            Shape::Text(s) => s.contains(pos),
        }
    }

    /// Deep value copy with a new identity
    pub fn get_copy(&self) -> Shape {
        let mut copy = self.clone();
        *copy.common_mut() = self.common().duplicate();
        copy
    }

    /// Move all kind-specific geometry by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Ellipse(s) => s.translate(delta),
            Shape::Segment(s) => s.translate(delta),
            Shape::Polygon(s) => s.translate(delta),
            Shape::Text(s) => s.translate(delta),
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Shape::Segment(s) => Some(s),
            _ => None,
        }
    }
}

/// Factory functions, one per shape kind
pub mod factory {
    use super::*;
    use crate::style::StyleParams;

    fn styled(params: &StyleParams) -> ShapeCommon {
        let mut common = ShapeCommon::new(params.edge_color, params.fill_color);
        common.rotation = params.rotation;
        common
    }

    /// Rectangle centered on `center`, sized by the params' width and height
    pub fn create_rectangle(center: Pos2, params: &StyleParams) -> Shape {
        Shape::Rectangle(Rectangle::new(
            styled(params),
            center,
            Vec2::new(params.width, params.height),
        ))
    }

    /// Ellipse centered on `center` spanning the params' width and height
    pub fn create_ellipse(center: Pos2, params: &StyleParams) -> Shape {
        Shape::Ellipse(Ellipse::new(
            styled(params),
            center,
            Vec2::new(params.width, params.height) / 2.0,
        ))
    }

    pub fn create_segment(start: Pos2, end: Pos2, params: &StyleParams) -> Shape {
        Shape::Segment(Segment::new(styled(params), start, end))
    }

    /// `None` unless at least three vertices are given
    pub fn create_polygon(vertices: Vec<Pos2>, params: &StyleParams) -> Option<Shape> {
        Polygon::new(styled(params), vertices).map(Shape::Polygon)
    }

    /// Text with its top-left corner at `position`
    pub fn create_text(position: Pos2, params: &StyleParams) -> Shape {
        Shape::Text(Text::new(
            styled(params),
            position,
            params.text.clone(),
            params.font_size,
            params.width,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleParams;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(ShapeKind::from_type_name("star"), None);
    }

    #[test]
    fn test_flip_negates_scale() {
        let mut shape = factory::create_rectangle(Pos2::new(0.0, 0.0), &StyleParams::default());
        shape.flip_horizontal();
        assert_eq!(shape.scale(), Vec2::new(-1.0, 1.0));
        shape.flip_vertical();
        shape.flip_horizontal();
        assert_eq!(shape.scale(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_copy_is_fresh() {
        let mut shape = factory::create_ellipse(Pos2::new(5.0, 5.0), &StyleParams::default());
        shape.set_selected(true);
        shape.interaction_gate_mut().fire();

        let copy = shape.get_copy();
        assert_eq!(copy, shape);
        assert_ne!(copy.id(), shape.id());
        assert!(!copy.is_selected());
        assert!(copy.interaction_armed());
    }
}
