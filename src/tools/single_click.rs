use egui::Pos2;

use crate::shape::{Shape, factory};
use crate::style::StyleParams;
use crate::tools::DrawingStrategy;

/// One click, one rectangle centered on the click
#[derive(Debug, Clone, Default)]
pub struct RectangleStrategy;

impl DrawingStrategy for RectangleStrategy {
    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn draw(&mut self, pos: Pos2, params: &StyleParams) -> Option<Shape> {
        Some(factory::create_rectangle(pos, params))
    }
}

/// One click, one ellipse centered on the click
#[derive(Debug, Clone, Default)]
pub struct EllipseStrategy;

impl DrawingStrategy for EllipseStrategy {
    fn name(&self) -> &'static str {
        "Ellipse"
    }

    fn draw(&mut self, pos: Pos2, params: &StyleParams) -> Option<Shape> {
        Some(factory::create_ellipse(pos, params))
    }
}

/// One click, one text block whose top-left corner is the click
#[derive(Debug, Clone, Default)]
pub struct TextStrategy;

impl DrawingStrategy for TextStrategy {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn draw(&mut self, pos: Pos2, params: &StyleParams) -> Option<Shape> {
        Some(factory::create_text(pos, params))
    }
}
