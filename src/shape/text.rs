use egui::{Pos2, Rect, Vec2};

use super::ShapeCommon;
use super::common::{GLYPH_WIDTH_FACTOR, LINE_HEIGHT_FACTOR};

/// A block of text anchored at its top-left corner.
///
/// The engine has no font backend, so the extent is estimated from the
/// character count and font size. A positive `wrap_width` fixes the block
/// width and wraps lines to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub(crate) common: ShapeCommon,
    position: Pos2,
    content: String,
    font_size: f32,
    wrap_width: f32,
}

impl Text {
    pub(crate) fn new(common: ShapeCommon, position: Pos2, content: String, font_size: f32, wrap_width: f32) -> Self {
        Self {
            common,
            position,
            content,
            font_size: font_size.max(0.0),
            wrap_width: wrap_width.max(0.0),
        }
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn wrap_width(&self) -> f32 {
        self.wrap_width
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        self.font_size = font_size.max(0.0);
    }

    pub fn set_wrap_width(&mut self, wrap_width: f32) {
        self.wrap_width = wrap_width.max(0.0);
    }

    /// Estimated extent of the unscaled text block
    pub fn text_size(&self) -> Vec2 {
        let glyph_width = self.font_size * GLYPH_WIDTH_FACTOR;
        let line_height = self.font_size * LINE_HEIGHT_FACTOR;

        let paragraphs: Vec<usize> = self.content.lines().map(|l| l.chars().count()).collect();
        let paragraphs = if paragraphs.is_empty() { vec![0] } else { paragraphs };

        if self.wrap_width > 0.0 && glyph_width > 0.0 {
            let per_line = ((self.wrap_width / glyph_width).floor() as usize).max(1);
            let lines: usize = paragraphs.iter().map(|&n| n.div_ceil(per_line).max(1)).sum();
            Vec2::new(self.wrap_width, lines as f32 * line_height)
        } else {
            let longest = paragraphs.iter().copied().max().unwrap_or(0);
            Vec2::new(longest as f32 * glyph_width, paragraphs.len() as f32 * line_height)
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.text_size())
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
