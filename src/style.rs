use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// Style and size parameters read by every drawing strategy and shape factory.
///
/// The host owns one of these and passes it by reference at each call site;
/// nothing in the engine keeps a hidden copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParams {
    #[serde(with = "color_hex")]
    pub edge_color: Color32,
    #[serde(with = "color_hex")]
    pub fill_color: Color32,
    /// Width of new rectangles, ellipses and the wrapping width of new text
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees applied to new shapes
    pub rotation: f32,
    pub font_size: f32,
    pub text: String,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            edge_color: Color32::BLACK,
            fill_color: Color32::WHITE,
            width: 100.0,
            height: 60.0,
            rotation: 0.0,
            font_size: 16.0,
            text: "Text".to_owned(),
        }
    }
}

/// A single "parameter changed" notification from the host surface
#[derive(Debug, Clone, PartialEq)]
pub enum StyleParam {
    EdgeColor(Color32),
    FillColor(Color32),
    Width(f32),
    Height(f32),
    FontSize(f32),
    Rotation(f32),
    Text(String),
}

impl StyleParams {
    /// Store a changed parameter for shapes drawn from now on
    pub fn apply(&mut self, param: &StyleParam) {
        match param {
            StyleParam::EdgeColor(color) => self.edge_color = *color,
            StyleParam::FillColor(color) => self.fill_color = *color,
            StyleParam::Width(width) => self.width = width.max(0.0),
            StyleParam::Height(height) => self.height = height.max(0.0),
            StyleParam::FontSize(size) => self.font_size = size.max(0.0),
            StyleParam::Rotation(angle) => self.rotation = *angle,
            StyleParam::Text(text) => self.text = text.clone(),
        }
    }
}

/// Parse a `#rrggbb` or `#rrggbbaa` color string
pub fn parse_color(text: &str) -> EditorResult<Color32> {
    Color32::from_hex(text.trim()).map_err(|_| EditorError::InvalidColor(text.to_owned()))
}

/// Format a color the way drawings persist it (`#rrggbbaa`)
pub fn format_color(color: Color32) -> String {
    color.to_hex()
}

/// Serde adapter storing a `Color32` as a hex string
pub mod color_hex {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_color(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color32::from_rgb(0x12, 0xab, 0xef);
        let text = format_color(color);
        assert_eq!(parse_color(&text).unwrap(), color);
        assert_eq!(parse_color("#12abef").unwrap(), color);
    }

    #[test]
    fn test_invalid_color() {
        assert!(matches!(
            parse_color("blue-ish"),
            Err(EditorError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_apply_param() {
        let mut params = StyleParams::default();
        params.apply(&StyleParam::Width(-5.0));
        assert_eq!(params.width, 0.0);
        params.apply(&StyleParam::FillColor(Color32::RED));
        assert_eq!(params.fill_color, Color32::RED);
    }
}
