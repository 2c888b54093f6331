use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::EditorResult;
use crate::shape::SEGMENT_HIT_TOLERANCE;
use crate::style::{StyleParams, color_hex};

/// Tunables read by the editing engine.
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct EditorConfig {
    /// Max distance from a segment that still counts as a hit
    pub segment_hit_tolerance: f32,
    /// Radius of the dot drawn for each click of a multi-click tool
    pub marker_radius: f32,
    #[serde(with = "color_hex")]
    pub marker_color: Color32,
    /// Max distance from a polygon vertex for stretch to pick it up
    pub vertex_pick_radius: f32,
    /// Smallest half-extent a drag may leave a rectangle or ellipse with
    pub min_extent: f32,
    pub min_polygon_scale: f32,
    /// Scale change per surface unit of pointer movement when stretching text
    pub text_stretch_factor: f32,
    pub min_text_scale: f32,
    /// Oldest undo checkpoints are dropped beyond this many; `None` keeps all
    pub history_depth: Option<usize>,
    pub default_style: StyleParams,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            segment_hit_tolerance: SEGMENT_HIT_TOLERANCE,
            marker_radius: 3.0,
            marker_color: Color32::BLACK,
            vertex_pick_radius: 5.0,
            min_extent: 1.0,
            min_polygon_scale: 0.1,
            text_stretch_factor: 0.01,
            min_text_scale: 0.1,
            history_depth: None,
            default_style: StyleParams::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config over the defaults
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
