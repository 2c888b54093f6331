//! JSON persistence of drawings.
//!
//! A drawing is a JSON array with one object per shape, in paint order. Each
//! object carries a `"type"` discriminator plus kind-specific fields; ids,
//! selection and interaction state are never written.

use egui::{Pos2, Vec2};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::shape::{MIN_POLYGON_VERTICES, Shape, ShapeKind, factory};
use crate::style::{StyleParams, format_color, parse_color};

/// Fields every record may carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaintRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill: Option<String>,
    stroke: String,
    #[serde(default)]
    rotate: f32,
    #[serde(default = "unit_scale")]
    scale_x: f32,
    #[serde(default = "unit_scale")]
    scale_y: f32,
}

fn unit_scale() -> f32 {
    1.0
}

/// Rectangle or ellipse; `x`,`y` is the center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BoxRecord {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(flatten)]
    paint: PaintRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SegmentRecord {
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
    #[serde(flatten)]
    paint: PaintRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PolygonRecord {
    points: Vec<f32>,
    #[serde(flatten)]
    paint: PaintRecord,
}

/// `x`,`y` is the top-left corner, `width` the wrap width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextRecord {
    x: f32,
    y: f32,
    width: f32,
    font_size: f32,
    content: String,
    #[serde(flatten)]
    paint: PaintRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ShapeRecord {
    Rectangle(BoxRecord),
    Ellipse(BoxRecord),
    Segment(SegmentRecord),
    Polygon(PolygonRecord),
    Text(TextRecord),
}

/// Serialize shapes in the given order as pretty-printed JSON
pub fn save_shapes(shapes: &[Shape]) -> EditorResult<Vec<u8>> {
    let records: Vec<ShapeRecord> = shapes.iter().map(ShapeRecord::from_shape).collect();
    debug!("Saving {} shapes", records.len());
    Ok(serde_json::to_vec_pretty(&records)?)
}

/// Parse a drawing into shapes, in array order.
///
/// Records with an unknown `"type"` are skipped with a warning. A record of a
/// known kind that cannot be read fails the whole load. `base` supplies the
/// fill of segment records that do not carry one.
pub fn load_shapes(bytes: &[u8], base: &StyleParams) -> EditorResult<Vec<Shape>> {
    let document: serde_json::Value = serde_json::from_slice(bytes)?;
    let serde_json::Value::Array(values) = document else {
        return Err(EditorError::NotAnArray);
    };

    let mut shapes = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let type_name = value.get("type").and_then(serde_json::Value::as_str).unwrap_or_default();
        let Some(kind) = ShapeKind::from_type_name(type_name) else {
            warn!("Skipping record {index} with unknown type {type_name:?}");
            continue;
        };

        let record: ShapeRecord = serde_json::from_value(value).map_err(|e| malformed(kind, e))?;
        shapes.push(record.into_shape(base)?);
    }
    debug!("Loaded {} shapes", shapes.len());
    Ok(shapes)
}

fn malformed(kind: ShapeKind, reason: impl ToString) -> EditorError {
    EditorError::MalformedShape {
        kind: kind.type_name().to_owned(),
        reason: reason.to_string(),
    }
}

impl PaintRecord {
    fn from_shape(shape: &Shape) -> Self {
        Self {
            fill: Some(format_color(shape.fill_color())),
            stroke: format_color(shape.edge_color()),
            rotate: shape.rotation(),
            scale_x: shape.scale().x,
            scale_y: shape.scale().y,
        }
    }

    /// Style params for the factory, with this record's colors and rotation
    fn params(&self, kind: ShapeKind, base: &StyleParams) -> EditorResult<StyleParams> {
        let mut params = base.clone();
        params.edge_color = parse_color(&self.stroke)?;
        params.fill_color = match (&self.fill, kind) {
            (Some(fill), _) => parse_color(fill)?,
            (None, ShapeKind::Segment) => base.fill_color,
            (None, _) => return Err(malformed(kind, "missing field `fill`")),
        };
        params.rotation = self.rotate;
        Ok(params)
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(self.scale_x, self.scale_y)
    }
}

impl ShapeRecord {
    fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Rectangle(rect) => ShapeRecord::Rectangle(BoxRecord {
                x: rect.center().x,
                y: rect.center().y,
                width: rect.size().x,
                height: rect.size().y,
                paint: PaintRecord::from_shape(shape),
            }),
            Shape::Ellipse(ellipse) => ShapeRecord::Ellipse(BoxRecord {
                x: ellipse.center().x,
                y: ellipse.center().y,
                width: ellipse.radii().x * 2.0,
                height: ellipse.radii().y * 2.0,
                paint: PaintRecord::from_shape(shape),
            }),
            Shape::Segment(segment) => ShapeRecord::Segment(SegmentRecord {
                start_x: segment.start().x,
                start_y: segment.start().y,
                end_x: segment.end().x,
                end_y: segment.end().y,
                paint: PaintRecord::from_shape(shape),
            }),
            Shape::Polygon(polygon) => ShapeRecord::Polygon(PolygonRecord {
                points: polygon.coordinates(),
                paint: PaintRecord::from_shape(shape),
            }),
            Shape::Text(text) => ShapeRecord::Text(TextRecord {
                x: text.position().x,
                y: text.position().y,
                width: text.wrap_width(),
                font_size: text.font_size(),
                content: text.content().to_owned(),
                paint: PaintRecord::from_shape(shape),
            }),
        }
    }

    fn kind(&self) -> ShapeKind {
        match self {
            ShapeRecord::Rectangle(_) => ShapeKind::Rectangle,
            ShapeRecord::Ellipse(_) => ShapeKind::Ellipse,
            ShapeRecord::Segment(_) => ShapeKind::Segment,
            ShapeRecord::Polygon(_) => ShapeKind::Polygon,
            ShapeRecord::Text(_) => ShapeKind::Text,
        }
    }

    fn paint(&self) -> &PaintRecord {
        match self {
            ShapeRecord::Rectangle(r) | ShapeRecord::Ellipse(r) => &r.paint,
            ShapeRecord::Segment(r) => &r.paint,
            ShapeRecord::Polygon(r) => &r.paint,
            ShapeRecord::Text(r) => &r.paint,
        }
    }

    fn into_shape(self, base: &StyleParams) -> EditorResult<Shape> {
        let kind = self.kind();
        let mut params = self.paint().params(kind, base)?;
        let scale = self.paint().scale();

        let mut shape = match self {
            ShapeRecord::Rectangle(r) | ShapeRecord::Ellipse(r) => {
                if r.width < 0.0 || r.height < 0.0 {
                    return Err(malformed(kind, "negative width or height"));
                }
                params.width = r.width;
                params.height = r.height;
                let center = Pos2::new(r.x, r.y);
                if kind == ShapeKind::Rectangle {
                    factory::create_rectangle(center, &params)
                } else {
                    factory::create_ellipse(center, &params)
                }
            }
            ShapeRecord::Segment(r) => factory::create_segment(
                Pos2::new(r.start_x, r.start_y),
                Pos2::new(r.end_x, r.end_y),
                &params,
            ),
            ShapeRecord::Polygon(r) => {
                if r.points.len() % 2 != 0 {
                    return Err(malformed(kind, "odd number of point coordinates"));
                }
                let vertices: Vec<Pos2> = r.points.chunks_exact(2).map(|p| Pos2::new(p[0], p[1])).collect();
                factory::create_polygon(vertices, &params).ok_or_else(|| {
                    malformed(kind, format!("needs at least {MIN_POLYGON_VERTICES} vertices"))
                })?
            }
            ShapeRecord::Text(r) => {
                params.width = r.width;
                params.font_size = r.font_size;
                params.text = r.content;
                factory::create_text(Pos2::new(r.x, r.y), &params)
            }
        };
        shape.set_scale(scale);
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_rectangle_record_fields() {
        let params = StyleParams::default();
        let shape = factory::create_rectangle(Pos2::new(50.0, 50.0), &params);
        let json: serde_json::Value = serde_json::from_slice(&save_shapes(&[shape]).unwrap()).unwrap();

        let record = &json[0];
        assert_eq!(record["type"], "rectangle");
        assert_eq!(record["x"], 50.0);
        assert_eq!(record["width"], 100.0);
        assert_eq!(record["height"], 60.0);
        assert_eq!(parse_color(record["stroke"].as_str().unwrap()).unwrap(), Color32::BLACK);
        assert_eq!(record["scaleX"], 1.0);
    }

    #[test]
    fn test_segment_fill_is_optional() {
        let json = r##"[{"type":"segment","startX":0,"startY":0,"endX":10,"endY":5,"stroke":"#ff0000"}]"##;
        let base = StyleParams::default();
        let shapes = load_shapes(json.as_bytes(), &base).unwrap();
        assert_eq!(shapes[0].edge_color(), Color32::RED);
        assert_eq!(shapes[0].fill_color(), base.fill_color);
        assert_eq!(shapes[0].scale(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_missing_fill_is_malformed() {
        let json = r##"[{"type":"ellipse","x":0,"y":0,"width":10,"height":5,"stroke":"#ff0000"}]"##;
        let err = load_shapes(json.as_bytes(), &StyleParams::default()).unwrap_err();
        assert!(matches!(err, EditorError::MalformedShape { ref kind, .. } if kind == "ellipse"));
    }
}
