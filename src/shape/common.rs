use egui::{Pos2, Rect, Vec2};

/// Default distance within which a point counts as on a segment
pub const SEGMENT_HIT_TOLERANCE: f32 = 5.0;
pub const MIN_POLYGON_VERTICES: usize = 3;

// Rough glyph metrics used to size text without a font backend
pub(crate) const GLYPH_WIDTH_FACTOR: f32 = 0.6;
pub(crate) const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Shortest distance from `point` to the segment `a`..`b`
pub(crate) fn distance_to_line_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0.0 {
        return point.distance(a);
    }

    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Axis-aligned box around segment endpoints or polygon vertices
pub(crate) fn calculate_bounds(points: &[Pos2]) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }
    Rect::from_points(points)
}

/// Even-odd ray cast; points exactly on an edge may land either side
pub(crate) fn point_in_polygon(point: Pos2, vertices: &[Pos2]) -> bool {
    if vertices.len() < MIN_POLYGON_VERTICES {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Arithmetic mean of the vertices
pub(crate) fn centroid(vertices: &[Pos2]) -> Pos2 {
    if vertices.is_empty() {
        return Pos2::ZERO;
    }
    let sum = vertices
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / vertices.len() as f32).to_pos2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_line_segment() {
        let start = Pos2::new(0.0, 0.0);
        let end = Pos2::new(10.0, 0.0);
        assert_eq!(distance_to_line_segment(Pos2::new(5.0, 3.0), start, end), 3.0);
        // Past the end the distance is measured to the endpoint
        assert_eq!(distance_to_line_segment(Pos2::new(14.0, 3.0), start, end), 5.0);
        // Degenerate segment
        assert_eq!(distance_to_line_segment(Pos2::new(3.0, 4.0), start, start), 5.0);
    }

    #[test]
    fn test_calculate_bounds() {
        let points = [Pos2::new(40.0, 20.0), Pos2::new(10.0, 50.0), Pos2::new(25.0, -5.0)];
        let bounds = calculate_bounds(&points);
        assert_eq!(bounds.min, Pos2::new(10.0, -5.0));
        assert_eq!(bounds.max, Pos2::new(40.0, 50.0));
        assert_eq!(calculate_bounds(&[]), Rect::NOTHING);
    }

    #[test]
    fn test_point_in_polygon() {
        let triangle = [Pos2::new(10.0, 10.0), Pos2::new(60.0, 10.0), Pos2::new(35.0, 60.0)];
        assert!(point_in_polygon(Pos2::new(35.0, 25.0), &triangle));
        assert!(!point_in_polygon(Pos2::new(5.0, 5.0), &triangle));
        assert!(!point_in_polygon(Pos2::new(35.0, 25.0), &triangle[..2]));
    }

    #[test]
    fn test_centroid() {
        let square = [
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 10.0),
            Pos2::new(0.0, 10.0),
        ];
        assert_eq!(centroid(&square), Pos2::new(5.0, 5.0));
    }
}
