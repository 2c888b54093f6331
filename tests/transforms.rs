use std::cell::RefCell;
use std::rc::Rc;

use egui::{Pos2, Vec2};
use vector_paint::{EditorContext, EditorEvent, Shape, ToolKind, TransformMode};

const EPSILON: f32 = 1e-4;

// Relative for large values, absolute near zero
fn assert_close(a: f32, b: f32) {
    let tolerance = EPSILON * a.abs().max(b.abs()).max(1.0);
    assert!((a - b).abs() <= tolerance, "{a} != {b}");
}

fn assert_pos_close(a: Pos2, b: Pos2) {
    assert_close(a.x, b.x);
    assert_close(a.y, b.y);
}

/// Draw one shape with `tool` at `clicks`, then select it by clicking `select_at`
fn editor_with(tool: ToolKind, clicks: &[Pos2], select_at: Pos2) -> EditorContext {
    let mut editor = EditorContext::new();
    editor.set_active_tool(tool);
    for pos in clicks {
        editor.on_surface_click(*pos, 1);
    }
    if tool == ToolKind::Polygon {
        editor.on_surface_click(clicks[clicks.len() - 1], 2);
    }
    editor.set_active_tool(ToolKind::Idle);
    editor.on_surface_click(select_at, 1);
    assert!(editor.selected_shape().is_some());
    editor
}

fn drag(editor: &mut EditorContext, from: Pos2, path: &[Pos2]) {
    assert!(editor.on_pointer_down(from));
    for pos in path {
        editor.on_pointer_drag(*pos);
    }
    editor.on_pointer_up(path.last().copied().unwrap_or(from));
}

fn selected(editor: &EditorContext) -> &Shape {
    editor.selected_shape().unwrap()
}

#[test]
fn test_move_translates_all_geometry() {
    let mut editor = editor_with(
        ToolKind::Segment,
        &[Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0)],
        Pos2::new(50.0, 50.0),
    );
    drag(&mut editor, Pos2::new(50.0, 50.0), &[Pos2::new(60.0, 50.0), Pos2::new(70.0, 80.0)]);

    let segment = selected(&editor).as_segment().unwrap();
    assert_eq!(segment.start(), Pos2::new(20.0, 30.0));
    assert_eq!(segment.end(), Pos2::new(120.0, 130.0));
}

#[test]
fn test_move_needs_press_on_shape() {
    let mut editor = editor_with(ToolKind::Rectangle, &[Pos2::new(50.0, 50.0)], Pos2::new(50.0, 50.0));
    assert!(!editor.on_pointer_down(Pos2::new(400.0, 400.0)));
    editor.on_pointer_drag(Pos2::new(420.0, 400.0));
    assert_eq!(selected(&editor).anchor(), Pos2::new(50.0, 50.0));
}

#[test]
fn test_rectangle_resize_keeps_aspect_ratio() {
    let mut editor = editor_with(ToolKind::Rectangle, &[Pos2::new(50.0, 50.0)], Pos2::new(50.0, 50.0));
    editor.set_transform_mode(TransformMode::Resize);
    let ratio = 100.0 / 60.0;

    assert!(editor.on_pointer_down(Pos2::new(100.0, 80.0)));
    for pos in [
        Pos2::new(150.0, 70.0),
        Pos2::new(60.0, 200.0),
        Pos2::new(-30.0, -40.0),
        Pos2::new(50.0, 50.0),
        Pos2::new(51.0, 120.0),
    ] {
        editor.on_pointer_drag(pos);
        let size = selected(&editor).dimension();
        assert_close(size.x / size.y, ratio);
        assert_eq!(selected(&editor).anchor(), Pos2::new(50.0, 50.0));
    }
    editor.on_pointer_up(Pos2::new(51.0, 120.0));

    // Last drag: dy = 70 dominates, dx = 70 / 0.6
    let size = selected(&editor).dimension();
    assert_close(size.y, 140.0);
    assert_close(size.x, 140.0 * ratio);
}

#[test]
fn test_ellipse_resize_keeps_aspect_ratio() {
    let mut editor = editor_with(ToolKind::Ellipse, &[Pos2::new(100.0, 100.0)], Pos2::new(100.0, 100.0));
    editor.set_transform_mode(TransformMode::Resize);

    drag(&mut editor, Pos2::new(150.0, 100.0), &[Pos2::new(200.0, 110.0)]);
    let radii = selected(&editor).dimension();
    assert_close(radii.x, 100.0);
    assert_close(radii.y, 60.0);
    assert_close(radii.x / radii.y, 50.0 / 30.0);
}

#[test]
fn test_one_checkpoint_per_gesture() {
    let mut editor = editor_with(ToolKind::Rectangle, &[Pos2::new(50.0, 50.0)], Pos2::new(50.0, 50.0));
    let events = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&events);
    editor.event_bus.subscribe(Box::new(move |event: &EditorEvent| {
        if matches!(event, EditorEvent::InteractionStarted { .. }) {
            *counter.borrow_mut() += 1;
        }
    }));
    let depth = editor.history().len();

    let path: Vec<Pos2> = (1..=20).map(|i| Pos2::new(50.0 + i as f32, 50.0)).collect();
    drag(&mut editor, Pos2::new(50.0, 50.0), &path);
    assert_eq!(editor.history().len(), depth + 1);
    assert_eq!(*events.borrow(), 1);

    // Release re-armed the gate
    drag(&mut editor, Pos2::new(70.0, 50.0), &path[..5]);
    assert_eq!(editor.history().len(), depth + 2);
    assert_eq!(*events.borrow(), 2);

    // A press without drag records nothing
    assert!(editor.on_pointer_down(Pos2::new(55.0, 50.0)));
    editor.on_pointer_up(Pos2::new(55.0, 50.0));
    assert_eq!(editor.history().len(), depth + 2);
}

#[test]
fn test_undo_reverts_whole_gesture() {
    let mut editor = editor_with(ToolKind::Rectangle, &[Pos2::new(50.0, 50.0)], Pos2::new(50.0, 50.0));
    editor.set_transform_mode(TransformMode::Stretch);
    drag(
        &mut editor,
        Pos2::new(95.0, 75.0),
        &[Pos2::new(120.0, 90.0), Pos2::new(150.0, 150.0)],
    );
    assert_ne!(selected(&editor).dimension(), Vec2::new(100.0, 60.0));

    assert!(editor.undo());
    assert_eq!(selected(&editor).dimension(), Vec2::new(100.0, 60.0));
    assert_eq!(selected(&editor).anchor(), Pos2::new(50.0, 50.0));
}

#[test]
fn test_rectangle_stretch_fixes_opposite_corner() {
    let mut editor = editor_with(ToolKind::Rectangle, &[Pos2::new(50.0, 50.0)], Pos2::new(50.0, 50.0));
    editor.set_transform_mode(TransformMode::Stretch);

    // Press in the bottom-right quadrant, so the top-left corner (0, 20) stays
    drag(&mut editor, Pos2::new(95.0, 75.0), &[Pos2::new(200.0, 220.0)]);
    let shape = selected(&editor);
    assert_eq!(shape.dimension(), Vec2::new(200.0, 200.0));
    assert_eq!(shape.anchor(), Pos2::new(100.0, 120.0));
    assert_eq!(shape.bounds().min, Pos2::new(0.0, 20.0));
}

#[test]
fn test_ellipse_stretch_tracks_pointer() {
    let mut editor = editor_with(ToolKind::Ellipse, &[Pos2::new(100.0, 100.0)], Pos2::new(100.0, 100.0));
    editor.set_transform_mode(TransformMode::Stretch);

    drag(&mut editor, Pos2::new(140.0, 100.0), &[Pos2::new(130.0, 180.0)]);
    assert_eq!(selected(&editor).dimension(), Vec2::new(30.0, 80.0));
    assert_eq!(selected(&editor).anchor(), Pos2::new(100.0, 100.0));
}

#[test]
fn test_segment_end_follows_pointer() {
    for mode in [TransformMode::Resize, TransformMode::Stretch] {
        let mut editor = editor_with(
            ToolKind::Segment,
            &[Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0)],
            Pos2::new(50.0, 50.0),
        );
        editor.set_transform_mode(mode);
        drag(&mut editor, Pos2::new(100.0, 100.0), &[Pos2::new(120.0, 40.0)]);

        let segment = selected(&editor).as_segment().unwrap();
        assert_eq!(segment.start(), Pos2::new(0.0, 0.0));
        assert_eq!(segment.end(), Pos2::new(120.0, 40.0));
    }
}

#[test]
fn test_polygon_resize_scales_about_centroid() {
    let vertices = [Pos2::new(10.0, 10.0), Pos2::new(60.0, 10.0), Pos2::new(35.0, 60.0)];
    let mut editor = editor_with(ToolKind::Polygon, &vertices, Pos2::new(35.0, 25.0));
    editor.set_transform_mode(TransformMode::Resize);

    let centroid = selected(&editor).as_polygon().unwrap().centroid();
    let target = centroid + (vertices[0] - centroid) * 2.0;
    drag(&mut editor, vertices[0], &[target]);

    let polygon = selected(&editor).as_polygon().unwrap();
    for (moved, original) in polygon.vertices().iter().zip(vertices) {
        assert_pos_close(*moved, centroid + (original - centroid) * 2.0);
    }
    assert_pos_close(polygon.centroid(), centroid);
}

#[test]
fn test_polygon_resize_clamps_scale() {
    let vertices = [Pos2::new(10.0, 10.0), Pos2::new(60.0, 10.0), Pos2::new(35.0, 60.0)];
    let mut editor = editor_with(ToolKind::Polygon, &vertices, Pos2::new(35.0, 25.0));
    editor.set_transform_mode(TransformMode::Resize);

    let centroid = selected(&editor).as_polygon().unwrap().centroid();
    drag(&mut editor, vertices[0], &[centroid]);

    let polygon = selected(&editor).as_polygon().unwrap();
    assert_pos_close(polygon.first_vertex(), centroid + (vertices[0] - centroid) * 0.1);
}

#[test]
fn test_polygon_stretch_moves_nearest_vertex() {
    let vertices = [Pos2::new(10.0, 10.0), Pos2::new(60.0, 10.0), Pos2::new(35.0, 60.0)];
    let mut editor = editor_with(ToolKind::Polygon, &vertices, Pos2::new(35.0, 25.0));
    editor.set_transform_mode(TransformMode::Stretch);

    drag(&mut editor, Pos2::new(58.0, 12.0), &[Pos2::new(80.0, 0.0)]);
    assert_eq!(
        selected(&editor).as_polygon().unwrap().coordinates(),
        vec![10.0, 10.0, 80.0, 0.0, 35.0, 60.0]
    );

}

#[test]
fn test_polygon_stretch_away_from_vertices_starts_nothing() {
    let vertices = [Pos2::new(10.0, 10.0), Pos2::new(60.0, 10.0), Pos2::new(35.0, 60.0)];
    let mut editor = editor_with(ToolKind::Polygon, &vertices, Pos2::new(35.0, 25.0));
    editor.set_transform_mode(TransformMode::Stretch);
    let depth = editor.history().len();

    assert!(!editor.on_pointer_down(Pos2::new(35.0, 30.0)));
    editor.on_pointer_drag(Pos2::new(0.0, 100.0));
    editor.on_pointer_up(Pos2::new(0.0, 100.0));

    assert!(editor.state().is_idle());
    assert_eq!(editor.history().len(), depth);
    assert_eq!(
        selected(&editor).as_polygon().unwrap().coordinates(),
        vec![10.0, 10.0, 60.0, 10.0, 35.0, 60.0]
    );
}

#[test]
fn test_text_resize_scales_uniformly() {
    let mut editor = editor_with(ToolKind::Text, &[Pos2::new(300.0, 300.0)], Pos2::new(310.0, 305.0));
    editor.set_transform_mode(TransformMode::Resize);

    let center = selected(&editor).bounds().center();
    let press = center + Vec2::new(20.0, 0.0);
    drag(&mut editor, press, &[center + Vec2::new(0.0, 40.0)]);

    let scale = selected(&editor).scale();
    assert_close(scale.x, 2.0);
    assert_close(scale.y, 2.0);
}

#[test]
fn test_text_stretch_accumulates_deltas() {
    let mut editor = editor_with(ToolKind::Text, &[Pos2::new(300.0, 300.0)], Pos2::new(310.0, 305.0));
    editor.set_transform_mode(TransformMode::Stretch);

    drag(
        &mut editor,
        Pos2::new(400.0, 320.0),
        &[Pos2::new(410.0, 320.0), Pos2::new(420.0, 330.0)],
    );
    let scale = selected(&editor).scale();
    assert_close(scale.x, 1.2);
    assert_close(scale.y, 1.1);
    // Text dimension is its scale
    assert_eq!(selected(&editor).dimension(), scale);
}

#[test]
fn test_text_stretch_never_mirrors() {
    let mut editor = editor_with(ToolKind::Text, &[Pos2::new(300.0, 300.0)], Pos2::new(310.0, 305.0));
    editor.set_transform_mode(TransformMode::Stretch);

    // Far enough left to carry the scale well past zero
    drag(
        &mut editor,
        Pos2::new(400.0, 320.0),
        &[Pos2::new(305.0, 320.0), Pos2::new(200.0, 320.0)],
    );
    let scale = selected(&editor).scale();
    assert_close(scale.x, editor.config().min_text_scale);
    assert_close(scale.y, 1.0);
}

#[test]
fn test_text_stretch_keeps_existing_flip() {
    let mut editor = editor_with(ToolKind::Text, &[Pos2::new(300.0, 300.0)], Pos2::new(310.0, 305.0));
    editor.execute_command(vector_paint::CommandKind::FlipHorizontal);
    editor.set_transform_mode(TransformMode::Stretch);

    drag(&mut editor, Pos2::new(400.0, 320.0), &[Pos2::new(700.0, 320.0)]);
    let scale = selected(&editor).scale();
    assert_close(scale.x, -editor.config().min_text_scale);
}

#[test]
fn test_rectangle_stretch_clamp_keeps_fixed_corner() {
    let mut editor = editor_with(ToolKind::Rectangle, &[Pos2::new(50.0, 50.0)], Pos2::new(50.0, 50.0));
    editor.set_transform_mode(TransformMode::Stretch);
    let min_size = editor.config().min_extent * 2.0;

    // Bottom-right press, drag to just right of and above the fixed corner (0, 20)
    drag(&mut editor, Pos2::new(95.0, 75.0), &[Pos2::new(0.5, 19.5)]);
    let bounds = selected(&editor).bounds();
    assert_close(bounds.width(), min_size);
    assert_close(bounds.height(), min_size);
    assert_pos_close(bounds.left_bottom(), Pos2::new(0.0, 20.0));
}

#[test]
fn test_switching_tool_cancels_gesture() {
    let mut editor = editor_with(ToolKind::Rectangle, &[Pos2::new(50.0, 50.0)], Pos2::new(50.0, 50.0));
    assert!(editor.on_pointer_down(Pos2::new(50.0, 50.0)));
    editor.on_pointer_drag(Pos2::new(60.0, 50.0));
    assert!(editor.state().is_transforming());

    editor.set_active_tool(ToolKind::Ellipse);
    assert!(editor.state().is_idle());
    editor.on_pointer_drag(Pos2::new(90.0, 50.0));
    assert_eq!(selected(&editor).anchor(), Pos2::new(60.0, 50.0));
    assert!(selected(&editor).interaction_armed());
}

#[test]
fn test_no_gesture_without_selection() {
    let mut editor = EditorContext::new();
    editor.set_active_tool(ToolKind::Rectangle);
    editor.on_surface_click(Pos2::new(50.0, 50.0), 1);
    assert!(!editor.on_pointer_down(Pos2::new(50.0, 50.0)));
}
