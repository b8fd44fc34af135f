// File: crates/crosshair-render-skia/tests/overlay_png.rs
// Purpose: Drive the overlay with the Skia renderer and check the painted pixels.

use crosshair_core::{
    ChartEvent, ChartPlugin, CrosshairCursor, CrosshairOptions, DrawEvent, MarkId, Notifier, PointerEvent,
};
use crosshair_render_skia::SkiaOverlayRenderer;
use skia_safe as skia;

const W: i32 = 120;
const H: i32 = 80;

fn options() -> CrosshairOptions {
    let json = r##"{
        "wrapperSelector": ".chart",
        "styles": {
            "x": { "backgroundColor": "#ff0000", "width": "1px", "height": "100%" },
            "y": { "backgroundColor": "#00ff00", "width": "100%", "height": "1px" }
        }
    }"##;
    CrosshairOptions::from_json_str(json).expect("options")
}

fn overlay() -> CrosshairCursor<SkiaOverlayRenderer> {
    let renderer = SkiaOverlayRenderer::new().with_page_offset(10.0, 10.0);
    let mut cursor = CrosshairCursor::new(options(), renderer, Notifier::default()).expect("attach");
    draw_point_at(&mut cursor, 40.0, 60.0);
    cursor.on_chart_event(&ChartEvent::Created { point_stroke_width: Some(8.0) }).expect("created");
    cursor
}

fn draw_point_at(cursor: &mut CrosshairCursor<SkiaOverlayRenderer>, x: f32, y: f32) {
    cursor
        .on_chart_event(&ChartEvent::Draw(DrawEvent::point(0, x as f64, y as f64, MarkId(0))))
        .expect("draw");
    cursor.renderer_mut().register_mark(MarkId(0), x, y);
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).expect("decode png").to_rgba8()
}

#[test]
fn hidden_overlay_paints_nothing() {
    let cursor = overlay();
    let bytes = cursor.renderer().render_png_bytes(W, H, skia::Color::BLACK).expect("render");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = decode(&bytes);
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn lines_follow_the_cursor_relative_to_the_wrapper() {
    let mut cursor = overlay();
    cursor.on_pointer_event(&PointerEvent::Enter);
    // Page (30, 20) is wrapper (20, 10).
    cursor.on_pointer_event(&PointerEvent::Move { page_x: 30.0, page_y: 20.0 });

    let img = decode(&cursor.renderer().render_png_bytes(W, H, skia::Color::BLACK).expect("render"));
    assert_eq!(img.get_pixel(20, 40).0, [255, 0, 0, 255], "x line column");
    assert_eq!(img.get_pixel(100, 10).0, [0, 255, 0, 255], "y line row");
    assert_eq!(img.get_pixel(100, 40).0, [0, 0, 0, 255], "background");
}

#[test]
fn hovered_mark_gets_a_halo() {
    let mut cursor = overlay();
    cursor.on_pointer_event(&PointerEvent::Enter);
    // Wrapper x = 42 is within 4px of the mark at x = 40.
    cursor.on_pointer_event(&PointerEvent::Move { page_x: 52.0, page_y: 15.0 });
    assert!(cursor.renderer().is_highlighted(MarkId(0)));

    let img = decode(&cursor.renderer().render_png_bytes(W, H, skia::Color::BLACK).expect("render"));
    // Ring of radius 6 around (40, 60): the point 6px left of center is on the stroke.
    let p = img.get_pixel(34, 60).0;
    assert!(p[0] > 100 && p[1] > 100, "expected halo color, got {p:?}");
}

#[test]
fn destroy_removes_painted_lines() {
    let mut cursor = overlay();
    cursor.on_pointer_event(&PointerEvent::Enter);
    cursor.on_pointer_event(&PointerEvent::Move { page_x: 30.0, page_y: 20.0 });
    cursor.destroy();
    assert!(cursor.renderer().wrapper_selector().is_none());

    let img = decode(&cursor.renderer().render_png_bytes(W, H, skia::Color::BLACK).expect("render"));
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn redraw_drops_halos_from_the_previous_pass() {
    let mut cursor = overlay();
    cursor.on_pointer_event(&PointerEvent::Enter);
    cursor.on_pointer_event(&PointerEvent::Move { page_x: 52.0, page_y: 15.0 });
    assert!(cursor.renderer().is_highlighted(MarkId(0)));

    // Same mark id, new layout.
    draw_point_at(&mut cursor, 90.0, 20.0);
    cursor.on_chart_event(&ChartEvent::Created { point_stroke_width: Some(8.0) }).expect("created");
    assert!(!cursor.renderer().is_highlighted(MarkId(0)));

    let img = decode(&cursor.renderer().render_png_bytes(W, H, skia::Color::BLACK).expect("render"));
    assert_eq!(img.get_pixel(34, 60).0, [0, 0, 0, 255], "old halo position");
    assert_eq!(img.get_pixel(84, 20).0, [0, 0, 0, 255], "new position not hovered yet");
}
