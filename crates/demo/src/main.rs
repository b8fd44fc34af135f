// File: crates/demo/src/main.rs
// Summary: Demo lays out a small line chart, drives the crosshair overlay with a scripted pointer path,
// logs every notification and renders the final frame to PNG.

use anyhow::{Context, Result};
use crosshair_core::{
    ChartEvent, ChartPlugin, CrosshairCursor, CrosshairOptions, DrawEvent, Hooks, MarkId, Notifier, PointValue,
    PointerEvent,
};
use crosshair_render_skia::{encode_png, SkiaOverlayRenderer};
use serde_json::json;
use skia_safe as skia;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const WIDTH: i32 = 800;
const HEIGHT: i32 = 480;
// left, right, top, bottom
const INSETS: (f32, f32, f32, f32) = (72.0, 24.0, 24.0, 56.0);
const POINT_STROKE: f32 = 10.0;

const DEFAULT_OPTIONS: &str = r##"{
    "wrapperSelector": ".crosshairCursorWrapper",
    "axisMode": "full",
    "sendDataOn": "hover",
    "clickToFreeze": true
}"##;

struct Sample {
    label: String,
    value: f64,
}

struct LaidOutPoint {
    x: f32,
    y: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Args: [data.csv] [options.json] [out.png]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let samples = match args.first() {
        Some(path) => load_samples_csv(Path::new(path)).with_context(|| format!("failed to load CSV '{path}'"))?,
        None => builtin_samples(),
    };
    if samples.is_empty() {
        anyhow::bail!("no samples loaded; expected `label,value` rows");
    }
    let options = match args.get(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("reading options '{path}'"))?;
            CrosshairOptions::from_json_str(&raw)?
        }
        None => CrosshairOptions::from_json_str(DEFAULT_OPTIONS)?,
    };
    let out = args.get(2).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("target/demo_out/crosshair.png"));
    info!(points = samples.len(), selector = %options.wrapper_selector, "loaded demo input");

    let hooks = Hooks::new()
        .on_hover(|view, meta| info!(hovered = %json!(meta), frozen = view.is_frozen(), "hover"))
        .on_click(|view, meta| info!(clicked = %json!(meta), frozen = view.is_frozen(), "click"))
        .on_freeze_change(|frozen| info!(frozen, "freeze changed"));
    let mut cursor = CrosshairCursor::new(options, SkiaOverlayRenderer::new(), Notifier::new(hooks))?;

    // Render pass: every point draw precedes `created`.
    let labels: Vec<String> = samples.iter().map(|s| s.label.clone()).collect();
    let layout = layout_points(&samples);
    for (i, (s, p)) in samples.iter().zip(&layout).enumerate() {
        let mark = MarkId(i as u64);
        let evt = DrawEvent::point(i, p.x as f64, p.y as f64, mark)
            .with_meta(json!({ "label": s.label }))
            .with_value(PointValue { x: Some(i as f64), y: Some(s.value) })
            .with_ticks(&labels);
        cursor.on_chart_event(&ChartEvent::Draw(evt))?;
        cursor.renderer_mut().register_mark(mark, p.x, p.y);
    }
    if let Err(e) = cursor.on_chart_event(&ChartEvent::Created { point_stroke_width: Some(POINT_STROKE as f64) }) {
        warn!(error = %e, "overlay created with a warning");
    }

    // Sweep left to right along the plot's vertical center, freeze on the third point, keep sweeping.
    let mid_y = (INSETS.2 + (HEIGHT as f32 - INSETS.3)) / 2.0;
    cursor.on_pointer_event(&PointerEvent::Enter);
    let freeze_at = layout.get(2).map(|p| p.x);
    let mut x = INSETS.0;
    while x < WIDTH as f32 - INSETS.1 {
        cursor.on_pointer_event(&PointerEvent::Move { page_x: x as f64, page_y: mid_y as f64 });
        if freeze_at.is_some_and(|fx| (x - fx).abs() < 2.0) && !cursor.is_frozen() {
            cursor.on_pointer_event(&PointerEvent::Click);
        }
        x += 4.0;
    }
    cursor.on_pointer_event(&PointerEvent::Leave);
    info!(
        frozen = cursor.is_frozen(),
        current = cursor.current_points().len(),
        "pointer script finished"
    );

    let bytes = render_frame(&cursor, &layout)?;
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out, bytes)?;
    info!(path = %out.display(), "wrote frame");

    cursor.destroy();
    Ok(())
}

fn builtin_samples() -> Vec<Sample> {
    [("Mon", 12.0), ("Tue", 9.0), ("Wed", 7.0), ("Thu", 8.0), ("Fri", 5.0), ("Sat", 11.0), ("Sun", 14.0)]
        .into_iter()
        .map(|(label, value)| Sample { label: label.to_string(), value })
        .collect()
}

/// Load `label,value` rows; rows with an unparsable value are skipped.
fn load_samples_csv(path: &Path) -> Result<Vec<Sample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let (Some(label), Some(value)) = (rec.get(0), rec.get(1)) else { continue };
        match value.trim().parse::<f64>() {
            Ok(value) => out.push(Sample { label: label.trim().to_string(), value }),
            Err(_) => warn!(row = ?rec, "skipping row with non-numeric value"),
        }
    }
    Ok(out)
}

/// Map samples to evenly spaced pixel positions inside the plot rect.
fn layout_points(samples: &[Sample]) -> Vec<LaidOutPoint> {
    let (l, r, t, b) = (INSETS.0, WIDTH as f32 - INSETS.1, INSETS.2, HEIGHT as f32 - INSETS.3);
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for s in samples {
        lo = lo.min(s.value);
        hi = hi.max(s.value);
    }
    let span = (hi - lo).max(1e-9);
    let step = if samples.len() > 1 { (r - l) / (samples.len() - 1) as f32 } else { 0.0 };
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| LaidOutPoint {
            x: l + step * i as f32,
            y: b - ((s.value - lo) / span) as f32 * (b - t),
        })
        .collect()
}

fn render_frame(cursor: &CrosshairCursor<SkiaOverlayRenderer>, layout: &[LaidOutPoint]) -> Result<Vec<u8>> {
    let mut surface = skia::surfaces::raster_n32_premul((WIDTH, HEIGHT))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(skia::Color::from_argb(255, 18, 18, 20));

    let mut axis = skia::Paint::default();
    axis.set_anti_alias(true);
    axis.set_stroke_width(1.5);
    axis.set_color(skia::Color::from_argb(255, 180, 180, 190));
    let (l, r, t, b) = (INSETS.0, WIDTH as f32 - INSETS.1, INSETS.2, HEIGHT as f32 - INSETS.3);
    canvas.draw_line((l, b), (r, b), &axis);
    canvas.draw_line((l, t), (l, b), &axis);

    if let Some(first) = layout.first() {
        let mut path = skia::Path::new();
        path.move_to((first.x, first.y));
        for p in layout.iter().skip(1) {
            path.line_to((p.x, p.y));
        }
        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(2.0);
        stroke.set_color(skia::Color::from_argb(255, 64, 160, 255));
        canvas.draw_path(&path, &stroke);
    }

    let mut point = skia::Paint::default();
    point.set_anti_alias(true);
    point.set_color(skia::Color::from_argb(255, 64, 160, 255));
    for p in layout {
        canvas.draw_circle((p.x, p.y), POINT_STROKE / 2.0, &point);
    }

    cursor.renderer().paint(canvas, WIDTH, HEIGHT);
    encode_png(&mut surface)
}
