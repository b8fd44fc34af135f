// File: crates/crosshair-render-skia/src/lib.rs
// Summary: Skia-backed crosshair renderer; keeps overlay node state and paints it onto a canvas.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use crosshair_core::config::{LineStyle, Rgba, WrapperSelector};
use crosshair_core::{CursorPos, LineAxis, MarkId, NodeId, Renderer};
use skia_safe as skia;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
struct LineNode {
    axis: LineAxis,
    style: LineStyle,
    parent: NodeId,
    visible: bool,
    offset: Option<f64>,
}

#[derive(Clone, Debug)]
struct WrapperNode {
    selector: WrapperSelector,
}

/// Overlay renderer for charts drawn with Skia.
///
/// The host registers where each point mark was drawn; highlighted marks get a halo.
pub struct SkiaOverlayRenderer {
    next_id: u32,
    wrappers: BTreeMap<NodeId, WrapperNode>,
    lines: BTreeMap<NodeId, LineNode>,
    marks: BTreeMap<MarkId, (f32, f32)>,
    highlighted: BTreeSet<MarkId>,
    page_offset: (f64, f64),
    pub highlight_color: skia::Color,
    pub highlight_radius: f32,
}

impl Default for SkiaOverlayRenderer {
    fn default() -> Self { Self::new() }
}

impl SkiaOverlayRenderer {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            wrappers: BTreeMap::new(),
            lines: BTreeMap::new(),
            marks: BTreeMap::new(),
            highlighted: BTreeSet::new(),
            page_offset: (0.0, 0.0),
            highlight_color: skia::Color::from_argb(255, 255, 230, 70),
            highlight_radius: 6.0,
        }
    }

    /// Where the chart surface sits on the page (window), in pixels.
    pub fn with_page_offset(mut self, x: f64, y: f64) -> Self {
        self.page_offset = (x, y);
        self
    }

    /// Record the pixel center of a drawn point mark. Call after the mark's draw
    /// event reached the overlay, since the first point of a pass clears old marks.
    pub fn register_mark(&mut self, mark: MarkId, x: f32, y: f32) {
        self.marks.insert(mark, (x, y));
    }

    /// Drop mark positions from a previous draw pass.
    pub fn clear_marks(&mut self) {
        self.marks.clear();
        self.highlighted.clear();
    }

    pub fn is_highlighted(&self, mark: MarkId) -> bool { self.highlighted.contains(&mark) }

    pub fn wrapper_selector(&self) -> Option<&WrapperSelector> {
        self.wrappers.values().next().map(|w| &w.selector)
    }

    /// Paint visible indicator lines and highlight halos for a `width` x `height` wrapper.
    pub fn paint(&self, canvas: &skia::Canvas, width: i32, height: i32) {
        let (w, h) = (width as f32, height as f32);

        let mut line_paint = skia::Paint::default();
        line_paint.set_anti_alias(false);
        line_paint.set_style(skia::paint::Style::Fill);
        for line in self.lines.values().filter(|l| l.visible) {
            let Some(offset) = line.offset else { continue };
            let offset = offset as f32;
            line_paint.set_color(to_skia(line.style.background_color));
            let lw = line.style.width.resolve(w);
            let lh = line.style.height.resolve(h);
            let rect = match line.axis {
                LineAxis::X => skia::Rect::from_xywh(offset, 0.0, lw, lh),
                LineAxis::Y => skia::Rect::from_xywh(0.0, offset, lw, lh),
            };
            canvas.draw_rect(rect, &line_paint);
        }

        let mut halo = skia::Paint::default();
        halo.set_anti_alias(true);
        halo.set_style(skia::paint::Style::Stroke);
        halo.set_stroke_width(2.0);
        halo.set_color(self.highlight_color);
        for mark in &self.highlighted {
            match self.marks.get(mark) {
                Some(&(x, y)) => {
                    canvas.draw_circle((x, y), self.highlight_radius, &halo);
                }
                None => warn!(?mark, "highlighted mark has no registered position"),
            }
        }
    }

    /// Render only the overlay on `background` and encode it as PNG.
    pub fn render_png_bytes(&self, width: i32, height: i32, background: skia::Color) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(background);
        self.paint(canvas, width, height);
        encode_png(&mut surface)
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Snapshot a surface and encode it as PNG.
pub fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    let data = image
        .encode(None, skia::EncodedImageFormat::PNG, None)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

pub fn to_skia(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

impl Renderer for SkiaOverlayRenderer {
    fn wrap_container(&mut self, selector: &WrapperSelector) -> NodeId {
        let id = self.alloc();
        self.wrappers.insert(id, WrapperNode { selector: selector.clone() });
        debug!(%selector, "skia overlay wrapper created");
        id
    }

    fn unwrap_container(&mut self, wrapper: NodeId) {
        self.wrappers.remove(&wrapper);
        self.lines.retain(|_, l| l.parent != wrapper);
    }

    fn create_overlay_node(&mut self, parent: NodeId, axis: LineAxis, style: &LineStyle) -> NodeId {
        let id = self.alloc();
        self.lines.insert(id, LineNode { axis, style: *style, parent, visible: false, offset: None });
        id
    }

    fn remove_node(&mut self, node: NodeId) {
        self.lines.remove(&node);
        self.wrappers.remove(&node);
    }

    fn set_position(&mut self, node: NodeId, offset: f64) {
        if let Some(l) = self.lines.get_mut(&node) {
            l.offset = Some(offset);
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(l) = self.lines.get_mut(&node) {
            l.visible = visible;
        }
    }

    fn toggle_highlight(&mut self, mark: MarkId, on: bool) {
        if on {
            self.highlighted.insert(mark);
        } else {
            self.highlighted.remove(&mark);
        }
    }

    fn node_offset(&self, _node: NodeId) -> CursorPos {
        CursorPos::new(self.page_offset.0, self.page_offset.1)
    }

    fn begin_draw_pass(&mut self) {
        self.clear_marks();
    }
}
