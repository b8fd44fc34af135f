// File: crates/crosshair-core/src/geometry.rs
// Summary: Pixel positions and the cursor-to-point hit test.

use serde::{Deserialize, Serialize};

use crate::config::AxisMode;

/// Rendered point position, rounded to whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }

    /// Round chart geometry to the nearest pixel; halves go toward +inf.
    pub fn rounded(x: f64, y: f64) -> Self {
        Self { x: (x + 0.5).floor() as i32, y: (y + 0.5).floor() as i32 }
    }
}

/// Cursor position relative to the wrapper's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorPos {
    pub x: f64,
    pub y: f64,
}

impl CursorPos {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// `cursor` lies in `[point - padding, point + padding]`, both ends inclusive.
#[inline]
pub fn is_within(cursor: f64, point: f64, padding: f64) -> bool {
    cursor >= point - padding && cursor <= point + padding
}

/// Hit test along the configured axis. `Full` is an OR across both axes.
pub fn matches(cursor: CursorPos, point: PixelPos, padding: f64, mode: AxisMode) -> bool {
    let on_x = || is_within(cursor.x, point.x as f64, padding);
    let on_y = || is_within(cursor.y, point.y as f64, padding);
    match mode {
        AxisMode::X => on_x(),
        AxisMode::Y => on_y(),
        AxisMode::Full => on_x() || on_y(),
    }
}

/// Hit-test padding from a representative point's stroke width.
/// A missing or non-finite width yields zero padding.
pub fn padding_from_stroke(stroke_width: Option<f64>) -> f64 {
    match stroke_width {
        Some(w) if w.is_finite() && w > 0.0 => w / 2.0,
        _ => 0.0,
    }
}
