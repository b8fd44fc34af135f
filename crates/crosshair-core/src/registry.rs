// File: crates/crosshair-core/src/registry.rs
// Summary: Point registry rebuilt on every draw pass; tracks which points sit under the cursor.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::AxisMode;
use crate::geometry::{matches, CursorPos, PixelPos};
use crate::renderer::MarkId;

/// Kind of mark the host chart just drew. Only `Point` is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawKind {
    Point,
    Line,
    Area,
    Grid,
    Label,
    Other,
}

/// Raw data value of a rendered point, as the host chart knows it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointValue {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Descriptor of one rendered mark, emitted by the host per draw pass.
#[derive(Clone, Debug)]
pub struct DrawEvent<'a> {
    pub kind: DrawKind,
    /// Pixel geometry as rendered (not yet rounded).
    pub x: f64,
    pub y: f64,
    /// Index of the point within its series.
    pub index: usize,
    pub series_index: usize,
    /// Caller payload attached to the source data point.
    pub meta: Value,
    pub value: PointValue,
    /// X-axis tick labels, looked up by `index`.
    pub axis_x_ticks: &'a [String],
    pub mark: MarkId,
}

impl<'a> DrawEvent<'a> {
    /// Convenience constructor for a point mark with no payload.
    pub fn point(index: usize, x: f64, y: f64, mark: MarkId) -> Self {
        Self {
            kind: DrawKind::Point,
            x,
            y,
            index,
            series_index: 0,
            meta: Value::Null,
            value: PointValue::default(),
            axis_x_ticks: &[],
            mark,
        }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_value(mut self, value: PointValue) -> Self {
        self.value = value;
        self
    }

    pub fn with_ticks(mut self, ticks: &'a [String]) -> Self {
        self.axis_x_ticks = ticks;
        self
    }

    pub fn in_series(mut self, series_index: usize) -> Self {
        self.series_index = series_index;
        self
    }

    /// First point of the first series marks a fresh draw pass.
    pub fn starts_draw_pass(&self) -> bool {
        self.index == 0 && self.series_index == 0
    }
}

/// A rendered point as seen by the hit test.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    /// Caller payload with the resolved `value` merged in.
    pub meta: Value,
    pub position: PixelPos,
    pub mark: MarkId,
    /// True while the cursor is within padding of this point.
    pub current: bool,
}

impl DataPoint {
    pub fn from_draw(evt: &DrawEvent<'_>) -> Self {
        let x = evt
            .axis_x_ticks
            .get(evt.index)
            .map(|t| Value::String(t.clone()))
            .or_else(|| evt.value.x.map(|x| json!(x)))
            .unwrap_or(Value::Null);
        let value = json!({ "x": x, "y": evt.value.y });
        Self {
            meta: merge_value(deserialize_meta(evt.meta.clone()), value),
            position: PixelPos::rounded(evt.x, evt.y),
            mark: evt.mark,
            current: false,
        }
    }
}

/// Payloads travel through chart attributes as JSON strings; unpack those.
fn deserialize_meta(meta: Value) -> Value {
    match meta {
        Value::String(s) => serde_json::from_str(&s).unwrap_or(Value::String(s)),
        other => other,
    }
}

fn merge_value(meta: Value, value: Value) -> Value {
    match meta {
        Value::Object(mut map) => {
            map.insert("value".to_string(), value);
            Value::Object(map)
        }
        Value::Null => {
            let mut map = Map::new();
            map.insert("value".to_string(), value);
            Value::Object(map)
        }
        other => json!({ "meta": other, "value": value }),
    }
}

/// Ordered list of rendered points for one chart.
#[derive(Clone, Debug, Default)]
pub struct PointRegistry {
    points: Vec<DataPoint>,
}

impl PointRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Format and append one rendered point.
    pub fn append(&mut self, evt: &DrawEvent<'_>) -> &DataPoint {
        self.points.push(DataPoint::from_draw(evt));
        let idx = self.points.len() - 1;
        &self.points[idx]
    }

    /// Feed a host draw event: ignores non-point marks and resets on a fresh pass.
    /// Returns true when a point was recorded.
    pub fn record(&mut self, evt: &DrawEvent<'_>) -> bool {
        if evt.kind != DrawKind::Point {
            return false;
        }
        if evt.starts_draw_pass() && !self.points.is_empty() {
            debug!(stale = self.points.len(), "draw pass started; clearing point registry");
            self.reset();
        }
        self.append(evt);
        true
    }

    pub fn points(&self) -> &[DataPoint] { &self.points }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn get(&self, i: usize) -> Option<&DataPoint> { self.points.get(i) }

    /// Points currently under the cursor, in insertion order.
    pub fn currently_hovered(&self) -> Vec<&DataPoint> {
        self.points.iter().filter(|p| p.current).collect()
    }

    pub fn current_meta(&self) -> Vec<Value> {
        self.points.iter().filter(|p| p.current).map(|p| p.meta.clone()).collect()
    }

    pub fn has_current(&self) -> bool {
        self.points.iter().any(|p| p.current)
    }

    /// Force a point's `current` flag. Returns the mark when the index exists.
    pub fn set_current(&mut self, i: usize, current: bool) -> Option<MarkId> {
        let p = self.points.get_mut(i)?;
        p.current = current;
        Some(p.mark)
    }

    /// Re-run the hit test over every point, reporting each verdict to `highlight`.
    /// Returns true if any `current` flag changed.
    pub fn apply_hits(
        &mut self,
        cursor: CursorPos,
        padding: f64,
        mode: AxisMode,
        mut highlight: impl FnMut(MarkId, bool),
    ) -> bool {
        let mut changed = false;
        for p in &mut self.points {
            let on_point = matches(cursor, p.position, padding, mode);
            highlight(p.mark, on_point);
            changed |= p.current != on_point;
            p.current = on_point;
        }
        changed
    }
}
