// File: crates/crosshair-core/src/lib.rs
// Summary: Crosshair cursor overlay for line charts; hit-testing, point registry, overlay state and notifications.

pub mod config;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod notify;
pub mod plugin;
pub mod registry;
pub mod renderer;

pub use config::{AxisMode, CrosshairOptions, CrosshairStyles, Extent, LineStyle, Rgba, SendDataOn, WrapperSelector};
pub use cursor::{CrosshairCursor, CursorView};
pub use error::{CrosshairError, Result};
pub use geometry::{is_within, matches, CursorPos, PixelPos};
pub use notify::{CrosshairEvent, EventSink, Hooks, Notifier};
pub use plugin::{ChartEvent, ChartPlugin, PointerEvent, Propagation};
pub use registry::{DataPoint, DrawEvent, DrawKind, PointRegistry, PointValue};
pub use renderer::{HeadlessRenderer, LineAxis, MarkId, NodeId, Renderer};
