// File: crates/crosshair-core/src/plugin.rs
// Summary: Plugin trait and host event types wiring the crosshair into a chart's event loop.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::cursor::CrosshairCursor;
use crate::error::Result;
use crate::geometry::padding_from_stroke;
use crate::registry::DrawEvent;
use crate::renderer::Renderer;

/// Lifecycle events emitted by the host chart, in render order.
#[derive(Clone, Debug)]
pub enum ChartEvent<'a> {
    /// One rendered mark. All draws of a pass precede its `Created`.
    Draw(DrawEvent<'a>),
    /// Render pass finished. Carries the stroke width of a representative point, if any.
    Created { point_stroke_width: Option<f64> },
}

/// Pointer input on the wrapper, page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Move { page_x: f64, page_y: f64 },
    Click,
}

/// Whether the host should keep bubbling the pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Chart plugin; hosts forward chart and pointer events to it.
pub trait ChartPlugin {
    fn id(&self) -> &'static str;
    fn on_chart_event(&mut self, evt: &ChartEvent<'_>) -> Result<()>;
    /// Pointer input on the plugin's element. Default ignores it.
    fn on_pointer_event(&mut self, _evt: &PointerEvent) -> Propagation { Propagation::Continue }
}

impl<R: Renderer> ChartPlugin for CrosshairCursor<R> {
    fn id(&self) -> &'static str { "crosshair_cursor" }

    fn on_chart_event(&mut self, evt: &ChartEvent<'_>) -> Result<()> {
        match evt {
            ChartEvent::Draw(draw) => {
                self.record_draw(draw);
                Ok(())
            }
            ChartEvent::Created { point_stroke_width } => {
                let padding = padding_from_stroke(*point_stroke_width);
                if self.created {
                    self.set_padding(padding);
                    self.reset();
                    return self.select_initial();
                }
                self.create(padding)?;
                self.created = true;
                self.select_initial()
            }
        }
    }

    fn on_pointer_event(&mut self, evt: &PointerEvent) -> Propagation {
        if !self.is_created() {
            warn!(?evt, "pointer event on detached crosshair ignored");
            return Propagation::Continue;
        }
        match *evt {
            PointerEvent::Enter => self.on_enter(),
            PointerEvent::Leave => self.on_leave(),
            PointerEvent::Move { page_x, page_y } => self.on_move(page_x, page_y),
            PointerEvent::Click => {
                self.on_click();
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }
}

// Allow the host and the application to share one plugin instance.
impl<P: ChartPlugin> ChartPlugin for Rc<RefCell<P>> {
    fn id(&self) -> &'static str { self.borrow().id() }
    fn on_chart_event(&mut self, evt: &ChartEvent<'_>) -> Result<()> { self.borrow_mut().on_chart_event(evt) }
    fn on_pointer_event(&mut self, evt: &PointerEvent) -> Propagation { self.borrow_mut().on_pointer_event(evt) }
}
