// File: crates/crosshair-core/src/cursor.rs
// Summary: Overlay controller: indicator lines, frozen state machine, pointer handling.

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::{CrosshairOptions, SendDataOn, WrapperSelector};
use crate::error::{CrosshairError, Result};
use crate::geometry::CursorPos;
use crate::notify::Notifier;
use crate::registry::{DataPoint, DrawEvent, DrawKind, PointRegistry};
use crate::renderer::{LineAxis, NodeId, Renderer};

/// Nodes owned by a created overlay. Present exactly while listeners are attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OverlayNodes {
    wrapper: NodeId,
    x: NodeId,
    y: NodeId,
}

/// What hooks may inspect while a handler is running.
#[derive(Clone, Copy, Debug)]
pub struct CursorView<'a> {
    frozen: bool,
    registry: &'a PointRegistry,
}

impl<'a> CursorView<'a> {
    pub fn new(frozen: bool, registry: &'a PointRegistry) -> Self { Self { frozen, registry } }
    pub fn is_frozen(&self) -> bool { self.frozen }
    pub fn current_points(&self) -> Vec<&'a DataPoint> { self.registry.currently_hovered() }
}

/// Crosshair cursor for one chart instance.
///
/// Owns its point registry and frozen flag; nothing is shared between charts.
#[derive(Debug)]
pub struct CrosshairCursor<R: Renderer> {
    options: CrosshairOptions,
    selector: WrapperSelector,
    renderer: R,
    notifier: Notifier,
    registry: PointRegistry,
    frozen: bool,
    padding: f64,
    overlay: Option<OverlayNodes>,
    /// Registry was rebuilt since the last move; the next move must report its hit set.
    stale: bool,
    /// Set by the first chart `created` event; later ones reset instead of create.
    pub(crate) created: bool,
}

impl<R: Renderer> CrosshairCursor<R> {
    /// Attach to a chart. Fails before touching the renderer if the selector is invalid.
    pub fn new(options: CrosshairOptions, renderer: R, notifier: Notifier) -> Result<Self> {
        let selector = options.selector()?;
        debug!(%selector, mode = ?options.axis_mode, "crosshair attached");
        Ok(Self {
            options,
            selector,
            renderer,
            notifier,
            registry: PointRegistry::new(),
            frozen: false,
            padding: 0.0,
            overlay: None,
            stale: false,
            created: false,
        })
    }

    /// Wrap the chart container, build both indicator lines (hidden) and start listening.
    pub fn create(&mut self, padding: f64) -> Result<()> {
        if self.overlay.is_some() {
            return Err(CrosshairError::AlreadyCreated);
        }
        self.padding = padding;
        let wrapper = self.renderer.wrap_container(&self.selector);
        let x = self.renderer.create_overlay_node(wrapper, LineAxis::X, &self.options.styles.x);
        let y = self.renderer.create_overlay_node(wrapper, LineAxis::Y, &self.options.styles.y);
        self.overlay = Some(OverlayNodes { wrapper, x, y });
        self.frozen = false;
        self.hide();
        if self.registry.is_empty() {
            warn!("crosshair created with no rendered points; hit test will never match");
        }
        debug!(padding, points = self.registry.len(), "crosshair created");
        Ok(())
    }

    /// Detach listeners, remove the indicator lines and unwrap the container.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        let Some(nodes) = self.overlay.take() else {
            debug!("crosshair destroy on detached overlay; nothing to do");
            return;
        };
        self.renderer.remove_node(nodes.x);
        self.renderer.remove_node(nodes.y);
        self.renderer.unwrap_container(nodes.wrapper);
        for i in 0..self.registry.len() {
            if let Some(mark) = self.registry.set_current(i, false) {
                self.renderer.toggle_highlight(mark, false);
            }
        }
        debug!("crosshair destroyed");
    }

    /// Reveal the line(s) selected by the axis mode.
    pub fn show(&mut self) {
        let Some(nodes) = self.overlay else { return };
        let mode = self.options.axis_mode;
        if mode.shows_x() {
            self.renderer.set_visible(nodes.x, true);
        }
        if mode.shows_y() {
            self.renderer.set_visible(nodes.y, true);
        }
    }

    /// Hide both lines unless frozen.
    pub fn hide(&mut self) {
        if self.frozen {
            return;
        }
        let Some(nodes) = self.overlay else { return };
        self.renderer.set_visible(nodes.x, false);
        self.renderer.set_visible(nodes.y, false);
    }

    /// Unfreeze silently and hide the lines; used when the chart is recreated.
    pub fn reset(&mut self) {
        self.frozen = false;
        self.hide();
        debug!("crosshair reset");
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
        self.notifier.frozen(true);
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
        self.notifier.frozen(false);
    }

    pub fn is_frozen(&self) -> bool { self.frozen }

    pub fn current_points(&self) -> Vec<&DataPoint> { self.registry.currently_hovered() }

    /// Wrapper node, while created.
    pub fn element(&self) -> Option<NodeId> { self.overlay.map(|n| n.wrapper) }

    pub fn is_created(&self) -> bool { self.overlay.is_some() }
    pub fn padding(&self) -> f64 { self.padding }

    /// Padding is recomputed whenever the chart is (re)created.
    pub fn set_padding(&mut self, padding: f64) { self.padding = padding; }

    pub fn options(&self) -> &CrosshairOptions { &self.options }
    pub fn registry(&self) -> &PointRegistry { &self.registry }
    pub fn renderer(&self) -> &R { &self.renderer }
    pub fn renderer_mut(&mut self) -> &mut R { &mut self.renderer }

    /// Feed one host draw event into the registry.
    /// A fresh draw pass drops old highlights and forces the next move to report.
    pub fn record_draw(&mut self, evt: &DrawEvent<'_>) -> bool {
        if evt.kind == DrawKind::Point && evt.starts_draw_pass() {
            self.renderer.begin_draw_pass();
            self.stale = true;
        }
        self.registry.record(evt)
    }

    /// Pre-select the configured `initial` point (1-based), highlight it and report it.
    pub fn select_initial(&mut self) -> Result<()> {
        let Some(initial) = self.options.initial.filter(|&i| i > 0) else { return Ok(()) };
        let len = self.registry.len();
        let Some(mark) = self.registry.set_current(initial - 1, true) else {
            warn!(initial, len, "initial point out of range");
            return Err(CrosshairError::InitialPointOutOfRange { initial, len });
        };
        self.renderer.toggle_highlight(mark, true);
        let meta = self.registry.current_meta();
        self.notifier.hovered(&CursorView::new(self.frozen, &self.registry), meta);
        Ok(())
    }

    pub(crate) fn on_enter(&mut self) {
        self.show();
    }

    pub(crate) fn on_leave(&mut self) {
        self.hide();
    }

    /// Track the cursor; ignored while frozen.
    pub(crate) fn on_move(&mut self, page_x: f64, page_y: f64) {
        if self.frozen {
            return;
        }
        let Some(nodes) = self.overlay else { return };
        let origin = self.renderer.node_offset(nodes.wrapper);
        let cursor = CursorPos::new(page_x - origin.x, page_y - origin.y);
        self.renderer.set_position(nodes.x, cursor.x);
        self.renderer.set_position(nodes.y, cursor.y);

        let renderer = &mut self.renderer;
        let changed = self.registry.apply_hits(cursor, self.padding, self.options.axis_mode, |mark, on| {
            renderer.toggle_highlight(mark, on)
        });
        let changed = changed || std::mem::take(&mut self.stale);
        trace!(x = cursor.x, y = cursor.y, changed, "crosshair move");
        if !changed {
            return;
        }
        let view = CursorView::new(self.frozen, &self.registry);
        if self.registry.has_current() {
            if self.options.send_data_on == SendDataOn::Hover {
                self.notifier.hovered(&view, self.registry.current_meta());
            }
        } else {
            self.notifier.hovered(&view, Vec::new());
        }
    }

    /// Click handling. `send_data_on` and `click_to_freeze` combine as:
    ///
    /// | frozen | hovered | effect before freeze toggle                     |
    /// |--------|---------|-------------------------------------------------|
    /// | no     | some    | `click(meta)`; plus `hovered(meta)` if on click  |
    /// | no     | none    | nothing                                         |
    /// | yes    | any     | nothing                                         |
    ///
    /// Then, if `click_to_freeze`, frozen flips and `frozen(new)` is sent.
    pub(crate) fn on_click(&mut self) {
        let meta: Vec<Value> = self.registry.current_meta();
        if !self.frozen && !meta.is_empty() {
            let view = CursorView::new(self.frozen, &self.registry);
            if self.options.send_data_on == SendDataOn::Click {
                self.notifier.hovered(&view, meta.clone());
            }
            self.notifier.click(&view, meta);
        }
        if self.options.click_to_freeze {
            self.frozen = !self.frozen;
            self.notifier.frozen(self.frozen);
        }
    }
}
