// File: crates/crosshair-core/src/notify.rs
// Summary: Notification bridge: named events to the host bus plus optional caller hooks.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cursor::CursorView;

/// Event published on the host chart's bus.
#[derive(Clone, Debug, PartialEq)]
pub enum CrosshairEvent {
    /// Metadata of the currently hovered points, possibly empty.
    Hovered(Vec<Value>),
    Frozen(bool),
    /// Metadata of the points under the cursor at click time.
    Click(Vec<Value>),
}

impl CrosshairEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            CrosshairEvent::Hovered(_) => "crosshairCursor:hovered",
            CrosshairEvent::Frozen(_) => "crosshairCursor:frozen",
            CrosshairEvent::Click(_) => "crosshairCursor:click",
        }
    }
}

/// Host event bus.
pub trait EventSink {
    fn emit(&mut self, event: CrosshairEvent);
}

impl EventSink for Vec<CrosshairEvent> {
    fn emit(&mut self, event: CrosshairEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<CrosshairEvent> {
    fn emit(&mut self, event: CrosshairEvent) {
        if self.send(event).is_err() {
            warn!("crosshair event receiver dropped");
        }
    }
}

// Lets the host keep a handle on a sink the overlay also writes to.
impl<S: EventSink> EventSink for Rc<RefCell<S>> {
    fn emit(&mut self, event: CrosshairEvent) {
        self.borrow_mut().emit(event);
    }
}

/// Gets a read-only view of the cursor; hooks must not reach for the cursor itself.
pub type MetaCallback = Box<dyn FnMut(&CursorView<'_>, &[Value])>;
pub type FrozenCallback = Box<dyn FnMut(bool)>;

/// Caller-supplied callbacks, invoked before the bus sees the event.
#[derive(Default)]
pub struct Hooks {
    pub hover: Option<MetaCallback>,
    pub click: Option<MetaCallback>,
    pub freeze_change: Option<FrozenCallback>,
}

impl Hooks {
    pub fn new() -> Self { Self::default() }

    pub fn on_hover(mut self, f: impl FnMut(&CursorView<'_>, &[Value]) + 'static) -> Self {
        self.hover = Some(Box::new(f));
        self
    }

    pub fn on_click(mut self, f: impl FnMut(&CursorView<'_>, &[Value]) + 'static) -> Self {
        self.click = Some(Box::new(f));
        self
    }

    pub fn on_freeze_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.freeze_change = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("hover", &self.hover.is_some())
            .field("click", &self.click.is_some())
            .field("freeze_change", &self.freeze_change.is_some())
            .finish()
    }
}

/// Fans each notification out to the hooks and the bus.
pub struct Notifier {
    hooks: Hooks,
    sink: Option<Box<dyn EventSink>>,
}

impl Notifier {
    pub fn new(hooks: Hooks) -> Self { Self { hooks, sink: None } }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn hovered(&mut self, view: &CursorView<'_>, meta: Vec<Value>) {
        debug!(points = meta.len(), "crosshair hovered");
        if let Some(f) = self.hooks.hover.as_mut() {
            f(view, &meta);
        }
        self.publish(CrosshairEvent::Hovered(meta));
    }

    pub fn frozen(&mut self, frozen: bool) {
        debug!(frozen, "crosshair frozen state");
        if let Some(f) = self.hooks.freeze_change.as_mut() {
            f(frozen);
        }
        self.publish(CrosshairEvent::Frozen(frozen));
    }

    pub fn click(&mut self, view: &CursorView<'_>, meta: Vec<Value>) {
        debug!(points = meta.len(), "crosshair click");
        if let Some(f) = self.hooks.click.as_mut() {
            f(view, &meta);
        }
        self.publish(CrosshairEvent::Click(meta));
    }

    fn publish(&mut self, event: CrosshairEvent) {
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(event);
        }
    }
}

impl Default for Notifier {
    fn default() -> Self { Self::new(Hooks::default()) }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("hooks", &self.hooks)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
