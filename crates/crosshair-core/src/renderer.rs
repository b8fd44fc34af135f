// File: crates/crosshair-core/src/renderer.rs
// Summary: Renderer capability used by the overlay, plus an in-memory headless implementation.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::config::{LineStyle, WrapperSelector};
use crate::geometry::CursorPos;

/// Class added to the wrapper node next to the configured selector.
pub const WRAPPER_CLASS: &str = "crosshairCursor-wrapper";
/// Class toggled on highlighted point marks.
pub const HIGHLIGHT_CLASS: &str = "crosshairCursor-highlight";

/// Handle to a node created by the renderer (wrapper or indicator line).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Handle to a rendered point mark, assigned by the host chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

/// Indicator line orientation. The x line moves horizontally, the y line vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineAxis {
    X,
    Y,
}

impl LineAxis {
    pub const fn node_name(self) -> &'static str {
        match self {
            LineAxis::X => "crosshairCursor-x",
            LineAxis::Y => "crosshairCursor-y",
        }
    }
}

/// Minimal surface the overlay needs from whatever draws it.
pub trait Renderer {
    /// Insert a wrapper as the chart container's new parent.
    fn wrap_container(&mut self, selector: &WrapperSelector) -> NodeId;
    /// Replace the wrapper with its original child content, in place.
    fn unwrap_container(&mut self, wrapper: NodeId);
    /// Absolutely positioned indicator line, child of `parent`.
    fn create_overlay_node(&mut self, parent: NodeId, axis: LineAxis, style: &LineStyle) -> NodeId;
    fn remove_node(&mut self, node: NodeId);
    /// Offset along the line's own axis, in wrapper pixels.
    fn set_position(&mut self, node: NodeId, offset: f64);
    fn set_visible(&mut self, node: NodeId, visible: bool);
    fn toggle_highlight(&mut self, mark: MarkId, on: bool);
    /// Page coordinates of the node's top-left corner.
    fn node_offset(&self, node: NodeId) -> CursorPos;
    /// The host started redrawing its marks; handles from the previous pass are gone.
    fn begin_draw_pass(&mut self) {}
}

// Hosts that keep ownership of their renderer lend it to the overlay.
impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn wrap_container(&mut self, selector: &WrapperSelector) -> NodeId { (**self).wrap_container(selector) }
    fn unwrap_container(&mut self, wrapper: NodeId) { (**self).unwrap_container(wrapper) }
    fn create_overlay_node(&mut self, parent: NodeId, axis: LineAxis, style: &LineStyle) -> NodeId {
        (**self).create_overlay_node(parent, axis, style)
    }
    fn remove_node(&mut self, node: NodeId) { (**self).remove_node(node) }
    fn set_position(&mut self, node: NodeId, offset: f64) { (**self).set_position(node, offset) }
    fn set_visible(&mut self, node: NodeId, visible: bool) { (**self).set_visible(node, visible) }
    fn toggle_highlight(&mut self, mark: MarkId, on: bool) { (**self).toggle_highlight(mark, on) }
    fn node_offset(&self, node: NodeId) -> CursorPos { (**self).node_offset(node) }
    fn begin_draw_pass(&mut self) { (**self).begin_draw_pass() }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HeadlessNodeKind {
    Wrapper { selector: WrapperSelector, classes: Vec<String> },
    Line { axis: LineAxis, style: LineStyle, parent: NodeId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessNode {
    pub kind: HeadlessNodeKind,
    pub visible: bool,
    pub offset: Option<f64>,
}

/// Renderer that only records state. Used by tests and tooling that drive
/// the overlay without a drawing backend.
#[derive(Clone, Debug, Default)]
pub struct HeadlessRenderer {
    next_id: u32,
    nodes: BTreeMap<NodeId, HeadlessNode>,
    highlighted: BTreeSet<MarkId>,
    page_offset: CursorPos,
}

impl HeadlessRenderer {
    pub fn new() -> Self { Self::default() }

    /// Wrapper page offset applied to pointer coordinates.
    pub fn with_page_offset(mut self, x: f64, y: f64) -> Self {
        self.page_offset = CursorPos::new(x, y);
        self
    }

    pub fn node(&self, id: NodeId) -> Option<&HeadlessNode> { self.nodes.get(&id) }
    pub fn node_count(&self) -> usize { self.nodes.len() }

    pub fn line(&self, axis: LineAxis) -> Option<&HeadlessNode> {
        self.nodes
            .values()
            .find(|n| matches!(n.kind, HeadlessNodeKind::Line { axis: a, .. } if a == axis))
    }

    pub fn wrapper(&self) -> Option<&HeadlessNode> {
        self.nodes.values().find(|n| matches!(n.kind, HeadlessNodeKind::Wrapper { .. }))
    }

    pub fn is_highlighted(&self, mark: MarkId) -> bool { self.highlighted.contains(&mark) }
    pub fn highlighted(&self) -> impl Iterator<Item = MarkId> + '_ { self.highlighted.iter().copied() }

    fn alloc(&mut self, node: HeadlessNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }
}

impl Renderer for HeadlessRenderer {
    fn wrap_container(&mut self, selector: &WrapperSelector) -> NodeId {
        let mut classes = Vec::new();
        if let WrapperSelector::Class(c) = selector {
            classes.push(c.clone());
        }
        classes.push(WRAPPER_CLASS.to_string());
        self.alloc(HeadlessNode {
            kind: HeadlessNodeKind::Wrapper { selector: selector.clone(), classes },
            visible: true,
            offset: None,
        })
    }

    fn unwrap_container(&mut self, wrapper: NodeId) {
        if self.nodes.remove(&wrapper).is_none() {
            warn!(?wrapper, "unwrap of unknown wrapper node");
        }
        self.nodes.retain(|_, n| !matches!(n.kind, HeadlessNodeKind::Line { parent, .. } if parent == wrapper));
    }

    fn create_overlay_node(&mut self, parent: NodeId, axis: LineAxis, style: &LineStyle) -> NodeId {
        self.alloc(HeadlessNode {
            kind: HeadlessNodeKind::Line { axis, style: *style, parent },
            visible: false,
            offset: None,
        })
    }

    fn remove_node(&mut self, node: NodeId) {
        self.nodes.remove(&node);
    }

    fn set_position(&mut self, node: NodeId, offset: f64) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.offset = Some(offset);
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.visible = visible;
        }
    }

    fn toggle_highlight(&mut self, mark: MarkId, on: bool) {
        if on {
            self.highlighted.insert(mark);
        } else {
            self.highlighted.remove(&mark);
        }
    }

    fn node_offset(&self, _node: NodeId) -> CursorPos { self.page_offset }

    // Redrawn marks come back without the highlight class.
    fn begin_draw_pass(&mut self) {
        self.highlighted.clear();
    }
}
