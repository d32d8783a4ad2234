// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain events and listener bookkeeping.

use core::fmt;

use arbor_tree::NodeId;
use hashbrown::HashMap;
use kurbo::{Point, Vec2};

/// Kinds of event the manager emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary click on a node.
    NodeClick,
    /// Double click on a node.
    NodeDoubleClick,
    /// Context menu requested over a node.
    NodeContextMenu,
    /// Pointer entered a node.
    NodeHoverEnter,
    /// Pointer left a node.
    NodeHoverLeave,
    /// Primary button pressed on a draggable node.
    NodeDragStart,
    /// Dragged node moved.
    NodeDrag,
    /// Node drag released.
    NodeDragEnd,
    /// Collapse indicator of an expanded node pressed.
    NodeCollapse,
    /// Collapse indicator of a collapsed node pressed.
    NodeExpand,
    /// Primary click on empty canvas.
    CanvasClick,
    /// Context menu requested over empty canvas.
    CanvasContextMenu,
    /// View panned.
    CanvasPan,
    /// View zoomed.
    CanvasZoom,
    /// Set of selected nodes changed.
    SelectionChange,
    /// Keyboard chord recognized.
    Shortcut,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::NodeClick,
        Self::NodeDoubleClick,
        Self::NodeContextMenu,
        Self::NodeHoverEnter,
        Self::NodeHoverLeave,
        Self::NodeDragStart,
        Self::NodeDrag,
        Self::NodeDragEnd,
        Self::NodeCollapse,
        Self::NodeExpand,
        Self::CanvasClick,
        Self::CanvasContextMenu,
        Self::CanvasPan,
        Self::CanvasZoom,
        Self::SelectionChange,
        Self::Shortcut,
    ];

    /// Conventional `scope:name` string for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NodeClick => "node:click",
            Self::NodeDoubleClick => "node:dblclick",
            Self::NodeContextMenu => "node:contextmenu",
            Self::NodeHoverEnter => "node:mouseenter",
            Self::NodeHoverLeave => "node:mouseleave",
            Self::NodeDragStart => "node:dragstart",
            Self::NodeDrag => "node:drag",
            Self::NodeDragEnd => "node:dragend",
            Self::NodeCollapse => "node:collapse",
            Self::NodeExpand => "node:expand",
            Self::CanvasClick => "canvas:click",
            Self::CanvasContextMenu => "canvas:contextmenu",
            Self::CanvasPan => "canvas:pan",
            Self::CanvasZoom => "canvas:zoom",
            Self::SelectionChange => "selection:change",
            Self::Shortcut => "shortcut",
        }
    }

    /// Parse a `scope:name` string.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action requested by a keyboard chord.
///
/// The manager only recognizes chords; carrying out the action is up to the
/// owner of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Remove every selected node.
    DeleteSelection,
    /// Revert the last edit.
    Undo,
    /// Reapply the last reverted edit.
    Redo,
    /// Select every visible node.
    SelectAll,
}

/// Kind-specific data attached to an [`Event`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Payload {
    /// Nothing beyond the kind and target.
    #[default]
    None,
    /// Pointer movement in screen pixels since the previous event.
    Delta(Vec2),
    /// New zoom factor and the screen point it was anchored on.
    Zoom {
        /// Scale after the change.
        scale: f64,
        /// Screen point kept fixed.
        anchor: Point,
    },
    /// Selected ids after the change, in selection order.
    Selection(Vec<NodeId>),
    /// Recognized shortcut.
    Intent(Intent),
}

/// A domain event.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Node the event concerns, if any.
    pub node: Option<NodeId>,
    /// Pointer position in world coordinates, for pointer-driven events.
    pub position: Option<Point>,
    /// Kind-specific data.
    pub payload: Payload,
}

impl Event {
    pub(crate) fn new(kind: EventKind) -> Self {
        Self {
            kind,
            node: None,
            position: None,
            payload: Payload::None,
        }
    }

    pub(crate) fn on(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub(crate) fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub(crate) fn with(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }
}

/// Handle returned by [`Listeners::on`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(&Event)>;

/// Per-kind listener registry.
#[derive(Default)]
pub struct Listeners {
    next: u64,
    by_kind: HashMap<EventKind, Vec<(ListenerId, Handler)>>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<_> = self
            .by_kind
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        f.debug_struct("Listeners")
            .field("next", &self.next)
            .field("by_kind", &counts)
            .finish()
    }
}

impl Listeners {
    /// Call `handler` for every future event of `kind`.
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&Event) + 'static) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.by_kind
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove a listener. Returns `false` when it was not registered for `kind`.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let Some(handlers) = self.by_kind.get_mut(&kind) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(h, _)| *h != id);
        before != handlers.len()
    }

    /// Number of listeners registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.by_kind.clear();
    }

    /// Deliver `event` to the listeners of its kind, in subscription order.
    pub fn emit(&mut self, event: &Event) {
        tracing::trace!(kind = %event.kind, node = ?event.node, "emit");
        if let Some(handlers) = self.by_kind.get_mut(&event.kind) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}
