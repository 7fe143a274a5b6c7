//! Events and listener handles.
//!
//! Listeners are plain closures wrapped in an [`EventHandler`]. A handler's
//! identity is its allocation: registering the same handler twice for the
//! same node and event type is a no-op, and removal takes the same handle
//! that was registered. Components therefore create their handlers once and
//! keep them for the lifetime of the component.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use slotmap::new_key_type;

use crate::node::NodeId;

new_key_type! {
    /// Identifies a single registered listener.
    pub struct ListenerId;
}

/// A shared event callback.
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Wrap a closure as an [`EventHandler`].
pub fn handler<F>(f: F) -> EventHandler
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Well-known native event type names.
pub mod names {
    /// Sent to an element when it gains focus. Does not bubble.
    pub const FOCUS: &str = "focus";
    /// Sent to an element when it loses focus. Does not bubble.
    pub const BLUR: &str = "blur";
}

/// An event travelling through the element tree.
#[derive(Clone, PartialEq)]
pub struct Event {
    event_type: String,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    bubbles: bool,
    detail: Option<Value>,
}

impl Event {
    /// Create a non-bubbling event without payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
            current_target: None,
            bubbles: false,
            detail: None,
        }
    }

    /// Create a bubbling custom event carrying `detail`.
    pub fn custom(event_type: impl Into<String>, detail: Option<Value>) -> Self {
        Self::new(event_type).with_bubbles(true).with_detail(detail)
    }

    /// Set whether the event bubbles to ancestors.
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Set the payload.
    pub fn with_detail(mut self, detail: Option<Value>) -> Self {
        self.detail = detail;
        self
    }

    /// The event type name.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The node the event was dispatched on.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    /// Whether the event bubbles.
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// The payload, if any.
    pub fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }

    pub(crate) fn set_target(&mut self, target: NodeId) {
        self.target = Some(target);
    }

    pub(crate) fn set_current_target(&mut self, current: NodeId) {
        self.current_target = Some(current);
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("type", &self.event_type)
            .field("target", &self.target)
            .field("bubbles", &self.bubbles)
            .field("detail", &self.detail)
            .finish()
    }
}

/// Internal storage for a single listener.
pub(crate) struct Listener {
    pub(crate) node: NodeId,
    pub(crate) event_type: String,
    pub(crate) handler: EventHandler,
}

impl Listener {
    pub(crate) fn is(&self, node: NodeId, event_type: &str, handler: &EventHandler) -> bool {
        self.node == node && self.event_type == event_type && Arc::ptr_eq(&self.handler, handler)
    }
}
