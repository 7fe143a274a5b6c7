//! Node identifiers and per-node storage.

use slotmap::new_key_type;

use crate::event::ListenerId;
use crate::geometry::Rect;

new_key_type! {
    /// A unique identifier for an element in a [`DocumentTree`](crate::DocumentTree).
    ///
    /// `NodeId`s are stable handles that remain valid while the node is moved
    /// around the tree. They become invalid when the node is destroyed.
    pub struct NodeId;
}

/// Tags whose elements take part in sequential keyboard navigation by default.
const FOCUSABLE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

/// Internal data stored in the tree for each element.
#[derive(Debug)]
pub(crate) struct NodeData {
    /// Lower-cased tag name.
    pub(crate) tag: String,
    /// Class list with set semantics, in insertion order.
    pub(crate) classes: Vec<String>,
    /// Attributes in insertion order. `class` is kept in `classes` instead.
    pub(crate) attributes: Vec<(String, String)>,
    /// Native value of form controls.
    pub(crate) value: String,
    /// Native disabled flag of form controls.
    pub(crate) disabled: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Layout box reported by the host.
    pub(crate) rect: Rect,
    /// Listener registrations in the order they were added.
    pub(crate) listeners: Vec<ListenerId>,
}

impl NodeData {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: Vec::new(),
            value: String::new(),
            disabled: false,
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
            listeners: Vec::new(),
        }
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Whether the element can receive focus.
    pub(crate) fn is_focusable(&self) -> bool {
        if self.disabled {
            return false;
        }
        FOCUSABLE_TAGS.contains(&self.tag.as_str()) || self.attribute("tabindex").is_some()
    }

    /// The effective tab index: the parsed `tabindex` attribute, or the
    /// default for the element kind.
    pub(crate) fn tab_index(&self) -> i32 {
        self.attribute("tabindex")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(if FOCUSABLE_TAGS.contains(&self.tag.as_str()) {
                0
            } else {
                -1
            })
    }
}
