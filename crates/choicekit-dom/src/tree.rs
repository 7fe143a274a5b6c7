//! The element tree.
//!
//! [`DocumentTree`] owns every element, its classes, attributes, native
//! form-control state and layout box, together with the listener table and
//! the focused element. It uses arena-based storage via SlotMap for stable
//! node IDs, the same way object registries are kept elsewhere in the
//! workspace. Most code goes through the thread-safe [`Document`] handle and
//! [`Element`] wrappers instead of using the tree directly.
//!
//! [`Document`]: crate::Document
//! [`Element`]: crate::Element

use slotmap::SlotMap;

use crate::event::{EventHandler, Listener, ListenerId};
use crate::geometry::Rect;
use crate::logging::targets;
use crate::mutation::{MutationLog, MutationRecord};
use crate::node::{NodeData, NodeId};
use crate::selector::{SelectorList, SelectorMatcher};
use crate::{Error, Result};

/// Arena of elements rooted at a `body` element.
pub struct DocumentTree {
    nodes: SlotMap<NodeId, NodeData>,
    listeners: SlotMap<ListenerId, Listener>,
    body: NodeId,
    focused: Option<NodeId>,
    log: MutationLog,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// Create a tree containing only the `body` element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData::new("body"));
        Self {
            nodes,
            listeners: SlotMap::with_key(),
            body,
            focused: None,
            log: MutationLog::default(),
        }
    }

    /// The root element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id).ok_or(Error::InvalidNode)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(Error::InvalidNode)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.nodes.insert(NodeData::new(tag));
        tracing::trace!(target: targets::TREE, ?id, tag, "created element");
        id
    }

    /// Check if a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live elements, including `body`.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds nothing but `body`.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Destroy a node and its whole subtree, dropping their listeners.
    ///
    /// The body cannot be destroyed.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        if id == self.body {
            return Err(Error::InvalidNode);
        }
        self.detach(id)?;

        let mut doomed = self.descendants(id)?;
        doomed.push(id);
        for node in doomed {
            if let Some(data) = self.nodes.remove(node) {
                for listener in data.listeners {
                    self.listeners.remove(listener);
                }
            }
            if self.focused == Some(node) {
                self.focused = None;
            }
        }
        tracing::trace!(target: targets::TREE, ?id, "destroyed subtree");
        Ok(())
    }

    /// Lower-cased tag name.
    pub fn tag(&self, id: NodeId) -> Result<&str> {
        Ok(&self.node(id)?.tag)
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children of a node, in order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// The sibling following a node.
    pub fn next_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
        let Some(parent) = self.parent(id)? else {
            return Ok(None);
        };
        let siblings = self.children(parent)?;
        let index = siblings
            .iter()
            .position(|&c| c == id)
            .ok_or(Error::NotAChild)?;
        Ok(siblings.get(index + 1).copied())
    }

    /// Check if `ancestor` is `id` itself or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> Result<bool> {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == ancestor {
                return Ok(true);
            }
            current = self.node(current_id)?.parent;
        }
        Ok(false)
    }

    /// Insert `child` into `parent` before `reference`, or at the end when
    /// `reference` is `None`. The child is first removed from its old parent.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        self.node(child)?;
        self.node(parent)?;
        if self.is_inclusive_ancestor(child, parent)? {
            return Err(Error::CircularParentage);
        }
        if let Some(reference) = reference
            && self.parent(reference)? != Some(parent)
        {
            return Err(Error::NotAChild);
        }
        // Inserting a node before itself leaves it in place.
        if reference == Some(child) {
            return Ok(());
        }

        self.detach(child)?;

        let siblings = &mut self.node_mut(parent)?.children;
        let index = reference
            .and_then(|r| siblings.iter().position(|&c| c == r))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);

        self.log.push(MutationRecord::ChildInserted { parent, child });
        Ok(())
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Remove `child` from `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.parent(child)? != Some(parent) {
            return Err(Error::NotAChild);
        }
        self.detach(child)
    }

    /// Remove a node from its parent, if it has one.
    fn detach(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        if let Some(parent_data) = self.nodes.get_mut(parent) {
            parent_data.children.retain(|&c| c != id);
        }
        self.node_mut(id)?.parent = None;
        self.log.push(MutationRecord::ChildRemoved { parent, child: id });
        Ok(())
    }

    /// All descendants of a node in document (pre-)order, excluding the node.
    fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id)?.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node)?.iter().rev().copied());
        }
        Ok(out)
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Whether the node carries a class.
    pub fn has_class(&self, id: NodeId, class: &str) -> Result<bool> {
        Ok(self.node(id)?.has_class(class))
    }

    /// The node's classes, in insertion order.
    pub fn classes(&self, id: NodeId) -> Result<&[String]> {
        Ok(&self.node(id)?.classes)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        let data = self.node_mut(id)?;
        if class.is_empty() || data.has_class(class) {
            return Ok(false);
        }
        data.classes.push(class.to_string());
        self.log.push(MutationRecord::ClassAdded {
            node: id,
            class: class.to_string(),
        });
        Ok(true)
    }

    /// Remove a class. Returns false if it was absent.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        let data = self.node_mut(id)?;
        let before = data.classes.len();
        data.classes.retain(|c| c != class);
        if data.classes.len() == before {
            return Ok(false);
        }
        self.log.push(MutationRecord::ClassRemoved {
            node: id,
            class: class.to_string(),
        });
        Ok(true)
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Read an attribute. `class` reflects the class list.
    pub fn attribute(&self, id: NodeId, name: &str) -> Result<Option<String>> {
        let data = self.node(id)?;
        let name = name.to_ascii_lowercase();
        if name == "class" {
            return Ok((!data.classes.is_empty()).then(|| data.classes.join(" ")));
        }
        Ok(data.attribute(&name).map(str::to_string))
    }

    /// Whether an attribute is present.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> Result<bool> {
        Ok(self.attribute(id, name)?.is_some())
    }

    /// Set an attribute. Writing `class` replaces the class list.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            let current: Vec<String> = self.classes(id)?.to_vec();
            for class in current {
                self.remove_class(id, &class)?;
            }
            for class in value.split_ascii_whitespace() {
                self.add_class(id, class)?;
            }
            return Ok(());
        }

        let data = self.node_mut(id)?;
        match data.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) if *existing == value => return Ok(()),
            Some((_, existing)) => *existing = value.to_string(),
            None => data.attributes.push((name.clone(), value.to_string())),
        }
        self.log.push(MutationRecord::AttributeSet {
            node: id,
            name,
            value: value.to_string(),
        });
        Ok(())
    }

    /// Remove an attribute. Returns false if it was absent.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool> {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            let current: Vec<String> = self.classes(id)?.to_vec();
            for class in &current {
                self.remove_class(id, class)?;
            }
            return Ok(!current.is_empty());
        }

        let data = self.node_mut(id)?;
        let before = data.attributes.len();
        data.attributes.retain(|(n, _)| *n != name);
        if data.attributes.len() == before {
            return Ok(false);
        }
        self.log.push(MutationRecord::AttributeRemoved { node: id, name });
        Ok(true)
    }

    /// All attributes other than `class`, in insertion order.
    pub fn attributes(&self, id: NodeId) -> Result<&[(String, String)]> {
        Ok(&self.node(id)?.attributes)
    }

    // =========================================================================
    // Native form-control state
    // =========================================================================

    /// Native value.
    pub fn value(&self, id: NodeId) -> Result<&str> {
        Ok(&self.node(id)?.value)
    }

    /// Write the native value. Always recorded, even when unchanged, since
    /// hosts re-render the control on every write.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<()> {
        let data = self.node_mut(id)?;
        data.value = value.to_string();
        self.log.push(MutationRecord::ValueSet {
            node: id,
            value: value.to_string(),
        });
        Ok(())
    }

    /// Native disabled flag.
    pub fn disabled(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.disabled)
    }

    /// Set the native disabled flag. A disabled element loses focus.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> Result<()> {
        let data = self.node_mut(id)?;
        if data.disabled == disabled {
            return Ok(());
        }
        data.disabled = disabled;
        self.log.push(MutationRecord::DisabledSet { node: id, disabled });
        if disabled && self.focused == Some(id) {
            self.focused = None;
        }
        Ok(())
    }

    /// Effective tab index.
    pub fn tab_index(&self, id: NodeId) -> Result<i32> {
        Ok(self.node(id)?.tab_index())
    }

    /// Whether the node can receive focus.
    pub fn is_focusable(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.is_focusable())
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The layout box last reported for a node.
    pub fn rect(&self, id: NodeId) -> Result<Rect> {
        Ok(self.node(id)?.rect)
    }

    /// Record the layout box of a node.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<()> {
        self.node_mut(id)?.rect = rect;
        Ok(())
    }

    // =========================================================================
    // Listeners and focus
    // =========================================================================

    /// Register a listener. Registering the same handler again for the same
    /// node and event type returns the existing registration.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        handler: &EventHandler,
    ) -> Result<ListenerId> {
        let data = self.node(node)?;
        if let Some(&existing) = data
            .listeners
            .iter()
            .find(|&&l| self.listeners[l].is(node, event_type, handler))
        {
            return Ok(existing);
        }

        let id = self.listeners.insert(Listener {
            node,
            event_type: event_type.to_string(),
            handler: handler.clone(),
        });
        self.node_mut(node)?.listeners.push(id);
        Ok(id)
    }

    /// Remove a listener by handler identity. Returns false if the handler
    /// was not registered.
    pub fn remove_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        handler: &EventHandler,
    ) -> Result<bool> {
        let data = self.node(node)?;
        let Some(&id) = data
            .listeners
            .iter()
            .find(|&&l| self.listeners[l].is(node, event_type, handler))
        else {
            return Ok(false);
        };
        self.listeners.remove(id);
        self.node_mut(node)?.listeners.retain(|&l| l != id);
        Ok(true)
    }

    /// Number of listeners registered on a node.
    pub fn listener_count(&self, node: NodeId) -> Result<usize> {
        Ok(self.node(node)?.listeners.len())
    }

    /// Handlers registered on `node` for `event_type`, in registration order.
    pub(crate) fn handlers(&self, node: NodeId, event_type: &str) -> Vec<EventHandler> {
        self.nodes
            .get(node)
            .map(|data| {
                data.listeners
                    .iter()
                    .filter_map(|&l| self.listeners.get(l))
                    .filter(|l| l.event_type == event_type)
                    .map(|l| l.handler.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The target followed by its ancestors when `bubbles` is set.
    pub(crate) fn propagation_path(&self, target: NodeId, bubbles: bool) -> Vec<NodeId> {
        let mut path = vec![target];
        if bubbles {
            let mut current = self.nodes.get(target).and_then(|d| d.parent);
            while let Some(node) = current {
                path.push(node);
                current = self.nodes.get(node).and_then(|d| d.parent);
            }
        }
        path
    }

    /// The element that currently has focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, node: Option<NodeId>) {
        self.focused = node;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First descendant of `root` (in document order) matching `selectors`.
    pub fn query_selector(&self, root: NodeId, selectors: &SelectorList) -> Result<Option<NodeId>> {
        Ok(self
            .descendants(root)?
            .into_iter()
            .find(|&node| SelectorMatcher::matches_list(self, node, selectors)))
    }

    // =========================================================================
    // Mutation records
    // =========================================================================

    /// Start or stop recording mutations.
    pub fn set_recording(&mut self, recording: bool) {
        self.log.set_recording(recording);
    }

    /// Whether mutations are being recorded.
    pub fn is_recording(&self) -> bool {
        self.log.is_recording()
    }

    /// Drain the recorded mutations.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        self.log.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::handler;

    #[test]
    fn insert_and_reorder_children() {
        let mut tree = DocumentTree::new();
        let body = tree.body();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        let c = tree.create_element("div");

        tree.append_child(body, a).unwrap();
        tree.append_child(body, c).unwrap();
        tree.insert_before(body, b, Some(c)).unwrap();
        assert_eq!(tree.children(body).unwrap(), &[a, b, c]);
        assert_eq!(tree.next_sibling(a).unwrap(), Some(b));
        assert_eq!(tree.next_sibling(c).unwrap(), None);

        // Moving an attached node removes it from its old position.
        tree.append_child(body, a).unwrap();
        assert_eq!(tree.children(body).unwrap(), &[b, c, a]);
    }

    #[test]
    fn circular_insertion_is_rejected() {
        let mut tree = DocumentTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(
            tree.append_child(inner, outer),
            Err(Error::CircularParentage)
        );
        assert_eq!(tree.append_child(inner, inner), Err(Error::CircularParentage));
    }

    #[test]
    fn destroy_removes_subtree_and_listeners() {
        let mut tree = DocumentTree::new();
        let body = tree.body();
        let outer = tree.create_element("div");
        let inner = tree.create_element("span");
        tree.append_child(body, outer).unwrap();
        tree.append_child(outer, inner).unwrap();
        tree.add_listener(inner, "click", &handler(|_| {})).unwrap();

        tree.destroy(outer).unwrap();
        assert!(!tree.contains(outer));
        assert!(!tree.contains(inner));
        assert!(tree.is_empty());
        assert!(tree.children(body).unwrap().is_empty());
        assert_eq!(tree.destroy(body), Err(Error::InvalidNode));
    }

    #[test]
    fn class_operations_are_idempotent() {
        let mut tree = DocumentTree::new();
        let div = tree.create_element("div");
        tree.set_recording(true);

        assert!(tree.add_class(div, "is-open").unwrap());
        assert!(!tree.add_class(div, "is-open").unwrap());
        assert_eq!(tree.classes(div).unwrap(), &["is-open".to_string()]);
        assert!(tree.remove_class(div, "is-open").unwrap());
        assert!(!tree.remove_class(div, "is-open").unwrap());

        assert_eq!(tree.take_records().len(), 2);
    }

    #[test]
    fn class_attribute_reflects_class_list() {
        let mut tree = DocumentTree::new();
        let div = tree.create_element("div");
        assert_eq!(tree.attribute(div, "class").unwrap(), None);

        tree.set_attribute(div, "class", "a  b a").unwrap();
        assert_eq!(tree.classes(div).unwrap(), &["a".to_string(), "b".to_string()]);
        assert_eq!(tree.attribute(div, "CLASS").unwrap().as_deref(), Some("a b"));

        assert!(tree.remove_attribute(div, "class").unwrap());
        assert!(tree.classes(div).unwrap().is_empty());
    }

    #[test]
    fn attributes_are_case_insensitive_and_ordered() {
        let mut tree = DocumentTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "Aria-Expanded", "false").unwrap();
        tree.set_attribute(div, "style", "color: red").unwrap();
        tree.set_attribute(div, "aria-expanded", "true").unwrap();

        assert_eq!(
            tree.attribute(div, "aria-expanded").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(tree.attributes(div).unwrap()[0].0, "aria-expanded");
        assert!(tree.remove_attribute(div, "STYLE").unwrap());
        assert!(!tree.has_attribute(div, "style").unwrap());
    }

    #[test]
    fn unchanged_attribute_write_is_not_recorded() {
        let mut tree = DocumentTree::new();
        let div = tree.create_element("div");
        tree.set_recording(true);
        tree.set_attribute(div, "tabindex", "0").unwrap();
        tree.set_attribute(div, "tabindex", "0").unwrap();
        assert_eq!(tree.take_records().len(), 1);
    }

    #[test]
    fn listeners_deduplicate_by_identity() {
        let mut tree = DocumentTree::new();
        let div = tree.create_element("div");
        let on_focus = handler(|_| {});
        let other = handler(|_| {});

        let first = tree.add_listener(div, "focus", &on_focus).unwrap();
        let second = tree.add_listener(div, "focus", &on_focus).unwrap();
        assert_eq!(first, second);
        tree.add_listener(div, "blur", &on_focus).unwrap();
        tree.add_listener(div, "focus", &other).unwrap();
        assert_eq!(tree.listener_count(div).unwrap(), 3);

        assert!(tree.remove_listener(div, "focus", &on_focus).unwrap());
        assert!(!tree.remove_listener(div, "focus", &on_focus).unwrap());
        assert_eq!(tree.handlers(div, "focus").len(), 1);
    }

    #[test]
    fn disabling_focused_element_drops_focus() {
        let mut tree = DocumentTree::new();
        let input = tree.create_element("input");
        tree.set_focused(Some(input));
        tree.set_disabled(input, true).unwrap();
        assert_eq!(tree.focused(), None);
        assert!(!tree.is_focusable(input).unwrap());
    }

    #[test]
    fn operations_on_destroyed_nodes_fail() {
        let mut tree = DocumentTree::new();
        let div = tree.create_element("div");
        tree.destroy(div).unwrap();
        assert_eq!(tree.add_class(div, "a"), Err(Error::InvalidNode));
        assert_eq!(tree.set_attribute(div, "a", "b"), Err(Error::InvalidNode));
        assert_eq!(tree.tag(div), Err(Error::InvalidNode));
    }
}
