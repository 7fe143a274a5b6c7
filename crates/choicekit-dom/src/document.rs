//! Shared document handle and element references.
//!
//! [`Document`] wraps a [`DocumentTree`] in an `Arc<RwLock<_>>` so that
//! components, listeners and the host can all hold it. [`Element`] pairs a
//! document with a [`NodeId`] and offers the DOM-like operations components
//! need. Element operations never fail: on a destroyed node, mutations are
//! ignored (and traced) and reads return defaults, the way a detached host
//! element silently accepts writes.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::event::{Event, EventHandler, names};
use crate::geometry::Rect;
use crate::logging::targets;
use crate::mutation::MutationRecord;
use crate::node::NodeId;
use crate::selector::parse_selector_list;
use crate::tree::DocumentTree;
use crate::Result;

/// Thread-safe, cloneable handle to an element tree.
#[derive(Clone, Default)]
pub struct Document {
    inner: Arc<RwLock<DocumentTree>>,
}

impl Document {
    /// Create a new document containing only `body`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the tree for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, DocumentTree> {
        self.inner.read()
    }

    /// Lock the tree for writing.
    ///
    /// Do not hold the guard while dispatching events or focusing elements;
    /// both take the lock themselves.
    pub fn write(&self) -> RwLockWriteGuard<'_, DocumentTree> {
        self.inner.write()
    }

    /// The `body` element.
    pub fn body(&self) -> Element {
        let body = self.read().body();
        self.element(body)
    }

    /// Wrap an existing node ID.
    pub fn element(&self, id: NodeId) -> Element {
        Element {
            document: self.clone(),
            id,
        }
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> Element {
        let id = self.write().create_element(tag);
        self.element(id)
    }

    /// The element that currently has focus.
    pub fn active_element(&self) -> Option<Element> {
        self.read().focused().map(|id| self.element(id))
    }

    /// First descendant of `body` matching `selectors`.
    pub fn query_selector(&self, selectors: &str) -> Result<Option<Element>> {
        self.body().query_selector(selectors)
    }

    /// Start or stop recording mutations.
    pub fn set_recording(&self, recording: bool) {
        self.write().set_recording(recording);
    }

    /// Drain the recorded mutations.
    pub fn take_records(&self) -> Vec<MutationRecord> {
        self.write().take_records()
    }

    /// Dispatch `event` at `target`, invoking listeners on the target and,
    /// for bubbling events, on each ancestor.
    ///
    /// Handlers run after the lock is released, so they may freely mutate
    /// the document. Returns the number of handlers invoked.
    pub fn dispatch_event(&self, target: NodeId, mut event: Event) -> usize {
        let plan: Vec<(NodeId, Vec<EventHandler>)> = {
            let tree = self.read();
            if !tree.contains(target) {
                tracing::trace!(target: targets::EVENT, ?target, "dispatch on destroyed node");
                return 0;
            }
            tree.propagation_path(target, event.bubbles())
                .into_iter()
                .map(|node| (node, tree.handlers(node, event.event_type())))
                .collect()
        };

        event.set_target(target);
        let mut invoked = 0;
        for (node, handlers) in plan {
            event.set_current_target(node);
            for handler in handlers {
                handler(&event);
                invoked += 1;
            }
        }
        tracing::trace!(
            target: targets::EVENT,
            event_type = event.event_type(),
            ?target,
            invoked,
            "dispatched event"
        );
        invoked
    }

    /// Move focus to `id`, sending `blur` to the previously focused element
    /// and `focus` to the new one. Returns false if the element cannot take
    /// focus. Focusing the already focused element sends nothing.
    pub fn focus(&self, id: NodeId) -> bool {
        let previous = {
            let mut tree = self.write();
            if !tree.is_focusable(id).unwrap_or(false) {
                return false;
            }
            let previous = tree.focused();
            if previous == Some(id) {
                return true;
            }
            tree.set_focused(Some(id));
            previous
        };

        tracing::debug!(target: targets::FOCUS, ?id, ?previous, "focus moved");
        if let Some(previous) = previous {
            self.dispatch_event(previous, Event::new(names::BLUR));
        }
        self.dispatch_event(id, Event::new(names::FOCUS));
        true
    }

    /// Remove focus from `id` if it has it, sending `blur`.
    pub fn blur(&self, id: NodeId) {
        {
            let mut tree = self.write();
            if tree.focused() != Some(id) {
                return;
            }
            tree.set_focused(None);
        }
        tracing::debug!(target: targets::FOCUS, ?id, "focus cleared");
        self.dispatch_event(id, Event::new(names::BLUR));
    }

    /// Whether two handles refer to the same document.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.read().len())
            .finish()
    }
}

/// A reference to one element of a [`Document`].
#[derive(Clone)]
pub struct Element {
    document: Document,
    id: NodeId,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.document.ptr_eq(&other.document)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("tag", &self.tag_name())
            .finish()
    }
}

impl Element {
    /// The node ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The owning document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the node still exists.
    pub fn exists(&self) -> bool {
        self.document.read().contains(self.id)
    }

    fn read<R: Default>(&self, f: impl FnOnce(&DocumentTree, NodeId) -> Result<R>) -> R {
        match f(&*self.document.read(), self.id) {
            Ok(value) => value,
            Err(err) => {
                tracing::trace!(target: targets::ELEMENT, id = ?self.id, %err, "read on element failed");
                R::default()
            }
        }
    }

    fn write<R: Default>(&self, f: impl FnOnce(&mut DocumentTree, NodeId) -> Result<R>) -> R {
        match f(&mut *self.document.write(), self.id) {
            Ok(value) => value,
            Err(err) => {
                tracing::trace!(target: targets::ELEMENT, id = ?self.id, %err, "ignored write on element");
                R::default()
            }
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Lower-cased tag name (empty once destroyed).
    pub fn tag_name(&self) -> String {
        self.read(|t, id| t.tag(id).map(str::to_string))
    }

    /// The parent element.
    pub fn parent(&self) -> Option<Element> {
        self.read(|t, id| t.parent(id))
            .map(|p| self.document.element(p))
    }

    /// Child elements in order.
    pub fn children(&self) -> Vec<Element> {
        self.read(|t, id| t.children(id).map(<[NodeId]>::to_vec))
            .into_iter()
            .map(|c| self.document.element(c))
            .collect()
    }

    /// The following sibling.
    pub fn next_sibling(&self) -> Option<Element> {
        self.read(|t, id| t.next_sibling(id))
            .map(|s| self.document.element(s))
    }

    /// Append `child` as the last child.
    pub fn append_child(&self, child: &Element) {
        self.write(|t, id| t.append_child(id, child.id));
    }

    /// Insert `child` before `reference` (or at the end).
    pub fn insert_before(&self, child: &Element, reference: Option<&Element>) {
        self.write(|t, id| t.insert_before(id, child.id, reference.map(|r| r.id)));
    }

    /// Remove `child` from this element.
    pub fn remove_child(&self, child: &Element) {
        self.write(|t, id| t.remove_child(id, child.id));
    }

    // =========================================================================
    // Classes and attributes
    // =========================================================================

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.read(|t, id| t.has_class(id, class))
    }

    /// The class list.
    pub fn class_list(&self) -> Vec<String> {
        self.read(|t, id| t.classes(id).map(<[String]>::to_vec))
    }

    /// Add a class (no-op if present).
    pub fn add_class(&self, class: &str) {
        self.write(|t, id| t.add_class(id, class));
    }

    /// Remove a class (no-op if absent).
    pub fn remove_class(&self, class: &str) {
        self.write(|t, id| t.remove_class(id, class));
    }

    /// Read an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.read(|t, id| t.attribute(id, name))
    }

    /// Whether an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.read(|t, id| t.has_attribute(id, name))
    }

    /// Set an attribute.
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.write(|t, id| t.set_attribute(id, name, value));
    }

    /// Remove an attribute.
    pub fn remove_attribute(&self, name: &str) {
        self.write(|t, id| t.remove_attribute(id, name));
    }

    // =========================================================================
    // Reflected and native properties
    // =========================================================================

    /// The `hidden` flag (reflects the `hidden` attribute).
    pub fn hidden(&self) -> bool {
        self.has_attribute("hidden")
    }

    /// Set the `hidden` flag.
    pub fn set_hidden(&self, hidden: bool) {
        if hidden {
            self.set_attribute("hidden", "");
        } else {
            self.remove_attribute("hidden");
        }
    }

    /// Text direction (reflects the `dir` attribute; empty if unset).
    pub fn dir(&self) -> String {
        self.attribute("dir").unwrap_or_default()
    }

    /// Set the text direction.
    pub fn set_dir(&self, dir: &str) {
        self.set_attribute("dir", dir);
    }

    /// Effective tab index (reflects the `tabindex` attribute).
    pub fn tab_index(&self) -> i32 {
        self.read(|t, id| t.tab_index(id))
    }

    /// Set the tab index.
    pub fn set_tab_index(&self, index: i32) {
        self.set_attribute("tabindex", &index.to_string());
    }

    /// Native value of a form control.
    pub fn value(&self) -> String {
        self.read(|t, id| t.value(id).map(str::to_string))
    }

    /// Write the native value.
    pub fn set_value(&self, value: &str) {
        self.write(|t, id| t.set_value(id, value));
    }

    /// Native disabled flag.
    pub fn disabled(&self) -> bool {
        self.read(|t, id| t.disabled(id))
    }

    /// Set the native disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        self.write(|t, id| t.set_disabled(id, disabled));
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The element's box in viewport coordinates, as last reported.
    pub fn bounding_client_rect(&self) -> Rect {
        self.read(|t, id| t.rect(id))
    }

    /// Report the element's box.
    pub fn set_bounding_client_rect(&self, rect: Rect) {
        self.write(|t, id| t.set_rect(id, rect));
    }

    // =========================================================================
    // Events and focus
    // =========================================================================

    /// Register `handler` for `event_type`.
    pub fn add_event_listener(&self, event_type: &str, handler: &EventHandler) {
        self.write(|t, id| t.add_listener(id, event_type, handler).map(|_| ()));
    }

    /// Unregister `handler` for `event_type`.
    pub fn remove_event_listener(&self, event_type: &str, handler: &EventHandler) {
        self.write(|t, id| t.remove_listener(id, event_type, handler));
    }

    /// Dispatch `event` at this element. Returns the number of handlers run.
    pub fn dispatch_event(&self, event: Event) -> usize {
        self.document.dispatch_event(self.id, event)
    }

    /// Give this element focus. Returns false if it cannot take focus.
    pub fn focus(&self) -> bool {
        self.document.focus(self.id)
    }

    /// Take focus away from this element.
    pub fn blur(&self) {
        self.document.blur(self.id);
    }

    /// Whether this element has focus.
    pub fn is_focused(&self) -> bool {
        self.document.read().focused() == Some(self.id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First descendant matching `selectors`.
    pub fn query_selector(&self, selectors: &str) -> Result<Option<Element>> {
        let list = parse_selector_list(selectors)?;
        let found = self.document.read().query_selector(self.id, &list)?;
        Ok(found.map(|id| self.document.element(id)))
    }
}

static_assertions::assert_impl_all!(Document: Send, Sync);
static_assertions::assert_impl_all!(Element: Send, Sync);
