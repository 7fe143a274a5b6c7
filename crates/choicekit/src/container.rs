//! The outer interactive surface of a widget.
//!
//! A [`Container`] anchors the dropdown panel. It owns the open, flipped,
//! focused, disabled and loading state of the widget and keeps each flag in
//! step with the classes and accessibility attributes on its surface.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use choicekit::{Container, ContainerOptions, PassedElementType, Position};
//! use choicekit_dom::{Document, FixedViewport};
//!
//! let doc = Document::new();
//! let surface = doc.create_element("div");
//! let viewport = Arc::new(FixedViewport::new(600.0));
//!
//! let mut container = Container::new(
//!     ContainerOptions::new(surface.clone(), PassedElementType::SelectOne, viewport)
//!         .with_position(Position::Auto),
//! );
//!
//! // The dropdown's bottom edge would land below the viewport.
//! container.open(750.0);
//! assert!(container.is_open());
//! assert!(container.is_flipped());
//! assert_eq!(surface.attribute("aria-expanded").as_deref(), Some("true"));
//!
//! container.close();
//! assert!(!container.is_flipped());
//! assert!(!surface.has_class("is-flipped"));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use choicekit_dom::event::names;
use choicekit_dom::{Element, EventHandler, Viewport, handler, utils};

use crate::config::{ChoicesConfig, ClassNames, PassedElementType, Position};
use crate::logging::targets;

const ARIA_EXPANDED: &str = "aria-expanded";
const ARIA_ACTIVE_DESCENDANT: &str = "aria-activedescendant";
const ARIA_DISABLED: &str = "aria-disabled";
const ARIA_BUSY: &str = "aria-busy";

// ============================================================================
// Options
// ============================================================================

/// Construction parameters for a [`Container`].
#[derive(Clone)]
pub struct ContainerOptions {
    /// The surface element. The container owns it exclusively.
    pub element: Element,
    /// Kind of form control the widget enhances.
    pub passed_element_type: PassedElementType,
    /// Presentation classes.
    pub class_names: ClassNames,
    /// Dropdown placement.
    pub position: Position,
    /// Viewport queried by flip decisions.
    pub viewport: Arc<dyn Viewport>,
}

impl ContainerOptions {
    /// Options with default classes and automatic placement.
    pub fn new(
        element: Element,
        passed_element_type: PassedElementType,
        viewport: Arc<dyn Viewport>,
    ) -> Self {
        Self {
            element,
            passed_element_type,
            class_names: ClassNames::default(),
            position: Position::default(),
            viewport,
        }
    }

    /// Set the presentation classes.
    pub fn with_class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    /// Set the dropdown placement.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Take placement and classes from a widget configuration.
    pub fn with_config(self, config: &ChoicesConfig) -> Self {
        self.with_position(config.position)
            .with_class_names(config.class_names.clone())
    }
}

impl fmt::Debug for ContainerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerOptions")
            .field("element", &self.element)
            .field("passed_element_type", &self.passed_element_type)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Container
// ============================================================================

/// The outer surface of a widget and its interaction state.
///
/// `is_flipped` is only ever true while `is_open` is.
pub struct Container {
    element: Element,
    passed_element_type: PassedElementType,
    class_names: ClassNames,
    position: Position,
    viewport: Arc<dyn Viewport>,
    is_open: bool,
    is_flipped: bool,
    is_disabled: bool,
    is_loading: bool,
    /// Written by the focus and blur handlers.
    is_focussed: Arc<AtomicBool>,
    on_focus: EventHandler,
    on_blur: EventHandler,
}

impl Container {
    /// Create a container over `options.element`.
    ///
    /// Focus tracking starts once [`add_event_listeners`](Self::add_event_listeners)
    /// is called.
    pub fn new(options: ContainerOptions) -> Self {
        let is_focussed = Arc::new(AtomicBool::new(false));
        let on_focus = {
            let is_focussed = Arc::clone(&is_focussed);
            handler(move |_| is_focussed.store(true, Ordering::SeqCst))
        };
        let on_blur = {
            let is_focussed = Arc::clone(&is_focussed);
            handler(move |_| is_focussed.store(false, Ordering::SeqCst))
        };

        Self {
            element: options.element,
            passed_element_type: options.passed_element_type,
            class_names: options.class_names,
            position: options.position,
            viewport: options.viewport,
            is_open: false,
            is_flipped: false,
            is_disabled: false,
            is_loading: false,
            is_focussed,
            on_focus,
            on_blur,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The surface element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Kind of form control the widget enhances.
    pub fn passed_element_type(&self) -> PassedElementType {
        self.passed_element_type
    }

    /// Presentation classes.
    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    /// Dropdown placement.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether the dropdown renders above the container.
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Whether the surface has focus, as last reported by focus and blur
    /// events.
    pub fn is_focussed(&self) -> bool {
        self.is_focussed.load(Ordering::SeqCst)
    }

    /// Whether the container is disabled.
    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    /// Whether the container shows its loading state.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    // =========================================================================
    // Focus tracking
    // =========================================================================

    /// Start tracking focus and blur on the surface.
    ///
    /// Calling this again does not register the handlers twice.
    pub fn add_event_listeners(&self) {
        self.element.add_event_listener(names::FOCUS, &self.on_focus);
        self.element.add_event_listener(names::BLUR, &self.on_blur);
    }

    /// Stop tracking focus and blur.
    pub fn remove_event_listeners(&self) {
        self.element.remove_event_listener(names::FOCUS, &self.on_focus);
        self.element.remove_event_listener(names::BLUR, &self.on_blur);
    }

    /// Focus the surface unless it already has focus.
    pub fn focus(&self) {
        if !self.is_focussed() {
            self.element.focus();
        }
    }

    /// Add the focus classes. Does not change [`is_focussed`](Self::is_focussed).
    pub fn add_focus_state(&self) {
        utils::add_classes(&self.element, &self.class_names.focus_state);
    }

    /// Remove the focus classes. Does not change [`is_focussed`](Self::is_focussed).
    pub fn remove_focus_state(&self) {
        utils::remove_classes(&self.element, &self.class_names.focus_state);
    }

    // =========================================================================
    // Open and flip
    // =========================================================================

    /// Whether a dropdown whose bottom edge sits at `dropdown_bottom` should
    /// render above the container instead.
    ///
    /// Non-finite positions never flip. With [`Position::Auto`] the viewport
    /// is queried on every call.
    pub fn should_flip(&self, dropdown_bottom: f64) -> bool {
        if !dropdown_bottom.is_finite() {
            return false;
        }

        match self.position {
            Position::Auto => !self.viewport.matches_min_height(dropdown_bottom + 1.0),
            Position::Top => true,
            Position::Bottom => false,
        }
    }

    /// Point the accessible active descendant at the element with `id`.
    pub fn set_active_descendant(&self, id: &str) {
        self.element.set_attribute(ARIA_ACTIVE_DESCENDANT, id);
    }

    /// Clear the accessible active descendant.
    pub fn remove_active_descendant(&self) {
        self.element.remove_attribute(ARIA_ACTIVE_DESCENDANT);
    }

    /// Open the dropdown, flipping it if there is no room below.
    pub fn open(&mut self, dropdown_bottom: f64) {
        utils::add_classes(&self.element, &self.class_names.open_state);
        self.element.set_attribute(ARIA_EXPANDED, "true");
        self.is_open = true;

        if self.should_flip(dropdown_bottom) {
            utils::add_classes(&self.element, &self.class_names.flipped_state);
            self.is_flipped = true;
        }
        tracing::debug!(
            target: targets::CONTAINER,
            dropdown_bottom,
            flipped = self.is_flipped,
            "container opened"
        );
    }

    /// Close the dropdown and clear any flip.
    pub fn close(&mut self) {
        utils::remove_classes(&self.element, &self.class_names.open_state);
        self.element.set_attribute(ARIA_EXPANDED, "false");
        self.remove_active_descendant();
        self.is_open = false;

        if self.is_flipped {
            utils::remove_classes(&self.element, &self.class_names.flipped_state);
            self.is_flipped = false;
        }
        tracing::debug!(target: targets::CONTAINER, "container closed");
    }

    // =========================================================================
    // Enabled state
    // =========================================================================

    /// Enable the container. Single selects become keyboard reachable again.
    pub fn enable(&mut self) {
        utils::remove_classes(&self.element, &self.class_names.disabled_state);
        self.element.remove_attribute(ARIA_DISABLED);
        if self.passed_element_type == PassedElementType::SelectOne {
            self.element.set_tab_index(0);
        }
        self.is_disabled = false;
        tracing::debug!(target: targets::CONTAINER, "container enabled");
    }

    /// Disable the container. Single selects drop out of keyboard navigation.
    pub fn disable(&mut self) {
        utils::add_classes(&self.element, &self.class_names.disabled_state);
        self.element.set_attribute(ARIA_DISABLED, "true");
        if self.passed_element_type == PassedElementType::SelectOne {
            self.element.set_tab_index(-1);
        }
        self.is_disabled = true;
        tracing::debug!(target: targets::CONTAINER, "container disabled");
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Move `element` inside the surface, putting the surface where
    /// `element` was.
    pub fn wrap(&self, element: &Element) {
        utils::wrap(element, &self.element);
    }

    /// Put `element` back where the surface is and detach the surface.
    ///
    /// Does nothing if the surface has no parent.
    pub fn unwrap(&self, element: &Element) {
        let Some(parent) = self.element.parent() else {
            tracing::trace!(target: targets::CONTAINER, "unwrap on detached container");
            return;
        };
        parent.insert_before(element, Some(&self.element));
        parent.remove_child(&self.element);
    }

    // =========================================================================
    // Loading state
    // =========================================================================

    /// Show the loading state.
    pub fn add_loading_state(&mut self) {
        utils::add_classes(&self.element, &self.class_names.loading_state);
        self.element.set_attribute(ARIA_BUSY, "true");
        self.is_loading = true;
    }

    /// Clear the loading state.
    pub fn remove_loading_state(&mut self) {
        utils::remove_classes(&self.element, &self.class_names.loading_state);
        self.element.remove_attribute(ARIA_BUSY);
        self.is_loading = false;
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        self.remove_event_listeners();
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("element", &self.element)
            .field("passed_element_type", &self.passed_element_type)
            .field("position", &self.position)
            .field("is_open", &self.is_open)
            .field("is_flipped", &self.is_flipped)
            .field("is_focussed", &self.is_focussed())
            .field("is_disabled", &self.is_disabled)
            .field("is_loading", &self.is_loading)
            .finish()
    }
}

static_assertions::assert_impl_all!(Container: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use choicekit_dom::{Document, FixedViewport, MutationRecord};

    fn container(position: Position, kind: PassedElementType) -> (Document, Container) {
        let doc = Document::new();
        let surface = doc.create_element("div");
        doc.body().append_child(&surface);
        let viewport = Arc::new(FixedViewport::new(500.0));
        let container =
            Container::new(ContainerOptions::new(surface, kind, viewport).with_position(position));
        (doc, container)
    }

    #[test]
    fn starts_closed_and_enabled() {
        let (_doc, container) = container(Position::Auto, PassedElementType::SelectOne);
        assert!(!container.is_open());
        assert!(!container.is_flipped());
        assert!(!container.is_focussed());
        assert!(!container.is_disabled());
        assert!(!container.is_loading());
    }

    #[test]
    fn auto_flips_only_past_viewport() {
        let (_doc, container) = container(Position::Auto, PassedElementType::SelectOne);
        assert!(!container.should_flip(100.0));
        assert!(!container.should_flip(499.0));
        assert!(container.should_flip(500.0));
        assert!(container.should_flip(900.0));
    }

    #[test]
    fn non_finite_never_flips() {
        for position in [Position::Auto, Position::Top, Position::Bottom] {
            let (_doc, container) = container(position, PassedElementType::Text);
            assert!(!container.should_flip(f64::NAN));
            assert!(!container.should_flip(f64::INFINITY));
            assert!(!container.should_flip(f64::NEG_INFINITY));
        }
    }

    #[test]
    fn fixed_positions_ignore_geometry() {
        let (_doc, top) = container(Position::Top, PassedElementType::Text);
        let (_doc, bottom) = container(Position::Bottom, PassedElementType::Text);
        for bottom_edge in [-50.0, 0.0, 10.0, 499.0, 501.0, 1e9] {
            assert!(top.should_flip(bottom_edge));
            assert!(!bottom.should_flip(bottom_edge));
        }
    }

    #[test]
    fn open_applies_effects_in_order() {
        let (doc, mut container) = container(Position::Top, PassedElementType::SelectOne);
        let id = container.element().id();
        doc.set_recording(true);

        container.open(10.0);

        assert_eq!(
            doc.take_records(),
            vec![
                MutationRecord::ClassAdded {
                    node: id,
                    class: "is-open".into()
                },
                MutationRecord::AttributeSet {
                    node: id,
                    name: "aria-expanded".into(),
                    value: "true".into()
                },
                MutationRecord::ClassAdded {
                    node: id,
                    class: "is-flipped".into()
                },
            ]
        );
        assert!(container.is_open());
        assert!(container.is_flipped());
    }

    #[test]
    fn open_twice_keeps_single_classes() {
        let (_doc, mut container) = container(Position::Bottom, PassedElementType::SelectOne);
        container.open(10.0);
        container.open(10.0);
        assert_eq!(container.element().class_list(), vec!["is-open"]);
    }

    #[test]
    fn close_clears_flip_and_descendant() {
        let (_doc, mut container) = container(Position::Auto, PassedElementType::SelectOne);
        container.open(800.0);
        container.set_active_descendant("choices-item-3");
        assert!(container.is_flipped());

        container.close();
        let surface = container.element();
        assert!(!container.is_open());
        assert!(!container.is_flipped());
        assert!(!surface.has_class("is-open"));
        assert!(!surface.has_class("is-flipped"));
        assert_eq!(surface.attribute("aria-expanded").as_deref(), Some("false"));
        assert!(!surface.has_attribute("aria-activedescendant"));
    }

    #[test]
    fn flip_is_evaluated_on_every_open() {
        let doc = Document::new();
        let surface = doc.create_element("div");
        let viewport = Arc::new(FixedViewport::new(300.0));
        let mut container = Container::new(ContainerOptions::new(
            surface,
            PassedElementType::SelectOne,
            viewport.clone(),
        ));

        container.open(400.0);
        assert!(container.is_flipped());
        container.close();

        viewport.set_height(1000.0);
        container.open(400.0);
        assert!(!container.is_flipped());
        assert!(!container.element().has_class("is-flipped"));
    }

    #[test]
    fn focus_state_classes_leave_flag_alone() {
        let (_doc, container) = container(Position::Auto, PassedElementType::Text);
        container.add_focus_state();
        assert!(container.element().has_class("is-focused"));
        assert!(!container.is_focussed());
        container.remove_focus_state();
        assert!(!container.element().has_class("is-focused"));
    }

    #[test]
    fn focus_and_blur_events_drive_flag() {
        let (_doc, container) = container(Position::Auto, PassedElementType::SelectOne);
        let surface = container.element().clone();
        surface.set_tab_index(0);
        container.add_event_listeners();
        container.add_event_listeners();
        assert_eq!(surface.document().read().listener_count(surface.id()).unwrap(), 2);

        container.focus();
        assert!(container.is_focussed());
        surface.blur();
        assert!(!container.is_focussed());

        container.remove_event_listeners();
        surface.focus();
        assert!(!container.is_focussed());
    }

    #[test]
    fn focus_skips_when_already_focussed() {
        let (doc, container) = container(Position::Auto, PassedElementType::SelectOne);
        let surface = container.element().clone();
        surface.set_tab_index(0);
        container.add_event_listeners();
        container.focus();

        let other = doc.create_element("input");
        doc.body().append_child(&other);
        // Focus moved without a blur reaching the container.
        container.remove_event_listeners();
        other.focus();
        container.add_event_listeners();

        container.focus();
        assert!(other.is_focused());
    }

    #[test]
    fn enable_disable_toggle_tabindex_for_single_select() {
        let (_doc, mut container) = container(Position::Auto, PassedElementType::SelectOne);
        let surface = container.element().clone();
        surface.set_tab_index(0);

        container.disable();
        assert!(container.is_disabled());
        assert!(surface.has_class("is-disabled"));
        assert_eq!(surface.attribute("aria-disabled").as_deref(), Some("true"));
        assert_eq!(surface.attribute("tabindex").as_deref(), Some("-1"));

        container.enable();
        assert!(!container.is_disabled());
        assert!(!surface.has_class("is-disabled"));
        assert!(!surface.has_attribute("aria-disabled"));
        assert_eq!(surface.attribute("tabindex").as_deref(), Some("0"));
    }

    #[test]
    fn enable_disable_leave_tabindex_for_other_types() {
        for kind in [PassedElementType::Text, PassedElementType::SelectMultiple] {
            let (_doc, mut container) = container(Position::Auto, kind);
            container.disable();
            assert!(!container.element().has_attribute("tabindex"));
            container.enable();
            assert!(!container.element().has_attribute("tabindex"));
        }
    }

    #[test]
    fn loading_state() {
        let (_doc, mut container) = container(Position::Auto, PassedElementType::Text);
        container.add_loading_state();
        assert!(container.is_loading());
        assert!(container.element().has_class("is-loading"));
        assert_eq!(
            container.element().attribute("aria-busy").as_deref(),
            Some("true")
        );

        container.remove_loading_state();
        assert!(!container.is_loading());
        assert!(!container.element().has_class("is-loading"));
        assert!(!container.element().has_attribute("aria-busy"));
    }

    #[test]
    fn wrap_then_unwrap_restores_position() {
        let doc = Document::new();
        let body = doc.body();
        let select = doc.create_element("select");
        let footer = doc.create_element("p");
        body.append_child(&select);
        body.append_child(&footer);

        let surface = doc.create_element("div");
        let container = Container::new(ContainerOptions::new(
            surface.clone(),
            PassedElementType::SelectOne,
            Arc::new(FixedViewport::new(500.0)),
        ));

        container.wrap(&select);
        assert_eq!(body.children(), vec![surface.clone(), footer.clone()]);
        assert_eq!(select.parent(), Some(surface.clone()));

        container.unwrap(&select);
        assert_eq!(body.children(), vec![select.clone(), footer]);
        assert_eq!(surface.parent(), None);
    }

    #[test]
    fn unwrap_detached_is_noop() {
        let doc = Document::new();
        let surface = doc.create_element("div");
        let select = doc.create_element("select");
        surface.append_child(&select);
        let container = Container::new(ContainerOptions::new(
            surface.clone(),
            PassedElementType::SelectOne,
            Arc::new(FixedViewport::new(500.0)),
        ));

        container.unwrap(&select);
        assert_eq!(select.parent(), Some(surface));
    }

    #[test]
    fn custom_class_lists_apply_every_class() {
        let doc = Document::new();
        let surface = doc.create_element("div");
        let class_names = ClassNames {
            open_state: "is-open is-expanded".into(),
            ..ClassNames::default()
        };
        let mut container = Container::new(
            ContainerOptions::new(
                surface.clone(),
                PassedElementType::Text,
                Arc::new(FixedViewport::new(500.0)),
            )
            .with_class_names(class_names),
        );

        container.open(0.0);
        assert_eq!(surface.class_list(), vec!["is-open", "is-expanded"]);
        container.close();
        assert!(surface.class_list().is_empty());
    }

    #[test]
    fn drop_removes_listeners() {
        let (_doc, container) = container(Position::Auto, PassedElementType::SelectOne);
        let surface = container.element().clone();
        container.add_event_listeners();
        assert_eq!(surface.document().read().listener_count(surface.id()).unwrap(), 2);

        drop(container);
        assert_eq!(surface.document().read().listener_count(surface.id()).unwrap(), 0);
    }
}
