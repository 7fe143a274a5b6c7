//! The dropdown panel shown inside a container.

use choicekit_dom::{Element, utils};

use crate::config::{ChoicesConfig, ClassNames, PassedElementType};
use crate::logging::targets;

/// Construction parameters for a [`Dropdown`].
#[derive(Debug, Clone)]
pub struct DropdownOptions {
    /// The panel element.
    pub element: Element,
    /// Kind of form control the widget enhances.
    pub passed_element_type: PassedElementType,
    /// Presentation classes.
    pub class_names: ClassNames,
}

impl DropdownOptions {
    /// Options with default classes.
    pub fn new(element: Element, passed_element_type: PassedElementType) -> Self {
        Self {
            element,
            passed_element_type,
            class_names: ClassNames::default(),
        }
    }

    /// Set the presentation classes.
    pub fn with_class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    /// Take classes from a widget configuration.
    pub fn with_config(self, config: &ChoicesConfig) -> Self {
        self.with_class_names(config.class_names.clone())
    }
}

/// The panel listing choices.
///
/// `is_active` is tracked independently of the container's open flag;
/// keeping the two in step is up to the caller.
#[derive(Debug)]
pub struct Dropdown {
    element: Element,
    passed_element_type: PassedElementType,
    class_names: ClassNames,
    is_active: bool,
}

impl Dropdown {
    /// Create a dropdown over `options.element`.
    pub fn new(options: DropdownOptions) -> Self {
        Self {
            element: options.element,
            passed_element_type: options.passed_element_type,
            class_names: options.class_names,
            is_active: false,
        }
    }

    /// The panel element.
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

    /// Whether the panel is shown.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Bottom edge of the panel in viewport coordinates, read from the
    /// current layout box.
    pub fn distance_from_top_window(&self) -> f64 {
        self.element.bounding_client_rect().bottom()
    }

    /// First descendant of the panel matching `selector`.
    ///
    /// A selector that fails to parse matches nothing.
    pub fn get_child(&self, selector: &str) -> Option<Element> {
        match self.element.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(target: targets::DROPDOWN, selector, %err, "invalid child selector");
                None
            }
        }
    }

    /// Show the panel.
    pub fn show(&mut self) -> &mut Self {
        utils::add_classes(&self.element, &self.class_names.active_state);
        self.element.set_attribute("aria-expanded", "true");
        self.is_active = true;
        tracing::debug!(target: targets::DROPDOWN, "dropdown shown");
        self
    }

    /// Hide the panel.
    pub fn hide(&mut self) -> &mut Self {
        utils::remove_classes(&self.element, &self.class_names.active_state);
        self.element.set_attribute("aria-expanded", "false");
        self.is_active = false;
        tracing::debug!(target: targets::DROPDOWN, "dropdown hidden");
        self
    }
}

static_assertions::assert_impl_all!(Dropdown: Send, Sync);
