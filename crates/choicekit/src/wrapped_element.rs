//! Proxy over the native form control a widget replaces.
//!
//! The control stays in the document, hidden, so that form submission and
//! native value semantics keep working. [`WrappedElement`] hides and restores
//! it and forwards value, direction, disabled state and widget events.

use choicekit_dom::{Element, utils};
use serde_json::Value;

use crate::config::{ChoicesConfig, ClassNames};
use crate::events::EventType;
use crate::logging::targets;
use crate::{Error, Result};

/// Marker set on a concealed control.
const DATA_CHOICE: &str = "data-choice";
/// Backup of the control's inline style while concealed.
const DATA_ORIG_STYLE: &str = "data-choice-orig-style";
const ACTIVE: &str = "active";

/// Construction parameters for a [`WrappedElement`].
#[derive(Debug, Clone)]
pub struct WrappedElementOptions {
    /// The form control. Must be an `<input>` or `<select>`.
    pub element: Element,
    /// Presentation classes.
    pub class_names: ClassNames,
}

impl WrappedElementOptions {
    /// Options with default classes.
    pub fn new(element: Element) -> Self {
        Self {
            element,
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

/// A native `<input>` or `<select>` enhanced by a widget.
///
/// The control is borrowed: dropping the wrapper leaves it in place.
#[derive(Debug)]
pub struct WrappedElement {
    element: Element,
    class_names: ClassNames,
    is_disabled: bool,
}

impl WrappedElement {
    /// Wrap `options.element`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidElement`] if the element is not an `<input>`
    /// or `<select>`. The element is left untouched.
    pub fn new(options: WrappedElementOptions) -> Result<Self> {
        let tag = options.element.tag_name();
        if tag != "input" && tag != "select" {
            tracing::warn!(target: targets::WRAPPED_ELEMENT, tag = %tag, "refusing to wrap element");
            return Err(Error::invalid_element(tag));
        }

        Ok(Self {
            element: options.element,
            class_names: options.class_names,
            is_disabled: false,
        })
    }

    /// The form control.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Presentation classes.
    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    /// Whether the control is disabled.
    ///
    /// Only [`enable`](Self::enable) and [`disable`](Self::disable) change
    /// this flag. A control that is already disabled when wrapped still
    /// reports `false` until one of them is called.
    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    /// Whether the control is currently concealed, read from its marker
    /// attribute.
    pub fn is_active(&self) -> bool {
        self.element.attribute(DATA_CHOICE).as_deref() == Some(ACTIVE)
    }

    /// The control's text direction.
    pub fn dir(&self) -> String {
        self.element.dir()
    }

    /// The control's current value.
    pub fn value(&self) -> String {
        self.element.value()
    }

    /// Write the control's value.
    pub fn set_value(&self, value: &str) {
        self.element.set_value(value);
    }

    /// Hide the control behind the widget.
    ///
    /// Any inline style is kept aside until [`reveal`](Self::reveal).
    pub fn conceal(&self) {
        utils::add_classes(&self.element, &self.class_names.input);
        self.element.set_hidden(true);
        self.element.set_tab_index(-1);

        if let Some(style) = self.element.attribute("style")
            && !style.is_empty()
        {
            self.element.set_attribute(DATA_ORIG_STYLE, &style);
        }

        self.element.set_attribute(DATA_CHOICE, ACTIVE);
        tracing::debug!(target: targets::WRAPPED_ELEMENT, "control concealed");
    }

    /// Show the control again, restoring its inline style.
    pub fn reveal(&self) {
        utils::remove_classes(&self.element, &self.class_names.input);
        self.element.set_hidden(false);
        self.element.remove_attribute("tabindex");

        match self.element.attribute(DATA_ORIG_STYLE) {
            Some(style) if !style.is_empty() => {
                self.element.remove_attribute(DATA_ORIG_STYLE);
                self.element.set_attribute("style", &style);
            }
            _ => self.element.remove_attribute("style"),
        }
        self.element.remove_attribute(DATA_CHOICE);

        // Re-assigning the value refreshes what the control displays.
        let value = self.element.value();
        self.element.set_value(&value);
        tracing::debug!(target: targets::WRAPPED_ELEMENT, "control revealed");
    }

    /// Enable the control.
    pub fn enable(&mut self) {
        self.element.remove_attribute("disabled");
        self.element.set_disabled(false);
        self.is_disabled = false;
    }

    /// Disable the control.
    pub fn disable(&mut self) {
        self.element.set_attribute("disabled", "");
        self.element.set_disabled(true);
        self.is_disabled = true;
    }

    /// Dispatch a bubbling widget event from the control.
    pub fn trigger_event(&self, event_type: EventType, detail: Option<Value>) {
        let invoked = utils::dispatch_event(&self.element, event_type.as_str(), detail);
        tracing::trace!(target: targets::WRAPPED_ELEMENT, %event_type, invoked, "triggered event");
    }
}

static_assertions::assert_impl_all!(WrappedElement: Send, Sync);
